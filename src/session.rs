use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use mockable::Clock;
use tracing::debug;

use crate::interface;
use crate::model::TaskList;
use crate::prompt::ask;

const MENU: &str = "\n--- ToDo App ---
1. Add task
2. List tasks
3. Complete task
4. Delete task
5. Exit";

/// Run the interactive to-do menu until the user exits or input ends.
/// Returns the tasks as they were when the session finished.
pub fn run(
    input: &mut impl BufRead,
    out: &mut impl Write,
    clock: &impl Clock,
) -> Result<TaskList> {
    let mut tasks = TaskList::new();

    loop {
        writeln!(out, "{}", MENU).context("Failed to write menu.")?;
        let choice = match ask(input, out, "Choose an option (1-5): ")? {
            Some(choice) => choice,
            None => break,
        };
        debug!(choice = %choice.trim(), "menu choice");

        match choice.trim() {
            "1" => {
                let title = match ask(input, out, "Enter task title: ")? {
                    Some(title) => title,
                    None => break,
                };
                let description = match ask(input, out, "Enter task description: ")? {
                    Some(description) => description,
                    None => break,
                };
                interface::add_task(out, &mut tasks, title, description, clock)?;
            }
            "2" => interface::list(out, &tasks)?,
            "3" => {
                interface::list(out, &tasks)?;
                match read_position(input, out, "Enter task number to complete: ")? {
                    Answer::Position(p) => interface::complete_task(out, &mut tasks, p)?,
                    Answer::NotANumber => {}
                    Answer::Eof => break,
                }
            }
            "4" => {
                interface::list(out, &tasks)?;
                match read_position(input, out, "Enter task number to delete: ")? {
                    Answer::Position(p) => interface::delete_task(out, &mut tasks, p)?,
                    Answer::NotANumber => {}
                    Answer::Eof => break,
                }
            }
            "5" => {
                writeln!(out, "Exiting ToDo App. Goodbye!").context("Failed to write farewell.")?;
                return Ok(tasks);
            }
            _ => {
                writeln!(out, "Invalid option. Try again.").context("Failed to write menu error.")?
            }
        }
    }

    debug!("input closed, leaving session");
    Ok(tasks)
}

enum Answer {
    Position(i64),
    NotANumber,
    Eof,
}

// Numeric parsing is guarded here; the task list only ever sees integers.
fn read_position(input: &mut impl BufRead, out: &mut impl Write, message: &str) -> Result<Answer> {
    let line = match ask(input, out, message)? {
        Some(line) => line,
        None => return Ok(Answer::Eof),
    };

    match line.trim().parse::<i64>() {
        Ok(position) => Ok(Answer::Position(position)),
        Err(_) => {
            writeln!(out, "Please enter a valid number.").context("Failed to write input error.")?;
            Ok(Answer::NotANumber)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskState;
    use mockable::DefaultClock;
    use rstest::rstest;

    fn run_script(script: &str) -> (TaskList, String) {
        let mut out = Vec::new();
        let tasks = run(&mut script.as_bytes(), &mut out, &DefaultClock).unwrap();
        (tasks, String::from_utf8(out).unwrap())
    }

    #[rstest]
    fn exit_immediately() {
        let (tasks, text) = run_script("5\n");
        assert!(tasks.is_empty());
        assert!(text.contains("--- ToDo App ---"));
        assert!(text.ends_with("Exiting ToDo App. Goodbye!\n"));
    }

    #[rstest]
    fn end_of_input_ends_session() {
        let (tasks, text) = run_script("1\nhalf a task\n");
        assert!(tasks.is_empty());
        assert!(!text.contains("Goodbye"));
    }

    #[rstest]
    fn scripted_milk_and_bob() {
        let script = "1\nBuy milk\n2%\n1\nCall Bob\n\n2\n3\n1\n4\n2\n3\n5\n5\n";
        let (tasks, text) = run_script(script);

        assert!(text.contains("Task 'Buy milk' added successfully!"));
        assert!(text.contains("Task 'Call Bob' added successfully!"));
        assert!(text.contains("Task 'Buy milk' marked as completed!"));
        assert!(text.contains("Task 'Call Bob' deleted."));
        assert!(text.contains("Invalid task number."));

        assert_eq!(tasks.len(), 1);
        let task = tasks.get(1).unwrap();
        assert_eq!(task.title(), "Buy milk");
        assert_eq!(task.state(), TaskState::Done);
    }

    #[rstest]
    #[case("3\nabc\n5\n")]
    #[case("4\n\n5\n")]
    #[case("4\n1.5\n5\n")]
    fn non_numeric_position_leaves_list_alone(#[case] tail: &str) {
        let script = format!("1\nkeep me\n\n{}", tail);
        let (tasks, text) = run_script(&script);
        assert!(text.contains("Please enter a valid number."));
        assert_eq!(tasks.len(), 1);
        assert!(!tasks.get(1).unwrap().is_done());
    }

    #[rstest]
    #[case("9")]
    #[case("add")]
    #[case("")]
    fn unknown_choices_are_rejected(#[case] choice: &str) {
        let (_, text) = run_script(&format!("{}\n5\n", choice));
        assert!(text.contains("Invalid option. Try again."));
    }

    #[rstest]
    fn listing_empty_session() {
        let (_, text) = run_script("2\n5\n");
        assert!(text.contains("No tasks yet."));
    }
}
