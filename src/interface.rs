use std::io::Write;

use anyhow::{Context, Result};
use mockable::Clock;
use prettytable::{format, Table};
use tracing::debug;

use crate::model::{Task, TaskList, TaskListError, TaskState};

/// Width used to wrap long descriptions in the task table.
const DESCRIPTION_WIDTH: usize = 40;

/// Add a task at the end of the list and confirm it.
pub fn add_task(
    out: &mut impl Write,
    list: &mut TaskList,
    title: String,
    description: String,
    clock: &impl Clock,
) -> Result<()> {
    let task = list.add(title, description, clock);
    writeln!(out, "Task '{}' added successfully!", task.title())
        .context("Failed to write add confirmation.")?;
    Ok(())
}

/// Print every task, 1-indexed, in insertion order.
pub fn list(out: &mut impl Write, list: &TaskList) -> Result<()> {
    if list.is_empty() {
        writeln!(out, "No tasks yet.").context("Failed to write task list.")?;
        return Ok(());
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(row!["#", "status", "task", "description", "created"]);

    for (i, task) in list.tasks().iter().enumerate() {
        let position = i + 1;
        table.add_row(row![
            position,
            fmt_state(task),
            task.title(),
            fmt_description(task),
            fmt_created_at(task)
        ]);
    }

    table.print(out).context("Failed to write task list.")?;
    Ok(())
}

/// Mark the task at the given position as done. An invalid position is
/// reported to the user and otherwise ignored.
pub fn complete_task(out: &mut impl Write, list: &mut TaskList, position: i64) -> Result<()> {
    let written = match list.complete(position) {
        Ok(task) => writeln!(out, "Task '{}' marked as completed!", task.title()),
        Err(e) => report_invalid_position(out, e),
    };
    written.context("Failed to write completion result.")?;
    Ok(())
}

/// Delete the task at the given position. An invalid position is
/// reported to the user and otherwise ignored.
pub fn delete_task(out: &mut impl Write, list: &mut TaskList, position: i64) -> Result<()> {
    let written = match list.delete(position) {
        Ok(task) => writeln!(out, "Task '{}' deleted.", task.title()),
        Err(e) => report_invalid_position(out, e),
    };
    written.context("Failed to write deletion result.")?;
    Ok(())
}

fn report_invalid_position(out: &mut impl Write, error: TaskListError) -> std::io::Result<()> {
    debug!("{}", error);
    writeln!(out, "Invalid task number.")
}

fn fmt_state(task: &Task) -> &'static str {
    match task.state() {
        TaskState::Done => "Done",
        TaskState::Pending => "Not done",
    }
}

fn fmt_description(task: &Task) -> String {
    textwrap::fill(task.description(), DESCRIPTION_WIDTH)
}

/// Creation time with minute precision.
fn fmt_created_at(task: &Task) -> String {
    task.created_at().format("%Y-%m-%d %H:%M").to_string()
}
