use structopt::StructOpt;

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Manage an in-memory to-do list.
    Todo,
    /// Evaluate simple expressions such as `4 * 5`.
    Calc,
    /// Guess a secret number.
    Guess {
        /// The biggest number the secret can be.
        #[structopt(long, default_value = "100")]
        max: u32,

        /// Seed for the secret, for reproducible games.
        #[structopt(long)]
        seed: Option<u64>,
    },
    /// Answer a short trivia quiz.
    Quiz {
        /// Seed for the question order.
        #[structopt(long)]
        seed: Option<u64>,
    },
}

#[derive(Debug, StructOpt)]
#[structopt(name = "primer", about = "Small beginner exercises.")]
pub struct CommandLineArgs {
    #[structopt(subcommand)]
    pub action: Command,

    /// Log state changes to stderr.
    #[structopt(short, long)]
    pub verbose: bool,

    /// Only log errors.
    #[structopt(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
