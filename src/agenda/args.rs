use agenda::model::Weekday;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "agenda")]
#[command(about = "Weekly school agenda: fill in lessons, generate one document per class", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage teachers
    #[command(alias = "t")]
    Teacher {
        #[command(subcommand)]
        action: TeacherAction,
    },

    /// Manage a teacher's subjects
    #[command(alias = "s")]
    Subject {
        #[command(subcommand)]
        action: SubjectAction,
    },

    /// Manage the class groups a subject is taught to
    #[command(alias = "g")]
    Group {
        #[command(subcommand)]
        action: GroupAction,
    },

    /// Set the text of a lesson field (e.g. campo001)
    Set {
        field: String,

        /// Text to store; empty clears the field
        #[arg(default_value = "")]
        text: String,
    },

    /// Set the first or last day of the week (YYYY-MM-DD, empty clears)
    Date {
        #[arg(value_enum)]
        slot: DateArg,

        #[arg(default_value = "")]
        value: String,
    },

    /// Show the agenda tree with its field texts
    #[command(alias = "ls")]
    Show,

    /// List every field id with its template placeholder
    Report,

    /// Clear all lesson texts, delivery checks and dates
    Clear,

    /// Generate one document per class and bundle them into an archive
    #[command(alias = "gen")]
    Generate {
        /// Directory the archive is written to
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Template file; overrides the configured one
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Leave out classes that fail to render instead of aborting
        #[arg(long)]
        skip_failures: bool,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., fallback-text)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Initialize the data directory
    Init,
}

#[derive(Subcommand, Debug)]
pub enum TeacherAction {
    Add {
        name: String,
    },
    Rename {
        teacher: String,
        name: String,
    },
    #[command(alias = "rm")]
    Remove {
        teacher: String,
    },
    /// Mark the teacher's agenda as delivered
    Check {
        teacher: String,
    },
    /// Undo a delivery mark
    Uncheck {
        teacher: String,
    },
    /// List teachers whose agenda has not been delivered
    Missing,
}

#[derive(Subcommand, Debug)]
pub enum SubjectAction {
    Add {
        teacher: String,
        name: String,
    },
    Rename {
        teacher: String,
        subject: String,
        name: String,
    },
    #[command(alias = "rm")]
    Remove {
        teacher: String,
        subject: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum GroupAction {
    Add {
        teacher: String,
        subject: String,
        /// Class label, e.g. "7º ano TARDE"
        label: String,

        /// Weekday the class has this subject (repeatable)
        #[arg(short, long = "day", required = true, num_args = 1..)]
        days: Vec<Weekday>,
    },
    Rename {
        teacher: String,
        subject: String,
        group: String,
        label: String,
    },
    #[command(alias = "rm")]
    Remove {
        teacher: String,
        subject: String,
        group: String,
    },
    /// Turn a weekday on (default) or off for a group
    Day {
        teacher: String,
        subject: String,
        group: String,
        day: Weekday,

        #[arg(long)]
        off: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum DateArg {
    Start,
    End,
}
