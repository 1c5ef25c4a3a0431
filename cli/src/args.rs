//! Command line surface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ding_core::TimeUnit;

#[derive(Debug, Parser)]
#[command(
    name = "ding",
    version,
    about = "A command line timer",
    long_about = "Counts down and plays a ding when the time is up.\n\
                  A bare VALUE uses seconds unless the config file sets another default unit.",
    args_conflicts_with_subcommands = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Use a louder alarm sound
    #[arg(short, long, global = true)]
    pub loud: bool,

    /// Config file to use instead of the platform default
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Countdown length in the default unit
    #[arg(allow_negative_numbers = true)]
    pub value: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sets a timer using hours
    Hours {
        #[arg(allow_negative_numbers = true)]
        value: String,
    },
    /// Sets a timer using minutes
    Minutes {
        #[arg(allow_negative_numbers = true)]
        value: String,
    },
    /// Sets a timer using seconds
    Seconds {
        #[arg(allow_negative_numbers = true)]
        value: String,
    },
}

impl Cli {
    /// The raw value and unit to count down, if one was given
    pub fn countdown(&self, default_unit: TimeUnit) -> Option<(&str, TimeUnit)> {
        match &self.command {
            Some(Commands::Hours { value }) => Some((value.as_str(), TimeUnit::Hours)),
            Some(Commands::Minutes { value }) => Some((value.as_str(), TimeUnit::Minutes)),
            Some(Commands::Seconds { value }) => Some((value.as_str(), TimeUnit::Seconds)),
            None => self.value.as_deref().map(|value| (value, default_unit)),
        }
    }
}
