pub mod args;
pub mod audio;
pub mod error;
pub mod logging;
pub mod terminal;

pub use args::{Cli, Commands};
pub use audio::RodioPlayer;
pub use error::{AudioError, CliError};
pub use terminal::TerminalReadout;
