mod acknowledge;
mod executor;
mod runner;

pub use acknowledge::{ConsoleIo, NativeConsoleIo};
pub use executor::{RhaiExecutor, ScriptExecutor};
pub use runner::{COMPLETION_BANNER, Runner};
