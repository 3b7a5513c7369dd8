pub mod config;
pub mod debugger;
pub mod error;

pub use config::LaunchConfig;
pub use debugger::DebugSession;
pub use error::DebugError;
