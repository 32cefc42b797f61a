pub mod app;
pub mod cli;
pub mod command;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod prompt;
pub mod resolve;
pub mod wizard;

// Convenience re-exports
pub use config::{Config, Port, ServerEntry};
pub use context::AppContext;
pub use error::{Error, Result};
pub use resolve::{Resolver, Target};
