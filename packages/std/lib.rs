pub mod command;
pub mod error;
pub mod filter;
pub mod run;

pub use command::BuildCommand;
pub use error::{Error, Result};
pub use filter::SuppressedLines;
pub use run::{Outcome, run};

#[cfg(feature = "tracing")]
pub mod tracing;
