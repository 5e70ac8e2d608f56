use anstream::eprintln;
use crossterm::style::Stylize as _;
use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures of the wrapper itself. Build failures are not errors, they are forwarded as the exit code.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("failed to change into the build directory {}", path.display())]
	Chdir {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to create the output pipe")]
	Pipe(#[source] std::io::Error),

	#[error("failed to spawn {}", program.display())]
	Spawn {
		program: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to read the build output")]
	Read(#[source] std::io::Error),

	#[error("failed to write the build output")]
	Write(#[source] std::io::Error),

	#[error("failed to wait for the build to finish")]
	Wait(#[source] std::io::Error),
}

/// Print an error followed by its chain of sources.
pub fn print_error(error: &(dyn std::error::Error + 'static)) {
	let mut next = Some(error);
	while let Some(error) = next {
		let message = error.to_string();
		eprintln!("{} {}", "->".red(), message.replace('\n', "\n   "));
		next = error.source();
	}
}
