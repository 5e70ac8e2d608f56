use crate::{
	BuildCommand, Error, Result, SuppressedLines,
	filter::strip_trailing_whitespace,
};
use std::{
	io::{BufRead as _, BufReader, PipeReader, Write},
	process::{Child, ExitStatus, Stdio},
};

/// The result of a finished build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
	/// The exit code to forward.
	pub code: i32,

	/// The number of lines written to the output.
	pub forwarded: usize,

	/// The number of lines dropped because they were suppressed.
	pub suppressed: usize,
}

/// Run the build, copying its merged stdout and stderr to `output` line by line without the suppressed lines.
pub fn run(command: &BuildCommand, output: &mut impl Write) -> Result<Outcome> {
	let (reader, mut child) = spawn_merged(command)?;

	// Forward the output until the child closes the stream.
	let forwarded = forward(reader, SuppressedLines::NMAKE, output);

	// Wait for the child even if forwarding failed. The read end is closed by now, so a child still writing gets a broken pipe instead of blocking.
	let status = child.wait().map_err(Error::Wait);
	let (forwarded, suppressed) = forwarded?;
	let status = status?;
	let outcome = Outcome {
		code: exit_code(status),
		forwarded,
		suppressed,
	};
	#[cfg(feature = "tracing")]
	tracing::info!(?status, ?outcome, "build finished");

	Ok(outcome)
}

/// Copy lines from `reader` to `output`, returning the forwarded and suppressed counts.
fn forward(
	reader: PipeReader,
	suppressed_lines: SuppressedLines,
	output: &mut impl Write,
) -> Result<(usize, usize)> {
	let mut reader = BufReader::new(reader);
	let mut line = Vec::new();
	let mut forwarded = 0;
	let mut suppressed = 0;
	loop {
		line.clear();
		let read = reader.read_until(b'\n', &mut line).map_err(Error::Read)?;
		if read == 0 {
			break;
		}
		let line = strip_trailing_whitespace(&line);
		if suppressed_lines.contains(line) {
			#[cfg(feature = "tracing")]
			tracing::debug!(line = %String::from_utf8_lossy(line), "suppressed line");
			suppressed += 1;
			continue;
		}
		output.write_all(line).map_err(Error::Write)?;
		output.write_all(b"\n").map_err(Error::Write)?;
		output.flush().map_err(Error::Write)?;
		forwarded += 1;
	}
	Ok((forwarded, suppressed))
}

/// Spawn the command with stdout and stderr both writing into one pipe, returning the read end.
fn spawn_merged(build: &BuildCommand) -> Result<(PipeReader, Child)> {
	let (reader, writer) = std::io::pipe().map_err(Error::Pipe)?;
	let writer_for_stderr = writer.try_clone().map_err(Error::Pipe)?;

	// The command owns the parent's copies of the write end. It is dropped on return, so the reader sees EOF once the child exits.
	let mut command = build.to_command();
	command
		.stdin(Stdio::null())
		.stdout(Stdio::from(writer))
		.stderr(Stdio::from(writer_for_stderr));
	#[cfg(feature = "tracing")]
	tracing::info!(?command, "spawning the build");
	let child = command.spawn().map_err(|source| Error::Spawn {
		program: build.program.clone(),
		source,
	})?;

	Ok((reader, child))
}

/// The code to exit with. A child killed by signal `N` maps to `128 + N`, like a shell.
fn exit_code(status: ExitStatus) -> i32 {
	if let Some(code) = status.code() {
		return code;
	}
	#[cfg(unix)]
	{
		use std::os::unix::process::ExitStatusExt as _;
		if let Some(signal) = status.signal() {
			return 128 + signal;
		}
	}
	1
}
