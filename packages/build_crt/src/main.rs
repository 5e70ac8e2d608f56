use build_crt_std::{BuildCommand, Error};
use clap::Parser;
use std::{io::Write, path::PathBuf};

#[derive(Debug, Parser)]
#[command(about = "Build the CRT with nmake, hiding the benign missing makefile.sub error")]
struct Args {
	/// The directory containing the CRT sources.
	directory: PathBuf,
}

fn main() {
	// Setup tracing.
	#[cfg(feature = "tracing")]
	build_crt_std::tracing::setup("BUILD_CRT_TRACING");

	let args = Args::parse();
	#[cfg(feature = "tracing")]
	tracing::info!(?args, "parsed arguments");

	let command = |directory: PathBuf| BuildCommand::nmake(directory, std::env::vars_os());
	match main_inner(args, command, &mut std::io::stdout().lock()) {
		Ok(code) => std::process::exit(code),
		Err(error) => {
			eprintln!("build_crt failed:");
			build_crt_std::error::print_error(&error);
			std::process::exit(1);
		},
	}
}

fn main_inner(
	args: Args,
	command: impl FnOnce(PathBuf) -> BuildCommand,
	output: &mut impl Write,
) -> build_crt_std::Result<i32> {
	// Enter the build directory. The child also gets it explicitly as its working directory, so it must stay valid after the chdir.
	let chdir_error = |source| Error::Chdir {
		path: args.directory.clone(),
		source,
	};
	let directory = std::path::absolute(&args.directory).map_err(chdir_error)?;
	std::env::set_current_dir(&directory).map_err(chdir_error)?;

	let command = command(directory);
	let outcome = build_crt_std::run(&command, output)?;
	Ok(outcome.code)
}

#[cfg(test)]
mod tests {
	use super::{Args, main_inner};
	use build_crt_std::{BuildCommand, Error};
	use clap::Parser as _;
	use std::path::PathBuf;

	#[test]
	fn parses_the_directory() {
		let args = Args::try_parse_from(["build_crt", "crt/src"]).unwrap();
		assert_eq!(args.directory, std::path::Path::new("crt/src"));
	}

	#[test]
	fn requires_exactly_one_directory() {
		assert!(Args::try_parse_from(["build_crt"]).is_err());
		assert!(Args::try_parse_from(["build_crt", "a", "b"]).is_err());
	}

	#[test]
	fn rejects_flags() {
		assert!(Args::try_parse_from(["build_crt", "--jobs", "4", "crt/src"]).is_err());
	}

	#[cfg(unix)]
	fn pwd(directory: PathBuf) -> BuildCommand {
		BuildCommand::new("/bin/sh", ["-c", "pwd -P; exit 7"], directory, std::env::vars_os())
	}

	#[test]
	fn missing_directory_is_a_chdir_error() {
		let args = Args {
			directory: "/nonexistent/crt/src".into(),
		};
		let error = main_inner(args, |_| unreachable!("nothing is spawned"), &mut Vec::new())
			.unwrap_err();
		assert!(matches!(error, Error::Chdir { .. }), "{error:?}");
	}

	// This is the only test that changes the working directory of the test process.
	#[cfg(unix)]
	#[test]
	fn enters_the_build_directory() {
		let root = tempfile::tempdir().unwrap();
		let root_path = root.path().canonicalize().unwrap();
		std::fs::create_dir(root_path.join("src")).unwrap();

		// An absolute directory.
		let mut output = Vec::new();
		let args = Args {
			directory: root_path.clone(),
		};
		let code = main_inner(args, pwd, &mut output).unwrap();
		assert_eq!(code, 7);
		assert_eq!(String::from_utf8(output).unwrap().trim_end(), root_path.to_str().unwrap());
		assert_eq!(std::env::current_dir().unwrap().canonicalize().unwrap(), root_path);

		// A relative directory resolves against the current directory and is passed on absolute.
		let mut output = Vec::new();
		let mut spawned_in = None;
		let args = Args {
			directory: "src".into(),
		};
		let code = main_inner(
			args,
			|directory| {
				spawned_in = Some(directory.clone());
				pwd(directory)
			},
			&mut output,
		)
		.unwrap();
		assert_eq!(code, 7);
		let spawned_in = spawned_in.unwrap();
		assert!(spawned_in.is_absolute(), "{}", spawned_in.display());
		assert_eq!(
			String::from_utf8(output).unwrap().trim_end(),
			root_path.join("src").to_str().unwrap()
		);
	}
}
