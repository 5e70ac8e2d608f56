use std::{
	collections::BTreeMap,
	ffi::{OsStr, OsString},
	path::PathBuf,
};

/// The build tool.
pub const NMAKE: &str = "nmake";

/// The fixed arguments to nmake: the `dll_` target in multithreaded mode, renaming the outputs.
pub const NMAKE_ARGS: [&str; 4] = [
	"dll_",
	"mt",
	"RETAIL_DLL_NAME=mozcrt19",
	"RETAIL_LIB_NAME=msvcrt",
];

/// Set by a parent make. nmake changes its recursion and parallelism behavior when it sees it.
pub const MAKEFLAGS: &str = "MAKEFLAGS";

/// A fully resolved invocation of the build tool.
#[derive(Clone, Debug)]
pub struct BuildCommand {
	/// The program to run.
	pub program: PathBuf,

	/// Arguments passed to the program.
	pub args: Vec<OsString>,

	/// The working directory of the child.
	pub directory: PathBuf,

	/// The complete environment of the child.
	pub env: BTreeMap<OsString, OsString>,
}

impl BuildCommand {
	/// The nmake invocation that builds the CRT in `directory`.
	pub fn nmake<I>(directory: impl Into<PathBuf>, inherited_env: I) -> Self
	where
		I: IntoIterator<Item = (OsString, OsString)>,
	{
		Self::new(NMAKE, NMAKE_ARGS, directory, inherited_env)
	}

	pub fn new<I, A>(
		program: impl Into<PathBuf>,
		args: A,
		directory: impl Into<PathBuf>,
		inherited_env: I,
	) -> Self
	where
		I: IntoIterator<Item = (OsString, OsString)>,
		A: IntoIterator,
		A::Item: AsRef<OsStr>,
	{
		Self {
			program: program.into(),
			args: args
				.into_iter()
				.map(|arg| arg.as_ref().to_owned())
				.collect(),
			directory: directory.into(),
			env: child_env(inherited_env),
		}
	}

	/// Create the [`std::process::Command`] with exactly this environment. Stdio is left for the caller to configure.
	#[must_use]
	pub fn to_command(&self) -> std::process::Command {
		let mut command = std::process::Command::new(&self.program);
		command
			.args(&self.args)
			.current_dir(&self.directory)
			.env_clear()
			.envs(&self.env);
		command
	}
}

/// Build the child's environment from the inherited one, leaving out `MAKEFLAGS`.
pub fn child_env<I>(vars: I) -> BTreeMap<OsString, OsString>
where
	I: IntoIterator<Item = (OsString, OsString)>,
{
	vars.into_iter()
		.filter(|(key, _)| {
			let keep = key != MAKEFLAGS;
			#[cfg(feature = "tracing")]
			if !keep {
				tracing::info!("removing MAKEFLAGS from the build environment");
			}
			keep
		})
		.collect()
}
