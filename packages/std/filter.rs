/// Emitted by nmake when the optional `makefile.sub` is missing. The build still succeeds.
pub const MISSING_MAKEFILE_SUB: &[u8] = b"NMAKE : fatal error U1052: file 'makefile.sub' not found";

/// Trails the diagnostic above.
pub const STOP: &[u8] = b"Stop.";

/// The exact lines that are dropped from the build output.
#[derive(Clone, Copy, Debug)]
pub struct SuppressedLines(&'static [&'static [u8]]);

impl SuppressedLines {
	pub const NMAKE: Self = Self(&[MISSING_MAKEFILE_SUB, STOP]);

	/// Whether a line, with its trailing whitespace already stripped, is one of the suppressed lines.
	#[must_use]
	pub fn contains(&self, line: &[u8]) -> bool {
		self.0.iter().any(|suppressed| *suppressed == line)
	}
}

/// Remove trailing ASCII whitespace, including the line terminator.
#[must_use]
pub fn strip_trailing_whitespace(line: &[u8]) -> &[u8] {
	line.trim_ascii_end()
}

#[cfg(test)]
mod tests {
	use super::{SuppressedLines, strip_trailing_whitespace};

	#[test]
	fn matches_only_exact_lines() {
		let lines = SuppressedLines::NMAKE;
		assert!(lines.contains(b"NMAKE : fatal error U1052: file 'makefile.sub' not found"));
		assert!(lines.contains(b"Stop."));

		// Near misses are forwarded.
		assert!(!lines.contains(b"Stop"));
		assert!(!lines.contains(b" Stop."));
		assert!(!lines.contains(b"NMAKE : fatal error U1052: file 'makefile.vc' not found"));
		assert!(!lines.contains(b"echo NMAKE : fatal error U1052: file 'makefile.sub' not found"));
		assert!(!lines.contains(b""));
	}

	#[test]
	fn strips_trailing_whitespace() {
		assert_eq!(strip_trailing_whitespace(b"Stop.\n"), b"Stop.");
		assert_eq!(strip_trailing_whitespace(b"Stop.\r\n"), b"Stop.");
		assert_eq!(strip_trailing_whitespace(b"Stop. \t\r\n"), b"Stop.");
		assert_eq!(strip_trailing_whitespace(b"Stop."), b"Stop.");
		assert_eq!(strip_trailing_whitespace(b"  indented \n"), b"  indented");
		assert_eq!(strip_trailing_whitespace(b"\n"), b"");
	}
}
