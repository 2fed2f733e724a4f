//! Version subcommand.

use std::io::{self, Write};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Set `DATA_DIFF_BUILD_TIME` when building to stamp the binary.
pub const BUILD_TIME: &str = match option_env!("DATA_DIFF_BUILD_TIME") {
    Some(value) => value,
    None => "unknown",
};

/// Set `DATA_DIFF_GIT_COMMIT` when building to stamp the binary.
pub const GIT_COMMIT: &str = match option_env!("DATA_DIFF_GIT_COMMIT") {
    Some(value) => value,
    None => "unknown",
};

pub fn write_version<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "data-diff version {}", VERSION)?;
    writeln!(out, "Build time: {}", BUILD_TIME)?;
    writeln!(out, "Git commit: {}", GIT_COMMIT)
}
