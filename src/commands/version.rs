use std::io::Write;

use anyhow::Result;

use crate::ProcessExit;

pub(crate) fn run_version_command<W: Write>(out: &mut W) -> Result<ProcessExit> {
    writeln!(out, "gutenberg2kindle version {}", env!("CARGO_PKG_VERSION"))?;
    Ok(ProcessExit::Success)
}
