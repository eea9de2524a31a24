use std::io::Write;

use crate::{error::Error, result::Result};

/// Writes the chosen URL as a single line.
///
/// # Errors
///
/// Returns [`Error::NoEligiblePosts`] without writing anything if there is no
/// result, or [`Error::Io`] if the sink fails.
pub fn report<W: Write>(result: Option<&str>, out: &mut W) -> Result<()> {
    let url = result.ok_or(Error::NoEligiblePosts)?;
    writeln!(out, "{url}")?;
    out.flush()?;
    Ok(())
}
