//! Advisory output for Claude Code hooks.
//!
//! Advisories are written to the diagnostic stream only. Stdout is reserved
//! for protocol data the host may consume, and these hooks send none.

use std::io::{self, Write};

use crate::core::Advisory;

/// Render advisories as one text block.
///
/// Returns `None` when there is nothing to say. Otherwise the advisories
/// are separated by newlines and the block ends with a blank line.
pub fn render(advisories: &[Advisory]) -> Option<String> {
    if advisories.is_empty() {
        return None;
    }

    let body = advisories
        .iter()
        .map(Advisory::text)
        .collect::<Vec<_>>()
        .join("\n");

    Some(format!("{}\n\n", body))
}

/// Write advisories to `writer`, writing nothing at all for an empty list.
pub fn emit<W: Write>(advisories: &[Advisory], writer: &mut W) -> io::Result<()> {
    if let Some(block) = render(advisories) {
        writer.write_all(block.as_bytes())?;
        writer.flush()?;
    }
    Ok(())
}

/// Write advisories to stderr.
pub fn emit_stderr(advisories: &[Advisory]) -> io::Result<()> {
    emit(advisories, &mut io::stderr().lock())
}
