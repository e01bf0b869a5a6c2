//! Final text output writing.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;

/// Write the accumulated document lines to `path` as UTF-8, each
/// physical line right-trimmed of trailing whitespace and terminated
/// with `\n`. Entries with embedded newlines expand to one physical
/// line each.
pub fn write_lines(path: impl AsRef<Path>, lines: &[String]) -> Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    for entry in lines {
        for line in entry.split('\n') {
            out.write_all(line.trim_end().as_bytes())?;
            out.write_all(b"\n")?;
        }
    }
    out.flush()?;
    Ok(())
}
