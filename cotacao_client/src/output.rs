//! Local outputs of a successful fetch: the summary file and the stdout echo.

use std::io::{self, Write};
use std::path::Path;

pub fn summary_line(bid: &str) -> String {
    format!("Dolar: {}", bid)
}

/// Replaces `path` with the summary line and returns the bytes written.
pub fn write_summary(path: &Path, bid: &str) -> io::Result<usize> {
    let line = summary_line(bid);
    std::fs::write(path, &line)?;
    Ok(line.len())
}

pub fn echo_body<W: Write>(out: &mut W, body: &[u8]) -> io::Result<()> {
    out.write_all(body)?;
    out.flush()
}
