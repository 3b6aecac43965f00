//! Newline-delimited framing for the command channel.
//!
//! Wire format: one UTF-8 line per request and per response, terminated by
//! `\n`. A trailing `\r` is tolerated on read.

use std::io::{self, BufRead, Read, Write};

/// Longest accepted line, excluding the terminator.
pub const MAX_LINE_LEN: usize = 64 * 1024;

/// Write `line` followed by `\n`. Embedded line breaks are flattened to
/// spaces so a response can never span more than one line.
pub fn write_line<W: Write>(writer: &mut W, line: &str) -> io::Result<()> {
    let flat: String = line
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();

    writer.write_all(flat.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Read one line. Returns `None` at end of stream.
///
/// A final line without a terminator is still returned. Invalid UTF-8 is
/// replaced rather than rejected, so the line can still be answered; only
/// an oversized line is an error.
pub fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    let limit = (MAX_LINE_LEN + 1) as u64;
    let n = (&mut *reader).take(limit).read_until(b'\n', &mut buf)?;
    if n == 0 {
        return Ok(None);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
    } else if buf.len() > MAX_LINE_LEN {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("line too long: more than {} bytes", MAX_LINE_LEN),
        ));
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }

    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}
