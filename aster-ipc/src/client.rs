//! Command channel client, used by `aster request`.

use std::io::{self, BufReader, BufWriter};
use std::os::unix::net::UnixStream;
use std::path::Path;
use std::time::Duration;

use crate::framing::{read_line, write_line};

pub struct IpcClient {
    reader: BufReader<UnixStream>,
    writer: BufWriter<UnixStream>,
}

impl IpcClient {
    /// Connect to a running shell. `timeout` bounds each read and write.
    pub fn connect(path: impl AsRef<Path>, timeout: Option<Duration>) -> io::Result<Self> {
        let stream = UnixStream::connect(path)?;
        stream.set_read_timeout(timeout)?;
        stream.set_write_timeout(timeout)?;

        let reader = BufReader::new(stream.try_clone()?);
        Ok(Self {
            reader,
            writer: BufWriter::new(stream),
        })
    }

    /// Send one request line and wait for its response line.
    pub fn request(&mut self, line: &str) -> io::Result<String> {
        write_line(&mut self.writer, line)?;
        read_line(&mut self.reader)?.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "shell closed the connection without answering",
            )
        })
    }
}

/// Connect, send a single request, and return the response.
pub fn send_request(
    path: impl AsRef<Path>,
    line: &str,
    timeout: Option<Duration>,
) -> io::Result<String> {
    IpcClient::connect(path, timeout)?.request(line)
}
