//! Line-delimited JSON over an async reader/writer pair.

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::trace;

use crate::errors::TransportError;

/// Generic over reader and writer so tests can use in-memory buffers.
pub struct StdioTransport<R, W> {
    reader: BufReader<R>,
    writer: W,
}

impl<R, W> StdioTransport<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer,
        }
    }

    /// Reads the next line without its terminator, as raw bytes. Blank lines
    /// come back empty; `None` means EOF. Bytes are not checked for UTF-8
    /// here, so a malformed line still reaches the dispatcher.
    pub async fn read_line(&mut self) -> Result<Option<Vec<u8>>, TransportError> {
        let mut line = Vec::new();
        let bytes_read = self
            .reader
            .read_until(b'\n', &mut line)
            .await
            .map_err(TransportError::Read)?;

        if bytes_read == 0 {
            return Ok(None);
        }

        while matches!(line.last(), Some(b'\n' | b'\r')) {
            line.pop();
        }
        trace!(len = line.len(), "read message");
        Ok(Some(line))
    }

    /// Writes one value as a single line and flushes.
    pub async fn write_message(&mut self, message: &Value) -> Result<(), TransportError> {
        let mut encoded = serde_json::to_vec(message)?;
        encoded.push(b'\n');
        trace!(len = encoded.len(), "writing message");

        self.writer
            .write_all(&encoded)
            .await
            .map_err(TransportError::Write)?;
        self.writer.flush().await.map_err(TransportError::Write)
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}
