//! Newline-delimited JSON transport over async byte streams.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio::io::{
    stdin, stdout, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout,
};

#[derive(Debug, Error)]
pub enum TransportError {
    /// A line was read but did not contain valid JSON. The stream is still usable.
    #[error("invalid json: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The client went away while we were writing.
    #[error("client disconnected")]
    Disconnected,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),
}

/// One JSON message per line in both directions.
pub struct StdioTransport<R, W> {
    reader: BufReader<R>,
    writer: W,
}

impl StdioTransport<Stdin, Stdout> {
    /// Transport bound to the process stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(stdin(), stdout())
    }
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

    /// Read a single JSON message. Returns Ok(None) on EOF. Blank lines are skipped.
    pub async fn read_message(&mut self) -> Result<Option<Value>, TransportError> {
        loop {
            let mut line = String::new();
            let bytes = self.reader.read_line(&mut line).await?;
            if bytes == 0 {
                return Ok(None);
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            return serde_json::from_str(trimmed)
                .map(Some)
                .map_err(TransportError::InvalidJson);
        }
    }

    // Keep BrokenPipe distinguishable so the server loop can treat it as a clean disconnect
    fn check_io<T>(res: std::io::Result<T>) -> Result<T, TransportError> {
        match res {
            Ok(v) => Ok(v),
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Err(TransportError::Disconnected),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn write_message<T: Serialize>(&mut self, msg: &T) -> Result<(), TransportError> {
        let s = serde_json::to_string(msg).map_err(TransportError::Encode)?;

        Self::check_io(self.writer.write_all(s.as_bytes()).await)?;
        Self::check_io(self.writer.write_all(b"\n").await)?;
        Self::check_io(self.writer.flush().await)?;

        Ok(())
    }

    /// Flush and shut down the write half.
    pub async fn close(&mut self) -> Result<(), TransportError> {
        Self::check_io(self.writer.flush().await)?;
        Self::check_io(self.writer.shutdown().await)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{duplex, AsyncReadExt};

    #[tokio::test]
    async fn test_reads_one_message_per_line_and_skips_blank_lines() {
        let input: &[u8] = b"{\"a\":1}\n\n  \n{\"b\":2}\n";
        let mut transport = StdioTransport::new(input, Vec::new());

        assert_eq!(transport.read_message().await.unwrap(), Some(json!({"a": 1})));
        assert_eq!(transport.read_message().await.unwrap(), Some(json!({"b": 2})));
        assert!(transport.read_message().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_json_is_recoverable() {
        let input: &[u8] = b"not json\n{\"ok\":true}\n";
        let mut transport = StdioTransport::new(input, Vec::new());

        let err = transport.read_message().await.unwrap_err();
        assert!(matches!(err, TransportError::InvalidJson(_)));
        assert_eq!(
            transport.read_message().await.unwrap(),
            Some(json!({"ok": true}))
        );
    }

    #[tokio::test]
    async fn test_write_message_appends_newline() {
        let (client, server) = duplex(1024);
        let mut transport = StdioTransport::new(tokio::io::empty(), server);

        transport.write_message(&json!({"id": 1})).await.unwrap();
        transport.close().await.unwrap();

        let mut out = String::new();
        let mut client = client;
        client.read_to_string(&mut out).await.unwrap();
        assert_eq!(out, "{\"id\":1}\n");
    }
}
