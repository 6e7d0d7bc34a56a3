//! Fake feed — an [`AsyncBufRead`] backed by a channel.
//!
//! Simulates `journalctl -exf` output without spawning a real process: the
//! test keeps a [`FakeProcessWriter`] and hands the reader to the ingestion
//! loop. Dropping or closing the writer produces EOF.
//!
//! [`AsyncBufRead`]: tokio::io::AsyncBufRead

use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio_util::io::StreamReader;

/// A handle for pushing log lines into a [`FakeProcess`] stream.
pub struct FakeProcessWriter {
    tx: mpsc::UnboundedSender<std::io::Result<Bytes>>,
}

impl FakeProcessWriter {
    /// Send a log line. Adds a trailing newline if not already present.
    pub fn send_line(&self, line: impl Into<String>) {
        let mut s = line.into();
        if !s.ends_with('\n') {
            s.push('\n');
        }
        let _ = self.tx.send(Ok(Bytes::from(s)));
    }

    /// Send multiple lines at once (simulates a burst).
    pub fn send_burst<S: AsRef<str>>(&self, lines: &[S]) {
        for line in lines {
            self.send_line(line.as_ref());
        }
    }

    /// Send raw bytes verbatim, e.g. half a line.
    pub fn send_raw(&self, bytes: &'static [u8]) {
        let _ = self.tx.send(Ok(Bytes::from_static(bytes)));
    }

    /// Make the next read fail, as if the pipe broke.
    pub fn fail(&self, kind: std::io::ErrorKind) {
        let _ = self.tx.send(Err(std::io::Error::new(kind, "fake pipe failure")));
    }

    /// Close the stream, causing the consumer to see EOF.
    pub fn close(self) {
        // tx is dropped, causing the channel to close.
    }
}

/// A fake process output stream.
pub struct FakeProcess {
    rx: mpsc::UnboundedReceiver<std::io::Result<Bytes>>,
}

impl Stream for FakeProcess {
    type Item = std::io::Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

/// Create a linked writer/reader pair.
///
/// ```rust
/// let (writer, reader) = fake_process();
/// writer.send_line(CORPUS_EXTERNAL[0]);
/// writer.close();
/// ingest(reader, &stores, &stats, &cancel).await?;
/// ```
pub fn fake_process() -> (FakeProcessWriter, StreamReader<FakeProcess, Bytes>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (FakeProcessWriter { tx }, StreamReader::new(FakeProcess { rx }))
}
