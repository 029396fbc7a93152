//! Awaitable access to submitted lines
//!
//! A [`LineReader`] receives every line submitted after it was created.
//! Readers are fed from the UI thread without blocking it; the receiving
//! side can live on any task.

use hueconsole_core::{ConsoleError, Result};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Stream of submitted lines
#[derive(Debug)]
pub struct LineReader {
    rx: UnboundedReceiver<String>,
}

impl LineReader {
    pub(crate) fn channel() -> (UnboundedSender<String>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx })
    }

    /// Wait for the next submitted line
    pub async fn next_line(&mut self) -> Result<String> {
        self.rx.recv().await.ok_or(ConsoleError::Closed)
    }

    /// Wait for the next submitted line and parse it as an integer
    pub async fn next_int(&mut self) -> Result<i64> {
        let line = self.next_line().await?;
        line.trim().parse::<i64>().map_err(|e| ConsoleError::Parse {
            input: line.clone(),
            reason: e.to_string(),
        })
    }

    /// The next line if one is already queued
    pub fn try_next_line(&mut self) -> Option<String> {
        self.rx.try_recv().ok()
    }
}
