//! Deadline wrapper for recognizers.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError};

use crate::error::RecognizeError;
use crate::model::Page;

use super::TextRecognizer;

/// Bounds each call to an inner recognizer by a timeout.
///
/// The inner call runs on its own thread. When the deadline passes the
/// call reports [`RecognizeError::TimedOut`]; the worker thread is left to
/// finish in the background and its result is discarded. Recognizers
/// that own a child process should enforce their own deadline as well, as
/// [`TesseractCli::with_timeout`](super::TesseractCli::with_timeout) does.
#[derive(Clone)]
pub struct TimeoutRecognizer {
    inner: Arc<dyn TextRecognizer>,
    timeout: Duration,
}

impl TimeoutRecognizer {
    /// Wrap `inner` with a per-call deadline.
    pub fn new(inner: Arc<dyn TextRecognizer>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    /// Configured deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl TextRecognizer for TimeoutRecognizer {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn recognize(&self, page: &Page) -> Result<String, RecognizeError> {
        let (sender, receiver) = bounded(1);
        let inner = Arc::clone(&self.inner);
        let page = page.clone();

        thread::Builder::new()
            .name("unscan-recognize".to_string())
            .spawn(move || {
                // The receiver is gone once the caller timed out.
                let _ = sender.send(inner.recognize(&page));
            })?;

        match receiver.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                log::warn!("{} timed out after {:?}", self.inner.name(), self.timeout);
                Err(RecognizeError::TimedOut(self.timeout))
            }
            Err(RecvTimeoutError::Disconnected) => Err(RecognizeError::Failed(format!(
                "{} worker stopped without a result",
                self.inner.name()
            ))),
        }
    }
}
