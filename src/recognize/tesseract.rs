//! Tesseract command-line recognizer.

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::RecognizeError;
use crate::model::Page;

use super::TextRecognizer;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs the `tesseract` executable, feeding the page as PNG on stdin.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    /// Executable path or name looked up on `PATH`
    pub binary: PathBuf,
    /// OCR engine mode (`--oem`)
    pub engine_mode: Option<u8>,
    /// Page segmentation mode (`--psm`)
    pub segmentation_mode: Option<u8>,
    /// Language pack (`-l`)
    pub language: Option<String>,
    /// Kill the process when it runs longer than this
    pub timeout: Option<Duration>,
}

impl TesseractCli {
    /// Use `tesseract` from `PATH` with engine defaults.
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("tesseract"),
            engine_mode: None,
            segmentation_mode: None,
            language: None,
            timeout: None,
        }
    }

    /// LSTM engine, single uniform text block (`--oem 1 --psm 6`).
    pub fn uniform_block() -> Self {
        Self::new().with_engine_mode(1).with_segmentation_mode(6)
    }

    /// Set the executable path.
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Set the OCR engine mode.
    pub fn with_engine_mode(mut self, mode: u8) -> Self {
        self.engine_mode = Some(mode);
        self
    }

    /// Set the page segmentation mode.
    pub fn with_segmentation_mode(mut self, mode: u8) -> Self {
        self.segmentation_mode = Some(mode);
        self
    }

    /// Set the language pack.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Kill the process and fail with [`RecognizeError::TimedOut`] once
    /// `timeout` elapses.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.binary);
        command.arg("stdin").arg("stdout");
        if let Some(mode) = self.engine_mode {
            command.arg("--oem").arg(mode.to_string());
        }
        if let Some(mode) = self.segmentation_mode {
            command.arg("--psm").arg(mode.to_string());
        }
        if let Some(ref language) = self.language {
            command.arg("-l").arg(language);
        }
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRecognizer for TesseractCli {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn recognize(&self, page: &Page) -> Result<String, RecognizeError> {
        let png = page
            .to_png()
            .map_err(|e| RecognizeError::Failed(format!("cannot encode page: {}", e)))?;

        let mut child = self.command().spawn()?;
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(&png) {
                reap(&mut child);
                return Err(e.into());
            }
        }

        let status = self.wait(&mut child)?;
        let stdout = collect(stdout)?;
        let stderr = collect(stderr)?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr);
            return Err(RecognizeError::Failed(format!(
                "tesseract exited with {}: {}",
                status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

impl TesseractCli {
    /// Wait for `child`, killing it once the timeout passes.
    ///
    /// On timeout the output readers are left to finish on their own.
    fn wait(&self, child: &mut Child) -> Result<ExitStatus, RecognizeError> {
        let Some(timeout) = self.timeout else {
            return Ok(child.wait()?);
        };

        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                log::warn!("tesseract exceeded {:?}, killing pid {}", timeout, child.id());
                reap(child);
                return Err(RecognizeError::TimedOut(timeout));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Kill `child` and collect its exit status.
fn reap(child: &mut Child) {
    // Fails only when the process already exited.
    let _ = child.kill();
    if let Err(e) = child.wait() {
        log::warn!("cannot reap tesseract pid {}: {}", child.id(), e);
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buffer)?;
        }
        Ok(buffer)
    })
}

fn collect(reader: JoinHandle<io::Result<Vec<u8>>>) -> Result<Vec<u8>, RecognizeError> {
    let bytes = reader
        .join()
        .map_err(|_| RecognizeError::Failed("output reader panicked".to_string()))??;
    Ok(bytes)
}
