//! Camera / image decoding collaborator.
//!
//! The state machine only ever sees decoded payload strings or a
//! [`ScanFailure`]. A [`CaptureSession`] is the capability handle for a
//! running capture; dropping it stops the capture.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use engine::{Event, ScanFailure};
use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle};

pub trait CaptureDevice {
    /// Starts delivering decoded frames into `sink` as [`Event::ScanSucceeded`].
    fn start(&self, sink: UnboundedSender<Event>) -> Result<CaptureSession, ScanFailure>;
}

/// Running capture. Released when dropped.
#[derive(Debug)]
pub struct CaptureSession {
    handle: JoinHandle<()>,
}

impl CaptureSession {
    /// Runs `task` as the capture loop until the session is released.
    pub fn spawn<F>(task: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(task),
        }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::debug!("capture session released");
    }
}

/// Camera stand-in fed by a text file: every non-empty line is one decoded
/// frame, delivered every `frame_interval`.
#[derive(Debug, Clone)]
pub struct FeedCapture {
    feed: Option<PathBuf>,
    frame_interval: Duration,
}

impl FeedCapture {
    pub fn new(feed: Option<PathBuf>, frame_interval: Duration) -> Self {
        Self {
            feed,
            frame_interval,
        }
    }
}

impl CaptureDevice for FeedCapture {
    fn start(&self, sink: UnboundedSender<Event>) -> Result<CaptureSession, ScanFailure> {
        let path = self
            .feed
            .clone()
            .ok_or_else(|| ScanFailure::CaptureUnavailable("no camera feed configured".to_string()))?;
        let interval = self.frame_interval;

        Ok(CaptureSession::spawn(async move {
            let content = match tokio::fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(err) => {
                    tracing::warn!(feed = %path.display(), %err, "camera feed unreadable");
                    let failure =
                        ScanFailure::CaptureUnavailable(format!("{}: {err}", path.display()));
                    if sink.send(Event::ScanFailed(failure)).is_err() {
                        tracing::debug!("event queue closed before capture failure was reported");
                    }
                    return;
                }
            };
            let frames: Vec<&str> = content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect();
            tracing::info!(feed = %path.display(), frames = frames.len(), "capture started");

            for frame in frames {
                tokio::time::sleep(interval).await;
                if sink.send(Event::ScanSucceeded(frame.to_string())).is_err() {
                    return;
                }
            }
            // Nothing left in view; stay open until released.
            std::future::pending::<()>().await;
        }))
    }
}

/// One-shot decode of an uploaded image into its payload text.
pub fn decode_image(bytes: &[u8]) -> Result<String, ScanFailure> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| ScanFailure::DecodeFailure("no QR code found in image".to_string()))?;
    let payload = text.trim();
    if payload.is_empty() {
        return Err(ScanFailure::DecodeFailure("image is blank".to_string()));
    }
    Ok(payload.to_string())
}

/// Reads and decodes the image at `path`.
pub async fn decode_image_file(path: &Path) -> Result<String, ScanFailure> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| ScanFailure::DecodeFailure(format!("{}: {err}", path.display())))?;
    decode_image(&bytes)
}
