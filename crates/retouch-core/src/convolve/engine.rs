//! Asynchronous convolution worker.
//!
//! The engine is one tokio task fed by a single-slot request channel. Each
//! request carries a one-shot reply channel, and requests are processed
//! strictly one after another, so overlapping callers are queued rather than
//! interleaved. The pixel work itself runs on the blocking pool to keep the
//! caller's runtime free for UI work.
//!
//! There is no timeout and no cancellation. Once accepted, a request runs to
//! completion; if the caller stops waiting, the result is discarded.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{mpsc, oneshot, watch, Notify};
use tracing::{debug, warn};

use super::types::{ConvolutionRequest, ConvolveError};
use super::Kernel;
use crate::buffer::RasterBuffer;

/// Capacity of the request channel: one request in flight, callers beyond
/// that wait for a free slot.
const REQUEST_SLOTS: usize = 1;

type Reply = oneshot::Sender<Result<RasterBuffer, ConvolveError>>;

/// The computation the worker performs for each accepted request.
type Runner = fn(ConvolutionRequest) -> RasterBuffer;

struct Job {
    request: ConvolutionRequest,
    reply: Reply,
}

/// Handle to a running convolution worker.
///
/// Cheap to clone; all clones feed the same worker. The worker exits when
/// [`shutdown`](Self::shutdown) is called or every handle is dropped.
#[derive(Clone)]
pub struct ConvolutionEngine {
    requests: mpsc::Sender<Job>,
    busy: watch::Receiver<bool>,
    shutdown: Arc<Notify>,
}

impl ConvolutionEngine {
    /// Start the worker on the current tokio runtime.
    ///
    /// Fails with [`ConvolveError::EngineUnavailable`] when called outside a
    /// runtime.
    pub fn spawn() -> Result<Self, ConvolveError> {
        Self::spawn_with(ConvolutionRequest::run)
    }

    fn spawn_with(runner: Runner) -> Result<Self, ConvolveError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| ConvolveError::EngineUnavailable(e.to_string()))?;

        let (requests, rx) = mpsc::channel(REQUEST_SLOTS);
        let (busy_tx, busy) = watch::channel(false);
        let shutdown = Arc::new(Notify::new());

        runtime.spawn(run_worker(rx, busy_tx, Arc::clone(&shutdown), runner));
        debug!("convolution engine started");

        Ok(Self {
            requests,
            busy,
            shutdown,
        })
    }

    /// Convolve `buffer` with `kernel` on the worker.
    pub async fn convolve(
        &self,
        buffer: RasterBuffer,
        kernel: impl Into<Kernel>,
    ) -> Result<RasterBuffer, ConvolveError> {
        self.submit(ConvolutionRequest::new(buffer, kernel)).await
    }

    /// Queue a prepared request and wait for its result.
    pub async fn submit(&self, request: ConvolutionRequest) -> Result<RasterBuffer, ConvolveError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Job { request, reply })
            .await
            .map_err(|_| ConvolveError::EngineUnavailable("worker has stopped".to_string()))?;

        response.await.map_err(|_| {
            ConvolveError::EngineUnavailable("worker exited before replying".to_string())
        })?
    }

    /// Watch the busy flag. It is `true` while a request is being computed.
    pub fn busy(&self) -> watch::Receiver<bool> {
        self.busy.clone()
    }

    pub fn is_busy(&self) -> bool {
        *self.busy.borrow()
    }

    /// Stop the worker. Queued requests fail with `EngineUnavailable`.
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }
}

/// Lowers the busy flag when dropped, so every accepted request clears it
/// exactly once regardless of how the computation ends.
struct BusyGuard<'a> {
    flag: &'a watch::Sender<bool>,
}

impl<'a> BusyGuard<'a> {
    fn raise(flag: &'a watch::Sender<bool>) -> Self {
        flag.send_replace(true);
        Self { flag }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.send_replace(false);
    }
}

async fn run_worker(
    mut rx: mpsc::Receiver<Job>,
    busy: watch::Sender<bool>,
    shutdown: Arc<Notify>,
    runner: Runner,
) {
    loop {
        let job = tokio::select! {
            biased;
            _ = shutdown.notified() => break,
            job = rx.recv() => match job {
                Some(job) => job,
                None => break,
            },
        };

        let Job { request, reply } = job;
        let (width, height) = request.buffer.dimensions();
        debug!(width, height, side = request.kernel.side(), "convolution request accepted");

        let guard = BusyGuard::raise(&busy);
        let start = Instant::now();
        let result = tokio::task::spawn_blocking(move || runner(request))
            .await
            .map_err(|e| {
                warn!(error = %e, "convolution task failed");
                ConvolveError::EngineUnavailable(e.to_string())
            });
        drop(guard);
        debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "convolution request finished"
        );

        if reply.send(result).is_err() {
            debug!("caller stopped waiting; convolution result discarded");
        }
    }
    debug!("convolution engine stopped");
}
