//! Block feeder: producer thread bridging a `BlockSource` to the consumer loop.
//!
//! The source is polled on a dedicated thread and every block is pushed into
//! an unbounded channel. The consumer drains the channel at its own pace;
//! while a transcription call is in flight, blocks simply accumulate. Under
//! sustained backpressure (inference slower than the incoming audio rate)
//! the queue grows without bound; this is a known limitation, accepted to
//! keep the producer from ever blocking.

use crate::audio::block::AudioBlock;
use crate::audio::source::BlockSource;
use crate::error::Result;
use crossbeam_channel::{Receiver, unbounded};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Polling timeout for each source read on the producer thread.
const SOURCE_POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Handle to control a running feeder.
#[derive(Clone)]
pub struct FeederHandle {
    running: Arc<AtomicBool>,
}

impl FeederHandle {
    /// Creates a handle around a shared running flag.
    pub(crate) fn new(running: Arc<AtomicBool>) -> Self {
        Self { running }
    }

    /// Signals the feeder (and any loop sharing the flag) to stop.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Returns true while the feeder is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Producer thread wrapping a block source.
pub struct BlockFeeder {
    thread: Option<JoinHandle<()>>,
    handle: FeederHandle,
}

impl BlockFeeder {
    /// Starts the source and spawns the producer thread.
    ///
    /// Returns the block receiver and the feeder itself. The thread runs
    /// until the source is exhausted, the receiver is dropped, or the
    /// shared running flag is cleared.
    pub fn start<S: BlockSource + 'static>(
        mut source: S,
        running: Arc<AtomicBool>,
    ) -> Result<(Receiver<AudioBlock>, Self)> {
        let (tx, rx) = unbounded();

        source.start()?;
        running.store(true, Ordering::SeqCst);

        let handle = FeederHandle::new(running.clone());
        let thread = thread::spawn(move || {
            while running.load(Ordering::SeqCst) {
                match source.read(SOURCE_POLL_TIMEOUT) {
                    Ok(Some(block)) => {
                        // Stop if the consumer is gone
                        if tx.send(block).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {
                        if source.is_exhausted() {
                            break;
                        }
                        // Timeout with no block: keep polling
                    }
                    Err(e) => {
                        eprintln!("audio source error: {}", e);
                        break;
                    }
                }
            }
            let _ = source.stop();
            // tx drops here, closing the channel and ending the consumer loop
        });

        Ok((
            rx,
            Self {
                thread: Some(thread),
                handle,
            },
        ))
    }

    /// Returns a clonable stop handle.
    pub fn handle(&self) -> FeederHandle {
        self.handle.clone()
    }

    /// Stops the feeder and waits for the producer thread to exit.
    pub fn join(mut self) {
        self.handle.stop();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
