//! Shutdown signalling for the controller.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;

/// One-shot shutdown signal.
///
/// The controller stops on exactly one event, so this fires at most once:
/// later triggers are swallowed by the latch. Handles are cheap clones
/// sharing the same latch, and `arm_ctrl_c` ties the process interrupt to
/// it. Subscribe before triggering; the signal is not replayed to late
/// subscribers.
#[derive(Clone)]
pub struct ShutdownSignal {
    tx: broadcast::Sender<()>,
    fired: Arc<AtomicBool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            fired: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Channel the controller's run loop listens on.
    pub fn signal_channel(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the signal. Only the first call has any effect.
    pub fn trigger(&self) {
        if self.fired.swap(true, Ordering::SeqCst) {
            return;
        }
        let _ = self.tx.send(());
    }

    /// Whether the signal has already fired.
    pub fn is_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Spawn a task that fires this signal when the process receives Ctrl+C.
    pub fn arm_ctrl_c(&self) {
        let signal = self.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("interrupt received, shutting down");
                    signal.trigger();
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to install interrupt handler");
                }
            }
        });
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_signal_reaches_subscriber() {
        let signal = ShutdownSignal::new();
        let mut rx = signal.signal_channel();

        assert!(!signal.is_fired());
        signal.trigger();

        assert!(rx.recv().await.is_ok());
        assert!(signal.is_fired());
    }

    #[tokio::test]
    async fn test_trigger_latches_after_first_fire() {
        let signal = ShutdownSignal::new();
        let mut rx = signal.signal_channel();

        signal.trigger();
        signal.trigger();
        signal.trigger();

        assert!(rx.recv().await.is_ok());
        // the latch swallowed the repeats
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn test_clones_share_the_latch() {
        let signal = ShutdownSignal::new();
        let handle = signal.clone();
        let mut rx = signal.signal_channel();

        handle.trigger();

        assert!(signal.is_fired());
        assert!(rx.recv().await.is_ok());
    }
}
