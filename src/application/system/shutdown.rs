use tokio::sync::watch;

/// Create a linked trigger/signal pair.
pub fn shutdown_channel() -> (ShutdownTrigger, ShutdownSignal) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, ShutdownSignal { rx })
}

/// Requests a stop. Idempotent.
pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

impl ShutdownTrigger {
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

/// Observed by the generator loop at tick boundaries.
#[derive(Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once a stop has been requested.
    ///
    /// If the trigger is dropped without firing this never resolves: losing
    /// the handle is not a stop request.
    pub async fn triggered(&mut self) {
        let stopped = self.rx.wait_for(|stop| *stop).await.is_ok();
        if !stopped {
            std::future::pending::<()>().await;
        }
    }
}
