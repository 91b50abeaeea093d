//! Channel-backed subscriptions.
//!
//! For consumers that would rather poll than run inside the notifying call
//! (a render loop, a worker thread), [`ObserverRegistry::subscribe_channel`]
//! hands out a [`Subscription`] that queues every event.
//!
//! [`ObserverRegistry::subscribe_channel`]: crate::ObserverRegistry::subscribe_channel

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crate::event::ChangeEvent;
use crate::observer::Observer;

/// Receiving end of a queued subscription.
///
/// Subscriptions are designed for single-threaded consumption.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Take everything queued so far without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Observer that forwards each event into a channel.
pub(crate) struct ChannelObserver {
    sender: Sender<ChangeEvent>,
    closed: AtomicBool,
}

impl ChannelObserver {
    pub(crate) fn pair() -> (Self, Subscription<ChangeEvent>) {
        let (sender, receiver) = mpsc::channel();
        (
            Self {
                sender,
                closed: AtomicBool::new(false),
            },
            Subscription::new(receiver),
        )
    }
}

impl Observer for ChannelObserver {
    fn on_change(&self, event: ChangeEvent) {
        if self.sender.send(event).is_err() {
            self.closed.store(true, Ordering::Relaxed);
        }
    }

    fn is_alive(&self) -> bool {
        !self.closed.load(Ordering::Relaxed)
    }
}
