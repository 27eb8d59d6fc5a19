use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::Instrument;

use crate::message::BoxEnvelope;
use crate::scheduler::run_actor;
use crate::{ActorDeadError, Message};

struct Channels<S> {
    msg_tx: mpsc::UnboundedSender<BoxEnvelope<S>>,
    kill_tx: watch::Sender<bool>,
}

/// Handle to an actor.
///
/// The actor keeps running until it is killed, or until every handle to
/// it has been dropped.
pub struct Actor<S> {
    channels: Arc<Channels<S>>,
}

impl<S: Send + 'static> Actor<S> {
    /// Spawns a new actor with the specified state and an optional label.
    ///
    /// Must be called within a Tokio runtime.
    pub fn spawn(state: S, label: Option<&str>) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (kill_tx, kill_rx) = watch::channel(false);
        tokio::spawn(
            run_actor(state, msg_rx, kill_rx)
                .instrument(trace_span!("actor", label = label)),
        );
        Self {
            channels: Arc::new(Channels { msg_tx, kill_tx }),
        }
    }

    /// Sends a message to the actor without waiting for it to be handled.
    #[inline]
    pub fn send<M: Message<S>>(&self, msg: M) -> Result<(), ActorDeadError> {
        self.channels
            .msg_tx
            .send(Box::new(msg))
            .map_err(|_| ActorDeadError)
    }

    /// Sends a message carrying a reply channel and waits for the reply.
    ///
    /// Fails if the actor is gone, or if it stopped before the message
    /// was handled.
    pub async fn ask<M, R, F>(&self, make_msg: F) -> Result<R, ActorDeadError>
    where
        M: Message<S>,
        F: FnOnce(oneshot::Sender<R>) -> M,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(make_msg(reply_tx))?;
        reply_rx.await.map_err(|_| ActorDeadError)
    }

    /// Attempts to kill the actor.
    ///
    /// The actor is not guaranteed to be killed immediately, but it
    /// will stop handling further messages and quit soon. Messages still
    /// queued are dropped along with their reply channels.
    #[inline]
    pub fn try_kill(&self) {
        self.channels.kill_tx.send(true).ok();
    }
}

impl<S> Clone for Actor<S> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}
