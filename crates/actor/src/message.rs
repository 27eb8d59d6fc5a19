use std::fmt::Debug;

/// The message that an actor can handle.
///
/// A message is applied to the state and then dropped. If the caller
/// expects an answer, the message should carry the sending half of a
/// reply channel, see [`Actor::ask`](crate::Actor::ask).
pub trait Message<S>: Send + Debug + 'static {
    /// Applies the message with mutable access to the actor's state.
    fn apply(self, state: &mut S);
}

/// Type-erased form of a [`Message`], as it travels through the inbox.
pub(crate) trait Envelope<S>: Send + Debug {
    fn open(self: Box<Self>, state: &mut S);
}

impl<S, M: Message<S>> Envelope<S> for M {
    #[inline]
    fn open(self: Box<Self>, state: &mut S) {
        (*self).apply(state)
    }
}

pub(crate) type BoxEnvelope<S> = Box<dyn Envelope<S>>;
