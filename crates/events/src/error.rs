use thiserror::Error;

/// Rejections raised while constructing an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("event type must not be empty")]
    EmptyType,
    #[error("pointer event `{event_type}` was built without a stage position")]
    MissingStagePosition { event_type: String },
    #[error("pointer event `{event_type}` was built without a pointer id")]
    MissingPointerId { event_type: String },
}

/// Failure to read an event's local coordinates.
#[derive(Debug, Error)]
pub enum LocalPositionError<E> {
    /// The event is not being dispatched, so there is no node to be local to.
    #[error("`{event_type}` has no current target; local coordinates are only available during dispatch")]
    NoCurrentTarget { event_type: String },
    /// The coordinate space rejected the transform. The error is passed through as is.
    #[error(transparent)]
    Transform(E),
}
