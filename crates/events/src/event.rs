//! The propagating base event shared by every event payload.

use crate::error::EventError;
use std::fmt::{self, Display};

/// Which leg of a dispatch pass an event is currently on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventPhase {
    /// Not being dispatched.
    #[default]
    None,
    /// Travelling from the root down towards the target.
    Capturing,
    /// At the target node.
    AtTarget,
    /// Travelling from the target's parent back up to the root.
    Bubbling,
}

/// Base event record: a type name, bubble/cancel flags and the dispatch cursor.
///
/// The dispatcher owns the cursor. It calls [`Event::begin_dispatch`] once,
/// [`Event::enter`] for every node it visits and [`Event::finish_dispatch`]
/// when the pass is over. Handlers only read it.
///
/// `Clone` produces a fresh, undispatched event of the same type and flags;
/// none of the dispatch state is carried over.
#[derive(Debug)]
pub struct Event<K> {
    event_type: String,
    bubbles: bool,
    cancelable: bool,
    target: Option<K>,
    current_target: Option<K>,
    phase: EventPhase,
    default_prevented: bool,
    propagation_stopped: bool,
    immediate_propagation_stopped: bool,
}

impl<K> Event<K> {
    pub fn new(
        event_type: impl Into<String>,
        bubbles: bool,
        cancelable: bool,
    ) -> Result<Self, EventError> {
        let event_type = event_type.into();
        if event_type.is_empty() {
            log::debug!("rejected event with an empty type");
            return Err(EventError::EmptyType);
        }

        Ok(Self {
            event_type,
            bubbles,
            cancelable,
            target: None,
            current_target: None,
            phase: EventPhase::None,
            default_prevented: false,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
        })
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    pub fn cancelable(&self) -> bool {
        self.cancelable
    }

    pub fn phase(&self) -> EventPhase {
        self.phase
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub fn immediate_propagation_stopped(&self) -> bool {
        self.immediate_propagation_stopped
    }

    /// Marks the default behaviour as cancelled. Has no effect unless the event is cancelable.
    pub fn prevent_default(&mut self) {
        self.default_prevented = self.cancelable;
    }

    /// Stops the pass after the listeners of the current node have run.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Stops the pass immediately, skipping the remaining listeners on the current node.
    pub fn stop_immediate_propagation(&mut self) {
        self.immediate_propagation_stopped = true;
        self.propagation_stopped = true;
    }

    /// Clears the dispatch cursor. The target and the flags stay readable after the pass.
    pub fn finish_dispatch(&mut self) {
        self.current_target = None;
        self.phase = EventPhase::None;
    }
}

impl<K: Copy> Event<K> {
    /// The node the event was dispatched to, once dispatch has started.
    pub fn target(&self) -> Option<K> {
        self.target
    }

    /// The node whose listeners are running right now. `None` outside a dispatch pass.
    pub fn current_target(&self) -> Option<K> {
        self.current_target
    }

    /// Starts a new pass aimed at `target`. Flags left over from an earlier
    /// pass are cleared.
    pub fn begin_dispatch(&mut self, target: K) {
        self.target = Some(target);
        self.current_target = None;
        self.phase = EventPhase::None;
        self.default_prevented = false;
        self.propagation_stopped = false;
        self.immediate_propagation_stopped = false;
    }

    /// Moves the cursor onto `node`.
    pub fn enter(&mut self, node: K, phase: EventPhase) {
        self.current_target = Some(node);
        self.phase = phase;
    }
}

impl<K> Clone for Event<K> {
    fn clone(&self) -> Self {
        Self {
            event_type: self.event_type.clone(),
            bubbles: self.bubbles,
            cancelable: self.cancelable,
            target: None,
            current_target: None,
            phase: EventPhase::None,
            default_prevented: false,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
        }
    }
}

impl<K> Display for Event<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Event (type={})", self.event_type)
    }
}
