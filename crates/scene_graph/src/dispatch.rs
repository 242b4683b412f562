//! Listener registry and the capture / target / bubble pass.

use crate::{SceneGraph, SceneGraphError, SceneNodeId, ScenePointerEvent};
use events::EventPhase;
use smallvec::SmallVec;
use std::fmt;
use std::rc::Rc;

/// A pointer listener. It receives the event with `current_target` set to
/// the node it was registered on, and the graph so it can resolve local
/// coordinates or the related target.
pub type PointerListener = Rc<dyn Fn(&mut ScenePointerEvent, &SceneGraph)>;

/// Handle returned by [`SceneGraph::add_event_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub(crate) struct ListenerEntry {
    id: ListenerId,
    event_type: String,
    use_capture: bool,
    listener: PointerListener,
}

impl fmt::Debug for ListenerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerEntry")
            .field("id", &self.id)
            .field("event_type", &self.event_type)
            .field("use_capture", &self.use_capture)
            .finish_non_exhaustive()
    }
}

/// What happened during a dispatch pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    pub default_prevented: bool,
    pub propagation_stopped: bool,
    pub listeners_invoked: usize,
}

impl SceneGraph {
    /// Registers `listener` for `event_type` on a node.
    ///
    /// Capture listeners run while the event travels down to the target and
    /// at the target itself; the others run at the target and while bubbling.
    pub fn add_event_listener<F>(
        &mut self,
        node_id: SceneNodeId,
        event_type: impl Into<String>,
        use_capture: bool,
        listener: F,
    ) -> Result<ListenerId, SceneGraphError>
    where
        F: Fn(&mut ScenePointerEvent, &SceneGraph) + 'static,
    {
        let id = ListenerId(self.next_listener_id + 1);
        let node = self
            .nodes
            .get_mut(node_id)
            .ok_or(SceneGraphError::NodeNotFound(node_id))?;
        node.listeners.push(ListenerEntry {
            id,
            event_type: event_type.into(),
            use_capture,
            listener: Rc::new(listener),
        });
        self.next_listener_id += 1;
        Ok(id)
    }

    pub fn remove_event_listener(&mut self, node_id: SceneNodeId, id: ListenerId) -> bool {
        let Some(node) = self.nodes.get_mut(node_id) else {
            return false;
        };
        let before = node.listeners.len();
        node.listeners.retain(|entry| entry.id != id);
        node.listeners.len() != before
    }

    /// Removes every listener on the node, or only those for `event_type`.
    pub fn remove_all_event_listeners(&mut self, node_id: SceneNodeId, event_type: Option<&str>) {
        if let Some(node) = self.nodes.get_mut(node_id) {
            match event_type {
                Some(event_type) => node.listeners.retain(|entry| entry.event_type != event_type),
                None => node.listeners.clear(),
            }
        }
    }

    pub fn has_event_listener(&self, node_id: SceneNodeId, event_type: &str) -> bool {
        self.nodes.get(node_id).is_some_and(|node| {
            node.listeners
                .iter()
                .any(|entry| entry.event_type == event_type)
        })
    }

    /// Whether dispatching `event_type` at this node would reach any listener,
    /// on the node itself or on one of its ancestors.
    pub fn will_trigger(&self, node_id: SceneNodeId, event_type: &str) -> bool {
        self.ancestors(node_id).is_ok_and(|path| {
            path.iter()
                .any(|&node| self.has_event_listener(node, event_type))
        })
    }

    /// Dispatches `event` to `target`.
    ///
    /// The propagation path is fixed before any listener runs. Bubbling events
    /// visit the ancestors from the root down (capture), the target, then the
    /// ancestors back up (bubble). Non-bubbling events only visit the target.
    /// `current_target` is set for each visited node and cleared once the
    /// pass ends.
    pub fn dispatch(
        &self,
        event: &mut ScenePointerEvent,
        target: SceneNodeId,
    ) -> Result<DispatchOutcome, SceneGraphError> {
        let path = self.ancestors(target).inspect_err(|_| {
            log::warn!("dropping {} aimed at missing node {}", event, target);
        })?;

        let mut plan: SmallVec<[(SceneNodeId, EventPhase); 16]> = SmallVec::new();
        let ancestors = &path[1..];
        if event.bubbles() {
            plan.extend(ancestors.iter().rev().map(|&node| (node, EventPhase::Capturing)));
            plan.push((target, EventPhase::AtTarget));
            plan.extend(ancestors.iter().map(|&node| (node, EventPhase::Bubbling)));
        } else {
            plan.push((target, EventPhase::AtTarget));
        }

        event.base_mut().begin_dispatch(target);
        let mut listeners_invoked = 0;
        for (node, phase) in plan {
            listeners_invoked += self.notify(event, node, phase);
            if event.base().propagation_stopped() {
                log::trace!("{} stopped at node {}", event, node);
                break;
            }
        }
        event.base_mut().finish_dispatch();

        Ok(DispatchOutcome {
            default_prevented: event.default_prevented(),
            propagation_stopped: event.base().propagation_stopped(),
            listeners_invoked,
        })
    }

    /// Runs the listeners of one node for one phase. At the target, capture
    /// listeners run before the others.
    fn notify(&self, event: &mut ScenePointerEvent, node_id: SceneNodeId, phase: EventPhase) -> usize {
        let Some(node) = self.nodes.get(node_id) else {
            return 0;
        };

        event.base_mut().enter(node_id, phase);
        log::trace!("{} {:?} at node {}", event, phase, node_id);

        let passes: &[bool] = match phase {
            EventPhase::Capturing => &[true],
            EventPhase::AtTarget => &[true, false],
            EventPhase::Bubbling => &[false],
            EventPhase::None => &[],
        };

        let event_type = event.event_type().to_owned();
        let mut invoked = 0;
        for &use_capture in passes {
            let matching = node
                .listeners
                .iter()
                .filter(|entry| entry.use_capture == use_capture && entry.event_type == event_type);
            for entry in matching {
                (entry.listener)(event, self);
                invoked += 1;
                if event.base().immediate_propagation_stopped() {
                    return invoked;
                }
            }
        }
        invoked
    }
}
