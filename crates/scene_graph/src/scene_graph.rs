//! # Scene Graph
//!
//! A hierarchical tree of display nodes used to route pointer events. Each
//! node carries a [`NodeTransform`] relative to its parent; composing them
//! from a node up to the root gives its world transform, and the inverse
//! maps stage coordinates into the node's local space.
//!
//! The graph is the [`GlobalToLocal`] implementation pointer events use for
//! `local_x` / `local_y`, and it runs the capture, target and bubble passes
//! that assign `current_target` (see [`SceneGraph::dispatch`]).

mod dispatch;
mod error;

pub use dispatch::{DispatchOutcome, ListenerId, PointerListener};
pub use error::SceneGraphError;

use dispatch::ListenerEntry;
use events::GlobalToLocal;
use perch_core::{NodeTransform, Point, PointLike};
use slotmap::SlotMap;
use smallvec::SmallVec;
use std::fmt::{self, Display};

/// Pointer events routed through the scene graph.
pub type ScenePointerEvent = events::PointerEvent<SceneNodeId>;

/// Node path from a node up to the root, node first.
pub type NodePath = SmallVec<[SceneNodeId; 8]>;

slotmap::new_key_type! {
    /// Defines a unique identifier for nodes within the scene graph.
    pub struct SceneNodeId;
}

impl SceneNodeId {
    /// Converts this scene node id to a [u64]
    pub fn as_u64(self) -> u64 {
        self.0.as_ffi()
    }
}

impl Display for SceneNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u64())
    }
}

/// SceneGraph owns the display tree pointer events travel through.
///
/// Nodes refer to each other by [`SceneNodeId`] only, so an id held
/// elsewhere (for example an event's related target) is a lookup key, not
/// an owner: it simply stops resolving once the node is removed.
pub struct SceneGraph {
    /// The root node, typically the stage itself
    root: SceneNodeId,

    /// Storage for all scene nodes, indexed by their IDs
    nodes: SlotMap<SceneNodeId, SceneNode>,

    next_listener_id: u64,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Creates a new, empty scene graph with a root node
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::new(None, NodeTransform::identity()));

        Self {
            root,
            nodes,
            next_listener_id: 0,
        }
    }

    /// Returns the ID of the root node
    pub fn root(&self) -> SceneNodeId {
        self.root
    }

    /// Creates a new scene node as a child of `parent_id`, or of the root when `None`.
    pub fn create_node(
        &mut self,
        parent_id: Option<SceneNodeId>,
        transform: NodeTransform,
    ) -> Result<SceneNodeId, SceneGraphError> {
        let parent_id = parent_id.unwrap_or(self.root);
        if !self.nodes.contains_key(parent_id) {
            return Err(SceneGraphError::NodeNotFound(parent_id));
        }

        let node_id = self.nodes.insert(SceneNode::new(Some(parent_id), transform));
        if let Some(parent) = self.nodes.get_mut(parent_id) {
            parent.children.push(node_id);
        }

        Ok(node_id)
    }

    /// Moves an existing node under a new parent.
    ///
    /// Returns `false` when either node is missing or the move would create a cycle.
    pub fn add_child(&mut self, parent_id: SceneNodeId, child_id: SceneNodeId) -> bool {
        if !self.nodes.contains_key(parent_id) || !self.nodes.contains_key(child_id) {
            return false;
        }

        if self.is_ancestor(child_id, parent_id) {
            return false;
        }

        if let Some(old_parent_id) = self.nodes.get(child_id).and_then(|node| node.parent) {
            if let Some(old_parent) = self.nodes.get_mut(old_parent_id) {
                old_parent.children.retain(|&id| id != child_id);
            }
        }

        if let Some(child) = self.nodes.get_mut(child_id) {
            child.parent = Some(parent_id);
        }

        if let Some(parent) = self.nodes.get_mut(parent_id) {
            parent.children.push(child_id);
        }

        true
    }

    /// Removes a node and all its children. The root cannot be removed.
    pub fn remove_node(&mut self, node_id: SceneNodeId) -> bool {
        if node_id == self.root || !self.nodes.contains_key(node_id) {
            return false;
        }

        if let Some(parent_id) = self.nodes.get(node_id).and_then(|node| node.parent) {
            if let Some(parent) = self.nodes.get_mut(parent_id) {
                parent.children.retain(|&id| id != node_id);
            }
        }

        if let Some(node) = self.nodes.get(node_id) {
            let children = node.children.clone();
            for child_id in children {
                self.remove_node(child_id);
            }
        }

        self.nodes.remove(node_id).is_some()
    }

    /// Clears all nodes from the scene graph except the root
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = self
            .nodes
            .insert(SceneNode::new(None, NodeTransform::identity()));
    }

    pub fn contains(&self, node_id: SceneNodeId) -> bool {
        self.nodes.contains_key(node_id)
    }

    pub fn parent(&self, node_id: SceneNodeId) -> Option<SceneNodeId> {
        self.nodes.get(node_id).and_then(|node| node.parent)
    }

    /// Gets the children of a scene node
    pub fn children(&self, node_id: SceneNodeId) -> &[SceneNodeId] {
        self.nodes
            .get(node_id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    pub fn transform(&self, node_id: SceneNodeId) -> Option<NodeTransform> {
        self.nodes.get(node_id).map(|node| node.transform)
    }

    /// Replaces the node's transform relative to its parent.
    pub fn set_transform(&mut self, node_id: SceneNodeId, transform: NodeTransform) -> bool {
        match self.nodes.get_mut(node_id) {
            Some(node) => {
                node.transform = transform;
                true
            }
            None => false,
        }
    }

    /// The node followed by each of its ancestors, ending at the root.
    pub fn ancestors(&self, node_id: SceneNodeId) -> Result<NodePath, SceneGraphError> {
        if !self.nodes.contains_key(node_id) {
            return Err(SceneGraphError::NodeNotFound(node_id));
        }

        let mut path = NodePath::new();
        let mut current = Some(node_id);
        while let Some(id) = current {
            path.push(id);
            current = self.nodes.get(id).and_then(|node| node.parent);
        }
        Ok(path)
    }

    /// The transform from the node's local space to global (stage) space.
    pub fn world_transform(&self, node_id: SceneNodeId) -> Result<NodeTransform, SceneGraphError> {
        let node = self
            .nodes
            .get(node_id)
            .ok_or(SceneGraphError::NodeNotFound(node_id))?;

        let mut world = node.transform;
        let mut current = node.parent;
        while let Some(id) = current {
            let ancestor = self
                .nodes
                .get(id)
                .ok_or(SceneGraphError::NodeNotFound(id))?;
            world = world.then(&ancestor.transform);
            current = ancestor.parent;
        }
        Ok(world)
    }

    /// Maps a point in the node's local space to global coordinates.
    pub fn local_to_global(
        &self,
        node_id: SceneNodeId,
        point: impl PointLike,
    ) -> Result<Point, SceneGraphError> {
        Ok(self.world_transform(node_id)?.apply(point))
    }

    /// Maps a global point into the node's local space.
    pub fn global_to_local(
        &self,
        node_id: SceneNodeId,
        point: impl PointLike,
    ) -> Result<Point, SceneGraphError> {
        self.map_to_local(node_id, point.to_point())
    }

    fn map_to_local(&self, node_id: SceneNodeId, point: Point) -> Result<Point, SceneGraphError> {
        let world = self.world_transform(node_id)?;
        if !world.is_invertible() {
            return Err(SceneGraphError::NonInvertible(node_id));
        }
        Ok(world.apply_inverse(point))
    }

    /// Determines if a node is an ancestor of another node in the hierarchy
    fn is_ancestor(&self, node_id: SceneNodeId, descendant_id: SceneNodeId) -> bool {
        let mut current = Some(descendant_id);
        while let Some(id) = current {
            if id == node_id {
                return true;
            }
            current = self.nodes.get(id).and_then(|node| node.parent);
        }
        false
    }
}

impl GlobalToLocal<SceneNodeId> for SceneGraph {
    type Output = Point;
    type Error = SceneGraphError;

    fn global_to_local(
        &self,
        node: SceneNodeId,
        x: f32,
        y: f32,
    ) -> Result<Point, SceneGraphError> {
        self.map_to_local(node, Point::new(x, y))
    }
}

/// A single node in the scene graph hierarchy.
#[derive(Debug)]
struct SceneNode {
    /// Root nodes have no parent (None)
    parent: Option<SceneNodeId>,

    children: Vec<SceneNodeId>,

    /// Transform relative to the parent
    transform: NodeTransform,

    listeners: Vec<ListenerEntry>,
}

impl SceneNode {
    fn new(parent: Option<SceneNodeId>, transform: NodeTransform) -> Self {
        Self {
            parent,
            children: Vec::new(),
            transform,
            listeners: Vec::new(),
        }
    }
}
