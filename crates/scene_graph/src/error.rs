use crate::SceneNodeId;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SceneGraphError {
    #[error("scene node {0} does not exist")]
    NodeNotFound(SceneNodeId),
    #[error("scene node {0} has a transform that cannot be inverted")]
    NonInvertible(SceneNodeId),
}
