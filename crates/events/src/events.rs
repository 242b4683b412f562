//! # Event payloads for the Perch interaction layer
//!
//! [`Event`] is the minimal propagating base record (type, bubble and cancel
//! flags, dispatch cursor). [`PointerEvent`] layers pointer identity and three
//! coordinate frames on top of it:
//!
//! - **stage**: normalized into the stage bounds
//! - **raw**: unclamped, may lie outside the stage
//! - **local**: the raw position mapped into the current target's space, computed on read
//!
//! Both types are generic over the node handle `K` used by whatever tree
//! dispatches them; this crate never looks inside the tree itself.

mod error;
mod event;
mod native;
mod pointer;
mod space;

pub use error::{EventError, LocalPositionError};
pub use event::{Event, EventPhase};
pub use native::NativeEvent;
pub use pointer::{PointerEvent, PointerEventBuilder, PointerEventType, PointerId};
pub use space::{FnGlobalToLocal, GlobalToLocal};
