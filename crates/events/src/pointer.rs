//! Pointer (mouse, pen and touch) event payload.

use crate::error::{EventError, LocalPositionError};
use crate::event::{Event, EventPhase};
use crate::native::NativeEvent;
use crate::space::GlobalToLocal;
use perch_core::{Point, PointLike};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use strum_macros::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

/// Identity of an input source.
///
/// The mouse always uses [`PointerId::MOUSE`] (`-1`). Each simultaneous touch
/// contact gets its own non-negative id from the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointerId(pub i32);

impl PointerId {
    pub const MOUSE: PointerId = PointerId(-1);

    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn is_mouse(self) -> bool {
        self == Self::MOUSE
    }
}

impl From<i32> for PointerId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The pointer event names understood by display objects and the stage.
///
/// Any non-empty string is a valid event type; these are the ones the
/// interaction layer emits itself.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumString, AsRefStr, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum PointerEventType {
    MouseDown,
    PressMove,
    PressUp,
    Click,
    DblClick,
    MouseOver,
    MouseOut,
    RollOver,
    RollOut,
    StageMouseDown,
    StageMouseMove,
    StageMouseUp,
    MouseEnter,
    MouseLeave,
}

impl PointerEventType {
    /// Whether events of this type bubble through the display tree.
    ///
    /// Roll events are sent to each node individually and stage events are
    /// only ever dispatched to the stage.
    pub fn default_bubbles(self) -> bool {
        matches!(
            self,
            Self::MouseDown
                | Self::PressMove
                | Self::PressUp
                | Self::Click
                | Self::DblClick
                | Self::MouseOver
                | Self::MouseOut
        )
    }
}

impl From<PointerEventType> for String {
    fn from(kind: PointerEventType) -> Self {
        kind.as_ref().to_owned()
    }
}

/// Event passed to every mouse, pointer and touch listener.
///
/// Carries three views of the pointer position:
///
/// - `stage_x` / `stage_y`: normalized, always within `[0, stage width] x [0, stage height]`
/// - `raw_x` / `raw_y`: unclamped, equal to the stage position unless the
///   pointer was tracked outside the stage
/// - local: the raw position in the space of the current target, see
///   [`PointerEvent::local_position`]
///
/// The position fields never change after construction. The only state that
/// moves is the dispatch cursor on the embedded [`Event`], which belongs to
/// the dispatcher.
#[derive(Debug)]
pub struct PointerEvent<K> {
    base: Event<K>,
    stage: Point,
    raw: Point,
    native_event: Option<NativeEvent>,
    pointer_id: PointerId,
    primary: bool,
    related_target: Option<K>,
}

impl<K> PointerEvent<K> {
    pub fn builder(event_type: impl Into<String>) -> PointerEventBuilder<K> {
        PointerEventBuilder::new(event_type)
    }

    pub fn base(&self) -> &Event<K> {
        &self.base
    }

    /// Mutable access to the base event, for dispatchers.
    pub fn base_mut(&mut self) -> &mut Event<K> {
        &mut self.base
    }

    pub fn event_type(&self) -> &str {
        self.base.event_type()
    }

    /// The event type as a known [`PointerEventType`], if it is one.
    pub fn kind(&self) -> Option<PointerEventType> {
        self.base.event_type().parse().ok()
    }

    pub fn bubbles(&self) -> bool {
        self.base.bubbles()
    }

    pub fn cancelable(&self) -> bool {
        self.base.cancelable()
    }

    pub fn phase(&self) -> EventPhase {
        self.base.phase()
    }

    pub fn default_prevented(&self) -> bool {
        self.base.default_prevented()
    }

    pub fn prevent_default(&mut self) {
        self.base.prevent_default();
    }

    pub fn stop_propagation(&mut self) {
        self.base.stop_propagation();
    }

    pub fn stop_immediate_propagation(&mut self) {
        self.base.stop_immediate_propagation();
    }

    pub fn stage_x(&self) -> f32 {
        self.stage.x
    }

    pub fn stage_y(&self) -> f32 {
        self.stage.y
    }

    pub fn stage_position(&self) -> Point {
        self.stage
    }

    pub fn raw_x(&self) -> f32 {
        self.raw.x
    }

    pub fn raw_y(&self) -> f32 {
        self.raw.y
    }

    pub fn raw_position(&self) -> Point {
        self.raw
    }

    /// The platform event this event was generated from, if any.
    pub fn native_event(&self) -> Option<&NativeEvent> {
        self.native_event.as_ref()
    }

    pub fn pointer_id(&self) -> PointerId {
        self.pointer_id
    }

    /// Whether this is the primary pointer. Always true for the mouse; for
    /// touch, the first contact of the current set.
    pub fn is_primary(&self) -> bool {
        self.primary
    }

    /// True for any pointer other than the mouse.
    pub fn is_touch(&self) -> bool {
        !self.pointer_id.is_mouse()
    }
}

impl<K: Copy> PointerEvent<K> {
    pub fn target(&self) -> Option<K> {
        self.base.target()
    }

    pub fn current_target(&self) -> Option<K> {
        self.base.current_target()
    }

    /// Secondary node for the event: the node the pointer came from for
    /// `mouseover`/`rollover`, the node it went to for `mouseout`/`rollout`.
    pub fn related_target(&self) -> Option<K> {
        self.related_target
    }

    /// The raw position in the coordinate space of the current target.
    ///
    /// Only meaningful while a dispatch pass is visiting a node. Outside of
    /// one this returns [`LocalPositionError::NoCurrentTarget`]. Errors from
    /// `space` are returned unchanged inside [`LocalPositionError::Transform`].
    pub fn local_position<S>(&self, space: &S) -> Result<Point, LocalPositionError<S::Error>>
    where
        S: GlobalToLocal<K> + ?Sized,
    {
        let Some(node) = self.base.current_target() else {
            log::debug!("{} read local coordinates outside of dispatch", self);
            return Err(LocalPositionError::NoCurrentTarget {
                event_type: self.base.event_type().to_owned(),
            });
        };

        space
            .global_to_local(node, self.raw.x, self.raw.y)
            .map(|local| local.to_point())
            .map_err(LocalPositionError::Transform)
    }

    pub fn local_x<S>(&self, space: &S) -> Result<f32, LocalPositionError<S::Error>>
    where
        S: GlobalToLocal<K> + ?Sized,
    {
        self.local_position(space).map(|local| local.x)
    }

    pub fn local_y<S>(&self, space: &S) -> Result<f32, LocalPositionError<S::Error>>
    where
        S: GlobalToLocal<K> + ?Sized,
    {
        self.local_position(space).map(|local| local.y)
    }
}

/// Produces a fresh event that can be dispatched on its own.
///
/// Type, flags, positions, native event, pointer id and primary flag are
/// copied. The related target is dropped and the dispatch cursor starts empty.
impl<K> Clone for PointerEvent<K> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            stage: self.stage,
            raw: self.raw,
            native_event: self.native_event.clone(),
            pointer_id: self.pointer_id,
            primary: self.primary,
            related_target: None,
        }
    }
}

impl<K> Display for PointerEvent<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = self.stage.unsigned_zero();
        write!(
            f,
            "MouseEvent (type={} stageX={} stageY={})",
            self.base.event_type(),
            stage.x,
            stage.y
        )
    }
}

/// Builder for [`PointerEvent`].
///
/// The stage position and the pointer id have no defaults: `build` rejects
/// an event missing either. Raw coordinates fall back to the stage
/// coordinates, each axis independently.
#[derive(Debug)]
pub struct PointerEventBuilder<K> {
    event_type: String,
    bubbles: bool,
    cancelable: bool,
    stage: Option<Point>,
    raw_x: Option<f32>,
    raw_y: Option<f32>,
    native_event: Option<NativeEvent>,
    pointer_id: Option<PointerId>,
    primary: bool,
    related_target: Option<K>,
}

impl<K> PointerEventBuilder<K> {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            bubbles: false,
            cancelable: false,
            stage: None,
            raw_x: None,
            raw_y: None,
            native_event: None,
            pointer_id: None,
            primary: false,
            related_target: None,
        }
    }

    /// Starts a builder for a known type, with `bubbles` preset from
    /// [`PointerEventType::default_bubbles`].
    pub fn for_kind(kind: PointerEventType) -> Self {
        Self::new(kind).bubbles(kind.default_bubbles())
    }

    pub fn bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    pub fn cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }

    pub fn stage(mut self, x: f32, y: f32) -> Self {
        self.stage = Some(Point::new(x, y));
        self
    }

    pub fn raw(self, x: f32, y: f32) -> Self {
        self.raw_x(x).raw_y(y)
    }

    pub fn raw_x(mut self, x: f32) -> Self {
        self.raw_x = Some(x);
        self
    }

    pub fn raw_y(mut self, y: f32) -> Self {
        self.raw_y = Some(y);
        self
    }

    pub fn native_event(mut self, native_event: NativeEvent) -> Self {
        self.native_event = Some(native_event);
        self
    }

    pub fn pointer_id(mut self, pointer_id: impl Into<PointerId>) -> Self {
        self.pointer_id = Some(pointer_id.into());
        self
    }

    /// Shorthand for a mouse event: pointer id `-1`, primary.
    pub fn mouse(self) -> Self {
        self.pointer_id(PointerId::MOUSE).primary(true)
    }

    /// Ignored for the mouse, which is always primary.
    pub fn primary(mut self, primary: bool) -> Self {
        self.primary = primary;
        self
    }

    pub fn related_target(mut self, related_target: K) -> Self {
        self.related_target = Some(related_target);
        self
    }

    pub fn build(self) -> Result<PointerEvent<K>, EventError> {
        let base = Event::new(self.event_type, self.bubbles, self.cancelable)?;

        let Some(stage) = self.stage else {
            log::debug!("rejected `{}` without a stage position", base.event_type());
            return Err(EventError::MissingStagePosition {
                event_type: base.event_type().to_owned(),
            });
        };
        let Some(pointer_id) = self.pointer_id else {
            log::debug!("rejected `{}` without a pointer id", base.event_type());
            return Err(EventError::MissingPointerId {
                event_type: base.event_type().to_owned(),
            });
        };

        let raw = Point::new(
            self.raw_x.unwrap_or(stage.x),
            self.raw_y.unwrap_or(stage.y),
        );

        Ok(PointerEvent {
            base,
            stage,
            raw,
            native_event: self.native_event,
            pointer_id,
            primary: self.primary || pointer_id.is_mouse(),
            related_target: self.related_target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::FnGlobalToLocal;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::convert::Infallible;
    use strum::IntoEnumIterator;

    type NodeKey = u32;

    fn mouse_down() -> PointerEvent<NodeKey> {
        PointerEvent::builder("mousedown")
            .bubbles(true)
            .cancelable(true)
            .stage(50.0, 60.0)
            .pointer_id(-1)
            .primary(true)
            .build()
            .unwrap()
    }

    /// Every node is translated by `(node * 10, node * 100)` from the stage.
    fn offset_space() -> FnGlobalToLocal<impl Fn(NodeKey, f32, f32) -> Result<Point, Infallible>> {
        FnGlobalToLocal(|node: NodeKey, x: f32, y: f32| {
            Ok(Point::new(x - node as f32 * 10.0, y - node as f32 * 100.0))
        })
    }

    #[test]
    fn mouse_down_scenario() {
        let event = mouse_down();
        assert!(!event.is_touch());
        assert_eq!(event.raw_x(), 50.0);
        assert_eq!(event.raw_y(), 60.0);
        assert_eq!(
            event.to_string(),
            "MouseEvent (type=mousedown stageX=50 stageY=60)"
        );
        assert_eq!(event.kind(), Some(PointerEventType::MouseDown));
    }

    #[test]
    fn raw_defaults_to_stage_for_any_position() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..256 {
            let x = rng.random_range(0.0..1920.0);
            let y = rng.random_range(0.0..1080.0);
            let event = PointerEvent::<NodeKey>::builder("pressmove")
                .stage(x, y)
                .pointer_id(rng.random_range(-1..8_i32))
                .build()
                .unwrap();
            assert_eq!(event.raw_x(), x);
            assert_eq!(event.raw_y(), y);
        }
    }

    #[test]
    fn explicit_raw_is_stored_unclamped() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..256 {
            let stage = (rng.random_range(0.0..800.0), rng.random_range(0.0..600.0));
            let raw = (
                rng.random_range(-5000.0..5000.0),
                rng.random_range(-5000.0..5000.0),
            );
            let event = PointerEvent::<NodeKey>::builder("pressmove")
                .stage(stage.0, stage.1)
                .raw(raw.0, raw.1)
                .mouse()
                .build()
                .unwrap();
            assert_eq!(event.raw_position(), Point::new(raw.0, raw.1));
            assert_eq!(event.stage_position(), Point::new(stage.0, stage.1));
        }
    }

    #[test]
    fn raw_axes_fall_back_independently() {
        let event = PointerEvent::<NodeKey>::builder("pressmove")
            .stage(10.0, 20.0)
            .raw_x(-40.0)
            .mouse()
            .build()
            .unwrap();
        assert_eq!(event.raw_position(), Point::new(-40.0, 20.0));

        let event = PointerEvent::<NodeKey>::builder("pressmove")
            .stage(10.0, 20.0)
            .raw_y(900.0)
            .mouse()
            .build()
            .unwrap();
        assert_eq!(event.raw_position(), Point::new(10.0, 900.0));
    }

    #[test]
    fn is_touch_only_false_for_mouse() {
        for id in -1_i32..64 {
            let event = PointerEvent::<NodeKey>::builder("mousedown")
                .stage(0.0, 0.0)
                .pointer_id(id)
                .build()
                .unwrap();
            assert_eq!(event.is_touch(), id != -1, "pointer id {id}");
        }
    }

    #[test]
    fn mouse_pointer_is_always_primary() {
        let implicit = PointerEvent::<NodeKey>::builder("mousedown")
            .stage(1.0, 2.0)
            .pointer_id(-1)
            .build()
            .unwrap();
        assert!(implicit.is_primary());

        let explicit_false = PointerEvent::<NodeKey>::builder("mousedown")
            .stage(1.0, 2.0)
            .pointer_id(PointerId::MOUSE)
            .primary(false)
            .build()
            .unwrap();
        assert!(explicit_false.is_primary());

        let touch = PointerEvent::<NodeKey>::builder("mousedown")
            .stage(1.0, 2.0)
            .pointer_id(3)
            .build()
            .unwrap();
        assert!(!touch.is_primary());
    }

    #[test]
    fn display_drops_the_sign_of_zero() {
        let event = PointerEvent::<NodeKey>::builder("pressmove")
            .stage(-0.0, -0.0)
            .mouse()
            .build()
            .unwrap();
        assert_eq!(
            event.to_string(),
            "MouseEvent (type=pressmove stageX=0 stageY=0)"
        );
        assert!(event.stage_x().is_sign_negative());
    }

    #[test]
    fn simultaneous_touches_keep_their_identity() {
        let first = PointerEvent::<NodeKey>::builder("mousedown")
            .stage(1.0, 1.0)
            .pointer_id(0)
            .primary(true)
            .build()
            .unwrap();
        let second = PointerEvent::<NodeKey>::builder("mousedown")
            .stage(2.0, 2.0)
            .pointer_id(1)
            .build()
            .unwrap();

        assert!(first.is_touch());
        assert!(second.is_touch());
        assert_ne!(first.pointer_id(), second.pointer_id());
        assert!(first.is_primary());
        assert!(!second.is_primary());
    }

    #[test]
    fn build_rejects_missing_required_inputs() {
        let result = PointerEvent::<NodeKey>::builder("")
            .stage(0.0, 0.0)
            .mouse()
            .build();
        assert_eq!(result.unwrap_err(), EventError::EmptyType);

        let result = PointerEvent::<NodeKey>::builder("click").mouse().build();
        assert_eq!(
            result.unwrap_err(),
            EventError::MissingStagePosition {
                event_type: "click".into()
            }
        );

        let result = PointerEvent::<NodeKey>::builder("click")
            .stage(0.0, 0.0)
            .build();
        assert_eq!(
            result.unwrap_err(),
            EventError::MissingPointerId {
                event_type: "click".into()
            }
        );
    }

    #[test]
    fn clone_copies_payload_and_drops_related_target() {
        let native = NativeEvent::new("raw pointer");
        let mut event = PointerEvent::builder("mouseout")
            .bubbles(true)
            .cancelable(true)
            .stage(5.0, 6.0)
            .raw(-7.0, 8.0)
            .native_event(native.clone())
            .pointer_id(3)
            .primary(true)
            .related_target(42_u32)
            .build()
            .unwrap();
        event.base_mut().begin_dispatch(9);
        event.base_mut().enter(9, EventPhase::AtTarget);

        let copy = event.clone();
        assert_eq!(copy.event_type(), "mouseout");
        assert!(copy.bubbles());
        assert!(copy.cancelable());
        assert_eq!(copy.stage_position(), Point::new(5.0, 6.0));
        assert_eq!(copy.raw_position(), Point::new(-7.0, 8.0));
        assert!(copy.native_event().unwrap().ptr_eq(&native));
        assert_eq!(copy.pointer_id(), PointerId(3));
        assert!(copy.is_primary());

        assert_eq!(copy.related_target(), None);
        assert_eq!(copy.current_target(), None);
        assert_eq!(copy.target(), None);
        assert_eq!(event.related_target(), Some(42));
    }

    #[test]
    fn local_position_requires_current_target() {
        let event = mouse_down();
        let result = event.local_x(&offset_space());
        assert!(matches!(
            result,
            Err(LocalPositionError::NoCurrentTarget { ref event_type }) if event_type == "mousedown"
        ));
        assert!(event.local_y(&offset_space()).is_err());
    }

    #[test]
    fn local_position_follows_current_target() {
        let space = offset_space();
        let mut event = PointerEvent::<NodeKey>::builder("mousedown")
            .stage(50.0, 60.0)
            .raw(150.0, 260.0)
            .mouse()
            .build()
            .unwrap();

        event.base_mut().begin_dispatch(2);
        event.base_mut().enter(2, EventPhase::AtTarget);
        assert_eq!(event.local_x(&space).unwrap(), 130.0);
        assert_eq!(event.local_y(&space).unwrap(), 60.0);

        event.base_mut().enter(1, EventPhase::Bubbling);
        assert_eq!(event.local_position(&space).unwrap(), Point::new(140.0, 160.0));

        event.base_mut().finish_dispatch();
        assert!(event.local_position(&space).is_err());
    }

    #[derive(Debug, PartialEq)]
    struct Detached(NodeKey);

    impl Display for Detached {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "node {} is detached", self.0)
        }
    }

    impl std::error::Error for Detached {}

    #[test]
    fn transform_errors_pass_through() {
        let space = FnGlobalToLocal(|node: NodeKey, _x: f32, _y: f32| {
            Err::<Point, _>(Detached(node))
        });
        let mut event = mouse_down();
        event.base_mut().begin_dispatch(4);
        event.base_mut().enter(4, EventPhase::AtTarget);

        match event.local_x(&space) {
            Err(LocalPositionError::Transform(err)) => assert_eq!(err, Detached(4)),
            other => panic!("unexpected result: {other:?}"),
        }
        let err = event.local_y(&space).unwrap_err();
        assert_eq!(err.to_string(), "node 4 is detached");
    }

    #[test]
    fn space_may_return_any_point_like_value() {
        let space = FnGlobalToLocal(|_: NodeKey, x: f32, y: f32| Ok::<_, Infallible>((x * 2.0, y)));
        let mut event = mouse_down();
        event.base_mut().begin_dispatch(0);
        event.base_mut().enter(0, EventPhase::AtTarget);
        assert_eq!(event.local_position(&space).unwrap(), Point::new(100.0, 60.0));
    }

    #[test]
    fn event_type_names() {
        assert_eq!(PointerEventType::StageMouseMove.to_string(), "stagemousemove");
        assert_eq!(PointerEventType::DblClick.as_ref(), "dblclick");
        assert_eq!(
            "rollout".parse::<PointerEventType>().unwrap(),
            PointerEventType::RollOut
        );
        for kind in PointerEventType::iter() {
            assert_eq!(kind.to_string().parse::<PointerEventType>().unwrap(), kind);
        }
    }

    #[test]
    fn for_kind_presets_bubbling() {
        let event = PointerEventBuilder::<NodeKey>::for_kind(PointerEventType::Click)
            .stage(0.0, 0.0)
            .mouse()
            .build()
            .unwrap();
        assert!(event.bubbles());

        let event = PointerEventBuilder::<NodeKey>::for_kind(PointerEventType::RollOver)
            .stage(0.0, 0.0)
            .mouse()
            .build()
            .unwrap();
        assert!(!event.bubbles());
        assert_eq!(event.kind(), Some(PointerEventType::RollOver));
    }

    #[test]
    fn unknown_types_are_allowed() {
        let event = PointerEvent::<NodeKey>::builder("lasso")
            .stage(0.0, 0.0)
            .mouse()
            .build()
            .unwrap();
        assert_eq!(event.kind(), None);
        assert_eq!(event.event_type(), "lasso");
    }
}
