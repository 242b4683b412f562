use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Opaque handle to the platform event an event was generated from.
///
/// Cloning shares the same underlying value.
#[derive(Clone)]
pub struct NativeEvent(Rc<dyn Any>);

impl NativeEvent {
    pub fn new<T: Any>(event: T) -> Self {
        Self(Rc::new(event))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }

    /// Whether both handles refer to the same platform event.
    pub fn ptr_eq(&self, other: &NativeEvent) -> bool {
        std::ptr::eq(
            Rc::as_ptr(&self.0) as *const (),
            Rc::as_ptr(&other.0) as *const (),
        )
    }
}

impl fmt::Debug for NativeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeEvent").finish_non_exhaustive()
    }
}
