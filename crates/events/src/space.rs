use perch_core::PointLike;

/// A coordinate space that can map global (stage) coordinates into the local
/// space of one of its nodes.
///
/// The scene graph is the production implementation. Tests can use
/// [`FnGlobalToLocal`] instead of building a tree.
pub trait GlobalToLocal<K> {
    type Output: PointLike;
    type Error;

    fn global_to_local(&self, node: K, x: f32, y: f32) -> Result<Self::Output, Self::Error>;
}

impl<K, S: GlobalToLocal<K> + ?Sized> GlobalToLocal<K> for &S {
    type Output = S::Output;
    type Error = S::Error;

    fn global_to_local(&self, node: K, x: f32, y: f32) -> Result<Self::Output, Self::Error> {
        (**self).global_to_local(node, x, y)
    }
}

/// Adapts a closure into a [`GlobalToLocal`] implementation.
pub struct FnGlobalToLocal<F>(pub F);

impl<K, F, P, E> GlobalToLocal<K> for FnGlobalToLocal<F>
where
    F: Fn(K, f32, f32) -> Result<P, E>,
    P: PointLike,
{
    type Output = P;
    type Error = E;

    fn global_to_local(&self, node: K, x: f32, y: f32) -> Result<P, E> {
        (self.0)(node, x, y)
    }
}
