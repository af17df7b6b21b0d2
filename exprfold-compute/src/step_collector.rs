/// Receives the intermediate results of a multi-stage pass, such as
/// [`crate::canonicalize_with_steps`].
///
/// Callers that only want the final result pass `&mut ()`, which discards every step. A
/// `Vec<S>` keeps them in order.
pub trait StepCollector<S> {
    /// Records one step.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}
