//! Per-invocation context shared by a before-hook and its after-hook.

/// Everything a hook pair sees about one call of a hooked method.
///
/// A fresh context is built on the dispatcher's stack for every call and dropped
/// when the call returns, so `state` written by the before-hook of one call is
/// only ever read by the after-hook of that same call. Nested or concurrent calls
/// into the same method each get their own context.
///
/// # Type Parameters
/// * `A` - The method's argument frame. By-reference and output parameters are
///   written back to the caller through it.
/// * `R` - The return type, `()` for void methods.
/// * `S` - State private to the hook pair; starts at `S::default()` on every call.
///
/// # Examples
///
/// ```rust
/// use hostpatch::interception::InvocationContext;
///
/// let mut args = 5u8;
/// let mut ctx: InvocationContext<'_, u8, bool, u8> = InvocationContext::new(&mut args);
///
/// ctx.state = *ctx.args;
/// ctx.skip_with(false);
///
/// assert!(!ctx.run_original);
/// assert_eq!(ctx.result, Some(false));
/// ```
pub struct InvocationContext<'a, A, R, S = ()> {
    /// The caller's arguments. Mutations to reference parameters are visible to
    /// the original body (when it runs) and to the caller afterwards.
    pub args: &'a mut A,

    /// The effective return value.
    ///
    /// Set by the dispatcher after the original body runs; may be set by the
    /// before-hook when it skips the original, and replaced by the after-hook.
    pub result: Option<R>,

    /// Whether the original body runs. Defaults to `true`.
    pub run_original: bool,

    /// Hook-pair private state, carried from the before-hook to the after-hook.
    pub state: S,
}

impl<'a, A, R, S: Default> InvocationContext<'a, A, R, S> {
    /// Creates the context for one call.
    pub fn new(args: &'a mut A) -> Self {
        InvocationContext {
            args,
            result: None,
            run_original: true,
            state: S::default(),
        }
    }
}

impl<A, R, S> InvocationContext<'_, A, R, S> {
    /// Suppresses the original body and makes `result` the call's return value.
    pub fn skip_with(&mut self, result: R) {
        self.result = Some(result);
        self.run_original = false;
    }

    /// Suppresses the original body without supplying a value; the call then
    /// returns `R::default()` unless the after-hook sets one.
    pub fn skip_original(&mut self) {
        self.run_original = false;
    }

    /// Returns the current result, if any.
    #[must_use]
    pub fn result(&self) -> Option<&R> {
        self.result.as_ref()
    }

    /// Consumes the context and yields the value the caller receives.
    pub fn into_result(self) -> R
    where
        R: Default,
    {
        self.result.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_defaults() {
        let mut args = (1u16, 2i32);
        let ctx: InvocationContext<'_, (u16, i32), i32, Option<u8>> =
            InvocationContext::new(&mut args);

        assert!(ctx.run_original);
        assert!(ctx.result().is_none());
        assert_eq!(ctx.state, None);
    }

    #[test]
    fn test_args_write_through() {
        let mut args = 10i32;
        {
            let ctx: InvocationContext<'_, i32, ()> = InvocationContext::new(&mut args);
            *ctx.args -= 1;
        }
        assert_eq!(args, 9);
    }

    #[test]
    fn test_into_result_defaults() {
        let mut args = ();
        let mut ctx: InvocationContext<'_, (), i32> = InvocationContext::new(&mut args);
        ctx.skip_original();
        assert_eq!(ctx.into_result(), 0);

        let mut ctx: InvocationContext<'_, (), i32> = InvocationContext::new(&mut args);
        ctx.skip_with(7);
        assert_eq!(ctx.into_result(), 7);
    }
}
