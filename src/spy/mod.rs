//! Generic spy attachment for named function slots
//!
//! A [`SpySlot`] is a replaceable function cell. Call sites go through
//! [`SpySlot::call`] and never notice whether a spy is attached. Attaching
//! wraps the current function: the wrapper receives the call's arguments
//! together with a re-invoker for the previous function, and decides
//! whether to run it not at all, once, or several times. Attachments nest,
//! newest wrapper outermost; there is no detach.
//!
//! Objects expose their wrappable functions by name through [`SpyTarget`],
//! and [`attach_spy`] performs the lookup-and-wrap in one step.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::error::SpyError;

/// Function type held by a [`SpySlot`]
pub type SlotFn<A, R> = dyn Fn(A) -> R + Send + Sync;

/// A replaceable function cell: the unit a spy wraps
pub struct SpySlot<A, R> {
    current: RwLock<Arc<SlotFn<A, R>>>,
}

impl<A, R> SpySlot<A, R>
where
    A: Clone + 'static,
    R: 'static,
{
    /// Create a slot holding `base` as its original function
    pub fn new<F>(base: F) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Self {
            current: RwLock::new(Arc::new(base)),
        }
    }

    /// Invoke whatever function the slot currently holds.
    ///
    /// The slot lock is released before the invocation, so a wrapper may
    /// attach further spies without deadlocking.
    pub fn call(&self, args: A) -> R {
        let current = {
            let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(&guard)
        };
        current(args)
    }

    /// Wrap the slot's current function with `wrapper`.
    ///
    /// The wrapper receives each call's arguments and a re-invoker for the
    /// function that was current at attach time. Skipping the re-invoker
    /// skips the previous function and its side effects; invoking it N
    /// times runs it N times with the same arguments.
    pub fn attach<W>(&self, wrapper: W)
    where
        W: Fn(&A, &(dyn Fn() -> R)) -> R + Send + Sync + 'static,
    {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let original = Arc::clone(&guard);
        *guard = Arc::new(move |args: A| {
            let call_original = || original(args.clone());
            wrapper(&args, &call_original)
        });
    }
}

/// Objects exposing named spy-wrappable methods
pub trait SpyTarget<A, R> {
    /// Look up the slot behind `method`, if the target has one
    fn spy_slot(&self, method: &str) -> Option<&SpySlot<A, R>>;
}

/// Wrap `method` on `target` so every future call goes through `wrapper`.
///
/// Fails with [`SpyError::MethodNotFound`] before any wrapping occurs when
/// the target exposes no method of that name.
pub fn attach_spy<T, A, R, W>(target: &T, method: &str, wrapper: W) -> Result<(), SpyError>
where
    T: SpyTarget<A, R> + ?Sized,
    A: Clone + 'static,
    R: 'static,
    W: Fn(&A, &(dyn Fn() -> R)) -> R + Send + Sync + 'static,
{
    let slot = target
        .spy_slot(method)
        .ok_or_else(|| SpyError::MethodNotFound(method.to_string()))?;
    slot.attach(wrapper);
    debug!(method, "spy attached");
    Ok(())
}
