//! Callback bindings with an exactly-once cleanup hook.
//!
//! A [`CallbackBinding`] pairs a user-supplied function with an optional cleanup
//! hook. Any state the function needs is captured by the closure itself. The
//! owner of the binding (for example the list box holding a filter predicate)
//! keeps it exclusively; when the binding is replaced, cleared or dropped with
//! its owner, the cleanup hook runs exactly once.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use horizon_listbox_core::CallbackBinding;
//!
//! let cleanups = Arc::new(AtomicUsize::new(0));
//! let counter = cleanups.clone();
//!
//! let func: Box<dyn FnMut(i32) -> bool + Send> = Box::new(|n| n > 0);
//! let mut binding = CallbackBinding::from_boxed(func).with_cleanup(move || {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! assert!((binding.func_mut())(3));
//! drop(binding);
//! assert_eq!(cleanups.load(Ordering::SeqCst), 1);
//! ```

use std::fmt;

type CleanupFn = Box<dyn FnOnce() + Send>;

/// A boxed callback plus an optional cleanup hook.
///
/// `F` is usually an unsized `dyn FnMut(...)` type. The cleanup hook runs in
/// [`Drop`], so moving the binding never runs it and dropping it always does.
pub struct CallbackBinding<F: ?Sized> {
    func: Box<F>,
    cleanup: Option<CleanupFn>,
}

impl<F: ?Sized> CallbackBinding<F> {
    /// Wrap an already boxed function without a cleanup hook.
    pub fn from_boxed(func: Box<F>) -> Self {
        Self {
            func,
            cleanup: None,
        }
    }

    /// Attach a cleanup hook.
    ///
    /// Hooks accumulate: attaching a second hook chains it after the first,
    /// and every attached hook runs exactly once when the binding is dropped.
    pub fn with_cleanup<C>(mut self, cleanup: C) -> Self
    where
        C: FnOnce() + Send + 'static,
    {
        self.cleanup = Some(match self.cleanup.take() {
            Some(earlier) => Box::new(move || {
                earlier();
                cleanup();
            }),
            None => Box::new(cleanup),
        });
        self
    }

    /// Whether a cleanup hook is still pending.
    pub fn has_cleanup(&self) -> bool {
        self.cleanup.is_some()
    }

    /// Mutable access to the bound function, needed to call `FnMut` callbacks.
    pub fn func_mut(&mut self) -> &mut F {
        &mut self.func
    }
}

impl<F: ?Sized> Drop for CallbackBinding<F> {
    fn drop(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            tracing::trace!(target: crate::logging::targets::BINDING, "running binding cleanup");
            cleanup();
        }
    }
}

impl<F: ?Sized> fmt::Debug for CallbackBinding<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackBinding")
            .field("has_cleanup", &self.has_cleanup())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    type Predicate = dyn FnMut(i32) -> bool + Send;

    fn counting_binding(counter: &Arc<AtomicUsize>) -> CallbackBinding<Predicate> {
        let counter = counter.clone();
        let func: Box<Predicate> = Box::new(|n| n % 2 == 0);
        CallbackBinding::from_boxed(func).with_cleanup(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_cleanup_runs_once_on_drop() {
        let counter = Arc::new(AtomicUsize::new(0));
        let binding = counting_binding(&counter);
        assert!(binding.has_cleanup());
        drop(binding);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cleanup_runs_on_replacement() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut slot = Some(counting_binding(&counter));
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        slot = Some(counting_binding(&counter));
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        slot.take();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_move_does_not_run_cleanup() {
        let counter = Arc::new(AtomicUsize::new(0));
        let binding = counting_binding(&counter);
        let moved = vec![binding];
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        drop(moved);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_func_mut_calls_through() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut binding = counting_binding(&counter);
        assert!((binding.func_mut())(4));
        assert!(!(binding.func_mut())(5));
    }

    #[test]
    fn test_chained_cleanups_all_run_once() {
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let first = order.clone();
        let second = order.clone();
        let func: Box<Predicate> = Box::new(|_| true);
        let binding = CallbackBinding::from_boxed(func)
            .with_cleanup(move || first.lock().push("first"))
            .with_cleanup(move || second.lock().push("second"));

        assert!(binding.has_cleanup());
        drop(binding);
        assert_eq!(*order.lock(), vec!["first", "second"]);
    }

    #[test]
    fn test_without_cleanup() {
        let func: Box<Predicate> = Box::new(|_| true);
        let binding = CallbackBinding::from_boxed(func);
        assert!(!binding.has_cleanup());
        assert!(format!("{binding:?}").contains("has_cleanup: false"));
    }
}
