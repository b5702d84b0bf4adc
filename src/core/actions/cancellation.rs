pub const CANCEL_CHECK_INTERVAL_PIXELS: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("operation cancelled")]
pub struct Cancelled;

pub trait CancelToken: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F> CancelToken for F
where
    F: Fn() -> bool + Send + Sync,
{
    #[inline]
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// Polls `cancel` on the first pixel of a run and every
/// `CANCEL_CHECK_INTERVAL_PIXELS` after it.
#[inline]
pub(crate) fn check_cancelled<C: CancelToken + ?Sized>(
    index: usize,
    cancel: &C,
) -> Result<(), Cancelled> {
    if index % CANCEL_CHECK_INTERVAL_PIXELS == 0 && cancel.is_cancelled() {
        return Err(Cancelled);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[test]
    fn never_cancel_always_returns_false() {
        let token = NeverCancel;
        assert!(!token.is_cancelled());
        assert!(!token.is_cancelled());
    }

    #[test]
    fn closure_token_reflects_atomic_state() {
        let flag = AtomicBool::new(false);
        let token = || flag.load(Ordering::Relaxed);

        assert!(!token.is_cancelled());

        flag.store(true, Ordering::Relaxed);
        assert!(token.is_cancelled());
    }

    #[test]
    fn check_only_polls_on_interval_boundaries() {
        let polls = AtomicUsize::new(0);
        let token = || {
            polls.fetch_add(1, Ordering::Relaxed);
            false
        };

        for index in 0..(CANCEL_CHECK_INTERVAL_PIXELS * 2 + 1) {
            check_cancelled(index, &token).unwrap();
        }

        assert_eq!(polls.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn cancelled_displays_message() {
        assert_eq!(Cancelled.to_string(), "operation cancelled");
    }
}
