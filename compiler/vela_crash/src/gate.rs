//! Single-shot gate: at most one crash report per process.

use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};

thread_local! {
    /// Set while this thread holds a claim, so a fault raised by the report
    /// writer itself is recognized instead of waiting on itself.
    static WRITING: Cell<bool> = const { Cell::new(false) };
}

/// Outcome of [`ReportGate::try_claim`].
#[derive(Debug)]
pub enum Claim {
    /// This thread owns the report.
    Claimed(ClaimGuard),
    /// This thread is already writing a report; it faulted while doing so.
    Reentrant,
    /// Another thread owns the report and will terminate the process.
    HeldElsewhere,
}

/// Proof of a successful claim. Dropping it ends the thread's
/// writing state, but the gate stays closed for good.
#[derive(Debug)]
pub struct ClaimGuard {
    _not_send: std::marker::PhantomData<*const ()>,
}

impl Drop for ClaimGuard {
    fn drop(&mut self) {
        let _ = WRITING.try_with(|w| w.set(false));
    }
}

/// An atomic flag that lets exactly one thread through, ever.
#[derive(Debug, Default)]
pub struct ReportGate {
    claimed: AtomicBool,
}

impl ReportGate {
    pub const fn new() -> Self {
        ReportGate {
            claimed: AtomicBool::new(false),
        }
    }

    pub fn try_claim(&self) -> Claim {
        if WRITING.try_with(Cell::get).unwrap_or(false) {
            return Claim::Reentrant;
        }
        if self.claimed.swap(true, Ordering::AcqRel) {
            return Claim::HeldElsewhere;
        }
        let _ = WRITING.try_with(|w| w.set(true));
        Claim::Claimed(ClaimGuard {
            _not_send: std::marker::PhantomData,
        })
    }

    pub fn is_claimed(&self) -> bool {
        self.claimed.load(Ordering::Acquire)
    }
}
