// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Next-frame scheduling and the single flush slot.

use crate::error::TargetError;

/// Identity of one scheduled frame callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequest(u64);

impl FrameRequest {
    /// Wraps a platform handle.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The platform handle.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Source of next-frame callbacks.
///
/// When a requested frame fires, the host calls
/// [`CanvasRenderer::run_frame`](crate::CanvasRenderer::run_frame) with the
/// request it was given.
pub trait FrameScheduler {
    /// Asks the platform for a callback before the next frame.
    fn request_frame(&mut self) -> Result<FrameRequest, TargetError>;

    /// Withdraws a request. Unknown or already fired requests are ignored.
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// A [`FrameScheduler`] whose frames fire only when the host says so.
///
/// ```rust
/// use easel_render::{FrameScheduler, ManualScheduler};
///
/// let mut scheduler = ManualScheduler::new();
/// let request = scheduler.request_frame().unwrap();
/// assert_eq!(scheduler.take_pending(), [request]);
/// assert!(scheduler.pending().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: u64,
    pending: Vec<FrameRequest>,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    /// Creates a scheduler with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests not yet fired or cancelled, oldest first.
    #[must_use]
    pub fn pending(&self) -> &[FrameRequest] {
        &self.pending
    }

    /// Removes and returns every pending request, as if the frame fired.
    pub fn take_pending(&mut self) -> Vec<FrameRequest> {
        core::mem::take(&mut self.pending)
    }

    /// Total requests made so far.
    #[must_use]
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Total requests cancelled so far.
    #[must_use]
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Result<FrameRequest, TargetError> {
        self.next += 1;
        self.requested += 1;
        let request = FrameRequest(self.next);
        self.pending.push(request);
        Ok(request)
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        let before = self.pending.len();
        self.pending.retain(|r| *r != request);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }
}

/// Guard allowing at most one scheduled flush at a time.
#[derive(Debug, Default)]
pub struct FlushSlot {
    armed: Option<FrameRequest>,
}

impl FlushSlot {
    /// Whether a flush is scheduled.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// The scheduled request, if any.
    #[must_use]
    pub fn armed(&self) -> Option<FrameRequest> {
        self.armed
    }

    /// Records `request` as the scheduled flush.
    pub fn arm(&mut self, request: FrameRequest) {
        debug_assert!(self.armed.is_none(), "flush slot armed twice");
        self.armed = Some(request);
    }

    /// Disarms the slot if `request` is the scheduled one.
    ///
    /// Returns `false` for stale or foreign requests, which must not flush.
    pub fn take_if(&mut self, request: FrameRequest) -> bool {
        if self.armed == Some(request) {
            self.armed = None;
            true
        } else {
            false
        }
    }

    /// Disarms the slot, returning the request that should be cancelled.
    pub fn cancel(&mut self) -> Option<FrameRequest> {
        self.armed.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_only_fires_for_its_request() {
        let mut scheduler = ManualScheduler::new();
        let mut slot = FlushSlot::default();
        let first = scheduler.request_frame().unwrap();
        slot.arm(first);

        assert!(!slot.take_if(FrameRequest::from_raw(99)));
        assert!(slot.is_armed());
        assert!(slot.take_if(first));
        assert!(!slot.take_if(first));
    }

    #[test]
    fn cancel_withdraws_pending() {
        let mut scheduler = ManualScheduler::new();
        let mut slot = FlushSlot::default();
        slot.arm(scheduler.request_frame().unwrap());
        if let Some(request) = slot.cancel() {
            scheduler.cancel_frame(request);
        }
        assert!(scheduler.pending().is_empty());
        assert_eq!(scheduler.cancelled(), 1);
        assert_eq!(scheduler.requested(), 1);
        assert!(!slot.is_armed());
    }
}
