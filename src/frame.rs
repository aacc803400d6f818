//! Repaint scheduling.
//!
//! Transform and overlay updates are batched to the next display refresh.
//! At most one repaint is pending at a time; every delta that arrives before
//! it runs is coalesced into it.

use web_time::Instant;

/// Tracks whether a repaint has been requested for the next frame.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: bool,
    /// Requests folded into the pending frame.
    coalesced: u32,
    last_frame: Option<Instant>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a repaint.
    ///
    /// Returns true only for the first request since the last frame; the
    /// caller must then ask the host for an animation frame.
    pub fn request(&mut self) -> bool {
        self.coalesced += 1;
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Start the frame, consuming the pending request.
    ///
    /// Returns false when no repaint was pending.
    pub fn begin_frame(&mut self) -> bool {
        if !self.pending {
            return false;
        }
        let now = Instant::now();
        match self.last_frame {
            Some(last) => log::trace!(
                "Frame: {} updates coalesced, {:.1}ms since last frame",
                self.coalesced,
                now.duration_since(last).as_secs_f64() * 1000.0
            ),
            None => log::trace!("Frame: {} updates coalesced (first frame)", self.coalesced),
        }
        self.last_frame = Some(now);
        self.pending = false;
        self.coalesced = 0;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_coalesce_until_frame() {
        let mut frames = FrameScheduler::new();
        assert!(frames.request());
        assert!(!frames.request());
        assert!(!frames.request());
        assert!(frames.is_pending());

        assert!(frames.begin_frame());
        assert!(!frames.is_pending());
        assert!(!frames.begin_frame());

        assert!(frames.request());
    }
}
