//! Eased quaternion snaps
//!
//! A snap rotates the gizmo cube from its current orientation to a target
//! over a fixed wall-clock duration. Only one snap runs at a time; requests
//! made while one is running are dropped.

use std::time::{Duration, Instant};

use glam::Quat;

/// Cubic ease-out: fast start, decelerating to rest at `t = 1`
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// One running snap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapAnimation {
    started: Instant,
    duration: Duration,
    start: Quat,
    target: Quat,
    delta: Quat,
}

/// Interpolated state of a snap at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapFrame {
    /// Linear progress in `[0, 1]`
    pub progress: f32,
    /// Cube orientation at this instant
    pub orientation: Quat,
    /// Rotation applied so far, relative to the start orientation
    pub rotation: Quat,
    /// True on the frame that lands on the target
    pub finished: bool,
}

impl SnapAnimation {
    /// Snap from `start` to `target`, starting at `started`
    pub fn new(start: Quat, target: Quat, started: Instant, duration: Duration) -> Self {
        let start = start.normalize();
        let target = target.normalize();
        Self {
            started,
            duration,
            start,
            target,
            delta: (target * start.inverse()).normalize(),
        }
    }

    pub fn start(&self) -> Quat {
        self.start
    }

    pub fn target(&self) -> Quat {
        self.target
    }

    /// Total rotation from start to target (`target * start⁻¹`)
    pub fn delta(&self) -> Quat {
        self.delta
    }

    /// Elapsed time over duration, clamped to `[0, 1]`
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Sample the snap at `now`.
    ///
    /// The cumulative rotation is `slerp(I, delta, eased)`, and the
    /// orientation is that rotation applied to the start, which equals
    /// `slerp(start, target, eased)`. The final frame returns the target and
    /// delta exactly.
    pub fn sample(&self, now: Instant) -> SnapFrame {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return SnapFrame {
                progress: 1.0,
                orientation: self.target,
                rotation: self.delta,
                finished: true,
            };
        }

        let eased = ease_out_cubic(progress);
        let rotation = Quat::IDENTITY.slerp(self.delta, eased);
        SnapFrame {
            progress,
            orientation: (rotation * self.start).normalize(),
            rotation,
            finished: false,
        }
    }
}

/// Holds the single active snap
#[derive(Debug, Clone, PartialEq)]
pub struct SnapScheduler {
    duration: Duration,
    active: Option<SnapAnimation>,
}

impl SnapScheduler {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            active: None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&SnapAnimation> {
        self.active.as_ref()
    }

    /// Start a snap unless one is already running.
    ///
    /// Returns the new animation, or `None` when the request was dropped.
    pub fn request(&mut self, start: Quat, target: Quat, now: Instant) -> Option<SnapAnimation> {
        if self.active.is_some() {
            tracing::debug!("Snap request dropped, animation in progress");
            return None;
        }
        let animation = SnapAnimation::new(start, target, now, self.duration);
        self.active = Some(animation);
        Some(animation)
    }

    /// Advance the active snap; it is released on the frame it finishes
    pub fn tick(&mut self, now: Instant) -> Option<SnapFrame> {
        let frame = self.active.as_ref()?.sample(now);
        if frame.finished {
            self.active = None;
            tracing::debug!("Snap finished");
        }
        Some(frame)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DURATION: Duration = Duration::from_millis(100);

    /// Rotation angle between two orientations, stable near zero
    pub(crate) fn angle(a: Quat, b: Quat) -> f32 {
        2.0 * (a * b.inverse()).xyz().length().min(1.0).asin()
    }

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_relative_eq!(ease_out_cubic(0.5), 0.875);
        assert!(ease_out_cubic(0.25) > 0.25);
    }

    #[test]
    fn test_snap_lands_on_target_monotonically() {
        let start = Quat::from_rotation_y(0.3);
        let target = Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2);
        let t0 = Instant::now();
        let animation = SnapAnimation::new(start, target, t0, DURATION);

        let mut last = f32::INFINITY;
        for ms in (0..=100).step_by(5) {
            let frame = animation.sample(t0 + Duration::from_millis(ms));
            let remaining = angle(frame.orientation, target);
            assert!(remaining <= last + 1e-5);
            assert!(angle(frame.orientation, frame.rotation * start) < 1e-4);
            last = remaining;
        }

        let end = animation.sample(t0 + DURATION);
        assert!(end.finished);
        assert!(angle(end.orientation, target) < 1e-4);
        assert_eq!(end.rotation, animation.delta());
    }

    #[test]
    fn test_progress_uses_wall_clock() {
        let t0 = Instant::now();
        let animation =
            SnapAnimation::new(Quat::IDENTITY, Quat::from_rotation_z(1.0), t0, DURATION);
        assert_relative_eq!(animation.progress(t0 + Duration::from_millis(50)), 0.5);
        assert_eq!(animation.progress(t0 + Duration::from_secs(3)), 1.0);
        assert_eq!(animation.progress(t0), 0.0);
    }

    #[test]
    fn test_scheduler_drops_overlapping_requests() {
        let t0 = Instant::now();
        let mut scheduler = SnapScheduler::new(DURATION);
        let first = Quat::from_rotation_x(-1.0);

        assert!(scheduler.request(Quat::IDENTITY, first, t0).is_some());
        assert!(
            scheduler
                .request(
                    Quat::IDENTITY,
                    Quat::from_rotation_y(1.0),
                    t0 + Duration::from_millis(10)
                )
                .is_none()
        );

        let mid = scheduler.tick(t0 + Duration::from_millis(40)).unwrap();
        assert!(!mid.finished);
        assert!(scheduler.is_active());

        let end = scheduler.tick(t0 + Duration::from_millis(120)).unwrap();
        assert!(end.finished);
        assert!(angle(end.orientation, first) < 1e-4);
        assert!(!scheduler.is_active());
        assert!(scheduler.tick(t0 + Duration::from_millis(130)).is_none());

        assert!(
            scheduler
                .request(first, Quat::IDENTITY, t0 + Duration::from_millis(140))
                .is_some()
        );
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let t0 = Instant::now();
        let mut scheduler = SnapScheduler::new(Duration::ZERO);
        let target = Quat::from_rotation_y(0.5);
        scheduler.request(Quat::IDENTITY, target, t0);
        let frame = scheduler.tick(t0).unwrap();
        assert!(frame.finished);
        assert!(angle(frame.orientation, target) < 1e-5);
    }
}
