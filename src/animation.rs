//! Frame-clock driven range animations.
//!
//! Animations are explicit task objects advanced by [`RangeAnimator::tick`]
//! with a caller-supplied timestamp. A task's clock starts at the first tick
//! after it was started, which reports progress 0. Nothing is scheduled behind
//! the caller's back: a cancelled or finished animator never produces another
//! frame.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::view::{TimeRange, ValueRange, offset_time, time_delta};

/// Easing curve applied to linear progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    /// No easing.
    Linear,
    /// Smoothstep, slow at both ends.
    #[default]
    EaseInOut,
    /// Cubic deceleration.
    EaseOut,
}

impl Easing {
    /// Apply the curve to a progress value in `0..=1`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOut => t * t * (3.0 - 2.0 * t),
            Self::EaseOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// Values that can be interpolated by an animator.
pub trait Lerp: Copy {
    /// Interpolate between `self` and `to` at `t` in `0..=1`.
    fn lerp(self, to: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(self, to: Self, t: f64) -> Self {
        if t >= 1.0 {
            return to;
        }
        self + (to - self) * t
    }
}

impl Lerp for ValueRange {
    fn lerp(self, to: Self, t: f64) -> Self {
        Self {
            min: self.min.lerp(to.min, t),
            max: self.max.lerp(to.max, t),
        }
    }
}

impl Lerp for TimeRange {
    fn lerp(self, to: Self, t: f64) -> Self {
        if t >= 1.0 {
            return to;
        }
        let step = |from: i64, to: i64| offset_time(from, time_delta(from, to) * t);
        Self {
            from: step(self.from, to.from),
            to: step(self.to, to.to),
        }
    }
}

/// One advanced animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame<T> {
    /// Linear progress in `0..=1`; exactly 1 on the final frame.
    pub progress: f64,
    /// Eased, interpolated value.
    pub value: T,
}

impl<T> AnimationFrame<T> {
    /// Whether this is the final frame.
    pub fn is_finished(&self) -> bool {
        self.progress >= 1.0
    }
}

/// In-flight transition between two values.
#[derive(Debug, Clone)]
pub struct AnimationTask<T> {
    from: T,
    to: T,
    started: Option<Duration>,
    duration: Duration,
    easing: Easing,
    last_progress: Option<f64>,
}

impl<T: Lerp> AnimationTask<T> {
    fn progress_at(&self, now: Duration) -> f64 {
        let Some(started) = self.started else {
            return 0.0;
        };
        let elapsed = now.saturating_sub(started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    fn value_at(&self, progress: f64) -> T {
        self.from.lerp(self.to, self.easing.apply(progress))
    }
}

/// Drives at most one animation of a quantity at a time.
#[derive(Debug, Clone)]
pub struct RangeAnimator<T> {
    task: Option<AnimationTask<T>>,
}

impl<T> Default for RangeAnimator<T> {
    fn default() -> Self {
        Self { task: None }
    }
}

impl<T: Lerp> RangeAnimator<T> {
    /// Create an idle animator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start animating from `from` to `to`, replacing any running task.
    ///
    /// Pass the current interpolated value as `from` when superseding a
    /// running animation. A zero duration is rejected and leaves the current
    /// task untouched.
    pub fn start(&mut self, from: T, to: T, duration: Duration, easing: Easing) -> ChartResult<()> {
        if duration.is_zero() {
            return Err(ChartError::InvalidAnimation { duration });
        }
        self.task = Some(AnimationTask {
            from,
            to,
            started: None,
            duration,
            easing,
            last_progress: None,
        });
        Ok(())
    }

    /// Stop the running task, if any.
    pub fn cancel(&mut self) {
        self.task = None;
    }

    /// Whether a task is running.
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Target of the running task.
    pub fn target(&self) -> Option<T> {
        self.task.as_ref().map(|task| task.to)
    }

    /// Advance the running task.
    ///
    /// Returns `None` when idle or when `now` does not move progress forward.
    /// The frame with progress 1 ends the task.
    pub fn tick(&mut self, now: Duration) -> Option<AnimationFrame<T>> {
        let task = self.task.as_mut()?;
        if task.started.is_none() {
            task.started = Some(now);
        }
        let progress = task.progress_at(now);
        if task.last_progress.is_some_and(|last| progress <= last) {
            return None;
        }
        task.last_progress = Some(progress);
        let frame = AnimationFrame {
            progress,
            value: task.value_at(progress),
        };
        if frame.is_finished() {
            self.task = None;
        }
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn progress_is_strictly_increasing_and_ends_at_one() {
        let mut animator = RangeAnimator::new();
        animator.start(0.0, 100.0, ms(300), Easing::Linear).unwrap();
        let mut progress = Vec::new();
        let mut now = ms(1_000);
        for _ in 0..100 {
            if let Some(frame) = animator.tick(now) {
                progress.push(frame.progress);
            }
            if !animator.is_running() {
                break;
            }
            now += ms(16);
        }
        assert!(!animator.is_running());
        assert_eq!(progress.first().copied(), Some(0.0));
        assert_eq!(progress.last().copied(), Some(1.0));
        assert!(progress.windows(2).all(|pair| pair[1] > pair[0]));
    }

    #[test]
    fn repeated_timestamp_produces_no_frame() {
        let mut animator = RangeAnimator::new();
        animator.start(0.0, 1.0, ms(100), Easing::Linear).unwrap();
        assert!(animator.tick(ms(50)).is_some());
        assert!(animator.tick(ms(50)).is_none());
        assert!(animator.tick(ms(40)).is_none());
    }

    #[test]
    fn final_frame_hits_target_exactly() {
        let mut animator = RangeAnimator::new();
        animator.start(3.0, 7.0, ms(100), Easing::EaseInOut).unwrap();
        assert_eq!(animator.tick(ms(0)).map(|frame| frame.value), Some(3.0));
        let frame = animator.tick(ms(500)).unwrap();
        assert_eq!(frame.progress, 1.0);
        assert_eq!(frame.value, 7.0);
        assert!(animator.tick(ms(600)).is_none());
    }

    #[test]
    fn zero_duration_is_rejected_without_touching_task() {
        let mut animator = RangeAnimator::new();
        animator.start(0.0, 1.0, ms(100), Easing::Linear).unwrap();
        let err = animator.start(0.0, 5.0, Duration::ZERO, Easing::Linear);
        assert_eq!(
            err,
            Err(ChartError::InvalidAnimation {
                duration: Duration::ZERO
            })
        );
        assert_eq!(animator.target(), Some(1.0));
    }

    #[test]
    fn cancel_is_idempotent_and_stops_frames() {
        let mut animator = RangeAnimator::new();
        animator.start(0.0, 1.0, ms(100), Easing::Linear).unwrap();
        animator.cancel();
        animator.cancel();
        assert!(animator.tick(ms(50)).is_none());
        assert!(!animator.is_running());
    }

    #[test]
    fn time_range_interpolates_in_whole_units() {
        let from = TimeRange::new(0, 100).unwrap();
        let to = TimeRange::new(50, 250).unwrap();
        let mid = from.lerp(to, 0.5);
        assert_eq!(mid, TimeRange { from: 25, to: 175 });
        assert_eq!(from.lerp(to, 1.0), to);
    }

    #[test]
    fn time_range_interpolates_across_the_full_domain() {
        let from = TimeRange::new(i64::MIN, i64::MAX).unwrap();
        let to = TimeRange::new(0, 1_000).unwrap();
        let mid = from.lerp(to, 0.5);
        assert!(mid.from < 0 && mid.to > 1_000);
        assert_eq!(to.lerp(from, 1.0), from);
    }

    #[test]
    fn easing_endpoints_are_fixed() {
        for easing in [Easing::Linear, Easing::EaseInOut, Easing::EaseOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
        }
    }
}
