use std::time::{Duration, Instant};

use super::{Animatable, Easing};

/// Interpolates `start` to `end` over `duration`, sampled at caller-supplied instants.
#[derive(Debug, Clone)]
pub struct Tween<T: Animatable> {
	pub start: T,
	pub end: T,
	pub started_at: Instant,
	pub duration: Duration,
	pub easing: Easing,
}

impl<T: Animatable> Tween<T> {
	/// Creates a linear tween beginning at `started_at`.
	pub fn new_at(start: T, end: T, duration: Duration, started_at: Instant) -> Self {
		Self {
			start,
			end,
			started_at,
			duration,
			easing: Easing::Linear,
		}
	}

	#[must_use]
	pub fn with_easing(mut self, easing: Easing) -> Self {
		self.easing = easing;
		self
	}

	/// Linear progress in `[0.0, 1.0]` at `now`, before easing.
	///
	/// A zero duration is complete immediately.
	#[inline]
	pub fn progress_at(&self, now: Instant) -> f32 {
		if self.duration.is_zero() {
			return 1.0;
		}
		let elapsed = now.saturating_duration_since(self.started_at).as_secs_f32();
		(elapsed / self.duration.as_secs_f32()).min(1.0)
	}

	#[inline]
	pub fn eased_progress_at(&self, now: Instant) -> f32 {
		self.easing.apply(self.progress_at(now))
	}

	#[inline]
	pub fn value_at(&self, now: Instant) -> T {
		self.start.lerp(&self.end, self.eased_progress_at(now))
	}

	#[inline]
	pub fn is_complete_at(&self, now: Instant) -> bool {
		now >= self.ends_at()
	}

	/// Instant at which the tween settles on `end`.
	pub fn ends_at(&self) -> Instant {
		self.started_at + self.duration
	}

	pub fn remaining_at(&self, now: Instant) -> Duration {
		self.ends_at().saturating_duration_since(now)
	}
}
