use super::Animatable;

/// One stop of a keyframe track.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe<T> {
	/// Position along the track in `[0.0, 1.0]`.
	pub at: f32,
	pub value: T,
}

/// Piecewise-linear track through ordered keyframes.
///
/// Sampling is driven by progress that has already been eased, so several
/// tracks sampled with the same progress settle at the same instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframes<T> {
	frames: Vec<Keyframe<T>>,
}

impl<T: Animatable> Keyframes<T> {
	/// Builds a `start → mid → end` track with the middle stop at `mid_at`.
	pub fn three(start: T, mid: T, end: T, mid_at: f32) -> Self {
		let mid_at = mid_at.clamp(f32::EPSILON, 1.0 - f32::EPSILON);
		Self {
			frames: vec![
				Keyframe { at: 0.0, value: start },
				Keyframe { at: mid_at, value: mid },
				Keyframe { at: 1.0, value: end },
			],
		}
	}

	/// Replaces the value of the first stop, keeping the rest of the track.
	#[must_use]
	pub fn starting_from(mut self, value: T) -> Self {
		if let Some(first) = self.frames.first_mut() {
			first.value = value;
		}
		self
	}

	pub fn frames(&self) -> &[Keyframe<T>] {
		&self.frames
	}

	pub fn first(&self) -> &T {
		&self.frames[0].value
	}

	pub fn last(&self) -> &T {
		&self.frames[self.frames.len() - 1].value
	}

	/// Samples the track at `progress`, clamped to `[0.0, 1.0]`.
	pub fn sample(&self, progress: f32) -> T {
		if progress >= 1.0 {
			return self.last().clone();
		}
		let progress = progress.max(0.0);
		for pair in self.frames.windows(2) {
			let (from, to) = (&pair[0], &pair[1]);
			if progress <= to.at {
				let span = to.at - from.at;
				let local = if span <= 0.0 { 1.0 } else { (progress - from.at) / span };
				return from.value.lerp(&to.value, local);
			}
		}
		self.last().clone()
	}
}
