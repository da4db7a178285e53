/// A value that can be blended toward another.
///
/// `t = 0.0` yields `self`, `t = 1.0` yields `target`. Implementations clamp
/// `t` so overshooting samples never extrapolate.
pub trait Animatable: Clone {
	fn lerp(&self, target: &Self, t: f32) -> Self;
}

impl Animatable for f32 {
	#[inline]
	fn lerp(&self, target: &Self, t: f32) -> Self {
		let t = t.clamp(0.0, 1.0);
		self + (target - self) * t
	}
}

impl Animatable for (f32, f32) {
	#[inline]
	fn lerp(&self, target: &Self, t: f32) -> Self {
		(self.0.lerp(&target.0, t), self.1.lerp(&target.1, t))
	}
}
