use super::Animatable;

/// Visual placement of one view inside a detail panel.
///
/// `offset_x` is in panel widths (`1.0` is one full width to the right).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPose {
	pub offset_x: f32,
	pub opacity: f32,
	pub scale: f32,
}

impl ViewPose {
	/// Fully visible, centred, unscaled.
	pub const REST: Self = Self {
		offset_x: 0.0,
		opacity: 1.0,
		scale: 1.0,
	};

	pub const fn new(offset_x: f32, opacity: f32, scale: f32) -> Self {
		Self { offset_x, opacity, scale }
	}

	/// Returns true when the view contributes nothing to the frame.
	pub fn is_hidden(&self) -> bool {
		self.opacity <= 0.0
	}
}

impl Default for ViewPose {
	fn default() -> Self {
		Self::REST
	}
}

impl Animatable for ViewPose {
	#[inline]
	fn lerp(&self, target: &Self, t: f32) -> Self {
		Self {
			offset_x: self.offset_x.lerp(&target.offset_x, t),
			opacity: self.opacity.lerp(&target.opacity, t),
			scale: self.scale.lerp(&target.scale, t),
		}
	}
}
