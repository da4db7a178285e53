use serde::{Deserialize, Serialize};

/// Curve applied to linear progress before interpolation.
///
/// Input and output are both in `[0.0, 1.0]`; every curve maps 0 to 0 and
/// 1 to 1, so eased animations still settle exactly on their end value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
	Linear,
	/// `t²`
	EaseIn,
	/// `1 - (1-t)²`
	EaseOut,
	EaseInOut,
	/// `1 - (1-t)³`
	#[default]
	EaseOutCubic,
	EaseInOutCubic,
}

impl Easing {
	/// Maps linear progress onto this curve. `t` is clamped first.
	#[inline]
	pub fn apply(self, t: f32) -> f32 {
		let t = t.clamp(0.0, 1.0);
		match self {
			Self::Linear => t,
			Self::EaseIn => t * t,
			Self::EaseOut => 1.0 - (1.0 - t).powi(2),
			Self::EaseInOut => {
				if t < 0.5 {
					2.0 * t * t
				} else {
					1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
				}
			}
			Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
			Self::EaseInOutCubic => {
				if t < 0.5 {
					4.0 * t * t * t
				} else {
					1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
				}
			}
		}
	}
}
