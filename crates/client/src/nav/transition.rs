use std::time::Instant;

use folio_primitives::{NavDirection, NodeId};

use crate::animation::{Keyframes, Tween, ViewPose};
use crate::config::MotionConfig;

/// One committed swap between the current view and a neighbour.
///
/// Both views are sampled from the same eased progress, so they always
/// settle together. Opacity is complementary at every instant: outgoing and
/// incoming opacity sum to one. A transition promoted from a shown preview
/// starts the incoming view at the preview's pose instead and becomes
/// complementary from the middle keyframe on.
#[derive(Debug, Clone)]
pub struct Transition {
	pub direction: NavDirection,
	pub outgoing: NodeId,
	pub incoming: NodeId,
	progress: Tween<f32>,
	outgoing_track: Keyframes<ViewPose>,
	incoming_track: Keyframes<ViewPose>,
}

impl Transition {
	pub fn new(direction: NavDirection, outgoing: NodeId, incoming: NodeId, motion: &MotionConfig, now: Instant) -> Self {
		let sign = direction.sign();
		let slide = motion.slide_distance;
		let mid = motion.mid_keyframe.clamp(0.05, 0.95);
		let mid_scale = (1.0 + motion.preview_scale) / 2.0;

		let outgoing_track = Keyframes::three(
			ViewPose::REST,
			ViewPose::new(-sign * slide * mid, 1.0 - mid, mid_scale),
			ViewPose::new(-sign * slide, 0.0, motion.preview_scale),
			mid,
		);
		let incoming_track = Keyframes::three(
			ViewPose::new(sign * slide, 0.0, motion.preview_scale),
			ViewPose::new(sign * slide * (1.0 - mid), mid, mid_scale),
			ViewPose::REST,
			mid,
		);

		Self {
			direction,
			outgoing,
			incoming,
			progress: Tween::new_at(0.0, 1.0, motion.transition_duration(), now).with_easing(motion.easing),
			outgoing_track,
			incoming_track,
		}
	}

	/// Starts the incoming view from `pose`, where a shown preview already sits.
	#[must_use]
	pub fn with_incoming_start(mut self, pose: ViewPose) -> Self {
		self.incoming_track = self.incoming_track.starting_from(pose);
		self
	}

	/// Returns `(outgoing, incoming)` poses at `now`.
	pub fn poses_at(&self, now: Instant) -> (ViewPose, ViewPose) {
		let t = self.progress.value_at(now);
		(self.outgoing_track.sample(t), self.incoming_track.sample(t))
	}

	pub fn is_complete_at(&self, now: Instant) -> bool {
		self.progress.is_complete_at(now)
	}

	pub fn ends_at(&self) -> Instant {
		self.progress.ends_at()
	}
}
