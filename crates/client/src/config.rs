use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::{Easing, ViewPose};

/// Errors raised while loading [`ClientConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("I/O error reading {path}: {error}")]
	Io {
		path: PathBuf,
		error: std::io::Error,
	},

	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Client-wide settings. Every field has a default, so an empty document is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
	pub motion: MotionConfig,
	/// Run an emergency reset when [`crate::Client::audit`] finds any fault.
	pub reset_on_integrity_fault: bool,
}

impl ClientConfig {
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(source)?)
	}

	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let config = Self::from_toml_str(&source)?;
		tracing::debug!(path = %path.display(), "config.loaded");
		Ok(config)
	}
}

/// Timing and geometry of detail-panel previews and transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
	/// Sustained hover required before a neighbour preview appears.
	pub preview_debounce_ms: u64,
	/// Length of one committed transition.
	pub transition_ms: u64,
	/// Position of the cross-fade keyframe, as a fraction of the transition.
	pub mid_keyframe: f32,
	pub easing: Easing,
	/// Horizontal travel of a transition, in panel widths.
	pub slide_distance: f32,
	/// Scale of previews and of views at the far end of a transition.
	pub preview_scale: f32,
	/// How far a shown preview peeks in from the panel edge, in panel widths.
	pub peek_fraction: f32,
	pub peek_opacity: f32,
}

impl Default for MotionConfig {
	fn default() -> Self {
		Self {
			preview_debounce_ms: 100,
			transition_ms: 320,
			mid_keyframe: 0.5,
			easing: Easing::EaseOutCubic,
			slide_distance: 0.35,
			preview_scale: 0.92,
			peek_fraction: 0.12,
			peek_opacity: 0.6,
		}
	}
}

impl MotionConfig {
	pub fn preview_debounce(&self) -> Duration {
		Duration::from_millis(self.preview_debounce_ms)
	}

	pub fn transition_duration(&self) -> Duration {
		Duration::from_millis(self.transition_ms)
	}

	/// Pose of a built preview that is not currently shown.
	pub fn offstage_pose(&self, sign: f32) -> ViewPose {
		ViewPose::new(sign, 0.0, self.preview_scale)
	}

	/// Pose of a preview peeking in from the edge on the `sign` side.
	pub fn peek_pose(&self, sign: f32) -> ViewPose {
		ViewPose::new(sign * (1.0 - self.peek_fraction), self.peek_opacity, self.preview_scale)
	}
}
