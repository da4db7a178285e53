use folio_primitives::OverlayId;
use thiserror::Error;

/// Faults reported by [`super::OverlayCoordinator`].
///
/// These are diagnostics, not control flow: the coordinator has already
/// logged and absorbed the fault by the time a caller sees one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlayError {
	/// An operation ran before a surface was bound.
	#[error("overlay coordinator is not initialized (during {op})")]
	NotInitialized { op: &'static str },

	/// The overlay is not registered.
	#[error("unknown overlay id: {0}")]
	UnknownId(OverlayId),

	/// A close callback panicked; cleanup still completed.
	#[error("close callback for {id} panicked: {message}")]
	CallbackPanicked { id: OverlayId, message: String },
}
