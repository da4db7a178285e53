use std::fmt;

use folio_primitives::{NodeId, OverlayId};

/// One disagreement between the registry, the stack and the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityFault {
	/// Visible registry entries, stack entries and overlay children disagree.
	CountMismatch { registry: usize, stack: usize, surface_overlays: usize },
	/// A registry entry whose node is not attached to the surface.
	OrphanRecord { id: OverlayId, node: NodeId },
	/// A surface child above the base that no registry entry owns.
	StrayNode(NodeId),
	/// A registry entry missing from the stack.
	Unstacked(OverlayId),
	/// A stack entry with no registry record.
	Unregistered(OverlayId),
	/// The surface lost its base child.
	MissingBase,
}

impl fmt::Display for IntegrityFault {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CountMismatch {
				registry,
				stack,
				surface_overlays,
			} => write!(f, "count mismatch: registry={registry} stack={stack} surface={surface_overlays}"),
			Self::OrphanRecord { id, node } => write!(f, "orphan record {id} ({node} not on surface)"),
			Self::StrayNode(node) => write!(f, "stray surface child {node}"),
			Self::Unstacked(id) => write!(f, "registered overlay {id} missing from stack"),
			Self::Unregistered(id) => write!(f, "stacked overlay {id} missing from registry"),
			Self::MissingBase => f.write_str("surface has no base child"),
		}
	}
}

/// Result of comparing registry, stack and surface state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
	pub registry: usize,
	pub stack: usize,
	/// Total surface children, base included.
	pub surface_children: usize,
	pub faults: Vec<IntegrityFault>,
}

impl IntegrityReport {
	pub fn is_clean(&self) -> bool {
		self.faults.is_empty()
	}
}

impl fmt::Display for IntegrityReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"registry={} stack={} surface={}",
			self.registry, self.stack, self.surface_children
		)?;
		if self.faults.is_empty() {
			return f.write_str(" ok");
		}
		for fault in &self.faults {
			write!(f, "; {fault}")?;
		}
		Ok(())
	}
}
