use std::cell::Cell;
use std::rc::Rc;

use folio_primitives::{NodeId, OverlayId};
use proptest::prelude::*;

use super::tests::{coordinator, counted, noop};
use super::OverlayKind;
use crate::surface::Surface;

#[derive(Debug, Clone)]
enum Op {
	Push(u8),
	Close(u8),
	CloseTop,
	CloseAll,
}

fn op() -> impl Strategy<Value = Op> {
	prop_oneof![
		4 => (0u8..6).prop_map(Op::Push),
		2 => (0u8..6).prop_map(Op::Close),
		2 => Just(Op::CloseTop),
		1 => Just(Op::CloseAll),
	]
}

fn id_of(slot: u8) -> OverlayId {
	OverlayId::sequenced("slot", u64::from(slot))
}

/// Must keep registry, stack and surface children in agreement after every
/// completed push or close.
///
/// - Enforced in: `OverlayCoordinator::push`, `OverlayCoordinator::close`, `OverlayCoordinator::close_all`
/// - Failure symptom: An invisible panel swallows clicks, or a visible panel
///   ignores Escape because the stack forgot it.
#[cfg_attr(test, test)]
pub(crate) fn test_registry_stack_surface_agree() {
	proptest!(|(ops in proptest::collection::vec(op(), 1..40))| {
		let (mut overlays, surface) = coordinator();
		let mut next_node = 1u64;
		for op in ops {
			match op {
				Op::Push(slot) => {
					overlays.push(id_of(slot), OverlayKind::PlainDetail, NodeId(next_node), noop()).unwrap();
					next_node += 1;
				}
				Op::Close(slot) => {
					let _ = overlays.close(&id_of(slot));
				}
				Op::CloseTop => overlays.close_top().unwrap(),
				Op::CloseAll => {
					overlays.close_all().unwrap();
				}
			}

			let report = overlays.integrity_check().unwrap();
			prop_assert!(report.is_clean(), "{report}");
			prop_assert_eq!(overlays.count(), overlays.stack().len());
			prop_assert_eq!(surface.children().len(), overlays.count() + 1);
			let expected_focus = overlays.top().and_then(|top| overlays.node_of(top)).unwrap_or(NodeId(0));
			if overlays.has_active() {
				prop_assert_eq!(surface.focused(), Some(expected_focus));
			}
		}
	});
}

/// Must route input to the overlay pushed most recently among those still open.
///
/// - Enforced in: `FocusRelay::restore`
/// - Failure symptom: Keyboard input lands in a panel hidden underneath another.
#[cfg_attr(test, test)]
pub(crate) fn test_lifo_focus() {
	let (mut overlays, surface) = coordinator();
	for (slot, node) in [(1, 11), (2, 12), (3, 13)] {
		overlays.push(id_of(slot), OverlayKind::PlainDetail, NodeId(node), noop()).unwrap();
	}

	assert_eq!(surface.focused(), Some(NodeId(13)));
	overlays.close_top().unwrap();
	assert_eq!(surface.focused(), Some(NodeId(12)));
	overlays.close(&id_of(1)).unwrap();
	assert!(!overlays.has_active());
}

/// Must run each close callback exactly once, no matter how many close
/// requests name the same overlay.
///
/// - Enforced in: `OverlayCoordinator::close_one`
/// - Failure symptom: Double-close runs cleanup twice and releases host
///   resources already gone.
#[cfg_attr(test, test)]
pub(crate) fn test_idempotent_close() {
	let (mut overlays, surface) = coordinator();
	let calls = Rc::new(Cell::new(0));
	overlays.push(id_of(1), OverlayKind::PlainDetail, NodeId(1), counted(&calls)).unwrap();

	overlays.close(&id_of(1)).unwrap();
	assert!(overlays.close(&id_of(1)).is_err());
	overlays.close_all().unwrap();

	assert_eq!(calls.get(), 1);
	assert_eq!(surface.children(), vec![NodeId(0)]);
}

/// Must leave exactly the base child and no overlay state after an
/// emergency reset, whatever the starting state.
///
/// - Enforced in: `OverlayCoordinator::emergency_reset`
/// - Failure symptom: Recovery leaves ghost panels on screen or stale ids
///   that block new pushes with the same identity.
#[cfg_attr(test, test)]
pub(crate) fn test_emergency_reset_restores_baseline() {
	proptest!(|(pushes in 0usize..8, strays in 0u64..4)| {
		let (mut overlays, surface) = coordinator();
		for slot in 0..pushes {
			overlays.push(id_of(slot as u8), OverlayKind::RecommendationDetail, NodeId(slot as u64 + 1), noop()).unwrap();
		}
		let mut external = surface.clone();
		for stray in 0..strays {
			external.attach(NodeId(1_000 + stray));
		}

		overlays.emergency_reset();

		prop_assert_eq!(surface.children(), vec![NodeId(0)]);
		prop_assert_eq!(overlays.count(), 0);
		prop_assert!(overlays.stack().is_empty());
		prop_assert!(overlays.integrity_check().unwrap().is_clean());
	});
}
