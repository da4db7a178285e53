use std::cell::{Cell, RefCell};
use std::rc::Rc;

use folio_primitives::{NodeId, OverlayId};
use pretty_assertions::assert_eq;

use super::*;
use crate::surface::{SceneSurface, Surface};

const BASE: NodeId = NodeId(0);

pub(super) fn coordinator() -> (OverlayCoordinator<SceneSurface>, SceneSurface) {
	let surface = SceneSurface::with_base(BASE);
	let mut coordinator = OverlayCoordinator::new();
	coordinator.initialize(surface.clone());
	(coordinator, surface)
}

pub(super) fn noop() -> CloseCallback {
	Box::new(|| {})
}

pub(super) fn counted(calls: &Rc<Cell<u32>>) -> CloseCallback {
	let calls = calls.clone();
	Box::new(move || calls.set(calls.get() + 1))
}

fn logged(log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> CloseCallback {
	let log = log.clone();
	Box::new(move || log.borrow_mut().push(name))
}

fn callback_fault() {
	panic!("callback fault");
}

fn refresh_fault() {
	panic!("refresh fault");
}

#[test]
fn close_top_restores_focus_and_runs_refresh_hook_once() {
	let (mut overlays, surface) = coordinator();
	let b_closed = Rc::new(Cell::new(0));
	let a_refreshed = Rc::new(Cell::new(0));

	overlays.push("A".into(), OverlayKind::PlainDetail, NodeId(1), noop()).unwrap();
	let hook_calls = a_refreshed.clone();
	overlays
		.set_refresh_hook(&"A".into(), Box::new(move || hook_calls.set(hook_calls.get() + 1)))
		.unwrap();
	overlays
		.push("B".into(), OverlayKind::RecommendationDetail, NodeId(2), counted(&b_closed))
		.unwrap();

	overlays.close_top().unwrap();

	assert_eq!(b_closed.get(), 1);
	assert_eq!(overlays.stack(), &[OverlayId::from("A")]);
	assert_eq!(surface.focused(), Some(NodeId(1)));
	assert_eq!(a_refreshed.get(), 1);
	assert_eq!(surface.children(), vec![BASE, NodeId(1)]);
}

#[test]
fn close_unknown_id_changes_nothing() {
	let (mut overlays, surface) = coordinator();
	let a_closed = Rc::new(Cell::new(0));
	overlays.push("A".into(), OverlayKind::PlainDetail, NodeId(1), counted(&a_closed)).unwrap();
	let focus_requests = surface.focus_requests();

	let err = overlays.close(&"B".into()).unwrap_err();

	assert_eq!(err, OverlayError::UnknownId("B".into()));
	assert_eq!(a_closed.get(), 0);
	assert_eq!(overlays.count(), 1);
	assert_eq!(overlays.stack(), &[OverlayId::from("A")]);
	assert_eq!(surface.children(), vec![BASE, NodeId(1)]);
	assert_eq!(surface.focus_requests(), focus_requests);
}

#[test]
fn close_all_survives_panicking_callback() {
	let (mut overlays, surface) = coordinator();
	let closed = Rc::new(Cell::new(0));

	overlays.push("A".into(), OverlayKind::PlainDetail, NodeId(1), counted(&closed)).unwrap();
	overlays
		.push("B".into(), OverlayKind::Custom("menu"), NodeId(2), Box::new(callback_fault))
		.unwrap();
	overlays.push("C".into(), OverlayKind::PlainDetail, NodeId(3), counted(&closed)).unwrap();

	let total = overlays.close_all().unwrap();

	assert_eq!(total, 3);
	assert_eq!(closed.get(), 2);
	assert_eq!(overlays.count(), 0);
	assert!(!overlays.has_active());
	assert!(overlays.stack().is_empty());
	assert_eq!(surface.children(), vec![BASE]);
	assert!(overlays.integrity_check().unwrap().is_clean());
}

#[test]
fn close_all_runs_callbacks_topmost_first() {
	let (mut overlays, _surface) = coordinator();
	let log = Rc::new(RefCell::new(Vec::new()));
	overlays.push("A".into(), OverlayKind::PlainDetail, NodeId(1), logged(&log, "A")).unwrap();
	overlays.push("B".into(), OverlayKind::PlainDetail, NodeId(2), logged(&log, "B")).unwrap();
	overlays.push("C".into(), OverlayKind::PlainDetail, NodeId(3), logged(&log, "C")).unwrap();

	overlays.close_all().unwrap();

	assert_eq!(*log.borrow(), vec!["C", "B", "A"]);
}

#[test]
fn closing_non_top_cascades_through_overlays_above() {
	let (mut overlays, surface) = coordinator();
	let log = Rc::new(RefCell::new(Vec::new()));
	let a_refreshed = Rc::new(Cell::new(0));
	let b_refreshed = Rc::new(Cell::new(0));

	overlays.push("A".into(), OverlayKind::PlainDetail, NodeId(1), logged(&log, "A")).unwrap();
	overlays.push("B".into(), OverlayKind::PlainDetail, NodeId(2), logged(&log, "B")).unwrap();
	overlays.push("C".into(), OverlayKind::PlainDetail, NodeId(3), logged(&log, "C")).unwrap();
	for (id, counter) in [("A", &a_refreshed), ("B", &b_refreshed)] {
		let counter = counter.clone();
		overlays
			.set_refresh_hook(&id.into(), Box::new(move || counter.set(counter.get() + 1)))
			.unwrap();
	}

	overlays.close(&"B".into()).unwrap();

	assert_eq!(*log.borrow(), vec!["C", "B"]);
	assert_eq!(overlays.stack(), &[OverlayId::from("A")]);
	assert_eq!(surface.children(), vec![BASE, NodeId(1)]);
	assert_eq!(surface.focused(), Some(NodeId(1)));
	assert_eq!(b_refreshed.get(), 0, "B never became top during the cascade");
	assert_eq!(a_refreshed.get(), 1);
}

#[test]
fn push_with_existing_id_replaces_previous_overlay() {
	let (mut overlays, surface) = coordinator();
	let first_closed = Rc::new(Cell::new(0));
	overlays.push("A".into(), OverlayKind::PlainDetail, NodeId(1), counted(&first_closed)).unwrap();

	overlays.push("A".into(), OverlayKind::PlainDetail, NodeId(7), noop()).unwrap();

	assert_eq!(first_closed.get(), 1);
	assert_eq!(overlays.count(), 1);
	assert_eq!(overlays.node_of(&"A".into()), Some(NodeId(7)));
	assert_eq!(surface.children(), vec![BASE, NodeId(7)]);
	assert_eq!(surface.focused(), Some(NodeId(7)));
}

#[test]
fn operations_before_initialize_are_rejected_without_side_effects() {
	let mut overlays: OverlayCoordinator<SceneSurface> = OverlayCoordinator::new();
	let closed = Rc::new(Cell::new(0));

	let push = overlays.push("A".into(), OverlayKind::PlainDetail, NodeId(1), counted(&closed));
	assert_eq!(push, Err(OverlayError::NotInitialized { op: "push" }));
	assert_eq!(overlays.close(&"A".into()), Err(OverlayError::NotInitialized { op: "close" }));
	assert!(overlays.close_all().is_err());
	assert!(overlays.integrity_check().is_err());
	assert_eq!(overlays.count(), 0);
	assert_eq!(closed.get(), 0, "rejected push must drop the callback without running it");
}

#[test]
fn rebinding_surface_is_allowed() {
	let (mut overlays, _first) = coordinator();
	let second = SceneSurface::with_base(NodeId(100));
	overlays.initialize(second.clone());

	overlays.push("A".into(), OverlayKind::PlainDetail, NodeId(1), noop()).unwrap();
	assert_eq!(second.children(), vec![NodeId(100), NodeId(1)]);
}

#[test]
fn dispose_closes_everything_and_unbinds() {
	let (mut overlays, surface) = coordinator();
	let closed = Rc::new(Cell::new(0));
	overlays.push("A".into(), OverlayKind::PlainDetail, NodeId(1), counted(&closed)).unwrap();

	overlays.dispose();

	assert_eq!(closed.get(), 1);
	assert!(!overlays.is_initialized());
	assert_eq!(surface.children(), vec![BASE]);
	assert!(overlays.push("B".into(), OverlayKind::PlainDetail, NodeId(2), noop()).is_err());
}

#[test]
fn integrity_check_flags_stray_and_orphan_nodes() {
	let (mut overlays, surface) = coordinator();
	overlays.push("A".into(), OverlayKind::PlainDetail, NodeId(1), noop()).unwrap();
	overlays.push("B".into(), OverlayKind::PlainDetail, NodeId(2), noop()).unwrap();

	let mut external = surface.clone();
	external.detach(NodeId(1));
	external.attach(NodeId(42));

	let report = overlays.integrity_check().unwrap();
	assert!(report.faults.contains(&IntegrityFault::OrphanRecord {
		id: "A".into(),
		node: NodeId(1),
	}));
	assert!(report.faults.contains(&IntegrityFault::StrayNode(NodeId(42))));
	assert_eq!(report.registry, 2);
	assert_eq!(report.stack, 2);
	assert_eq!(report.surface_children, 3);

	// Reporting never repairs.
	assert_eq!(overlays.count(), 2);
	assert_eq!(surface.children(), vec![BASE, NodeId(2), NodeId(42)]);
}

#[test]
fn integrity_check_flags_count_mismatch() {
	let (mut overlays, surface) = coordinator();
	overlays.push("A".into(), OverlayKind::PlainDetail, NodeId(1), noop()).unwrap();
	surface.clone().attach(NodeId(50));

	let report = overlays.integrity_check().unwrap();
	assert!(report.faults.contains(&IntegrityFault::CountMismatch {
		registry: 1,
		stack: 1,
		surface_overlays: 2,
	}));
	assert!(report.to_string().contains("stray surface child node#50"));
}

#[test]
fn emergency_reset_recovers_from_corruption() {
	let (mut overlays, surface) = coordinator();
	let closed = Rc::new(Cell::new(0));
	overlays.push("A".into(), OverlayKind::PlainDetail, NodeId(1), counted(&closed)).unwrap();
	overlays.push("B".into(), OverlayKind::PlainDetail, NodeId(2), counted(&closed)).unwrap();
	let mut external = surface.clone();
	external.attach(NodeId(77));
	external.detach(NodeId(1));
	assert!(!overlays.integrity_check().unwrap().is_clean());

	overlays.emergency_reset();

	assert_eq!(overlays.count(), 0);
	assert!(!overlays.has_active());
	assert_eq!(surface.children(), vec![BASE]);
	assert_eq!(closed.get(), 0);
	assert!(overlays.integrity_check().unwrap().is_clean());

	overlays.push("C".into(), OverlayKind::PlainDetail, NodeId(3), noop()).unwrap();
	assert_eq!(surface.children(), vec![BASE, NodeId(3)]);
}

#[test]
fn refresh_hook_panic_is_absorbed() {
	let (mut overlays, surface) = coordinator();
	overlays.push("A".into(), OverlayKind::PlainDetail, NodeId(1), noop()).unwrap();
	overlays
		.set_refresh_hook(&"A".into(), Box::new(refresh_fault))
		.unwrap();
	overlays.push("B".into(), OverlayKind::PlainDetail, NodeId(2), noop()).unwrap();

	overlays.close_top().unwrap();

	assert_eq!(surface.focused(), Some(NodeId(1)));
	assert_eq!(overlays.stack(), &[OverlayId::from("A")]);
}

#[test]
fn snapshot_orders_rows_bottom_first() {
	let (mut overlays, _surface) = coordinator();
	let a = overlays.next_id(OverlayKind::PlainDetail);
	let b = overlays.next_id(OverlayKind::RecommendationDetail);
	assert_eq!(a.as_str(), "detail-1");
	assert_eq!(b.as_str(), "recommendation-2");

	overlays.push(a.clone(), OverlayKind::PlainDetail, NodeId(1), noop()).unwrap();
	overlays.push(b.clone(), OverlayKind::RecommendationDetail, NodeId(2), noop()).unwrap();

	let rows = overlays.snapshot();
	let ids: Vec<_> = rows.iter().map(|row| (row.id.clone(), row.depth)).collect();
	assert_eq!(ids, vec![(a, Some(0)), (b, Some(1))]);
	assert!(rows.iter().all(|row| row.visible));
}

#[test]
fn replacing_push_does_not_refocus_the_overlay_below() {
	let (mut overlays, surface) = coordinator();
	let a_refreshed = Rc::new(Cell::new(0));
	let b_closed = Rc::new(Cell::new(0));

	overlays.push("A".into(), OverlayKind::PlainDetail, NodeId(1), noop()).unwrap();
	let hook_calls = a_refreshed.clone();
	overlays
		.set_refresh_hook(&"A".into(), Box::new(move || hook_calls.set(hook_calls.get() + 1)))
		.unwrap();
	overlays.push("B".into(), OverlayKind::Custom("menu"), NodeId(2), counted(&b_closed)).unwrap();
	overlays.push("C".into(), OverlayKind::Custom("hint"), NodeId(3), noop()).unwrap();

	overlays.push("B".into(), OverlayKind::Custom("menu"), NodeId(4), noop()).unwrap();

	assert_eq!(a_refreshed.get(), 0);
	assert_eq!(b_closed.get(), 1);
	assert_eq!(overlays.stack(), &[OverlayId::from("A"), OverlayId::from("B")]);
	assert_eq!(surface.children(), vec![BASE, NodeId(1), NodeId(4)]);
	assert_eq!(surface.focused(), Some(NodeId(4)));

	overlays.close_top().unwrap();
	assert_eq!(a_refreshed.get(), 1);
}
