use std::time::{Duration, Instant};

use folio_primitives::{Book, NavDirection, NodeId};
use proptest::prelude::*;

use super::{EdgeArming, NavigationContext, TransitionEngine, TriggerRejection};
use crate::config::MotionConfig;
use crate::test_support::{RecordingViews, shelf};

#[derive(Debug, Clone)]
enum Input {
	Trigger(NavDirection),
	HoverEnter(NavDirection),
	HoverExit(NavDirection),
	Advance(u64),
}

fn direction() -> impl Strategy<Value = NavDirection> {
	prop_oneof![Just(NavDirection::Prev), Just(NavDirection::Next)]
}

fn input() -> impl Strategy<Value = Input> {
	prop_oneof![
		3 => direction().prop_map(Input::Trigger),
		1 => direction().prop_map(Input::HoverEnter),
		1 => direction().prop_map(Input::HoverExit),
		3 => (0u64..400).prop_map(Input::Advance),
	]
}

fn mount(len: u64, start: usize, views: &mut RecordingViews) -> TransitionEngine<Book> {
	let ctx = NavigationContext::new(shelf(len), start).unwrap();
	TransitionEngine::mount(ctx, NodeId(1), views, MotionConfig::default())
}

fn arming_is_in_bounds(arming: EdgeArming, index: usize, len: usize) -> bool {
	(!arming.prev || index > 0) && (!arming.next || index + 1 < len)
}

/// Must drop any transition trigger that arrives while a transition is in
/// flight, leaving the index and in-flight flag untouched.
///
/// - Enforced in: `TransitionEngine::trigger`
/// - Failure symptom: Rapid arrow presses skip items or leave two views
///   animating on top of each other.
#[cfg_attr(test, test)]
pub(crate) fn test_single_inflight_transition() {
	proptest!(|(extra in proptest::collection::vec(direction(), 1..6), gaps in proptest::collection::vec(0u64..319, 6))| {
		let mut views = RecordingViews::default();
		let mut engine = mount(5, 2, &mut views);
		let t0 = Instant::now();
		engine.trigger(NavDirection::Next, t0, &mut views).unwrap();

		let mut now = t0;
		for (direction, gap) in extra.into_iter().zip(gaps) {
			now = (now + Duration::from_millis(gap)).min(t0 + Duration::from_millis(319));
			prop_assert_eq!(engine.trigger(direction, now, &mut views), Err(TriggerRejection::Transitioning));
			prop_assert_eq!(engine.current_index(), 2);
			prop_assert!(engine.is_transitioning());
		}

		engine.tick(t0 + Duration::from_millis(320), &mut views);
		prop_assert_eq!(engine.current_index(), 3);
		prop_assert!(!engine.is_transitioning());
	});
}

/// Must keep the current index inside the collection and never arm an edge
/// whose neighbour does not exist.
///
/// - Enforced in: `NavigationContext::advance`, `EdgeArming::for_context`
/// - Failure symptom: Clicking past the last item shows an empty panel or
///   indexes out of bounds.
#[cfg_attr(test, test)]
pub(crate) fn test_index_bounds() {
	proptest!(|(len in 2u64..7, start in 0usize..7, inputs in proptest::collection::vec(input(), 1..60))| {
		let mut views = RecordingViews::default();
		let mut engine = mount(len, start, &mut views);
		let len = len as usize;
		let mut now = Instant::now();

		for input in inputs {
			match input {
				Input::Trigger(direction) => {
					let _ = engine.trigger(direction, now, &mut views);
				}
				Input::HoverEnter(direction) => {
					engine.hover_enter(direction, now, &mut views);
				}
				Input::HoverExit(direction) => {
					engine.hover_exit(direction, &mut views);
				}
				Input::Advance(ms) => {
					now += Duration::from_millis(ms);
					engine.tick(now, &mut views);
				}
			}

			let index = engine.current_index();
			prop_assert!(index < len);
			let arming = views.last_arming().unwrap_or_default();
			prop_assert!(arming_is_in_bounds(arming, index, len), "{arming:?} armed at {index}/{len}");
			for direction in NavDirection::ALL {
				if engine.preview(direction).is_some() {
					prop_assert!(direction.step(index, len).is_some());
				}
			}
		}
	});
}

/// Must build nothing navigable for a collection of one item.
///
/// - Enforced in: `NavigationContext::new`
/// - Failure symptom: A lone book shows arrows that do nothing, or a
///   preview of itself.
#[cfg_attr(test, test)]
pub(crate) fn test_single_item_builds_no_navigation() {
	assert!(NavigationContext::new(shelf(1), 0).is_none());
}
