//! The one shared visual surface overlays are layered onto.
//!
//! The host UI runtime owns the actual node tree. Folio only needs ordered
//! child access, attach/detach, truncation and focus requests, which is what
//! [`Surface`] exposes. [`SceneSurface`] is a retained in-memory
//! implementation used by headless hosts and tests.

use std::cell::RefCell;
use std::rc::Rc;

use folio_primitives::NodeId;

/// Child-list and focus primitives of the shared surface.
///
/// Index 0 is the base content; overlays are stacked after it in z-order.
pub trait Surface {
	/// Returns the surface's children in z-order (bottom first).
	fn children(&self) -> Vec<NodeId>;

	/// Returns true if `node` is a direct child of the surface.
	fn contains(&self, node: NodeId) -> bool {
		self.children().contains(&node)
	}

	/// Appends `node` as the topmost child.
	fn attach(&mut self, node: NodeId);

	/// Removes `node` from the children; returns false if it was not attached.
	fn detach(&mut self, node: NodeId) -> bool;

	/// Drops every child at index `len` or above.
	fn truncate_children(&mut self, len: usize);

	/// Routes keyboard input to `node`.
	fn request_focus(&mut self, node: NodeId);
}

/// Last-resort detach through a node's own parent, used when the shared
/// surface cannot be reached.
pub trait NodeParent {
	/// Removes `node` from its parent; returns false if it had none.
	fn remove_from_parent(&mut self, node: NodeId) -> bool;
}

#[derive(Debug, Default)]
struct SceneState {
	children: Vec<NodeId>,
	focused: Option<NodeId>,
	focus_requests: usize,
}

/// Retained in-memory surface.
///
/// Clones are handles onto the same scene, the way a UI runtime's node
/// references are shared between the base view and the overlay coordinator.
#[derive(Debug, Clone, Default)]
pub struct SceneSurface {
	inner: Rc<RefCell<SceneState>>,
}

impl SceneSurface {
	/// Creates a surface whose only child is the base content node.
	pub fn with_base(base: NodeId) -> Self {
		let surface = Self::default();
		surface.inner.borrow_mut().children.push(base);
		surface
	}

	/// Returns the node that last received focus.
	pub fn focused(&self) -> Option<NodeId> {
		self.inner.borrow().focused
	}

	/// Returns how many focus requests the surface has received.
	pub fn focus_requests(&self) -> usize {
		self.inner.borrow().focus_requests
	}

	/// Returns the number of children, base included.
	pub fn len(&self) -> usize {
		self.inner.borrow().children.len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.borrow().children.is_empty()
	}
}

impl Surface for SceneSurface {
	fn children(&self) -> Vec<NodeId> {
		self.inner.borrow().children.clone()
	}

	fn contains(&self, node: NodeId) -> bool {
		self.inner.borrow().children.contains(&node)
	}

	fn attach(&mut self, node: NodeId) {
		let mut state = self.inner.borrow_mut();
		state.children.retain(|child| *child != node);
		state.children.push(node);
	}

	fn detach(&mut self, node: NodeId) -> bool {
		let mut state = self.inner.borrow_mut();
		let before = state.children.len();
		state.children.retain(|child| *child != node);
		if state.focused == Some(node) {
			state.focused = None;
		}
		state.children.len() != before
	}

	fn truncate_children(&mut self, len: usize) {
		let mut state = self.inner.borrow_mut();
		state.children.truncate(len);
		if let Some(focused) = state.focused
			&& !state.children.contains(&focused)
		{
			state.focused = None;
		}
	}

	fn request_focus(&mut self, node: NodeId) {
		let mut state = self.inner.borrow_mut();
		state.focused = Some(node);
		state.focus_requests += 1;
	}
}

impl NodeParent for SceneSurface {
	fn remove_from_parent(&mut self, node: NodeId) -> bool {
		self.detach(node)
	}
}
