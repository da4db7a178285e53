use bitflags::bitflags;

bitflags! {
	/// What a handled event or drained message invalidated.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct Dirty: u8 {
		/// Panel content or a view pose changed.
		const REDRAW = 1 << 0;
		/// The overlay stack changed.
		const OVERLAYS = 1 << 1;
		const FULL = Self::REDRAW.bits() | Self::OVERLAYS.bits();
	}
}

impl Dirty {
	pub fn needs_redraw(self) -> bool {
		!self.is_empty()
	}
}
