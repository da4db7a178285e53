#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Overlay coordination and detail navigation for the folio desktop client.
//!
//! This crate owns the stateful core of the client UI: the LIFO stack of
//! modal overlays layered above one shared surface, and the navigable detail
//! panel that pages through a collection of books with animated transitions.
//! View construction and the network clients are supplied by the host
//! through the [`Surface`], [`DetailViews`] and [`BookService`] traits.
//!
//! # Architecture
//!
//! ```text
//! UI event ──► Client::handle_event ──► OverlayCoordinator / TransitionEngine
//!                                           │
//!                                           ▼
//!                                   Surface mutation ──► FocusRelay
//!                                           │
//!                                           ▼
//!            fetch task ──► ClientMsg ──► Client::drain_messages ──► DetailPanel (epoch check)
//! ```
//!
//! Everything except fetch tasks runs on the UI mutation context. The
//! coordinator and client are `!Send`; background completions
//! reach them only through the message channel.

/// Time-based easing, tweening and keyframe sampling.
pub mod animation;
/// Facade tying the overlay stack, detail panels and fetch hydration together.
pub mod client;
/// Runtime configuration loaded from TOML.
pub mod config;
/// Detail panels: navigation host, per-item hydration and display state.
pub mod detail;
/// Input events routed to the top overlay.
pub mod input;
/// Message bus carrying background completions onto the UI context.
pub mod msg;
/// Navigation context and the preview/transition state machine.
pub mod nav;
/// Overlay registry, stack, coordinator and focus relay.
pub mod overlay;
/// The shared surface capability consumed from the UI runtime.
pub mod surface;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::Client;
pub use config::{ClientConfig, ConfigError, MotionConfig};
pub use detail::{BookService, DetailPanel, DetailViews, FetchError, LoadState, RatingStats, Section};
pub use input::{NavKey, UiEvent};
pub use msg::{ClientMsg, Dirty, MsgReceiver, MsgSender};
pub use nav::{NavEvent, NavPhase, NavigationContext, TransitionEngine, ViewDeck};
pub use overlay::{IntegrityFault, IntegrityReport, OverlayCoordinator, OverlayError, OverlayKind};
pub use surface::{NodeParent, SceneSurface, Surface};
