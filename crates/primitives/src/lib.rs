#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Core types shared across the folio client: node and overlay identifiers,
//! the book entity, and navigation directions.

/// Book entity as delivered by the catalog service.
pub mod book;
/// Directional types for sequential navigation.
pub mod direction;
/// Identifier types for UI nodes, overlays, and entities.
pub mod ids;

pub use book::Book;
pub use direction::NavDirection;
pub use ids::{BookId, NodeId, OverlayId};
