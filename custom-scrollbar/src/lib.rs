//! A floating scrollbar overlay for termdom documents.
//!
//! `<custom-scrollbar>` projects its children into a scrollable viewport,
//! hides the native scrollbar behind a mask and draws a thin thumb that
//! follows the viewport's scroll position. It registers itself with
//! inventory, so any [`termdom::Document`] created after this crate is
//! linked knows the tag; [`register`] defines it explicitly.

pub mod component;
pub mod error;
pub mod geometry;
pub mod template;

pub use component::{register, update_scrollbar, ElementRefs, ScrollbarOverlay, ThumbState, TAG_NAME};
pub use error::ScrollbarError;
pub use geometry::{ThumbGeometry, ViewportMetrics, Visibility};
