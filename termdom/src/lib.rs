//! A retained document model for the terminal.
//!
//! Elements form a tree with shadow roots and slots, styled by stylesheets
//! and inline declarations, laid out in CSS pixels and rasterised into
//! terminal cells. Custom elements hook into insertion and removal, and
//! mutation observers, window listeners and scroll handlers let them react
//! to changes.

pub mod animation;
pub mod buffer;
pub mod document;
pub mod element;
pub mod error;
pub mod layout;
pub mod observer;
pub mod registry;
pub mod render;
pub mod terminal;
pub mod text;
pub mod transitions;
pub mod types;
pub mod window;

pub use animation::AnimationState;
pub use buffer::{Buffer, Cell, CellArea};
pub use document::{Document, DocumentConfig, ROOT_ID};
pub use element::{Content, Element, ShadowRoot};
pub use error::DomError;
pub use layout::{LayoutBox, LayoutResult, RectF};
pub use observer::{MutationCallback, MutationObserverInit, MutationRecord, ObserverId};
pub use registry::{CustomElement, ElementDefinition, ShadowTemplate};
pub use terminal::Terminal;
pub use transitions::{Easing, TransitionConfig};
pub use types::*;
pub use window::{Listener, ListenerId, WindowEvent};
