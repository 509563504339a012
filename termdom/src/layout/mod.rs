mod flow;
mod rect;

pub use flow::{layout, LayoutBox, LayoutContext, LayoutResult, NativeScrollbar};
pub use rect::RectF;
