mod buffer;
mod cell;

pub use buffer::{Buffer, CellArea};
pub use cell::Cell;
