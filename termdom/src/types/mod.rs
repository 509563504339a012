mod color;
mod enums;
mod sheet;
mod style;

pub use color::Rgb;
pub use enums::{Length, Overflow, Position, Size};
pub use sheet::{Rule, Selector, Stylesheet};
pub use style::{parse_length, parse_size, ComputedStyle, StyleProps};
