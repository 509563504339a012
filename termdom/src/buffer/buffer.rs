use super::Cell;
use crate::types::Rgb;

/// Half-open cell rectangle: columns `x0..x1`, rows `y0..y1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellArea {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
}

impl CellArea {
    pub fn height(&self) -> u16 {
        self.y1.saturating_sub(self.y0)
    }

    fn cells(self) -> impl Iterator<Item = (u16, u16)> {
        (self.y0..self.y1).flat_map(move |y| (self.x0..self.x1).map(move |x| (x, y)))
    }
}

/// Grid of cells the document is painted into, one frame at a time.
///
/// Painting composites: every operation blends over what is already
/// there, so boxes must be painted back to front.
#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    fn cell_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Start a new frame.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Composite a background over `area`.
    pub fn fill(&mut self, area: CellArea, color: Rgb, opacity: f32) {
        for (x, y) in area.cells() {
            if let Some(cell) = self.cell_mut(x, y) {
                cell.tint(color, opacity);
            }
        }
    }

    /// Like [`fill`](Self::fill), but the first and last rows become half
    /// blocks so the shape reads as rounded. Areas shorter than two rows
    /// are filled square.
    pub fn fill_rounded(&mut self, area: CellArea, color: Rgb, opacity: f32) {
        if area.height() < 2 {
            self.fill(area, color, opacity);
            return;
        }
        for (x, y) in area.cells() {
            let Some(cell) = self.cell_mut(x, y) else {
                continue;
            };
            if y == area.y0 {
                cell.draw('▄', color, opacity);
            } else if y + 1 == area.y1 {
                cell.draw('▀', color, opacity);
            } else {
                cell.bg = color.over(cell.bg, opacity);
            }
        }
    }

    /// Draw `ch` at `(x, y)`, marking the columns a wide glyph spills into.
    pub fn put_glyph(&mut self, x: u16, y: u16, ch: char, width: u16, fg: Rgb, opacity: f32) {
        let Some(cell) = self.cell_mut(x, y) else {
            return;
        };
        cell.draw(ch, fg, opacity);
        for offset in 1..width {
            if let Some(cell) = self.cell_mut(x.saturating_add(offset), y) {
                cell.cover();
            }
        }
    }

    /// Cells of `self` that differ from `previous`, in row order.
    /// Buffers of different sizes are compared cell for cell over the
    /// shorter of the two.
    pub fn diff<'a>(&'a self, previous: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        let width = usize::from(self.width.max(1));
        self.cells
            .iter()
            .zip(&previous.cells)
            .enumerate()
            .filter(|(_, (now, before))| now != before)
            .map(move |(i, (cell, _))| ((i % width) as u16, (i / width) as u16, cell))
    }

    /// Characters of row `y` with wide continuations skipped.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|cell| !cell.wide_continuation)
            .map(|cell| cell.char)
            .collect()
    }
}
