use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent, MouseEventKind},
    execute, queue,
    style::{Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::buffer::Buffer;
use crate::document::Document;
use crate::render::{CELL_HEIGHT_PX, CELL_WIDTH_PX};
use crate::text::char_width;
use crate::types::Rgb;

/// Distance one wheel notch scrolls, in CSS pixels.
pub const WHEEL_STEP_PX: f32 = 3.0 * CELL_HEIGHT_PX;

pub struct Terminal {
    stdout: io::Stdout,
    current_buffer: Buffer,
    previous_buffer: Buffer,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        let (width, height) = terminal::size()?;

        Ok(Self {
            stdout,
            current_buffer: Buffer::new(width, height),
            previous_buffer: Buffer::new(width, height),
        })
    }

    /// Size in cells.
    pub fn size(&self) -> (u16, u16) {
        (self.current_buffer.width(), self.current_buffer.height())
    }

    /// Size in CSS pixels.
    pub fn viewport(&self) -> (f32, f32) {
        let (width, height) = self.size();
        (
            f32::from(width) * CELL_WIDTH_PX,
            f32::from(height) * CELL_HEIGHT_PX,
        )
    }

    pub fn poll(&self, timeout: Option<Duration>) -> io::Result<Vec<CrosstermEvent>> {
        let mut events = Vec::new();

        let has_event = match timeout {
            Some(dur) => event::poll(dur)?,
            None => {
                // Block until event
                events.push(event::read()?);
                return Ok(events);
            }
        };

        if has_event {
            events.push(event::read()?);
            // Drain any additional pending events
            while event::poll(Duration::ZERO)? {
                events.push(event::read()?);
            }
        }

        Ok(events)
    }

    /// Forward resize and wheel events to the document. Returns `true` when
    /// the event was consumed.
    pub fn dispatch(&self, doc: &mut Document, event: &CrosstermEvent) -> bool {
        match event {
            CrosstermEvent::Resize(width, height) => {
                doc.resize(
                    f32::from(*width) * CELL_WIDTH_PX,
                    f32::from(*height) * CELL_HEIGHT_PX,
                );
                true
            }
            CrosstermEvent::Mouse(mouse) => {
                let delta = match mouse.kind {
                    MouseEventKind::ScrollDown => WHEEL_STEP_PX,
                    MouseEventKind::ScrollUp => -WHEEL_STEP_PX,
                    _ => return false,
                };
                // Aim at the centre of the cell under the pointer.
                let x = (f32::from(mouse.column) + 0.5) * CELL_WIDTH_PX;
                let y = (f32::from(mouse.row) + 0.5) * CELL_HEIGHT_PX;
                doc.scroll_at(x, y, delta).is_some()
            }
            _ => false,
        }
    }

    /// Bring the document up to date and draw it.
    pub fn render(&mut self, doc: &mut Document) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        if width != self.current_buffer.width() || height != self.current_buffer.height() {
            self.current_buffer = Buffer::new(width, height);
            self.previous_buffer = Buffer::new(width, height);
            execute!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
        }
        let (px_width, px_height) = self.viewport();
        doc.resize(px_width, px_height);
        doc.flush();

        self.current_buffer.reset();
        doc.render(&mut self.current_buffer, Instant::now());

        self.flush_diff()?;
        std::mem::swap(&mut self.current_buffer, &mut self.previous_buffer);
        Ok(())
    }

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_x = u16::MAX;
        let mut last_y = u16::MAX;
        let mut last_char_width: u16 = 1;
        let mut last_fg = Rgb::WHITE;
        let mut last_bg = Rgb::BLACK;

        queue!(
            self.stdout,
            SetAttribute(Attribute::Reset),
            SetForegroundColor(to_crossterm(last_fg)),
            SetBackgroundColor(to_crossterm(last_bg))
        )?;

        for (x, y, cell) in self.current_buffer.diff(&self.previous_buffer) {
            if cell.wide_continuation {
                continue;
            }

            if y != last_y || x != last_x.wrapping_add(last_char_width) {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }

            if cell.fg != last_fg {
                queue!(self.stdout, SetForegroundColor(to_crossterm(cell.fg)))?;
                last_fg = cell.fg;
            }
            if cell.bg != last_bg {
                queue!(self.stdout, SetBackgroundColor(to_crossterm(cell.bg)))?;
                last_bg = cell.bg;
            }

            queue!(self.stdout, Print(cell.char))?;

            last_x = x;
            last_y = y;
            last_char_width = char_width(cell.char).max(1) as u16;
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;
        Ok(())
    }
}

fn to_crossterm(color: Rgb) -> CtColor {
    CtColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
