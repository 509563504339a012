use std::fs::File;
use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, KeyCode};
use simplelog::{Config, LevelFilter, WriteLogger};
use termdom::{Document, DocumentConfig, Element, Overflow, Rgb, Size, Terminal};

fn main() -> std::io::Result<()> {
    // Set up file logging
    let log_file = File::create("scroll.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut term = Terminal::new()?;
    let (width, height) = term.viewport();
    let mut doc = Document::new(DocumentConfig::new().viewport(width, height));

    doc.append_child(doc.root_id(), ui())
        .expect("fresh document accepts the scroll demo");
    doc.load();

    loop {
        term.render(&mut doc)?;

        for event in term.poll(Some(Duration::from_millis(50)))? {
            if term.dispatch(&mut doc, &event) {
                continue;
            }
            if let CrosstermEvent::Key(key) = event {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Down => {
                        let _ = doc.scroll_by("list", 16.0);
                    }
                    KeyCode::Up => {
                        let _ = doc.scroll_by("list", -16.0);
                    }
                    _ => {}
                }
            }
        }
    }
}

fn ui() -> Element {
    let lines: Vec<String> = (1..=60).map(|i| format!("Line {i}")).collect();

    Element::div()
        .id("frame")
        .width(Size::Fill)
        .height(Size::Fill)
        .background(Rgb::new(24, 24, 32))
        .child(
            Element::text("Native scroll container (wheel or arrows, q to quit)")
                .foreground(Rgb::new(200, 200, 120)),
        )
        .child(
            Element::div()
                .id("list")
                .width(Size::percent(50.0))
                .height(Size::px(320.0))
                .overflow(Overflow::Auto)
                .background(Rgb::new(40, 40, 56))
                .child(Element::text(lines.join("\n"))),
        )
}
