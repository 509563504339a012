use std::fs::File;
use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, KeyCode};
use custom_scrollbar::TAG_NAME;
use simplelog::{Config, LevelFilter, WriteLogger};
use termdom::{Document, DocumentConfig, Element, Position, Rgb, Size, Terminal};

const PANELS: [&str; 2] = ["left", "right"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The terminal belongs to the UI, so log to a file
    let log_file = File::create("custom-scrollbar.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let mut term = Terminal::new()?;
    let (width, height) = term.viewport();
    let mut doc = Document::new(DocumentConfig::new().viewport(width, height));
    custom_scrollbar::register(&mut doc)?;

    doc.append_child(doc.root_id(), ui())?;
    for (panel, lines) in PANELS.iter().zip([40, 3]) {
        for n in 1..=lines {
            add_line(&mut doc, panel, n)?;
        }
    }
    doc.load();

    let mut focused = 0;
    loop {
        term.render(&mut doc)?;

        for event in term.poll(Some(Duration::from_millis(50)))? {
            if term.dispatch(&mut doc, &event) {
                continue;
            }
            let CrosstermEvent::Key(key) = event else {
                continue;
            };
            let panel = PANELS[focused];
            let viewport = doc
                .shadow_element_id(panel, custom_scrollbar::template::VIEWPORT_ID)
                .unwrap_or_default();

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab => focused = (focused + 1) % PANELS.len(),
                KeyCode::Char('+') => {
                    let next = line_count(&doc, panel) + 1;
                    add_line(&mut doc, panel, next)?;
                }
                KeyCode::Char('-') => {
                    if let Some(last) = last_line(&doc, panel) {
                        doc.remove_child(&last)?;
                    }
                }
                KeyCode::Down => {
                    doc.scroll_by(&viewport, 16.0)?;
                }
                KeyCode::Up => {
                    doc.scroll_by(&viewport, -16.0)?;
                }
                _ => {}
            }
        }
    }
}

fn ui() -> Element {
    let panel = |id: &str, left: f32| {
        Element::new(TAG_NAME)
            .id(id)
            .position(Position::Absolute)
            .left(termdom::Length::Percent(left))
            .top(termdom::Length::Px(32.0))
            .width(Size::percent(45.0))
            .height(Size::px(256.0))
            .background(Rgb::new(210, 210, 200))
            .foreground(Rgb::new(20, 20, 20))
    };

    Element::div()
        .id("app")
        .width(Size::Fill)
        .height(Size::Fill)
        .background(Rgb::new(30, 30, 40))
        .child(
            Element::text("+/- add or remove lines, arrows or wheel scroll, tab switches, q quits")
                .foreground(Rgb::new(200, 200, 120)),
        )
        .child(panel(PANELS[0], 2.5))
        .child(panel(PANELS[1], 52.5))
}

fn line_count(doc: &Document, panel: &str) -> usize {
    doc.element(panel).map_or(0, |e| e.light_children().len())
}

fn last_line(doc: &Document, panel: &str) -> Option<String> {
    doc.element(panel)?.light_children().last().map(|e| e.id.clone())
}

fn add_line(doc: &mut Document, panel: &str, n: usize) -> Result<(), termdom::DomError> {
    doc.append_child(panel, Element::text(format!("{panel} line {n}")))?;
    Ok(())
}
