//! Screen drawing
//!
//! Rendering is a pure function of the component state and the local input text. It
//! reports where the input and dropdown ended up so mouse events can be mapped back
//! to the component.

use autosuggest_core::{Bounds, GhostText, Point, Region, SearchState};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const MAX_WIDTH: u16 = 48;
const PLACEHOLDER: &str = "Type to search...";

/// Everything a frame is drawn from
pub struct View<'a> {
    pub state: &'a SearchState,
    pub input: &'a str,
}

/// Where the component was drawn in the last frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub input: Rect,
    pub dropdown: Option<Rect>,
    rows: usize,
}

impl ScreenLayout {
    /// The area that counts as "inside" the component
    pub fn region(&self) -> Region {
        Region::new(std::iter::once(self.input).chain(self.dropdown).map(bounds))
    }

    pub fn input_contains(&self, point: Point) -> bool {
        bounds(self.input).contains(point)
    }

    /// Index of the suggestion row under `point`
    pub fn suggestion_at(&self, point: Point) -> Option<usize> {
        let dropdown = self.dropdown?;
        let inner = bounds(Block::bordered().inner(dropdown));
        if !inner.contains(point) {
            return None;
        }
        let index = (point.y - inner.y) as usize;
        (index < self.rows).then_some(index)
    }
}

fn bounds(rect: Rect) -> Bounds {
    Bounds::new(
        i32::from(rect.x),
        i32::from(rect.y),
        u32::from(rect.width),
        u32::from(rect.height),
    )
}

/// Draw one frame
pub fn render(frame: &mut Frame, view: &View) -> ScreenLayout {
    let area = frame.area();
    let area = Rect {
        width: area.width.min(MAX_WIDTH),
        ..area
    };

    let rows = if view.state.dropdown_visible() {
        view.state.suggestions().len()
    } else {
        0
    };
    let dropdown_height = if rows > 0 { rows as u16 + 2 } else { 0 };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(dropdown_height),
        Constraint::Min(0),
    ])
    .split(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Search fruits",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        chunks[0],
    );

    render_input(frame, view, chunks[1]);

    let dropdown = if rows > 0 {
        render_dropdown(frame, view, chunks[2]);
        Some(chunks[2])
    } else {
        None
    };

    render_status(frame, view, chunks[3]);

    ScreenLayout {
        input: chunks[1],
        dropdown,
        rows,
    }
}

fn render_input(frame: &mut Frame, view: &View, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);

    let line = if view.input.is_empty() {
        Line::from(Span::styled(PLACEHOLDER, dim))
    } else {
        let mut spans = vec![Span::raw(view.input)];
        if let Some(ghost) = GhostText::from_suggestions(view.input, view.state.suggestions()) {
            spans.push(Span::styled(ghost.completion, dim));
        }
        Line::from(spans)
    };

    let mut block = Block::bordered().title_top(" Fruit ");
    if view.state.is_loading() {
        block = block.title_top(Line::from(" loading ").right_aligned());
    }

    frame.render_widget(Paragraph::new(line).block(block), area);

    frame.set_cursor_position((cursor_x(area, view.input), area.y + 1));
}

/// Column right after the typed text, kept inside the input border
fn cursor_x(area: Rect, input: &str) -> u16 {
    let typed = u16::try_from(input.width()).unwrap_or(u16::MAX);
    area.x
        .saturating_add(1)
        .saturating_add(typed)
        .min(area.right().saturating_sub(2))
}

fn render_dropdown(frame: &mut Frame, view: &View, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);
    let focused = view.state.focused_index();

    let items: Vec<ListItem> = view
        .state
        .suggestions()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let highlight = item.highlight(view.input);
            let mut spans = vec![
                Span::styled(highlight.matched, bold),
                Span::raw(highlight.rest),
            ];
            if let Some(family) = item.attribute("family").and_then(|v| v.as_str()) {
                spans.push(Span::styled(format!("  {}", family), dim));
            }

            let row = ListItem::new(Line::from(spans));
            if focused == Some(i) {
                row.style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                row
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(Block::bordered()), area);
}

fn render_status(frame: &mut Frame, view: &View, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::from(vec![
            Span::styled("Value: ", dim),
            Span::raw(format!("{:?}", view.input)),
        ]),
        Line::from(Span::styled(
            "↑/↓ move  Enter select  click outside to close  Esc quit",
            dim,
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}
