use crate::app::{AppState, FRAME_BORDER_CELLS};
use crate::measure::CellFont;
use crate::wrap::LabelLayout;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[cfg(test)]
mod tests;

const FRAME_TITLE: &str = " label ";
const KEY_HELP: &str = "←→ width  ↑↓ rows  c center  n no-break  s strategy  q quit";

/// Text rows of a label on a cell grid: lines are indented by their
/// alignment offset and separated by the blank rows line spacing asks for.
/// A font with a zero-sized cell has no grid and yields no rows.
pub fn label_rows(layout: &LabelLayout, font: &CellFont) -> Vec<String> {
    let mut rows = Vec::new();
    if font.cell_width == 0 || font.cell_height == 0 {
        return rows;
    }
    let offsets = layout.line_offsets();
    let tops = layout.line_tops();

    for ((line, offset), top) in layout.lines().into_iter().zip(offsets).zip(tops) {
        let row = (top / font.cell_height) as usize;
        while rows.len() < row {
            rows.push(String::new());
        }
        let indent = (offset / font.cell_width) as usize;
        rows.push(format!("{}{}", " ".repeat(indent), line));
    }

    rows
}

/// The label as printed to stdout.
pub fn render_plain(layout: &LabelLayout, font: &CellFont) -> String {
    label_rows(layout, font).join("\n")
}

// Main render function
pub fn render(frame: &mut Frame, app: &AppState) {
    let size = frame.area();

    // Create main layout chunks
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(size);

    render_label(frame, app, chunks[0]);
    render_status_line(frame, app, chunks[1]);
}

fn render_label(frame: &mut Frame, app: &AppState, area: Rect) {
    let font = app.config.font();
    let rows = label_rows(app.label.layout(), &font);

    // The frame shows the available width, not just the label's box
    let inner_cells = (app.label.max_width() / font.cell_width) as u16;
    let width = inner_cells.saturating_add(FRAME_BORDER_CELLS).min(area.width);
    let height = (rows.len() as u16).saturating_add(2).min(area.height);
    let frame_area = Rect::new(area.x, area.y, width, height);

    let style = if app.label.is_ellipsized() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(FRAME_TITLE)
        .border_style(Style::default().fg(Color::DarkGray));
    let lines: Vec<Line> = rows.into_iter().map(Line::from).collect();
    let paragraph = Paragraph::new(lines).style(style).block(block);

    frame.render_widget(paragraph, frame_area);
}

fn render_status_line(frame: &mut Frame, app: &AppState, area: Rect) {
    let (content, style) = match &app.message {
        Some(msg) => (
            msg.clone(),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        None => (
            format!("{}  |  {}", status_summary(app), KEY_HELP),
            Style::default().fg(Color::Gray).bg(Color::Black),
        ),
    };

    frame.render_widget(Paragraph::new(content).style(style), area);
}

/// One-line description of the current selection.
pub fn status_summary(app: &AppState) -> String {
    let label = &app.label;
    let outcome = if label.is_ellipsized() {
        "ellipsized".to_string()
    } else {
        match label.layout().selection.line_count() {
            1 => "1 line".to_string(),
            n => format!("{} lines", n),
        }
    };

    format!(
        "width {} · rows {} · {} · {}",
        label.max_width(),
        label.max_rows(),
        outcome,
        label.options().strategy
    )
}
