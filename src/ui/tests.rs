use crate::app::AppState;
use crate::config::AppConfig;
use crate::measure::{CellFont, CellMeasurer};
use crate::ui::{label_rows, render, render_plain, status_summary};
use crate::wrap::{WrapOptions, WrapSelector};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol())
        .collect()
}

fn create_test_app() -> AppState {
    let config = AppConfig {
        max_width: 10,
        max_rows: 2,
        ..AppConfig::default()
    };
    AppState::new(config, "The quick brown fox").unwrap()
}

#[test]
fn test_label_rows_with_line_spacing() {
    let font = CellFont::default();
    let selector = WrapSelector::new(&CellMeasurer, WrapOptions::default().line_spacing(2));
    let layout = selector.select("aa bb cc", 5, &font, 2).unwrap();

    assert_eq!(label_rows(&layout, &font), vec!["aa bb", "", "", "cc"]);
}

#[test]
fn test_label_rows_centered_in_pixels() {
    let font = CellFont::new(10, 20);
    let selector = WrapSelector::new(&CellMeasurer, WrapOptions::default().centered(true));
    let layout = selector.select("aa bb cc", 50, &font, 2).unwrap();

    // (50 - 20) / 2 = 15px, one full cell of indent
    assert_eq!(label_rows(&layout, &font), vec!["aa bb", " cc"]);
}

#[test]
fn test_label_rows_zero_cell_font() {
    let layout = WrapSelector::new(&CellMeasurer, WrapOptions::default())
        .select("aa bb cc", 5, &CellFont::default(), 2)
        .unwrap();

    assert!(label_rows(&layout, &CellFont::new(0, 1)).is_empty());
    assert!(label_rows(&layout, &CellFont::new(1, 0)).is_empty());
}

#[test]
fn test_render_plain_ellipsized() {
    let font = CellFont::default();
    let selector = WrapSelector::new(&CellMeasurer, WrapOptions::default());
    let layout = selector
        .select("supercalifragilisticexpialidocious", 10, &font, 1)
        .unwrap();

    assert_eq!(render_plain(&layout, &font), "supercali…");
}

#[test]
fn test_status_summary() {
    let app = create_test_app();
    assert_eq!(status_summary(&app), "width 10 · rows 2 · 2 lines · auto");
}

#[test]
fn test_render_label_frame() {
    let app = create_test_app();

    let backend = TestBackend::new(40, 6);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| render(frame, &app)).unwrap();

    let buffer = terminal.backend().buffer();
    assert!(row_text(buffer, 1).starts_with("│The quick │"));
    assert!(row_text(buffer, 2).starts_with("│brown fox │"));
    assert!(row_text(buffer, 3).starts_with("└──────────┘"));
    assert!(row_text(buffer, 5).starts_with("width 10 · rows 2 · 2 lines"));
}

#[test]
fn test_render_message_replaces_summary() {
    let mut app = create_test_app();
    app.set_message("A label needs at least one row");

    let backend = TestBackend::new(40, 6);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| render(frame, &app)).unwrap();

    let buffer = terminal.backend().buffer();
    assert!(row_text(buffer, 5).starts_with("A label needs at least one row"));
}
