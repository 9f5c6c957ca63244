use crate::config::AppConfig;
use crate::errors::WrapResult;
use crate::label::WrappedLabel;
use crate::measure::CellMeasurer;

/// Horizontal cells taken by the preview frame's borders.
pub const FRAME_BORDER_CELLS: u16 = 2;

pub struct AppState {
    pub running: bool,
    pub label: WrappedLabel<CellMeasurer>,
    pub config: AppConfig,

    // Width asked for by the user; the label gets less when the terminal is
    // narrower.
    pub requested_width: u32,

    // Viewport state
    pub terminal_width: u16,

    // Message for status line
    pub message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig, text: impl Into<String>) -> WrapResult<Self> {
        let label = WrappedLabel::new(
            CellMeasurer,
            config.font(),
            text,
            config.max_width,
            config.max_rows,
            config.wrap_options(),
        )?;

        Ok(Self {
            running: true,
            requested_width: config.max_width,
            label,
            config,
            terminal_width: 80,
            message: None,
        })
    }

    /// Widest label, in pixels, the preview frame can show.
    pub fn available_width(&self) -> u32 {
        let cells = self.terminal_width.saturating_sub(FRAME_BORDER_CELLS).max(1);
        u32::from(cells) * self.config.cell_width
    }

    /// Width the label should be laid out at right now.
    pub fn effective_width(&self) -> u32 {
        self.requested_width.min(self.available_width()).max(1)
    }

    /// Re-selects the label for the current request and terminal size.
    pub fn fit_label(&mut self) -> WrapResult<()> {
        self.label.resize(self.effective_width())
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }
}
