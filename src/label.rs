use crate::errors::WrapResult;
use crate::measure::{Extent, TextMeasurer};
use crate::wrap::{LabelLayout, WrapOptions, WrapSelector};

/// A label that keeps the best wrapping of its text for its current width.
///
/// Every change of text, font, width or row budget selects again from
/// scratch. A change that fails leaves the label as it was.
pub struct WrappedLabel<M: TextMeasurer> {
    measurer: M,
    font: M::Font,
    text: String,
    max_width: u32,
    max_rows: usize,
    options: WrapOptions,
    layout: LabelLayout,
}

impl<M: TextMeasurer> WrappedLabel<M> {
    pub fn new(
        measurer: M,
        font: M::Font,
        text: impl Into<String>,
        max_width: u32,
        max_rows: usize,
        options: WrapOptions,
    ) -> WrapResult<Self> {
        let text = text.into();
        let layout = WrapSelector::new(&measurer, options.clone())
            .select(&text, max_width, &font, max_rows)?;

        Ok(Self {
            measurer,
            font,
            text,
            max_width,
            max_rows,
            options,
            layout,
        })
    }

    fn relayout(
        &self,
        text: &str,
        font: &M::Font,
        max_width: u32,
        max_rows: usize,
    ) -> WrapResult<LabelLayout> {
        WrapSelector::new(&self.measurer, self.options.clone())
            .select(text, max_width, font, max_rows)
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> WrapResult<()> {
        let text = text.into();
        self.layout = self.relayout(&text, &self.font, self.max_width, self.max_rows)?;
        self.text = text;
        Ok(())
    }

    pub fn set_font(&mut self, font: M::Font) -> WrapResult<()> {
        self.layout = self.relayout(&self.text, &font, self.max_width, self.max_rows)?;
        self.font = font;
        Ok(())
    }

    /// Re-selects for a new available width, as on a window resize.
    pub fn resize(&mut self, max_width: u32) -> WrapResult<()> {
        if max_width == self.max_width {
            return Ok(());
        }
        self.layout = self.relayout(&self.text, &self.font, max_width, self.max_rows)?;
        self.max_width = max_width;
        Ok(())
    }

    pub fn set_max_rows(&mut self, max_rows: usize) -> WrapResult<()> {
        self.layout = self.relayout(&self.text, &self.font, self.max_width, max_rows)?;
        self.max_rows = max_rows;
        Ok(())
    }

    pub fn set_options(&mut self, options: WrapOptions) -> WrapResult<()> {
        let layout = WrapSelector::new(&self.measurer, options.clone()).select(
            &self.text,
            self.max_width,
            &self.font,
            self.max_rows,
        )?;
        self.layout = layout;
        self.options = options;
        Ok(())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font(&self) -> &M::Font {
        &self.font
    }

    pub fn max_width(&self) -> u32 {
        self.max_width
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    pub fn options(&self) -> &WrapOptions {
        &self.options
    }

    pub fn layout(&self) -> &LabelLayout {
        &self.layout
    }

    pub fn lines(&self) -> Vec<&str> {
        self.layout.lines()
    }

    pub fn extent(&self) -> Extent {
        self.layout.extent
    }

    pub fn is_ellipsized(&self) -> bool {
        self.layout.selection.is_ellipsized()
    }

    pub fn line_offsets(&self) -> Vec<u32> {
        self.layout.line_offsets()
    }
}
