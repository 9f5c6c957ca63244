use std::marker::PhantomData;
use thiserror::Error;
use unicode_width::UnicodeWidthStr;

/// Rendered size of a string, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// The collaborator could not measure a string with the given font.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot measure {line:?}: {reason}")]
pub struct MeasureError {
    pub line: String,
    pub reason: String,
}

impl MeasureError {
    pub fn new(line: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            reason: reason.into(),
        }
    }
}

/// Text measurement capability supplied by the hosting toolkit.
///
/// Implementations must be deterministic, and a string must never measure
/// narrower than any of its prefixes on the same font.
pub trait TextMeasurer {
    /// Opaque font handle, passed through untouched.
    type Font;

    fn measure(&self, line: &str, font: &Self::Font) -> Result<Extent, MeasureError>;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &M {
    type Font = M::Font;

    fn measure(&self, line: &str, font: &Self::Font) -> Result<Extent, MeasureError> {
        (**self).measure(line, font)
    }
}

/// Monospace cell metrics, as found on a terminal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellFont {
    pub cell_width: u32,
    pub cell_height: u32,
}

impl CellFont {
    pub const fn new(cell_width: u32, cell_height: u32) -> Self {
        Self {
            cell_width,
            cell_height,
        }
    }
}

impl Default for CellFont {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Measures strings as a row of monospace cells, using the Unicode display
/// width of each character (wide CJK glyphs take two cells).
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMeasurer;

impl TextMeasurer for CellMeasurer {
    type Font = CellFont;

    fn measure(&self, line: &str, font: &CellFont) -> Result<Extent, MeasureError> {
        if font.cell_width == 0 || font.cell_height == 0 {
            return Err(MeasureError::new(line, "font has a zero-sized cell"));
        }

        let cells = u32::try_from(line.width())
            .map_err(|_| MeasureError::new(line, "line is too wide"))?;
        let width = cells
            .checked_mul(font.cell_width)
            .ok_or_else(|| MeasureError::new(line, "line is too wide"))?;

        Ok(Extent::new(width, font.cell_height))
    }
}

/// Adapts a closure into a [`TextMeasurer`], typically one forwarding to a
/// toolkit's text-extent query.
pub struct FnMeasurer<F, Font> {
    measure: F,
    _font: PhantomData<fn(&Font)>,
}

impl<F, Font> FnMeasurer<F, Font>
where
    F: Fn(&str, &Font) -> Result<Extent, MeasureError>,
{
    pub fn new(measure: F) -> Self {
        Self {
            measure,
            _font: PhantomData,
        }
    }
}

impl<F, Font> TextMeasurer for FnMeasurer<F, Font>
where
    F: Fn(&str, &Font) -> Result<Extent, MeasureError>,
{
    type Font = Font;

    fn measure(&self, line: &str, font: &Font) -> Result<Extent, MeasureError> {
        (self.measure)(line, font)
    }
}
