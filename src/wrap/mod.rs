//! Best-wrapping search.
//!
//! Every way of breaking a label into at most `max_rows` lines is a
//! candidate. Candidates with a line wider than `max_width` are discarded, and
//! the survivors are ranked by line count, then total height, then widest
//! line. When nothing fits, the label is truncated and ellipsed instead.

mod dynamic;
mod ellipsis;
mod exhaustive;

use crate::breaks::WordSequence;
use crate::errors::{WrapError, WrapResult};
use crate::measure::{Extent, TextMeasurer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

/// Default truncation marker.
pub const DEFAULT_ELLIPSIS: &str = "…";

/// Above this many breakable gaps `Strategy::Auto` stops enumerating.
pub const EXHAUSTIVE_GAP_LIMIT: usize = 12;

/// How candidate wrappings are searched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Exhaustive for short labels, dynamic programming for long ones.
    #[default]
    Auto,
    /// Enumerate every partition. Exponential in the number of words.
    Exhaustive,
    /// Dynamic programming over break points. Polynomial; reaches the same
    /// score as `Exhaustive` but may choose another wrapping among equals.
    Dynamic,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Auto => "auto",
            Strategy::Exhaustive => "exhaustive",
            Strategy::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapOptions {
    /// Alignment hint handed through to the renderer.
    pub center: bool,
    /// Extra pixels between consecutive lines.
    pub line_spacing: u32,
    pub ellipsis: String,
    /// Apply typographic no-break rules around quotes and high punctuation.
    /// Off by default: every gap may break.
    pub non_breaking_spaces: bool,
    pub strategy: Strategy,
    /// Abort the search with `WrapError::Cancelled` past this budget.
    pub timeout: Option<Duration>,
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self {
            center: false,
            line_spacing: 0,
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
            non_breaking_spaces: false,
            strategy: Strategy::Auto,
            timeout: None,
        }
    }
}

impl WrapOptions {
    pub fn centered(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    pub fn line_spacing(mut self, line_spacing: u32) -> Self {
        self.line_spacing = line_spacing;
        self
    }

    pub fn ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        self.ellipsis = ellipsis.into();
        self
    }

    pub fn non_breaking_spaces(mut self, enabled: bool) -> Self {
        self.non_breaking_spaces = enabled;
        self
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Outcome of a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Lines that each fit the width, at most `max_rows` of them.
    Wrapped(Vec<String>),
    /// A single truncated line ending in the ellipsis marker.
    Ellipsized(String),
}

impl Selection {
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Selection::Wrapped(lines) => lines.iter().map(String::as_str).collect(),
            Selection::Ellipsized(text) => vec![text.as_str()],
        }
    }

    pub fn line_count(&self) -> usize {
        match self {
            Selection::Wrapped(lines) => lines.len(),
            Selection::Ellipsized(_) => 1,
        }
    }

    pub fn is_ellipsized(&self) -> bool {
        matches!(self, Selection::Ellipsized(_))
    }
}

/// A selection together with its bounding box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelLayout {
    pub selection: Selection,
    pub extent: Extent,
    pub line_extents: Vec<Extent>,
    pub line_spacing: u32,
    pub center: bool,
}

impl LabelLayout {
    fn new(selection: Selection, line_extents: Vec<Extent>, options: &WrapOptions) -> Self {
        let extent = stack_extents(&line_extents, options.line_spacing);
        Self {
            selection,
            extent,
            line_extents,
            line_spacing: options.line_spacing,
            center: options.center,
        }
    }

    pub fn lines(&self) -> Vec<&str> {
        self.selection.lines()
    }

    /// Horizontal offset of each line inside the bounding box.
    pub fn line_offsets(&self) -> Vec<u32> {
        self.line_extents
            .iter()
            .map(|line| {
                if self.center {
                    (self.extent.width - line.width) / 2
                } else {
                    0
                }
            })
            .collect()
    }

    /// Vertical offset of each line's top edge inside the bounding box.
    pub fn line_tops(&self) -> Vec<u32> {
        let mut top: u32 = 0;
        self.line_extents
            .iter()
            .map(|line| {
                let this = top;
                top = top
                    .saturating_add(line.height)
                    .saturating_add(self.line_spacing);
                this
            })
            .collect()
    }
}

/// Bounding box of lines stacked vertically.
fn stack_extents(lines: &[Extent], line_spacing: u32) -> Extent {
    let width = lines.iter().map(|e| e.width).max().unwrap_or(0);
    let gaps = u32::try_from(lines.len().saturating_sub(1)).unwrap_or(u32::MAX);
    let height = lines
        .iter()
        .fold(0u32, |total, e| total.saturating_add(e.height))
        .saturating_add(gaps.saturating_mul(line_spacing));
    Extent::new(width, height)
}

/// Ranking key of a candidate; lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Score {
    pub lines: usize,
    pub height: u32,
    pub widest: u32,
}

/// A candidate that fits the width: the word index where each line starts.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub starts: Vec<usize>,
    pub score: Score,
}

/// Per-call measurement state shared by the search strategies: caches line
/// extents by word range and enforces the optional deadline.
pub(crate) struct LineCache<'w, 'm, M: TextMeasurer> {
    words: &'w WordSequence<'w>,
    measurer: &'m M,
    font: &'m M::Font,
    extents: HashMap<(usize, usize), Extent>,
    started: Instant,
    timeout: Option<Duration>,
    pub candidates: usize,
}

impl<'w, 'm, M: TextMeasurer> LineCache<'w, 'm, M> {
    fn new(
        words: &'w WordSequence<'w>,
        measurer: &'m M,
        font: &'m M::Font,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            words,
            measurer,
            font,
            extents: HashMap::new(),
            started: Instant::now(),
            timeout,
            candidates: 0,
        }
    }

    pub fn words(&self) -> &WordSequence<'w> {
        self.words
    }

    /// Extent of the line holding words `start..end`.
    pub fn line(&mut self, start: usize, end: usize) -> WrapResult<Extent> {
        if let Some(extent) = self.extents.get(&(start, end)) {
            return Ok(*extent);
        }

        self.check_deadline()?;
        let text = self.words.line(start, end);
        let extent = self.measurer.measure(&text, self.font)?;
        tracing::trace!(line = %text, width = extent.width, height = extent.height, "measured");
        self.extents.insert((start, end), extent);
        Ok(extent)
    }

    pub fn measure(&self, text: &str) -> WrapResult<Extent> {
        self.check_deadline()?;
        Ok(self.measurer.measure(text, self.font)?)
    }

    pub fn check_deadline(&self) -> WrapResult<()> {
        if let Some(timeout) = self.timeout {
            let elapsed = self.started.elapsed();
            if elapsed > timeout {
                return Err(WrapError::Cancelled {
                    elapsed,
                    candidates: self.candidates,
                });
            }
        }
        Ok(())
    }
}

/// Picks the best wrapping of labels for one measurer and option set.
pub struct WrapSelector<'m, M: TextMeasurer> {
    measurer: &'m M,
    options: WrapOptions,
}

impl<'m, M: TextMeasurer> WrapSelector<'m, M> {
    pub fn new(measurer: &'m M, options: WrapOptions) -> Self {
        Self { measurer, options }
    }

    pub fn select(
        &self,
        text: &str,
        max_width: u32,
        font: &M::Font,
        max_rows: usize,
    ) -> WrapResult<LabelLayout> {
        if max_width == 0 {
            return Err(WrapError::InvalidArgument("max_width must be positive"));
        }
        if max_rows == 0 {
            return Err(WrapError::InvalidArgument("max_rows must be at least 1"));
        }

        let words = WordSequence::parse(text, self.options.non_breaking_spaces);
        if words.is_empty() {
            return Err(WrapError::InvalidArgument("text has no words"));
        }

        let strategy = match self.options.strategy {
            Strategy::Auto if words.breakable_gaps() <= EXHAUSTIVE_GAP_LIMIT => {
                Strategy::Exhaustive
            }
            Strategy::Auto => Strategy::Dynamic,
            other => other,
        };

        tracing::debug!(
            words = words.len(),
            breakable_gaps = words.breakable_gaps(),
            max_width,
            max_rows,
            ?strategy,
            "selecting wrapping"
        );

        let mut cache = LineCache::new(&words, self.measurer, font, self.options.timeout);
        let best = match strategy {
            Strategy::Dynamic => {
                dynamic::search(&mut cache, max_width, max_rows, self.options.line_spacing)?
            }
            _ => exhaustive::search(&mut cache, max_width, max_rows, self.options.line_spacing)?,
        };

        match best {
            Some(candidate) => {
                let mut lines = Vec::with_capacity(candidate.starts.len());
                let mut line_extents = Vec::with_capacity(candidate.starts.len());
                for (i, &start) in candidate.starts.iter().enumerate() {
                    let end = candidate.starts.get(i + 1).copied().unwrap_or(words.len());
                    lines.push(words.line(start, end));
                    line_extents.push(cache.line(start, end)?);
                }

                tracing::debug!(
                    lines = candidate.score.lines,
                    height = candidate.score.height,
                    widest = candidate.score.widest,
                    candidates = cache.candidates,
                    "selected wrapping"
                );
                Ok(LabelLayout::new(
                    Selection::Wrapped(lines),
                    line_extents,
                    &self.options,
                ))
            }
            None => {
                let (text, extent) = ellipsis::truncate(&cache, max_width, &self.options.ellipsis)?;
                tracing::debug!(
                    label = %text,
                    width = extent.width,
                    candidates = cache.candidates,
                    "no wrapping fits, ellipsed"
                );
                Ok(LabelLayout::new(
                    Selection::Ellipsized(text),
                    vec![extent],
                    &self.options,
                ))
            }
        }
    }
}

/// Selects the best wrapping of `text` with default options.
pub fn select<M: TextMeasurer>(
    measurer: &M,
    text: &str,
    max_width: u32,
    font: &M::Font,
    max_rows: usize,
    center: bool,
) -> WrapResult<LabelLayout> {
    WrapSelector::new(measurer, WrapOptions::default().centered(center))
        .select(text, max_width, font, max_rows)
}
