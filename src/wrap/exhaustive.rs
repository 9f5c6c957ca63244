use super::{Candidate, LineCache, Score};
use crate::errors::WrapResult;
use crate::measure::TextMeasurer;

/// How often leaf candidates poll the deadline.
const DEADLINE_POLL_INTERVAL: usize = 256;

/// Reference search: tries every placement of breaks, for one, then two, ...
/// up to `max_rows` lines, and stops at the first line count with a fitting
/// candidate.
///
/// At each gap "no break" is explored before "break", so among candidates
/// with equal scores the one with the longest leading lines wins. A branch is
/// abandoned as soon as the line under construction overflows; since
/// measurements never shrink as a line grows, no fitting candidate is lost.
pub(crate) fn search<M: TextMeasurer>(
    cache: &mut LineCache<'_, '_, M>,
    max_width: u32,
    max_rows: usize,
    line_spacing: u32,
) -> WrapResult<Option<Candidate>> {
    let max_lines = max_rows.min(cache.words().len());

    for lines in 1..=max_lines {
        let mut walk = Walk {
            max_width,
            line_spacing,
            starts: vec![0],
            best: None,
        };
        walk.visit(cache, 0, 0, 0, lines - 1)?;

        if let Some(best) = walk.best {
            return Ok(Some(best));
        }
        tracing::trace!(lines, candidates = cache.candidates, "no fitting candidate");
    }

    Ok(None)
}

struct Walk {
    max_width: u32,
    line_spacing: u32,
    starts: Vec<usize>,
    best: Option<Candidate>,
}

impl Walk {
    /// Decides the break at `gap`, the gap following word `gap`. The line in
    /// progress starts at `self.starts.last()`; `height` and `widest` cover the
    /// lines already closed.
    fn visit<M: TextMeasurer>(
        &mut self,
        cache: &mut LineCache<'_, '_, M>,
        gap: usize,
        height: u32,
        widest: u32,
        breaks_left: usize,
    ) -> WrapResult<()> {
        let words = cache.words().len();
        let line_start = self.starts.last().copied().unwrap_or(0);

        // Words line_start..=gap, the shortest the current line can be
        let current = cache.line(line_start, gap + 1)?;
        if current.width > self.max_width {
            return Ok(());
        }

        if gap + 1 == words {
            if breaks_left == 0 {
                self.offer(
                    cache,
                    height.saturating_add(current.height),
                    widest.max(current.width),
                )?;
            }
            return Ok(());
        }

        // Not enough gaps left to place the remaining breaks
        if breaks_left > words - 1 - gap {
            return Ok(());
        }

        self.visit(cache, gap + 1, height, widest, breaks_left)?;

        if breaks_left > 0 && cache.words().is_breakable(gap) {
            self.starts.push(gap + 1);
            self.visit(
                cache,
                gap + 1,
                height
                    .saturating_add(current.height)
                    .saturating_add(self.line_spacing),
                widest.max(current.width),
                breaks_left - 1,
            )?;
            self.starts.pop();
        }

        Ok(())
    }

    fn offer<M: TextMeasurer>(
        &mut self,
        cache: &mut LineCache<'_, '_, M>,
        height: u32,
        widest: u32,
    ) -> WrapResult<()> {
        cache.candidates += 1;
        if cache.candidates % DEADLINE_POLL_INTERVAL == 0 {
            cache.check_deadline()?;
        }

        let score = Score {
            lines: self.starts.len(),
            height,
            widest,
        };
        let improves = self.best.as_ref().map_or(true, |best| score < best.score);
        if improves {
            self.best = Some(Candidate {
                starts: self.starts.clone(),
                score,
            });
        }
        Ok(())
    }
}
