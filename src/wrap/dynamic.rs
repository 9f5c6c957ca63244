use super::{Candidate, LineCache, Score};
use crate::errors::WrapResult;
use crate::measure::TextMeasurer;

/// Best layout of the words from some index to the end, in a fixed number of
/// lines.
#[derive(Debug, Clone, Copy)]
struct Entry {
    height: u32,
    widest: u32,
    // Start of the following line, or the word count for the last line
    next: usize,
}

/// Shortest-path search over break points.
///
/// `layers[r - 1][i]` holds the best way to set words `i..` in exactly `r`
/// lines. Layers are built one line count at a time and the search stops at
/// the first count that can set the whole text, so the line count is minimal
/// and the (height, widest line) pair equals the exhaustive optimum.
pub(crate) fn search<M: TextMeasurer>(
    cache: &mut LineCache<'_, '_, M>,
    max_width: u32,
    max_rows: usize,
    line_spacing: u32,
) -> WrapResult<Option<Candidate>> {
    let words = cache.words().len();
    let reach = line_reach(cache, max_width)?;

    let mut layers: Vec<Vec<Option<Entry>>> = Vec::new();

    // One line: everything from i to the end
    let mut single = vec![None; words];
    for (i, slot) in single.iter_mut().enumerate() {
        if reach[i] == words {
            let line = cache.line(i, words)?;
            *slot = Some(Entry {
                height: line.height,
                widest: line.width,
                next: words,
            });
        }
    }
    layers.push(single);

    for lines in 2..=max_rows.min(words) {
        if layers[lines - 2][0].is_some() {
            break;
        }
        cache.check_deadline()?;

        let previous = &layers[lines - 2];
        let mut layer = vec![None; words];

        for (i, slot) in layer.iter_mut().enumerate() {
            // Leave at least one word for each following line
            let last_end = reach[i].min(words + 1 - lines);
            let mut best: Option<Entry> = None;

            // Later breaks first, so ties keep the longer leading line
            for end in (i + 1..=last_end).rev() {
                if !cache.words().is_breakable(end - 1) {
                    continue;
                }
                let Some(rest) = previous[end] else {
                    continue;
                };

                cache.candidates += 1;
                let line = cache.line(i, end)?;
                let entry = Entry {
                    height: line
                        .height
                        .saturating_add(line_spacing)
                        .saturating_add(rest.height),
                    widest: line.width.max(rest.widest),
                    next: end,
                };
                let improves = best.map_or(true, |b| {
                    (entry.height, entry.widest) < (b.height, b.widest)
                });
                if improves {
                    best = Some(entry);
                }
            }

            *slot = best;
        }

        layers.push(layer);
    }

    let Some(lines) = layers.iter().position(|layer| layer[0].is_some()) else {
        return Ok(None);
    };
    let lines = lines + 1;

    let mut starts = Vec::with_capacity(lines);
    let mut start = 0;
    let mut score = None;
    for layer in layers[..lines].iter().rev() {
        let Some(entry) = layer[start] else {
            break;
        };
        if score.is_none() {
            score = Some(Score {
                lines,
                height: entry.height,
                widest: entry.widest,
            });
        }
        starts.push(start);
        start = entry.next;
    }

    Ok(score.map(|score| Candidate { starts, score }))
}

/// For each word index, one past the last word a line starting there can
/// hold without overflowing. A line that cannot even hold its first word
/// reaches itself.
fn line_reach<M: TextMeasurer>(
    cache: &mut LineCache<'_, '_, M>,
    max_width: u32,
) -> WrapResult<Vec<usize>> {
    let words = cache.words().len();
    let mut reach = Vec::with_capacity(words);

    for start in 0..words {
        let mut end = start;
        while end < words && cache.line(start, end + 1)?.width <= max_width {
            end += 1;
        }
        reach.push(end);
    }

    Ok(reach)
}
