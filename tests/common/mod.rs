use wrap_label::breaks::WordSequence;
use wrap_label::{CellFont, CellMeasurer, Extent, TextMeasurer, WrapOptions};

/// Texts used by the property tests, all short enough for brute force.
pub const FIXTURE_TEXTS: &[&str] = &[
    "aa bb cc",
    "The quick brown fox jumps over the lazy dog",
    "a bb ccc dddd eeeee",
    "Lorem ipsum dolor sit amet consectetur",
    "x y z w",
    "supercalifragilisticexpialidocious is a long word",
    "one",
    // Glued gaps once the typographic rules are on
    "Il dit « oui » et non ?",
    "¿ Qué tal ? Bien : 100 %",
];

/// Option sets the property tests run under: rules off and on, with and
/// without line spacing.
pub fn option_variants() -> Vec<WrapOptions> {
    let mut variants = Vec::new();
    for non_breaking_spaces in [false, true] {
        for line_spacing in [0, 3] {
            variants.push(
                WrapOptions::default()
                    .non_breaking_spaces(non_breaking_spaces)
                    .line_spacing(line_spacing),
            );
        }
    }
    variants
}

/// Ranking key as the selector defines it: lines, total height, widest line.
pub type Score = (usize, u32, u32);

/// Every wrapping of `text` with at most `max_rows` lines that fits
/// `max_width`, in the order the labels were historically generated: one bit
/// per gap, first gap most significant, "space" (0) before "newline" (1).
/// Masks breaking a glued gap are skipped.
pub fn fitting_wrappings(
    text: &str,
    max_width: u32,
    max_rows: usize,
    font: &CellFont,
    options: &WrapOptions,
) -> Vec<(Vec<String>, Score)> {
    let sequence = WordSequence::parse(text, options.non_breaking_spaces);
    let words = sequence.words();
    let gaps = words.len() - 1;
    let mut result = Vec::new();

    'masks: for mask in 0u32..(1 << gaps) {
        let mut lines = Vec::new();
        let mut current = vec![words[0]];
        for (gap, word) in words.iter().skip(1).enumerate() {
            let breaks_here = (mask >> (gaps - 1 - gap)) & 1 == 1;
            if breaks_here {
                if !sequence.is_breakable(gap) {
                    continue 'masks;
                }
                lines.push(current.join(" "));
                current = vec![*word];
            } else {
                current.push(*word);
            }
        }
        lines.push(current.join(" "));

        if lines.len() > max_rows {
            continue;
        }

        let extents: Vec<Extent> = lines
            .iter()
            .map(|line| CellMeasurer.measure(line, font).unwrap())
            .collect();
        if extents.iter().any(|e| e.width > max_width) {
            continue;
        }

        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let score = score_of(&refs, font, options.line_spacing);
        result.push((lines, score));
    }

    result
}

/// First wrapping with the lowest score, or `None` when nothing fits.
pub fn brute_force_best(
    text: &str,
    max_width: u32,
    max_rows: usize,
    font: &CellFont,
    options: &WrapOptions,
) -> Option<(Vec<String>, Score)> {
    let mut best: Option<(Vec<String>, Score)> = None;
    for (lines, score) in fitting_wrappings(text, max_width, max_rows, font, options) {
        let improves = best.as_ref().map_or(true, |(_, b)| score < *b);
        if improves {
            best = Some((lines, score));
        }
    }
    best
}

/// Score of wrapped lines as measured by the cell measurer, with
/// `line_spacing` pixels between consecutive lines.
pub fn score_of(lines: &[&str], font: &CellFont, line_spacing: u32) -> Score {
    let extents: Vec<Extent> = lines
        .iter()
        .map(|line| CellMeasurer.measure(line, font).unwrap())
        .collect();
    let spacing = line_spacing * (lines.len() as u32 - 1);
    (
        lines.len(),
        extents.iter().map(|e| e.height).sum::<u32>() + spacing,
        extents.iter().map(|e| e.width).max().unwrap_or(0),
    )
}
