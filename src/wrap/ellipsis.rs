use super::LineCache;
use crate::errors::WrapResult;
use crate::measure::{Extent, TextMeasurer};

/// Longest prefix of the text that fits `max_width` once the ellipsis is
/// appended. Prefixes shrink one character at a time and lose trailing
/// whitespace before the marker. When not even the bare marker fits it is
/// returned anyway, as the narrowest possible label.
pub(crate) fn truncate<M: TextMeasurer>(
    cache: &LineCache<'_, '_, M>,
    max_width: u32,
    ellipsis: &str,
) -> WrapResult<(String, Extent)> {
    let text = cache.words().canonical();

    // Byte offsets of every proper prefix, longest first
    let cuts = text.char_indices().map(|(i, _)| i).rev();

    let mut last_tried: Option<&str> = None;
    for cut in cuts {
        let prefix = text[..cut].trim_end();
        if last_tried == Some(prefix) {
            continue;
        }
        last_tried = Some(prefix);

        let candidate = format!("{prefix}{ellipsis}");
        let extent = cache.measure(&candidate)?;
        if extent.width <= max_width {
            return Ok((candidate, extent));
        }
    }

    let extent = cache.measure(ellipsis)?;
    tracing::warn!(
        ellipsis,
        width = extent.width,
        max_width,
        "ellipsis alone does not fit"
    );
    Ok((ellipsis.to_string(), extent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breaks::WordSequence;
    use crate::measure::{CellFont, CellMeasurer};

    fn run(text: &str, max_width: u32, ellipsis: &str) -> String {
        let words = WordSequence::parse(text, true);
        let font = CellFont::default();
        let cache = LineCache::new(&words, &CellMeasurer, &font, None);
        truncate(&cache, max_width, ellipsis).unwrap().0
    }

    #[test]
    fn test_truncates_to_width() {
        assert_eq!(run("supercalifragilisticexpialidocious", 10, "…"), "supercali…");
        assert_eq!(run("supercalifragilisticexpialidocious", 10, "..."), "superca...");
    }

    #[test]
    fn test_trailing_space_is_trimmed() {
        // "abc d" would need 5 cells plus the marker; "abc" is the fit
        assert_eq!(run("abc defgh", 5, "…"), "abc…");
    }

    #[test]
    fn test_only_marker_fits() {
        assert_eq!(run("abcdef", 1, "…"), "…");
    }

    #[test]
    fn test_marker_too_wide() {
        assert_eq!(run("abcdef", 2, "[more]"), "[more]");
    }
}
