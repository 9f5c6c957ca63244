// Word segmentation and break opportunities

/// Characters after which a line must not break (opening marks).
const NO_BREAK_AFTER: &[char] = &['«', '‹', '“', '¿', '¡'];

/// Characters before which a line must not break (closing marks and high
/// punctuation, which French typography sets after a non-breaking space).
const NO_BREAK_BEFORE: &[char] = &['»', '›', '”', ':', ';', '!', '?', '%'];

/// A text split into words, with the gaps between them marked breakable or
/// glued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSequence<'a> {
    words: Vec<&'a str>,
    // breakable[g] is the gap between words[g] and words[g + 1]
    breakable: Vec<bool>,
}

impl<'a> WordSequence<'a> {
    pub fn parse(text: &'a str, non_breaking_spaces: bool) -> Self {
        let words: Vec<&str> = text.split_whitespace().collect();

        let breakable = words
            .windows(2)
            .map(|pair| !non_breaking_spaces || !is_glued(pair[0], pair[1]))
            .collect();

        Self { words, breakable }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[&'a str] {
        &self.words
    }

    /// Whether a line may break between `words[gap]` and `words[gap + 1]`.
    pub fn is_breakable(&self, gap: usize) -> bool {
        self.breakable.get(gap).copied().unwrap_or(false)
    }

    pub fn breakable_gaps(&self) -> usize {
        self.breakable.iter().filter(|&&b| b).count()
    }

    /// Words `start..end` joined with single spaces.
    pub fn line(&self, start: usize, end: usize) -> String {
        self.words[start..end].join(" ")
    }

    /// The whole text with runs of whitespace collapsed to single spaces.
    pub fn canonical(&self) -> String {
        self.line(0, self.words.len())
    }
}

fn is_glued(before: &str, after: &str) -> bool {
    let opens = before
        .chars()
        .next_back()
        .is_some_and(|c| NO_BREAK_AFTER.contains(&c));
    let closes = after
        .chars()
        .next()
        .is_some_and(|c| NO_BREAK_BEFORE.contains(&c));

    opens || closes
}
