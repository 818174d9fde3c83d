//! Text normalization for keyword analysis.
//!
//! Turns free-text listing fields into comparable word sequences: lower-case,
//! digits stripped (sizes and years are not semantic keywords), short tokens
//! and stop words dropped. The stop-word set is language-mixed because the
//! source corpus is — German marketplace listings full of English brand
//! vocabulary.

/// Words carrying no signal in listing titles. Extend freely; callers only
/// see the filtered token stream.
pub const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "neu", "wie", "von", "aus", "größe", "mit",
];

/// Tokenize into lower-cased alphanumeric runs of length >= 2, stop words
/// removed. Digits are kept and two-character terms survive — this is the
/// base tokenizer for the similarity vocabulary, where "xl", "90", or "501"
/// can be meaningful.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= 2 && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// Normalize a possibly-absent text field into keyword tokens.
///
/// Lower-cases, removes all digit characters, splits on word boundaries,
/// then drops tokens of length <= 2 and stop words. Absent input yields an
/// empty sequence. Deterministic: order follows the input text.
pub fn normalize(text: Option<&str>) -> Vec<String> {
    let Some(text) = text else {
        return Vec::new();
    };
    let digitless: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_numeric())
        .collect();
    digitless
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() > 2 && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}
