// src/chunker.rs

use serde::{Deserialize, Serialize};

/// One section of extracted text returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Section {
    pub content: String,
}

/// Wire shape of a parsed document: `{"sections": [{"content": "..."}, ...]}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParsedDocument {
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone)]
pub struct ChunkerConfig {
    /// Maximum section length in characters.
    pub chunk_size: usize,
    /// Characters repeated from the end of one section at the start of the next.
    pub overlap: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_size: 400,
            overlap: 100,
        }
    }
}

/// Candidate break points, tried in order until one yields a usable cut.
#[derive(Debug, Clone, Copy)]
enum BreakRule {
    Paragraph,
    Sentence,
    HardCut,
}

const BREAK_RULES: [BreakRule; 3] = [BreakRule::Paragraph, BreakRule::Sentence, BreakRule::HardCut];

impl BreakRule {
    /// Byte offset (exclusive) of the cut inside `window`, if this rule applies.
    fn locate(&self, window: &str) -> Option<usize> {
        match self {
            // Cut right at the separator; it travels with the following span.
            BreakRule::Paragraph => window.rfind("\n\n"),
            // Cut after the punctuation so the sentence stays whole.
            BreakRule::Sentence => window
                .rfind(|c: char| matches!(c, '.' | '?' | '!'))
                .map(|pos| pos + 1),
            BreakRule::HardCut => Some(window.len()),
        }
    }
}

/// Rebuilds paragraphs from raw extracted text.
///
/// Lines are trimmed; consecutive non-blank lines merge into one paragraph
/// joined by single spaces; a blank line ends the current paragraph.
/// Paragraphs come back joined with `"\n\n"` so the chunker can still see
/// their boundaries.
pub fn reconstruct_paragraphs(raw: &str) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }

    paragraphs.join("\n\n")
}

/// Splits formatted text into sections of at most `chunk_size` characters,
/// preferring paragraph boundaries, then sentence ends, then a hard cut.
/// Each section after the first repeats the trailing `overlap` characters of
/// the previous section's span. Empty input yields no sections.
pub fn chunk_text(text: &str, config: &ChunkerConfig) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() || config.chunk_size == 0 {
        return Vec::new();
    }

    // Byte offset of every char boundary; windows are counted in chars so a
    // cut can never land inside a UTF-8 sequence.
    let mut starts: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    starts.push(text.len());
    let total = starts.len() - 1;

    let mut chunks = Vec::new();
    let mut start = 0usize;
    while start < total {
        if total - start <= config.chunk_size {
            let tail = &text[starts[start]..];
            if !tail.trim().is_empty() {
                chunks.push(tail.to_string());
            }
            break;
        }

        let window = &text[starts[start]..starts[start + config.chunk_size]];

        // A cut is usable only if it moves the frontier past the overlap
        // region; otherwise the next window would never advance.
        let mut cut_bytes = None;
        for rule in BREAK_RULES {
            if let Some(pos) = rule.locate(window) {
                if window[..pos].chars().count() > config.overlap {
                    cut_bytes = Some(pos);
                    break;
                }
            }
        }
        let cut_bytes = cut_bytes.unwrap_or(window.len());

        let chunk = &window[..cut_bytes];
        if !chunk.trim().is_empty() {
            chunks.push(chunk.to_string());
        }

        let cut = start + chunk.chars().count();
        start = cut.saturating_sub(config.overlap).max(start + 1);
    }

    chunks
}

/// Full segmentation pipeline: raw extracted text in, ordered sections out.
pub fn process_text(raw: &str, config: &ChunkerConfig) -> ParsedDocument {
    let formatted = reconstruct_paragraphs(raw);
    let sections = chunk_text(&formatted, config)
        .into_iter()
        .map(|content| Section { content })
        .collect();
    ParsedDocument { sections }
}
