// tests/chunker_properties.rs
//
// Behavioral guarantees of the segmentation pipeline: bounded section
// length, overlap continuity, and lossless reconstruction of the cleaned
// paragraph text.

use pdf_sectioner::chunker::{chunk_text, process_text, reconstruct_paragraphs, ChunkerConfig};

const SAMPLE: &str = "The quick brown fox jumps over the lazy dog. Pack my box \
with five dozen liquor jugs.\n\nSphinx of black quartz, judge my vow. How \
vexingly quick daft zebras jump!\n\nBright vixens jump; dozy fowl quack.";

#[test]
fn every_chunk_stays_under_the_size_limit() {
    let config = ChunkerConfig {
        chunk_size: 40,
        overlap: 8,
    };
    let chunks = chunk_text(SAMPLE, &config);
    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(
            chunk.chars().count() <= config.chunk_size,
            "chunk exceeds limit: {:?}",
            chunk
        );
    }
}

#[test]
fn adjacent_chunks_share_the_configured_overlap() {
    let config = ChunkerConfig {
        chunk_size: 40,
        overlap: 8,
    };
    let chunks = chunk_text(SAMPLE, &config);
    for pair in chunks.windows(2) {
        let prev: Vec<char> = pair[0].chars().collect();
        let tail: String = prev[prev.len() - config.overlap..].iter().collect();
        let head: String = pair[1].chars().take(config.overlap).collect();
        assert_eq!(tail, head);
    }
}

#[test]
fn stripping_the_overlap_rebuilds_the_text() {
    let config = ChunkerConfig {
        chunk_size: 40,
        overlap: 8,
    };
    let chunks = chunk_text(SAMPLE, &config);

    let mut rebuilt: String = chunks[0].clone();
    for chunk in &chunks[1..] {
        rebuilt.extend(chunk.chars().skip(config.overlap));
    }
    assert_eq!(rebuilt, SAMPLE);
}

#[test]
fn reconstruction_then_chunking_is_lossless() {
    let raw = "line one\n line two \nline three\n\n\n  second paragraph  \n";
    let formatted = reconstruct_paragraphs(raw);
    assert_eq!(formatted, "line one line two line three\n\nsecond paragraph");

    let config = ChunkerConfig {
        chunk_size: 12,
        overlap: 3,
    };
    let chunks = chunk_text(&formatted, &config);
    let mut rebuilt: String = chunks[0].clone();
    for chunk in &chunks[1..] {
        rebuilt.extend(chunk.chars().skip(config.overlap));
    }
    assert_eq!(rebuilt, formatted);
}

#[test]
fn empty_and_whitespace_input_yield_no_sections() {
    for raw in ["", "   ", "\n\n\n", " \t \n  \n"] {
        let doc = process_text(raw, &ChunkerConfig::default());
        assert!(doc.sections.is_empty(), "input {:?}", raw);
    }
}

#[test]
fn short_document_is_returned_whole() {
    let doc = process_text("Hello world.\n\nThis is a test.", &ChunkerConfig::default());
    assert_eq!(doc.sections.len(), 1);
    assert_eq!(doc.sections[0].content, "Hello world.\n\nThis is a test.");
}

#[test]
fn tiny_windows_still_cover_both_paragraphs() {
    let config = ChunkerConfig {
        chunk_size: 10,
        overlap: 2,
    };
    let doc = process_text("Hello world.\n\nThis is a test.", &config);
    assert!(doc.sections.len() > 1);
    for section in &doc.sections {
        assert!(section.content.chars().count() <= 10);
    }
    // Both paragraphs survive segmentation.
    let joined: String = doc
        .sections
        .iter()
        .map(|s| s.content.as_str())
        .collect::<Vec<_>>()
        .join("");
    assert!(joined.contains("Hello"));
    assert!(joined.contains("test."));
}
