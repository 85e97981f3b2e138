//! Boundary-aware document splitting.
//!
//! Documents are cut into bounded, overlapping character windows that
//! prefer to break at paragraph boundaries, then sentence boundaries,
//! then word boundaries, before falling back to a hard cut.

use unicode_segmentation::UnicodeSegmentation;

/// Split `text` into chunks of at most `chunk_size` bytes, each chunk
/// after the first overlapping its predecessor by up to `overlap` bytes.
///
/// Split points are chosen inside the window `[start, start + chunk_size)`
/// by priority:
///
/// 1. last paragraph break (`"\n\n"`) strictly inside the window
/// 2. last sentence break (`". "`) strictly inside the window
/// 3. last space inside the window
/// 4. hard cut at `chunk_size`
///
/// The trailing remainder is always emitted verbatim as the final chunk.
/// Output is a pure function of the inputs.
pub fn split_into_chunks(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    // Already fits in a single chunk
    if text.len() <= chunk_size {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    let text_len = text.len();

    while start < text_len {
        if start + chunk_size >= text_len {
            // Last chunk: take the rest
            chunks.push(text[start..].to_string());
            break;
        }

        let end = floor_char_boundary(text, start + chunk_size);
        let window = &text[start..end];

        let split_at = if let Some(pos) = paragraph_break(window) {
            start + pos
        } else if let Some(pos) = sentence_break(window) {
            start + pos
        } else if let Some(pos) = window.rfind(' ') {
            start + pos + 1
        } else {
            // No usable boundary: hard cut
            end
        };

        chunks.push(text[start..split_at].to_string());

        // Step back by `overlap` to keep context, but never stall: if the
        // overlap swallows the whole advance, continue from the split point.
        let next = split_at.saturating_sub(overlap);
        start = if next > start { next } else { split_at };
    }

    chunks
}

/// Offset just past the last paragraph break strictly inside the window.
fn paragraph_break(window: &str) -> Option<usize> {
    window
        .rfind("\n\n")
        .map(|p| p + 2)
        .filter(|&p| p < window.len())
}

/// Offset just past the last sentence break strictly inside the window.
fn sentence_break(window: &str) -> Option<usize> {
    window
        .rfind(". ")
        .map(|p| p + 2)
        .filter(|&p| p < window.len())
}

/// Truncate `s` to at most `max_graphemes` user-perceived characters.
pub fn truncate_chars(s: &str, max_graphemes: usize) -> &str {
    match s.grapheme_indices(true).nth(max_graphemes) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Largest index `<= index` that lands on a UTF-8 character boundary.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn short_text_is_a_single_chunk() {
        let text = "A short paragraph that fits.";
        assert_eq!(split_into_chunks(text, 4000, 200), vec![text.to_string()]);
    }

    #[test]
    fn exact_size_text_is_a_single_chunk() {
        let text = "x".repeat(100);
        assert_eq!(split_into_chunks(&text, 100, 10), vec![text.clone()]);
    }

    #[test]
    fn prefers_paragraph_breaks() {
        let text = "First paragraph here.\n\nSecond paragraph follows. It is longer and keeps going for a while.";
        let chunks = split_into_chunks(text, 40, 0);

        assert!(chunks[0].ends_with("\n\n"));
        assert!(chunks[1].starts_with("Second paragraph"));
    }

    #[test]
    fn falls_back_to_sentence_breaks() {
        let text = "One sentence here. Another sentence there. And a third one to push past the limit.";
        let chunks = split_into_chunks(text, 50, 0);

        assert!(chunks[0].ends_with(". "));
    }

    #[test]
    fn falls_back_to_spaces() {
        let text = "just some plain words without any sentence punctuation at all in here";
        let chunks = split_into_chunks(text, 30, 0);

        for chunk in &chunks[..chunks.len() - 1] {
            assert!(chunk.ends_with(' '), "chunk {chunk:?} should end on a word boundary");
        }
    }

    #[test]
    fn hard_cut_when_no_boundaries_exist() {
        let text = "a".repeat(100);
        let chunks = split_into_chunks(&text, 10, 0);

        assert_eq!(chunks.len(), 10);
        assert!(chunks.iter().all(|c| c.len() == 10));
    }

    #[test]
    fn zero_overlap_round_trips() {
        let text = "Alpha beta gamma. Delta epsilon zeta.\n\nEta theta iota kappa lambda. Mu nu xi omicron pi rho sigma.";
        let chunks = split_into_chunks(text, 30, 0);

        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn overlap_repeats_trailing_context() {
        let text = "word ".repeat(50);
        let chunks = split_into_chunks(&text, 40, 10);

        for pair in chunks.windows(2) {
            let prev_tail = &pair[0][pair[0].len().saturating_sub(10)..];
            assert!(pair[1].starts_with(prev_tail));
        }
    }

    #[test]
    fn degenerate_overlap_still_terminates() {
        let text = "b".repeat(500);
        // Overlap larger than the chunk itself would otherwise stall the
        // start pointer forever.
        let chunks = split_into_chunks(&text, 10, 50);

        assert!(!chunks.is_empty());
        assert_eq!(chunks.concat().len(), 500);
    }

    #[test]
    fn never_splits_inside_a_multibyte_character() {
        let text = "é".repeat(300);
        let chunks = split_into_chunks(&text, 101, 0);

        for chunk in &chunks {
            assert!(chunk.chars().all(|c| c == 'é'));
        }
    }

    #[test]
    fn nine_thousand_chars_make_three_chunks() {
        // Paragraphs of ~500 chars so every window finds a paragraph break.
        let para = format!("{}.", "q".repeat(499));
        let text = vec![para; 18].join("\n\n");
        assert!(text.len() >= 9000);

        let chunks = split_into_chunks(&text, 4000, 200);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.len() <= 4000));
    }

    #[test]
    fn truncate_chars_respects_grapheme_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("", 5), "");
    }
}
