//! Sentence-preserving text chunking.

pub const SENTENCE_DELIMITER: &str = ". ";

/// Splits `text` into chunks of at most `max_chunk_size` characters without
/// breaking sentences.
///
/// Sentences are accumulated greedily; the chunk is closed as soon as the next
/// sentence would overflow it. A single sentence longer than `max_chunk_size`
/// is emitted whole, so the bound is best-effort. Every sentence except the
/// last keeps its trailing delimiter, so concatenating the chunks reproduces
/// `text` exactly.
pub fn chunk(text: &str, max_chunk_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    if text.is_empty() {
        return chunks;
    }

    let delimiter_chars = SENTENCE_DELIMITER.chars().count();
    let mut current = String::new();
    let mut current_chars = 0;
    let mut sentences = text.split(SENTENCE_DELIMITER).peekable();

    while let Some(sentence) = sentences.next() {
        let is_last = sentences.peek().is_none();
        let sentence_chars = sentence.chars().count() + if is_last { 0 } else { delimiter_chars };

        if !current.is_empty() && current_chars + sentence_chars > max_chunk_size {
            chunks.push(std::mem::take(&mut current));
            current_chars = 0;
        }

        current.push_str(sentence);
        if !is_last {
            current.push_str(SENTENCE_DELIMITER);
        }
        current_chars += sentence_chars;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
