use tracing::trace;
use unicode_segmentation::UnicodeSegmentation;

/// Longest text sent in a single Telegram message.
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Split `text` into chunks of at most `max` characters.
///
/// Chunks break after a newline when possible and never inside a grapheme
/// cluster.
pub fn split_message(text: &str, max: usize) -> Vec<String> {
    let max = max.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();
        if current_len + line_len <= max {
            current.push_str(line);
            current_len += line_len;
            continue;
        }
        if !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        for grapheme in line.graphemes(true) {
            let len = grapheme.chars().count();
            if current_len + len > max && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            current.push_str(grapheme);
            current_len += len;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    trace!(parts = chunks.len(), "split message");
    chunks
}

/// First `max` characters of `text`, with an ellipsis when cut.
pub fn snippet(text: &str, max: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}
