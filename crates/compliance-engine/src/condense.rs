//! Length-bounded condensation of record text

/// Characters kept free below the limit when fitting whole sentences
pub const SENTENCE_MARGIN: usize = 10;

const ELLIPSIS: &str = "...";

/// Shorten `text` to at most `max_len` characters
///
/// Text already within the limit is returned unchanged. Otherwise as many
/// leading whole sentences as fit in `max_len - SENTENCE_MARGIN` are kept.
/// When not even the first sentence fits, whole words are kept instead and
/// an ellipsis is appended.
pub fn condense_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    if max_len < ELLIPSIS.len() {
        return text.chars().take(max_len).collect();
    }

    let budget = max_len.saturating_sub(SENTENCE_MARGIN);

    let sentences = fit_pieces(split_sentences(text).iter().map(String::as_str), budget);
    if !sentences.is_empty() {
        return sentences;
    }

    let word_budget = budget.saturating_sub(ELLIPSIS.len());
    let words = fit_pieces(text.split_whitespace(), word_budget);
    if !words.is_empty() {
        return format!("{}{}", words, ELLIPSIS);
    }

    let cut: String = text.chars().take(word_budget).collect();
    format!("{}{}", cut.trim_end(), ELLIPSIS)
}

/// Join leading pieces with single spaces while the result stays within
/// `budget` characters
fn fit_pieces<'a>(pieces: impl Iterator<Item = &'a str>, budget: usize) -> String {
    let mut out = String::new();
    let mut len = 0;

    for piece in pieces {
        let piece_len = piece.chars().count();
        let separator = usize::from(!out.is_empty());
        if len + separator + piece_len > budget {
            break;
        }
        if separator == 1 {
            out.push(' ');
        }
        out.push_str(piece);
        len += separator + piece_len;
    }

    out
}

/// Split text after each run of `.`, `!` or `?`, trimming every sentence
/// and keeping a trailing unterminated remainder
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        let at_terminator = matches!(c, '.' | '!' | '?');
        let run_continues = matches!(chars.peek(), Some('.' | '!' | '?'));
        if at_terminator && !run_continues {
            push_trimmed(&mut sentences, &current);
            current.clear();
        }
    }
    push_trimmed(&mut sentences, &current);

    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, sentence: &str) {
    let trimmed = sentence.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}
