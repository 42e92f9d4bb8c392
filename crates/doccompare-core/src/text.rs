//! Text normalization and tokenization helpers shared by the similarity
//! oracle and the inline differ.

/// Trim and collapse every whitespace run to a single space.
pub fn normalize_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_space = false;

    for c in s.trim().chars() {
        if c.is_whitespace() {
            in_space = true;
        } else {
            if in_space && !out.is_empty() {
                out.push(' ');
            }
            in_space = false;
            out.push(c);
        }
    }

    out
}

/// Maximal non-whitespace runs, in order. Whitespace is discarded; the
/// redline composer reinserts single spaces between emitted tokens.
pub fn tokenize_words(s: &str) -> Vec<&str> {
    s.split_whitespace().collect()
}

/// Alternating non-whitespace and whitespace runs, both kept as tokens.
/// Used when whitespace differences must survive the diff.
pub fn tokenize_preserving_whitespace(s: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut prev_is_space: Option<bool> = None;

    for (idx, c) in s.char_indices() {
        let is_space = c.is_whitespace();
        match prev_is_space {
            Some(prev) if prev == is_space => {}
            Some(_) => {
                tokens.push(&s[start..idx]);
                start = idx;
                prev_is_space = Some(is_space);
            }
            None => {
                prev_is_space = Some(is_space);
            }
        }
    }

    if start < s.len() {
        tokens.push(&s[start..]);
    }

    tokens
}

pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}
