//! Sentence composition

/// Opening punctuation peeled off the start of a sentence or word
const OPENING: &[char] = &['(', '[', '{', '"', '\''];

/// Closing punctuation peeled off the end of a whole sentence
const SENTENCE_CLOSING: &[char] = &[')', ']', '}', '"', '\'', '!', '?', '.', ',', ':', ';'];

/// Closing punctuation peeled off the end of a single word
const WORD_CLOSING: &[char] = &['!', '?', '.', ',', ':', ';'];

/// Head connectives that glue a token to the previous word
const GLUE: &[char] = &[',', ';'];

/// Join chain values into a sentence
///
/// Values are separated by single spaces. A value that opens with `,` or `;`
/// hands that character to the previous word (`"cat" ",and"` reads
/// `"cat, and"`). The first letter is capitalised unless the sentence opens
/// with a custom emote tag.
pub fn compose_sentence<S: AsRef<str>>(values: &[S]) -> String {
    let mut out = String::new();

    for value in values {
        let value = value.as_ref().trim();
        if value.is_empty() {
            continue;
        }

        match value.chars().next() {
            Some(c) if GLUE.contains(&c) && !out.is_empty() => {
                out.push(c);
                let rest = &value[c.len_utf8()..];
                if !rest.is_empty() {
                    out.push(' ');
                    out.push_str(rest);
                }
            }
            _ => {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(value);
            }
        }
    }

    if out.starts_with('<') {
        out
    } else {
        capitalize_first(&out)
    }
}

/// Read a sentence back to front
///
/// Sentence-level punctuation (opening brackets and quotes, the closing
/// terminator) stays where it was; each word keeps its own attached
/// punctuation; the new first word is capitalised.
///
/// ```
/// use wordchain_domain::summary::reverse_sentence;
///
/// assert_eq!(reverse_sentence("the cat sat."), "Sat cat the.");
/// ```
pub fn reverse_sentence(sentence: &str) -> String {
    let trimmed = sentence.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }

    let body = trimmed.trim_start_matches(OPENING);
    let opening = &trimmed[..trimmed.len() - body.len()];
    let core = body.trim_end_matches(SENTENCE_CLOSING);
    let closing = &body[core.len()..];

    let mut words: Vec<&str> = core.split_whitespace().collect();
    if words.is_empty() {
        return trimmed.to_string();
    }
    words.reverse();

    let rebuilt: Vec<String> = words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            if i > 0 {
                return (*word).to_string();
            }
            let stem = word.trim_end_matches(WORD_CLOSING);
            let trailing = &word[stem.len()..];
            let inner = stem.trim_start_matches(OPENING);
            let leading = &stem[..stem.len() - inner.len()];
            format!("{}{}{}", leading, capitalize_first(inner), trailing)
        })
        .collect();

    format!("{}{}{}", opening, rebuilt.join(" "), closing)
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
