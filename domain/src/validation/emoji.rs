//! Emoji detection
//!
//! Counts emoji *sequences* rather than code points, so a ZWJ family, a flag
//! or a skin-toned hand each count as one emoji.

use regex::Regex;
use std::sync::LazyLock;

const ZERO_WIDTH_JOINER: char = '\u{200D}';

static CUSTOM_EMOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<a?:[A-Za-z0-9_]+:([0-9]+)>$").expect("custom emote pattern is valid")
});

/// Pictographic code points that start an emoji
pub fn is_emoji_base(c: char) -> bool {
    matches!(
        c as u32,
        0x1F600..=0x1F64F   // emoticons
        | 0x1F300..=0x1F5FF // misc symbols and pictographs
        | 0x1F680..=0x1F6FF // transport and map
        | 0x1F700..=0x1F8FF // alchemical, geometric extended, arrows-c
        | 0x1F900..=0x1F9FF // supplemental symbols and pictographs
        | 0x1FA00..=0x1FBFF // symbols and pictographs extended-a, legacy computing
        | 0x1F1E6..=0x1F1FF // regional indicators
        | 0x2600..=0x26FF   // misc symbols
        | 0x2700..=0x27BF   // dingbats
        | 0x2B50..=0x2B55   // stars and circles
    ) && !is_modifier(c)
}

/// Code points that decorate the preceding emoji
fn is_modifier(c: char) -> bool {
    matches!(
        c as u32,
        0xFE00..=0xFE0F      // variation selectors
        | 0x1F3FB..=0x1F3FF  // skin tones
        | 0x20E3             // combining keycap
        | 0xE0020..=0xE007F  // tag sequences
    )
}

fn is_regional_indicator(c: char) -> bool {
    matches!(c as u32, 0x1F1E6..=0x1F1FF)
}

/// Number of emoji sequences in `input`
pub fn count_sequences(input: &str) -> usize {
    let mut count = 0;
    let mut in_sequence = false;
    let mut joined = false;
    let mut open_flag = false;

    for c in input.chars() {
        if c == ZERO_WIDTH_JOINER {
            joined = in_sequence;
            continue;
        }
        if is_modifier(c) {
            continue;
        }
        if is_emoji_base(c) {
            let pairs_flag = open_flag && is_regional_indicator(c);
            if !(joined || pairs_flag) {
                count += 1;
            }
            open_flag = is_regional_indicator(c) && !pairs_flag;
            in_sequence = true;
        } else {
            in_sequence = false;
            open_flag = false;
        }
        joined = false;
    }

    count
}

/// Whether `input` consists of exactly one emoji sequence and nothing else
pub fn is_single_emoji(input: &str) -> bool {
    input
        .chars()
        .all(|c| c == ZERO_WIDTH_JOINER || is_modifier(c) || is_emoji_base(c))
        && count_sequences(input) == 1
}

/// Id of a custom emote reference (`<:name:id>` or `<a:name:id>`) making up
/// the whole of `input`
pub fn custom_emote_id(input: &str) -> Option<u64> {
    CUSTOM_EMOTE
        .captures(input)
        .and_then(|caps| caps.get(1))
        .and_then(|id| id.as_str().parse().ok())
}
