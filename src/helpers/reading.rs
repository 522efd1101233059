//! Reading time estimation

use crate::content::ContentBlock;

/// Fixed reading speed used for estimates
pub const WORDS_PER_MINUTE: u64 = 200;

/// Count words by splitting on single spaces.
///
/// Consecutive spaces yield empty tokens that are counted too, and an empty
/// string counts as one word.
pub fn count_words(text: &str) -> u64 {
    text.split(' ').count() as u64
}

/// Total words across headings and body text of every block
pub fn total_words(content: &[ContentBlock]) -> u64 {
    content
        .iter()
        .map(|block| {
            let body: u64 = block
                .body
                .iter()
                .filter_map(|segment| segment.text.as_deref())
                .map(count_words)
                .sum();
            count_words(&block.heading) + body
        })
        .sum()
}

/// Estimated reading time in whole minutes, rounded up.
///
/// No minimum applies: content with no words reads in 0 minutes.
pub fn estimate_reading_minutes(content: &[ContentBlock]) -> u64 {
    total_words(content).div_ceil(WORDS_PER_MINUTE)
}
