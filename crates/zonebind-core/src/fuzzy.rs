//! Approximate string scoring for zone names.
//!
//! A weighted ratio in the style of the classic "fuzzy wuzzy" scorer: the
//! plain similarity of the two normalized strings, plus partial (best
//! substring window) and token-order-insensitive variants, each scaled down
//! a little so an exact match still wins. Scores are integers in `0..=100`.
//!
//! The base similarity is the normalized Indel ratio from `rapidfuzz`,
//! `2 * matches / (len_a + len_b)`, so insertions cost less than under plain
//! Levenshtein.

use std::collections::BTreeSet;

/// Scale applied to token-based scores.
const UNBASE_SCALE: f64 = 0.95;
/// Scale applied to partial scores when lengths differ moderately.
const PARTIAL_SCALE: f64 = 0.90;
/// Scale applied to partial scores when one string is far longer.
const LONG_PARTIAL_SCALE: f64 = 0.60;

/// Lowercase, replace every non-alphanumeric char with a space, trim.
pub fn normalize(s: &str) -> String {
    let mapped: String = s
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_lowercase().next().unwrap_or(c)
            } else {
                ' '
            }
        })
        .collect();
    mapped.trim().to_owned()
}

/// Plain similarity in `0.0..=100.0`. Empty input scores zero.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    rapidfuzz::fuzz::ratio(a.chars(), b.chars()) * 100.0
}

/// Best [`ratio`] of the shorter string against every equally long window
/// of the longer one.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    if short.is_empty() {
        return 0.0;
    }

    let long_chars: Vec<char> = long.chars().collect();
    let width = short.chars().count();
    let mut best = 0.0_f64;
    for window in long_chars.windows(width) {
        let candidate: String = window.iter().collect();
        best = best.max(ratio(short, &candidate));
        if best >= 100.0 {
            break;
        }
    }
    best
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn scorer(partial: bool) -> fn(&str, &str) -> f64 {
    if partial { partial_ratio } else { ratio }
}

/// Similarity after sorting whitespace-separated tokens.
pub fn token_sort_ratio(a: &str, b: &str, partial: bool) -> f64 {
    scorer(partial)(&sorted_tokens(a), &sorted_tokens(b))
}

/// Similarity of the shared tokens against each side's full token set.
pub fn token_set_ratio(a: &str, b: &str, partial: bool) -> f64 {
    let left: BTreeSet<&str> = a.split_whitespace().collect();
    let right: BTreeSet<&str> = b.split_whitespace().collect();

    let join = |set: Vec<&str>| set.join(" ");
    let shared = join(left.intersection(&right).copied().collect());
    let only_left = join(left.difference(&right).copied().collect());
    let only_right = join(right.difference(&left).copied().collect());

    let combined_left = format!("{shared} {only_left}").trim().to_owned();
    let combined_right = format!("{shared} {only_right}").trim().to_owned();

    let score = scorer(partial);
    [
        score(&shared, &combined_left),
        score(&shared, &combined_right),
        score(&combined_left, &combined_right),
    ]
    .into_iter()
    .fold(0.0, f64::max)
}

/// Weighted best-of score between two raw strings, `0..=100`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn weighted_ratio(a: &str, b: &str) -> u8 {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (len_a, len_b) = (a.chars().count(), b.chars().count());
    let len_ratio = len_a.max(len_b) as f64 / len_a.min(len_b) as f64;

    let base = ratio(&a, &b);
    let best = if len_ratio < 1.5 {
        base.max(token_sort_ratio(&a, &b, false) * UNBASE_SCALE)
            .max(token_set_ratio(&a, &b, false) * UNBASE_SCALE)
    } else {
        let partial_scale = if len_ratio > 8.0 {
            LONG_PARTIAL_SCALE
        } else {
            PARTIAL_SCALE
        };
        base.max(partial_ratio(&a, &b) * partial_scale)
            .max(token_sort_ratio(&a, &b, true) * UNBASE_SCALE * partial_scale)
            .max(token_set_ratio(&a, &b, true) * UNBASE_SCALE * partial_scale)
    };

    best.round().clamp(0.0, 100.0) as u8
}

/// Best-scoring choice for `query`, as `(index, score)`.
///
/// Ties go to the earliest choice. `None` only when `choices` is empty.
pub fn extract_one<'a, I>(query: &str, choices: I) -> Option<(usize, u8)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(usize, u8)> = None;
    for (idx, choice) in choices.into_iter().enumerate() {
        let score = weighted_ratio(query, choice);
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((idx, score));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("  ZScaler-Zone_1! "), "zscaler zone 1");
        assert_eq!(normalize("---"), "");
    }

    #[test]
    fn identical_names_score_full() {
        assert_eq!(weighted_ratio("zscaler", "zscaler"), 100);
        assert_eq!(weighted_ratio("Prisma", "PRISMA"), 100);
    }

    #[test]
    fn empty_input_scores_zero() {
        assert_eq!(weighted_ratio("", "zscaler"), 0);
        assert_eq!(weighted_ratio("zscaler", "!!"), 0);
    }

    #[test]
    fn prefix_query_scores_through_partial_match() {
        // "zscaler" is a full window of "zscaler zone": 100 * 0.9
        assert_eq!(weighted_ratio("zscaler", "zscaler-zone"), 90);
        assert_eq!(weighted_ratio("prisma", "Prisma Access"), 90);
    }

    #[test]
    fn single_typo_on_short_names() {
        // one substitution in five chars
        assert_eq!(weighted_ratio("abcde", "abcdx"), 80);
        // one substitution in seven chars
        assert_eq!(weighted_ratio("zscaler", "zscalar"), 86);
    }

    #[test]
    fn insertions_score_as_indel() {
        // one extra char: 2 * 3 / 7
        assert_eq!(weighted_ratio("dmz", "dmz1"), 86);
        assert_eq!(weighted_ratio("zscaler", "zscalers"), 93);
        assert_eq!(weighted_ratio("guest", "guests"), 91);
        assert!((ratio("dmz", "dmz1") - 600.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn token_order_does_not_matter() {
        assert_eq!(weighted_ratio("guest wifi", "wifi guest"), 95);
    }

    #[test]
    fn unrelated_names_score_low() {
        assert!(weighted_ratio("corporate", "guest") < 50);
    }

    #[test]
    fn partial_ratio_finds_best_window() {
        assert!((partial_ratio("abc", "xxabcxx") - 100.0).abs() < f64::EPSILON);
        assert!(partial_ratio("abc", "xyz") < 1.0);
    }

    #[test]
    fn token_set_ignores_extra_tokens_on_one_side() {
        let score = token_set_ratio("zscaler", "zscaler tunnel zone", false);
        assert!((score - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn extract_one_prefers_first_on_ties() {
        let choices = ["zscaler", "ZSCALER", "guest"];
        assert_eq!(extract_one("zscaler", choices), Some((0, 100)));
    }

    #[test]
    fn extract_one_picks_highest() {
        let choices = ["guest", "prisma-access", "zscaler"];
        assert_eq!(extract_one("prisma", choices), Some((1, 90)));
        assert_eq!(extract_one("prisma", std::iter::empty()), None);
    }
}
