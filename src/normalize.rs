//! Participant-name normalization.
//!
//! Providers spell the same player in incompatible ways ("N. Djokovic",
//! "Djokovic, Novak", "J.R. Smith-Jones"), so every name is reduced to a
//! canonical comparison form before any similarity scoring. The transform is
//! a pure function of its input: no locale, no clock, no I/O. Normalizing an
//! already-normalized string is a no-op, which lets callers normalize
//! defensively without drift.

/// Punctuation replaced with spaces up front. Periods are kept for the
/// initials pass and handled separately.
const PUNCTUATIONS: [char; 3] = [',', '-', '\''];

/// Normalize a raw participant name for comparison.
///
/// Steps, in order:
/// 1. lowercase,
/// 2. commas, hyphens and apostrophes become spaces,
/// 3. tokens holding several periods ("j.r.") are split into
///    single-letter-plus-period sub-tokens,
/// 4. consecutive single-letter initials merge into one compact token
///    ("j." + "r." -> "jr"); a lone initial loses its period,
/// 5. leftover periods in longer tokens become spaces,
/// 6. whitespace collapses to single spaces.
///
/// Empty input yields an empty string.
pub fn normalize_name(name: &str) -> String {
    let lowered: String = name
        .to_lowercase()
        .chars()
        .map(|ch| if PUNCTUATIONS.contains(&ch) { ' ' } else { ch })
        .collect();

    // Split multi-period tokens ("j.r." -> "j.", "r.") so the merge pass
    // below sees each initial on its own.
    let mut expanded: Vec<String> = Vec::new();
    for token in lowered.split_whitespace() {
        if token.matches('.').count() > 1 {
            for part in token.split('.') {
                if !part.is_empty() {
                    expanded.push(format!("{part}."));
                }
            }
        } else {
            expanded.push(token.to_string());
        }
    }

    let mut merged: Vec<String> = Vec::new();
    let mut i = 0;
    while i < expanded.len() {
        let part = &expanded[i];
        if let Some(letter) = as_initial(part) {
            match expanded.get(i + 1).and_then(|next| as_initial(next)) {
                Some(next_letter) => {
                    // "j." + "r." -> "jr"
                    merged.push(format!("{letter}{next_letter}"));
                    i += 2;
                }
                None => {
                    // Lone initial: strip the period.
                    merged.push(letter.to_string());
                    i += 1;
                }
            }
        } else {
            merged.push(part.replace('.', " "));
            i += 1;
        }
    }

    // Join and re-split to collapse any spaces introduced by step 5.
    merged
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the letter of a single-letter-plus-period token ("j." -> 'j'),
/// or `None` for anything else.
fn as_initial(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(letter), Some('.'), None) if letter.is_alphabetic() => Some(letter),
        _ => None,
    }
}
