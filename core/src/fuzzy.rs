//! "Did you mean" suggestions for unknown option tokens.
//!
//! Similarity is the Ratcliff/Obershelp ratio `2 * M / T`, where `M` counts
//! the characters in the longest common block plus, recursively, the blocks
//! to its left and right, and `T` is the combined length of both strings.

/// Minimum ratio a name needs to be suggested.
pub const SIMILARITY_CUTOFF: f64 = 0.6;

/// Maximum number of suggestions returned.
pub const MAX_SUGGESTIONS: usize = 3;

/// Proposes the declared names closest to `token`.
///
/// Ordered by descending similarity, ties by name. Empty when nothing passes
/// [`SIMILARITY_CUTOFF`].
///
/// # Examples
///
/// ```
/// use option_schema_core::suggest;
///
/// let names = ["--rectangle", "--zoom", "--frame_rate"];
/// assert_eq!(suggest("--retangle", names), vec!["--rectangle"]);
/// assert!(suggest("--xyz", names).is_empty());
/// ```
pub fn suggest<'a, I>(token: &str, names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let token: Vec<char> = token.chars().collect();
    let mut scored: Vec<(f64, &str)> = Vec::new();

    for name in names {
        if scored.iter().any(|(_, seen)| *seen == name) {
            continue;
        }
        let candidate: Vec<char> = name.chars().collect();
        let score = similarity(&token, &candidate);
        if score >= SIMILARITY_CUTOFF {
            scored.push((score, name));
        }
    }

    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, name)| name.to_string())
        .collect()
}

/// Similarity ratio in `0.0..=1.0`.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    similarity(&a, &b)
}

fn similarity(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(a, b) as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (i, j, len) = longest_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_chars(&a[..i], &b[..j]) + matching_chars(&a[i + len..], &b[j + len..])
}

/// Longest common substring as `(start in a, start in b, length)`.
///
/// The earliest block wins ties.
fn longest_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut row = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = 0;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb { diagonal + 1 } else { 0 };
            let len = row[j + 1];
            if len > best.2 {
                best = (i + 1 - len, j + 1 - len, len);
            }
            diagonal = above;
        }
    }

    best
}
