//! Whitespace tokenizer for annotation values.
//!
//! Every tag value (`@parameter int32 $id the identifier`) is read through
//! [`tokenize`]. With a limit, the last token keeps the rest of the input
//! verbatim and missing trailing tokens are padded with empty strings.

use regex::Regex;
use std::sync::LazyLock;

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Split `input` on runs of whitespace.
///
/// - `None` (or `Some(0)`): every whitespace-separated token, no padding.
///   Empty input yields an empty list.
/// - `Some(n)`: at most `n` tokens, the last one holding the remainder of
///   `input`; right-padded with `""` up to exactly `n` entries.
pub fn tokenize(input: &str, limit: Option<usize>) -> Vec<String> {
    match limit {
        Some(limit) if limit > 0 => {
            let mut chunks: Vec<String> = RE_WHITESPACE
                .splitn(input, limit)
                .map(str::to_string)
                .collect();
            chunks.resize(limit, String::new());
            chunks
        }
        _ => input.split_whitespace().map(str::to_string).collect(),
    }
}

/// Fixed-arity form of [`tokenize`], for destructuring:
///
/// ```
/// let [ty, name, description] = swagdoc_syntax::fields::<3>("string $x");
/// assert_eq!((ty.as_str(), name.as_str(), description.as_str()), ("string", "$x", ""));
/// ```
pub fn fields<const N: usize>(input: &str) -> [String; N] {
    let mut chunks = tokenize(input, Some(N)).into_iter();
    std::array::from_fn(|_| chunks.next().unwrap_or_default())
}
