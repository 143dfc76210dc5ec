//! Longest-common-prefix arrays.
//!
//! `lcp[i]` is the length of the common prefix of the suffixes at `sa[i]` and `sa[i + 1]`, so a
//! suffix array of length *n* has an LCP array of length *n* - 1.
use crate::{common_prefix, Char};
use contracts::*;

/// Inverse permutation of `sa`: `rank[sa[i]] == i`.
pub fn inverse(sa: &[usize]) -> Vec<usize> {
    let mut rank = vec![0; sa.len()];
    for (i, &suffix) in sa.iter().enumerate() {
        rank[suffix] = i;
    }
    rank
}

/// LCP array with Kasai's algorithm, *O*(*n*).
///
/// Suffixes are visited in text order. When suffix `i` shares `k` symbols with its predecessor in
/// `sa`, suffix `i + 1` shares at least `k - 1` symbols with its own predecessor, so matching
/// resumes from there instead of from zero.
///
/// # Example
/// ```
/// use sufidx::lcp::kasai;
///
/// assert_eq!(kasai(b"banana$", &[6, 5, 3, 1, 0, 4, 2]), vec![0, 1, 3, 0, 0, 2]);
/// ```
#[requires(text.len() == sa.len(), "`text` and `sa` have same length")]
pub fn kasai<C: Char>(text: &[C], sa: &[usize]) -> Vec<usize> {
    let n = text.len();
    if n <= 1 {
        return Vec::new();
    }

    let rank = inverse(sa);
    let mut lcp = vec![0; n - 1];
    let mut k = 0;
    for i in 0..n {
        if rank[i] == 0 {
            k = 0;
            continue;
        }
        let j = sa[rank[i] - 1];
        while i + k < n && j + k < n && text[i + k] == text[j + k] {
            k += 1;
        }
        lcp[rank[i] - 1] = k;
        k = k.saturating_sub(1);
    }
    lcp
}

/// LCP array by comparing every adjacent pair of suffixes directly, *O*(*n*²).
#[requires(text.len() == sa.len(), "`text` and `sa` have same length")]
pub fn naive<C: Char>(text: &[C], sa: &[usize]) -> Vec<usize> {
    sa.windows(2)
        .map(|w| common_prefix(&text[w[0]..], &text[w[1]..]))
        .collect()
}
