//! Suffix sorting by prefix doubling.
//!
//! Every round sorts the cyclic shifts of the text by their first `2 * length` symbols, given
//! their order and equivalence classes by the first `length` symbols. On a terminated text the
//! cyclic order equals the suffix order, and the classes become unique after at most
//! ⌈log₂ *n*⌉ rounds.
//!
//! Three entry points share the first round and differ in how they refine:
//!
//! - [`construct_naive`] sorts class pairs with a comparison sort,
//! - [`construct`] sorts class pairs with two counting sorts, one of them implicit,
//! - [`construct_manber_myers`] only re-sorts the buckets that are not yet singletons.
//!
//! They return identical arrays for identical input.
use crate::alphabet::Alphabet;
use crate::config::Strategy;
use crate::{is_terminated, Char};
use contracts::*;
use log::{debug, trace};

/// Turns per-key counts into bucket boundaries.
///
/// With `head` set, `bucket[k]` becomes the first slot of bucket `k`, otherwise its last slot.
fn fill_bucket(keys: impl Iterator<Item = usize>, bucket: &mut [usize], head: bool) {
    bucket.iter_mut().for_each(|b| *b = 0);

    keys.for_each(|k| bucket[k] += 1);

    (0..bucket.len()).fold(0usize, |s, i| {
        let s = s + bucket[i];
        bucket[i] = if head {
            s - bucket[i]
        } else {
            s.wrapping_sub(1)
        };
        s
    });
}

/// Stable bucket sort of the offsets of `text` by their first symbol.
///
/// Returns the order together with the alphabet used to rank the symbols. Offsets with the same
/// symbol keep their ascending order.
pub fn sort_by_single_char<C: Char>(text: &[C]) -> (Vec<usize>, Alphabet<C>) {
    let alphabet = Alphabet::new(text);
    let ranks = alphabet.ranks(text);

    let mut bucket = vec![0; alphabet.len()];
    fill_bucket(ranks.iter().copied(), &mut bucket, true);

    let mut order = vec![0; text.len()];
    for (i, &r) in ranks.iter().enumerate() {
        order[bucket[r]] = i;
        bucket[r] += 1;
    }

    (order, alphabet)
}

/// Class of every offset after [`sort_by_single_char`]: offsets with equal symbols share a
/// class, and classes ascend with the symbols.
pub fn compute_equivalence_classes<C: Char>(text: &[C], order: &[usize]) -> Vec<usize> {
    debug_assert_eq!(text.len(), order.len());

    let mut class = vec![0; text.len()];
    for w in 1..order.len() {
        let (prev, cur) = (order[w - 1], order[w]);
        class[cur] = class[prev] + (text[cur] != text[prev]) as usize;
    }
    class
}

#[inline]
fn pair(class: &[usize], length: usize, i: usize) -> (usize, usize) {
    (class[i], class[(i + length) % class.len()])
}

/// One doubling round with counting sort, *O*(*n*).
///
/// `order` is sorted by the first `length` symbols of every cyclic shift and `class` holds their
/// classes. Shifting every offset of `order` back by `length` yields the shifts sorted by their
/// second half for free; a stable counting sort by the class of the first half finishes the
/// round.
pub fn double_round(length: usize, order: &[usize], class: &[usize]) -> Vec<usize> {
    let n = order.len();
    let shift = n - length % n;

    let mut bucket = vec![0; n];
    fill_bucket(class.iter().copied(), &mut bucket, false);

    let mut new_order = vec![0; n];
    for &i in order.iter().rev() {
        let start = (i + shift) % n;
        let b = &mut bucket[class[start]];
        new_order[*b] = start;
        *b = b.wrapping_sub(1);
    }
    new_order
}

/// One doubling round with a comparison sort, *O*(*n* log *n*).
///
/// Compares the class of the first half, then the class of the second half, then the offset.
pub fn double_round_naive(length: usize, order: &[usize], class: &[usize]) -> Vec<usize> {
    let mut new_order = order.to_vec();
    new_order.sort_by(|&a, &b| {
        pair(class, length, a)
            .cmp(&pair(class, length, b))
            .then(a.cmp(&b))
    });
    new_order
}

/// Classes for shifts of `2 * length` symbols, given `new_order` sorted by them and the classes
/// for `length` symbols.
pub fn update_equivalence_classes(
    length: usize,
    new_order: &[usize],
    old_class: &[usize],
) -> Vec<usize> {
    let mut class = vec![0; new_order.len()];
    for w in 1..new_order.len() {
        let (prev, cur) = (new_order[w - 1], new_order[w]);
        let differs = pair(old_class, length, cur) != pair(old_class, length, prev);
        class[cur] = class[prev] + differs as usize;
    }
    class
}

fn prefix_doubling<C: Char>(
    text: &[C],
    round: fn(usize, &[usize], &[usize]) -> Vec<usize>,
) -> Vec<usize> {
    let n = text.len();
    if n == 0 {
        return Vec::new();
    }

    let (mut order, _) = sort_by_single_char(text);
    let mut class = compute_equivalence_classes(text, &order);

    let mut length = 1;
    let mut rounds = 0;
    while length < n && class[order[n - 1]] + 1 < n {
        order = round(length, &order, &class);
        class = update_equivalence_classes(length, &order, &class);
        trace!(
            "doubling round {}: {} classes for length {}",
            rounds,
            class[order[n - 1]] + 1,
            2 * length
        );
        length *= 2;
        rounds += 1;
    }

    debug!("sorted {} suffixes in {} doubling rounds", n, rounds);
    order
}

/// Suffix array of `text` by prefix doubling with comparison sorts.
#[requires(is_terminated(text), "last character is unique and minimum")]
pub fn suffix_array_naive<C: Char>(text: &[C]) -> Vec<usize> {
    prefix_doubling(text, double_round_naive)
}

/// Suffix array of `text` by prefix doubling with counting sorts.
///
/// # Example
/// ```
/// use sufidx::doubling::suffix_array;
///
/// assert_eq!(suffix_array(b"banana$"), vec![6, 5, 3, 1, 0, 4, 2]);
/// assert_eq!(suffix_array::<u8>(b""), Vec::<usize>::new());
/// ```
#[requires(is_terminated(text), "last character is unique and minimum")]
pub fn suffix_array<C: Char>(text: &[C]) -> Vec<usize> {
    prefix_doubling(text, double_round)
}

/// Suffix array of `text` by Manber–Myers bucket refinement.
///
/// `rank[i]` is the first slot of the bucket holding suffix `i`. Each stage sorts the suffixes
/// inside every bucket that still holds more than one suffix by the rank of the suffix `h`
/// positions later, then splits the buckets where that rank changes.
#[requires(is_terminated(text), "last character is unique and minimum")]
pub fn suffix_array_manber_myers<C: Char>(text: &[C]) -> Vec<usize> {
    let n = text.len();
    if n == 0 {
        return Vec::new();
    }

    let (mut sa, _) = sort_by_single_char(text);

    let mut rank = vec![0; n];
    for w in 1..n {
        let (prev, cur) = (sa[w - 1], sa[w]);
        rank[cur] = if text[cur] == text[prev] { rank[prev] } else { w };
    }

    let mut h = 1;
    let mut stages = 0;
    loop {
        let mut settled = true;
        let mut lo = 0;
        while lo < n {
            let mut hi = lo + 1;
            while hi < n && rank[sa[hi]] == rank[sa[lo]] {
                hi += 1;
            }
            if hi - lo > 1 {
                settled = false;
                sa[lo..hi].sort_unstable_by_key(|&i| rank.get(i + h).copied());
            }
            lo = hi;
        }
        if settled || h >= n {
            break;
        }

        let key = |i: usize| (rank[i], rank.get(i + h).copied());
        let mut new_rank = vec![0; n];
        for w in 1..n {
            let (prev, cur) = (sa[w - 1], sa[w]);
            new_rank[cur] = if key(cur) == key(prev) { new_rank[prev] } else { w };
        }
        rank = new_rank;

        trace!("manber-myers stage {}: h = {}", stages, h);
        h *= 2;
        stages += 1;
    }

    debug!("sorted {} suffixes in {} manber-myers stages", n, stages);
    sa
}

/// Suffix array of `text` with the given strategy.
#[requires(is_terminated(text), "last character is unique and minimum")]
pub fn suffix_array_with<C: Char>(text: &[C], strategy: Strategy) -> Vec<usize> {
    match strategy {
        Strategy::Naive => suffix_array_naive(text),
        Strategy::Doubling => suffix_array(text),
        Strategy::ManberMyers => suffix_array_manber_myers(text),
    }
}

fn store<I: Char>(order: &[usize], sa: &mut [I]) {
    sa.iter_mut()
        .zip(order)
        .for_each(|(e, &i)| *e = I::of_u(i));
}

/// Construct suffix array with comparison-sort doubling.
///
/// Runs in O(N log² N) time.
/// # Arguments
/// - `s`: Input string
/// - `sa`: Output suffix array
#[requires(s.len() == sa.len(), "`s` and `sa` have same length")]
#[requires(s.is_empty() || I::max_value().to_usize().unwrap() >= s.len() - 1, "indexes of `s` fit into `I`")]
#[requires(is_terminated(s), "last character is unique and minimum")]
pub fn construct_naive<C: Char, I: Char>(s: &[C], sa: &mut [I]) {
    store(&suffix_array_naive(s), sa);
}

/// Construct suffix array with counting-sort doubling.
///
/// Runs in O(N log N) time with O(N) additional workspace.
/// # Arguments
/// - `s`: Input string
/// - `sa`: Output suffix array
/// # Example
/// ```
/// use sufidx::doubling;
///
/// let s = b"abracadabra$";
///
/// let mut sa = vec![0u8; s.len()];
///
/// doubling::construct(s, &mut sa);
///
/// assert_eq!(sa, vec![11, 10, 7, 0, 3, 5, 8, 1, 4, 6, 9, 2]);
/// ```
#[requires(s.len() == sa.len(), "`s` and `sa` have same length")]
#[requires(s.is_empty() || I::max_value().to_usize().unwrap() >= s.len() - 1, "indexes of `s` fit into `I`")]
#[requires(is_terminated(s), "last character is unique and minimum")]
pub fn construct<C: Char, I: Char>(s: &[C], sa: &mut [I]) {
    store(&suffix_array(s), sa);
}

/// Construct suffix array with Manber–Myers bucket refinement.
///
/// # Arguments
/// - `s`: Input string
/// - `sa`: Output suffix array
#[requires(s.len() == sa.len(), "`s` and `sa` have same length")]
#[requires(s.is_empty() || I::max_value().to_usize().unwrap() >= s.len() - 1, "indexes of `s` fit into `I`")]
#[requires(is_terminated(s), "last character is unique and minimum")]
pub fn construct_manber_myers<C: Char, I: Char>(s: &[C], sa: &mut [I]) {
    store(&suffix_array_manber_myers(s), sa);
}
