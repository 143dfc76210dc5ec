//! Suffix arrays, LCP arrays and suffix trees over small integer alphabets.
//!
//! The crate offers several constructions of the same logical index so that they can be
//! cross-checked against each other:
//!
//! - suffix arrays by prefix doubling, with a comparison sort ([`doubling::construct_naive`]),
//!   a counting sort ([`doubling::construct`]) and Manber–Myers bucket refinement
//!   ([`doubling::construct_manber_myers`]),
//! - LCP arrays with Kasai's algorithm ([`lcp::kasai`]),
//! - suffix trees converted from a suffix array and its LCP array ([`SuffixArray::to_suffix_tree`]),
//! - suffix trees built directly from the text by inserting every suffix
//!   ([`PositionalSuffixTree`], [`LiteralSuffixTree`]),
//! - suffix trees built online with Ukkonen's algorithm ([`UkkonenTree`]).
//!
//! Every construction except Ukkonen's expects the caller to terminate the text with a sentinel:
//! a symbol that occurs exactly once, at the end, and is smaller than every other symbol.
//! `0` is the usual choice for byte strings, `$` works for printable ASCII.
//!
//! # Example
//! ```
//! use sufidx::{SuffixArray, UkkonenTree};
//!
//! let text = b"banana$";
//! let sa = SuffixArray::new(text);
//! assert_eq!(sa.table(), &[6, 5, 3, 1, 0, 4, 2]);
//! assert_eq!(sa.lcp(), &[0, 1, 3, 0, 0, 2]);
//! assert_eq!(sa.positions(b"ana"), vec![3, 1]);
//!
//! let st = sa.to_suffix_tree();
//! assert!(st.has_substring(b"nan"));
//! assert!(st.has_suffix(b"nana"));
//!
//! let ukk = UkkonenTree::new(b"banana");
//! assert_eq!(ukk.find_substring(b"nan"), Some(2));
//! ```
pub mod alphabet;
mod children;
pub mod config;
pub mod doubling;
pub mod lcp;
pub mod suffix_array;
pub mod tree;
pub mod ukkonen;

pub use alphabet::Alphabet;
pub use config::{Config, Strategy};
pub use suffix_array::SuffixArray;
pub use tree::{
    Label, Literal, LiteralSuffixTree, Locus, NodeId, PositionalSuffixTree, Span, SuffixTree,
};
pub use ukkonen::UkkonenTree;

use std::fmt::{self, Write};

mod private {
    use num::PrimInt;
    use std::fmt::Debug;

    pub trait Char: PrimInt + Debug {
        fn of_u(v: usize) -> Self;
        fn to_u(&self) -> usize;
        fn fold_case(self) -> Self;
    }

    macro_rules! impl_char {
        ($uint:ty) => {
            impl Char for $uint {
                #[inline]
                fn of_u(v: usize) -> Self {
                    v as $uint
                }
                #[inline]
                fn to_u(&self) -> usize {
                    *self as usize
                }
                #[inline]
                fn fold_case(self) -> Self {
                    if (b'A' as $uint..=b'Z' as $uint).contains(&self) {
                        self + (b'a' - b'A') as $uint
                    } else {
                        self
                    }
                }
            }
        };
    }

    impl_char!(u8);

    impl_char!(u16);

    #[cfg(any(target_pointer_width = "32", target_pointer_width = "64"))]
    impl_char!(u32);

    #[cfg(target_pointer_width = "64")]
    impl_char!(u64);

    impl_char!(usize);
}

/// A trait that represents both symbol and index: primitive unsigned integer type that fit into `usize`.
///
/// This is a [sealed trait](https://rust-lang.github.io/api-guidelines/future-proofing.html).
pub trait Char: private::Char {}

macro_rules! impl_char {
    ($uint:ty) => {
        impl Char for $uint {}
    };
}

impl_char!(u8);

impl_char!(u16);

#[cfg(any(target_pointer_width = "32", target_pointer_width = "64"))]
impl_char!(u32);

#[cfg(target_pointer_width = "64")]
impl_char!(u64);

impl_char!(usize);

/// `true` if `s` is empty or its last symbol is strictly smaller than every other symbol.
///
/// This is the sentinel precondition shared by every construction except Ukkonen's.
pub fn is_terminated<C: Char>(s: &[C]) -> bool {
    match s.split_last() {
        None => true,
        Some((last, rest)) => rest.iter().all(|c| c > last),
    }
}

/// Prints printable ASCII symbols as characters and everything else as `<n>`. `None` stands for an
/// implicit sentinel and prints as `$`.
pub(crate) fn write_symbols<C: Char>(
    f: &mut fmt::Formatter,
    symbols: impl Iterator<Item = Option<C>>,
) -> fmt::Result {
    for c in symbols {
        match c.map(|c| c.to_u()) {
            None => f.write_char('$')?,
            Some(u @ 0x20..=0x7e) => f.write_char(u as u8 as char)?,
            Some(u) => write!(f, "<{}>", u)?,
        }
    }
    Ok(())
}

/// Length of the common prefix of `a` and `b`.
#[inline]
pub(crate) fn common_prefix<C: Eq>(a: &[C], b: &[C]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
