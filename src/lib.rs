//! Suffix array construction and searching for in-memory binary data.
//!
//! The construction algorithm is SAIS, the linear-time suffix sorting by
//! induced copying described in
//! [Two Efficient Algorithms for Linear Time Suffix Array
//! Construction](https://ieeexplore.ieee.org/document/5582081), here in a
//! sentinel-free formulation whose per-level scratch arrays live inside
//! the free tail of the output buffer whenever they fit.
//!
//! [`SuffixArray`](struct.SuffixArray.html) is the convenient entry
//! point; callers that manage their own buffers (a Burrows-Wheeler layer,
//! for instance) can drive [`compute_sa`](fn.compute_sa.html) directly.

#[cfg(feature = "pack")]
mod packed_sa;
mod sa;
mod saca;
mod sais;
mod utils;

pub use sa::SuffixArray;
pub use saca::{saca, MAX_LENGTH};
pub use sais::{compute_sa, Error, SaisChar};
