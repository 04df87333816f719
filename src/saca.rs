use std::slice::from_raw_parts_mut;

use super::sais::compute_sa;

pub use super::sais::MAX_LENGTH;

/// Scratch slack seeded behind the suffix array during construction, in
/// integer slots. Four byte-alphabet bucket arrays fit, so a top-level
/// build never touches the heap for its workspace.
pub(crate) const SACA_SLACK: usize = 4 * 256;

/// Wrapper of the underlying suffix array construction algorithm: fills
/// `sa[0]` with the empty-suffix sentinel and sorts the proper suffixes
/// into `sa[1..=s.len()]`. Slots past that are scratch space and come
/// back unspecified.
pub fn saca(s: &[u8], sa: &mut [u32]) {
    assert!(s.len() <= MAX_LENGTH);
    assert!(s.len() < sa.len());

    sa[0] = s.len() as u32;

    // the core runs on i32 so it can fold its tag bits into the sign
    // bit of each entry; every finished rank is a position below
    // i32::MAX, so lending the rank slots out under a signed view and
    // reading them back as u32 changes no bits
    let ranks = &mut sa[1..];
    let signed = unsafe { from_raw_parts_mut(ranks.as_mut_ptr().cast::<i32>(), ranks.len()) };
    compute_sa(s, signed, 256).expect("suffix array workspace allocation failed");
}
