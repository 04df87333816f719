//! Induction sweeps over the output buffer.
//!
//! During a sweep every slot of `sa` is one of: `0` (empty), a positive
//! index (a provisional entry still to be consumed), or a bit-inverted
//! index `!j` marking an S-type placement. The marked lms sort
//! additionally shifts an entry by `+n` to flag the last member of a
//! tie-break class; both encodings share the slot, there is no parallel
//! tag array. Entries of the lms sweeps are pre-decremented: a stored
//! value `v` sits in the bucket of `text[v + 1]`.

use super::utils::SaisChar;
use super::workspace::{MarkTable, Workspace};

/// Sort the provisionally placed lms characters into lms-substring order:
/// one left-to-right sweep over the L-type slots, one right-to-left sweep
/// over the S-type slots. Afterwards the bit-inverted entries are exactly
/// the lms positions, in substring order.
pub fn sort_lms_substrings<T: SaisChar>(
    text: &[T],
    sa: &mut [i32],
    ws: &mut Workspace,
) {
    let n = text.len();
    debug_assert!(n >= 2);

    // induce the runs left of each placed lms character
    ws.refresh(text, sa);
    ws.make_buckets(sa, false);
    let mut j = n - 1;
    let mut c1 = text[j].index();
    let mut b = ws.bucket(sa, c1) as usize;
    j -= 1;
    sa[b] = if text[j].index() < c1 {
        !(j as i32)
    } else {
        j as i32
    };
    b += 1;
    for i in 0..n {
        let v = sa[i];
        if v > 0 {
            let mut j = v as usize;
            debug_assert!(text[j] >= text[j + 1]);
            let c0 = text[j].index();
            if c0 != c1 {
                ws.set_bucket(sa, c1, b as i32);
                c1 = c0;
                b = ws.bucket(sa, c1) as usize;
            }
            debug_assert!(i < b);
            j -= 1;
            sa[b] = if text[j].index() < c1 {
                !(j as i32)
            } else {
                j as i32
            };
            b += 1;
            sa[i] = 0;
        } else if v < 0 {
            sa[i] = !v;
        }
    }

    // mirror sweep for the S-type slots; crossing an L/S boundary
    // surfaces the lms position as a bit-inverted entry
    ws.refresh(text, sa);
    ws.make_buckets(sa, true);
    let mut c1 = 0;
    let mut b = ws.bucket(sa, 0) as usize;
    for i in (0..n).rev() {
        let v = sa[i];
        if v > 0 {
            let mut j = v as usize;
            debug_assert!(text[j] <= text[j + 1]);
            let c0 = text[j].index();
            if c0 != c1 {
                ws.set_bucket(sa, c1, b as i32);
                c1 = c0;
                b = ws.bucket(sa, c1) as usize;
            }
            debug_assert!(b <= i);
            j -= 1;
            b -= 1;
            sa[b] = if text[j].index() > c1 {
                !(j as i32 + 1)
            } else {
                j as i32
            };
            sa[i] = 0;
        }
    }
}

/// Variant of the lms-substring sort that threads a tie-break generation
/// through the entries. The first member of every (bucket character,
/// next-type) class seen in a sweep is shifted by `+n`; the naming pass
/// can then recover substring equality without re-reading `text`.
pub fn sort_lms_substrings_marked<T: SaisChar>(
    text: &[T],
    sa: &mut [i32],
    ws: &mut Workspace,
    marks: &mut MarkTable,
) {
    let n = text.len();
    debug_assert!(n >= 2);
    debug_assert!(!ws.shared());

    // left-to-right sweep over the L-type slots
    ws.make_buckets(sa, false);
    let mut j = n - 1;
    let mut c1 = text[j].index();
    let mut b = ws.bucket(sa, c1) as usize;
    j -= 1;
    let s_next = text[j].index() < c1;
    let seed = (j + n) as i32;
    sa[b] = if s_next { !seed } else { seed };
    b += 1;
    let mut gen = 0;
    for i in 0..n {
        let v = sa[i];
        if v > 0 {
            let mut j = v as usize;
            if j >= n {
                gen += 1;
                j -= n;
            }
            debug_assert!(text[j] >= text[j + 1]);
            let c0 = text[j].index();
            if c0 != c1 {
                ws.set_bucket(sa, c1, b as i32);
                c1 = c0;
                b = ws.bucket(sa, c1) as usize;
            }
            debug_assert!(i < b);
            j -= 1;
            let class = (c0 << 1) | usize::from(text[j].index() < c1);
            let mut w = j as i32;
            if marks.stamp(sa, class, gen) {
                w += n as i32;
            }
            sa[b] = if (class & 1) != 0 { !w } else { w };
            b += 1;
            sa[i] = 0;
        } else if v < 0 {
            sa[i] = !v;
        }
    }

    // move every class flag from the leftmost member of its run to the
    // rightmost, so the right-to-left sweep meets class changes first
    let mut i = n;
    while i > 0 {
        i -= 1;
        let v = sa[i];
        if v > 0 && v < n as i32 {
            sa[i] = v + n as i32;
            let mut j = i - 1;
            while sa[j] < n as i32 {
                j -= 1;
            }
            sa[j] -= n as i32;
            i = j;
        }
    }

    // right-to-left sweep over the S-type slots
    ws.make_buckets(sa, true);
    gen += 1;
    let mut c1 = 0;
    let mut b = ws.bucket(sa, 0) as usize;
    for i in (0..n).rev() {
        let v = sa[i];
        if v > 0 {
            let mut j = v as usize;
            if j >= n {
                gen += 1;
                j -= n;
            }
            debug_assert!(text[j] <= text[j + 1]);
            let c0 = text[j].index();
            if c0 != c1 {
                ws.set_bucket(sa, c1, b as i32);
                c1 = c0;
                b = ws.bucket(sa, c1) as usize;
            }
            debug_assert!(b <= i);
            j -= 1;
            let class = (c0 << 1) | usize::from(text[j].index() > c1);
            let mut w = j as i32;
            if marks.stamp(sa, class, gen) {
                w += n as i32;
            }
            b -= 1;
            sa[b] = if (class & 1) != 0 { !(w + 1) } else { w };
            sa[i] = 0;
        }
    }
}

/// Induce the final suffix order from the sorted lms suffixes sitting in
/// their bucket tails: one left-to-right sweep placing L-type suffixes at
/// bucket heads, one right-to-left sweep placing S-type suffixes at
/// bucket tails. Every slot is bit-flipped exactly twice, so the buffer
/// comes out tag-free.
pub fn induce_suffix_array<T: SaisChar>(
    text: &[T],
    sa: &mut [i32],
    ws: &mut Workspace,
) {
    let n = text.len();
    debug_assert!(n >= 1);

    // L-type sweep, seeded with the final suffix
    ws.refresh(text, sa);
    ws.make_buckets(sa, false);
    let j = n - 1;
    let mut c1 = text[j].index();
    let mut b = ws.bucket(sa, c1) as usize;
    sa[b] = if j > 0 && text[j - 1].index() < c1 {
        !(j as i32)
    } else {
        j as i32
    };
    b += 1;
    for i in 0..n {
        let v = sa[i];
        sa[i] = !v;
        if v > 0 {
            let j = v as usize - 1;
            debug_assert!(text[j] >= text[j + 1]);
            let c0 = text[j].index();
            if c0 != c1 {
                ws.set_bucket(sa, c1, b as i32);
                c1 = c0;
                b = ws.bucket(sa, c1) as usize;
            }
            debug_assert!(i < b);
            sa[b] = if j > 0 && text[j - 1].index() < c0 {
                !(j as i32)
            } else {
                j as i32
            };
            b += 1;
        }
    }

    // S-type sweep
    ws.refresh(text, sa);
    ws.make_buckets(sa, true);
    let mut c1 = 0;
    let mut b = ws.bucket(sa, 0) as usize;
    for i in (0..n).rev() {
        let v = sa[i];
        if v > 0 {
            let j = v as usize - 1;
            debug_assert!(text[j] <= text[j + 1]);
            let c0 = text[j].index();
            if c0 != c1 {
                ws.set_bucket(sa, c1, b as i32);
                c1 = c0;
                b = ws.bucket(sa, c1) as usize;
            }
            debug_assert!(b <= i);
            b -= 1;
            sa[b] = if j == 0 || text[j - 1].index() > c0 {
                !(j as i32)
            } else {
                j as i32
            };
        } else {
            sa[i] = !v;
        }
    }
}
