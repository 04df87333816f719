//! Compaction and naming of the sorted lms substrings.
//!
//! Both passes gather the bit-inverted entries left behind by an lms sort
//! into `sa[..m]` and assign every substring a lexicographic name such
//! that equal names mean equal substrings. The name table lives in
//! `sa[m..m + n/2]`, indexed by half the lms position; lms positions are
//! at least two apart, so the slot is unique.

use super::utils::{for_each_lms, SaisChar};

/// Name the substrings of the plain sort by comparing each one against
/// its sorted predecessor, using substring lengths recovered by a second
/// right-to-left scan. Returns the number of distinct names.
pub fn name_substrings<T: SaisChar>(text: &[T], sa: &mut [i32], m: usize) -> i32 {
    let n = text.len();
    debug_assert!(n > 0 && m > 1);

    // gather the leading run of inverted entries in place, then pull the
    // scattered rest down, zeroing their old slots
    let mut i = 0;
    while sa[i] < 0 {
        sa[i] = !sa[i];
        i += 1;
        debug_assert!(i < n);
    }
    if i < m {
        let mut w = i;
        loop {
            i += 1;
            debug_assert!(i < n);
            let v = sa[i];
            if v < 0 {
                sa[w] = !v;
                w += 1;
                sa[i] = 0;
                if w == m {
                    break;
                }
            }
        }
    }

    // store the inclusive length of every lms substring at `m + p/2`
    let mut prev = n - 1;
    for_each_lms(text, |p| {
        sa[m + (p >> 1)] = (prev - p + 1) as i32;
        prev = p;
    });

    // substrings are equal iff their lengths match, they compare equal
    // character-wise, and the predecessor does not touch the end of the
    // text (a substring running to the end precedes every extension)
    let mut name = 0;
    let mut q = n;
    let mut qlen = 0;
    for i in 0..m {
        let p = sa[i] as usize;
        let plen = sa[m + (p >> 1)] as usize;
        let mut diff = true;
        if plen == qlen && q + plen < n {
            let mut x = 0;
            while x < plen && text[p + x] == text[q + x] {
                x += 1;
            }
            if x == plen {
                diff = false;
            }
        }
        if diff {
            name += 1;
            q = p;
            qlen = plen;
        }
        sa[m + (p >> 1)] = name;
    }

    name
}

/// Name the substrings of the marked sort from the `+n` class flags
/// alone: a flag closes an equivalence class, so the name count is the
/// flag count. The name table is written only when names collide;
/// otherwise the flags are simply stripped and `sa[..m]` is final.
pub fn name_marked_substrings(sa: &mut [i32], n: usize, m: usize) -> i32 {
    debug_assert!(n > 0 && m > 1);
    let limit = n as i32;

    let mut name = 0;
    let mut i = 0;
    while sa[i] < 0 {
        let v = !sa[i];
        if v >= limit {
            name += 1;
        }
        sa[i] = v;
        i += 1;
        debug_assert!(i < n);
    }
    if i < m {
        let mut w = i;
        loop {
            i += 1;
            debug_assert!(i < n);
            let v = sa[i];
            if v < 0 {
                let v = !v;
                if v >= limit {
                    name += 1;
                }
                sa[w] = v;
                w += 1;
                sa[i] = 0;
                if w == m {
                    break;
                }
            }
        }
    }

    if name < m as i32 {
        // walk the sorted entries backwards; every flag steps down to the
        // previous name
        let mut d = name + 1;
        for i in (0..m).rev() {
            let mut v = sa[i];
            if v >= limit {
                v -= limit;
                d -= 1;
            }
            sa[m + (v as usize >> 1)] = d;
        }
    } else {
        for v in sa[..m].iter_mut() {
            if *v >= limit {
                *v -= limit;
            }
        }
    }

    name
}
