//! Placement of the per-level scratch arrays.
//!
//! Every recursion level needs a symbol histogram `C[0..k]` and a bucket
//! cursor array `B[0..k]`; the marked lms sort additionally needs `2k`
//! tie-break slots. Each of these lives either on the heap or inside the
//! free tail of the output buffer, and `B` may alias `C` outright when
//! the tail is too small for both. The aliasing discipline (re-count
//! after every bucket build) is owned by this module; callers only see
//! `refresh` and `make_buckets`.

use super::utils::{alloc_ints, SaisChar};
use super::Error;

/// Alphabets up to this size get their histogram from the heap when the
/// tail cannot hold both scratch arrays; the allocation is negligible.
const SMALL_ALPHABET: usize = 256;

/// Where one scratch array lives.
enum Storage {
    Heap(Vec<i32>),
    /// Offset of the first slot inside the output buffer.
    Tail(usize),
}

impl Storage {
    #[inline]
    fn get(&self, sa: &[i32], i: usize) -> i32 {
        match self {
            Storage::Heap(v) => v[i],
            Storage::Tail(off) => sa[off + i],
        }
    }

    #[inline]
    fn at<'a>(&'a mut self, sa: &'a mut [i32], i: usize) -> &'a mut i32 {
        match self {
            Storage::Heap(v) => &mut v[i],
            Storage::Tail(off) => &mut sa[*off + i],
        }
    }
}

/// Placement chosen for the tie-break array of the marked lms sort.
pub enum MarkPlan {
    Tail(usize),
    Heap,
}

/// The tie-break class array `D[0..2k]` of the marked lms sort.
pub struct MarkTable {
    store: Storage,
    len: usize,
}

impl MarkTable {
    /// Acquire and zero the class array.
    pub fn new(plan: MarkPlan, k: usize, sa: &mut [i32]) -> Result<MarkTable, Error> {
        let len = 2 * k;
        let store = match plan {
            MarkPlan::Heap => Storage::Heap(alloc_ints(len)?),
            MarkPlan::Tail(off) => {
                for slot in sa[off..off + len].iter_mut() {
                    *slot = 0;
                }
                Storage::Tail(off)
            }
        };
        Ok(MarkTable { store, len })
    }

    /// Record that `class` was seen in generation `gen`. Returns true the
    /// first time per generation, i.e. when the entry must carry a flag.
    #[inline]
    pub fn stamp(&mut self, sa: &mut [i32], class: usize, gen: i32) -> bool {
        debug_assert!(class < self.len);
        let slot = self.store.at(sa, class);
        if *slot != gen {
            *slot = gen;
            true
        } else {
            false
        }
    }
}

/// Scratch placement for one recursion level.
pub struct Workspace {
    k: usize,
    counts: Storage,
    /// `None` means the bucket array aliases the histogram.
    buckets: Option<Storage>,
}

impl Workspace {
    /// Choose the cheapest placement that fits: both arrays in the tail
    /// when the slack allows, heap for small alphabets otherwise, and a
    /// single aliased array as the last resort.
    pub fn new(n: usize, fs: usize, k: usize) -> Result<Workspace, Error> {
        let (counts, buckets) = if 2 * k <= fs {
            (
                Storage::Tail(n + fs - k),
                Some(Storage::Tail(n + fs - 2 * k)),
            )
        } else if k <= SMALL_ALPHABET {
            let counts = Storage::Heap(alloc_ints(k)?);
            let buckets = if k <= fs {
                Storage::Tail(n + fs - k)
            } else {
                Storage::Heap(alloc_ints(k)?)
            };
            (counts, Some(buckets))
        } else if k <= fs {
            let counts = Storage::Tail(n + fs - k);
            if k <= 4 * SMALL_ALPHABET {
                (counts, Some(Storage::Heap(alloc_ints(k)?)))
            } else {
                (counts, None)
            }
        } else {
            (Storage::Heap(alloc_ints(k)?), None)
        };
        Ok(Workspace { k, counts, buckets })
    }

    /// Whether the bucket array aliases the histogram.
    #[inline]
    pub fn shared(&self) -> bool {
        self.buckets.is_none()
    }

    /// Whether the histogram lives in the tail without aliasing; such a
    /// histogram can survive the recursion if the reduced problem keeps
    /// clear of it.
    pub fn counts_in_tail(&self) -> bool {
        matches!(self.counts, Storage::Tail(_)) && self.buckets.is_some()
    }

    /// Rebuild the histogram of `text`.
    pub fn count<T: SaisChar>(&mut self, text: &[T], sa: &mut [i32]) {
        let k = self.k;
        match &mut self.counts {
            Storage::Heap(v) => count_into(text, &mut v[..k]),
            Storage::Tail(off) => {
                let off = *off;
                count_into(text, &mut sa[off..off + k]);
            }
        }
    }

    /// Re-count iff the bucket array aliases the histogram (the previous
    /// bucket build destroyed it).
    pub fn refresh<T: SaisChar>(&mut self, text: &[T], sa: &mut [i32]) {
        if self.shared() {
            self.count(text, sa);
        }
    }

    /// Turn the histogram into bucket cursors: running sums exclusive of
    /// the own count (`ends == false`, bucket starts) or inclusive
    /// (`ends == true`, bucket ends). In the aliased regime this runs in
    /// place, which is sound for a left-to-right prefix sum.
    pub fn make_buckets(&mut self, sa: &mut [i32], ends: bool) {
        let k = self.k;
        match (&mut self.counts, &mut self.buckets) {
            (Storage::Heap(cv), Some(Storage::Heap(bv))) => {
                build_buckets(&cv[..k], &mut bv[..k], ends)
            }
            (Storage::Heap(cv), Some(Storage::Tail(off))) => {
                let off = *off;
                build_buckets(&cv[..k], &mut sa[off..off + k], ends)
            }
            (Storage::Tail(off), Some(Storage::Heap(bv))) => {
                let off = *off;
                build_buckets(&sa[off..off + k], &mut bv[..k], ends)
            }
            (Storage::Tail(coff), Some(Storage::Tail(boff))) => {
                let (coff, boff) = (*coff, *boff);
                debug_assert!(boff + k <= coff);
                let (low, high) = sa.split_at_mut(coff);
                build_buckets(&high[..k], &mut low[boff..boff + k], ends)
            }
            (Storage::Heap(cv), None) => build_buckets_in_place(&mut cv[..k], ends),
            (Storage::Tail(off), None) => {
                let off = *off;
                build_buckets_in_place(&mut sa[off..off + k], ends)
            }
        }
    }

    /// Read one histogram slot.
    #[inline]
    pub fn count_of(&self, sa: &[i32], c: usize) -> i32 {
        self.counts.get(sa, c)
    }

    #[inline]
    fn bucket_storage(&mut self) -> &mut Storage {
        match &mut self.buckets {
            Some(b) => b,
            None => &mut self.counts,
        }
    }

    /// Read the cursor of bucket `c`.
    #[inline]
    pub fn bucket(&self, sa: &[i32], c: usize) -> i32 {
        match &self.buckets {
            Some(b) => b.get(sa, c),
            None => self.counts.get(sa, c),
        }
    }

    /// Overwrite the cursor of bucket `c`.
    #[inline]
    pub fn set_bucket(&mut self, sa: &mut [i32], c: usize, v: i32) {
        *self.bucket_storage().at(sa, c) = v;
    }

    /// Reserve one slot at the shrinking end of bucket `c`, returning its
    /// index.
    #[inline]
    pub fn dec_bucket(&mut self, sa: &mut [i32], c: usize) -> usize {
        let slot = self.bucket_storage().at(sa, c);
        *slot -= 1;
        *slot as usize
    }

    /// Give back the most recent reservation at the end of bucket `c`.
    #[inline]
    pub fn inc_bucket(&mut self, sa: &mut [i32], c: usize) {
        *self.bucket_storage().at(sa, c) += 1;
    }

    /// Decide where the tie-break array of the marked lms sort would
    /// live, or `None` when the current placement cannot host one.
    pub fn plan_marks(&self, fs: usize) -> Option<MarkPlan> {
        let k = self.k;
        match (&self.counts, &self.buckets) {
            // both arrays in the tail: marks go right below the buckets
            (Storage::Tail(_), Some(Storage::Tail(boff))) => {
                if 4 * k <= fs {
                    Some(MarkPlan::Tail(*boff - 2 * k))
                } else {
                    None
                }
            }
            // heap histogram, buckets in the tail
            (Storage::Heap(_), Some(Storage::Tail(boff))) => {
                if 3 * k <= fs {
                    Some(MarkPlan::Tail(*boff - 2 * k))
                } else {
                    Some(MarkPlan::Heap)
                }
            }
            // heap histogram and heap buckets
            (Storage::Heap(_), Some(Storage::Heap(_))) => Some(MarkPlan::Heap),
            // aliased regimes re-count between sweeps, which the marked
            // sort cannot afford; tail histogram with heap buckets keeps
            // the original single-pass behavior
            _ => None,
        }
    }

    /// Drop the heap buffers that will not survive the recursion: the
    /// bucket array is rebuilt afterwards anyway, and an aliased heap
    /// histogram is re-counted. A private heap histogram is kept so its
    /// counts carry over.
    pub fn release_for_recursion(&mut self) {
        if let Some(Storage::Heap(v)) = &mut self.buckets {
            *v = Vec::new();
        }
        if self.buckets.is_none() {
            if let Storage::Heap(v) = &mut self.counts {
                *v = Vec::new();
            }
        }
    }

    /// Re-acquire whatever `release_for_recursion` dropped.
    pub fn reacquire_after_recursion(&mut self) -> Result<(), Error> {
        let k = self.k;
        if self.buckets.is_none() {
            if let Storage::Heap(v) = &mut self.counts {
                if v.is_empty() {
                    *v = alloc_ints(k)?;
                }
            }
        }
        if let Some(Storage::Heap(v)) = &mut self.buckets {
            if v.is_empty() {
                *v = alloc_ints(k)?;
            }
        }
        Ok(())
    }
}

fn count_into<T: SaisChar>(text: &[T], counts: &mut [i32]) {
    for c in counts.iter_mut() {
        *c = 0;
    }
    for ch in text.iter() {
        counts[ch.index()] += 1;
    }
}

fn build_buckets(counts: &[i32], buckets: &mut [i32], ends: bool) {
    let mut sum = 0;
    if ends {
        for (b, &c) in buckets.iter_mut().zip(counts.iter()) {
            sum += c;
            *b = sum;
        }
    } else {
        for (b, &c) in buckets.iter_mut().zip(counts.iter()) {
            let start = sum;
            sum += c;
            *b = start;
        }
    }
}

fn build_buckets_in_place(slots: &mut [i32], ends: bool) {
    let mut sum = 0;
    if ends {
        for s in slots.iter_mut() {
            sum += *s;
            *s = sum;
        }
    } else {
        for s in slots.iter_mut() {
            let start = sum;
            sum += *s;
            *s = start;
        }
    }
}
