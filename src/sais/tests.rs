use super::{compute_sa, SaisChar};
use rand::random;

/// The simplest but time costing way to calculate a suffix array.
fn naive_sa<T: SaisChar>(text: &[T]) -> Vec<i32> {
    let mut sa: Vec<i32> = (0..text.len() as i32).collect();
    sa.sort_by(|&i, &j| Ord::cmp(&text[i as usize..], &text[j as usize..]));
    sa
}

/// Run the induced sort with `slack` spare slots behind the output.
fn sais_with_slack<T: SaisChar>(text: &[T], k: usize, slack: usize) -> Vec<i32> {
    let mut sa = vec![0; text.len() + slack];
    compute_sa(text, &mut sa[..], k).unwrap();
    sa.truncate(text.len());
    sa
}

macro_rules! assert_sais_equals_naive {
    ($s:expr, $k:expr) => {{
        let s = &($s)[..];
        let k = $k;
        let expected = naive_sa(s);
        for &slack in &[0, 1, s.len(), 2 * s.len()] {
            assert_eq!(
                sais_with_slack(s, k, slack),
                expected,
                "length {} alphabet {} slack {}",
                s.len(),
                k,
                slack
            );
        }
    }};
}

#[test]
fn sais_known_suffix_arrays() {
    assert_eq!(sais_with_slack(&[2i32], 3, 0), vec![0]);
    assert_eq!(sais_with_slack(&[1u8, 0], 2, 0), vec![1, 0]);

    // banana
    let banana = [1u8, 0, 2, 0, 2, 0];
    assert_eq!(sais_with_slack(&banana, 3, 0), vec![5, 3, 1, 0, 4, 2]);

    // mississippi over {i, m, p, s}
    let mississippi = [1u8, 0, 3, 3, 0, 3, 3, 0, 2, 2, 0];
    let expected = vec![10, 7, 4, 1, 0, 9, 8, 6, 3, 5, 2];
    for &slack in &[0, 11, 22] {
        assert_eq!(sais_with_slack(&mississippi, 4, slack), expected);
    }

    // degenerate runs
    assert_eq!(sais_with_slack(&[0u8; 5], 1, 0), vec![4, 3, 2, 1, 0]);
    assert_eq!(
        sais_with_slack(&[0u8, 1, 2, 3, 4, 5, 6, 7], 8, 0),
        vec![0, 1, 2, 3, 4, 5, 6, 7]
    );
}

#[test]
fn sais_basic_correctness() {
    assert_sais_equals_naive!(b"\0", 256);
    assert_sais_equals_naive!(b"\xff", 256);
    assert_sais_equals_naive!(b"ba", 256);
    assert_sais_equals_naive!(b"ab", 256);
    assert_sais_equals_naive!(b"bab", 256);
    assert_sais_equals_naive!(b"xxxxxxxx", 256);
    assert_sais_equals_naive!(b"xxxxoooo", 256);
    assert_sais_equals_naive!(b"baaccaaccaba", 256);
    assert_sais_equals_naive!(b"mmississiippii", 256);
    assert_sais_equals_naive!(b"abracadabra0AbRa4Cad14abra", 256);
}

#[test]
fn sais_empty_input_is_a_no_op() {
    let text: [u8; 0] = [];
    let mut sa = [7, 7, 7];
    compute_sa(&text, &mut sa[..], 1).unwrap();
    assert_eq!(sa, [7, 7, 7]);
}

#[test]
fn sais_highly_repetitive_inputs() {
    // fibonacci string: maximal lms density, forces deep recursion
    let mut fib: Vec<u8> = b"ab".to_vec();
    let mut prev: Vec<u8> = b"a".to_vec();
    while fib.len() < 1200 {
        let next = [&fib[..], &prev[..]].concat();
        prev = fib;
        fib = next;
    }
    assert_sais_equals_naive!(&fib[..], 256);

    // square-free-ish ternary repetition
    let thue: Vec<u8> = (0..900u32).map(|i| (i.count_ones() % 3) as u8).collect();
    assert_sais_equals_naive!(&thue[..], 3);
}

#[test]
fn sais_random_bytes() {
    const SAMPLES: usize = 300;
    const MIN_LEN: usize = 1;
    const MAX_LEN: usize = 600;

    for _ in 0..SAMPLES {
        let mut scale = 2u8;
        if random::<bool>() {
            scale += random::<u8>() % 4;
        } else {
            scale += 128 + random::<u8>() % 32;
        }

        let n = MIN_LEN + random::<usize>() % (MAX_LEN - MIN_LEN);
        let text: Vec<u8> = (0..n).map(|_| random::<u8>() % scale).collect();
        assert_sais_equals_naive!(&text[..], 256);
    }
}

#[test]
fn sais_wide_alphabets() {
    const SAMPLES: usize = 40;

    for _ in 0..SAMPLES {
        let n = 50 + random::<usize>() % 500;
        for &k in &[70usize, 257, 300, 1025, 5000] {
            let text: Vec<i32> = (0..n).map(|_| (random::<u32>() as usize % k) as i32).collect();
            let expected = naive_sa(&text);
            // slack choices drive every workspace regime: both arrays in
            // the tail, heap histogram, heap buckets, and the aliased
            // fallbacks
            for &slack in &[0, k / 2, k, k + k / 2, 2 * k, 4 * k] {
                assert_eq!(sais_with_slack(&text, k, slack), expected);
            }
        }
    }
}

#[test]
fn sais_is_invariant_under_monotone_remap() {
    const SAMPLES: usize = 50;

    for _ in 0..SAMPLES {
        let n = 10 + random::<usize>() % 400;
        let text: Vec<u8> = (0..n).map(|_| random::<u8>() % 5).collect();
        // a strictly increasing gap per symbol keeps the order
        let remapped: Vec<i32> = text.iter().map(|&c| c as i32 * 37 + 11).collect();

        assert_eq!(
            sais_with_slack(&text, 5, n),
            sais_with_slack(&remapped, 5 * 37 + 12, n)
        );
    }
}

#[test]
fn sais_output_is_independent_of_slack() {
    let text: Vec<u8> = (0..2000).map(|_| random::<u8>() % 3).collect();
    let baseline = sais_with_slack(&text, 256, 0);
    for &slack in &[1, 17, 256, 512, 1024, 2000, 4000] {
        assert_eq!(sais_with_slack(&text, 256, slack), baseline);
    }
}
