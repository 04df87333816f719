#![allow(dead_code)]

use criterion::Criterion;
use rand::distributions::Uniform;
use rand::{thread_rng, Rng};

/// (name, largest symbol, length) of the generated sample corpora:
/// quaternary data models dna-like input, txt ascii-like input, bin
/// arbitrary binary input.
pub static RANDOM_DATA_STATS: &[(&str, u8, usize)] = &[
    ("qua-4k", 3, 4096),
    ("txt-4k", 126, 4096),
    ("bin-4k", 255, 4096),
    ("qua-256k", 3, 262144),
    ("txt-256k", 126, 262144),
    ("bin-256k", 255, 262144),
    ("qua-4m", 3, 4194304),
    ("txt-4m", 126, 4194304),
    ("bin-4m", 255, 4194304),
];

pub fn gen_data(max_symbol: u8, len: usize) -> Vec<u8> {
    let mut rng = thread_rng();
    let dist = Uniform::new_inclusive(0u8, max_symbol);
    (0..len).map(|_| rng.sample(dist)).collect()
}

pub fn gen_patterns(data: &[u8], count: usize, len: usize) -> Vec<Vec<u8>> {
    let mut rng = thread_rng();
    let starts = Uniform::new(0, data.len().saturating_sub(len).max(1));
    (0..count)
        .map(|_| {
            let s = rng.sample(starts);
            data[s..data.len().min(s + len)].to_vec()
        })
        .collect()
}

pub fn calc_samples(len: usize) -> usize {
    if len <= 4096 {
        100
    } else if len <= 1024 * 1024 {
        20
    } else {
        10
    }
}

pub fn set_criterion_samples(crit: &mut Criterion, samples: usize) {
    let configured = std::mem::replace(crit, Criterion::default());
    *crit = configured.sample_size(samples);
}
