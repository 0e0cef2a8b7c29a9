//! Key length estimation for repeating-key XOR.
//!
//! Two adjacent blocks of ciphertext that were enciphered with the same run
//! of key bytes differ, bit for bit, only as much as the plaintexts under
//! them do. English against english is much closer than the near random
//! spread produced by a misaligned key, so the normalized Hamming distance
//! between neighbouring blocks dips at the true key length and its
//! multiples.

use rayon::prelude::*;
use tracing::debug;

use crate::error::{Error, Result};
use crate::util::{hamming_distance, round_to};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeySizeCandidate {
    pub key_size: usize,
    pub num_samples: usize,
    /// Differing bits per byte per sample. Lower is more probable.
    pub avg_score: f64,
}

/// Bounds for [`find_probable_key_sizes`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeySizeSearch {
    pub min_key_size: usize,
    pub max_key_size: usize,
    pub num_samples: usize,
    pub top_count: usize,
}

impl Default for KeySizeSearch {
    fn default() -> KeySizeSearch {
        KeySizeSearch {
            min_key_size: 1,
            max_key_size: 40,
            num_samples: 6,
            top_count: 3,
        }
    }
}

impl KeySizeSearch {
    pub fn min_key_size(mut self, n: usize) -> KeySizeSearch {
        self.min_key_size = n;
        self
    }

    pub fn max_key_size(mut self, n: usize) -> KeySizeSearch {
        self.max_key_size = n;
        self
    }

    pub fn num_samples(mut self, n: usize) -> KeySizeSearch {
        self.num_samples = n;
        self
    }

    pub fn top_count(mut self, n: usize) -> KeySizeSearch {
        self.top_count = n;
        self
    }

    /// Shortest ciphertext that can be sampled at `max_key_size`, or `None`
    /// if that length does not fit in a `usize`.
    pub fn min_cipher_len(&self) -> Option<usize> {
        self.num_samples
            .checked_add(1)
            .and_then(|n| n.checked_mul(self.max_key_size))
    }

    fn validate(&self, cipher_len: usize) -> Result<()> {
        if self.num_samples < 1 {
            return Err(Error::InvalidArgument(
                "number of samples must be one or greater".to_string()));
        }
        if self.min_key_size < 1 {
            return Err(Error::InvalidArgument(
                "minimum key size must be one or greater".to_string()));
        }
        if self.min_key_size > self.max_key_size {
            return Err(Error::InvalidArgument(format!(
                "minimum key size {} exceeds maximum key size {}",
                self.min_key_size, self.max_key_size)));
        }
        let required = self.min_cipher_len().ok_or_else(|| {
            Error::InvalidArgument(format!(
                "{} samples at key size {} need more cipher bytes than can be addressed",
                self.num_samples, self.max_key_size))
        })?;
        if cipher_len < required {
            return Err(Error::InvalidArgument(format!(
                "cipher bytes must be at least {} bytes to accommodate {} samples (got {})",
                required, self.num_samples, cipher_len)));
        }
        Ok(())
    }
}

/// Rank every key size in `search.min_key_size..=search.max_key_size` and
/// return the `search.top_count` lowest scores, best first.
///
/// Sample `i` for key size `k` compares `cipher[i*k..(i+1)*k]` with the block
/// right after it. Equal scores keep ascending key size order.
pub fn find_probable_key_sizes(cipher: &[u8], search: &KeySizeSearch) -> Result<Vec<KeySizeCandidate>> {
    search.validate(cipher.len())?;

    let num_samples = search.num_samples;
    let mut scores = (search.min_key_size..=search.max_key_size)
        .into_par_iter()
        .map(|k| score_key_size(cipher, k, num_samples))
        .collect::<Result<Vec<KeySizeCandidate>>>()?;

    scores.sort_by(|a, b| a.avg_score.total_cmp(&b.avg_score));
    scores.truncate(search.top_count);

    debug!(
        candidates = ?scores.iter().map(|c| c.key_size).collect::<Vec<_>>(),
        "probable key sizes"
    );
    Ok(scores)
}

fn score_key_size(cipher: &[u8], k: usize, num_samples: usize) -> Result<KeySizeCandidate> {
    let mut total = 0_u64;
    for i in 0..num_samples {
        let start = i * k;
        let dist = hamming_distance(&cipher[start..start + k], &cipher[start + k..start + 2 * k])?;
        total += u64::from(dist);
    }
    Ok(KeySizeCandidate {
        key_size: k,
        num_samples,
        avg_score: round_to(total as f64 / (k * num_samples) as f64, 5),
    })
}

#[cfg(test)]
use crate::util::xor_bytes;

#[test]
fn test_validation() {
    let cipher = vec![0x41_u8; 100];

    let zero_samples = KeySizeSearch::default().max_key_size(10).num_samples(0);
    match find_probable_key_sizes(&cipher, &zero_samples) {
        Err(Error::InvalidArgument(_)) => (),
        other => panic!("unexpected {:?}", other),
    }

    // (6 + 1) * 40 = 280 > 100
    match find_probable_key_sizes(&cipher, &KeySizeSearch::default()) {
        Err(Error::InvalidArgument(msg)) => assert!(msg.contains("280"), "{}", msg),
        other => panic!("unexpected {:?}", other),
    }

    let just_enough = KeySizeSearch::default().max_key_size(10).num_samples(9);
    assert_eq!(Some(100), just_enough.min_cipher_len());
    assert!(find_probable_key_sizes(&cipher, &just_enough).is_ok());
    assert!(find_probable_key_sizes(&cipher[..99], &just_enough).is_err());

    assert!(find_probable_key_sizes(&cipher, &KeySizeSearch::default().min_key_size(0).max_key_size(5)).is_err());

    // sizes whose required cipher length overflows are rejected up front
    let huge_samples = KeySizeSearch::default().max_key_size(10).num_samples(usize::MAX);
    assert_eq!(None, huge_samples.min_cipher_len());
    match find_probable_key_sizes(&cipher, &huge_samples) {
        Err(Error::InvalidArgument(_)) => (),
        other => panic!("unexpected {:?}", other),
    }
    let huge_key = KeySizeSearch::default().max_key_size(usize::MAX);
    assert_eq!(None, huge_key.min_cipher_len());
    match find_probable_key_sizes(&cipher, &huge_key) {
        Err(Error::InvalidArgument(_)) => (),
        other => panic!("unexpected {:?}", other),
    }
    let wide_key = KeySizeSearch::default().max_key_size(usize::MAX / 8).num_samples(1);
    match find_probable_key_sizes(&cipher, &wide_key) {
        Err(Error::InvalidArgument(_)) => (),
        other => panic!("unexpected {:?}", other),
    }
    assert!(find_probable_key_sizes(&cipher, &KeySizeSearch::default().min_key_size(6).max_key_size(5)).is_err());
}

#[test]
fn test_scores() {
    // alternating 0x00/0xff: every odd key size compares inverted blocks
    let cipher = (0..64).map(|i| if i % 2 == 0 { 0x00 } else { 0xff }).collect::<Vec<u8>>();
    let search = KeySizeSearch::default().max_key_size(4).num_samples(2).top_count(4);
    let scores = find_probable_key_sizes(&cipher, &search).unwrap();
    assert_eq!(vec![2, 4, 1, 3], scores.iter().map(|c| c.key_size).collect::<Vec<_>>());
    assert_eq!(0.0, scores[0].avg_score);
    assert_eq!(0.0, scores[1].avg_score);
    assert_eq!(8.0, scores[2].avg_score);
    assert_eq!(8.0, scores[3].avg_score);
    assert!(scores.iter().all(|c| c.num_samples == 2));
}

#[test]
fn test_top_count() {
    let cipher = xor_bytes(&[b'x'; 120], b"key");
    let search = KeySizeSearch::default().max_key_size(10).num_samples(5).top_count(2);
    let scores = find_probable_key_sizes(&cipher, &search).unwrap();
    assert_eq!(2, scores.len());
    assert!(scores[0].avg_score <= scores[1].avg_score);

    let none = find_probable_key_sizes(&cipher, &search.top_count(0)).unwrap();
    assert!(none.is_empty());

    let all = find_probable_key_sizes(&cipher, &search.top_count(100)).unwrap();
    assert_eq!(10, all.len());
}

#[test]
fn test_repeated_plaintext() {
    // constant plaintext makes the key period exact
    let cipher = xor_bytes(&[b'x'; 200], b"SECRET!");
    let search = KeySizeSearch::default().max_key_size(20).num_samples(4);
    let scores = find_probable_key_sizes(&cipher, &search).unwrap();
    assert_eq!(7, scores[0].key_size);
    assert_eq!(14, scores[1].key_size);
    assert_eq!(0.0, scores[0].avg_score);
}
