//! Breaking single-byte and repeating-key XOR by frequency analysis.

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::freq::{FreqTable, FrequencyProfile};
use crate::keysize::{find_probable_key_sizes, KeySizeSearch};
use crate::util::{extract_stride, shortest_period, xor_byte, xor_bytes};

/// One guess at a single key byte, together with the profile of the text it
/// decrypts to.
#[derive(Clone, Debug)]
pub struct ByteKeyCandidate {
    /// Caller supplied tag, carried through untouched.
    pub id: usize,
    pub key: u8,
    pub profile: FrequencyProfile,
}

impl ByteKeyCandidate {
    pub fn statistical_difference(&self) -> f64 {
        self.profile.statistical_difference()
    }
}

/// Try all 256 single-byte keys against `block` and return the `top_count`
/// whose output looks most like english (letters and spaces), best first.
/// Equal scores keep ascending key order.
pub fn brute_force_single_byte_xor(block: &[u8], id: usize, top_count: usize) -> Vec<ByteKeyCandidate> {
    let candidates = (0..256)
        .map(|k| {
            let key = k as u8;
            ByteKeyCandidate {
                id,
                key,
                profile: FrequencyProfile::new(&xor_byte(block, key), FreqTable::AlphaAndSpace),
            }
        })
        .collect();
    rank(candidates, top_count)
}

pub(crate) fn rank(mut candidates: Vec<ByteKeyCandidate>, top_count: usize) -> Vec<ByteKeyCandidate> {
    candidates.sort_by(|a, b| a.statistical_difference().total_cmp(&b.statistical_difference()));
    candidates.truncate(top_count);
    candidates
}

/// Assemble the most likely key of length `key_size` one column at a time.
pub fn probe_key(cipher: &[u8], id: usize, key_size: usize) -> Result<Vec<u8>> {
    if key_size == 0 {
        return Err(Error::InvalidArgument("key size must be greater than zero".to_string()));
    }
    if key_size > cipher.len() {
        return Err(Error::InvalidArgument(format!(
            "key size {} is longer than the {} cipher bytes", key_size, cipher.len())));
    }

    let key = (0..key_size)
        .into_par_iter()
        .map(|offset| -> Result<u8> {
            let column = extract_stride(cipher, offset, key_size)?;
            let best = brute_force_single_byte_xor(&column, id, 2)
                .into_iter()
                .next()
                .map_or(0, |c| c.key);
            trace!(id, offset, key = best, "column key");
            Ok(best)
        })
        .collect::<Result<Vec<u8>>>()?;

    debug!(id, key_size, "probed key");
    Ok(key)
}

/// A repeating XOR key recovered from ciphertext alone.
#[derive(Clone, Debug, PartialEq)]
pub struct Recovered {
    pub key: Vec<u8>,
    pub plaintext: Vec<u8>,
    pub statistical_difference: f64,
}

/// Estimate the key size, probe a key for each candidate and keep the one
/// that decrypts to the most english looking plaintext.
///
/// Probing a multiple of the true key size yields the true key repeated, so
/// each probed key is cut down to its shortest period before scoring. Ties
/// go to the shorter key, then to the better ranked key size.
pub fn crack_repeating_key_xor(cipher: &[u8], search: &KeySizeSearch) -> Result<Recovered> {
    let sizes = find_probable_key_sizes(cipher, search)?;

    let mut best: Option<Recovered> = None;
    for (rank, candidate) in sizes.iter().enumerate() {
        let probed = probe_key(cipher, rank, candidate.key_size)?;
        let key = shortest_period(&probed).to_vec();
        let plaintext = xor_bytes(cipher, &key);
        let score = FrequencyProfile::new(&plaintext, FreqTable::AlphaAndSpace).statistical_difference();
        debug!(key_size = candidate.key_size, period = key.len(), score, "cracked candidate");

        let better = match best {
            None => true,
            Some(ref b) => {
                score < b.statistical_difference
                    || (score == b.statistical_difference && key.len() < b.key.len())
            }
        };
        if better {
            best = Some(Recovered { key, plaintext, statistical_difference: score });
        }
    }

    best.ok_or_else(|| Error::InvalidArgument("no key sizes to try (top count is zero)".to_string()))
}

#[test]
fn test_brute_force_cooking() {
    let plain = b"Cooking MC's like a pound of bacon";
    let cipher = xor_byte(plain, b'X');
    let tops = brute_force_single_byte_xor(&cipher, 7, 3);
    assert_eq!(3, tops.len());
    assert_eq!(b'X', tops[0].key);
    assert!(tops.iter().all(|c| c.id == 7));
    assert_eq!(&plain[..], tops[0].profile.bytes());
    assert!(tops[0].statistical_difference() <= tops[1].statistical_difference());
    assert!(tops[1].statistical_difference() <= tops[2].statistical_difference());
}

#[test]
fn test_brute_force_in_top_two() {
    let fragments: &[(&[u8], u8)] = &[
        (b"The quick brown fox jumps over the lazy dog", 0x2a),
        (b"When the flame caught, the beam swept out across the water", 0x7f),
        (b"When the flame caught, the beam swept out across the water", 0x20),
        (b"the fishermen in the village said that they could set their clocks by him", 0xc3),
    ];
    for &(plain, k) in fragments {
        let tops = brute_force_single_byte_xor(&xor_byte(plain, k), 0, 2);
        assert!(tops.iter().any(|c| c.key == k), "{:?}", String::from_utf8_lossy(plain));
    }
}

#[test]
fn test_brute_force_ties_keep_key_order() {
    // every key turns an empty block into the same empty profile
    let tops = brute_force_single_byte_xor(&[], 0, 256);
    assert_eq!(256, tops.len());
    for (i, c) in tops.iter().enumerate() {
        assert_eq!(i as u8, c.key);
    }
}

#[test]
fn test_probe_key_validation() {
    assert!(probe_key(b"abc", 0, 0).is_err());
    assert!(probe_key(b"abc", 0, 4).is_err());
    assert_eq!(3, probe_key(b"abc", 0, 3).unwrap().len());
}

#[test]
fn test_probe_key_deterministic() {
    let plain = b"a lighthouse keeper climbed the narrow stairs every evening before the sun went down";
    let cipher = xor_bytes(plain, b"fog");
    let a = probe_key(&cipher, 1, 3).unwrap();
    let b = probe_key(&cipher, 2, 3).unwrap();
    assert_eq!(a, b);
    assert_eq!(3, a.len());
}

#[test]
fn test_crack_zero_top_count() {
    let cipher = xor_bytes(&[b'x'; 100], b"k");
    let search = KeySizeSearch::default().max_key_size(4).top_count(0);
    assert!(crack_repeating_key_xor(&cipher, &search).is_err());
}
