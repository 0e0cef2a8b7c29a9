//! Caesar shift over ascii letters. Case is kept and anything that is not a
//! letter passes through untouched.

use crate::error::{Error, Result};
use crate::freq::{FreqTable, FrequencyProfile};
use crate::xor::{rank, ByteKeyCandidate};

pub const NUM_ALPHA: u8 = 26;

/// Rotate a letter forward by `shift` places, wrapping within its case.
pub fn shift_byte(b: u8, shift: u8) -> u8 {
    let shift = shift % NUM_ALPHA;
    match b {
        b'A'..=b'Z' => (b - b'A' + shift) % NUM_ALPHA + b'A',
        b'a'..=b'z' => (b - b'a' + shift) % NUM_ALPHA + b'a',
        _ => b,
    }
}

pub fn unshift_byte(b: u8, shift: u8) -> u8 {
    shift_byte(b, NUM_ALPHA - shift % NUM_ALPHA)
}

fn check_shift(shift: u8) -> Result<()> {
    if shift >= NUM_ALPHA {
        return Err(Error::InvalidArgument(format!(
            "shift must be between 0 and {}", NUM_ALPHA - 1)));
    }
    Ok(())
}

pub fn encrypt(plain: &[u8], shift: u8) -> Result<Vec<u8>> {
    check_shift(shift)?;
    Ok(plain.iter().map(|&b| shift_byte(b, shift)).collect())
}

pub fn decrypt(cipher: &[u8], shift: u8) -> Result<Vec<u8>> {
    check_shift(shift)?;
    Ok(cipher.iter().map(|&b| unshift_byte(b, shift)).collect())
}

/// Try all 26 shifts against `block`, scoring the unshifted letters, and
/// return the `top_count` most english, best first. The candidate's `key`
/// is the shift that was used to encrypt.
pub fn brute_force_shift(block: &[u8], id: usize, top_count: usize) -> Vec<ByteKeyCandidate> {
    let candidates = (0..NUM_ALPHA)
        .map(|shift| {
            let plain = block.iter().map(|&b| unshift_byte(b, shift)).collect::<Vec<u8>>();
            ByteKeyCandidate {
                id,
                key: shift,
                profile: FrequencyProfile::new(&plain, FreqTable::AlphaOnly),
            }
        })
        .collect();
    rank(candidates, top_count)
}

#[cfg(test)]
const THE_QBF: &[u8] = b"THE QUICK BROWN FOX JUMPS OVER THE LAZY DOG";

#[test]
fn test_shift_byte() {
    assert_eq!(b'B', shift_byte(b'A', 1));
    assert_eq!(b'a', shift_byte(b'z', 1));
    assert_eq!(b'C', shift_byte(b'Z', 29));
    assert_eq!(b' ', shift_byte(b' ', 5));
    assert_eq!(b'{', shift_byte(b'{', 5));
    assert_eq!(0xe1, shift_byte(0xe1, 5));
    for b in 0..=255_u8 {
        for shift in 0..NUM_ALPHA {
            assert_eq!(b, unshift_byte(shift_byte(b, shift), shift));
        }
    }
}

#[test]
fn test_encrypt() {
    assert_eq!(b"BCD", &encrypt(b"ABC", 1).unwrap()[..]);
    assert_eq!(b"bcd", &encrypt(b"abc", 1).unwrap()[..]);
    assert_eq!(b"YZA", &encrypt(b"XYZ", 1).unwrap()[..]);
    assert_eq!(b"yza", &encrypt(b"xyz", 1).unwrap()[..]);
    assert_eq!(b"QEB NRFZH YOLTK CLU GRJMP LSBO QEB IXWV ALD", &encrypt(THE_QBF, 23).unwrap()[..]);
    assert_eq!(THE_QBF, &encrypt(THE_QBF, 0).unwrap()[..]);
}

#[test]
fn test_decrypt() {
    assert_eq!(b"ABC", &decrypt(b"BCD", 1).unwrap()[..]);
    assert_eq!(b"abc", &decrypt(b"bcd", 1).unwrap()[..]);
    assert_eq!(THE_QBF, &decrypt(b"QEB NRFZH YOLTK CLU GRJMP LSBO QEB IXWV ALD", 23).unwrap()[..]);
}

#[test]
fn test_shift_too_high() {
    match encrypt(b"test", 26) {
        Err(Error::InvalidArgument(_)) => (),
        other => panic!("unexpected {:?}", other),
    }
    assert!(decrypt(b"test", 200).is_err());
}

#[test]
fn test_brute_force_shift() {
    let plain = b"the keeper wiped the great lens until it shone and trimmed the wick";
    for &shift in &[0_u8, 3, 13, 25] {
        let cipher = encrypt(plain, shift).unwrap();
        let tops = brute_force_shift(&cipher, 5, 2);
        assert_eq!(2, tops.len());
        assert_eq!(shift, tops[0].key);
        assert_eq!(&plain[..], tops[0].profile.bytes());
        assert_eq!(5, tops[0].id);
    }
}
