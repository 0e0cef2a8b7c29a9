//! Vigenère: a Caesar shift per letter, stepping through the key.
//!
//! Only letters use up key positions; everything else is copied through, so
//! spacing and punctuation survive. The key itself is read case-insensitively
//! with anything but letters dropped (`"Go, Cat"` is the key `GOCAT`).

use rayon::prelude::*;
use tracing::debug;

use crate::caesar::{brute_force_shift, shift_byte, unshift_byte};
use crate::error::{Error, Result};
use crate::util::extract_stride;

fn key_shifts(key: &[u8]) -> Result<Vec<u8>> {
    let shifts = key.iter()
        .filter(|b| b.is_ascii_alphabetic())
        .map(|b| b.to_ascii_uppercase() - b'A')
        .collect::<Vec<u8>>();
    if shifts.is_empty() {
        return Err(Error::InvalidArgument(
            "key has no alphabetic characters".to_string()));
    }
    Ok(shifts)
}

fn apply<F>(text: &[u8], key: &[u8], f: F) -> Result<Vec<u8>>
    where F: Fn(u8, u8) -> u8
{
    let shifts = key_shifts(key)?;
    let mut keystream = shifts.iter().cycle();
    Ok(text.iter()
        .map(|&b| {
            if b.is_ascii_alphabetic() {
                keystream.next().map_or(b, |&s| f(b, s))
            } else {
                b
            }
        })
        .collect())
}

pub fn encrypt(plain: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    apply(plain, key, shift_byte)
}

pub fn decrypt(cipher: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    apply(cipher, key, unshift_byte)
}

/// Recover a `key_size` letter key, returned in upper case.
///
/// Letters are pulled out of the ciphertext first, so column `i` holds every
/// letter that was shifted by key letter `i`; each column is then broken as
/// a plain Caesar shift.
pub fn probe_key(cipher: &[u8], key_size: usize) -> Result<Vec<u8>> {
    let letters = cipher.iter()
        .cloned()
        .filter(u8::is_ascii_alphabetic)
        .collect::<Vec<u8>>();
    if key_size == 0 {
        return Err(Error::InvalidArgument("key size must be greater than zero".to_string()));
    }
    if key_size > letters.len() {
        return Err(Error::InvalidArgument(format!(
            "key size {} is longer than the {} letters of cipher text", key_size, letters.len())));
    }

    let key = (0..key_size)
        .into_par_iter()
        .map(|offset| -> Result<u8> {
            let column = extract_stride(&letters, offset, key_size)?;
            let shift = brute_force_shift(&column, offset, 1)
                .into_iter()
                .next()
                .map_or(0, |c| c.key);
            Ok(b'A' + shift)
        })
        .collect::<Result<Vec<u8>>>()?;

    debug!(key_size, key = %String::from_utf8_lossy(&key), "probed vigenere key");
    Ok(key)
}

#[test]
fn test_wikipedia() {
    let cipher = encrypt(b"ATTACKATDAWN", b"LEMON").unwrap();
    assert_eq!(b"LXFOPVEFRNHR", &cipher[..]);
    assert_eq!(b"ATTACKATDAWN", &decrypt(&cipher, b"LEMON").unwrap()[..]);
}

#[test]
fn test_lower_case() {
    let cipher = encrypt(b"attackatdawn", b"lemon").unwrap();
    assert_eq!(b"lxfopvefrnhr", &cipher[..]);
    assert_eq!(b"attackatdawn", &decrypt(&cipher, b"LeMoN").unwrap()[..]);
}

#[test]
fn test_equal_len_key() {
    let msg = b"CRYPTOISSHORTFORCRYPTOGRAPHY";
    let key = b"ABCDABCDABCDABCDABCDABCDABCD";
    let cipher = encrypt(msg, key).unwrap();
    assert_eq!(b"CSASTPKVSIQUTGQUCSASTPIUAQJB", &cipher[..]);
    assert_eq!(&msg[..], &decrypt(&cipher, key).unwrap()[..]);
}

#[test]
fn test_double_encrypt() {
    let once = encrypt(b"ATTACKATDAWN", b"GO").unwrap();
    let twice = encrypt(&once, b"CAT").unwrap();
    assert_eq!(b"IHSQIRIHCQCU", &twice[..]);
}

#[test]
fn test_non_letters_pass_through() {
    let cipher = encrypt(b"attack, at dawn!", b"Lemon 42").unwrap();
    assert_eq!(b"lxfopv, ef rnhr!", &cipher[..]);
    assert_eq!(b"attack, at dawn!", &decrypt(&cipher, b"LEMON").unwrap()[..]);
}

#[test]
fn test_bad_key() {
    match encrypt(b"attack", b"123 !") {
        Err(Error::InvalidArgument(_)) => (),
        other => panic!("unexpected {:?}", other),
    }
    assert!(decrypt(b"attack", b"").is_err());
}

#[test]
fn test_probe_key_validation() {
    assert!(probe_key(b"abc", 0).is_err());
    assert!(probe_key(b"ab, c!", 4).is_err());
    assert_eq!(3, probe_key(b"ab, c!", 3).unwrap().len());
}
