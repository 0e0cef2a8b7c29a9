//! Book cipher: each plaintext letter becomes the 1-based index of a word in
//! a shared text whose first (or last) letter matches it. Words that start
//! with the same letter are interchangeable, and encryption picks among them
//! at random.

use std::collections::BTreeMap;

use rand::Rng;

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LetterSelection {
    FirstLetter,
    LastLetter,
}

/// What decryption does with a word index past the end of the book.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutOfBounds {
    Error,
    /// Emit `?` in place of the letter.
    QuestionMark,
    /// Wrap around: index `n` reads word `((n - 1) % len) + 1`.
    Wrap,
}

fn key_letter(word: &str, sel: LetterSelection) -> Option<char> {
    let word = word.trim();
    match sel {
        LetterSelection::FirstLetter => word.chars().next(),
        LetterSelection::LastLetter => word.chars().last(),
    }
}

/// Decrypt a list of word numbers against `words`.
pub fn decrypt<S: AsRef<str>>(nums: &[i64], words: &[S], sel: LetterSelection, oob: OutOfBounds) -> Result<String> {
    let letters = words.iter()
        .enumerate()
        .map(|(i, w)| {
            key_letter(w.as_ref(), sel).ok_or_else(|| {
                Error::InvalidArgument(format!("word {} is empty", i + 1))
            })
        })
        .collect::<Result<Vec<char>>>()?;

    let len = letters.len() as i64;
    let mut out = String::with_capacity(nums.len());
    for (i, &n) in nums.iter().enumerate() {
        if n <= 0 {
            if oob == OutOfBounds::QuestionMark {
                out.push('?');
                continue;
            }
            return Err(Error::OutOfRange(format!(
                "entry {} has a number ({}) less than or equal to zero", i + 1, n)));
        }
        if n > len {
            match oob {
                OutOfBounds::Error => {
                    return Err(Error::OutOfRange(format!(
                        "entry {} has a number ({}) exceeding word count in key ({})", i + 1, n, len)));
                }
                OutOfBounds::QuestionMark => {
                    out.push('?');
                    continue;
                }
                OutOfBounds::Wrap if len > 0 => (),
                OutOfBounds::Wrap => {
                    return Err(Error::OutOfRange(format!(
                        "entry {} cannot wrap around an empty book", i + 1)));
                }
            }
        }
        out.push(letters[((n - 1) % len) as usize]);
    }
    Ok(out)
}

/// Same as [`decrypt`], with the numbers still in text form.
pub fn decrypt_str<N, S>(nums: &[N], words: &[S], sel: LetterSelection, oob: OutOfBounds) -> Result<String>
    where N: AsRef<str>,
          S: AsRef<str>
{
    let parsed = nums.iter()
        .enumerate()
        .map(|(i, n)| {
            let n = n.as_ref().trim();
            n.parse::<i64>().map_err(|_| {
                Error::InvalidNumber(format!("cipher number {} is not an integer ({})", i + 1, n))
            })
        })
        .collect::<Result<Vec<i64>>>()?;
    decrypt(&parsed, words, sel, oob)
}

/// Encrypt the letters of `plain` (everything else is dropped) as word
/// numbers joined by `delimiter`.
pub fn encrypt<R, S>(rng: &mut R, plain: &str, words: &[S], delimiter: char, sel: LetterSelection) -> Result<String>
    where R: Rng,
          S: AsRef<str>
{
    let mut lookup: BTreeMap<char, Vec<usize>> = BTreeMap::new();
    for (i, w) in words.iter().enumerate() {
        let word = w.as_ref().trim().to_lowercase();
        let c = key_letter(&word, sel).ok_or_else(|| {
            Error::InvalidArgument(format!("word {} is empty or whitespace", i + 1))
        })?;
        lookup.entry(c).or_insert_with(Vec::new).push(i + 1);
    }

    let mut nums = Vec::new();
    for c in plain.chars().flat_map(char::to_lowercase).filter(|c| c.is_alphabetic()) {
        let choices = lookup.get(&c).ok_or_else(|| {
            Error::OutOfRange(format!("letter {} is not found in any words of book text", c))
        })?;
        let pick = match choices.len() {
            1 => choices[0],
            _ => rng.choose(choices).cloned().unwrap_or(choices[0]),
        };
        nums.push(pick.to_string());
    }
    Ok(nums.join(&delimiter.to_string()))
}

#[cfg(test)]
const TEST_WORDS: &[&str] = &["four", "score", "and", "seven", "years"];
#[cfg(test)]
const BOOK1: &[&str] = &["family", "eats", "sweet", "treats"];
#[cfg(test)]
const BOOK_WITH_ALL_LETTERS: &[&str] = &[
    "sam", "pat", "hop", "in", "not", "xray", "qat", "under", "at", "rap", "top", "zip",
    "fop", "lost", "end", "down", "gray", "yell", "beta", "mop", "wind", "vow", "jump", "or", "can", "kin",
];

#[test]
fn test_decrypt() {
    use self::LetterSelection::*;

    assert_eq!("fsas", decrypt(&[1, 2, 3, 4], TEST_WORDS, FirstLetter, OutOfBounds::Error).unwrap());
    assert_eq!("redn", decrypt(&[1, 2, 3, 4], TEST_WORDS, LastLetter, OutOfBounds::Error).unwrap());
    assert_eq!("fs?", decrypt(&[1, 2, 8], TEST_WORDS, FirstLetter, OutOfBounds::QuestionMark).unwrap());
    assert_eq!("f?s", decrypt(&[1, 0, 4], TEST_WORDS, FirstLetter, OutOfBounds::QuestionMark).unwrap());
    assert_eq!("fsasy", decrypt(&[1, 2, 8, 4, 5], TEST_WORDS, FirstLetter, OutOfBounds::Wrap).unwrap());
    assert_eq!("fsysy", decrypt(&[1, 2, 10, 4, 5], TEST_WORDS, FirstLetter, OutOfBounds::Wrap).unwrap());
}

#[test]
fn test_decrypt_str() {
    use self::LetterSelection::*;

    let nums = ["1", " 2", "3 ", "4"];
    assert_eq!("fsas", decrypt_str(&nums, TEST_WORDS, FirstLetter, OutOfBounds::Error).unwrap());
    assert_eq!("redn", decrypt_str(&nums, TEST_WORDS, LastLetter, OutOfBounds::Error).unwrap());
    match decrypt_str(&["1", "2", "3", "abc"], TEST_WORDS, FirstLetter, OutOfBounds::Error) {
        Err(Error::InvalidNumber(msg)) => assert!(msg.contains("abc")),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_decrypt_errors() {
    use self::LetterSelection::FirstLetter;

    match decrypt(&[1, 2, 8], TEST_WORDS, FirstLetter, OutOfBounds::Error) {
        Err(Error::OutOfRange(_)) => (),
        other => panic!("unexpected {:?}", other),
    }
    match decrypt(&[1, 2, 0], TEST_WORDS, FirstLetter, OutOfBounds::Error) {
        Err(Error::OutOfRange(_)) => (),
        other => panic!("unexpected {:?}", other),
    }
    assert!(decrypt(&[1, 2, -1], TEST_WORDS, FirstLetter, OutOfBounds::Error).is_err());
    assert!(decrypt(&[1, -1], TEST_WORDS, FirstLetter, OutOfBounds::Wrap).is_err());
    let empty: &[&str] = &[];
    assert!(decrypt(&[3], empty, FirstLetter, OutOfBounds::Wrap).is_err());
    assert_eq!("", decrypt(&[], empty, FirstLetter, OutOfBounds::Wrap).unwrap());
    match decrypt(&[1, 2], &["1", " "], FirstLetter, OutOfBounds::Error) {
        Err(Error::InvalidArgument(_)) => (),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_encrypt() {
    use rand::weak_rng;
    use self::LetterSelection::FirstLetter;

    let mut rng = weak_rng();
    assert_eq!("1,2,3,4", encrypt(&mut rng, "fest", BOOK1, ',', FirstLetter).unwrap());
    let want = (1..27).map(|i| i.to_string()).collect::<Vec<_>>().join(",");
    assert_eq!(want, encrypt(&mut rng, "sphinx quartz fledgy bmw v jock", BOOK_WITH_ALL_LETTERS, ',', FirstLetter).unwrap());
    assert_eq!("2 3", encrypt(&mut rng, "E-S!", BOOK1, ' ', FirstLetter).unwrap());
}

#[test]
fn test_encrypt_errors() {
    use rand::weak_rng;
    use self::LetterSelection::FirstLetter;

    let mut rng = weak_rng();
    match encrypt(&mut rng, "fart", BOOK1, ',', FirstLetter) {
        Err(Error::OutOfRange(_)) => (),
        other => panic!("unexpected {:?}", other),
    }
    match encrypt(&mut rng, "fest", &["family", "", "sweet", "treats"], ',', FirstLetter) {
        Err(Error::InvalidArgument(_)) => (),
        other => panic!("unexpected {:?}", other),
    }
    assert!(encrypt(&mut rng, "fest", &["family", "  ", "sweet"], ',', FirstLetter).is_err());
}

#[test]
fn test_homophones_roundtrip() {
    use rand::{SeedableRng, XorShiftRng};
    use self::LetterSelection::*;

    let first = ["tall", "trees", "hold", "hands", "every", "evening", "near", "nests"];
    let last = ["cat", "fist", "fish", "ash", "bee", "tree", "men", "pen"];
    let mut rng = XorShiftRng::from_seed([1, 2, 3, 4]);
    for &(sel, book) in &[(FirstLetter, first), (LastLetter, last)] {
        for _ in 0..20 {
            let cipher = encrypt(&mut rng, "the net", &book, ',', sel).unwrap();
            let nums = cipher.split(',').collect::<Vec<_>>();
            assert_eq!(6, nums.len());
            assert_eq!("thenet", decrypt_str(&nums, &book, sel, OutOfBounds::Error).unwrap());
        }
    }
}
