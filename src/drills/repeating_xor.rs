use rayon::ThreadPoolBuilder;

use crate::keysize::{find_probable_key_sizes, KeySizeSearch};
use crate::util::xor_bytes;
use crate::vigenere;
use crate::xor::{crack_repeating_key_xor, probe_key};

use super::lighthouse;

#[test]
fn run() {
    let plain = lighthouse();
    let cipher = xor_bytes(&plain, b"ICE");

    // Up to 40, the multiples 6 and 30 and a noise hit at 19 take the top
    // three slots on 900 bytes, and 3 itself ranks lower. Capping at 12
    // keeps the true size in the list.
    let search = KeySizeSearch::default().max_key_size(12);
    let sizes = find_probable_key_sizes(&cipher, &search).unwrap();
    println!("{:?}", sizes);
    assert_eq!(3, sizes.len());
    assert!(sizes.iter().any(|c| c.key_size == 3));

    let key = probe_key(&cipher, 0, 3).unwrap();
    assert_eq!(b"ICE", &key[..]);
    assert_eq!(key, probe_key(&cipher, 0, 3).unwrap());
    assert_eq!(plain, xor_bytes(&cipher, &key));

    let cracked = crack_repeating_key_xor(&cipher, &search).unwrap();
    assert_eq!(b"ICE", &cracked.key[..]);
    assert_eq!(plain, cracked.plaintext);

    // the wider search still lands on ICE: 6 and 30 reduce to its period
    let wide = KeySizeSearch::default();
    let wide_sizes = find_probable_key_sizes(&cipher, &wide).unwrap();
    assert!(wide_sizes.iter().all(|c| c.key_size % 3 == 0 || c.key_size == 19));
    let cracked = crack_repeating_key_xor(&cipher, &wide).unwrap();
    assert_eq!(b"ICE", &cracked.key[..]);
    assert_eq!(plain, cracked.plaintext);
}

#[test]
fn single_thread_matches_pool() {
    let plain = lighthouse();
    let cipher = xor_bytes(&plain, b"Lantern");
    let search = KeySizeSearch::default().top_count(40);
    let letters = vigenere::encrypt(&plain, b"harbor").unwrap();

    let pooled = (
        find_probable_key_sizes(&cipher, &search).unwrap(),
        probe_key(&cipher, 0, 7).unwrap(),
        probe_key(&cipher, 1, 14).unwrap(),
        vigenere::probe_key(&letters, 6).unwrap(),
        crack_repeating_key_xor(&cipher, &search).unwrap(),
    );

    let pool = ThreadPoolBuilder::new().num_threads(1).build().unwrap();
    let serial = pool.install(|| (
        find_probable_key_sizes(&cipher, &search).unwrap(),
        probe_key(&cipher, 0, 7).unwrap(),
        probe_key(&cipher, 1, 14).unwrap(),
        vigenere::probe_key(&letters, 6).unwrap(),
        crack_repeating_key_xor(&cipher, &search).unwrap(),
    ));

    assert_eq!(40, pooled.0.len());
    assert_eq!(pooled.0, serial.0);
    assert_eq!(pooled.1, serial.1);
    assert_eq!(pooled.2, serial.2);
    assert_eq!(pooled.3, serial.3);
    assert_eq!(pooled.4.key, serial.4.key);
    assert_eq!(pooled.4.plaintext, serial.4.plaintext);
    assert_eq!(b"Lantern", &pooled.4.key[..]);
}

#[test]
fn run_default_search() {
    let plain = lighthouse();
    for key in &["Lantern", "fog!", "K"] {
        let cipher = xor_bytes(&plain, key.as_bytes());
        let cracked = crack_repeating_key_xor(&cipher, &KeySizeSearch::default()).unwrap();
        assert_eq!(key.as_bytes(), &cracked.key[..]);
        assert_eq!(plain, cracked.plaintext);
    }
}
