use crate::vigenere::{decrypt, encrypt, probe_key};

use super::lighthouse;

#[test]
fn run() {
    let plain = lighthouse();
    for key in &["LEMON", "harbor", "K"] {
        let cipher = encrypt(&plain, key.as_bytes()).unwrap();
        let probed = probe_key(&cipher, key.len()).unwrap();
        assert_eq!(key.to_uppercase().as_bytes(), &probed[..]);
        assert_eq!(plain, decrypt(&cipher, &probed).unwrap());
    }
}
