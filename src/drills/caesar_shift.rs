use crate::caesar::{brute_force_shift, decrypt, encrypt};

use super::lighthouse;

#[test]
fn run() {
    let plain = lighthouse();
    let cipher = encrypt(&plain, 7).unwrap();
    let tops = brute_force_shift(&cipher, 0, 3);
    assert_eq!(7, tops[0].key);
    assert_eq!(&plain[..], tops[0].profile.bytes());
    assert_eq!(plain, decrypt(&cipher, tops[0].key).unwrap());
}
