use serialize::hex::FromHex;

use crate::util::xor_byte;
use crate::xor::brute_force_single_byte_xor;

#[test]
fn run() {
    let cipher = "1b37373331363f78151b7f2b783431333d78397828372d363c78373e783a393b3736";
    let cipher_bytes = cipher.from_hex().unwrap();

    let tops = brute_force_single_byte_xor(&cipher_bytes, 3, 2);
    let k = tops[0].key;
    let string = String::from_utf8_lossy(&xor_byte(&cipher_bytes, k)).into_owned();
    println!("{} : '{}' => {}", tops[0].statistical_difference(), k as char, string);
    assert_eq!(b'X', k);
    assert_eq!("Cooking MC's like a pound of bacon", string);
    assert!(!tops[0].profile.has_any_unprintable());
}
