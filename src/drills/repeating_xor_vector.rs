use serialize::hex::FromHex;

use crate::keysize::KeySizeSearch;
use crate::util::xor_bytes;
use crate::xor::{crack_repeating_key_xor, probe_key};

// 74 bytes: too short for the default search, which needs (6 + 1) * 40.
#[test]
fn run() {
    let cipher = "0b3637272a2b2e63622c2e69692a23693a2a3c6324202d623d63343c2a\
                  26226324272765272a282b2f20430a652e2c652a3124333a653e2b2027\
                  630c692b20283165286326302e27282f".from_hex().unwrap();
    let m = "Burning 'em, if you ain't quick and nimble\n\
             I go crazy when I hear a cymbal";

    assert_eq!(b"ICE", &probe_key(&cipher, 0, 3).unwrap()[..]);
    assert!(crack_repeating_key_xor(&cipher, &KeySizeSearch::default()).is_err());

    let search = KeySizeSearch::default().max_key_size(12).num_samples(5);
    let cracked = crack_repeating_key_xor(&cipher, &search).unwrap();
    assert_eq!(b"ICE", &cracked.key[..]);
    assert_eq!(m.as_bytes(), &cracked.plaintext[..]);
    assert_eq!(cipher, xor_bytes(m.as_bytes(), &cracked.key));
}
