//! End to end attacks against enciphered english.

use std::fs::File;
use std::io::prelude::*;

mod caesar_shift;
mod repeating_xor;
mod repeating_xor_vector;
mod single_byte_xor;
mod vigenere_key;

fn lighthouse() -> Vec<u8> {
    let mut f = File::open("./data/lighthouse.txt").unwrap();
    let mut buf = Vec::new();
    f.read_to_end(&mut buf).unwrap();
    buf
}
