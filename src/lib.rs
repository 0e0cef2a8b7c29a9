#[cfg(test)]
extern crate rustc_serialize as serialize;

pub mod book;
pub mod caesar;
pub mod error;
pub mod freq;
pub mod keysize;
pub mod util;
pub mod vigenere;
pub mod xor;

#[cfg(test)]
mod drills;

pub use error::{Error, Result};
pub use freq::{FreqPair, FreqTable, FrequencyProfile};
pub use keysize::{find_probable_key_sizes, KeySizeCandidate, KeySizeSearch};
pub use util::extract_stride;
pub use xor::{brute_force_single_byte_xor, crack_repeating_key_xor, probe_key, ByteKeyCandidate, Recovered};
