//! Byte frequency profiles scored against english reference tables.
//!
//! A profile counts every byte value of a sample (with ascii letters folded
//! to lower case) and measures how far the resulting percentages sit from
//! one of the [`FreqTable`] references. The score is only meaningful for
//! ranking samples of the same length against each other.

use crate::util::round_to;

/// Which reference table a profile is scored against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FreqTable {
    AlphaOnly,
    AlphaAndSpace,
    AlphaAndSpaceAndPunctuation,
}

impl Default for FreqTable {
    fn default() -> FreqTable {
        FreqTable::AlphaOnly
    }
}

impl FreqTable {
    /// Expected percentage of `b` in english text. Zero for anything above
    /// 0x7f.
    pub fn expected(self, b: u8) -> f64 {
        self.table().get(b as usize).cloned().unwrap_or(0.0)
    }

    fn table(self) -> &'static [f64; 128] {
        match self {
            FreqTable::AlphaOnly => &ALPHA_ONLY,
            FreqTable::AlphaAndSpace => &ALPHA_AND_SPACE,
            FreqTable::AlphaAndSpaceAndPunctuation => &ALPHA_AND_SPACE_AND_PUNCTUATION,
        }
    }
}

// percent of letters in english text
const ALPHA_ONLY: [f64; 128] = [
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x00
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x08
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x10
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x18
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x20
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x28
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x30
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x38
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x40
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x48
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x50
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x58
    0.0, 8.167, 1.492, 2.782, 4.253, 13.0, 2.228, 2.015, // 0x60
    6.094, 6.966, 0.153, 0.772, 4.025, 2.406, 6.749, 7.507, // 0x68
    1.929, 0.095, 5.987, 6.327, 9.056, 2.758, 0.978, 2.360, // 0x70
    0.150, 1.974, 0.074, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x78
];

// percent of letters and spaces
const ALPHA_AND_SPACE: [f64; 128] = [
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x00
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x08
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x10
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x18
    19.18182, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x20
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x28
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x30
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x38
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x40
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x48
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x50
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x58
    0.0, 6.51738, 1.24248, 2.17339, 3.49835, 10.41442, 1.97881, 1.58610, // 0x60
    4.92888, 5.58094, 0.09033, 0.50529, 3.31490, 2.02124, 5.64513, 5.96302, // 0x68
    1.37645, 0.08606, 4.97563, 5.15760, 7.29357, 2.25134, 0.82903, 1.71272, // 0x70
    0.13692, 1.45984, 0.07836, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x78
];

// space and letters rescaled to make room for ! " ' , - . : ; ?
const ALPHA_AND_SPACE_AND_PUNCTUATION: [f64; 128] = [
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x00
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x08
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x10
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x18
    15.18433, 0.33, 2.67, 0.0, 0.0, 0.0, 0.0, 2.43, // 0x20
    0.0, 0.0, 0.0, 0.0, 6.13, 1.53, 6.53, 0.0, // 0x28
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x30
    0.0, 0.0, 0.34, 0.32, 0.0, 0.0, 0.0, 0.56, // 0x38
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x40
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x48
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x50
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x58
    0.0, 5.15916, 0.98355, 1.72046, 2.76929, 8.24405, 1.56643, 1.25556, // 0x60
    3.90170, 4.41787, 0.07151, 0.39999, 2.62407, 1.60001, 4.46868, 4.72033, // 0x68
    1.08960, 0.06813, 3.93871, 4.08276, 5.77359, 1.78216, 0.65626, 1.35579, // 0x70
    0.10839, 1.15561, 0.06203, 0.0, 0.0, 0.0, 0.0, 0.0, // 0x78
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FreqPair {
    pub index: u8,
    pub count: usize,
    pub pct: f64,
}

#[derive(Clone, Debug)]
pub struct FrequencyProfile {
    bytes: Vec<u8>,
    table: FreqTable,
    counts: [usize; 256],
    pcts: [f64; 256],
    statistical_difference: f64,
}

impl FrequencyProfile {
    /// Profiles a private copy of `bytes`.
    ///
    /// An empty sample has no percentages to compare, so its statistical
    /// difference is `f64::INFINITY` and it ranks behind every real sample.
    pub fn new(bytes: &[u8], table: FreqTable) -> FrequencyProfile {
        let bytes = bytes.to_vec();
        let mut counts = [0_usize; 256];
        for &b in &bytes {
            counts[b.to_ascii_lowercase() as usize] += 1;
        }

        let total = bytes.len();
        let mut pcts = [0.0_f64; 256];
        if total == 0 {
            return FrequencyProfile {
                bytes,
                table,
                counts,
                pcts,
                statistical_difference: f64::INFINITY,
            };
        }

        for (pct, &count) in pcts.iter_mut().zip(counts.iter()) {
            *pct = round_to((count as f64 * 100.0) / total as f64, 5);
        }

        let deviation: f64 = pcts.iter()
            .enumerate()
            .map(|(i, pct)| (pct - table.expected(i as u8)).abs())
            .sum();

        FrequencyProfile {
            bytes,
            table,
            counts,
            pcts,
            statistical_difference: round_to(deviation / total as f64, 3),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn table(&self) -> FreqTable {
        self.table
    }

    /// Summed percentage-point deviation from the reference table, divided
    /// by the sample length. Lower is more english.
    pub fn statistical_difference(&self) -> f64 {
        self.statistical_difference
    }

    pub fn count(&self, b: u8) -> usize {
        self.counts[b as usize]
    }

    pub fn pct(&self, b: u8) -> f64 {
        self.pcts[b as usize]
    }

    /// Count for an ascii character, either case. Non-ascii characters were
    /// never counted and return 0.
    pub fn count_for_char(&self, c: char) -> usize {
        char_index(c).map_or(0, |b| self.count(b))
    }

    pub fn pct_for_char(&self, c: char) -> f64 {
        char_index(c).map_or(0.0, |b| self.pct(b))
    }

    pub fn pair(&self, b: u8) -> FreqPair {
        FreqPair {
            index: b,
            count: self.count(b),
            pct: self.pct(b),
        }
    }

    /// All 256 byte values in order. Each call starts over.
    pub fn pairs<'a>(&'a self) -> impl Iterator<Item = FreqPair> + 'a {
        (0..256).map(move |i| self.pair(i as u8))
    }

    pub fn counts<'a>(&'a self) -> impl Iterator<Item = usize> + 'a {
        self.counts.iter().cloned()
    }

    pub fn pcts<'a>(&'a self) -> impl Iterator<Item = f64> + 'a {
        self.pcts.iter().cloned()
    }

    /// Control characters below the space, or DEL.
    pub fn has_any_unprintable(&self) -> bool {
        self.counts[..0x20].iter().any(|&c| c > 0) || self.counts[0x7f] > 0
    }

    pub fn has_any_extended_ascii(&self) -> bool {
        self.counts[0x80..].iter().any(|&c| c > 0)
    }
}

fn char_index(c: char) -> Option<u8> {
    if c.is_ascii() {
        Some((c as u8).to_ascii_lowercase())
    } else {
        None
    }
}

#[cfg(test)]
const THE_QBF: &str = "THE QUICK BROWN FOX JUMPS OVER THE LAZY DOG";

#[test]
fn test_qbf_counts() {
    let freq = FrequencyProfile::new(THE_QBF.as_bytes(), FreqTable::AlphaOnly);
    assert_eq!(1, freq.count(b'a'));
    assert_eq!(4, freq.count(b'o'));
    assert_eq!(0, freq.count(b'A'));
    assert_eq!(1, freq.count_for_char('a'));
    assert_eq!(4, freq.count_for_char('O'));

    // space first, then a through z
    let nonzero = freq.counts().filter(|&c| c > 0).collect::<Vec<_>>();
    assert_eq!(vec![8, 1, 1, 1, 1, 3, 1, 1, 2, 1, 1, 1, 1, 1, 1, 4, 1, 1, 2, 1, 2, 2, 1, 1, 1, 1, 1],
               nonzero);
}

#[test]
fn test_qbf_pcts() {
    let freq = FrequencyProfile::new(THE_QBF.as_bytes(), FreqTable::AlphaOnly);
    let n = THE_QBF.len();
    assert_eq!(43, n);
    assert_eq!(freq.pct_for_char('a'), freq.pct_for_char('A'));
    assert_eq!(round_to(100.0 / n as f64, 5), freq.pct_for_char('a'));
    assert_eq!(2.32558, freq.pct_for_char('a'));
    assert_eq!(9.30233, freq.pct_for_char('o'));
}

#[test]
fn test_statistical_difference() {
    // |75 - 13| + |25 - 0.074| + the other 24 letters, over 4 bytes
    let freq = FrequencyProfile::new(b"eeeZ", FreqTable::AlphaOnly);
    let others: f64 = (b'a'..b'z' + 1)
        .filter(|&b| b != b'e' && b != b'z')
        .map(|b| FreqTable::AlphaOnly.expected(b))
        .sum();
    let expected = round_to(((75.0 - 13.0) + (25.0 - 0.074) + others) / 4.0, 3);
    assert_eq!(43.537, expected);
    assert_eq!(expected, freq.statistical_difference());

    let english = FrequencyProfile::new(b"an ordinary sentence of english words", FreqTable::AlphaAndSpace);
    let noise = FrequencyProfile::new(b"\x01\x9f\x33\x80zzqq~~\x00", FreqTable::AlphaAndSpace);
    assert!(english.statistical_difference() < noise.statistical_difference());
}

#[test]
fn test_empty() {
    let freq = FrequencyProfile::new(&[], FreqTable::AlphaAndSpace);
    assert_eq!(0, freq.counts().sum::<usize>());
    assert_eq!(0.0, freq.pcts().sum::<f64>());
    assert!(freq.statistical_difference().is_infinite());
    assert!(!freq.has_any_unprintable());
    assert!(!freq.has_any_extended_ascii());
}

#[test]
fn test_counts_sum_to_len() {
    use rand::{weak_rng, Rng};

    let mut rng = weak_rng();
    for _ in 0..50 {
        let len = rng.gen_range(1, 512);
        let buf = rng.gen_iter::<u8>().take(len).collect::<Vec<u8>>();
        let freq = FrequencyProfile::new(&buf, FreqTable::AlphaAndSpace);
        assert_eq!(len, freq.counts().sum::<usize>());
        let total: f64 = freq.pcts().sum();
        assert!((total - 100.0).abs() < 0.01, "{} !=~ 100", total);
    }
}

#[test]
fn test_char_case_folding() {
    use rand::{weak_rng, Rng};

    let mut rng = weak_rng();
    let buf = rng.gen_iter::<u8>().take(1000).collect::<Vec<u8>>();
    let freq = FrequencyProfile::new(&buf, FreqTable::AlphaOnly);
    for c in (b'a'..b'z' + 1).map(|b| b as char) {
        let upper = c.to_ascii_uppercase();
        assert_eq!(freq.count_for_char(c), freq.count_for_char(upper));
        assert_eq!(freq.pct_for_char(c), freq.pct_for_char(upper));
    }
    assert_eq!(0, freq.count_for_char('é'));
}

#[test]
fn test_defensive_copy() {
    let mut buf = b"hello".to_vec();
    let freq = FrequencyProfile::new(&buf, FreqTable::AlphaOnly);
    buf[0] = b'j';
    assert_eq!(b"hello", freq.bytes());
    assert_eq!(1, freq.count(b'h'));
    assert_eq!(0, freq.count(b'j'));
}

#[test]
fn test_pairs() {
    let freq = FrequencyProfile::new(b"Aa b", FreqTable::AlphaAndSpace);
    assert_eq!(256, freq.pairs().count());
    // restartable
    assert_eq!(256, freq.pairs().count());
    let a = freq.pairs().nth(b'a' as usize).unwrap();
    assert_eq!(FreqPair { index: b'a', count: 2, pct: 50.0 }, a);
    let space = freq.pair(b' ');
    assert_eq!(1, space.count);
    assert_eq!(25.0, space.pct);
}

#[test]
fn test_unprintable_and_extended() {
    let plain = FrequencyProfile::new(b"plain text, nothing odd.", FreqTable::AlphaOnly);
    assert!(!plain.has_any_unprintable());
    assert!(!plain.has_any_extended_ascii());

    assert!(FrequencyProfile::new(b"tab\there", FreqTable::AlphaOnly).has_any_unprintable());
    assert!(FrequencyProfile::new(b"del\x7f", FreqTable::AlphaOnly).has_any_unprintable());
    assert!(!FrequencyProfile::new(b"del\x7f", FreqTable::AlphaOnly).has_any_extended_ascii());
    assert!(FrequencyProfile::new(b"high\x80", FreqTable::AlphaOnly).has_any_extended_ascii());
    assert!(FrequencyProfile::new(b"\xff", FreqTable::AlphaOnly).has_any_extended_ascii());
}

#[test]
fn test_tables() {
    assert_eq!(FreqTable::AlphaOnly, FreqTable::default());
    assert_eq!(13.0, FreqTable::AlphaOnly.expected(b'e'));
    assert_eq!(0.0, FreqTable::AlphaOnly.expected(b' '));
    assert_eq!(19.18182, FreqTable::AlphaAndSpace.expected(b' '));
    assert_eq!(6.53, FreqTable::AlphaAndSpaceAndPunctuation.expected(b'.'));
    assert_eq!(0.0, FreqTable::AlphaAndSpace.expected(b'E'));
    assert_eq!(0.0, FreqTable::AlphaAndSpace.expected(0xe5));

    for &table in &[FreqTable::AlphaOnly, FreqTable::AlphaAndSpace, FreqTable::AlphaAndSpaceAndPunctuation] {
        let total: f64 = (0..256).map(|b| table.expected(b as u8)).sum();
        assert!((total - 100.0).abs() < 0.5, "{:?} sums to {}", table, total);
    }
}
