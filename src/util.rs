use crate::error::{Error, Result};

/// XOR `src` against `key`, cycling the key. An empty key leaves the data
/// unchanged.
pub fn xor_bytes(src: &[u8], key: &[u8]) -> Vec<u8> {
    if key.is_empty() {
        return src.to_vec();
    }
    src.iter()
        .zip(key.iter().cycle())
        .map(|(&a, &b)| a ^ b)
        .collect()
}

pub fn xor_byte(src: &[u8], key: u8) -> Vec<u8> {
    src.iter().map(|&b| b ^ key).collect()
}

pub fn xor_equal(a: &[u8], b: &[u8]) -> Result<Vec<u8>> {
    check_same_len(a, b)?;
    Ok(xor_bytes(a, b))
}

/// Number of differing bits between two equal-length buffers.
pub fn hamming_distance(a: &[u8], b: &[u8]) -> Result<u32> {
    check_same_len(a, b)?;
    Ok(a.iter()
        .zip(b)
        .map(|(&x, &y)| (x ^ y).count_ones())
        .sum())
}

fn check_same_len(a: &[u8], b: &[u8]) -> Result<()> {
    if a.len() != b.len() {
        return Err(Error::InvalidArgument(format!(
            "buffer lengths must be equal ({} != {})", a.len(), b.len())));
    }
    Ok(())
}

/// Every `stride`th byte of `buf` starting at `start`.
///
/// Under a repeating key of length `stride`, the result is the column of
/// bytes that were all enciphered with key byte `start`. A start past the
/// end of the buffer yields an empty column.
pub fn extract_stride(buf: &[u8], start: usize, stride: usize) -> Result<Vec<u8>> {
    if stride == 0 {
        return Err(Error::InvalidArgument("stride must be greater than zero".to_string()));
    }
    Ok(buf.iter()
        .skip(start)
        .step_by(stride)
        .cloned()
        .collect())
}

/// Smallest prefix of `key` that repeats to rebuild all of it, e.g.
/// `ICEICE` -> `ICE`.
pub fn shortest_period(key: &[u8]) -> &[u8] {
    let len = key.len();
    (1..len)
        .filter(|p| len % p == 0)
        .find(|&p| key.chunks(p).all(|c| c == &key[..p]))
        .map_or(key, |p| &key[..p])
}

/// Round half away from zero to `places` decimal places.
pub fn round_to(x: f64, places: i32) -> f64 {
    let m = 10_f64.powi(places);
    (x * m).round() / m
}

#[test]
fn test_xor_bytes() {
    let plain = b"lamp lit at dusk";
    let key = b"fog";
    let cipher = xor_bytes(plain, key);
    assert_eq!(plain.len(), cipher.len());

    // every key byte covers its own column
    for (i, &k) in key.iter().enumerate() {
        let column = extract_stride(&cipher, i, key.len()).unwrap();
        assert_eq!(xor_byte(&extract_stride(plain, i, key.len()).unwrap(), k), column);
    }
    let cycled = key.iter().cycle().take(plain.len()).cloned().collect::<Vec<u8>>();
    assert_eq!(cipher, xor_equal(plain, &cycled).unwrap());

    assert_eq!(&plain[..], &xor_bytes(&cipher, key)[..]);
    assert_eq!(vec![0_u8; 4], xor_bytes(b"fogf", key));
    assert_eq!(&plain[..], &xor_bytes(plain, &[])[..]);
}

#[test]
fn test_xor_byte() {
    assert_eq!(xor_byte(b"ab", 0x20), b"AB");
    assert_eq!(xor_byte(&[], 0x20), &[] as &[u8]);
}

#[test]
fn test_xor_equal() {
    let x = xor_equal(&[0x1c, 0x01, 0x11], &[0x68, 0x69, 0x74]).unwrap();
    assert_eq!(x, &[0x74, 0x68, 0x65]);
    assert!(xor_equal(&[1, 2], &[1]).is_err());
}

#[test]
fn test_hamming_distance() {
    assert_eq!(0, hamming_distance(&[0b001], &[0b001]).unwrap());
    assert_eq!(1, hamming_distance(&[0b001], &[0b101]).unwrap());
    assert_eq!(2, hamming_distance(&[0b001], &[0b111]).unwrap());
    assert_eq!(37, hamming_distance(b"this is a test", b"wokka wokka!!!").unwrap());
    assert_eq!(0, hamming_distance(&[], &[]).unwrap());
    match hamming_distance(b"abc", b"ab") {
        Err(Error::InvalidArgument(_)) => (),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_extract_stride() {
    let buf = (0..10).collect::<Vec<u8>>();
    assert_eq!(extract_stride(&buf, 0, 3).unwrap(), &[0, 3, 6, 9]);
    assert_eq!(extract_stride(&buf, 1, 3).unwrap(), &[1, 4, 7]);
    assert_eq!(extract_stride(&buf, 2, 3).unwrap(), &[2, 5, 8]);
    assert_eq!(extract_stride(&buf, 0, 1).unwrap(), buf);
    assert_eq!(extract_stride(&buf, 9, 4).unwrap(), &[9]);
    assert!(extract_stride(&buf, 10, 4).unwrap().is_empty());
    assert!(extract_stride(&buf, 0, 0).is_err());
}

#[test]
fn test_extract_stride_len() {
    let buf = vec![0xaa_u8; 37];
    for stride in 1..12 {
        for start in 0..stride {
            let col = extract_stride(&buf, start, stride).unwrap();
            let want = (buf.len() - start + stride - 1) / stride;
            assert_eq!(want, col.len(), "start {} stride {}", start, stride);
        }
    }
}

#[test]
fn test_shortest_period() {
    assert_eq!(shortest_period(b"ICEICE"), b"ICE");
    assert_eq!(shortest_period(b"ICE"), b"ICE");
    assert_eq!(shortest_period(b"KKKK"), b"K");
    assert_eq!(shortest_period(b"ABAB AB"), b"ABAB AB");
    assert_eq!(shortest_period(b"ABABAB"), b"AB");
    assert_eq!(shortest_period(b""), b"");
}

#[test]
fn test_round_to() {
    assert_eq!(2.32558, round_to(100.0 / 43.0, 5));
    assert_eq!(0.014, round_to(0.01449, 3));
    assert_eq!(3.0, round_to(2.9999999, 5));
}
