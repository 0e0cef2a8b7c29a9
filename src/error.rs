use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("out of range: {0}")]
    OutOfRange(String),

    #[error("invalid number: {0}")]
    InvalidNumber(String),
}

#[test]
fn test_display() {
    let e = Error::InvalidArgument("stride must be greater than zero".to_string());
    assert_eq!("invalid argument: stride must be greater than zero", e.to_string());
    let e = Error::OutOfRange("entry 3".to_string());
    assert_eq!("out of range: entry 3", e.to_string());
}
