//! Error types for key and signature parsing.

use core::fmt;

/// Errors that can occur while parsing keys and signatures from bytes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// An input slice had the wrong length for the object named.
    BytesLengthError {
        /// What was being parsed.
        name: &'static str,
        /// The length the encoding requires.
        expected: usize,
        /// The length that was provided.
        actual: usize,
    },
    /// The high bit of the final signature byte was clear.
    ///
    /// Serialized signatures set that bit to mark the scheme; unmarked
    /// inputs are refused rather than reinterpreted.
    NotMarkedSchnorrkel,
    /// A 32-byte string was not the canonical encoding of a group element.
    PointDecompressionError,
}

impl fmt::Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureError::BytesLengthError {
                name,
                expected,
                actual,
            } => write!(
                f,
                "{} must be exactly {} bytes, got {}",
                name, expected, actual
            ),
            SignatureError::NotMarkedSchnorrkel => {
                write!(f, "signature bytes lack the scheme marker bit")
            }
            SignatureError::PointDecompressionError => {
                write!(f, "cannot decompress Ristretto point")
            }
        }
    }
}

impl std::error::Error for SignatureError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_object() {
        let err = SignatureError::BytesLengthError {
            name: "PublicKey",
            expected: 32,
            actual: 31,
        };
        let message = err.to_string();
        assert!(message.contains("PublicKey"));
        assert!(message.contains("32"));
        assert!(message.contains("31"));
    }
}
