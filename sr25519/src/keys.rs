//! Mini secret keys, expanded secret keys, public keys and keypairs.
//!
//! A 32-byte seed expands through SHA-512 into an ed25519-style clamped
//! scalar plus a nonce seed. The clamped value is a multiple of the
//! cofactor; dividing by 8 recovers the scalar actually multiplied against
//! the Ristretto basepoint, and serialization multiplies back so the wire
//! form stays interchangeable with ed25519-flavoured storage.

use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};

use curve25519::{
    divide_scalar_bytes_by_cofactor, multiply_scalar_bytes_by_cofactor, CompressedRistretto,
    RistrettoPoint, Scalar,
};

use crate::constants::{
    KEYPAIR_LENGTH, MINI_SECRET_KEY_LENGTH, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH,
};
use crate::errors::SignatureError;

/// A 32-byte seed from which a full keypair is derived.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiniSecretKey(pub(crate) [u8; MINI_SECRET_KEY_LENGTH]);

impl MiniSecretKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<MiniSecretKey, SignatureError> {
        if bytes.len() != MINI_SECRET_KEY_LENGTH {
            return Err(SignatureError::BytesLengthError {
                name: "MiniSecretKey",
                expected: MINI_SECRET_KEY_LENGTH,
                actual: bytes.len(),
            });
        }
        let mut seed = [0u8; MINI_SECRET_KEY_LENGTH];
        seed.copy_from_slice(bytes);
        Ok(MiniSecretKey(seed))
    }

    pub fn to_bytes(&self) -> [u8; MINI_SECRET_KEY_LENGTH] {
        self.0
    }

    pub fn generate<R: Rng + CryptoRng + ?Sized>(rng: &mut R) -> MiniSecretKey {
        let mut seed = [0u8; MINI_SECRET_KEY_LENGTH];
        rng.fill_bytes(&mut seed);
        MiniSecretKey(seed)
    }

    /// Expand the seed into a secret key.
    ///
    /// The low half of SHA-512(seed) is clamped the ed25519 way, then
    /// divided by the cofactor; the high half seeds nonce generation.
    pub fn expand(&self) -> SecretKey {
        let digest = Sha512::digest(self.0);

        let mut key = [0u8; 32];
        key.copy_from_slice(&digest[0..32]);
        key[0] &= 0b1111_1000;
        key[31] &= 0b0011_1111;
        key[31] |= 0b0100_0000;
        divide_scalar_bytes_by_cofactor(&mut key);

        let mut nonce = [0u8; 32];
        nonce.copy_from_slice(&digest[32..64]);

        SecretKey {
            key: Scalar::from_bits(key),
            nonce,
        }
    }

    pub fn expand_to_keypair(&self) -> Keypair {
        self.expand().into_keypair()
    }

    pub fn expand_to_public(&self) -> PublicKey {
        self.expand().to_public()
    }
}

/// An expanded secret key: the signing scalar and the nonce seed that
/// derandomizes witness generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretKey {
    pub(crate) key: Scalar,
    pub(crate) nonce: [u8; 32],
}

impl SecretKey {
    /// Parse the 64-byte wire form: cofactor-multiplied scalar, then nonce.
    pub fn from_bytes(bytes: &[u8]) -> Result<SecretKey, SignatureError> {
        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(SignatureError::BytesLengthError {
                name: "SecretKey",
                expected: SECRET_KEY_LENGTH,
                actual: bytes.len(),
            });
        }

        let mut key = [0u8; 32];
        key.copy_from_slice(&bytes[0..32]);
        divide_scalar_bytes_by_cofactor(&mut key);

        let mut nonce = [0u8; 32];
        nonce.copy_from_slice(&bytes[32..64]);

        Ok(SecretKey {
            key: Scalar::from_bits(key),
            nonce,
        })
    }

    /// Serialize to the 64-byte wire form.
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        let mut bytes = [0u8; SECRET_KEY_LENGTH];
        let mut key = self.key.to_bytes();
        multiply_scalar_bytes_by_cofactor(&mut key);
        bytes[0..32].copy_from_slice(&key);
        bytes[32..64].copy_from_slice(&self.nonce);
        bytes
    }

    pub fn generate<R: Rng + CryptoRng + ?Sized>(rng: &mut R) -> SecretKey {
        MiniSecretKey::generate(rng).expand()
    }

    /// Derive the public key `key * B`.
    pub fn to_public(&self) -> PublicKey {
        PublicKey(RistrettoPoint::mul_base(&self.key).compress())
    }

    pub fn into_keypair(self) -> Keypair {
        let public = self.to_public();
        Keypair {
            secret: self,
            public,
        }
    }
}

/// A compressed Ristretto public key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey(pub(crate) CompressedRistretto);

impl PublicKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<PublicKey, SignatureError> {
        if bytes.len() != PUBLIC_KEY_LENGTH {
            return Err(SignatureError::BytesLengthError {
                name: "PublicKey",
                expected: PUBLIC_KEY_LENGTH,
                actual: bytes.len(),
            });
        }
        let mut array = [0u8; PUBLIC_KEY_LENGTH];
        array.copy_from_slice(bytes);
        Ok(PublicKey(CompressedRistretto(array)))
    }

    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.0.to_bytes()
    }

    pub fn as_compressed(&self) -> &CompressedRistretto {
        &self.0
    }

    /// Decode to a group element, failing on non-canonical bytes.
    pub(crate) fn decompress(&self) -> Result<RistrettoPoint, SignatureError> {
        self.0
            .decompress()
            .ok_or(SignatureError::PointDecompressionError)
    }
}

/// A secret key together with its public key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keypair {
    pub secret: SecretKey,
    pub public: PublicKey,
}

impl Keypair {
    /// Parse the 96-byte wire form: secret key, then public key.
    pub fn from_bytes(bytes: &[u8]) -> Result<Keypair, SignatureError> {
        if bytes.len() != KEYPAIR_LENGTH {
            return Err(SignatureError::BytesLengthError {
                name: "Keypair",
                expected: KEYPAIR_LENGTH,
                actual: bytes.len(),
            });
        }
        let secret = SecretKey::from_bytes(&bytes[0..SECRET_KEY_LENGTH])?;
        let public = PublicKey::from_bytes(&bytes[SECRET_KEY_LENGTH..])?;
        Ok(Keypair { secret, public })
    }

    pub fn to_bytes(&self) -> [u8; KEYPAIR_LENGTH] {
        let mut bytes = [0u8; KEYPAIR_LENGTH];
        bytes[0..SECRET_KEY_LENGTH].copy_from_slice(&self.secret.to_bytes());
        bytes[SECRET_KEY_LENGTH..].copy_from_slice(&self.public.to_bytes());
        bytes
    }

    pub fn generate<R: Rng + CryptoRng + ?Sized>(rng: &mut R) -> Keypair {
        SecretKey::generate(rng).into_keypair()
    }

    pub fn from_mini_secret(mini: &MiniSecretKey) -> Keypair {
        mini.expand_to_keypair()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_secret_key_round_trip() {
        let mut rng = StdRng::seed_from_u64(42);
        let secret = SecretKey::generate(&mut rng);
        let parsed = SecretKey::from_bytes(&secret.to_bytes()).unwrap();
        assert_eq!(parsed, secret);
        assert_eq!(parsed.to_public(), secret.to_public());
    }

    #[test]
    fn test_keypair_round_trip() {
        let mut rng = StdRng::seed_from_u64(42);
        let keypair = Keypair::generate(&mut rng);
        let parsed = Keypair::from_bytes(&keypair.to_bytes()).unwrap();
        assert_eq!(parsed.public, keypair.public);
        assert_eq!(parsed.secret, keypair.secret);
    }

    #[test]
    fn test_wrong_lengths_are_rejected() {
        assert_eq!(
            MiniSecretKey::from_bytes(&[0u8; 31]),
            Err(SignatureError::BytesLengthError {
                name: "MiniSecretKey",
                expected: 32,
                actual: 31,
            })
        );
        assert!(SecretKey::from_bytes(&[0u8; 63]).is_err());
        assert!(PublicKey::from_bytes(&[0u8; 33]).is_err());
        assert!(Keypair::from_bytes(&[0u8; 95]).is_err());
    }

    #[test]
    fn test_expansion_is_deterministic() {
        let mini = MiniSecretKey::from_bytes(&[7u8; 32]).unwrap();
        let a = mini.expand();
        let b = mini.expand();
        assert_eq!(a, b);
        assert_eq!(a.to_public(), mini.expand_to_public());
    }

    #[test]
    fn test_distinct_seeds_distinct_keys() {
        let a = MiniSecretKey::from_bytes(&[1u8; 32]).unwrap().expand_to_public();
        let b = MiniSecretKey::from_bytes(&[2u8; 32]).unwrap().expand_to_public();
        assert_ne!(a, b);
    }
}
