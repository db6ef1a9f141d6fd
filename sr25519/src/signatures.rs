//! Schnorr signing and verification over the Ristretto group.
//!
//! The protocol runs over a transcript rather than a hash of concatenated
//! fields: both parties absorb the protocol name, the public key and the
//! commitment R, and the challenge scalar is squeezed from the shared
//! state. The signing nonce comes from the transcript RNG keyed with the
//! secret nonce seed, so it is unique per (key, message) even if the
//! caller's randomness fails.

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use curve25519::{CompressedRistretto, RistrettoPoint, Scalar};

use crate::constants::SIGNATURE_LENGTH;
use crate::context::SigningTranscript;
use crate::errors::SignatureError;
use crate::keys::{Keypair, PublicKey, SecretKey};
use crate::transcript::Transcript;

/// A Schnorr signature: the commitment point R and the response scalar s.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub(crate) r: CompressedRistretto,
    pub(crate) s: Scalar,
}

impl Signature {
    /// Serialize as `R || s`, setting the high bit of the last byte as the
    /// scheme marker. The scalar's own top bit is always clear, so no
    /// information is lost.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[0..32].copy_from_slice(self.r.as_bytes());
        bytes[32..64].copy_from_slice(self.s.as_bytes());
        bytes[63] |= 0b1000_0000;
        bytes
    }

    /// Parse `R || s`, requiring the scheme marker bit.
    ///
    /// The scalar half is taken as raw bits after clearing the marker; it
    /// is not checked for canonicity, matching what deployed verifiers
    /// accept on the wire.
    pub fn from_bytes(bytes: &[u8]) -> Result<Signature, SignatureError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(SignatureError::BytesLengthError {
                name: "Signature",
                expected: SIGNATURE_LENGTH,
                actual: bytes.len(),
            });
        }

        let mut lower = [0u8; 32];
        let mut upper = [0u8; 32];
        lower.copy_from_slice(&bytes[0..32]);
        upper.copy_from_slice(&bytes[32..64]);

        if upper[31] & 0b1000_0000 == 0 {
            return Err(SignatureError::NotMarkedSchnorrkel);
        }
        upper[31] &= 0b0111_1111;

        Ok(Signature {
            r: CompressedRistretto(lower),
            s: Scalar::from_bits(upper),
        })
    }
}

impl SecretKey {
    /// Sign a transcript, drawing nonce randomness from `rng`.
    pub fn sign_with_rng<R>(&self, mut t: Transcript, public: &PublicKey, rng: &mut R) -> Signature
    where
        R: RngCore + CryptoRng,
    {
        t.proto_name(b"Schnorr-sig");
        t.commit_point(b"sign:pk", public.as_compressed());

        let r = t.witness_scalar(b"signing", &[&self.nonce], rng);
        let commitment = RistrettoPoint::mul_base(&r).compress();
        t.commit_point(b"sign:R", &commitment);

        let k = t.challenge_scalar(b"sign:c");
        let s = &(&k * &self.key) + &r;

        Signature { r: commitment, s }
    }

    /// Sign a transcript with the thread RNG.
    pub fn sign(&self, t: Transcript, public: &PublicKey) -> Signature {
        self.sign_with_rng(t, public, &mut rand::rng())
    }
}

impl PublicKey {
    /// Verify a signature over a transcript.
    ///
    /// Replays the signer's absorptions, recomputes the challenge and
    /// checks `s * B - k * A` against the committed R. Returns `false` for
    /// a public key or signature that fails to decode as well as for a
    /// wrong signature.
    pub fn verify(&self, mut t: Transcript, signature: &Signature) -> bool {
        t.proto_name(b"Schnorr-sig");
        t.commit_point(b"sign:pk", self.as_compressed());
        t.commit_point(b"sign:R", &signature.r);

        let k = t.challenge_scalar(b"sign:c");

        let point = match self.decompress() {
            Ok(point) => point,
            Err(_) => return false,
        };

        let recomputed =
            RistrettoPoint::vartime_double_scalar_mul_basepoint(&k, &(-&point), &signature.s);

        recomputed.compress() == signature.r
    }
}

impl Keypair {
    /// Sign a transcript, drawing nonce randomness from `rng`.
    pub fn sign_with_rng<R>(&self, t: Transcript, rng: &mut R) -> Signature
    where
        R: RngCore + CryptoRng,
    {
        self.secret.sign_with_rng(t, &self.public, rng)
    }

    /// Sign a transcript with the thread RNG.
    ///
    /// # Example
    ///
    /// ```
    /// use sr25519::{Keypair, SigningContext};
    ///
    /// let keypair = Keypair::generate(&mut rand::rng());
    /// let ctx = SigningContext::new(b"example");
    ///
    /// let signature = keypair.sign(ctx.bytes(b"hello world"));
    /// assert!(keypair.verify(ctx.bytes(b"hello world"), &signature));
    /// ```
    pub fn sign(&self, t: Transcript) -> Signature {
        self.secret.sign(t, &self.public)
    }

    /// Verify a signature over a transcript.
    pub fn verify(&self, t: Transcript, signature: &Signature) -> bool {
        self.public.verify(t, signature)
    }
}
