//! Signing contexts and the transcript vocabulary of the signature
//! protocol.
//!
//! A [`SigningContext`] pins an application-chosen domain separation string
//! so that a signature over some bytes in one context never verifies in
//! another. The [`SigningTranscript`] extension supplies the protocol's
//! named commitments and challenges on top of the raw transcript.

use rand::{CryptoRng, RngCore};

use curve25519::{CompressedRistretto, Scalar};

use crate::transcript::Transcript;

/// A reusable transcript prefix binding an application domain.
#[derive(Clone)]
pub struct SigningContext(Transcript);

impl SigningContext {
    /// Create a signing context from a domain separation string.
    pub fn new(context: &[u8]) -> SigningContext {
        let mut transcript = Transcript::new(b"SigningContext");
        transcript.append_message(b"", context);
        SigningContext(transcript)
    }

    /// A transcript over `bytes` within this context.
    pub fn bytes(&self, bytes: &[u8]) -> Transcript {
        let mut transcript = self.0.clone();
        transcript.append_message(b"sign-bytes", bytes);
        transcript
    }
}

/// Protocol-level operations on a transcript.
pub trait SigningTranscript {
    /// Commit the protocol name.
    fn proto_name(&mut self, label: &'static [u8]);

    /// Commit a compressed point under a label.
    fn commit_point(&mut self, label: &'static [u8], compressed: &CompressedRistretto);

    /// Produce a scalar challenge by wide reduction of 64 challenge bytes.
    fn challenge_scalar(&mut self, label: &'static [u8]) -> Scalar;

    /// Derive secret nonce bytes from the transcript, witness seeds and
    /// external randomness.
    fn witness_bytes<R>(
        &self,
        label: &'static [u8],
        dest: &mut [u8],
        nonce_seeds: &[&[u8]],
        rng: &mut R,
    ) where
        R: RngCore + CryptoRng;

    /// Derive a secret nonce scalar the same way.
    fn witness_scalar<R>(&self, label: &'static [u8], nonce_seeds: &[&[u8]], rng: &mut R) -> Scalar
    where
        R: RngCore + CryptoRng,
    {
        let mut scalar_bytes = [0u8; 64];
        self.witness_bytes(label, &mut scalar_bytes, nonce_seeds, rng);
        Scalar::from_bytes_mod_order_wide(&scalar_bytes)
    }
}

impl SigningTranscript for Transcript {
    fn proto_name(&mut self, label: &'static [u8]) {
        self.append_message(b"proto-name", label);
    }

    fn commit_point(&mut self, label: &'static [u8], compressed: &CompressedRistretto) {
        self.append_message(label, compressed.as_bytes());
    }

    fn challenge_scalar(&mut self, label: &'static [u8]) -> Scalar {
        let mut buf = [0u8; 64];
        self.challenge_bytes(label, &mut buf);
        Scalar::from_bytes_mod_order_wide(&buf)
    }

    fn witness_bytes<R>(
        &self,
        label: &'static [u8],
        dest: &mut [u8],
        nonce_seeds: &[&[u8]],
        rng: &mut R,
    ) where
        R: RngCore + CryptoRng,
    {
        let mut builder = self.build_rng();
        for seed in nonce_seeds {
            builder = builder.rekey_with_witness_bytes(label, seed);
        }
        let mut transcript_rng = builder.finalize(rng);
        transcript_rng.fill_bytes(dest);
    }
}
