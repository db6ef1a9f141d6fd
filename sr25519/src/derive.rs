//! Hierarchical key derivation.
//!
//! Two flavours. Hard derivation squeezes a brand new seed out of a
//! transcript keyed by the parent *secret* scalar, so a child reveals
//! nothing about its siblings or parent. Soft derivation produces an
//! additive scalar offset from the parent *public* key and chain code,
//! which lets anyone holding only the public key derive the matching child
//! public key.

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use curve25519::{RistrettoPoint, Scalar};

use crate::constants::CHAIN_CODE_LENGTH;
use crate::context::SigningTranscript;
use crate::errors::SignatureError;
use crate::keys::{Keypair, MiniSecretKey, PublicKey, SecretKey};
use crate::transcript::Transcript;

/// A 32-byte chain code naming one child of a parent key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainCode(pub [u8; CHAIN_CODE_LENGTH]);

fn derivation_transcript(extra: &[u8]) -> Transcript {
    let mut t = Transcript::new(b"SchnorrRistrettoHDKD");
    t.append_message(b"sign-bytes", extra);
    t
}

/// Squeeze the soft-derivation scalar offset and child chain code from a
/// transcript carrying the chain code and parent public key.
fn derive_scalar_and_chaincode(
    t: &mut Transcript,
    cc: &ChainCode,
    public: &PublicKey,
) -> (Scalar, ChainCode) {
    t.append_message(b"chain-code", &cc.0);
    t.append_message(b"public-key", public.as_compressed().as_bytes());

    let scalar = t.challenge_scalar(b"HDKD-scalar");
    let mut chaincode = [0u8; CHAIN_CODE_LENGTH];
    t.challenge_bytes(b"HDKD-chaincode", &mut chaincode);

    (scalar, ChainCode(chaincode))
}

impl SecretKey {
    /// Hard derivation: a fresh mini secret key and chain code.
    ///
    /// The transcript is keyed with the raw secret scalar, so the mapping
    /// from (parent, chain code) to child is one-way.
    pub fn hard_derive_mini_secret_key(
        &self,
        cc: &ChainCode,
        extra: &[u8],
    ) -> (MiniSecretKey, ChainCode) {
        let mut t = derivation_transcript(extra);
        t.append_message(b"chain-code", &cc.0);
        t.append_message(b"secret-key", &self.key.to_bytes());

        let mut mini = [0u8; 32];
        t.challenge_bytes(b"HDKD-hard", &mut mini);
        let mut chaincode = [0u8; CHAIN_CODE_LENGTH];
        t.challenge_bytes(b"HDKD-chaincode", &mut chaincode);

        // The squeeze output is a seed, not a scalar; expansion clamps it.
        (MiniSecretKey(mini), ChainCode(chaincode))
    }

    /// Soft derivation: the child secret key and chain code.
    pub fn derived_key_simple<R>(
        &self,
        cc: &ChainCode,
        extra: &[u8],
        rng: &mut R,
    ) -> (SecretKey, ChainCode)
    where
        R: RngCore + CryptoRng,
    {
        let mut t = derivation_transcript(extra);
        let public = self.to_public();
        let (scalar, chaincode) = derive_scalar_and_chaincode(&mut t, cc, &public);

        // A fresh nonce seed, bound to the derivation transcript and the
        // parent secret so siblings never share witness material.
        let mut nonce = [0u8; 32];
        t.witness_bytes(
            b"HDKD-nonce",
            &mut nonce,
            &[&self.nonce, &self.to_bytes()],
            rng,
        );

        (
            SecretKey {
                key: &self.key + &scalar,
                nonce,
            },
            chaincode,
        )
    }
}

impl PublicKey {
    /// Public-only soft derivation: the child public key and chain code.
    ///
    /// Produces exactly the public half of [`SecretKey::derived_key_simple`]
    /// for the same chain code.
    pub fn derived_key_simple(
        &self,
        cc: &ChainCode,
        extra: &[u8],
    ) -> Result<(PublicKey, ChainCode), SignatureError> {
        let mut t = derivation_transcript(extra);
        let (scalar, chaincode) = derive_scalar_and_chaincode(&mut t, cc, self);

        let parent = self.decompress()?;
        let child = &parent + &RistrettoPoint::mul_base(&scalar);

        Ok((PublicKey(child.compress()), chaincode))
    }
}

impl Keypair {
    /// Hard derivation to a full child keypair.
    pub fn hard_derive_keypair(&self, cc: &ChainCode, extra: &[u8]) -> (Keypair, ChainCode) {
        let (mini, chaincode) = self.secret.hard_derive_mini_secret_key(cc, extra);
        (mini.expand_to_keypair(), chaincode)
    }

    /// Soft derivation to a full child keypair.
    pub fn derived_key_simple<R>(
        &self,
        cc: &ChainCode,
        extra: &[u8],
        rng: &mut R,
    ) -> (Keypair, ChainCode)
    where
        R: RngCore + CryptoRng,
    {
        let (secret, chaincode) = self.secret.derived_key_simple(cc, extra, rng);
        (secret.into_keypair(), chaincode)
    }
}
