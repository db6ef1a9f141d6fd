//! sr25519: Schnorr signatures over the Ristretto group of Curve25519.
//!
//! This library implements the schnorrkel-compatible signature scheme used
//! by Substrate-based chains:
//! - Ristretto compressed points for public keys and commitments
//! - Merlin/Strobe transcripts for domain-separated challenges
//! - synthetic nonces keyed by the secret nonce seed, so signing stays
//!   safe under a weak external RNG
//! - hierarchical key derivation with hard and soft paths
//!
//! # Example
//!
//! ```
//! use sr25519::{Keypair, SigningContext};
//!
//! let keypair = Keypair::generate(&mut rand::rng());
//! let ctx = SigningContext::new(b"my application");
//!
//! let signature = keypair.sign(ctx.bytes(b"hello world"));
//! assert!(keypair.verify(ctx.bytes(b"hello world"), &signature));
//!
//! // Wire form round trip.
//! let parsed = sr25519::Signature::from_bytes(&signature.to_bytes()).unwrap();
//! assert!(keypair.verify(ctx.bytes(b"hello world"), &parsed));
//! ```
//!
//! # Security Considerations
//!
//! - Always pick a distinct signing context per application
//! - Protect the secret key and its nonce seed from unauthorized access
//! - Hard derivation hides the parent; soft derivation deliberately lets
//!   public-key holders follow the same path

mod constants;
mod context;
mod derive;
mod errors;
mod keccak;
mod keys;
mod signatures;
mod strobe;
mod transcript;


pub use constants::{
    CHAIN_CODE_LENGTH, KEYPAIR_LENGTH, MINI_SECRET_KEY_LENGTH, PUBLIC_KEY_LENGTH,
    SECRET_KEY_LENGTH, SIGNATURE_LENGTH,
};
pub use context::{SigningContext, SigningTranscript};
pub use derive::ChainCode;
pub use errors::SignatureError;
pub use keys::{Keypair, MiniSecretKey, PublicKey, SecretKey};
pub use signatures::Signature;
pub use transcript::{Transcript, TranscriptRng, TranscriptRngBuilder};
