//! Merlin-style transcripts over the Strobe duplex.
//!
//! A transcript is an append-only record of a protocol run. Every message
//! is framed by its label and a little-endian u32 length before being
//! absorbed, so challenges bind the full history with no ambiguity between
//! adjacent messages. Witness data enters only through the RNG builder,
//! which keys a forked copy of the state rather than the transcript itself.

use rand::{CryptoRng, RngCore};

use crate::strobe::Strobe128;

const PROTOCOL_LABEL: &[u8] = b"Merlin v1.0";

fn encode_u32_len(len: usize) -> [u8; 4] {
    debug_assert!(len <= u32::MAX as usize);
    (len as u32).to_le_bytes()
}

/// A protocol transcript.
#[derive(Clone)]
pub struct Transcript {
    strobe: Strobe128,
}

impl Transcript {
    /// Begin a transcript under a domain separation label.
    pub fn new(label: &'static [u8]) -> Transcript {
        let mut transcript = Transcript {
            strobe: Strobe128::new(PROTOCOL_LABEL),
        };
        transcript.append_message(b"dom-sep", label);
        transcript
    }

    /// Append a labelled message.
    pub fn append_message(&mut self, label: &'static [u8], message: &[u8]) {
        let data_len = encode_u32_len(message.len());
        self.strobe.meta_ad(label, false);
        self.strobe.meta_ad(&data_len, true);
        self.strobe.ad(message, false);
    }

    /// Append a labelled little-endian integer.
    pub fn append_u64(&mut self, label: &'static [u8], x: u64) {
        self.append_message(label, &x.to_le_bytes());
    }

    /// Fill `dest` with a challenge bound to everything appended so far.
    pub fn challenge_bytes(&mut self, label: &'static [u8], dest: &mut [u8]) {
        let data_len = encode_u32_len(dest.len());
        self.strobe.meta_ad(label, false);
        self.strobe.meta_ad(&data_len, true);
        self.strobe.prf(dest, false);
    }

    /// Fork the transcript into a witness-keyed RNG builder.
    pub fn build_rng(&self) -> TranscriptRngBuilder {
        TranscriptRngBuilder {
            strobe: self.strobe.clone(),
        }
    }
}

/// Accumulates witness data before an RNG is finalized.
pub struct TranscriptRngBuilder {
    strobe: Strobe128,
}

impl TranscriptRngBuilder {
    /// Rekey the forked state with secret witness bytes.
    ///
    /// Keying rather than absorbing means the witness cannot be recovered
    /// from the state, and the output nonce stays deterministic in the
    /// witness and transcript even if the caller's RNG is broken.
    pub fn rekey_with_witness_bytes(
        mut self,
        label: &'static [u8],
        witness: &[u8],
    ) -> TranscriptRngBuilder {
        let witness_len = encode_u32_len(witness.len());
        self.strobe.meta_ad(label, false);
        self.strobe.meta_ad(&witness_len, true);
        self.strobe.key(witness, false);
        self
    }

    /// Mix in external randomness and produce the final RNG.
    pub fn finalize<R>(mut self, rng: &mut R) -> TranscriptRng
    where
        R: RngCore + CryptoRng,
    {
        let random_bytes = {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);
            bytes
        };

        self.strobe.meta_ad(b"rng", false);
        self.strobe.key(&random_bytes, false);

        TranscriptRng {
            strobe: self.strobe,
        }
    }
}

/// The synthetic-nonce RNG produced by [`TranscriptRngBuilder::finalize`].
pub struct TranscriptRng {
    strobe: Strobe128,
}

impl RngCore for TranscriptRng {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.fill_bytes(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.fill_bytes(&mut bytes);
        u64::from_le_bytes(bytes)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let dest_len = encode_u32_len(dest.len());
        self.strobe.meta_ad(&dest_len, false);
        self.strobe.prf(dest, false);
    }
}

impl CryptoRng for TranscriptRng {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hex_to_bytes32(hex: &str) -> [u8; 32] {
        let mut out = [0u8; 32];
        for i in 0..32 {
            out[i] = u8::from_str_radix(&hex[2 * i..2 * i + 2], 16).unwrap();
        }
        out
    }

    #[test]
    fn test_conformance_vector() {
        // Known challenge for this protocol, label and message.
        let mut transcript = Transcript::new(b"test protocol");
        transcript.append_message(b"some label", b"some data");

        let mut challenge = [0u8; 32];
        transcript.challenge_bytes(b"challenge", &mut challenge);

        assert_eq!(
            challenge,
            hex_to_bytes32("d5a21972d0d5fe320c0d263fac7fffb8145aa640af6e9bca177c03c7efcf0615"),
        );
    }

    #[test]
    fn test_challenges_depend_on_messages() {
        let mut a = Transcript::new(b"test protocol");
        let mut b = Transcript::new(b"test protocol");
        a.append_message(b"label", b"message one");
        b.append_message(b"label", b"message two");

        let mut challenge_a = [0u8; 32];
        let mut challenge_b = [0u8; 32];
        a.challenge_bytes(b"challenge", &mut challenge_a);
        b.challenge_bytes(b"challenge", &mut challenge_b);
        assert_ne!(challenge_a, challenge_b);
    }

    #[test]
    fn test_labels_are_not_interchangeable_with_data() {
        let mut a = Transcript::new(b"test protocol");
        let mut b = Transcript::new(b"test protocol");
        a.append_message(b"ab", b"c");
        b.append_message(b"a", b"bc");

        let mut challenge_a = [0u8; 32];
        let mut challenge_b = [0u8; 32];
        a.challenge_bytes(b"challenge", &mut challenge_a);
        b.challenge_bytes(b"challenge", &mut challenge_b);
        assert_ne!(challenge_a, challenge_b);
    }

    #[test]
    fn test_transcript_rng_is_witness_dependent() {
        let transcript = Transcript::new(b"witness test");

        let mut rng_a = transcript
            .build_rng()
            .rekey_with_witness_bytes(b"witness", b"witness one")
            .finalize(&mut StdRng::seed_from_u64(0));
        let mut rng_b = transcript
            .build_rng()
            .rekey_with_witness_bytes(b"witness", b"witness two")
            .finalize(&mut StdRng::seed_from_u64(0));

        let mut out_a = [0u8; 32];
        let mut out_b = [0u8; 32];
        rng_a.fill_bytes(&mut out_a);
        rng_b.fill_bytes(&mut out_b);
        assert_ne!(out_a, out_b);
    }

    #[test]
    fn test_transcript_rng_deterministic_given_seed_and_witness() {
        let transcript = Transcript::new(b"witness test");

        let make_output = || {
            let mut rng = transcript
                .build_rng()
                .rekey_with_witness_bytes(b"witness", b"the witness")
                .finalize(&mut StdRng::seed_from_u64(42));
            let mut out = [0u8; 32];
            rng.fill_bytes(&mut out);
            out
        };

        assert_eq!(make_output(), make_output());
    }
}
