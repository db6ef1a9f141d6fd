//! A minimal Strobe-128 duplex, exactly the subset the transcript layer
//! needs: AD, meta-AD, PRF and KEY operations over Keccak-f[1600].

use crate::keccak::permute_bytes;

/// Security parameter 128 leaves 166 rate bytes of the 200-byte state.
const STROBE_R: u8 = 166;

const FLAG_I: u8 = 1;
const FLAG_A: u8 = 1 << 1;
const FLAG_C: u8 = 1 << 2;
const FLAG_T: u8 = 1 << 3;
const FLAG_M: u8 = 1 << 4;
const FLAG_K: u8 = 1 << 5;

/// A Strobe-128 sponge state.
///
/// `pos` is the duplex cursor within the rate, `pos_begin` marks where the
/// current operation started (for framing), and `cur_flags` remembers the
/// operation in flight so that streamed continuations can be checked.
#[derive(Clone)]
pub(crate) struct Strobe128 {
    state: [u8; 200],
    pos: u8,
    pos_begin: u8,
    cur_flags: u8,
}

impl Strobe128 {
    pub fn new(protocol_label: &[u8]) -> Strobe128 {
        let mut state = [0u8; 200];
        state[0..6].copy_from_slice(&[1, STROBE_R + 2, 1, 0, 1, 96]);
        state[6..18].copy_from_slice(b"STROBEv1.0.2");
        permute_bytes(&mut state);

        let mut strobe = Strobe128 {
            state,
            pos: 0,
            pos_begin: 0,
            cur_flags: 0,
        };

        strobe.meta_ad(protocol_label, false);

        strobe
    }

    /// Absorb associated data.
    pub fn ad(&mut self, data: &[u8], more: bool) {
        self.begin_op(FLAG_A, more);
        self.absorb(data);
    }

    /// Absorb framing data (labels, lengths).
    pub fn meta_ad(&mut self, data: &[u8], more: bool) {
        self.begin_op(FLAG_M | FLAG_A, more);
        self.absorb(data);
    }

    /// Squeeze pseudorandom output, zeroing the squeezed rate bytes.
    pub fn prf(&mut self, data: &mut [u8], more: bool) {
        self.begin_op(FLAG_I | FLAG_A | FLAG_C, more);
        self.squeeze(data);
    }

    /// Rekey by overwriting rate bytes with key material.
    pub fn key(&mut self, data: &[u8], more: bool) {
        self.begin_op(FLAG_A | FLAG_C, more);
        self.overwrite(data);
    }

    fn run_f(&mut self) {
        self.state[self.pos as usize] ^= self.pos_begin;
        self.state[(self.pos + 1) as usize] ^= 0x04;
        self.state[(STROBE_R + 1) as usize] ^= 0x80;
        permute_bytes(&mut self.state);
        self.pos = 0;
        self.pos_begin = 0;
    }

    fn absorb(&mut self, data: &[u8]) {
        for byte in data {
            self.state[self.pos as usize] ^= byte;
            self.pos += 1;
            if self.pos == STROBE_R {
                self.run_f();
            }
        }
    }

    fn overwrite(&mut self, data: &[u8]) {
        for byte in data {
            self.state[self.pos as usize] = *byte;
            self.pos += 1;
            if self.pos == STROBE_R {
                self.run_f();
            }
        }
    }

    fn squeeze(&mut self, data: &mut [u8]) {
        for byte in data {
            *byte = self.state[self.pos as usize];
            self.state[self.pos as usize] = 0;
            self.pos += 1;
            if self.pos == STROBE_R {
                self.run_f();
            }
        }
    }

    fn begin_op(&mut self, flags: u8, more: bool) {
        if more {
            assert_eq!(
                self.cur_flags, flags,
                "tried to continue op {:#b} while in op {:#b}",
                flags, self.cur_flags,
            );
            return;
        }

        // Transport operations would need a counterparty; nothing here
        // produces them.
        assert_eq!(flags & FLAG_T, 0, "transport operations are not supported");

        let old_begin = self.pos_begin;
        self.pos_begin = self.pos + 1;
        self.cur_flags = flags;

        self.absorb(&[old_begin, flags]);

        // Cipher and key operations must start on a fresh block.
        let force_f = 0 != (flags & (FLAG_C | FLAG_K));
        if force_f && self.pos != 0 {
            self.run_f();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operations_are_order_sensitive() {
        let mut a = Strobe128::new(b"test protocol");
        let mut b = Strobe128::new(b"test protocol");

        a.ad(b"first", false);
        a.ad(b"second", false);
        b.ad(b"second", false);
        b.ad(b"first", false);

        let mut out_a = [0u8; 32];
        let mut out_b = [0u8; 32];
        a.prf(&mut out_a, false);
        b.prf(&mut out_b, false);
        assert_ne!(out_a, out_b);
    }

    #[test]
    fn test_streamed_absorb_matches_one_shot() {
        let mut one_shot = Strobe128::new(b"streaming test");
        let mut streamed = Strobe128::new(b"streaming test");

        one_shot.ad(b"hello world", false);
        streamed.ad(b"hello ", false);
        streamed.ad(b"world", true);

        let mut out_a = [0u8; 32];
        let mut out_b = [0u8; 32];
        one_shot.prf(&mut out_a, false);
        streamed.prf(&mut out_b, false);
        assert_eq!(out_a, out_b);
    }

    #[test]
    fn test_long_absorb_crosses_rate_boundary() {
        let mut strobe = Strobe128::new(b"rate test");
        let data = [0xabu8; 1024];
        strobe.ad(&data, false);
        let mut out = [0u8; 64];
        strobe.prf(&mut out, false);
        assert_ne!(out, [0u8; 64]);
    }

    #[test]
    fn test_key_separates_states() {
        let mut a = Strobe128::new(b"key test");
        let mut b = a.clone();

        a.key(b"secret one", false);
        b.key(b"secret two", false);

        let mut out_a = [0u8; 32];
        let mut out_b = [0u8; 32];
        a.prf(&mut out_a, false);
        b.prf(&mut out_b, false);
        assert_ne!(out_a, out_b);
    }

    #[test]
    #[should_panic(expected = "tried to continue op")]
    fn test_continuation_with_changed_flags_panics() {
        let mut strobe = Strobe128::new(b"panic test");
        strobe.ad(b"data", false);
        let mut out = [0u8; 16];
        strobe.prf(&mut out, true);
    }
}
