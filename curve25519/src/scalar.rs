//! Scalar field of the curve.
//! l = 2^252 + 27742317777372353535851937790883648493
//!
//! A `Scalar` is 32 little-endian bytes. Arithmetic unpacks into five 52-bit
//! limbs and runs in Montgomery form with R = 2^260, repacking the reduced
//! result afterwards.

use core::ops::{Add, Mul, Sub};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

/// An integer modulo the group order l.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scalar {
    pub(crate) bytes: [u8; 32],
}

/// Five 52-bit limbs, little-endian.
#[derive(Copy, Clone, Debug)]
pub(crate) struct UnpackedScalar(pub(crate) [u64; 5]);

/// The group order l.
const L: UnpackedScalar = UnpackedScalar([
    0x0002631a5cf5d3ed,
    0x000dea2f79cd6581,
    0x000000000014def9,
    0x0000000000000000,
    0x0000100000000000,
]);

/// -l^(-1) mod 2^52, the Montgomery reduction factor.
const LFACTOR: u64 = 0x51da312547e1b;

/// R = 2^260 mod l.
const R: UnpackedScalar = UnpackedScalar([
    0x000f48bd6721e6ed,
    0x0003bab5ac67e45a,
    0x000fffffeb35e51b,
    0x000fffffffffffff,
    0x00000fffffffffff,
]);

/// R^2 = 2^520 mod l.
const RR: UnpackedScalar = UnpackedScalar([
    0x0009d265e952d13b,
    0x000d63c715bea69f,
    0x0005be65cb687604,
    0x0003dceec73d217f,
    0x000009411b7c309a,
]);

const MASK_52: u64 = (1u64 << 52) - 1;

impl Scalar {
    pub const ZERO: Scalar = Scalar { bytes: [0u8; 32] };

    pub const ONE: Scalar = Scalar {
        bytes: [
            1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0,
        ],
    };

    /// Reduce 32 little-endian bytes modulo l.
    pub fn from_bytes_mod_order(bytes: [u8; 32]) -> Scalar {
        let unpacked = UnpackedScalar::from_bytes(&bytes);
        // Montgomery multiplying by RR maps x to x * R, and by R back to x,
        // reducing on the way.
        let x_r = UnpackedScalar::montgomery_mul(&unpacked, &RR);
        UnpackedScalar::montgomery_mul(&x_r, &UnpackedScalar([1, 0, 0, 0, 0])).pack()
    }

    /// Reduce 64 little-endian bytes modulo l.
    pub fn from_bytes_mod_order_wide(input: &[u8; 64]) -> Scalar {
        UnpackedScalar::from_bytes_wide(input).pack()
    }

    /// Interpret 32 bytes as a scalar with the top bit forced clear.
    ///
    /// No reduction is performed, so the result may be a non-canonical
    /// representative of its residue class. Group operations on such scalars
    /// still land in the right class; this is the form wire signatures and
    /// clamped keys arrive in.
    pub fn from_bits(mut bytes: [u8; 32]) -> Scalar {
        bytes[31] &= 0x7f;
        Scalar { bytes }
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.bytes
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Sample a uniform scalar by wide reduction of 64 random bytes.
    pub fn random<T: RngCore + CryptoRng + ?Sized>(rng: &mut T) -> Scalar {
        let mut bytes = [0u8; 64];
        rng.fill_bytes(&mut bytes);
        Scalar::from_bytes_mod_order_wide(&bytes)
    }

    pub(crate) fn unpack(&self) -> UnpackedScalar {
        UnpackedScalar::from_bytes(&self.bytes)
    }

    /// Width-w non-adjacent form: 256 digits, each zero or odd in
    /// (-2^(w-1), 2^(w-1)), with at most one nonzero digit in any w
    /// consecutive positions.
    pub fn non_adjacent_form(&self, w: usize) -> [i8; 256] {
        debug_assert!((2..=8).contains(&w));

        let mut naf = [0i8; 256];

        let mut x_u64 = [0u64; 5];
        for i in 0..4 {
            let mut word = [0u8; 8];
            word.copy_from_slice(&self.bytes[i * 8..(i + 1) * 8]);
            x_u64[i] = u64::from_le_bytes(word);
        }

        let width = 1u64 << w;
        let window_mask = width - 1;

        let mut pos = 0;
        let mut carry = 0u64;
        while pos < 256 {
            let u64_idx = pos / 64;
            let bit_idx = pos % 64;
            let bit_buf: u64 = if bit_idx < 64 - w {
                x_u64[u64_idx] >> bit_idx
            } else {
                (x_u64[u64_idx] >> bit_idx) | (x_u64[1 + u64_idx] << (64 - bit_idx))
            };

            let window = carry + (bit_buf & window_mask);

            if window & 1 == 0 {
                pos += 1;
                continue;
            }

            if window < width / 2 {
                carry = 0;
                naf[pos] = window as i8;
            } else {
                carry = 1;
                naf[pos] = (window as i8).wrapping_sub(width as i8);
            }

            pos += w;
        }

        naf
    }

    /// Signed radix-16 digits, each in [-8, 8). Requires bit 255 clear.
    pub fn to_radix_16(&self) -> [i8; 64] {
        debug_assert!(self.bytes[31] <= 127);
        let mut output = [0i8; 64];

        for i in 0..32 {
            output[2 * i] = (self.bytes[i] & 15) as i8;
            output[2 * i + 1] = (self.bytes[i] >> 4) as i8;
        }

        // Recenter each digit into [-8, 8) by pushing a carry upward.
        for i in 0..63 {
            let carry = (output[i] + 8) >> 4;
            output[i] -= carry << 4;
            output[i + 1] += carry;
        }

        output
    }
}

/// Divide a little-endian scalar encoding by 8 in place-free form.
///
/// Ed25519 expanded secret keys carry a multiple of the cofactor; shifting
/// out the low three bits recovers the scalar the group actually sees.
pub fn divide_scalar_bytes_by_cofactor(scalar: &mut [u8; 32]) {
    let mut low = 0u8;
    for byte in scalar.iter_mut().rev() {
        let r = *byte & 0b0000_0111;
        *byte >>= 3;
        *byte += low;
        low = r << 5;
    }
}

/// Multiply a little-endian scalar encoding by 8, the inverse of
/// [`divide_scalar_bytes_by_cofactor`].
pub fn multiply_scalar_bytes_by_cofactor(scalar: &mut [u8; 32]) {
    let mut high = 0u8;
    for byte in scalar.iter_mut() {
        let r = *byte & 0b1110_0000;
        *byte <<= 3;
        *byte += high;
        high = r >> 5;
    }
}

impl<'b> Add<&'b Scalar> for &Scalar {
    type Output = Scalar;
    fn add(self, rhs: &'b Scalar) -> Scalar {
        UnpackedScalar::add(&self.unpack(), &rhs.unpack()).pack()
    }
}

impl<'b> Sub<&'b Scalar> for &Scalar {
    type Output = Scalar;
    fn sub(self, rhs: &'b Scalar) -> Scalar {
        UnpackedScalar::sub(&self.unpack(), &rhs.unpack()).pack()
    }
}

impl<'b> Mul<&'b Scalar> for &Scalar {
    type Output = Scalar;
    fn mul(self, rhs: &'b Scalar) -> Scalar {
        UnpackedScalar::mul(&self.unpack(), &rhs.unpack()).pack()
    }
}

#[inline(always)]
fn m(x: u64, y: u64) -> u128 {
    (x as u128) * (y as u128)
}

impl UnpackedScalar {
    pub(crate) const ZERO: UnpackedScalar = UnpackedScalar([0, 0, 0, 0, 0]);

    /// Unpack 32 bytes into five 52-bit limbs. Bit 255 is kept; values up to
    /// 2^255 - 1 are representable.
    fn from_bytes(bytes: &[u8; 32]) -> UnpackedScalar {
        let mut words = [0u64; 4];
        for i in 0..4 {
            let mut word = [0u8; 8];
            word.copy_from_slice(&bytes[i * 8..(i + 1) * 8]);
            words[i] = u64::from_le_bytes(word);
        }

        let top_mask = (1u64 << 48) - 1;
        let mut s = UnpackedScalar::ZERO;

        s.0[0] = words[0] & MASK_52;
        s.0[1] = ((words[0] >> 52) | (words[1] << 12)) & MASK_52;
        s.0[2] = ((words[1] >> 40) | (words[2] << 24)) & MASK_52;
        s.0[3] = ((words[2] >> 28) | (words[3] << 36)) & MASK_52;
        s.0[4] = (words[3] >> 16) & top_mask;

        s
    }

    /// Reduce a 64-byte little-endian value modulo l.
    fn from_bytes_wide(bytes: &[u8; 64]) -> UnpackedScalar {
        let mut words = [0u64; 8];
        for i in 0..8 {
            let mut word = [0u8; 8];
            word.copy_from_slice(&bytes[i * 8..(i + 1) * 8]);
            words[i] = u64::from_le_bytes(word);
        }

        let mut lo = UnpackedScalar::ZERO;
        let mut hi = UnpackedScalar::ZERO;

        lo.0[0] = words[0] & MASK_52;
        lo.0[1] = ((words[0] >> 52) | (words[1] << 12)) & MASK_52;
        lo.0[2] = ((words[1] >> 40) | (words[2] << 24)) & MASK_52;
        lo.0[3] = ((words[2] >> 28) | (words[3] << 36)) & MASK_52;
        lo.0[4] = ((words[3] >> 16) | (words[4] << 48)) & MASK_52;
        hi.0[0] = (words[4] >> 4) & MASK_52;
        hi.0[1] = ((words[4] >> 56) | (words[5] << 8)) & MASK_52;
        hi.0[2] = ((words[5] >> 44) | (words[6] << 20)) & MASK_52;
        hi.0[3] = ((words[6] >> 32) | (words[7] << 32)) & MASK_52;
        hi.0[4] = words[7] >> 20;

        // lo * R / R = lo mod l, and hi * R^2 / R = hi * 2^260 mod l.
        lo = UnpackedScalar::montgomery_mul(&lo, &R);
        hi = UnpackedScalar::montgomery_mul(&hi, &RR);

        UnpackedScalar::add(&hi, &lo)
    }

    /// Pack the canonical value back into 32 bytes.
    fn pack(&self) -> Scalar {
        let s = &self.0;
        let mut bytes = [0u8; 32];

        bytes[0] = s[0] as u8;
        bytes[1] = (s[0] >> 8) as u8;
        bytes[2] = (s[0] >> 16) as u8;
        bytes[3] = (s[0] >> 24) as u8;
        bytes[4] = (s[0] >> 32) as u8;
        bytes[5] = (s[0] >> 40) as u8;
        bytes[6] = ((s[0] >> 48) | (s[1] << 4)) as u8;
        bytes[7] = (s[1] >> 4) as u8;
        bytes[8] = (s[1] >> 12) as u8;
        bytes[9] = (s[1] >> 20) as u8;
        bytes[10] = (s[1] >> 28) as u8;
        bytes[11] = (s[1] >> 36) as u8;
        bytes[12] = (s[1] >> 44) as u8;
        bytes[13] = s[2] as u8;
        bytes[14] = (s[2] >> 8) as u8;
        bytes[15] = (s[2] >> 16) as u8;
        bytes[16] = (s[2] >> 24) as u8;
        bytes[17] = (s[2] >> 32) as u8;
        bytes[18] = (s[2] >> 40) as u8;
        bytes[19] = ((s[2] >> 48) | (s[3] << 4)) as u8;
        bytes[20] = (s[3] >> 4) as u8;
        bytes[21] = (s[3] >> 12) as u8;
        bytes[22] = (s[3] >> 20) as u8;
        bytes[23] = (s[3] >> 28) as u8;
        bytes[24] = (s[3] >> 36) as u8;
        bytes[25] = (s[3] >> 44) as u8;
        bytes[26] = s[4] as u8;
        bytes[27] = (s[4] >> 8) as u8;
        bytes[28] = (s[4] >> 16) as u8;
        bytes[29] = (s[4] >> 24) as u8;
        bytes[30] = (s[4] >> 32) as u8;
        bytes[31] = (s[4] >> 40) as u8;

        Scalar { bytes }
    }

    /// a + b mod l. Inputs must be below 2^255.
    pub(crate) fn add(a: &UnpackedScalar, b: &UnpackedScalar) -> UnpackedScalar {
        let mut sum = UnpackedScalar::ZERO;

        let mut carry = 0u64;
        for i in 0..5 {
            carry = a.0[i] + b.0[i] + (carry >> 52);
            sum.0[i] = carry & MASK_52;
        }

        UnpackedScalar::sub(&sum, &L)
    }

    /// a - b mod l.
    pub(crate) fn sub(a: &UnpackedScalar, b: &UnpackedScalar) -> UnpackedScalar {
        let mut difference = UnpackedScalar::ZERO;

        let mut borrow = 0u64;
        for i in 0..5 {
            borrow = a.0[i].wrapping_sub(b.0[i] + (borrow >> 63));
            difference.0[i] = borrow & MASK_52;
        }

        // Conditionally add back l when the subtraction underflowed.
        let underflow_mask = ((borrow >> 63) ^ 1).wrapping_sub(1);
        let mut carry = 0u64;
        for i in 0..5 {
            carry = (carry >> 52) + difference.0[i] + (L.0[i] & underflow_mask);
            difference.0[i] = carry & MASK_52;
        }

        difference
    }

    /// a * b mod l.
    pub(crate) fn mul(a: &UnpackedScalar, b: &UnpackedScalar) -> UnpackedScalar {
        let ab = UnpackedScalar::montgomery_reduce(&UnpackedScalar::mul_internal(a, b));
        // The first reduction divided by R; multiply by R^2 / R to restore.
        UnpackedScalar::montgomery_reduce(&UnpackedScalar::mul_internal(&ab, &RR))
    }

    /// a * b / R mod l.
    fn montgomery_mul(a: &UnpackedScalar, b: &UnpackedScalar) -> UnpackedScalar {
        UnpackedScalar::montgomery_reduce(&UnpackedScalar::mul_internal(a, b))
    }

    /// Schoolbook product as nine 104-bit columns.
    fn mul_internal(a: &UnpackedScalar, b: &UnpackedScalar) -> [u128; 9] {
        let a = &a.0;
        let b = &b.0;
        let mut z = [0u128; 9];

        z[0] = m(a[0], b[0]);
        z[1] = m(a[0], b[1]) + m(a[1], b[0]);
        z[2] = m(a[0], b[2]) + m(a[1], b[1]) + m(a[2], b[0]);
        z[3] = m(a[0], b[3]) + m(a[1], b[2]) + m(a[2], b[1]) + m(a[3], b[0]);
        z[4] = m(a[0], b[4]) + m(a[1], b[3]) + m(a[2], b[2]) + m(a[3], b[1]) + m(a[4], b[0]);
        z[5] = m(a[1], b[4]) + m(a[2], b[3]) + m(a[3], b[2]) + m(a[4], b[1]);
        z[6] = m(a[2], b[4]) + m(a[3], b[3]) + m(a[4], b[2]);
        z[7] = m(a[3], b[4]) + m(a[4], b[3]);
        z[8] = m(a[4], b[4]);

        z
    }

    /// Montgomery reduction: limbs / R mod l.
    fn montgomery_reduce(limbs: &[u128; 9]) -> UnpackedScalar {
        #[inline(always)]
        fn part1(sum: u128) -> (u128, u64) {
            let p = (sum as u64).wrapping_mul(LFACTOR) & MASK_52;
            ((sum + m(p, L.0[0])) >> 52, p)
        }

        #[inline(always)]
        fn part2(sum: u128) -> (u128, u64) {
            let w = (sum as u64) & MASK_52;
            (sum >> 52, w)
        }

        let l = &L.0;

        // Choose multiples of l to clear the low 260 bits. l[3] is zero, so
        // its columns drop out.
        let (carry, n0) = part1(limbs[0]);
        let (carry, n1) = part1(carry + limbs[1] + m(n0, l[1]));
        let (carry, n2) = part1(carry + limbs[2] + m(n0, l[2]) + m(n1, l[1]));
        let (carry, n3) = part1(carry + limbs[3] + m(n1, l[2]) + m(n2, l[1]));
        let (carry, n4) = part1(carry + limbs[4] + m(n0, l[4]) + m(n2, l[2]) + m(n3, l[1]));

        // The high half plus carries is the result, at most 2l.
        let (carry, r0) = part2(carry + limbs[5] + m(n1, l[4]) + m(n3, l[2]) + m(n4, l[1]));
        let (carry, r1) = part2(carry + limbs[6] + m(n2, l[4]) + m(n4, l[2]));
        let (carry, r2) = part2(carry + limbs[7] + m(n3, l[4]));
        let (carry, r3) = part2(carry + limbs[8] + m(n4, l[4]));
        let r4 = carry as u64;

        UnpackedScalar::sub(&UnpackedScalar([r0, r1, r2, r3, r4]), &L)
    }
}
