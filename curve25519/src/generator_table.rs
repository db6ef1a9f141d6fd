//! Precomputed multiples of the Ed25519 basepoint.
//!
//! The basepoint and its tables are derived once at first use rather than
//! baked in as limb constants: y = 4/5 mod p fixes the point, and the window
//! tables follow from repeated doubling.

use std::sync::LazyLock;

use crate::edwards::{AffineNielsPoint, EdwardsPoint};
use crate::field::FieldElement;
use crate::scalar::Scalar;

/// Eight multiples P, 2P, ..., 8P in affine Niels form, selectable by a
/// signed digit without data-dependent indexing.
#[derive(Copy, Clone)]
pub(crate) struct LookupTable([AffineNielsPoint; 8]);

impl LookupTable {
    fn from_point(p: &EdwardsPoint) -> LookupTable {
        let mut multiples = [*p; 8];
        for i in 1..8 {
            multiples[i] = &multiples[i - 1] + p;
        }
        let mut table = [AffineNielsPoint::identity(); 8];
        for i in 0..8 {
            table[i] = multiples[i].as_affine_niels();
        }
        LookupTable(table)
    }

    /// Select `x * P` for `x` in [-8, 8] by scanning the whole table.
    pub(crate) fn select(&self, x: i8) -> AffineNielsPoint {
        debug_assert!((-8..=8).contains(&x));

        let xmask = x >> 7;
        let xabs = ((x + xmask) ^ xmask) as u8;

        let mut t = AffineNielsPoint::identity();
        for j in 1..9u8 {
            t.conditional_assign(&self.0[(j - 1) as usize], xabs == j);
        }
        t.conditional_negate(xmask & 1 == 1);
        t
    }
}

/// A radix-16 table for fixed-base scalar multiplication: window i holds
/// the first eight multiples of `16^(2i) * B`.
pub struct EdwardsBasepointTable([LookupTable; 32]);

impl EdwardsBasepointTable {
    fn create(basepoint: &EdwardsPoint) -> EdwardsBasepointTable {
        let mut windows = [LookupTable::from_point(basepoint); 32];
        let mut p = *basepoint;
        for window in windows.iter_mut() {
            *window = LookupTable::from_point(&p);
            p = p.mul_by_pow2(8);
        }
        EdwardsBasepointTable(windows)
    }

    /// Fixed-base multiplication `scalar * B` over signed radix-16 digits.
    pub fn mul(&self, scalar: &Scalar) -> EdwardsPoint {
        let a = scalar.to_radix_16();

        let mut p = EdwardsPoint::identity();

        // Accumulate the odd-position digits, scale by 16, then fold in the
        // even positions: sum a_i 16^i = 16 sum a_(2i+1) 256^i + sum a_(2i) 256^i.
        for i in (0..64).filter(|i| i % 2 == 1) {
            p = (&p + &self.0[i / 2].select(a[i])).as_extended();
        }

        p = p.mul_by_pow2(4);

        for i in (0..64).filter(|i| i % 2 == 0) {
            p = (&p + &self.0[i / 2].select(a[i])).as_extended();
        }

        p
    }
}

/// Odd multiples B, 3B, 5B, ..., 127B for width-8 NAF recoding.
pub(crate) struct NafLookupTable8([AffineNielsPoint; 64]);

impl NafLookupTable8 {
    fn from_point(p: &EdwardsPoint) -> NafLookupTable8 {
        let mut odd_multiples = [*p; 64];
        let p2 = p.double();
        for i in 0..63 {
            odd_multiples[i + 1] = &odd_multiples[i] + &p2;
        }
        let mut table = [AffineNielsPoint::identity(); 64];
        for i in 0..64 {
            table[i] = odd_multiples[i].as_affine_niels();
        }
        NafLookupTable8(table)
    }

    /// Look up `x * B` for odd `x` in [1, 127].
    pub(crate) fn select(&self, x: usize) -> AffineNielsPoint {
        debug_assert!(x & 1 == 1 && x < 128);
        self.0[x / 2]
    }
}

static ED25519_BASEPOINT: LazyLock<EdwardsPoint> = LazyLock::new(|| {
    // y = 4/5 mod p; x is the root of (y^2 - 1)/(d y^2 + 1) with even
    // encoding, which is the conventional basepoint sign.
    let mut four = [0u8; 32];
    four[0] = 4;
    let mut five = [0u8; 32];
    five[0] = 5;
    let y = &FieldElement::from_bytes(&four) * &FieldElement::from_bytes(&five).invert();

    let yy = y.square();
    let u = &yy - &FieldElement::ONE;
    let v = &(&crate::constants::EDWARDS_D * &yy) + &FieldElement::ONE;
    let (_, x) = FieldElement::sqrt_ratio_i(&u, &v);

    EdwardsPoint {
        x,
        y,
        z: FieldElement::ONE,
        t: &x * &y,
    }
});

static BASEPOINT_TABLE: LazyLock<EdwardsBasepointTable> =
    LazyLock::new(|| EdwardsBasepointTable::create(&ED25519_BASEPOINT));

static BASEPOINT_ODD_MULTIPLES: LazyLock<NafLookupTable8> =
    LazyLock::new(|| NafLookupTable8::from_point(&ED25519_BASEPOINT));

/// The Ed25519 basepoint in extended coordinates.
pub fn basepoint() -> &'static EdwardsPoint {
    &ED25519_BASEPOINT
}

/// The radix-16 window table over the basepoint.
pub fn basepoint_table() -> &'static EdwardsBasepointTable {
    &BASEPOINT_TABLE
}

pub(crate) fn basepoint_odd_multiples() -> &'static NafLookupTable8 {
    &BASEPOINT_ODD_MULTIPLES
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar_from_u64(x: u64) -> Scalar {
        let mut bytes = [0u8; 32];
        bytes[0..8].copy_from_slice(&x.to_le_bytes());
        Scalar::from_bits(bytes)
    }

    #[test]
    fn test_table_mul_small_scalars() {
        let b = *basepoint();
        let table = basepoint_table();

        assert_eq!(table.mul(&Scalar::ZERO), EdwardsPoint::identity());
        assert_eq!(table.mul(&Scalar::ONE), b);
        assert_eq!(table.mul(&scalar_from_u64(2)), b.double());

        let mut acc = EdwardsPoint::identity();
        for _ in 0..17 {
            acc = &acc + &b;
        }
        assert_eq!(table.mul(&scalar_from_u64(17)), acc);
    }

    #[test]
    fn test_table_mul_is_homomorphic() {
        let table = basepoint_table();
        let a = scalar_from_u64(4_294_967_311);
        let b = scalar_from_u64(1_000_003);
        let sum = &a + &b;
        assert_eq!(
            &table.mul(&a) + &table.mul(&b),
            table.mul(&sum)
        );
    }

    #[test]
    fn test_lookup_select_negative() {
        let b = *basepoint();
        let table = LookupTable::from_point(&b);
        let plus_three = table.select(3);
        let minus_three = table.select(-3);

        let triple = &b.double() + &b;
        assert_eq!(
            (&EdwardsPoint::identity() + &plus_three).as_extended(),
            triple
        );
        assert_eq!(
            (&EdwardsPoint::identity() + &minus_three).as_extended(),
            -&triple
        );
        assert_eq!(
            (&EdwardsPoint::identity() + &table.select(0)).as_extended(),
            EdwardsPoint::identity()
        );
    }

    #[test]
    fn test_naf_table_odd_multiples() {
        let b = *basepoint();
        let table = basepoint_odd_multiples();

        let mut expected = b;
        let b2 = b.double();
        for x in (1..128usize).step_by(2) {
            let entry = (&EdwardsPoint::identity() + &table.select(x)).as_extended();
            assert_eq!(entry, expected);
            expected = &expected + &b2;
        }
    }
}
