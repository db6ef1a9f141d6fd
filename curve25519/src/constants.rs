//! Field constants for the twisted Edwards form of Curve25519,
//! -x^2 + y^2 = 1 + d x^2 y^2 with d = -121665/121666.

use crate::field::FieldElement;

/// sqrt(-1) mod p, the root with even canonical encoding.
pub(crate) const SQRT_M1: FieldElement = FieldElement([
    1718705420411056,
    234908883556509,
    2233514472574048,
    2117202627021982,
    765476049583133,
]);

/// The Edwards curve constant d = -121665/121666 mod p.
pub(crate) const EDWARDS_D: FieldElement = FieldElement([
    929955233495203,
    466365720129213,
    1662059464998953,
    2033849074728123,
    1442794654840575,
]);

/// 2d, used by the Niels point representations.
pub(crate) const EDWARDS_D2: FieldElement = FieldElement([
    1859910466990425,
    932731440258426,
    1072319116312658,
    1815898335770999,
    633789495995903,
]);

/// 1/sqrt(a - d) with a = -1, used by the Ristretto encoding.
pub(crate) const INVSQRT_A_MINUS_D: FieldElement = FieldElement([
    278908739862762,
    821645201101625,
    8113234426968,
    1777959178193151,
    2118520810568447,
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_d_ratio() {
        // d = -121665/121666
        let mut bytes = [0u8; 32];
        bytes[0..4].copy_from_slice(&121665u32.to_le_bytes());
        let num = FieldElement::from_bytes(&bytes);
        bytes[0..4].copy_from_slice(&121666u32.to_le_bytes());
        let den = FieldElement::from_bytes(&bytes);
        assert_eq!(EDWARDS_D, &(-&num) * &den.invert());
        assert_eq!(EDWARDS_D2, &EDWARDS_D + &EDWARDS_D);
    }

    #[test]
    fn test_invsqrt_a_minus_d() {
        // a - d with a = -1
        let a_minus_d = &(-&FieldElement::ONE) - &EDWARDS_D;
        let inv_sq = INVSQRT_A_MINUS_D.square();
        assert_eq!(&a_minus_d * &inv_sq, FieldElement::ONE);
    }
}
