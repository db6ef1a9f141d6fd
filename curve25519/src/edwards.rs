//! Point representations for the twisted Edwards form of Curve25519.
//!
//! Four coordinate systems cooperate here. `EdwardsPoint` is extended
//! (X : Y : Z : T) with x = X/Z, y = Y/Z, xy = T/Z. `ProjectivePoint` drops
//! T and doubles cheaply. `CompletedPoint` is the ((X : Z), (Y : T)) output
//! of the addition and doubling formulas, converted back as needed. The two
//! Niels forms cache y + x, y - x and a 2d multiple of the xy product so
//! that table lookups feed the unified addition formulas directly.

use core::ops::{Add, Neg, Sub};

use crate::constants::EDWARDS_D2;
use crate::field::FieldElement;

/// A point in extended coordinates.
#[derive(Copy, Clone, Debug)]
pub struct EdwardsPoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) t: FieldElement,
}

/// A point in projective coordinates (X : Y : Z).
#[derive(Copy, Clone, Debug)]
pub struct ProjectivePoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
}

/// The intermediate form produced by addition and doubling.
#[derive(Copy, Clone, Debug)]
pub struct CompletedPoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) t: FieldElement,
}

/// A precomputed point with Z = 1: (y + x, y - x, 2dxy).
#[derive(Copy, Clone, Debug)]
pub struct AffineNielsPoint {
    pub(crate) y_plus_x: FieldElement,
    pub(crate) y_minus_x: FieldElement,
    pub(crate) xy2d: FieldElement,
}

/// A cached projective point: (Y + X, Y - X, Z, 2dT).
#[derive(Copy, Clone, Debug)]
pub struct ProjectiveNielsPoint {
    pub(crate) y_plus_x: FieldElement,
    pub(crate) y_minus_x: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) t2d: FieldElement,
}

impl EdwardsPoint {
    pub fn identity() -> EdwardsPoint {
        EdwardsPoint {
            x: FieldElement::ZERO,
            y: FieldElement::ONE,
            z: FieldElement::ONE,
            t: FieldElement::ZERO,
        }
    }

    pub(crate) fn as_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }

    pub(crate) fn as_projective_niels(&self) -> ProjectiveNielsPoint {
        ProjectiveNielsPoint {
            y_plus_x: &self.y + &self.x,
            y_minus_x: &self.y - &self.x,
            z: self.z,
            t2d: &self.t * &EDWARDS_D2,
        }
    }

    /// Normalize to Z = 1 and cache in affine Niels form.
    pub(crate) fn as_affine_niels(&self) -> AffineNielsPoint {
        let recip = self.z.invert();
        let x = &self.x * &recip;
        let y = &self.y * &recip;
        let xy2d = &(&x * &y) * &EDWARDS_D2;
        AffineNielsPoint {
            y_plus_x: &y + &x,
            y_minus_x: &y - &x,
            xy2d,
        }
    }

    pub fn double(&self) -> EdwardsPoint {
        self.as_projective().double().as_extended()
    }

    /// Compute `2^k * self` by iterated doubling. Requires `k > 0`.
    pub(crate) fn mul_by_pow2(&self, k: u32) -> EdwardsPoint {
        debug_assert!(k > 0);
        let mut s = self.as_projective();
        for _ in 0..(k - 1) {
            s = s.double().as_projective();
        }
        // Convert the final doubling straight to extended coordinates.
        s.double().as_extended()
    }
}

impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &EdwardsPoint) -> bool {
        // Cross-multiply to compare x and y without inverting Z.
        &self.x * &other.z == &other.x * &self.z && &self.y * &other.z == &other.y * &self.z
    }
}

impl Eq for EdwardsPoint {}

impl ProjectivePoint {
    pub(crate) fn identity() -> ProjectivePoint {
        ProjectivePoint {
            x: FieldElement::ZERO,
            y: FieldElement::ONE,
            z: FieldElement::ONE,
        }
    }

    pub(crate) fn as_extended(&self) -> EdwardsPoint {
        EdwardsPoint {
            x: &self.x * &self.z,
            y: &self.y * &self.z,
            z: self.z.square(),
            t: &self.x * &self.y,
        }
    }

    /// Doubling in projective coordinates, 3M + 4S.
    pub(crate) fn double(&self) -> CompletedPoint {
        let xx = self.x.square();
        let yy = self.y.square();
        let zz2 = self.z.square2();
        let x_plus_y = &self.x + &self.y;
        let x_plus_y_sq = x_plus_y.square();
        let yy_plus_xx = &yy + &xx;
        let yy_minus_xx = &yy - &xx;

        CompletedPoint {
            x: &x_plus_y_sq - &yy_plus_xx,
            y: yy_plus_xx,
            z: yy_minus_xx,
            t: &zz2 - &yy_minus_xx,
        }
    }
}

impl CompletedPoint {
    pub(crate) fn as_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            x: &self.x * &self.t,
            y: &self.y * &self.z,
            z: &self.z * &self.t,
        }
    }

    pub(crate) fn as_extended(&self) -> EdwardsPoint {
        EdwardsPoint {
            x: &self.x * &self.t,
            y: &self.y * &self.z,
            z: &self.z * &self.t,
            t: &self.x * &self.y,
        }
    }
}

impl AffineNielsPoint {
    pub(crate) fn identity() -> AffineNielsPoint {
        AffineNielsPoint {
            y_plus_x: FieldElement::ONE,
            y_minus_x: FieldElement::ONE,
            xy2d: FieldElement::ZERO,
        }
    }

    pub(crate) fn conditional_assign(&mut self, other: &AffineNielsPoint, choice: bool) {
        self.y_plus_x.conditional_assign(&other.y_plus_x, choice);
        self.y_minus_x.conditional_assign(&other.y_minus_x, choice);
        self.xy2d.conditional_assign(&other.xy2d, choice);
    }

    /// Branchless negation: swap the sum and difference coordinates and
    /// negate the xy term.
    pub(crate) fn conditional_negate(&mut self, choice: bool) {
        let swapped = AffineNielsPoint {
            y_plus_x: self.y_minus_x,
            y_minus_x: self.y_plus_x,
            xy2d: -&self.xy2d,
        };
        self.conditional_assign(&swapped, choice);
    }
}

impl ProjectiveNielsPoint {
    pub(crate) fn identity() -> ProjectiveNielsPoint {
        ProjectiveNielsPoint {
            y_plus_x: FieldElement::ONE,
            y_minus_x: FieldElement::ONE,
            z: FieldElement::ONE,
            t2d: FieldElement::ZERO,
        }
    }
}

impl<'b> Add<&'b ProjectiveNielsPoint> for &EdwardsPoint {
    type Output = CompletedPoint;
    fn add(self, other: &'b ProjectiveNielsPoint) -> CompletedPoint {
        let y_plus_x = &self.y + &self.x;
        let y_minus_x = &self.y - &self.x;
        let pp = &y_plus_x * &other.y_plus_x;
        let mm = &y_minus_x * &other.y_minus_x;
        let tt2d = &self.t * &other.t2d;
        let zz = &self.z * &other.z;
        let zz2 = &zz + &zz;

        CompletedPoint {
            x: &pp - &mm,
            y: &pp + &mm,
            z: &zz2 + &tt2d,
            t: &zz2 - &tt2d,
        }
    }
}

impl<'b> Sub<&'b ProjectiveNielsPoint> for &EdwardsPoint {
    type Output = CompletedPoint;
    fn sub(self, other: &'b ProjectiveNielsPoint) -> CompletedPoint {
        let y_plus_x = &self.y + &self.x;
        let y_minus_x = &self.y - &self.x;
        let pm = &y_plus_x * &other.y_minus_x;
        let mp = &y_minus_x * &other.y_plus_x;
        let tt2d = &self.t * &other.t2d;
        let zz = &self.z * &other.z;
        let zz2 = &zz + &zz;

        CompletedPoint {
            x: &pm - &mp,
            y: &pm + &mp,
            z: &zz2 - &tt2d,
            t: &zz2 + &tt2d,
        }
    }
}

impl<'b> Add<&'b AffineNielsPoint> for &EdwardsPoint {
    type Output = CompletedPoint;
    fn add(self, other: &'b AffineNielsPoint) -> CompletedPoint {
        let y_plus_x = &self.y + &self.x;
        let y_minus_x = &self.y - &self.x;
        let pp = &y_plus_x * &other.y_plus_x;
        let mm = &y_minus_x * &other.y_minus_x;
        let txy2d = &self.t * &other.xy2d;
        let z2 = &self.z + &self.z;

        CompletedPoint {
            x: &pp - &mm,
            y: &pp + &mm,
            z: &z2 + &txy2d,
            t: &z2 - &txy2d,
        }
    }
}

impl<'b> Sub<&'b AffineNielsPoint> for &EdwardsPoint {
    type Output = CompletedPoint;
    fn sub(self, other: &'b AffineNielsPoint) -> CompletedPoint {
        let y_plus_x = &self.y + &self.x;
        let y_minus_x = &self.y - &self.x;
        let pm = &y_plus_x * &other.y_minus_x;
        let mp = &y_minus_x * &other.y_plus_x;
        let txy2d = &self.t * &other.xy2d;
        let z2 = &self.z + &self.z;

        CompletedPoint {
            x: &pm - &mp,
            y: &pm + &mp,
            z: &z2 - &txy2d,
            t: &z2 + &txy2d,
        }
    }
}

impl<'b> Add<&'b EdwardsPoint> for &EdwardsPoint {
    type Output = EdwardsPoint;
    fn add(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        (self + &other.as_projective_niels()).as_extended()
    }
}

impl<'b> Sub<&'b EdwardsPoint> for &EdwardsPoint {
    type Output = EdwardsPoint;
    fn sub(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        (self - &other.as_projective_niels()).as_extended()
    }
}

impl Neg for &EdwardsPoint {
    type Output = EdwardsPoint;
    fn neg(self) -> EdwardsPoint {
        EdwardsPoint {
            x: -&self.x,
            y: self.y,
            z: self.z,
            t: -&self.t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator_table::basepoint;

    #[test]
    fn test_identity_is_neutral() {
        let b = *basepoint();
        let id = EdwardsPoint::identity();
        assert_eq!(&b + &id, b);
        assert_eq!(&id + &b, b);
    }

    #[test]
    fn test_double_matches_add() {
        let b = *basepoint();
        assert_eq!(b.double(), &b + &b);
    }

    #[test]
    fn test_mul_by_pow2_matches_doubling() {
        let b = *basepoint();
        let mut expected = b;
        for _ in 0..5 {
            expected = expected.double();
        }
        assert_eq!(b.mul_by_pow2(5), expected);
    }

    #[test]
    fn test_add_negation_is_identity() {
        let b = *basepoint();
        assert_eq!(&b + &(-&b), EdwardsPoint::identity());
        assert_eq!(&b - &b, EdwardsPoint::identity());
    }

    #[test]
    fn test_add_is_associative() {
        let b = *basepoint();
        let b2 = b.double();
        let lhs = &(&b + &b2) + &b;
        let rhs = &b + &(&b2 + &b);
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_affine_niels_addition_matches_projective() {
        let b = *basepoint();
        let p = b.double();
        let via_affine = (&b + &p.as_affine_niels()).as_extended();
        let via_projective = (&b + &p.as_projective_niels()).as_extended();
        assert_eq!(via_affine, via_projective);
    }

    #[test]
    fn test_basepoint_satisfies_curve_equation() {
        let b = basepoint();
        let recip = b.z.invert();
        let x = &b.x * &recip;
        let y = &b.y * &recip;
        // -x^2 + y^2 = 1 + d x^2 y^2
        let lhs = &y.square() - &x.square();
        let xxyy = &x.square() * &y.square();
        let rhs = &FieldElement::ONE + &(&crate::constants::EDWARDS_D * &xxyy);
        assert_eq!(lhs, rhs);
    }
}
