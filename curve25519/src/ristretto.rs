//! The Ristretto group over Curve25519.
//!
//! Ristretto quotients the Edwards curve by its 4-torsion and the 2-torsion
//! of the twist, leaving a prime-order group with a single canonical 32-byte
//! encoding per element. Internally an element is still an `EdwardsPoint`;
//! equality and encoding are coset-aware.

use core::ops::{Add, Neg, Sub};
use serde::{Deserialize, Serialize};

use crate::constants::{EDWARDS_D, INVSQRT_A_MINUS_D, SQRT_M1};
use crate::edwards::EdwardsPoint;
use crate::field::FieldElement;
use crate::generator_table::{basepoint, basepoint_table};
use crate::msm;
use crate::scalar::Scalar;

/// The canonical 32-byte encoding of a Ristretto element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedRistretto(pub [u8; 32]);

impl CompressedRistretto {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    pub fn from_slice(bytes: &[u8]) -> Option<CompressedRistretto> {
        let array: [u8; 32] = bytes.try_into().ok()?;
        Some(CompressedRistretto(array))
    }

    /// Decode to a group element.
    ///
    /// Returns `None` for any of the encodings the format forbids: a field
    /// element at or above p, a negative s, a decoded point with negative t,
    /// or one with y = 0. Accepting those would give some elements a second
    /// encoding.
    pub fn decompress(&self) -> Option<RistrettoPoint> {
        let s = FieldElement::from_bytes(&self.0);
        if s.to_bytes() != self.0 || s.is_negative() {
            return None;
        }

        // With a = -1: x^2 = 4 s^2 / (a d (1 + a s^2)^2 - (1 - a s^2)^2).
        let ss = s.square();
        let u1 = &FieldElement::ONE - &ss;
        let u2 = &FieldElement::ONE + &ss;
        let u2_sqr = u2.square();

        let v = &(&(-&EDWARDS_D) * &u1.square()) - &u2_sqr;

        let (ok, inv_sqrt) = FieldElement::sqrt_ratio_i(&FieldElement::ONE, &(&v * &u2_sqr));

        let den_x = &inv_sqrt * &u2;
        let den_y = &inv_sqrt * &(&den_x * &v);

        let mut x = &(&s + &s) * &den_x;
        let x_is_negative = x.is_negative();
        x.conditional_negate(x_is_negative);
        let y = &u1 * &den_y;

        let t = &x * &y;

        if !ok || t.is_negative() || y.is_zero() {
            return None;
        }

        Some(RistrettoPoint(EdwardsPoint {
            x,
            y,
            z: FieldElement::ONE,
            t,
        }))
    }
}

/// An element of the Ristretto group.
#[derive(Copy, Clone, Debug)]
pub struct RistrettoPoint(pub(crate) EdwardsPoint);

impl RistrettoPoint {
    pub fn identity() -> RistrettoPoint {
        RistrettoPoint(EdwardsPoint::identity())
    }

    /// The canonical generator, sharing the Ed25519 basepoint.
    pub fn generator() -> RistrettoPoint {
        RistrettoPoint(*basepoint())
    }

    /// Fixed-base multiplication `scalar * B` through the window table.
    pub fn mul_base(scalar: &Scalar) -> RistrettoPoint {
        RistrettoPoint(basepoint_table().mul(scalar))
    }

    /// Encode to the canonical 32 bytes.
    pub fn compress(&self) -> CompressedRistretto {
        let (x, y, z, t) = (&self.0.x, &self.0.y, &self.0.z, &self.0.t);

        let u1 = &(z + y) * &(z - y);
        let u2 = x * y;

        // One inverse square root yields 1/Z and the encoding denominator.
        let (_, inv_sqrt) = FieldElement::sqrt_ratio_i(&FieldElement::ONE, &(&u1 * &u2.square()));
        let i1 = &inv_sqrt * &u1;
        let i2 = &inv_sqrt * &u2;
        let z_inv = &i1 * &(&i2 * t);

        let ix = x * &SQRT_M1;
        let iy = y * &SQRT_M1;
        let enchanted_denominator = &i1 * &INVSQRT_A_MINUS_D;

        // Rotate into the coset representative with nonnegative xy.
        let rotate = (t * &z_inv).is_negative();

        let mut x = *x;
        let mut y = *y;
        let mut den_inv = i2;
        x.conditional_assign(&iy, rotate);
        y.conditional_assign(&ix, rotate);
        den_inv.conditional_assign(&enchanted_denominator, rotate);

        let y_is_negative = (&x * &z_inv).is_negative();
        y.conditional_negate(y_is_negative);

        let mut s = &den_inv * &(z - &y);
        let s_is_negative = s.is_negative();
        s.conditional_negate(s_is_negative);

        CompressedRistretto(s.to_bytes())
    }

    /// Compute `a * A + b * B` with B the generator, in variable time.
    /// Verification-only: scalars must be public.
    pub fn vartime_double_scalar_mul_basepoint(
        a: &Scalar,
        point: &RistrettoPoint,
        b: &Scalar,
    ) -> RistrettoPoint {
        RistrettoPoint(msm::double_scalar_mul_basepoint(a, &point.0, b))
    }
}

impl PartialEq for RistrettoPoint {
    fn eq(&self, other: &RistrettoPoint) -> bool {
        // Equal cosets satisfy X1 Y2 = Y1 X2 or Y1 Y2 = X1 X2.
        let x1y2 = &self.0.x * &other.0.y;
        let y1x2 = &self.0.y * &other.0.x;
        let y1y2 = &self.0.y * &other.0.y;
        let x1x2 = &self.0.x * &other.0.x;
        x1y2 == y1x2 || y1y2 == x1x2
    }
}

impl Eq for RistrettoPoint {}

impl<'b> Add<&'b RistrettoPoint> for &RistrettoPoint {
    type Output = RistrettoPoint;
    fn add(self, other: &'b RistrettoPoint) -> RistrettoPoint {
        RistrettoPoint(&self.0 + &other.0)
    }
}

impl<'b> Sub<&'b RistrettoPoint> for &RistrettoPoint {
    type Output = RistrettoPoint;
    fn sub(self, other: &'b RistrettoPoint) -> RistrettoPoint {
        RistrettoPoint(&self.0 - &other.0)
    }
}

impl Neg for &RistrettoPoint {
    type Output = RistrettoPoint;
    fn neg(self) -> RistrettoPoint {
        RistrettoPoint(-&self.0)
    }
}
