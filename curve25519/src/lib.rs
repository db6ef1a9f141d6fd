//! Curve25519 group arithmetic for the Ristretto signature stack.
//!
//! This crate provides the base field GF(2^255 - 19), the scalar field
//! modulo the group order, twisted Edwards point arithmetic with
//! precomputed basepoint tables, and the Ristretto encoding that quotients
//! away the curve's cofactor. Table selection is branchless; the
//! variable-time multi-scalar path is reserved for public inputs.

mod constants;
mod edwards;
mod field;
mod generator_table;
mod msm;
mod ristretto;
mod scalar;

pub use edwards::EdwardsPoint;
pub use field::FieldElement;
pub use generator_table::{basepoint, basepoint_table, EdwardsBasepointTable};
pub use ristretto::{CompressedRistretto, RistrettoPoint};
pub use scalar::{divide_scalar_bytes_by_cofactor, multiply_scalar_bytes_by_cofactor, Scalar};
