//! Pairing groups the schemes are instantiated over.
//!
//! Every scheme in [`crate::schemes`] is written against [`PairingGroup`], so
//! the same construction can be measured on each supported curve:
//! * `BN254` via `rabe-bn`
//! * `BLS12-381` via arkworks
//!
use std::{
    fmt::{Debug, Display, Formatter, Result as FormatResult},
    ops::{Add, Mul, Neg, Sub},
    str::FromStr,
};
use rand::Rng;
use crate::error::{BenchError, SchemeError};

mod bls12_381;
mod bn254;

pub use self::bls12_381::Bls12_381;
pub use self::bn254::Bn254;

/// A type-3 bilinear group `e: G1 x G2 -> Gt` with scalar field `Scalar`.
///
/// `Gt` is written multiplicatively here regardless of how the backing crate
/// exposes it.
pub trait PairingGroup: 'static {
    type Scalar: Copy
        + Debug
        + PartialEq
        + Add<Output = Self::Scalar>
        + Sub<Output = Self::Scalar>
        + Mul<Output = Self::Scalar>
        + Neg<Output = Self::Scalar>;
    type G1: Copy
        + Debug
        + PartialEq
        + Add<Output = Self::G1>
        + Sub<Output = Self::G1>
        + Mul<Self::Scalar, Output = Self::G1>;
    type G2: Copy
        + Debug
        + PartialEq
        + Add<Output = Self::G2>
        + Sub<Output = Self::G2>
        + Mul<Self::Scalar, Output = Self::G2>;
    type Gt: Copy + Debug + PartialEq;

    fn random_scalar<R: Rng>(rng: &mut R) -> Self::Scalar;
    fn random_g1<R: Rng>(rng: &mut R) -> Self::G1;
    fn random_g2<R: Rng>(rng: &mut R) -> Self::G2;
    fn random_gt<R: Rng>(rng: &mut R) -> Self::Gt;

    fn scalar_zero() -> Self::Scalar;
    fn scalar_inverse(s: Self::Scalar) -> Option<Self::Scalar>;
    fn g1_zero() -> Self::G1;

    fn pairing(p: Self::G1, q: Self::G2) -> Self::Gt;
    fn gt_one() -> Self::Gt;
    fn gt_mul(a: Self::Gt, b: Self::Gt) -> Self::Gt;
    fn gt_pow(a: Self::Gt, s: Self::Scalar) -> Self::Gt;
    fn gt_inverse(a: Self::Gt) -> Self::Gt;

    /// Maps a label into the scalar field through SHA3-256.
    fn hash_to_scalar(data: &str) -> Result<Self::Scalar, SchemeError>;

    /// Inverse of a scalar, failing on zero.
    fn try_inverse(s: Self::Scalar) -> Result<Self::Scalar, SchemeError> {
        Self::scalar_inverse(s).ok_or_else(|| SchemeError::new("scalar has no inverse"))
    }

    /// Hashes a label onto the subgroup generated by `base`.
    fn hash_onto<T: Mul<Self::Scalar, Output = T>>(base: T, data: &str) -> Result<T, SchemeError> {
        Ok(base * Self::hash_to_scalar(data)?)
    }
}

/// The named curves a benchmark can run on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Curve {
    Bn254,
    Bls12_381,
}

impl Curve {
    pub const ALL: [Curve; 2] = [Curve::Bn254, Curve::Bls12_381];

    pub fn name(&self) -> &'static str {
        match self {
            Curve::Bn254 => "BN254",
            Curve::Bls12_381 => "BLS12-381",
        }
    }
}

impl Display for Curve {
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        f.write_str(self.name())
    }
}

impl FromStr for Curve {
    type Err = BenchError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let normalized: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .collect::<String>()
            .to_ascii_uppercase();
        match normalized.as_str() {
            "BN254" => Ok(Curve::Bn254),
            "BLS12381" => Ok(Curve::Bls12_381),
            _ => Err(BenchError::UnsupportedCurve(name.to_string())),
        }
    }
}
