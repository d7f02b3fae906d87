use rabe_bn::{Fr, Group, Gt, G1, G2, pairing};
use rand::Rng;
use crate::error::SchemeError;
use crate::utils::hash::sha3_digest;
use super::PairingGroup;

/// The Barreto-Naehrig curve BN254 as implemented by `rabe-bn`.
#[derive(Clone, Copy, Debug)]
pub struct Bn254;

impl PairingGroup for Bn254 {
    type Scalar = Fr;
    type G1 = G1;
    type G2 = G2;
    type Gt = Gt;

    fn random_scalar<R: Rng>(rng: &mut R) -> Fr {
        rng.gen()
    }

    fn random_g1<R: Rng>(rng: &mut R) -> G1 {
        rng.gen()
    }

    fn random_g2<R: Rng>(rng: &mut R) -> G2 {
        rng.gen()
    }

    fn random_gt<R: Rng>(rng: &mut R) -> Gt {
        rng.gen()
    }

    fn scalar_zero() -> Fr {
        Fr::zero()
    }

    fn scalar_inverse(s: Fr) -> Option<Fr> {
        s.inverse()
    }

    fn g1_zero() -> G1 {
        G1::zero()
    }

    fn pairing(p: G1, q: G2) -> Gt {
        pairing(p, q)
    }

    fn gt_one() -> Gt {
        Gt::one()
    }

    fn gt_mul(a: Gt, b: Gt) -> Gt {
        a * b
    }

    fn gt_pow(a: Gt, s: Fr) -> Gt {
        a.pow(s)
    }

    fn gt_inverse(a: Gt) -> Gt {
        a.inverse()
    }

    fn hash_to_scalar(data: &str) -> Result<Fr, SchemeError> {
        Ok(Fr::from_slice(&sha3_digest(data))?)
    }
}
