use ark_bls12_381::{Bls12_381 as Engine, Fr, G1Projective, G2Projective};
use ark_ec::pairing::{Pairing, PairingOutput};
use ark_ff::{Field, PrimeField};
use ark_std::{UniformRand, Zero};
use rand::Rng;
use crate::error::SchemeError;
use crate::utils::hash::sha3_digest;
use super::PairingGroup;

/// The BLS12-381 curve as implemented by arkworks.
///
/// arkworks writes the target group additively, so `gt_mul` is `+`,
/// `gt_pow` is scalar multiplication and `gt_inverse` is negation.
#[derive(Clone, Copy, Debug)]
pub struct Bls12_381;

type Gt = PairingOutput<Engine>;

impl PairingGroup for Bls12_381 {
    type Scalar = Fr;
    type G1 = G1Projective;
    type G2 = G2Projective;
    type Gt = Gt;

    fn random_scalar<R: Rng>(rng: &mut R) -> Fr {
        Fr::rand(rng)
    }

    fn random_g1<R: Rng>(rng: &mut R) -> G1Projective {
        G1Projective::rand(rng)
    }

    fn random_g2<R: Rng>(rng: &mut R) -> G2Projective {
        G2Projective::rand(rng)
    }

    fn random_gt<R: Rng>(rng: &mut R) -> Gt {
        Engine::pairing(G1Projective::rand(rng), G2Projective::rand(rng))
    }

    fn scalar_zero() -> Fr {
        Fr::zero()
    }

    fn scalar_inverse(s: Fr) -> Option<Fr> {
        s.inverse()
    }

    fn g1_zero() -> G1Projective {
        G1Projective::zero()
    }

    fn pairing(p: G1Projective, q: G2Projective) -> Gt {
        Engine::pairing(p, q)
    }

    fn gt_one() -> Gt {
        Gt::zero()
    }

    fn gt_mul(a: Gt, b: Gt) -> Gt {
        a + b
    }

    fn gt_pow(a: Gt, s: Fr) -> Gt {
        a * s
    }

    fn gt_inverse(a: Gt) -> Gt {
        -a
    }

    fn hash_to_scalar(data: &str) -> Result<Fr, SchemeError> {
        Ok(Fr::from_le_bytes_mod_order(&sha3_digest(data)))
    }
}
