//! `BSW07` scheme by John Bethencourt, Amit Sahai, Brent Waters.
//!
//! * Developped by John Bethencourt, Amit Sahai, Brent Waters, "Ciphertext-Policy Attribute-Based Encryption"
//! * Published in Security and Privacy, 2007. SP'07. IEEE Symposium on. IEEE
//! * Available from <https://doi.org/10.1109/SP.2007.11>
//! * Type: encryption (attribute-based)
//! * Setting: bilinear groups (asymmetric)
//!
//! Messages are target-group elements; the policy is a conjunction of
//! attributes.
//!
//! # Examples
//!
//! ```
//! use rabe_bench::group::{Bn254, PairingGroup};
//! use rabe_bench::schemes::bsw07::*;
//! let (pk, msk) = setup::<Bn254>();
//! let msg = Bn254::random_gt(&mut rand::thread_rng());
//! let ct = encrypt(&pk, &msg, "A and B").unwrap();
//! let sk = keygen(&pk, &msk, &[String::from("A"), String::from("B")]).unwrap();
//! assert_eq!(decrypt(&sk, &ct).unwrap(), msg);
//! ```
use crate::error::SchemeError;
use crate::group::PairingGroup;
use crate::utils::{
    policy::{msp::AbePolicy, parse, satisfies},
    secretsharing::gen_shares,
};

/// A BSW Public Key (PK)
pub struct CpAbePublicKey<G: PairingGroup> {
    pub g1: G::G1,
    pub g2: G::G2,
    pub h: G::G1,
    pub e_gg_alpha: G::Gt,
}

/// A BSW Master Key (MSK)
pub struct CpAbeMasterKey<G: PairingGroup> {
    pub beta: G::Scalar,
    pub g2_alpha: G::G2,
}

/// A BSW Ciphertext (CT)
pub struct CpAbeCiphertext<G: PairingGroup> {
    pub policy: String,
    pub c: G::G1,
    pub c_p: G::Gt,
    pub c_y: Vec<(String, G::G1, G::G2)>,
}

/// A BSW Secret User Key (SK)
pub struct CpAbeSecretKey<G: PairingGroup> {
    pub d: G::G2,
    pub d_j: Vec<(String, G::G2, G::G1)>,
}

impl<G: PairingGroup> CpAbeSecretKey<G> {
    /// The attributes this key was issued for.
    pub fn attributes(&self) -> Vec<String> {
        self.d_j.iter().map(|d| d.0.clone()).collect()
    }
}

/// The setup algorithm of BSW CP-ABE. Generates a new CpAbePublicKey and a new CpAbeMasterKey.
pub fn setup<G: PairingGroup>() -> (CpAbePublicKey<G>, CpAbeMasterKey<G>) {
    // random number generator
    let mut rng = rand::thread_rng();
    // generator of group G1: g1 and generator of group G2: g2
    let g1 = G::random_g1(&mut rng);
    let g2 = G::random_g2(&mut rng);
    // random
    let beta = G::random_scalar(&mut rng);
    let alpha = G::random_scalar(&mut rng);
    let g2_alpha = g2 * alpha;
    // calculate the pairing between g1 and g2^alpha
    let e_gg_alpha = G::pairing(g1, g2_alpha);
    (
        CpAbePublicKey {
            g1,
            g2,
            h: g1 * beta,
            e_gg_alpha,
        },
        CpAbeMasterKey { beta, g2_alpha },
    )
}

/// The key generation algorithm of BSW CP-ABE. Generates a CpAbeSecretKey using a CpAbePublicKey, a CpAbeMasterKey and a set of attributes.
///
/// # Arguments
///
///	* `pk` - A Public Key (PK), generated by the function setup()
///	* `msk` - A Master Key (MSK), generated by the function setup()
///	* `attributes` - The attributes assigned to this user key
///
pub fn keygen<G: PairingGroup>(
    pk: &CpAbePublicKey<G>,
    msk: &CpAbeMasterKey<G>,
    attributes: &[String],
) -> Result<CpAbeSecretKey<G>, SchemeError> {
    if attributes.is_empty() {
        return Err(SchemeError::new("empty attributes!"));
    }
    let mut rng = rand::thread_rng();
    let r = G::random_scalar(&mut rng);
    let g2_r = pk.g2 * r;
    let d = (msk.g2_alpha + g2_r) * G::try_inverse(msk.beta)?;
    let mut d_j: Vec<(String, G::G2, G::G1)> = Vec::with_capacity(attributes.len());
    for attr in attributes {
        let r_j = G::random_scalar(&mut rng);
        d_j.push((
            attr.clone(),
            g2_r + G::hash_onto(pk.g2, attr)? * r_j,
            pk.g1 * r_j,
        ));
    }
    Ok(CpAbeSecretKey { d, d_j })
}

/// The encrypt algorithm of BSW CP-ABE. Encapsulates a target-group message under a conjunctive policy.
///
/// # Arguments
///
///	* `pk` - A Public Key (PK), generated by the function setup()
///	* `msg` - The message, an element of the target group
///	* `policy` - An access policy such as `ATTR1 and ATTR2`
///
pub fn encrypt<G: PairingGroup>(
    pk: &CpAbePublicKey<G>,
    msg: &G::Gt,
    policy: &str,
) -> Result<CpAbeCiphertext<G>, SchemeError> {
    let attributes = parse(policy)?;
    let msp = AbePolicy::from_conjunction(&attributes)?;
    let mut rng = rand::thread_rng();
    // the shared root secret
    let s = G::random_scalar(&mut rng);
    let shares = gen_shares::<G, _>(s, &msp, &mut rng);
    let mut c_y: Vec<(String, G::G1, G::G2)> = Vec::with_capacity(shares.len());
    for (attr, share) in shares {
        let hashed = G::hash_onto(pk.g2, &attr)?;
        c_y.push((attr, pk.g1 * share, hashed * share));
    }
    Ok(CpAbeCiphertext {
        policy: policy.to_string(),
        c: pk.h * s,
        c_p: G::gt_mul(G::gt_pow(pk.e_gg_alpha, s), *msg),
        c_y,
    })
}

/// The decrypt algorithm of BSW CP-ABE. Recovers the message if the key's attributes satisfy the policy.
///
/// # Arguments
///
///	* `sk` - A Secret Key (SK), generated by the function keygen()
///	* `ct` - A BSW CP-ABE Ciphertext
///
pub fn decrypt<G: PairingGroup>(
    sk: &CpAbeSecretKey<G>,
    ct: &CpAbeCiphertext<G>,
) -> Result<G::Gt, SchemeError> {
    let required = parse(&ct.policy)?;
    if !satisfies(&sk.attributes(), &required) {
        return Err(SchemeError::policy_not_satisfied("Error in bsw decrypt: attributes in sk do not match policy in ct."));
    }
    // every coefficient of a conjunction is one
    let mut a = G::gt_one();
    for (attr, c_j, c_j_p) in ct.c_y.iter() {
        let (d_j, d_j_p) = match sk.d_j.iter().find(|d| &d.0 == attr) {
            Some(d) => (d.1, d.2),
            None => return Err(SchemeError::new(&format!("missing key component for {}", attr))),
        };
        a = G::gt_mul(
            a,
            G::gt_mul(G::pairing(*c_j, d_j), G::gt_inverse(G::pairing(d_j_p, *c_j_p))),
        );
    }
    Ok(G::gt_mul(G::gt_mul(ct.c_p, a), G::gt_inverse(G::pairing(ct.c, sk.d))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::{Bls12_381, Bn254};

    fn attrs(names: &[&str]) -> Vec<String> {
        names.iter().map(|a| a.to_string()).collect()
    }

    fn check_and<G: PairingGroup>() {
        let (pk, msk) = setup::<G>();
        let msg = G::random_gt(&mut rand::thread_rng());
        let ct = encrypt(&pk, &msg, "A and B").unwrap();
        // a superset of the policy attributes matches
        let sk_matching = keygen(&pk, &msk, &attrs(&["A", "B", "C"])).unwrap();
        assert_eq!(decrypt(&sk_matching, &ct).unwrap(), msg);
        // a partial set does not
        let sk_not_matching = keygen(&pk, &msk, &attrs(&["A", "D"])).unwrap();
        assert!(decrypt(&sk_not_matching, &ct).unwrap_err().is_policy_not_satisfied());
    }

    #[test]
    fn test_and_bn254() {
        check_and::<Bn254>();
    }

    #[test]
    fn test_and_bls12_381() {
        check_and::<Bls12_381>();
    }

    #[test]
    fn test_single_attribute() {
        let (pk, msk) = setup::<Bn254>();
        let msg = Bn254::random_gt(&mut rand::thread_rng());
        let ct = encrypt(&pk, &msg, "ATTR1").unwrap();
        let sk = keygen(&pk, &msk, &attrs(&["ATTR1"])).unwrap();
        assert_eq!(decrypt(&sk, &ct).unwrap(), msg);
    }

    #[test]
    fn test_foreign_key_yields_wrong_message() {
        let (pk, _msk) = setup::<Bn254>();
        let (other_pk, other_msk) = setup::<Bn254>();
        let msg = Bn254::random_gt(&mut rand::thread_rng());
        let ct = encrypt(&pk, &msg, "A and B").unwrap();
        let sk = keygen(&other_pk, &other_msk, &attrs(&["A", "B"])).unwrap();
        assert_ne!(decrypt(&sk, &ct).unwrap(), msg);
    }

    #[test]
    fn test_invalid_input() {
        let (pk, msk) = setup::<Bn254>();
        assert!(keygen(&pk, &msk, &[]).is_err());
        let msg = Bn254::random_gt(&mut rand::thread_rng());
        assert!(encrypt(&pk, &msg, "A or B").is_err());
    }
}
