//! `Waters11` scheme by Brent Waters.
//!
//! * Developped by Brent Waters, "Ciphertext-Policy Attribute-Based Encryption: An Expressive, Efficient, and Provably Secure Realization"
//! * Published in Public Key Cryptography - PKC 2011
//! * Available from <https://eprint.iacr.org/2008/290.pdf>
//! * Type: encryption (attribute-based)
//! * Setting: bilinear groups (asymmetric), small universe
//!
//! The attribute universe is fixed when the scheme is constructed: attributes
//! are the integers `1..=universe_size`, written in decimal.
use crate::error::SchemeError;
use crate::group::PairingGroup;
use crate::utils::{
    policy::{msp::AbePolicy, parse, satisfies},
    secretsharing::gen_shares,
};

/// A Waters11 Public Key (PK)
pub struct Waters11PublicKey<G: PairingGroup> {
    pub g1: G::G1,
    pub g2: G::G2,
    pub g1_a: G::G1,
    pub h: Vec<G::G1>,
    pub e_gg_alpha: G::Gt,
}

/// A Waters11 Master Key (MSK)
pub struct Waters11MasterKey<G: PairingGroup> {
    pub g1_alpha: G::G1,
}

/// A Waters11 Secret Key (SK)
pub struct Waters11SecretKey<G: PairingGroup> {
    pub attr: Vec<String>,
    pub k_0: G::G1,
    pub l: G::G2,
    pub k: Vec<(String, G::G1)>,
}

/// A Waters11 Ciphertext (CT)
pub struct Waters11Ciphertext<G: PairingGroup> {
    pub policy: String,
    pub c: G::Gt,
    pub c_0: G::G2,
    pub rows: Vec<(String, G::G1, G::G2)>,
}

/// The Waters11 small-universe construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Waters11 {
    universe_size: usize,
}

impl Waters11 {
    /// Creates the scheme over the attribute universe `1..=universe_size`.
    pub fn new(universe_size: usize) -> Result<Waters11, SchemeError> {
        if universe_size == 0 {
            return Err(SchemeError::new("waters11 needs a non-empty attribute universe"));
        }
        Ok(Waters11 { universe_size })
    }

    pub fn universe_size(&self) -> usize {
        self.universe_size
    }

    /// Position of an attribute in the universe.
    fn index(&self, attr: &str) -> Result<usize, SchemeError> {
        match attr.parse::<usize>() {
            Ok(value) if value >= 1 && value <= self.universe_size => Ok(value - 1),
            _ => Err(SchemeError::new(&format!(
                "attribute {} is outside the universe 1..={}",
                attr, self.universe_size
            ))),
        }
    }

    /// The setup algorithm of Waters11. Generates a Waters11PublicKey and a Waters11MasterKey.
    pub fn setup<G: PairingGroup>(&self) -> (Waters11PublicKey<G>, Waters11MasterKey<G>) {
        let mut rng = rand::thread_rng();
        let g1 = G::random_g1(&mut rng);
        let g2 = G::random_g2(&mut rng);
        let alpha = G::random_scalar(&mut rng);
        let a = G::random_scalar(&mut rng);
        let h = (0..self.universe_size)
            .map(|_| G::random_g1(&mut rng))
            .collect();
        (
            Waters11PublicKey {
                g1,
                g2,
                g1_a: g1 * a,
                h,
                e_gg_alpha: G::pairing(g1, g2 * alpha),
            },
            Waters11MasterKey { g1_alpha: g1 * alpha },
        )
    }

    /// The key generation algorithm of Waters11.
    ///
    /// # Arguments
    ///
    ///	* `pk` - A Public Key (PK), generated by setup()
    ///	* `msk` - A Master Key (MSK), generated by setup()
    ///	* `attributes` - Attributes from the universe, e.g. `["1", "2"]`
    ///
    pub fn keygen<G: PairingGroup>(
        &self,
        pk: &Waters11PublicKey<G>,
        msk: &Waters11MasterKey<G>,
        attributes: &[String],
    ) -> Result<Waters11SecretKey<G>, SchemeError> {
        if attributes.is_empty() {
            return Err(SchemeError::new("empty attributes!"));
        }
        let mut rng = rand::thread_rng();
        let t = G::random_scalar(&mut rng);
        let mut k: Vec<(String, G::G1)> = Vec::with_capacity(attributes.len());
        for attr in attributes {
            let index = self.index(attr)?;
            k.push((attr.clone(), pk.h[index] * t));
        }
        Ok(Waters11SecretKey {
            attr: attributes.to_vec(),
            k_0: msk.g1_alpha + pk.g1_a * t,
            l: pk.g2 * t,
            k,
        })
    }

    /// The encrypt algorithm of Waters11.
    ///
    /// # Arguments
    ///
    ///	* `pk` - A Public Key (PK), generated by setup()
    ///	* `msg` - The message, an element of the target group
    ///	* `policy` - A conjunction of universe attributes, e.g. `1 and 2`
    ///
    pub fn encrypt<G: PairingGroup>(
        &self,
        pk: &Waters11PublicKey<G>,
        msg: &G::Gt,
        policy: &str,
    ) -> Result<Waters11Ciphertext<G>, SchemeError> {
        let attributes = parse(policy)?;
        let msp = AbePolicy::from_conjunction(&attributes)?;
        let mut rng = rand::thread_rng();
        let s = G::random_scalar(&mut rng);
        let shares = gen_shares::<G, _>(s, &msp, &mut rng);
        let mut rows: Vec<(String, G::G1, G::G2)> = Vec::with_capacity(shares.len());
        for (attr, share) in shares {
            let index = self.index(&attr)?;
            let r_i = G::random_scalar(&mut rng);
            let c_i = pk.g1_a * share - pk.h[index] * r_i;
            rows.push((attr, c_i, pk.g2 * r_i));
        }
        Ok(Waters11Ciphertext {
            policy: policy.to_string(),
            c: G::gt_mul(G::gt_pow(pk.e_gg_alpha, s), *msg),
            c_0: pk.g2 * s,
            rows,
        })
    }

    /// The decrypt algorithm of Waters11.
    ///
    /// # Arguments
    ///
    ///	* `ct` - A Waters11 Ciphertext
    ///	* `sk` - A Secret Key (SK), generated by keygen()
    ///
    pub fn decrypt<G: PairingGroup>(
        &self,
        ct: &Waters11Ciphertext<G>,
        sk: &Waters11SecretKey<G>,
    ) -> Result<G::Gt, SchemeError> {
        let required = parse(&ct.policy)?;
        if !satisfies(&sk.attr, &required) {
            return Err(SchemeError::policy_not_satisfied("Error in waters11 decrypt: attributes in sk do not match policy in ct."));
        }
        let mut denominator = G::gt_one();
        for (attr, c_i, d_i) in ct.rows.iter() {
            let k_x = match sk.k.iter().find(|k| &k.0 == attr) {
                Some(k) => k.1,
                None => return Err(SchemeError::new(&format!("missing key component for {}", attr))),
            };
            denominator = G::gt_mul(
                denominator,
                G::gt_mul(G::pairing(*c_i, sk.l), G::pairing(k_x, *d_i)),
            );
        }
        let blinding = G::gt_mul(G::pairing(sk.k_0, ct.c_0), G::gt_inverse(denominator));
        Ok(G::gt_mul(ct.c, G::gt_inverse(blinding)))
    }
}
