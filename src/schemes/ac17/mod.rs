//! `AC17` scheme by Shashank Agrawal, Melissa Chase.
//!
//! * Developped by Shashank Agrawal, Melissa Chase, "FAME: Fast Attribute-based Message Encryption", see Section 3
//! * Published in Proceedings of the 2017 ACM SIGSAC Conference on Computer and Communications Security 2017
//! * Available from <https://eprint.iacr.org/2017/807.pdf>
//! * Type: encryption (attribute-based)
//! * Setting: bilinear groups (asymmetric)
//!
//! The construction is parameterized by the size `k` of the decisional
//! linear assumption it relies on; FAME uses `k = 2`.
//!
//! # Examples
//!
//! ```
//! use rabe_bench::group::{Bls12_381, PairingGroup};
//! use rabe_bench::schemes::ac17::*;
//! let scheme = Ac17::new(ASSUMPTION_SIZE).unwrap();
//! let (pk, msk) = scheme.setup::<Bls12_381>();
//! let msg = Bls12_381::random_gt(&mut rand::thread_rng());
//! let ct = scheme.encrypt(&pk, &msg, "A and B").unwrap();
//! let sk = scheme.keygen(&msk, &[String::from("A"), String::from("B")]).unwrap();
//! assert_eq!(scheme.decrypt(&ct, &sk).unwrap(), msg);
//! ```
use crate::error::SchemeError;
use crate::group::PairingGroup;
use crate::utils::policy::{msp::AbePolicy, parse, satisfies};

/// The assumption size FAME is usually instantiated with.
pub const ASSUMPTION_SIZE: usize = 2;

/// An AC17 Public Key (PK)
pub struct Ac17PublicKey<G: PairingGroup> {
    pub g: G::G1,
    pub h_a: Vec<G::G2>,
    pub e_gh_ka: Vec<G::Gt>,
}

/// An AC17 Master Key (MK)
pub struct Ac17MasterKey<G: PairingGroup> {
    pub g: G::G1,
    pub h: G::G2,
    pub g_k: Vec<G::G1>,
    pub a: Vec<G::Scalar>,
    pub b: Vec<G::Scalar>,
}

/// An AC17 CP-ABE Ciphertext (CT)
pub struct Ac17CpCiphertext<G: PairingGroup> {
    pub policy: String,
    pub c_0: Vec<G::G2>,
    pub c: Vec<(String, Vec<G::G1>)>,
    pub c_p: G::Gt,
}

/// An AC17 CP-ABE Secret Key (SK)
pub struct Ac17CpSecretKey<G: PairingGroup> {
    pub attr: Vec<String>,
    pub k_0: Vec<G::G2>,
    pub k: Vec<(String, Vec<G::G1>)>,
    pub k_p: Vec<G::G1>,
}

/// The FAME construction for a given assumption size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ac17 {
    assumption_size: usize,
}

/// Random oracle label for attribute `attr` at position `(l, t)`.
fn attribute_label(attr: &str, l: usize, t: usize) -> String {
    format!("attr:{}:{}:{}", attr, l, t)
}

/// Random oracle label for span program column `j` (1-based) at `(l, t)`.
fn column_label(j: usize, l: usize, t: usize) -> String {
    format!("col:{}:{}:{}", j, l, t)
}

impl Ac17 {
    pub fn new(assumption_size: usize) -> Result<Ac17, SchemeError> {
        if assumption_size == 0 {
            return Err(SchemeError::new("ac17 needs an assumption size of at least 1"));
        }
        Ok(Ac17 { assumption_size })
    }

    /// The setup algorithm of AC17CP. Generates an Ac17PublicKey and an Ac17MasterKey.
    pub fn setup<G: PairingGroup>(&self) -> (Ac17PublicKey<G>, Ac17MasterKey<G>) {
        let k = self.assumption_size;
        let mut rng = rand::thread_rng();
        // generator of group G1: g and generator of group G2: h
        let g = G::random_g1(&mut rng);
        let h = G::random_g2(&mut rng);
        let e_gh = G::pairing(g, h);
        // A and B vectors
        let a: Vec<G::Scalar> = (0..k).map(|_| G::random_scalar(&mut rng)).collect();
        let b: Vec<G::Scalar> = (0..k).map(|_| G::random_scalar(&mut rng)).collect();
        // k vector
        let d: Vec<G::Scalar> = (0..=k).map(|_| G::random_scalar(&mut rng)).collect();
        // h_A vector
        let mut h_a: Vec<G::G2> = a.iter().map(|a_i| h * *a_i).collect();
        h_a.push(h);
        let g_k: Vec<G::G1> = d.iter().map(|d_i| g * *d_i).collect();
        // compute the e([k]_1, [A]_2) term
        let e_gh_ka: Vec<G::Gt> = (0..k)
            .map(|i| G::gt_pow(e_gh, d[i] * a[i] + d[k]))
            .collect();
        (
            Ac17PublicKey { g, h_a, e_gh_ka },
            Ac17MasterKey { g, h, g_k, a, b },
        )
    }

    /// The key generation algorithm of AC17CP. Generates an Ac17CpSecretKey using an Ac17MasterKey and a set of attributes.
    ///
    /// # Arguments
    ///
    ///	* `msk` - A Master Key (MSK), generated by setup()
    ///	* `attributes` - The attributes assigned to this user key
    ///
    pub fn keygen<G: PairingGroup>(
        &self,
        msk: &Ac17MasterKey<G>,
        attributes: &[String],
    ) -> Result<Ac17CpSecretKey<G>, SchemeError> {
        if attributes.is_empty() {
            return Err(SchemeError::new("empty attributes!"));
        }
        let k = self.assumption_size;
        let mut rng = rand::thread_rng();
        // pick randomness
        let r: Vec<G::Scalar> = (0..k).map(|_| G::random_scalar(&mut rng)).collect();
        let sum = r.iter().fold(G::scalar_zero(), |acc, r_i| acc + *r_i);
        // first compute Br as it will be used later
        let mut br: Vec<G::Scalar> = (0..k).map(|i| msk.b[i] * r[i]).collect();
        br.push(sum);
        // now compute [Br]_2
        let k_0: Vec<G::G2> = br.iter().map(|br_l| msk.h * *br_l).collect();
        let a_inv: Vec<G::Scalar> = msk.a
            .iter()
            .map(|a_t| G::try_inverse(*a_t))
            .collect::<Result<_, _>>()?;
        // compute [W_1 Br]_1, ...
        let mut key_parts: Vec<(String, Vec<G::G1>)> = Vec::with_capacity(attributes.len());
        for attr in attributes {
            let sigma_attr = G::random_scalar(&mut rng);
            let mut key: Vec<G::G1> = Vec::with_capacity(k + 1);
            for t in 0..k {
                let mut prod = G::g1_zero();
                for l in 0..=k {
                    prod = prod + G::hash_onto(msk.g, &attribute_label(attr, l, t))? * (br[l] * a_inv[t]);
                }
                key.push(prod + msk.g * (sigma_attr * a_inv[t]));
            }
            key.push(msk.g * (-sigma_attr));
            key_parts.push((attr.clone(), key));
        }
        // compute [k + VBr]_1
        let sigma = G::random_scalar(&mut rng);
        let mut k_p: Vec<G::G1> = Vec::with_capacity(k + 1);
        for t in 0..k {
            let mut prod = msk.g_k[t];
            for l in 0..=k {
                prod = prod + G::hash_onto(msk.g, &column_label(1, l, t))? * (br[l] * a_inv[t]);
            }
            k_p.push(prod + msk.g * (sigma * a_inv[t]));
        }
        k_p.push(msk.g_k[k] + msk.g * (-sigma));
        Ok(Ac17CpSecretKey {
            attr: attributes.to_vec(),
            k_0,
            k: key_parts,
            k_p,
        })
    }

    /// The encrypt algorithm of AC17CP. Encapsulates a target-group message under a conjunctive policy.
    ///
    /// # Arguments
    ///
    ///	* `pk` - A Public Key (PK), generated by setup()
    ///	* `msg` - The message, an element of the target group
    ///	* `policy` - An access policy such as `ATTR1 and ATTR2`
    ///
    pub fn encrypt<G: PairingGroup>(
        &self,
        pk: &Ac17PublicKey<G>,
        msg: &G::Gt,
        policy: &str,
    ) -> Result<Ac17CpCiphertext<G>, SchemeError> {
        let k = self.assumption_size;
        let attributes = parse(policy)?;
        let msp = AbePolicy::from_conjunction(&attributes)?;
        let mut rng = rand::thread_rng();
        // pick randomness
        let s: Vec<G::Scalar> = (0..k).map(|_| G::random_scalar(&mut rng)).collect();
        let sum = s.iter().fold(G::scalar_zero(), |acc, s_i| acc + *s_i);
        // compute the [As]_2 term
        let mut c_0: Vec<G::G2> = (0..k).map(|i| pk.h_a[i] * s[i]).collect();
        c_0.push(pk.h_a[k] * sum);
        // pre-compute the column hashes
        let mut hash_table: Vec<Vec<Vec<G::G1>>> = Vec::with_capacity(msp.c);
        for j in 0..msp.c {
            let mut by_l: Vec<Vec<G::G1>> = Vec::with_capacity(k + 1);
            for l in 0..=k {
                let mut by_t: Vec<G::G1> = Vec::with_capacity(k);
                for t in 0..k {
                    by_t.push(G::hash_onto(pk.g, &column_label(j + 1, l, t))?);
                }
                by_l.push(by_t);
            }
            hash_table.push(by_l);
        }
        // compute the [(V^T As||U^T_2 As||...) M^T_i + W^T_i As]_1 terms
        let mut c: Vec<(String, Vec<G::G1>)> = Vec::with_capacity(msp.m.len());
        for (row, attr) in msp.m.iter().zip(msp.pi.iter()) {
            let mut ct: Vec<G::G1> = Vec::with_capacity(k + 1);
            for l in 0..=k {
                let mut prod = G::g1_zero();
                for t in 0..k {
                    let mut hash = G::hash_onto(pk.g, &attribute_label(attr, l, t))?;
                    for (j, entry) in row.iter().enumerate() {
                        if *entry == 1 {
                            hash = hash + hash_table[j][l][t];
                        } else if *entry == -1 {
                            hash = hash - hash_table[j][l][t];
                        }
                    }
                    prod = prod + hash * s[t];
                }
                ct.push(prod);
            }
            c.push((attr.clone(), ct));
        }
        let mut c_p = *msg;
        for i in 0..k {
            c_p = G::gt_mul(c_p, G::gt_pow(pk.e_gh_ka[i], s[i]));
        }
        Ok(Ac17CpCiphertext {
            policy: policy.to_string(),
            c_0,
            c,
            c_p,
        })
    }

    /// The decrypt algorithm of AC17CP. Recovers the message, given an Ac17CpCiphertext with a matching Ac17CpSecretKey.
    ///
    /// # Arguments
    ///
    ///	* `ct` - An AC17CP Ciphertext
    ///	* `sk` - A Secret Key (SK), generated by keygen()
    ///
    pub fn decrypt<G: PairingGroup>(
        &self,
        ct: &Ac17CpCiphertext<G>,
        sk: &Ac17CpSecretKey<G>,
    ) -> Result<G::Gt, SchemeError> {
        let k = self.assumption_size;
        let required = parse(&ct.policy)?;
        if !satisfies(&sk.attr, &required) {
            return Err(SchemeError::policy_not_satisfied("Error in ac17 decrypt: attributes in sk do not match policy in ct."));
        }
        if ct.c_0.len() != k + 1 || sk.k_0.len() != k + 1 {
            return Err(SchemeError::new("Error in ac17 decrypt: assumption size mismatch."));
        }
        let mut prod1_gt = G::gt_one();
        let mut prod2_gt = G::gt_one();
        for i in 0..=k {
            let mut prod_h = G::g1_zero();
            let mut prod_g = G::g1_zero();
            for attr in required.iter() {
                match ct.c.iter().find(|c| &c.0 == attr) {
                    Some(row) => prod_g = prod_g + row.1[i],
                    None => return Err(SchemeError::new(&format!("missing ciphertext row for {}", attr))),
                }
                match sk.k.iter().find(|key| &key.0 == attr) {
                    Some(key) => prod_h = prod_h + key.1[i],
                    None => return Err(SchemeError::new(&format!("missing key component for {}", attr))),
                }
            }
            prod1_gt = G::gt_mul(prod1_gt, G::pairing(sk.k_p[i] + prod_h, ct.c_0[i]));
            prod2_gt = G::gt_mul(prod2_gt, G::pairing(prod_g, sk.k_0[i]));
        }
        Ok(G::gt_mul(ct.c_p, G::gt_mul(prod2_gt, G::gt_inverse(prod1_gt))))
    }
}
