use rand::Rng;
use crate::group::PairingGroup;
use crate::utils::policy::msp::AbePolicy;

/// Splits `secret` along the rows of a span program.
///
/// The shares are `M * v` for `v = (secret, y_2, ..., y_c)` with random `y_j`,
/// returned together with the attribute labelling each row.
pub fn gen_shares<G: PairingGroup, R: Rng>(
    secret: G::Scalar,
    msp: &AbePolicy,
    rng: &mut R,
) -> Vec<(String, G::Scalar)> {
    let mut v: Vec<G::Scalar> = Vec::with_capacity(msp.c);
    v.push(secret);
    for _j in 1..msp.c {
        v.push(G::random_scalar(rng));
    }
    msp.m
        .iter()
        .zip(msp.pi.iter())
        .map(|(row, attr)| {
            let mut share = G::scalar_zero();
            for (j, entry) in row.iter().enumerate() {
                if *entry == 1 {
                    share = share + v[j];
                } else if *entry == -1 {
                    share = share - v[j];
                }
            }
            (attr.clone(), share)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::{Bls12_381, Bn254};

    fn check_reconstruction<G: PairingGroup>() {
        let mut rng = rand::thread_rng();
        let attrs: Vec<String> = (1..=5).map(|i| format!("ATTR{}", i)).collect();
        let msp = AbePolicy::from_conjunction(&attrs).unwrap();
        let secret = G::random_scalar(&mut rng);
        let shares = gen_shares::<G, _>(secret, &msp, &mut rng);
        assert_eq!(shares.len(), 5);
        let labels: Vec<String> = shares.iter().map(|s| s.0.clone()).collect();
        assert_eq!(labels, attrs);
        let sum = shares.iter().fold(G::scalar_zero(), |acc, s| acc + s.1);
        assert_eq!(sum, secret);
        // a strict subset does not reconstruct
        let partial = shares[1..].iter().fold(G::scalar_zero(), |acc, s| acc + s.1);
        assert_ne!(partial, secret);
    }

    #[test]
    fn test_conjunction_shares_bn254() {
        check_reconstruction::<Bn254>();
    }

    #[test]
    fn test_conjunction_shares_bls12_381() {
        check_reconstruction::<Bls12_381>();
    }

    #[test]
    fn test_single_share_is_secret() {
        let mut rng = rand::thread_rng();
        let msp = AbePolicy::from_conjunction(&[String::from("1")]).unwrap();
        let secret = Bn254::random_scalar(&mut rng);
        let shares = gen_shares::<Bn254, _>(secret, &msp, &mut rng);
        assert_eq!(shares, vec![(String::from("1"), secret)]);
    }
}
