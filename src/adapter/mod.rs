//! Uniform access to the CP-ABE variants.
//!
//! Each provider in [`crate::schemes`] has its own constructor and calling
//! convention. The adapters in this module wrap them behind [`CpAbeScheme`],
//! and [`construct`] picks the adapter for a descriptor and curve and hands the
//! concrete scheme to a [`SchemeVisitor`].
use std::{
    fmt::{Debug, Display, Formatter, Result as FormatResult},
    marker::PhantomData,
};
use crate::error::{BenchError, Phase, RunContext, SchemeError};
use crate::group::{Bls12_381, Bn254, Curve, PairingGroup};
use crate::schemes::{ac17, bsw07, waters11};

pub mod descriptor;

pub use self::descriptor::{
    AttributeNaming, Construction, PolicyGrammar, Quoting, SchemeCatalog, SchemeDescriptor,
};

/// The four operations every variant is benchmarked through.
pub trait CpAbeScheme {
    type PublicKey;
    type MasterKey;
    type SecretKey;
    type Ciphertext;
    type Message: PartialEq + Debug;

    fn setup(&self) -> Result<(Self::PublicKey, Self::MasterKey), SchemeError>;

    fn keygen(
        &self,
        pk: &Self::PublicKey,
        msk: &Self::MasterKey,
        attributes: &[String],
    ) -> Result<Self::SecretKey, SchemeError>;

    /// Draws a fresh random plaintext.
    fn random_message(&self) -> Self::Message;

    fn encrypt(
        &self,
        pk: &Self::PublicKey,
        msg: &Self::Message,
        policy: &str,
    ) -> Result<Self::Ciphertext, SchemeError>;

    /// Fails with [`SchemeError::policy_not_satisfied`] when the key's
    /// attributes do not satisfy the ciphertext policy.
    fn decrypt(
        &self,
        ct: &Self::Ciphertext,
        sk: &Self::SecretKey,
        pk: &Self::PublicKey,
    ) -> Result<Self::Message, SchemeError>;
}

/// Receives the concrete scheme chosen by [`construct`].
pub trait SchemeVisitor {
    type Output;

    fn visit<S: CpAbeScheme>(self, scheme: S) -> Self::Output;
}

fn expect_arity(variant: SchemeVariant, args: &[usize], arity: usize) -> Result<(), SchemeError> {
    if args.len() != arity {
        return Err(SchemeError::new(&format!(
            "{} takes {} construction parameter(s), got {}",
            variant,
            arity,
            args.len()
        )));
    }
    Ok(())
}

/// BSW07 over the group `G`.
pub struct Bsw07Adapter<G: PairingGroup> {
    _group: PhantomData<G>,
}

impl<G: PairingGroup> Bsw07Adapter<G> {
    pub fn construct(args: &[usize]) -> Result<Self, SchemeError> {
        expect_arity(SchemeVariant::Bsw07, args, 0)?;
        Ok(Bsw07Adapter { _group: PhantomData })
    }
}

impl<G: PairingGroup> CpAbeScheme for Bsw07Adapter<G> {
    type PublicKey = bsw07::CpAbePublicKey<G>;
    type MasterKey = bsw07::CpAbeMasterKey<G>;
    type SecretKey = bsw07::CpAbeSecretKey<G>;
    type Ciphertext = bsw07::CpAbeCiphertext<G>;
    type Message = G::Gt;

    fn setup(&self) -> Result<(Self::PublicKey, Self::MasterKey), SchemeError> {
        Ok(bsw07::setup::<G>())
    }

    fn keygen(
        &self,
        pk: &Self::PublicKey,
        msk: &Self::MasterKey,
        attributes: &[String],
    ) -> Result<Self::SecretKey, SchemeError> {
        bsw07::keygen(pk, msk, attributes)
    }

    fn random_message(&self) -> G::Gt {
        G::random_gt(&mut rand::thread_rng())
    }

    fn encrypt(&self, pk: &Self::PublicKey, msg: &G::Gt, policy: &str) -> Result<Self::Ciphertext, SchemeError> {
        bsw07::encrypt(pk, msg, policy)
    }

    fn decrypt(&self, ct: &Self::Ciphertext, sk: &Self::SecretKey, _pk: &Self::PublicKey) -> Result<G::Gt, SchemeError> {
        bsw07::decrypt(sk, ct)
    }
}

/// AC17 (FAME) over the group `G`, constructed with its assumption size.
pub struct Ac17Adapter<G: PairingGroup> {
    scheme: ac17::Ac17,
    _group: PhantomData<G>,
}

impl<G: PairingGroup> Ac17Adapter<G> {
    pub fn construct(args: &[usize]) -> Result<Self, SchemeError> {
        expect_arity(SchemeVariant::Ac17, args, 1)?;
        Ok(Ac17Adapter {
            scheme: ac17::Ac17::new(args[0])?,
            _group: PhantomData,
        })
    }
}

impl<G: PairingGroup> CpAbeScheme for Ac17Adapter<G> {
    type PublicKey = ac17::Ac17PublicKey<G>;
    type MasterKey = ac17::Ac17MasterKey<G>;
    type SecretKey = ac17::Ac17CpSecretKey<G>;
    type Ciphertext = ac17::Ac17CpCiphertext<G>;
    type Message = G::Gt;

    fn setup(&self) -> Result<(Self::PublicKey, Self::MasterKey), SchemeError> {
        Ok(self.scheme.setup::<G>())
    }

    fn keygen(
        &self,
        _pk: &Self::PublicKey,
        msk: &Self::MasterKey,
        attributes: &[String],
    ) -> Result<Self::SecretKey, SchemeError> {
        self.scheme.keygen(msk, attributes)
    }

    fn random_message(&self) -> G::Gt {
        G::random_gt(&mut rand::thread_rng())
    }

    fn encrypt(&self, pk: &Self::PublicKey, msg: &G::Gt, policy: &str) -> Result<Self::Ciphertext, SchemeError> {
        self.scheme.encrypt(pk, msg, policy)
    }

    fn decrypt(&self, ct: &Self::Ciphertext, sk: &Self::SecretKey, _pk: &Self::PublicKey) -> Result<G::Gt, SchemeError> {
        self.scheme.decrypt(ct, sk)
    }
}

/// Waters11 over the group `G`, sized by the maximum attribute count.
pub struct Waters11Adapter<G: PairingGroup> {
    scheme: waters11::Waters11,
    _group: PhantomData<G>,
}

impl<G: PairingGroup> Waters11Adapter<G> {
    pub fn construct(args: &[usize]) -> Result<Self, SchemeError> {
        expect_arity(SchemeVariant::Waters11, args, 1)?;
        Ok(Waters11Adapter {
            scheme: waters11::Waters11::new(args[0])?,
            _group: PhantomData,
        })
    }
}

impl<G: PairingGroup> CpAbeScheme for Waters11Adapter<G> {
    type PublicKey = waters11::Waters11PublicKey<G>;
    type MasterKey = waters11::Waters11MasterKey<G>;
    type SecretKey = waters11::Waters11SecretKey<G>;
    type Ciphertext = waters11::Waters11Ciphertext<G>;
    type Message = G::Gt;

    fn setup(&self) -> Result<(Self::PublicKey, Self::MasterKey), SchemeError> {
        Ok(self.scheme.setup::<G>())
    }

    fn keygen(
        &self,
        pk: &Self::PublicKey,
        msk: &Self::MasterKey,
        attributes: &[String],
    ) -> Result<Self::SecretKey, SchemeError> {
        self.scheme.keygen(pk, msk, attributes)
    }

    fn random_message(&self) -> G::Gt {
        G::random_gt(&mut rand::thread_rng())
    }

    fn encrypt(&self, pk: &Self::PublicKey, msg: &G::Gt, policy: &str) -> Result<Self::Ciphertext, SchemeError> {
        self.scheme.encrypt(pk, msg, policy)
    }

    fn decrypt(&self, ct: &Self::Ciphertext, sk: &Self::SecretKey, _pk: &Self::PublicKey) -> Result<G::Gt, SchemeError> {
        self.scheme.decrypt(ct, sk)
    }
}

/// The variants with a registered adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SchemeVariant {
    Bsw07,
    Ac17,
    Waters11,
}

impl SchemeVariant {
    pub const ALL: [SchemeVariant; 3] = [SchemeVariant::Bsw07, SchemeVariant::Ac17, SchemeVariant::Waters11];

    pub fn name(&self) -> &'static str {
        match self {
            SchemeVariant::Bsw07 => "BSW07",
            SchemeVariant::Ac17 => "ac17",
            SchemeVariant::Waters11 => "waters11",
        }
    }

    /// Looks up the adapter for a descriptor name, ignoring case.
    pub fn resolve(name: &str) -> Result<SchemeVariant, BenchError> {
        SchemeVariant::ALL
            .iter()
            .copied()
            .find(|variant| variant.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| BenchError::UnsupportedVariant(name.to_string()))
    }

    fn dispatch<G: PairingGroup, V: SchemeVisitor>(self, args: &[usize], visitor: V) -> Result<V::Output, SchemeError> {
        Ok(match self {
            SchemeVariant::Bsw07 => visitor.visit(Bsw07Adapter::<G>::construct(args)?),
            SchemeVariant::Ac17 => visitor.visit(Ac17Adapter::<G>::construct(args)?),
            SchemeVariant::Waters11 => visitor.visit(Waters11Adapter::<G>::construct(args)?),
        })
    }
}

impl Display for SchemeVariant {
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        f.write_str(self.name())
    }
}

/// Instantiates the variant named by `descriptor` on `curve` and passes it to `visitor`.
///
/// # Arguments
///
///	* `curve` - The pairing group to instantiate the scheme over
///	* `descriptor` - Selects the variant and its construction parameters
///	* `max_attributes` - The attribute bound of the sweep
///	* `visitor` - Receives the constructed scheme
///
pub fn construct<V: SchemeVisitor>(
    curve: Curve,
    descriptor: &SchemeDescriptor,
    max_attributes: usize,
    visitor: V,
) -> Result<V::Output, BenchError> {
    let variant = SchemeVariant::resolve(&descriptor.name)?;
    let args = descriptor.construction.arguments(max_attributes);
    let constructed = match curve {
        Curve::Bn254 => variant.dispatch::<Bn254, V>(&args, visitor),
        Curve::Bls12_381 => variant.dispatch::<Bls12_381, V>(&args, visitor),
    };
    constructed.map_err(|source| BenchError::CryptoOperationFailed {
        phase: Phase::Construct,
        context: RunContext::new(&descriptor.name, curve.name()),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;

    /// Runs one full round trip and reports whether the plaintext survived.
    struct RoundTrip {
        attributes: usize,
        descriptor: SchemeDescriptor,
    }

    impl SchemeVisitor for RoundTrip {
        type Output = Result<bool, SchemeError>;

        fn visit<S: CpAbeScheme>(self, scheme: S) -> Self::Output {
            let set = generate(&self.descriptor, self.attributes);
            let (pk, msk) = scheme.setup()?;
            let sk = scheme.keygen(&pk, &msk, &set.attributes)?;
            let msg = scheme.random_message();
            let ct = scheme.encrypt(&pk, &msg, &set.policy)?;
            Ok(scheme.decrypt(&ct, &sk, &pk)? == msg)
        }
    }

    #[test]
    fn test_round_trip_every_variant_and_curve() {
        for curve in Curve::ALL.iter() {
            for descriptor in [SchemeDescriptor::bsw07(), SchemeDescriptor::ac17(), SchemeDescriptor::waters11()] {
                let visitor = RoundTrip { attributes: 3, descriptor: descriptor.clone() };
                let outcome = construct(*curve, &descriptor, 4, visitor).unwrap();
                assert!(outcome.unwrap(), "{} on {}", descriptor.name, curve);
            }
        }
    }

    #[test]
    fn test_unknown_variant() {
        let descriptor = SchemeDescriptor::new("foo", Construction::Plain, "F{}", PolicyGrammar::default());
        let visitor = RoundTrip { attributes: 1, descriptor: descriptor.clone() };
        match construct(Curve::Bn254, &descriptor, 1, visitor) {
            Err(BenchError::UnsupportedVariant(name)) => assert_eq!(name, "foo"),
            _ => panic!("expected UnsupportedVariant"),
        }
    }

    #[test]
    fn test_resolve_ignores_case() {
        assert_eq!(SchemeVariant::resolve("bsw07").unwrap(), SchemeVariant::Bsw07);
        assert_eq!(SchemeVariant::resolve("AC17").unwrap(), SchemeVariant::Ac17);
        assert_eq!(SchemeVariant::resolve("Waters11").unwrap(), SchemeVariant::Waters11);
    }

    #[test]
    fn test_construction_failures() {
        // wrong arity
        let descriptor = SchemeDescriptor::new("ac17", Construction::Plain, "ATTR{}", PolicyGrammar::default());
        let visitor = RoundTrip { attributes: 1, descriptor: descriptor.clone() };
        match construct(Curve::Bls12_381, &descriptor, 1, visitor) {
            Err(BenchError::CryptoOperationFailed { phase, context, .. }) => {
                assert_eq!(phase, Phase::Construct);
                assert_eq!(context, RunContext::new("ac17", "BLS12-381"));
            }
            _ => panic!("expected CryptoOperationFailed"),
        }
        // invalid parameter value
        let descriptor = SchemeDescriptor::new("ac17", Construction::SecurityParameter(0), "ATTR{}", PolicyGrammar::default());
        let visitor = RoundTrip { attributes: 1, descriptor: descriptor.clone() };
        assert!(construct(Curve::Bn254, &descriptor, 1, visitor).is_err());
    }

    #[test]
    fn test_adapter_arity() {
        assert!(Bsw07Adapter::<Bn254>::construct(&[]).is_ok());
        assert!(Bsw07Adapter::<Bn254>::construct(&[1]).is_err());
        assert!(Waters11Adapter::<Bn254>::construct(&[5]).is_ok());
        assert!(Waters11Adapter::<Bn254>::construct(&[]).is_err());
        assert!(Ac17Adapter::<Bls12_381>::construct(&[2, 3]).is_err());
    }

    #[test]
    fn test_waters11_is_sized_by_bound() {
        let descriptor = SchemeDescriptor::waters11();
        // a policy over attribute 3 is outside a universe of 2
        let visitor = RoundTrip { attributes: 3, descriptor: descriptor.clone() };
        assert!(construct(Curve::Bn254, &descriptor, 2, visitor).unwrap().is_err());
    }
}
