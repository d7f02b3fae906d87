//! The measurement protocol for one (scheme, curve) pair and the sweep over all pairs.
use std::{num::NonZeroUsize, path::PathBuf};
use tracing::{error, info, warn};
use crate::adapter::{construct, CpAbeScheme, SchemeCatalog, SchemeDescriptor, SchemeVisitor};
use crate::config::BenchConfig;
use crate::error::{BenchError, Phase, RunContext};
use crate::generator::generate;
use crate::group::Curve;
use crate::record::ResultRecord;
use crate::runner::{IterationFailed, Retain, TimedRunner};
use crate::store::{ResultStore, RunKey};

/// One benchmark of a scheme on a curve.
#[derive(Clone, Debug)]
pub struct BenchmarkRun {
    pub descriptor: SchemeDescriptor,
    pub curve: String,
    pub max_attributes: NonZeroUsize,
    pub iterations: NonZeroUsize,
}

/// A finished run: its record and the correctness failures seen on the way.
#[derive(Debug)]
pub struct RunReport {
    pub record: ResultRecord,
    pub mismatches: Vec<BenchError>,
}

fn failed(phase: Phase, context: &RunContext) -> impl FnOnce(IterationFailed) -> BenchError + '_ {
    move |e| BenchError::CryptoOperationFailed {
        phase,
        context: context.clone().with_iteration(e.iteration),
        source: e.source,
    }
}

struct Measure<'a> {
    run: &'a BenchmarkRun,
}

impl SchemeVisitor for Measure<'_> {
    type Output = Result<RunReport, BenchError>;

    fn visit<S: CpAbeScheme>(self, scheme: S) -> Self::Output {
        self.run.measure(&scheme)
    }
}

impl BenchmarkRun {
    pub fn new(descriptor: SchemeDescriptor, curve: &str, max_attributes: NonZeroUsize, iterations: NonZeroUsize) -> Self {
        BenchmarkRun {
            descriptor,
            curve: curve.to_string(),
            max_attributes,
            iterations,
        }
    }

    pub fn key(&self) -> RunKey {
        RunKey::new(&self.descriptor.name, &self.curve)
    }

    /// Constructs the scheme on the named curve and measures it.
    pub fn execute(&self) -> Result<RunReport, BenchError> {
        let curve: Curve = self.curve.parse()?;
        construct(curve, &self.descriptor, self.max_attributes.get(), Measure { run: self })?
    }

    /// Runs setup once, then keygen, encrypt and decrypt for every attribute count.
    pub fn measure<S: CpAbeScheme>(&self, scheme: &S) -> Result<RunReport, BenchError> {
        let runner = TimedRunner::new(self.iterations);
        let context = RunContext::new(&self.descriptor.name, &self.curve);
        let max_attributes = self.max_attributes.get();
        info!(%context, iterations = runner.iterations(), max_attributes, "starting benchmark");

        let setup = runner
            .run(Retain::First, || scheme.setup())
            .map_err(failed(Phase::Setup, &context))?;
        info!(%context, setup_ms = setup.mean_ms, "setup");
        let setup_ms = setup.mean_ms;
        let (pk, msk) = setup.output;

        let mut record = ResultRecord::with_capacity(max_attributes);
        let mut mismatches: Vec<BenchError> = Vec::new();
        for count in 1..=max_attributes {
            let set = generate(&self.descriptor, count);
            let context = context.clone().with_attributes(count);

            let keygen = runner
                .run(Retain::First, || scheme.keygen(&pk, &msk, &set.attributes))
                .map_err(failed(Phase::KeyGen, &context))?;
            let sk = keygen.output;

            let encrypt = runner
                .run_prepared(
                    Retain::Last,
                    || scheme.random_message(),
                    |msg| scheme.encrypt(&pk, &msg, &set.policy),
                )
                .map_err(failed(Phase::Encrypt, &context))?;

            // decrypt works on its own plaintext, not on an output of the encrypt loop
            let msg = scheme.random_message();
            let ct = scheme
                .encrypt(&pk, &msg, &set.policy)
                .map_err(|source| BenchError::CryptoOperationFailed {
                    phase: Phase::Encrypt,
                    context: context.clone(),
                    source,
                })?;
            // a key that misses policy attributes recovers no plaintext, which counts as a mismatch
            let decrypt = runner
                .run(Retain::Last, || match scheme.decrypt(&ct, &sk, &pk) {
                    Ok(plaintext) => Ok(Some(plaintext)),
                    Err(e) if e.is_policy_not_satisfied() => Ok(None),
                    Err(e) => Err(e),
                })
                .map_err(failed(Phase::Decrypt, &context))?;

            if decrypt.output.as_ref() != Some(&msg) {
                warn!(%context, "decrypted plaintext does not match");
                mismatches.push(BenchError::CorrectnessMismatch { context: context.clone() });
            }
            info!(
                %context,
                keygen_ms = keygen.mean_ms,
                encrypt_ms = encrypt.mean_ms,
                decrypt_ms = decrypt.mean_ms,
                "measured"
            );
            record.push(count, setup_ms, keygen.mean_ms, encrypt.mean_ms, decrypt.mean_ms);
        }
        Ok(RunReport { record, mismatches })
    }
}

/// The outcome of a sweep over all configured pairs.
#[derive(Debug, Default)]
pub struct SweepSummary {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(RunKey, BenchError)>,
    pub mismatches: Vec<BenchError>,
}

impl SweepSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs every configured scheme on every configured curve, one pair at a time.
pub struct Sweep {
    catalog: SchemeCatalog,
    schemes: Vec<String>,
    curves: Vec<String>,
    max_attributes: NonZeroUsize,
    iterations: NonZeroUsize,
    store: ResultStore,
}

impl Sweep {
    pub fn new(config: &BenchConfig) -> Self {
        Sweep {
            catalog: config.catalog(),
            schemes: config.schemes.clone(),
            curves: config.curves.clone(),
            max_attributes: config.max_attributes,
            iterations: config.iterations,
            store: ResultStore::new(config.output_dir.clone()),
        }
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Benchmarks one pair and persists its record.
    fn run_pair(&self, scheme: &str, curve: &str) -> Result<(PathBuf, Vec<BenchError>), BenchError> {
        let descriptor = match self.catalog.get(scheme) {
            Some(descriptor) => descriptor.clone(),
            None => return Err(BenchError::UnsupportedVariant(scheme.to_string())),
        };
        let run = BenchmarkRun::new(descriptor, curve, self.max_attributes, self.iterations);
        let report = run.execute()?;
        let path = self.store.write(&RunKey::new(scheme, curve), &report.record)?;
        Ok((path, report.mismatches))
    }

    pub fn run(&self) -> SweepSummary {
        let mut summary = SweepSummary::default();
        for scheme in self.schemes.iter() {
            for curve in self.curves.iter() {
                let key = RunKey::new(scheme, curve);
                match self.run_pair(scheme, curve) {
                    Ok((path, mismatches)) => {
                        info!(%key, path = %path.display(), "results written");
                        summary.written.push(path);
                        summary.mismatches.extend(mismatches);
                    }
                    Err(e) => {
                        error!(%key, error = %e, "benchmark failed, continuing with the next pair");
                        summary.failed.push((key, e));
                    }
                }
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{Ac17Adapter, Bsw07Adapter, Construction, PolicyGrammar};
    use crate::error::SchemeError;
    use crate::group::{Bls12_381, Bn254};
    use crate::schemes::ac17::ASSUMPTION_SIZE;

    fn nz(value: usize) -> NonZeroUsize {
        NonZeroUsize::new(value).unwrap()
    }

    /// Issues keys under a freshly generated master key, so decryption yields garbage.
    struct ForeignKeys<S: CpAbeScheme>(S);

    impl<S: CpAbeScheme> CpAbeScheme for ForeignKeys<S> {
        type PublicKey = S::PublicKey;
        type MasterKey = S::MasterKey;
        type SecretKey = S::SecretKey;
        type Ciphertext = S::Ciphertext;
        type Message = S::Message;

        fn setup(&self) -> Result<(S::PublicKey, S::MasterKey), SchemeError> {
            self.0.setup()
        }

        fn keygen(&self, _pk: &S::PublicKey, _msk: &S::MasterKey, attributes: &[String]) -> Result<S::SecretKey, SchemeError> {
            let (pk, msk) = self.0.setup()?;
            self.0.keygen(&pk, &msk, attributes)
        }

        fn random_message(&self) -> S::Message {
            self.0.random_message()
        }

        fn encrypt(&self, pk: &S::PublicKey, msg: &S::Message, policy: &str) -> Result<S::Ciphertext, SchemeError> {
            self.0.encrypt(pk, msg, policy)
        }

        fn decrypt(&self, ct: &S::Ciphertext, sk: &S::SecretKey, pk: &S::PublicKey) -> Result<S::Message, SchemeError> {
            self.0.decrypt(ct, sk, pk)
        }
    }

    /// Issues keys for an attribute no generated policy mentions.
    struct UnrelatedAttributes<S: CpAbeScheme>(S);

    impl<S: CpAbeScheme> CpAbeScheme for UnrelatedAttributes<S> {
        type PublicKey = S::PublicKey;
        type MasterKey = S::MasterKey;
        type SecretKey = S::SecretKey;
        type Ciphertext = S::Ciphertext;
        type Message = S::Message;

        fn setup(&self) -> Result<(S::PublicKey, S::MasterKey), SchemeError> {
            self.0.setup()
        }

        fn keygen(&self, pk: &S::PublicKey, msk: &S::MasterKey, _attributes: &[String]) -> Result<S::SecretKey, SchemeError> {
            self.0.keygen(pk, msk, &[String::from("OTHER")])
        }

        fn random_message(&self) -> S::Message {
            self.0.random_message()
        }

        fn encrypt(&self, pk: &S::PublicKey, msg: &S::Message, policy: &str) -> Result<S::Ciphertext, SchemeError> {
            self.0.encrypt(pk, msg, policy)
        }

        fn decrypt(&self, ct: &S::Ciphertext, sk: &S::SecretKey, pk: &S::PublicKey) -> Result<S::Message, SchemeError> {
            self.0.decrypt(ct, sk, pk)
        }
    }

    fn config(dir: &std::path::Path, schemes: &[&str], curves: &[&str], max: usize, iterations: usize) -> BenchConfig {
        BenchConfig {
            max_attributes: nz(max),
            iterations: nz(iterations),
            schemes: schemes.iter().map(|s| s.to_string()).collect(),
            curves: curves.iter().map(|c| c.to_string()).collect(),
            output_dir: dir.to_path_buf(),
            descriptors: Vec::new(),
        }
    }

    #[test]
    fn test_single_point_run() {
        let run = BenchmarkRun::new(SchemeDescriptor::bsw07(), "BN254", nz(1), nz(1));
        let report = run.execute().unwrap();
        let record = report.record;
        assert_eq!(record.attributes, vec![1]);
        assert_eq!(record.setup.len(), 1);
        assert_eq!(record.keygen.len(), 1);
        assert_eq!(record.encrypt.len(), 1);
        assert_eq!(record.decrypt.len(), 1);
        assert!(report.mismatches.is_empty());
    }

    #[test]
    fn test_records_hold_invariants() {
        for descriptor in [SchemeDescriptor::bsw07(), SchemeDescriptor::ac17(), SchemeDescriptor::waters11()] {
            for curve in ["BN254", "BLS12-381"] {
                let run = BenchmarkRun::new(descriptor.clone(), curve, nz(3), nz(2));
                let report = run.execute().unwrap();
                // every point decrypted correctly
                assert!(report.mismatches.is_empty(), "{}", run.key());
                assert!(report.record.validate().is_ok());
                assert_eq!(report.record.attributes, vec![1, 2, 3]);
            }
        }
    }

    #[test]
    fn test_wrong_key_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let run = BenchmarkRun::new(SchemeDescriptor::bsw07(), "BN254", nz(2), nz(1));
        let scheme = ForeignKeys(Bsw07Adapter::<Bn254>::construct(&[]).unwrap());
        let report = run.measure(&scheme).unwrap();
        assert_eq!(report.mismatches.len(), 2);
        match &report.mismatches[1] {
            BenchError::CorrectnessMismatch { context } => {
                assert_eq!(context, &RunContext::new("BSW07", "BN254").with_attributes(2));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(report.record.validate().is_ok());
        let store = ResultStore::new(dir.path());
        store.write(&run.key(), &report.record).unwrap();
        assert_eq!(store.load(&run.key()).unwrap(), report.record);
    }

    #[test]
    fn test_unsatisfied_policy_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let run = BenchmarkRun::new(SchemeDescriptor::bsw07(), "BN254", nz(2), nz(2));
        let report = run.measure(&UnrelatedAttributes(Bsw07Adapter::<Bn254>::construct(&[]).unwrap())).unwrap();
        assert_eq!(report.mismatches.len(), 2);
        assert!(matches!(report.mismatches[0], BenchError::CorrectnessMismatch { .. }));
        assert_eq!(report.record.attributes, vec![1, 2]);
        // the failed decryptions are still timed
        assert_eq!(report.record.decrypt.len(), 2);
        assert!(report.record.decrypt.iter().all(|ms| ms.is_finite() && *ms >= 0.0));
        assert!(report.record.validate().is_ok());
        let store = ResultStore::new(dir.path());
        store.write(&run.key(), &report.record).unwrap();
        assert_eq!(store.load(&run.key()).unwrap(), report.record);
    }

    #[test]
    fn test_unsatisfied_ac17_policy_is_a_mismatch() {
        let scheme = UnrelatedAttributes(Ac17Adapter::<Bls12_381>::construct(&[ASSUMPTION_SIZE]).unwrap());
        let run = BenchmarkRun::new(SchemeDescriptor::ac17(), "BLS12-381", nz(1), nz(1));
        let report = run.measure(&scheme).unwrap();
        assert_eq!(report.mismatches.len(), 1);
        assert_eq!(report.record.decrypt.len(), 1);
    }

    #[test]
    fn test_unknown_scheme_does_not_stop_sweep() {
        let dir = tempfile::tempdir().unwrap();
        let sweep = Sweep::new(&config(dir.path(), &["foo", "BSW07"], &["BN254"], 1, 1));
        let summary = sweep.run();
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].0, RunKey::new("foo", "BN254"));
        assert!(matches!(summary.failed[0].1, BenchError::UnsupportedVariant(_)));
        assert_eq!(summary.written, vec![dir.path().join("benchmark_results_BSW07_BN254.json")]);
        assert!(!sweep.store().path(&RunKey::new("foo", "BN254")).exists());
        assert!(sweep.store().load(&RunKey::new("BSW07", "BN254")).is_ok());
    }

    #[test]
    fn test_unknown_curve_and_registered_name_without_adapter() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path(), &["waters11", "custom"], &["SS512", "BN254"], 2, 1);
        cfg.descriptors
            .push(SchemeDescriptor::new("custom", Construction::Plain, "C{}", PolicyGrammar::default()));
        let summary = Sweep::new(&cfg).run();
        assert_eq!(summary.written.len(), 1);
        assert_eq!(summary.failed.len(), 3);
        assert!(matches!(summary.failed[0].1, BenchError::UnsupportedCurve(_)));
        assert!(matches!(summary.failed[2].1, BenchError::UnsupportedVariant(_)));
        assert!(!summary.is_success());
    }

    #[test]
    fn test_failed_phase_leaves_no_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path(), &["waters11"], &["BN254"], 2, 1);
        // attribute tokens outside the waters11 universe make keygen fail
        cfg.descriptors
            .push(SchemeDescriptor::new("waters11", Construction::AttributeBound, "ATTR{}", PolicyGrammar::default()));
        let summary = Sweep::new(&cfg).run();
        match &summary.failed[0].1 {
            BenchError::CryptoOperationFailed { phase, context, .. } => {
                assert_eq!(*phase, Phase::KeyGen);
                assert_eq!(context.attributes, Some(1));
                assert_eq!(context.iteration, Some(1));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(summary.written.is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).map(|d| d.count()).unwrap_or(0), 0);
    }
}
