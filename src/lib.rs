//! rabe-bench measures CP-ABE schemes across pairing curves and attribute counts.
//!
//! The harness drives every scheme through the same protocol:
//! * construct the scheme on a curve ([`adapter`])
//! * time setup once, then keygen, encrypt and decrypt for 1..=N attributes ([`orchestrator`], [`runner`])
//! * check that decryption recovers the plaintext
//! * persist one [`record::ResultRecord`] per (scheme, curve) pair ([`store`])
//!
//! [`render`] draws comparison charts from the stored records.
//!
//! Currently the schemes are:
//! * BSW07 CP-ABE
//! * AC17 CP-ABE (FAME)
//! * Waters11 CP-ABE
//!
//! on the curves BN254 and BLS12-381.
//!
//! # Examples
//!
//! ```
//! use std::num::NonZeroUsize;
//! use rabe_bench::{adapter::SchemeDescriptor, orchestrator::BenchmarkRun};
//! let run = BenchmarkRun::new(
//!     SchemeDescriptor::waters11(),
//!     "BN254",
//!     NonZeroUsize::new(2).unwrap(),
//!     NonZeroUsize::new(1).unwrap(),
//! );
//! let report = run.execute().unwrap();
//! assert_eq!(report.record.attributes, vec![1, 2]);
//! assert!(report.mismatches.is_empty());
//! ```
extern crate ark_bls12_381;
extern crate ark_ec;
extern crate ark_ff;
extern crate ark_std;
extern crate pest;
extern crate pest_derive;
extern crate plotters;
extern crate rabe_bn;
extern crate rand;
extern crate serde;
extern crate serde_json;
extern crate sha3;
extern crate tempfile;

pub mod adapter;
pub mod config;
pub mod error;
pub mod generator;
pub mod group;
pub mod orchestrator;
pub mod record;
pub mod render;
pub mod runner;
pub mod schemes;
pub mod store;
pub mod utils;
