//! Helpers shared by the scheme provider
//!
//! Currently those are:
//! hash
//! policy
//! secretsharing
//!
pub mod hash;
pub mod policy;
pub mod secretsharing;
