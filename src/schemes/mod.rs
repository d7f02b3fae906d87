//! The CP-ABE schemes the harness measures
//!
//! Currently those are:
//! * AC17 CP-ABE
//! * BSW07 CP-ABE
//! * Waters11 CP-ABE
//!
//! Each scheme is generic over a [`crate::group::PairingGroup`], restricted
//! to conjunctive policies, and keeps the calling convention of the
//! construction it implements. [`crate::adapter`] hides those differences.
pub mod ac17;
pub mod bsw07;
pub mod waters11;
