//! # lodestar-grounding
//!
//! Post-hoc check of a generated answer against the references it was built
//! from. Commands missing from every reference make the answer invalid;
//! unknown addresses, interfaces and parameter values only raise warnings.

pub mod patterns;
pub mod validator;

pub use validator::GroundingValidator;
