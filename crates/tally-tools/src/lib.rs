//! Calculator catalog for the Tally tool suite.
//!
//! Every tool follows one contract: a struct of named, typed fields goes in,
//! and either a structured result or an [`InputError`] naming the offending
//! field comes out. Tools are pure, synchronous, and independent of each
//! other; the only stateful component in the suite lives in `tally-core`.
//!
//! Modules:
//! - [`health`]: BMI, BMR, BAC, macro split, protein intake, sleep cycles
//! - [`finance`]: loan EMI, fixed-table currency conversion
//! - [`dates`]: calendar difference, day offsets
//! - [`text`]: cleanup, counts, case transforms
//! - [`units`]: length, mass, temperature conversion
//! - [`catalog`]: machine-readable tool list for hosts

mod error;

pub mod catalog;
pub mod dates;
pub mod finance;
pub mod health;
pub mod text;
pub mod units;

pub use catalog::{catalog, FieldKind, FieldSpec, ToolSpec};
pub use error::InputError;
