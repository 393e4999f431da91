//! Header parsing for the ucxgen binding generator.
//!
//! Turns a directory of u-connectXpress C headers into an immutable
//! [`ApiModel`]: one [`Function`] per accepted prototype with classified
//! parameters, plus the callback registrations.
//!
//! ## Modules
//!
//! - [`conventions`] — Prefixes, handle names and exclusions of the wrapped API
//! - [`scan`] — Header enumeration and module derivation
//! - [`csig`] — Prototype and registration pattern matching
//! - [`classify`] — Parameter role assignment
//! - [`link`] — Byte array to length parameter linking
//! - [`assemble`] — Model assembly across headers
//! - [`model`] — The parsed model types

pub mod assemble;
pub mod classify;
pub mod conventions;
pub mod csig;
pub mod error;
pub mod link;
pub mod model;
pub mod scan;

// Re-export key types for convenience
pub use assemble::{load_model, ModelBuilder};
pub use conventions::ApiConventions;
pub use error::ParseError;
pub use model::{ApiModel, Function, FunctionParam, Module, ParamRole, ReturnType, UrcCallback};
pub use scan::{scan_headers, HeaderFile};
