//! Address classification and resolution
//!
//! This module turns the href/src values found in a document into absolute
//! addresses, across the two addressing universes the converter supports:
//! filesystem paths and `http(s)` URLs.

pub mod base;
pub mod resolver;
pub mod types;

pub use base::BaseLocation;
pub use resolver::{has_foreign_scheme, normalize_path, resolve, resolve_fetchable};
pub use types::{Address, AddressKind};
