//! Media types for embedded payloads
//!
//! Binary payloads are classified by signature sniffing, then wrapped into
//! `data:` URIs.

pub mod data_url;
pub mod sniffer;

pub use data_url::data_url;
pub use sniffer::{MediaType, sniff, sniff_font};
