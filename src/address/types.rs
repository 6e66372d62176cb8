//! Address classification
//!
//! Every location the converter touches is either a filesystem path or an
//! `http(s)` URL. The kind is decided once, by [`AddressKind::classify`], and
//! consumed everywhere through exhaustive matching.

use std::fmt;
use std::path::PathBuf;

use url::Url;

use super::resolver::normalize_path;
use crate::error::{MonolithError, Result};

/// The two addressing universes a reference can live in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    Local,
    Remote,
}

impl AddressKind {
    /// Classify a location string by its prefix.
    ///
    /// Case-insensitive `http://` or `https://` is remote, anything else is a
    /// local path. Total over every input.
    #[must_use]
    pub fn classify(location: &str) -> Self {
        if has_prefix_ignore_case(location, "http://") || has_prefix_ignore_case(location, "https://")
        {
            AddressKind::Remote
        } else {
            AddressKind::Local
        }
    }
}

fn has_prefix_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len() && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// A fully resolved location
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Address {
    /// Absolute, normalized filesystem path
    Local(PathBuf),
    /// Absolute `http(s)` URL
    Remote(Url),
}

impl Address {
    #[must_use]
    pub fn kind(&self) -> AddressKind {
        match self {
            Address::Local(_) => AddressKind::Local,
            Address::Remote(_) => AddressKind::Remote,
        }
    }

    /// Turn the user-supplied target into an absolute address.
    ///
    /// Relative paths are anchored at the current working directory.
    pub fn from_target(target: &str) -> Result<Self> {
        let target = target.trim();
        if target.is_empty() {
            return Err(MonolithError::InvalidTarget("empty target".to_string()));
        }

        match AddressKind::classify(target) {
            AddressKind::Remote => Url::parse(target)
                .map(Address::Remote)
                .map_err(|e| MonolithError::InvalidTarget(format!("{target}: {e}"))),
            AddressKind::Local => {
                let path = PathBuf::from(target);
                let absolute = if path.is_absolute() {
                    path
                } else {
                    std::env::current_dir()
                        .map_err(|e| {
                            MonolithError::InvalidTarget(format!(
                                "cannot resolve {target} against the working directory: {e}"
                            ))
                        })?
                        .join(path)
                };
                Ok(Address::Local(normalize_path(&absolute)))
            }
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Local(path) => write!(f, "{}", path.display()),
            Address::Remote(url) => f.write_str(url.as_str()),
        }
    }
}
