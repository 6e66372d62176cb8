//! Base location of a conversion run

use std::fmt;
use std::path::PathBuf;

use url::Url;

use super::resolver::normalize_path;
use super::types::{Address, AddressKind};
use crate::error::Result;

/// Directory or origin+path against which every reference of one document
/// is resolved.
///
/// A local base is an absolute directory; a remote base is a URL whose path
/// ends in `/` and carries no query or fragment. Built once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseLocation {
    Local(PathBuf),
    Remote(Url),
}

impl BaseLocation {
    /// Base of the document living at `address`: its parent directory, or its
    /// URL with the trailing filename stripped.
    #[must_use]
    pub fn of_document(address: &Address) -> Self {
        match address {
            Address::Local(path) => {
                let dir = path.parent().map_or_else(|| path.clone(), PathBuf::from);
                BaseLocation::Local(dir)
            }
            Address::Remote(url) => BaseLocation::Remote(directory_of(url)),
        }
    }

    /// Base given explicitly by the user.
    ///
    /// A local override always names a directory. A remote override follows
    /// the same rule as a document URL: anything after the last `/` is dropped.
    pub fn from_override(base: &str) -> Result<Self> {
        let address = Address::from_target(base)?;
        Ok(match address {
            Address::Local(dir) => BaseLocation::Local(dir),
            Address::Remote(url) => BaseLocation::Remote(directory_of(&url)),
        })
    }

    #[must_use]
    pub fn kind(&self) -> AddressKind {
        match self {
            BaseLocation::Local(_) => AddressKind::Local,
            BaseLocation::Remote(_) => AddressKind::Remote,
        }
    }

    /// The base itself as an address
    #[must_use]
    pub fn to_address(&self) -> Address {
        match self {
            BaseLocation::Local(dir) => Address::Local(normalize_path(dir)),
            BaseLocation::Remote(url) => Address::Remote(url.clone()),
        }
    }
}

fn directory_of(url: &Url) -> Url {
    url.join("./").unwrap_or_else(|e| {
        log::debug!("Keeping {url} as base, cannot strip filename: {e}");
        url.clone()
    })
}

impl fmt::Display for BaseLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseLocation::Local(dir) => {
                let shown = dir.display().to_string();
                if shown.ends_with(std::path::MAIN_SEPARATOR) {
                    f.write_str(&shown)
                } else {
                    write!(f, "{shown}{}", std::path::MAIN_SEPARATOR)
                }
            }
            BaseLocation::Remote(url) => f.write_str(url.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_base_drops_filename_query_and_fragment() {
        let address = Address::from_target("https://site.com/blog/post.html?page=2#top").unwrap();
        let base = BaseLocation::of_document(&address);
        assert_eq!(base.to_string(), "https://site.com/blog/");
    }

    #[test]
    fn remote_base_of_bare_origin_is_root() {
        let address = Address::from_target("http://site.com").unwrap();
        assert_eq!(BaseLocation::of_document(&address).to_string(), "http://site.com/");
    }

    #[test]
    fn remote_base_keeps_directory_urls() {
        let address = Address::from_target("https://site.com/docs/").unwrap();
        assert_eq!(BaseLocation::of_document(&address).to_string(), "https://site.com/docs/");
    }

    #[cfg(unix)]
    #[test]
    fn local_base_is_parent_directory_with_separator() {
        let address = Address::from_target("/var/www/site/index.html").unwrap();
        let base = BaseLocation::of_document(&address);
        assert_eq!(base, BaseLocation::Local(PathBuf::from("/var/www/site")));
        assert_eq!(base.to_string(), "/var/www/site/");
    }

    #[cfg(unix)]
    #[test]
    fn local_override_names_a_directory() {
        let base = BaseLocation::from_override("/srv/assets").unwrap();
        assert_eq!(base.to_string(), "/srv/assets/");
        assert_eq!(base.kind(), AddressKind::Local);
    }

    #[test]
    fn remote_override_strips_filename() {
        let base = BaseLocation::from_override("https://cdn.site.com/v2/index.html").unwrap();
        assert_eq!(base.to_string(), "https://cdn.site.com/v2/");
    }
}
