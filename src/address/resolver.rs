//! Reference resolution against a base location
//!
//! Resolution never fails: a reference that cannot be parsed degrades to a
//! best-effort address instead of aborting the conversion.

use std::path::{Component, Path, PathBuf};

use url::Url;

use super::base::BaseLocation;
use super::types::{Address, AddressKind};

/// Resolve `reference` against `base` into one absolute address.
///
/// Remote bases, in precedence order:
/// - `//host/x` takes the base's scheme
/// - `/x` replaces the base's path
/// - an absolute `http(s)` reference is kept as is
/// - anything else is merged as a relative URL (`./`, `../`, segments)
///
/// Local bases join and normalize the reference as a path; an absolute path
/// bypasses the base. A `?query` or `#fragment` stays attached to the
/// resulting path. An `http(s)` reference stays remote whatever the base.
///
/// Callers filter `#fragment` references before calling this.
#[must_use]
pub fn resolve(base: &BaseLocation, reference: &str) -> Address {
    match base {
        BaseLocation::Remote(base_url) => Address::Remote(resolve_remote(base_url, reference)),
        BaseLocation::Local(dir) => resolve_local(dir, reference, true),
    }
}

/// Resolve `reference` to the resource that has to be read for it.
///
/// Same as [`resolve`] without the parts a read ignores: the fragment of a
/// URL, and both query and fragment of a local path.
#[must_use]
pub fn resolve_fetchable(base: &BaseLocation, reference: &str) -> Address {
    match base {
        BaseLocation::Remote(base_url) => {
            let mut url = resolve_remote(base_url, reference);
            url.set_fragment(None);
            Address::Remote(url)
        }
        BaseLocation::Local(dir) => match resolve_local(dir, reference, false) {
            Address::Remote(mut url) => {
                url.set_fragment(None);
                Address::Remote(url)
            }
            local => local,
        },
    }
}

fn resolve_remote(base: &Url, reference: &str) -> Url {
    let resolved = if reference.starts_with("//") {
        Url::parse(&format!("{}:{reference}", base.scheme()))
    } else if reference.starts_with('/') {
        base.join(reference)
    } else {
        match AddressKind::classify(reference) {
            AddressKind::Remote => Url::parse(reference),
            AddressKind::Local => base.join(reference),
        }
    };

    resolved.unwrap_or_else(|e| {
        log::debug!("Cannot resolve '{reference}' against {base} ({e}), falling back to base");
        base.clone()
    })
}

fn resolve_local(dir: &Path, reference: &str, keep_suffix: bool) -> Address {
    if AddressKind::classify(reference) == AddressKind::Remote {
        match Url::parse(reference) {
            Ok(url) => return Address::Remote(url),
            Err(e) => log::debug!("Treating malformed URL '{reference}' as a path: {e}"),
        }
    }

    let (path, suffix) = split_suffix(reference);
    let normalized = normalize_path(&dir.join(path));

    if keep_suffix && !suffix.is_empty() {
        let mut with_suffix = normalized.into_os_string();
        with_suffix.push(suffix);
        Address::Local(PathBuf::from(with_suffix))
    } else {
        Address::Local(normalized)
    }
}

/// `style.css?v=2#x` is the file `style.css` plus the suffix `?v=2#x`
fn split_suffix(reference: &str) -> (&str, &str) {
    let end = reference.find(['?', '#']).unwrap_or(reference.len());
    reference.split_at(end)
}

/// Lexically normalize a path: drop `.` segments and fold `..` into their
/// parent. `..` above the root stays at the root.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            Component::Normal(segment) => normalized.push(segment),
        }
    }

    normalized
}

/// True for references carrying a scheme other than `http(s)`, such as
/// `data:`, `javascript:` or `mailto:`. These are never resolved or fetched.
///
/// A single-letter scheme is a Windows drive letter, not a scheme.
#[must_use]
pub fn has_foreign_scheme(reference: &str) -> bool {
    let Some(colon) = reference.find(':') else {
        return false;
    };
    let scheme = &reference[..colon];
    if scheme.len() < 2 {
        return false;
    }

    let mut chars = scheme.chars();
    let well_formed = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    well_formed && !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https")
}
