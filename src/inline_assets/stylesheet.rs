//! Stylesheet inlining
//!
//! `url(...)` and `@import` references inside a stylesheet are relative to the
//! stylesheet, not to the page, and a `data:` URI has no location of its own.
//! They are therefore resolved against the sheet's address, retrieved like any
//! other asset and embedded before the sheet itself becomes a `data:` URI.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::{Arc, LazyLock};

use base64::Engine;
use regex::{Captures, Regex};

use super::rewriter::payload_or_empty;
use crate::address::{Address, BaseLocation, has_foreign_scheme, resolve, resolve_fetchable};
use crate::config::MonolithConfig;
use crate::media::{data_url, sniff, sniff_font};
use crate::retrieval::{Encoding, RetrievalKey};
use crate::utils::CSS_MEDIA_TYPE;

static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)@import\s+(?:url\(\s*(?:"([^"]*)"|'([^']*)'|([^)"'\s]*))\s*\)|"([^"]*)"|'([^']*)')"#,
    )
    .expect("IMPORT_RE: hardcoded regex is valid")
});

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)url\(\s*(?:"([^"]*)"|'([^']*)'|([^)"'\s]*))\s*\)"#)
        .expect("URL_RE: hardcoded regex is valid")
});

/// A reference found in stylesheet text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssReference<'a> {
    /// Byte range of the whole `url(...)` or `@import ...` construct
    pub span: Range<usize>,
    pub url: &'a str,
    pub is_import: bool,
}

/// Every fetchable reference of `css`, in source order.
///
/// Empty references, in-document `#fragment`s and foreign schemes such as
/// `data:` are skipped.
#[must_use]
pub fn css_references(css: &str) -> Vec<CssReference<'_>> {
    let imports: Vec<CssReference<'_>> = IMPORT_RE
        .captures_iter(css)
        .filter_map(|caps| reference(css, &caps, true))
        .collect();

    let mut references: Vec<CssReference<'_>> = URL_RE
        .captures_iter(css)
        .filter_map(|caps| reference(css, &caps, false))
        .filter(|found| {
            !imports
                .iter()
                .any(|import| import.span.start <= found.span.start && found.span.end <= import.span.end)
        })
        .collect();

    references.extend(imports);
    references.sort_by_key(|found| found.span.start);
    references.retain(|found| {
        !found.url.is_empty() && !found.url.starts_with('#') && !has_foreign_scheme(found.url)
    });
    references
}

fn reference<'a>(css: &'a str, caps: &Captures<'a>, is_import: bool) -> Option<CssReference<'a>> {
    let whole = caps.get(0)?;
    let url = caps.iter().skip(1).flatten().next()?;

    Some(CssReference {
        span: whole.range(),
        url: css[url.range()].trim(),
        is_import,
    })
}

/// Retrievals the stylesheet at `sheet` needs.
///
/// Imported stylesheets are requested as text so they can be inlined in turn;
/// every other reference as base64. With images disabled only imports are
/// retrieved.
#[must_use]
pub fn plan_stylesheet(sheet: &Address, css: &str, config: &MonolithConfig) -> Vec<RetrievalKey> {
    let base = BaseLocation::of_document(sheet);

    css_references(css)
        .into_iter()
        .filter(|found| found.is_import || !config.no_images())
        .map(|found| {
            let encoding = if found.is_import {
                Encoding::Text
            } else {
                Encoding::Binary
            };
            RetrievalKey::new(resolve_fetchable(&base, found.url), encoding)
        })
        .collect()
}

/// Rewrite the stylesheet at `sheet` so that it no longer depends on its
/// location: imports and `url()` references become `data:` URIs.
///
/// An import cycle is cut by leaving the repeated import as an absolute
/// address.
#[must_use]
pub fn inline_stylesheet(
    sheet: &Address,
    css: &str,
    config: &MonolithConfig,
    payloads: &HashMap<RetrievalKey, Arc<str>>,
) -> String {
    let mut chain = vec![sheet.clone()];
    inline_nested(sheet, css, config, payloads, &mut chain)
}

fn inline_nested(
    sheet: &Address,
    css: &str,
    config: &MonolithConfig,
    payloads: &HashMap<RetrievalKey, Arc<str>>,
    chain: &mut Vec<Address>,
) -> String {
    let base = BaseLocation::of_document(sheet);
    let mut output = String::with_capacity(css.len());
    let mut copied = 0;

    for found in css_references(css) {
        output.push_str(&css[copied..found.span.start]);
        copied = found.span.end;

        if found.is_import {
            let address = resolve_fetchable(&base, found.url);
            let target = if chain.contains(&address) {
                log::debug!("Import cycle through {address}, keeping the reference");
                resolve(&base, found.url).to_string()
            } else {
                let imported = payload_or_empty(payloads, &RetrievalKey::new(address.clone(), Encoding::Text));
                chain.push(address.clone());
                let inlined = inline_nested(&address, &imported, config, payloads, chain);
                chain.pop();
                css_data_url(&inlined)
            };
            output.push_str(&format!("@import url(\"{target}\")"));
        } else if config.no_images() {
            output.push_str(&format!("url(\"{}\")", resolve(&base, found.url)));
        } else {
            let key = RetrievalKey::new(resolve_fetchable(&base, found.url), Encoding::Binary);
            let payload = payload_or_empty(payloads, &key);
            let media_type = sniff_font(&payload).unwrap_or_else(|| sniff(&payload).as_str());
            output.push_str(&format!("url(\"{}\")", data_url(media_type, &payload)));
        }
    }

    output.push_str(&css[copied..]);
    output
}

/// `data:text/css;base64,...` of stylesheet text
#[must_use]
pub fn css_data_url(css: &str) -> String {
    data_url(
        CSS_MEDIA_TYPE,
        &base64::engine::general_purpose::STANDARD.encode(css),
    )
}
