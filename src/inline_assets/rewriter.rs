//! Writes retrieved payloads back into the document
//!
//! Runs after every planned retrieval completed, so it is purely synchronous:
//! each element is rewritten from its own attribute value, in document order.

use std::collections::HashMap;
use std::sync::Arc;

use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink;

use super::srcset::{format_srcset, parse_srcset};
use super::stylesheet::{css_data_url, inline_stylesheet};
use super::targets::{Target, targets};
use super::types::AssetPass;
use crate::address::{BaseLocation, has_foreign_scheme, resolve, resolve_fetchable};
use crate::config::MonolithConfig;
use crate::error::Result;
use crate::media::{data_url, sniff};
use crate::retrieval::{Encoding, RetrievalKey};
use crate::utils::JS_MEDIA_TYPE;

/// Run every pass over `html` and serialize the result
pub fn rewrite_document(
    html: &str,
    base: &BaseLocation,
    config: &MonolithConfig,
    payloads: &HashMap<RetrievalKey, Arc<str>>,
) -> Result<String> {
    let document = kuchiki::parse_html().one(html);
    let rewriter = Rewriter {
        base,
        config,
        payloads,
    };

    for pass in AssetPass::ALL {
        let targets = targets(&document, pass)?;
        log::debug!("{pass} pass: {} elements", targets.len());

        for target in &targets {
            rewriter.rewrite(pass, target);
        }
    }

    let mut html_output = Vec::new();
    document.serialize(&mut html_output)?;

    Ok(String::from_utf8(html_output)?)
}

struct Rewriter<'a> {
    base: &'a BaseLocation,
    config: &'a MonolithConfig,
    payloads: &'a HashMap<RetrievalKey, Arc<str>>,
}

impl Rewriter<'_> {
    fn rewrite(&self, pass: AssetPass, target: &Target) {
        if !target.is_srcset && has_foreign_scheme(&target.value) {
            return;
        }

        match pass {
            AssetPass::Anchors => self.link_anchor(target),
            _ if !pass.embeds(self.config) => self.make_absolute(target),
            AssetPass::Css => self.embed_stylesheet(target),
            AssetPass::Js if self.config.scripts_as_content() => self.inline_script(target),
            AssetPass::Js => self.embed(target, Some(JS_MEDIA_TYPE)),
            AssetPass::Images if target.is_srcset => self.embed_srcset(target),
            AssetPass::Images | AssetPass::Favicon => self.embed(target, None),
        }
    }

    fn absolute(&self, reference: &str) -> String {
        resolve(self.base, reference).to_string()
    }

    fn payload(&self, reference: &str, encoding: Encoding) -> Arc<str> {
        let key = RetrievalKey::new(resolve_fetchable(self.base, reference), encoding);
        payload_or_empty(self.payloads, &key)
    }

    /// In-page fragments stay untouched
    fn link_anchor(&self, target: &Target) {
        if !target.value.starts_with('#') {
            target.set(self.absolute(&target.value));
        }
    }

    fn make_absolute(&self, target: &Target) {
        if target.is_srcset {
            let candidates = parse_srcset(&target.value).into_iter().map(|candidate| {
                let url = if has_foreign_scheme(candidate.url) {
                    candidate.url.to_string()
                } else {
                    self.absolute(candidate.url)
                };
                (url, candidate.descriptor)
            });
            target.set(format_srcset(candidates));
        } else {
            target.set(self.absolute(&target.value));
        }
    }

    fn embed_stylesheet(&self, target: &Target) {
        let sheet = resolve_fetchable(self.base, &target.value);
        let css = self.payload(&target.value, Encoding::Text);
        let inlined = inline_stylesheet(&sheet, &css, self.config, self.payloads);
        target.set(css_data_url(&inlined));
    }

    /// `media_type` of `None` means sniff the payload
    fn embed(&self, target: &Target, media_type: Option<&str>) {
        let payload = self.payload(&target.value, Encoding::Binary);
        let media_type = media_type.unwrap_or_else(|| sniff(&payload).as_str());
        target.set(data_url(media_type, &payload));
    }

    /// A `type` attribute on the `<source>` wins over sniffing
    fn embed_srcset(&self, target: &Target) {
        let declared = target.attribute("type").filter(|t| !t.trim().is_empty());

        let candidates = parse_srcset(&target.value).into_iter().map(|candidate| {
            if has_foreign_scheme(candidate.url) {
                return (candidate.url.to_string(), candidate.descriptor);
            }
            let payload = self.payload(candidate.url, Encoding::Binary);
            let media_type = declared
                .as_deref()
                .unwrap_or_else(|| sniff(&payload).as_str());
            (data_url(media_type, &payload), candidate.descriptor)
        });

        target.set(format_srcset(candidates));
    }

    fn inline_script(&self, target: &Target) {
        let source = self.payload(&target.value, Encoding::Text);

        target.element.attributes.borrow_mut().remove("src");

        let node = target.element.as_node();
        for child in node.children().collect::<Vec<_>>() {
            child.detach();
        }
        node.append(NodeRef::new_text(source.to_string()));
    }
}

/// Retrieved payload of `key`, or empty content if it was never planned
pub(super) fn payload_or_empty(payloads: &HashMap<RetrievalKey, Arc<str>>, key: &RetrievalKey) -> Arc<str> {
    payloads.get(key).cloned().unwrap_or_else(|| {
        log::warn!("No payload retrieved for {key}; inlining empty content");
        Arc::from("")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use std::path::PathBuf;
    use url::Url;

    fn remote_base() -> BaseLocation {
        BaseLocation::Remote(Url::parse("https://site.com/blog/").unwrap())
    }

    fn payloads(entries: &[(&str, Encoding, &str)]) -> HashMap<RetrievalKey, Arc<str>> {
        entries
            .iter()
            .map(|(url, encoding, payload)| {
                let address = Address::Remote(Url::parse(url).unwrap());
                (RetrievalKey::new(address, *encoding), Arc::from(*payload))
            })
            .collect()
    }

    #[test]
    fn anchors_are_made_absolute_except_fragments() {
        let html = r##"<a href="#section1">s</a><a href=" about.html ">a</a><a href="mailto:x@y.z">m</a>"##;
        let output =
            rewrite_document(html, &remote_base(), &MonolithConfig::default(), &HashMap::new())
                .unwrap();

        assert!(output.contains(r##"href="#section1""##));
        assert!(output.contains(r#"href="https://site.com/blog/about.html""#));
        assert!(output.contains(r#"href="mailto:x@y.z""#));
    }

    #[test]
    fn stylesheet_and_script_use_declared_media_types() {
        let html = r#"<html><head><link rel="stylesheet" href="a.css"><script src="a.js"></script></head></html>"#;
        let payloads = payloads(&[
            ("https://site.com/blog/a.css", Encoding::Text, "body{}"),
            ("https://site.com/blog/a.js", Encoding::Binary, "YWxlcnQoMSk="),
        ]);

        let output =
            rewrite_document(html, &remote_base(), &MonolithConfig::default(), &payloads).unwrap();

        assert!(output.contains(r#"href="data:text/css;base64,Ym9keXt9""#));
        assert!(output.contains(r#"src="data:text/javascript;base64,YWxlcnQoMSk=""#));
    }

    #[test]
    fn images_and_favicons_are_sniffed() {
        let html = r#"<html><head><link rel="icon" href="/f.gif"></head><body><img src="p.png"><img src="x.jpg"></body></html>"#;
        let payloads = payloads(&[
            ("https://site.com/f.gif", Encoding::Binary, "R0lGODlhAQAB"),
            ("https://site.com/blog/p.png", Encoding::Binary, "iVBORw0KGgo="),
            ("https://site.com/blog/x.jpg", Encoding::Binary, "/9j/4AAQ"),
        ]);

        let output =
            rewrite_document(html, &remote_base(), &MonolithConfig::default(), &payloads).unwrap();

        assert!(output.contains(r#"href="data:image/gif;base64,R0lGODlhAQAB""#));
        assert!(output.contains(r#"src="data:image/png;base64,iVBORw0KGgo=""#));
        assert!(output.contains(r#"src="data:image/jpeg;base64,/9j/4AAQ""#));
    }

    #[test]
    fn picture_source_prefers_declared_type() {
        let html = r#"<picture><source type="image/webp" srcset="a.webp 1x, b.webp 2x"><source srcset="c.png"></picture>"#;
        let payloads = payloads(&[
            ("https://site.com/blog/a.webp", Encoding::Binary, "UklGRg=="),
            ("https://site.com/blog/b.webp", Encoding::Binary, "UklGRh=="),
            ("https://site.com/blog/c.png", Encoding::Binary, "iVBORw0K"),
        ]);

        let output =
            rewrite_document(html, &remote_base(), &MonolithConfig::default(), &payloads).unwrap();

        assert!(output.contains(
            r#"srcset="data:image/webp;base64,UklGRg== 1x, data:image/webp;base64,UklGRh== 2x""#
        ));
        assert!(output.contains(r#"srcset="data:image/png;base64,iVBORw0K""#));
    }

    #[test]
    fn missing_payload_degrades_to_empty_data_url() {
        let html = r#"<img src="gone.png">"#;
        let output =
            rewrite_document(html, &remote_base(), &MonolithConfig::default(), &HashMap::new())
                .unwrap();
        assert!(output.contains(r#"src="data:image/jpeg;base64,""#));
    }

    #[test]
    fn disabled_pass_only_makes_references_absolute() {
        let html = r#"<html><head><link rel="stylesheet" href="a.css"></head><body><picture><source srcset="s.webp 2x"></picture></body></html>"#;
        let config = MonolithConfig::builder().no_css(true).no_images(true).build().unwrap();

        let output = rewrite_document(html, &remote_base(), &config, &HashMap::new()).unwrap();

        assert!(output.contains(r#"href="https://site.com/blog/a.css""#));
        assert!(output.contains(r#"srcset="https://site.com/blog/s.webp 2x""#));
    }

    #[test]
    fn scripts_can_be_inlined_as_content() {
        let html = r#"<html><head><script src="a.js">stale()</script></head></html>"#;
        let payloads = payloads(&[("https://site.com/blog/a.js", Encoding::Text, "run(1 < 2)")]);
        let config = MonolithConfig::builder().scripts_as_content(true).build().unwrap();

        let output = rewrite_document(html, &remote_base(), &config, &payloads).unwrap();

        assert!(output.contains("<script>run(1 < 2)</script>"));
        assert!(!output.contains("stale()"));
    }

    #[test]
    fn existing_data_urls_are_left_alone() {
        let html = r#"<img src="data:image/png;base64,AAAA">"#;
        let output =
            rewrite_document(html, &remote_base(), &MonolithConfig::default(), &HashMap::new())
                .unwrap();
        assert!(output.contains(r#"src="data:image/png;base64,AAAA""#));
    }

    #[test]
    fn stylesheet_urls_resolve_against_the_stylesheet() {
        let html = r#"<html><head><link rel="stylesheet" href="/static/site.css"></head></html>"#;
        let payloads = payloads(&[
            ("https://site.com/static/site.css", Encoding::Text, "p{background:url(dot.png)}"),
            ("https://site.com/static/dot.png", Encoding::Binary, "iVBORw0K"),
        ]);

        let output =
            rewrite_document(html, &remote_base(), &MonolithConfig::default(), &payloads).unwrap();

        let css = r#"p{background:url("data:image/png;base64,iVBORw0K")}"#;
        assert!(output.contains(&css_data_url(css)));
    }

    #[test]
    fn srcset_with_leading_data_candidate_still_embeds_the_rest() {
        let html = r#"<picture><source srcset="data:image/gif;base64,R0lGODlh 1x, b.png 2x"></picture>"#;
        let payloads = payloads(&[("https://site.com/blog/b.png", Encoding::Binary, "iVBORw0K")]);

        let output =
            rewrite_document(html, &remote_base(), &MonolithConfig::default(), &payloads).unwrap();

        assert!(output.contains(
            r#"srcset="data:image/gif;base64,R0lGODlh 1x, data:image/png;base64,iVBORw0K 2x""#
        ));
    }

    #[cfg(unix)]
    #[test]
    fn local_anchor_keeps_fragment() {
        let base = BaseLocation::Local(PathBuf::from("/site"));
        let output = rewrite_document(
            r#"<a href="other.html#section2">next</a>"#,
            &base,
            &MonolithConfig::default(),
            &HashMap::new(),
        )
        .unwrap();
        assert!(output.contains(r##"href="/site/other.html#section2""##));
    }

    #[cfg(unix)]
    #[test]
    fn local_anchor_becomes_absolute_path() {
        let base = BaseLocation::Local(PathBuf::from("/site/docs"));
        let output = rewrite_document(
            r#"<a href="../index.html">home</a>"#,
            &base,
            &MonolithConfig::default(),
            &HashMap::new(),
        )
        .unwrap();
        assert!(output.contains(r#"href="/site/index.html""#));
    }
}
