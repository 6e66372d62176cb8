//! Collects every retrieval a document needs before any I/O happens

use std::collections::HashSet;

use kuchiki::traits::TendrilSink;

use super::srcset::parse_srcset;
use super::targets::{Target, targets};
use super::types::AssetPass;
use crate::address::{BaseLocation, has_foreign_scheme, resolve_fetchable};
use crate::config::MonolithConfig;
use crate::error::Result;
use crate::retrieval::RetrievalKey;

/// Everything a document needs retrieved before it can be rewritten
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetrievalPlan {
    /// Distinct keys of every embedding pass, in first-seen order
    pub keys: Vec<RetrievalKey>,
    /// The subset of `keys` naming linked stylesheets, whose own references
    /// are only known once they are retrieved
    pub stylesheets: Vec<RetrievalKey>,
}

/// Plan the retrievals of every embedding pass over `html`
pub fn plan_retrievals(
    html: &str,
    base: &BaseLocation,
    config: &MonolithConfig,
) -> Result<RetrievalPlan> {
    let document = kuchiki::parse_html().one(html);
    let mut seen = HashSet::new();
    let mut plan = RetrievalPlan::default();

    for pass in AssetPass::ALL.into_iter().filter(|pass| pass.embeds(config)) {
        let encoding = pass.encoding(config);

        for target in targets(&document, pass)? {
            for reference in fetchable_references(&target) {
                let key = RetrievalKey::new(resolve_fetchable(base, reference), encoding);
                if seen.insert(key.clone()) {
                    if pass == AssetPass::Css {
                        plan.stylesheets.push(key.clone());
                    }
                    plan.keys.push(key);
                }
            }
        }
    }

    log::debug!(
        "Planned {} distinct retrievals ({} stylesheets) against {base}",
        plan.keys.len(),
        plan.stylesheets.len()
    );
    Ok(plan)
}

/// References of `target` that point at fetchable content
pub(crate) fn fetchable_references(target: &Target) -> Vec<&str> {
    if target.is_srcset {
        parse_srcset(&target.value)
            .into_iter()
            .map(|candidate| candidate.url)
            .filter(|url| !has_foreign_scheme(url))
            .collect()
    } else if has_foreign_scheme(&target.value) {
        Vec::new()
    } else {
        vec![target.value.as_str()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieval::Encoding;
    use url::Url;

    const PAGE: &str = r#"<html><head>
<link rel="stylesheet" href="css/main.css">
<link rel="icon" href="/favicon.png">
<script src="app.js"></script>
<script src="app.js"></script>
</head><body>
<img src="data:image/png;base64,AAAA">
<img src="css/../img/logo.png">
<img src="img/logo.png">
<picture><source srcset="a.webp 1x, data:x 2x, b.webp 2x"></picture>
<a href="other.html">x</a>
</body></html>"#;

    fn base() -> BaseLocation {
        BaseLocation::Remote(Url::parse("https://site.com/blog/").unwrap())
    }

    fn planned(config: &MonolithConfig) -> Vec<String> {
        plan_retrievals(PAGE, &base(), config)
            .unwrap()
            .keys
            .into_iter()
            .map(|key| key.to_string())
            .collect()
    }

    #[test]
    fn plans_each_distinct_key_once_in_pass_order() {
        assert_eq!(
            planned(&MonolithConfig::default()),
            vec![
                "https://site.com/blog/css/main.css@text",
                "https://site.com/blog/app.js@base64",
                "https://site.com/blog/img/logo.png@base64",
                "https://site.com/blog/a.webp@base64",
                "https://site.com/blog/b.webp@base64",
                "https://site.com/favicon.png@base64",
            ]
        );
    }

    #[test]
    fn disabled_passes_plan_nothing() {
        let config = MonolithConfig::builder()
            .no_css(true)
            .no_images(true)
            .build()
            .unwrap();
        assert_eq!(planned(&config), vec!["https://site.com/blog/app.js@base64"]);
    }

    #[test]
    fn script_content_mode_plans_text() {
        let config = MonolithConfig::builder()
            .scripts_as_content(true)
            .no_css(true)
            .no_images(true)
            .build()
            .unwrap();
        let plan = plan_retrievals(PAGE, &base(), &config).unwrap();
        assert_eq!(plan.keys.len(), 1);
        assert_eq!(plan.keys[0].encoding, Encoding::Text);
        assert!(plan.stylesheets.is_empty());
    }

    #[test]
    fn stylesheets_are_listed_separately() {
        let plan = plan_retrievals(PAGE, &base(), &MonolithConfig::default()).unwrap();
        assert_eq!(plan.stylesheets.len(), 1);
        assert_eq!(plan.stylesheets[0].to_string(), "https://site.com/blog/css/main.css@text");
    }

    #[test]
    fn srcset_data_candidate_is_not_planned() {
        let html = r#"<picture><source srcset="a.png 1x, data:image/png;base64,AAAA 2x"></picture>"#;
        let plan = plan_retrievals(html, &base(), &MonolithConfig::default()).unwrap();
        let keys: Vec<String> = plan.keys.iter().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["https://site.com/blog/a.png@base64"]);
    }
}
