//! Types shared by the inlining passes

use std::fmt;

use crate::config::MonolithConfig;
use crate::retrieval::{DegradedAsset, Encoding};

/// One rewrite pass over the document, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetPass {
    /// `<head><link rel="stylesheet" href>`
    Css,
    /// `<script src>`
    Js,
    /// `<img src>` and `<picture><source srcset>`
    Images,
    /// `<head><link rel="...icon..." href>`
    Favicon,
    /// `<a href>`, made absolute but never fetched
    Anchors,
}

impl AssetPass {
    pub const ALL: [AssetPass; 5] = [
        AssetPass::Css,
        AssetPass::Js,
        AssetPass::Images,
        AssetPass::Favicon,
        AssetPass::Anchors,
    ];

    /// Whether this pass embeds content. Disabled passes and anchors only
    /// rewrite references to absolute addresses.
    #[must_use]
    pub fn embeds(self, config: &MonolithConfig) -> bool {
        match self {
            AssetPass::Css => !config.no_css(),
            AssetPass::Js => !config.no_js(),
            AssetPass::Images | AssetPass::Favicon => !config.no_images(),
            AssetPass::Anchors => false,
        }
    }

    /// Encoding this pass needs its payloads in.
    ///
    /// Stylesheets are read as text so their own references can be inlined.
    #[must_use]
    pub fn encoding(self, config: &MonolithConfig) -> Encoding {
        match self {
            AssetPass::Css => Encoding::Text,
            AssetPass::Js if config.scripts_as_content() => Encoding::Text,
            _ => Encoding::Binary,
        }
    }
}

impl fmt::Display for AssetPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetPass::Css => write!(f, "CSS"),
            AssetPass::Js => write!(f, "JS"),
            AssetPass::Images => write!(f, "Image"),
            AssetPass::Favicon => write!(f, "Favicon"),
            AssetPass::Anchors => write!(f, "Anchor"),
        }
    }
}

/// Result of converting one document
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Serialized document, base64-encoded when configured
    pub output: String,
    /// Number of distinct (address, encoding) pairs retrieved
    pub retrieved: usize,
    /// Remote assets inlined as empty content
    pub degraded: Vec<DegradedAsset>,
}

impl Conversion {
    /// Check if any remote asset degraded to empty content
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.degraded.is_empty()
    }

    /// Degraded share of retrieved assets, between 0.0 and 1.0
    #[must_use]
    pub fn failure_rate(&self) -> f64 {
        if self.retrieved == 0 {
            0.0
        } else {
            self.degraded.len() as f64 / self.retrieved as f64
        }
    }
}
