//! Element enumeration for each pass
//!
//! Planning and rewriting both walk the document through [`targets`], so the
//! two phases always agree on which attribute of which element carries a
//! reference.

use kuchiki::{ElementData, NodeDataRef, NodeRef};

use super::types::AssetPass;
use crate::error::{MonolithError, Result};

/// An element attribute holding one or more references
pub struct Target {
    pub element: NodeDataRef<ElementData>,
    pub attribute: &'static str,
    /// Attribute value, trimmed and non-empty
    pub value: String,
    /// The value is a `srcset` candidate list rather than a single reference
    pub is_srcset: bool,
}

impl Target {
    /// Overwrite the attribute this target was read from
    pub fn set(&self, value: String) {
        self.element.attributes.borrow_mut().insert(self.attribute, value);
    }

    /// Read another attribute of the same element
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.element.attributes.borrow().get(name).map(str::to_string)
    }
}

/// Collect, in document order, every target of `pass`
pub fn targets(document: &NodeRef, pass: AssetPass) -> Result<Vec<Target>> {
    match pass {
        AssetPass::Css => head_links(document, is_stylesheet),
        AssetPass::Favicon => head_links(document, is_icon),
        AssetPass::Js => select(document, "script[src]", "src", false),
        AssetPass::Anchors => select(document, "a[href]", "href", false),
        AssetPass::Images => {
            let mut images = select(document, "img[src]", "src", false)?;
            images.extend(select(document, "picture source[srcset]", "srcset", true)?);
            Ok(images)
        }
    }
}

fn select(
    document: &NodeRef,
    selector: &'static str,
    attribute: &'static str,
    is_srcset: bool,
) -> Result<Vec<Target>> {
    let elements = document
        .select(selector)
        .map_err(|()| MonolithError::Selector(selector))?;

    Ok(elements
        .filter_map(|element| {
            let value = element.attributes.borrow().get(attribute)?.trim().to_string();
            (!value.is_empty()).then_some(Target {
                element,
                attribute,
                value,
                is_srcset,
            })
        })
        .collect())
}

fn head_links(document: &NodeRef, rel_matches: fn(&str) -> bool) -> Result<Vec<Target>> {
    let links = select(document, "head link[href]", "href", false)?;

    Ok(links
        .into_iter()
        .filter(|link| link.attribute("rel").is_some_and(|rel| rel_matches(&rel)))
        .collect())
}

fn is_stylesheet(rel: &str) -> bool {
    rel.split_ascii_whitespace()
        .any(|token| token.eq_ignore_ascii_case("stylesheet"))
}

/// `icon`, `shortcut icon`, `apple-touch-icon`, ...
fn is_icon(rel: &str) -> bool {
    rel.to_ascii_lowercase().contains("icon")
}
