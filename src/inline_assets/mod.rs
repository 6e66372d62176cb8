//! Asset inlining
//!
//! This module rewrites a parsed document so that stylesheets, scripts,
//! images and favicons become `data:` URIs and hyperlinks become absolute,
//! producing a single self-contained file.

// Sub-modules
pub mod orchestrator;
pub mod planner;
pub mod rewriter;
pub mod srcset;
pub mod stylesheet;
pub mod targets;
pub mod types;

// Re-exports for public API
pub use orchestrator::Monolith;
pub use planner::{RetrievalPlan, plan_retrievals};
pub use rewriter::rewrite_document;
pub use stylesheet::{inline_stylesheet, plan_stylesheet};
pub use types::{AssetPass, Conversion};
