//! Fluent setters for `MonolithConfigBuilder`

use super::builder::MonolithConfigBuilder;

impl MonolithConfigBuilder {
    #[must_use]
    pub fn output_as_base64(mut self, enabled: bool) -> Self {
        self.output_as_base64 = enabled;
        self
    }

    #[must_use]
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Accept invalid TLS certificates.
    ///
    /// Only meant for archiving pages behind self-signed certificates.
    #[must_use]
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    #[must_use]
    pub fn no_css(mut self, disabled: bool) -> Self {
        self.no_css = disabled;
        self
    }

    #[must_use]
    pub fn no_js(mut self, disabled: bool) -> Self {
        self.no_js = disabled;
        self
    }

    #[must_use]
    pub fn no_images(mut self, disabled: bool) -> Self {
        self.no_images = disabled;
        self
    }

    /// Inline each external script as the text content of its `<script>`
    /// element and drop the `src` attribute, instead of writing a `data:` URI.
    #[must_use]
    pub fn scripts_as_content(mut self, enabled: bool) -> Self {
        self.scripts_as_content = enabled;
        self
    }

    /// Resolve references against `base_url` instead of the target's location
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = limit;
        self
    }
}
