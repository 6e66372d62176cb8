//! Getter methods for `MonolithConfig`

use super::types::MonolithConfig;

impl MonolithConfig {
    #[must_use]
    pub fn output_as_base64(&self) -> bool {
        self.output_as_base64
    }

    #[must_use]
    pub fn quiet(&self) -> bool {
        self.quiet
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    #[must_use]
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    #[must_use]
    pub fn insecure(&self) -> bool {
        self.insecure
    }

    #[must_use]
    pub fn no_css(&self) -> bool {
        self.no_css
    }

    #[must_use]
    pub fn no_js(&self) -> bool {
        self.no_js
    }

    #[must_use]
    pub fn no_images(&self) -> bool {
        self.no_images
    }

    #[must_use]
    pub fn scripts_as_content(&self) -> bool {
        self.scripts_as_content
    }

    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    #[must_use]
    pub fn max_concurrent_fetches(&self) -> usize {
        self.max_concurrent_fetches
    }
}
