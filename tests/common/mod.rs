//! Test utilities and helper functions for the monolith test suite

use anyhow::Result;
use kodegen_tools_monolith::MonolithConfig;
use mockito::{Mock, Server};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary directory holding a test site
#[allow(dead_code)]
pub fn create_test_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test HTML document with the given head and body markup
#[allow(dead_code)]
pub fn create_test_html(head: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Test Page</title>
    {head}
</head>
<body>
    {body}
</body>
</html>"#
    )
}

/// Writes `contents` to `name` below `dir`, creating parent directories
#[allow(dead_code)]
pub fn write_site_file(dir: &Path, name: &str, contents: impl AsRef<[u8]>) -> Result<PathBuf> {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, contents)?;
    Ok(path)
}

/// Sets up a mock HTTP server
#[allow(dead_code)]
pub async fn setup_mock_server() -> mockito::ServerGuard {
    Server::new_async().await
}

/// Creates a mock endpoint that returns HTML content
#[allow(dead_code)]
pub async fn create_html_mock(server: &mut Server, path: &str, html: &str) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(html)
        .create_async()
        .await
}

/// Creates a mock endpoint serving `body` that must be hit exactly `hits` times
#[allow(dead_code)]
pub async fn create_asset_mock(
    server: &mut Server,
    path: &str,
    content_type: &str,
    body: &[u8],
    hits: usize,
) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", content_type)
        .with_body(body)
        .expect(hits)
        .create_async()
        .await
}

/// Creates a mock endpoint that returns an error
#[allow(dead_code)]
pub async fn create_error_mock(server: &mut Server, path: &str, status: usize) -> Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_body("Error")
        .create_async()
        .await
}

/// Quiet configuration with a short timeout
#[allow(dead_code)]
pub fn test_config() -> MonolithConfig {
    MonolithConfig::builder()
        .quiet(true)
        .timeout_secs(5)
        .build()
        .expect("valid test configuration")
}

/// Builds the absolute URL for a mock path
#[allow(dead_code)]
pub fn test_url(server: &Server, path: &str) -> String {
    format!("{}{}", server.url(), path)
}
