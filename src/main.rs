// Single-file page archiver
//
// Inlines every stylesheet, script, image and favicon of a page as a data URI
// and prints the resulting self-contained document.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use kodegen_tools_monolith::{Monolith, MonolithConfig};

/// Save a web page, local or remote, as a single HTML file with all of its
/// assets embedded.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Path or http(s) URL of the document to convert
    target: Option<String>,
    /// Print the document as base64 instead of raw markup
    #[arg(short = 'u', long)]
    data_uri: bool,
    /// Do not report assets as they are retrieved
    #[arg(short, long)]
    quiet: bool,
    /// Leave stylesheets external
    #[arg(short = 'c', long)]
    no_css: bool,
    /// Leave scripts external
    #[arg(short = 'j', long)]
    no_js: bool,
    /// Leave images and favicons external
    #[arg(short = 'i', long)]
    no_images: bool,
    /// Inline scripts as element content instead of data URIs
    #[arg(long)]
    scripts_as_content: bool,
    /// Accept invalid TLS certificates
    #[arg(short = 'k', long)]
    insecure: bool,
    /// Network timeout in seconds
    #[arg(short, long)]
    timeout: Option<u64>,
    /// User-Agent header for remote requests
    #[arg(short = 'a', long)]
    user_agent: Option<String>,
    /// Resolve references against this location instead of the target's
    #[arg(short, long)]
    base_url: Option<String>,
    /// Maximum number of assets fetched at once
    #[arg(long)]
    max_concurrent: Option<usize>,
    /// Write the result to this file instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl CliArgs {
    fn config(&self) -> Result<MonolithConfig> {
        let mut builder = MonolithConfig::builder()
            .output_as_base64(self.data_uri)
            .quiet(self.quiet)
            .no_css(self.no_css)
            .no_js(self.no_js)
            .no_images(self.no_images)
            .scripts_as_content(self.scripts_as_content)
            .insecure(self.insecure);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout_secs(timeout);
        }
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        if let Some(base_url) = &self.base_url {
            builder = builder.base_url(base_url.clone());
        }
        if let Some(limit) = self.max_concurrent {
            builder = builder.max_concurrent_fetches(limit);
        }

        builder.build().context("Invalid options")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let Some(target) = args.target.as_deref() else {
        CliArgs::command().print_help()?;
        println!();
        return Ok(());
    };

    let monolith = Monolith::new(args.config()?).context("Failed to initialize converter")?;
    let conversion = monolith
        .convert(target)
        .await
        .with_context(|| format!("Failed to convert {target}"))?;

    for asset in &conversion.degraded {
        log::warn!("Inlined as empty: {asset}");
    }

    match &args.output {
        Some(path) => tokio::fs::write(path, &conversion.output)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", conversion.output),
    }

    Ok(())
}
