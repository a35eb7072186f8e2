use clap::Parser;
use page_context::build_paths;
use page_context::config::WatcherConfig;
use page_context::driver;
use page_context::messages::OutboundMessage;
use page_context::{ContextSink, PageCapture, PageContext};
use std::error::Error;

mod args;
use args::{Args, Command};

/// Prints each context update as one JSON line on stdout
struct StdoutSink;

impl ContextSink for StdoutSink {
    fn emit(&mut self, context: PageContext) {
        match OutboundMessage::PageContextUpdate(context).to_json() {
            Ok(line) => println!("{}", line),
            Err(e) => ::log::error!("Failed to serialize context: {}", e),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        ::log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => WatcherConfig::from_file(path)?,
        None => WatcherConfig::default(),
    }
    .with_env_overrides();

    match args.command {
        Command::Extract { url, html } => {
            url::Url::parse(&url)?;

            let capture = match html {
                Some(path) => PageCapture::from_html(&url, std::fs::read_to_string(path)?),
                None => {
                    let client = driver::connect(&config.webdriver_url)
                        .await
                        .ok_or("No WebDriver server available")?;
                    let capture = driver::open(&client, &url).await;
                    if let Err(e) = client.close().await {
                        ::log::warn!("Failed to close client: {}", e);
                    }
                    capture?
                }
            };

            StdoutSink.emit(capture.context());
        }
        Command::Watch { url, debounce_ms } => {
            url::Url::parse(&url)?;

            let mut config = config;
            if let Some(debounce_ms) = debounce_ms {
                config.debounce_ms = debounce_ms;
            }

            ::log::info!(
                "Watching {} (debounce {} ms, poll {} ms)",
                url,
                config.debounce_ms,
                config.poll_interval_ms
            );

            let client = driver::connect(&config.webdriver_url)
                .await
                .ok_or("No WebDriver server available")?;
            driver::watch(client, &url, &config, StdoutSink).await?;
        }
        Command::FixPaths { dir, files } => {
            let fixed = if files.is_empty() {
                build_paths::fix_build_dir(&dir, &build_paths::DEFAULT_HTML_FILES)?
            } else {
                build_paths::fix_build_dir(&dir, files.as_slice())?
            };
            println!("Fixed {} file(s)", fixed);
        }
    }

    Ok(())
}
