//! WebDriver-backed host: opens a real browser page, feeds its changes to a
//! [`ChangeWatcher`], and relays host requests read from stdin.

use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder};
use std::error::Error;
use std::io::BufRead;
use std::thread;
use tokio::sync::mpsc;

use crate::config::WatcherConfig;
use crate::messages::InboundMessage;
use crate::snapshot::PageCapture;
use crate::watcher::{ChangeWatcher, ContextSink, SharedPage, WatchEvent};

/// Connects to the WebDriver instance, trying common local ports if the configured
/// one is unreachable
pub async fn connect(webdriver_url: &str) -> Option<Client> {
    match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Some(client);
        }
        Err(e) => {
            ::log::error!(
                "Failed to connect to WebDriver at {}: {}",
                webdriver_url,
                e
            );
        }
    }

    let fallback_urls = [
        "http://localhost:9515", // ChromeDriver default
        "http://localhost:4444", // geckodriver / Selenium default
        "http://127.0.0.1:4444",
    ];

    for url in fallback_urls.iter() {
        if *url == webdriver_url {
            continue;
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = ClientBuilder::native().connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Some(client);
        }
    }

    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    None
}

/// Reads the browser's current URL, title and page source
pub async fn capture(client: &Client) -> Result<PageCapture, CmdError> {
    let url = client.current_url().await?.to_string();
    let title = client.title().await?;
    let html = client.source().await?;
    Ok(PageCapture::new(url, title, html))
}

/// Navigates to a URL and captures the loaded page
pub async fn open(client: &Client, url: &str) -> Result<PageCapture, CmdError> {
    ::log::info!("Opening {}", url);
    client.goto(url).await?;
    capture(client).await
}

/// Watches a live page until interrupted.
///
/// The initial load emits immediately, a changed page source counts as a DOM
/// mutation, and `GET_PAGE_CONTEXT` lines on stdin request an immediate emission.
pub async fn watch<K>(
    client: Client,
    url: &str,
    config: &WatcherConfig,
    sink: K,
) -> Result<(), Box<dyn Error>>
where
    K: ContextSink + Send + 'static,
{
    let page = SharedPage::new(open(&client, url).await?);

    let (event_tx, event_rx) = mpsc::channel::<WatchEvent>(64);
    let watcher = ChangeWatcher::from_config(page.clone(), sink, config);
    let watcher_task = tokio::spawn(watcher.run(event_rx));

    event_tx.send(WatchEvent::Loaded).await?;

    // The reader thread is never joined; a blocked stdin read must not hold up exit
    let (request_tx, mut request_rx) = mpsc::channel::<InboundMessage>(16);
    spawn_request_reader(request_tx);

    let mut interval = tokio::time::interval(config.poll_interval());
    loop {
        tokio::select! {
            _ = interval.tick() => {}
            Some(InboundMessage::GetPageContext) = request_rx.recv() => {
                ::log::debug!("Host requested context");
                if event_tx.send(WatchEvent::RequestContext).await.is_err() {
                    break;
                }
                continue;
            }
            _ = tokio::signal::ctrl_c() => {
                ::log::info!("Interrupted, stopping watcher");
                break;
            }
        }

        match capture(&client).await {
            Ok(latest) => {
                if page.replace(latest) {
                    ::log::debug!("Page changed since last poll");
                    if event_tx.send(WatchEvent::Mutation).await.is_err() {
                        break;
                    }
                }
            }
            Err(e) => {
                ::log::error!("Failed to read page: {}", e);
                break;
            }
        }
    }

    drop(request_rx);
    drop(event_tx);
    watcher_task.await?;

    if let Err(e) = client.close().await {
        ::log::warn!("Failed to close client: {}", e);
    }
    Ok(())
}

/// Reads host messages from stdin on a detached thread
pub fn spawn_request_reader(request_tx: mpsc::Sender<InboundMessage>) -> thread::JoinHandle<()> {
    thread::spawn(move || relay_host_requests(std::io::stdin().lock(), request_tx))
}

/// Forwards recognised host messages, one JSON object per line, until the input ends
/// or the receiving side goes away
pub fn relay_host_requests<R: BufRead>(reader: R, request_tx: mpsc::Sender<InboundMessage>) {
    for line in reader.lines() {
        let Ok(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        if let Some(message) = InboundMessage::parse(&line) {
            if request_tx.blocking_send(message).is_err() {
                ::log::debug!("Watcher is gone, stopping stdin relay");
                break;
            }
        }
    }
}
