// Re-export modules
pub mod assembler;
pub mod build_paths;
pub mod classify;
pub mod config;
pub mod driver;
pub mod extractors;
pub mod messages;
pub mod results;
pub mod snapshot;
pub mod watcher;

// Re-export commonly used types for convenience
pub use assembler::assemble;
pub use classify::{PageCategory, classify};
pub use results::{Chain, PageContext, TokenSignal};
pub use snapshot::{HtmlSnapshot, PageCapture, PageSnapshot, TextSnapshot};
pub use watcher::{ChangeWatcher, ContextSink, PageSource, WatchEvent};

/// Runs one extraction pass over an HTML document, taking the title from the document
pub fn extract_html(url: &str, html: &str) -> PageContext {
    let snapshot = HtmlSnapshot::parse(html);
    assemble(url, snapshot.title(), &snapshot)
}
