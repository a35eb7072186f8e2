use scraper::{ElementRef, Html, Selector};

use crate::assembler;
use crate::results::PageContext;

/// Elements whose text never counts as rendered page text
const NON_RENDERED: [&str; 3] = ["script", "style", "noscript"];

/// Read-only view over the current page that extractors scan
pub trait PageSnapshot {
    /// Rendered plain text of the page body
    fn text(&self) -> &str;

    /// Text of the first element matching a CSS selector.
    ///
    /// Returns `None` when nothing matches, the element is empty, or the selector
    /// cannot be parsed.
    fn select_text(&self, selector: &str) -> Option<String>;
}

/// Snapshot backed by a parsed HTML document
pub struct HtmlSnapshot {
    doc: Html,
    title: String,
    text: String,
}

impl HtmlSnapshot {
    /// Parses a full HTML document
    pub fn parse(html: &str) -> Self {
        let doc = Html::parse_document(html);
        let title = extract_title(&doc);
        let text = extract_body_text(&doc);

        ::log::trace!(
            "Parsed snapshot: title {:?}, {} chars of text",
            title,
            text.len()
        );

        Self { doc, title, text }
    }

    /// Text of the `<title>` element, empty when absent
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl PageSnapshot for HtmlSnapshot {
    fn text(&self) -> &str {
        &self.text
    }

    fn select_text(&self, selector: &str) -> Option<String> {
        let selector = match Selector::parse(selector) {
            Ok(selector) => selector,
            Err(e) => {
                ::log::debug!("Ignoring unparsable selector {:?}: {}", selector, e);
                return None;
            }
        };

        let element = self.doc.select(&selector).next()?;
        non_empty(element.text().collect::<String>())
    }
}

/// Snapshot for hosts that can only supply rendered text
#[derive(Debug, Clone, Default)]
pub struct TextSnapshot {
    text: String,
}

impl TextSnapshot {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl PageSnapshot for TextSnapshot {
    fn text(&self) -> &str {
        &self.text
    }

    fn select_text(&self, _selector: &str) -> Option<String> {
        None
    }
}

/// Ordered list of selectors tried until one yields non-empty text
#[derive(Debug, Clone, Copy)]
pub struct SelectorChain(pub &'static [&'static str]);

impl SelectorChain {
    /// First non-empty result in chain order, if any
    pub fn first_text(&self, page: &dyn PageSnapshot) -> Option<String> {
        self.0.iter().find_map(|selector| page.select_text(selector))
    }
}

/// A page as the host saw it at one instant
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageCapture {
    pub url: String,
    pub title: String,
    pub html: String,
}

impl PageCapture {
    pub fn new(url: impl Into<String>, title: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            html: html.into(),
        }
    }

    /// Builds a capture from HTML alone, taking the title from the document
    pub fn from_html(url: impl Into<String>, html: impl Into<String>) -> Self {
        let html = html.into();
        let title = HtmlSnapshot::parse(&html).title().to_string();
        Self {
            url: url.into(),
            title,
            html,
        }
    }

    /// Parses the captured document and runs a full extraction pass over it
    pub fn context(&self) -> PageContext {
        let snapshot = HtmlSnapshot::parse(&self.html);
        assembler::assemble(&self.url, &self.title, &snapshot)
    }
}

fn extract_title(doc: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };
    doc.select(&selector)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn extract_body_text(doc: &Html) -> String {
    let Ok(selector) = Selector::parse("body") else {
        return String::new();
    };

    // Text nodes are concatenated as-is so inline markup never splits a token
    let mut raw = String::new();
    for body in doc.select(&selector) {
        for node in body.descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            let hidden = node
                .parent()
                .and_then(ElementRef::wrap)
                .is_some_and(|parent| NON_RENDERED.contains(&parent.value().name()));
            if !hidden {
                raw.push_str(text);
            }
        }
    }

    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
