use std::time::Duration;

use log::debug;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::youtube::USER_AGENT;
use crate::{Document, Error, Result};

/// Default timeout for page requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const MAIN_SELECTORS: [&str; 5] = ["article", "main", "[role='main']", ".content", "#content"];

const CONTENT_SELECTOR: &str = "p, h1, h2, h3, h4, h5, h6, li, pre, blockquote";

const NON_TEXT_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Create the scraping client: desktop browser identity, certificate errors tolerated
pub fn create_client() -> Result<Client> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .danger_accept_invalid_certs(true)
        .timeout(REQUEST_TIMEOUT)
        .build()?)
}

/// Fetch a page and extract its readable text; `None` when the page has no text
pub async fn fetch_page(client: &Client, url: &str) -> Result<Option<Document>> {
    debug!("Fetching page: {url}");
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::NoReadableContent(format!("server returned {status}")));
    }

    let is_plain_text = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("text/plain"));

    let body = response.text().await?;
    debug!("Fetched {} bytes from {url}", body.len());

    let (title, text) = if is_plain_text {
        (None, body.trim().to_string())
    } else {
        let document = Html::parse_document(&body);
        (extract_title(&document), extract_text(&document))
    };

    if text.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(Document {
        source: url.to_string(),
        title,
        content: text,
    }))
}

fn selector(s: &str) -> Option<Selector> {
    Selector::parse(s).ok()
}

/// Page title from <title>, falling back to the first <h1>
fn extract_title(document: &Html) -> Option<String> {
    ["title", "h1"].into_iter().filter_map(selector).find_map(|sel| {
        let title = document
            .select(&sel)
            .next()?
            .text()
            .collect::<String>()
            .trim()
            .to_string();
        (!title.is_empty()).then_some(title)
    })
}

/// Readable text of the main content area, or of the whole page
fn extract_text(document: &Html) -> String {
    for sel in MAIN_SELECTORS.into_iter().filter_map(selector) {
        if let Some(element) = document.select(&sel).next() {
            let text = extract_blocks(&Html::parse_fragment(&element.html()));
            if !text.trim().is_empty() {
                return text;
            }
        }
    }

    let text = extract_blocks(document);
    if !text.trim().is_empty() {
        return text;
    }

    // pages that keep their text in <div>s and <span>s
    extract_body_text(document)
}

/// All text under <body> outside script-like elements, whitespace collapsed
fn extract_body_text(document: &Html) -> String {
    let Some(body) = selector("body").and_then(|sel| document.select(&sel).next()) else {
        return String::new();
    };

    body.descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node
                .ancestors()
                .filter_map(scraper::ElementRef::wrap)
                .any(|el| NON_TEXT_ELEMENTS.contains(&el.value().name()));
            (!hidden).then_some(&**text)
        })
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Paragraph, heading and list text with whitespace collapsed, one block per paragraph
fn extract_blocks(document: &Html) -> String {
    let Some(content) = selector(CONTENT_SELECTOR) else {
        return String::new();
    };

    document
        .select(&content)
        // nested matches (a <p> inside an <li>) would repeat text
        .filter(|el| {
            !el.ancestors()
                .filter_map(scraper::ElementRef::wrap)
                .any(|a| content.matches(&a))
        })
        .map(|el| el.text().collect::<Vec<_>>().join(" "))
        .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
