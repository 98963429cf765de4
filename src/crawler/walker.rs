//! Directory walker for listing pages
//!
//! A listing page enumerates its children as rows of the form:
//!
//! ```html
//! <div class="Directory-content">
//!   <ul>
//!     <li class="Directory-listItem">
//!       <a class="Directory-listLink" href="ma/boston" data-count="(3)">
//!         <span class="Directory-listLinkText">Boston</span>
//!       </a>
//!     </li>
//!   </ul>
//! </div>
//! ```
//!
//! Rows without a link or href are skipped. A missing or unparsable
//! `data-count` becomes 0 and the row is kept.

use crate::crawler::fetcher::fetch_page;
use crate::model::{DirectoryEntry, StateKey};
use crate::url::join_origin;
use crate::CrawlError;
use reqwest::Client;
use scraper::{Html, Selector};

const LIST_ITEM: &str = ".Directory-content li.Directory-listItem";
const LIST_LINK: &str = "a.Directory-listLink";
const LIST_LINK_TEXT: &str = ".Directory-listLinkText";

/// Fetches a listing page and returns its entries in document order
///
/// Any fetch or parse failure fails the whole call; there are no partial
/// results.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `page_url` - Absolute URL of the listing page
/// * `state` - The state the listing belongs to
/// * `origin` - Origin that discovered relative paths are joined onto
pub async fn walk(
    client: &Client,
    page_url: &str,
    state: StateKey,
    origin: &str,
) -> Result<Vec<DirectoryEntry>, CrawlError> {
    let body = fetch_page(client, page_url).await?;

    parse_directory(&body, state, origin).map_err(|message| CrawlError::HtmlParse {
        url: page_url.to_string(),
        message,
    })
}

/// Parses listing rows out of an HTML document
///
/// # Returns
///
/// * `Ok(Vec<DirectoryEntry>)` - Entries in document order (possibly empty)
/// * `Err(String)` - The listing pattern could not be applied
pub fn parse_directory(
    html: &str,
    state: StateKey,
    origin: &str,
) -> Result<Vec<DirectoryEntry>, String> {
    let document = Html::parse_document(html);

    let item_selector = compile(LIST_ITEM)?;
    let link_selector = compile(LIST_LINK)?;
    let text_selector = compile(LIST_LINK_TEXT)?;

    let mut entries = Vec::new();

    for item in document.select(&item_selector) {
        let Some(link) = item.select(&link_selector).next() else {
            tracing::debug!("Skipping listing row without a link in {}", state.upper());
            continue;
        };

        let Some(href) = link.value().attr("href") else {
            tracing::debug!("Skipping listing link without href in {}", state.upper());
            continue;
        };

        let declared_count = parse_count(link.value().attr("data-count"), href);

        let place_name = link
            .select(&text_selector)
            .next()
            .map(|text| text.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        entries.push(DirectoryEntry {
            url: join_origin(origin, href),
            declared_count,
            place_name,
            state,
        });
    }

    Ok(entries)
}

/// Parses a `data-count` annotation such as `"(12)"`
///
/// Missing or unparsable annotations (including negative numbers) yield 0 and
/// a warning.
pub fn parse_count(raw: Option<&str>, href: &str) -> u32 {
    let Some(raw) = raw else {
        tracing::warn!("Missing data-count for {}, defaulting to 0", href);
        return 0;
    };

    let trimmed = raw.trim().trim_start_matches('(').trim_end_matches(')').trim();
    match trimmed.parse::<u32>() {
        Ok(count) => count,
        Err(e) => {
            tracing::warn!(
                "Failed to parse data-count '{}' for {}: {}, defaulting to 0",
                raw,
                href,
                e
            );
            0
        }
    }
}

fn compile(css: &str) -> Result<Selector, String> {
    Selector::parse(css).map_err(|e| format!("invalid selector '{}': {:?}", css, e))
}
