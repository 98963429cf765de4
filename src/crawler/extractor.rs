//! Location extraction from city pages
//!
//! The site renders a store location in one of two markup shapes:
//!
//! - **Detail** pages carry one or more `.Core-address` blocks with schema.org
//!   `meta[itemprop]` metadata (coordinates, street, locality) next to the
//!   visible address text.
//! - **Teaser** listings carry `li.Directory-listTeaser` cards with visible
//!   text only and no coordinates.
//!
//! Each shape is an [`ExtractionStrategy`]. The [`Extractor`] parses a page
//! once and tries its strategies in priority order, stopping at the first one
//! that yields records. Results are never merged across strategies.

use crate::crawler::fetcher::fetch_page;
use crate::model::LocationRecord;
use crate::CrawlError;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

/// One markup shape a location can be rendered in
pub trait ExtractionStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Extracts every record this shape can resolve from the document
    ///
    /// Records without a street address must not be returned. An empty vector
    /// means the shape is absent or yielded nothing usable.
    fn extract(&self, document: &Html) -> Result<Vec<LocationRecord>, String>;
}

/// Result of running the strategy chain over one document
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Name of the strategy that produced the records, if any did
    pub strategy: Option<&'static str>,

    /// The extracted records
    pub records: Vec<LocationRecord>,
}

/// Ordered chain of extraction strategies
pub struct Extractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Default for Extractor {
    /// Detail format first, then the teaser format
    fn default() -> Self {
        Self::with_strategies(vec![Box::new(DetailFormat), Box::new(TeaserFormat)])
    }
}

impl Extractor {
    /// Creates an extractor that tries `strategies` in the given order
    pub fn with_strategies(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Names of the strategies in priority order
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Fetches a city page and extracts its locations
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<LocationRecord>)` - Records from the first strategy that found any
    /// * `Err(CrawlError)` - The page could not be fetched or parsed
    pub async fn extract(
        &self,
        client: &Client,
        page_url: &str,
    ) -> Result<Vec<LocationRecord>, CrawlError> {
        let body = fetch_page(client, page_url).await?;

        let extraction =
            self.extract_document(&body)
                .map_err(|message| CrawlError::HtmlParse {
                    url: page_url.to_string(),
                    message,
                })?;

        match extraction.strategy {
            Some(strategy) => tracing::debug!(
                "Extracted {} locations from {} using {} format",
                extraction.records.len(),
                page_url,
                strategy
            ),
            None => tracing::debug!("No location markup recognized on {}", page_url),
        }

        Ok(extraction.records)
    }

    /// Parses an HTML document once and runs the strategy chain over it
    pub fn extract_document(&self, html: &str) -> Result<Extraction, String> {
        let document = Html::parse_document(html);

        for strategy in &self.strategies {
            let records = strategy.extract(&document)?;
            if !records.is_empty() {
                return Ok(Extraction {
                    strategy: Some(strategy.name()),
                    records,
                });
            }
        }

        Ok(Extraction {
            strategy: None,
            records: Vec::new(),
        })
    }
}

/// Detail page format: `.Core-address` blocks with schema.org metadata
pub struct DetailFormat;

impl ExtractionStrategy for DetailFormat {
    fn name(&self) -> &'static str {
        "detail"
    }

    fn extract(&self, document: &Html) -> Result<Vec<LocationRecord>, String> {
        let block_selector = compile(".Core-address")?;
        let address_selector = compile("address.c-address")?;
        let fields = AddressSelectors::new()?;
        let meta = MetaSelectors::new()?;

        let page_title = first_text(document.root_element(), &compile("h1.Core-title")?);
        let brand = first_text(document.root_element(), &compile(".LocationName-brand")?);

        let mut records = Vec::new();

        for block in document.select(&block_selector) {
            // Fields outside an address element still resolve against the block
            let address = block.select(&address_selector).next().unwrap_or(block);

            let street = meta_content(block, &meta.street)
                .unwrap_or_else(|| first_text(address, &fields.street));
            if street.is_empty() {
                tracing::debug!("Dropping detail block without a street address");
                continue;
            }

            let name = if !page_title.is_empty() {
                page_title.clone()
            } else if !brand.is_empty() {
                format!("{} {}", brand, street)
            } else {
                street.clone()
            };

            records.push(LocationRecord {
                name,
                city: meta_content(block, &meta.locality)
                    .unwrap_or_else(|| first_text(address, &fields.city)),
                state: meta_content(block, &meta.region)
                    .unwrap_or_else(|| first_text(address, &fields.state)),
                zip_code: meta_content(block, &meta.postal_code)
                    .unwrap_or_else(|| first_text(address, &fields.postal_code)),
                country: meta_content(block, &meta.country)
                    .unwrap_or_else(|| first_text(address, &fields.country)),
                latitude: meta_coordinate(block, &meta.latitude),
                longitude: meta_coordinate(block, &meta.longitude),
                address: street,
            });
        }

        Ok(records)
    }
}

/// Teaser listing format: `li.Directory-listTeaser` cards, visible text only
pub struct TeaserFormat;

impl ExtractionStrategy for TeaserFormat {
    fn name(&self) -> &'static str {
        "teaser"
    }

    fn extract(&self, document: &Html) -> Result<Vec<LocationRecord>, String> {
        let teaser_selector = compile("li.Directory-listTeaser")?;
        let title_selector = compile("a.Teaser-titleLink")?;
        let brand_selector = compile(".LocationName-brand")?;
        let geo_selector = compile(".LocationName-geo")?;
        let address_selector = compile("address.c-address")?;
        let fields = AddressSelectors::new()?;

        let mut records = Vec::new();

        for teaser in document.select(&teaser_selector) {
            let Some(address) = teaser.select(&address_selector).next() else {
                tracing::debug!("Dropping teaser without an address block");
                continue;
            };

            let street = first_text(address, &fields.street);
            if street.is_empty() {
                tracing::debug!("Dropping teaser without a street address");
                continue;
            }

            let name = match teaser.select(&title_selector).next() {
                Some(title) => {
                    let brand = first_text(title, &brand_selector);
                    let geo = first_text(title, &geo_selector);
                    if !brand.is_empty() && !geo.is_empty() {
                        format!("{} {}", brand, geo)
                    } else if !geo.is_empty() {
                        geo
                    } else {
                        element_text(title)
                    }
                }
                None => String::new(),
            };

            records.push(LocationRecord {
                name,
                address: street,
                city: first_text(address, &fields.city),
                state: first_text(address, &fields.state),
                zip_code: first_text(address, &fields.postal_code),
                country: first_text(address, &fields.country),
                latitude: None,
                longitude: None,
            });
        }

        Ok(records)
    }
}

/// Visible-text selectors shared by both formats
struct AddressSelectors {
    street: Selector,
    city: Selector,
    state: Selector,
    postal_code: Selector,
    country: Selector,
}

impl AddressSelectors {
    fn new() -> Result<Self, String> {
        Ok(Self {
            street: compile(".c-address-street-1")?,
            city: compile(".c-address-city")?,
            state: compile(".c-address-state")?,
            postal_code: compile(".c-address-postal-code")?,
            country: compile(".c-address-country-name")?,
        })
    }
}

/// schema.org `meta[itemprop]` selectors used by the detail format
struct MetaSelectors {
    street: Selector,
    locality: Selector,
    region: Selector,
    postal_code: Selector,
    country: Selector,
    latitude: Selector,
    longitude: Selector,
}

impl MetaSelectors {
    fn new() -> Result<Self, String> {
        let itemprop = |name: &str| compile(&format!("meta[itemprop='{}']", name));
        Ok(Self {
            street: itemprop("streetAddress")?,
            locality: itemprop("addressLocality")?,
            region: itemprop("addressRegion")?,
            postal_code: itemprop("postalCode")?,
            country: itemprop("addressCountry")?,
            latitude: itemprop("latitude")?,
            longitude: itemprop("longitude")?,
        })
    }
}

fn compile(css: &str) -> Result<Selector, String> {
    Selector::parse(css).map_err(|e| format!("invalid selector '{}': {:?}", css, e))
}

/// Trimmed text of an element and its descendants
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first match under `scope`, or an empty string
fn first_text(scope: ElementRef<'_>, selector: &Selector) -> String {
    scope
        .select(selector)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

/// Non-empty `content` of the first `meta` matching `selector` under `scope`
fn meta_content(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

fn meta_coordinate(scope: ElementRef<'_>, selector: &Selector) -> Option<f64> {
    meta_content(scope, selector)?
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
