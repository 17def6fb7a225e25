// Store-specific listing page parsing
use crate::model::{Category, ParserError, RawListing, Store};
use crate::parser::price::{parse_installments, parse_price};
use crate::utils::collapse_whitespace;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

pub trait Parser {
    fn parse(&self, html: &str) -> Result<Vec<RawListing>, ParserError>;
}

#[derive(Debug, Clone, Copy)]
enum LinkFrom {
    Card,
    Title,
}

#[derive(Debug, Clone, Copy)]
enum InstallmentsFrom {
    /// `12x de R$ 74,01` somewhere in the card text.
    CardText,
    /// Two spans: `12x` then `R$ 74,01`.
    SpanPair(&'static str),
}

#[derive(Debug, Clone, Copy)]
struct Layout {
    card: &'static str,
    title: &'static str,
    price: &'static str,
    link_from: LinkFrom,
    base_url: &'static str,
    installments: InstallmentsFrom,
}

fn layout(store: Store) -> Layout {
    match store {
        Store::Kabum => Layout {
            card: "a.productLink",
            title: "span.nameCard",
            price: "span.priceCard",
            link_from: LinkFrom::Card,
            base_url: "https://www.kabum.com.br",
            installments: InstallmentsFrom::CardText,
        },
        Store::Pichau => Layout {
            card: r#"a[data-cy="list-product"]"#,
            title: "h2",
            price: r#"[class*="price_vista"]"#,
            link_from: LinkFrom::Card,
            base_url: "https://www.pichau.com.br",
            installments: InstallmentsFrom::CardText,
        },
        Store::Terabyte => Layout {
            card: "div.product-item__box",
            title: "a.product-item__name",
            price: "div.product-item__new-price span",
            link_from: LinkFrom::Title,
            base_url: "https://www.terabyteshop.com.br",
            installments: InstallmentsFrom::SpanPair(".product-item__juros span"),
        },
    }
}

fn selector(css: &str) -> Result<Selector, ParserError> {
    Selector::parse(css).map_err(|e| ParserError::HtmlParseError(e.to_string()))
}

fn text_of(el: ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<String>())
}

/// Resolves a store-relative href against the store's origin.
fn absolute_link(base_url: &str, href: &str) -> String {
    let href = href.trim();
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else if href.starts_with('/') {
        format!("{}{}", base_url, href)
    } else {
        format!("{}/{}", base_url, href)
    }
}

pub struct StoreParser {
    store: Store,
    category: Category,
    layout: Layout,
    card: Selector,
    title: Selector,
    price: Selector,
    installment_spans: Option<Selector>,
}

impl StoreParser {
    pub fn new(store: Store, category: Category) -> Result<Self, ParserError> {
        let layout = layout(store);
        let installment_spans = match layout.installments {
            InstallmentsFrom::SpanPair(css) => Some(selector(css)?),
            InstallmentsFrom::CardText => None,
        };
        Ok(Self {
            store,
            category,
            layout,
            card: selector(layout.card)?,
            title: selector(layout.title)?,
            price: selector(layout.price)?,
            installment_spans,
        })
    }

    fn parse_card(&self, card: ElementRef<'_>) -> Option<RawListing> {
        let title_el = card.select(&self.title).next()?;
        let full_title = text_of(title_el);
        if full_title.is_empty() {
            return None;
        }

        let href = match self.layout.link_from {
            LinkFrom::Card => card.value().attr("href"),
            LinkFrom::Title => title_el.value().attr("href"),
        };
        let link = href
            .map(|h| absolute_link(self.layout.base_url, h))
            .unwrap_or_default();

        let cash_price = card
            .select(&self.price)
            .next()
            .map(text_of)
            .filter(|t| !t.is_empty());

        let (installments, installment_price) = match &self.installment_spans {
            Some(spans) => {
                let parts: Vec<String> = card.select(spans).map(text_of).collect();
                match parts.as_slice() {
                    [count, price, ..] => (
                        count
                            .trim_end_matches(|c: char| !c.is_ascii_digit())
                            .parse::<u32>()
                            .ok(),
                        parse_price(Some(price.as_str())),
                    ),
                    _ => (None, None),
                }
            }
            None => parse_installments(&text_of(card))
                .map_or((None, None), |(n, p)| (Some(n), Some(p))),
        };

        Some(RawListing {
            full_title,
            cash_price,
            installments,
            installment_price,
            link,
            store: self.store,
            category: self.category,
        })
    }
}

impl Parser for StoreParser {
    fn parse(&self, html: &str) -> Result<Vec<RawListing>, ParserError> {
        let document = Html::parse_document(html);
        let mut listings = Vec::new();
        let mut skipped = 0usize;

        for card in document.select(&self.card) {
            match self.parse_card(card) {
                Some(listing) => listings.push(listing),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!("{} {}: skipped {} cards without a title", self.store, self.category, skipped);
        }
        if listings.is_empty() && skipped == 0 {
            return Err(ParserError::MissingField(format!(
                "no product cards matching '{}'",
                self.layout.card
            )));
        }
        debug!("{} {}: parsed {} listings", self.store, self.category, listings.len());
        Ok(listings)
    }
}
