//! Access to the text regions of a parsed product page.

use crate::amazon::client::CrawlError;
use crate::amazon::selectors::{errors, PageRegion};
use scraper::Html;

/// Text lookup by logical page region.
pub trait PageText {
    /// Returns the concatenated text of the region, or an empty string if absent.
    fn region_text(&self, region: PageRegion) -> String;

    /// Returns the detail container text with thousands separators removed.
    ///
    /// This is the only normalization applied to the container; every
    /// pattern-scanning extractor shares the result.
    fn detail_text(&self) -> String {
        self.region_text(PageRegion::DetailContainer).replace(',', "")
    }
}

/// A parsed product detail page.
pub struct ProductPage {
    document: Html,
}

impl ProductPage {
    /// Parses the page, rejecting CAPTCHA and error pages.
    pub fn parse(html: &str) -> Result<Self, CrawlError> {
        let page = Self { document: Html::parse_document(html) };
        page.check_for_errors()?;
        Ok(page)
    }

    /// Checks for CAPTCHA or error pages.
    fn check_for_errors(&self) -> Result<(), CrawlError> {
        if self.document.select(&errors::CAPTCHA).next().is_some() {
            return Err(CrawlError::Blocked(
                "CAPTCHA detected. Try using a proxy or waiting before retrying.".to_string(),
            ));
        }

        if self.document.select(&errors::DOG_PAGE).next().is_some() {
            return Err(CrawlError::Blocked(
                "Amazon error page detected (503). The service may be temporarily unavailable."
                    .to_string(),
            ));
        }

        Ok(())
    }
}

impl PageText for ProductPage {
    fn region_text(&self, region: PageRegion) -> String {
        self.document.select(region.selector()).flat_map(|e| e.text()).collect()
    }
}
