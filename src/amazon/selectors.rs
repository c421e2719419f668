//! CSS selectors for Amazon product detail pages.
//!
//! This file contains all CSS selectors used for locating page regions.
//! Update this file when Amazon changes their HTML structure.
//!
//! **Update process**: When parsing fails, capture HTML sample,
//! update selectors, and add test fixture.

use scraper::Selector;
use std::fmt;
use std::sync::LazyLock;

/// Logical regions of a product detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageRegion {
    /// Product title.
    Title,
    /// Discounted price block, present only during a sale.
    SalePrice,
    /// Regular price block.
    RegularPrice,
    /// "1,234 customer reviews" link text.
    ReviewCount,
    /// Broad container holding dimensions, weight and rank as free text.
    DetailContainer,
}

impl PageRegion {
    /// Returns every region in extraction order.
    pub fn all() -> &'static [PageRegion] {
        &[
            PageRegion::Title,
            PageRegion::SalePrice,
            PageRegion::RegularPrice,
            PageRegion::ReviewCount,
            PageRegion::DetailContainer,
        ]
    }

    /// Returns the compiled selector for this region.
    pub fn selector(&self) -> &'static Selector {
        match self {
            PageRegion::Title => &*product::TITLE,
            PageRegion::SalePrice => &*product::SALE_PRICE,
            PageRegion::RegularPrice => &*product::REGULAR_PRICE,
            PageRegion::ReviewCount => &*product::REVIEW_COUNT,
            PageRegion::DetailContainer => &*product::DETAIL_CONTAINER,
        }
    }
}

impl fmt::Display for PageRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PageRegion::Title => "title",
            PageRegion::SalePrice => "sale price",
            PageRegion::RegularPrice => "regular price",
            PageRegion::ReviewCount => "review count",
            PageRegion::DetailContainer => "detail container",
        };
        write!(f, "{}", name)
    }
}

/// Selectors for individual product pages.
pub mod product {
    use super::*;

    /// Product title on detail page.
    pub static TITLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("#productTitle").unwrap());

    /// Discounted price.
    pub static SALE_PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("#priceblock_saleprice").unwrap());

    /// Regular price, used when no sale is running.
    pub static REGULAR_PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("#priceblock_ourprice").unwrap());

    /// Review count text.
    pub static REVIEW_COUNT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("#acrCustomerReviewText").unwrap());

    /// Detail container with product information tables.
    pub static DETAIL_CONTAINER: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("#dp-container").unwrap());
}

/// Selectors for detecting error/captcha pages.
pub mod errors {
    use super::*;

    /// CAPTCHA form.
    pub static CAPTCHA: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "form[action*='validateCaptcha'], \
             img[src*='captcha']",
        )
        .unwrap()
    });

    /// Dog page (Amazon's error page). Must not match pet product images.
    pub static DOG_PAGE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "img[alt*='the dog ate'], \
             img[alt*='Dogs of Amazon'], \
             .a-box-inner a[href='/ref=cs_503_link']",
        )
        .unwrap()
    });
}
