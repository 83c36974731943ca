//! CSS selectors for the listing site's markup

use scraper::Selector;
use std::sync::LazyLock;

macro_rules! selector {
    ($name:ident, $css:literal) => {
        pub static $name: LazyLock<Selector> =
            LazyLock::new(|| Selector::parse($css).expect("valid selector"));
    };
}

// Listing page
selector!(TITLE, "span.im-titleBlock__title");
selector!(DESCRIPTION, "div.im-description__text.js-readAllText");
selector!(SUPERVISOR, "div.im-lead__supervisor");
selector!(PARAGRAPH, "p");
selector!(PHONE_ANCHOR, "a.im-lead__phone");
selector!(ANCHOR, "a");
selector!(PRICE_BLOCK, "div.im-mainFeatures__title");
selector!(PHOTO_TAB, "a#foto-tab");
selector!(FEATURE_ITEM, "li.nd-list__item");
selector!(FEATURE_LABEL, "span.im-mainFeatures__label");
selector!(FEATURE_VALUE, "span.im-mainFeatures__value");

// Catalog page
selector!(PAGINATION_LIST, "div.in-pagination__list");
selector!(PAGINATION_ITEM, "div.in-pagination__item");
selector!(LISTING_CARD, "div.in-card");
selector!(CARD_TITLE_LINK, "a.in-card__title");
