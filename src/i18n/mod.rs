//! UI text lookup.
//!
//! Every string the list renders goes through a [`Translator`]. Only the
//! English table ships with the crate; other languages are plugged in by
//! implementing the trait.

use std::borrow::Cow;

/// Identifies one UI string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    Store,
    Name,
    Price,
    Results,
    Chart,
    SalesPrice,
    UnitPrice,
    SortBy,
    PriceAscending,
    PriceDescending,
    QuantityAscending,
    QuantityDescending,
    StoreAndName,
    NameSimilarity,
    CurrencySymbol,
    PercentageChange,
    /// Takes the store name
    PriceSumForStore,
    /// Takes the start date
    ChangeSince,
    ShareLink,
    Copied,
    ChangedOn,
    MoreExpensive,
    Cheaper,
}

impl TextKey {
    /// Whether the text takes an argument through [`Translator::text_with`].
    #[must_use]
    pub const fn is_parameterized(self) -> bool {
        matches!(self, Self::PriceSumForStore | Self::ChangeSince)
    }
}

/// Resolves UI strings for one language.
pub trait Translator {
    /// Two-letter language code
    fn language(&self) -> &str;

    /// Plain text for `key`.
    fn text(&self, key: TextKey) -> Cow<'_, str>;

    /// Text for a key that takes one argument. Plain keys ignore `arg`.
    fn text_with(&self, key: TextKey, arg: &str) -> String {
        format!("{}{arg}", self.text(key))
    }
}

/// Built-in English table.
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl Translator for English {
    fn language(&self) -> &str {
        "en"
    }

    fn text(&self, key: TextKey) -> Cow<'_, str> {
        Cow::Borrowed(match key {
            TextKey::Store => "Store",
            TextKey::Name => "Name",
            TextKey::Price => "Price",
            TextKey::Results => "Results",
            TextKey::Chart => "Chart",
            TextKey::SalesPrice => "Sales price",
            TextKey::UnitPrice => "Unit price",
            TextKey::SortBy => "Sort by",
            TextKey::PriceAscending => "Price ascending",
            TextKey::PriceDescending => "Price descending",
            TextKey::QuantityAscending => "Quantity ascending",
            TextKey::QuantityDescending => "Quantity descending",
            TextKey::StoreAndName => "Store & name",
            TextKey::NameSimilarity => "Name similarity",
            TextKey::CurrencySymbol => "€",
            TextKey::PercentageChange => "Change as %",
            TextKey::PriceSumForStore => "Price sum ",
            TextKey::ChangeSince => "% change since ",
            TextKey::ShareLink => "Share link",
            TextKey::Copied => "(Copied)",
            TextKey::ChangedOn => "Changed on:",
            TextKey::MoreExpensive => "More expensive",
            TextKey::Cheaper => "Cheaper",
        })
    }

    fn text_with(&self, key: TextKey, arg: &str) -> String {
        if key.is_parameterized() {
            format!("{}{arg}", self.text(key))
        } else {
            self.text(key).into_owned()
        }
    }
}

/// Translator for a two-letter language code.
///
/// Unknown codes fall back to English.
#[must_use]
pub fn for_language(code: &str) -> Box<dyn Translator> {
    let primary = code.split(['-', '_']).next().unwrap_or_default();
    if !primary.eq_ignore_ascii_case("en") {
        tracing::warn!("No translation table for '{code}', using English");
    }
    Box::new(English)
}
