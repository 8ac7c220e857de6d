//! Sort command handler.
//!
//! Prints the collection as a plain text table in the requested order.

use super::{ListSource, load_list};
use crate::analytics::{self, PriceMode};
use crate::config::AppConfig;
use crate::i18n::TextKey;
use crate::list::ItemsList;
use crate::sorting::SortMode;
use anyhow::{Result, bail};
use std::fmt::Write as _;
use unicode_width::UnicodeWidthStr;

/// Control overrides applied after the view state was restored.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortRequest {
    pub sort: Option<SortMode>,
    pub price_mode: Option<PriceMode>,
    /// Print at most this many rows
    pub limit: Option<usize>,
}

/// Run the sort command, writing the table to stdout.
pub fn run_sort(config: &AppConfig, source: &ListSource, request: SortRequest) -> Result<()> {
    let mut list = load_list(config, source)?;

    if let Some(mode) = request.price_mode {
        list.set_price_mode(mode);
    }
    if let Some(mode) = request.sort
        && !list.select_sort_mode(mode)
    {
        bail!(
            "{mode} is limited to {} items, the collection has {}",
            list.options().similarity_limit,
            list.len()
        );
    }

    print!("{}", format_table(&list, request.limit));
    Ok(())
}

/// Render the list's items in display order as aligned columns.
#[must_use]
pub fn format_table(list: &ItemsList, limit: Option<usize>) -> String {
    let t = list.translator();
    let currency = t.text(TextKey::CurrencySymbol);
    let mode = list.controls().price_mode;

    let header = [
        t.text(TextKey::Store).into_owned(),
        t.text(TextKey::Name).into_owned(),
        String::new(),
        t.text(TextKey::Price).into_owned(),
        "%".to_string(),
    ];
    let rows: Vec<[String; 5]> = list
        .items()
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|product| {
            [
                list.stores().display_name(&product.store),
                product.name.clone(),
                analytics::quantity_label(product),
                format!("{currency} {}", analytics::format_price(product, mode)),
                analytics::percentage_change(product)
                    .map(analytics::format_change)
                    .unwrap_or_default(),
            ]
        })
        .collect();

    let mut widths = [0usize; 5];
    for row in std::iter::once(&header).chain(&rows) {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(&header).chain(&rows) {
        let mut line = String::new();
        for (i, (cell, width)) in row.iter().zip(widths).enumerate() {
            let pad = width - cell.width();
            // Price and change columns are right aligned
            if i >= 3 {
                let _ = write!(line, "{}{cell}  ", " ".repeat(pad));
            } else {
                let _ = write!(line, "{cell}{}  ", " ".repeat(pad));
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
