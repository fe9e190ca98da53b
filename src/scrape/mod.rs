// src/scrape/mod.rs
//
// Extraction of upcoming drops from the howrare.is listing page.
// Assumptions (matching the site markup):
// - one `div.all_collections` per published date
// - the date label sits in `div.drop_date`
// - each candidate drop is a `div.all_coll_row`; legend/date rows carry
//   the `legend` or `drop_date` class and are not data
// - a data row holds its fields in `div.all_coll_col` cells

pub mod times;

use std::fmt;

use chrono::{Datelike, NaiveDate, Utc};
use log::{debug, info, warn};
use scraper::{ElementRef, Html, Selector};

use crate::progress::Progress;
use crate::{net, Result};

pub const DROPS_URL: &str = "https://howrare.is/drops";

/// Date key used for collection groups whose date label is missing
/// entirely. A label that is present but unparseable keeps its raw text
/// as the key instead.
pub const UNKNOWN_DATE_KEY: &str = "Unknown";

/* ---------- data model ---------- */

/// One minting event. Any field can be absent when the source markup is
/// malformed; a partially-filled record is still a record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DropRecord {
    pub project_name: Option<String>,
    pub time_eastern: Option<String>,
    pub time_utc: Option<String>,
    pub twitter_url: Option<String>,
    pub discord_url: Option<String>,
    pub website_url: Option<String>,
    pub supply: Supply,
    pub mint_price: Option<String>,
}

/// Announced supply. The site mixes numbers with placeholder text, so
/// "not a number" is an expected value rather than an error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Supply {
    Known(u32),
    #[default]
    Unknown,
}

impl Supply {
    pub fn parse(text: &str) -> Self {
        match text.trim().parse::<u32>() {
            Ok(n) => Supply::Known(n),
            Err(e) => {
                debug!("Non-number supply value: {text:?} ({e})");
                Supply::Unknown
            }
        }
    }
}

impl fmt::Display for Supply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Supply::Known(n) => write!(f, "{n}"),
            Supply::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Drops grouped under their `MM/DD` date key, preserving the page's
/// top-to-bottom order. Two groups sharing a key accumulate into one
/// sequence in encounter order.
#[derive(Clone, Debug, Default)]
pub struct DropsByDate {
    groups: Vec<(String, Vec<DropRecord>)>,
}

impl DropsByDate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, record: DropRecord) {
        match self.groups.iter_mut().find(|(k, _)| k.as_str() == key) {
            Some((_, records)) => records.push(record),
            None => self.groups.push((s!(key), vec![record])),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DropRecord])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of date groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn total_drops(&self) -> usize {
        self.groups.iter().map(|(_, v)| v.len()).sum()
    }
}

/// Row layout variant, resolved once per row from its cell count. Rows
/// close to mint gain an extra countdown cell which pushes the supply
/// and price cells one position to the right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowShape {
    Short,
    WithCountdown,
}

impl RowShape {
    pub fn of(cell_count: usize) -> Self {
        if cell_count > 6 {
            RowShape::WithCountdown
        } else {
            RowShape::Short
        }
    }

    pub fn supply_idx(self) -> usize {
        match self {
            RowShape::Short => 4,
            RowShape::WithCountdown => 5,
        }
    }

    pub fn price_idx(self) -> usize {
        match self {
            RowShape::Short => 5,
            RowShape::WithCountdown => 6,
        }
    }
}

/* ---------- extraction ---------- */

struct Selectors {
    group: Selector,
    date: Selector,
    row: Selector,
    cell: Selector,
    name: Selector,
    link: Selector,
}

impl Selectors {
    fn new() -> Self {
        // Literal selectors; parse cannot fail.
        Self {
            group: Selector::parse("div.all_collections").unwrap(),
            date: Selector::parse("div.drop_date").unwrap(),
            row: Selector::parse("div.all_coll_row").unwrap(),
            cell: Selector::parse("div.all_coll_col").unwrap(),
            name: Selector::parse("span").unwrap(),
            link: Selector::parse("a[href]").unwrap(),
        }
    }
}

/// Fetch the drops page and extract every upcoming drop, grouped by date.
/// Only the fetch itself can fail; malformed markup degrades per group,
/// row or field.
pub fn fetch_drops(mut progress: Option<&mut dyn Progress>) -> Result<DropsByDate> {
    if let Some(p) = progress.as_deref_mut() {
        p.log("Downloading drops...");
    }
    info!("Downloading drops...");

    let body = net::get(DROPS_URL)?;

    // html5ever recovers from anything; parsing never fails.
    let doc = Html::parse_document(&body);
    Ok(extract_drops(&doc, Utc::now().date_naive(), progress))
}

/// Pure extraction pass over an already-parsed document. `today` anchors
/// the UTC-to-Eastern conversion (daylight saving) and the year of the
/// `MM/DD` keys.
pub fn extract_drops(
    doc: &Html,
    today: NaiveDate,
    mut progress: Option<&mut dyn Progress>,
) -> DropsByDate {
    let sel = Selectors::new();
    let mut drops = DropsByDate::new();

    let groups: Vec<ElementRef> = doc.select(&sel.group).collect();
    debug!("Found {} collection groups.", groups.len());

    if let Some(p) = progress.as_deref_mut() {
        p.begin(groups.len());
    }

    for group in groups {
        let date_key = resolve_date_key(&group, &sel, today);

        for row in group.select(&sel.row) {
            // Header/legend and date rows share the row class; skip them.
            if row
                .value()
                .classes()
                .any(|c| c == "legend" || c == "drop_date")
            {
                continue;
            }

            match extract_record(&row, &sel, today) {
                Some(record) => {
                    drops.push(&date_key, record);
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done();
                    }
                }
                None => warn!(
                    "Unable to find information for a drop: malformed drop row. \
                     Skipping it and continuing."
                ),
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    info!("Found {} drops.", drops.total_drops());
    drops
}

fn resolve_date_key(group: &ElementRef, sel: &Selectors, today: NaiveDate) -> String {
    match group.select(&sel.date).next() {
        Some(el) => {
            let label = element_text(&el);
            match times::parse_date_label(&label, today.year()) {
                Some(key) => key,
                // Keep the raw label as the key so the group still renders.
                None => label,
            }
        }
        None => {
            warn!(
                "Unable to parse HTML to find a date. Filing this group's drops \
                 under \"{UNKNOWN_DATE_KEY}\" and continuing."
            );
            s!(UNKNOWN_DATE_KEY)
        }
    }
}

/// Extract a single record from a data row. `None` means the row did not
/// carry enough info cells to be a drop at all.
fn extract_record(row: &ElementRef, sel: &Selectors, today: NaiveDate) -> Option<DropRecord> {
    let cells: Vec<ElementRef> = row.select(&sel.cell).collect();
    if cells.len() < 6 {
        return None;
    }
    let shape = RowShape::of(cells.len());

    let mut record = DropRecord::default();

    // Cell 0: project name lives in a nested span
    record.project_name = cells[0]
        .select(&sel.name)
        .next()
        .map(|span| element_text(&span))
        .filter(|t| !t.is_empty());
    match &record.project_name {
        Some(name) => debug!("Project name found: {name}"),
        None => warn!(
            "Unable to find the project name for a drop. \
             Continuing anyway in hopes that this is not a problem."
        ),
    }

    // Cell 1: social/site links, classified by hostname substring
    for a in cells[1].select(&sel.link) {
        if let Some(href) = a.value().attr("href") {
            let url = href.to_lowercase();
            if url.contains("twitter") {
                debug!("Found twitter_url: {url}");
                record.twitter_url = Some(url);
            } else if url.contains("discord") {
                debug!("Found discord_url: {url}");
                record.discord_url = Some(url);
            } else {
                debug!("Found website_url: {url}");
                record.website_url = Some(url);
            }
        }
    }

    // Cell 2: the announced time, read twice (UTC display + Eastern)
    let raw_time = element_text(&cells[2]);
    record.time_eastern = times::to_eastern(&raw_time, today);
    record.time_utc = times::validate_utc(&raw_time);

    record.supply = Supply::parse(&element_text(&cells[shape.supply_idx()]));
    record.mint_price = Some(clean_price(&element_text(&cells[shape.price_idx()])));

    Some(record)
}

/// The site writes prices like "1.5 SOL" or "Free"; keep them as text,
/// lower-cased, with the currency suffix dropped.
fn clean_price(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    lower.strip_suffix("sol").unwrap_or(&lower).trim().to_string()
}

fn element_text(el: &ElementRef) -> String {
    let joined: String = el.text().collect();
    normalize_ws(&joined)
}

fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

/* ---------- tests ---------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supply_parses_numbers_and_degrades_text() {
        assert_eq!(Supply::parse("3333"), Supply::Known(3333));
        assert_eq!(Supply::parse(" 10000 "), Supply::Known(10_000));
        assert_eq!(Supply::parse("TBA"), Supply::Unknown);
        assert_eq!(Supply::parse(""), Supply::Unknown);
        assert_eq!(Supply::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn row_shape_shifts_offsets_by_one() {
        assert_eq!(RowShape::of(6), RowShape::Short);
        assert_eq!(RowShape::of(7), RowShape::WithCountdown);
        assert_eq!(RowShape::of(9), RowShape::WithCountdown);

        assert_eq!(RowShape::Short.supply_idx() + 1, RowShape::WithCountdown.supply_idx());
        assert_eq!(RowShape::Short.price_idx() + 1, RowShape::WithCountdown.price_idx());
    }

    #[test]
    fn price_text_is_lowered_and_suffix_stripped() {
        assert_eq!(clean_price("1.5 SOL"), "1.5");
        assert_eq!(clean_price("Free"), "free");
        assert_eq!(clean_price("  2 sol "), "2");
        assert_eq!(clean_price("1 ETH"), "1 eth");
    }

    #[test]
    fn same_date_key_accumulates_in_encounter_order() {
        let mut drops = DropsByDate::new();
        let first = DropRecord {
            project_name: Some(s!("First")),
            ..Default::default()
        };
        let second = DropRecord {
            project_name: Some(s!("Second")),
            ..Default::default()
        };

        drops.push("01/25", first.clone());
        drops.push("01/26", DropRecord::default());
        drops.push("01/25", second.clone());

        assert_eq!(drops.len(), 2);
        assert_eq!(drops.total_drops(), 3);

        let (key, records) = drops.iter().next().unwrap();
        assert_eq!(key, "01/25");
        assert_eq!(records, &[first, second][..]);
    }
}
