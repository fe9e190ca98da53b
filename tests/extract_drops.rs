// tests/extract_drops.rs
//
// Extraction against a fixture mirroring the howrare.is drops markup:
// date-labelled collection groups holding legend rows, 6-cell rows,
// 7-cell countdown rows and assorted malformed rows.

use chrono::NaiveDate;
use scraper::Html;

use drops_scrape::scrape::{extract_drops, DropsByDate, Supply};

const FIXTURE: &str = r#"
<html><body>
<div class="all_collections">
  <div class="all_coll_row drop_date">January 25th</div>
  <div class="all_coll_row legend">
    <div class="all_coll_col">Name</div>
    <div class="all_coll_col">Links</div>
    <div class="all_coll_col">Time</div>
    <div class="all_coll_col">Countdown</div>
    <div class="all_coll_col">Supply</div>
    <div class="all_coll_col">Price</div>
  </div>
  <div class="all_coll_row">
    <div class="all_coll_col"><span> Mad Cats </span></div>
    <div class="all_coll_col">
      <a href="https://Twitter.com/madcats">t</a>
      <a href="https://discord.gg/madcats">d</a>
      <a href="https://madcats.io">w</a>
    </div>
    <div class="all_coll_col">17:00 UTC</div>
    <div class="all_coll_col"></div>
    <div class="all_coll_col">3333</div>
    <div class="all_coll_col">1.5 SOL</div>
  </div>
  <div class="all_coll_row">
    <div class="all_coll_col"><span>Robo Rex</span></div>
    <div class="all_coll_col"><a href="https://roborex.xyz">w</a></div>
    <div class="all_coll_col">09:00 UTC</div>
    <div class="all_coll_col">in 2 hours</div>
    <div class="all_coll_col"></div>
    <div class="all_coll_col">10000</div>
    <div class="all_coll_col">2 SOL</div>
  </div>
  <div class="all_coll_row">
    <div class="all_coll_col"><span>Truncated</span></div>
    <div class="all_coll_col"></div>
    <div class="all_coll_col">12:00 UTC</div>
  </div>
</div>
<div class="all_collections">
  <div class="drop_date">January 26th</div>
  <div class="all_coll_row">
    <div class="all_coll_col"></div>
    <div class="all_coll_col"></div>
    <div class="all_coll_col">TBA</div>
    <div class="all_coll_col"></div>
    <div class="all_coll_col">Sold Out</div>
    <div class="all_coll_col">Free</div>
  </div>
</div>
<div class="all_collections">
  <div class="all_coll_row">
    <div class="all_coll_col"><span>Dateless</span></div>
    <div class="all_coll_col"></div>
    <div class="all_coll_col">01:00 UTC</div>
    <div class="all_coll_col"></div>
    <div class="all_coll_col">500</div>
    <div class="all_coll_col">0.5 sol</div>
  </div>
</div>
<div class="all_collections">
  <div class="drop_date">Sometime Soon</div>
  <div class="all_coll_row">
    <div class="all_coll_col"><span>Vague</span></div>
    <div class="all_coll_col"></div>
    <div class="all_coll_col">08:30 UTC</div>
    <div class="all_coll_col"></div>
    <div class="all_coll_col">777</div>
    <div class="all_coll_col">1 SOL</div>
  </div>
</div>
<div class="all_collections">
  <div class="drop_date">January 25th</div>
  <div class="all_coll_row">
    <div class="all_coll_col"><span>Late Addition</span></div>
    <div class="all_coll_col"></div>
    <div class="all_coll_col">23:00 UTC</div>
    <div class="all_coll_col"></div>
    <div class="all_coll_col">100</div>
    <div class="all_coll_col">3 SOL</div>
  </div>
</div>
</body></html>
"#;

// January: US Eastern is on standard time (UTC-5)
fn extract() -> DropsByDate {
    let doc = Html::parse_document(FIXTURE);
    let today = NaiveDate::from_ymd_opt(2022, 1, 20).unwrap();
    extract_drops(&doc, today, None)
}

#[test]
fn groups_keep_page_order_and_accumulate_shared_dates() {
    let drops = extract();

    let keys: Vec<&str> = drops.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["01/25", "01/26", "Unknown", "Sometime Soon"]);

    // The trailing January 25th group folded into the first key
    let (_, jan25) = drops.iter().next().unwrap();
    let names: Vec<Option<&str>> = jan25
        .iter()
        .map(|r| r.project_name.as_deref())
        .collect();
    assert_eq!(
        names,
        [Some("Mad Cats"), Some("Robo Rex"), Some("Late Addition")]
    );
}

#[test]
fn short_row_fields_extract_by_position() {
    let drops = extract();
    let (_, jan25) = drops.iter().next().unwrap();
    let cats = &jan25[0];

    assert_eq!(cats.project_name.as_deref(), Some("Mad Cats"));
    assert_eq!(cats.twitter_url.as_deref(), Some("https://twitter.com/madcats"));
    assert_eq!(cats.discord_url.as_deref(), Some("https://discord.gg/madcats"));
    assert_eq!(cats.website_url.as_deref(), Some("https://madcats.io"));
    assert_eq!(cats.time_utc.as_deref(), Some("05:00 PM"));
    assert_eq!(cats.time_eastern.as_deref(), Some("12:00 PM"));
    assert_eq!(cats.supply, Supply::Known(3333));
    assert_eq!(cats.mint_price.as_deref(), Some("1.5"));
}

#[test]
fn countdown_row_shifts_supply_and_price_cells() {
    let drops = extract();
    let (_, jan25) = drops.iter().next().unwrap();
    let rex = &jan25[1];

    assert_eq!(rex.supply, Supply::Known(10_000));
    assert_eq!(rex.mint_price.as_deref(), Some("2"));
    assert_eq!(rex.time_utc.as_deref(), Some("09:00 AM"));
    assert_eq!(rex.time_eastern.as_deref(), Some("04:00 AM"));
    assert_eq!(rex.twitter_url, None);
    assert_eq!(rex.website_url.as_deref(), Some("https://roborex.xyz"));
}

#[test]
fn malformed_and_legend_rows_are_skipped_but_siblings_survive() {
    let drops = extract();
    let (_, jan25) = drops.iter().next().unwrap();

    // legend row and the 3-cell "Truncated" row both dropped
    assert_eq!(jan25.len(), 3);
    assert!(jan25.iter().all(|r| r.project_name.as_deref() != Some("Truncated")));
}

#[test]
fn unparseable_fields_degrade_to_none_or_sentinel() {
    let drops = extract();
    let (key, records) = drops.iter().nth(1).unwrap();

    assert_eq!(key, "01/26");
    let anon = &records[0];
    assert_eq!(anon.project_name, None);
    assert_eq!(anon.time_utc, None);
    assert_eq!(anon.time_eastern, None);
    assert_eq!(anon.supply, Supply::Unknown);
    assert_eq!(anon.mint_price.as_deref(), Some("free"));
}

#[test]
fn missing_date_label_files_group_under_unknown() {
    let drops = extract();
    let (key, records) = drops.iter().nth(2).unwrap();

    assert_eq!(key, "Unknown");
    assert_eq!(records[0].project_name.as_deref(), Some("Dateless"));
}

#[test]
fn unparseable_date_label_keeps_its_raw_text_as_key() {
    let drops = extract();
    let (key, records) = drops.iter().nth(3).unwrap();

    assert_eq!(key, "Sometime Soon");
    assert_eq!(records[0].project_name.as_deref(), Some("Vague"));
}
