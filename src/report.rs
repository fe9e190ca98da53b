// src/report.rs
//
// Workbook layout, fixed by the sheet's consumers:
//   rows 1-2   merged disclaimer banner (A..I)
//   row  3     "Mint Time" merged over the two time columns
//   row  4     column headings
//   row  5+    one row per drop, date cell merged down its day block
//   column J   "Chat's Thoughts", left blank for manual notes

use log::{info, warn};
use rust_xlsxwriter::{Color, Format, FormatAlign, Url, Workbook, Worksheet};

use crate::scrape::{DropRecord, DropsByDate, Supply};
use crate::Result;

const COL_DATE: u16 = 0;
const COL_NAME: u16 = 1;
const COL_EST: u16 = 2;
const COL_UTC: u16 = 3;
const COL_TWITTER: u16 = 4;
const COL_DISCORD: u16 = 5;
const COL_WEBSITE: u16 = 6;
const COL_SUPPLY: u16 = 7;
const COL_PRICE: u16 = 8;
const COL_CHAT: u16 = 9;

const ROW_TITLE: u32 = 0;
const ROW_SUBTITLE: u32 = 1;
const ROW_MINT_TIME: u32 = 2;
const ROW_HEADINGS: u32 = 3;
const ROW_DATA_START: u32 = 4;

const HEADINGS: [&str; 9] = [
    "Mint Date",
    "Project Name",
    "EST",
    "UTC",
    "Twitter",
    "Discord",
    "Website",
    "Supply",
    "Mint Price",
];

const TWITTER_LABEL: &str = "Twitter Link";
const DISCORD_LABEL: &str = "Discord Link";
const WEBSITE_LABEL: &str = "Website Link";

const SINGLE_SHEET_NAME: &str = "Upcoming Drops";
const CHAT_WIDTH: f64 = 50.0;
const AUTOSIZE_PAD: usize = 5;

// Columns whose width is pinned, never auto-fit
const FIXED_WIDTH_COLS: [u16; 4] = [COL_TWITTER, COL_DISCORD, COL_WEBSITE, COL_CHAT];

const YELLOW: Color = Color::RGB(0xF1C232);
const BLUE: Color = Color::RGB(0x1C4587);

#[derive(Clone, Debug)]
pub struct ReportOptions {
    pub warning_title: String,
    pub warning_subtitle: String,
    pub day_limit: usize,
    pub per_day_sheets: bool,
}

struct Styles {
    banner: Format,
    heading: Format,
    chat_heading: Format,
    date: Format,
    body: Format,
    body_center: Format,
}

impl Styles {
    fn new() -> Self {
        let arial = || Format::new().set_font_name("Arial");
        Self {
            banner: arial()
                .set_font_size(14)
                .set_bold()
                .set_background_color(YELLOW)
                .set_align(FormatAlign::Center),
            heading: arial()
                .set_font_size(10)
                .set_bold()
                .set_font_color(Color::White)
                .set_background_color(BLUE)
                .set_align(FormatAlign::Center),
            chat_heading: arial()
                .set_font_size(18)
                .set_bold()
                .set_background_color(YELLOW)
                .set_align(FormatAlign::Center),
            date: arial()
                .set_font_size(18)
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            body: arial().set_font_size(10),
            body_center: arial().set_font_size(10).set_align(FormatAlign::Center),
        }
    }
}

/// Builds the styled drops workbook. One instance per run; `build`
/// consumes the extracted mapping and returns a workbook ready to save.
pub struct ReportBuilder {
    opts: ReportOptions,
    styles: Styles,
    // Rows written on the current sheet; positions the next day block
    sheet_drops: u32,
    total_drops: u32,
    // Longest rendered text per column, for auto-fit
    col_max: [usize; 10],
}

impl ReportBuilder {
    pub fn new(opts: ReportOptions) -> Self {
        Self {
            opts,
            styles: Styles::new(),
            sheet_drops: 0,
            total_drops: 0,
            col_max: [0; 10],
        }
    }

    /// Total data rows written across all sheets so far.
    pub fn rows_written(&self) -> u32 {
        self.total_drops
    }

    pub fn build(&mut self, drops: &DropsByDate) -> Result<Workbook> {
        let mut workbook = Workbook::new();
        let rendered = self.opts.day_limit.min(drops.len());

        info!("Creating Excel document...");
        info!("Printing {} of {} days.", rendered, drops.len());

        if self.opts.per_day_sheets {
            for (date, records) in drops.iter().take(self.opts.day_limit) {
                let mut ws = self.begin_sheet(&date.replace('/', "-"))?;
                self.draw_day(&mut ws, date, records)?;
                self.auto_size_columns(&mut ws)?;
                workbook.push_worksheet(ws);
            }
            if rendered == 0 {
                // A workbook cannot save without at least one sheet
                let ws = self.begin_sheet(SINGLE_SHEET_NAME)?;
                workbook.push_worksheet(ws);
            }
        } else {
            let mut ws = self.begin_sheet(SINGLE_SHEET_NAME)?;
            for (date, records) in drops.iter().take(self.opts.day_limit) {
                self.draw_day(&mut ws, date, records)?;
            }
            self.auto_size_columns(&mut ws)?;
            workbook.push_worksheet(ws);
        }

        Ok(workbook)
    }

    /* ---------- sheet scaffolding ---------- */

    fn begin_sheet(&mut self, name: &str) -> Result<Worksheet> {
        self.sheet_drops = 0;
        self.col_max = [0; 10];

        let mut ws = Worksheet::new();
        ws.set_name(name)?;
        self.draw_warnings(&mut ws)?;
        self.draw_headings(&mut ws)?;
        Ok(ws)
    }

    fn draw_warnings(&self, ws: &mut Worksheet) -> Result<()> {
        ws.merge_range(
            ROW_TITLE,
            COL_DATE,
            ROW_TITLE,
            COL_PRICE,
            &self.opts.warning_title,
            &self.styles.banner,
        )?;
        ws.merge_range(
            ROW_SUBTITLE,
            COL_DATE,
            ROW_SUBTITLE,
            COL_PRICE,
            &self.opts.warning_subtitle,
            &self.styles.banner,
        )?;
        Ok(())
    }

    fn draw_headings(&self, ws: &mut Worksheet) -> Result<()> {
        // "Mint Time" spans the EST/UTC sub-columns
        ws.merge_range(
            ROW_MINT_TIME,
            COL_EST,
            ROW_MINT_TIME,
            COL_UTC,
            "Mint Time",
            &self.styles.heading,
        )?;

        for (i, heading) in HEADINGS.iter().enumerate() {
            ws.write_with_format(ROW_HEADINGS, i as u16, *heading, &self.styles.heading)?;
        }

        // Carry the blue band across the cells no heading lands on
        for col in [COL_DATE, COL_NAME, COL_TWITTER, COL_DISCORD, COL_WEBSITE, COL_SUPPLY, COL_PRICE, COL_CHAT] {
            ws.write_blank(ROW_MINT_TIME, col, &self.styles.heading)?;
        }
        ws.write_blank(ROW_HEADINGS, COL_CHAT, &self.styles.heading)?;

        ws.merge_range(
            ROW_TITLE,
            COL_CHAT,
            ROW_SUBTITLE,
            COL_CHAT,
            "Chat's Thoughts",
            &self.styles.chat_heading,
        )?;

        ws.set_column_width(COL_CHAT, CHAT_WIDTH)?;
        ws.set_column_width(COL_TWITTER, TWITTER_LABEL.len() as f64)?;
        ws.set_column_width(COL_DISCORD, DISCORD_LABEL.len() as f64)?;
        ws.set_column_width(COL_WEBSITE, WEBSITE_LABEL.len() as f64)?;
        Ok(())
    }

    /* ---------- day blocks ---------- */

    fn next_row(&self) -> u32 {
        ROW_DATA_START + self.sheet_drops
    }

    fn draw_day(&mut self, ws: &mut Worksheet, date: &str, records: &[DropRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let start = self.next_row();
        let end = start + records.len() as u32 - 1;
        if end > start {
            ws.merge_range(start, COL_DATE, end, COL_DATE, date, &self.styles.date)?;
        } else {
            // The library rejects one-cell merges
            ws.write_with_format(start, COL_DATE, date, &self.styles.date)?;
        }
        self.note_width(COL_DATE, date);

        for record in records {
            self.draw_record(ws, record)?;
        }
        Ok(())
    }

    fn draw_record(&mut self, ws: &mut Worksheet, record: &DropRecord) -> Result<()> {
        let row = self.next_row();

        self.write_opt(ws, row, COL_NAME, record.project_name.as_deref(), false)?;
        self.write_opt(ws, row, COL_EST, record.time_eastern.as_deref(), true)?;
        self.write_opt(ws, row, COL_UTC, record.time_utc.as_deref(), true)?;

        self.write_link(ws, row, COL_TWITTER, record.twitter_url.as_deref(), TWITTER_LABEL)?;
        self.write_link(ws, row, COL_DISCORD, record.discord_url.as_deref(), DISCORD_LABEL)?;
        self.write_link(ws, row, COL_WEBSITE, record.website_url.as_deref(), WEBSITE_LABEL)?;

        match record.supply {
            Supply::Known(n) => {
                ws.write_number_with_format(row, COL_SUPPLY, n as f64, &self.styles.body_center)?;
                self.note_width(COL_SUPPLY, &n.to_string());
            }
            Supply::Unknown => {
                ws.write_with_format(row, COL_SUPPLY, "Unknown", &self.styles.body_center)?;
                self.note_width(COL_SUPPLY, "Unknown");
            }
        }
        self.write_opt(ws, row, COL_PRICE, record.mint_price.as_deref(), true)?;

        self.sheet_drops += 1;
        self.total_drops += 1;
        Ok(())
    }

    fn write_opt(
        &mut self,
        ws: &mut Worksheet,
        row: u32,
        col: u16,
        value: Option<&str>,
        centered: bool,
    ) -> Result<()> {
        let format = if centered {
            &self.styles.body_center
        } else {
            &self.styles.body
        };
        match value {
            Some(text) => {
                ws.write_with_format(row, col, text, format)?;
                self.col_max[col as usize] = self.col_max[col as usize].max(text.len());
            }
            // Absent field renders as a styled blank, not an error
            None => {
                ws.write_blank(row, col, format)?;
            }
        }
        Ok(())
    }

    fn write_link(
        &self,
        ws: &mut Worksheet,
        row: u32,
        col: u16,
        url: Option<&str>,
        label: &str,
    ) -> Result<()> {
        match url {
            Some(u) => {
                ws.write_url_with_format(row, col, Url::new(u).set_text(label), &self.styles.body)?;
            }
            None => {
                ws.write_blank(row, col, &self.styles.body)?;
            }
        }
        Ok(())
    }

    /* ---------- column sizing ---------- */

    fn note_width(&mut self, col: u16, text: &str) {
        let slot = &mut self.col_max[col as usize];
        *slot = (*slot).max(text.len());
    }

    fn auto_size_columns(&self, ws: &mut Worksheet) -> Result<()> {
        if self.sheet_drops == 0 {
            warn!("No data cells to auto-size. Are there any drops today?");
            return Ok(());
        }
        for (col, max) in self.col_max.iter().enumerate() {
            let col = col as u16;
            if FIXED_WIDTH_COLS.contains(&col) {
                continue;
            }
            ws.set_column_width(col, (*max + AUTOSIZE_PAD) as f64)?;
        }
        Ok(())
    }
}

/* ---------- tests ---------- */
