// src/compose.rs
//! Document composition: orchestrates the aggregator output, the chart
//! pipeline and the layout cursor into a finished [`ReportDocument`].

use crate::chart::{render_chart, ChartError, ChartKind, ChartSpec, ChartTheme, Metric};
use crate::document::{Color, Page, Primitive, Rect, ReportDocument, TextAlign, TextStyle};
use crate::layout::{LayoutCursor, PageGeometry};
use crate::model::EquipmentRecord;
use crate::stats::AggregateStats;
use chrono::Local;
use std::mem;

// Brand colors of the report chrome.
const TEAL_MAIN: Color = Color::rgb(0x0d, 0x94, 0x88);
const TEAL_LIGHT: Color = Color::rgb(0xf0, 0xfd, 0xfa);
const GRAY_TEXT: Color = Color::rgb(51, 51, 51);
const GRAY_SUB: Color = Color::gray(128);
const GRAY_LINE: Color = Color::gray(230);
const ALERT: Color = Color::rgb(204, 51, 51);
const CARD_SHADOW: Color = Color::gray(242);
const WHITE: Color = Color::gray(255);

const ROW_HEIGHT: f32 = 20.0;
const TABLE_HEADER_HEIGHT: f32 = 25.0;
const TABLE_X: f32 = 40.0;
const TABLE_WIDTH: f32 = 515.0;
const NAME_MAX_CHARS: usize = 28;
const TEMP_ALERT_THRESHOLD: f64 = 100.0;

const CARD_WIDTH: f32 = 120.0;
const CARD_HEIGHT: f32 = 60.0;
const CARD_GAP: f32 = 15.0;

// Chart block placement, in layout units. The summary section is sized so
// the four charts always fit below the cards on the first page.
const CHART_X: f32 = 35.0;
const CHART_FULL_WIDTH: f32 = 520.0;
const CHART_HALF_WIDTH: f32 = 250.0;
const TREND_HEIGHT: f32 = 160.0;
const PAIR_HEIGHT: f32 = 150.0;
const SCATTER_HEIGHT: f32 = 150.0;
const CHART_GAP: f32 = 25.0;

// Charts render at twice their placed size for print resolution.
const PIXELS_PER_UNIT: u32 = 2;

struct Column {
    name: &'static str,
    x: f32,
}

const COLUMNS: [Column; 5] = [
    Column { name: "Equipment Name", x: 40.0 },
    Column { name: "Type", x: 220.0 },
    Column { name: "Flow (L/min)", x: 320.0 },
    Column { name: "Press (PSI)", x: 400.0 },
    Column { name: "Temp (°C)", x: 480.0 },
];

/// Layout policy for the repeating page chrome.
///
/// `Sectioned` reproduces the original server report: a tall brand banner on
/// the first page, the table opening a fresh page under its own section
/// banner, and slim "(Cont.)" banners afterwards. `Unified` puts one running
/// banner on every page and lets the table flow directly below the charts
/// when room remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BannerMode {
    #[default]
    Sectioned,
    Unified,
}

/// Per-engine report configuration, chosen once at construction.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub banner_mode: BannerMode,
    pub theme: ChartTheme,
    pub geometry: PageGeometry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chrome {
    /// Tall brand banner with report metadata (sectioned, page 1).
    Cover,
    /// Section banner opening the table (sectioned).
    TableSection,
    /// Slim continuation banner (sectioned, table pages after the first).
    Continuation,
    /// The one running banner of unified mode.
    Running,
}

pub struct Composer<'a> {
    options: &'a ReportOptions,
}

impl<'a> Composer<'a> {
    pub fn new(options: &'a ReportOptions) -> Self {
        Self { options }
    }

    /// Builds the complete report document for one dataset.
    ///
    /// An empty dataset is not an error: it produces a single page with the
    /// banner, a no-data notice and the standard footer.
    pub fn compose(
        &self,
        dataset_id: u64,
        records: &[EquipmentRecord],
        stats: &AggregateStats,
    ) -> Result<ReportDocument, ChartError> {
        let geometry = self.options.geometry;
        let mut document = ReportDocument::default();
        let mut cursor = LayoutCursor::new(geometry);
        let mut page = Page::new(1);

        let cover = match self.options.banner_mode {
            BannerMode::Sectioned => Chrome::Cover,
            BannerMode::Unified => Chrome::Running,
        };
        self.draw_banner(&mut page, &mut cursor, dataset_id, cover);

        if stats.is_empty() {
            page.push(Primitive::Text {
                x: geometry.margin,
                y: geometry.height - 150.0,
                content: "No data records found in this dataset.".to_string(),
                style: TextStyle::regular(12.0, GRAY_TEXT),
                align: TextAlign::Left,
            });
            self.draw_footer(&mut page, &cursor);
            document.pages.push(page);
            log::info!("composed empty report for dataset {dataset_id}");
            return Ok(document);
        }

        self.draw_summary_cards(&mut page, &mut cursor, stats);
        self.draw_chart_blocks(&mut document, &mut page, &mut cursor, records, stats)?;

        match self.options.banner_mode {
            BannerMode::Sectioned => {
                // The table always opens its own section page.
                self.finish_page(&mut document, &mut page, &mut cursor);
                self.draw_banner(&mut page, &mut cursor, dataset_id, Chrome::TableSection);
                self.draw_table_header(&mut page, &mut cursor);
            }
            BannerMode::Unified => {
                cursor.advance(CHART_GAP);
                if cursor.fits(TABLE_HEADER_HEIGHT + ROW_HEIGHT) {
                    self.draw_table_header(&mut page, &mut cursor);
                } else {
                    self.finish_page(&mut document, &mut page, &mut cursor);
                    self.draw_banner(&mut page, &mut cursor, dataset_id, Chrome::Running);
                    self.draw_table_header(&mut page, &mut cursor);
                }
            }
        }

        for record in records {
            if !cursor.fits(ROW_HEIGHT) {
                self.finish_page(&mut document, &mut page, &mut cursor);
                let chrome = match self.options.banner_mode {
                    BannerMode::Sectioned => Chrome::Continuation,
                    BannerMode::Unified => Chrome::Running,
                };
                self.draw_banner(&mut page, &mut cursor, dataset_id, chrome);
                self.draw_table_header(&mut page, &mut cursor);
            }
            self.draw_table_row(&mut page, &mut cursor, record);
        }

        // The last page is finalized exactly once.
        self.draw_footer(&mut page, &cursor);
        document.pages.push(page);

        log::info!(
            "composed report for dataset {dataset_id}: {} pages, {} charts",
            document.pages.len(),
            document.images.len()
        );
        Ok(document)
    }

    /// Closes the current page with its footer and resets the cursor to a
    /// fresh page.
    fn finish_page(&self, document: &mut ReportDocument, page: &mut Page, cursor: &mut LayoutCursor) {
        self.draw_footer(page, cursor);
        cursor.break_page();
        let finished = mem::replace(page, Page::new(cursor.page_number()));
        document.pages.push(finished);
    }

    fn draw_banner(
        &self,
        page: &mut Page,
        cursor: &mut LayoutCursor,
        dataset_id: u64,
        chrome: Chrome,
    ) {
        let g = cursor.geometry;
        let (banner_height, content_top) = match chrome {
            Chrome::Cover => (80.0, g.height - 120.0),
            Chrome::TableSection => (60.0, g.height - 100.0),
            Chrome::Continuation => (40.0, g.height - 80.0),
            Chrome::Running => (60.0, g.height - 100.0),
        };
        page.push(Primitive::Rect {
            rect: Rect::new(0.0, g.height - banner_height, g.width, banner_height),
            fill: Some(TEAL_MAIN),
            stroke: None,
        });

        match chrome {
            Chrome::Cover => {
                page.push(text(g.margin, g.height - 50.0, "ChemViz", TextStyle::bold(28.0, WHITE)));
                page.push(text(
                    g.margin,
                    g.height - 68.0,
                    "Advanced Chemical Process Analytics",
                    TextStyle::regular(12.0, WHITE),
                ));
                page.push(right_text(
                    g.right_edge(),
                    g.height - 45.0,
                    "ANALYTICAL REPORT",
                    TextStyle::bold(14.0, WHITE),
                ));
                page.push(right_text(
                    g.right_edge(),
                    g.height - 62.0,
                    format!("Generated: {}", Local::now().format("%Y-%m-%d %H:%M")),
                    TextStyle::regular(9.0, WHITE),
                ));
                page.push(right_text(
                    g.right_edge(),
                    g.height - 74.0,
                    format!("Dataset ID: #{dataset_id}"),
                    TextStyle::regular(9.0, WHITE),
                ));
            }
            Chrome::TableSection => {
                page.push(text(
                    g.margin,
                    g.height - 40.0,
                    "Detailed Equipment Logs",
                    TextStyle::bold(18.0, WHITE),
                ));
            }
            Chrome::Continuation => {
                page.push(text(
                    g.margin,
                    g.height - 28.0,
                    "Detailed Equipment Logs (Cont.)",
                    TextStyle::bold(14.0, WHITE),
                ));
            }
            Chrome::Running => {
                page.push(text(g.margin, g.height - 38.0, "ChemViz", TextStyle::bold(20.0, WHITE)));
                page.push(right_text(
                    g.right_edge(),
                    g.height - 30.0,
                    "ANALYTICAL REPORT",
                    TextStyle::bold(12.0, WHITE),
                ));
                page.push(right_text(
                    g.right_edge(),
                    g.height - 44.0,
                    format!("Dataset ID: #{dataset_id}"),
                    TextStyle::regular(9.0, WHITE),
                ));
            }
        }
        cursor.move_to(content_top);
    }

    fn draw_summary_cards(&self, page: &mut Page, cursor: &mut LayoutCursor, stats: &AggregateStats) {
        let g = cursor.geometry;
        page.push(text(
            g.margin,
            cursor.y(),
            "Executive Summary",
            TextStyle::bold(16.0, GRAY_TEXT),
        ));
        cursor.advance(10.0);

        let card_y = cursor.y() - CARD_HEIGHT - 10.0;
        let fmt_avg = |v: Option<f64>| format!("{:.1}", v.unwrap_or_default());
        let cards: [(&str, String, &str); 4] = [
            ("Total Records", stats.total_count.to_string(), ""),
            ("Avg Flowrate", fmt_avg(stats.average_flowrate), "L/min"),
            ("Avg Pressure", fmt_avg(stats.average_pressure), "PSI"),
            ("Avg Temp", fmt_avg(stats.average_temperature), "°C"),
        ];

        for (i, (title, value, unit)) in cards.iter().enumerate() {
            let x = g.margin + i as f32 * (CARD_WIDTH + CARD_GAP);
            // Offset shadow behind the card body.
            page.push(Primitive::Rect {
                rect: Rect::new(x + 2.0, card_y - 2.0, CARD_WIDTH, CARD_HEIGHT),
                fill: Some(CARD_SHADOW),
                stroke: None,
            });
            page.push(Primitive::Rect {
                rect: Rect::new(x, card_y, CARD_WIDTH, CARD_HEIGHT),
                fill: Some(WHITE),
                stroke: Some(GRAY_LINE),
            });
            page.push(text(x + 12.0, card_y + 42.0, *title, TextStyle::regular(9.0, GRAY_SUB)));
            page.push(text(x + 12.0, card_y + 18.0, value.clone(), TextStyle::bold(18.0, TEAL_MAIN)));
            if !unit.is_empty() {
                page.push(right_text(
                    x + CARD_WIDTH - 12.0,
                    card_y + 20.0,
                    *unit,
                    TextStyle::bold(9.0, GRAY_SUB),
                ));
            }
        }
        cursor.move_to(card_y - 30.0);
    }

    fn draw_chart_blocks(
        &self,
        document: &mut ReportDocument,
        page: &mut Page,
        cursor: &mut LayoutCursor,
        records: &[EquipmentRecord],
        stats: &AggregateStats,
    ) -> Result<(), ChartError> {
        let theme = &self.options.theme;
        let px = |units: f32| units as u32 * PIXELS_PER_UNIT;

        let trend = ChartSpec {
            kind: ChartKind::Trend,
            width: px(CHART_FULL_WIDTH),
            height: px(TREND_HEIGHT),
        };
        let donut = ChartSpec {
            kind: ChartKind::Donut,
            width: px(CHART_HALF_WIDTH),
            height: px(PAIR_HEIGHT),
        };
        let bar = ChartSpec {
            kind: ChartKind::GroupedBar { metric: Metric::Flowrate },
            width: px(CHART_HALF_WIDTH),
            height: px(PAIR_HEIGHT),
        };
        let scatter = ChartSpec {
            kind: ChartKind::Scatter { x: Metric::Pressure, y: Metric::Temperature },
            width: px(CHART_FULL_WIDTH),
            height: px(SCATTER_HEIGHT),
        };

        // Full-width trend block.
        let image = document.add_image(render_chart(&trend, records, stats, theme)?);
        page.push(Primitive::Image {
            x: CHART_X,
            y: cursor.y() - TREND_HEIGHT,
            width: CHART_FULL_WIDTH,
            height: TREND_HEIGHT,
            image,
        });
        cursor.advance(TREND_HEIGHT + CHART_GAP);

        // Donut and grouped bar side by side.
        let image = document.add_image(render_chart(&donut, records, stats, theme)?);
        page.push(Primitive::Image {
            x: CHART_X,
            y: cursor.y() - PAIR_HEIGHT,
            width: CHART_HALF_WIDTH,
            height: PAIR_HEIGHT,
            image,
        });
        let image = document.add_image(render_chart(&bar, records, stats, theme)?);
        page.push(Primitive::Image {
            x: CHART_X + CHART_HALF_WIDTH + 20.0,
            y: cursor.y() - PAIR_HEIGHT,
            width: CHART_HALF_WIDTH,
            height: PAIR_HEIGHT,
            image,
        });
        cursor.advance(PAIR_HEIGHT + CHART_GAP);

        // Full-width scatter block.
        let image = document.add_image(render_chart(&scatter, records, stats, theme)?);
        page.push(Primitive::Image {
            x: CHART_X,
            y: cursor.y() - SCATTER_HEIGHT,
            width: CHART_FULL_WIDTH,
            height: SCATTER_HEIGHT,
            image,
        });
        cursor.advance(SCATTER_HEIGHT);
        Ok(())
    }

    fn draw_table_header(&self, page: &mut Page, cursor: &mut LayoutCursor) {
        let y = cursor.y();
        page.push(Primitive::Rect {
            rect: Rect::new(TABLE_X, y - 5.0, TABLE_WIDTH, 25.0),
            fill: Some(TEAL_MAIN),
            stroke: None,
        });
        for column in &COLUMNS {
            page.push(text(column.x + 10.0, y + 2.0, column.name, TextStyle::bold(9.0, WHITE)));
        }
        cursor.advance(TABLE_HEADER_HEIGHT);
    }

    fn draw_table_row(&self, page: &mut Page, cursor: &mut LayoutCursor, record: &EquipmentRecord) {
        let y = cursor.y();

        // Zebra stripe: even 0-based row index gets the tinted background.
        if cursor.row_index() % 2 == 0 {
            page.push(Primitive::Rect {
                rect: Rect::new(TABLE_X, y - 6.0, TABLE_WIDTH, 18.0),
                fill: Some(TEAL_LIGHT),
                stroke: None,
            });
        }

        let body = TextStyle::regular(9.0, GRAY_TEXT);
        let name: String = record.name.chars().take(NAME_MAX_CHARS).collect();
        page.push(text(COLUMNS[0].x + 10.0, y, name, body));
        page.push(text(COLUMNS[1].x + 10.0, y, record.equipment_type.clone(), body));
        page.push(text(COLUMNS[2].x + 10.0, y, format!("{:.1}", record.flowrate), body));
        page.push(text(COLUMNS[3].x + 10.0, y, format!("{:.1}", record.pressure), body));

        // Conditional styling is scoped to this one cell: the style lives on
        // the primitive, so nothing bleeds into later cells or rows.
        let temp_style = if record.temperature > TEMP_ALERT_THRESHOLD {
            TextStyle::bold(9.0, ALERT)
        } else {
            body
        };
        page.push(text(
            COLUMNS[4].x + 10.0,
            y,
            format!("{:.1}", record.temperature),
            temp_style,
        ));

        cursor.advance_row(ROW_HEIGHT);
    }

    fn draw_footer(&self, page: &mut Page, cursor: &LayoutCursor) {
        let g = cursor.geometry;
        page.push(Primitive::Line {
            from: (g.margin, g.bottom_margin),
            to: (g.right_edge(), g.bottom_margin),
            color: GRAY_LINE,
            width: 1.0,
        });
        page.push(text(
            g.margin,
            25.0,
            "ChemViz Analytics Platform \u{2022} Confidential Report",
            TextStyle::regular(8.0, GRAY_SUB),
        ));
        page.push(right_text(
            g.right_edge(),
            25.0,
            format!("Page {}", cursor.page_number()),
            TextStyle::regular(8.0, GRAY_SUB),
        ));
    }
}

fn text(x: f32, y: f32, content: impl Into<String>, style: TextStyle) -> Primitive {
    Primitive::Text { x, y, content: content.into(), style, align: TextAlign::Left }
}

fn right_text(x: f32, y: f32, content: impl Into<String>, style: TextStyle) -> Primitive {
    Primitive::Text { x, y, content: content.into(), style, align: TextAlign::Right }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FontWeight;
    use crate::stats::aggregate;

    fn sample_records() -> Vec<EquipmentRecord> {
        vec![
            EquipmentRecord::new("Pump-A", "Pump", 10.0, 50.0, 90.0),
            EquipmentRecord::new("Pump-B", "Pump", 20.0, 60.0, 110.0),
            EquipmentRecord::new("Valve-A", "Valve", 5.0, 40.0, 30.0),
        ]
    }

    fn compose(records: &[EquipmentRecord], options: &ReportOptions) -> ReportDocument {
        let stats = aggregate(records);
        Composer::new(options).compose(7, records, &stats).unwrap()
    }

    fn temperature_cells(page: &Page) -> Vec<(&str, &TextStyle)> {
        page.primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { x, content, style, align: TextAlign::Left, .. }
                    if *x == COLUMNS[4].x + 10.0 && content.parse::<f64>().is_ok() =>
                {
                    Some((content.as_str(), style))
                }
                _ => None,
            })
            .collect()
    }

    fn table_row_count(page: &Page) -> usize {
        temperature_cells(page).len()
    }

    /// Reference pagination: rows that fit between a section top and the
    /// bottom margin, from the same constants the composer uses.
    fn capacity_below(top: f32, geometry: &PageGeometry) -> usize {
        ((top - TABLE_HEADER_HEIGHT - geometry.bottom_margin) / ROW_HEIGHT).floor() as usize
    }

    #[test]
    fn empty_dataset_is_a_single_notice_page() {
        let options = ReportOptions::default();
        let document = compose(&[], &options);

        assert_eq!(document.pages.len(), 1);
        assert!(document.images.is_empty());
        let page = &document.pages[0];
        assert!(page.contains_text("No data records found in this dataset."));
        assert!(page.contains_text("Page 1"));
        assert!(!page.contains_text("Equipment Name"));
    }

    #[test]
    fn sectioned_report_has_summary_then_table_pages() {
        let options = ReportOptions::default();
        let document = compose(&sample_records(), &options);

        assert_eq!(document.pages.len(), 2);
        assert_eq!(document.images.len(), 4);

        let cover = &document.pages[0];
        assert!(cover.contains_text("Executive Summary"));
        assert!(cover.contains_text("ANALYTICAL REPORT"));
        assert!(cover.contains_text("Dataset ID: #7"));
        assert!(!cover.contains_text("Equipment Name"));

        let table = &document.pages[1];
        assert!(table.contains_text("Detailed Equipment Logs"));
        assert!(table.contains_text("Equipment Name"));
        assert_eq!(table_row_count(table), 3);
        assert!(table.contains_text("Page 2"));
    }

    #[test]
    fn kpi_cards_format_reference_values() {
        let options = ReportOptions::default();
        let document = compose(&sample_records(), &options);
        let cover = &document.pages[0];

        assert!(cover.contains_text("Total Records"));
        assert!(cover.contains_text("11.7")); // 35/3
        assert!(cover.contains_text("50.0"));
        assert!(cover.contains_text("76.7")); // 230/3
    }

    #[test]
    fn only_hot_rows_get_alert_styling() {
        let options = ReportOptions::default();
        let document = compose(&sample_records(), &options);
        let table = &document.pages[1];

        let cells = temperature_cells(table);
        assert_eq!(cells.len(), 3);
        let alert: Vec<_> = cells
            .iter()
            .filter(|(_, style)| style.color == ALERT && style.weight == FontWeight::Bold)
            .collect();
        assert_eq!(alert.len(), 1);
        assert_eq!(alert[0].0, "110.0");
        // Boundary: exactly 100 is not an alert.
        assert!(cells.iter().any(|(c, s)| *c == "90.0" && s.color == GRAY_TEXT));
    }

    #[test]
    fn long_tables_paginate_to_capacity() {
        let records: Vec<EquipmentRecord> = (0..100)
            .map(|i| EquipmentRecord::new(format!("Pump-{i:03}"), "Pump", 10.0, 50.0, 90.0))
            .collect();
        let options = ReportOptions::default();
        let document = compose(&records, &options);
        let g = options.geometry;

        let first_capacity = capacity_below(g.height - 100.0, &g);
        let cont_capacity = capacity_below(g.height - 80.0, &g);

        // Independent reference simulation of the page count.
        let mut remaining = records.len();
        let mut table_pages = 1;
        remaining = remaining.saturating_sub(first_capacity);
        while remaining > 0 {
            table_pages += 1;
            remaining = remaining.saturating_sub(cont_capacity);
        }
        assert_eq!(document.pages.len(), 1 + table_pages);

        assert_eq!(table_row_count(&document.pages[1]), first_capacity);
        for page in &document.pages[2..] {
            assert!(table_row_count(page) <= cont_capacity);
            assert!(page.contains_text("Detailed Equipment Logs (Cont.)"));
        }
        let total: usize = document.pages.iter().map(table_row_count).sum();
        assert_eq!(total, records.len());

        // Page numbers are continuous in row iteration order.
        for (i, page) in document.pages.iter().enumerate() {
            assert_eq!(page.number, i as u32 + 1);
            assert!(page.contains_text(&format!("Page {}", i + 1)));
        }
    }

    #[test]
    fn alert_styling_survives_a_page_break() {
        let g = ReportOptions::default().geometry;
        let first_capacity = capacity_below(g.height - 100.0, &g);
        // All rows cold except the first row of the second table page.
        let records: Vec<EquipmentRecord> = (0..first_capacity + 3)
            .map(|i| {
                let temp = if i == first_capacity { 150.0 } else { 20.0 };
                EquipmentRecord::new(format!("Unit-{i:03}"), "Pump", 10.0, 50.0, temp)
            })
            .collect();

        let options = ReportOptions::default();
        let document = compose(&records, &options);
        assert!(document.pages.len() >= 3);

        let second_table_page = &document.pages[2];
        let cells = temperature_cells(second_table_page);
        assert_eq!(cells[0].0, "150.0");
        assert_eq!(cells[0].1.color, ALERT);
        assert_eq!(cells[0].1.weight, FontWeight::Bold);
        assert!(cells[1..].iter().all(|(_, s)| s.color == GRAY_TEXT));
    }

    #[test]
    fn zebra_striping_alternates_by_row_index() {
        let options = ReportOptions::default();
        let document = compose(&sample_records(), &options);
        let table = &document.pages[1];

        let stripes = table
            .primitives
            .iter()
            .filter(|p| {
                matches!(p, Primitive::Rect { fill: Some(c), .. } if *c == TEAL_LIGHT)
            })
            .count();
        // Rows 0 and 2 of three are striped.
        assert_eq!(stripes, 2);
    }

    #[test]
    fn unified_mode_flows_the_table_below_the_charts() {
        let options = ReportOptions { banner_mode: BannerMode::Unified, ..Default::default() };
        let document = compose(&sample_records(), &options);

        // The table header and the first row share the chart page; the
        // remaining rows flow onto the next page under a fresh header.
        let first = &document.pages[0];
        assert!(first.contains_text("Executive Summary"));
        assert!(first.contains_text("Equipment Name"));
        assert!(table_row_count(first) >= 1);
        assert!(!first.contains_text("Detailed Equipment Logs"));

        let total: usize = document.pages.iter().map(table_row_count).sum();
        assert_eq!(total, 3);
        for page in &document.pages {
            assert!(page.contains_text("Equipment Name"));
        }
    }

    #[test]
    fn unified_mode_repeats_the_running_banner() {
        let records: Vec<EquipmentRecord> = (0..80)
            .map(|i| EquipmentRecord::new(format!("Pump-{i:03}"), "Pump", 10.0, 50.0, 90.0))
            .collect();
        let options = ReportOptions { banner_mode: BannerMode::Unified, ..Default::default() };
        let document = compose(&records, &options);

        assert!(document.pages.len() >= 2);
        for page in &document.pages {
            assert!(page.contains_text("ANALYTICAL REPORT"));
        }
    }
}
