// src/chart.rs
//! Raster chart rendering with `plotters`.
//!
//! Every chart call is stateless: the caller supplies the records, the
//! aggregate statistics and an explicit [`ChartTheme`]; the result is an
//! in-memory RGB pixel buffer ready for embedding. Given the same inputs,
//! two renders produce identical pixels: group colors are assigned by
//! cycling the theme palette over groups in ascending label order, never
//! randomly.

use crate::document::{Color, RasterImage};
use crate::model::EquipmentRecord;
use crate::stats::AggregateStats;
use itertools::{Itertools, MinMaxResult};
// The prelude's `Color` trait is shadowed by the document color type above;
// bring it back in scope anonymously for `mix`/`filled`/`stroke_width`.
use plotters::style::Color as _;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart drawing failed: {0}")]
    Draw(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ChartError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Draw(e.to_string())
    }
}

/// A numeric measurement column of [`EquipmentRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Flowrate,
    Pressure,
    Temperature,
}

impl Metric {
    pub fn label(self) -> &'static str {
        match self {
            Metric::Flowrate => "Flowrate",
            Metric::Pressure => "Pressure",
            Metric::Temperature => "Temperature",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::Flowrate => "L/min",
            Metric::Pressure => "PSI",
            Metric::Temperature => "°C",
        }
    }

    pub fn value(self, record: &EquipmentRecord) -> f64 {
        match self {
            Metric::Flowrate => record.flowrate,
            Metric::Pressure => record.pressure,
            Metric::Temperature => record.temperature,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Flowrate and pressure over the row index (the record sequence's
    /// natural order; there is no timestamp field, so this is explicitly
    /// not a time axis).
    Trend,
    /// Per-type mean of one metric, one bar per type in ascending label
    /// order.
    GroupedBar { metric: Metric },
    /// Type distribution by record count, hollow center.
    Donut,
    /// One marker per record over two metrics.
    Scatter { x: Metric, y: Metric },
}

/// Declarative description of one chart to render.
#[derive(Debug, Clone, Copy)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub width: u32,
    pub height: u32,
}

/// Shared chart styling, passed explicitly into every render call.
#[derive(Debug, Clone)]
pub struct ChartTheme {
    /// Fixed ordered palette, cycled by group index.
    pub palette: Vec<Color>,
    pub flow: Color,
    pub pressure: Color,
    pub scatter: Color,
    pub text: Color,
    pub frame: Color,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            palette: vec![
                Color::rgb(0x0f, 0x76, 0x6e),
                Color::rgb(0x0d, 0x94, 0x88),
                Color::rgb(0x14, 0xb8, 0xa6),
                Color::rgb(0x2d, 0xd4, 0xbf),
                Color::rgb(0x5e, 0xea, 0xd4),
            ],
            flow: Color::rgb(0x0d, 0x94, 0x88),
            pressure: Color::rgb(0xf5, 0x9e, 0x0b),
            scatter: Color::rgb(0x0d, 0x94, 0x88),
            text: Color::rgb(0x33, 0x33, 0x33),
            frame: Color::gray(0xe0),
        }
    }
}

impl ChartTheme {
    fn palette_color(&self, index: usize) -> RGBColor {
        // An empty caller-supplied palette falls back to the flow color.
        match self.palette.get(index % self.palette.len().max(1)) {
            Some(color) => to_rgb(*color),
            None => to_rgb(self.flow),
        }
    }
}

fn to_rgb(color: Color) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

/// Renders one chart into a raw RGB buffer.
///
/// Zero-record input never fails: every chart kind degrades to a white
/// placeholder frame of the requested dimensions.
pub fn render_chart(
    spec: &ChartSpec,
    records: &[EquipmentRecord],
    stats: &AggregateStats,
    theme: &ChartTheme,
) -> Result<RasterImage, ChartError> {
    let mut buffer = vec![0u8; (spec.width * spec.height * 3) as usize];
    {
        let root =
            BitMapBackend::with_buffer(&mut buffer, (spec.width, spec.height)).into_drawing_area();
        if records.is_empty() {
            draw_placeholder(&root, spec, theme)?;
        } else {
            match spec.kind {
                ChartKind::Trend => draw_trend(&root, records, theme)?,
                ChartKind::GroupedBar { metric } => {
                    draw_grouped_bar(&root, records, stats, metric, theme)?
                }
                ChartKind::Donut => draw_donut(&root, spec, stats, theme)?,
                ChartKind::Scatter { x, y } => draw_scatter(&root, records, x, y, theme)?,
            }
        }
        root.present()?;
    }
    log::debug!(
        "rendered {:?} chart at {}x{}",
        spec.kind,
        spec.width,
        spec.height
    );
    Ok(RasterImage {
        width: spec.width,
        height: spec.height,
        rgb: buffer,
    })
}

type Area<'a> = DrawingArea<BitMapBackend<'a>, plotters::coord::Shift>;

/// Empty-axes stand-in used whenever there is nothing to plot.
fn draw_placeholder(root: &Area, spec: &ChartSpec, theme: &ChartTheme) -> Result<(), ChartError> {
    root.fill(&WHITE)?;
    root.draw(&Rectangle::new(
        [
            (1, 1),
            (spec.width.saturating_sub(2) as i32, spec.height.saturating_sub(2) as i32),
        ],
        to_rgb(theme.frame).stroke_width(1),
    ))?;
    Ok(())
}

fn draw_trend(root: &Area, records: &[EquipmentRecord], theme: &ChartTheme) -> Result<(), ChartError> {
    root.fill(&WHITE)?;

    let x_max = (records.len() - 1).max(1) as f64;
    let y_max = records
        .iter()
        .flat_map(|r| [r.flowrate, r.pressure])
        .fold(f64::MIN, f64::max)
        .max(1.0)
        * 1.1;

    let mut chart = ChartBuilder::on(root)
        .caption("Process Trends Overview", ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(28)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .y_desc("Value")
        .label_style(("sans-serif", 12).into_font().color(&to_rgb(theme.text)))
        .draw()?;

    let flow = to_rgb(theme.flow);
    let pressure = to_rgb(theme.pressure);

    chart.draw_series(AreaSeries::new(
        records.iter().enumerate().map(|(i, r)| (i as f64, r.flowrate)),
        0.0,
        flow.mix(0.1).filled(),
    ))?;
    chart
        .draw_series(LineSeries::new(
            records.iter().enumerate().map(|(i, r)| (i as f64, r.flowrate)),
            flow.stroke_width(2),
        ))?
        .label("Flowrate")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], flow.stroke_width(2)));
    chart
        .draw_series(DashedLineSeries::new(
            records.iter().enumerate().map(|(i, r)| (i as f64, r.pressure)),
            5,
            3,
            pressure.stroke_width(2),
        ))?
        .label("Pressure")
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 18, y)], pressure.stroke_width(2))
        });

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&to_rgb(theme.frame))
        .label_font(("sans-serif", 12))
        .draw()?;
    Ok(())
}

fn draw_grouped_bar(
    root: &Area,
    records: &[EquipmentRecord],
    stats: &AggregateStats,
    metric: Metric,
    theme: &ChartTheme,
) -> Result<(), ChartError> {
    root.fill(&WHITE)?;

    // Ascending label order, inherited from the distribution's BTreeMap.
    let groups: Vec<(String, f64)> = stats
        .type_distribution
        .keys()
        .map(|label| {
            let values: Vec<f64> = records
                .iter()
                .filter(|r| r.equipment_type == *label)
                .map(|r| metric.value(r))
                .collect();
            let mean = if values.is_empty() {
                0.0
            } else {
                values.iter().sum::<f64>() / values.len() as f64
            };
            (label.clone(), mean)
        })
        .collect();

    let y_max = groups
        .iter()
        .map(|(_, mean)| *mean)
        .fold(f64::MIN, f64::max)
        .max(1.0)
        * 1.1;

    let mut chart = ChartBuilder::on(root)
        .caption(
            format!("Avg {} by Type", metric.label()),
            ("sans-serif", 20),
        )
        .margin(12)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0..groups.len(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(groups.len())
        .x_label_formatter(&|idx| {
            groups
                .get(*idx)
                .map(|(label, _)| label.clone())
                .unwrap_or_default()
        })
        .y_desc(format!("{} ({})", metric.label(), metric.unit()))
        .label_style(("sans-serif", 12).into_font().color(&to_rgb(theme.text)))
        .draw()?;

    chart.draw_series(groups.iter().enumerate().map(|(idx, (_, mean))| {
        Rectangle::new([(idx, 0.0), (idx + 1, *mean)], theme.palette_color(idx).filled())
    }))?;
    Ok(())
}

fn draw_donut(
    root: &Area,
    spec: &ChartSpec,
    stats: &AggregateStats,
    theme: &ChartTheme,
) -> Result<(), ChartError> {
    root.fill(&WHITE)?;
    let root = root.titled("Equipment Distribution", ("sans-serif", 18))?;

    let total: usize = stats.type_distribution.values().sum();
    if total == 0 {
        return Ok(());
    }

    let sizes: Vec<f64> = stats.type_distribution.values().map(|c| *c as f64).collect();
    let labels: Vec<String> = stats
        .type_distribution
        .iter()
        .map(|(label, count)| {
            format!("{} {:.1}%", label, *count as f64 * 100.0 / total as f64)
        })
        .collect();
    let colors: Vec<RGBColor> = (0..sizes.len()).map(|i| theme.palette_color(i)).collect();

    let center = (spec.width as i32 / 2, spec.height as i32 / 2);
    let radius = (spec.width.min(spec.height) as f64) * 0.32;
    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(90.0);
    pie.label_style(("sans-serif", 12).into_font().color(&to_rgb(theme.text)));
    root.draw(&pie)?;

    // Hollow center turns the pie into a donut.
    root.draw(&Circle::new(center, (radius * 0.62) as i32, WHITE.filled()))?;
    Ok(())
}

fn draw_scatter(
    root: &Area,
    records: &[EquipmentRecord],
    x: Metric,
    y: Metric,
    theme: &ChartTheme,
) -> Result<(), ChartError> {
    root.fill(&WHITE)?;

    let x_range = padded_range(records.iter().map(|r| x.value(r)).minmax());
    let y_range = padded_range(records.iter().map(|r| y.value(r)).minmax());

    let mut chart = ChartBuilder::on(root)
        .caption(
            format!("{} vs {}", x.label(), y.label()),
            ("sans-serif", 20),
        )
        .margin(12)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(format!("{} ({})", x.label(), x.unit()))
        .y_desc(format!("{} ({})", y.label(), y.unit()))
        .label_style(("sans-serif", 12).into_font().color(&to_rgb(theme.text)))
        .draw()?;

    let marker = to_rgb(theme.scatter).mix(0.6).filled();
    chart.draw_series(
        records
            .iter()
            .map(|r| Circle::new((x.value(r), y.value(r)), 4, marker)),
    )?;
    Ok(())
}

fn padded_range(minmax: MinMaxResult<f64>) -> std::ops::Range<f64> {
    let (min, max) = match minmax {
        MinMaxResult::NoElements => (0.0, 1.0),
        MinMaxResult::OneElement(v) => (v - 1.0, v + 1.0),
        MinMaxResult::MinMax(min, max) => (min, max),
    };
    let span = (max - min).max(1e-6);
    (min - span * 0.05)..(max + span * 0.05)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::aggregate;

    fn sample_records() -> Vec<EquipmentRecord> {
        vec![
            EquipmentRecord::new("Pump-A", "Pump", 10.0, 50.0, 90.0),
            EquipmentRecord::new("Pump-B", "Pump", 20.0, 60.0, 110.0),
            EquipmentRecord::new("Valve-A", "Valve", 5.0, 40.0, 30.0),
        ]
    }

    #[test]
    fn empty_input_renders_a_placeholder_for_every_kind() {
        let stats = aggregate(&[]);
        let theme = ChartTheme::default();
        for kind in [
            ChartKind::Trend,
            ChartKind::GroupedBar { metric: Metric::Flowrate },
            ChartKind::Donut,
            ChartKind::Scatter { x: Metric::Pressure, y: Metric::Temperature },
        ] {
            let spec = ChartSpec { kind, width: 200, height: 120 };
            let image = render_chart(&spec, &[], &stats, &theme).unwrap();
            assert_eq!(image.rgb.len(), 200 * 120 * 3);
            // Mostly white: no axes, no series.
            let white_pixels = image.rgb.chunks(3).filter(|p| p == &[255, 255, 255]).count();
            assert!(white_pixels > 200 * 120 * 9 / 10);
        }
    }

    #[test]
    fn grouped_bar_color_assignment_is_deterministic() {
        let records = sample_records();
        let stats = aggregate(&records);
        let theme = ChartTheme::default();
        let spec = ChartSpec {
            kind: ChartKind::GroupedBar { metric: Metric::Flowrate },
            width: 400,
            height: 240,
        };

        let first = render_chart(&spec, &records, &stats, &theme).unwrap();
        let second = render_chart(&spec, &records, &stats, &theme).unwrap();
        assert_eq!(first.rgb, second.rgb);
    }

    #[test]
    fn trend_handles_a_single_record() {
        let records = vec![EquipmentRecord::new("Pump-A", "Pump", 10.0, 50.0, 90.0)];
        let stats = aggregate(&records);
        let spec = ChartSpec { kind: ChartKind::Trend, width: 320, height: 160 };
        let image = render_chart(&spec, &records, &stats, &ChartTheme::default()).unwrap();
        assert_eq!(image.width, 320);
        assert_eq!(image.height, 160);
    }

    #[test]
    fn palette_cycles_past_its_length() {
        let theme = ChartTheme::default();
        assert_eq!(theme.palette_color(0), theme.palette_color(theme.palette.len()));
    }

    #[test]
    fn empty_palette_falls_back_to_the_flow_color() {
        let theme = ChartTheme { palette: vec![], ..ChartTheme::default() };
        assert_eq!(theme.palette_color(0), to_rgb(theme.flow));
        assert_eq!(theme.palette_color(7), to_rgb(theme.flow));

        // The full render path must survive the empty palette too.
        let records = sample_records();
        let stats = aggregate(&records);
        let spec = ChartSpec { kind: ChartKind::Donut, width: 200, height: 120 };
        render_chart(&spec, &records, &stats, &theme).unwrap();
    }
}
