//! Actual vs predicted line chart over the aggregate table

use crate::data::AggregateTable;
use serde::Serialize;
use std::fmt::Write;

const WIDTH: f64 = 700.0;
const HEIGHT: f64 = 400.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 130.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 60.0;

/// The two lines of the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Series {
    Actual,
    Predicted,
}

impl Series {
    pub fn label(&self) -> &'static str {
        match self {
            Series::Actual => "Actual Qty",
            Series::Predicted => "Predicted Qty",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Series::Actual => "green",
            Series::Predicted => "red",
        }
    }
}

/// One point in long format: period, series, quantity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub period: String,
    pub series: Series,
    pub qty: f64,
}

/// Melt the aggregate table into chart points, periods in (year, month)
/// order, actual points first.
pub fn chart_points(table: &AggregateTable) -> Vec<ChartPoint> {
    let actual = table.records().iter().map(|r| ChartPoint {
        period: r.period(),
        series: Series::Actual,
        qty: r.actual_qty,
    });
    let predicted = table.records().iter().map(|r| ChartPoint {
        period: r.period(),
        series: Series::Predicted,
        qty: r.predicted_qty,
    });
    actual.chain(predicted).collect()
}

/// Render the chart as a standalone SVG document.
///
/// The y axis starts at zero unless a quantity is negative, in which case it
/// extends below zero and a dashed zero line is drawn.
pub fn render_svg(table: &AggregateTable) -> String {
    let records = table.records();
    let mut svg = String::new();

    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="11">"#,
        w = WIDTH,
        h = HEIGHT
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="22" font-size="15" text-anchor="middle">Actual vs Predicted Qty per Month</text>"#,
        WIDTH / 2.0
    );

    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let bottom = MARGIN_TOP + plot_h;

    // Axes
    let _ = writeln!(
        svg,
        r#"<line x1="{l}" y1="{t}" x2="{l}" y2="{b}" stroke="black"/><line x1="{l}" y1="{b}" x2="{r}" y2="{b}" stroke="black"/>"#,
        l = MARGIN_LEFT,
        t = MARGIN_TOP,
        b = bottom,
        r = MARGIN_LEFT + plot_w
    );
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="{}" text-anchor="middle">Period</text>"#,
        MARGIN_LEFT + plot_w / 2.0,
        HEIGHT - 10.0
    );
    let _ = writeln!(
        svg,
        r#"<text x="15" y="{y}" text-anchor="middle" transform="rotate(-90 15 {y})">Qty</text>"#,
        y = MARGIN_TOP + plot_h / 2.0
    );

    if !records.is_empty() {
        let quantities = || records.iter().flat_map(|r| [r.actual_qty, r.predicted_qty]);
        let max = quantities().fold(0.0_f64, f64::max);
        let min = quantities().fold(0.0_f64, f64::min);
        let y_max = if max > 0.0 { max * 1.1 } else { 1.0 };
        let y_min = min * 1.1;
        let span = y_max - y_min;

        let step = if records.len() > 1 {
            plot_w / (records.len() - 1) as f64
        } else {
            0.0
        };
        let x_at = |i: usize| {
            if records.len() > 1 {
                MARGIN_LEFT + step * i as f64
            } else {
                MARGIN_LEFT + plot_w / 2.0
            }
        };
        let y_at = |qty: f64| bottom - ((qty - y_min) / span) * plot_h;

        // Y ticks
        for tick in 0..=4 {
            let value = y_min + span * tick as f64 / 4.0;
            let _ = writeln!(
                svg,
                r#"<text x="{}" y="{}" text-anchor="end">{:.0}</text>"#,
                MARGIN_LEFT - 6.0,
                y_at(value) + 4.0,
                value
            );
        }

        if y_min < 0.0 {
            let _ = writeln!(
                svg,
                r#"<line x1="{}" y1="{y:.1}" x2="{}" y2="{y:.1}" stroke="gray" stroke-dasharray="4 3"/>"#,
                MARGIN_LEFT,
                MARGIN_LEFT + plot_w,
                y = y_at(0.0)
            );
        }

        // X labels
        for (i, record) in records.iter().enumerate() {
            let _ = writeln!(
                svg,
                r#"<text x="{x}" y="{y}" text-anchor="end" transform="rotate(-45 {x} {y})">{label}</text>"#,
                x = x_at(i),
                y = bottom + 14.0,
                label = record.period()
            );
        }

        for series in [Series::Actual, Series::Predicted] {
            let coords: Vec<(f64, f64)> = records
                .iter()
                .enumerate()
                .map(|(i, r)| {
                    let qty = match series {
                        Series::Actual => r.actual_qty,
                        Series::Predicted => r.predicted_qty,
                    };
                    (x_at(i), y_at(qty))
                })
                .collect();

            let path: Vec<String> = coords
                .iter()
                .map(|(x, y)| format!("{:.1},{:.1}", x, y))
                .collect();
            let _ = writeln!(
                svg,
                r#"<polyline fill="none" stroke="{}" stroke-width="2" points="{}"/>"#,
                series.color(),
                path.join(" ")
            );
            for (x, y) in &coords {
                let _ = writeln!(
                    svg,
                    r#"<circle cx="{:.1}" cy="{:.1}" r="3" fill="{}"/>"#,
                    x,
                    y,
                    series.color()
                );
            }
        }
    }

    // Legend
    for (i, series) in [Series::Actual, Series::Predicted].iter().enumerate() {
        let y = MARGIN_TOP + 10.0 + 20.0 * i as f64;
        let x = WIDTH - MARGIN_RIGHT + 15.0;
        let _ = writeln!(
            svg,
            r#"<rect x="{}" y="{}" width="12" height="12" fill="{}"/><text x="{}" y="{}">{}</text>"#,
            x,
            y - 10.0,
            series.color(),
            x + 18.0,
            y,
            series.label()
        );
    }

    svg.push_str("</svg>\n");
    svg
}
