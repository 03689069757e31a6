//! Chart band rendering for generation results.
//!
//! Bar charts use the ratatui `BarChart` widget; radar charts are drawn on a
//! braille `Canvas` with one spoke per label and a shaded value polygon.

use std::f64::consts::PI;

use pivot_core::chart::{ChartKind, ChartSpec};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Points};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders};

use crate::common::text::truncate_with_ellipsis;

/// Preferred height of the chart band inside an output panel.
pub const CHART_HEIGHT: u16 = 12;

/// Bar values are scaled to integers; two decimal places survive.
const BAR_VALUE_SCALE: f64 = 100.0;

/// Ring/value scales drawn as the radar fill.
const RADAR_FILL_STEPS: &[f64] = &[0.25, 0.5, 0.75];

/// Renders the chart band for a parsed chart spec.
pub fn render_chart(frame: &mut Frame, area: Rect, spec: &ChartSpec) {
    if spec.is_empty() || area.width < 12 || area.height < 5 {
        return;
    }
    match spec.kind {
        ChartKind::Bar => render_bar(frame, area, spec),
        ChartKind::Radar => render_radar(frame, area, spec),
    }
}

/// Block title carrying the series label and unit.
fn chart_title(spec: &ChartSpec) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!(" {} ", spec.series_label()),
        Style::default().fg(Color::Gray),
    )];
    if let Some(unit) = &spec.unit {
        spans.push(Span::styled(
            format!("({unit}) "),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn render_bar(frame: &mut Frame, area: Rect, spec: &ChartSpec) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(chart_title(spec));
    let inner = block.inner(area);

    let count = spec.labels.len().min(spec.data.len()).max(1) as u16;
    // Fit every bar into the panel; labels get truncated to the bar width
    let bar_width = (inner.width / count).saturating_sub(1).clamp(3, 14);

    let bars: Vec<Bar> = spec
        .points()
        .map(|(label, value)| {
            let scaled = (value.max(0.0) * BAR_VALUE_SCALE).round() as u64;
            Bar::default()
                .value(scaled)
                .text_value(format_value(value))
                .label(Line::from(truncate_with_ellipsis(
                    label,
                    bar_width as usize,
                )))
                .style(Style::default().fg(Color::Cyan))
                .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1);
    frame.render_widget(chart, area);
}

/// Compact value text drawn on top of each bar.
fn format_value(value: f64) -> String {
    if (value - value.round()).abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn render_radar(frame: &mut Frame, area: Rect, spec: &ChartSpec) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(chart_title(spec));

    let points: Vec<(String, f64)> = spec
        .points()
        .map(|(label, value)| (label.to_string(), value))
        .collect();
    let count = points.len();
    if count < 3 {
        // A radar needs a polygon; fall back to bars for 1-2 points
        render_bar(frame, area, spec);
        return;
    }

    let max = points
        .iter()
        .map(|(_, v)| *v)
        .fold(0.0_f64, f64::max)
        .max(1e-9);

    // Axis unit vectors, starting at the top and going clockwise.
    // X is stretched to compensate for terminal cell aspect ratio.
    let axis: Vec<(f64, f64)> = (0..count)
        .map(|i| {
            let angle = PI / 2.0 - 2.0 * PI * (i as f64) / (count as f64);
            (angle.cos(), angle.sin())
        })
        .collect();
    let vertices: Vec<(f64, f64)> = points
        .iter()
        .zip(&axis)
        .map(|((_, value), (ax, ay))| {
            let r = (value / max).clamp(0.0, 1.0);
            (ax * r, ay * r)
        })
        .collect();

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([-1.9, 1.9])
        .y_bounds([-1.35, 1.35])
        .paint(move |ctx| {
            // Spokes and the 100% ring
            for (i, (ax, ay)) in axis.iter().enumerate() {
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: 0.0,
                    x2: *ax,
                    y2: *ay,
                    color: Color::DarkGray,
                });
                let (bx, by) = axis[(i + 1) % axis.len()];
                ctx.draw(&CanvasLine {
                    x1: *ax,
                    y1: *ay,
                    x2: bx,
                    y2: by,
                    color: Color::DarkGray,
                });
            }

            // Shaded interior: dim scaled-down copies of the value polygon
            for step in RADAR_FILL_STEPS {
                let ring: Vec<(f64, f64)> =
                    vertices.iter().map(|(x, y)| (x * step, y * step)).collect();
                ctx.draw(&Points {
                    coords: &ring,
                    color: Color::Blue,
                });
            }

            // Value polygon outline
            for (i, (x, y)) in vertices.iter().enumerate() {
                let (nx, ny) = vertices[(i + 1) % vertices.len()];
                ctx.draw(&CanvasLine {
                    x1: *x,
                    y1: *y,
                    x2: nx,
                    y2: ny,
                    color: Color::Cyan,
                });
            }

            // Axis labels just outside the ring
            for ((label, _), (ax, ay)) in points.iter().zip(&axis) {
                let text = truncate_with_ellipsis(label, 14);
                ctx.print(
                    ax * 1.25,
                    ay * 1.2,
                    Line::from(Span::styled(text, Style::default().fg(Color::Gray))),
                );
            }
        });
    frame.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_value_drops_needless_decimals() {
        assert_eq!(format_value(12.0), "12");
        assert_eq!(format_value(12.5), "12.5");
        assert_eq!(format_value(0.0), "0");
    }
}
