use super::palette::{WorkPackagePalette, MILESTONE_GREY};
use super::LineSegment;
use std::cmp::Ordering;

pub const MARKER_WIDTH: f64 = 3.0;
pub const MARKER_ALPHA: f64 = 0.8;
pub const LABEL_BASE_Y: f64 = -1.0;
const ROW_SPACING: f64 = 1.5;

/// Colours for a milestone's comma separated `Related WPs` list, in list order.
pub fn resolve_colors(related: &str, palette: &WorkPackagePalette) -> Vec<String> {
    related
        .split(',')
        .map(str::trim)
        .filter_map(|id| palette.resolve(id))
        .map(str::to_string)
        .collect()
}

/// Vertical marker spanning the chart from `y_top` to `y_bottom`.
///
/// More than one colour produces alternating stripes of `stripe` height.
pub fn marker_segments(
    x: f64,
    colors: &[String],
    y_top: f64,
    y_bottom: f64,
    stripe: f64,
) -> Vec<LineSegment> {
    let segment = |y1: f64, y2: f64, color: &str| LineSegment {
        x1: x,
        y1,
        x2: x,
        y2,
        color: color.to_string(),
        width: MARKER_WIDTH,
        alpha: MARKER_ALPHA,
    };

    match colors {
        [] => vec![segment(y_top, y_bottom, MILESTONE_GREY)],
        [only] => vec![segment(y_top, y_bottom, only.as_str())],
        _ => {
            let total = y_bottom - y_top;
            if stripe <= 0.0 || total <= 0.0 {
                return vec![segment(y_top, y_bottom, colors[0].as_str())];
            }
            // 浮點誤差：14.0 / 0.2 可能得到 69.999...
            let count = (total / stripe + 1e-9).floor() as usize + 1;
            (0..count)
                .filter_map(|i| {
                    let start = y_top + i as f64 * stripe;
                    if start >= y_bottom - 1e-9 {
                        return None;
                    }
                    let end = (start + stripe).min(y_bottom);
                    Some(segment(start, end, colors[i % colors.len()].as_str()))
                })
                .collect()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLabel {
    pub x: f64,
    pub y: f64,
    pub name: String,
}

/// Assign each milestone label a height above the chart.
///
/// Labels are sorted by position; a label closer than `gap` months to its
/// predecessor moves to one of `rows` staggered rows, otherwise it sits just
/// above `base_y`.
pub fn stagger_labels(
    milestones: &[(f64, &str)],
    base_y: f64,
    gap: f64,
    rows: usize,
) -> Vec<PlacedLabel> {
    let mut sorted: Vec<(f64, &str)> = milestones.to_vec();
    sorted.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.1.cmp(b.1))
    });

    let rows = rows.max(1);
    sorted
        .iter()
        .enumerate()
        .map(|(i, &(x, name))| {
            let crowded = i > 0 && (x - sorted[i - 1].0).abs() < gap;
            let y = if crowded {
                let row = (i % rows) + 1;
                base_y - row as f64 * ROW_SPACING
            } else {
                base_y - 0.5
            };
            PlacedLabel {
                x,
                y,
                name: name.to_string(),
            }
        })
        .collect()
}
