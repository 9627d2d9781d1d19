use super::milestones::{self, LABEL_BASE_Y};
use super::palette::WorkPackagePalette;
use super::text::{format_wp_name, wrap_label};
use super::{
    Axis, Band, Bar, ChartLayout, HAlign, LayoutOptions, LineSegment, TextBox, TextLabel, Tick,
    VAlign,
};
use crate::domain::model::{TaskKind, TaskSet, MAX_MONTH};
use chrono::{Months, NaiveDate};

const DEFAULT_TOP: f64 = -4.0;
const MIN_INLINE_LABEL_WIDTH: f64 = 0.5;
const BAR_ALPHA: f64 = 0.7;
const BAR_LABEL_SIZE: f64 = 8.0;
const MILESTONE_LABEL_SIZE: f64 = 9.0;
const MILESTONE_LABEL_COLOR: &str = "#333333";
const BAND_LABEL_SIZE: f64 = 10.0;
const BAND_LABEL_X: f64 = -1.2;
const BRACKET_X: f64 = -0.8;
const BRACKET_TICK: f64 = 0.2;
const BRACKET_OVERHANG: f64 = 0.4;
const BRACKET_WIDTH: f64 = 1.5;

/// Lay out the whole chart. Records are assumed to be validated.
pub fn build_layout(tasks: &TaskSet, title: &str, options: &LayoutOptions) -> ChartLayout {
    let palette = WorkPackagePalette::from_work_packages(tasks.work_packages());

    let mut bands = Vec::new();
    let mut bars = Vec::new();
    let mut bar_labels = Vec::new();
    let mut row: u32 = 0;

    // 依工作包分組，工作包之間不留空白列
    for (wp, color) in palette.entries() {
        let first_row = row;
        for task in tasks
            .iter()
            .filter(|t| t.kind == TaskKind::Task && &t.work_package == wp)
        {
            let y = row as f64;
            let width = task.duration() as f64;
            bars.push(Bar {
                x: task.start as f64,
                y: y - 0.5,
                width,
                height: 1.0,
                fill: color.clone(),
                alpha: BAR_ALPHA,
                edge_color: "#000000".to_string(),
                edge_width: 0.5,
            });
            bar_labels.push(bar_label(&task.name, task.start as f64, width, y, color));
            row += 1;
        }
        if row > first_row {
            bands.push(Band {
                work_package: wp.clone(),
                color: color.clone(),
                first_row,
                last_row: row - 1,
            });
        }
    }

    let milestone_points: Vec<(f64, &str)> = tasks
        .iter()
        .filter(|t| t.is_milestone())
        .map(|t| (t.start as f64, t.name.as_str()))
        .collect();
    let placed = milestones::stagger_labels(
        &milestone_points,
        LABEL_BASE_Y,
        options.milestone_gap,
        options.milestone_rows,
    );

    let y_top = placed.iter().map(|p| p.y).fold(DEFAULT_TOP, f64::min);
    let y_bottom = row as f64;

    let markers: Vec<LineSegment> = tasks
        .iter()
        .filter(|t| t.is_milestone())
        .flat_map(|t| {
            let colors = t
                .related_wps
                .as_deref()
                .map(|related| milestones::resolve_colors(related, &palette))
                .unwrap_or_default();
            milestones::marker_segments(
                t.start as f64,
                &colors,
                y_top,
                y_bottom,
                options.stripe_height,
            )
        })
        .collect();

    let milestone_labels = placed
        .iter()
        .map(|p| TextLabel {
            x: p.x,
            y: p.y,
            text: wrap_label(&p.name, options.wrap_width),
            size: MILESTONE_LABEL_SIZE,
            bold: true,
            color: MILESTONE_LABEL_COLOR.to_string(),
            h_align: HAlign::Center,
            v_align: VAlign::Top,
            rotation: 0.0,
            background: None,
        })
        .collect();

    let mut brackets = Vec::new();
    let mut band_labels = Vec::new();
    for band in &bands {
        let start_y = band.first_row as f64;
        let end_y = band.last_row as f64;
        let (label_y, rotation) = if band.first_row == band.last_row {
            (start_y, 15.0)
        } else {
            brackets.extend(bracket(start_y, end_y));
            ((start_y + end_y) / 2.0, 25.0)
        };
        band_labels.push(TextLabel {
            x: BAND_LABEL_X,
            y: label_y,
            text: format_wp_name(&band.work_package, options.wrap_width),
            size: BAND_LABEL_SIZE,
            bold: true,
            color: band.color.clone(),
            h_align: HAlign::Right,
            v_align: VAlign::Center,
            rotation,
            background: None,
        });
    }

    let max_month = match tasks.month_range() {
        Some((_, latest)) if options.auto_extend => options.max_month.max(latest),
        _ => options.max_month,
    }
    .min(MAX_MONTH);

    ChartLayout {
        title: title.to_string(),
        axis: Axis {
            x_min: options.x_left,
            x_max: max_month as f64 + 1.0,
            y_top,
            y_bottom,
            ticks: month_ticks(options.min_month, max_month, options.start_date),
            grid_alpha: 0.3,
            label: "Month".to_string(),
        },
        bands,
        bars,
        bar_labels,
        markers,
        brackets,
        band_labels,
        milestone_labels,
    }
}

fn bar_label(name: &str, start: f64, width: f64, y: f64, color: &str) -> TextLabel {
    if width >= MIN_INLINE_LABEL_WIDTH {
        TextLabel {
            x: start + width / 2.0,
            y,
            text: name.to_string(),
            size: BAR_LABEL_SIZE,
            bold: true,
            color: "#000000".to_string(),
            h_align: HAlign::Center,
            v_align: VAlign::Center,
            rotation: 0.0,
            background: Some(TextBox {
                fill: "#ffffff".to_string(),
                alpha: 0.8,
                pad: 0.2,
            }),
        }
    } else {
        // 太窄放不下文字，改放在橫條右側
        TextLabel {
            x: start + width + 0.1,
            y,
            text: name.to_string(),
            size: BAR_LABEL_SIZE,
            bold: true,
            color: color.to_string(),
            h_align: HAlign::Left,
            v_align: VAlign::Center,
            rotation: 0.0,
            background: None,
        }
    }
}

/// Right-facing square bracket around rows `start_y..=end_y`.
fn bracket(start_y: f64, end_y: f64) -> [LineSegment; 3] {
    let top = start_y - BRACKET_OVERHANG;
    let bottom = end_y + BRACKET_OVERHANG;
    let line = |x1: f64, y1: f64, x2: f64, y2: f64| LineSegment {
        x1,
        y1,
        x2,
        y2,
        color: "#000000".to_string(),
        width: BRACKET_WIDTH,
        alpha: 1.0,
    };
    [
        line(BRACKET_X, top, BRACKET_X + BRACKET_TICK, top),
        line(BRACKET_X, top, BRACKET_X, bottom),
        line(BRACKET_X, bottom, BRACKET_X + BRACKET_TICK, bottom),
    ]
}

/// One tick per month. With a project start date month 1 is the start month.
pub fn month_ticks(min_month: u32, max_month: u32, start_date: Option<NaiveDate>) -> Vec<Tick> {
    (min_month..=max_month)
        .map(|month| {
            let label = match start_date {
                None => month.to_string(),
                Some(_) if month == 0 => String::new(),
                Some(start) => start
                    .checked_add_months(Months::new(month - 1))
                    .map(|d| d.format("%b %y").to_string())
                    .unwrap_or_else(|| month.to_string()),
            };
            Tick { month, label }
        })
        .collect()
}
