//! Chart layout: turns validated task records into plotting primitives.
//!
//! Coordinates are in data space. x is measured in months; y grows downward,
//! one unit per task row, with negative y reserved for milestone labels above
//! the first row. Writers map these primitives onto a concrete canvas.

pub mod chart;
pub mod milestones;
pub mod palette;
pub mod text;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use chart::build_layout;
pub use palette::WorkPackagePalette;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    pub min_month: u32,
    pub max_month: u32,
    /// Extend the axis past `max_month` when a task ends later.
    pub auto_extend: bool,
    /// Left edge of the x axis; leaves room for work-package brackets.
    pub x_left: f64,
    pub wrap_width: usize,
    pub milestone_gap: f64,
    pub milestone_rows: usize,
    pub stripe_height: f64,
    pub start_date: Option<NaiveDate>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            min_month: 0,
            max_month: 36,
            auto_extend: true,
            x_left: -3.0,
            wrap_width: 20,
            milestone_gap: 4.0,
            milestone_rows: 3,
            stripe_height: 0.2,
            start_date: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Top,
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    pub alpha: f64,
    pub edge_color: String,
    pub edge_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    pub fill: String,
    pub alpha: f64,
    /// Padding as a fraction of the font size.
    pub pad: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    pub x: f64,
    pub y: f64,
    /// May contain `\n` line breaks.
    pub text: String,
    pub size: f64,
    pub bold: bool,
    pub color: String,
    pub h_align: HAlign,
    pub v_align: VAlign,
    /// Counter-clockwise degrees.
    pub rotation: f64,
    pub background: Option<TextBox>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: String,
    pub width: f64,
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub month: u32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub x_min: f64,
    pub x_max: f64,
    /// Smaller y is drawn higher up.
    pub y_top: f64,
    pub y_bottom: f64,
    pub ticks: Vec<Tick>,
    pub grid_alpha: f64,
    pub label: String,
}

/// Work-package row band, kept for writers and debugging output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub work_package: String,
    pub color: String,
    pub first_row: u32,
    pub last_row: u32,
}

/// Everything needed to draw one chart, in back-to-front order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub title: String,
    pub axis: Axis,
    pub bands: Vec<Band>,
    pub bars: Vec<Bar>,
    pub bar_labels: Vec<TextLabel>,
    pub markers: Vec<LineSegment>,
    pub brackets: Vec<LineSegment>,
    pub band_labels: Vec<TextLabel>,
    pub milestone_labels: Vec<TextLabel>,
}

impl ChartLayout {
    pub fn row_count(&self) -> u32 {
        self.bands.last().map(|b| b.last_row + 1).unwrap_or(0)
    }
}
