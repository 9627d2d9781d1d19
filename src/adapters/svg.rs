//! Standalone SVG writer for [`ChartLayout`].
//!
//! The figure is laid out in points (72 per inch) through the `viewBox`; the
//! `width`/`height` attributes carry the pixel size implied by the dpi.

use crate::layout::{ChartLayout, HAlign, LineSegment, TextLabel, VAlign};
use crate::utils::error::{GanttError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

const POINTS_PER_INCH: f64 = 72.0;
const MARGIN_LEFT: f64 = 30.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 50.0;
const MARGIN_TOP_WITH_TITLE: f64 = 60.0;
const MARGIN_TOP: f64 = 20.0;
const TICK_LABEL_SIZE: f64 = 10.0;
const AXIS_LABEL_SIZE: f64 = 12.0;
const TITLE_SIZE: f64 = 16.0;
const LINE_SPACING: f64 = 1.2;
/// Average glyph advance for bold sans-serif, as a fraction of font size.
const CHAR_WIDTH: f64 = 0.6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvgOptions {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
    pub font_family: String,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            width_in: 16.0,
            height_in: 10.0,
            dpi: 300,
            font_family: "DejaVu Sans, Arial, Helvetica, sans-serif".to_string(),
        }
    }
}

/// Data space to canvas mapping.
struct Frame {
    left: f64,
    top: f64,
    plot_w: f64,
    plot_h: f64,
    x_min: f64,
    x_span: f64,
    y_top: f64,
    y_span: f64,
}

impl Frame {
    fn new(layout: &ChartLayout, width: f64, height: f64) -> Self {
        let top = if layout.title.is_empty() {
            MARGIN_TOP
        } else {
            MARGIN_TOP_WITH_TITLE
        };
        let axis = &layout.axis;
        let x_span = axis.x_max - axis.x_min;
        let y_span = axis.y_bottom - axis.y_top;
        Self {
            left: MARGIN_LEFT,
            top,
            plot_w: (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
            plot_h: (height - top - MARGIN_BOTTOM).max(1.0),
            x_min: axis.x_min,
            x_span: if x_span > 0.0 { x_span } else { 1.0 },
            y_top: axis.y_top,
            y_span: if y_span > 0.0 { y_span } else { 1.0 },
        }
    }

    fn x(&self, x: f64) -> f64 {
        self.left + (x - self.x_min) / self.x_span * self.plot_w
    }

    fn y(&self, y: f64) -> f64 {
        self.top + (y - self.y_top) / self.y_span * self.plot_h
    }

    fn dx(&self, w: f64) -> f64 {
        w / self.x_span * self.plot_w
    }

    fn dy(&self, h: f64) -> f64 {
        h / self.y_span * self.plot_h
    }

    fn bottom(&self) -> f64 {
        self.top + self.plot_h
    }
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn num(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

pub fn render_svg(layout: &ChartLayout, options: &SvgOptions) -> Result<String> {
    let mut svg = String::new();
    write_document(&mut svg, layout, options)
        .map_err(|e| GanttError::processing(format!("failed to format SVG: {}", e)))?;
    Ok(svg)
}

fn write_document(svg: &mut String, layout: &ChartLayout, options: &SvgOptions) -> fmt::Result {
    let width = options.width_in * POINTS_PER_INCH;
    let height = options.height_in * POINTS_PER_INCH;
    let px_w = (options.width_in * options.dpi as f64).round();
    let px_h = (options.height_in * options.dpi as f64).round();
    let frame = Frame::new(layout, width, height);

    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}" font-family="{}">"#,
        num(px_w),
        num(px_h),
        num(width),
        num(height),
        escape_xml(&options.font_family)
    )?;
    writeln!(
        svg,
        r##"<rect x="0" y="0" width="{}" height="{}" fill="#ffffff"/>"##,
        num(width),
        num(height)
    )?;

    if !layout.title.is_empty() {
        writeln!(
            svg,
            r#"<text class="title" x="{}" y="{}" font-size="{}" font-weight="bold" text-anchor="middle">{}</text>"#,
            num(width / 2.0),
            num(MARGIN_TOP_WITH_TITLE - 24.0),
            num(TITLE_SIZE),
            escape_xml(&layout.title)
        )?;
    }

    write_axis(svg, layout, &frame)?;

    writeln!(svg, r#"<g class="bars">"#)?;
    for bar in &layout.bars {
        writeln!(
            svg,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" fill-opacity="{}" stroke="{}" stroke-width="{}"/>"#,
            num(frame.x(bar.x)),
            num(frame.y(bar.y)),
            num(frame.dx(bar.width)),
            num(frame.dy(bar.height)),
            bar.fill,
            num(bar.alpha),
            bar.edge_color,
            num(bar.edge_width)
        )?;
    }
    writeln!(svg, "</g>")?;

    write_labels(svg, "bar-labels", &layout.bar_labels, &frame)?;
    write_lines(svg, "milestones", &layout.markers, &frame)?;
    write_lines(svg, "brackets", &layout.brackets, &frame)?;
    write_labels(svg, "work-packages", &layout.band_labels, &frame)?;
    write_labels(svg, "milestone-labels", &layout.milestone_labels, &frame)?;

    writeln!(svg, "</svg>")
}

fn write_axis(svg: &mut String, layout: &ChartLayout, frame: &Frame) -> fmt::Result {
    let axis = &layout.axis;
    writeln!(svg, r#"<g class="axis">"#)?;
    for tick in &axis.ticks {
        let x = frame.x(tick.month as f64);
        writeln!(
            svg,
            r##"<line x1="{x}" y1="{}" x2="{x}" y2="{}" stroke="#b0b0b0" stroke-width="0.8" stroke-opacity="{}"/>"##,
            num(frame.top),
            num(frame.bottom()),
            num(axis.grid_alpha),
            x = num(x)
        )?;
        if !tick.label.is_empty() {
            writeln!(
                svg,
                r#"<text x="{}" y="{}" font-size="{}" text-anchor="middle">{}</text>"#,
                num(x),
                num(frame.bottom() + TICK_LABEL_SIZE + 4.0),
                num(TICK_LABEL_SIZE),
                escape_xml(&tick.label)
            )?;
        }
    }
    writeln!(
        svg,
        r#"<text x="{}" y="{}" font-size="{}" text-anchor="middle">{}</text>"#,
        num(frame.left + frame.plot_w / 2.0),
        num(frame.bottom() + TICK_LABEL_SIZE + AXIS_LABEL_SIZE + 16.0),
        num(AXIS_LABEL_SIZE),
        escape_xml(&axis.label)
    )?;
    writeln!(svg, "</g>")
}

fn write_lines(svg: &mut String, class: &str, lines: &[LineSegment], frame: &Frame) -> fmt::Result {
    if lines.is_empty() {
        return Ok(());
    }
    writeln!(svg, r#"<g class="{}">"#, class)?;
    for line in lines {
        writeln!(
            svg,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" stroke-opacity="{}"/>"#,
            num(frame.x(line.x1)),
            num(frame.y(line.y1)),
            num(frame.x(line.x2)),
            num(frame.y(line.y2)),
            line.color,
            num(line.width),
            num(line.alpha)
        )?;
    }
    writeln!(svg, "</g>")
}

fn write_labels(svg: &mut String, class: &str, labels: &[TextLabel], frame: &Frame) -> fmt::Result {
    if labels.is_empty() {
        return Ok(());
    }
    writeln!(svg, r#"<g class="{}">"#, class)?;
    for label in labels {
        write_label(svg, label, frame)?;
    }
    writeln!(svg, "</g>")
}

fn write_label(svg: &mut String, label: &TextLabel, frame: &Frame) -> fmt::Result {
    let x = frame.x(label.x);
    let y = frame.y(label.y);
    let lines: Vec<&str> = label.text.split('\n').collect();
    let line_height = label.size * LINE_SPACING;
    let block_height = line_height * lines.len() as f64;

    // 第一行基線相對於錨點的位移
    let first_baseline = match label.v_align {
        VAlign::Top => label.size * 0.8,
        VAlign::Center => -(lines.len() as f64 - 1.0) / 2.0 * line_height + label.size * 0.35,
    };

    let anchor = match label.h_align {
        HAlign::Left => "start",
        HAlign::Center => "middle",
        HAlign::Right => "end",
    };

    let transform = if label.rotation != 0.0 {
        format!(
            r#" transform="rotate({} {} {})""#,
            num(-label.rotation),
            num(x),
            num(y)
        )
    } else {
        String::new()
    };

    if let Some(bg) = &label.background {
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let pad = bg.pad * label.size;
        let box_w = longest as f64 * label.size * CHAR_WIDTH + 2.0 * pad;
        let box_h = block_height + 2.0 * pad;
        let box_x = match label.h_align {
            HAlign::Left => x - pad,
            HAlign::Center => x - box_w / 2.0,
            HAlign::Right => x - box_w + pad,
        };
        let box_y = match label.v_align {
            VAlign::Top => y - pad,
            VAlign::Center => y - box_h / 2.0,
        };
        writeln!(
            svg,
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}" fill-opacity="{}"{}/>"#,
            num(box_x),
            num(box_y),
            num(box_w),
            num(box_h),
            num(pad),
            bg.fill,
            num(bg.alpha),
            transform
        )?;
    }

    write!(
        svg,
        r#"<text x="{}" y="{}" font-size="{}"{} fill="{}" text-anchor="{}"{}>"#,
        num(x),
        num(y),
        num(label.size),
        if label.bold { r#" font-weight="bold""# } else { "" },
        label.color,
        anchor,
        transform
    )?;
    for (i, line) in lines.iter().enumerate() {
        let dy = if i == 0 { first_baseline } else { line_height };
        write!(
            svg,
            r#"<tspan x="{}" dy="{}">{}</tspan>"#,
            num(x),
            num(dy),
            escape_xml(line)
        )?;
    }
    writeln!(svg, "</text>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{TaskKind, TaskRecord, TaskSet};
    use crate::layout::{build_layout, LayoutOptions};

    fn layout(title: &str) -> ChartLayout {
        let tasks = TaskSet::new(vec![
            TaskRecord {
                name: "Design & <Review>".to_string(),
                work_package: "WP1: Design".to_string(),
                start: 1,
                end: 4,
                kind: TaskKind::Task,
                related_wps: None,
            },
            TaskRecord {
                name: "MS1 - Design Frozen After Long Review".to_string(),
                work_package: "Milestones".to_string(),
                start: 4,
                end: 4,
                kind: TaskKind::Milestone,
                related_wps: Some("WP1".to_string()),
            },
        ]);
        build_layout(&tasks, title, &LayoutOptions::default())
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml(r#"a&b<c>"d'"#), "a&amp;b&lt;c&gt;&quot;d&apos;");
    }

    #[test]
    fn test_num_trims_trailing_zeros() {
        assert_eq!(num(1.5), "1.5");
        assert_eq!(num(2.0), "2");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(1.234), "1.23");
    }

    #[test]
    fn test_document_size_follows_dpi() {
        let svg = render_svg(&layout(""), &SvgOptions::default()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="4800" height="3000" viewBox="0 0 1152 720""#));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(!svg.contains("class=\"title\""));
    }

    #[test]
    fn test_text_is_escaped_and_wrapped() {
        let svg = render_svg(&layout("Plan <2026>"), &SvgOptions::default()).unwrap();
        assert!(svg.contains("Plan &lt;2026&gt;"));
        assert!(svg.contains("Design &amp; &lt;Review&gt;"));
        assert!(svg.contains("<tspan"));
        assert!(svg.contains(">MS1 - Design Frozen</tspan>"));
    }

    #[test]
    fn test_rotated_band_label() {
        let svg = render_svg(&layout(""), &SvgOptions::default()).unwrap();
        assert!(svg.contains("rotate(-15 "));
        assert!(svg.contains("class=\"milestones\""));
    }
}
