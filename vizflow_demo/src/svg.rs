// Copyright 2025 the Vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG writer for the demo binary.
//!
//! Just enough of SVG to dump the pipeline's output: rects, circles, bezier
//! ribbons, polygons and labels, appended in paint order.

use kurbo::{CubicBez, Point, Rect};
use peniko::Color;

#[derive(Debug)]
pub(crate) struct SvgDoc {
    view: Rect,
    body: String,
}

impl SvgDoc {
    pub(crate) fn new(view: Rect) -> Self {
        Self {
            view,
            body: String::new(),
        }
    }

    pub(crate) fn rect(&mut self, rect: Rect, fill: Color) {
        self.body.push_str(&format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height(),
            hex(fill),
        ));
        self.body.push('\n');
    }

    pub(crate) fn circle(&mut self, center: Point, radius: f64, fill: Color) {
        self.body.push_str(&format!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}"/>"#,
            center.x,
            center.y,
            radius,
            hex(fill),
        ));
        self.body.push('\n');
    }

    /// A ribbon: the bezier center-line stroked at the given thickness.
    pub(crate) fn ribbon(&mut self, path: CubicBez, thickness: f64, stroke: Color, opacity: f64) {
        self.body.push_str(&format!(
            r#"<path d="M{:.2},{:.2} C{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}" fill="none" stroke="{}" stroke-width="{:.2}" stroke-opacity="{opacity}"/>"#,
            path.p0.x,
            path.p0.y,
            path.p1.x,
            path.p1.y,
            path.p2.x,
            path.p2.y,
            path.p3.x,
            path.p3.y,
            hex(stroke),
            thickness.max(1.0),
        ));
        self.body.push('\n');
    }

    pub(crate) fn polygon(&mut self, points: &[Point], fill: Color, opacity: f64) {
        let mut list = String::new();
        for p in points {
            list.push_str(&format!("{:.2},{:.2} ", p.x, p.y));
        }
        self.body.push_str(&format!(
            r#"<polygon points="{}" fill="{}" fill-opacity="{opacity}"/>"#,
            list.trim_end(),
            hex(fill),
        ));
        self.body.push('\n');
    }

    pub(crate) fn label(&mut self, pos: Point, text: &str, font_size: f64) {
        self.body.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-size="{font_size}" font-family="sans-serif">{}</text>"#,
            pos.x,
            pos.y,
            escape_xml(text),
        ));
        self.body.push('\n');
    }

    pub(crate) fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\" width=\"{}\" height=\"{}\">\n{}</svg>\n",
            self.view.x0,
            self.view.y0,
            self.view.width(),
            self.view.height(),
            self.view.width(),
            self.view.height(),
            self.body,
        )
    }
}

fn hex(color: Color) -> String {
    let rgba = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
