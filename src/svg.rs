// this_file: src/svg.rs

//! Minimal SVG element writer used by the glyph catalog.
//!
//! Attribute order and number formatting are fixed: all coordinates are
//! integers and every element is emitted on a single line, so the markup for
//! a given input never changes.

use std::fmt::Write;

/// Writes primitives in one color into a shared buffer.
pub(crate) struct Pen<'a> {
    out: &'a mut String,
    color: &'a str,
}

impl<'a> Pen<'a> {
    pub(crate) fn new(out: &'a mut String, color: &'a str) -> Self {
        Self { out, color }
    }

    pub(crate) fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, sw: i32) -> &mut Self {
        let _ = write!(
            self.out,
            r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="{sw}"/>"#,
            self.color
        );
        self
    }

    pub(crate) fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, sw: i32, filled: bool) -> &mut Self {
        let _ = write!(
            self.out,
            r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" rx="4" ry="4" stroke="{}" stroke-width="{sw}" "#,
            self.color
        );
        self.fill(filled);
        self.out.push_str("/>");
        self
    }

    /// Filled circles carry no stroke; outlined circles take `sw`.
    pub(crate) fn circle(&mut self, cx: i32, cy: i32, r: i32, filled: bool, sw: i32) -> &mut Self {
        let _ = write!(self.out, r#"<circle cx="{cx}" cy="{cy}" r="{r}" "#);
        if filled {
            let _ = write!(self.out, r#"fill="{}""#, self.color);
        } else {
            let _ = write!(
                self.out,
                r#"fill="none" stroke="{}" stroke-width="{sw}""#,
                self.color
            );
        }
        self.out.push_str("/>");
        self
    }

    pub(crate) fn dot(&mut self, cx: i32, cy: i32, r: i32) -> &mut Self {
        self.circle(cx, cy, r, true, 0)
    }

    pub(crate) fn ring(&mut self, cx: i32, cy: i32, r: i32, sw: i32) -> &mut Self {
        self.circle(cx, cy, r, false, sw)
    }

    pub(crate) fn polygon(&mut self, points: &[i32], sw: i32, filled: bool) -> &mut Self {
        self.out.push_str(r#"<polygon points=""#);
        self.points(points);
        let _ = write!(self.out, r#"" stroke="{}" stroke-width="{sw}" "#, self.color);
        self.fill(filled);
        self.out.push_str("/>");
        self
    }

    pub(crate) fn polyline(&mut self, points: &[i32], sw: i32) -> &mut Self {
        self.out.push_str(r#"<polyline points=""#);
        self.points(points);
        let _ = write!(
            self.out,
            r#"" fill="none" stroke="{}" stroke-width="{sw}"/>"#,
            self.color
        );
        self
    }

    fn fill(&mut self, filled: bool) {
        if filled {
            let _ = write!(self.out, r#"fill="{}""#, self.color);
        } else {
            self.out.push_str(r#"fill="none""#);
        }
    }

    fn points(&mut self, points: &[i32]) {
        for (i, pair) in points.chunks_exact(2).enumerate() {
            if i > 0 {
                self.out.push(' ');
            }
            let _ = write!(self.out, "{},{}", pair[0], pair[1]);
        }
    }
}

pub(crate) fn tri_up(cx: i32, cy: i32, r: i32) -> [i32; 6] {
    [cx, cy - r, cx + r, cy + r, cx - r, cy + r]
}

pub(crate) fn tri_down(cx: i32, cy: i32, r: i32) -> [i32; 6] {
    [cx - r, cy - r, cx + r, cy - r, cx, cy + r]
}

pub(crate) fn diamond(cx: i32, cy: i32, r: i32) -> [i32; 8] {
    [cx, cy - r, cx + r, cy, cx, cy + r, cx - r, cy]
}

pub(crate) fn arrow_right(x: i32, y: i32, w: i32) -> [i32; 6] {
    [x, y - 8, x + w, y, x, y + 8]
}

pub(crate) fn arrow_left(x: i32, y: i32, w: i32) -> [i32; 6] {
    [x, y, x - w, y - 8, x - w, y + 8]
}
