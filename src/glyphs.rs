// this_file: src/glyphs.rs

//! Hand-authored glyph layouts for every major and minor.
//!
//! Major glyphs sit in the upper-left cluster (about x 220..380, y 320..600);
//! minor glyphs sit in the lower-right cluster (about x 700..860,
//! y 980..1180). These regions are the reserved zones the punch layout keeps
//! clear of.

use crate::arcana::{Major, Minor};
use crate::svg::{arrow_left, arrow_right, diamond, tri_down, tri_up, Pen};

/// Markup for a major glyph drawn in `color`.
pub fn render_major_glyph(major: Major, color: &str) -> String {
    let mut out = String::new();
    let mut pen = Pen::new(&mut out, color);
    match major {
        // three pillars
        Major::Liquidity => {
            pen.line(260, 360, 260, 520, 6)
                .line(300, 360, 300, 520, 6)
                .line(340, 360, 340, 520, 6);
        }
        // lever and fulcrum
        Major::Leverage => {
            pen.line(230, 540, 360, 410, 6).dot(285, 540, 6);
        }
        // zigzag bolt
        Major::Volatility => {
            pen.polyline(&[230, 420, 280, 470, 255, 495, 320, 560, 360, 520], 6);
        }
        // scroll
        Major::Narrative => {
            pen.ring(300, 470, 38, 6).ring(300, 480, 16, 6);
        }
        // world axis
        Major::TheMacro => {
            pen.ring(300, 470, 70, 6).line(300, 400, 300, 540, 6);
        }
        Major::Discipline => {
            pen.rect(230, 390, 140, 140, 6, false);
        }
        Major::Fomo => {
            pen.polygon(&tri_up(300, 470, 90), 6, false);
        }
        Major::Fud => {
            pen.polygon(&tri_down(300, 470, 90), 6, false);
        }
        // braille cell, 2 x 3
        Major::Rng => {
            pen.dot(270, 430, 7)
                .dot(330, 430, 7)
                .dot(270, 470, 7)
                .dot(330, 470, 7)
                .dot(270, 510, 7)
                .dot(330, 510, 7);
        }
        Major::MaxPain => {
            pen.line(240, 410, 360, 530, 6).line(360, 410, 240, 530, 6);
        }
        // ping over signal bars
        Major::TheChat => {
            pen.dot(300, 400, 6)
                .line(250, 460, 350, 460, 8)
                .line(250, 500, 350, 500, 6);
        }
        // lozenge eye with pupil
        Major::Ego => {
            pen.polygon(&diamond(300, 470, 60), 6, false).dot(300, 470, 8);
        }
    }
    out
}

/// Markup for a minor glyph drawn in `color`.
pub fn render_minor_glyph(minor: Minor, color: &str) -> String {
    let mut out = String::new();
    let mut pen = Pen::new(&mut out, color);
    match (minor.major(), minor.id()) {
        // Fills: pillars with caps
        (Major::Liquidity, 0) => {
            pen.line(740, 1000, 740, 1140, 6)
                .line(780, 1000, 780, 1140, 6)
                .line(820, 1000, 820, 1140, 6)
                .line(730, 1000, 750, 1000, 6)
                .line(770, 1000, 790, 1000, 6)
                .line(810, 1000, 830, 1000, 6)
                .line(730, 1140, 750, 1140, 6)
                .line(770, 1140, 790, 1140, 6)
                .line(810, 1140, 830, 1140, 6);
        }
        // Market-Maker: crossbar
        (Major::Liquidity, 1) => {
            pen.line(740, 1000, 740, 1140, 6)
                .line(780, 1000, 780, 1140, 6)
                .line(820, 1000, 820, 1140, 6)
                .line(740, 1070, 820, 1070, 6);
        }
        // Spread: uneven spacing
        (Major::Liquidity, 2) => {
            pen.line(730, 1000, 730, 1140, 6)
                .line(780, 1000, 780, 1140, 6)
                .line(850, 1000, 850, 1140, 6);
        }
        // Volume: mid dots
        (Major::Liquidity, _) => {
            pen.line(740, 1000, 740, 1140, 6)
                .line(780, 1000, 780, 1140, 6)
                .line(820, 1000, 820, 1140, 6)
                .dot(760, 1070, 6)
                .dot(800, 1070, 6);
        }

        // Margin: higher fulcrum
        (Major::Leverage, 0) => {
            pen.line(710, 1120, 850, 1000, 6).dot(780, 1090, 6);
        }
        // Liqd: blade at the tip
        (Major::Leverage, 1) => {
            pen.line(710, 1120, 850, 1000, 6)
                .polygon(&arrow_right(850, 1000, 12), 6, true)
                .dot(780, 1120, 6);
        }
        // Max Long: steeper up
        (Major::Leverage, 2) => {
            pen.line(710, 1140, 860, 980, 6).dot(780, 1140, 6);
        }
        // Max Short: down
        (Major::Leverage, _) => {
            pen.line(710, 1000, 860, 1140, 6).dot(780, 1000, 6);
        }

        (Major::Volatility, 0) => {
            pen.polyline(&[720, 1030, 770, 1080, 745, 1105, 820, 1160, 860, 1120], 6);
        }
        (Major::Volatility, 1) => {
            pen.polyline(&[860, 1030, 810, 1080, 835, 1105, 760, 1160, 720, 1120], 6);
        }
        (Major::Volatility, 2) => {
            pen.polyline(
                &[720, 1060, 740, 1080, 760, 1060, 780, 1080, 800, 1060, 820, 1080, 840, 1060],
                6,
            );
        }
        (Major::Volatility, _) => {
            pen.polyline(&[720, 1060, 760, 1100, 740, 1120, 800, 1160, 860, 1120], 6);
        }

        // Insider: tight inner curl
        (Major::Narrative, 0) => {
            pen.ring(800, 1080, 34, 6).ring(800, 1090, 14, 6);
        }
        // Hype: larger outer curl
        (Major::Narrative, 1) => {
            pen.ring(800, 1080, 44, 6).ring(800, 1090, 16, 6);
        }
        // News: tail then curl
        (Major::Narrative, 2) => {
            pen.line(740, 1080, 780, 1080, 6).ring(820, 1080, 34, 6);
        }
        // Cope: open inner gap
        (Major::Narrative, _) => {
            pen.ring(800, 1080, 40, 6).line(792, 1080, 808, 1080, 6);
        }

        // Regulator: top bar
        (Major::TheMacro, 0) => {
            pen.ring(800, 1080, 60, 6)
                .line(770, 1005, 830, 1005, 6)
                .line(800, 1020, 800, 1140, 6);
        }
        // Bear: heavier bottom arc
        (Major::TheMacro, 1) => {
            pen.ring(800, 1080, 60, 8).ring(800, 1080, 60, 6);
        }
        // Bull: heavier top arc
        (Major::TheMacro, 2) => {
            pen.ring(800, 1080, 60, 8);
        }
        // Black Swan: off-axis dot
        (Major::TheMacro, _) => {
            pen.ring(800, 1080, 60, 6).dot(845, 1035, 6);
        }

        // Take Profit: top tick
        (Major::Discipline, 0) => {
            pen.rect(730, 1020, 140, 140, 6, false).dot(800, 1020, 5);
        }
        // Size: inner frame
        (Major::Discipline, 1) => {
            pen.rect(730, 1020, 140, 140, 6, false)
                .rect(750, 1040, 100, 100, 6, false);
        }
        // Strategy: grid
        (Major::Discipline, 2) => {
            pen.rect(730, 1020, 140, 140, 6, false)
                .line(800, 1020, 800, 1160, 6)
                .line(730, 1090, 870, 1090, 6);
        }
        // Sideline: missing right edge
        (Major::Discipline, _) => {
            pen.line(730, 1020, 870, 1020, 6)
                .line(730, 1020, 730, 1160, 6)
                .line(730, 1160, 870, 1160, 6);
        }

        // BTFD: inverted wedge at the base
        (Major::Fomo, 0) => {
            pen.polygon(&tri_up(800, 1080, 80), 6, false)
                .polygon(&tri_down(800, 1160, 26), 6, false);
        }
        // Top Signal: dot at the apex
        (Major::Fomo, 1) => {
            pen.polygon(&tri_up(800, 1080, 80), 6, false).dot(800, 1000, 6);
        }
        // Market Price: midline
        (Major::Fomo, 2) => {
            pen.polygon(&tri_up(800, 1080, 80), 6, false)
                .line(760, 1115, 840, 1115, 6);
        }
        // Conviction: double outline
        (Major::Fomo, _) => {
            pen.polygon(&tri_up(800, 1080, 80), 6, false)
                .polygon(&tri_up(800, 1080, 66), 6, false);
        }

        // Shills: side notches
        (Major::Fud, 0) => {
            pen.polygon(&tri_down(800, 1080, 80), 6, false)
                .line(740, 1080, 750, 1080, 6)
                .line(850, 1080, 860, 1080, 6);
        }
        // PsyOps: split base
        (Major::Fud, 1) => {
            pen.polygon(&tri_down(800, 1080, 80), 6, false)
                .line(760, 1000, 790, 1000, 6)
                .line(810, 1000, 840, 1000, 6);
        }
        // Rugs: trapdoor at the tip
        (Major::Fud, 2) => {
            pen.polygon(&tri_down(800, 1080, 80), 6, false)
                .rect(796, 1160, 8, 10, 6, true);
        }
        // Scam: hollow ghost
        (Major::Fud, _) => {
            pen.polygon(&tri_down(800, 1080, 80), 6, false)
                .polygon(&tri_down(800, 1080, 60), 4, false);
        }

        // Mints: top row only
        (Major::Rng, 0) => {
            pen.dot(780, 1020, 7).dot(820, 1020, 7);
        }
        // Order Routing: left column
        (Major::Rng, 1) => {
            pen.dot(780, 1020, 7).dot(780, 1080, 7).dot(780, 1140, 7);
        }
        // Uptime: right column
        (Major::Rng, 2) => {
            pen.dot(820, 1020, 7).dot(820, 1080, 7).dot(820, 1140, 7);
        }
        // Prediction: diagonal
        (Major::Rng, _) => {
            pen.dot(780, 1020, 7).dot(800, 1080, 7).dot(820, 1140, 7);
        }

        // Too Early: cross shifted up
        (Major::MaxPain, 0) => {
            pen.line(740, 1000, 860, 1120, 6).line(860, 1000, 740, 1120, 6);
        }
        // Too Late: cross shifted down
        (Major::MaxPain, 1) => {
            pen.line(740, 1040, 860, 1160, 6).line(860, 1040, 740, 1160, 6);
        }
        // Too Little: small cross
        (Major::MaxPain, 2) => {
            pen.line(770, 1050, 830, 1110, 6).line(830, 1050, 770, 1110, 6);
        }
        // Too Much: cross with centre dot
        (Major::MaxPain, _) => {
            pen.line(740, 1020, 860, 1140, 6)
                .line(860, 1020, 740, 1140, 6)
                .dot(800, 1080, 8);
        }

        // Alpha: thicker top bar
        (Major::TheChat, 0) => {
            pen.dot(800, 1000, 6)
                .line(750, 1060, 850, 1060, 10)
                .line(750, 1100, 850, 1100, 6);
        }
        // Slop: wavy bottom
        (Major::TheChat, 1) => {
            pen.dot(800, 1000, 6)
                .line(750, 1060, 850, 1060, 6)
                .polyline(&[750, 1100, 770, 1110, 790, 1095, 810, 1110, 830, 1095, 850, 1110], 6);
        }
        // In: chevron entering from the left
        (Major::TheChat, 2) => {
            pen.line(750, 1060, 850, 1060, 6)
                .line(750, 1100, 850, 1100, 6)
                .polygon(&arrow_right(750, 1060, 10), 6, true);
        }
        // Out: chevron leaving to the right
        (Major::TheChat, _) => {
            pen.line(750, 1060, 850, 1060, 6)
                .line(750, 1100, 850, 1100, 6)
                .polygon(&arrow_left(850, 1060, 10), 6, true);
        }

        // Touch Grass: eye without pupil
        (Major::Ego, 0) => {
            pen.polygon(&diamond(800, 1080, 70), 6, false);
        }
        // Hyperliquid: halo
        (Major::Ego, 1) => {
            pen.ring(800, 1080, 84, 6)
                .polygon(&diamond(800, 1080, 70), 6, false)
                .dot(800, 1080, 6);
        }
        // Family: two side dots
        (Major::Ego, 2) => {
            pen.polygon(&diamond(800, 1080, 70), 6, false)
                .dot(760, 1080, 6)
                .dot(840, 1080, 6);
        }
        // Needs: a dot on every corner
        (Major::Ego, _) => {
            let d = diamond(800, 1080, 70);
            pen.polygon(&d, 6, false);
            for corner in d.chunks_exact(2) {
                pen.dot(corner[0], corner[1], 6);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_layout_draws_something_in_its_color() {
        for major in Major::ALL {
            let markup = render_major_glyph(major, "#123456");
            assert!(markup.contains("#123456"), "{major} has no markup");
            for minor in major.minors() {
                let markup = render_minor_glyph(minor, "#123456");
                assert!(markup.contains("#123456"), "{major}/{minor} has no markup");
                assert!(!markup.contains("#111"), "{major}/{minor} leaked placeholder ink");
            }
        }
    }

    #[test]
    fn minor_layouts_are_distinct_within_each_major() {
        for major in Major::ALL {
            let mut seen: Vec<String> = major
                .minors()
                .iter()
                .map(|minor| render_minor_glyph(*minor, "#000000"))
                .collect();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), 4, "{major} repeats a minor layout");
        }
    }

    #[test]
    fn output_is_stable() {
        let minor = Minor::from_ids(11, 3).unwrap();
        assert_eq!(
            render_minor_glyph(minor, "#88b0ff"),
            render_minor_glyph(minor, "#88b0ff")
        );
        assert_eq!(
            render_minor_glyph(minor, "#88b0ff").matches("<circle").count(),
            4
        );
    }
}
