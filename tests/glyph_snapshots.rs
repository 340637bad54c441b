// this_file: tests/glyph_snapshots.rs

use insta::assert_snapshot;
use omamori::{render_major_glyph, render_minor_glyph, Major, Minor};

const INK: &str = "#000000";

#[test]
fn leverage_major() {
    assert_snapshot!(
        render_major_glyph(Major::Leverage, INK),
        @r###"<line x1="230" y1="540" x2="360" y2="410" stroke="#000000" stroke-width="6"/><circle cx="285" cy="540" r="6" fill="#000000"/>"###
    );
}

#[test]
fn fomo_major() {
    assert_snapshot!(
        render_major_glyph(Major::Fomo, INK),
        @r###"<polygon points="300,380 390,560 210,560" stroke="#000000" stroke-width="6" fill="none"/>"###
    );
}

#[test]
fn margin_minor() {
    assert_snapshot!(
        render_minor_glyph(Minor::from_ids(1, 0).unwrap(), INK),
        @r###"<line x1="710" y1="1120" x2="850" y2="1000" stroke="#000000" stroke-width="6"/><circle cx="780" cy="1090" r="6" fill="#000000"/>"###
    );
}

#[test]
fn glyphs_follow_the_stroke_color() {
    for major in Major::ALL {
        let a = render_major_glyph(major, "#111111");
        let b = render_major_glyph(major, "#222222");
        assert_eq!(a.replace("#111111", "#222222"), b);
        for minor in major.minors() {
            let a = render_minor_glyph(minor, "#111111");
            let b = render_minor_glyph(minor, "#222222");
            assert_eq!(a.replace("#111111", "#222222"), b);
        }
    }
}
