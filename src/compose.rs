// this_file: src/compose.rs

//! Image composer: merges palette, glyphs and punches into one SVG document.
//!
//! The document layout is fixed: a full-canvas background, a rounded tablet
//! frame, the glyph group, the punch group translated to the diamond origin
//! and two text labels. Elements are written one per line, joined with `\n`,
//! with no trailing newline.

use crate::arcana::{Major, Minor};
use crate::error::{Error, Result};
use crate::glyphs::{render_major_glyph, render_minor_glyph};
use crate::materials::{Material, MaterialCatalog};
use crate::punch::{layout_punches, PunchSlot, MAX_PUNCHES, PUNCH_SIZE};
use crate::rarity::{pick_material_from, punch_count};
use crate::seed::Seed;
use log::trace;
use serde::Serialize;
use std::fmt::Write;

/// Canvas width in SVG user units.
pub const CANVAS_WIDTH: i32 = 1000;

/// Canvas height in SVG user units.
pub const CANVAS_HEIGHT: i32 = 1400;

/// Origin of the punch group.
pub const PUNCH_ORIGIN: (i32, i32) = (500, 700);

const FRAME_STROKE_WIDTH: i32 = 6;

/// Everything needed to draw one token. Built only through validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenAttributes {
    minor: Minor,
    material_id: u32,
    punch_count: u8,
    seed: Seed,
}

/// Flat, serializable view of [`TokenAttributes`].
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AttributeRecord<'a> {
    major_id: u32,
    minor_id: u32,
    material_id: u32,
    punch_count: u8,
    seed: &'a str,
}

impl Serialize for TokenAttributes {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        AttributeRecord {
            major_id: self.major().id(),
            minor_id: self.minor.id(),
            material_id: self.material_id,
            punch_count: self.punch_count,
            seed: self.seed.as_str(),
        }
        .serialize(serializer)
    }
}

impl TokenAttributes {
    /// Validate raw ids against the category catalog and `catalog`.
    pub fn new(
        major_id: u32,
        minor_id: u32,
        material_id: u32,
        punch_count: u8,
        seed: Seed,
        catalog: &MaterialCatalog,
    ) -> Result<Self> {
        let minor = Minor::from_ids(major_id, minor_id)?;
        catalog.get(material_id)?;
        if punch_count > MAX_PUNCHES {
            return Err(Error::InvalidTokenAttributes {
                reason: format!("punch count {punch_count} exceeds {MAX_PUNCHES}"),
            });
        }
        Ok(Self {
            minor,
            material_id,
            punch_count,
            seed,
        })
    }

    /// Derive material (unless overridden) and punch count from `seed`.
    pub fn from_seed(
        seed: Seed,
        major_id: u32,
        minor_id: u32,
        material_override: Option<u32>,
        catalog: &MaterialCatalog,
    ) -> Result<Self> {
        let material_id = match material_override {
            Some(id) => id,
            None => pick_material_from(catalog, &seed).id,
        };
        let punches = punch_count(&seed);
        Self::new(major_id, minor_id, material_id, punches, seed, catalog)
    }

    pub fn major(&self) -> Major {
        self.minor.major()
    }

    pub fn minor(&self) -> Minor {
        self.minor
    }

    pub fn material_id(&self) -> u32 {
        self.material_id
    }

    pub fn punch_count(&self) -> u8 {
        self.punch_count
    }

    pub fn seed(&self) -> &Seed {
        &self.seed
    }
}

/// Render `attributes` with colors from `catalog`.
pub fn render(attributes: &TokenAttributes, catalog: &MaterialCatalog) -> Result<String> {
    let material = catalog.get(attributes.material_id)?;
    let layout = layout_punches(&attributes.seed, attributes.punch_count);
    trace!(
        "Rendering seed {} ({} / {}) in {} with {:?}",
        attributes.seed,
        attributes.major(),
        attributes.minor,
        material.name,
        layout.placement
    );

    let stroke = material.stroke_color.as_str();
    let mut lines: Vec<String> = Vec::with_capacity(40);
    lines.push(format!(
        r#"<svg viewBox="0 0 {CANVAS_WIDTH} {CANVAS_HEIGHT}" xmlns="http://www.w3.org/2000/svg">"#
    ));
    lines.push(format!(
        r#"<rect width="{CANVAS_WIDTH}" height="{CANVAS_HEIGHT}" fill="{}"/>"#,
        material.background_color
    ));
    lines.push(format!(
        r#"<rect x="100" y="150" width="800" height="1100" rx="40" ry="40" fill="{}" stroke="{stroke}" stroke-width="{FRAME_STROKE_WIDTH}"/>"#,
        material.background_color
    ));

    lines.push(format!(
        r#"<g stroke="{stroke}" stroke-width="{FRAME_STROKE_WIDTH}" fill="none">"#
    ));
    lines.push(render_major_glyph(attributes.major(), stroke));
    lines.push(render_minor_glyph(attributes.minor, stroke));
    lines.push("</g>".to_string());

    let (ox, oy) = PUNCH_ORIGIN;
    lines.push(format!(r#"<g transform="translate({ox}, {oy})">"#));
    lines.extend(layout.slots.iter().map(|slot| punch_markup(slot, stroke)));
    lines.push("</g>".to_string());

    lines.extend(labels(material));
    lines.push("</svg>".to_string());
    Ok(lines.join("\n"))
}

/// Validate raw inputs and render with the built-in catalog.
pub fn render_seeded(seed: &Seed, major_id: u32, minor_id: u32, material_id: Option<u32>) -> Result<String> {
    render_seeded_with(MaterialCatalog::builtin(), seed, major_id, minor_id, material_id)
}

/// Validate raw inputs and render with `catalog`.
pub fn render_seeded_with(
    catalog: &MaterialCatalog,
    seed: &Seed,
    major_id: u32,
    minor_id: u32,
    material_id: Option<u32>,
) -> Result<String> {
    let attributes = TokenAttributes::from_seed(seed.clone(), major_id, minor_id, material_id, catalog)?;
    render(&attributes, catalog)
}

fn punch_markup(slot: &PunchSlot, stroke: &str) -> String {
    let (ox, oy) = PUNCH_ORIGIN;
    let x = slot.x - ox;
    let y = slot.y - oy;
    let half = PUNCH_SIZE / 2;
    let fill = if slot.filled { stroke } else { "none" };
    let opacity = if slot.filled { "0.8" } else { "0.3" };
    let mut out = String::with_capacity(200);
    let _ = write!(
        out,
        r#"<rect x="{x}" y="{y}" width="{PUNCH_SIZE}" height="{PUNCH_SIZE}" fill="{fill}" stroke="{stroke}" stroke-width="1" transform="rotate({} {} {})" opacity="{opacity}"/>"#,
        slot.rotation_degrees,
        x + half,
        y + half
    );
    out
}

fn labels(material: &Material) -> [String; 2] {
    [
        format!(
            r#"<text x="500" y="1300" font-family="JetBrains Mono, monospace" font-size="24" font-weight="500" fill="{}" text-anchor="middle">{}</text>"#,
            material.stroke_color,
            material.name.to_uppercase()
        ),
        format!(
            r#"<text x="500" y="1330" font-family="Inter, sans-serif" font-size="16" fill="{}" text-anchor="middle" opacity="0.7">{}</text>"#,
            material.stroke_color,
            material.tier.label()
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(text: &str) -> Seed {
        Seed::new(text).unwrap()
    }

    #[test]
    fn render_is_deterministic() {
        let s = seed("0x1234567890abcdef");
        let a = render_seeded(&s, 1, 0, None).unwrap();
        let b = render_seeded(&seed("0x1234567890abcdef"), 1, 0, None).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn document_structure() {
        let svg = render_seeded(&seed("0x1234567890abcdef"), 1, 0, None).unwrap();
        assert!(svg.starts_with("<svg viewBox=\"0 0 1000 1400\""));
        assert!(svg.ends_with("</svg>"));
        assert!(!svg.ends_with('\n'));
        assert_eq!(svg.matches("width=\"12\" height=\"12\"").count(), 25);
        assert_eq!(svg.matches("opacity=\"0.8\"").count(), 21);
        assert!(svg.contains(">SAPPHIRE</text>"));
        assert!(svg.contains(">Ultra Rare</text>"));
        assert!(svg.contains("fill=\"#143a8a\""));
    }

    #[test]
    fn material_override_wins_over_the_draw() {
        let svg = render_seeded(&seed("0x1234567890abcdef"), 1, 0, Some(22)).unwrap();
        assert!(svg.contains(">GOLD</text>"));
        assert!(svg.contains(">Mythic</text>"));
    }

    #[test]
    fn invalid_ids_are_rejected() {
        let s = seed("x");
        assert!(matches!(
            render_seeded(&s, 12, 0, None),
            Err(Error::InvalidCategoryId { kind: "major", .. })
        ));
        assert!(matches!(
            render_seeded(&s, 0, 4, None),
            Err(Error::InvalidCategoryId { kind: "minor", .. })
        ));
        assert!(matches!(
            render_seeded(&s, 0, 0, Some(24)),
            Err(Error::InvalidMaterialId { id: 24, count: 24 })
        ));
    }

    #[test]
    fn punch_count_above_limit_is_rejected() {
        let err = TokenAttributes::new(0, 0, 0, 26, seed("x"), MaterialCatalog::builtin()).unwrap_err();
        assert!(matches!(err, Error::InvalidTokenAttributes { .. }));
    }

    #[test]
    fn attributes_serialize_flat() {
        let attrs =
            TokenAttributes::from_seed(seed("0x1234567890abcdef"), 1, 0, None, MaterialCatalog::builtin())
                .unwrap();
        let json = serde_json::to_value(&attrs).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "majorId": 1,
                "minorId": 0,
                "materialId": 19,
                "punchCount": 21,
                "seed": "0x1234567890abcdef"
            })
        );
    }

    #[test]
    fn categories_do_not_affect_selection() {
        let s = seed("independence");
        let base = TokenAttributes::from_seed(s.clone(), 0, 0, None, MaterialCatalog::builtin()).unwrap();
        for major in 0..12 {
            for minor in 0..4 {
                let other =
                    TokenAttributes::from_seed(s.clone(), major, minor, None, MaterialCatalog::builtin())
                        .unwrap();
                assert_eq!(other.material_id(), base.material_id());
                assert_eq!(other.punch_count(), base.punch_count());
            }
        }
    }
}
