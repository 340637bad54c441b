// this_file: src/punch.rs

//! Punch layout engine.
//!
//! Twenty-five punch slots are laid out in a diamond around the canvas
//! centre. One global transform (a rotation from a fixed integer table plus a
//! small jitter) is chosen per seed by trying up to [`MAX_ATTEMPTS`]
//! deterministic candidates and keeping the first one under which every
//! filled slot stays inside the tablet and clear of both glyph zones. When
//! no candidate passes, the untransformed diamond is used as is. Each slot
//! also gets a cosmetic rotation that is applied only when drawing.
//!
//! The untransformed diamond is not itself clear: slot 6 at (380, 570)
//! touches [`MAJOR_ZONE`]. Minted artwork already carries that overlap for
//! every fallback render with seven or more punches, so it is kept.
//!
//! All geometry is integer arithmetic. Rotation uses cos/sin scaled by 10 000
//! and floor division, so results are identical on every platform.

use crate::seed::Seed;
use log::{debug, trace};
use serde::Serialize;

/// Number of punch slots always computed.
pub const SLOT_COUNT: usize = 25;

/// Highest punch count.
pub const MAX_PUNCHES: u8 = SLOT_COUNT as u8;

/// Candidate transforms tried before falling back.
pub const MAX_ATTEMPTS: u32 = 10;

/// Side length of a punch square.
pub const PUNCH_SIZE: i32 = 12;

const HALF: i32 = PUNCH_SIZE / 2;

const BASE_X: [i32; SLOT_COUNT] = [
    500, 460, 540, 420, 500, 580, 380, 460, 540, 620, 340, 420, 500, 580, 660, 380, 460, 540, 620,
    420, 500, 580, 460, 540, 500,
];
const BASE_Y: [i32; SLOT_COUNT] = [
    420, 470, 470, 520, 520, 520, 570, 570, 570, 570, 620, 620, 620, 620, 620, 670, 670, 670, 670,
    720, 720, 720, 770, 770, 820,
];

/// Rotation pivot: centre of the middle row.
pub const PIVOT: (i32, i32) = (500, 620);

/// Rotation table in degrees with cos/sin scaled by 10 000.
pub const ANGLES_DEG: [i32; 7] = [-12, -8, -4, 0, 4, 8, 12];
const COS_1E4: [i64; 7] = [9781, 9903, 9976, 10000, 9976, 9903, 9781];
const SIN_1E4: [i64; 7] = [-2079, -1392, -698, 0, 698, 1392, 2079];

const JITTER_NONCE_OFFSET: u32 = 33;
const JITTER_SALT_X: u32 = 0xF17E;
const JITTER_SALT_Y: u32 = 0x1234;

/// Axis-aligned rectangle with inclusive edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    /// Box of a punch centred on `(x, y)`.
    pub fn punch_at(x: i32, y: i32) -> Self {
        Self {
            x1: x - HALF,
            y1: y - HALF,
            x2: x + HALF,
            y2: y + HALF,
        }
    }

    /// Overlap test; touching edges count as overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.x2 < other.x1 || other.x2 < self.x1 || self.y2 < other.y1 || other.y2 < self.y1)
    }

    /// True when `other` lies within `self`, edges included.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x1 >= self.x1 && other.y1 >= self.y1 && other.x2 <= self.x2 && other.y2 <= self.y2
    }
}

/// Tablet interior punches must stay inside.
pub const TABLET_BOUNDS: Rect = Rect {
    x1: 140,
    y1: 190,
    x2: 860,
    y2: 1210,
};

/// Reserved zone around the major glyph.
pub const MAJOR_ZONE: Rect = Rect {
    x1: 200,
    y1: 320,
    x2: 390,
    y2: 600,
};

/// Reserved zone around the minor glyph.
pub const MINOR_ZONE: Rect = Rect {
    x1: 690,
    y1: 970,
    x2: 870,
    y2: 1190,
};

/// One punch position in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PunchSlot {
    pub x: i32,
    pub y: i32,
    /// Cosmetic rotation in degrees (-10..=9), draw-time only
    pub rotation_degrees: i32,
    pub filled: bool,
}

/// How the final transform was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    /// Candidate `attempt` was accepted.
    Candidate {
        attempt: u32,
        angle_degrees: i32,
        dx: i32,
        dy: i32,
    },
    /// No candidate passed; the untransformed diamond is used.
    Base,
}

/// Result of a layout run: 25 slots and how they were placed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PunchLayout {
    pub slots: [PunchSlot; SLOT_COUNT],
    pub placement: Placement,
}

impl PunchLayout {
    /// Filled slots, in canonical order.
    pub fn filled(&self) -> impl Iterator<Item = &PunchSlot> {
        self.slots.iter().filter(|slot| slot.filled)
    }

    /// Number of filled slots.
    pub fn punch_count(&self) -> usize {
        self.filled().count()
    }
}

/// Base (untransformed) slot centres.
pub fn base_slots() -> [(i32, i32); SLOT_COUNT] {
    std::array::from_fn(|i| (BASE_X[i], BASE_Y[i]))
}

/// A slot box is acceptable when it lies in the tablet and clear of both zones.
pub fn slot_is_clear(x: i32, y: i32) -> bool {
    let rect = Rect::punch_at(x, y);
    TABLET_BOUNDS.contains(&rect) && !rect.overlaps(&MAJOR_ZONE) && !rect.overlaps(&MINOR_ZONE)
}

#[derive(Clone, Copy, Debug)]
struct Transform {
    angle_index: usize,
    dx: i32,
    dy: i32,
}

impl Transform {
    const IDENTITY: Transform = Transform {
        angle_index: 3,
        dx: 0,
        dy: 0,
    };

    fn apply(&self, x0: i32, y0: i32) -> (i32, i32) {
        let (cx, cy) = PIVOT;
        let cos = COS_1E4[self.angle_index];
        let sin = SIN_1E4[self.angle_index];
        let ox = i64::from(x0 - cx);
        let oy = i64::from(y0 - cy);
        // |offset| <= 200 and |cos|, |sin| <= 10 000, so the quotient fits i32
        let xr = cx + (ox * cos - oy * sin).div_euclid(10_000) as i32;
        let yr = cy + (ox * sin + oy * cos).div_euclid(10_000) as i32;
        (xr + self.dx, yr + self.dy)
    }

    fn accepts(&self, punch_count: usize) -> bool {
        (0..punch_count.min(SLOT_COUNT)).all(|i| {
            let (x, y) = self.apply(BASE_X[i], BASE_Y[i]);
            slot_is_clear(x, y)
        })
    }
}

/// Jitter component in -18..=18 from one hash.
fn jitter_component(hash: u32) -> i32 {
    let centred = (hash % 256) as i32 - 128;
    centred % 19
}

fn candidate(seed: &Seed, attempt: u32) -> Transform {
    let angle_index = (seed.hash_with(attempt) % ANGLES_DEG.len() as u32) as usize;
    let nonce = attempt + JITTER_NONCE_OFFSET;
    let dx = jitter_component(seed.hash_with(format!("{nonce}{JITTER_SALT_X}")));
    let dy = jitter_component(seed.hash_with(format!("{nonce}{JITTER_SALT_Y}")));
    Transform {
        angle_index,
        dx,
        dy,
    }
}

/// Cosmetic per-slot rotation in degrees (-10..=9).
pub fn slot_rotation(seed: &Seed, index: usize) -> i32 {
    (seed.hash_with(format!("{index}rot")) % 20) as i32 - 10
}

/// Choose the global transform for `punch_count` filled slots.
fn choose_transform(seed: &Seed, punch_count: usize) -> (Transform, Placement) {
    for attempt in 0..MAX_ATTEMPTS {
        let transform = candidate(seed, attempt);
        if transform.accepts(punch_count) {
            trace!(
                "Seed {seed}: attempt {attempt} accepted (angle {}, jitter {},{})",
                ANGLES_DEG[transform.angle_index],
                transform.dx,
                transform.dy
            );
            return (
                transform,
                Placement::Candidate {
                    attempt,
                    angle_degrees: ANGLES_DEG[transform.angle_index],
                    dx: transform.dx,
                    dy: transform.dy,
                },
            );
        }
    }

    if Transform::IDENTITY.accepts(punch_count) {
        debug!("Seed {seed}: no candidate accepted, using base layout");
    } else {
        debug!("Seed {seed}: no candidate accepted, base layout clips slot 6");
    }
    (Transform::IDENTITY, Placement::Base)
}

/// Lay out all 25 punch slots for `seed`; the first `punch_count` are filled.
///
/// Counts above 25 are clamped; callers validate counts before this point.
pub fn layout_punches(seed: &Seed, punch_count: u8) -> PunchLayout {
    let punch_count = usize::from(punch_count.min(MAX_PUNCHES));
    let (transform, placement) = choose_transform(seed, punch_count);

    let slots = std::array::from_fn(|i| {
        let (x, y) = transform.apply(BASE_X[i], BASE_Y[i]);
        PunchSlot {
            x,
            y,
            rotation_degrees: slot_rotation(seed, i),
            filled: i < punch_count,
        }
    });

    PunchLayout { slots, placement }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(text: &str) -> Seed {
        Seed::new(text).unwrap()
    }

    #[test]
    fn base_layout_only_clips_slot_six() {
        let clipped: Vec<usize> = base_slots()
            .iter()
            .enumerate()
            .filter(|(_, &(x, y))| !slot_is_clear(x, y))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(clipped, vec![6]);
    }

    #[test]
    fn identity_transform_is_a_no_op() {
        for (x, y) in base_slots() {
            assert_eq!(Transform::IDENTITY.apply(x, y), (x, y));
        }
    }

    #[test]
    fn rotation_uses_floor_division() {
        let t = Transform {
            angle_index: 0,
            dx: 0,
            dy: 0,
        };
        // (-120, -50) rotated by -12 degrees: floor(-127.767) and floor(-23.957)
        assert_eq!(t.apply(380, 570), (372, 596));
        let t = Transform {
            angle_index: 6,
            dx: 0,
            dy: 0,
        };
        assert_eq!(t.apply(380, 570), (393, 546));
    }

    #[test]
    fn jitter_stays_in_range() {
        for hash in [0u32, 127, 128, 255, 256, 1 << 31, u32::MAX] {
            let j = jitter_component(hash);
            assert!((-18..=18).contains(&j), "{hash} -> {j}");
        }
        assert_eq!(jitter_component(0), -128 % 19);
    }

    #[test]
    fn zero_punches_accept_the_first_candidate() {
        let layout = layout_punches(&seed("12345"), 0);
        assert_eq!(
            layout.placement,
            Placement::Candidate {
                attempt: 0,
                angle_degrees: 8,
                dx: -11,
                dy: -18
            }
        );
        assert_eq!(layout.punch_count(), 0);
    }

    #[test]
    fn known_seeds_pick_known_candidates() {
        let layout = layout_punches(&seed("hello"), 23);
        assert_eq!(
            layout.placement,
            Placement::Candidate {
                attempt: 8,
                angle_degrees: 4,
                dx: 18,
                dy: 3
            }
        );
        let layout = layout_punches(&seed("a"), 22);
        assert_eq!(
            layout.placement,
            Placement::Candidate {
                attempt: 9,
                angle_degrees: 8,
                dx: 11,
                dy: 15
            }
        );
    }

    #[test]
    fn golden_seed_falls_back_to_the_plain_diamond() {
        let layout = layout_punches(&seed("0x1234567890abcdef"), 21);
        assert_eq!(layout.placement, Placement::Base);
        for (slot, (x, y)) in layout.slots.iter().zip(base_slots()) {
            assert_eq!((slot.x, slot.y), (x, y));
        }
        assert_eq!(layout.punch_count(), 21);
    }

    #[test]
    fn fallback_keeps_slot_six_where_minted_art_has_it() {
        let layout = layout_punches(&seed("0x1234567890abcdef"), 7);
        assert_eq!(layout.placement, Placement::Base);
        let slot = layout.slots[6];
        assert!(slot.filled);
        assert_eq!((slot.x, slot.y), (380, 570));
        assert!(!slot_is_clear(slot.x, slot.y));
    }

    #[test]
    fn accepted_candidates_respect_zones() {
        for text in ["0x1234567890abcdef", "hello", "a", "12345", "omamori"] {
            let s = seed(text);
            for count in 0..=MAX_PUNCHES {
                let layout = layout_punches(&s, count);
                if layout.placement == Placement::Base {
                    continue;
                }
                for slot in layout.filled() {
                    assert!(slot_is_clear(slot.x, slot.y), "{text}/{count}: {slot:?}");
                }
            }
        }
    }

    #[test]
    fn slot_rotation_range() {
        let s = seed("rotation");
        for i in 0..SLOT_COUNT {
            assert!((-10..=9).contains(&slot_rotation(&s, i)));
        }
    }

    #[test]
    fn rect_overlap_counts_touching_edges() {
        let a = Rect::punch_at(396, 400);
        assert!(a.overlaps(&MAJOR_ZONE));
        let b = Rect::punch_at(397, 400);
        assert!(!b.overlaps(&MAJOR_ZONE));
    }
}
