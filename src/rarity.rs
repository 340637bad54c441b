// this_file: src/rarity.rs

//! Seed-driven selectors (material, punch count) and distribution checks.
//!
//! Both selectors depend on the seed text alone. Nothing the minter controls
//! besides the seed (payment amount, chosen categories) feeds them.

use crate::materials::{Material, MaterialCatalog, Tier};
use crate::punch::MAX_PUNCHES;
use crate::seed::Seed;
use log::warn;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use rayon::prelude::*;
use serde::Serialize;

/// Component suffix for the punch count draw.
pub const PUNCH_COMPONENT: &str = "PUNCH";

const HASH_RANGE: f64 = 2_147_483_648.0;
const SAMPLE_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SAMPLE_SEED_LEN: usize = 13;

/// Pick a material from the built-in catalog.
pub fn pick_material(seed: &Seed) -> &'static Material {
    pick_material_from(MaterialCatalog::builtin(), seed)
}

/// Pick a material by weighted draw over `catalog` in catalog order.
pub fn pick_material_from<'a>(catalog: &'a MaterialCatalog, seed: &Seed) -> &'a Material {
    let fraction = f64::from(seed.hash()) / HASH_RANGE;
    let mut remaining = fraction * catalog.total_weight() as f64;
    for material in catalog.materials() {
        remaining -= material.weight as f64;
        if remaining <= 0.0 {
            return material;
        }
    }
    warn!("Weighted draw for seed {seed} overran the catalog; using first material");
    &catalog.materials()[0]
}

/// Punch count in `0..=25` from the namespaced seed.
pub fn punch_count(seed: &Seed) -> u8 {
    let draw = crate::seed::hash_code(&seed.derive(PUNCH_COMPONENT));
    (draw % (u32::from(MAX_PUNCHES) + 1)) as u8
}

/// Reproducible pseudo-random seeds: 13 base-36 characters each.
pub fn sample_seeds(count: usize, rng_seed: u64) -> Vec<Seed> {
    let mut rng = Pcg64::seed_from_u64(rng_seed);
    (0..count)
        .map(|_| {
            let text: String = (0..SAMPLE_SEED_LEN)
                .map(|_| char::from(SAMPLE_ALPHABET[rng.gen_range(0..SAMPLE_ALPHABET.len())]))
                .collect();
            Seed::from_trusted(text)
        })
        .collect()
}

/// Observed vs expected share for one material.
#[derive(Clone, Debug, Serialize)]
pub struct MaterialShare {
    pub id: u32,
    pub name: String,
    pub tier: Tier,
    pub count: u64,
    pub observed: f64,
    pub expected: f64,
}

/// Observed vs expected share for one tier.
#[derive(Clone, Debug, Serialize)]
pub struct TierShare {
    pub tier: Tier,
    pub count: u64,
    pub observed: f64,
    pub expected: f64,
}

/// Tallies of both selectors over a seed sample.
#[derive(Clone, Debug, Serialize)]
pub struct Distribution {
    pub samples: usize,
    pub materials: Vec<MaterialShare>,
    pub tiers: Vec<TierShare>,
    /// Count of each punch count, indexed 0..=25
    pub punch_counts: Vec<u64>,
}

#[derive(Clone)]
struct Tally {
    materials: Vec<u64>,
    punches: Vec<u64>,
}

impl Tally {
    fn new(material_count: usize) -> Self {
        Self {
            materials: vec![0; material_count],
            punches: vec![0; usize::from(MAX_PUNCHES) + 1],
        }
    }

    fn merge(mut self, other: Tally) -> Self {
        for (a, b) in self.materials.iter_mut().zip(other.materials) {
            *a += b;
        }
        for (a, b) in self.punches.iter_mut().zip(other.punches) {
            *a += b;
        }
        self
    }
}

impl Distribution {
    /// Run both selectors over `seeds` in parallel.
    pub fn measure(catalog: &MaterialCatalog, seeds: &[Seed]) -> Self {
        let n = catalog.len();
        let tally = seeds
            .par_iter()
            .fold(
                || Tally::new(n),
                |mut tally, seed| {
                    tally.materials[pick_material_from(catalog, seed).id as usize] += 1;
                    tally.punches[usize::from(punch_count(seed))] += 1;
                    tally
                },
            )
            .reduce(|| Tally::new(n), Tally::merge);

        let samples = seeds.len();
        let share = |count: u64| {
            if samples == 0 {
                0.0
            } else {
                count as f64 / samples as f64
            }
        };

        let materials: Vec<MaterialShare> = catalog
            .materials()
            .iter()
            .zip(&tally.materials)
            .map(|(material, &count)| MaterialShare {
                id: material.id,
                name: material.name.clone(),
                tier: material.tier,
                count,
                observed: share(count),
                expected: catalog.expected_share(material),
            })
            .collect();

        let tiers = Tier::ALL
            .iter()
            .map(|&tier| {
                let count = materials
                    .iter()
                    .filter(|m| m.tier == tier)
                    .map(|m| m.count)
                    .sum();
                TierShare {
                    tier,
                    count,
                    observed: share(count),
                    expected: catalog.tier_share(tier),
                }
            })
            .collect();

        Self {
            samples,
            materials,
            tiers,
            punch_counts: tally.punches,
        }
    }

    /// Largest absolute gap between observed and expected material share.
    pub fn max_material_deviation(&self) -> f64 {
        self.materials
            .iter()
            .map(|m| (m.observed - m.expected).abs())
            .fold(0.0, f64::max)
    }

    /// Largest absolute gap between observed punch share and 1/26.
    pub fn max_punch_deviation(&self) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        let expected = 1.0 / self.punch_counts.len() as f64;
        self.punch_counts
            .iter()
            .map(|&c| (c as f64 / self.samples as f64 - expected).abs())
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(text: &str) -> Seed {
        Seed::new(text).unwrap()
    }

    #[test]
    fn golden_seed_selects_sapphire() {
        let s = seed("0x1234567890abcdef");
        let material = pick_material(&s);
        assert_eq!(material.id, 19);
        assert_eq!(material.name, "Sapphire");
        assert_eq!(material.tier, Tier::UltraRare);
        assert_eq!(punch_count(&s), 21);
    }

    #[test]
    fn known_punch_counts() {
        assert_eq!(punch_count(&seed("hello")), 23);
        assert_eq!(punch_count(&seed("12345")), 0);
        assert_eq!(punch_count(&seed("fair_preview_5_2_0_1700000000000")), 17);
    }

    #[test]
    fn low_hash_selects_first_material() {
        assert_eq!(pick_material(&seed("hello")).id, 0);
        assert_eq!(pick_material(&seed("a")).id, 0);
    }

    #[test]
    fn max_hash_selects_a_real_material() {
        // hash folds i32::MIN to 2^31, so the fraction reaches exactly 1.0
        let s = seed("polygenelubricants");
        assert_eq!(s.hash(), 1 << 31);
        assert_eq!(pick_material(&s).name, "Meteorite");
    }

    #[test]
    fn selection_follows_content_not_identity() {
        let a = seed(&format!("{}{}", "fair_preview_", "1"));
        let b = seed("fair_preview_1");
        assert_eq!(pick_material(&a).id, pick_material(&b).id);
        assert_eq!(punch_count(&a), punch_count(&b));
    }

    #[test]
    fn sampled_seeds_are_reproducible() {
        let a = sample_seeds(16, 7);
        let b = sample_seeds(16, 7);
        assert_eq!(a, b);
        assert_ne!(a, sample_seeds(16, 8));
        assert!(a.iter().all(|s| s.as_str().len() == 13));
    }

    #[test]
    fn measure_counts_every_sample() {
        let seeds = sample_seeds(2_000, 1);
        let dist = Distribution::measure(MaterialCatalog::builtin(), &seeds);
        assert_eq!(dist.samples, 2_000);
        assert_eq!(dist.materials.iter().map(|m| m.count).sum::<u64>(), 2_000);
        assert_eq!(dist.tiers.iter().map(|t| t.count).sum::<u64>(), 2_000);
        assert_eq!(dist.punch_counts.iter().sum::<u64>(), 2_000);
        assert_eq!(dist.punch_counts.len(), 26);
    }

    #[test]
    fn empty_sample_reports_zero_shares() {
        let dist = Distribution::measure(MaterialCatalog::builtin(), &[]);
        assert_eq!(dist.samples, 0);
        assert_eq!(dist.max_punch_deviation(), 0.0);
        assert!(dist.materials.iter().all(|m| m.observed == 0.0));
    }
}
