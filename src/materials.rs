// this_file: src/materials.rs

//! Material catalog: the ordered, weighted palette that decides rarity.
//!
//! Catalog order is significant because the weighted selector walks it front
//! to back. The built-in catalog carries 24 materials whose weights sum to
//! exactly one billion; alternative catalogs can be loaded from JSON and go
//! through the same validation.

use crate::error::{Error, Result};
use crate::security::{validate_color, validate_label, MAX_CATALOG_SIZE};
use camino::Utf8Path;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Conceptual weight total used for percentage math.
pub const WEIGHT_SCALE: u64 = 1_000_000_000;

/// Rarity tier of a material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Common,
    Uncommon,
    Rare,
    #[serde(rename = "Ultra Rare", alias = "UltraRare")]
    UltraRare,
    Mythic,
}

impl Tier {
    /// All tiers from most to least common.
    pub const ALL: [Tier; 5] = [
        Tier::Common,
        Tier::Uncommon,
        Tier::Rare,
        Tier::UltraRare,
        Tier::Mythic,
    ];

    /// Display label, as printed on the artwork.
    pub fn label(self) -> &'static str {
        match self {
            Tier::Common => "Common",
            Tier::Uncommon => "Uncommon",
            Tier::Rare => "Rare",
            Tier::UltraRare => "Ultra Rare",
            Tier::Mythic => "Mythic",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One weighted material with its palette.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    /// Position in the catalog (0..N-1)
    pub id: u32,
    /// Display name
    pub name: String,
    /// Rarity tier
    pub tier: Tier,
    /// Selection weight (> 0)
    pub weight: u64,
    /// Background fill, `#rrggbb`
    pub background_color: String,
    /// Stroke and label color, `#rrggbb`
    pub stroke_color: String,
}

// (name, tier, weight, background, stroke)
const BUILTIN: [(&str, Tier, u64, &str, &str); 24] = [
    ("Wood", Tier::Common, 100_000_000, "#b78c55", "#6b4e2e"),
    ("Cloth", Tier::Common, 100_000_000, "#d9cbb2", "#7a6f60"),
    ("Paper", Tier::Common, 100_000_000, "#efe6d3", "#8b8373"),
    ("Clay", Tier::Common, 100_000_000, "#b0643a", "#6a3d26"),
    ("Limestone", Tier::Common, 100_000_000, "#cfc8b7", "#6f6a5c"),
    ("Slate", Tier::Uncommon, 41_666_667, "#4b4f59", "#b8bdc9"),
    ("Basalt", Tier::Uncommon, 41_666_667, "#3e3b3a", "#b3ada9"),
    ("Granite", Tier::Uncommon, 41_666_667, "#8b8e95", "#2e3138"),
    ("Marble", Tier::Uncommon, 41_666_667, "#e6e6ea", "#6e6e78"),
    ("Bronze", Tier::Uncommon, 41_666_666, "#8c6e3d", "#f1c277"),
    ("Obsidian", Tier::Uncommon, 41_666_666, "#111216", "#8f8f99"),
    ("Silver", Tier::Rare, 30_000_000, "#c0c0c0", "#5b5b5b"),
    ("Jade", Tier::Rare, 30_000_000, "#2f6e5b", "#a7e0cc"),
    ("Crystal/Quartz", Tier::Rare, 30_000_000, "#e8f2ff", "#7aa0c8"),
    ("Onyx", Tier::Rare, 30_000_000, "#1a1a1a", "#9c9c9c"),
    ("Amber", Tier::Rare, 30_000_000, "#c37a3a", "#ffd08a"),
    ("Amethyst", Tier::UltraRare, 12_500_000, "#5d3b8a", "#c8b1ff"),
    ("Opal", Tier::UltraRare, 12_500_000, "#d9ecff", "#9fd5ff"),
    ("Emerald", Tier::UltraRare, 12_500_000, "#1f7a44", "#9af0bf"),
    ("Sapphire", Tier::UltraRare, 12_500_000, "#143a8a", "#88b0ff"),
    ("Ruby", Tier::UltraRare, 12_500_000, "#8a1423", "#ff98a6"),
    ("Lapis Lazuli", Tier::UltraRare, 12_500_000, "#1b3b8a", "#c0d0ff"),
    ("Gold", Tier::Mythic, 12_500_000, "#d4af37", "#5a4b10"),
    ("Meteorite", Tier::Mythic, 12_500_000, "#5a5752", "#d7d3cc"),
];

/// Validated, immutable material catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialCatalog {
    materials: Vec<Material>,
    total_weight: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Wrapped { materials: Vec<Material> },
    Bare(Vec<Material>),
}

impl MaterialCatalog {
    /// The built-in 24-material catalog.
    pub fn builtin() -> &'static MaterialCatalog {
        static CATALOG: OnceLock<MaterialCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            let materials = BUILTIN
                .iter()
                .zip(0u32..)
                .map(|(&(name, tier, weight, bg, stroke), id)| Material {
                    id,
                    name: name.to_string(),
                    tier,
                    weight,
                    background_color: bg.to_string(),
                    stroke_color: stroke.to_string(),
                })
                .collect();
            let total_weight = BUILTIN.iter().map(|entry| entry.2).sum();
            MaterialCatalog {
                materials,
                total_weight,
            }
        })
    }

    /// Validate and wrap a list of materials.
    pub fn new(materials: Vec<Material>) -> Result<Self> {
        if materials.is_empty() {
            return Err(Error::InvalidCatalog {
                reason: "catalog has no materials".into(),
            });
        }
        if materials.len() > MAX_CATALOG_SIZE {
            return Err(Error::InvalidCatalog {
                reason: format!(
                    "catalog has {} materials (max: {})",
                    materials.len(),
                    MAX_CATALOG_SIZE
                ),
            });
        }

        let mut total_weight: u64 = 0;
        for (index, material) in materials.iter().enumerate() {
            if material.id as usize != index {
                return Err(Error::InvalidCatalog {
                    reason: format!(
                        "material '{}' has id {} but sits at position {}",
                        material.name, material.id, index
                    ),
                });
            }
            if material.weight == 0 {
                return Err(Error::InvalidCatalog {
                    reason: format!("material '{}' has zero weight", material.name),
                });
            }
            validate_label(&material.name)?;
            validate_color(&material.background_color)?;
            validate_color(&material.stroke_color)?;
            total_weight = total_weight
                .checked_add(material.weight)
                .ok_or_else(|| Error::InvalidCatalog {
                    reason: "total weight overflows".into(),
                })?;
        }

        debug!(
            "Validated catalog: {} materials, total weight {}",
            materials.len(),
            total_weight
        );
        Ok(Self {
            materials,
            total_weight,
        })
    }

    /// Parse a catalog from JSON: either a bare array or `{"materials": [...]}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json).map_err(|e| Error::InvalidCatalog {
            reason: format!("JSON parse error: {e}"),
        })?;
        let materials = match file {
            CatalogFile::Wrapped { materials } | CatalogFile::Bare(materials) => materials,
        };
        Self::new(materials)
    }

    /// Load a catalog file from disk.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        info!("Loaded {} materials from {}", catalog.len(), path);
        Ok(catalog)
    }

    /// Look up a material by id.
    pub fn get(&self, id: u32) -> Result<&Material> {
        self.materials
            .get(id as usize)
            .ok_or(Error::InvalidMaterialId {
                id,
                count: self.materials.len(),
            })
    }

    /// Materials in selection order.
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Number of materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Always false for a validated catalog.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Expected selection probability of one material.
    pub fn expected_share(&self, material: &Material) -> f64 {
        material.weight as f64 / self.total_weight as f64
    }

    /// Expected selection probability of a whole tier.
    pub fn tier_share(&self, tier: Tier) -> f64 {
        let weight: u64 = self
            .materials
            .iter()
            .filter(|m| m.tier == tier)
            .map(|m| m.weight)
            .sum();
        weight as f64 / self.total_weight as f64
    }
}
