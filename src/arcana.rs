// this_file: src/arcana.rs

//! The fixed two-level category catalog: 12 majors, 4 minors each.
//!
//! Both levels are closed: a [`Major`] is an enum and a [`Minor`] can only be
//! built through [`Major::minor`], so out-of-range ids are rejected once at
//! the boundary and never reach the renderer.

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Number of major categories.
pub const MAJOR_COUNT: u32 = 12;

/// Number of minor categories per major.
pub const MINORS_PER_MAJOR: u32 = 4;

/// Major category (the "arcanum").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Major {
    Liquidity,
    Leverage,
    Volatility,
    Narrative,
    TheMacro,
    Discipline,
    Fomo,
    Fud,
    Rng,
    MaxPain,
    TheChat,
    Ego,
}

impl Major {
    /// All majors in id order.
    pub const ALL: [Major; 12] = [
        Major::Liquidity,
        Major::Leverage,
        Major::Volatility,
        Major::Narrative,
        Major::TheMacro,
        Major::Discipline,
        Major::Fomo,
        Major::Fud,
        Major::Rng,
        Major::MaxPain,
        Major::TheChat,
        Major::Ego,
    ];

    /// Resolve a raw major id.
    pub fn from_id(id: u32) -> Result<Self> {
        Self::ALL
            .get(id as usize)
            .copied()
            .ok_or(Error::InvalidCategoryId {
                kind: "major",
                id,
                limit: MAJOR_COUNT,
            })
    }

    /// Numeric id (0..12).
    pub fn id(self) -> u32 {
        self as u32
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Major::Liquidity => "Liquidity",
            Major::Leverage => "Leverage",
            Major::Volatility => "Volatility",
            Major::Narrative => "Narrative",
            Major::TheMacro => "The Macro",
            Major::Discipline => "Discipline",
            Major::Fomo => "FOMO",
            Major::Fud => "FUD",
            Major::Rng => "RNG",
            Major::MaxPain => "Max Pain",
            Major::TheChat => "The Chat",
            Major::Ego => "Ego",
        }
    }

    /// Names of this major's four minors, in id order.
    pub fn minor_names(self) -> [&'static str; 4] {
        match self {
            Major::Liquidity => ["Fills", "Market-Maker", "Spread", "Volume"],
            Major::Leverage => ["Margin", "Liqd", "Max Long", "Max Short"],
            Major::Volatility => ["Pump", "Dump", "Chop", "Pattern"],
            Major::Narrative => ["Insider", "Hype", "News", "Cope"],
            Major::TheMacro => ["Regulator", "Bear", "Bull", "Black Swan"],
            Major::Discipline => ["Take Profit", "Size", "Strategy", "Sideline"],
            Major::Fomo => ["BTFD", "Top Signal", "Market Price", "Conviction"],
            Major::Fud => ["Shills", "PsyOps", "Rugs", "Scam"],
            Major::Rng => ["Mints", "Order Routing", "Uptime", "Prediction"],
            Major::MaxPain => ["Too Early", "Too Late", "Too Little", "Too Much"],
            Major::TheChat => ["Alpha", "Slop", "In", "Out"],
            Major::Ego => ["Touch Grass", "Hyperliquid", "Family", "Needs"],
        }
    }

    /// Resolve a raw minor id under this major.
    pub fn minor(self, id: u32) -> Result<Minor> {
        if id >= MINORS_PER_MAJOR {
            return Err(Error::InvalidCategoryId {
                kind: "minor",
                id,
                limit: MINORS_PER_MAJOR,
            });
        }
        Ok(Minor {
            major: self,
            index: id as u8,
        })
    }

    /// All four minors of this major.
    pub fn minors(self) -> [Minor; 4] {
        [0u8, 1, 2, 3].map(|index| Minor { major: self, index })
    }
}

impl fmt::Display for Major {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Minor category: a validated (major, 0..4) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Minor {
    major: Major,
    index: u8,
}

impl Minor {
    /// Resolve raw (major, minor) ids in one step.
    pub fn from_ids(major_id: u32, minor_id: u32) -> Result<Self> {
        Major::from_id(major_id)?.minor(minor_id)
    }

    /// Owning major.
    pub fn major(self) -> Major {
        self.major
    }

    /// Numeric id within the major (0..4).
    pub fn id(self) -> u32 {
        u32::from(self.index)
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        self.major.minor_names()[self.index as usize]
    }
}

impl fmt::Display for Minor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
