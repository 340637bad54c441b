// this_file: src/metadata.rs

//! ERC-721 style token metadata and `data:` token URIs.

use crate::compose::{render, TokenAttributes};
use crate::error::{Error, Result};
use crate::materials::MaterialCatalog;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of a base64 JSON token URI.
pub const JSON_DATA_URI_PREFIX: &str = "data:application/json;base64,";

/// Prefix of a base64 SVG image URI.
pub const SVG_DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

/// Public page for a token id.
pub const EXTERNAL_URL_BASE: &str = "https://hyper.faith/omamori/";

pub const DESCRIPTION: &str = "Ancient talismans for modern traders. High-quality off-chain generative art powered by deterministic on-chain data.";

const WEI_PER_TEN_THOUSANDTH: u128 = 100_000_000_000_000;

/// Attribute value: display text or a plain number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(u64),
    Text(String),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Number(n) => write!(f, "{n}"),
            AttributeValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: AttributeValue,
}

impl Attribute {
    fn text(trait_type: &str, value: impl Into<String>) -> Self {
        Self {
            trait_type: trait_type.to_string(),
            value: AttributeValue::Text(value.into()),
        }
    }

    fn number(trait_type: &str, value: u64) -> Self {
        Self {
            trait_type: trait_type.to_string(),
            value: AttributeValue::Number(value),
        }
    }
}

/// Token metadata document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    pub image: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl TokenMetadata {
    /// Render the token and describe it.
    ///
    /// `hype_burned_wei` is informational only; it never feeds any selector.
    pub fn build(
        token_id: u64,
        attributes: &TokenAttributes,
        catalog: &MaterialCatalog,
        hype_burned_wei: u128,
    ) -> Result<Self> {
        let material = catalog.get(attributes.material_id())?;
        let svg = render(attributes, catalog)?;
        Ok(Self {
            name: format!("Omamori #{token_id}"),
            description: DESCRIPTION.to_string(),
            external_url: Some(format!("{EXTERNAL_URL_BASE}{token_id}")),
            image: format!("{SVG_DATA_URI_PREFIX}{}", STANDARD.encode(svg)),
            attributes: vec![
                Attribute::text("Material", material.name.clone()),
                Attribute::text("Rarity Tier", material.tier.label()),
                Attribute::text("Major Arcanum", attributes.major().name()),
                Attribute::text("Minor Arcanum", attributes.minor().name()),
                Attribute::number("Major ID", u64::from(attributes.major().id())),
                Attribute::number("Minor ID", u64::from(attributes.minor().id())),
                Attribute::number("Punch Count", u64::from(attributes.punch_count())),
                Attribute::text("Seed", attributes.seed().display_form()),
                Attribute::text("HYPE Burned", format_hype_burned(hype_burned_wei)),
            ],
        })
    }

    /// Look up an attribute by trait name.
    pub fn attribute(&self, trait_type: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|a| a.trait_type == trait_type)
            .map(|a| &a.value)
    }

    /// `data:application/json;base64,...` form.
    pub fn token_uri(&self) -> Result<String> {
        let json = serde_json::to_string(self)?;
        Ok(format!("{JSON_DATA_URI_PREFIX}{}", STANDARD.encode(json)))
    }

    /// Parse a base64 data URI or a bare JSON document.
    pub fn from_token_uri(uri: &str) -> Result<Self> {
        let json = if let Some(encoded) = uri.strip_prefix(JSON_DATA_URI_PREFIX) {
            let bytes = STANDARD.decode(encoded).map_err(|e| Error::InvalidMetadata {
                reason: format!("token URI is not valid base64: {e}"),
            })?;
            String::from_utf8(bytes).map_err(|e| Error::InvalidMetadata {
                reason: format!("token URI payload is not UTF-8: {e}"),
            })?
        } else if uri.trim_start().starts_with('{') {
            uri.to_string()
        } else {
            return Err(Error::InvalidMetadata {
                reason: "unsupported token URI format".to_string(),
            });
        };

        serde_json::from_str(&json).map_err(|e| Error::InvalidMetadata {
            reason: format!("token URI JSON is malformed: {e}"),
        })
    }

    /// Decode the embedded SVG image.
    pub fn image_svg(&self) -> Result<String> {
        let encoded = self
            .image
            .strip_prefix(SVG_DATA_URI_PREFIX)
            .ok_or_else(|| Error::InvalidMetadata {
                reason: "image is not a base64 SVG data URI".to_string(),
            })?;
        let bytes = STANDARD.decode(encoded).map_err(|e| Error::InvalidMetadata {
            reason: format!("image is not valid base64: {e}"),
        })?;
        String::from_utf8(bytes).map_err(|e| Error::InvalidMetadata {
            reason: format!("image is not UTF-8: {e}"),
        })
    }
}

/// Wei amount as whole tokens with four decimals, rounded half up.
pub fn format_hype_burned(wei: u128) -> String {
    let units = wei.saturating_add(WEI_PER_TEN_THOUSANDTH / 2) / WEI_PER_TEN_THOUSANDTH;
    format!("{}.{:04}", units / 10_000, units % 10_000)
}
