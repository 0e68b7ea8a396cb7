//! Garment catalog
//!
//! Data model for the storefront's garment offering: each garment type has
//! a display name, a photo per side, a print area per side, and a set of
//! offered colors. Catalogs are loaded from a JSON document keyed by
//! garment slug, the same shape the storefront API serves.

use crate::{
    error::{MockupError, Result},
    source::GarmentSource,
    types::{ColorRgb, PrintArea},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Colors offered when a garment does not declare its own palette
pub const DEFAULT_GARMENT_COLORS: &[&str] = &[
    "#ffffff", "#111111", "#1a1a2e", "#c0392b", "#2980b9", "#27ae60", "#f39c12", "#8e44ad",
    "#e8d5b7", "#7f8c8d", "#e91e63", "#00bcd4",
];

/// Which side of the garment a mockup shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GarmentSide {
    Front,
    Back,
}

/// A single garment type in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarmentSpec {
    /// Display name ("Classic T-Shirt")
    pub name: String,

    /// Front photo location (URL or path)
    pub image: String,

    /// Front print area
    pub print_area: PrintArea,

    /// Back photo location, when the garment is printable on both sides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_image: Option<String>,

    /// Back print area; the front area is reused when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_print_area: Option<PrintArea>,

    /// Offered colors as hex strings
    #[serde(default = "default_colors")]
    pub colors: Vec<String>,
}

fn default_colors() -> Vec<String> {
    DEFAULT_GARMENT_COLORS
        .iter()
        .map(|c| (*c).to_string())
        .collect()
}

impl GarmentSpec {
    /// Image source for the requested side
    ///
    /// # Errors
    ///
    /// Returns `MockupError::InvalidConfig` when the back side is requested
    /// for a garment without a back photo.
    pub fn source(&self, side: GarmentSide) -> Result<GarmentSource> {
        match side {
            GarmentSide::Front => Ok(GarmentSource::parse(&self.image)),
            GarmentSide::Back => self
                .back_image
                .as_deref()
                .map(GarmentSource::parse)
                .ok_or_else(|| {
                    MockupError::invalid_config(format!(
                        "Garment '{}' has no back-side photo",
                        self.name
                    ))
                }),
        }
    }

    /// Print area for the requested side
    #[must_use]
    pub fn print_area(&self, side: GarmentSide) -> PrintArea {
        match side {
            GarmentSide::Front => self.print_area,
            GarmentSide::Back => self.back_print_area.unwrap_or(self.print_area),
        }
    }

    /// Parse the offered palette
    ///
    /// # Errors
    ///
    /// Returns `MockupError::InvalidColor` for the first malformed entry.
    pub fn parsed_colors(&self) -> Result<Vec<ColorRgb>> {
        self.colors.iter().map(|c| c.parse()).collect()
    }

    /// Validate the spec
    ///
    /// # Errors
    ///
    /// Returns `MockupError::InvalidConfig` for empty fields and
    /// `MockupError::InvalidColor` for malformed palette entries.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(MockupError::invalid_config("Garment name must not be empty"));
        }
        if self.image.trim().is_empty() {
            return Err(MockupError::invalid_config(format!(
                "Garment '{}' has no image",
                self.name
            )));
        }
        self.parsed_colors()?;
        Ok(())
    }
}

/// The full garment offering, keyed by slug
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GarmentCatalog {
    garments: BTreeMap<String, GarmentSpec>,
}

impl GarmentCatalog {
    /// Parse a catalog from its JSON document
    ///
    /// # Errors
    ///
    /// Returns `MockupError::InvalidConfig` on malformed JSON or when any
    /// garment fails validation.
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json)
            .map_err(|e| MockupError::invalid_config(format!("Malformed garment catalog: {}", e)))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `MockupError::Io` on read failure and the `from_json` errors
    /// on malformed content.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())
            .map_err(|e| MockupError::file_io_error("read garment catalog", path.as_ref(), &e))?;
        Self::from_json(&json)
    }

    /// Validate every garment in the catalog
    ///
    /// # Errors
    ///
    /// Propagates the first failing garment's error.
    pub fn validate(&self) -> Result<()> {
        for (slug, spec) in &self.garments {
            spec.validate().map_err(|e| {
                MockupError::invalid_config(format!("Garment '{}': {}", slug, e))
            })?;
        }
        Ok(())
    }

    /// Look up a garment by slug
    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&GarmentSpec> {
        self.garments.get(slug)
    }

    /// Iterate garments in slug order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GarmentSpec)> {
        self.garments.iter().map(|(slug, spec)| (slug.as_str(), spec))
    }

    /// All front-side image sources, for cache preloading
    #[must_use]
    pub fn front_sources(&self) -> Vec<GarmentSource> {
        self.garments
            .values()
            .map(|spec| GarmentSource::parse(&spec.image))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.garments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.garments.is_empty()
    }

    /// Insert or replace a garment
    pub fn insert(&mut self, slug: String, spec: GarmentSpec) {
        self.garments.insert(slug, spec);
    }
}
