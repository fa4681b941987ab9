use crate::constants::{DEFAULT_FONT_SIZE, DEFAULT_MARGIN_MM};
use crate::types::*;
use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Page numbering configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageNumberOptions {
    // Numbering
    pub style: NumberStyle,
    pub format: NumberFormat,
    /// Value given to the first counted page
    pub start_from: i64,
    /// 1-based pages that are neither labelled nor counted
    pub exclude: BTreeSet<usize>,
    /// 1-based pages that are counted but not labelled
    pub skip: BTreeSet<usize>,

    // Placement
    pub position: Position,
    pub font_size: f32,
    /// Distance from the page edge
    pub margin_mm: f32,
}

impl Default for PageNumberOptions {
    fn default() -> Self {
        Self {
            style: NumberStyle::Decimal,
            format: NumberFormat::Number,
            start_from: 1,
            exclude: BTreeSet::new(),
            skip: BTreeSet::new(),
            position: Position::BottomCenter,
            font_size: DEFAULT_FONT_SIZE,
            margin_mm: DEFAULT_MARGIN_MM,
        }
    }
}

impl PageNumberOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| OrganizeError::InvalidInput(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| OrganizeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(OrganizeError::InvalidInput(format!(
                "font size must be positive, got {}",
                self.font_size
            )));
        }

        if !self.margin_mm.is_finite() || self.margin_mm < 0.0 {
            return Err(OrganizeError::InvalidInput(format!(
                "margin must not be negative, got {}",
                self.margin_mm
            )));
        }

        Ok(())
    }
}
