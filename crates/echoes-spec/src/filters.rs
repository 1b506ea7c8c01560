//! Display filter settings applied over generated art.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, ValidationError};

/// Upper bound of both filter sliders.
pub const MAX_FILTER_VALUE: u16 = 200;

/// Neutral filter value (100%).
pub const DEFAULT_FILTER_VALUE: u16 = 100;

/// Complexity (contrast) and color intensity (saturation) percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFilters {
    /// Contrast percentage, `0..=200`.
    pub complexity: u16,
    /// Saturation percentage, `0..=200`.
    pub intensity: u16,
}

impl Default for DisplayFilters {
    fn default() -> Self {
        Self {
            complexity: DEFAULT_FILTER_VALUE,
            intensity: DEFAULT_FILTER_VALUE,
        }
    }
}

impl DisplayFilters {
    /// Creates filters, rejecting values above [`MAX_FILTER_VALUE`].
    pub fn new(complexity: u16, intensity: u16) -> Result<Self, ValidationError> {
        for (name, value) in [("complexity", complexity), ("intensity", intensity)] {
            if value > MAX_FILTER_VALUE {
                return Err(ValidationError::new(
                    ErrorCode::FilterOutOfRange,
                    format!("{name} must be between 0 and {MAX_FILTER_VALUE}, got {value}"),
                ));
            }
        }
        Ok(Self {
            complexity,
            intensity,
        })
    }

    /// CSS-style filter expression, e.g. `contrast(100%) saturate(100%)`.
    pub fn css_filter(&self) -> String {
        format!(
            "contrast({}%) saturate({}%)",
            self.complexity, self.intensity
        )
    }

    /// Returns both sliders to 100%.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
