//! Carbon:nitrogen ratio of the feedstock mix.
//!
//! Uses fixed nominal C:N values per material class.  The mix ratio is the
//! mass-weighted average of the two classes, so it depends only on the
//! proportion of green to brown, not on the absolute amounts.

use serde::{Deserialize, Serialize};

use crate::error::{InputError, Result};

/// Nominal C:N of green (nitrogen-rich) material.
pub const GREEN_CN: f64 = 20.0;
/// Nominal C:N of brown (carbon-rich) material.
pub const BROWN_CN: f64 = 60.0;
/// Target mix ratio: midpoint of the accepted 25–30:1 band.
pub const TARGET_CN: f64 = 27.5;
/// Above this the mix is classed as carbon-heavy.
pub const MAX_OPTIMAL_CN: f64 = 31.0;
/// Slack on the band edges, so a mix corrected to exactly
/// [`TARGET_CN`] is not pushed back out by rounding.
const BAND_TOLERANCE: f64 = 1e-9;

/// Qualitative verdict on a mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MixStatus {
    Optimal,
    TooMuchGreen,
    TooMuchBrown,
}

/// Waste masses supplied by the cycle owner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WasteInput {
    pub green_kg: f64,
    pub brown_kg: f64,
}

impl WasteInput {
    pub fn ratio(&self) -> Result<CnRatio> {
        calculate_ratio(self.green_kg, self.brown_kg)
    }
}

/// Result of [`calculate_ratio`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CnRatio {
    pub current_ratio: f64,
    pub optimal_ratio: f64,
    pub green_waste_kg: f64,
    pub brown_waste_kg: f64,
    /// Brown mass the corrected mix should contain in total (not the
    /// amount to add on top of `brown_waste_kg`).  Present only for
    /// [`MixStatus::TooMuchGreen`].
    pub suggested_brown_kg: Option<f64>,
    pub status: MixStatus,
}

/// Brown mass that moves a mix containing `green_kg` of green material
/// exactly onto [`TARGET_CN`].
///
/// Solves `(g·G + b·B) / (g + b) = T` for `b`.
pub fn brown_needed_for_target(green_kg: f64) -> f64 {
    green_kg * (GREEN_CN - TARGET_CN) / (TARGET_CN - BROWN_CN)
}

/// Compute the C:N ratio for the given masses.
///
/// Fails with [`InputError`] when either mass is not strictly positive,
/// since the ratio is undefined without both materials present.
pub fn calculate_ratio(green_kg: f64, brown_kg: f64) -> Result<CnRatio> {
    // `!(x > 0.0)` also rejects NaN.
    if !(green_kg > 0.0) {
        return Err(InputError::NonPositiveGreen(green_kg).into());
    }
    if !(brown_kg > 0.0) {
        return Err(InputError::NonPositiveBrown(brown_kg).into());
    }

    let current_ratio = (green_kg * GREEN_CN + brown_kg * BROWN_CN) / (green_kg + brown_kg);

    let (status, suggested_brown_kg) = if current_ratio < TARGET_CN - BAND_TOLERANCE {
        (MixStatus::TooMuchGreen, Some(brown_needed_for_target(green_kg)))
    } else if current_ratio > MAX_OPTIMAL_CN + BAND_TOLERANCE {
        (MixStatus::TooMuchBrown, None)
    } else {
        (MixStatus::Optimal, None)
    };

    Ok(CnRatio {
        current_ratio,
        optimal_ratio: TARGET_CN,
        green_waste_kg: green_kg,
        brown_waste_kg: brown_kg,
        suggested_brown_kg,
        status,
    })
}
