//! Mapping from raw catalog records to display-ready skip options.

use crate::model::{RawSkip, SkipId, SkipOption};
use crate::ports::CatalogError;

/// Gross price in whole pounds, rounded half-up.
///
/// Returns `None` when either input is negative or not finite, or when the result does not
/// fit into a `u32`.
#[must_use]
pub fn vat_inclusive_price(price_before_vat: f64, vat_percent: f64) -> Option<u32> {
    if !price_before_vat.is_finite() || !vat_percent.is_finite() {
        return None;
    }
    if price_before_vat < 0.0 || vat_percent < 0.0 {
        return None;
    }

    // `f64::round` rounds half away from zero, which is half-up for non-negative values.
    let gross = (price_before_vat * (1.0 + vat_percent / 100.0)).round();
    if gross > f64::from(u32::MAX) {
        return None;
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "gross is a non-negative whole number within u32 range"
    )]
    let whole = gross as u32;
    Some(whole)
}

/// Human description of where the skip may stand and what it may hold.
#[must_use]
pub fn describe(allowed_on_road: bool, allows_heavy_waste: bool) -> String {
    let placement = if allowed_on_road {
        "Road placement allowed"
    } else {
        "Permit required"
    };
    let waste = if allows_heavy_waste {
        "Heavy waste allowed"
    } else {
        "Standard waste only"
    };
    format!("{placement} • {waste}")
}

/// Transform a single raw record into its display form.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidRecord`] when the price or VAT cannot be priced.
pub fn transform(raw: &RawSkip) -> Result<SkipOption, CatalogError> {
    let price = vat_inclusive_price(raw.price_before_vat, raw.vat).ok_or_else(|| {
        CatalogError::InvalidRecord {
            id: raw.id,
            reason: format!(
                "cannot price {} before VAT at {}% VAT",
                raw.price_before_vat, raw.vat
            ),
        }
    })?;

    Ok(SkipOption {
        id: SkipId(raw.id.to_string()),
        name: format!("{} Yard Skip", raw.size),
        size: format!("{} Yards", raw.size),
        price,
        hire_period: format!("{} day hire period", raw.hire_period_days),
        description: describe(raw.allowed_on_road, raw.allows_heavy_waste),
    })
}

/// Transform a whole catalog, keeping the input order.
///
/// The first invalid record fails the batch; partial catalogs are never returned.
///
/// # Errors
///
/// Returns the [`CatalogError::InvalidRecord`] of the first record that cannot be priced.
pub fn transform_all(raw: &[RawSkip]) -> Result<Vec<SkipOption>, CatalogError> {
    raw.iter().map(transform).collect()
}
