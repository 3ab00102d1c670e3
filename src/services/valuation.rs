//! Asset valuation for the lending ledger.
//!
//! Valuation is deterministic: `appraised_value = stated_value * ltv_ratio`,
//! with the LTV ratio fixed per asset type. The result is the amount that
//! counts toward borrowing capacity.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Qualitative risk classification of an asset type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

/// Static per-type valuation parameters
///
/// `liquidation_threshold` is the LTV above which a position is considered
/// at risk. It is informational only; no rule in this engine enforces it.
#[derive(Debug, Clone, Copy)]
pub struct AssetTypeConfig {
    pub label: &'static str,
    pub ltv_ratio: f64,
    pub liquidation_threshold: f64,
    pub risk_tier: RiskTier,
}

/// The allowed asset categories, sorted by label.
///
/// One config per category; built once, looked up by normalized label.
/// There is no behavior behind these entries, only data.
const ASSET_TYPE_CONFIGS: &[AssetTypeConfig] = &[
    AssetTypeConfig {
        label: "car",
        ltv_ratio: 0.60,
        liquidation_threshold: 0.70,
        risk_tier: RiskTier::Medium,
    },
    AssetTypeConfig {
        label: "crypto",
        ltv_ratio: 0.50,
        liquidation_threshold: 0.65,
        risk_tier: RiskTier::High,
    },
    AssetTypeConfig {
        label: "property",
        ltv_ratio: 0.70,
        liquidation_threshold: 0.80,
        risk_tier: RiskTier::Low,
    },
];

/// Look up the config for a normalized asset type label
pub fn asset_type_config(asset_type: &str) -> Option<&'static AssetTypeConfig> {
    ASSET_TYPE_CONFIGS.iter().find(|c| c.label == asset_type)
}

/// Comma-separated list of allowed type labels, sorted
fn allowed_types() -> String {
    let labels: Vec<&str> = ASSET_TYPE_CONFIGS.iter().map(|c| c.label).collect();
    labels.join(", ")
}

/// Valuation errors
#[derive(Error, Debug)]
pub enum ValuationError {
    #[error("unsupported asset type '{given}' (allowed: {allowed})")]
    InvalidAssetType { given: String, allowed: String },
}

/// Result of appraising a single asset
#[derive(Debug, Serialize, Clone)]
pub struct ValuationResult {
    /// Normalized asset type label
    pub asset_type: String,

    /// Value as stated by the depositor
    pub stated_value: f64,

    /// Fraction of the stated value counted as collateral
    pub ltv_ratio: f64,

    /// Eligible collateral amount: stated_value * ltv_ratio
    pub appraised_value: f64,

    /// Risk tier of the asset type
    pub risk_tier: RiskTier,
}

/// Appraise an asset: map (type, stated value) to eligible collateral.
///
/// The type is trimmed and lowercased before lookup, so `" Crypto "` and
/// `"crypto"` appraise identically. No sign constraint is applied to
/// `stated_value` here; callers reject non-positive values before persisting.
/// Safe to call as a dry-run preview.
pub fn appraise(asset_type: &str, stated_value: f64) -> Result<ValuationResult, ValuationError> {
    let normalized = asset_type.trim().to_lowercase();

    let config = asset_type_config(&normalized).ok_or_else(|| ValuationError::InvalidAssetType {
        given: normalized.clone(),
        allowed: allowed_types(),
    })?;

    Ok(ValuationResult {
        asset_type: normalized,
        stated_value,
        ltv_ratio: config.ltv_ratio,
        appraised_value: stated_value * config.ltv_ratio,
        risk_tier: config.risk_tier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appraise_crypto() {
        let result = appraise("crypto", 75_000.0).unwrap();
        assert_eq!(result.appraised_value, 37_500.0);
        assert_eq!(result.ltv_ratio, 0.50);
        assert_eq!(result.risk_tier, RiskTier::High);
    }

    #[test]
    fn test_appraise_all_types_use_configured_ratio() {
        for config in ASSET_TYPE_CONFIGS {
            let result = appraise(config.label, 10_000.0).unwrap();
            assert_eq!(result.appraised_value, 10_000.0 * config.ltv_ratio);
            assert_eq!(result.ltv_ratio, config.ltv_ratio);
        }
    }

    #[test]
    fn test_appraise_normalizes_case_and_whitespace() {
        let plain = appraise("property", 400_000.0).unwrap();
        let noisy = appraise("  PrOpErTy  ", 400_000.0).unwrap();
        assert_eq!(plain.appraised_value, noisy.appraised_value);
        assert_eq!(noisy.asset_type, "property");
    }

    #[test]
    fn test_appraise_unknown_type_lists_allowed_set() {
        let err = appraise("Yacht", 1_000_000.0).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("yacht"));
        assert!(message.contains("car, crypto, property"));
    }

    #[test]
    fn test_configs_sorted_by_label() {
        let labels: Vec<&str> = ASSET_TYPE_CONFIGS.iter().map(|c| c.label).collect();
        let mut sorted = labels.clone();
        sorted.sort_unstable();
        assert_eq!(labels, sorted);
    }

    #[test]
    fn test_threshold_above_ratio_for_all_types() {
        for config in ASSET_TYPE_CONFIGS {
            assert!(config.liquidation_threshold > config.ltv_ratio);
        }
    }
}
