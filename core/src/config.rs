use crate::{
    catalog::{CampaignType, Platform},
    error::{GenError, GenResult},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Half-open float range `[min, max)` used for uniform jitter draws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatRange {
    pub min: f64,
    pub max: f64,
}

impl FloatRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Inclusive integer range `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl IntRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetTierConfig {
    pub id: String,
    /// Share of campaigns drawn into this tier.
    pub probability: f64,
    pub min: f64,
    pub max: f64,
}

impl BudgetTierConfig {
    /// Tier bounds are half-open: `[min, max)`.
    pub fn contains(&self, budget: f64) -> bool {
        budget >= self.min && budget < self.max
    }
}

/// Per-type base rates, multiplied by jitter in the synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypeFactors {
    pub ctr: f64,
    pub engagement: f64,
    pub conversion: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypeFactorTable {
    pub awareness: TypeFactors,
    pub engagement: TypeFactors,
    pub conversion: TypeFactors,
}

impl TypeFactorTable {
    pub fn for_type(&self, campaign_type: CampaignType) -> &TypeFactors {
        match campaign_type {
            CampaignType::Awareness  => &self.awareness,
            CampaignType::Engagement => &self.engagement,
            CampaignType::Conversion => &self.conversion,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformMultipliers {
    pub reach: f64,
    pub ctr: f64,
    /// Carried with the table; no synthesized metric reads it.
    pub cpc: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformMultiplierTable {
    pub facebook: PlatformMultipliers,
    pub instagram: PlatformMultipliers,
}

impl PlatformMultiplierTable {
    pub fn for_platform(&self, platform: Platform) -> &PlatformMultipliers {
        match platform {
            Platform::Facebook  => &self.facebook,
            Platform::Instagram => &self.instagram,
        }
    }

    pub fn max_reach(&self) -> f64 {
        self.facebook.reach.max(self.instagram.reach)
    }
}

/// Upper bounds that keep generation free of overflow.
pub const MAX_CAMPAIGNS: usize = 1_000_000;
pub const MAX_WINDOW_DAYS: i64 = 36_500;
pub const MAX_DURATION_DAYS: i64 = 3_650;
pub const MAX_BUDGET: f64 = 1e12;

/// Every constant that shapes a generated dataset.
///
/// `Default` carries the fixed production values. A JSON file passed to
/// [`GeneratorConfig::load`] may override any subset of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub campaign_count: usize,
    /// Length of the trailing window start dates are drawn from.
    pub window_days: i64,
    /// Last day of the window. `None` means the caller supplies it.
    pub anchor_date: Option<NaiveDate>,
    pub duration_days: IntRange,
    pub template_number: IntRange,
    pub budget_tiers: Vec<BudgetTierConfig>,
    pub cpm: FloatRange,
    pub reach_share: FloatRange,
    pub ctr_variation: FloatRange,
    pub engagement_variation: FloatRange,
    pub conversion_variation: FloatRange,
    pub order_value: FloatRange,
    pub type_factors: TypeFactorTable,
    pub platform_multipliers: PlatformMultiplierTable,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            campaign_count: 100,
            window_days: 180,
            anchor_date: None,
            duration_days: IntRange::new(7, 30),
            template_number: IntRange::new(1, 10),
            budget_tiers: vec![
                BudgetTierConfig { id: "small".into(),  probability: 0.60, min: 500.0,  max: 2_000.0 },
                BudgetTierConfig { id: "medium".into(), probability: 0.30, min: 2_000.0, max: 5_000.0 },
                BudgetTierConfig { id: "large".into(),  probability: 0.10, min: 5_000.0, max: 15_000.0 },
            ],
            cpm: FloatRange::new(5.0, 15.0),
            reach_share: FloatRange::new(0.80, 0.95),
            ctr_variation: FloatRange::new(0.7, 1.3),
            engagement_variation: FloatRange::new(0.8, 1.4),
            conversion_variation: FloatRange::new(0.6, 1.5),
            order_value: FloatRange::new(30.0, 150.0),
            type_factors: TypeFactorTable {
                awareness:  TypeFactors { ctr: 0.008, engagement: 0.02, conversion: 0.01 },
                engagement: TypeFactors { ctr: 0.015, engagement: 0.05, conversion: 0.015 },
                conversion: TypeFactors { ctr: 0.02,  engagement: 0.03, conversion: 0.03 },
            },
            platform_multipliers: PlatformMultiplierTable {
                facebook:  PlatformMultipliers { reach: 1.2, ctr: 1.0, cpc: 1.0 },
                instagram: PlatformMultipliers { reach: 1.0, ctr: 1.3, cpc: 1.15 },
            },
        }
    }
}

impl GeneratorConfig {
    /// Load overrides from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> GenResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: GeneratorConfig = serde_json::from_str(&content)?;
        config.validate()?;
        log::info!("Loaded generator config from {}", path.display());
        Ok(config)
    }

    /// Reject overrides the generator cannot honour.
    pub fn validate(&self) -> GenResult<()> {
        if self.campaign_count == 0 || self.campaign_count > MAX_CAMPAIGNS {
            return Err(invalid(format!("campaign_count must be in 1..={MAX_CAMPAIGNS}")));
        }
        if !(0..=MAX_WINDOW_DAYS).contains(&self.window_days) {
            return Err(invalid(format!("window_days must be in 0..={MAX_WINDOW_DAYS}")));
        }
        for (name, range) in [
            ("duration_days", self.duration_days),
            ("template_number", self.template_number),
        ] {
            if range.min > range.max {
                return Err(invalid(format!("{name}: min {} > max {}", range.min, range.max)));
            }
            if range.max.checked_sub(range.min).is_none() {
                return Err(invalid(format!("{name}: range {}..={} is too wide", range.min, range.max)));
            }
        }
        if self.duration_days.min < 0 || self.duration_days.max > MAX_DURATION_DAYS {
            return Err(invalid(format!("duration_days must lie in 0..={MAX_DURATION_DAYS}")));
        }
        for (name, range) in [
            ("cpm", self.cpm),
            ("reach_share", self.reach_share),
            ("ctr_variation", self.ctr_variation),
            ("engagement_variation", self.engagement_variation),
            ("conversion_variation", self.conversion_variation),
            ("order_value", self.order_value),
        ] {
            if !(range.min >= 0.0 && range.min < range.max) {
                return Err(invalid(format!("{name}: expected 0 <= min < max")));
            }
        }
        if self.cpm.min <= 0.0 {
            return Err(invalid("cpm.min must be > 0"));
        }

        if self.budget_tiers.is_empty() {
            return Err(invalid("at least one budget tier is required"));
        }
        for tier in &self.budget_tiers {
            // Whole-cent draws need at least one cent of width.
            if !(tier.min > 0.0 && tier.max <= MAX_BUDGET && tier.max - tier.min >= 0.01) {
                return Err(invalid(format!(
                    "budget tier '{}': expected 0 < min < max <= {MAX_BUDGET}",
                    tier.id
                )));
            }
            if tier.probability < 0.0 {
                return Err(invalid(format!("budget tier '{}': negative probability", tier.id)));
            }
        }
        let total: f64 = self.budget_tiers.iter().map(|t| t.probability).sum();
        if (total - 1.0).abs() > 1e-9 {
            return Err(invalid(format!("budget tier probabilities sum to {total}, expected 1")));
        }
        Ok(())
    }

    /// Reject an anchor whose window or campaign end dates fall off the calendar.
    pub fn check_anchor(&self, anchor: NaiveDate) -> GenResult<()> {
        let earliest = anchor.checked_sub_signed(chrono::Duration::days(self.window_days));
        let latest = anchor.checked_add_signed(chrono::Duration::days(self.duration_days.max));
        if earliest.is_none() || latest.is_none() {
            return Err(GenError::InvalidDate { value: anchor.to_string() });
        }
        Ok(())
    }

    /// The anchor to use: the configured one, else `fallback`.
    pub fn resolve_anchor(&self, fallback: NaiveDate) -> NaiveDate {
        self.anchor_date.unwrap_or(fallback)
    }

    /// Earliest possible start date for the given anchor.
    pub fn window_start(&self, anchor: NaiveDate) -> NaiveDate {
        anchor - chrono::Duration::days(self.window_days)
    }
}

/// Parse a `YYYY-MM-DD` anchor date.
pub fn parse_date(value: &str) -> GenResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| GenError::InvalidDate {
        value: value.to_string(),
    })
}

fn invalid(reason: impl Into<String>) -> GenError {
    GenError::InvalidConfig { reason: reason.into() }
}
