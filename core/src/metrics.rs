//! Metric synthesizer: budget + category → correlated campaign outcomes.
//!
//! Draw order (fixed, part of the reproducibility contract):
//!   1. CPM            → impressions
//!   2. reach share    → reach
//!   3. CTR jitter     → clicks
//!   4. engagement     → engagement
//!   5. conversion     → conversions
//!   6. order value    → revenue

use crate::{
    catalog::{CampaignType, Platform},
    config::GeneratorConfig,
    derived::round_dp,
    rng::CampaignRng,
};
use serde::{Deserialize, Serialize};

/// The six synthesized outcomes for one campaign. All non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawMetrics {
    pub impressions: u64,
    pub reach: u64,
    pub clicks: u64,
    pub engagement: u64,
    pub conversions: u64,
    /// Rounded to cents.
    pub revenue: f64,
}

/// Synthesize metrics for one campaign. Consumes exactly six draws.
pub fn synthesize(
    config: &GeneratorConfig,
    campaign_type: CampaignType,
    platform: Platform,
    budget: f64,
    rng: &mut CampaignRng,
) -> RawMetrics {
    let factors = config.type_factors.for_type(campaign_type);
    let multipliers = config.platform_multipliers.for_platform(platform);

    let cpm = rng.uniform(config.cpm.min, config.cpm.max);
    let impressions = truncate(budget / cpm * 1000.0);

    let reach_share = rng.uniform(config.reach_share.min, config.reach_share.max);
    let reach = truncate(impressions as f64 * reach_share * multipliers.reach);

    let ctr_jitter = rng.uniform(config.ctr_variation.min, config.ctr_variation.max);
    let ctr = factors.ctr * multipliers.ctr * ctr_jitter;
    let clicks = truncate(impressions as f64 * ctr);

    let engagement_jitter =
        rng.uniform(config.engagement_variation.min, config.engagement_variation.max);
    let engagement = truncate(reach as f64 * factors.engagement * engagement_jitter);

    let conversion_jitter =
        rng.uniform(config.conversion_variation.min, config.conversion_variation.max);
    let conversions = truncate(clicks as f64 * factors.conversion * conversion_jitter);

    let order_value = rng.uniform(config.order_value.min, config.order_value.max);
    let revenue = round_dp(conversions as f64 * order_value, 2);

    RawMetrics {
        impressions,
        reach,
        clicks,
        engagement,
        conversions,
        revenue,
    }
}

/// Truncate toward zero; negative and NaN inputs clamp to 0.
fn truncate(x: f64) -> u64 {
    x.max(0.0) as u64
}
