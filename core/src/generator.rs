//! Record assembler: draws the categorical attributes of each campaign
//! and hands budget + category to the metric synthesizer.
//!
//! Per-campaign draw order (fixed, never reordered):
//!   type, platform, name template, template number,
//!   start offset, duration, budget tier, budget amount,
//!   then the six synthesizer draws.

use crate::{
    catalog::{draw_campaign_name, CampaignType, Platform},
    config::{BudgetTierConfig, GeneratorConfig},
    metrics::{synthesize, RawMetrics},
    rng::CampaignRng,
    types::{campaign_id, CampaignId},
};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// A campaign before the derived-metrics pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignDraft {
    pub campaign_id: CampaignId,
    pub campaign_name: String,
    pub platform: Platform,
    pub campaign_type: CampaignType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: f64,
    /// Id of the budget tier the amount was drawn from.
    pub budget_tier: String,
    pub metrics: RawMetrics,
}

/// Generate `config.campaign_count` drafts in generation order.
pub fn assemble_campaigns(
    config: &GeneratorConfig,
    anchor: NaiveDate,
    rng: &mut CampaignRng,
) -> Vec<CampaignDraft> {
    let n = config.campaign_count;
    let mut drafts = Vec::with_capacity(n);

    for i in 0..n {
        let draft = draw_campaign(config, anchor, i, rng);
        log::debug!(
            "{} {} / {} budget={:.2} impressions={}",
            draft.campaign_id,
            draft.platform,
            draft.campaign_type,
            draft.budget,
            draft.metrics.impressions
        );
        drafts.push(draft);
    }
    drafts
}

fn draw_campaign(
    config: &GeneratorConfig,
    anchor: NaiveDate,
    index: usize,
    rng: &mut CampaignRng,
) -> CampaignDraft {
    let campaign_type = *rng.choose(&CampaignType::ALL);
    let platform = *rng.choose(&Platform::ALL);

    let campaign_name = draw_campaign_name(campaign_type, config.template_number, rng);

    let days_ago = rng.int_inclusive(0, config.window_days);
    let start_date = anchor - Duration::days(days_ago);
    let duration = rng.int_inclusive(config.duration_days.min, config.duration_days.max);
    let end_date = start_date + Duration::days(duration);

    let tier = pick_budget_tier(config, rng);
    let budget = draw_budget(tier, rng);

    let metrics = synthesize(config, campaign_type, platform, budget, rng);

    CampaignDraft {
        campaign_id: campaign_id(index),
        campaign_name,
        platform,
        campaign_type,
        start_date,
        end_date,
        budget,
        budget_tier: tier.id.clone(),
        metrics,
    }
}

/// Single roll against the cumulative tier probabilities.
fn pick_budget_tier<'a>(config: &'a GeneratorConfig, rng: &mut CampaignRng) -> &'a BudgetTierConfig {
    let roll = rng.next_f64();
    let mut cumulative = 0.0;
    for tier in &config.budget_tiers {
        cumulative += tier.probability;
        if roll < cumulative {
            return tier;
        }
    }
    // Float drift in the cumulative sum; validate() guarantees a last tier.
    &config.budget_tiers[config.budget_tiers.len() - 1]
}

/// Whole cents in `[min, max)`, so a budget belongs to exactly one tier.
fn draw_budget(tier: &BudgetTierConfig, rng: &mut CampaignRng) -> f64 {
    let lo = (tier.min * 100.0).round() as u64;
    let hi = (tier.max * 100.0).round() as u64;
    let cents = lo + rng.next_u64_below(hi - lo);
    cents as f64 / 100.0
}
