//! Derived-metrics pass: ratio metrics over the finished drafts.
//!
//! RULE: a ratio whose denominator is zero is written as 0, never as
//! infinity or NaN. This masks zero-activity campaigns as neutral
//! performance (a campaign with no clicks reports CPC 0, not "no CPC").
//! It is a deliberate reporting rule; anything that must tell "no
//! activity" apart from "neutral" has to look at the raw counts.

use crate::{
    generator::CampaignDraft,
    record::CampaignRecord,
    types::Days,
};
use serde::{Deserialize, Serialize};

/// Decimal places for rate-like and cost metrics.
pub const RATE_DP: i32 = 3;
/// Decimal places for ROI and frequency.
pub const RETURN_DP: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub duration: Days,
    pub ctr: f64,
    pub engagement_rate: f64,
    pub conversion_rate: f64,
    pub cpc: f64,
    pub cpm: f64,
    pub cost_per_conversion: f64,
    pub roas: f64,
    pub roi: f64,
    pub frequency: f64,
}

impl DerivedMetrics {
    pub fn compute(draft: &CampaignDraft) -> Self {
        let m = &draft.metrics;
        let impressions = m.impressions as f64;
        let reach = m.reach as f64;
        let clicks = m.clicks as f64;
        let engagement = m.engagement as f64;
        let conversions = m.conversions as f64;
        let budget = draft.budget;
        let revenue = m.revenue;

        let derived = Self {
            duration: (draft.end_date - draft.start_date).num_days(),
            ctr: ratio(clicks / impressions * 100.0, RATE_DP),
            engagement_rate: ratio(engagement / reach * 100.0, RATE_DP),
            conversion_rate: ratio(conversions / clicks * 100.0, RATE_DP),
            cpc: ratio(budget / clicks, RATE_DP),
            cpm: ratio(budget / impressions * 1000.0, RATE_DP),
            cost_per_conversion: ratio(budget / conversions, RATE_DP),
            roas: ratio(revenue / budget, RATE_DP),
            roi: ratio((revenue - budget) / budget * 100.0, RETURN_DP),
            frequency: ratio(impressions / reach, RETURN_DP),
        };

        if m.impressions == 0 || m.reach == 0 || m.clicks == 0 || m.conversions == 0 {
            log::debug!(
                "{}: zero denominator (impressions={} reach={} clicks={} conversions={}), ratios masked to 0",
                draft.campaign_id,
                m.impressions,
                m.reach,
                m.clicks,
                m.conversions
            );
        }
        derived
    }
}

/// Run the pass over the whole collection, preserving order.
pub fn finalize(drafts: Vec<CampaignDraft>) -> Vec<CampaignRecord> {
    drafts
        .into_iter()
        .map(|draft| {
            let derived = DerivedMetrics::compute(&draft);
            CampaignRecord::from_parts(draft, derived)
        })
        .collect()
}

/// Round half away from zero to `dp` decimals. Never returns -0.0.
pub fn round_dp(x: f64, dp: i32) -> f64 {
    let factor = 10f64.powi(dp);
    (x * factor).round() / factor + 0.0
}

/// Replace a non-finite value (x/0 or 0/0) with 0.
pub fn zero_if_non_finite(x: f64) -> f64 {
    if x.is_finite() { x } else { 0.0 }
}

fn ratio(x: f64, dp: i32) -> f64 {
    zero_if_non_finite(round_dp(x, dp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::{CampaignType, Platform},
        config::parse_date,
        metrics::RawMetrics,
    };

    fn draft(budget: f64, metrics: RawMetrics) -> CampaignDraft {
        CampaignDraft {
            campaign_id: "CMP0001".into(),
            campaign_name: "Flash Sale 3".into(),
            platform: Platform::Facebook,
            campaign_type: CampaignType::Conversion,
            start_date: parse_date("2024-05-01").unwrap(),
            end_date: parse_date("2024-05-15").unwrap(),
            budget,
            budget_tier: "small".into(),
            metrics,
        }
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_dp(1.23456, 3), 1.235);
        assert_eq!(round_dp(-1.5, 0), -2.0);
        assert_eq!(round_dp(2.0 / 3.0, 2), 0.67);
    }

    #[test]
    fn negative_zero_is_normalized() {
        let r = round_dp(-0.0001, 2);
        assert_eq!(r, 0.0);
        assert!(r.is_sign_positive());
    }

    #[test]
    fn ratios_from_known_values() {
        let d = draft(
            1_000.0,
            RawMetrics {
                impressions: 100_000,
                reach: 80_000,
                clicks: 1_000,
                engagement: 2_000,
                conversions: 20,
                revenue: 1_500.0,
            },
        );
        let m = DerivedMetrics::compute(&d);
        assert_eq!(m.duration, 14);
        assert_eq!(m.ctr, 1.0);
        assert_eq!(m.engagement_rate, 2.5);
        assert_eq!(m.conversion_rate, 2.0);
        assert_eq!(m.cpc, 1.0);
        assert_eq!(m.cpm, 10.0);
        assert_eq!(m.cost_per_conversion, 50.0);
        assert_eq!(m.roas, 1.5);
        assert_eq!(m.roi, 50.0);
        assert_eq!(m.frequency, 1.25);
    }

    #[test]
    fn zero_conversions_mask_cost_per_conversion() {
        let d = draft(
            750.0,
            RawMetrics {
                impressions: 60_000,
                reach: 50_000,
                clicks: 30,
                engagement: 900,
                conversions: 0,
                revenue: 0.0,
            },
        );
        let m = DerivedMetrics::compute(&d);
        assert_eq!(m.cost_per_conversion, 0.0);
        assert_eq!(m.conversion_rate, 0.0);
        assert_eq!(m.roas, 0.0);
        assert_eq!(m.roi, -100.0);
    }

    #[test]
    fn zero_activity_has_no_infinities_or_nans() {
        let d = draft(
            500.0,
            RawMetrics {
                impressions: 0,
                reach: 0,
                clicks: 0,
                engagement: 0,
                conversions: 0,
                revenue: 0.0,
            },
        );
        let m = DerivedMetrics::compute(&d);
        for v in [
            m.ctr, m.engagement_rate, m.conversion_rate, m.cpc, m.cpm,
            m.cost_per_conversion, m.frequency,
        ] {
            assert_eq!(v, 0.0);
        }
    }

    #[test]
    fn finalize_keeps_order() {
        let metrics = RawMetrics {
            impressions: 10, reach: 9, clicks: 1, engagement: 1, conversions: 0, revenue: 0.0,
        };
        let mut a = draft(600.0, metrics);
        let mut b = draft(700.0, metrics);
        a.campaign_id = "CMP0001".into();
        b.campaign_id = "CMP0002".into();
        let records = finalize(vec![a, b]);
        assert_eq!(records[0].campaign_id, "CMP0001");
        assert_eq!(records[1].campaign_id, "CMP0002");
        assert_eq!(records[1].budget, 700.0);
    }
}
