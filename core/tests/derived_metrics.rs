//! The zero-denominator rule, checked over whole generated datasets.

use campaign_core::{
    config::{parse_date, FloatRange, GeneratorConfig},
    pipeline::GenerationRun,
    record::CampaignRecord,
};

fn ratios(r: &CampaignRecord) -> [f64; 9] {
    [
        r.ctr, r.engagement_rate, r.conversion_rate, r.cpc, r.cpm,
        r.cost_per_conversion, r.roas, r.roi, r.frequency,
    ]
}

/// Low-activity config: tiny CTRs so clicks and conversions often hit 0.
fn starved_config() -> GeneratorConfig {
    let mut config = GeneratorConfig { campaign_count: 400, ..GeneratorConfig::default() };
    config.ctr_variation = FloatRange::new(0.0001, 0.002);
    config.conversion_variation = FloatRange::new(0.0, 0.5);
    config
}

#[test]
fn no_infinities_or_nans_in_default_dataset() {
    let run = GenerationRun::execute(GeneratorConfig::default(), parse_date("2024-06-30").unwrap())
        .unwrap();
    for r in &run.records {
        for v in ratios(r) {
            assert!(v.is_finite(), "{}: non-finite ratio", r.campaign_id);
        }
    }
}

#[test]
fn zero_denominators_yield_zero_ratios() {
    let run = GenerationRun::execute(starved_config(), parse_date("2024-06-30").unwrap()).unwrap();

    let zero_click_rows = run.records.iter().filter(|r| r.clicks == 0).count();
    assert!(zero_click_rows > 0, "config should produce zero-click campaigns");

    for r in &run.records {
        for v in ratios(r) {
            assert!(v.is_finite(), "{}: non-finite ratio", r.campaign_id);
        }
        if r.clicks == 0 {
            assert_eq!(r.cpc, 0.0, "{}", r.campaign_id);
            assert_eq!(r.conversion_rate, 0.0, "{}", r.campaign_id);
        }
        if r.impressions == 0 {
            assert_eq!(r.ctr, 0.0);
            assert_eq!(r.cpm, 0.0);
        }
        if r.reach == 0 {
            assert_eq!(r.engagement_rate, 0.0);
            assert_eq!(r.frequency, 0.0);
        }
    }
}

#[test]
fn zero_conversions_mean_zero_cost_per_conversion_and_revenue() {
    let run = GenerationRun::execute(starved_config(), parse_date("2024-06-30").unwrap()).unwrap();

    let zero_conversion_rows: Vec<_> = run.records.iter().filter(|r| r.conversions == 0).collect();
    assert!(!zero_conversion_rows.is_empty());
    for r in zero_conversion_rows {
        assert_eq!(r.cost_per_conversion, 0.0, "{}", r.campaign_id);
        assert_eq!(r.revenue, 0.0, "{}", r.campaign_id);
        assert_eq!(r.roi, -100.0, "{}", r.campaign_id);
    }
}

#[test]
fn rates_keep_fixed_precision() {
    let run = GenerationRun::execute(GeneratorConfig::default(), parse_date("2024-06-30").unwrap())
        .unwrap();
    let has_dp = |x: f64, dp: i32| {
        let scaled = x * 10f64.powi(dp);
        (scaled - scaled.round()).abs() < 1e-6
    };
    for r in &run.records {
        assert!(has_dp(r.ctr, 3) && has_dp(r.cpc, 3) && has_dp(r.roas, 3), "{}", r.campaign_id);
        assert!(has_dp(r.roi, 2) && has_dp(r.frequency, 2), "{}", r.campaign_id);
        assert!(has_dp(r.revenue, 2), "{}", r.campaign_id);
    }
}
