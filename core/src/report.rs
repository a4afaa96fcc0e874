//! Reporting: read-only aggregation over the finished dataset, plus the
//! console report and the dataset information file built from it.

use crate::{
    catalog::{CampaignType, Platform},
    derived::zero_if_non_finite,
    error::GenResult,
    record::CampaignRecord,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Write as _,
    path::Path,
};

pub const RANKING_SIZE: usize = 5;
pub const PREVIEW_ROWS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformRollup {
    pub platform: Platform,
    pub campaigns: usize,
    pub budget: f64,
    pub revenue: f64,
    pub mean_roi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeRollup {
    pub campaign_type: CampaignType,
    pub campaigns: usize,
    pub budget: f64,
    pub revenue: f64,
    pub mean_roi: f64,
    pub mean_ctr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiEntry {
    pub campaign_id: String,
    pub campaign_name: String,
    pub platform: Platform,
    pub campaign_type: CampaignType,
    pub budget: f64,
    pub revenue: f64,
    pub roi: f64,
}

impl From<&CampaignRecord> for RoiEntry {
    fn from(r: &CampaignRecord) -> Self {
        Self {
            campaign_id: r.campaign_id.clone(),
            campaign_name: r.campaign_name.clone(),
            platform: r.platform,
            campaign_type: r.campaign_type,
            budget: r.budget,
            revenue: r.revenue,
            roi: r.roi,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub record_count: usize,
    pub first_start: Option<NaiveDate>,
    pub last_end: Option<NaiveDate>,
    pub platforms: Vec<Platform>,
    pub campaign_types: Vec<CampaignType>,
    pub total_budget: f64,
    pub total_revenue: f64,
    /// ROI of the whole portfolio, not the mean of per-campaign ROI.
    pub overall_roi: f64,
    pub mean_roi: f64,
    pub mean_ctr: f64,
    pub mean_conversion_rate: f64,
    pub mean_roas: f64,
    pub mean_cpc: f64,
    pub mean_cpm: f64,
    pub total_impressions: u64,
    pub total_reach: u64,
    pub total_clicks: u64,
    pub total_conversions: u64,
    pub by_platform: Vec<PlatformRollup>,
    pub by_type: Vec<TypeRollup>,
    pub top_by_roi: Vec<RoiEntry>,
    pub bottom_by_roi: Vec<RoiEntry>,
}

impl Summary {
    pub fn from_records(records: &[CampaignRecord]) -> Self {
        let total_budget: f64 = records.iter().map(|r| r.budget).sum();
        let total_revenue: f64 = records.iter().map(|r| r.revenue).sum();

        let platforms: BTreeSet<Platform> = records.iter().map(|r| r.platform).collect();
        let campaign_types: BTreeSet<CampaignType> =
            records.iter().map(|r| r.campaign_type).collect();

        Self {
            record_count: records.len(),
            first_start: records.iter().map(|r| r.start_date).min(),
            last_end: records.iter().map(|r| r.end_date).max(),
            platforms: platforms.into_iter().collect(),
            campaign_types: campaign_types.into_iter().collect(),
            total_budget,
            total_revenue,
            overall_roi: zero_if_non_finite((total_revenue - total_budget) / total_budget * 100.0),
            mean_roi: mean(records.iter().map(|r| r.roi)),
            mean_ctr: mean(records.iter().map(|r| r.ctr)),
            mean_conversion_rate: mean(records.iter().map(|r| r.conversion_rate)),
            mean_roas: mean(records.iter().map(|r| r.roas)),
            mean_cpc: mean(records.iter().map(|r| r.cpc)),
            mean_cpm: mean(records.iter().map(|r| r.cpm)),
            total_impressions: records.iter().map(|r| r.impressions).sum(),
            total_reach: records.iter().map(|r| r.reach).sum(),
            total_clicks: records.iter().map(|r| r.clicks).sum(),
            total_conversions: records.iter().map(|r| r.conversions).sum(),
            by_platform: platform_rollups(records),
            by_type: type_rollups(records),
            top_by_roi: rank_by_roi(records, true),
            bottom_by_roi: rank_by_roi(records, false),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

fn platform_rollups(records: &[CampaignRecord]) -> Vec<PlatformRollup> {
    let mut groups: BTreeMap<Platform, Vec<&CampaignRecord>> = BTreeMap::new();
    for r in records {
        groups.entry(r.platform).or_default().push(r);
    }
    groups
        .into_iter()
        .map(|(platform, rows)| PlatformRollup {
            platform,
            campaigns: rows.len(),
            budget: rows.iter().map(|r| r.budget).sum(),
            revenue: rows.iter().map(|r| r.revenue).sum(),
            mean_roi: mean(rows.iter().map(|r| r.roi)),
        })
        .collect()
}

/// Grouped in label order, like a sorted group-by.
fn type_rollups(records: &[CampaignRecord]) -> Vec<TypeRollup> {
    let mut groups: BTreeMap<&'static str, (CampaignType, Vec<&CampaignRecord>)> = BTreeMap::new();
    for r in records {
        groups
            .entry(r.campaign_type.label())
            .or_insert_with(|| (r.campaign_type, Vec::new()))
            .1
            .push(r);
    }
    groups
        .into_values()
        .map(|(campaign_type, rows)| TypeRollup {
            campaign_type,
            campaigns: rows.len(),
            budget: rows.iter().map(|r| r.budget).sum(),
            revenue: rows.iter().map(|r| r.revenue).sum(),
            mean_roi: mean(rows.iter().map(|r| r.roi)),
            mean_ctr: mean(rows.iter().map(|r| r.ctr)),
        })
        .collect()
}

/// Stable sort: ties keep generation order.
fn rank_by_roi(records: &[CampaignRecord], highest_first: bool) -> Vec<RoiEntry> {
    let mut ranked: Vec<&CampaignRecord> = records.iter().collect();
    if highest_first {
        ranked.sort_by(|a, b| b.roi.total_cmp(&a.roi));
    } else {
        ranked.sort_by(|a, b| a.roi.total_cmp(&b.roi));
    }
    ranked.into_iter().take(RANKING_SIZE).map(RoiEntry::from).collect()
}

// ── Text rendering ────────────────────────────────────────────────

/// `1234567` → `1,234,567`.
pub fn thousands(n: u64) -> String {
    group_digits(&n.to_string())
}

/// `-1234.5` → `-$1,234.50`.
pub fn money(x: f64) -> String {
    let fixed = format!("{:.2}", x.abs());
    let (int_part, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if x < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${}.{frac}", group_digits(int_part))
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn date_or_dash(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".into())
}

fn labels<T: std::fmt::Display>(items: &[T]) -> String {
    items.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
}

/// The console report: preview, global statistics, breakdowns, rankings.
pub fn console_report(summary: &Summary, records: &[CampaignRecord]) -> String {
    let mut out = String::new();
    let rule = "=".repeat(70);

    let _ = writeln!(out, "Data preview (first {} rows):", PREVIEW_ROWS.min(records.len()));
    let _ = writeln!(
        out,
        "  {:<8} {:<28} {:<10} {:<11} {:>10} {:>10} {:>8}",
        "ID", "Name", "Platform", "Type", "Budget", "Revenue", "ROI"
    );
    for r in records.iter().take(PREVIEW_ROWS) {
        let _ = writeln!(
            out,
            "  {:<8} {:<28} {:<10} {:<11} {:>10.2} {:>10.2} {:>8.2}",
            r.campaign_id, r.campaign_name, r.platform, r.campaign_type, r.budget, r.revenue, r.roi
        );
    }

    let _ = writeln!(out, "\nGLOBAL STATISTICS\n{rule}");
    let _ = writeln!(out, "  Total budget:            {}", money(summary.total_budget));
    let _ = writeln!(out, "  Total revenue:           {}", money(summary.total_revenue));
    let _ = writeln!(out, "  Mean ROI:                {:.2}%", summary.mean_roi);
    let _ = writeln!(out, "  Mean CTR:                {:.3}%", summary.mean_ctr);
    let _ = writeln!(out, "  Mean conversion rate:    {:.3}%", summary.mean_conversion_rate);
    let _ = writeln!(out, "  Total impressions:       {}", thousands(summary.total_impressions));
    let _ = writeln!(out, "  Total reach:             {}", thousands(summary.total_reach));
    let _ = writeln!(out, "  Total clicks:            {}", thousands(summary.total_clicks));
    let _ = writeln!(out, "  Total conversions:       {}", thousands(summary.total_conversions));

    let _ = writeln!(out, "\nBREAKDOWN\n{rule}");
    let _ = writeln!(out, "By platform:");
    let _ = writeln!(out, "  {:<12} {:>14} {:>14} {:>9}", "Platform", "Budget", "Revenue", "ROI");
    for p in &summary.by_platform {
        let _ = writeln!(
            out,
            "  {:<12} {:>14.2} {:>14.2} {:>9.2}",
            p.platform, p.budget, p.revenue, p.mean_roi
        );
    }
    let _ = writeln!(out, "\nBy campaign type:");
    let _ = writeln!(
        out,
        "  {:<12} {:>14} {:>14} {:>9} {:>7}",
        "Type", "Budget", "Revenue", "ROI", "CTR"
    );
    for t in &summary.by_type {
        let _ = writeln!(
            out,
            "  {:<12} {:>14.2} {:>14.2} {:>9.2} {:>7.2}",
            t.campaign_type, t.budget, t.revenue, t.mean_roi, t.mean_ctr
        );
    }

    for (title, entries) in [
        ("TOP 5 CAMPAIGNS BY ROI", &summary.top_by_roi),
        ("BOTTOM 5 CAMPAIGNS BY ROI", &summary.bottom_by_roi),
    ] {
        let _ = writeln!(out, "\n{title}:");
        for e in entries {
            let _ = writeln!(
                out,
                "  {:<8} {:<28} {:<10} {:<11} {:>10.2} {:>10.2} {:>8.2}",
                e.campaign_id, e.campaign_name, e.platform, e.campaign_type, e.budget, e.revenue, e.roi
            );
        }
    }
    out
}

/// The dataset information file: overview, totals, rates, column glossary.
pub fn info_text(summary: &Summary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Dataset Information - Social Media Campaign Performance\n");

    let _ = writeln!(out, "## Overview");
    let _ = writeln!(out, "- **Total Campaigns**: {}", summary.record_count);
    let _ = writeln!(
        out,
        "- **Date Range**: {} to {}",
        date_or_dash(summary.first_start),
        date_or_dash(summary.last_end)
    );
    let _ = writeln!(
        out,
        "- **Platforms**: {} ({})",
        summary.platforms.len(),
        labels(&summary.platforms)
    );
    let _ = writeln!(
        out,
        "- **Campaign Types**: {} ({})\n",
        summary.campaign_types.len(),
        labels(&summary.campaign_types)
    );

    let _ = writeln!(out, "## Financial Metrics");
    let _ = writeln!(out, "- **Total Budget**: {}", money(summary.total_budget));
    let _ = writeln!(out, "- **Total Revenue**: {}", money(summary.total_revenue));
    let _ = writeln!(out, "- **Overall ROI**: {:.2}%", summary.overall_roi);
    let _ = writeln!(out, "- **Average ROAS**: {:.2}\n", summary.mean_roas);

    let _ = writeln!(out, "## Performance Metrics");
    let _ = writeln!(out, "- **Average CTR**: {:.3}%", summary.mean_ctr);
    let _ = writeln!(out, "- **Average Conversion Rate**: {:.3}%", summary.mean_conversion_rate);
    let _ = writeln!(out, "- **Average CPC**: {}", money(summary.mean_cpc));
    let _ = writeln!(out, "- **Average CPM**: {}", money(summary.mean_cpm));
    let _ = writeln!(out, "- **Total Impressions**: {}", thousands(summary.total_impressions));
    let _ = writeln!(out, "- **Total Conversions**: {}\n", thousands(summary.total_conversions));

    let _ = writeln!(out, "## Columns Description");
    for (i, (column, description)) in COLUMN_GLOSSARY.iter().enumerate() {
        let _ = writeln!(out, "{}. **{column}**: {description}", i + 1);
    }

    let _ = writeln!(out, "\n## Usage");
    let _ = writeln!(out, "Perfect for:");
    for line in [
        "Marketing analytics practice",
        "ROI optimization",
        "Campaign performance comparison",
        "A/B testing analysis",
        "Budget allocation strategies",
    ] {
        let _ = writeln!(out, "- {line}");
    }
    out
}

pub fn write_info(path: &Path, summary: &Summary) -> GenResult<()> {
    std::fs::write(path, info_text(summary))?;
    log::info!("Wrote dataset information to {}", path.display());
    Ok(())
}

/// One entry per CSV column, in column order.
pub const COLUMN_GLOSSARY: [(&str, &str); 23] = [
    ("Campaign ID", "Unique identifier"),
    ("Campaign Name", "Name of the campaign"),
    ("Platform", "Facebook or Instagram"),
    ("Campaign Type", "Awareness, Engagement, or Conversion"),
    ("Start Date", "Campaign start date"),
    ("End Date", "Campaign end date"),
    ("Budget", "Total budget allocated ($)"),
    ("Impressions", "Number of times the ad was displayed"),
    ("Reach", "Number of unique users reached"),
    ("Clicks", "Number of clicks on the ad"),
    ("Engagement", "Total interactions (likes, comments, shares)"),
    ("Conversions", "Number of conversions/purchases"),
    ("Revenue", "Total revenue generated ($)"),
    ("Duration", "Days between start and end date"),
    ("CTR", "Click-Through Rate (%)"),
    ("Engagement Rate", "Percentage of reach that engaged"),
    ("Conversion Rate", "Percentage of clicks that converted"),
    ("CPC", "Cost Per Click ($)"),
    ("CPM", "Cost Per Mille/1000 Impressions ($)"),
    ("Cost Per Conversion", "Average cost to get one conversion ($)"),
    ("ROAS", "Return on Ad Spend (Revenue/Budget)"),
    ("ROI", "Return on Investment (%)"),
    ("Frequency", "Average impressions per unique user (Impressions/Reach)"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::parse_date, record::COLUMNS};

    fn record(id: &str, platform: Platform, campaign_type: CampaignType, budget: f64, revenue: f64) -> CampaignRecord {
        CampaignRecord {
            campaign_id: id.into(),
            campaign_name: format!("Campaign {id}"),
            platform,
            campaign_type,
            start_date: parse_date("2024-03-01").unwrap(),
            end_date: parse_date("2024-03-20").unwrap(),
            budget,
            impressions: 1_000,
            reach: 900,
            clicks: 10,
            engagement: 20,
            conversions: 1,
            revenue,
            duration: 19,
            ctr: 1.0,
            engagement_rate: 2.222,
            conversion_rate: 10.0,
            cpc: budget / 10.0,
            cpm: budget,
            cost_per_conversion: budget,
            roas: revenue / budget,
            roi: (revenue - budget) / budget * 100.0,
            frequency: 1.11,
        }
    }

    #[test]
    fn number_formatting() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1_000), "1,000");
        assert_eq!(thousands(1_234_567), "1,234,567");
        assert_eq!(money(1_234_567.891), "$1,234,567.89");
        assert_eq!(money(-1_234.5), "-$1,234.50");
        assert_eq!(money(-0.001), "$0.00");
    }

    #[test]
    fn rollups_group_in_label_order() {
        let records = vec![
            record("CMP0001", Platform::Instagram, CampaignType::Engagement, 1_000.0, 500.0),
            record("CMP0002", Platform::Facebook, CampaignType::Conversion, 2_000.0, 3_000.0),
            record("CMP0003", Platform::Instagram, CampaignType::Awareness, 1_000.0, 1_500.0),
        ];
        let s = Summary::from_records(&records);
        let platforms: Vec<_> = s.by_platform.iter().map(|p| p.platform).collect();
        assert_eq!(platforms, vec![Platform::Facebook, Platform::Instagram]);
        let types: Vec<_> = s.by_type.iter().map(|t| t.campaign_type).collect();
        assert_eq!(
            types,
            vec![CampaignType::Awareness, CampaignType::Conversion, CampaignType::Engagement]
        );
        let instagram = &s.by_platform[1];
        assert_eq!(instagram.campaigns, 2);
        assert_eq!(instagram.budget, 2_000.0);
        assert_eq!(instagram.revenue, 2_000.0);
        assert_eq!(instagram.mean_roi, 0.0);
    }

    #[test]
    fn totals_and_overall_roi() {
        let records = vec![
            record("CMP0001", Platform::Facebook, CampaignType::Awareness, 1_000.0, 1_500.0),
            record("CMP0002", Platform::Facebook, CampaignType::Awareness, 3_000.0, 1_500.0),
        ];
        let s = Summary::from_records(&records);
        assert_eq!(s.total_budget, 4_000.0);
        assert_eq!(s.total_revenue, 3_000.0);
        assert_eq!(s.overall_roi, -25.0);
        assert_eq!(s.mean_roi, 0.0);
        assert_eq!(s.total_impressions, 2_000);
    }

    #[test]
    fn rankings_take_five_and_break_ties_by_order() {
        let records: Vec<_> = (1..=8)
            .map(|i| {
                let revenue = if i <= 2 { 2_000.0 } else { 100.0 * i as f64 };
                record(&format!("CMP{i:04}"), Platform::Facebook, CampaignType::Conversion, 1_000.0, revenue)
            })
            .collect();
        let s = Summary::from_records(&records);
        assert_eq!(s.top_by_roi.len(), RANKING_SIZE);
        assert_eq!(s.top_by_roi[0].campaign_id, "CMP0001");
        assert_eq!(s.top_by_roi[1].campaign_id, "CMP0002");
        assert_eq!(s.bottom_by_roi[0].campaign_id, "CMP0003");
        assert!(s.bottom_by_roi.windows(2).all(|w| w[0].roi <= w[1].roi));
    }

    #[test]
    fn empty_dataset_summarizes_to_zeros() {
        let s = Summary::from_records(&[]);
        assert_eq!(s.record_count, 0);
        assert_eq!(s.overall_roi, 0.0);
        assert_eq!(s.mean_ctr, 0.0);
        assert!(s.first_start.is_none());
        assert!(info_text(&s).contains("**Date Range**: - to -"));
    }

    #[test]
    fn glossary_covers_every_column() {
        let names: Vec<_> = COLUMN_GLOSSARY.iter().map(|(c, _)| *c).collect();
        assert_eq!(names, COLUMNS.to_vec());
    }

    #[test]
    fn info_text_lists_overview_and_totals() {
        let records = vec![
            record("CMP0001", Platform::Facebook, CampaignType::Awareness, 1_000.0, 1_500.0),
            record("CMP0002", Platform::Instagram, CampaignType::Engagement, 1_500.5, 0.0),
        ];
        let text = info_text(&Summary::from_records(&records));
        assert!(text.contains("- **Total Campaigns**: 2"));
        assert!(text.contains("- **Date Range**: 2024-03-01 to 2024-03-20"));
        assert!(text.contains("- **Platforms**: 2 (Facebook, Instagram)"));
        assert!(text.contains("- **Total Budget**: $2,500.50"));
        assert!(text.contains("23. **Frequency**"));
        assert!(text.contains("Perfect for:"));
    }

    #[test]
    fn console_report_has_every_section() {
        let records = vec![record("CMP0001", Platform::Facebook, CampaignType::Awareness, 1_000.0, 1_500.0)];
        let text = console_report(&Summary::from_records(&records), &records);
        for heading in ["GLOBAL STATISTICS", "By platform:", "By campaign type:", "TOP 5", "BOTTOM 5"] {
            assert!(text.contains(heading), "missing {heading}");
        }
        assert!(text.contains("Mean ROI:                50.00%"));
    }
}
