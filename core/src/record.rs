//! The flat campaign row written to and read back from the dataset file.
//!
//! Field order is the column order of the CSV. Never reorder.

use crate::{
    catalog::{CampaignType, Platform},
    derived::DerivedMetrics,
    generator::CampaignDraft,
    metrics::RawMetrics,
    types::{CampaignId, Days},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Column headers, in file order.
pub const COLUMNS: [&str; 23] = [
    "Campaign ID", "Campaign Name", "Platform", "Campaign Type", "Start Date", "End Date",
    "Budget", "Impressions", "Reach", "Clicks", "Engagement", "Conversions", "Revenue",
    "Duration", "CTR", "Engagement Rate", "Conversion Rate", "CPC", "CPM",
    "Cost Per Conversion", "ROAS", "ROI", "Frequency",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    #[serde(rename = "Campaign ID")]
    pub campaign_id: CampaignId,
    #[serde(rename = "Campaign Name")]
    pub campaign_name: String,
    #[serde(rename = "Platform")]
    pub platform: Platform,
    #[serde(rename = "Campaign Type")]
    pub campaign_type: CampaignType,
    #[serde(rename = "Start Date")]
    pub start_date: NaiveDate,
    #[serde(rename = "End Date")]
    pub end_date: NaiveDate,
    #[serde(rename = "Budget")]
    pub budget: f64,
    #[serde(rename = "Impressions")]
    pub impressions: u64,
    #[serde(rename = "Reach")]
    pub reach: u64,
    #[serde(rename = "Clicks")]
    pub clicks: u64,
    #[serde(rename = "Engagement")]
    pub engagement: u64,
    #[serde(rename = "Conversions")]
    pub conversions: u64,
    #[serde(rename = "Revenue")]
    pub revenue: f64,
    #[serde(rename = "Duration")]
    pub duration: Days,
    #[serde(rename = "CTR")]
    pub ctr: f64,
    #[serde(rename = "Engagement Rate")]
    pub engagement_rate: f64,
    #[serde(rename = "Conversion Rate")]
    pub conversion_rate: f64,
    #[serde(rename = "CPC")]
    pub cpc: f64,
    #[serde(rename = "CPM")]
    pub cpm: f64,
    #[serde(rename = "Cost Per Conversion")]
    pub cost_per_conversion: f64,
    #[serde(rename = "ROAS")]
    pub roas: f64,
    #[serde(rename = "ROI")]
    pub roi: f64,
    #[serde(rename = "Frequency")]
    pub frequency: f64,
}

impl CampaignRecord {
    pub fn from_parts(draft: CampaignDraft, derived: DerivedMetrics) -> Self {
        let RawMetrics { impressions, reach, clicks, engagement, conversions, revenue } =
            draft.metrics;
        Self {
            campaign_id: draft.campaign_id,
            campaign_name: draft.campaign_name,
            platform: draft.platform,
            campaign_type: draft.campaign_type,
            start_date: draft.start_date,
            end_date: draft.end_date,
            budget: draft.budget,
            impressions,
            reach,
            clicks,
            engagement,
            conversions,
            revenue,
            duration: derived.duration,
            ctr: derived.ctr,
            engagement_rate: derived.engagement_rate,
            conversion_rate: derived.conversion_rate,
            cpc: derived.cpc,
            cpm: derived.cpm,
            cost_per_conversion: derived.cost_per_conversion,
            roas: derived.roas,
            roi: derived.roi,
            frequency: derived.frequency,
        }
    }
}
