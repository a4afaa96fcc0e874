//! Campaign categories and the curated name templates for each.
//!
//! Template draws consume the run RNG, so the lists below are part of
//! the reproducibility contract: append-only, never reorder.

use crate::{config::IntRange, rng::CampaignRng};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CampaignType {
    Awareness,
    Engagement,
    Conversion,
}

impl CampaignType {
    /// Draw order: index into this list.
    pub const ALL: [CampaignType; 3] = [
        CampaignType::Awareness,
        CampaignType::Engagement,
        CampaignType::Conversion,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Awareness  => "Awareness",
            Self::Engagement => "Engagement",
            Self::Conversion => "Conversion",
        }
    }

    /// Name templates; `{}` receives the template number.
    pub fn name_templates(&self) -> &'static [&'static str] {
        match self {
            Self::Awareness => &[
                "Brand Awareness Q{}", "Product Launch {}", "New Collection {}",
                "Seasonal Campaign {}", "Brand Story {}",
            ],
            Self::Engagement => &[
                "Engagement Boost {}", "Community Building {}", "Interactive Contest {}",
                "User Generated Content {}", "Poll Campaign {}",
            ],
            Self::Conversion => &[
                "Flash Sale {}", "Limited Offer {}", "Retargeting Campaign {}",
                "Holiday Promotion {}", "Black Friday {}",
            ],
        }
    }
}

impl fmt::Display for CampaignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    Facebook,
    Instagram,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Facebook, Platform::Instagram];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Facebook  => "Facebook",
            Self::Instagram => "Instagram",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Pick a template for `campaign_type`, then a number from `numbers`.
/// Consumes exactly two draws, template first.
pub fn draw_campaign_name(
    campaign_type: CampaignType,
    numbers: IntRange,
    rng: &mut CampaignRng,
) -> String {
    let template = rng.choose(campaign_type.name_templates());
    let number = rng.int_inclusive(numbers.min, numbers.max);
    template.replacen("{}", &number.to_string(), 1)
}
