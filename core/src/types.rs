//! Shared primitive types used across the generator.

/// Sequential campaign identifier, e.g. `CMP0001`.
pub type CampaignId = String;

/// Whole-day count between two calendar dates.
pub type Days = i64;

/// Format the 0-based generation index as a campaign identifier.
pub fn campaign_id(index: usize) -> CampaignId {
    format!("CMP{:04}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_one_based_and_zero_padded() {
        assert_eq!(campaign_id(0), "CMP0001");
        assert_eq!(campaign_id(99), "CMP0100");
        assert_eq!(campaign_id(12_344), "CMP12345");
    }
}
