//! Business Partners
//!
//! The organisations that own the vehicles.

use serde::Serialize;

use fleet_events::PartnerId;

/// File name of the partner list written next to the snapshots
pub const PARTNERS_FILE: &str = "partners.json";

/// An organisation operating part of the fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partner {
    pub id: PartnerId,
    pub name: String,
}

/// Creates partners `Partner 1..=count` with ids 1..=count.
pub fn create_partners(count: u32) -> Vec<Partner> {
    (1..=count)
        .map(|i| Partner {
            id: PartnerId(i),
            name: format!("Partner {}", i),
        })
        .collect()
}

/// How many vehicles each partner gets: an even split, with the remainder
/// handed out one each to the first partners.
pub fn vehicles_per_partner(total: usize, partners: usize) -> Vec<usize> {
    if partners == 0 {
        return Vec::new();
    }
    let base = total / partners;
    let remainder = total % partners;
    (0..partners)
        .map(|i| base + usize::from(i < remainder))
        .collect()
}

/// Output partners as JSON for the sidebar
pub fn partners_to_json(partners: &[Partner]) -> String {
    serde_json::to_string_pretty(partners).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partner_creation() {
        let partners = create_partners(11);

        assert_eq!(partners.len(), 11);
        assert_eq!(partners[0].id, PartnerId(1));
        assert_eq!(partners[0].name, "Partner 1");
        assert_eq!(partners[10].name, "Partner 11");
    }

    #[test]
    fn test_even_split_with_remainder() {
        let split = vehicles_per_partner(1000, 11);

        assert_eq!(split.iter().sum::<usize>(), 1000);
        // 1000 = 11 * 90 + 10
        assert_eq!(&split[..10], &[91; 10]);
        assert_eq!(split[10], 90);
    }

    #[test]
    fn test_split_edge_cases() {
        assert_eq!(vehicles_per_partner(3, 5), vec![1, 1, 1, 0, 0]);
        assert!(vehicles_per_partner(10, 0).is_empty());
    }

    #[test]
    fn test_partners_json() {
        let json = partners_to_json(&create_partners(2));
        assert!(json.contains("\"Partner 2\""));
    }

    #[test]
    fn test_partner_json_lists_ids_and_names() {
        let json = partners_to_json(&create_partners(3));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        let entries = parsed.as_array().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2]["id"], 3);
        assert_eq!(entries[2]["name"], "Partner 3");
    }
}
