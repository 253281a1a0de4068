//! Aggregate statistics over the shipment collection.
//!
//! Everything here is pure: the caller supplies the shipments and the
//! reference instant, which keeps the 30-day window testable.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use shiptrack_commons::{Shipment, ShipmentStatus};
use std::collections::BTreeMap;

/// Count of shipments observed with one status value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

/// Count of shipments observed with one category value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Shipments created on one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: String,
    pub count: usize,
}

/// Headline totals. Only the three named statuses get a dedicated
/// counter; everything else is visible in `status_counts` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsTotals {
    pub total: usize,
    pub delivered: usize,
    pub in_transit: usize,
    pub pending: usize,
}

/// The full aggregate payload served by `GET /api/stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentStats {
    pub status_counts: Vec<StatusCount>,
    pub category_counts: Vec<CategoryCount>,
    pub daily_shipments: Vec<DailyCount>,
    pub totals: StatsTotals,
}

/// Window for the daily-shipments series, in days.
const DAILY_WINDOW_DAYS: i64 = 30;

/// Compute all aggregates in one pass over the shipment collection.
///
/// `status_counts` and `category_counts` keep first-seen order (iteration
/// order over the collection). `daily_shipments` covers shipments created
/// within the last 30 days of `now`, inclusive, ascending by date string.
pub fn compute(shipments: &[Shipment], now: DateTime<Utc>) -> ShipmentStats {
    let mut status_counts: Vec<StatusCount> = Vec::new();
    let mut category_counts: Vec<CategoryCount> = Vec::new();
    let mut daily: BTreeMap<String, usize> = BTreeMap::new();

    let cutoff = now - Duration::days(DAILY_WINDOW_DAYS);

    for shipment in shipments {
        let status = shipment.status.as_str();
        match status_counts.iter_mut().find(|c| c.status == status) {
            Some(entry) => entry.count += 1,
            None => status_counts.push(StatusCount {
                status: status.to_string(),
                count: 1,
            }),
        }

        match category_counts
            .iter_mut()
            .find(|c| c.category == shipment.category)
        {
            Some(entry) => entry.count += 1,
            None => category_counts.push(CategoryCount {
                category: shipment.category.clone(),
                count: 1,
            }),
        }

        if shipment.created_at >= cutoff {
            let date = shipment.created_at.date_naive().to_string();
            *daily.entry(date).or_insert(0) += 1;
        }
    }

    let count_with = |status: ShipmentStatus| {
        shipments.iter().filter(|s| s.status == status).count()
    };

    ShipmentStats {
        status_counts,
        category_counts,
        // BTreeMap iteration is already ascending by date string
        daily_shipments: daily
            .into_iter()
            .map(|(date, count)| DailyCount { date, count })
            .collect(),
        totals: StatsTotals {
            total: shipments.len(),
            delivered: count_with(ShipmentStatus::Delivered),
            in_transit: count_with(ShipmentStatus::InTransit),
            pending: count_with(ShipmentStatus::Pending),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiptrack_commons::ShipmentId;

    fn shipment(
        id: &str,
        status: ShipmentStatus,
        category: &str,
        created_at: DateTime<Utc>,
    ) -> Shipment {
        Shipment {
            id: ShipmentId::new(id),
            tracking_number: format!("TRK-{}", id),
            sender_name: "Alice".to_string(),
            receiver_name: "Bob".to_string(),
            origin: "Oslo".to_string(),
            destination: "Bergen".to_string(),
            weight: None,
            category: category.to_string(),
            status,
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn test_counts_keep_first_seen_order() {
        let now = Utc::now();
        let shipments = vec![
            shipment("1", ShipmentStatus::Delivered, "Electronics", now),
            shipment("2", ShipmentStatus::Pending, "General", now),
            shipment("3", ShipmentStatus::Delivered, "General", now),
        ];

        let stats = compute(&shipments, now);

        assert_eq!(
            stats.status_counts,
            vec![
                StatusCount {
                    status: "Delivered".to_string(),
                    count: 2
                },
                StatusCount {
                    status: "Pending".to_string(),
                    count: 1
                },
            ]
        );
        assert_eq!(stats.category_counts[0].category, "Electronics");
        assert_eq!(stats.category_counts[1].category, "General");
        assert_eq!(stats.category_counts[1].count, 2);
    }

    #[test]
    fn test_daily_window_excludes_old_shipments() {
        let now = Utc::now();
        let shipments = vec![
            shipment("1", ShipmentStatus::Pending, "General", now - Duration::days(1)),
            shipment("2", ShipmentStatus::Pending, "General", now - Duration::days(1)),
            shipment("3", ShipmentStatus::Pending, "General", now - Duration::days(40)),
        ];

        let stats = compute(&shipments, now);

        assert_eq!(stats.daily_shipments.len(), 1);
        assert_eq!(stats.daily_shipments[0].count, 2);
        // The 40-day-old shipment still shows up in the totals
        assert_eq!(stats.totals.total, 3);
    }

    #[test]
    fn test_daily_series_sorted_ascending() {
        let now = Utc::now();
        let shipments = vec![
            shipment("1", ShipmentStatus::Pending, "General", now),
            shipment("2", ShipmentStatus::Pending, "General", now - Duration::days(3)),
            shipment("3", ShipmentStatus::Pending, "General", now - Duration::days(1)),
        ];

        let stats = compute(&shipments, now);

        let dates: Vec<&str> = stats.daily_shipments.iter().map(|d| d.date.as_str()).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_totals_track_only_named_statuses() {
        let now = Utc::now();
        let shipments = vec![
            shipment("1", ShipmentStatus::Delivered, "General", now),
            shipment("2", ShipmentStatus::InTransit, "General", now),
            shipment("3", ShipmentStatus::Pending, "General", now),
            shipment("4", ShipmentStatus::Failed, "General", now),
            shipment("5", ShipmentStatus::Returned, "General", now),
        ];

        let stats = compute(&shipments, now);

        assert_eq!(stats.totals.total, 5);
        assert_eq!(stats.totals.delivered, 1);
        assert_eq!(stats.totals.in_transit, 1);
        assert_eq!(stats.totals.pending, 1);
        // Failed/Returned appear in status_counts but have no total bucket
        assert!(stats.status_counts.iter().any(|c| c.status == "Failed"));
    }

    #[test]
    fn test_stats_serialize_with_camel_case_keys() {
        let stats = compute(&[], Utc::now());
        let json = serde_json::to_value(&stats).unwrap();
        assert!(json.get("statusCounts").is_some());
        assert!(json.get("categoryCounts").is_some());
        assert!(json.get("dailyShipments").is_some());
        assert!(json["totals"].get("inTransit").is_some());
    }
}
