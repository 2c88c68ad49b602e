use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::prospect::Prospect;

use super::status::PipelineStatus;

/// How far ahead `upcoming` looks, in days.
const UPCOMING_WINDOW_DAYS: i64 = 7;

// ─── Classification ─────────────────────────────────────────────────────────

/// Prospects partitioned by how their next-action date compares to `today`.
/// A prospect without a next-action date lands in no bucket.
#[derive(Debug, Default)]
pub struct FollowupBuckets<'a> {
    pub due_today: Vec<&'a Prospect>,
    pub overdue: Vec<&'a Prospect>,
    pub upcoming: Vec<&'a Prospect>,
}

/// Partition prospects into due-today / overdue / upcoming-within-7-days.
///
/// Dates are compared as plain calendar days; callers normalize to local
/// midnight by handing in `today` from the local clock.
pub fn classify<'a>(prospects: &'a [Prospect], today: NaiveDate) -> FollowupBuckets<'a> {
    let horizon = today + Duration::days(UPCOMING_WINDOW_DAYS);
    let mut buckets = FollowupBuckets::default();
    for prospect in prospects {
        let Some(due) = prospect.next_action_date else {
            continue;
        };
        if due == today {
            buckets.due_today.push(prospect);
        } else if due < today {
            buckets.overdue.push(prospect);
        } else if due <= horizon {
            buckets.upcoming.push(prospect);
        }
    }
    buckets
}

// ─── Funnel statistics ──────────────────────────────────────────────────────

/// Count prospects per status. Every status key is present, zero included,
/// so downstream rendering never has to special-case missing rows.
pub fn count_by_status(prospects: &[Prospect]) -> BTreeMap<PipelineStatus, usize> {
    let mut counts: BTreeMap<PipelineStatus, usize> = PipelineStatus::ALL
        .into_iter()
        .map(|status| (status, 0))
        .collect();
    for prospect in prospects {
        *counts.entry(prospect.pipeline_status).or_insert(0) += 1;
    }
    counts
}

/// Aggregate conversion-rate metrics over a status distribution. Rates are
/// percentages with one-decimal rounding; an empty funnel yields all zeros.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FunnelStats {
    pub total: usize,
    pub connection_rate: f64,
    pub response_rate: f64,
    pub meeting_rate: f64,
    pub conversion_rate: f64,
}

/// Share of prospects at or past `milestone`, as a percentage.
///
/// `Ignored` sorts after every milestone but contributes to the total only:
/// a dropped prospect is not evidence of funnel progress.
fn rate_at_or_past(
    counts: &BTreeMap<PipelineStatus, usize>,
    total: usize,
    milestone: PipelineStatus,
) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let reached: usize = counts
        .iter()
        .filter(|(status, _)| **status != PipelineStatus::Ignored)
        .filter(|(status, _)| status.order() >= milestone.order())
        .map(|(_, count)| count)
        .sum();
    let percentage = reached as f64 / total as f64 * 100.0;
    (percentage * 10.0).round() / 10.0
}

pub fn funnel_stats(counts: &BTreeMap<PipelineStatus, usize>) -> FunnelStats {
    let total: usize = counts.values().sum();
    FunnelStats {
        total,
        connection_rate: rate_at_or_past(counts, total, PipelineStatus::Connected),
        response_rate: rate_at_or_past(counts, total, PipelineStatus::RespondedWarm),
        meeting_rate: rate_at_or_past(counts, total, PipelineStatus::MeetingBooked),
        conversion_rate: rate_at_or_past(counts, total, PipelineStatus::Converted),
    }
}

/// Convenience: counts + stats straight from a prospect collection.
pub fn funnel_stats_for(prospects: &[Prospect]) -> FunnelStats {
    funnel_stats(&count_by_status(prospects))
}
