use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::prospect::Prospect;

// ─── Status set ─────────────────────────────────────────────────────────────

/// Discrete outreach state of a prospect within the funnel.
///
/// The set is closed and totally ordered (declaration order == funnel
/// order). `Converted` and `Ignored` are terminal. Unknown stored values
/// parse to `RequestSent` so caller bugs never crash pipeline bookkeeping.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PipelineStatus {
    #[default]
    RequestSent,
    Connected,
    MessageOneSent,
    FollowupOneSent,
    FollowupTwoSent,
    RespondedWarm,
    RespondedCold,
    MeetingBooked,
    Converted,
    Ignored,
}

impl PipelineStatus {
    pub const ALL: [Self; 10] = [
        Self::RequestSent,
        Self::Connected,
        Self::MessageOneSent,
        Self::FollowupOneSent,
        Self::FollowupTwoSent,
        Self::RespondedWarm,
        Self::RespondedCold,
        Self::MeetingBooked,
        Self::Converted,
        Self::Ignored,
    ];

    /// Position in the funnel, 1-based.
    pub fn order(self) -> u8 {
        match self {
            Self::RequestSent => 1,
            Self::Connected => 2,
            Self::MessageOneSent => 3,
            Self::FollowupOneSent => 4,
            Self::FollowupTwoSent => 5,
            Self::RespondedWarm => 6,
            Self::RespondedCold => 7,
            Self::MeetingBooked => 8,
            Self::Converted => 9,
            Self::Ignored => 10,
        }
    }

    /// No further automatic transitions happen from a terminal status.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Converted | Self::Ignored)
    }

    /// Statuses counted as positive outcomes in reporting.
    pub fn is_positive(self) -> bool {
        matches!(self, Self::RespondedWarm | Self::MeetingBooked | Self::Converted)
    }

    /// Lossy parse of a stored status id. Accepts snake_case and the legacy
    /// kebab-case ids; anything unrecognized normalizes to `RequestSent`.
    pub fn parse(id: &str) -> Self {
        let normalized = id.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "connected" => Self::Connected,
            "message_one_sent" | "message_1_sent" => Self::MessageOneSent,
            "followup_one_sent" | "followup_1_sent" => Self::FollowupOneSent,
            "followup_two_sent" | "followup_2_sent" => Self::FollowupTwoSent,
            "responded_warm" => Self::RespondedWarm,
            "responded_cold" => Self::RespondedCold,
            "meeting_booked" => Self::MeetingBooked,
            "converted" => Self::Converted,
            "ignored" => Self::Ignored,
            _ => Self::RequestSent,
        }
    }

    /// Days until the next automatic follow-up for this status, per the
    /// fixed offset table. `None` means a human decides the next move.
    pub fn followup_offset_days(self) -> Option<i64> {
        match self {
            Self::RequestSent | Self::MessageOneSent => Some(3),
            Self::Connected => Some(0),
            Self::FollowupOneSent => Some(4),
            Self::FollowupTwoSent => Some(7),
            Self::RespondedWarm
            | Self::RespondedCold
            | Self::MeetingBooked
            | Self::Converted
            | Self::Ignored => None,
        }
    }

    /// Deterministic next-action date derived from this status, or `None`
    /// when no automatic follow-up is scheduled.
    pub fn next_action_date(self, today: NaiveDate) -> Option<NaiveDate> {
        self.followup_offset_days()
            .map(|days| today + Duration::days(days))
    }

    /// Strict linear auto-advance. Response, meeting, and terminal statuses
    /// have no automatic successor: advancing past a human response requires
    /// an explicit human choice.
    pub fn default_next(self) -> Option<Self> {
        match self {
            Self::RequestSent => Some(Self::Connected),
            Self::Connected => Some(Self::MessageOneSent),
            Self::MessageOneSent => Some(Self::FollowupOneSent),
            Self::FollowupOneSent => Some(Self::FollowupTwoSent),
            Self::FollowupTwoSent => Some(Self::RespondedCold),
            Self::RespondedWarm
            | Self::RespondedCold
            | Self::MeetingBooked
            | Self::Converted
            | Self::Ignored => None,
        }
    }
}

// ─── Transitions ────────────────────────────────────────────────────────────

/// The `{status, next_action_date}` pair written back by the caller's
/// persistence layer. Both fields always change together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub status: PipelineStatus,
    pub next_action_date: Option<NaiveDate>,
}

/// Move a prospect to `target` and recompute its next-action date from the
/// new status.
///
/// Any status may be set to any other status by explicit caller action; only
/// the automatic advance ([`PipelineStatus::default_next`]) is constrained
/// to the linear table. That asymmetry is deliberate.
pub fn advance(prospect: &mut Prospect, target: PipelineStatus, today: NaiveDate) -> Transition {
    let next_action_date = target.next_action_date(today);
    tracing::debug!(
        prospect = %prospect.qualified_handle(),
        from = %prospect.pipeline_status,
        to = %target,
        next_action = ?next_action_date,
        "pipeline transition"
    );
    prospect.pipeline_status = target;
    prospect.next_action_date = next_action_date;
    Transition {
        status: target,
        next_action_date,
    }
}

/// [`advance`] with `today` taken from the local clock, normalized to local
/// midnight.
pub fn advance_today(prospect: &mut Prospect, target: PipelineStatus) -> Transition {
    advance(prospect, target, Local::now().date_naive())
}

/// Advance a prospect along the strict linear table, when its current status
/// has an automatic successor.
pub fn auto_advance(prospect: &mut Prospect, today: NaiveDate) -> Option<Transition> {
    prospect
        .pipeline_status
        .default_next()
        .map(|next| advance(prospect, next, today))
}
