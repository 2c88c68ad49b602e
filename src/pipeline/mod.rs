pub mod followup;
pub mod status;

pub use followup::{
    FollowupBuckets, FunnelStats, classify, count_by_status, funnel_stats, funnel_stats_for,
};
pub use status::{PipelineStatus, Transition, advance, advance_today, auto_advance};
