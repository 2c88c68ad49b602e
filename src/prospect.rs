use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::pipeline::PipelineStatus;

/// A person being worked through the outreach funnel.
///
/// Identity is the platform-qualified handle. Profile attributes feed prompt
/// construction; `pipeline_status` and `next_action_date` are the two mutable
/// fields and always change together (see [`crate::pipeline::advance`]).
/// Prospects are created on import and never deleted by this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prospect {
    pub platform: String,
    pub handle: String,
    pub display_name: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    /// Text of the prospect's most recent public post, when known.
    #[serde(default)]
    pub recent_post: Option<String>,
    #[serde(default, deserialize_with = "lossy_status")]
    pub pipeline_status: PipelineStatus,
    #[serde(default)]
    pub next_action_date: Option<NaiveDate>,
}

/// Stored status ids normalize through [`PipelineStatus::parse`], so an
/// unknown id in old data reads back as `request_sent` instead of failing
/// the whole record.
fn lossy_status<'de, D>(deserializer: D) -> Result<PipelineStatus, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(PipelineStatus::parse(&raw))
}

impl Prospect {
    pub fn new(
        platform: impl Into<String>,
        handle: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            platform: platform.into(),
            handle: handle.into(),
            display_name: display_name.into(),
            headline: None,
            company: None,
            bio: None,
            recent_post: None,
            pipeline_status: PipelineStatus::default(),
            next_action_date: None,
        }
    }

    /// `platform:handle`, the stable identity used by callers' stores.
    pub fn qualified_handle(&self) -> String {
        format!("{}:{}", self.platform, self.handle)
    }

    /// Concrete profile elements available for personalization, labeled for
    /// prompt text. Order matters: the first element is the one the prompt
    /// steers the model toward.
    pub fn profile_elements(&self) -> Vec<(&'static str, &str)> {
        let mut elements = Vec::new();
        if let Some(post) = self.recent_post.as_deref() {
            elements.push(("their most recent post", post));
        }
        if let Some(headline) = self.headline.as_deref() {
            elements.push(("their headline", headline));
        }
        if let Some(company) = self.company.as_deref() {
            elements.push(("their company", company));
        }
        if let Some(bio) = self.bio.as_deref() {
            elements.push(("their bio", bio));
        }
        elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_prospect_starts_at_request_sent() {
        let prospect = Prospect::new("linkedin", "marie.curie", "Marie Curie");
        assert_eq!(prospect.pipeline_status, PipelineStatus::RequestSent);
        assert!(prospect.next_action_date.is_none());
        assert_eq!(prospect.qualified_handle(), "linkedin:marie.curie");
    }

    #[test]
    fn profile_elements_ordered_most_recent_post_first() {
        let mut prospect = Prospect::new("linkedin", "jd", "Jane Doe");
        prospect.headline = Some("VP Engineering".into());
        prospect.recent_post = Some("Shipping is a feature".into());

        let elements = prospect.profile_elements();
        assert_eq!(elements[0].0, "their most recent post");
        assert_eq!(elements[1].1, "VP Engineering");
    }

    #[test]
    fn unknown_stored_status_reads_back_as_request_sent() {
        let json = r#"{"platform":"linkedin","handle":"jd","display_name":"Jane Doe","pipeline_status":"abducted_by_aliens"}"#;
        let prospect: Prospect = serde_json::from_str(json).unwrap();
        assert_eq!(prospect.pipeline_status, PipelineStatus::RequestSent);
    }

    #[test]
    fn known_stored_status_round_trips() {
        let mut prospect = Prospect::new("linkedin", "jd", "Jane Doe");
        prospect.pipeline_status = PipelineStatus::MeetingBooked;
        let json = serde_json::to_string(&prospect).unwrap();
        assert!(json.contains("\"meeting_booked\""));
        let decoded: Prospect = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.pipeline_status, PipelineStatus::MeetingBooked);
    }

    #[test]
    fn deserializes_with_missing_status_as_request_sent() {
        let json = r#"{"platform":"linkedin","handle":"jd","display_name":"Jane Doe"}"#;
        let prospect: Prospect = serde_json::from_str(json).unwrap();
        assert_eq!(prospect.pipeline_status, PipelineStatus::RequestSent);
        assert!(prospect.next_action_date.is_none());
    }
}
