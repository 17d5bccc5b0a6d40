/// Domain models for the widget
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Length of the requested observation window
pub const OBSERVATION_WINDOW_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Resolved widget settings, immutable after startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Base URL of the TOM instance, without trailing slash
    pub base_url: String,
    pub status_path: String,
    pub submission_path: String,
    pub target_id: u64,
    pub template_name: String,
    pub facility: String,
}

impl Configuration {
    /// Join a path returned by or configured for the backend onto the base URL
    pub fn absolute_url(&self, rel_url: &str) -> String {
        format!("{}{}", self.base_url, rel_url)
    }

    pub fn status_url(&self) -> String {
        self.absolute_url(&self.status_path)
    }

    pub fn submission_url(&self) -> String {
        self.absolute_url(&self.submission_path)
    }
}

/// Target status as returned by the status endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TargetStatus {
    pub target: Target,
    pub timelapses: Vec<Timelapse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Target {
    pub name: String,
    #[serde(default)]
    pub extra_fields: ExtraFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtraFields {
    #[serde(default)]
    pub description_markdown: Option<String>,
}

/// A generated timelapse. `format` is kept raw so that an unknown tag fails
/// the render pass instead of the whole document.
#[derive(Debug, Clone, Deserialize)]
pub struct Timelapse {
    pub url: String,
    pub frames: u64,
    pub created: i64,
    pub format: String,
}

/// Media formats a timelapse can be generated in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelapseFormat {
    Gif,
    Mp4,
    Webm,
}

impl TimelapseFormat {
    /// Parse the backend's format tag. Unknown tags are not guessed.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "gif" => Some(TimelapseFormat::Gif),
            "mp4" => Some(TimelapseFormat::Mp4),
            "webm" => Some(TimelapseFormat::Webm),
            _ => None,
        }
    }

    pub fn media_kind(self) -> MediaKind {
        match self {
            TimelapseFormat::Gif => MediaKind::Image,
            TimelapseFormat::Mp4 => MediaKind::Video { mime: "video/mp4" },
            TimelapseFormat::Webm => MediaKind::Video { mime: "video/webm" },
        }
    }
}

/// Which media element presents a timelapse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video { mime: &'static str },
}

/// Display-ready result of a status fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    pub name: String,
    pub description_html: String,
    pub timelapse: TimelapseSection,
}

/// State of the timelapse area. Exactly one of the timelapse and
/// no-timelapse areas is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelapseSection {
    Hidden,
    Shown(TimelapsePlan),
}

impl TimelapseSection {
    pub fn timelapse_visible(&self) -> bool {
        matches!(self, TimelapseSection::Shown(_))
    }

    pub fn no_timelapse_visible(&self) -> bool {
        !self.timelapse_visible()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelapsePlan {
    pub url: String,
    pub frames: u64,
    pub created_at: DateTime<Utc>,
    /// `created_at` formatted in the local time zone
    pub last_updated: String,
    pub media: MediaKind,
}

/// Observation booking sent to the submission endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ObservationRequest {
    pub target: u64,
    pub template_name: String,
    pub facility: String,
    pub email: String,
    pub overrides: WindowOverrides,
}

/// Observation window, serialized as ISO-8601 instants
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowOverrides {
    #[serde(serialize_with = "serialize_instant")]
    pub start: DateTime<Utc>,
    #[serde(serialize_with = "serialize_instant")]
    pub end: DateTime<Utc>,
}

impl WindowOverrides {
    /// Window of exactly seven days of elapsed time from `start`
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            start,
            end: start + Duration::seconds(OBSERVATION_WINDOW_SECONDS),
        }
    }
}

impl ObservationRequest {
    pub fn new(config: &Configuration, email: impl Into<String>, start: DateTime<Utc>) -> Self {
        Self {
            target: config.target_id,
            template_name: config.template_name.clone(),
            facility: config.facility.clone(),
            email: email.into(),
            overrides: WindowOverrides::starting_at(start),
        }
    }
}

fn serialize_instant<S>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&instant.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Lifecycle of one observation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

/// Result of a call to `SubmissionController::submit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Succeeded,
    Failed(String),
    /// Another submission was still in flight; nothing was done.
    Ignored,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config() -> Configuration {
        Configuration {
            base_url: "https://tom.example".to_string(),
            status_path: "/api/target/7/".to_string(),
            submission_path: "/api/observe/".to_string(),
            target_id: 7,
            template_name: "cool-template".to_string(),
            facility: "LCO".to_string(),
        }
    }

    #[test]
    fn test_format_lookup() {
        assert_eq!(TimelapseFormat::from_tag("gif").map(|f| f.media_kind()), Some(MediaKind::Image));
        assert_eq!(
            TimelapseFormat::from_tag("mp4").map(|f| f.media_kind()),
            Some(MediaKind::Video { mime: "video/mp4" })
        );
        assert_eq!(
            TimelapseFormat::from_tag("webm").map(|f| f.media_kind()),
            Some(MediaKind::Video { mime: "video/webm" })
        );
    }

    #[test]
    fn test_unknown_format_is_not_guessed() {
        assert_eq!(TimelapseFormat::from_tag("avi"), None);
        assert_eq!(TimelapseFormat::from_tag("GIF"), None);
        assert_eq!(TimelapseFormat::from_tag(""), None);
    }

    #[test]
    fn test_section_visibility_is_exclusive() {
        let hidden = TimelapseSection::Hidden;
        assert!(!hidden.timelapse_visible());
        assert!(hidden.no_timelapse_visible());
    }

    #[test]
    fn test_urls_join_base() {
        let c = config();
        assert_eq!(c.status_url(), "https://tom.example/api/target/7/");
        assert_eq!(c.submission_url(), "https://tom.example/api/observe/");
    }

    #[test]
    fn test_request_serializes_iso_instants() {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let req = ObservationRequest::new(&config(), "me@example.com", start);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "target": 7,
                "template_name": "cool-template",
                "facility": "LCO",
                "email": "me@example.com",
                "overrides": {
                    "start": "2024-01-15T10:30:00.000Z",
                    "end": "2024-01-22T10:30:00.000Z"
                }
            })
        );
    }

    #[test]
    fn test_window_spans_seven_days_across_dst() {
        // US and EU clocks both change inside these windows
        for start in [
            Utc.with_ymd_and_hms(2024, 3, 8, 12, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 10, 25, 23, 59, 59).unwrap(),
            Utc.timestamp_millis_opt(1_700_000_000_123).unwrap(),
        ] {
            let window = WindowOverrides::starting_at(start);
            assert_eq!((window.end - window.start).num_seconds(), 604_800);
        }
    }

    #[test]
    fn test_status_ignores_unknown_fields() {
        let status: TargetStatus = serde_json::from_value(serde_json::json!({
            "target": {"name": "Ceres", "identifier": "ceres", "extra_fields": {"active": true}},
            "timelapses": []
        }))
        .unwrap();
        assert_eq!(status.target.name, "Ceres");
        assert!(status.target.extra_fields.description_markdown.is_none());
    }
}
