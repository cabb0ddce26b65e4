//! Permit stage normalization.
//!
//! HubSpot reports a deal's stage either as a pipeline-internal key
//! (`qualifiedtobuy`, `2909556468`, ...) or as a human label. [`Stage::parse`]
//! turns either into one closed enum so dashboard code counts variants instead of
//! matching strings.

use serde::Serialize;

/// Internal pipeline key -> label shown in the HubSpot UI.
const PERMIT_STAGE_TABLE: &[(&str, &str, StageKind)] = &[
    ("2909556468", "Fee Estimate (Permit Pipeline)", StageKind::PreSubmittal),
    ("appointmentscheduled", "Intake (Permit Pipeline)", StageKind::PreSubmittal),
    ("qualifiedtobuy", "Pre-Submittal (Permit Pipeline)", StageKind::PreSubmittal),
    ("presentationscheduled", "Submittal (Permit Pipeline)", StageKind::PostSubmittal),
    ("decisionmakerboughtin", "Approved (Permit Pipeline)", StageKind::Completed),
    ("contractsent", "Closed (Permit Pipeline)", StageKind::Completed),
    ("closedlost", "Closed Lost (Permit Pipeline)", StageKind::ClosedLost),
];

pub const UNKNOWN_STAGE: &str = "Unknown";

const PRE_SUBMITTAL_MARKERS: &[&str] = &["Fee Estimate", "Intake", "Pre-Submittal"];
const POST_SUBMITTAL_MARKER: &str = "Submittal";
const COMPLETED_MARKERS: &[&str] = &["Approved", "Closed", "Issued"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StageKind {
    PreSubmittal,
    PostSubmittal,
    Completed,
    ClosedLost,
}

/// Dashboard summary bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    PreSubmittal,
    PostSubmittal,
    Completed,
}

impl Bucket {
    /// Case-sensitive substring classification of a stage label. The first
    /// matching rule wins, so "Pre-Submittal" never falls through to the
    /// plain "Submittal" rule.
    pub fn classify(label: &str) -> Option<Bucket> {
        if PRE_SUBMITTAL_MARKERS.iter().any(|m| label.contains(m)) {
            Some(Bucket::PreSubmittal)
        } else if label.contains(POST_SUBMITTAL_MARKER) {
            Some(Bucket::PostSubmittal)
        } else if COMPLETED_MARKERS.iter().any(|m| label.contains(m)) {
            Some(Bucket::Completed)
        } else {
            None
        }
    }
}

/// A deal stage with its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    PreSubmittal(String),
    PostSubmittal(String),
    Completed(String),
    ClosedLost(String),
    Unknown,
    /// Passed through untouched; matches no bucket.
    Other(String),
}

impl Stage {
    pub fn parse(raw: Option<&str>) -> Stage {
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Stage::Unknown,
        };

        let key = raw.trim().to_lowercase();
        if let Some((_, label, kind)) = PERMIT_STAGE_TABLE.iter().find(|(k, _, _)| *k == key) {
            let label = label.to_string();
            return match kind {
                StageKind::PreSubmittal => Stage::PreSubmittal(label),
                StageKind::PostSubmittal => Stage::PostSubmittal(label),
                StageKind::Completed => Stage::Completed(label),
                StageKind::ClosedLost => Stage::ClosedLost(label),
            };
        }

        let label = raw.to_string();
        match Bucket::classify(raw) {
            Some(Bucket::PreSubmittal) => Stage::PreSubmittal(label),
            Some(Bucket::PostSubmittal) => Stage::PostSubmittal(label),
            Some(Bucket::Completed) => Stage::Completed(label),
            None => Stage::Other(label),
        }
    }

    pub fn display(&self) -> &str {
        match self {
            Stage::PreSubmittal(label)
            | Stage::PostSubmittal(label)
            | Stage::Completed(label)
            | Stage::ClosedLost(label)
            | Stage::Other(label) => label,
            Stage::Unknown => UNKNOWN_STAGE,
        }
    }

    /// Summary bucket. Closed-lost deals count as completed: their label
    /// contains "Closed".
    pub fn bucket(&self) -> Option<Bucket> {
        match self {
            Stage::PreSubmittal(_) => Some(Bucket::PreSubmittal),
            Stage::PostSubmittal(_) => Some(Bucket::PostSubmittal),
            Stage::Completed(_) | Stage::ClosedLost(_) => Some(Bucket::Completed),
            Stage::Unknown | Stage::Other(_) => None,
        }
    }

    /// Only work still in flight raises a dashboard alert.
    pub fn needs_attention(&self) -> bool {
        matches!(self, Stage::PreSubmittal(_) | Stage::PostSubmittal(_))
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display())
    }
}

impl Serialize for Stage {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display())
    }
}

/// Display name for a raw stage value: mapped label for known pipeline keys,
/// "Unknown" for empty input, the input unchanged otherwise.
pub fn normalize_stage(raw: Option<&str>) -> String {
    Stage::parse(raw).display().to_string()
}
