//! Draft types submitted to MISP.
//!
//! Events and attributes are owned by the platform; this module only
//! models the request payloads sent at creation time, with the numeric
//! enum vocabularies MISP defines for sharing scope, severity, and
//! analysis state.

use serde::{Deserialize, Serialize};

/// Sharing scope of an event. MISP encodes these as numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Distribution {
    /// Visible to your organisation only (code 0, the most restrictive).
    #[default]
    YourOrganisation,
    /// Visible to this community (code 1).
    ThisCommunity,
    /// Visible to connected communities (code 2).
    ConnectedCommunities,
    /// Visible to all communities (code 3).
    AllCommunities,
}

impl From<Distribution> for u8 {
    fn from(value: Distribution) -> u8 {
        match value {
            Distribution::YourOrganisation => 0,
            Distribution::ThisCommunity => 1,
            Distribution::ConnectedCommunities => 2,
            Distribution::AllCommunities => 3,
        }
    }
}

impl TryFrom<u8> for Distribution {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::YourOrganisation),
            1 => Ok(Self::ThisCommunity),
            2 => Ok(Self::ConnectedCommunities),
            3 => Ok(Self::AllCommunities),
            other => Err(format!("unknown distribution code: {other}")),
        }
    }
}

/// Severity tier of an event. MISP codes run from 1 (high) to 4
/// (undefined); 4 is the platform's conventional default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ThreatLevel {
    /// High severity (code 1).
    High,
    /// Medium severity (code 2).
    Medium,
    /// Low severity (code 3).
    Low,
    /// Severity not yet assessed (code 4).
    #[default]
    Undefined,
}

impl From<ThreatLevel> for u8 {
    fn from(value: ThreatLevel) -> u8 {
        match value {
            ThreatLevel::High => 1,
            ThreatLevel::Medium => 2,
            ThreatLevel::Low => 3,
            ThreatLevel::Undefined => 4,
        }
    }
}

impl TryFrom<u8> for ThreatLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::High),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Low),
            4 => Ok(Self::Undefined),
            other => Err(format!("unknown threat level code: {other}")),
        }
    }
}

/// Workflow stage of an event's analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Analysis {
    /// Analysis not yet started (code 0).
    #[default]
    Initial,
    /// Analysis in progress (code 1).
    Ongoing,
    /// Analysis complete (code 2).
    Complete,
}

impl From<Analysis> for u8 {
    fn from(value: Analysis) -> u8 {
        match value {
            Analysis::Initial => 0,
            Analysis::Ongoing => 1,
            Analysis::Complete => 2,
        }
    }
}

impl TryFrom<u8> for Analysis {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Initial),
            1 => Ok(Self::Ongoing),
            2 => Ok(Self::Complete),
            other => Err(format!("unknown analysis code: {other}")),
        }
    }
}

/// Request payload for `events/add`.
#[derive(Debug, Clone, Serialize)]
pub struct EventDraft {
    /// Free-text description of the incident.
    pub info: String,

    /// Sharing scope.
    pub distribution: Distribution,

    /// Severity tier.
    pub threat_level_id: ThreatLevel,

    /// Analysis workflow stage.
    pub analysis: Analysis,
}

/// Default category applied when a caller does not provide one.
pub const DEFAULT_CATEGORY: &str = "External analysis";

/// Request payload for `attributes/add/{event_id}`.
#[derive(Debug, Clone, Serialize)]
pub struct AttributeDraft {
    /// Observable type from MISP's vocabulary (e.g. "ip-dst",
    /// "domain", "sha256"). Validated by the platform, not here.
    #[serde(rename = "type")]
    pub attribute_type: String,

    /// Raw observable value.
    pub value: String,

    /// Classification category.
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_distribution_codes_round_trip() {
        for code in 0u8..=3 {
            let dist = Distribution::try_from(code).unwrap();
            assert_eq!(u8::from(dist), code);
        }
        assert!(Distribution::try_from(4).is_err());
    }

    #[test]
    fn test_threat_level_codes() {
        assert_eq!(u8::from(ThreatLevel::High), 1);
        assert_eq!(u8::from(ThreatLevel::Undefined), 4);
        assert!(ThreatLevel::try_from(0).is_err());
        assert!(ThreatLevel::try_from(5).is_err());
    }

    #[test]
    fn test_defaults_match_platform_convention() {
        assert_eq!(u8::from(Distribution::default()), 0);
        assert_eq!(u8::from(ThreatLevel::default()), 4);
        assert_eq!(u8::from(Analysis::default()), 0);
    }

    #[test]
    fn test_event_draft_serializes_numeric_codes() {
        let draft = EventDraft {
            info: "test event".to_string(),
            distribution: Distribution::default(),
            threat_level_id: ThreatLevel::default(),
            analysis: Analysis::default(),
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            value,
            json!({
                "info": "test event",
                "distribution": 0,
                "threat_level_id": 4,
                "analysis": 0,
            })
        );
    }

    #[test]
    fn test_attribute_draft_uses_type_key() {
        let draft = AttributeDraft {
            attribute_type: "ip-dst".to_string(),
            value: "8.8.8.8".to_string(),
            category: DEFAULT_CATEGORY.to_string(),
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["type"], "ip-dst");
        assert_eq!(value["category"], "External analysis");
    }

    #[test]
    fn test_enum_deserializes_from_number() {
        let dist: Distribution = serde_json::from_value(json!(2)).unwrap();
        assert_eq!(dist, Distribution::ConnectedCommunities);
        let bad: Result<Distribution, _> = serde_json::from_value(json!(9));
        assert!(bad.is_err());
    }
}
