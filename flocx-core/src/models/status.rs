use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// The lifecycle state shared by offers, bids, contracts and relationships.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Open for matching
    #[default]
    Available,
    /// Withdrawn by its owner
    Retracted,
    /// Past its window; excluded from "unexpired" queries
    Expired,
    /// Matched and delivered
    Fulfilled,
    /// Called off before fulfilment
    Cancelled,
}

impl Status {
    /// The lowercase name used in storage and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Retracted => "retracted",
            Self::Expired => "expired",
            Self::Fulfilled => "fulfilled",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status string that is not part of the enumeration
#[derive(Debug, Error)]
#[error("unknown status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "retracted" => Ok(Self::Retracted),
            "expired" => Ok(Self::Expired),
            "fulfilled" => Ok(Self::Fulfilled),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

impl TryFrom<String> for Status {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_matches_display() {
        for status in [
            Status::Available,
            Status::Retracted,
            Status::Expired,
            Status::Fulfilled,
            Status::Cancelled,
        ] {
            assert_eq!(status.to_string().parse::<Status>().unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_status() {
        assert!("AVAILABLE".parse::<Status>().is_err());
        assert!(Status::try_from("pending".to_owned()).is_err());
    }

    #[test]
    fn test_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_value(Status::Expired).unwrap(),
            serde_json::json!("expired")
        );
    }
}
