//! Percentage → status classification shared by every recommendation.

use serde::{Deserialize, Serialize};

/// How promising a window is, from its availability percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Perfect,
    Great,
    Good,
    Possible,
    Unlikely,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Perfect => "perfect",
            Status::Great => "great",
            Status::Good => "good",
            Status::Possible => "possible",
            Status::Unlikely => "unlikely",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thresholds, checked high to low: 100 perfect, 80 great, 67 good, 50 possible.
pub fn status_from_percentage(percentage: u32) -> Status {
    match percentage {
        p if p >= 100 => Status::Perfect,
        p if p >= 80 => Status::Great,
        p if p >= 67 => Status::Good,
        p if p >= 50 => Status::Possible,
        _ => Status::Unlikely,
    }
}
