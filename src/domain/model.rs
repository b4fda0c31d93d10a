use crate::utils::error::{CourseError, Result};
use serde::{Deserialize, Serialize};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// A course as returned by the lookup service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail: String,
    /// Minor currency units (cents).
    pub price: u64,
    #[serde(rename = "user")]
    pub instructor: InstructorRef,
    #[serde(default)]
    pub content: Vec<ChapterRecord>,
    #[serde(default)]
    pub reviews: Vec<ReviewRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterRecord {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub video: VideoRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRef {
    /// Whole seconds.
    pub duration: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub message: String,
    pub rating: u8,
    /// RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
    pub created_at: String,
    pub user: ReviewerRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRef {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub profile_picture: String,
}

pub type InstructorRef = PersonRef;
pub type ReviewerRef = PersonRef;

impl PersonRef {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl CourseRecord {
    /// Rejects records the type system lets through but the page cannot show.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(CourseError::InvalidRecordError {
                message: "course id is empty".to_string(),
            });
        }

        if let Some(review) = self
            .reviews
            .iter()
            .find(|r| !(MIN_RATING..=MAX_RATING).contains(&r.rating))
        {
            return Err(CourseError::InvalidRecordError {
                message: format!(
                    "review {} has rating {} outside {}..={}",
                    review.id, review.rating, MIN_RATING, MAX_RATING
                ),
            });
        }

        let runtime = self
            .content
            .iter()
            .try_fold(0u64, |acc, c| acc.checked_add(c.video.duration));
        if runtime.is_none() {
            return Err(CourseError::InvalidRecordError {
                message: "total chapter runtime overflows".to_string(),
            });
        }

        Ok(())
    }
}
