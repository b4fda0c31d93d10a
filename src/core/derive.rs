//! Pure values derived from a loaded course.

use crate::domain::model::{ChapterRecord, ReviewRecord};
use serde::Serialize;

/// Whole and fractional display parts of a price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceParts {
    pub whole: String,
    pub cents: String,
}

impl std::fmt::Display for PriceParts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.whole, self.cents)
    }
}

/// Sum of chapter video durations in seconds, saturating at `u64::MAX`.
pub fn total_runtime(chapters: &[ChapterRecord]) -> u64 {
    chapters
        .iter()
        .fold(0u64, |acc, c| acc.saturating_add(c.video.duration))
}

/// Arithmetic mean of the ratings, or `None` when there are no reviews.
pub fn average_rating(reviews: &[ReviewRecord]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: u64 = reviews.iter().map(|r| u64::from(r.rating)).sum();
    Some(sum as f64 / reviews.len() as f64)
}

pub fn format_price(price_minor_units: u64) -> PriceParts {
    PriceParts {
        whole: (price_minor_units / 100).to_string(),
        cents: format!("{:02}", price_minor_units % 100),
    }
}

/// `M:SS` below one hour, `H:MM:SS` otherwise.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Two-decimal rating label; `"0"` when unrated.
pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(value) => format!("{:.2}", value),
        None => "0".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{PersonRef, VideoRef};

    fn chapter(duration: u64) -> ChapterRecord {
        ChapterRecord {
            title: format!("Chapter {}", duration),
            description: String::new(),
            video: VideoRef { duration, url: None },
        }
    }

    fn review(rating: u8) -> ReviewRecord {
        ReviewRecord {
            id: format!("r-{}", rating),
            message: String::new(),
            rating,
            created_at: "2023-01-15".to_string(),
            user: PersonRef {
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
                profile_picture: String::new(),
            },
        }
    }

    #[test]
    fn test_total_runtime_sums_durations() {
        assert_eq!(total_runtime(&[]), 0);
        assert_eq!(total_runtime(&[chapter(0)]), 0);
        assert_eq!(total_runtime(&[chapter(60), chapter(125), chapter(3600)]), 3785);
    }

    #[test]
    fn test_total_runtime_saturates_on_overflow() {
        assert_eq!(total_runtime(&[chapter(u64::MAX), chapter(1)]), u64::MAX);
    }

    #[test]
    fn test_average_rating() {
        assert_eq!(average_rating(&[]), None);
        assert_eq!(average_rating(&[review(4)]), Some(4.0));

        let reviews: Vec<_> = [5, 4, 3, 5, 4].into_iter().map(review).collect();
        let avg = average_rating(&reviews).unwrap();
        assert!((avg - 4.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_format_price_keeps_trailing_zero_cents() {
        assert_eq!(format_price(500), PriceParts { whole: "5".into(), cents: "00".into() });
        assert_eq!(format_price(499), PriceParts { whole: "4".into(), cents: "99".into() });
        assert_eq!(format_price(100), PriceParts { whole: "1".into(), cents: "00".into() });
        assert_eq!(format_price(5), PriceParts { whole: "0".into(), cents: "05".into() });
        assert_eq!(format_price(0).to_string(), "0.00");
        assert_eq!(format_price(1_234_510).to_string(), "12345.10");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(9), "0:09");
        assert_eq!(format_duration(65), "1:05");
        assert_eq!(format_duration(3599), "59:59");
        assert_eq!(format_duration(3600), "1:00:00");
        assert_eq!(format_duration(3661), "1:01:01");
        assert_eq!(format_duration(36_000), "10:00:00");
    }

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating(None), "0");
        assert_eq!(format_rating(Some(4.2)), "4.20");
        assert_eq!(format_rating(Some(5.0)), "5.00");
    }
}
