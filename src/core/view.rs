//! Presentation-ready projection of a load state.
//!
//! Everything the rendering layer needs is computed here; it never touches
//! a `CourseRecord` directly.

use crate::core::aggregator::LoadState;
use crate::core::chapters::ChapterSelection;
use crate::core::derive::{
    average_rating, format_duration, format_price, format_rating, total_runtime, PriceParts,
};
use crate::domain::model::{CourseRecord, ReviewRecord};
use chrono::{DateTime, NaiveDate};
use serde::Serialize;

pub const DEFAULT_SITE_NAME: &str = "LearnEx";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSettings {
    pub site_name: String,
    pub currency_symbol: String,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            site_name: DEFAULT_SITE_NAME.to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CoursePage {
    Loading,
    NotFound,
    Error { message: String, retryable: bool },
    Course(CourseDetailView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseDetailView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub instructor_name: String,
    pub instructor_avatar: String,
    pub price: PriceParts,
    pub price_label: String,
    pub rating: Option<f64>,
    pub rating_label: String,
    pub review_count: usize,
    pub review_count_label: String,
    pub chapter_count: usize,
    pub total_runtime_seconds: u64,
    pub total_runtime_label: String,
    pub chapters: Vec<ChapterRow>,
    pub reviews: Vec<ReviewRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterRow {
    pub index: usize,
    pub title: String,
    pub description: String,
    pub duration_label: String,
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewRow {
    pub id: String,
    pub author: String,
    pub avatar: String,
    pub rating_label: String,
    pub reviewed_on: String,
    pub message: String,
}

impl CoursePage {
    pub fn from_state(
        state: &LoadState,
        selection: &ChapterSelection,
        settings: &PageSettings,
    ) -> Self {
        match state {
            LoadState::Loading => CoursePage::Loading,
            LoadState::NotFound => CoursePage::NotFound,
            LoadState::Failed(failure) => CoursePage::Error {
                message: failure.message.clone(),
                retryable: failure.retryable,
            },
            LoadState::Found(course) => {
                CoursePage::Course(CourseDetailView::build(course, selection, settings))
            }
        }
    }

    pub fn document_title(&self, settings: &PageSettings) -> String {
        match self {
            CoursePage::Course(view) => format!("{} - {}", view.title, settings.site_name),
            CoursePage::Loading | CoursePage::NotFound | CoursePage::Error { .. } => {
                format!("Course Details - {}", settings.site_name)
            }
        }
    }
}

impl CourseDetailView {
    pub fn build(
        course: &CourseRecord,
        selection: &ChapterSelection,
        settings: &PageSettings,
    ) -> Self {
        let price = format_price(course.price);
        let rating = average_rating(&course.reviews);
        let runtime = total_runtime(&course.content);
        let review_count = course.reviews.len();

        let chapters = course
            .content
            .iter()
            .enumerate()
            .map(|(index, chapter)| ChapterRow {
                index,
                title: chapter.title.clone(),
                description: chapter.description.clone(),
                duration_label: format_duration(chapter.video.duration),
                expanded: selection.is_expanded(index),
            })
            .collect();

        Self {
            id: course.id.clone(),
            title: course.title.clone(),
            description: course.description.clone(),
            thumbnail: course.thumbnail.clone(),
            instructor_name: course.instructor.display_name(),
            instructor_avatar: course.instructor.profile_picture.clone(),
            price_label: format!("{}{}", settings.currency_symbol, price),
            price,
            rating,
            rating_label: format_rating(rating),
            review_count,
            review_count_label: if review_count == 0 {
                "No reviews yet".to_string()
            } else {
                review_count.to_string()
            },
            chapter_count: course.content.len(),
            total_runtime_seconds: runtime,
            total_runtime_label: format_duration(runtime),
            chapters,
            reviews: course.reviews.iter().map(ReviewRow::from).collect(),
        }
    }
}

impl From<&ReviewRecord> for ReviewRow {
    fn from(review: &ReviewRecord) -> Self {
        Self {
            id: review.id.clone(),
            author: review.user.display_name(),
            avatar: review.user.profile_picture.clone(),
            rating_label: format_rating(Some(f64::from(review.rating))),
            reviewed_on: format_review_date(&review.created_at),
            message: review.message.clone(),
        }
    }
}

/// `Sun Jan 15 2023`. Unparseable input is shown as-is.
pub fn format_review_date(raw: &str) -> String {
    const DISPLAY: &str = "%a %b %d %Y";

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return timestamp.format(DISPLAY).to_string();
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format(DISPLAY).to_string(),
        Err(_) => {
            tracing::debug!("Unrecognized review date format: {}", raw);
            raw.to_string()
        }
    }
}
