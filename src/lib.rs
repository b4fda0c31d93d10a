pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, OutputFormat};
pub use crate::config::TomlConfig;

pub use crate::adapters::http::HttpCourseLookup;
pub use crate::core::{
    aggregator::{CourseDetailAggregator, FetchFailure, LoadState, LoadTicket},
    chapters::ChapterSelection,
    view::{CourseDetailView, CoursePage, PageSettings},
};
pub use crate::domain::model::CourseRecord;
pub use crate::utils::error::{CourseError, Result};
