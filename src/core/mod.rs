pub mod aggregator;
pub mod chapters;
pub mod derive;
pub mod view;

pub use crate::domain::model::{ChapterRecord, CourseRecord, ReviewRecord};
pub use crate::domain::ports::{ConfigProvider, CourseLookup};
pub use crate::utils::error::Result;
