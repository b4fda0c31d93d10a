use crate::domain::model::CourseRecord;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Read-only access to the course lookup service.
///
/// `Ok(None)` means the service reported no such course; `Err` is reserved
/// for failures to obtain an answer at all.
#[async_trait]
pub trait CourseLookup: Send + Sync {
    async fn fetch_course(&self, course_id: &str) -> Result<Option<CourseRecord>>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn request_timeout_secs(&self) -> u64;
    fn retry_attempts(&self) -> u32;
    fn retry_delay_ms(&self) -> u64;
    fn headers(&self) -> &HashMap<String, String>;
    fn site_name(&self) -> &str;
}
