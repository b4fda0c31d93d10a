use crate::domain::model::CourseRecord;
use crate::domain::ports::{ConfigProvider, CourseLookup};
use crate::utils::error::{CourseError, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// `GET {api_base_url}/courses/id/{course_id}` against the course service.
pub struct HttpCourseLookup<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> HttpCourseLookup<C> {
    pub fn new(config: C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs()))
            .build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn course_url(&self, course_id: &str) -> Result<Url> {
        let mut url = Url::parse(self.config.api_base_url())?;
        url.path_segments_mut()
            .map_err(|_| CourseError::ConfigError {
                message: format!(
                    "api_base_url '{}' cannot be used as a base URL",
                    self.config.api_base_url()
                ),
            })?
            .pop_if_empty()
            .extend(["courses", "id", course_id]);
        Ok(url)
    }

    async fn fetch_once(&self, url: &Url) -> Result<Option<CourseRecord>> {
        let mut request = self.client.get(url.clone());
        for (key, value) in self.config.headers() {
            request = request.header(key, value);
        }

        tracing::debug!("Making API request to: {}", url);
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(CourseError::HttpStatusError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        // A `null` body is how some deployments report a missing course.
        let course: Option<CourseRecord> = serde_json::from_str(&body)?;
        Ok(course)
    }
}

#[async_trait::async_trait]
impl<C: ConfigProvider> CourseLookup for HttpCourseLookup<C> {
    async fn fetch_course(&self, course_id: &str) -> Result<Option<CourseRecord>> {
        let url = self.course_url(course_id)?;
        let max_retries = self.config.retry_attempts();
        let mut attempt = 0;

        loop {
            match self.fetch_once(&url).await {
                Err(e) if e.is_retryable() && attempt < max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        "Course request failed ({}), retrying {}/{}",
                        e,
                        attempt,
                        max_retries
                    );
                    tokio::time::sleep(Duration::from_millis(self.config.retry_delay_ms())).await;
                }
                outcome => return outcome,
            }
        }
    }
}
