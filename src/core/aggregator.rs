use crate::core::chapters::ChapterSelection;
use crate::domain::model::CourseRecord;
use crate::domain::ports::CourseLookup;
use crate::utils::error::{CourseError, ErrorSeverity, Result};

/// Where one view instance is in its load.
///
/// `Loading` is initial; the other three are terminal until the next
/// `begin_load`.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Found(Box<CourseRecord>),
    NotFound,
    Failed(FetchFailure),
}

/// A lookup that produced no answer, as distinct from "no such course".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub message: String,
    pub retryable: bool,
    pub severity: ErrorSeverity,
}

impl From<&CourseError> for FetchFailure {
    fn from(err: &CourseError) -> Self {
        Self {
            message: err.user_friendly_message(),
            retryable: err.is_retryable(),
            severity: err.severity(),
        }
    }
}

/// Binds a fetch completion to the load that started it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    course_id: String,
}

impl LoadTicket {
    pub fn course_id(&self) -> &str {
        &self.course_id
    }
}

pub struct CourseDetailAggregator<L: CourseLookup> {
    lookup: L,
    state: LoadState,
    selection: ChapterSelection,
    generation: u64,
}

impl<L: CourseLookup> CourseDetailAggregator<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            state: LoadState::Loading,
            selection: ChapterSelection::new(),
            generation: 0,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn selection(&self) -> &ChapterSelection {
        &self.selection
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Fetches and applies the course in one step.
    pub async fn load(&mut self, course_id: &str) -> &LoadState {
        if let Some(ticket) = self.begin_load(course_id) {
            let outcome = self.lookup.fetch_course(ticket.course_id()).await;
            self.complete(&ticket, outcome);
        }
        &self.state
    }

    /// Restarts the state machine. Returns `None` when no fetch is needed
    /// because the id can never match a course.
    pub fn begin_load(&mut self, course_id: &str) -> Option<LoadTicket> {
        self.generation += 1;
        self.selection.clear();

        let course_id = course_id.trim();
        if course_id.is_empty() {
            tracing::info!("Empty course id, skipping lookup");
            self.state = LoadState::NotFound;
            return None;
        }

        tracing::debug!(course_id, generation = self.generation, "Loading course");
        self.state = LoadState::Loading;
        Some(LoadTicket {
            generation: self.generation,
            course_id: course_id.to_string(),
        })
    }

    /// Applies a lookup outcome. Returns `false` and leaves the state alone
    /// when the ticket has been superseded or the view disposed.
    pub fn complete(
        &mut self,
        ticket: &LoadTicket,
        outcome: Result<Option<CourseRecord>>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::warn!(
                course_id = ticket.course_id(),
                "Discarding stale course lookup result"
            );
            return false;
        }

        self.state = match outcome.and_then(|found| match found {
            Some(course) => course.validate().map(|_| Some(course)),
            None => Ok(None),
        }) {
            Ok(Some(course)) => {
                tracing::info!(course_id = ticket.course_id(), "Course loaded");
                LoadState::Found(Box::new(course))
            }
            Ok(None) => {
                tracing::info!(course_id = ticket.course_id(), "Course not found");
                LoadState::NotFound
            }
            Err(e) => {
                tracing::error!(
                    course_id = ticket.course_id(),
                    "Course lookup failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                LoadState::Failed(FetchFailure::from(&e))
            }
        };
        true
    }

    /// Expands or collapses a chapter row. Ignored unless a course is shown
    /// and the index names one of its chapters.
    pub fn toggle_chapter(&mut self, index: usize) -> bool {
        match &self.state {
            LoadState::Found(course) if index < course.content.len() => {
                self.selection.toggle(index);
                true
            }
            _ => false,
        }
    }

    /// Invalidates any outstanding ticket.
    pub fn dispose(&mut self) {
        self.generation += 1;
    }
}
