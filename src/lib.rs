pub mod api;
pub mod config;
pub mod logging;
pub mod matching;
pub mod normalize;
pub mod stem;

pub use config::EngineConfig;
pub use matching::engine::{MatchQuery, MatchType, MatchingEngine, RankedCandidate};
pub use matching::weights::MatchField;

/// Aggregate counters shown next to every ranked interviewer. Display
/// data; ranking only reads the rating for tie-breaking.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InterviewerStats {
    pub conducted_interviews: u32,
    pub average_rating: f64,
    pub total_ratings: u32,
}

/// Review state of an interviewer application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Profile fields of the user who owns an application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterviewerUser {
    pub id: String,
    pub name: Option<String>,
    pub college: Option<String>,
}

/// One interviewer application record. The engine expects the caller to
/// have narrowed the pool to approved applications already; `status` is
/// carried for the view layer, not checked here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterviewerApplication {
    pub id: String,
    pub position: Option<String>,
    pub company: Option<String>,
    pub qualification: Option<String>,
    pub status: ApplicationStatus,
    pub stats: InterviewerStats,
}

/// Application plus its owning user profile, the unit the ranking engine
/// consumes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateRecord {
    pub application: InterviewerApplication,
    pub user: InterviewerUser,
}

impl CandidateRecord {
    /// Text of one matchable field. `None` and blank behave identically
    /// downstream: the field fails to match, nothing errors.
    pub fn field_text(&self, field: MatchField) -> Option<&str> {
        match field {
            MatchField::Position => self.application.position.as_deref(),
            MatchField::Qualification => self.application.qualification.as_deref(),
            MatchField::Company => self.application.company.as_deref(),
            MatchField::College => self.user.college.as_deref(),
        }
    }
}
