use serde::Deserialize;

use crate::matching::engine::MatchQuery;

/// Interviewer search parameters as decoded from the request query
/// string. Absent and blank values are equivalent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InterviewerSearchRequest {
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

impl From<InterviewerSearchRequest> for MatchQuery {
    fn from(request: InterviewerSearchRequest) -> Self {
        Self {
            position: request.position,
            company: request.company,
        }
    }
}
