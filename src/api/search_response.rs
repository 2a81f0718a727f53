use serde::Serialize;

use crate::matching::engine::RankedCandidate;
use crate::{ApplicationStatus, InterviewerApplication, InterviewerStats, InterviewerUser};

/// One ranked interviewer as serialized to the SPA. `score` and
/// `matchType` are omitted entirely on the browse-all path.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewerMatchResponse {
    pub application: ApplicationDto,
    pub user: UserDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_type: Option<&'static str>,
    pub stats: StatsDto,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDto {
    pub id: String,
    pub position: Option<String>,
    pub company: Option<String>,
    pub qualification: Option<String>,
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: Option<String>,
    pub college: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDto {
    pub conducted_interviews: u32,
    pub average_rating: f64,
    pub total_ratings: u32,
}

impl From<&RankedCandidate> for InterviewerMatchResponse {
    fn from(ranked: &RankedCandidate) -> Self {
        Self {
            application: ApplicationDto::from(&ranked.application),
            user: UserDto::from(&ranked.user),
            score: ranked.score,
            match_type: ranked.match_type.map(|t| t.as_str()),
            stats: StatsDto::from(ranked.stats),
        }
    }
}

impl From<&InterviewerApplication> for ApplicationDto {
    fn from(application: &InterviewerApplication) -> Self {
        Self {
            id: application.id.clone(),
            position: application.position.clone(),
            company: application.company.clone(),
            qualification: application.qualification.clone(),
            status: status_str(application.status),
        }
    }
}

impl From<&InterviewerUser> for UserDto {
    fn from(user: &InterviewerUser) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            college: user.college.clone(),
        }
    }
}

impl From<InterviewerStats> for StatsDto {
    fn from(stats: InterviewerStats) -> Self {
        Self {
            conducted_interviews: stats.conducted_interviews,
            average_rating: stats.average_rating,
            total_ratings: stats.total_ratings,
        }
    }
}

fn status_str(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Pending => "pending",
        ApplicationStatus::Approved => "approved",
        ApplicationStatus::Rejected => "rejected",
    }
}
