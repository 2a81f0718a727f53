//! Wire DTOs for the interviewer search endpoint. The HTTP handler that
//! serves them lives outside this crate; the shapes here are the de
//! facto contract with the SPA.

pub mod search_request;
pub mod search_response;

pub use search_request::InterviewerSearchRequest;
pub use search_response::InterviewerMatchResponse;
