//! Request helpers shared by the scenarios.

pub mod goose_requests;
pub mod search_response;
