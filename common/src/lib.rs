//! Common library exports shared between the load test scenarios and their tests.

extern crate serde;


pub mod search_query;
pub mod search_result;
pub mod search_const;
pub mod discussions;
pub mod micromasters;
pub mod rapid_response;
