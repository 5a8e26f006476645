//! Learn search: request builder, sampling and paging.

pub mod search_query;
pub mod search_params;
pub mod search_session;
pub mod word_list;
