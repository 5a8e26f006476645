/// Results requested per search page.
pub const LIMIT: u64 = 6;

pub const SEARCH_URL: &str = "/api/v0/search/";
