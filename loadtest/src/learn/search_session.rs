//! Paging state of one simulated learner's search.

use common::search_const::{LIMIT, SEARCH_URL};
use common::search_query::QueryParams;
use serde_json::Value;

use crate::learn::search_query::generate_learn_query;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchSession {
    pub params: QueryParams,
    pub page: u64,
    /// Set once a page came back short; the next step starts a new search.
    pub exhausted: bool,
}

impl SearchSession {
    pub fn new(params: QueryParams) -> Self {
        Self { params, page: 0, exhausted: false }
    }

    pub fn offset(&self) -> u64 {
        self.page * LIMIT
    }

    pub fn query(&self) -> Value {
        generate_learn_query(&self.params, self.offset(), LIMIT)
    }

    pub fn next_page(&mut self) {
        self.page += 1;
    }

    pub fn record_hits(&mut self, hit_count: usize) {
        if (hit_count as u64) < LIMIT {
            self.exhausted = true;
        }
    }

    /// Name the request is reported under, grouping pages of equal searches.
    pub fn request_name(&self) -> String {
        let types = self.params.types.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(",");
        let offered_by = self.params.offered_by.iter().map(|o| o.as_str()).collect::<Vec<_>>().join(",");
        let price = self.params.price.iter().map(|p| p.as_str()).collect::<Vec<_>>().join(",");
        format!(
            "{SEARCH_URL}?q={}&type={types}&o={offered_by}&pr={price}&p={}",
            self.params.text, self.page
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::search_query::{OfferedByType, PriceType, ResourceType};

    fn session() -> SearchSession {
        SearchSession::new(QueryParams::new(
            "Albedo",
            [ResourceType::Video, ResourceType::Course],
            [OfferedByType::Ocw, OfferedByType::Mitx],
            [PriceType::Free],
        ))
    }

    #[test]
    fn pages_advance_by_limit() {
        let mut session = session();
        assert_eq!(session.offset(), 0);
        session.next_page();
        session.next_page();
        assert_eq!(session.offset(), 12);
        let query = session.query();
        assert_eq!(query["from"], 12);
        assert_eq!(query["size"], 6);
    }

    #[test]
    fn short_page_exhausts_the_search() {
        let mut session = session();
        session.record_hits(6);
        assert!(!session.exhausted);
        session.record_hits(5);
        assert!(session.exhausted);
    }

    #[test]
    fn price_filters_get_their_own_request_name() {
        let paid = SearchSession::new(QueryParams::new("Albedo", [ResourceType::Course], [], [PriceType::Paid]));
        let any_price = SearchSession::new(QueryParams::new("Albedo", [ResourceType::Course], [], []));
        assert_eq!(paid.request_name(), "/api/v0/search/?q=Albedo&type=course&o=&pr=paid&p=0");
        assert_eq!(any_price.request_name(), "/api/v0/search/?q=Albedo&type=course&o=&pr=&p=0");
    }

    #[test]
    fn request_name_lists_filters_and_page() {
        let mut session = session();
        session.next_page();
        assert_eq!(session.request_name(), "/api/v0/search/?q=Albedo&type=course,video&o=MITx,OCW&pr=free&p=1");
    }
}
