//! Learners running a search and paging through its results.

use std::time::Duration;

use common::search_const::SEARCH_URL;
use common::search_query::QueryParams;
use goose::prelude::*;
use rand::thread_rng;
use tracing::debug;

use crate::http_utils::goose_requests::{Headers, send_json};
use crate::http_utils::search_response::search_hit_count;
use crate::learn::search_params::{sample_learn_params, sample_ocw_params};
use crate::learn::search_session::SearchSession;
use crate::learn::word_list::word_list;
use crate::settings::settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchKind {
    Learn,
    Ocw,
}

impl SearchKind {
    async fn sample(self) -> QueryParams {
        let words = match self {
            SearchKind::Ocw => word_list().await,
            SearchKind::Learn => &[],
        };
        let mut rng = thread_rng();
        match self {
            SearchKind::Learn => sample_learn_params(&mut rng),
            SearchKind::Ocw => sample_ocw_params(&mut rng, words),
        }
    }
}

async fn execute_search(user: &mut GooseUser, mut session: SearchSession) -> TransactionResult {
    let name = session.request_name();
    let goose = send_json(user, &GooseMethod::Post, SEARCH_URL, &name, &Headers::new(), session.query()).await?;
    let hit_count = search_hit_count(goose).await;
    session.record_hits(hit_count);
    debug!("{} returned {} hits", name, hit_count);
    user.set_session_data(session);
    Ok(())
}

async fn new_search(user: &mut GooseUser, kind: SearchKind) -> TransactionResult {
    let session = SearchSession::new(kind.sample().await);
    execute_search(user, session).await
}

async fn next_page(user: &mut GooseUser, kind: SearchKind) -> TransactionResult {
    let current = user.get_session_data::<SearchSession>().filter(|session| !session.exhausted).cloned();
    let Some(mut session) = current else {
        return new_search(user, kind).await;
    };
    session.next_page();
    execute_search(user, session).await
}

async fn learn_new_search(user: &mut GooseUser) -> TransactionResult {
    new_search(user, SearchKind::Learn).await
}

async fn learn_next_page(user: &mut GooseUser) -> TransactionResult {
    next_page(user, SearchKind::Learn).await
}

async fn ocw_new_search(user: &mut GooseUser) -> TransactionResult {
    new_search(user, SearchKind::Ocw).await
}

async fn ocw_next_page(user: &mut GooseUser) -> TransactionResult {
    next_page(user, SearchKind::Ocw).await
}

pub fn learn_search_scenario() -> Result<Scenario, GooseError> {
    Ok(scenario!("LearnSearch")
        .set_host(&settings().open_discussions_base_url)
        .set_wait_time(Duration::from_secs(1), Duration::from_secs(10))?
        .register_transaction(transaction!(learn_new_search).set_on_start().set_name("new search"))
        .register_transaction(transaction!(learn_new_search).set_weight(1)?.set_name("new search"))
        .register_transaction(transaction!(learn_next_page).set_weight(10)?.set_name("next page")))
}

pub fn ocw_search_scenario() -> Result<Scenario, GooseError> {
    Ok(scenario!("OcwSearch")
        .set_host(&settings().open_discussions_base_url)
        .set_wait_time(Duration::from_secs(1), Duration::from_secs(10))?
        .register_transaction(transaction!(ocw_new_search).set_on_start().set_name("new ocw search"))
        .register_transaction(transaction!(ocw_new_search).set_weight(1)?.set_name("new ocw search"))
        .register_transaction(transaction!(ocw_next_page).set_weight(10)?.set_name("next ocw page")))
}
