//! MicroMasters learners: dashboard and learner page reloads, and the profile
//! tabs a learner fills in on first login.

pub mod profile;

use common::micromasters::{EducationEntry, ProgramEnrollment, WorkHistoryEntry};
use goose::prelude::*;
use rand::seq::SliceRandom;
use rand::thread_rng;
use serde_json::json;
use tracing::info;

use crate::http_utils::goose_requests::{Headers, get, json_body, send_json};
use crate::settings::settings;
use profile::{Profile, apply_personal_info, mark_filled_out, push_education, push_work_history, reset_profile};

const PROFILE_NAME: &str = "/api/v0/profiles/[username]/";
const DASHBOARD_RELOADS: usize = 10;

#[derive(Debug, Clone)]
struct Learner {
    username: String,
    profile_filled_out: bool,
}

fn learner(user: &GooseUser) -> Option<Learner> {
    user.get_session_data::<Learner>().cloned()
}

fn csrf_token() -> Option<&'static str> {
    settings().micromasters_csrf_token.as_deref()
}

fn submit_headers(csrf_token: &str) -> Headers {
    let referer = format!("{}/", settings().micromasters_base_url.trim_end_matches('/'));
    vec![("Referer", referer), ("X-CSRFToken", csrf_token.to_string())]
}

async fn get_page(user: &mut GooseUser, path: &str) -> TransactionResult {
    get(user, path, path, &Headers::new()).await?;
    Ok(())
}

async fn choose_username(user: &mut GooseUser) -> TransactionResult {
    let username = settings()
        .usernames_in_edx
        .choose(&mut thread_rng())
        .cloned()
        .unwrap_or_default();
    info!("MicroMasters user {} acts as {}", user.weighted_users_index, username);
    user.set_session_data(Learner { username, profile_filled_out: false });
    Ok(())
}

async fn index_no_login(user: &mut GooseUser) -> TransactionResult {
    get_page(user, "/").await
}

async fn dashboard_reload(user: &mut GooseUser) -> TransactionResult {
    let Some(learner) = learner(user) else { return Ok(()) };
    if csrf_token().is_none() {
        return Ok(());
    }
    get_page(user, "/dashboard/").await?;
    get(user, &format!("/api/v0/profiles/{}/", learner.username), PROFILE_NAME, &Headers::new()).await?;
    get_page(user, "/api/v0/dashboard/").await?;
    get_page(user, "/api/v0/course_prices/").await?;
    get_page(user, "/api/v0/programs/").await
}

async fn learner_profile(user: &mut GooseUser) -> TransactionResult {
    let Some(learner) = learner(user) else { return Ok(()) };
    if csrf_token().is_none() {
        return Ok(());
    }
    get(user, &format!("/learner/{}", learner.username), "/learner/[username]", &Headers::new()).await?;
    get(user, &format!("/api/v0/profiles/{}/", learner.username), PROFILE_NAME, &Headers::new()).await?;
    get_page(user, "/api/v0/course_prices/").await?;
    get_page(user, "/api/v0/dashboard/").await?;
    get_page(user, "/api/v0/programs/").await
}

async fn patch_profile(user: &mut GooseUser, username: &str, profile: &Profile, headers: &Headers) -> TransactionResult {
    let path = format!("/api/v0/profiles/{username}/");
    send_json(user, &GooseMethod::Patch, &path, PROFILE_NAME, headers, json!(profile)).await?;
    Ok(())
}

async fn profile_tabs(user: &mut GooseUser) -> TransactionResult {
    let Some(learner) = learner(user) else { return Ok(()) };
    let Some(token) = csrf_token() else { return Ok(()) };
    let headers = submit_headers(token);
    let username = learner.username.as_str();

    get_page(user, "/profile/").await?;
    let goose = get(user, &format!("/api/v0/profiles/{username}/"), PROFILE_NAME, &Headers::new()).await?;
    let Some(mut profile) = json_body::<Profile>(goose).await else { return Ok(()) };
    get_page(user, "/api/v0/dashboard/").await?;
    get_page(user, "/api/v0/course_prices/").await?;
    get_page(user, "/api/v0/enrolledprograms/").await?;

    let was_filled_out = reset_profile(&mut profile);
    apply_personal_info(&mut profile, username);
    patch_profile(user, username, &profile, &headers).await?;

    let enrollment = ProgramEnrollment { program_id: settings().micromasters_program_id };
    send_json(user, &GooseMethod::Post, "/api/v0/enrolledprograms/", "/api/v0/enrolledprograms/", &headers, json!(enrollment)).await?;
    get_page(user, "/api/v0/dashboard/").await?;
    get_page(user, "/api/v0/course_prices/").await?;

    push_education(&mut profile, EducationEntry::high_school());
    patch_profile(user, username, &profile, &headers).await?;
    push_education(&mut profile, EducationEntry::college());
    patch_profile(user, username, &profile, &headers).await?;
    push_work_history(&mut profile, WorkHistoryEntry::software_engineer());
    patch_profile(user, username, &profile, &headers).await?;

    if !was_filled_out {
        mark_filled_out(&mut profile);
        patch_profile(user, username, &profile, &headers).await?;
    }

    if let Some(learner) = user.get_session_data_mut::<Learner>() {
        learner.profile_filled_out = true;
    }
    Ok(())
}

/// Polls the dashboard the way the page does while an enrollment is pending.
async fn dashboard_refresh(user: &mut GooseUser) -> TransactionResult {
    let Some(learner) = learner(user) else { return Ok(()) };
    if csrf_token().is_none() || learner.profile_filled_out {
        return Ok(());
    }
    get_page(user, "/dashboard/").await?;
    get(user, &format!("/api/v0/profiles/{}/", learner.username), PROFILE_NAME, &Headers::new()).await?;
    get_page(user, "/api/v0/dashboard/").await?;
    get_page(user, "/api/v0/course_prices/").await?;
    get_page(user, "/api/v0/enrolledprograms/").await?;
    for _ in 0..DASHBOARD_RELOADS {
        get_page(user, "/api/v0/dashboard/").await?;
    }
    Ok(())
}

pub fn dashboard_scenario() -> Result<Scenario, GooseError> {
    let settings = settings();
    Ok(scenario!("MicroMastersDashboard")
        .set_host(&settings.micromasters_base_url)
        .set_wait_time(settings.task_min_wait, settings.task_max_wait)?
        .register_transaction(transaction!(choose_username).set_on_start())
        .register_transaction(transaction!(index_no_login).set_weight(2)?)
        .register_transaction(transaction!(dashboard_reload).set_weight(10)?)
        .register_transaction(transaction!(learner_profile).set_weight(10)?))
}

pub fn profile_scenario() -> Result<Scenario, GooseError> {
    let settings = settings();
    Ok(scenario!("MicroMastersProfile")
        .set_host(&settings.micromasters_base_url)
        .set_wait_time(settings.task_min_wait, settings.task_max_wait)?
        .register_transaction(transaction!(choose_username).set_on_start())
        .register_transaction(transaction!(index_no_login).set_weight(1)?)
        .register_transaction(transaction!(profile_tabs).set_weight(2)?)
        .register_transaction(transaction!(dashboard_refresh).set_weight(10)?))
}
