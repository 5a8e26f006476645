//! Learners enrolling in an LMS course and answering its multiple choice problems.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use common::rapid_response::{CourseData, EnrollmentStatus};
use goose::prelude::*;
use rand::Rng;
use rand::seq::SliceRandom;
use rand::thread_rng;
use tracing::{debug, warn};

use crate::http_utils::goose_requests::{Headers, get, send_form};
use crate::settings::settings;

/// Usernames enrolled by any virtual user of this process.
static ENROLLED_USERNAMES: Mutex<BTreeSet<String>> = Mutex::new(BTreeSet::new());

fn enrolled_usernames() -> MutexGuard<'static, BTreeSet<String>> {
    ENROLLED_USERNAMES.lock().unwrap_or_else(PoisonError::into_inner)
}

fn is_enrolled(username: &str) -> bool {
    enrolled_usernames().contains(username)
}

fn mark_enrolled(username: &str) {
    enrolled_usernames().insert(username.to_string());
}

#[derive(Debug, Clone)]
struct Learner {
    username: String,
    course: CourseData,
    enrolled: bool,
}

/// A chosen answer to one problem block: where to post it and the form to post.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerSubmission {
    pub path: String,
    pub form: Vec<(String, String)>,
}

pub fn problem_check_path(course_id: &str, block_id: &str) -> String {
    format!("/courses/{course_id}/xblock/{block_id}/handler/xmodule_handler/problem_check")
}

pub fn choose_answer<R: Rng + ?Sized>(course: &CourseData, rng: &mut R) -> Option<AnswerSubmission> {
    let block = course.blocks.choose(rng)?;
    let answer_id = block.answer_ids.choose(rng)?;
    Some(AnswerSubmission {
        path: problem_check_path(&course.course_id, &block.id),
        form: vec![(format!("input_{}", block.choicegroup_id), answer_id.clone())],
    })
}

/// Prefers usernames nobody has enrolled yet. Once all are enrolled any of
/// them will do, and that learner only answers problems.
pub fn pick_username<R: Rng + ?Sized>(usernames: &[String], enrolled: &BTreeSet<String>, rng: &mut R) -> Option<String> {
    let unenrolled = usernames.iter().filter(|name| !enrolled.contains(*name)).collect::<Vec<_>>();
    match unenrolled.choose(rng) {
        Some(name) => Some((*name).clone()),
        None => usernames.choose(rng).cloned(),
    }
}

/// An empty or unreadable enrollment answers the same as an inactive one.
pub fn needs_enrollment(body: &str) -> bool {
    if body.trim().is_empty() {
        return true;
    }
    match serde_json::from_str::<EnrollmentStatus>(body) {
        Ok(status) => !status.is_active,
        Err(e) => {
            debug!("enrollment status not understood: {}", e);
            true
        }
    }
}

/// `None` when the enrollment answer could not be read, so nothing is posted
/// and the check runs again later.
pub fn enrollment_needed<E: std::fmt::Display>(body: Result<String, E>) -> Option<bool> {
    match body {
        Ok(body) => Some(needs_enrollment(&body)),
        Err(e) => {
            warn!("enrollment status could not be read: {}", e);
            None
        }
    }
}

fn lms_headers() -> Headers {
    let settings = settings();
    let mut headers = Headers::new();
    if let Some(token) = &settings.edx_csrf_token {
        headers.push(("X-CSRFToken", token.clone()));
    }
    if let Some(api_key) = &settings.edx_api_key {
        headers.push(("X-Edx-Api-Key", api_key.clone()));
    }
    headers
}

async fn choose_learner(user: &mut GooseUser) -> TransactionResult {
    let settings = settings();
    let learner = {
        let mut rng = thread_rng();
        let username = pick_username(&settings.usernames_in_edx, &enrolled_usernames(), &mut rng);
        match (username, settings.rapid_response_course_data.choose(&mut rng)) {
            (Some(username), Some(course)) => Some(Learner { username, course: course.clone(), enrolled: false }),
            _ => None,
        }
    };
    match learner {
        Some(learner) => user.set_session_data(learner),
        None => warn!("rapid response needs USERNAMES_IN_EDX and course data; user {} stays idle", user.weighted_users_index),
    }
    Ok(())
}

async fn check_enrollment(user: &mut GooseUser) -> TransactionResult {
    let Some(learner) = user.get_session_data::<Learner>().filter(|learner| !learner.enrolled).cloned() else {
        return Ok(());
    };
    if is_enrolled(&learner.username) {
        if let Some(learner) = user.get_session_data_mut::<Learner>() {
            learner.enrolled = true;
        }
        return Ok(());
    }
    let path = format!("/api/enrollment/v1/enrollment/{},{}", learner.username, learner.course.course_id);
    let goose = get(user, &path, "Check Enrollment", &lms_headers()).await?;
    let Ok(response) = goose.response else { return Ok(()) };
    if !response.status().is_success() {
        return Ok(());
    }
    let Some(enroll) = enrollment_needed(response.text().await) else {
        return Ok(());
    };

    if enroll {
        let form = vec![
            ("course_id".to_string(), learner.course.course_id.clone()),
            ("enrollment_action".to_string(), "enroll".to_string()),
        ];
        send_form(user, "/change_enrollment", "Enroll in Course", &lms_headers(), &form).await?;
    }
    mark_enrolled(&learner.username);
    if let Some(learner) = user.get_session_data_mut::<Learner>() {
        learner.enrolled = true;
    }
    Ok(())
}

async fn submit_answer(user: &mut GooseUser) -> TransactionResult {
    if settings().edx_csrf_token.is_none() {
        return Ok(());
    }
    let Some(submission) = user
        .get_session_data::<Learner>()
        .and_then(|learner| choose_answer(&learner.course, &mut thread_rng()))
    else {
        return Ok(());
    };
    send_form(user, &submission.path, "Problem Submission", &lms_headers(), &submission.form).await?;
    Ok(())
}

pub fn rapid_response_scenario() -> Result<Scenario, GooseError> {
    let settings = settings();
    Ok(scenario!("RapidResponse")
        .set_host(&settings.lms_base_url)
        .set_wait_time(settings.task_min_wait, settings.task_max_wait)?
        .register_transaction(transaction!(choose_learner).set_on_start())
        .register_transaction(transaction!(check_enrollment).set_weight(1)?)
        .register_transaction(transaction!(submit_answer).set_weight(5)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::rapid_response::ProblemBlock;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn course() -> CourseData {
        CourseData {
            course_id: "course-v1:edX+DemoX+Demo_Course".to_string(),
            blocks: vec![ProblemBlock {
                id: "block-v1:edX+DemoX+Demo_Course+type@problem+block@q1".to_string(),
                choicegroup_id: "q1_2_1".to_string(),
                answer_ids: vec!["choice_0".to_string(), "choice_1".to_string()],
            }],
        }
    }

    #[test]
    fn answer_targets_the_problem_check_handler() {
        let mut rng = StdRng::seed_from_u64(7);
        let submission = choose_answer(&course(), &mut rng).unwrap();
        assert_eq!(
            submission.path,
            "/courses/course-v1:edX+DemoX+Demo_Course/xblock/block-v1:edX+DemoX+Demo_Course+type@problem+block@q1/handler/xmodule_handler/problem_check"
        );
        assert_eq!(submission.form.len(), 1);
        assert_eq!(submission.form[0].0, "input_q1_2_1");
        assert!(submission.form[0].1.starts_with("choice_"));
    }

    #[test]
    fn courses_without_answers_have_nothing_to_submit() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut empty = course();
        empty.blocks[0].answer_ids.clear();
        assert_eq!(choose_answer(&empty, &mut rng), None);
        empty.blocks.clear();
        assert_eq!(choose_answer(&empty, &mut rng), None);
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn enrolled_usernames_are_skipped_while_others_remain() {
        let usernames = names(&["a", "b", "c"]);
        let enrolled = BTreeSet::from(["a".to_string(), "c".to_string()]);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(pick_username(&usernames, &enrolled, &mut rng).as_deref(), Some("b"));
        }
    }

    #[test]
    fn fully_enrolled_usernames_are_still_used() {
        let usernames = names(&["a", "b"]);
        let enrolled = BTreeSet::from(["a".to_string(), "b".to_string()]);
        let mut rng = StdRng::seed_from_u64(3);
        let picked = pick_username(&usernames, &enrolled, &mut rng).unwrap();
        assert!(usernames.contains(&picked));
        assert_eq!(pick_username(&[], &enrolled, &mut rng), None);
    }

    #[test]
    fn enrollment_is_shared_between_learners() {
        assert!(!is_enrolled("shared-learner"));
        mark_enrolled("shared-learner");
        assert!(is_enrolled("shared-learner"));
        assert!(enrolled_usernames().contains("shared-learner"));
    }

    #[test]
    fn unreadable_enrollment_answer_enrolls_nobody() {
        assert_eq!(enrollment_needed::<String>(Err("connection reset".to_string())), None);
        assert_eq!(enrollment_needed::<String>(Ok(String::new())), Some(true));
        assert_eq!(enrollment_needed::<String>(Ok(r#"{"is_active": true}"#.to_string())), Some(false));
    }

    #[test]
    fn enrollment_is_needed_unless_active() {
        assert!(needs_enrollment(""));
        assert!(needs_enrollment(r#"{"is_active": false, "mode": "audit"}"#));
        assert!(needs_enrollment("{}"));
        assert!(!needs_enrollment(r#"{"is_active": true, "mode": "audit"}"#));
    }
}
