//! Environment driven settings shared by all scenarios.

use std::sync::OnceLock;
use std::time::Duration;

use anyhow::Context;
use common::rapid_response::CourseData;

static SETTINGS: OnceLock<Settings> = OnceLock::new();

const DEFAULT_WORD_LIST_URL: &str = "https://raw.githubusercontent.com/dwyl/english-words/master/words_alpha.txt";
const DEFAULT_COURSE_DATA_FILE: &str = "course_data.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub task_min_wait: Duration,
    pub task_max_wait: Duration,

    pub micromasters_base_url: String,
    pub micromasters_program_id: u32,
    pub micromasters_csrf_token: Option<String>,
    pub usernames_in_edx: Vec<String>,

    pub open_discussions_base_url: String,
    pub open_discussions_api_token: Option<String>,
    pub users_to_create: usize,
    pub channels_to_create: usize,
    pub posts_per_channel: usize,
    pub comments_per_post: usize,
    pub post_wait: Duration,
    pub wait_before_load_test: Duration,

    pub lms_base_url: String,
    pub edx_api_key: Option<String>,
    pub edx_csrf_token: Option<String>,
    pub rapid_response_course_data: Vec<CourseData>,

    pub learn_word_list_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            task_min_wait: Duration::from_millis(1000),
            task_max_wait: Duration::from_millis(3000),

            micromasters_base_url: "http://192.168.99.100:8079".to_string(),
            micromasters_program_id: 3,
            micromasters_csrf_token: None,
            usernames_in_edx: vec!["zoe".to_string(), "emma".to_string()],

            open_discussions_base_url: "http://mit-open.mit.local:8063".to_string(),
            open_discussions_api_token: None,
            users_to_create: 5,
            channels_to_create: 2,
            posts_per_channel: 5,
            comments_per_post: 3,
            post_wait: Duration::ZERO,
            wait_before_load_test: Duration::from_secs(5),

            lms_base_url: "http://localhost:18000".to_string(),
            edx_api_key: None,
            edx_csrf_token: None,
            rapid_response_course_data: vec![],

            learn_word_list_url: DEFAULT_WORD_LIST_URL.to_string(),
        }
    }
}

fn parse_number<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        Some(value) => value.trim().parse::<T>().with_context(|| format!("{name} is not a valid number: {value:?}")),
        None => Ok(default),
    }
}

fn parse_millis(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: Duration) -> anyhow::Result<Duration> {
    let millis = parse_number(lookup, name, default.as_millis() as u64)?;
    Ok(Duration::from_millis(millis))
}

fn parse_usernames(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn read_course_data(lookup: &impl Fn(&str) -> Option<String>) -> anyhow::Result<Vec<CourseData>> {
    if let Some(json) = lookup("RAPID_RESPONSE_COURSE_DATA") {
        return serde_json::from_str(json.trim()).context("RAPID_RESPONSE_COURSE_DATA is not valid course data");
    }
    let path = lookup("RAPID_RESPONSE_COURSE_DATA_FILE").unwrap_or(DEFAULT_COURSE_DATA_FILE.to_string());
    match std::fs::read_to_string(&path) {
        Ok(json) => serde_json::from_str(&json).with_context(|| format!("{path} is not valid course data")),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No course data at {}", path);
            Ok(vec![])
        }
        Err(e) => Err(e).with_context(|| format!("failed to read {path}")),
    }
}

/// Only the rapid response scenario needs course data, so bad data leaves it
/// idle instead of stopping the other scenarios.
fn load_course_data(lookup: &impl Fn(&str) -> Option<String>) -> Vec<CourseData> {
    match read_course_data(lookup) {
        Ok(course_data) => course_data,
        Err(e) => {
            tracing::warn!("ignoring rapid response course data: {:#}", e);
            vec![]
        }
    }
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Settings::default();

        let task_min_wait = parse_millis(&lookup, "LOCUST_TASK_MIN_WAIT", defaults.task_min_wait)?;
        let task_max_wait = parse_millis(&lookup, "LOCUST_TASK_MAX_WAIT", defaults.task_max_wait)?;
        if task_min_wait > task_max_wait {
            anyhow::bail!("LOCUST_TASK_MIN_WAIT must not exceed LOCUST_TASK_MAX_WAIT");
        }

        Ok(Self {
            task_min_wait,
            task_max_wait,

            micromasters_base_url: lookup("MICROMASTERS_BASE_URL").unwrap_or(defaults.micromasters_base_url),
            micromasters_program_id: parse_number(&lookup, "MICROMASTERS_PROGRAM_ID", defaults.micromasters_program_id)?,
            micromasters_csrf_token: lookup("MICROMASTERS_CSRF_TOKEN"),
            usernames_in_edx: lookup("USERNAMES_IN_EDX")
                .map(|value| parse_usernames(&value))
                .unwrap_or(defaults.usernames_in_edx),

            open_discussions_base_url: lookup("OPEN_DISCUSSIONS_BASE_URL").unwrap_or(defaults.open_discussions_base_url),
            open_discussions_api_token: lookup("OPEN_DISCUSSIONS_API_TOKEN"),
            users_to_create: parse_number(&lookup, "USERS_TO_CREATE", defaults.users_to_create)?,
            channels_to_create: parse_number(&lookup, "CHANNELS_TO_CREATE", defaults.channels_to_create)?,
            posts_per_channel: parse_number(&lookup, "POSTS_PER_CHANNEL", defaults.posts_per_channel)?,
            comments_per_post: parse_number(&lookup, "COMMENTS_PER_POST", defaults.comments_per_post)?,
            post_wait: parse_millis(&lookup, "POST_WAIT_MS", defaults.post_wait)?,
            wait_before_load_test: Duration::from_secs(parse_number(
                &lookup,
                "WAIT_BEFORE_LOAD_TEST_SECONDS",
                defaults.wait_before_load_test.as_secs(),
            )?),

            lms_base_url: lookup("LMS_BASE_URL").unwrap_or(defaults.lms_base_url),
            edx_api_key: lookup("EDX_API_KEY"),
            edx_csrf_token: lookup("EDX_CSRF_TOKEN"),
            rapid_response_course_data: load_course_data(&lookup),

            learn_word_list_url: lookup("LEARN_WORD_LIST_URL").unwrap_or(defaults.learn_word_list_url),
        })
    }
}

/// Makes `settings` available to goose transactions, which take no arguments
/// besides the user. Only the first call has an effect.
pub fn install(settings: Settings) {
    if SETTINGS.set(settings).is_err() {
        tracing::warn!("settings were already installed");
    }
}

pub fn settings() -> &'static Settings {
    SETTINGS.get_or_init(Settings::default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect::<HashMap<_, _>>();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let settings = Settings::from_lookup(lookup_from(&[("RAPID_RESPONSE_COURSE_DATA_FILE", "/nonexistent/course_data.json")])).unwrap();
        assert_eq!(settings.task_min_wait, Duration::from_millis(1000));
        assert_eq!(settings.task_max_wait, Duration::from_millis(3000));
        assert_eq!(settings.micromasters_program_id, 3);
        assert_eq!(settings.usernames_in_edx, ["zoe", "emma"]);
        assert_eq!(settings.open_discussions_base_url, "http://mit-open.mit.local:8063");
        assert_eq!(settings.micromasters_csrf_token, None);
        assert!(settings.rapid_response_course_data.is_empty());
    }

    #[test]
    fn overrides_are_parsed() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("LOCUST_TASK_MIN_WAIT", "10"),
            ("LOCUST_TASK_MAX_WAIT", " 20 "),
            ("USERNAMES_IN_EDX", "staff, verified ,,audit"),
            ("MICROMASTERS_CSRF_TOKEN", "token"),
            (
                "RAPID_RESPONSE_COURSE_DATA",
                r#"[{"course_id": "course-v1:edX+DemoX+Demo_Course", "blocks": [{"id": "b1", "choicegroup_id": "cg1", "answer_ids": ["choice_0", "choice_1"]}]}]"#,
            ),
        ]))
        .unwrap();
        assert_eq!(settings.task_min_wait, Duration::from_millis(10));
        assert_eq!(settings.task_max_wait, Duration::from_millis(20));
        assert_eq!(settings.usernames_in_edx, ["staff", "verified", "audit"]);
        assert_eq!(settings.micromasters_csrf_token.as_deref(), Some("token"));
        assert_eq!(settings.rapid_response_course_data[0].blocks[0].answer_ids.len(), 2);
    }

    #[test]
    fn invalid_numbers_are_errors() {
        let err = Settings::from_lookup(lookup_from(&[("MICROMASTERS_PROGRAM_ID", "three")])).unwrap_err();
        assert!(err.to_string().contains("MICROMASTERS_PROGRAM_ID"));
    }

    #[test]
    fn malformed_course_data_is_ignored() {
        let settings = Settings::from_lookup(lookup_from(&[("RAPID_RESPONSE_COURSE_DATA", "[{\"course_id\": 3}")])).unwrap();
        assert!(settings.rapid_response_course_data.is_empty());
        assert!(read_course_data(&lookup_from(&[("RAPID_RESPONSE_COURSE_DATA", "not json")])).is_err());
    }

    #[test]
    fn min_wait_above_max_wait_is_rejected() {
        let result = Settings::from_lookup(lookup_from(&[("LOCUST_TASK_MIN_WAIT", "5000")]));
        assert!(result.is_err());
    }
}
