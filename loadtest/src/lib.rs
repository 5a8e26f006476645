pub mod fake_text;
pub mod http_utils;
pub mod learn;
pub mod scenarios;
pub mod settings;
