use goose::goose::GooseResponse;
use goose::prelude::*;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub type Headers = Vec<(&'static str, String)>;

pub enum Body<'a> {
    Empty,
    Json(serde_json::Value),
    Form(&'a [(String, String)]),
}

/// Sends one request reported under `name`, so paths with ids in them are grouped.
pub async fn send(
    user: &mut GooseUser,
    method: &GooseMethod,
    path: &str,
    name: &str,
    headers: &Headers,
    body: Body<'_>,
) -> Result<GooseResponse, Box<TransactionError>> {
    let mut request_builder = user.get_request_builder(method, path)?;
    for (key, value) in headers {
        request_builder = request_builder.header(*key, value.as_str());
    }
    request_builder = match body {
        Body::Empty => request_builder,
        Body::Json(value) => request_builder
            .header("Content-Type", "application/json")
            .body(value.to_string()),
        Body::Form(fields) => request_builder.form(fields),
    };

    let goose_request = GooseRequest::builder()
        .set_request_builder(request_builder)
        .name(name)
        .build();

    user.request(goose_request).await
}

pub async fn get(user: &mut GooseUser, path: &str, name: &str, headers: &Headers) -> Result<GooseResponse, Box<TransactionError>> {
    send(user, &GooseMethod::Get, path, name, headers, Body::Empty).await
}

pub async fn send_json(
    user: &mut GooseUser,
    method: &GooseMethod,
    path: &str,
    name: &str,
    headers: &Headers,
    body: serde_json::Value,
) -> Result<GooseResponse, Box<TransactionError>> {
    send(user, method, path, name, headers, Body::Json(body)).await
}

pub async fn send_form(
    user: &mut GooseUser,
    path: &str,
    name: &str,
    headers: &Headers,
    fields: &[(String, String)],
) -> Result<GooseResponse, Box<TransactionError>> {
    send(user, &GooseMethod::Post, path, name, headers, Body::Form(fields)).await
}

/// Parses a successful JSON response. Failed requests were already recorded
/// by goose and come back as `None`.
pub async fn json_body<T: DeserializeOwned>(goose: GooseResponse) -> Option<T> {
    let response = match goose.response {
        Ok(response) => response,
        Err(e) => {
            debug!("request failed: {}", e);
            return None;
        }
    };
    let status = response.status();
    if !status.is_success() {
        debug!("unexpected status {}", status);
        return None;
    }
    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            warn!("json_body: failed to read body: {}", e);
            return None;
        }
    };
    match serde_json::from_str::<T>(&text) {
        Ok(body) => Some(body),
        Err(e) => {
            warn!("json_body: {}", e);
            None
        }
    }
}

/// Like [`json_body`], but only for `201 Created` answers.
pub async fn created<T: DeserializeOwned>(goose: GooseResponse) -> Option<T> {
    let status = goose.response.as_ref().map(|response| response.status().as_u16()).ok();
    if status != Some(201) {
        debug!("creation answered with {:?}", status);
        return None;
    }
    json_body(goose).await
}
