//! Open discussions REST calls, each reported under a name with the
//! identifiers collapsed.

use common::discussions::{
    ChannelRole, CreatedItem, CreatedUser, NewChannel, NewComment, NewPost, UserPayload, UserProfile, Vote,
};
use goose::prelude::*;
use rand::thread_rng;
use serde_json::json;

use crate::fake_text;
use crate::http_utils::goose_requests::{Headers, created, get, json_body, send, send_json, Body};
use crate::settings::settings;

pub type ApiResult<T> = Result<T, Box<TransactionError>>;

/// Staff API token, when one is configured.
pub fn auth_headers() -> Headers {
    match &settings().open_discussions_api_token {
        Some(token) => vec![("Authorization", format!("Bearer {token}"))],
        None => Headers::new(),
    }
}

fn random_profile() -> UserPayload {
    UserPayload { profile: UserProfile::named(fake_text::name(&mut thread_rng())) }
}

fn random_channel() -> NewChannel {
    let mut rng = thread_rng();
    NewChannel {
        title: fake_text::title(&mut rng),
        name: fake_text::channel_name(&mut rng),
        public_description: fake_text::paragraph(&mut rng),
        channel_type: "private".to_string(),
    }
}

fn random_post() -> NewPost {
    let mut rng = thread_rng();
    NewPost { title: fake_text::title(&mut rng), text: fake_text::paragraph(&mut rng), upvoted: false }
}

fn random_comment() -> NewComment {
    NewComment { text: fake_text::paragraph(&mut thread_rng()) }
}

/// Username of the new user, if the API answered `201 Created`.
pub async fn create_user(user: &mut GooseUser) -> ApiResult<Option<String>> {
    let payload = random_profile();
    let goose = send_json(user, &GooseMethod::Post, "/api/v0/users/", "/api/v0/users/", &auth_headers(), json!(payload)).await?;
    Ok(created::<CreatedUser>(goose).await.map(|created| created.username))
}

pub async fn update_user(user: &mut GooseUser, username: &str) -> ApiResult<()> {
    let payload = random_profile();
    let path = format!("/api/v0/users/{username}/");
    send_json(user, &GooseMethod::Patch, &path, "/api/v0/users/[username]/", &auth_headers(), json!(payload)).await?;
    Ok(())
}

/// Name of the new private channel, if it was created.
pub async fn create_channel(user: &mut GooseUser) -> ApiResult<Option<String>> {
    let channel = random_channel();
    let goose = send_json(user, &GooseMethod::Post, "/api/v0/channels/", "/api/v0/channels/", &auth_headers(), json!(channel)).await?;
    let name = channel.name;
    Ok(created::<serde_json::Value>(goose).await.map(|_| name))
}

pub async fn add_member(user: &mut GooseUser, role: ChannelRole, channel: &str, username: &str) -> ApiResult<()> {
    let collection = role.collection();
    let path = format!("/api/v0/channels/{channel}/{collection}/");
    let name = format!("/api/v0/channels/[channel_name]/{collection}/");
    let mut body = serde_json::Map::new();
    body.insert(role.name_field().to_string(), json!(username));
    send_json(user, &GooseMethod::Post, &path, &name, &auth_headers(), serde_json::Value::Object(body)).await?;
    Ok(())
}

pub async fn remove_member(user: &mut GooseUser, role: ChannelRole, channel: &str, username: &str) -> ApiResult<()> {
    let collection = role.collection();
    let path = format!("/api/v0/channels/{channel}/{collection}/{username}/");
    let name = format!("/api/v0/channels/[channel_name]/{collection}/[username]/");
    send(user, &GooseMethod::Delete, &path, &name, &auth_headers(), Body::Empty).await?;
    Ok(())
}

/// Id of the new post.
pub async fn create_post(user: &mut GooseUser, channel: &str) -> ApiResult<Option<String>> {
    let post = random_post();
    let path = format!("/api/v0/channels/{channel}/posts/");
    let goose = send_json(user, &GooseMethod::Post, &path, "/api/v0/channels/[channel_name]/posts/", &auth_headers(), json!(post)).await?;
    Ok(json_body::<CreatedItem>(goose).await.map(|item| item.id))
}

/// Id of the new comment.
pub async fn create_comment(user: &mut GooseUser, post_id: &str) -> ApiResult<Option<String>> {
    let comment = random_comment();
    let path = format!("/api/v0/posts/{post_id}/comments/");
    let goose = send_json(user, &GooseMethod::Post, &path, "/api/v0/posts/[post_id]/comments/", &auth_headers(), json!(comment)).await?;
    Ok(json_body::<CreatedItem>(goose).await.map(|item| item.id))
}

pub async fn vote_post(user: &mut GooseUser, post_id: &str, vote: Vote) -> ApiResult<()> {
    let path = format!("/api/v0/posts/{post_id}/");
    send_json(user, &GooseMethod::Patch, &path, "/api/v0/posts/[post_id]/", &auth_headers(), vote.body()).await?;
    Ok(())
}

pub async fn vote_comment(user: &mut GooseUser, comment_id: &str, vote: Vote) -> ApiResult<()> {
    let path = format!("/api/v0/comments/{comment_id}/");
    send_json(user, &GooseMethod::Patch, &path, "/api/v0/comments/[comment_id]/", &auth_headers(), vote.body()).await?;
    Ok(())
}

pub async fn load_frontpage(user: &mut GooseUser) -> ApiResult<()> {
    get(user, "/api/v0/frontpage/", "/api/v0/frontpage/", &auth_headers()).await?;
    Ok(())
}

pub async fn load_channels(user: &mut GooseUser) -> ApiResult<()> {
    get(user, "/api/v0/channels/", "/api/v0/channels/", &auth_headers()).await?;
    Ok(())
}

pub async fn load_channel_posts(user: &mut GooseUser, channel: &str) -> ApiResult<()> {
    let path = format!("/api/v0/channels/{channel}/posts/");
    get(user, &path, "/api/v0/channels/[channel_name]/posts/", &auth_headers()).await?;
    Ok(())
}

pub async fn load_post_comments(user: &mut GooseUser, post_id: &str) -> ApiResult<()> {
    let path = format!("/api/v0/posts/{post_id}/comments/");
    get(user, &path, "/api/v0/posts/[post_id]/comments/", &auth_headers()).await?;
    Ok(())
}
