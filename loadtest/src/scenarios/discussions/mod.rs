//! Open discussions users: a staff user managing channel membership while
//! contributors post, comment and vote, plus the read-only and user-creation
//! variants.

pub mod api;

use std::collections::BTreeSet;
use std::time::Duration;

use common::discussions::{ChannelRole, Vote};
use goose::prelude::*;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::thread_rng;
use tracing::{debug, info};

use crate::http_utils::goose_requests::{Headers, get};
use crate::settings::settings;

/// Users created by a single virtual user.
pub const MAX_USERNAMES: usize = 100;

const SETUP_USERS: usize = 2;
const SETUP_CHANNELS: usize = 1;

/// Everything a virtual user created so far. Membership, posts and comments
/// belong to the channel in `channel`.
#[derive(Debug, Clone, Default)]
pub struct Discussions {
    pub usernames: Vec<String>,
    pub channels: Vec<String>,
    pub channel: Option<String>,
    pub moderators: BTreeSet<String>,
    pub contributors: BTreeSet<String>,
    pub posts: Vec<String>,
    pub comments: Vec<String>,
}

impl Discussions {
    pub fn can_add_username(&self) -> bool {
        self.usernames.len() < MAX_USERNAMES
    }

    /// Moves to another channel, forgetting what was done in the current one.
    pub fn switch_channel(&mut self, channel: Option<String>) {
        self.channel = channel;
        self.moderators.clear();
        self.contributors.clear();
        self.posts.clear();
        self.comments.clear();
    }

    fn random_username(&self) -> Option<String> {
        self.usernames.choose(&mut thread_rng()).cloned()
    }

    fn random_contributor(&self) -> Option<String> {
        self.contributors.iter().choose(&mut thread_rng()).cloned()
    }

    fn random_channel(&self) -> Option<String> {
        self.channels.choose(&mut thread_rng()).cloned()
    }

    fn random_post(&self) -> Option<String> {
        self.posts.choose(&mut thread_rng()).cloned()
    }

    fn random_comment(&self) -> Option<String> {
        self.comments.choose(&mut thread_rng()).cloned()
    }
}

/// Reads from the user's state without holding on to the borrow.
fn pick<T>(user: &GooseUser, f: impl FnOnce(&Discussions) -> Option<T>) -> Option<T> {
    user.get_session_data::<Discussions>().and_then(f)
}

fn update(user: &mut GooseUser, f: impl FnOnce(&mut Discussions)) {
    match user.get_session_data_mut::<Discussions>() {
        Some(state) => f(state),
        None => {
            let mut state = Discussions::default();
            f(&mut state);
            user.set_session_data(state);
        }
    }
}

async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

async fn create_user(user: &mut GooseUser) -> TransactionResult {
    if !pick(user, |state| Some(state.can_add_username())).unwrap_or(true) {
        return Ok(());
    }
    if let Some(username) = api::create_user(user).await? {
        update(user, |state| state.usernames.push(username));
    }
    Ok(())
}

async fn create_channel(user: &mut GooseUser) -> TransactionResult {
    if let Some(channel) = api::create_channel(user).await? {
        update(user, |state| state.channels.push(channel));
    }
    Ok(())
}

async fn setup_channel_user(user: &mut GooseUser) -> TransactionResult {
    user.set_session_data(Discussions::default());
    for _ in 0..SETUP_USERS {
        create_user(user).await?;
    }
    for _ in 0..SETUP_CHANNELS {
        create_channel(user).await?;
    }
    let channel = pick(user, Discussions::random_channel);
    update(user, |state| state.switch_channel(channel));
    Ok(())
}

async fn switch_channel(user: &mut GooseUser) -> TransactionResult {
    let channel = pick(user, Discussions::random_channel);
    update(user, |state| state.switch_channel(channel));
    Ok(())
}

async fn add_member(user: &mut GooseUser, role: ChannelRole) -> TransactionResult {
    let Some((channel, username)) = pick(user, |state| Some((state.channel.clone()?, state.random_username()?))) else {
        return Ok(());
    };
    api::add_member(user, role, &channel, &username).await?;
    api::add_member(user, ChannelRole::Subscriber, &channel, &username).await?;
    update(user, |state| {
        match role {
            ChannelRole::Moderator => state.moderators.insert(username),
            _ => state.contributors.insert(username),
        };
    });
    Ok(())
}

async fn add_moderator(user: &mut GooseUser) -> TransactionResult {
    add_member(user, ChannelRole::Moderator).await
}

async fn add_contributor(user: &mut GooseUser) -> TransactionResult {
    add_member(user, ChannelRole::Contributor).await
}

async fn remove_contributor(user: &mut GooseUser) -> TransactionResult {
    let Some((channel, username)) = pick(user, |state| Some((state.channel.clone()?, state.random_contributor()?))) else {
        return Ok(());
    };
    api::remove_member(user, ChannelRole::Subscriber, &channel, &username).await?;
    api::remove_member(user, ChannelRole::Contributor, &channel, &username).await?;
    update(user, |state| {
        state.contributors.remove(&username);
    });
    Ok(())
}

async fn load_frontpage(user: &mut GooseUser) -> TransactionResult {
    if pick(user, Discussions::random_contributor).is_none() {
        return Ok(());
    }
    api::load_frontpage(user).await?;
    Ok(())
}

async fn load_channels(user: &mut GooseUser) -> TransactionResult {
    if pick(user, Discussions::random_contributor).is_none() {
        return Ok(());
    }
    api::load_channels(user).await?;
    Ok(())
}

async fn load_channel_posts(user: &mut GooseUser) -> TransactionResult {
    let Some(channel) = pick(user, |state| {
        state.random_contributor()?;
        state.channel.clone()
    }) else {
        return Ok(());
    };
    api::load_channel_posts(user, &channel).await?;
    Ok(())
}

async fn load_post_comments(user: &mut GooseUser) -> TransactionResult {
    let Some(post_id) = pick(user, |state| {
        state.random_contributor()?;
        state.random_post()
    }) else {
        return Ok(());
    };
    api::load_post_comments(user, &post_id).await?;
    Ok(())
}

async fn create_post(user: &mut GooseUser) -> TransactionResult {
    let Some(channel) = pick(user, |state| {
        state.random_contributor()?;
        state.channel.clone()
    }) else {
        return Ok(());
    };
    if let Some(post_id) = api::create_post(user, &channel).await? {
        update(user, |state| state.posts.push(post_id));
    }
    Ok(())
}

async fn create_comment(user: &mut GooseUser) -> TransactionResult {
    let Some(post_id) = pick(user, |state| {
        state.random_contributor()?;
        state.random_post()
    }) else {
        return Ok(());
    };
    if let Some(comment_id) = api::create_comment(user, &post_id).await? {
        update(user, |state| state.comments.push(comment_id));
    }
    Ok(())
}

async fn upvote_post(user: &mut GooseUser) -> TransactionResult {
    let Some(post_id) = pick(user, |state| {
        state.random_contributor()?;
        state.random_post()
    }) else {
        return Ok(());
    };
    api::vote_post(user, &post_id, Vote::Upvoted).await?;
    Ok(())
}

async fn vote_comment(user: &mut GooseUser, vote: Vote) -> TransactionResult {
    let Some(comment_id) = pick(user, |state| {
        state.random_contributor()?;
        state.random_comment()
    }) else {
        return Ok(());
    };
    api::vote_comment(user, &comment_id, vote).await?;
    Ok(())
}

async fn upvote_comment(user: &mut GooseUser) -> TransactionResult {
    vote_comment(user, Vote::Upvoted).await
}

async fn downvote_comment(user: &mut GooseUser) -> TransactionResult {
    vote_comment(user, Vote::Downvoted).await
}

async fn update_user(user: &mut GooseUser) -> TransactionResult {
    let Some(username) = pick(user, Discussions::random_username) else {
        return Ok(());
    };
    api::update_user(user, &username).await?;
    Ok(())
}

async fn index(user: &mut GooseUser) -> TransactionResult {
    get(user, "/", "/", &Headers::new()).await?;
    Ok(())
}

/// Seeds users, channels, memberships, posts and comments before the
/// read-only load starts.
async fn setup_read_only_user(user: &mut GooseUser) -> TransactionResult {
    let settings = settings();
    user.set_session_data(Discussions::default());

    for _ in 0..settings.users_to_create {
        let created = api::create_user(user).await?;
        pause(settings.post_wait).await;
        let Some(username) = created else { break };
        update(user, |state| state.usernames.push(username));
    }
    for _ in 0..settings.channels_to_create {
        let created = api::create_channel(user).await?;
        pause(settings.post_wait).await;
        let Some(channel) = created else { break };
        update(user, |state| state.channels.push(channel));
    }

    let Some(state) = user.get_session_data::<Discussions>().cloned() else {
        return Ok(());
    };
    for channel in &state.channels {
        for username in &state.usernames {
            api::add_member(user, ChannelRole::Contributor, channel, username).await?;
            api::add_member(user, ChannelRole::Subscriber, channel, username).await?;
            pause(settings.post_wait).await;
        }
    }
    if !state.usernames.is_empty() {
        let mut posts = vec![];
        for channel in &state.channels {
            for _ in 0..settings.posts_per_channel {
                if let Some(post_id) = api::create_post(user, channel).await? {
                    posts.push(post_id);
                }
                pause(settings.post_wait).await;
            }
        }
        let mut comments = vec![];
        for post_id in &posts {
            for _ in 0..settings.comments_per_post {
                if let Some(comment_id) = api::create_comment(user, post_id).await? {
                    comments.push(comment_id);
                }
                pause(settings.post_wait).await;
            }
        }
        update(user, |state| {
            state.contributors = state.usernames.iter().cloned().collect();
            state.posts = posts;
            state.comments = comments;
        });
    }

    info!(
        "read-only user {} seeded {} users and {} channels",
        user.weighted_users_index,
        state.usernames.len(),
        state.channels.len()
    );
    pause(settings.wait_before_load_test).await;
    Ok(())
}

async fn load_random_channel_posts(user: &mut GooseUser) -> TransactionResult {
    let Some(channel) = pick(user, |state| {
        state.random_contributor()?;
        state.random_channel()
    }) else {
        return Ok(());
    };
    api::load_channel_posts(user, &channel).await?;
    Ok(())
}

async fn create_users(user: &mut GooseUser) -> TransactionResult {
    create_user(user).await
}

async fn update_users(user: &mut GooseUser) -> TransactionResult {
    debug!("updating a created user");
    update_user(user).await
}

pub fn channel_scenario() -> Result<Scenario, GooseError> {
    let settings = settings();
    Ok(scenario!("DiscussionsChannel")
        .set_host(&settings.open_discussions_base_url)
        .set_wait_time(settings.task_min_wait, settings.task_max_wait)?
        .register_transaction(transaction!(setup_channel_user).set_on_start())
        .register_transaction(transaction!(switch_channel).set_weight(1)?)
        .register_transaction(transaction!(add_moderator).set_weight(1)?)
        .register_transaction(transaction!(add_contributor).set_weight(10)?)
        .register_transaction(transaction!(remove_contributor).set_weight(6)?)
        .register_transaction(transaction!(load_frontpage).set_weight(20)?)
        .register_transaction(transaction!(load_channels).set_weight(20)?)
        .register_transaction(transaction!(load_channel_posts).set_weight(20)?)
        .register_transaction(transaction!(load_post_comments).set_weight(20)?)
        .register_transaction(transaction!(create_post).set_weight(6)?)
        .register_transaction(transaction!(create_comment).set_weight(10)?)
        .register_transaction(transaction!(upvote_post).set_weight(20)?)
        .register_transaction(transaction!(upvote_comment).set_weight(20)?)
        .register_transaction(transaction!(downvote_comment).set_weight(20)?)
        .register_transaction(transaction!(create_channel).set_weight(1)?.set_name("create_additional_channel"))
        .register_transaction(transaction!(create_user).set_weight(1)?.set_name("create_additional_user"))
        .register_transaction(transaction!(update_user).set_weight(5)?)
        .register_transaction(transaction!(index).set_weight(10)?))
}

pub fn read_only_scenario() -> Result<Scenario, GooseError> {
    let settings = settings();
    Ok(scenario!("DiscussionsReadOnly")
        .set_host(&settings.open_discussions_base_url)
        .set_wait_time(settings.task_min_wait, settings.task_max_wait)?
        .register_transaction(transaction!(setup_read_only_user).set_on_start())
        .register_transaction(transaction!(index))
        .register_transaction(transaction!(load_frontpage))
        .register_transaction(transaction!(load_channels))
        .register_transaction(transaction!(load_random_channel_posts).set_name("load_channel_posts"))
        .register_transaction(transaction!(load_post_comments)))
}

/// Batch user creation with barely any wait, run with few users.
pub fn user_creation_scenario() -> Result<Scenario, GooseError> {
    Ok(scenario!("DiscussionsUserCreation")
        .set_host(&settings().open_discussions_base_url)
        .set_wait_time(Duration::from_millis(1), Duration::from_millis(100))?
        .register_transaction(transaction!(create_users))
        .register_transaction(transaction!(update_users)))
}
