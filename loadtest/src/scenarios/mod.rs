//! Goose scenarios, one per simulated kind of user. Pick a subset on the
//! command line with `--scenarios`.

pub mod discussions;
pub mod learn_search;
pub mod micromasters;
pub mod rapid_response;

use goose::prelude::*;

pub fn register_all(attack: GooseAttack) -> Result<GooseAttack, GooseError> {
    Ok(attack
        .register_scenario(learn_search::learn_search_scenario()?)
        .register_scenario(learn_search::ocw_search_scenario()?)
        .register_scenario(micromasters::dashboard_scenario()?)
        .register_scenario(micromasters::profile_scenario()?)
        .register_scenario(discussions::channel_scenario()?)
        .register_scenario(discussions::read_only_scenario()?)
        .register_scenario(discussions::user_creation_scenario()?)
        .register_scenario(rapid_response::rapid_response_scenario()?))
}
