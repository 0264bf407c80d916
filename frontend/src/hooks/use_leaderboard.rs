use shared::LeaderboardEntry;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

const COMPONENT: &str = "use_leaderboard";

#[derive(Clone)]
pub struct LeaderboardState {
    pub entries: Vec<LeaderboardEntry>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Clone, PartialEq)]
pub struct UseLeaderboardActions {
    pub refresh: Callback<()>,
}

pub struct UseLeaderboardResult {
    pub state: LeaderboardState,
    pub actions: UseLeaderboardActions,
}

/// Top contributors by points, ranked server-side.
#[hook]
pub fn use_leaderboard(api_client: &ApiClient) -> UseLeaderboardResult {
    let entries = use_state(Vec::<LeaderboardEntry>::new);
    let loading = use_state(|| false);
    let error = use_state(|| Option::<String>::None);

    let refresh = {
        let api_client = api_client.clone();
        let entries = entries.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback((), move |_: (), _| {
            let api_client = api_client.clone();
            let entries = entries.clone();
            let loading = loading.clone();
            let error = error.clone();

            spawn_local(async move {
                loading.set(true);
                error.set(None);

                match api_client.leaderboard().await {
                    Ok(list) => entries.set(list),
                    Err(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Failed to load leaderboard: {}", e),
                        );
                        error.set(Some(e));
                    }
                }

                loading.set(false);
            });
        })
    };

    use_effect_with((), {
        let refresh = refresh.clone();
        move |_| {
            refresh.emit(());
            || ()
        }
    });

    let state = LeaderboardState {
        entries: (*entries).clone(),
        loading: *loading,
        error: (*error).clone(),
    };

    let actions = UseLeaderboardActions { refresh };

    UseLeaderboardResult { state, actions }
}
