use shared::{BloodRequest, CreateBloodRequestRequest};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::session::SessionStore;

const COMPONENT: &str = "use_blood_requests";

/// A content report against one request
#[derive(Clone, PartialEq)]
pub struct ContentReport {
    pub request_id: u32,
    pub reason: String,
}

#[derive(Clone)]
pub struct BloodRequestsState {
    pub requests: Vec<BloodRequest>,
    /// Request currently opened in detail view
    pub selected: Option<BloodRequest>,
    pub loading: bool,
    pub error: Option<String>,
    /// Acknowledgement from the last mutation, for inline display
    pub notice: Option<String>,
}

#[derive(Clone, PartialEq)]
pub struct UseBloodRequestsActions {
    /// Reload the listing with an optional city filter; the all-cities
    /// sentinel and `None` both mean unfiltered
    pub load: Callback<Option<String>>,
    pub load_detail: Callback<u32>,
    pub create: Callback<CreateBloodRequestRequest>,
    pub donate: Callback<u32>,
    pub block_user: Callback<u32>,
    pub report_content: Callback<ContentReport>,
}

pub struct UseBloodRequestsResult {
    pub state: BloodRequestsState,
    pub actions: UseBloodRequestsActions,
}

/// The public listing and detail flows: browse requests, offer to donate,
/// and the moderation actions available from a detail view. The viewer's
/// phone is attached to listing loads so the backend can hide their own and
/// blocked content.
#[hook]
pub fn use_blood_requests(
    api_client: &ApiClient,
    session: &SessionStore,
) -> UseBloodRequestsResult {
    let requests = use_state(Vec::<BloodRequest>::new);
    let selected = use_state(|| Option::<BloodRequest>::None);
    let loading = use_state(|| false);
    let error = use_state(|| Option::<String>::None);
    let notice = use_state(|| Option::<String>::None);

    let load = {
        let api_client = api_client.clone();
        let session = session.clone();
        let requests = requests.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback((), move |city: Option<String>, _| {
            let api_client = api_client.clone();
            let session = session.clone();
            let requests = requests.clone();
            let loading = loading.clone();
            let error = error.clone();

            spawn_local(async move {
                loading.set(true);
                error.set(None);

                let viewer_phone = session.phone();
                match api_client
                    .blood_requests(city.as_deref(), viewer_phone.as_deref())
                    .await
                {
                    Ok(list) => requests.set(list),
                    Err(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Failed to load blood requests: {}", e),
                        );
                        error.set(Some(e));
                    }
                }

                loading.set(false);
            });
        })
    };

    let load_detail = {
        let api_client = api_client.clone();
        let selected = selected.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback((), move |id: u32, _| {
            let api_client = api_client.clone();
            let selected = selected.clone();
            let loading = loading.clone();
            let error = error.clone();

            spawn_local(async move {
                loading.set(true);
                error.set(None);

                match api_client.blood_request(id).await {
                    Ok(request) => selected.set(Some(request)),
                    Err(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Failed to load request {}: {}", id, e),
                        );
                        error.set(Some(e));
                    }
                }

                loading.set(false);
            });
        })
    };

    let create = {
        let api_client = api_client.clone();
        let loading = loading.clone();
        let error = error.clone();
        let notice = notice.clone();

        use_callback((), move |request: CreateBloodRequestRequest, _| {
            let api_client = api_client.clone();
            let loading = loading.clone();
            let error = error.clone();
            let notice = notice.clone();

            spawn_local(async move {
                loading.set(true);
                error.set(None);
                notice.set(None);

                match api_client.create_blood_request(&request).await {
                    Ok(response) => notice.set(Some(response.message)),
                    Err(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Failed to create request: {}", e),
                        );
                        error.set(Some(e));
                    }
                }

                loading.set(false);
            });
        })
    };

    let donate = {
        let api_client = api_client.clone();
        let session = session.clone();
        let error = error.clone();
        let notice = notice.clone();

        use_callback((), move |request_id: u32, _| {
            let api_client = api_client.clone();
            let session = session.clone();
            let error = error.clone();
            let notice = notice.clone();

            spawn_local(async move {
                // Pages gate on the session before offering this action
                let Some(phone) = session.phone() else {
                    Logger::warn_with_component(COMPONENT, "Donate without a session, ignoring");
                    return;
                };

                match api_client.donate(&phone, request_id).await {
                    Ok(response) => notice.set(Some(response.message)),
                    Err(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Donation offer failed: {}", e),
                        );
                        error.set(Some(e));
                    }
                }
            });
        })
    };

    let block_user = {
        let api_client = api_client.clone();
        let session = session.clone();
        let error = error.clone();
        let notice = notice.clone();

        use_callback((), move |blocked_user_id: u32, _| {
            let api_client = api_client.clone();
            let session = session.clone();
            let error = error.clone();
            let notice = notice.clone();

            spawn_local(async move {
                let Some(phone) = session.phone() else {
                    Logger::warn_with_component(COMPONENT, "Block without a session, ignoring");
                    return;
                };

                match api_client.block_user(&phone, blocked_user_id).await {
                    Ok(response) => notice.set(Some(response.message)),
                    Err(e) => {
                        Logger::error_with_component(COMPONENT, &format!("Block failed: {}", e));
                        error.set(Some(e));
                    }
                }
            });
        })
    };

    let report_content = {
        let api_client = api_client.clone();
        let session = session.clone();
        let error = error.clone();
        let notice = notice.clone();

        use_callback((), move |report: ContentReport, _| {
            let api_client = api_client.clone();
            let session = session.clone();
            let error = error.clone();
            let notice = notice.clone();

            spawn_local(async move {
                let Some(phone) = session.phone() else {
                    Logger::warn_with_component(COMPONENT, "Report without a session, ignoring");
                    return;
                };

                match api_client
                    .report_content(&phone, report.request_id, &report.reason)
                    .await
                {
                    Ok(response) => notice.set(Some(response.message)),
                    Err(e) => {
                        Logger::error_with_component(COMPONENT, &format!("Report failed: {}", e));
                        error.set(Some(e));
                    }
                }
            });
        })
    };

    // Unfiltered listing on mount
    use_effect_with((), {
        let load = load.clone();
        move |_| {
            load.emit(None);
            || ()
        }
    });

    let state = BloodRequestsState {
        requests: (*requests).clone(),
        selected: (*selected).clone(),
        loading: *loading,
        error: (*error).clone(),
        notice: (*notice).clone(),
    };

    let actions = UseBloodRequestsActions {
        load,
        load_detail,
        create,
        donate,
        block_user,
        report_content,
    };

    UseBloodRequestsResult { state, actions }
}
