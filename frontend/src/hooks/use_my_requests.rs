use shared::{BloodRequest, RequestDonor};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::session::SessionStore;

const COMPONENT: &str = "use_my_requests";

/// Approval of one donor's offer on one of my requests. Carrying the request
/// id lets the donor list refresh right after the approval lands.
#[derive(Clone, PartialEq)]
pub struct DonationApproval {
    pub donation_id: u32,
    pub request_id: u32,
}

#[derive(Clone)]
pub struct MyRequestsState {
    pub requests: Vec<BloodRequest>,
    /// Donors for the request last inspected via `load_donors`
    pub donors: Vec<RequestDonor>,
    pub donors_request_id: Option<u32>,
    pub loading: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
}

#[derive(Clone, PartialEq)]
pub struct UseMyRequestsActions {
    pub refresh: Callback<()>,
    pub delete_request: Callback<u32>,
    pub load_donors: Callback<u32>,
    pub approve_donation: Callback<DonationApproval>,
}

pub struct UseMyRequestsResult {
    pub state: MyRequestsState,
    pub actions: UseMyRequestsActions,
}

/// The owner's side of a request: list my listings, delete one, inspect its
/// pending donors and approve an offer.
#[hook]
pub fn use_my_requests(api_client: &ApiClient, session: &SessionStore) -> UseMyRequestsResult {
    let requests = use_state(Vec::<BloodRequest>::new);
    let donors = use_state(Vec::<RequestDonor>::new);
    let donors_request_id = use_state(|| Option::<u32>::None);
    let loading = use_state(|| false);
    let error = use_state(|| Option::<String>::None);
    let notice = use_state(|| Option::<String>::None);

    let refresh = {
        let api_client = api_client.clone();
        let session = session.clone();
        let requests = requests.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback((), move |_: (), _| {
            let api_client = api_client.clone();
            let session = session.clone();
            let requests = requests.clone();
            let loading = loading.clone();
            let error = error.clone();

            spawn_local(async move {
                let Some(phone) = session.phone() else {
                    Logger::warn_with_component(COMPONENT, "Refresh without a session, ignoring");
                    return;
                };

                loading.set(true);
                error.set(None);

                match api_client.my_requests(&phone).await {
                    Ok(list) => requests.set(list),
                    Err(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Failed to load my requests: {}", e),
                        );
                        error.set(Some(e));
                    }
                }

                loading.set(false);
            });
        })
    };

    let delete_request = {
        let api_client = api_client.clone();
        let session = session.clone();
        let requests = requests.clone();
        let error = error.clone();
        let notice = notice.clone();

        use_callback((), move |id: u32, _| {
            let api_client = api_client.clone();
            let session = session.clone();
            let requests = requests.clone();
            let error = error.clone();
            let notice = notice.clone();

            spawn_local(async move {
                match api_client.delete_request(id).await {
                    Ok(response) => {
                        notice.set(Some(response.message));
                        if let Some(phone) = session.phone() {
                            if let Ok(list) = api_client.my_requests(&phone).await {
                                requests.set(list);
                            }
                        }
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Failed to delete request {}: {}", id, e),
                        );
                        error.set(Some(e));
                    }
                }
            });
        })
    };

    let load_donors = {
        let api_client = api_client.clone();
        let donors = donors.clone();
        let donors_request_id = donors_request_id.clone();
        let error = error.clone();

        use_callback((), move |request_id: u32, _| {
            let api_client = api_client.clone();
            let donors = donors.clone();
            let donors_request_id = donors_request_id.clone();
            let error = error.clone();

            spawn_local(async move {
                match api_client.request_donors(request_id).await {
                    Ok(list) => {
                        donors_request_id.set(Some(request_id));
                        donors.set(list);
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Failed to load donors for request {}: {}", request_id, e),
                        );
                        error.set(Some(e));
                    }
                }
            });
        })
    };

    let approve_donation = {
        let api_client = api_client.clone();
        let donors = donors.clone();
        let error = error.clone();
        let notice = notice.clone();

        use_callback((), move |approval: DonationApproval, _| {
            let api_client = api_client.clone();
            let donors = donors.clone();
            let error = error.clone();
            let notice = notice.clone();

            spawn_local(async move {
                match api_client.approve_donation(approval.donation_id).await {
                    Ok(response) => {
                        notice.set(Some(response.message));
                        // The approved offer leaves the pending list
                        if let Ok(list) = api_client.request_donors(approval.request_id).await {
                            donors.set(list);
                        }
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Failed to approve donation: {}", e),
                        );
                        error.set(Some(e));
                    }
                }
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

    let state = MyRequestsState {
        requests: (*requests).clone(),
        donors: (*donors).clone(),
        donors_request_id: *donors_request_id,
        loading: *loading,
        error: (*error).clone(),
        notice: (*notice).clone(),
    };

    let actions = UseMyRequestsActions {
        refresh,
        delete_request,
        load_donors,
        approve_donation,
    };

    UseMyRequestsResult { state, actions }
}
