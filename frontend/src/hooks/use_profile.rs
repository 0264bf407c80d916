use shared::{DonationRecord, UpdateProfileRequest, UserProfile};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::session::SessionStore;

const COMPONENT: &str = "use_profile";

/// Editable profile fields; the phone stays fixed as the account identifier
#[derive(Clone, PartialEq)]
pub struct ProfileEdit {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Clone, PartialEq)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Clone)]
pub struct ProfileState {
    pub profile: Option<UserProfile>,
    pub donations: Vec<DonationRecord>,
    pub loading: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
    /// Set once the account is gone; pages route back to the landing page
    pub account_deleted: bool,
}

#[derive(Clone, PartialEq)]
pub struct UseProfileActions {
    pub refresh: Callback<()>,
    pub update_profile: Callback<ProfileEdit>,
    pub change_password: Callback<PasswordChange>,
    pub delete_account: Callback<()>,
}

pub struct UseProfileResult {
    pub state: ProfileState,
    pub actions: UseProfileActions,
}

/// Profile and settings flows. Every fresh profile fetch also refreshes the
/// cached session stats; the server stays the source of truth for points.
#[hook]
pub fn use_profile(api_client: &ApiClient, session: &SessionStore) -> UseProfileResult {
    let profile = use_state(|| Option::<UserProfile>::None);
    let donations = use_state(Vec::<DonationRecord>::new);
    let loading = use_state(|| false);
    let error = use_state(|| Option::<String>::None);
    let notice = use_state(|| Option::<String>::None);
    let account_deleted = use_state(|| false);

    let refresh = {
        let api_client = api_client.clone();
        let session = session.clone();
        let profile = profile.clone();
        let donations = donations.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback((), move |_: (), _| {
            let api_client = api_client.clone();
            let session = session.clone();
            let profile = profile.clone();
            let donations = donations.clone();
            let loading = loading.clone();
            let error = error.clone();

            spawn_local(async move {
                let Some(phone) = session.phone() else {
                    Logger::warn_with_component(COMPONENT, "Refresh without a session, ignoring");
                    return;
                };

                loading.set(true);
                error.set(None);

                match api_client.user_profile(&phone).await {
                    Ok(fresh) => {
                        session.update_stats(fresh.points, &fresh.badge);
                        profile.set(Some(fresh));
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Failed to load profile: {}", e),
                        );
                        error.set(Some(e));
                    }
                }

                match api_client.my_donations(&phone).await {
                    Ok(list) => donations.set(list),
                    Err(e) => {
                        // History failure must not take down the profile view
                        Logger::warn_with_component(
                            COMPONENT,
                            &format!("Failed to load donation history: {}", e),
                        );
                    }
                }

                loading.set(false);
            });
        })
    };

    let update_profile = {
        let api_client = api_client.clone();
        let session = session.clone();
        let profile = profile.clone();
        let error = error.clone();
        let notice = notice.clone();

        use_callback((), move |edit: ProfileEdit, _| {
            let api_client = api_client.clone();
            let session = session.clone();
            let profile = profile.clone();
            let error = error.clone();
            let notice = notice.clone();

            spawn_local(async move {
                let Some(phone) = session.phone() else {
                    Logger::warn_with_component(COMPONENT, "Update without a session, ignoring");
                    return;
                };

                let request = UpdateProfileRequest {
                    phone: phone.clone(),
                    first_name: edit.first_name.clone(),
                    last_name: edit.last_name.clone(),
                    email: edit.email.clone(),
                };

                match api_client.update_profile(&request).await {
                    Ok(response) => {
                        // Keep the cached identity in step with the server
                        if let Some(mut user) = session.get() {
                            user.first_name = edit.first_name.clone();
                            user.last_name = edit.last_name.clone();
                            session.save(&user);
                        }
                        if let Ok(fresh) = api_client.user_profile(&phone).await {
                            profile.set(Some(fresh));
                        }
                        notice.set(Some(response.message));
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Profile update failed: {}", e),
                        );
                        error.set(Some(e));
                    }
                }
            });
        })
    };

    let change_password = {
        let api_client = api_client.clone();
        let session = session.clone();
        let error = error.clone();
        let notice = notice.clone();

        use_callback((), move |change: PasswordChange, _| {
            let api_client = api_client.clone();
            let session = session.clone();
            let error = error.clone();
            let notice = notice.clone();

            spawn_local(async move {
                let Some(phone) = session.phone() else {
                    Logger::warn_with_component(
                        COMPONENT,
                        "Password change without a session, ignoring",
                    );
                    return;
                };

                match api_client
                    .change_password(&phone, &change.old_password, &change.new_password)
                    .await
                {
                    Ok(response) => notice.set(Some(response.message)),
                    Err(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Password change failed: {}", e),
                        );
                        error.set(Some(e));
                    }
                }
            });
        })
    };

    let delete_account = {
        let api_client = api_client.clone();
        let session = session.clone();
        let account_deleted = account_deleted.clone();
        let error = error.clone();

        use_callback((), move |_: (), _| {
            let api_client = api_client.clone();
            let session = session.clone();
            let account_deleted = account_deleted.clone();
            let error = error.clone();

            spawn_local(async move {
                let Some(phone) = session.phone() else {
                    Logger::warn_with_component(COMPONENT, "Delete without a session, ignoring");
                    return;
                };

                match api_client.delete_account(&phone).await {
                    Ok(_) => {
                        session.logout();
                        account_deleted.set(true);
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Account deletion failed: {}", e),
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

    let state = ProfileState {
        profile: (*profile).clone(),
        donations: (*donations).clone(),
        loading: *loading,
        error: (*error).clone(),
        notice: (*notice).clone(),
        account_deleted: *account_deleted,
    };

    let actions = UseProfileActions {
        refresh,
        update_profile,
        change_password,
        delete_account,
    };

    UseProfileResult { state, actions }
}
