use shared::{RegisterRequest, User};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::session::SessionStore;

const COMPONENT: &str = "use_auth";

/// Credentials for the login action
#[derive(Clone, PartialEq)]
pub struct LoginCredentials {
    pub phone: String,
    pub password: String,
    /// Push token forwarded to the backend when the host app has one
    pub fcm_token: Option<String>,
}

/// One OTP verification attempt; the phone comes back from the register step
#[derive(Clone, PartialEq)]
pub struct OtpVerification {
    pub phone: String,
    pub code: String,
}

#[derive(Clone)]
pub struct AuthState {
    pub user: Option<User>,
    /// Phone awaiting OTP verification after a successful registration
    pub pending_phone: Option<String>,
    pub otp_verified: bool,
    pub busy: bool,
    pub error: Option<String>,
}

#[derive(Clone, PartialEq)]
pub struct UseAuthActions {
    pub login: Callback<LoginCredentials>,
    pub register: Callback<RegisterRequest>,
    pub verify_otp: Callback<OtpVerification>,
    pub logout: Callback<()>,
}

pub struct UseAuthResult {
    pub state: AuthState,
    pub actions: UseAuthActions,
}

/// Login, registration and OTP flows. A successful login seeds the session
/// store; logout clears it.
#[hook]
pub fn use_auth(api_client: &ApiClient, session: &SessionStore) -> UseAuthResult {
    let user = use_state({
        let session = session.clone();
        move || session.get()
    });
    let pending_phone = use_state(|| Option::<String>::None);
    let otp_verified = use_state(|| false);
    let busy = use_state(|| false);
    let error = use_state(|| Option::<String>::None);

    let login = {
        let api_client = api_client.clone();
        let session = session.clone();
        let user = user.clone();
        let busy = busy.clone();
        let error = error.clone();

        use_callback((), move |credentials: LoginCredentials, _| {
            let api_client = api_client.clone();
            let session = session.clone();
            let user = user.clone();
            let busy = busy.clone();
            let error = error.clone();

            spawn_local(async move {
                busy.set(true);
                error.set(None);

                match api_client
                    .login(
                        &credentials.phone,
                        &credentials.password,
                        credentials.fcm_token.as_deref(),
                    )
                    .await
                {
                    Ok(response) => {
                        let logged_in = response.into_user();
                        session.save(&logged_in);
                        user.set(Some(logged_in));
                    }
                    Err(e) => {
                        Logger::error_with_component(COMPONENT, &format!("Login failed: {}", e));
                        error.set(Some(e));
                    }
                }

                busy.set(false);
            });
        })
    };

    let register = {
        let api_client = api_client.clone();
        let pending_phone = pending_phone.clone();
        let busy = busy.clone();
        let error = error.clone();

        use_callback((), move |request: RegisterRequest, _| {
            let api_client = api_client.clone();
            let pending_phone = pending_phone.clone();
            let busy = busy.clone();
            let error = error.clone();

            spawn_local(async move {
                busy.set(true);
                error.set(None);

                match api_client.register(&request).await {
                    // The register endpoint can reject inside a 2xx body
                    Ok(response) => match response.error {
                        Some(message) => error.set(Some(message)),
                        None => pending_phone.set(Some(response.phone)),
                    },
                    Err(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Registration failed: {}", e),
                        );
                        error.set(Some(e));
                    }
                }

                busy.set(false);
            });
        })
    };

    let verify_otp = {
        let api_client = api_client.clone();
        let pending_phone = pending_phone.clone();
        let otp_verified = otp_verified.clone();
        let busy = busy.clone();
        let error = error.clone();

        use_callback((), move |verification: OtpVerification, _| {
            let api_client = api_client.clone();
            let pending_phone = pending_phone.clone();
            let otp_verified = otp_verified.clone();
            let busy = busy.clone();
            let error = error.clone();

            spawn_local(async move {
                busy.set(true);
                error.set(None);

                match api_client
                    .verify_otp(&verification.phone, &verification.code)
                    .await
                {
                    Ok(_) => {
                        otp_verified.set(true);
                        pending_phone.set(None);
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("OTP verification failed: {}", e),
                        );
                        error.set(Some(e));
                    }
                }

                busy.set(false);
            });
        })
    };

    let logout = {
        let session = session.clone();
        let user = user.clone();
        let otp_verified = otp_verified.clone();

        use_callback((), move |_: (), _| {
            session.logout();
            user.set(None);
            otp_verified.set(false);
        })
    };

    let state = AuthState {
        user: (*user).clone(),
        pending_phone: (*pending_phone).clone(),
        otp_verified: *otp_verified,
        busy: *busy,
        error: (*error).clone(),
    };

    let actions = UseAuthActions {
        login,
        register,
        verify_otp,
        logout,
    };

    UseAuthResult { state, actions }
}
