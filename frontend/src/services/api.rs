use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    BloodRequest, CreateBloodRequestRequest, DonationRecord, Hospital, LeaderboardEntry,
    LoginResponse, MessageResponse, RegisterRequest, RegisterResponse, RequestDonor,
    UpdateProfileRequest, UserProfile, ALL_CITIES,
};

/// Production API origin; all endpoint paths are relative to it.
const API_BASE_URL: &str = "https://api.hemo.com.tr/api";

/// Fixed message for any failure where the request never completed:
/// network unreachable, request build failure, or an unreadable body.
const CONNECTION_ERROR: &str = "Bağlantı hatası. Lütfen tekrar deneyin.";

/// API client for the Hemo backend.
///
/// One method per remote operation. Every method resolves to
/// `Result<T, String>`: either the parsed response body or a display-ready
/// error message. Nothing here panics or escapes as an exception, no call is
/// retried, and no state is kept beyond the base URL.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client against the production backend
    pub fn new() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    // --- Authentication ---

    pub async fn login(
        &self,
        phone: &str,
        password: &str,
        fcm_token: Option<&str>,
    ) -> Result<LoginResponse, String> {
        let body = LoginRequest {
            phone: phone.to_string(),
            password: password.to_string(),
            fcm_token: fcm_token.map(|token| token.to_string()),
        };
        self.post("/login/", &body).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, String> {
        self.post("/register/", request).await
    }

    pub async fn verify_otp(&self, phone: &str, code: &str) -> Result<MessageResponse, String> {
        let body = VerifyOtpRequest {
            phone: phone.to_string(),
            code: code.to_string(),
        };
        self.post("/verify-otp/", &body).await
    }

    pub async fn change_password(
        &self,
        phone: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<MessageResponse, String> {
        let body = ChangePasswordRequest {
            phone: phone.to_string(),
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        };
        self.post("/change-password/", &body).await
    }

    // --- Blood requests ---

    /// List active blood requests, optionally filtered by city.
    ///
    /// The city parameter is left off the query string entirely for the
    /// all-cities sentinel; the backend treats presence, not emptiness, as
    /// the filter signal. `viewer_phone` lets the backend hide the viewer's
    /// own and blocked listings.
    pub async fn blood_requests(
        &self,
        city: Option<&str>,
        viewer_phone: Option<&str>,
    ) -> Result<Vec<BloodRequest>, String> {
        let path = format!("/blood-requests/{}", blood_requests_query(city, viewer_phone));
        self.get(&path).await
    }

    pub async fn blood_request(&self, id: u32) -> Result<BloodRequest, String> {
        self.get(&format!("/blood-requests/{}/", id)).await
    }

    pub async fn create_blood_request(
        &self,
        request: &CreateBloodRequestRequest,
    ) -> Result<MessageResponse, String> {
        self.post("/blood-requests/", request).await
    }

    pub async fn my_requests(&self, phone: &str) -> Result<Vec<BloodRequest>, String> {
        self.get(&format!("/my-requests/?phone={}", phone)).await
    }

    pub async fn delete_request(&self, id: u32) -> Result<MessageResponse, String> {
        let url = format!("{}/delete-request/{}/", self.base_url, id);
        let response = match Request::delete(&url).send().await {
            Ok(response) => response,
            Err(_) => return Err(CONNECTION_ERROR.to_string()),
        };
        Self::read_response(response).await
    }

    /// Pending donors on one of the viewer's own requests
    pub async fn request_donors(&self, request_id: u32) -> Result<Vec<RequestDonor>, String> {
        self.get(&format!("/request-donors/{}/", request_id)).await
    }

    // --- Donations ---

    /// Offer to donate for a request
    pub async fn donate(&self, phone: &str, request_id: u32) -> Result<MessageResponse, String> {
        let body = DonateRequest {
            phone: phone.to_string(),
            request_id,
        };
        self.post("/donate/", &body).await
    }

    /// Approve a donor's offer; the backend awards points on approval
    pub async fn approve_donation(&self, donation_id: u32) -> Result<MessageResponse, String> {
        let body = ApproveDonationRequest { donation_id };
        self.post("/approve-donation/", &body).await
    }

    pub async fn my_donations(&self, phone: &str) -> Result<Vec<DonationRecord>, String> {
        self.get(&format!("/my-donations/?phone={}", phone)).await
    }

    // --- Users ---

    pub async fn user_profile(&self, phone: &str) -> Result<UserProfile, String> {
        self.get(&format!("/user-profile/?phone={}", phone)).await
    }

    pub async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<MessageResponse, String> {
        let url = format!("{}/update-profile/", self.base_url);
        Self::send_with_body(Request::put(&url), request).await
    }

    pub async fn delete_account(&self, phone: &str) -> Result<MessageResponse, String> {
        let body = DeleteAccountRequest {
            phone: phone.to_string(),
        };
        let url = format!("{}/delete-account/", self.base_url);
        Self::send_with_body(Request::delete(&url), &body).await
    }

    pub async fn block_user(
        &self,
        blocker_phone: &str,
        blocked_user_id: u32,
    ) -> Result<MessageResponse, String> {
        let body = BlockUserRequest {
            blocker_phone: blocker_phone.to_string(),
            blocked_user_id,
        };
        self.post("/block-user/", &body).await
    }

    pub async fn report_content(
        &self,
        reporter_phone: &str,
        request_id: u32,
        reason: &str,
    ) -> Result<MessageResponse, String> {
        let body = ReportContentRequest {
            reporter_phone: reporter_phone.to_string(),
            blood_request_id: request_id,
            reason: reason.to_string(),
        };
        self.post("/report-content/", &body).await
    }

    // --- Locations ---

    pub async fn cities(&self) -> Result<Vec<String>, String> {
        self.get("/cities/").await
    }

    pub async fn districts(&self, city: &str) -> Result<Vec<String>, String> {
        self.get(&format!("/districts/?city={}", city)).await
    }

    pub async fn hospitals(&self, city: &str, district: &str) -> Result<Vec<Hospital>, String> {
        self.get(&format!("/hospitals/?city={}&district={}", city, district))
            .await
    }

    // --- Leaderboard ---

    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, String> {
        self.get("/leaderboard/").await
    }

    // --- Legal documents ---

    pub async fn legal_document(&self, slug: &str) -> Result<String, String> {
        self.get(&format!("/contracts/{}/", slug)).await
    }

    // --- Transport ---

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, String> {
        let url = format!("{}{}", self.base_url, path);
        let response = match Request::get(&url).send().await {
            Ok(response) => response,
            Err(_) => return Err(CONNECTION_ERROR.to_string()),
        };
        Self::read_response(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, String> {
        let url = format!("{}{}", self.base_url, path);
        Self::send_with_body(Request::post(&url), body).await
    }

    async fn send_with_body<B: Serialize, T: DeserializeOwned>(
        builder: RequestBuilder,
        body: &B,
    ) -> Result<T, String> {
        let request = match builder.json(body) {
            Ok(request) => request,
            Err(_) => return Err(CONNECTION_ERROR.to_string()),
        };
        let response = match request.send().await {
            Ok(response) => response,
            Err(_) => return Err(CONNECTION_ERROR.to_string()),
        };
        Self::read_response(response).await
    }

    async fn read_response<T: DeserializeOwned>(response: Response) -> Result<T, String> {
        if !response.ok() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(extract_error_message(status, &body));
        }
        response
            .json::<T>()
            .await
            .map_err(|_| CONNECTION_ERROR.to_string())
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Query string for the blood-request listing. Empty and sentinel city
/// values are treated as "no filter", and a filtered-out parameter does not
/// appear in the query at all.
fn blood_requests_query(city: Option<&str>, viewer_phone: Option<&str>) -> String {
    let mut params = Vec::new();
    if let Some(city) = city {
        if !city.is_empty() && city != ALL_CITIES {
            params.push(format!("city={}", city));
        }
    }
    if let Some(phone) = viewer_phone {
        params.push(format!("viewer_phone={}", phone));
    }
    if params.is_empty() {
        String::new()
    } else {
        format!("?{}", params.join("&"))
    }
}

/// Human-readable message for a non-success response: the backend's own
/// `error` field when the body carries one, otherwise the status code.
fn extract_error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            error: Some(message),
        }) => message,
        _ => format!("Hata: {}", status),
    }
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Serialize)]
struct LoginRequest {
    phone: String,
    password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fcm_token: Option<String>,
}

#[derive(Serialize)]
struct VerifyOtpRequest {
    phone: String,
    code: String,
}

#[derive(Serialize)]
struct ChangePasswordRequest {
    phone: String,
    old_password: String,
    new_password: String,
}

#[derive(Serialize)]
struct DonateRequest {
    phone: String,
    request_id: u32,
}

#[derive(Serialize)]
struct ApproveDonationRequest {
    donation_id: u32,
}

#[derive(Serialize)]
struct DeleteAccountRequest {
    phone: String,
}

#[derive(Serialize)]
struct BlockUserRequest {
    blocker_phone: String,
    blocked_user_id: u32,
}

#[derive(Serialize)]
struct ReportContentRequest {
    reporter_phone: String,
    blood_request_id: u32,
    reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_query_omits_sentinel_city() {
        assert_eq!(blood_requests_query(Some(ALL_CITIES), None), "");
        assert_eq!(blood_requests_query(Some(""), None), "");
        assert_eq!(blood_requests_query(None, None), "");
    }

    #[wasm_bindgen_test]
    fn test_query_includes_concrete_city() {
        assert_eq!(blood_requests_query(Some("Ankara"), None), "?city=Ankara");
    }

    #[wasm_bindgen_test]
    fn test_query_viewer_phone_is_conditional() {
        assert_eq!(
            blood_requests_query(None, Some("05551112233")),
            "?viewer_phone=05551112233"
        );
        assert_eq!(
            blood_requests_query(Some("İzmir"), Some("05551112233")),
            "?city=İzmir&viewer_phone=05551112233"
        );
        // The sentinel suppresses only the city parameter
        assert_eq!(
            blood_requests_query(Some(ALL_CITIES), Some("05551112233")),
            "?viewer_phone=05551112233"
        );
    }

    #[wasm_bindgen_test]
    fn test_error_message_prefers_server_error_field() {
        assert_eq!(
            extract_error_message(400, r#"{"error":"Geçersiz telefon numarası"}"#),
            "Geçersiz telefon numarası"
        );
    }

    #[wasm_bindgen_test]
    fn test_error_message_falls_back_to_status() {
        assert_eq!(extract_error_message(404, ""), "Hata: 404");
        assert_eq!(extract_error_message(500, "<html>oops</html>"), "Hata: 500");
        // A JSON body without an error field is as useless as no body
        assert_eq!(extract_error_message(422, r#"{"detail":"x"}"#), "Hata: 422");
    }

    #[wasm_bindgen_test]
    fn test_base_url_override() {
        let client = ApiClient::with_base_url("http://localhost:8000/api".to_string());
        assert_eq!(client.base_url, "http://localhost:8000/api");
        assert_eq!(ApiClient::new().base_url, "https://api.hemo.com.tr/api");
    }
}
