use serde::{Deserialize, Serialize};

/// Locally persisted record of the authenticated user.
///
/// Serialized with camelCase keys because the stored cookie is shared with the
/// deployed web client, which already writes it in that shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub points: u32,
    pub badge: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A published need for blood, owned by the user who created it.
///
/// The patient's national id is write-only: it is part of the create payload
/// but the server never returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodRequest {
    pub id: u32,
    pub user_id: u32,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub patient_first_name: String,
    pub patient_last_name: String,
    pub city: String,
    pub district: String,
    pub hospital: String,
    pub blood_type: String,
    pub blood_product: String,
    pub amount: u32,
    pub contact_phone: String,
    pub transport_support: bool,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    pub is_active: bool,
}

impl BloodRequest {
    /// Calendar date the request was created, if the timestamp parses.
    pub fn created_date(&self) -> Option<chrono::NaiveDate> {
        chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.date_naive())
    }

    pub fn product_label(&self) -> &'static str {
        product_display_name(&self.blood_product)
    }
}

/// A pending donor on one of the viewer's own requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDonor {
    pub donation_id: u32,
    pub donor_name: String,
}

/// One row of the viewer's donation history, preformatted by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationRecord {
    pub hospital: String,
    pub blood_type: String,
    pub date: String,
    pub status: String,
    pub status_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub points: u32,
    pub badge: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: u32,
    pub city: String,
    pub district: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub first_name: String,
    pub last_name: String,
    pub points: u32,
    pub badge: String,
}

/// Generic acknowledgement returned by mutation endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Successful login: acknowledgement plus the identity and stats needed to
/// seed the local session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub points: u32,
    pub badge: String,
}

impl LoginResponse {
    /// Session record derived from a successful login.
    pub fn into_user(self) -> User {
        User {
            phone: self.phone,
            first_name: self.first_name,
            last_name: self.last_name,
            points: self.points,
            badge: self.badge,
        }
    }
}

/// Registration acknowledgement; the phone echoes back for the OTP step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub city: String,
    pub blood_type: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBloodRequestRequest {
    pub user_phone: String,
    pub patient_first_name: String,
    pub patient_last_name: String,
    /// Patient national id; validated and kept server-side, never rendered back.
    pub patient_tc: String,
    pub city: String,
    pub district: String,
    pub hospital: String,
    pub blood_type: String,
    pub blood_product: String,
    pub amount: u32,
    pub contact_phone: String,
    pub transport_support: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Sentinel city filter meaning "no city filter at all".
pub const ALL_CITIES: &str = "Tüm Türkiye";

/// A selectable option in the request-creation forms: the wire code the
/// backend expects plus its display label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Blood type codes fixed by the backend.
pub const BLOOD_TYPES: [CatalogOption; 8] = [
    CatalogOption { value: "A+", label: "A Rh+" },
    CatalogOption { value: "A-", label: "A Rh-" },
    CatalogOption { value: "B+", label: "B Rh+" },
    CatalogOption { value: "B-", label: "B Rh-" },
    CatalogOption { value: "AB+", label: "AB Rh+" },
    CatalogOption { value: "AB-", label: "AB Rh-" },
    CatalogOption { value: "0+", label: "0 Rh+" },
    CatalogOption { value: "0-", label: "0 Rh-" },
];

/// Blood product codes fixed by the backend.
pub const BLOOD_PRODUCTS: [CatalogOption; 4] = [
    CatalogOption { value: "tam_kan", label: "Tam Kan" },
    CatalogOption { value: "eritrosit", label: "Eritrosit Süspansiyonu" },
    CatalogOption { value: "trombosit", label: "Trombosit (Beyaz Kan)" },
    CatalogOption { value: "plazma", label: "Taze Donmuş Plazma" },
];

/// Display label for a blood product code, falling back to whole blood for
/// codes this client does not know.
pub fn product_display_name(code: &str) -> &'static str {
    BLOOD_PRODUCTS
        .iter()
        .find(|product| product.value == code)
        .map(|product| product.label)
        .unwrap_or("Tam Kan")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_cookie_shape_is_camel_case() {
        let user = User {
            phone: "05551112233".to_string(),
            first_name: "Ada".to_string(),
            last_name: "L".to_string(),
            points: 0,
            badge: "Gönüllü".to_string(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"firstName\":\"Ada\""));
        assert!(json.contains("\"lastName\":\"L\""));
        assert!(json.contains("\"phone\":\"05551112233\""));

        // Round-trips through the cookie format unchanged
        let parsed: User = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, user);
    }

    #[test]
    fn test_user_rejects_snake_case_cookie() {
        // A record written with wire-style keys is not a valid session cookie
        let result = serde_json::from_str::<User>(
            r#"{"phone":"0555","first_name":"Ada","last_name":"L","points":0,"badge":"Gönüllü"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_blood_request_matches_server_payload() {
        let json = r#"{
            "id": 12,
            "user_id": 3,
            "user_name": "ada.l",
            "first_name": "Ada",
            "last_name": "L",
            "patient_first_name": "Mehmet",
            "patient_last_name": "Yılmaz",
            "city": "İstanbul",
            "district": "Kadıköy",
            "hospital": "Marmara Üniversitesi Hastanesi",
            "blood_type": "0-",
            "blood_product": "trombosit",
            "amount": 2,
            "contact_phone": "05551112233",
            "transport_support": true,
            "created_at": "2024-05-01T10:30:00+03:00",
            "is_active": true
        }"#;

        let request: BloodRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.id, 12);
        assert_eq!(request.blood_type, "0-");
        assert_eq!(request.amount, 2);
        assert!(request.transport_support);
        assert_eq!(request.product_label(), "Trombosit (Beyaz Kan)");
    }

    #[test]
    fn test_blood_request_created_date() {
        let json = r#"{
            "id": 1, "user_id": 1, "user_name": "u", "first_name": "A", "last_name": "B",
            "patient_first_name": "P", "patient_last_name": "Q",
            "city": "Ankara", "district": "Çankaya", "hospital": "H",
            "blood_type": "A+", "blood_product": "tam_kan", "amount": 1,
            "contact_phone": "0555", "transport_support": false,
            "created_at": "2024-05-01T10:30:00+03:00", "is_active": true
        }"#;
        let request: BloodRequest = serde_json::from_str(json).unwrap();

        let date = request.created_date().unwrap();
        assert_eq!(date.to_string(), "2024-05-01");

        let garbled = BloodRequest {
            created_at: "yesterday".to_string(),
            ..request
        };
        assert!(garbled.created_date().is_none());
    }

    #[test]
    fn test_login_response_into_user() {
        let response = LoginResponse {
            message: "Giriş başarılı".to_string(),
            phone: "05551112233".to_string(),
            first_name: "Ada".to_string(),
            last_name: "L".to_string(),
            points: 150,
            badge: "Kahraman".to_string(),
        };

        let user = response.into_user();
        assert_eq!(user.phone, "05551112233");
        assert_eq!(user.points, 150);
        assert_eq!(user.badge, "Kahraman");
        assert_eq!(user.full_name(), "Ada L");
    }

    #[test]
    fn test_register_request_wire_field_names() {
        let request = RegisterRequest {
            first_name: "Ada".to_string(),
            last_name: "L".to_string(),
            phone: "05551112233".to_string(),
            email: "ada@example.com".to_string(),
            city: "İzmir".to_string(),
            blood_type: "AB-".to_string(),
            password: "s3cret".to_string(),
        };

        let json = serde_json::to_string(&request).unwrap();
        // The backend contract is snake_case; a renamed field would be rejected
        assert!(json.contains("\"first_name\""));
        assert!(json.contains("\"blood_type\":\"AB-\""));
    }

    #[test]
    fn test_create_blood_request_carries_patient_tc() {
        let request = CreateBloodRequestRequest {
            user_phone: "05551112233".to_string(),
            patient_first_name: "Mehmet".to_string(),
            patient_last_name: "Yılmaz".to_string(),
            patient_tc: "12345678901".to_string(),
            city: "İstanbul".to_string(),
            district: "Kadıköy".to_string(),
            hospital: "Marmara Üniversitesi Hastanesi".to_string(),
            blood_type: "0+".to_string(),
            blood_product: "eritrosit".to_string(),
            amount: 3,
            contact_phone: "05551112233".to_string(),
            transport_support: false,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"patient_tc\":\"12345678901\""));
        assert!(json.contains("\"transport_support\":false"));
    }

    #[test]
    fn test_product_display_name() {
        assert_eq!(product_display_name("trombosit"), "Trombosit (Beyaz Kan)");
        assert_eq!(product_display_name("plazma"), "Taze Donmuş Plazma");
        // Unknown codes fall back to whole blood
        assert_eq!(product_display_name("unknown"), "Tam Kan");
        assert_eq!(product_display_name(""), "Tam Kan");
    }

    #[test]
    fn test_blood_type_catalog() {
        assert_eq!(BLOOD_TYPES.len(), 8);
        let zero_negative = BLOOD_TYPES
            .iter()
            .find(|option| option.value == "0-")
            .unwrap();
        assert_eq!(zero_negative.label, "0 Rh-");
    }

    #[test]
    fn test_register_response_optional_error() {
        let ok: RegisterResponse =
            serde_json::from_str(r#"{"message":"Kod gönderildi","phone":"0555"}"#).unwrap();
        assert!(ok.error.is_none());

        let rejected: RegisterResponse = serde_json::from_str(
            r#"{"message":"","phone":"0555","error":"Bu numara zaten kayıtlı"}"#,
        )
        .unwrap();
        assert_eq!(rejected.error.as_deref(), Some("Bu numara zaten kayıtlı"));
    }
}
