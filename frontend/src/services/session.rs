use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use shared::User;
use wasm_bindgen::JsCast;

/// Cookie holding the full session record as camelCase JSON
pub const USER_KEY: &str = "hemo_user";
/// Cookie holding only the phone number, for cheap logged-in checks
pub const PHONE_KEY: &str = "hemo_phone";

const SESSION_TTL_DAYS: f64 = 30.0;

/// Key/value persistence behind the session store. Implementations are
/// expected to swallow their own storage failures; a failed write simply
/// leaves the previous value (or absence) in place.
pub trait SessionBackend {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `document.cookie` backend used in the browser. Values are
/// percent-encoded and every write stamps a fresh 30-day expiry.
pub struct CookieBackend;

impl CookieBackend {
    fn document() -> Option<web_sys::HtmlDocument> {
        web_sys::window()?
            .document()?
            .dyn_into::<web_sys::HtmlDocument>()
            .ok()
    }

    fn expiry_attribute() -> String {
        let date = js_sys::Date::new_0();
        date.set_time(date.get_time() + SESSION_TTL_DAYS * 24.0 * 60.0 * 60.0 * 1000.0);
        String::from(date.to_utc_string())
    }

    fn cookie_string(key: &str, value: &str) -> String {
        let encoded = String::from(js_sys::encode_uri_component(value));
        format!(
            "{}={}; expires={}; path=/",
            key,
            encoded,
            Self::expiry_attribute()
        )
    }
}

impl SessionBackend for CookieBackend {
    fn read(&self, key: &str) -> Option<String> {
        let document = Self::document()?;
        let cookies = document.cookie().ok()?;
        for pair in cookies.split(';') {
            let pair = pair.trim_start();
            if let Some(value) = pair
                .strip_prefix(key)
                .and_then(|rest| rest.strip_prefix('='))
            {
                let decoded = js_sys::decode_uri_component(value).ok()?;
                return Some(String::from(decoded));
            }
        }
        None
    }

    fn write(&self, key: &str, value: &str) {
        if let Some(document) = Self::document() {
            let _ = document.set_cookie(&Self::cookie_string(key, value));
        }
    }

    fn remove(&self, key: &str) {
        if let Some(document) = Self::document() {
            let expired = format!("{}=; expires=Thu, 01 Jan 1970 00:00:00 GMT; path=/", key);
            let _ = document.set_cookie(&expired);
        }
    }
}

/// In-memory backend for tests and non-browser hosts.
#[derive(Default)]
pub struct MemoryBackend {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionBackend for MemoryBackend {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Durable client-side identity cache.
///
/// Presence of a session is the sole gate for protected pages. The stored
/// stats are a cache of server truth, refreshed opportunistically and never
/// authoritative for awarding points. The two keys are written one after the
/// other, not atomically, so callers must tolerate finding one without the
/// other.
#[derive(Clone)]
pub struct SessionStore {
    backend: Rc<dyn SessionBackend>,
}

impl SessionStore {
    /// Cookie-backed store, the production configuration
    pub fn new() -> Self {
        Self::with_backend(Rc::new(CookieBackend))
    }

    /// Store over an alternate backend (in-memory for tests)
    pub fn with_backend(backend: Rc<dyn SessionBackend>) -> Self {
        Self { backend }
    }

    /// Persist the user under both keys, resetting the 30-day clock.
    pub fn save(&self, user: &User) {
        if let Ok(json) = serde_json::to_string(user) {
            self.backend.write(USER_KEY, &json);
            self.backend.write(PHONE_KEY, &user.phone);
        }
    }

    /// The stored record; absent or unparsable data reads as logged out.
    pub fn get(&self) -> Option<User> {
        let raw = self.backend.read(USER_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    pub fn phone(&self) -> Option<String> {
        self.backend.read(PHONE_KEY)
    }

    /// Existence check on the phone key alone; no JSON parse involved.
    pub fn is_logged_in(&self) -> bool {
        self.backend.read(PHONE_KEY).is_some()
    }

    /// Remove both keys; a no-op when already logged out.
    pub fn logout(&self) {
        self.backend.remove(USER_KEY);
        self.backend.remove(PHONE_KEY);
    }

    /// Refresh the cached points and badge. Does nothing when no session
    /// exists; a partial update never fabricates a record.
    pub fn update_stats(&self, points: u32, badge: &str) {
        if let Some(mut user) = self.get() {
            user.points = points;
            user.badge = badge.to_string();
            self.save(&user);
        }
    }

    /// Refresh the cached points only.
    pub fn update_points(&self, points: u32) {
        if let Some(mut user) = self.get() {
            user.points = points;
            self.save(&user);
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn memory_store() -> SessionStore {
        SessionStore::with_backend(Rc::new(MemoryBackend::new()))
    }

    fn sample_user() -> User {
        User {
            phone: "05551112233".to_string(),
            first_name: "Ada".to_string(),
            last_name: "L".to_string(),
            points: 0,
            badge: "Gönüllü".to_string(),
        }
    }

    #[wasm_bindgen_test]
    fn test_save_then_get_round_trips() {
        let store = memory_store();
        let user = sample_user();

        store.save(&user);
        assert_eq!(store.get(), Some(user));
    }

    #[wasm_bindgen_test]
    fn test_save_writes_both_keys() {
        let backend = Rc::new(MemoryBackend::new());
        let store = SessionStore::with_backend(backend.clone());

        store.save(&sample_user());
        assert!(backend.read(USER_KEY).is_some());
        assert_eq!(backend.read(PHONE_KEY).as_deref(), Some("05551112233"));
    }

    #[wasm_bindgen_test]
    fn test_logout_clears_everything() {
        let store = memory_store();
        store.save(&sample_user());

        store.logout();
        assert_eq!(store.get(), None);
        assert_eq!(store.phone(), None);
        assert!(!store.is_logged_in());

        // Idempotent on an already-empty store
        store.logout();
        assert!(!store.is_logged_in());
    }

    #[wasm_bindgen_test]
    fn test_update_without_session_is_a_noop() {
        let store = memory_store();

        store.update_points(100);
        store.update_stats(100, "Kahraman");
        assert_eq!(store.get(), None);
        assert!(!store.is_logged_in());
    }

    #[wasm_bindgen_test]
    fn test_corrupt_record_reads_as_logged_out() {
        let backend = Rc::new(MemoryBackend::new());
        let store = SessionStore::with_backend(backend.clone());

        backend.write(USER_KEY, "not json at all {{{");
        assert_eq!(store.get(), None);

        // A record with the wrong shape is equally absent
        backend.write(USER_KEY, r#"{"phone":true}"#);
        assert_eq!(store.get(), None);
    }

    #[wasm_bindgen_test]
    fn test_phone_key_survives_corrupt_record() {
        let backend = Rc::new(MemoryBackend::new());
        let store = SessionStore::with_backend(backend.clone());

        store.save(&sample_user());
        backend.write(USER_KEY, "garbage");

        // The two keys can desynchronize; callers must tolerate it
        assert_eq!(store.get(), None);
        assert!(store.is_logged_in());
        assert_eq!(store.phone().as_deref(), Some("05551112233"));
    }

    #[wasm_bindgen_test]
    fn test_stats_update_scenario() {
        let store = memory_store();
        store.save(&sample_user());
        assert_eq!(store.phone().as_deref(), Some("05551112233"));

        store.update_stats(100, "Kahraman");
        let user = store.get().unwrap();
        assert_eq!(user.points, 100);
        assert_eq!(user.badge, "Kahraman");
        // Identity fields are untouched by a stats refresh
        assert_eq!(user.first_name, "Ada");

        store.update_points(120);
        let user = store.get().unwrap();
        assert_eq!(user.points, 120);
        assert_eq!(user.badge, "Kahraman");
    }

    #[wasm_bindgen_test]
    fn test_cookie_string_format() {
        let cookie = CookieBackend::cookie_string("hemo_user", r#"{"a":1; b}"#);
        assert!(cookie.starts_with("hemo_user="));
        // Separators in the value must be encoded or they would split the cookie
        assert!(!cookie.trim_start_matches("hemo_user=").contains("; b"));
        assert!(cookie.contains("%3B"));
        assert!(cookie.contains("expires="));
        assert!(cookie.ends_with("path=/"));
    }

    #[wasm_bindgen_test]
    fn test_cookie_backend_round_trip() {
        let backend = CookieBackend;

        backend.write("hemo_test", r#"{"tricky":"değer; with=chars"}"#);
        assert_eq!(
            backend.read("hemo_test").as_deref(),
            Some(r#"{"tricky":"değer; with=chars"}"#)
        );

        backend.remove("hemo_test");
        assert_eq!(backend.read("hemo_test"), None);
    }
}
