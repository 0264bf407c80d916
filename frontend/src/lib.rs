//! Client-side core of the Hemo web front-end: the API client for the remote
//! backend, the cookie-backed session store, and the Yew hooks pages use to
//! orchestrate the two. Views live downstream of this crate.

pub mod hooks;
pub mod services;

pub use services::api::ApiClient;
pub use services::session::SessionStore;
