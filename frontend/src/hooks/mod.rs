pub mod use_auth;
pub mod use_blood_requests;
pub mod use_leaderboard;
pub mod use_locations;
pub mod use_my_requests;
pub mod use_profile;

pub use use_auth::use_auth;
pub use use_blood_requests::use_blood_requests;
pub use use_leaderboard::use_leaderboard;
pub use use_locations::use_locations;
pub use use_my_requests::use_my_requests;
pub use use_profile::use_profile;
