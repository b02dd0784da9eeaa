use serde::{Deserialize, Serialize};

pub const ACTIVITIES_ROUTE: &str = "/activities";
pub const ACTIVITIES_SEGMENT: &str = "activities";
pub const SIGNUP_SEGMENT: &str = "signup";
pub const EMAIL_QUERY_KEY: &str = "email";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}
