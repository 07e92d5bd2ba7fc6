use serde::{Deserialize, Serialize};

/// The signed-in administrator's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct AdminProfile {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
}

/// Response of the login/verify/logout mutations. The bearer token, when
/// present, belongs on the transport; it is not cached.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminAuthResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub admin: Option<AdminProfile>,
    #[serde(default)]
    pub token: Option<String>,
}

/// Body of the admin login mutation; triggers an OTP challenge.
#[derive(Debug, Clone, Serialize)]
pub struct AdminLoginArgs {
    pub email: String,
    pub password: String,
}

/// Body of the OTP verification mutation.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyOtpArgs {
    pub email: String,
    pub otp: String,
}
