//! Admin authentication endpoints (`/adminAuth`).
//!
//! Login is a two-step email/OTP flow. The bearer token in the verify
//! response belongs on the transport; only the profile query is cached, and
//! every auth mutation invalidates it.

use crate::api::{Address, Verb};
use crate::cache::{Tag, TagKind};
use crate::endpoint::{MutationDef, QueryDef};
use crate::models::{AdminAuthResponse, AdminLoginArgs, AdminProfile, VerifyOtpArgs};

const BASE: &str = "/adminAuth";

pub static GET_ADMIN_PROFILE: QueryDef<(), AdminProfile> = QueryDef {
    id: "getAdminProfile",
    address: |_| Address::new(format!("{}/getAdminProfile", BASE)),
    provides: |_, _| vec![Tag::list(TagKind::Auth)],
};

pub static LOGIN_ADMIN: MutationDef<AdminLoginArgs, AdminAuthResponse> = MutationDef {
    id: "loginAdmin",
    verb: Verb::Post,
    address: |_| Address::new(format!("{}/Admin-login", BASE)),
    body: |args| serde_json::to_value(args).ok(),
    invalidates: |_, _| vec![Tag::list(TagKind::Auth)],
};

pub static VERIFY_ADMIN_OTP: MutationDef<VerifyOtpArgs, AdminAuthResponse> = MutationDef {
    id: "verifyAdminOtp",
    verb: Verb::Post,
    address: |_| Address::new(format!("{}/Admin-verifyOtp", BASE)),
    body: |args| serde_json::to_value(args).ok(),
    invalidates: |_, _| vec![Tag::list(TagKind::Auth)],
};

pub static LOGOUT_ADMIN: MutationDef<(), AdminAuthResponse> = MutationDef {
    id: "logoutAdmin",
    verb: Verb::Post,
    address: |_| Address::new(format!("{}/logout-admin", BASE)),
    body: |_| None,
    invalidates: |_, _| vec![Tag::list(TagKind::Auth)],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_mutations_invalidate_profile() {
        let response = AdminAuthResponse {
            message: None,
            admin: None,
            token: None,
        };
        let args = AdminLoginArgs {
            email: "admin@school.example".to_string(),
            password: "secret".to_string(),
        };
        assert_eq!(
            (LOGIN_ADMIN.invalidates)(&args, &response),
            vec![Tag::list(TagKind::Auth)]
        );
        assert_eq!(
            (LOGOUT_ADMIN.invalidates)(&(), &response),
            vec![Tag::list(TagKind::Auth)]
        );
    }

    #[test]
    fn test_login_body_is_credentials() {
        let args = AdminLoginArgs {
            email: "admin@school.example".to_string(),
            password: "secret".to_string(),
        };
        let body = (LOGIN_ADMIN.body)(&args).unwrap();
        assert_eq!(body["email"], "admin@school.example");
        assert_eq!(body["password"], "secret");
    }
}
