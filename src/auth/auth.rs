use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, Ready};

use crate::api::error::ApiError;
use crate::models::SessionUser;

/// The authenticated caller, placed into request extensions by the
/// bearer middleware and picked up here by handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: SessionUser,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthUser>() {
            Some(auth) => ready(Ok(auth.clone())),
            None => ready(Err(ApiError::Unauthorized("Missing token".into()).into())),
        }
    }
}

impl AuthUser {
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.user.is_admin() {
            Ok(())
        } else {
            Err(ApiError::Forbidden("Admin only".into()))
        }
    }

    pub fn require_approver(&self) -> Result<(), ApiError> {
        if self.user.is_approver() {
            Ok(())
        } else {
            Err(ApiError::Forbidden("Admin/Finance only".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::role::Role;

    fn auth(role: Role) -> AuthUser {
        AuthUser {
            user: SessionUser {
                id: 7,
                email: "x@company.com".into(),
                role,
                name: "X".into(),
            },
        }
    }

    #[test]
    fn approver_gate_admits_admin_and_finance() {
        assert!(auth(Role::Admin).require_approver().is_ok());
        assert!(auth(Role::Finance).require_approver().is_ok());
        assert!(auth(Role::Employee).require_approver().is_err());
    }

    #[test]
    fn admin_gate_admits_admin_only() {
        assert!(auth(Role::Admin).require_admin().is_ok());
        assert!(auth(Role::Finance).require_admin().is_err());
        assert!(auth(Role::Employee).require_admin().is_err());
    }
}
