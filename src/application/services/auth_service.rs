//! Access control: bearer token authentication and role authorization.

use std::sync::Arc;

use serde_json::json;

use crate::domain::access_policy::{AccessPolicy, Decision, Operation};
use crate::domain::token_authority::{Claims, TokenAuthority};
use crate::error::AppError;

/// Gate for privileged operations.
///
/// Authentication verifies the bearer token through the [`TokenAuthority`];
/// authorization compares the `role` claim with the [`AccessPolicy`] rule
/// for the operation. Holds no state beyond its collaborators.
pub struct AuthService {
    authority: Arc<dyn TokenAuthority>,
    policy: AccessPolicy,
}

impl AuthService {
    /// Creates a new access control service.
    pub fn new(authority: Arc<dyn TokenAuthority>, policy: AccessPolicy) -> Self {
        Self { authority, policy }
    }

    /// Runs both stages for `operation` given the raw `Authorization` header.
    ///
    /// Returns `Ok(None)` for operations without a rule (the header is not
    /// inspected) and `Ok(Some(claims))` once a caller has been admitted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the header is missing, is not of
    /// the form `Bearer <token>`, or the token fails verification.
    ///
    /// Returns [`AppError::Forbidden`] if the role is not allowed.
    pub fn check(
        &self,
        operation: Operation,
        authorization: Option<&str>,
    ) -> Result<Option<Claims>, AppError> {
        if !self.policy.requires_authentication(operation) {
            return Ok(None);
        }

        let header = authorization.ok_or_else(|| {
            AppError::unauthorized(
                "No token provided",
                json!({ "reason": "Authorization header is missing" }),
            )
        })?;

        let token = bearer_token(header).ok_or_else(|| {
            AppError::unauthorized(
                "Invalid token format",
                json!({ "reason": "Expected 'Authorization: Bearer <token>'" }),
            )
        })?;

        let claims = self.authenticate(token)?;
        self.authorize(operation, &claims)?;

        Ok(Some(claims))
    }

    /// Verifies a raw token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on bad signature or expiry.
    pub fn authenticate(&self, token: &str) -> Result<Claims, AppError> {
        self.authority.verify(token)
    }

    /// Checks the role in `claims` against the rule for `operation`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] naming the allowed roles.
    pub fn authorize(&self, operation: Operation, claims: &Claims) -> Result<(), AppError> {
        match self.policy.decide(operation, &claims.role) {
            Decision::Open | Decision::Allowed => Ok(()),
            Decision::Denied { allowed } => {
                tracing::warn!(
                    operation = %operation,
                    role = %claims.role,
                    "Access denied"
                );
                Err(AppError::forbidden(
                    format!("Access denied: requires role {}", allowed.join(" or ")),
                    json!({ "operation": operation.as_str(), "allowed_roles": allowed }),
                ))
            }
        }
    }
}

/// Extracts the token from a `Bearer <token>` header value.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access_policy::DEFAULT_ACCESS_POLICY;
    use crate::domain::token_authority::MockTokenAuthority;

    fn claims(role: &str) -> Claims {
        Claims {
            sub: Some("tester".to_string()),
            role: role.to_string(),
            iat: 0,
            exp: i64::MAX,
        }
    }

    fn service(authority: MockTokenAuthority) -> AuthService {
        AuthService::new(
            Arc::new(authority),
            AccessPolicy::parse(DEFAULT_ACCESS_POLICY).unwrap(),
        )
    }

    fn authority_with_role(role: &'static str) -> MockTokenAuthority {
        let mut authority = MockTokenAuthority::new();
        authority
            .expect_verify()
            .withf(|token| token == "good-token")
            .returning(move |_| Ok(claims(role)));
        authority
    }

    #[test]
    fn test_open_operation_skips_header() {
        let mut authority = MockTokenAuthority::new();
        authority.expect_verify().times(0);

        let result = service(authority).check(Operation::Shorten, None);

        assert_eq!(result.unwrap(), None);
    }

    #[test]
    fn test_missing_header() {
        let err = service(MockTokenAuthority::new())
            .check(Operation::Delete, None)
            .unwrap_err();

        assert!(matches!(err, AppError::Unauthorized { .. }));
        assert_eq!(err.to_string(), "No token provided");
    }

    #[test]
    fn test_malformed_header() {
        let svc = service(MockTokenAuthority::new());

        for header in ["Bearer", "Bearer   ", "good-token", "Basic dXNlcjpwYXNz"] {
            let err = svc.check(Operation::Delete, Some(header)).unwrap_err();
            assert_eq!(err.to_string(), "Invalid token format", "{header}");
        }
    }

    #[test]
    fn test_verification_failure() {
        let mut authority = MockTokenAuthority::new();
        authority.expect_verify().times(1).returning(|_| {
            Err(AppError::unauthorized("Invalid or expired token", json!({})))
        });

        let err = service(authority)
            .check(Operation::Delete, Some("Bearer forged"))
            .unwrap_err();

        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[test]
    fn test_insufficient_role_is_forbidden() {
        let err = service(authority_with_role("user"))
            .check(Operation::Delete, Some("Bearer good-token"))
            .unwrap_err();

        assert!(matches!(err, AppError::Forbidden { .. }));
        assert!(err.to_string().contains("admin"));
    }

    #[test]
    fn test_admin_may_delete() {
        let admitted = service(authority_with_role("admin"))
            .check(Operation::Delete, Some("Bearer good-token"))
            .unwrap();

        assert_eq!(admitted, Some(claims("admin")));
    }

    #[test]
    fn test_manager_may_update_but_not_delete() {
        let svc = service(authority_with_role("manager"));

        assert!(svc.check(Operation::Update, Some("Bearer good-token")).is_ok());
        assert!(matches!(
            svc.check(Operation::Delete, Some("Bearer good-token"))
                .unwrap_err(),
            AppError::Forbidden { .. }
        ));
    }

    #[test]
    fn test_bearer_scheme_is_case_insensitive() {
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
        assert_eq!(bearer_token("BEARER  abc "), Some("abc"));
        assert_eq!(bearer_token("Bearer"), None);
    }
}
