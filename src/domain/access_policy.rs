//! Role-based access rules expressed as data.
//!
//! An [`AccessPolicy`] maps each [`Operation`] to the set of roles allowed to
//! perform it. Operations without a rule are open to any caller, so adding a
//! protected route only means adding a rule.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

/// Logical operations exposed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Shorten,
    Resolve,
    Details,
    Update,
    Delete,
    CheckAvailability,
    Health,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::Shorten,
        Operation::Resolve,
        Operation::Details,
        Operation::Update,
        Operation::Delete,
        Operation::CheckAvailability,
        Operation::Health,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Shorten => "shorten",
            Operation::Resolve => "resolve",
            Operation::Details => "details",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::CheckAvailability => "availability",
            Operation::Health => "health",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PolicyParseError::UnknownOperation(s.trim().to_string()))
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum PolicyParseError {
    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),

    #[error("Malformed rule '{0}', expected '<operation>=<role>[,<role>...]'")]
    MalformedRule(String),

    #[error("Rule for '{0}' lists no roles")]
    EmptyRoleSet(String),
}

/// Outcome of checking a role against the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The operation has no rule; no token is needed.
    Open,
    Allowed,
    Denied { allowed: Vec<String> },
}

/// Mapping from operation to the roles allowed to perform it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AccessPolicy {
    rules: HashMap<Operation, BTreeSet<String>>,
}

impl AccessPolicy {
    /// Creates an empty policy (every operation open).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the rule for `operation`.
    pub fn with_rule<I, S>(mut self, operation: Operation, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules
            .insert(operation, roles.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the allowed role set, or `None` if the operation is open.
    pub fn required_roles(&self, operation: Operation) -> Option<&BTreeSet<String>> {
        self.rules.get(&operation)
    }

    pub fn requires_authentication(&self, operation: Operation) -> bool {
        self.required_roles(operation).is_some()
    }

    /// Checks `role` against the rule for `operation`.
    pub fn decide(&self, operation: Operation, role: &str) -> Decision {
        match self.required_roles(operation) {
            None => Decision::Open,
            Some(roles) if roles.contains(role) => Decision::Allowed,
            Some(roles) => Decision::Denied {
                allowed: roles.iter().cloned().collect(),
            },
        }
    }

    /// Parses rules of the form `delete=admin;update=admin,manager`.
    ///
    /// Blank input yields an empty policy.
    pub fn parse(input: &str) -> Result<Self, PolicyParseError> {
        let mut policy = Self::new();

        for rule in input.split(';').map(str::trim).filter(|r| !r.is_empty()) {
            let (operation, roles) = rule
                .split_once('=')
                .ok_or_else(|| PolicyParseError::MalformedRule(rule.to_string()))?;

            let operation: Operation = operation.parse()?;
            let roles: BTreeSet<String> = roles
                .split(',')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string)
                .collect();

            if roles.is_empty() {
                return Err(PolicyParseError::EmptyRoleSet(operation.to_string()));
            }

            policy.rules.insert(operation, roles);
        }

        Ok(policy)
    }
}

/// `delete` requires `admin`; `update` requires `admin` or `manager`.
pub const DEFAULT_ACCESS_POLICY: &str = "delete=admin;update=admin,manager";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = AccessPolicy::parse(DEFAULT_ACCESS_POLICY).unwrap();

        assert_eq!(policy.decide(Operation::Delete, "admin"), Decision::Allowed);
        assert_eq!(
            policy.decide(Operation::Delete, "manager"),
            Decision::Denied {
                allowed: vec!["admin".to_string()]
            }
        );
        assert_eq!(policy.decide(Operation::Update, "manager"), Decision::Allowed);
        assert_eq!(policy.decide(Operation::Update, "admin"), Decision::Allowed);
        assert!(matches!(
            policy.decide(Operation::Update, "user"),
            Decision::Denied { .. }
        ));
    }

    #[test]
    fn test_operations_without_rule_are_open() {
        let policy = AccessPolicy::parse(DEFAULT_ACCESS_POLICY).unwrap();

        for op in [
            Operation::Shorten,
            Operation::Resolve,
            Operation::Details,
            Operation::CheckAvailability,
            Operation::Health,
        ] {
            assert_eq!(policy.decide(op, "anyone"), Decision::Open);
            assert!(!policy.requires_authentication(op));
            assert!(policy.required_roles(op).is_none());
        }
    }

    #[test]
    fn test_required_roles_are_sorted() {
        let policy = AccessPolicy::parse(DEFAULT_ACCESS_POLICY).unwrap();

        let roles: Vec<&str> = policy
            .required_roles(Operation::Update)
            .unwrap()
            .iter()
            .map(String::as_str)
            .collect();

        assert_eq!(roles, ["admin", "manager"]);
    }

    #[test]
    fn test_denied_lists_allowed_roles_sorted() {
        let policy = AccessPolicy::new().with_rule(Operation::Update, ["manager", "admin"]);

        assert_eq!(
            policy.decide(Operation::Update, "user"),
            Decision::Denied {
                allowed: vec!["admin".to_string(), "manager".to_string()]
            }
        );
    }

    #[test]
    fn test_parse_tolerates_whitespace_and_case() {
        let policy = AccessPolicy::parse(" DELETE = admin ; shorten=user, admin ;").unwrap();

        assert!(policy.requires_authentication(Operation::Delete));
        assert!(policy.requires_authentication(Operation::Shorten));
        assert_eq!(policy.decide(Operation::Shorten, "user"), Decision::Allowed);
    }

    #[test]
    fn test_parse_empty_is_open() {
        let policy = AccessPolicy::parse("").unwrap();
        assert_eq!(policy, AccessPolicy::new());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            AccessPolicy::parse("purge=admin"),
            Err(PolicyParseError::UnknownOperation("purge".to_string()))
        );
        assert_eq!(
            AccessPolicy::parse("delete"),
            Err(PolicyParseError::MalformedRule("delete".to_string()))
        );
        assert_eq!(
            AccessPolicy::parse("delete= , "),
            Err(PolicyParseError::EmptyRoleSet("delete".to_string()))
        );
    }
}
