use std::fmt;

use tracing::warn;

use crate::domain::{DomainError, DomainResult, RoleName};

/// Named authorization policies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Caller must hold the HR role.
    HrOnly,
    /// Caller must be HR or the owner of the addressed employee record.
    SameUserOrHr,
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HrOnly => f.write_str("HROnly"),
            Self::SameUserOrHr => f.write_str("SameUserOrHR"),
        }
    }
}

/// Identity claims of the caller.
///
/// Fields are optional because a token may lack a claim or carry a role
/// name this service does not know.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller {
    pub user_id: Option<i32>,
    pub email: Option<String>,
    pub role: Option<RoleName>,
}

impl Caller {
    pub fn new(user_id: i32, email: impl Into<String>, role: RoleName) -> Self {
        Self {
            user_id: Some(user_id),
            email: Some(email.into()),
            role: Some(role),
        }
    }

    pub fn is_hr(&self) -> bool {
        self.role == Some(RoleName::Hr)
    }
}

/// Pure policy decision. `owner` is the id of the addressed employee, `None`
/// when the resource id could not be resolved.
pub fn evaluate(policy: Policy, caller: &Caller, owner: Option<i32>) -> bool {
    match policy {
        Policy::HrOnly => caller.is_hr(),
        Policy::SameUserOrHr => {
            let Some(caller_id) = caller.user_id else {
                return false;
            };
            if caller.is_hr() {
                return true;
            }
            owner == Some(caller_id)
        }
    }
}

/// [`evaluate`] turned into a result; denial is `InsufficientPermissions`.
pub fn authorize(policy: Policy, caller: &Caller, owner: Option<i32>) -> DomainResult<()> {
    if evaluate(policy, caller, owner) {
        return Ok(());
    }

    warn!(
        policy = %policy,
        caller_id = ?caller.user_id,
        role = ?caller.role,
        owner_id = ?owner,
        "Authorization denied"
    );
    Err(DomainError::forbidden())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AuthErrorCode;

    fn hr(id: i32) -> Caller {
        Caller::new(id, "hr@example.com", RoleName::Hr)
    }

    fn employee(id: i32) -> Caller {
        Caller::new(id, "staff@example.com", RoleName::Employee)
    }

    #[test]
    fn hr_only_requires_hr_role() {
        assert!(evaluate(Policy::HrOnly, &hr(1), None));
        assert!(!evaluate(Policy::HrOnly, &employee(1), Some(1)));
        assert!(!evaluate(Policy::HrOnly, &Caller::default(), None));
    }

    #[test]
    fn same_user_or_hr_truth_table() {
        assert!(evaluate(Policy::SameUserOrHr, &employee(5), Some(5)));
        assert!(!evaluate(Policy::SameUserOrHr, &employee(6), Some(5)));
        assert!(evaluate(Policy::SameUserOrHr, &hr(6), Some(5)));
        // HR passes even when the path id is unusable
        assert!(evaluate(Policy::SameUserOrHr, &hr(6), None));
        assert!(!evaluate(Policy::SameUserOrHr, &employee(6), None));
    }

    #[test]
    fn same_user_or_hr_denies_without_caller_id() {
        let caller = Caller {
            user_id: None,
            email: None,
            role: Some(RoleName::Hr),
        };
        assert!(!evaluate(Policy::SameUserOrHr, &caller, Some(5)));
    }

    #[test]
    fn unknown_role_is_not_hr() {
        let caller = Caller {
            user_id: Some(3),
            email: None,
            role: None,
        };
        assert!(!evaluate(Policy::HrOnly, &caller, None));
        assert!(evaluate(Policy::SameUserOrHr, &caller, Some(3)));
    }

    #[test]
    fn authorize_maps_denial_to_insufficient_permissions() {
        let err = authorize(Policy::HrOnly, &employee(2), None).unwrap_err();
        assert!(err.is(AuthErrorCode::InsufficientPermissions));
        assert_eq!(err.code.http_status(), 403);
        assert!(authorize(Policy::HrOnly, &hr(2), None).is_ok());
    }
}
