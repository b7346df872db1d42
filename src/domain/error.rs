//! Domain errors
//!
//! Every failure the service can report belongs to one of three code families.
//! Each code carries a stable numeric value, exactly one HTTP status and a
//! default client-facing message.

use thiserror::Error;

/// Errors concerning employee records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmployeeErrorCode {
    UserNotFound = 1001,
    UserAlreadyExists = 1002,
    UserInactive = 1003,
    InvalidEmployeeData = 1004,
    InvalidEmail = 1005,
}

/// Errors concerning authentication and authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthErrorCode {
    InvalidCredentials = 2001,
    Unauthorized = 2002,
    TokenMissing = 2003,
    TokenExpired = 2004,
    TokenInvalid = 2005,
    AccountLocked = 2006,
    InsufficientPermissions = 2007,
}

/// Errors not tied to a specific resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommonErrorCode {
    InternalServerError = 3001,
    ValidationError = 3002,
    RequiredFieldMissing = 3003,
    DatabaseError = 3004,
    ResourceNotFound = 3005,
    BadRequest = 3006,
}

/// Any error code the API can return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Employee(EmployeeErrorCode),
    Auth(AuthErrorCode),
    Common(CommonErrorCode),
}

impl ErrorCode {
    /// Numeric code sent as `errorCode` in the error envelope.
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Employee(c) => c as i32,
            Self::Auth(c) => c as i32,
            Self::Common(c) => c as i32,
        }
    }

    /// HTTP status code this error is reported with.
    pub fn http_status(self) -> u16 {
        use AuthErrorCode as A;
        use CommonErrorCode as C;
        use EmployeeErrorCode as E;

        match self {
            Self::Employee(E::UserNotFound) => 404,
            Self::Employee(E::UserAlreadyExists) => 409,
            Self::Employee(E::UserInactive) => 403,
            Self::Employee(E::InvalidEmployeeData) => 400,
            Self::Employee(E::InvalidEmail) => 400,

            Self::Auth(A::InvalidCredentials) => 401,
            Self::Auth(A::Unauthorized) => 403,
            Self::Auth(A::TokenMissing) => 401,
            Self::Auth(A::TokenExpired) => 401,
            Self::Auth(A::TokenInvalid) => 401,
            Self::Auth(A::AccountLocked) => 423,
            Self::Auth(A::InsufficientPermissions) => 403,

            Self::Common(C::InternalServerError) => 500,
            Self::Common(C::ValidationError) => 400,
            Self::Common(C::RequiredFieldMissing) => 400,
            Self::Common(C::DatabaseError) => 500,
            Self::Common(C::ResourceNotFound) => 404,
            Self::Common(C::BadRequest) => 400,
        }
    }

    /// Default client-facing message.
    pub fn message(self) -> &'static str {
        use AuthErrorCode as A;
        use CommonErrorCode as C;
        use EmployeeErrorCode as E;

        match self {
            Self::Employee(E::UserNotFound) => "The requested employee was not found.",
            Self::Employee(E::UserAlreadyExists) => "An employee with this email already exists.",
            Self::Employee(E::UserInactive) => "This employee account is inactive.",
            Self::Employee(E::InvalidEmployeeData) => "The employee data provided is invalid.",
            Self::Employee(E::InvalidEmail) => "The email format is invalid.",

            Self::Auth(A::InvalidCredentials) => "Invalid email or password.",
            Self::Auth(A::Unauthorized) => "You are not authorized to perform this action.",
            Self::Auth(A::TokenMissing) => "Authentication token is missing.",
            Self::Auth(A::TokenExpired) => "Your session has expired. Please login again.",
            Self::Auth(A::TokenInvalid) => "Invalid authentication token.",
            Self::Auth(A::AccountLocked) => {
                "Your account has been locked due to too many failed login attempts."
            }
            Self::Auth(A::InsufficientPermissions) => {
                "You do not have permission to access this resource."
            }

            Self::Common(C::InternalServerError) => {
                "An unexpected error occurred. Please try again later."
            }
            Self::Common(C::ValidationError) => "The request contains validation errors.",
            Self::Common(C::RequiredFieldMissing) => "Required field is missing from the request.",
            Self::Common(C::DatabaseError) => "A database error occurred. Please try again later.",
            Self::Common(C::ResourceNotFound) => "The requested resource was not found.",
            Self::Common(C::BadRequest) => "The request is invalid or malformed.",
        }
    }
}

impl From<EmployeeErrorCode> for ErrorCode {
    fn from(code: EmployeeErrorCode) -> Self {
        Self::Employee(code)
    }
}

impl From<AuthErrorCode> for ErrorCode {
    fn from(code: AuthErrorCode) -> Self {
        Self::Auth(code)
    }
}

impl From<CommonErrorCode> for ErrorCode {
    fn from(code: CommonErrorCode) -> Self {
        Self::Common(code)
    }
}

/// Domain-level error: a code plus optional details for the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render(.code, .details))]
pub struct DomainError {
    pub code: ErrorCode,
    pub details: Option<String>,
}

impl DomainError {
    pub fn new(code: impl Into<ErrorCode>) -> Self {
        Self {
            code: code.into(),
            details: None,
        }
    }

    pub fn with_details(code: impl Into<ErrorCode>, details: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            details: Some(details.into()),
        }
    }

    /// Unexpected failure; the underlying message travels as `details`.
    pub fn internal(details: impl Into<String>) -> Self {
        Self::with_details(CommonErrorCode::InternalServerError, details)
    }

    pub fn forbidden() -> Self {
        Self::new(AuthErrorCode::InsufficientPermissions)
    }

    pub fn not_found() -> Self {
        Self::new(EmployeeErrorCode::UserNotFound)
    }

    pub fn is(&self, code: impl Into<ErrorCode>) -> bool {
        self.code == code.into()
    }
}

impl From<EmployeeErrorCode> for DomainError {
    fn from(code: EmployeeErrorCode) -> Self {
        Self::new(code)
    }
}

impl From<AuthErrorCode> for DomainError {
    fn from(code: AuthErrorCode) -> Self {
        Self::new(code)
    }
}

impl From<CommonErrorCode> for DomainError {
    fn from(code: CommonErrorCode) -> Self {
        Self::new(code)
    }
}

fn render(code: &ErrorCode, details: &Option<String>) -> String {
    match details {
        Some(details) => format!("{} ({})", code.message(), details),
        None => code.message().to_string(),
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_code_has_the_expected_status() {
        let table: [(ErrorCode, u16); 7] = [
            (EmployeeErrorCode::UserNotFound.into(), 404),
            (EmployeeErrorCode::UserAlreadyExists.into(), 409),
            (AuthErrorCode::InsufficientPermissions.into(), 403),
            (AuthErrorCode::InvalidCredentials.into(), 401),
            (AuthErrorCode::AccountLocked.into(), 423),
            (CommonErrorCode::ValidationError.into(), 400),
            (CommonErrorCode::InternalServerError.into(), 500),
        ];

        for (code, status) in table {
            assert_eq!(code.http_status(), status, "{code:?}");
        }
    }

    #[test]
    fn numeric_codes_follow_their_family() {
        assert_eq!(ErrorCode::from(EmployeeErrorCode::InvalidEmail).as_i32(), 1005);
        assert_eq!(ErrorCode::from(AuthErrorCode::TokenExpired).as_i32(), 2004);
        assert_eq!(ErrorCode::from(CommonErrorCode::BadRequest).as_i32(), 3006);
    }

    #[test]
    fn display_includes_details() {
        let err = DomainError::internal("connection reset");
        assert_eq!(
            err.to_string(),
            "An unexpected error occurred. Please try again later. (connection reset)"
        );
        assert!(err.is(CommonErrorCode::InternalServerError));
    }

    #[test]
    fn shorthand_constructors_carry_no_details() {
        let denied = DomainError::forbidden();
        assert!(denied.is(AuthErrorCode::InsufficientPermissions));
        assert_eq!(denied.details, None);

        let missing = DomainError::not_found();
        assert!(missing.is(EmployeeErrorCode::UserNotFound));
        assert_eq!(missing.code.http_status(), 404);
    }
}
