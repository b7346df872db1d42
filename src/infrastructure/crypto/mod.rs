pub mod jwt;
pub mod password;

pub use jwt::{JwtConfig, TokenClaims, TokenError, TokenIssuer};
pub use password::{hash_password, verify_password, PasswordError};
