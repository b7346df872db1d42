use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

/// Role row as stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Closed set of role names the authorization model understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleName {
    Hr,
    Employee,
}

impl RoleName {
    pub const ALL: [RoleName; 2] = [RoleName::Hr, RoleName::Employee];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hr => "HR",
            Self::Employee => "Employee",
        }
    }

    /// Primary key of the seeded role row.
    pub fn seed_id(self) -> i32 {
        match self {
            Self::Hr => 1,
            Self::Employee => 2,
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role claim strings are matched exactly, as issued.
impl FromStr for RoleName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HR" => Ok(Self::Hr),
            "Employee" => Ok(Self::Employee),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_names_only() {
        assert_eq!("HR".parse::<RoleName>(), Ok(RoleName::Hr));
        assert_eq!("Employee".parse::<RoleName>(), Ok(RoleName::Employee));
        assert!("hr".parse::<RoleName>().is_err());
        assert!("Admin".parse::<RoleName>().is_err());
    }
}
