use chrono::{DateTime, Utc};

/// Employee record joined with its role name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub address: Option<String>,
    pub cell_number: Option<String>,
    pub role_id: i32,
    pub role_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to insert a new employee row
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub email: String,
    pub name: String,
    pub address: Option<String>,
    pub cell_number: Option<String>,
    pub role_id: i32,
    pub is_active: bool,
}
