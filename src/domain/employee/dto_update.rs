/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateEmployeeDto {
    pub name: Option<String>,
    pub address: Option<String>,
    pub cell_number: Option<String>,
    /// Applied for HR callers only.
    pub role_id: Option<i32>,
    /// Applied for HR callers only.
    pub is_active: Option<bool>,
}
