#[derive(Debug, Clone)]
pub struct CreateEmployeeDto {
    pub email: String,
    pub name: String,
    pub address: Option<String>,
    pub cell_number: Option<String>,
    pub role_id: i32,
    pub password: String,
}
