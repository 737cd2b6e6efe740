use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    HealthcareWorker,
    Provider,
}

/// The signed-in account, as returned by the current-user endpoint.
///
/// Healthcare workers carry the trust/profession fields, providers the
/// business fields; the other side is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub user_type: UserType,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub nhs_trust: Option<String>,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub business_address: Option<String>,
}
