use serde::{Deserialize, Serialize};

/// An NHS trust / hospital group shown in the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hospital {
    pub id: String,
    pub name: String,
    pub trust: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub hospitals: u32,
    #[serde(default)]
    pub services: u32,
}
