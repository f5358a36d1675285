use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CupCreateRequest {
    pub name: String,
    pub season: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Cup {
    pub id: String,
    pub name: String,
    pub season: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct QualifierCreateRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct Qualifier {
    pub id: String,
    pub cup_id: String,
    pub name: String,
    pub created_at: String,
}

/// A cup together with its qualifying rounds.
#[derive(Debug, Serialize)]
pub struct CupDetail {
    #[serde(flatten)]
    pub cup: Cup,
    pub qualifiers: Vec<Qualifier>,
}
