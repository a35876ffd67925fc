use serde::{Deserialize, Serialize};

/// A single job listing as returned by the upstream job source.
/// Immutable once fetched; the upstream response is stored wholesale,
/// so every field tolerates absence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub company: Company,
    #[serde(default)]
    pub application_url: String,
    #[serde(default)]
    pub industry_id: Option<i64>,
    #[serde(default)]
    pub company_type_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub website_url: Option<String>,
}

/// Envelope of the upstream `GET /jobs` response.
#[derive(Debug, Deserialize)]
pub struct JobsEnvelope {
    #[serde(default)]
    pub results: Vec<JobListing>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyType {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Industry {
    pub id: i64,
    pub name: String,
}

/// Company-type and industry taxonomies cached as one unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Taxonomy {
    #[serde(default)]
    pub company_types: Vec<CompanyType>,
    #[serde(default)]
    pub industries: Vec<Industry>,
}

/// Public-facing reduction of a job listing returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSummary {
    pub title: String,
    pub company_name: String,
    pub company_website: Option<String>,
    pub location: String,
    pub description: String,
    pub apply_url: String,
}

impl From<&JobListing> for JobSummary {
    fn from(job: &JobListing) -> Self {
        JobSummary {
            title: job.title.clone(),
            company_name: job.company.name.clone(),
            company_website: job.company.website_url.clone(),
            location: job.location.clone(),
            description: job.description.clone(),
            apply_url: job.application_url.clone(),
        }
    }
}
