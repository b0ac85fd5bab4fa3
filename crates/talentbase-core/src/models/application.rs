//! Job applications ("candidaturas").

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::utils::{contains_ignore_case, eq_ignore_case};

use super::{Candidate, Job};

/// Status a freshly submitted application starts in.
pub const STATUS_PENDING: &str = "Pendente";

/// An application as seen by the candidate, with the job embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    #[serde(rename = "id_candidatura")]
    pub id: i64,
    #[serde(rename = "id_vaga_de_emprego")]
    pub job_id: i64,
    #[serde(rename = "id_candidato", default)]
    pub candidate_id: Option<i64>,
    pub status: String,
    #[serde(rename = "data", default)]
    pub applied_at: String,
    #[serde(rename = "data_atualizacao", default)]
    pub updated_at: Option<String>,
    #[serde(rename = "vaga", default)]
    pub job: Option<Job>,
    #[serde(rename = "candidato", default)]
    pub candidate: Option<Candidate>,
}

impl Application {
    pub fn job_title(&self) -> &str {
        self.job.as_ref().map(|j| j.title.as_str()).unwrap_or("")
    }

    pub fn candidate_name(&self) -> &str {
        self.candidate.as_ref().map(|c| c.name.as_str()).unwrap_or("")
    }
}

/// Body for `POST /candidaturas`.
#[derive(Debug, Clone, Serialize)]
pub struct NewApplication {
    pub id_candidato: i64,
    pub id_vaga_de_emprego: i64,
    pub status: String,
    pub data: String,
}

/// Body for `PUT /candidaturas/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusUpdate {
    pub status: String,
    pub data_atualizacao: String,
}

/// Client-side application list filter.
#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    /// Matches job title or candidate name
    pub query: Option<String>,
    /// Exact status, case-insensitive
    pub status: Option<String>,
}

impl ApplicationFilter {
    pub fn matches(&self, application: &Application) -> bool {
        if let Some(ref q) = self.query {
            if !(contains_ignore_case(application.job_title(), q)
                || contains_ignore_case(application.candidate_name(), q))
            {
                return false;
            }
        }
        match self.status {
            Some(ref status) => eq_ignore_case(&application.status, status),
            None => true,
        }
    }

    pub fn apply<'a>(&self, applications: &'a [Application]) -> Vec<&'a Application> {
        applications.iter().filter(|a| self.matches(a)).collect()
    }
}

/// Number of applications per status, keyed by lowercased status.
pub fn count_by_status(applications: &[Application]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for application in applications {
        *counts.entry(application.status.to_lowercase()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applications() -> Vec<Application> {
        serde_json::from_str(
            r#"[
                {"id_candidatura": 1, "id_vaga_de_emprego": 10, "status": "Pendente", "data": "2026-03-01",
                 "candidato": {"id_candidato": 3, "nome": "Carla"}},
                {"id_candidatura": 2, "id_vaga_de_emprego": 10, "status": "Em análise", "data": "2026-03-02",
                 "candidato": {"id_candidato": 4, "nome": "Diego"}},
                {"id_candidatura": 3, "id_vaga_de_emprego": 11, "status": "pendente", "data": "2026-03-03",
                 "vaga": {"id_vaga_de_emprego": 11, "nome_vaga_de_emprego": "QA Analyst", "id_empresa": 2}}
            ]"#,
        )
        .expect("Failed to parse applications test JSON")
    }

    #[test]
    fn test_filter_by_status_ignores_case() {
        let apps = applications();
        let filter = ApplicationFilter {
            status: Some("PENDENTE".into()),
            ..Default::default()
        };
        let ids: Vec<i64> = filter.apply(&apps).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_filter_by_query() {
        let apps = applications();
        let filter = ApplicationFilter {
            query: Some("qa".into()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&apps).len(), 1);
        assert_eq!(apps[2].job_title(), "QA Analyst");
        assert_eq!(apps[0].candidate_name(), "Carla");
    }

    #[test]
    fn test_count_by_status() {
        let counts = count_by_status(&applications());
        assert_eq!(counts.get("pendente"), Some(&2));
        assert_eq!(counts.get("em análise"), Some(&1));
        assert_eq!(counts.get("aceito"), None);
    }
}
