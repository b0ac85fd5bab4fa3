//! Dashboard counters for candidates and hiring managers.

use serde::{Deserialize, Serialize};

/// Counters on the candidate dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateStats {
    #[serde(default)]
    pub applications: u64,
    #[serde(default)]
    pub interviews: u64,
    #[serde(default)]
    pub profile_views: u64,
    #[serde(default)]
    pub saved_jobs: u64,
}

/// Counters on a company's dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyStats {
    #[serde(rename = "vagas_totais", default)]
    pub total_jobs: u64,
    #[serde(rename = "candidatos_totais", default)]
    pub total_candidates: u64,
    #[serde(rename = "candidaturas_pendentes", default)]
    pub pending_applications: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_company_stats() {
        let stats: CompanyStats = serde_json::from_str(
            r#"{"vagas_totais": 5, "candidatos_totais": 18, "candidaturas_pendentes": 4}"#,
        )
        .unwrap();
        assert_eq!(stats.total_jobs, 5);
        assert_eq!(stats.pending_applications, 4);
    }

    #[test]
    fn test_candidate_stats_default_missing_counters() {
        let stats: CandidateStats = serde_json::from_str(r#"{"applications": 3}"#).unwrap();
        assert_eq!(stats.applications, 3);
        assert_eq!(stats.saved_jobs, 0);
    }
}
