use serde::{Deserialize, Serialize};

use crate::utils::{contains_ignore_case, eq_ignore_case};

use super::Company;

/// A job posting ("vaga de emprego").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "id_vaga_de_emprego")]
    pub id: i64,
    #[serde(rename = "nome_vaga_de_emprego")]
    pub title: String,
    #[serde(rename = "id_empresa")]
    pub company_id: i64,
    #[serde(default)]
    pub cidade: String,
    #[serde(default)]
    pub estado: String,
    #[serde(rename = "modalidade", default)]
    pub modality: String,
    #[serde(rename = "cargo", default)]
    pub position: String,
    // Decimal columns arrive as strings, older rows as numbers
    #[serde(rename = "salario", default, deserialize_with = "deserialize_number_or_string")]
    pub salary: Option<f64>,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(rename = "nivel", default)]
    pub level: String,
    #[serde(rename = "tipo_contrato", default)]
    pub contract_type: String,
    #[serde(rename = "data", default)]
    pub posted_at: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(rename = "empresa", default)]
    pub company: Option<Company>,
}

fn default_active() -> bool {
    true
}

impl Job {
    pub fn company_name(&self) -> &str {
        self.company.as_ref().map(|c| c.name.as_str()).unwrap_or("")
    }

    pub fn salary_display(&self) -> String {
        match self.salary {
            Some(s) => format!("R$ {:.2}", s),
            None => "Not informed".to_string(),
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_active {
            "Active"
        } else {
            "Inactive"
        }
    }
}

/// Seniority levels the gateway accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Junior,
    Pleno,
    Senior,
    Executivo,
}

/// Hiring regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modality {
    #[serde(rename = "CLT")]
    Clt,
    #[serde(rename = "Estagio")]
    Internship,
}

/// Workplace arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractType {
    Presencial,
    #[serde(rename = "Híbrido")]
    Hibrido,
    Remoto,
}

impl std::str::FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "junior" | "júnior" => Ok(Level::Junior),
            "pleno" => Ok(Level::Pleno),
            "senior" | "sênior" => Ok(Level::Senior),
            "executivo" => Ok(Level::Executivo),
            _ => Err(format!("unknown level '{}' (junior, pleno, senior, executivo)", s)),
        }
    }
}

impl std::str::FromStr for Modality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clt" => Ok(Modality::Clt),
            "estagio" | "estágio" => Ok(Modality::Internship),
            _ => Err(format!("unknown modality '{}' (clt, estagio)", s)),
        }
    }
}

impl std::str::FromStr for ContractType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "presencial" => Ok(ContractType::Presencial),
            "hibrido" | "híbrido" => Ok(ContractType::Hibrido),
            "remoto" => Ok(ContractType::Remoto),
            _ => Err(format!("unknown contract type '{}' (presencial, hibrido, remoto)", s)),
        }
    }
}

/// Payload for creating or editing a job posting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDraft {
    #[serde(rename = "nome_vaga_de_emprego")]
    pub title: String,
    #[serde(rename = "id_empresa")]
    pub company_id: i64,
    #[serde(rename = "data")]
    pub posted_at: String,
    pub estado: String,
    pub cidade: String,
    #[serde(rename = "salario")]
    pub salary: f64,
    #[serde(rename = "cargo")]
    pub position: String,
    #[serde(rename = "nivel")]
    pub level: Level,
    #[serde(rename = "tipo_contrato")]
    pub contract_type: ContractType,
    #[serde(rename = "modalidade")]
    pub modality: Modality,
    #[serde(rename = "descricao")]
    pub description: String,
}

/// Client-side job list filter, as on the public job board.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    /// Matches title, company name or description
    pub query: Option<String>,
    /// Substring of the state
    pub state: Option<String>,
    /// Exact modality, case-insensitive
    pub modality: Option<String>,
    pub active_only: bool,
}

impl JobFilter {
    pub fn matches(&self, job: &Job) -> bool {
        if let Some(ref q) = self.query {
            if !(contains_ignore_case(&job.title, q)
                || contains_ignore_case(job.company_name(), q)
                || contains_ignore_case(&job.description, q))
            {
                return false;
            }
        }
        if let Some(ref state) = self.state {
            if !contains_ignore_case(&job.estado, state) {
                return false;
            }
        }
        if let Some(ref modality) = self.modality {
            if !eq_ignore_case(&job.modality, modality) {
                return false;
            }
        }
        !self.active_only || job.is_active
    }

    pub fn apply<'a>(&self, jobs: &'a [Job]) -> Vec<&'a Job> {
        jobs.iter().filter(|j| self.matches(j)).collect()
    }
}

// Helper to deserialize a number or numeric string as Option<f64>
fn deserialize_number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de;

    struct NumberOrStringVisitor;

    impl<'de> de::Visitor<'de> for NumberOrStringVisitor {
        type Value = Option<f64>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a number or numeric string")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            let v = v.trim();
            if v.is_empty() {
                return Ok(None);
            }
            v.parse::<f64>()
                .map(Some)
                .map_err(|_| E::custom(format!("invalid salary: {}", v)))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v as f64))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v as f64))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(NumberOrStringVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(json: &str) -> Job {
        serde_json::from_str(json).expect("Failed to parse job test JSON")
    }

    fn sample_jobs() -> Vec<Job> {
        vec![
            job(r#"{"id_vaga_de_emprego": 1, "nome_vaga_de_emprego": "Backend Developer", "id_empresa": 4,
                "estado": "SP", "cidade": "Campinas", "modalidade": "CLT", "salario": "7500.00",
                "descricao": "Rust services", "is_active": true,
                "empresa": {"id_empresa": 4, "nome_empresa": "Acme"}}"#),
            job(r#"{"id_vaga_de_emprego": 2, "nome_vaga_de_emprego": "Estágio Dados", "id_empresa": 5,
                "estado": "RJ", "modalidade": "Estagio", "salario": 1800,
                "descricao": "SQL", "is_active": false,
                "empresa": {"id_empresa": 5, "nome_empresa": "Globex"}}"#),
        ]
    }

    #[test]
    fn test_parse_job_salary_variants() {
        let jobs = sample_jobs();
        assert_eq!(jobs[0].salary, Some(7500.0));
        assert_eq!(jobs[1].salary, Some(1800.0));
        assert_eq!(jobs[0].salary_display(), "R$ 7500.00");
        assert_eq!(jobs[0].company_name(), "Acme");

        let bare = job(r#"{"id_vaga_de_emprego": 3, "nome_vaga_de_emprego": "X", "id_empresa": 1, "salario": null}"#);
        assert_eq!(bare.salary, None);
        assert!(bare.is_active);
        assert_eq!(bare.company_name(), "");
    }

    #[test]
    fn test_filter_query_matches_company_and_description() {
        let jobs = sample_jobs();
        let by_company = JobFilter {
            query: Some("globex".into()),
            ..Default::default()
        };
        assert_eq!(by_company.apply(&jobs).len(), 1);
        assert_eq!(by_company.apply(&jobs)[0].id, 2);

        let by_description = JobFilter {
            query: Some("RUST".into()),
            ..Default::default()
        };
        assert_eq!(by_description.apply(&jobs)[0].id, 1);
    }

    #[test]
    fn test_filter_state_modality_and_active() {
        let jobs = sample_jobs();
        let filter = JobFilter {
            state: Some("rj".into()),
            modality: Some("estagio".into()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&jobs).len(), 1);

        let active = JobFilter {
            active_only: true,
            ..Default::default()
        };
        assert_eq!(active.apply(&jobs).len(), 1);
        assert_eq!(JobFilter::default().apply(&jobs).len(), 2);
    }

    #[test]
    fn test_draft_serializes_gateway_enums() {
        let draft = JobDraft {
            title: "Dev".into(),
            company_id: 4,
            posted_at: "2026-01-01T00:00:00Z".into(),
            estado: "SP".into(),
            cidade: "Campinas".into(),
            salary: 5000.0,
            position: "Engineer".into(),
            level: Level::Pleno,
            contract_type: ContractType::Hibrido,
            modality: Modality::Internship,
            description: "".into(),
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["nivel"], "Pleno");
        assert_eq!(value["tipo_contrato"], "Híbrido");
        assert_eq!(value["modalidade"], "Estagio");
        assert_eq!(value["id_empresa"], 4);
    }

    #[test]
    fn test_parse_enums_from_cli_spelling() {
        assert_eq!("Pleno".parse::<Level>(), Ok(Level::Pleno));
        assert_eq!("sênior".parse::<Level>(), Ok(Level::Senior));
        assert_eq!("estagio".parse::<Modality>(), Ok(Modality::Internship));
        assert_eq!("HIBRIDO".parse::<ContractType>(), Ok(ContractType::Hibrido));
        assert!("freelance".parse::<Modality>().is_err());
    }
}
