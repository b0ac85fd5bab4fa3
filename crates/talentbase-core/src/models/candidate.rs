//! Candidate profiles and their experience entries.

use serde::{Deserialize, Serialize};

/// Portuguese month abbreviations used in experience periods.
const MONTHS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// Example shown when a period is rejected.
pub const PERIOD_FORMAT: &str = "Jan 2020 - Dez 2023";

/// A candidate's profile. Also embedded in a manager's application listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "id_candidato")]
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub cidade: String,
    #[serde(default)]
    pub estado: String,
    #[serde(rename = "resumo", default)]
    pub summary: String,
    #[serde(rename = "situacao_empregaticia", default)]
    pub employment_status: String,
}

/// Professional or academic background entry ("experiência").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    #[serde(rename = "id_experiencia")]
    pub id: i64,
    #[serde(flatten)]
    pub details: ExperienceDraft,
}

impl Experience {
    /// Academic entries are the ones naming a course.
    pub fn is_academic(&self) -> bool {
        self.details.is_academic()
    }
}

/// Body for creating or editing an experience.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceDraft {
    #[serde(rename = "nome_instituicao")]
    pub institution: String,
    #[serde(rename = "cargo", default)]
    pub role: String,
    #[serde(rename = "periodo_experiencia")]
    pub period: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(rename = "nome_curso", default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(rename = "grau_obtido", default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
}

impl ExperienceDraft {
    pub fn is_academic(&self) -> bool {
        self.course.as_deref().is_some_and(|c| !c.is_empty())
    }

    pub fn has_valid_period(&self) -> bool {
        is_valid_period(&self.period)
    }
}

/// Checks the `"Mmm YYYY - Mmm YYYY"` period format, e.g. `Jan 2020 - Dez 2023`.
pub fn is_valid_period(period: &str) -> bool {
    match period.split_once(" - ") {
        Some((start, end)) => is_month_year(start) && is_month_year(end),
        None => false,
    }
}

fn is_month_year(s: &str) -> bool {
    match s.split_once(' ') {
        Some((month, year)) => {
            MONTHS.contains(&month) && year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile() {
        let candidate: Candidate = serde_json::from_str(
            r#"{"id_candidato": 7, "nome": "Carla", "email": "carla@x.com", "cidade": "Natal",
                "estado": "RN", "resumo": "QA", "situacao_empregaticia": "Empregado"}"#,
        )
        .unwrap();
        assert_eq!(candidate.id, 7);
        assert_eq!(candidate.employment_status, "Empregado");

        let value = serde_json::to_value(&candidate).unwrap();
        assert_eq!(value["situacao_empregaticia"], "Empregado");
        assert_eq!(value["resumo"], "QA");
    }

    #[test]
    fn test_period_format() {
        assert!(is_valid_period("Jan 2020 - Dez 2023"));
        assert!(is_valid_period("Fev 2019 - Ago 2019"));
        assert!(!is_valid_period("Dec 2020 - Jan 2021"));
        assert!(!is_valid_period("Jan 20 - Dez 2023"));
        assert!(!is_valid_period("Jan 2020 a Dez 2023"));
        assert!(!is_valid_period("Jan 2020 - Dez 2023 "));
    }

    #[test]
    fn test_experience_kind_and_payload() {
        let professional: Experience = serde_json::from_str(
            r#"{"id_experiencia": 3, "nome_instituicao": "Acme", "cargo": "Dev",
                "periodo_experiencia": "Jan 2020 - Dez 2023", "descricao": "", "nome_curso": null}"#,
        )
        .unwrap();
        assert!(!professional.is_academic());

        let draft = ExperienceDraft {
            institution: "UFRN".into(),
            period: "Mar 2015 - Dez 2019".into(),
            course: Some("Computação".into()),
            degree: Some("Bacharel".into()),
            ..Default::default()
        };
        assert!(draft.is_academic());
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["nome_curso"], "Computação");

        let plain = serde_json::to_value(&ExperienceDraft::default()).unwrap();
        assert!(plain.get("grau_obtido").is_none());
    }
}
