//! Company ("empresa") records.

use serde::{Deserialize, Serialize};

use crate::utils::contains_ignore_case;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Company {
    #[serde(rename = "id_empresa")]
    pub id: i64,
    #[serde(rename = "nome_empresa")]
    pub name: String,
    #[serde(default)]
    pub estado: String,
    #[serde(default)]
    pub cidade: String,
    #[serde(default)]
    pub cnpj: String,
    #[serde(rename = "email_contato", default)]
    pub contact_email: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
}

impl Company {
    pub fn location(&self) -> String {
        match (self.cidade.is_empty(), self.estado.is_empty()) {
            (false, false) => format!("{}, {}", self.cidade, self.estado),
            (false, true) => self.cidade.clone(),
            (true, false) => self.estado.clone(),
            (true, true) => String::new(),
        }
    }

    pub fn matches_query(&self, query: &str) -> bool {
        query.is_empty()
            || contains_ignore_case(&self.name, query)
            || contains_ignore_case(&self.cidade, query)
            || contains_ignore_case(&self.estado, query)
    }
}

/// A hiring manager ("gestor") record, linking a user to their company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manager {
    #[serde(rename = "id_empresa")]
    pub company_id: i64,
    #[serde(rename = "cargo", default)]
    pub position: Option<String>,
}

/// Company data sent with a manager registration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCompany {
    #[serde(rename = "nome_empresa")]
    pub name: String,
    pub estado: String,
    pub cidade: String,
    pub cnpj: String,
    #[serde(rename = "email_contato")]
    pub contact_email: String,
    #[serde(rename = "descricao")]
    pub description: String,
}

/// Editable company profile fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyUpdate {
    #[serde(rename = "nome_empresa")]
    pub name: String,
    pub estado: String,
    pub cidade: String,
    #[serde(rename = "email_contato")]
    pub contact_email: String,
    #[serde(rename = "descricao")]
    pub description: String,
}

impl From<&Company> for CompanyUpdate {
    fn from(company: &Company) -> Self {
        Self {
            name: company.name.clone(),
            estado: company.estado.clone(),
            cidade: company.cidade.clone(),
            contact_email: company.contact_email.clone(),
            description: company.description.clone(),
        }
    }
}
