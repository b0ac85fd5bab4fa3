//! Identity records and the token envelopes the gateway hands out.

use serde::{Deserialize, Serialize};

/// The three roles the gateway recognizes.
///
/// The gateway spells these in Portuguese (`candidato`, `gestor`); the
/// English names are accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[serde(alias = "candidato")]
    Candidate,
    #[serde(alias = "gestor")]
    Manager,
    #[serde(alias = "administrador")]
    Admin,
}

impl Role {
    /// Role string as the gateway expects it in registration payloads.
    pub fn gateway_name(&self) -> &'static str {
        match self {
            Role::Candidate => "candidato",
            Role::Manager => "gestor",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "candidate" | "candidato" => Some(Role::Candidate),
            "manager" | "gestor" => Some(Role::Manager),
            "admin" | "administrador" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Candidate => write!(f, "Candidate"),
            Role::Manager => write!(f, "Manager"),
            Role::Admin => write!(f, "Admin"),
        }
    }
}

/// The authenticated user's identity, as returned by `/auth/me` and the
/// login/registration endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(alias = "nome", default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(alias = "papel")]
    pub role: Role,
}

/// A user row from the admin listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "papel")]
    pub role: Role,
    #[serde(rename = "ativo", default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Body of a successful login or registration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

/// Body of a successful token refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_accepts_gateway_spelling() {
        let json = r#"{"id": 7, "nome": "Ana", "email": "ana@x.com", "papel": "gestor"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.name, "Ana");
        assert_eq!(user.role, Role::Manager);
    }

    #[test]
    fn test_user_accepts_english_spelling() {
        let json = r#"{"id": 1, "role": "candidate"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.role, Role::Candidate);
        assert!(user.email.is_empty());
    }

    #[test]
    fn test_role_parse_and_gateway_name() {
        assert_eq!(Role::parse("Gestor"), Some(Role::Manager));
        assert_eq!(Role::parse(" candidate "), Some(Role::Candidate));
        assert_eq!(Role::parse("visitor"), None);
        assert_eq!(Role::Manager.gateway_name(), "gestor");
        assert_eq!(Role::Admin.to_string(), "Admin");
    }

    #[test]
    fn test_user_account_defaults_active() {
        let json = r#"{"id": 3, "nome": "Bia", "email": "b@x.com", "papel": "admin"}"#;
        let account: UserAccount = serde_json::from_str(json).unwrap();
        assert!(account.active);
        assert_eq!(account.role, Role::Admin);
    }

    #[test]
    fn test_auth_response() {
        let json = r#"{"access_token":"AT1","refresh_token":"RT1","user":{"id":1,"role":"candidate"}}"#;
        let auth: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(auth.access_token, "AT1");
        assert_eq!(auth.refresh_token, "RT1");
        assert_eq!(auth.user.role, Role::Candidate);
    }
}
