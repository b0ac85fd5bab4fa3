//! Data models for TalentBase entities.
//!
//! These mirror the gateway's JSON. The client owns no invariants over
//! them beyond parsing; filters here are pure list views.
//!
//! - `User`, `Role`, `UserAccount`: identities and admin user rows
//! - `Job`, `JobDraft`, `JobFilter`: job postings
//! - `Company`, `Manager`, `NewCompany`, `CompanyUpdate`: employer records
//! - `Application`, `ApplicationFilter`: job applications
//! - `Candidate`, `Experience`: candidate profiles and background
//! - `CandidateStats`, `CompanyStats`: dashboard counters
//! - `AdminStats`, `UserFilter`: moderation views

pub mod admin;
pub mod application;
pub mod candidate;
pub mod company;
pub mod dashboard;
pub mod job;
pub mod user;

pub use admin::{AdminStats, UserFilter};
pub use application::{
    count_by_status, Application, ApplicationFilter, ApplicationStatusUpdate, NewApplication,
    STATUS_PENDING,
};
pub use candidate::{is_valid_period, Candidate, Experience, ExperienceDraft, PERIOD_FORMAT};
pub use company::{Company, CompanyUpdate, Manager, NewCompany};
pub use dashboard::{CandidateStats, CompanyStats};
pub use job::{ContractType, Job, JobDraft, JobFilter, Level, Modality};
pub use user::{AuthResponse, RefreshResponse, Role, User, UserAccount};
