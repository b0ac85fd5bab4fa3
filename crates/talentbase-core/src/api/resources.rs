//! Typed calls for the gateway's job board resources.
//!
//! All of these go through the authenticated pipeline.

use chrono::Utc;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::models::{
    AdminStats, Application, ApplicationStatusUpdate, Candidate, CandidateStats, Company,
    CompanyStats, CompanyUpdate, Experience, ExperienceDraft, Job, JobDraft, Manager,
    NewApplication, Role, User, UserAccount, PERIOD_FORMAT, STATUS_PENDING,
};

use super::client::ME_PATH;
use super::{ApiClient, ApiError};

/// Job lists fetched at once when gathering a company's applications
const MAX_CONCURRENT: usize = 5;

#[derive(Debug, Deserialize)]
struct AppliedCheck {
    has_applied: bool,
}

/// Create/update endpoints answer with the stored record or a bare
/// acknowledgement. A body carrying the record's id key must parse as that
/// record; anything else is an acknowledgement.
fn written_record<T: DeserializeOwned>(
    body: serde_json::Value,
    id_key: &str,
) -> Result<Option<T>, ApiError> {
    if body.get(id_key).is_none() {
        return Ok(None);
    }
    serde_json::from_value(body)
        .map(Some)
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse {} record: {}", id_key, e)))
}

fn check_period(draft: &ExperienceDraft) -> Result<(), ApiError> {
    if draft.has_valid_period() {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "Period \"{}\" must look like \"{}\"",
            draft.period, PERIOD_FORMAT
        )))
    }
}

impl ApiClient {
    // ===== Identity =====

    /// Fetch the identity behind the current access token.
    pub async fn fetch_me(&self) -> Result<User, ApiError> {
        self.get(ME_PATH).await
    }

    // ===== Jobs =====

    /// All job postings with their company embedded.
    pub async fn fetch_jobs(&self) -> Result<Vec<Job>, ApiError> {
        let jobs: Vec<Job> = self.get("/vagas_de_emprego_com_empresas").await?;
        debug!(count = jobs.len(), "Fetched jobs");
        Ok(jobs)
    }

    pub async fn fetch_job(&self, job_id: i64) -> Result<Job, ApiError> {
        self.get(&format!("/vagas_de_emprego/{}", job_id)).await
    }

    pub async fn create_job(&self, draft: &JobDraft) -> Result<Option<Job>, ApiError> {
        let body = self
            .send_json(Method::POST, "/vagas_de_emprego", draft)
            .await?;
        written_record(body, "id_vaga_de_emprego")
    }

    pub async fn update_job(&self, job_id: i64, draft: &JobDraft) -> Result<Option<Job>, ApiError> {
        let body = self
            .send_json(Method::PUT, &format!("/vagas_de_emprego/{}", job_id), draft)
            .await?;
        written_record(body, "id_vaga_de_emprego")
    }

    /// Jobs owned by the logged-in manager's company.
    pub async fn fetch_company_jobs(&self) -> Result<Vec<Job>, ApiError> {
        self.get("/companies/jobs").await
    }

    pub async fn set_company_job_active(&self, job_id: i64, active: bool) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .send_json(
                Method::PATCH,
                &format!("/companies/jobs/{}/status", job_id),
                &serde_json::json!({ "is_active": active }),
            )
            .await?;
        Ok(())
    }

    pub async fn delete_company_job(&self, job_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/companies/jobs/{}", job_id)).await
    }

    // ===== Companies =====

    pub async fn fetch_companies(&self) -> Result<Vec<Company>, ApiError> {
        self.get("/empresas").await
    }

    pub async fn fetch_company(&self, company_id: i64) -> Result<Company, ApiError> {
        self.get(&format!("/empresas/{}", company_id)).await
    }

    pub async fn fetch_jobs_for_company(&self, company_id: i64) -> Result<Vec<Job>, ApiError> {
        self.get(&format!("/empresas/{}/vagas_de_emprego", company_id))
            .await
    }

    /// The company's latest postings, as shown on its dashboard.
    pub async fn fetch_recent_jobs_for_company(
        &self,
        company_id: i64,
        limit: usize,
    ) -> Result<Vec<Job>, ApiError> {
        self.get(&format!(
            "/empresas/{}/vagas_de_emprego?limit={}",
            company_id, limit
        ))
        .await
    }

    pub async fn fetch_company_stats(&self, company_id: i64) -> Result<CompanyStats, ApiError> {
        self.get(&format!("/empresas/{}/stats", company_id)).await
    }

    pub async fn update_company(
        &self,
        company_id: i64,
        update: &CompanyUpdate,
    ) -> Result<Option<Company>, ApiError> {
        let body = self
            .send_json(Method::PUT, &format!("/empresas/{}", company_id), update)
            .await?;
        written_record(body, "id_empresa")
    }

    /// The manager record for a user, which names their company.
    pub async fn fetch_manager(&self, user_id: i64) -> Result<Manager, ApiError> {
        self.get(&format!("/gestores/{}", user_id)).await
    }

    // ===== Candidates =====

    pub async fn fetch_candidate(&self, candidate_id: i64) -> Result<Candidate, ApiError> {
        self.get(&format!("/candidatos/{}", candidate_id)).await
    }

    pub async fn update_candidate(
        &self,
        candidate: &Candidate,
    ) -> Result<Option<Candidate>, ApiError> {
        let body = self
            .send_json(Method::PUT, &format!("/candidatos/{}", candidate.id), candidate)
            .await?;
        written_record(body, "id_candidato")
    }

    pub async fn fetch_candidate_stats(&self) -> Result<CandidateStats, ApiError> {
        self.get("/candidates/dashboard/stats").await
    }

    pub async fn fetch_experiences(&self, user_id: i64) -> Result<Vec<Experience>, ApiError> {
        self.get(&format!("/experiencias/{}", user_id)).await
    }

    /// Add an experience. The period is checked before anything is sent.
    pub async fn create_experience(
        &self,
        user_id: i64,
        draft: &ExperienceDraft,
    ) -> Result<Option<Experience>, ApiError> {
        check_period(draft)?;
        let body = self
            .send_json(Method::POST, &format!("/experiencias/{}", user_id), draft)
            .await?;
        written_record(body, "id_experiencia")
    }

    pub async fn update_experience(
        &self,
        experience_id: i64,
        draft: &ExperienceDraft,
    ) -> Result<Option<Experience>, ApiError> {
        check_period(draft)?;
        let body = self
            .send_json(Method::PUT, &format!("/experiencias/{}", experience_id), draft)
            .await?;
        written_record(body, "id_experiencia")
    }

    pub async fn delete_experience(&self, experience_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/experiencias/{}", experience_id)).await
    }

    // ===== Applications =====

    /// Whether the user already applied to the job.
    pub async fn has_applied(&self, job_id: i64, user_id: i64) -> Result<bool, ApiError> {
        let check: AppliedCheck = self
            .get(&format!("/candidaturas/{}/{}", job_id, user_id))
            .await?;
        Ok(check.has_applied)
    }

    /// Submit an application in the initial "Pendente" status.
    pub async fn apply(&self, candidate_id: i64, job_id: i64) -> Result<(), ApiError> {
        let body = NewApplication {
            id_candidato: candidate_id,
            id_vaga_de_emprego: job_id,
            status: STATUS_PENDING.to_string(),
            data: Utc::now().to_rfc3339(),
        };
        let _: serde_json::Value = self
            .send_json(Method::POST, "/candidaturas", &body)
            .await?;
        Ok(())
    }

    pub async fn fetch_candidate_applications(
        &self,
        candidate_id: i64,
    ) -> Result<Vec<Application>, ApiError> {
        self.get(&format!("/candidatos/{}/candidaturas", candidate_id))
            .await
    }

    pub async fn fetch_job_applications(&self, job_id: i64) -> Result<Vec<Application>, ApiError> {
        self.get(&format!("/candidaturas/vaga_de_emprego/{}", job_id))
            .await
    }

    /// Applications visible to `user`.
    ///
    /// With a job, that job's applications. Without one, a candidate gets
    /// their own and a manager gets those of every job their company owns.
    pub async fn fetch_applications_for(
        &self,
        user: &User,
        job_id: Option<i64>,
    ) -> Result<Vec<Application>, ApiError> {
        if let Some(job_id) = job_id {
            return self.fetch_job_applications(job_id).await;
        }

        match user.role {
            Role::Candidate => self.fetch_candidate_applications(user.id).await,
            Role::Manager => {
                let jobs = self.fetch_company_jobs().await?;
                let mut applications = Vec::new();
                for chunk in jobs.chunks(MAX_CONCURRENT) {
                    let requests: Vec<_> = chunk
                        .iter()
                        .map(|job| self.fetch_job_applications(job.id))
                        .collect();
                    for result in futures::future::join_all(requests).await {
                        applications.extend(result?);
                    }
                }
                debug!(jobs = jobs.len(), count = applications.len(), "Fetched company applications");
                Ok(applications)
            }
            Role::Admin => Err(ApiError::Validation(
                "Admins must name a job to list its applications".to_string(),
            )),
        }
    }

    pub async fn update_application_status(
        &self,
        application_id: i64,
        status: &str,
    ) -> Result<(), ApiError> {
        let body = ApplicationStatusUpdate {
            status: status.to_string(),
            data_atualizacao: Utc::now().to_rfc3339(),
        };
        let _: serde_json::Value = self
            .send_json(Method::PUT, &format!("/candidaturas/{}", application_id), &body)
            .await?;
        Ok(())
    }

    // ===== Admin =====

    pub async fn fetch_admin_stats(&self) -> Result<AdminStats, ApiError> {
        self.get("/admin/stats").await
    }

    pub async fn fetch_users(&self) -> Result<Vec<UserAccount>, ApiError> {
        self.get("/usuarios").await
    }

    pub async fn set_user_active(&self, user_id: i64, active: bool) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .send_json(
                Method::PUT,
                &format!("/admin/toggle_user_status/{}", user_id),
                &serde_json::json!({ "new_status": active }),
            )
            .await?;
        Ok(())
    }

    pub async fn fetch_admin_jobs(&self) -> Result<Vec<Job>, ApiError> {
        self.get("/admin/jobs").await
    }

    pub async fn set_admin_job_active(&self, job_id: i64, active: bool) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .send_json(
                Method::PATCH,
                &format!("/admin/jobs/{}/status", job_id),
                &serde_json::json!({ "is_active": active }),
            )
            .await?;
        Ok(())
    }

    pub async fn delete_admin_job(&self, job_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/admin/jobs/{}", job_id)).await
    }
}
