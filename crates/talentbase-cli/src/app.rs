//! Application state for the TalentBase CLI.
//!
//! `App` owns the configuration and the session manager, restores the
//! stored session on startup and dispatches one command per run.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use talentbase_core::api::{Navigator, LOGIN_PAGE};
use talentbase_core::models::{
    count_by_status, ApplicationFilter, CompanyUpdate, ExperienceDraft, JobDraft, JobFilter,
    NewCompany, Role, User, UserFilter,
};
use talentbase_core::{ApiClient, Config, SessionManager, SessionState};

use crate::cli::{
    AdminCommand, Command, CompanyCommand, ExperienceArgs, ExperienceCommand, JobArgs,
    ProfileCommand,
};
use crate::output;

/// Environment variable holding the login password for non-interactive use
const ENV_PASSWORD: &str = "TALENTBASE_PASSWORD";

/// Recent postings shown on a company dashboard
const RECENT_JOBS: usize = 5;

/// The terminal has no pages; "navigating to login" means telling the user.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn current_path(&self) -> String {
        "/cli".to_string()
    }

    fn navigate(&self, path: &str) {
        if path == LOGIN_PAGE {
            eprintln!("Session expired. Run `talentbase login` to sign in again.");
        }
    }
}

pub struct App {
    config: Config,
    manager: SessionManager,
}

impl App {
    pub async fn new(api_url: Option<String>) -> Result<Self> {
        let mut config = Config::load().context("Failed to load configuration")?;
        if let Some(url) = api_url {
            config.api_url = url;
        }
        debug!(api_url = %config.api_url, storage = ?config.token_storage, "Config loaded");

        let client = ApiClient::connect(&config)?.with_navigator(Arc::new(TerminalNavigator));
        let manager = SessionManager::new(client);

        let state = manager.init().await;
        debug!(state = state.label(), "Session initialized");

        Ok(Self { config, manager })
    }

    fn require_user(&self) -> Result<User> {
        self.manager
            .current_user()
            .ok_or_else(|| anyhow::anyhow!("Not logged in. Run `talentbase login` first."))
    }

    fn require_role(&self, role: Role) -> Result<User> {
        let user = self.require_user()?;
        if user.role != role {
            anyhow::bail!("This command requires a {} account", role);
        }
        Ok(user)
    }

    pub async fn run(&mut self, command: Command) -> Result<()> {
        let api = self.manager.client().clone();

        match command {
            Command::Login { email } => self.login(email).await?,
            Command::RegisterCandidate { email, name } => {
                let password = Self::prompt_new_password()?;
                let user = self
                    .manager
                    .register_candidate(&email, &password, &name, Role::Candidate)
                    .await
                    .map_err(|e| anyhow::anyhow!("Registration failed: {}", e.detail()))?;
                self.remember_email(&email);
                println!("Welcome, {}!", user.name);
            }
            Command::RegisterManager {
                email,
                name,
                company,
                cnpj,
                state,
                city,
                contact_email,
                description,
            } => {
                let password = Self::prompt_new_password()?;
                let company = NewCompany {
                    name: company,
                    estado: state,
                    cidade: city,
                    cnpj,
                    contact_email: contact_email.unwrap_or_else(|| email.clone()),
                    description,
                };
                let user = self
                    .manager
                    .register_manager(&email, &password, &name, Role::Manager, &company)
                    .await
                    .map_err(|e| anyhow::anyhow!("Registration failed: {}", e.detail()))?;
                self.remember_email(&email);
                println!("Welcome, {}! {} is registered.", user.name, company.name);
            }
            Command::Logout => {
                self.manager.logout();
                println!("Logged out.");
            }
            Command::Whoami => match self.manager.state() {
                SessionState::Authenticated(user) => println!("{}", output::user_line(&user)),
                _ => println!("Not logged in."),
            },
            Command::Jobs {
                query,
                state,
                modality,
                active,
            } => {
                let jobs = api.fetch_jobs().await?;
                let filter = JobFilter {
                    query,
                    state,
                    modality,
                    active_only: active,
                };
                let shown = filter.apply(&jobs);
                for job in &shown {
                    println!("{}", output::job_row(job));
                }
                println!("{} of {} jobs", shown.len(), jobs.len());
            }
            Command::Job { id } => {
                let job = api.fetch_job(id).await?;
                println!("{}", output::job_detail(&job));
            }
            Command::Apply { job_id } => {
                let user = self.require_role(Role::Candidate)?;
                if api.has_applied(job_id, user.id).await? {
                    println!("You already applied to job {}.", job_id);
                    return Ok(());
                }
                api.apply(user.id, job_id)
                    .await
                    .map_err(|e| anyhow::anyhow!("Could not apply: {}", e.detail()))?;
                println!("Application sent.");
            }
            Command::HasApplied { job_id } => {
                let user = self.require_role(Role::Candidate)?;
                let applied = api.has_applied(job_id, user.id).await?;
                println!("{}", if applied { "yes" } else { "no" });
            }
            Command::Dashboard => {
                let user = self.require_user()?;
                match user.role {
                    Role::Candidate => {
                        let stats = api.fetch_candidate_stats().await?;
                        println!("{}", output::candidate_stats(&stats));
                    }
                    Role::Manager => {
                        let manager = api.fetch_manager(user.id).await?;
                        let stats = api.fetch_company_stats(manager.company_id).await?;
                        println!("{}", output::company_stats(&stats));
                        let recent = api
                            .fetch_recent_jobs_for_company(manager.company_id, RECENT_JOBS)
                            .await?;
                        for job in &recent {
                            println!("{}", output::job_row(job));
                        }
                    }
                    Role::Admin => {
                        let stats = api.fetch_admin_stats().await?;
                        println!("{}", output::stats(&stats));
                    }
                }
            }
            Command::Profile(profile) => self.run_profile(&api, profile).await?,
            Command::Experiences(experiences) => self.run_experiences(&api, experiences).await?,
            Command::Company(company) => self.run_company(&api, company).await?,
            Command::Companies { query } => {
                let companies = api.fetch_companies().await?;
                let query = query.unwrap_or_default();
                for company in companies.iter().filter(|c| c.matches_query(&query)) {
                    println!("{}", output::company_row(company));
                }
            }
            Command::Applications { job, status } => {
                let user = self.require_user()?;
                let applications = api.fetch_applications_for(&user, job).await?;
                let filter = ApplicationFilter {
                    status,
                    ..Default::default()
                };
                for application in filter.apply(&applications) {
                    println!("{}", output::application_row(application));
                }
                let counts = count_by_status(&applications);
                let summary: Vec<String> = counts
                    .iter()
                    .map(|(status, n)| format!("{}: {}", status, n))
                    .collect();
                println!("{}", summary.join(", "));
            }
            Command::SetApplicationStatus { id, status } => {
                self.require_user()?;
                api.update_application_status(id, &status).await?;
                println!("Application {} is now {}.", id, status);
            }
            Command::Admin(admin) => self.run_admin(&api, admin).await?,
        }

        Ok(())
    }

    async fn run_profile(&self, api: &ApiClient, command: ProfileCommand) -> Result<()> {
        let user = self.require_role(Role::Candidate)?;
        let mut profile = api.fetch_candidate(user.id).await?;

        match command {
            ProfileCommand::Show => println!("{}", output::candidate_profile(&profile)),
            ProfileCommand::Update {
                name,
                city,
                state,
                summary,
                employment_status,
            } => {
                overwrite(&mut profile.name, name);
                overwrite(&mut profile.cidade, city);
                overwrite(&mut profile.estado, state);
                overwrite(&mut profile.summary, summary);
                overwrite(&mut profile.employment_status, employment_status);
                api.update_candidate(&profile)
                    .await
                    .map_err(|e| anyhow::anyhow!("Could not save profile: {}", e.detail()))?;
                println!("Profile saved.");
            }
        }
        Ok(())
    }

    async fn run_experiences(&self, api: &ApiClient, command: ExperienceCommand) -> Result<()> {
        let user = self.require_role(Role::Candidate)?;

        match command {
            ExperienceCommand::List => {
                for experience in api.fetch_experiences(user.id).await? {
                    println!("{}", output::experience_row(&experience));
                }
            }
            ExperienceCommand::Add(args) => {
                api.create_experience(user.id, &experience_draft(args))
                    .await
                    .map_err(|e| anyhow::anyhow!("Could not add experience: {}", e.detail()))?;
                println!("Experience added.");
            }
            ExperienceCommand::Update { id, experience } => {
                api.update_experience(id, &experience_draft(experience))
                    .await
                    .map_err(|e| anyhow::anyhow!("Could not save experience: {}", e.detail()))?;
                println!("Experience {} saved.", id);
            }
            ExperienceCommand::Delete { id } => {
                api.delete_experience(id).await?;
                println!("Experience {} removed.", id);
            }
        }
        Ok(())
    }

    async fn run_company(&self, api: &ApiClient, command: CompanyCommand) -> Result<()> {
        let user = self.require_role(Role::Manager)?;

        match command {
            CompanyCommand::Jobs => {
                for job in api.fetch_company_jobs().await? {
                    println!("{}", output::job_row(&job));
                }
            }
            CompanyCommand::CreateJob(args) => {
                let manager = api.fetch_manager(user.id).await?;
                let created = api
                    .create_job(&job_draft(args, manager.company_id))
                    .await
                    .map_err(|e| anyhow::anyhow!("Could not publish job: {}", e.detail()))?;
                match created {
                    Some(job) => println!("Published job {}.", job.id),
                    None => println!("Job published."),
                }
            }
            CompanyCommand::UpdateJob { id, job } => {
                let manager = api.fetch_manager(user.id).await?;
                api.update_job(id, &job_draft(job, manager.company_id))
                    .await
                    .map_err(|e| anyhow::anyhow!("Could not save job: {}", e.detail()))?;
                println!("Job {} saved.", id);
            }
            CompanyCommand::ToggleJob { id, active } => {
                api.set_company_job_active(id, active).await?;
                println!("Job {} {}.", id, if active { "activated" } else { "deactivated" });
            }
            CompanyCommand::DeleteJob { id } => {
                api.delete_company_job(id).await?;
                println!("Job {} removed.", id);
            }
            CompanyCommand::Update {
                name,
                state,
                city,
                contact_email,
                description,
            } => {
                let manager = api.fetch_manager(user.id).await?;
                let company = api.fetch_company(manager.company_id).await?;
                let mut update = CompanyUpdate::from(&company);
                overwrite(&mut update.name, name);
                overwrite(&mut update.estado, state);
                overwrite(&mut update.cidade, city);
                overwrite(&mut update.contact_email, contact_email);
                overwrite(&mut update.description, description);
                api.update_company(company.id, &update)
                    .await
                    .map_err(|e| anyhow::anyhow!("Could not save company: {}", e.detail()))?;
                println!("{} saved.", update.name);
            }
        }
        Ok(())
    }

    async fn run_admin(&self, api: &ApiClient, command: AdminCommand) -> Result<()> {
        self.require_role(Role::Admin)?;

        match command {
            AdminCommand::Stats => {
                let stats = api.fetch_admin_stats().await?;
                println!("{}", output::stats(&stats));
            }
            AdminCommand::Jobs => {
                for job in api.fetch_admin_jobs().await? {
                    println!("{}", output::job_row(&job));
                }
            }
            AdminCommand::Users { query, role } => {
                let role = match role {
                    Some(r) => Some(
                        Role::parse(&r).ok_or_else(|| anyhow::anyhow!("Unknown role: {}", r))?,
                    ),
                    None => None,
                };
                let users = api.fetch_users().await?;
                let filter = UserFilter { query, role };
                for account in filter.apply(&users) {
                    println!("{}", output::user_account_row(account));
                }
            }
            AdminCommand::ToggleUser { id, active } => {
                api.set_user_active(id, active).await?;
                println!("User {} {}.", id, if active { "activated" } else { "deactivated" });
            }
            AdminCommand::ToggleJob { id, active } => {
                api.set_admin_job_active(id, active).await?;
                println!("Job {} {}.", id, if active { "activated" } else { "deactivated" });
            }
            AdminCommand::DeleteJob { id } => {
                api.delete_admin_job(id).await?;
                println!("Job {} removed.", id);
            }
        }
        Ok(())
    }

    async fn login(&mut self, email: Option<String>) -> Result<()> {
        let email = match email.or_else(|| self.config.last_email.clone()) {
            Some(e) => e,
            None => Self::prompt_email()?,
        };
        if email.is_empty() {
            anyhow::bail!("Email is required");
        }

        let password = match std::env::var(ENV_PASSWORD) {
            Ok(p) if !p.is_empty() => p,
            _ => rpassword::prompt_password(format!("Password for {}: ", email))?,
        };

        match self.manager.login(&email, &password).await {
            Ok(user) => {
                self.remember_email(&email);
                println!("Logged in as {}", output::user_line(&user));
                Ok(())
            }
            Err(e) if e.is_unauthorized() => {
                anyhow::bail!("Login failed, check your credentials: {}", e.detail())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn remember_email(&mut self, email: &str) {
        self.config.last_email = Some(email.to_string());
        if let Err(e) = self.config.save() {
            warn!(error = %e, "Failed to save config");
        }
    }

    fn prompt_email() -> Result<String> {
        print!("Email: ");
        io::stdout().flush()?;

        let mut email = String::new();
        io::stdin().read_line(&mut email)?;
        Ok(email.trim().to_string())
    }

    fn prompt_new_password() -> Result<String> {
        if let Ok(p) = std::env::var(ENV_PASSWORD) {
            if !p.is_empty() {
                return Ok(p);
            }
        }
        let password = rpassword::prompt_password("Password: ")?;
        let confirm = rpassword::prompt_password("Confirm password: ")?;
        if password != confirm {
            anyhow::bail!("Passwords do not match");
        }
        Ok(password)
    }
}

fn overwrite(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}

fn experience_draft(args: ExperienceArgs) -> ExperienceDraft {
    ExperienceDraft {
        institution: args.institution,
        role: args.role,
        period: args.period,
        description: args.description,
        course: args.course,
        degree: args.degree,
    }
}

fn job_draft(args: JobArgs, company_id: i64) -> JobDraft {
    JobDraft {
        title: args.title,
        company_id,
        posted_at: args
            .date
            .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string()),
        estado: args.state,
        cidade: args.city,
        salary: args.salary,
        position: args.position,
        level: args.level,
        contract_type: args.contract,
        modality: args.modality,
        description: args.description,
    }
}
