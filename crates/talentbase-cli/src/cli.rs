//! Command-line arguments.

use clap::{ArgAction, Args, Parser, Subcommand};

use talentbase_core::models::{ContractType, Level, Modality};

#[derive(Debug, Parser)]
#[command(name = "talentbase", version, about = "Terminal client for the TalentBase job board")]
pub struct Cli {
    /// Gateway base URL (overrides config and TALENTBASE_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in with email and password (password read from TALENTBASE_PASSWORD or prompted)
    Login {
        #[arg(long)]
        email: Option<String>,
    },

    /// Create a candidate account and log in
    RegisterCandidate {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
    },

    /// Create a hiring manager account together with their company
    RegisterManager {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        company: String,
        #[arg(long)]
        cnpj: String,
        #[arg(long, default_value = "")]
        state: String,
        #[arg(long, default_value = "")]
        city: String,
        /// Company contact email (defaults to --email)
        #[arg(long)]
        contact_email: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Forget the stored session
    Logout,

    /// Show who is logged in
    Whoami,

    /// List job postings
    Jobs {
        /// Match title, company or description
        #[arg(long, short)]
        query: Option<String>,
        #[arg(long)]
        state: Option<String>,
        /// CLT or Estagio
        #[arg(long)]
        modality: Option<String>,
        #[arg(long)]
        active: bool,
    },

    /// Show one job posting
    Job { id: i64 },

    /// Apply to a job posting as the logged-in candidate
    Apply { job_id: i64 },

    /// Check whether you already applied to a job posting
    HasApplied { job_id: i64 },

    /// Dashboard counters for your account
    Dashboard,

    /// Your candidate profile
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Your professional and academic experiences
    #[command(subcommand)]
    Experiences(ExperienceCommand),

    /// Manage your company and its job postings (managers)
    #[command(subcommand)]
    Company(CompanyCommand),

    /// List companies
    Companies {
        #[arg(long, short)]
        query: Option<String>,
    },

    /// List applications: your own as a candidate, your company's as a
    /// manager, or one job's with --job
    Applications {
        #[arg(long)]
        job: Option<i64>,
        #[arg(long)]
        status: Option<String>,
    },

    /// Change the status of an application to one of your jobs
    SetApplicationStatus { id: i64, status: String },

    /// Platform moderation
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Show your profile
    Show,

    /// Change profile fields; omitted fields keep their value
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        summary: Option<String>,
        /// Employment situation, e.g. "Empregado"
        #[arg(long)]
        employment_status: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ExperienceCommand {
    /// List your experiences
    List,

    /// Add an experience
    Add(ExperienceArgs),

    /// Replace an experience
    Update {
        id: i64,
        #[command(flatten)]
        experience: ExperienceArgs,
    },

    /// Remove an experience
    Delete { id: i64 },
}

#[derive(Debug, Clone, Args)]
pub struct ExperienceArgs {
    /// Company or school
    #[arg(long)]
    pub institution: String,
    #[arg(long, default_value = "")]
    pub role: String,
    /// Period as "Jan 2020 - Dez 2023"
    #[arg(long)]
    pub period: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Course name; makes this an academic experience
    #[arg(long)]
    pub course: Option<String>,
    #[arg(long, requires = "course")]
    pub degree: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum CompanyCommand {
    /// Your company's job postings
    Jobs,

    /// Publish a job posting
    CreateJob(JobArgs),

    /// Replace a job posting
    UpdateJob {
        id: i64,
        #[command(flatten)]
        job: JobArgs,
    },

    /// Activate or deactivate one of your job postings
    ToggleJob {
        id: i64,
        #[arg(long, action = ArgAction::Set)]
        active: bool,
    },

    /// Remove one of your job postings
    DeleteJob { id: i64 },

    /// Change company profile fields; omitted fields keep their value
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        contact_email: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct JobArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub state: String,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub salary: f64,
    #[arg(long)]
    pub position: String,
    /// junior, pleno, senior or executivo
    #[arg(long)]
    pub level: Level,
    /// presencial, hibrido or remoto
    #[arg(long)]
    pub contract: ContractType,
    /// clt or estagio
    #[arg(long)]
    pub modality: Modality,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Publication date (defaults to today)
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Platform counters
    Stats,

    /// List every job posting, including inactive ones
    Jobs,

    /// List users
    Users {
        #[arg(long, short)]
        query: Option<String>,
        /// candidate, manager or admin
        #[arg(long)]
        role: Option<String>,
    },

    /// Activate or deactivate a user
    ToggleUser {
        id: i64,
        #[arg(long, action = ArgAction::Set)]
        active: bool,
    },

    /// Activate or deactivate a job posting
    ToggleJob {
        id: i64,
        #[arg(long, action = ArgAction::Set)]
        active: bool,
    },

    /// Remove a job posting
    DeleteJob { id: i64 },
}
