//! Plain-text rendering of gateway records for the terminal.

use talentbase_core::models::{
    AdminStats, Application, Candidate, CandidateStats, Company, CompanyStats, Experience, Job,
    User, UserAccount,
};
use talentbase_core::utils::{format_date, truncate_string};

/// Column widths for list output
const TITLE_WIDTH: usize = 32;
const NAME_WIDTH: usize = 24;

pub fn user_line(user: &User) -> String {
    format!("{} <{}> - {} (id {})", user.name, user.email, user.role, user.id)
}

pub fn job_row(job: &Job) -> String {
    format!(
        "{:>5}  {:<title$}  {:<name$}  {:<12}  {:<8}  {}",
        job.id,
        truncate_string(&job.title, TITLE_WIDTH),
        truncate_string(job.company_name(), NAME_WIDTH),
        truncate_string(&format!("{}/{}", job.cidade, job.estado), 12),
        job.modality,
        job.status_label(),
        title = TITLE_WIDTH,
        name = NAME_WIDTH,
    )
}

pub fn job_detail(job: &Job) -> String {
    let mut lines = vec![
        format!("{} (#{})", job.title, job.id),
        format!("Company:   {}", job.company_name()),
        format!("Location:  {}, {}", job.cidade, job.estado),
        format!("Position:  {} ({})", job.position, job.level),
        format!("Contract:  {} / {}", job.modality, job.contract_type),
        format!("Salary:    {}", job.salary_display()),
        format!("Posted:    {}", format_date(&job.posted_at)),
        format!("Status:    {}", job.status_label()),
    ];
    if !job.description.is_empty() {
        lines.push(String::new());
        lines.push(job.description.clone());
    }
    lines.join("\n")
}

pub fn company_row(company: &Company) -> String {
    format!(
        "{:>5}  {:<name$}  {:<20}  {}",
        company.id,
        truncate_string(&company.name, NAME_WIDTH),
        truncate_string(&company.location(), 20),
        company.contact_email,
        name = NAME_WIDTH,
    )
}

pub fn application_row(application: &Application) -> String {
    let subject = if application.candidate.is_some() {
        application.candidate_name()
    } else {
        application.job_title()
    };
    format!(
        "{:>5}  {:<title$}  {:<12}  {}",
        application.id,
        truncate_string(subject, TITLE_WIDTH),
        application.status,
        format_date(&application.applied_at),
        title = TITLE_WIDTH,
    )
}

pub fn user_account_row(user: &UserAccount) -> String {
    format!(
        "{:>5}  {:<name$}  {:<30}  {:<9}  {}",
        user.id,
        truncate_string(&user.name, NAME_WIDTH),
        truncate_string(&user.email, 30),
        user.role.to_string(),
        if user.active { "active" } else { "banned" },
        name = NAME_WIDTH,
    )
}

pub fn stats(stats: &AdminStats) -> String {
    [
        format!("Users:        {}", stats.total_users),
        format!("Candidates:   {}", stats.total_candidates),
        format!("Companies:    {}", stats.total_companies),
        format!(
            "Jobs:         {} ({} active, {} inactive)",
            stats.total_jobs,
            stats.active_jobs,
            stats.inactive_jobs()
        ),
        format!("Applications: {}", stats.total_applications),
    ]
    .join("\n")
}

pub fn candidate_profile(candidate: &Candidate) -> String {
    [
        format!("{} <{}>", candidate.name, candidate.email),
        format!("Location:   {}, {}", candidate.cidade, candidate.estado),
        format!("Employment: {}", candidate.employment_status),
        format!("Summary:    {}", candidate.summary),
    ]
    .join("\n")
}

pub fn experience_row(experience: &Experience) -> String {
    let details = &experience.details;
    let what = match details.course.as_deref() {
        Some(course) if experience.is_academic() => course,
        _ => details.role.as_str(),
    };
    format!(
        "{:>5}  {:<9}  {:<name$}  {:<title$}  {}",
        experience.id,
        if experience.is_academic() { "academic" } else { "work" },
        truncate_string(&details.institution, NAME_WIDTH),
        truncate_string(what, TITLE_WIDTH),
        details.period,
        name = NAME_WIDTH,
        title = TITLE_WIDTH,
    )
}

pub fn candidate_stats(stats: &CandidateStats) -> String {
    [
        format!("Applications:  {}", stats.applications),
        format!("Interviews:    {}", stats.interviews),
        format!("Profile views: {}", stats.profile_views),
        format!("Saved jobs:    {}", stats.saved_jobs),
    ]
    .join("\n")
}

pub fn company_stats(stats: &CompanyStats) -> String {
    [
        format!("Jobs:                 {}", stats.total_jobs),
        format!("Candidates:           {}", stats.total_candidates),
        format!("Pending applications: {}", stats.pending_applications),
    ]
    .join("\n")
}
