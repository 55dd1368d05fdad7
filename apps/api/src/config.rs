use anyhow::{Context, Result};

use crate::llm_client::GROQ_CHAT_URL;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub llm_api_url: String,
    /// Contact-lookup key. When unset the recruiter resolver always reports "not found".
    pub hunter_api_key: Option<String>,
    pub portfolio_csv: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub mailbox_user: Option<String>,
    /// OAuth access token obtained out of band for the mailbox account.
    pub mailbox_oauth_token: Option<String>,
    pub sender: SenderProfile,
    pub port: u16,
    pub rust_log: String,
}

/// Business-development persona used to sign organization outreach emails.
#[derive(Debug, Clone)]
pub struct SenderProfile {
    pub name: String,
    pub title: String,
    pub company: String,
    pub phone: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            llm_api_url: env_or("LLM_API_URL", GROQ_CHAT_URL),
            hunter_api_key: optional_env("HUNTER_API_KEY"),
            portfolio_csv: env_or("PORTFOLIO_CSV", "resource/my_portfolio.csv"),
            smtp_host: env_or("SMTP_HOST", "smtp.gmail.com"),
            smtp_port: env_or("SMTP_PORT", "587")
                .parse::<u16>()
                .context("SMTP_PORT must be a valid port number")?,
            mailbox_user: optional_env("MAILBOX_USER"),
            mailbox_oauth_token: optional_env("MAILBOX_OAUTH_TOKEN"),
            sender: SenderProfile {
                name: env_or("SENDER_NAME", "Haswatha Sridharan"),
                title: env_or("SENDER_TITLE", "Business Development Executive"),
                company: env_or("SENDER_COMPANY", "InnovaEdge Technologies"),
                phone: env_or("SENDER_PHONE", "777-444-0000"),
            },
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}
