use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{CredentialStore, Navigator, Session};

/// Environment variable that overrides the stored session token
pub const TOKEN_ENV: &str = "BUDGETS_TOKEN";

/// Session file written by the sign-in flow; this CLI only reads it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFile {
    pub token: String,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(custom_dir) = std::env::var("BUDGETS_CONFIG_DIR") {
        return Ok(PathBuf::from(custom_dir));
    }

    let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
    Ok(PathBuf::from(home).join(".config").join("budgets"))
}

pub fn load_session_file(config_dir: &Path) -> anyhow::Result<Option<SessionFile>> {
    let session_file = config_dir.join("session.json");

    if !session_file.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(session_file)?;
    let session: SessionFile = serde_json::from_str(&content)?;
    Ok(Some(session))
}

/// Credential lookup for the CLI: `BUDGETS_TOKEN` first, then `session.json`
#[derive(Debug, Clone)]
pub struct CliCredentialStore {
    env_token: Option<String>,
    config_dir: Option<PathBuf>,
}

impl CliCredentialStore {
    pub fn from_env() -> Self {
        let config_dir = match get_config_dir() {
            Ok(dir) => Some(dir),
            Err(e) => {
                tracing::warn!("No config directory: {}", e);
                None
            }
        };
        Self::new(std::env::var(TOKEN_ENV).ok(), config_dir)
    }

    pub fn new(env_token: Option<String>, config_dir: Option<PathBuf>) -> Self {
        Self { env_token, config_dir }
    }
}

impl CredentialStore for CliCredentialStore {
    fn load(&self) -> Option<Session> {
        if let Some(session) = self.env_token.clone().and_then(Session::new) {
            return Some(session);
        }

        let dir = self.config_dir.as_ref()?;
        match load_session_file(dir) {
            Ok(file) => file.and_then(|f| Session::new(f.token)),
            Err(e) => {
                tracing::warn!("Ignoring unreadable session file in {}: {}", dir.display(), e);
                None
            }
        }
    }
}

/// Tells the user where to sign in; the command stops afterwards
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn redirect(&self, path: &str) {
        eprintln!(
            "Not signed in. Sign in at {} and store the session token in {} or session.json.",
            path, TOKEN_ENV
        );
    }
}
