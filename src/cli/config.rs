use std::fs;
use std::path::PathBuf;

use anyhow::Context;

use crate::client::{ApiClient, Session};

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("WALLET_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME")
            .map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("wallet").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create {}", config_dir.display()))?;
    }

    Ok(config_dir)
}

pub fn session_path() -> anyhow::Result<PathBuf> {
    Ok(get_config_dir()?.join("session.json"))
}

/// Saved session, or an anonymous one for the default server.
pub fn load_session() -> anyhow::Result<Session> {
    let path = session_path()?;
    let session = Session::load(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(session.unwrap_or_default())
}

pub fn save_session(session: &Session) -> anyhow::Result<()> {
    let path = session_path()?;
    session
        .save(&path)
        .with_context(|| format!("Failed to write {}", path.display()))
}

pub fn clear_session() -> anyhow::Result<()> {
    Ok(Session::clear(&session_path()?)?)
}

/// Client for the saved session. Fails when nobody is logged in.
pub fn authenticated_client() -> anyhow::Result<ApiClient> {
    let session = load_session()?;
    if !session.is_authenticated() {
        anyhow::bail!("Not logged in. Run `wallet auth login` first");
    }
    Ok(ApiClient::new(session)?)
}
