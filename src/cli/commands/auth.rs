use clap::Subcommand;
use serde_json::json;

use crate::cli::config::{clear_session, load_session, save_session};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::client::{ApiClient, Session};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Create an account and log in")]
    Register {
        #[arg(help = "Display name")]
        name: String,
        #[arg(help = "Email")]
        email: String,
        #[arg(long, env = "WALLET_PASSWORD", hide_env_values = true, help = "Password")]
        password: String,
        #[arg(long, help = "Server URL (defaults to the saved or default server)")]
        server: Option<String>,
    },

    #[command(about = "Log in to a server")]
    Login {
        #[arg(help = "Email")]
        email: String,
        #[arg(long, env = "WALLET_PASSWORD", hide_env_values = true, help = "Password")]
        password: String,
        #[arg(long, help = "Server URL (defaults to the saved or default server)")]
        server: Option<String>,
    },

    #[command(about = "Forget the saved session")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Register {
            name,
            email,
            password,
            server,
        } => {
            let client = anonymous_client(server)?;
            let session = client.auth().register(&name, &email, &password).await?;
            save_session(&session)?;
            output_success(
                output_format,
                &format!("Registered and logged in as {}", name),
                Some(session_json(&session)),
            )
        }
        AuthCommands::Login {
            email,
            password,
            server,
        } => {
            let client = anonymous_client(server)?;
            let session = client.auth().login(&email, &password).await?;
            save_session(&session)?;
            let name = session.user.as_ref().map(|u| u.name.clone()).unwrap_or_default();
            output_success(
                output_format,
                &format!("Logged in as {}", name),
                Some(session_json(&session)),
            )
        }
        AuthCommands::Logout => {
            clear_session()?;
            output_success(output_format, "Logged out", None)
        }
        AuthCommands::Status => {
            let session = load_session()?;
            let reachable = ApiClient::new(session.clone())?.health().await;
            let message = match &session.user {
                Some(user) if session.is_authenticated() => {
                    format!("Logged in to {} as {} ({})", session.server, user.name, user.id)
                }
                _ => format!("Not logged in ({})", session.server),
            };
            let mut data = session_json(&session);
            data["reachable"] = json!(reachable);
            output_success(output_format, &message, Some(data))
        }
    }
}

/// Client without credentials for `server`, or for the saved session's server.
fn anonymous_client(server: Option<String>) -> anyhow::Result<ApiClient> {
    let server = match server {
        Some(server) => server,
        None => load_session()?.server,
    };
    Ok(ApiClient::new(Session::anonymous(server))?)
}

/// Session details without the token
fn session_json(session: &Session) -> serde_json::Value {
    json!({
        "server": session.server,
        "authenticated": session.is_authenticated(),
        "user": session.user,
    })
}
