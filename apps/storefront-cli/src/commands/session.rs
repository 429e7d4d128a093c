use clap::Subcommand;

use crate::state::AppState;

#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Store a bearer token obtained from the login flow
    Login {
        #[arg(long)]
        token: String,
        /// Role reported with the token, e.g. `admin`
        #[arg(long)]
        role: Option<String>,
    },
    /// Forget the stored token and role
    Logout,
    /// Show what is stored
    Show,
}

pub async fn run(command: SessionCommand, state: &AppState) -> anyhow::Result<()> {
    match command {
        SessionCommand::Login { token, role } => {
            let token = token.trim();
            if token.is_empty() {
                anyhow::bail!("token must not be empty");
            }
            state.session.login(token, role.as_deref()).await?;
            tracing::info!(role = role.as_deref().unwrap_or("-"), "Session stored");
            println!("Logged in{}", role.map(|r| format!(" as {r}")).unwrap_or_default());
        }
        SessionCommand::Logout => {
            state.session.logout().await?;
            tracing::info!("Session cleared");
            println!("Logged out");
        }
        SessionCommand::Show => match state.session.token().await? {
            Some(token) => {
                let role = state.session.role().await?;
                println!("Token: {}", mask(&token));
                println!("Role:  {}", role.as_deref().unwrap_or("(none)"));
            }
            None => println!("Not logged in"),
        },
    }
    Ok(())
}

fn mask(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    if visible.chars().count() == token.chars().count() {
        return "*".repeat(token.chars().count());
    }
    format!("{visible}****")
}
