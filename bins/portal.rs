use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use models::{Credentials, MicroAuth, MicroUser, RegisterRequest, UserModel};
use service::auth::service::REGISTER_FAILED;
use service::session::{FileSessionStore, SessionStore, StaticToken, TokenStore};
use service::Portal;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "portal", version, about = "Login, registration and user management against the portal services")]
struct Cli {
    /// Bearer token to use instead of the saved session
    #[arg(long, global = true, env = "PORTAL_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and save the session
    Login(LoginArgs),
    /// Register a new account
    Register(AccountArgs),
    /// Forget the saved session
    Logout,
    /// Manage users (requires a session or --token)
    #[command(subcommand)]
    Users(UsersCommand),
}

#[derive(Subcommand)]
enum UsersCommand {
    /// Print all users with their auth records as JSON
    List,
    /// Create a user together with its auth and device entries
    Add(AccountArgs),
    /// Update a user and its auth record
    Update {
        #[arg(long)]
        user_id: i64,
        #[arg(long)]
        auth_id: i64,
        #[command(flatten)]
        account: AccountArgs,
    },
    /// Delete a user from every service
    Remove {
        #[arg(long)]
        user_id: i64,
        #[arg(long)]
        auth_id: i64,
        #[arg(short, long)]
        username: String,
    },
}

#[derive(Args)]
struct LoginArgs {
    #[arg(short, long)]
    username: String,
    #[arg(short, long)]
    password: String,
}

#[derive(Args)]
struct AccountArgs {
    #[arg(short, long)]
    username: String,
    #[arg(short, long)]
    password: String,
    #[arg(short, long, default_value = "CLIENT")]
    role: String,
}

impl AccountArgs {
    fn into_model(self, user_id: Option<i64>, auth_id: Option<i64>) -> UserModel {
        UserModel {
            u: MicroUser { id: user_id, username: self.username.clone() },
            a: MicroAuth { id: auth_id, username: self.username, password: self.password, role: self.role },
        }
    }
}

fn init_logging(cfg: &configs::AppConfig) {
    common::utils::logging::init_logging(&cfg.logging.format);
    info!(service = "portal", event = "logger_init", format = %cfg.logging.format, "tracing subscriber initialized");
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(service = "portal", event = "config_invalid", error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&cfg);

    let invocation_id = Uuid::new_v4();
    std::panic::set_hook(Box::new(move |info| {
        error!(service = "portal", event = "panic", %invocation_id, message = %info, "unhandled panic occurred");
    }));

    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "portal", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(cli, cfg)) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(service = "portal", event = "run_failed", %invocation_id, error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}

/// Run one command; `Ok(false)` means the workflow returned its failure value.
async fn run(cli: Cli, cfg: configs::AppConfig) -> anyhow::Result<bool> {
    let sessions = FileSessionStore::new(&cfg.session.file).await?;
    let tokens: Arc<dyn TokenStore> = match cli.token {
        Some(t) => Arc::new(StaticToken(t)) as Arc<dyn TokenStore>,
        None => sessions.clone() as Arc<dyn TokenStore>,
    };
    let portal = Portal::from_config(&cfg.services, tokens);

    match cli.command {
        Command::Login(args) => {
            let creds = Credentials::new(args.username, args.password);
            let session = portal.auth.login_and_store(&creds, &*sessions).await;
            if session.is_empty() {
                return Ok(false);
            }
            println!("logged in as {} ({})", session.username, session.role);
        }
        Command::Register(args) => {
            let msg = portal.auth.register(&RegisterRequest::new(args.username, args.password, args.role)).await;
            println!("{msg}");
            if msg == REGISTER_FAILED {
                return Ok(false);
            }
        }
        Command::Logout => {
            sessions.clear().await?;
            println!("session cleared ({})", sessions.path().display());
        }
        Command::Users(UsersCommand::List) => {
            let users = match portal.users.try_find_all().await {
                Ok(users) => users,
                Err(e) => {
                    error!(service = "portal", event = "find_all_failed", code = e.code(), error = %e, "listing users failed");
                    return Ok(false);
                }
            };
            println!("{}", serde_json::to_string_pretty(&users)?);
        }
        Command::Users(UsersCommand::Add(account)) => {
            let created = portal.users.add(&account.into_model(None, None)).await;
            if created.is_placeholder() {
                return Ok(false);
            }
            println!("{}", serde_json::to_string_pretty(&created)?);
        }
        Command::Users(UsersCommand::Update { user_id, auth_id, account }) => {
            let updated = portal.users.update(&account.into_model(Some(user_id), Some(auth_id))).await;
            if updated.is_placeholder() {
                return Ok(false);
            }
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
        Command::Users(UsersCommand::Remove { user_id, auth_id, username }) => {
            let target = UserModel {
                u: MicroUser { id: Some(user_id), username: username.clone() },
                a: MicroAuth { id: Some(auth_id), username, ..MicroAuth::default() },
            };
            if !portal.users.remove(&[target]).await {
                return Ok(false);
            }
            println!("removed");
        }
    }
    Ok(true)
}
