//! QuickOps - Entry Point
//!
//! Command line client for the QuickOps deployment backend.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use openapi_client::models::DeploymentChoice;
use tracing::{error, info};

use quickops::app::options::AppOptions;
use quickops::app::shell::Shell;
use quickops::app::state::AppContext;
use quickops::authn::session::SessionStoreExt;
use quickops::components::project_list::render_list;
use quickops::components::Variant;
use quickops::deploy::fsm::{ViewState, LOG_FETCH_FAILED, NO_LOGS_FOUND};
use quickops::errors::QuickOpsError;
use quickops::forms::credentials::CredentialsForm;
use quickops::logs::{init_logging, LogLevel, LogOptions};
use quickops::notify::{AssumeAnswer, Confirm, ConsoleNotifier, Notice, Notifier, StdinConfirm};
use quickops::pages::{auth, detail::ProjectDetailPage, form::ProjectFormPage};
use quickops::routes::{AuthMode, Navigation, Route};
use quickops::storage::layout::StorageLayout;
use quickops::storage::settings::Settings;
use quickops::utils::version_info;

#[derive(Parser)]
#[command(name = "quickops", about = "Register and deploy projects with QuickOps")]
struct Cli {
    /// Backend API base URL
    #[arg(long, global = true, env = "QUICKOPS_API_URL")]
    api_url: Option<String>,

    /// Storage directory for settings and session
    #[arg(long, global = true, env = "QUICKOPS_HOME")]
    home: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// Emit JSON log lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "QUICKOPS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long, env = "QUICKOPS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List projects
    List {
        #[arg(long)]
        compact: bool,
    },
    /// Show the sidebar
    Sidebar,
    /// Show one project
    Show { id: String },
    /// Register a new project
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        frontend: String,
        /// Backend repository URL, repeatable
        #[arg(long = "backend", required = true)]
        backends: Vec<String>,
        /// GitHub access token
        #[arg(long, env = "QUICKOPS_GITHUB_TOKEN", hide_env_values = true)]
        token: String,
    },
    /// Delete a project that was never deployed
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Deploy or update a project
    Deploy {
        id: String,
        /// vm or kubernetes
        #[arg(long)]
        target: Option<DeploymentChoice>,
        /// Return once the deployment is triggered
        #[arg(long)]
        no_watch: bool,
    },
    /// Print the full log of a build
    Logs { job: String, build: String },
    /// Print version information
    Version,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Command::Version = cli.command {
        match serde_json::to_string_pretty(&version_info()) {
            Ok(version) => println!("{}", version),
            Err(e) => eprintln!("Failed to print version: {}", e),
        }
        return ExitCode::SUCCESS;
    }

    let layout = cli.home.clone().map(StorageLayout::new).unwrap_or_default();

    // Retrieve the settings file
    let mut settings = match layout.settings_file().read_json_opt::<Settings>().await {
        Ok(settings) => settings.unwrap_or_default(),
        Err(e) => {
            eprintln!("Unable to read settings file: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(api_url) = &cli.api_url {
        settings.backend.base_url = api_url.clone();
    }
    if let Some(level) = &cli.log_level {
        settings.log_level = *level;
    }
    settings.json_logs |= cli.json_logs;

    // Initialize logging
    let log_options = LogOptions {
        log_level: settings.log_level,
        log_dir: settings.log_to_file.then(|| layout.logs_dir()),
        json_format: settings.json_logs,
        ..Default::default()
    };
    if let Err(e) = init_logging(log_options) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let options = AppOptions::from_settings(&settings, layout);
    info!("Running QuickOps with options: {:?}", options);

    let ctx = match AppContext::init(&options).await {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Failed to start: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let shell = Shell::new(ctx);
    let notifier = ConsoleNotifier;
    match run(cli.command, &shell, &notifier).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run a path through the session gate. `Ok(false)` means there is nothing to do.
async fn gate(shell: &Shell, path: &str, notifier: &dyn Notifier) -> Result<bool, QuickOpsError> {
    match shell.navigate(path).await {
        Navigation::Render(_) => Ok(true),
        Navigation::Redirect(Route::Login) => {
            notifier.notify(Notice::error("Not logged in. Run `quickops login` first."));
            Err(QuickOpsError::SessionError("not signed in".to_string()))
        }
        Navigation::Redirect(route) => {
            let message = match shell.ctx().auth_mode {
                AuthMode::Disabled => "Authentication is disabled".to_string(),
                AuthMode::Required => format!("Already logged in, see {}", route),
            };
            notifier.notify(Notice::info(message));
            Ok(false)
        }
    }
}

async fn run(command: Command, shell: &Shell, notifier: &dyn Notifier) -> Result<(), QuickOpsError> {
    let ctx = shell.ctx();

    match command {
        Command::Version => Ok(()),

        Command::Login { email, password } => {
            if !gate(shell, "/login", notifier).await? {
                return Ok(());
            }
            auth::login(ctx, &CredentialsForm::new(email, password), notifier)
                .await
                .map(|_| ())
        }

        Command::Register { email, password } => {
            if !gate(shell, "/register", notifier).await? {
                return Ok(());
            }
            auth::register(ctx, &CredentialsForm::new(email, password), notifier).await
        }

        Command::Logout => auth::logout(ctx, notifier).await,

        Command::Whoami => {
            match (ctx.auth_mode, ctx.session.current().await) {
                (AuthMode::Disabled, _) => println!("Authentication is disabled"),
                (AuthMode::Required, Some(session)) => println!("{}", session.display_name()),
                (AuthMode::Required, None) => println!("Not logged in"),
            }
            Ok(())
        }

        Command::List { compact } => {
            if !gate(shell, "/", notifier).await? {
                return Ok(());
            }
            shell.start().await;
            if compact {
                let projects = ctx.projects.list();
                println!("{}", render_list(&projects, ctx.projects.is_loading(), Variant::Compact));
            } else {
                println!("{}", shell.home_view());
            }
            Ok(())
        }

        Command::Sidebar => {
            if !gate(shell, "/", notifier).await? {
                return Ok(());
            }
            shell.start().await;
            println!("{}", shell.sidebar_view());
            Ok(())
        }

        Command::Show { id } => {
            if !gate(shell, &format!("/project/{}", id), notifier).await? {
                return Ok(());
            }
            let mut page = ProjectDetailPage::new(id);
            let result = page.load(ctx, notifier).await;
            println!("{}", page.render());
            result
        }

        Command::Create {
            name,
            frontend,
            backends,
            token,
        } => {
            if !gate(shell, "/form", notifier).await? {
                return Ok(());
            }
            let mut page = ProjectFormPage::new();
            page.form.name = name;
            page.form.frontend_repo = frontend;
            page.form.set_github_token(token);
            for (index, backend) in backends.into_iter().enumerate() {
                if index > 0 {
                    page.form.add_backend_repo();
                }
                page.form.set_backend_repo(index, backend);
            }

            if let Some(project) = page.submit(ctx, notifier).await? {
                println!("{}", project.id);
            }
            Ok(())
        }

        Command::Delete { id, yes } => {
            if !gate(shell, &format!("/project/{}", id), notifier).await? {
                return Ok(());
            }
            let mut page = ProjectDetailPage::new(id);
            page.load(ctx, notifier).await?;

            let confirm: Box<dyn Confirm> = if yes {
                Box::new(AssumeAnswer(true))
            } else {
                Box::new(StdinConfirm)
            };
            if !page.delete(ctx, confirm.as_ref(), notifier).await? {
                notifier.notify(Notice::info("Cancelled"));
            }
            Ok(())
        }

        Command::Deploy {
            id,
            target,
            no_watch,
        } => {
            if !gate(shell, &format!("/project/{}", id), notifier).await? {
                return Ok(());
            }
            let mut page = ProjectDetailPage::new(id);
            page.load(ctx, notifier).await?;

            if let Some(target) = target {
                if let Err(e) = page.select_target(target) {
                    notifier.notify(Notice::error(e.user_message("Failed to start deployment")));
                    return Err(e);
                }
            }
            if page.target().is_none() {
                notifier.notify(Notice::info(
                    "No deployment type selected. Pass --target vm or --target kubernetes.",
                ));
                return Ok(());
            }

            if !page.deploy(ctx, notifier).await? {
                return Ok(());
            }
            println!("{}", page.render());
            if no_watch {
                return Ok(());
            }

            page.settle(ctx, tokio::time::sleep).await?;
            if page.modal().is_some_and(|m| m.state() == ViewState::Failed) {
                page.toggle_error_details(ctx).await?;
            }
            println!("\n{}", page.render());
            Ok(())
        }

        Command::Logs { job, build } => {
            if !gate(shell, "/", notifier).await? {
                return Ok(());
            }
            let token = ctx.token().await;
            match ctx.http_client.get_logs(&job, &build, token.as_deref()).await {
                Ok(response) => {
                    let log = response.log.filter(|l| !l.trim().is_empty());
                    println!("{}", log.as_deref().unwrap_or(NO_LOGS_FOUND));
                    Ok(())
                }
                Err(e) => {
                    ctx.handle_failure(&e).await;
                    notifier.notify(Notice::error(LOG_FETCH_FAILED));
                    Err(e)
                }
            }
        }
    }
}
