use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use issueboard::api::{Api, HttpClient};
use issueboard::commands::{self, issues::IssueInput, TerminalUi};
use issueboard::config::{ClientConfig, ENV_API_BASE_URL};

#[derive(Parser)]
#[command(name = "issueboard")]
#[command(about = "Browse and edit projects, issues and comments on a tracker server")]
#[command(version)]
struct Cli {
    /// Base URL of the tracker API
    #[arg(long, global = true, env = ENV_API_BASE_URL)]
    api_url: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project commands
    Projects {
        #[command(subcommand)]
        action: ProjectCommands,
    },

    /// Issue commands
    Issues {
        #[command(subcommand)]
        action: IssueCommands,
    },

    /// Comment commands
    Comments {
        #[command(subcommand)]
        action: CommentCommands,
    },
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// List all projects
    List,
    /// Show a project and its issues
    Show {
        /// Project ID
        id: i64,
    },
    /// Create a project
    Create {
        /// Project name
        name: String,
    },
    /// Rename a project
    Edit {
        /// Project ID
        id: i64,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Delete a project
    Delete {
        /// Project ID
        id: i64,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum IssueCommands {
    /// List a project's issues
    List {
        /// Project ID
        project: i64,
    },
    /// Show an issue with its comments
    Show {
        /// Project ID
        project: i64,
        /// Issue ID
        id: i64,
    },
    /// Create an issue
    Create {
        /// Project ID
        project: i64,
        /// Issue title
        #[arg(short, long)]
        title: String,
        /// Assignee
        #[arg(short, long)]
        assigned_to: String,
        /// Issue description
        #[arg(short, long)]
        description: Option<String>,
        /// Status (to_do, active, on_hold, resolved)
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Update an issue
    Edit {
        /// Project ID
        project: i64,
        /// Issue ID
        id: i64,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New assignee
        #[arg(short, long)]
        assigned_to: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New status
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Delete an issue
    Delete {
        /// Project ID
        project: i64,
        /// Issue ID
        id: i64,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum CommentCommands {
    /// List an issue's comments
    List {
        /// Issue ID
        issue: i64,
    },
    /// Add a comment to an issue
    Add {
        /// Issue ID
        issue: i64,
        /// Comment text
        text: String,
    },
    /// Delete a comment
    Delete {
        /// Issue ID
        issue: i64,
        /// Comment ID
        id: i64,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

impl Commands {
    fn force(&self) -> bool {
        matches!(
            self,
            Commands::Projects {
                action: ProjectCommands::Delete { force: true, .. }
            } | Commands::Issues {
                action: IssueCommands::Delete { force: true, .. }
            } | Commands::Comments {
                action: CommentCommands::Delete { force: true, .. }
            }
        )
    }
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(api: &Api, ui: &TerminalUi, command: Commands) -> Result<String> {
    match command {
        Commands::Projects { action } => match action {
            ProjectCommands::List => commands::projects::list(api).await,
            ProjectCommands::Show { id } => commands::projects::show(api, id).await,
            ProjectCommands::Create { name } => {
                commands::projects::create(api, ui, &name).await?;
                Ok(String::new())
            }
            ProjectCommands::Edit { id, name } => {
                commands::projects::edit(api, ui, id, name.as_deref()).await
            }
            ProjectCommands::Delete { id, .. } => commands::projects::delete(api, ui, id).await,
        },

        Commands::Issues { action } => match action {
            IssueCommands::List { project } => commands::issues::list(api, project).await,
            IssueCommands::Show { project, id } => commands::issues::show(api, project, id).await,
            IssueCommands::Create {
                project,
                title,
                assigned_to,
                description,
                status,
            } => {
                let input = IssueInput {
                    title: Some(&title),
                    assigned_to: Some(&assigned_to),
                    description: description.as_deref(),
                    status: status.as_deref(),
                };
                commands::issues::create(api, ui, project, &input).await?;
                Ok(String::new())
            }
            IssueCommands::Edit {
                project,
                id,
                title,
                assigned_to,
                description,
                status,
            } => {
                let input = IssueInput {
                    title: title.as_deref(),
                    assigned_to: assigned_to.as_deref(),
                    description: description.as_deref(),
                    status: status.as_deref(),
                };
                commands::issues::edit(api, ui, project, id, &input).await
            }
            IssueCommands::Delete { project, id, .. } => {
                commands::issues::delete(api, ui, project, id).await
            }
        },

        Commands::Comments { action } => match action {
            CommentCommands::List { issue } => commands::comments::list(api, issue).await,
            CommentCommands::Add { issue, text } => {
                commands::comments::add(api, issue, &text).await
            }
            CommentCommands::Delete { issue, id, .. } => {
                commands::comments::delete(api, ui, issue, id).await
            }
        },
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let config = match cli.api_url.as_deref() {
        Some(url) => ClientConfig::new(url),
        None => ClientConfig::global().clone(),
    };
    let api = Api::new(HttpClient::from_config(&config)?);
    let ui = TerminalUi::new(cli.command.force());

    let output = run(&api, &ui, cli.command).await?;
    if !output.is_empty() {
        println!("{}", output);
    }

    if let Some(path) = ui.take_navigation() {
        let view = commands::show_route(&api, &path).await?;
        if !view.is_empty() {
            println!("{}", view);
        }
    }
    Ok(())
}
