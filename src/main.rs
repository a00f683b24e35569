/*!
 * Clusterdash CLI - Command Line Interface
 */

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clusterdash::{
    api_client,
    error::{EXIT_FAILURE, EXIT_SUCCESS},
    logging, AppContext, BrowserLocation, DashConfig, DashError, DashboardRouter,
    ExistingClusterSection, Navigator, ProjectApi, ProjectStore,
};

#[derive(Parser)]
#[command(name = "clusterdash")]
#[command(
    version,
    about = "Cluster dashboard client: route resolution and project management",
    long_about = None
)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// API bearer token (overrides config)
    #[arg(long, env = "CLUSTERDASH_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// Signed-in user id (overrides config)
    #[arg(long, global = true)]
    user_id: Option<i64>,

    /// Verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a path to the dashboard view it renders
    Route {
        /// Path to resolve, e.g. /cluster-dashboard/node-view/abc
        path: String,

        /// Dashboard mount point (overrides config)
        #[arg(long)]
        base: Option<String>,
    },

    /// List the projects of the configured user as JSON
    Projects,

    /// Create a project, select it and navigate to the overview
    CreateProject {
        /// Project name (letters and digits only)
        name: String,

        /// Location the form is submitted from
        #[arg(long, default_value = "/new-project")]
        location: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let code = match run(cli).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.downcast_ref::<DashError>()
                .map(DashError::exit_code)
                .unwrap_or(EXIT_FAILURE)
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    logging::init_logging(&config)?;
    tracing::debug!(api_url = %config.api_url, user_id = config.user_id, "Configuration loaded");

    match cli.command {
        Commands::Route { path, base } => {
            let router = DashboardRouter::new(base.unwrap_or(config.dashboard_base));
            let route = router.resolve(&path).ok_or_else(|| DashError::Unrouted {
                base: router.base().to_string(),
                path: path.clone(),
            })?;
            println!("{}", route);
        }

        Commands::Projects => {
            let api = api_client(&config)?;
            let list = api.get_projects(config.user_id).await?;
            println!("{}", serde_json::to_string_pretty(&list.data.unwrap_or_default())?);
        }

        Commands::CreateProject { name, location } => {
            let api = api_client(&config)?;
            let mut section = ExistingClusterSection::new(
                api,
                AppContext::new(config.user_id),
                BrowserLocation::new(&location),
                name,
            );

            let outcome = section.on_create_project().await?;
            println!("outcome:  {:?}", outcome);
            println!("status:   {}", section.status().label());
            println!("location: {}", section.navigator().location());
            match section.store().current_project() {
                Some(project) => println!("current:  {} ({})", project.name, project.id),
                None => println!("current:  none"),
            }
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> clusterdash::Result<DashConfig> {
    let mut config = match &cli.config {
        Some(path) => DashConfig::load(path)?,
        None => DashConfig::default(),
    };

    if let Some(url) = &cli.api_url {
        config.api_url = url.clone();
    }
    if let Some(token) = &cli.token {
        config.token = Some(token.clone());
    }
    if let Some(user_id) = cli.user_id {
        config.user_id = user_id;
    }
    if cli.verbose {
        config.verbose = true;
    }

    config.validate()?;
    Ok(config)
}
