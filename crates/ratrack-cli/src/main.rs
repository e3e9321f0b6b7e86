use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use ratrack_cli::app::show_config;
use ratrack_cli::output::print_output;
use ratrack_cli::{App, CommandOutput, CompareInput, OutputFormat};
use ratrack_cloud::ScoringClient;
use ratrack_core::config::{CliOverrides, RatrackConfig};
use ratrack_core::errors::{ErrorCode, RatrackError};
use ratrack_core::models::{Gender, LabValues, Role};

#[derive(Parser)]
#[command(name = "ratrack")]
#[command(about = "RA Track - rheumatoid arthritis risk tracking", long_about = None)]
#[command(version)]
struct Cli {
    /// Output format (json, pretty)
    #[arg(short, long, global = true, default_value = "pretty")]
    output: OutputFormat,

    /// Config file to use instead of ./ratrack.toml
    #[arg(long, global = true, env = "RATRACK_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database path
    #[arg(long, global = true)]
    db: Option<String>,

    /// Scoring backend base URL
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cache a signed-in user
    Login {
        #[arg(long)]
        uid: String,

        #[arg(long, value_enum)]
        role: RoleArg,

        #[arg(long)]
        email: Option<String>,

        /// Keep the user signed in across invocations
        #[arg(long)]
        remember: bool,
    },

    /// Forget the signed-in user
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Evaluate route guards for a path
    Navigate {
        path: String,
    },

    /// Admin flag maintenance
    #[command(subcommand)]
    Admin(AdminCommands),

    /// Lab entries
    #[command(subcommand)]
    Labs(LabsCommands),

    /// Compare current lab values with the latest recorded entry
    Compare {
        /// Months since the last test
        #[arg(long)]
        months: String,

        /// Current age; estimated from the last entry when omitted
        #[arg(long)]
        age: Option<String>,

        #[arg(long, default_value = "")]
        gender: String,

        #[arg(long)]
        esr: String,

        #[arg(long)]
        crp: String,

        #[arg(long)]
        rf: String,

        #[arg(long = "anti-ccp")]
        anti_ccp: String,
    },

    /// Configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Mark a user as admin
    Grant { uid: String },

    /// Remove a user's admin flag
    Revoke { uid: String },
}

#[derive(Subcommand)]
enum LabsCommands {
    /// Record a new lab entry
    Add {
        /// Owner uid; defaults to the signed-in user
        #[arg(long)]
        user: Option<String>,

        #[arg(long)]
        age: f64,

        #[arg(long)]
        gender: String,

        #[arg(long)]
        esr: f64,

        #[arg(long)]
        crp: f64,

        #[arg(long)]
        rf: f64,

        #[arg(long = "anti-ccp")]
        anti_ccp: f64,

        /// Target collection; defaults to the first configured one
        #[arg(long)]
        collection: Option<String>,
    },

    /// Show the latest lab entry
    Latest {
        #[arg(long)]
        user: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the resolved configuration
    Show,
}

#[derive(Clone, ValueEnum)]
enum RoleArg {
    Patient,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Patient => Role::Patient,
            RoleArg::Admin => Role::Admin,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        config_path: cli.config.clone(),
        backend_url: cli.backend.clone(),
        db_path: cli.db.clone(),
        log_level: cli.log_level.clone(),
    };
    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let config =
        RatrackConfig::load(&cwd, Some(&overrides)).context("Failed to load configuration")?;
    ratrack_core::tracing::init_tracing_with(&config.observability);

    match execute_command(&cli, config) {
        Ok(output) => {
            print_output(cli.output, &output)?;
            Ok(())
        }
        Err(e) => {
            match e.downcast_ref::<RatrackError>() {
                Some(inner) => eprintln!("Error: {e:#} [{}]", inner.error_code()),
                None => eprintln!("Error: {e:#}"),
            }
            std::process::exit(1);
        }
    }
}

fn execute_command(cli: &Cli, config: RatrackConfig) -> Result<CommandOutput> {
    if let Commands::Config(ConfigCommands::Show) = &cli.command {
        // No database needed to show config.
        return show_config(&config);
    }

    let app = App::open(config)?;
    match &cli.command {
        Commands::Login {
            uid,
            role,
            email,
            remember,
        } => app.login(uid, role.clone().into(), email.as_deref(), *remember),
        Commands::Logout => app.logout(),
        Commands::Whoami => app.whoami(),
        Commands::Navigate { path } => app.navigate(path),
        Commands::Admin(AdminCommands::Grant { uid }) => app.admin_grant(uid),
        Commands::Admin(AdminCommands::Revoke { uid }) => app.admin_revoke(uid),
        Commands::Labs(LabsCommands::Add {
            user,
            age,
            gender,
            esr,
            crp,
            rf,
            anti_ccp,
            collection,
        }) => {
            let values = LabValues {
                age: *age,
                gender: Gender::normalize(Some(gender.as_str())),
                esr: *esr,
                crp: *crp,
                rf: *rf,
                anti_ccp: *anti_ccp,
            };
            app.labs_add(user.as_deref(), &values, collection.as_deref())
        }
        Commands::Labs(LabsCommands::Latest { user }) => app.labs_latest(user.as_deref()),
        Commands::Compare {
            months,
            age,
            gender,
            esr,
            crp,
            rf,
            anti_ccp,
        } => {
            let scorer = ScoringClient::from_config(&app.config().backend)?;
            let input = CompareInput {
                months: months.clone(),
                age: age.clone(),
                gender: gender.clone(),
                esr: esr.clone(),
                crp: crp.clone(),
                rf: rf.clone(),
                anti_ccp: anti_ccp.clone(),
            };
            app.compare(&scorer, &input)
        }
        Commands::Config(ConfigCommands::Show) => app.config_show(),
    }
}
