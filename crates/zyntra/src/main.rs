use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use zyntra::cli::{commands, Context, OutputFormat};

#[derive(Parser)]
#[command(name = "zyntra")]
#[command(author, version, about = "Grow a digital forest with your wellness habits", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(short, long, global = true, default_value = "table")]
    format: OutputFormat,

    /// Profile to use
    #[arg(short, long, global = true, env = "ZYNTRA_PROFILE")]
    profile: Option<String>,

    /// Auth service base URL
    #[arg(long, global = true, env = "ZYNTRA_AUTH_URL")]
    auth_url: Option<String>,

    /// Wellness API base URL
    #[arg(long, global = true, env = "ZYNTRA_API_URL")]
    api_url: Option<String>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Authentication commands
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Show the wellness forest
    Forest {
        /// Seed for tree placement
        #[arg(long)]
        seed: Option<u64>,
        /// Skip the backend and use the local scene
        #[arg(long)]
        offline: bool,
        /// Also sample the animation at this many seconds
        #[arg(long)]
        at: Option<f64>,
    },
    /// AI wellness recommendations
    Insights,
    /// Gait recognition commands
    Gait {
        #[command(subcommand)]
        command: GaitCommands,
    },
    /// Posture detection commands
    Posture {
        #[command(subcommand)]
        command: PostureCommands,
    },
    /// Admin commands
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
    /// Interactive session: log activities and watch the forest grow
    Session {
        /// Seed for chat replies and scenes
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Subcommand)]
enum AuthCommands {
    /// Sign in
    Login {
        /// Email address
        #[arg(short, long, env = "ZYNTRA_EMAIL")]
        email: Option<String>,
        /// Keep the session after logout of this shell
        #[arg(long)]
        remember: bool,
    },
    /// Create an account
    Register {
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Username
        #[arg(short, long)]
        username: String,
        /// Full name
        #[arg(long)]
        full_name: String,
        /// Admin to register under
        #[arg(long)]
        admin_id: Option<i64>,
    },
    /// Logout and clear credentials
    Logout,
    /// Show authentication status
    Status,
}

#[derive(Subcommand)]
enum GaitCommands {
    /// Upload a video and wait for recognition
    Analyze {
        /// Video file
        file: PathBuf,
    },
    /// Show your gait profile
    Profile,
    /// Show enrollment status
    ProfileStatus,
    /// Delete your gait profile
    DeleteProfile {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum PostureCommands {
    /// Analyze posture in a video
    Analyze {
        /// Video file
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// List your employees
    Employees,
    /// Team wellness overview
    Dashboard,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "zyntra=warn",
        1 => "zyntra=info",
        _ => "zyntra=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> zyntra::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = Context {
        profile: cli.profile,
        auth_url: cli.auth_url,
        api_url: cli.api_url,
        format: cli.format,
    };

    let result = match cli.command {
        Commands::Auth { command } => match command {
            AuthCommands::Login { email, remember } => {
                commands::login(&ctx, email, remember).await
            }
            AuthCommands::Register {
                email,
                username,
                full_name,
                admin_id,
            } => commands::register(&ctx, email, username, full_name, admin_id).await,
            AuthCommands::Logout => commands::logout(&ctx).await,
            AuthCommands::Status => commands::status(&ctx).await,
        },
        Commands::Forest { seed, offline, at } => {
            commands::forest::show(&ctx, seed, offline, at).await
        }
        Commands::Insights => commands::insights::show(&ctx).await,
        Commands::Gait { command } => match command {
            GaitCommands::Analyze { file } => commands::gait::analyze(&ctx, file).await,
            GaitCommands::Profile => commands::gait::profile(&ctx).await,
            GaitCommands::ProfileStatus => commands::gait::profile_status(&ctx).await,
            GaitCommands::DeleteProfile { yes } => {
                commands::gait::delete_profile(&ctx, yes).await
            }
        },
        Commands::Posture { command } => match command {
            PostureCommands::Analyze { file } => commands::posture::analyze(&ctx, file).await,
        },
        Commands::Admin { command } => match command {
            AdminCommands::Employees => commands::admin::employees(&ctx).await,
            AdminCommands::Dashboard => commands::admin::dashboard(&ctx).await,
        },
        Commands::Session { seed } => commands::session::run(&ctx, seed).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e.user_message());
        std::process::exit(1);
    }

    Ok(())
}
