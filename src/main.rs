use clap::Parser;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use estate_server::config::AppConfig;
use estate_server::startup;

#[derive(Parser, Debug)]
#[command(name = "estate-server")]
#[command(about = "Real-estate listing API server")]
struct Args {
    /// Configuration file path (default: config.yaml)
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Port to listen on (overrides config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (overrides config file)
    #[arg(long)]
    host: Option<String>,

    /// Session token signing secret (overrides config file)
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt::init();

    // Load configuration from specified file or use defaults
    let mut app_config =
        if args.config == "config.yaml" && !std::path::Path::new("config.yaml").exists() {
            println!("⚠️  No config.yaml found, using default configuration:");
            println!("   - In-memory SQLite database");
            println!("   - Development signing secret (set JWT_SECRET in production)");
            println!("   - bcrypt password hashing\n");
            AppConfig::default_config()
        } else {
            AppConfig::load_from_file(&args.config)
                .map_err(|e| format!("Failed to load configuration: {}", e))?
        };

    if let Some(port) = args.port {
        app_config.server.port = port;
    }
    if let Some(host) = args.host {
        app_config.server.host = host;
    }
    if let Some(secret) = args.jwt_secret {
        app_config.auth.jwt_secret = secret;
    }

    if let Some(db_config) = &app_config.backend.database {
        tracing::info!("Backend: database/{}", db_config.db_type);
    }

    let host: std::net::IpAddr = app_config.server.host.parse().unwrap_or_else(|_| {
        eprintln!(
            "Invalid host address: {}, using 127.0.0.1",
            app_config.server.host
        );
        [127, 0, 0, 1].into()
    });
    let addr = SocketAddr::from((host, app_config.server.port));

    let app = startup::build_app(app_config).await?;

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listing API listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
