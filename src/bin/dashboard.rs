use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use therapist_dashboard::cli::{self, Args, Command};
use therapist_dashboard::config::AppConfig;
use therapist_dashboard::services::backend::http::HttpBackend;
use therapist_dashboard::services::dashboard::Dashboard;
use therapist_dashboard::services::render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = AppConfig::from_env();
    let backend_url = args.backend_url.unwrap_or(config.backend_url);
    let today = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    tracing::info!("using appointments backend at {backend_url}");
    let mut dashboard = Dashboard::new(Box::new(HttpBackend::new(backend_url)), today);

    println!("{}", render::render_header(&args.therapist));
    if let Err(e) = dashboard.load().await {
        println!("error: {e}");
    }
    println!("{}", render::render_dashboard(&dashboard));
    println!("Type help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => println!("{}", cli::execute(&mut dashboard, command).await),
            Err(usage) => println!("{usage}"),
        }
    }

    Ok(())
}
