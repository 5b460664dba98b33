use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "commentguard-server")]
#[command(
    author,
    version,
    about = "Fetch YouTube comments and flag toxic or sexist content"
)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "COMMENTGUARD_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Classifier configuration file (artifact paths, severity thresholds)
    #[arg(long)]
    pub classifiers: Option<PathBuf>,

    /// YouTube Data API key
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    pub youtube_api_key: Option<String>,

    /// Directory of static frontend files to serve
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Listen address
    #[arg(short = 'l', long, default_value = "0.0.0.0")]
    pub listen: String,

    /// Listen port
    #[arg(short = 'P', long, default_value = "5000")]
    pub port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
