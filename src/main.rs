//! Heart rate estimation service: analyze a single video or serve uploads over HTTP.

use anyhow::{Context, Result};
use clap::Parser;
use heart_rate_estimation::{
    config::{Config, EXAMPLE_CONFIG},
    heart_rate::RateFormula,
    pipeline::{degrade_to_fallback, PulsePipeline},
    server, video,
};
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Video file to analyze (prints the result and exits instead of serving)
    #[arg(short, long)]
    video: Option<String>,

    /// Address to listen on when serving
    #[arg(short, long)]
    bind: Option<String>,

    /// Moving average window size in frames
    #[arg(short, long)]
    window: Option<usize>,

    /// Threshold sensitivity k in mean + k * std
    #[arg(short, long, allow_hyphen_values = true)]
    sensitivity: Option<f64>,

    /// Interval-to-rate conversion (scaled_interval, frequency)
    #[arg(short, long)]
    rate_formula: Option<String>,

    /// Stop decoding after this many frames
    #[arg(long)]
    max_frames: Option<usize>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_config: bool,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Command line flags take precedence over the file
    if let Some(bind) = args.bind {
        config.server.bind_address = bind;
    }
    if let Some(window) = args.window {
        config.pipeline.window_size = window;
    }
    if let Some(sensitivity) = args.sensitivity {
        config.pipeline.sensitivity = sensitivity;
    }
    if let Some(formula) = args.rate_formula {
        config.pipeline.rate_formula = formula.parse::<RateFormula>()?;
    }
    if let Some(max_frames) = args.max_frames {
        config.video.max_frames = Some(max_frames);
    }
    config.validate()?;

    if let Some(video_path) = args.video {
        let pipeline = PulsePipeline::from_config(&config.pipeline)?;
        info!("Analyzing video file: {}", video_path);

        let estimate = degrade_to_fallback(video::analyze_video(&video_path, &pipeline, config.video.max_frames));
        println!("{}", serde_json::to_string(&estimate)?);
        return Ok(());
    }

    info!("Heart Rate Estimation service");
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(server::serve(&config))?;

    Ok(())
}
