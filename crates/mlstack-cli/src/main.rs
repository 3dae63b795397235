//! mlstack CLI
//!
//! Command-line interface for classifying instance types and selecting
//! inference images.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// mlstack - inference image selection for SageMaker deployments
#[derive(Parser, Debug)]
#[command(name = "mlstack")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Deployment region (overrides AWS_REGION and the config file)
    #[arg(long, global = true)]
    region: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify instance types as accelerator or standard
    Classify {
        /// Instance types (e.g., ml.g4dn.xlarge)
        #[arg(required = true)]
        instance_types: Vec<String>,
    },

    /// Print the inference image URI
    ImageUri {
        /// Instance type to select the image for (defaults to config)
        #[arg(long, conflicts_with_all = ["gpu", "cpu"])]
        instance_type: Option<String>,

        /// Force the GPU image
        #[arg(long, conflicts_with = "cpu")]
        gpu: bool,

        /// Force the CPU image
        #[arg(long)]
        cpu: bool,
    },

    /// Print the primary container definition as JSON
    Container {
        /// Hugging Face Hub model id
        #[arg(long)]
        model_id: String,

        /// Pipeline task (e.g., text2text-generation)
        #[arg(long)]
        task: String,

        /// Instance type (defaults to config)
        #[arg(long)]
        instance_type: Option<String>,

        /// Extra environment entries as KEY=VALUE
        #[arg(long = "env", value_parser = commands::parse_env_pair)]
        env: Vec<(String, String)>,
    },

    /// Show the effective configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = commands::load_config(cli.config.as_deref())?;

    // Initialize logging
    let default_level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let region = cli.region.as_deref();

    match cli.command {
        Commands::Classify { instance_types } => {
            commands::classify(&instance_types)?;
        }
        Commands::ImageUri {
            instance_type,
            gpu,
            cpu,
        } => {
            let selection = commands::ImageSelection::from_flags(instance_type, gpu, cpu);
            commands::image_uri(&config, region, selection)?;
        }
        Commands::Container {
            model_id,
            task,
            instance_type,
            env,
        } => {
            commands::container(&config, region, instance_type, &model_id, &task, env)?;
        }
        Commands::Config => {
            commands::show_config(&config)?;
        }
    }

    Ok(())
}
