use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use sinkdial::config::Config;
use sinkdial::{group_by_device, SinkControl, SinkId, VolumePercent};

#[derive(Parser, Debug)]
#[command(name = "sinkdial")]
#[command(about = "List audio sinks and set their volume through pactl", long_about = None)]
struct Cli {
    #[arg(short, long)]
    verbose: bool,
    #[arg(long, env = "SINKDIAL_CONFIG")]
    config: Option<String>,
    /// Override the per-invocation pactl timeout in milliseconds.
    #[arg(long)]
    timeout: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List sinks grouped by device
    List(ListOpts),
    /// Set one sink's volume
    SetVolume(SetVolumeOpts),
    /// Print the effective configuration as TOML
    Config,
    /// Generate shell completions
    Completions(CompletionsOpts),
}

#[derive(clap::Args, Debug)]
struct ListOpts {
    /// Emit the sink list as JSON instead of a grouped listing
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args, Debug)]
struct SetVolumeOpts {
    /// Numeric sink id as reported by `sinkdial list`
    sink: SinkId,
    /// Target volume, 0 to 100
    #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
    percent: u8,
}

#[derive(clap::Args, Debug)]
struct CompletionsOpts {
    shell: Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO })
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(std::path::PathBuf::from(
            shellexpand::tilde(path).into_owned(),
        ))?,
        None => Config::load().unwrap_or_else(|_| Config::default()),
    };
    if let Some(ms) = cli.timeout {
        config.pactl.timeout_ms = ms;
    }

    match cli.command {
        Commands::List(opts) => run_list(&config, opts).await?,
        Commands::SetVolume(opts) => run_set_volume(&config, opts).await?,
        Commands::Config => print!("{}", toml::to_string_pretty(&config)?),
        Commands::Completions(opts) => {
            clap_complete::generate(
                opts.shell,
                &mut Cli::command(),
                "sinkdial",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

async fn run_list(config: &Config, opts: ListOpts) -> Result<()> {
    let client = config.client();
    let sinks = client.list_sinks().await?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&sinks)?);
        return Ok(());
    }

    if sinks.is_empty() {
        println!("No sinks reported by {}.", config.pactl.binary);
        return Ok(());
    }

    for group in group_by_device(&sinks) {
        println!("{}", group.device);
        for sink in &group.sinks {
            println!("  [{}] {}: {}", sink.id, sink.label, sink.volume);
        }
    }

    Ok(())
}

async fn run_set_volume(config: &Config, opts: SetVolumeOpts) -> Result<()> {
    let client = config.client();
    let volume = VolumePercent::new(opts.percent);
    client.set_volume(opts.sink, volume).await?;
    println!("Sink {} set to {}", opts.sink, volume);
    Ok(())
}
