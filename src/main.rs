use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use prime_spiral::viz_common::format_num;
use prime_spiral::{
    estimate_count_within_radius, plan_frame, Classifier, PrimeSieve, SieveSet, SpiralConfig,
    Variant, Viewport,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// Prime Spiral — primes laid out on an Archimedean spiral
#[derive(Parser)]
#[command(name = "prime-spiral", version, about)]
struct Cli {
    /// JSON config file; overrides --variant
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Preset to start from when no config file is given
    #[arg(long, value_enum, global = true)]
    variant: Option<Variant>,

    /// Log at debug level
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report whether each number is prime
    Query {
        #[arg(required = true)]
        numbers: Vec<u64>,
    },
    /// List the primes up to the configured bound
    Primes {
        /// Show only the last N primes (default: 20)
        #[arg(long, default_value_t = 20)]
        last: usize,

        /// Show all primes
        #[arg(long, default_value_t = false)]
        all: bool,
    },
    /// Prime and control sieve statistics
    Stats {
        /// Seed for the control sieve
        #[arg(long)]
        seed: Option<u64>,
    },
    /// How many numbers fit on a screen of the given size
    Estimate {
        #[arg(long, default_value_t = 1920.0)]
        width: f64,
        #[arg(long, default_value_t = 1080.0)]
        height: f64,
    },
    /// Plan one frame and print it
    Layout {
        #[arg(long, default_value_t = 1920.0)]
        width: f64,
        #[arg(long, default_value_t = 1080.0)]
        height: f64,

        /// Classify with the random control sieve
        #[arg(long, default_value_t = false)]
        random: bool,

        /// Seed for the control sieve
        #[arg(long)]
        seed: Option<u64>,

        /// Skip non-prime points
        #[arg(long, default_value_t = false)]
        only_primes: bool,

        /// Print the full frame as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = resolve_config(&cli)?;
    debug!(?config, "resolved config");

    match cli.command {
        Commands::Query { numbers } => cmd_query(&config, &numbers),
        Commands::Primes { last, all } => cmd_primes(&config, last, all),
        Commands::Stats { seed } => cmd_stats(&config, seed),
        Commands::Estimate { width, height } => cmd_estimate(&config, Viewport::new(width, height)),
        Commands::Layout {
            width,
            height,
            random,
            seed,
            only_primes,
            json,
        } => {
            let mut config = config;
            config.random_mode |= random;
            config.only_primes |= only_primes;
            if seed.is_some() {
                config.seed = seed;
            }
            cmd_layout(&config, Viewport::new(width, height), json)
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<SpiralConfig> {
    match &cli.config {
        Some(path) => SpiralConfig::load(path)
            .with_context(|| format!("loading config from {:?}", path)),
        None => Ok(SpiralConfig::for_variant(cli.variant.unwrap_or_default())),
    }
}

fn cmd_query(config: &SpiralConfig, numbers: &[u64]) -> Result<()> {
    let sieve = PrimeSieve::new(config.max_number)?;
    for &n in numbers {
        let prime = sieve
            .query(n)
            .with_context(|| format!("querying {}", n))?;
        println!("{:>10}  {}", n, if prime { "prime" } else { "not prime" });
    }
    Ok(())
}

fn cmd_primes(config: &SpiralConfig, last: usize, all: bool) -> Result<()> {
    let sieve = PrimeSieve::new(config.max_number)?;
    let primes: Vec<u64> = sieve.primes().collect();

    let entries = if all {
        &primes[..]
    } else {
        let start = primes.len().saturating_sub(last);
        &primes[start..]
    };

    if all {
        println!("All {} primes up to {}:\n", primes.len(), config.max_number);
    } else {
        println!(
            "Showing last {} of {} primes up to {}:\n",
            entries.len(),
            primes.len(),
            config.max_number
        );
    }
    for p in entries {
        println!("  {}", p);
    }
    Ok(())
}

fn cmd_stats(config: &SpiralConfig, seed: Option<u64>) -> Result<()> {
    let start = Instant::now();
    let sieves = SieveSet::new(config.max_number, seed.or(config.seed))?;
    info!("sieves built in {:.2?}", start.elapsed());

    let primes = sieves.primes();
    let control = sieves.control();

    println!("╔══════════════════════════════════════════╗");
    println!("║          Prime Spiral — Sieves           ║");
    println!("╠══════════════════════════════════════════╣");
    println!(
        "║  Bound:           {:>20}  ║",
        format_num(primes.max_number())
    );
    println!(
        "║  Primes:          {:>20}  ║",
        format_num(primes.prime_count())
    );
    println!("║  Prime density:   {:>20.6}  ║", primes.density());
    println!(
        "║  Control picks:   {:>20}  ║",
        format_num(control.selected_count())
    );
    println!("║  Control density: {:>20.6}  ║", control.density());
    println!("╚══════════════════════════════════════════╝");
    Ok(())
}

fn cmd_estimate(config: &SpiralConfig, viewport: Viewport) -> Result<()> {
    config.validate()?;
    let greatest = estimate_count_within_radius(
        config.step,
        config.radius_factor,
        viewport.diagonal(),
        config.max_number,
    )?;
    println!(
        "{} numbers fit within a {}x{} viewport (diagonal {})",
        format_num(greatest),
        viewport.width,
        viewport.height,
        viewport.diagonal()
    );
    if greatest >= config.detail_limit {
        println!(
            "Above the detail limit of {}: primes only, no glyphs, no guide curve.",
            format_num(config.detail_limit)
        );
    }
    Ok(())
}

fn cmd_layout(config: &SpiralConfig, viewport: Viewport, json: bool) -> Result<()> {
    let start = Instant::now();
    let sieves = SieveSet::from_config(config)?;
    let frame = plan_frame(config, sieves.classifier(config.random_mode), viewport)?;
    info!("frame planned in {:.2?}", start.elapsed());

    if json {
        println!("{}", serde_json::to_string_pretty(&frame)?);
        return Ok(());
    }

    let source = if config.random_mode { "random control" } else { "primes" };
    println!("Layout for {}x{} ({})", viewport.width, viewport.height, source);
    println!("  Visible numbers:  {}", format_num(frame.greatest));
    println!("  Placed points:    {}", format_num(frame.points.len() as u64));
    println!(
        "  Selected points:  {}",
        format_num(frame.prime_points().count() as u64)
    );
    println!("  Detailed:         {}", frame.detailed);
    println!(
        "  Style:            {}",
        if frame.glyphs { "glyphs" } else { "dots" }
    );
    match &frame.curve {
        Some(curve) => println!("  Guide curve:      {} vertices", format_num(curve.len() as u64)),
        None => println!("  Guide curve:      skipped"),
    }

    println!("\nFirst points:");
    for p in frame.points.iter().take(10) {
        println!(
            "  {:>6}  ({:>5}, {:>5})  {}",
            p.index,
            p.x,
            p.y,
            if p.is_prime { "*" } else { "" }
        );
    }
    Ok(())
}
