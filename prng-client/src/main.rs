use anyhow::{Context, Result};
use clap::Parser;
use prng_client::{OutputFormat, Seeds};
use prng_shared::RunSettings;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Histogram and chi-square uniformity check for a linear congruential generator",
    long_about = None
)]
struct Args {
    /// Number of values drawn from each generator
    #[arg(short = 'n', long, default_value_t = prng_core::DEFAULT_SAMPLE_COUNT)]
    samples: usize,

    /// Width of each histogram bucket; must split [0, 1) into equal buckets
    #[arg(short, long, default_value_t = prng_core::DEFAULT_INTERVAL_SIZE)]
    interval_size: f64,

    /// Significance level used to derive the critical value
    #[arg(short = 'a', long, default_value_t = prng_core::DEFAULT_SIGNIFICANCE)]
    significance: f64,

    /// Use this critical value instead of deriving one from the significance level
    #[arg(short, long)]
    critical_value: Option<f64>,

    /// Length of the longest histogram bar
    #[arg(short = 'w', long, default_value_t = prng_core::DEFAULT_BAR_WIDTH)]
    bar_width: usize,

    /// Seed for the linear congruential generator (defaults to the current time)
    #[arg(long, allow_hyphen_values = true)]
    lcg_seed: Option<i32>,

    /// Seed for the library generator (defaults to the current time)
    #[arg(long)]
    library_seed: Option<u64>,

    /// Print the run report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn settings(&self) -> RunSettings {
        RunSettings {
            sample_count: self.samples,
            interval_size: self.interval_size,
            significance: self.significance,
            critical_value: self.critical_value,
            bar_width: self.bar_width,
        }
    }

    fn seeds(&self) -> Seeds {
        let now = Seeds::from_time();
        Seeds {
            lcg: self.lcg_seed.unwrap_or(now.lcg),
            library: self.library_seed.unwrap_or(now.library),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let seeds = args.seeds();
    log::info!("PRNG check starting...");
    log::info!("LCG seed: {}, library seed: {}", seeds.lcg, seeds.library);

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = prng_client::run(&args.settings(), seeds, format, &mut out)
        .context("Validation run failed")?;

    log::info!(
        "Finished: {}",
        if report.all_passed() {
            "every generator passed"
        } else {
            "at least one generator failed"
        }
    );

    Ok(())
}
