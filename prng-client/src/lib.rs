use std::io::Write;

use anyhow::{Context, Result};
use prng_core::generator::time_seed;
use prng_core::{
    render_histogram, ChiSquareOutcome, ChiSquareTest, Histogram, LcgGenerator, LibraryGenerator,
    RenderOptions, UniformGenerator,
};
use prng_shared::{GeneratorKind, GeneratorReport, RunReport, RunSettings};

/// Width of the line separating generator reports
pub const DIVIDER_WIDTH: usize = 70;

/// Seeds handed to the two generators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seeds {
    pub lcg: i32,
    pub library: u64,
}

impl Seeds {
    /// Both generators seeded from the current Unix time
    pub fn from_time() -> Self {
        let now = time_seed();
        Self {
            lcg: now as i32,
            library: now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Histogram and test outcome for one generator
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub generator: GeneratorKind,
    pub histogram: Histogram,
    pub outcome: ChiSquareOutcome,
}

pub fn build_generator(kind: GeneratorKind, seeds: Seeds) -> Box<dyn UniformGenerator> {
    match kind {
        GeneratorKind::Lcg => Box::new(LcgGenerator::new(seeds.lcg)),
        GeneratorKind::Library => Box::new(LibraryGenerator::new(seeds.library)),
    }
}

/// Chi-square test over the equal-width buckets described by `settings`
pub fn build_test(settings: &RunSettings) -> Result<ChiSquareTest> {
    let bins = settings.tested_bins();
    let test = match settings.critical_value {
        Some(critical_value) => {
            ChiSquareTest::with_critical_value(bins, settings.interval_size, critical_value)
        }
        None => ChiSquareTest::with_significance(bins, settings.interval_size, settings.significance),
    };
    test.context("Failed to set up chi-square test")
}

/// Generate, bucket and test every generator in report order
pub fn evaluate(settings: &RunSettings, seeds: Seeds) -> Result<Vec<Evaluation>> {
    settings.validate().context("Invalid run settings")?;
    let test = build_test(settings)?;

    let samples: Vec<(GeneratorKind, Vec<f64>)> = GeneratorKind::ALL
        .iter()
        .map(|&kind| {
            let mut generator = build_generator(kind, seeds);
            let values = generator.generate(settings.sample_count);
            log::info!("Generated {} samples with {:?} generator", values.len(), kind);
            (kind, values)
        })
        .collect();

    samples
        .into_iter()
        .map(|(generator, values)| -> Result<Evaluation> {
            let histogram = Histogram::build(&values, settings.interval_size)
                .context("Failed to build histogram")?;
            let outcome = test
                .evaluate(&values)
                .with_context(|| format!("Chi-square test failed to run for {:?}", generator))?;

            log::debug!(
                "{:?}: chi-square {:.4}, critical value {:.4}, p-value {:?}",
                generator,
                outcome.statistic,
                outcome.critical_value,
                outcome.p_value
            );
            if !outcome.passed {
                log::warn!("{:?} generator rejected as non-uniform", generator);
            }

            Ok(Evaluation {
                generator,
                histogram,
                outcome,
            })
        })
        .collect()
}

pub fn build_report(settings: &RunSettings, seeds: Seeds, evaluations: &[Evaluation]) -> RunReport {
    RunReport {
        settings: settings.clone(),
        lcg_seed: seeds.lcg,
        library_seed: seeds.library,
        generators: evaluations
            .iter()
            .map(|evaluation| {
                GeneratorReport::new(
                    evaluation.generator,
                    evaluation.histogram.counts(),
                    &evaluation.outcome,
                )
            })
            .collect(),
    }
}

/// Label, histogram and verdict per generator, separated by a divider line
pub fn write_text_report<W: Write>(
    out: &mut W,
    evaluations: &[Evaluation],
    options: &RenderOptions,
) -> std::io::Result<()> {
    for (index, evaluation) in evaluations.iter().enumerate() {
        if index > 0 {
            writeln!(out, "{}", "*".repeat(DIVIDER_WIDTH))?;
        }
        writeln!(out, "{}", evaluation.generator.label())?;
        write!(out, "{}", render_histogram(&evaluation.histogram, options))?;
        writeln!(out, "{}", evaluation.outcome)?;
    }
    Ok(())
}

/// Run the whole pipeline and write the report to `out`
pub fn run<W: Write>(
    settings: &RunSettings,
    seeds: Seeds,
    format: OutputFormat,
    out: &mut W,
) -> Result<RunReport> {
    log::debug!("Running with {:?} and {:?}", settings, seeds);

    let evaluations = evaluate(settings, seeds)?;
    let report = build_report(settings, seeds, &evaluations);

    match format {
        OutputFormat::Text => {
            let options = RenderOptions {
                bar_width: settings.bar_width,
                ..RenderOptions::default()
            };
            write_text_report(out, &evaluations, &options).context("Failed to write report")?;
        }
        OutputFormat::Json => {
            let json = report.to_json().context("Failed to serialize report")?;
            writeln!(out, "{}", json).context("Failed to write report")?;
        }
    }

    Ok(report)
}
