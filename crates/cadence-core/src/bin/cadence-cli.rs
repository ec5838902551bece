use std::path::PathBuf;

use anyhow::{Context, bail};
use cadence_core::{
    CadenceConfig, EffectiveValueResolver, Position, SongDocument, Viewport,
    build_element_timeline, default_payload,
    diagnostics::init_tracing_with_config,
    element::AnyValue,
    fixtures::demo_song,
    persistence::{load_song, save_measure_map, save_song},
    property::is_font_size,
};
use clap::{Parser, Subcommand};

const MAX_SAMPLES: f64 = 100_000.0;

#[derive(Debug, Parser)]
#[command(name = "cadence-cli")]
#[command(about = "Headless tools for sampling musical-time keyframe timelines")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Overrides the configured log directory.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Writes the demo song and its measure map.
    Demo {
        #[arg(long, default_value = "data/demo")]
        output_dir: PathBuf,
    },
    /// Rebuilds one element and prints a property's playback value per position.
    Sample {
        #[arg(long)]
        song: PathBuf,
        #[arg(long)]
        element: String,
        #[arg(long)]
        property: String,
        /// Sampling step in measures; defaults to the configured step.
        #[arg(long)]
        step: Option<f64>,
        /// Treat media as playing so play/pause state animates.
        #[arg(long)]
        playing: bool,
    },
    /// Prints the editor preview of a property at every authored note.
    Preview {
        #[arg(long)]
        song: PathBuf,
        #[arg(long)]
        element: String,
        #[arg(long)]
        property: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = CadenceConfig::load_or_default();
    if let Some(log_dir) = cli.log_dir {
        config.diagnostics.logs_dir = log_dir;
    }
    let _telemetry = init_tracing_with_config(&config.diagnostics)?;

    match cli.command {
        Commands::Demo { output_dir } => {
            let song = demo_song();
            save_song(&output_dir.join("demo.cadence.json"), &song)?;
            save_measure_map(&output_dir.join("measures.json"), &song.measures)?;
            tracing::info!(path = %output_dir.display(), "demo song written");
        }
        Commands::Sample {
            song,
            element,
            property,
            step,
            playing,
        } => {
            let song = load_song(&song)?;
            let step = step.unwrap_or(config.preview.sampling_step);
            sample(&song, &element, &property, step, playing, &config)?;
        }
        Commands::Preview {
            song,
            element,
            property,
        } => {
            let song = load_song(&song)?;
            preview(&song, &element, &property)?;
        }
    }

    Ok(())
}

fn sample(
    song: &SongDocument,
    element_id: &str,
    property_id: &str,
    step: f64,
    playing: bool,
    config: &CadenceConfig,
) -> anyhow::Result<()> {
    let element = song
        .element(element_id)
        .with_context(|| format!("element `{element_id}` not found"))?;
    let (mut timeline, report) = build_element_timeline(element, &song.measures);
    tracing::info!(?report, "element rebuilt");
    if timeline.value(property_id).is_none() {
        bail!("element `{element_id}` has no property `{property_id}`");
    }

    let viewport = Viewport::root(config.preview.viewport_width, config.preview.viewport_height)
        .with_font_sizes(config.preview.root_font_size, config.preview.root_font_size);
    let font_relative = is_font_size(property_id);
    #[allow(clippy::cast_precision_loss)]
    let measure_count = song.measures.len() as f64;

    for ordinal in sample_ordinals(measure_count, step)? {
        let position = position_at(ordinal)?;
        timeline.apply_events(position, playing);
        if let Some(value) = timeline.value(property_id) {
            let pixels = match value {
                AnyValue::Size(size) if font_relative => size.font_pixel_value(&viewport),
                AnyValue::Size(size) => size.pixel_value(&viewport),
                _ => None,
            }
            .map(|pixels| format!(" ({pixels}px)"))
            .unwrap_or_default();
            println!("{position}\t{}{pixels}", value.css_value());
        }
        timeline.mark_all_rendered();
    }
    Ok(())
}

fn preview(song: &SongDocument, element_id: &str, property_id: &str) -> anyhow::Result<()> {
    let element = song
        .element(element_id)
        .with_context(|| format!("element `{element_id}` not found"))?;
    let default = default_payload(property_id)
        .with_context(|| format!("unknown property `{property_id}`"))?;

    let resolver = EffectiveValueResolver::new(&element.events);
    for (index, note) in resolver.notes().iter().enumerate() {
        let value = resolver.effective_value(index, property_id, &default)?;
        println!("{}\t{}", note.id, value.css_value());
    }
    Ok(())
}

fn sample_ordinals(measure_count: f64, step: f64) -> anyhow::Result<Vec<f64>> {
    if !(step.is_finite() && step > 0.0) {
        bail!("sampling step must be a positive number of measures, got {step}");
    }
    let samples = (measure_count / step).ceil();
    if samples > MAX_SAMPLES {
        bail!("sampling step {step} yields more than {MAX_SAMPLES} samples");
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let samples = samples as u32;
    Ok((0..samples).map(|sample| f64::from(sample) * step).collect())
}

fn position_at(ordinal: f64) -> anyhow::Result<Position> {
    let measure = ordinal.floor();
    let progress = (ordinal - measure).clamp(0.0, 1.0 - f64::EPSILON);
    Ok(Position::from_raw_index(measure, progress)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_covers_every_measure() {
        let ordinals = sample_ordinals(2.0, 0.5).expect("valid step");
        assert_eq!(ordinals, [0.0, 0.5, 1.0, 1.5]);
    }

    #[test]
    fn degenerate_steps_are_rejected() {
        assert!(sample_ordinals(4.0, 1e-300).is_err());
        assert!(sample_ordinals(4.0, 0.0).is_err());
        assert!(sample_ordinals(4.0, f64::NAN).is_err());
    }
}
