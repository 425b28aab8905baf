mod analysis;
mod audio;
mod cli;
mod config;
mod effects;
mod error;
mod export;
mod prompt;
mod spectral;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{Stdout, StdinLock};
use std::path::Path;

use analysis::features::{energy_series, frame_times, zcr_series};
use analysis::framing::Framer;
use analysis::segments::find_segments;
use audio::decode::decode_signal;
use audio::signal::Signal;
use audio::wav::write_signal;
use cli::{Cli, Command, EditPolicy, FeatureArgs, IntervalArgs};
use config::Config;
use effects::fade::{apply_fade, fade_sample_count, FadeShape};
use export::{FeatureReport, FeatureTrack, SpectrumReport, SpectrumTrack};
use prompt::{format_timestamp, Prompter};
use spectral::edit::SpectralEdit;
use spectral::SpectralEngine;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Feature {
    Energy,
    Zcr,
}

impl Feature {
    fn name(self) -> &'static str {
        match self {
            Feature::Energy => "energy",
            Feature::Zcr => "zcr",
        }
    }
}

/// Resolves parameters from the command line, the user, or the config, in that order.
struct Session {
    cfg: Config,
    prompter: Option<Prompter<StdinLock<'static>, Stdout>>,
}

impl Session {
    fn frame_ms(&mut self, arg: Option<u32>) -> Result<u32> {
        match (arg, self.prompter.as_mut()) {
            (Some(v), _) => Ok(v),
            (None, Some(p)) => p.frame_length_ms(),
            (None, None) => Ok(self.cfg.analysis.frame_ms),
        }
    }

    fn step(&mut self, arg: Option<f64>) -> Result<f64> {
        match (arg, self.prompter.as_mut()) {
            (Some(v), _) => Ok(v),
            (None, Some(p)) => p.step(),
            (None, None) => Ok(self.cfg.analysis.step),
        }
    }

    fn fade_ms(&mut self, arg: Option<u32>) -> Result<u32> {
        match (arg, self.prompter.as_mut()) {
            (Some(v), _) => Ok(v),
            (None, Some(p)) => p.fade_length_ms(),
            (None, None) => Ok(self.cfg.fade.duration_ms),
        }
    }

    fn fade_shape(&mut self, arg: Option<FadeShape>) -> Result<FadeShape> {
        match (arg, self.prompter.as_mut()) {
            (Some(v), _) => Ok(v),
            (None, Some(p)) => {
                let idx = p.choose("Choose fade type:", &["Linear", "Logarithmic"])?;
                Ok(if idx == 0 { FadeShape::Linear } else { FadeShape::Log })
            }
            (None, None) => Ok(self.cfg.fade.shape),
        }
    }

    /// Interval bounds in seconds; defaults to the whole signal.
    fn interval(&mut self, args: &IntervalArgs, duration: f64) -> Result<(f64, f64)> {
        let start = match (args.start, self.prompter.as_mut()) {
            (Some(v), _) => v,
            (None, Some(p)) => p.timestamp(duration, "start")?,
            (None, None) => 0.0,
        };
        let end = match (args.end, self.prompter.as_mut()) {
            (Some(v), _) => v,
            (None, Some(p)) => p.timestamp(duration, "end")?,
            (None, None) => duration,
        };
        Ok((start, end))
    }

    fn policy(&mut self, arg: Option<EditPolicy>) -> Result<EditPolicy> {
        match (arg, self.prompter.as_mut()) {
            (Some(v), _) => Ok(v),
            (None, Some(p)) => {
                let labels: Vec<&str> =
                    EditPolicy::ALL.iter().map(|policy| policy.label()).collect();
                let idx = p.choose("Choose modification:", &labels)?;
                Ok(EditPolicy::ALL[idx])
            }
            (None, None) => anyhow::bail!("--policy is required unless --interactive is set"),
        }
    }

    fn spectral_edit(&self, policy: EditPolicy) -> SpectralEdit {
        match policy {
            EditPolicy::Remove => SpectralEdit::RemoveAbove {
                cutoff_hz: self.cfg.spectral.cutoff_hz,
            },
            EditPolicy::Add => SpectralEdit::AddTone {
                frequency_hz: self.cfg.spectral.add_hz,
                amplitude: self.cfg.spectral.add_amplitude,
            },
            EditPolicy::Move => SpectralEdit::Move,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    let cfg = match cli.config.clone().or_else(config::find_config) {
        Some(path) => match config::load_config(&path) {
            Some(cfg) => {
                log::info!("Loaded config from {}", path.display());
                cfg
            }
            None => {
                log::warn!("Failed to load config from {}, using defaults", path.display());
                Config::default()
            }
        },
        None => Config::default(),
    };

    let mut session = Session {
        cfg,
        prompter: cli
            .interactive
            .then(|| Prompter::new(std::io::stdin().lock(), std::io::stdout())),
    };

    match cli.command {
        Command::Info { input } => run_info(&input),
        Command::Energy(args) => run_feature(&mut session, &args, Feature::Energy, None),
        Command::Zcr(args) => run_feature(&mut session, &args, Feature::Zcr, None),
        Command::Segments { feature, step } => {
            run_feature(&mut session, &feature, Feature::Energy, Some(step))
        }
        Command::Fade {
            input,
            output,
            duration_ms,
            shape,
        } => run_fade(&mut session, &input, &output, duration_ms, shape),
        Command::Spectrum { interval, json } => {
            run_spectrum(&mut session, &interval, json.as_deref())
        }
        Command::Edit {
            interval,
            output,
            policy,
            splice,
        } => run_edit(&mut session, &interval, &output, policy, splice),
    }
}

fn load(input: &Path) -> Result<Signal> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }
    let signal = decode_signal(input)?;
    if signal.is_empty() {
        anyhow::bail!("No samples in {}", input.display());
    }
    Ok(signal)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn run_info(input: &Path) -> Result<()> {
    let signal = load(input)?;
    let channels = signal.channel_count();
    println!("{}", file_name(input));
    println!("  {} channel{}", channels, if channels > 1 { "s" } else { "" });
    println!("  {} kHz", signal.sample_rate() as f64 / 1000.0);
    println!("  {}-bit", signal.bit_depth);
    println!("  length {}", format_timestamp(signal.duration()));
    Ok(())
}

fn run_feature(
    session: &mut Session,
    args: &FeatureArgs,
    feature: Feature,
    segment_step: Option<Option<f64>>,
) -> Result<()> {
    let signal = load(&args.input)?;
    let frame_ms = session.frame_ms(args.frame_ms)?;
    let step = segment_step.map(|arg| session.step(arg)).transpose()?;
    let framer = Framer::from_ms(signal.sample_rate(), frame_ms, session.cfg.analysis.overlap)?;

    log::info!(
        "Computing {} ({} ms frames, {} samples, hop {})",
        feature.name(),
        frame_ms,
        framer.frame_size(),
        framer.hop()
    );

    let mut tracks = Vec::with_capacity(signal.channel_count());
    for (idx, channel) in signal.channels().iter().enumerate() {
        let values = match feature {
            Feature::Energy => energy_series(channel, &framer),
            Feature::Zcr => zcr_series(channel, &framer),
        }
        .with_context(|| format!("Channel {} of {}", idx, args.input.display()))?;
        let times = frame_times(signal.duration(), values.len());
        let segments = step.map(|s| find_segments(&values, s));

        println!("channel {}: {} frames", idx, values.len());
        if let Some(ref bounds) = segments {
            let stamps: Vec<String> = bounds.iter().map(|&i| format_timestamp(times[i])).collect();
            println!("  {} boundaries: {}", bounds.len(), stamps.join(", "));
        }

        tracks.push(FeatureTrack {
            channel: idx,
            times,
            values,
            segments,
        });
    }

    if let Some(ref path) = args.json {
        let report = FeatureReport {
            file: file_name(&args.input),
            feature: feature.name(),
            sample_rate: signal.sample_rate(),
            duration: signal.duration(),
            frame_ms,
            step,
            channels: tracks,
        };
        export::write_json(path, &report)?;
    }
    Ok(())
}

fn run_fade(
    session: &mut Session,
    input: &Path,
    output: &Path,
    duration_ms: Option<u32>,
    shape: Option<FadeShape>,
) -> Result<()> {
    let signal = load(input)?;
    println!("Audio length: {}", format_timestamp(signal.duration()));
    let fade_ms = session.fade_ms(duration_ms)?;
    let shape = session.fade_shape(shape)?;
    let count = fade_sample_count(signal.sample_rate(), fade_ms);

    let faded = apply_fade(&signal, count, shape)
        .with_context(|| format!("Cannot apply a {} ms fade", fade_ms))?;
    write_signal(output, &faded)
}

fn run_spectrum(session: &mut Session, args: &IntervalArgs, json: Option<&Path>) -> Result<()> {
    let signal = load(&args.input)?;
    let (start, end) = session.interval(args, signal.duration())?;
    let window = args.window.unwrap_or(session.cfg.spectral.window);
    let engine = SpectralEngine::new(window);

    log::info!(
        "Spectrum of {} - {} ({:?} window)",
        format_timestamp(start),
        format_timestamp(end),
        window
    );

    let mut tracks = Vec::with_capacity(signal.channel_count());
    for (idx, channel) in signal.channels().iter().enumerate() {
        let spectrum = engine.analyze(channel, signal.sample_rate(), start, end)?;
        if let Some((freq, mag)) = spectrum.peak() {
            println!("channel {}: peak at {:.1} Hz (magnitude {:.1})", idx, freq, mag);
        }
        tracks.push(SpectrumTrack {
            channel: idx,
            spectrum,
        });
    }

    if let Some(path) = json {
        let report = SpectrumReport {
            file: file_name(&args.input),
            sample_rate: signal.sample_rate(),
            start,
            end,
            window: format!("{:?}", window).to_lowercase(),
            channels: tracks,
        };
        export::write_json(path, &report)?;
    }
    Ok(())
}

fn run_edit(
    session: &mut Session,
    args: &IntervalArgs,
    output: &Path,
    policy: Option<EditPolicy>,
    splice: bool,
) -> Result<()> {
    let signal = load(&args.input)?;
    let (start, end) = session.interval(args, signal.duration())?;
    let policy = session.policy(policy)?;
    let edit = session.spectral_edit(policy);
    let engine = SpectralEngine::new(args.window.unwrap_or(session.cfg.spectral.window));

    log::info!("{} in {} - {}", policy.label(), format_timestamp(start), format_timestamp(end));

    let pb = ProgressBar::new(signal.channel_count() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} channels")?
            .progress_chars("=>-"),
    );

    let mut channels = Vec::with_capacity(signal.channel_count());
    for channel in signal.channels() {
        let interval = engine.modify(channel, signal.sample_rate(), start, end, &edit)?;
        channels.push(if splice {
            interval.splice_into(channel)?
        } else {
            interval.to_pcm()
        });
        pb.inc(1);
    }
    pb.finish_with_message("Reconstruction complete");

    write_signal(output, &signal.with_channels(channels)?)
}
