use anyhow::Result;
use clap::Parser;
use std::path::Path;
use streamscribe::audio::wav::WavBlockSource;
use streamscribe::cli::{Cli, Mode};
use streamscribe::config::Config;
use streamscribe::output;
use streamscribe::pipeline::sink::{FanoutSink, FileLogSink, StdoutSink};
use streamscribe::pipeline::utterance::{UtterancePipeline, UtterancePipelineConfig};
use streamscribe::pipeline::windowed::{WindowedPipeline, WindowedPipelineConfig};
use streamscribe::stt::transcriber::ProbeTranscriber;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?.with_env_overrides();
    cli.apply_overrides(&mut config);
    config.validate()?;

    let source = WavBlockSource::from_path(&cli.input, config.audio.block_duration_seconds)?;
    // The file's own rate drives all duration math
    config.audio.sample_rate = source.sample_rate();

    if !cli.quiet {
        output::print_banner(&cli.input, cli.mode, &config, source.duration_secs());
    }

    let mut sink = build_sink(&cli);
    let transcriber = ProbeTranscriber::new();

    match cli.mode {
        Mode::Vad => {
            let pipeline = UtterancePipeline::new(UtterancePipelineConfig::from_config(&config));
            let stats = pipeline.run(source, &transcriber, &mut sink)?;
            if cli.verbose {
                output::print_utterance_stats(&stats);
            }
        }
        Mode::Stride => {
            let pipeline = WindowedPipeline::new(WindowedPipelineConfig::from_config(&config));
            let stats = pipeline.run(source, &transcriber, &mut sink)?;
            if cli.verbose {
                output::print_windowed_stats(&stats);
            }
        }
    }

    Ok(())
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        // An explicitly named file must exist and parse
        Some(path) => Config::load(path),
        None => match Config::default_path() {
            Some(path) => Config::load_or_default(&path),
            None => Ok(Config::default()),
        },
    }
}

fn build_sink(cli: &Cli) -> FanoutSink {
    let mut sink = FanoutSink::new();
    if !cli.quiet {
        sink = sink.push(Box::new(StdoutSink::new()));
    }
    if let Some(path) = &cli.save_log {
        sink = sink.push(Box::new(FileLogSink::new(path)));
    }
    sink
}
