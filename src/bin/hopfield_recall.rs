//! Store audio memories and recall them from noisy input
//!
//! Usage:
//!   cargo run --bin hopfield_recall -- [OPTIONS] <MEMORY>... [: <STATE>...]
//!
//! Memory files come first; a lone `:` separates them from state files.
//! Every state file is converged to a stable state, which is played and
//! optionally written to `--output-dir`.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use hopfield_audio::{AplayPlayer, ConvergenceReport, RecallConfig, RecallSession};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser, Debug)]
#[command(name = "hopfield_recall")]
#[command(about = "Recall stored audio memories with a continuous Hopfield network")]
#[command(arg_required_else_help = true)]
struct Args {
    /// Memory files, then `:`, then state files
    #[arg(value_name = "FILES")]
    files: Vec<String>,

    /// JSON configuration file (command-line options take precedence)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Memory capacity in seconds
    #[arg(short = 't', long)]
    tau: Option<f64>,

    /// Sample rate of the network signal space
    #[arg(short = 'r', long = "rate")]
    sample_rate: Option<u32>,

    /// Inverse temperature
    #[arg(short = 'b', long, allow_negative_numbers = true)]
    beta: Option<f64>,

    /// Relative energy epsilon for convergence
    #[arg(short = 'e', long)]
    epsilon: Option<f64>,

    /// Cap on sweeps per convergence
    #[arg(long)]
    max_sweeps: Option<usize>,

    /// Log energy after every sweep
    #[arg(short = 'l', long)]
    log: bool,

    /// Read initial states interactively after processing the files
    #[arg(short = 'i', long)]
    interactive: bool,

    /// Play states (`s`) or memories (`m`); may be repeated
    #[arg(short = 'p', long = "play", value_parser = ["s", "m"])]
    play: Vec<String>,

    /// Do not play stable states
    #[arg(long)]
    no_play: bool,

    /// Directory to write stable states into as WAV files
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Seed for random initial states
    #[arg(long)]
    seed: Option<u64>,

    /// Print the weight matrix after storing memories
    #[arg(long)]
    dump_weights: bool,

    /// Print each convergence result as a JSON line
    #[arg(long)]
    json: bool,
}

impl Args {
    fn recall_config(&self) -> Result<RecallConfig> {
        let mut config = match &self.config {
            Some(path) => RecallConfig::from_json_file(path)?,
            None => RecallConfig::default(),
        };

        if let Some(tau) = self.tau {
            config.tau = tau;
        }
        if let Some(rate) = self.sample_rate {
            config.sample_rate = rate;
        }
        if let Some(beta) = self.beta {
            config.beta = beta;
        }
        if let Some(epsilon) = self.epsilon {
            config.epsilon = epsilon;
        }
        if self.max_sweeps.is_some() {
            config.max_sweeps = self.max_sweeps;
        }
        config.log_sweeps |= self.log;
        config.play_states |= self.play.iter().any(|p| p == "s");
        config.play_memories |= self.play.iter().any(|p| p == "m");

        config.validate()?;
        Ok(config)
    }

    /// Split the positional files at the first `:`
    fn memory_and_state_files(&self) -> (&[String], &[String]) {
        match self.files.iter().position(|f| f == ":") {
            Some(idx) => (&self.files[..idx], &self.files[idx + 1..]),
            None => (&self.files[..], &self.files[self.files.len()..]),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.recall_config()?;

    if let Some(dir) = &args.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
    }

    let mut session = RecallSession::new(config)?.with_player(Box::new(AplayPlayer::new()));

    let (memory_files, state_files) = args.memory_and_state_files();

    for file in memory_files {
        if let Err(e) = session.add_memory_from_file(file) {
            log::warn!("ignored memory: {}", e);
        }
    }

    if args.log {
        let config = session.config();
        log::info!(
            "memory: {:.2} sec @ {} Hz",
            config.tau,
            config.sample_rate
        );
        log::info!("energy epsilon: {:.2e}", config.epsilon);
        session.network().log_parameters();
    }

    if args.dump_weights {
        let stdout = io::stdout();
        session.network().write_weights(&mut stdout.lock())?;
    }

    for file in state_files {
        match session.set_state_from_file(file) {
            Ok(()) => {
                let stem = Path::new(file)
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "state".to_string());
                converge_and_emit(&mut session, &args, &stem)?;
            }
            Err(e) => log::warn!("ignored state: {}", e),
        }
    }

    if args.interactive {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        run_interactive(&mut session, &args, &mut rng)?;
    }

    Ok(())
}

/// Read initial states from stdin until EOF; an empty line means random
fn run_interactive(session: &mut RecallSession, args: &Args, rng: &mut StdRng) -> Result<()> {
    let stdin = io::stdin();
    let mut round = 0;

    loop {
        print!("path to file for initial state? ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            println!();
            return Ok(());
        }
        let input = input.trim();
        round += 1;

        let label = if input.is_empty() {
            session.randomize_state(rng);
            format!("random_{}", round)
        } else {
            if let Err(e) = session.set_state_from_file(input) {
                eprintln!("{}", e);
                continue;
            }
            Path::new(input)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| format!("state_{}", round))
        };

        converge_and_emit(session, args, &label)?;
    }
}

/// Converge, then play and/or write the stable state
fn converge_and_emit(
    session: &mut RecallSession,
    args: &Args,
    label: &str,
) -> Result<ConvergenceReport> {
    let report = session.converge();
    if args.json {
        let line = serde_json::json!({
            "state": label,
            "network": session.network().parameters(),
            "report": report,
        });
        println!("{}", line);
    } else {
        println!(
            "stable state: energy = {:.6} after {} sweeps ({:?})",
            report.energy, report.sweeps, report.stop_reason
        );
    }

    if let Some(dir) = &args.output_dir {
        let path = dir.join(format!("{}_stable.wav", label));
        session
            .write_stable_state(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("wrote stable state: {}", path.display());
    }

    if !args.no_play {
        if let Err(e) = session.play_stable_state() {
            log::warn!("{}", e);
        }
    }

    Ok(report)
}
