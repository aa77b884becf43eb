//! Recall Demo
//!
//! Stores two synthetic tones in a continuous Hopfield network, corrupts
//! one of them with noise and lets the network relax back to it.
//!
//! Run with: cargo run --example recall_demo

use hopfield_audio::prelude::*;
use hopfield_audio::utils::{cosine_similarity, sign_agreement};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SAMPLE_RATE: u32 = 4000;
const NEURONS: usize = 200;

fn tone(frequency: f64) -> SignalBuffer {
    let samples = (0..NEURONS)
        .map(|k| (2.0 * std::f64::consts::PI * frequency * k as f64 / SAMPLE_RATE as f64).sin())
        .collect();
    SignalBuffer::new(samples, SAMPLE_RATE)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    println!("===========================================");
    println!("  Continuous Hopfield Network Recall Demo");
    println!("===========================================\n");

    let low = tone(220.0);
    let high = tone(370.0);

    let mut network = ContinuousHopfield::try_new(NEURONS, 1.0)?;
    network.add_memory(&low);
    network.add_memory(&high);
    println!("{}\n", network.parameters());

    // Corrupt the low tone with uniform noise
    let mut rng = StdRng::seed_from_u64(2024);
    let noisy: Vec<f64> = low
        .samples()
        .iter()
        .map(|&x| x + rng.gen_range(-0.8..0.8))
        .collect();
    let mut noisy = SignalBuffer::new(noisy, SAMPLE_RATE);
    noisy.normalize()?;

    println!(
        "Noisy input: sign agreement with memory = {:.1}%",
        sign_agreement(noisy.samples(), low.samples()) * 100.0
    );

    network.set_state(&noisy);

    let criterion = ConvergenceCriterion::new(1e-9).with_max_sweeps(500);
    let report = network.converge_with(&criterion, |net, energy| {
        let state = net.states().to_vec();
        println!(
            "  energy = {:>12.4}  similarity(low) = {:.4}  similarity(high) = {:.4}",
            energy,
            cosine_similarity(&state, low.samples()),
            cosine_similarity(&state, high.samples())
        );
        true
    });

    let recalled = SignalBuffer::from_network_state(&network, SAMPLE_RATE);

    println!("\n--- Result ---");
    println!("Stop reason: {:?}", report.stop_reason);
    println!("Sweeps: {}", report.sweeps);
    println!("Energy: {:.4} -> {:.4}", report.initial_energy, report.energy);
    println!(
        "Sign agreement with memory: {:.1}%",
        sign_agreement(recalled.samples(), low.samples()) * 100.0
    );
    println!("\n{}", recalled);

    Ok(())
}
