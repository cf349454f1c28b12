// SPDX-License-Identifier: MIT
// Copyright (c) 2021 Marceline Cramer

use argh::FromArgs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use lattice_noise::{FractalKind, FractalSettings, HashMode, NoiseConfig, NoiseKind};

const RAMP: &[u8] = b" .:-=+*#%@";

#[derive(FromArgs)]
/// Prints an ASCII slice of a noise field
struct Args {
    /// noise algorithm (value, perlin, fast, smooth, cubic)
    #[argh(option, default = "NoiseKind::OpenSimplex2Smooth")]
    kind: NoiseKind,

    /// lattice hash (classic, expanded, tableless)
    #[argh(option, default = "HashMode::Classic")]
    hash: HashMode,

    /// fractal layering (fbm, turbulence, ridged)
    #[argh(option, from_str_fn(select_fractal))]
    fractal: Option<FractalKind>,

    /// number of fractal octaves
    #[argh(option, default = "4")]
    octaves: u32,

    /// read the whole noise description from a JSON file instead
    #[argh(option)]
    config: Option<String>,

    /// coordinate scale
    #[argh(option, default = "0.08")]
    frequency: f32,

    /// depth of the slice
    #[argh(option, default = "0.0")]
    z: f32,

    /// columns
    #[argh(option, default = "78")]
    width: usize,

    /// rows
    #[argh(option, default = "32")]
    height: usize,
}

fn select_fractal(option: &str) -> Result<FractalKind, String> {
    match option {
        "fbm" => Ok(FractalKind::Fbm),
        "turbulence" => Ok(FractalKind::Turbulence),
        "ridged" => Ok(FractalKind::Ridged),
        _ => Err("invalid fractal (must be one of [fbm, turbulence, ridged])".into()),
    }
}

fn load_config(args: &Args) -> Result<NoiseConfig, String> {
    if let Some(path) = &args.config {
        let json = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
        return NoiseConfig::from_json(&json).map_err(|e| e.to_string());
    }

    Ok(NoiseConfig {
        kind: args.kind,
        hash: args.hash,
        frequency: args.frequency,
        fractal: args.fractal.map(|kind| FractalSettings {
            kind,
            octaves: args.octaves,
            ..Default::default()
        }),
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Args = argh::from_env();
    let sampler = match load_config(&args).and_then(|c| c.build().map_err(|e| e.to_string())) {
        Ok(sampler) => sampler,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let timer = Instant::now();
    let mut samples = Vec::with_capacity(args.width * args.height);
    for row in 0..args.height {
        for col in 0..args.width {
            // Terminal cells are about twice as tall as they are wide.
            samples.push(sampler.sample3(col as f32, row as f32 * 2.0, args.z));
        }
    }
    let elapsed = timer.elapsed();

    let min = samples.iter().copied().fold(f32::INFINITY, f32::min);
    let max = samples.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let span = (max - min).max(f32::EPSILON);

    for row in samples.chunks(args.width.max(1)) {
        let line: String = row
            .iter()
            .map(|v| {
                let t = (v - min) / span;
                let index = (t * (RAMP.len() - 1) as f32).round() as usize;
                RAMP[index.min(RAMP.len() - 1)] as char
            })
            .collect();
        println!("{}", line);
    }

    println!(
        "{} samples of {} in {:?}, range [{:.3}, {:.3}]",
        samples.len(),
        sampler.config().kind,
        elapsed,
        min,
        max
    );
}
