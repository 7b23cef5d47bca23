use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};

use bed_motion_rs::geo::{track_distance_km, GeoFix};
use bed_motion_rs::quaternion::Quaternion;
use bed_motion_rs::rotation_series::{process_rotations, RotationSeries};

#[derive(Parser, Debug)]
#[command(name = "bed_convert")]
#[command(about = "Reduce a BED quaternion log to Euler angles, rotation rates, and displacement", long_about = None)]
struct Args {
    /// Input file: one JSON sample per line
    input: String,

    /// IMU sample rate in Hz
    #[arg(long, default_value = "50.0")]
    rate_hz: f64,

    /// Output JSON file (defaults to stdout)
    #[arg(long)]
    output: Option<String>,
}

/// One logged sample: orientation quaternion, optional position fix
#[derive(Deserialize)]
struct Sample {
    /// Quaternion as [w, x, y, z]
    q: [f64; 4],
    /// Position fix as [lon, lat] decimal degrees
    #[serde(default)]
    fix: Option<[f64; 2]>,
}

#[derive(Serialize)]
struct Output {
    samples: usize,
    rate_hz: f64,
    track_km: f64,
    final_rot_count: f64,
    series: RotationSeries,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("BED Convert");
    println!("  Input: {}", args.input);
    println!("  Sample Rate: {} Hz", args.rate_hz);

    let file = File::open(&args.input).with_context(|| format!("opening {}", args.input))?;
    let mut quats = Vec::new();
    let mut fixes = Vec::new();

    for (lineno, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let sample: Sample = serde_json::from_str(&line)
            .with_context(|| format!("parsing sample at line {}", lineno + 1))?;

        let [w, x, y, z] = sample.q;
        quats.push(Quaternion::new(w, x, y, z).normalized());
        if let Some([lon, lat]) = sample.fix {
            fixes.push(GeoFix::new(lon, lat)?);
        }
    }

    println!("  Samples: {} ({} fixes)", quats.len(), fixes.len());

    let series = process_rotations(&quats, args.rate_hz);
    let track_km = track_distance_km(&fixes)?;
    let final_rot_count = series.rot_count.last().copied().unwrap_or(0.0);

    println!("  Track Distance: {track_km:.3} km");
    println!("  Rotations: {final_rot_count:.2}");

    let output = Output {
        samples: quats.len(),
        rate_hz: args.rate_hz,
        track_km,
        final_rot_count,
        series,
    };

    let json = serde_json::to_string_pretty(&output)?;
    match args.output {
        Some(path) => {
            let mut f = File::create(&path).with_context(|| format!("creating {path}"))?;
            f.write_all(json.as_bytes())?;
            println!("  Wrote {path}");
        }
        None => println!("{json}"),
    }

    Ok(())
}
