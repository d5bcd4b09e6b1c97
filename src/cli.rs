//! Command-line argument parsing.

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::params::{RenderConfig, WaterParams};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "waveplane")]
#[command(about = "Interactive wave-particle water simulation", long_about = None)]
pub struct Args {
    /// Domain half-width (the plane spans [-width, width] on both axes)
    #[arg(long, value_name = "UNITS", default_value = "100")]
    pub width: f32,

    /// Height-field and spatial-bin resolution per side
    #[arg(long, value_name = "N", default_value = "200")]
    pub resolution: usize,

    /// Spawn frequency multiplier (1..25)
    #[arg(long, default_value = "1")]
    pub roughness: f32,

    /// Amplitude lost per particle per tick
    #[arg(long, default_value = "0.01")]
    pub damping: f32,

    /// Base seconds between spawned wavefronts while playing
    #[arg(long, value_name = "SECONDS", default_value = "2")]
    pub spawn_interval: f32,

    /// Neighbour search half-width in bins
    #[arg(long, value_name = "BINS", default_value = "4")]
    pub adjacent: usize,

    /// Seed for wave placement (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start with automatic wave spawning enabled
    #[arg(long)]
    pub playing: bool,

    /// Draw live wave particles
    #[arg(long)]
    pub particles: bool,

    /// Run this many ticks without a window and print a summary
    #[arg(long, value_name = "TICKS")]
    pub headless: Option<u64>,
}

impl Args {
    /// Water parameters with command-line overrides applied
    pub fn water_params(&self) -> WaterParams {
        WaterParams {
            width: self.width,
            resolution: self.resolution,
            base_amplitude: 0.3 * self.width,
            roughness: self.roughness,
            damping: self.damping,
            spawn_interval_s: self.spawn_interval,
            adjacent: self.adjacent,
            playing: self.playing,
            ..Default::default()
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            show_particles: self.particles,
            ..Default::default()
        }
    }

    /// Random source for wave placement
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_water_params() {
        let args = Args::parse_from(["waveplane"]);
        let params = args.water_params();
        let defaults = WaterParams::default();

        assert_eq!(params.width, defaults.width);
        assert_eq!(params.resolution, defaults.resolution);
        assert_eq!(params.base_amplitude, defaults.base_amplitude);
        assert_eq!(params.damping, defaults.damping);
        assert_eq!(params.adjacent, defaults.adjacent);
        assert!(!params.playing);
        assert!(args.headless.is_none());
    }

    #[test]
    fn test_overrides_apply() {
        let args = Args::parse_from([
            "waveplane",
            "--width",
            "50",
            "--roughness",
            "5",
            "--playing",
            "--headless",
            "300",
            "--seed",
            "9",
        ]);
        let params = args.water_params();

        assert_eq!(params.width, 50.0);
        assert!((params.base_amplitude - 15.0).abs() < 1e-4);
        assert_eq!(params.roughness, 5.0);
        assert!(params.playing);
        assert_eq!(args.headless, Some(300));
    }
}
