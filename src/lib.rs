//! Waveplane library - wave-particle water simulation

pub mod camera;
pub mod cli;
pub mod params;
pub mod rendering;
pub mod water;
