// SPDX-License-Identifier: MIT
// Copyright (c) 2021 Marceline Cramer

//! Errors raised while validating or parsing noise configuration.
//!
//! Sampling itself never fails; only building a sampler from user input does.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("octave count {octaves} is outside 1..={max}")]
    OctavesOutOfRange { octaves: u32, max: u32 },

    #[error("lacunarity must be finite and positive, got {0}")]
    InvalidLacunarity(f32),

    #[error("gain must be finite, got {0}")]
    InvalidGain(f32),

    #[error("ridge offset must be finite, got {0}")]
    InvalidOffset(f32),

    #[error("frequency must be finite and positive, got {0}")]
    InvalidFrequency(f32),

    #[error("unknown noise kind `{0}`")]
    UnknownKind(String),

    #[error("unknown hash mode `{0}`")]
    UnknownHashMode(String),

    #[error("malformed noise config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
