// SPDX-License-Identifier: MIT
// Copyright (c) 2021 Marceline Cramer

//! Serializable noise descriptions and the samplers built from them.

use crate::error::{Error, Result};
use crate::hash::{warm_up, HashMode};
use crate::procgen::{FractalSettings, NoiseField, NoiseKind, Vec3A};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Everything needed to reproduce a noise field.
///
/// ```json
/// { "kind": "perlin", "hash": "tableless", "frequency": 0.05,
///   "fractal": { "kind": "ridged", "octaves": 5 } }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub kind: NoiseKind,
    pub hash: HashMode,
    /// Multiplies input coordinates before sampling.
    pub frequency: f32,
    pub fractal: Option<FractalSettings>,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            kind: NoiseKind::default(),
            hash: HashMode::default(),
            frequency: 1.0,
            fractal: None,
        }
    }
}

impl NoiseConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(Error::InvalidFrequency(self.frequency));
        }
        if let Some(fractal) = &self.fractal {
            fractal.validate()?;
        }
        Ok(())
    }

    pub fn build(&self) -> Result<Sampler> {
        let timer = Instant::now();
        self.validate()?;

        if self.hash == HashMode::Expanded {
            warm_up();
        }

        tracing::debug!(
            "built {} sampler ({:?} hash, {} octaves) in {:?}",
            self.kind,
            self.hash,
            self.fractal.map_or(1, |f| f.octaves),
            timer.elapsed()
        );

        Ok(Sampler { config: *self })
    }
}

/// A validated [`NoiseConfig`], ready to evaluate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sampler {
    config: NoiseConfig,
}

impl Sampler {
    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    pub fn sample2(&self, x: f32, y: f32) -> f32 {
        let NoiseConfig {
            kind,
            hash,
            frequency,
            fractal,
        } = self.config;
        let noise = |(x, y): (f32, f32)| kind.eval2_with(&hash, x, y);
        let point = (x * frequency, y * frequency);

        match fractal {
            Some(fractal) => fractal.apply(noise, point),
            None => noise(point),
        }
    }

    pub fn sample3(&self, x: f32, y: f32, z: f32) -> f32 {
        let NoiseConfig {
            kind,
            hash,
            frequency,
            fractal,
        } = self.config;
        let noise = |(x, y, z): (f32, f32, f32)| kind.eval3_with(&hash, x, y, z);
        let point = (x * frequency, y * frequency, z * frequency);

        match fractal {
            Some(fractal) => fractal.apply(noise, point),
            None => noise(point),
        }
    }
}

impl NoiseField for Sampler {
    fn sample(&self, pos: &Vec3A) -> f32 {
        self.sample3(pos.x, pos.y, pos.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procgen::{fbm, perlin3d, perlin3d_with, FractalKind};

    #[test]
    fn defaults_build() {
        let sampler = NoiseConfig::default().build().unwrap();
        assert!(sampler.sample3(0.3, 0.4, 0.5).is_finite());
        assert!(sampler.sample2(0.3, 0.4).is_finite());
    }

    #[test]
    fn parses_json() {
        let config = NoiseConfig::from_json(
            r#"{
                "kind": "perlin",
                "hash": "tableless",
                "frequency": 0.5,
                "fractal": { "kind": "ridged", "octaves": 3, "offset": 0.9 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.kind, NoiseKind::Perlin);
        assert_eq!(config.hash, HashMode::Tableless);
        assert_eq!(config.frequency, 0.5);
        let fractal = config.fractal.unwrap();
        assert_eq!(fractal.kind, FractalKind::Ridged);
        assert_eq!(fractal.octaves, 3);
        assert_eq!(fractal.gain, 0.5);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = NoiseConfig::from_json("{}").unwrap();
        assert_eq!(config, NoiseConfig::default());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            NoiseConfig::from_json(r#"{ "kind": "worley" }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            NoiseConfig::from_json(r#"{ "frequency": -1.0 }"#),
            Err(Error::InvalidFrequency(_))
        ));
        assert!(matches!(
            NoiseConfig::from_json(r#"{ "fractal": { "octaves": 40 } }"#),
            Err(Error::OctavesOutOfRange { octaves: 40, .. })
        ));

        let config = NoiseConfig {
            frequency: f32::NAN,
            ..Default::default()
        };
        assert!(config.build().is_err());
    }

    #[test]
    fn sampler_applies_frequency_and_hash() {
        let config = NoiseConfig {
            kind: NoiseKind::Perlin,
            frequency: 0.5,
            ..Default::default()
        };
        let sampler = config.build().unwrap();
        assert_eq!(sampler.sample3(1.0, 2.0, 3.0), perlin3d(0.5f32, 1.0, 1.5));

        let config = NoiseConfig {
            hash: HashMode::Tableless,
            ..config
        };
        let sampler = config.build().unwrap();
        assert_eq!(
            sampler.sample3(1.0, 2.0, 3.0),
            perlin3d_with(&HashMode::Tableless, 0.5f32, 1.0, 1.5)
        );
    }

    #[test]
    fn sampler_applies_fractal() {
        let config = NoiseConfig {
            kind: NoiseKind::Value,
            fractal: Some(FractalSettings::default()),
            ..Default::default()
        };
        let sampler = config.build().unwrap();
        let expected = fbm(
            |x, y, z| NoiseKind::Value.eval3_with(&HashMode::Classic, x, y, z),
            1.0f32,
            2.0,
            3.0,
            4,
            2.0,
            0.5,
        );
        assert_eq!(sampler.sample(&Vec3A::new(1.0, 2.0, 3.0)), expected);
    }

    #[test]
    fn expanded_hash_builds() {
        let config = NoiseConfig {
            kind: NoiseKind::Value,
            hash: HashMode::Expanded,
            ..Default::default()
        };
        let v = config.build().unwrap().sample3(0.7, 0.1, 4.2);
        assert!((-1.0..=1.0).contains(&v));
    }
}
