use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParticleError {
    #[error("unknown particle category: {0}")]
    UnknownCategory(String),
}

/// Fixed set of particle buckets. Each one owns its own free list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleCategory {
    #[default]
    Star,
    Orb,
    #[serde(rename = "shooting", alias = "shooting_trail", alias = "shooting-trail")]
    ShootingTrail,
    Nebula,
    Constellation,
}

impl ParticleCategory {
    pub const ALL: [ParticleCategory; 5] = [
        ParticleCategory::Star,
        ParticleCategory::Orb,
        ParticleCategory::ShootingTrail,
        ParticleCategory::Nebula,
        ParticleCategory::Constellation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParticleCategory::Star => "star",
            ParticleCategory::Orb => "orb",
            ParticleCategory::ShootingTrail => "shooting",
            ParticleCategory::Nebula => "nebula",
            ParticleCategory::Constellation => "constellation",
        }
    }
}

impl fmt::Display for ParticleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParticleCategory {
    type Err = ParticleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "star" => Ok(ParticleCategory::Star),
            "orb" => Ok(ParticleCategory::Orb),
            "shooting" | "shooting-trail" | "shooting_trail" => {
                Ok(ParticleCategory::ShootingTrail)
            }
            "nebula" => Ok(ParticleCategory::Nebula),
            "constellation" => Ok(ParticleCategory::Constellation),
            _ => Err(ParticleError::UnknownCategory(s.to_string())),
        }
    }
}
