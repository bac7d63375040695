use std::fmt;

use serde::{Deserialize, Serialize};

use super::category::ParticleCategory;

/// Opaque animation/style payload. The pool stores and clears it, nothing more.
pub type OpaquePayload = serde_json::Map<String, serde_json::Value>;

pub const DEFAULT_SIZE: f64 = 1.0;
pub const DEFAULT_COLOR: &str = "bg-blue-400";

/// Identity of a descriptor for the lifetime of its pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticleId(u64);

impl ParticleId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "particle-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Container rectangle the batch constructors scatter particles over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Partial descriptor: only the fields that are `Some` are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleConfig {
    pub category: Option<ParticleCategory>,
    pub size: Option<f64>,
    pub color: Option<String>,
    pub position: Option<Position>,
    pub animation: Option<OpaquePayload>,
    pub style: Option<OpaquePayload>,
}

impl ParticleConfig {
    pub fn new(category: ParticleCategory) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_animation(mut self, animation: OpaquePayload) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn with_style(mut self, style: OpaquePayload) -> Self {
        self.style = Some(style);
        self
    }

    /// Category the descriptor belongs to; `star` when unset.
    pub fn category_or_default(&self) -> ParticleCategory {
        self.category.unwrap_or_default()
    }
}

/// A reusable visual-effect descriptor.
///
/// `id` and `category` are fixed at construction; everything else is
/// overwritten on reuse and cleared by [`ParticleDescriptor::reset`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleDescriptor {
    id: ParticleId,
    category: ParticleCategory,
    pub size: f64,
    pub color: String,
    pub position: Position,
    pub animation: OpaquePayload,
    pub style: OpaquePayload,
}

impl ParticleDescriptor {
    pub fn from_config(id: ParticleId, config: ParticleConfig) -> Self {
        let mut descriptor = Self {
            id,
            category: config.category_or_default(),
            size: DEFAULT_SIZE,
            color: DEFAULT_COLOR.to_string(),
            position: Position::default(),
            animation: OpaquePayload::new(),
            style: OpaquePayload::new(),
        };
        descriptor.apply(config);
        descriptor
    }

    pub fn id(&self) -> ParticleId {
        self.id
    }

    pub fn category(&self) -> ParticleCategory {
        self.category
    }

    /// Overwrite every field present in `config`. The category is ignored.
    pub fn apply(&mut self, config: ParticleConfig) {
        if let Some(size) = config.size {
            self.size = size;
        }
        if let Some(color) = config.color {
            self.color = color;
        }
        if let Some(position) = config.position {
            self.position = position;
        }
        if let Some(animation) = config.animation {
            self.animation = animation;
        }
        if let Some(style) = config.style {
            self.style = style;
        }
    }

    /// Back to defaults so nothing from the previous owner leaks into reuse.
    pub fn reset(&mut self) {
        self.size = DEFAULT_SIZE;
        self.color.clear();
        self.color.push_str(DEFAULT_COLOR);
        self.position = Position::default();
        self.animation.clear();
        self.style.clear();
    }
}
