use thiserror::Error;

/// Top-level error type for the cutting planner.
#[derive(Debug, Error)]
pub enum CutplanError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Layer(#[from] LayerError),
}

/// Errors raised while validating operation parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{parameter} must be positive, got {value}")]
    NotPositive { parameter: &'static str, value: f64 },

    #[error("{parameter} must be finite, got {value}")]
    NotFinite { parameter: &'static str, value: f64 },

    #[error("tab distance {distance} is shorter than tab width {width}")]
    TabWiderThanSpacing { distance: f64, width: f64 },
}

/// Errors raised while building geometry from caller input.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("loop has {count} points, at least 3 are required")]
    TooFewPoints { count: usize },

    #[error("non-finite coordinate ({x}, {y})")]
    NonFinite { x: f64, y: f64 },
}

/// Errors related to named-layer jobs.
#[derive(Debug, Error)]
pub enum LayerError {
    #[error("no layers loaded")]
    Empty,

    #[error("no layers selected")]
    NoSelection,

    #[error("layer not found: {0}")]
    NotFound(String),
}

/// Convenience type alias for results using [`CutplanError`].
pub type Result<T> = std::result::Result<T, CutplanError>;
