use crate::error::{ConfigError, Result};

/// Default endpoint tolerance for vertex unification.
pub const DEFAULT_EPSILON: f64 = 0.01;

/// Default bridge gap length left uncut by each tab.
pub const DEFAULT_TAB_WIDTH: f64 = 1.0;

/// Default spacing between tabs along a cut path.
pub const DEFAULT_TAB_DISTANCE: f64 = 15.0;

/// Default tool speed while travelling with the laser off.
pub const DEFAULT_IDLE_SPEED: f64 = 100.0;

/// Default tool speed while cutting.
pub const DEFAULT_ACTIVE_SPEED: f64 = 35.0;

/// Default head speed between engraved spans.
pub const DEFAULT_ENGRAVE_IDLE_SPEED: f64 = 10.0;

/// Default head speed while engraving.
pub const DEFAULT_ENGRAVE_ACTIVE_SPEED: f64 = 800.0;

/// Default distance between engraving scanlines.
pub const DEFAULT_SCANLINE: f64 = 0.05;

fn require_positive(parameter: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { parameter, value }.into());
    }
    if value <= 0.0 {
        return Err(ConfigError::NotPositive { parameter, value }.into());
    }
    Ok(value)
}

/// How the representative position of a vertex cluster is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VertexMerge {
    /// Fold members pairwise into a running midpoint, in insertion order.
    ///
    /// With three or more members the result is weighted towards the most
    /// recently added points.
    #[default]
    MidpointFold,
    /// Arithmetic mean of all members.
    Centroid,
}

/// Parameters for vertex unification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnifyParams {
    epsilon: f64,
    merge: VertexMerge,
}

impl UnifyParams {
    /// Creates unification parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `epsilon` is not a positive finite number.
    pub fn new(epsilon: f64, merge: VertexMerge) -> Result<Self> {
        Ok(Self {
            epsilon: require_positive("epsilon", epsilon)?,
            merge,
        })
    }

    /// Returns the endpoint tolerance.
    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Returns the representative-position policy.
    #[must_use]
    pub fn merge(&self) -> VertexMerge {
        self.merge
    }
}

impl Default for UnifyParams {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            merge: VertexMerge::MidpointFold,
        }
    }
}

/// Parameters for tab insertion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabParams {
    distance: f64,
    width: f64,
}

impl TabParams {
    /// Creates tab parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `distance` or `width` is not a positive finite
    /// number, or if `distance` is shorter than `width`.
    pub fn new(distance: f64, width: f64) -> Result<Self> {
        let distance = require_positive("tab distance", distance)?;
        let width = require_positive("tab width", width)?;
        if distance < width {
            return Err(ConfigError::TabWiderThanSpacing { distance, width }.into());
        }
        Ok(Self { distance, width })
    }

    /// Returns the spacing between tabs.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Returns the bridge gap length.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }
}

impl Default for TabParams {
    fn default() -> Self {
        Self {
            distance: DEFAULT_TAB_DISTANCE,
            width: DEFAULT_TAB_WIDTH,
        }
    }
}

/// Tool speeds used for time estimation, in drawing units per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaserSpeeds {
    idle: f64,
    active: f64,
}

impl LaserSpeeds {
    /// Creates a pair of tool speeds.
    ///
    /// # Errors
    ///
    /// Returns an error if either speed is not a positive finite number.
    pub fn new(idle: f64, active: f64) -> Result<Self> {
        Ok(Self {
            idle: require_positive("idle speed", idle)?,
            active: require_positive("active speed", active)?,
        })
    }

    /// Returns the travel speed with the laser off.
    #[must_use]
    pub fn idle(&self) -> f64 {
        self.idle
    }

    /// Returns the cutting speed.
    #[must_use]
    pub fn active(&self) -> f64 {
        self.active
    }
}

impl Default for LaserSpeeds {
    fn default() -> Self {
        Self {
            idle: DEFAULT_IDLE_SPEED,
            active: DEFAULT_ACTIVE_SPEED,
        }
    }
}

/// Parameters for scanline engraving estimates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngraveParams {
    speeds: LaserSpeeds,
    scanline: f64,
}

impl EngraveParams {
    /// Creates engraving parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `scanline` is not a positive finite number.
    pub fn new(speeds: LaserSpeeds, scanline: f64) -> Result<Self> {
        Ok(Self {
            speeds,
            scanline: require_positive("scanline distance", scanline)?,
        })
    }

    /// Returns the head speeds.
    #[must_use]
    pub fn speeds(&self) -> LaserSpeeds {
        self.speeds
    }

    /// Returns the distance between scanlines.
    #[must_use]
    pub fn scanline(&self) -> f64 {
        self.scanline
    }
}

impl Default for EngraveParams {
    fn default() -> Self {
        Self {
            speeds: LaserSpeeds {
                idle: DEFAULT_ENGRAVE_IDLE_SPEED,
                active: DEFAULT_ENGRAVE_ACTIVE_SPEED,
            },
            scanline: DEFAULT_SCANLINE,
        }
    }
}
