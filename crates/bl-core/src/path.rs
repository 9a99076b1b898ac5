//! Path geometry and the optional bottleneck.
//!
//! The simulated path is a straight one-directional strip.  Its lateral
//! domain is the nominal width plus an edge margin on each side, so a 2 m
//! path spans `y ∈ [0, 3]`.  Cyclists keep `side_obstacle` metres away from
//! either edge of that domain when searching for lateral gaps.

use crate::{BlError, BlResult, Position};

/// Geometry of the simulated path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathConfig {
    /// Exit boundary.  Agents whose `x` reaches this value leave the path.
    pub length: f64,

    /// Circumference of the periodic longitudinal domain.  Slightly larger
    /// than `length` so exiting agents are never wrapped onto the entrance.
    pub domain_length: f64,

    /// Nominal rideable width (m).
    pub width: f64,

    /// Extra space added on each side of the nominal width (m).
    pub edge_margin: f64,

    /// Clearance kept from either lateral edge when searching gaps (m).
    pub side_obstacle: f64,

    /// Bottleneck width (m): one of 1.0, 1.5 or 2.0, or `None` for no
    /// bottleneck.
    pub bottleneck_width: Option<f64>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            length:           300.0,
            domain_length:    300.1,
            width:            2.0,
            edge_margin:      0.5,
            side_obstacle:    0.2,
            bottleneck_width: None,
        }
    }
}

impl PathConfig {
    /// Full lateral extent of the domain: nominal width plus both margins.
    #[inline]
    pub fn lateral_width(&self) -> f64 {
        self.width + 2.0 * self.edge_margin
    }

    /// Left-most lateral coordinate a gap may extend to.
    #[inline]
    pub fn gap_left_edge(&self) -> f64 {
        self.lateral_width() - self.side_obstacle
    }

    /// Right-most lateral coordinate a gap may extend to.
    #[inline]
    pub fn gap_right_edge(&self) -> f64 {
        self.side_obstacle
    }

    /// The configured bottleneck, if any.
    pub fn bottleneck(&self) -> BlResult<Option<Bottleneck>> {
        match self.bottleneck_width {
            None => Ok(None),
            Some(w) if w == 0.0 => Ok(None),
            Some(w) => Bottleneck::from_width(w).map(Some),
        }
    }

    /// Check that the geometry is usable.
    pub fn validate(&self) -> BlResult<()> {
        let finite = [self.length, self.domain_length, self.width, self.edge_margin, self.side_obstacle]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(BlError::Config("path geometry must be finite".into()));
        }
        if self.length <= 0.0 || self.width <= 0.0 {
            return Err(BlError::Config(format!(
                "path length ({}) and width ({}) must be positive",
                self.length, self.width
            )));
        }
        if self.domain_length <= self.length {
            return Err(BlError::Config(format!(
                "domain length {} must exceed the exit boundary {}",
                self.domain_length, self.length
            )));
        }
        if self.edge_margin < 0.0 || self.side_obstacle < 0.0 {
            return Err(BlError::Config("edge margin and side obstacle must be non-negative".into()));
        }
        if 2.0 * self.side_obstacle >= self.lateral_width() {
            return Err(BlError::Config(format!(
                "side obstacles ({} m each) leave no room on a {} m wide domain",
                self.side_obstacle,
                self.lateral_width()
            )));
        }
        self.bottleneck()?;
        Ok(())
    }
}

// ── Bottleneck ────────────────────────────────────────────────────────────────

/// A fixed narrowing of the path built from a diagonal row of static
/// obstacles on the left-hand side, shortly before the exit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Bottleneck {
    /// 1.0 m of remaining width: four obstacles.
    Width1_0,
    /// 1.5 m of remaining width: three obstacles.
    Width1_5,
    /// 2.0 m of remaining width: two obstacles.
    Width2_0,
}

/// Obstacle anchors `(x, y)` laid out for a 4 m lateral domain.
const ANCHORS_1_0: [(f64, f64); 4] = [(254.0, 2.4), (253.0, 2.8), (252.0, 3.2), (251.0, 3.6)];
const ANCHORS_1_5: [(f64, f64); 3] = [(253.0, 2.9), (252.0, 3.3), (251.0, 3.7)];
const ANCHORS_2_0: [(f64, f64); 2] = [(252.0, 3.4), (251.0, 3.8)];

/// Lateral domain width the anchors were laid out for.
const ANCHOR_DOMAIN_WIDTH: f64 = 4.0;

impl Bottleneck {
    pub fn from_width(width: f64) -> BlResult<Self> {
        if width == 1.0 {
            Ok(Bottleneck::Width1_0)
        } else if width == 1.5 {
            Ok(Bottleneck::Width1_5)
        } else if width == 2.0 {
            Ok(Bottleneck::Width2_0)
        } else {
            Err(BlError::Config(format!(
                "bottleneck width {width} is not one of 1.0, 1.5, 2.0"
            )))
        }
    }

    /// Obstacle positions, shifted so the row hugs the left edge of a
    /// domain `lateral_width` metres wide.
    pub fn obstacle_positions(self, lateral_width: f64) -> Vec<Position> {
        let anchors: &[(f64, f64)] = match self {
            Bottleneck::Width1_0 => &ANCHORS_1_0,
            Bottleneck::Width1_5 => &ANCHORS_1_5,
            Bottleneck::Width2_0 => &ANCHORS_2_0,
        };
        let shift = ANCHOR_DOMAIN_WIDTH - lateral_width;
        anchors
            .iter()
            .map(|&(x, y)| Position::new(x, y - shift))
            .collect()
    }
}
