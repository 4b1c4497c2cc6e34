//! Vessels: a centerline plus a radius profile encoding pathology.
//!
//! The radius along a vessel is modulated by a half-period sine over a
//! sub-interval of the centerline:
//!
//! stenosis: r(t) = r₀ · (1 − s · sin(π · (t − a)/(b − a)))   for a < t < b
//! aneurysm: r(t) = r₀ · (1 + s · sin(π · (t − a)/(b − a)))   for a < t < b
//!
//! and r(t) = r₀ elsewhere. The sine vanishes at both ends of the interval,
//! so the profile is continuous.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use super::Centerline;
use crate::color::{ANEURYSMAL_VESSEL, STENOTIC_VESSEL};

/// Largest stenosis severity accepted (fraction of the base radius removed)
pub const MAX_STENOSIS_SEVERITY: f32 = 0.95;

/// Smallest base radius accepted
pub const MIN_BASE_RADIUS: f32 = 1e-3;

/// Local radius modulation along a vessel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Pathology {
    /// Narrowing of the lumen
    Stenosis { start: f32, end: f32, severity: f32 },
    /// Bulge of the vessel wall
    Aneurysm { start: f32, end: f32, severity: f32 },
}

impl Pathology {
    /// Pathology attached to a vessel by name
    ///
    /// The middle cerebral artery carries a 55% stenosis over its middle half;
    /// the carotid carries a 65% aneurysm just past its midpoint. Other
    /// vessels are healthy.
    pub fn for_vessel(name: &str) -> Option<Self> {
        match name {
            STENOTIC_VESSEL => Some(Self::Stenosis {
                start: 0.25,
                end: 0.75,
                severity: 0.55,
            }),
            ANEURYSMAL_VESSEL => Some(Self::Aneurysm {
                start: 0.45,
                end: 0.65,
                severity: 0.65,
            }),
            _ => None,
        }
    }

    /// Parameter interval (start, end) affected by the pathology
    pub fn interval(&self) -> (f32, f32) {
        match *self {
            Self::Stenosis { start, end, .. } | Self::Aneurysm { start, end, .. } => (start, end),
        }
    }

    /// Multiplier applied to the base radius at `t`
    pub fn radius_factor(&self, t: f32) -> f32 {
        let (start, end) = self.interval();
        if !(end > start) || t <= start || t >= end {
            return 1.0;
        }

        let bump = ((t - start) / (end - start) * PI).sin();
        match *self {
            Self::Stenosis { severity, .. } => 1.0 - bump * severity,
            Self::Aneurysm { severity, .. } => 1.0 + bump * severity,
        }
    }

    /// Clamp severities into the range that keeps the radius positive
    fn sanitized(self) -> Self {
        match self {
            Self::Stenosis { start, end, severity } => {
                let clamped = if severity.is_finite() {
                    severity.clamp(0.0, MAX_STENOSIS_SEVERITY)
                } else {
                    0.0
                };
                if clamped != severity {
                    log::warn!("Stenosis severity {} clamped to {}", severity, clamped);
                }
                Self::Stenosis { start, end, severity: clamped }
            }
            Self::Aneurysm { start, end, severity } => {
                let clamped = if severity.is_finite() { severity.max(0.0) } else { 0.0 };
                if clamped != severity {
                    log::warn!("Aneurysm severity {} clamped to {}", severity, clamped);
                }
                Self::Aneurysm { start, end, severity: clamped }
            }
        }
    }
}

/// A named vessel segment
#[derive(Debug, Clone)]
pub struct Vessel {
    /// Vessel identifier (e.g. "carotid", "mca", "aca")
    pub name: String,
    /// Central axis of the vessel
    pub centerline: Centerline,
    /// Unmodulated radius (scene units)
    pub base_radius: f32,
    /// Characteristic flow speed for particle advection (curve lengths per second, halved)
    pub flow_speed: f32,
    /// Radius modulation, if any
    pub pathology: Option<Pathology>,
}

impl Vessel {
    /// Create a vessel whose pathology follows from its name
    pub fn new(name: impl Into<String>, centerline: Centerline, base_radius: f32) -> Self {
        let name = name.into();
        let pathology = Pathology::for_vessel(&name);

        let base_radius = if base_radius.is_finite() && base_radius >= MIN_BASE_RADIUS {
            base_radius
        } else {
            log::warn!(
                "Vessel '{}' base radius {} raised to {}",
                name,
                base_radius,
                MIN_BASE_RADIUS
            );
            MIN_BASE_RADIUS
        };

        Self {
            name,
            centerline,
            base_radius,
            flow_speed: 0.0,
            pathology: pathology.map(Pathology::sanitized),
        }
    }

    /// Set the characteristic flow speed
    pub fn with_flow_speed(mut self, flow_speed: f32) -> Self {
        self.flow_speed = flow_speed;
        self
    }

    /// Override the pathology (`None` makes the vessel healthy)
    pub fn with_pathology(mut self, pathology: Option<Pathology>) -> Self {
        self.pathology = pathology.map(Pathology::sanitized);
        self
    }

    /// Effective radius at parameter `t`
    pub fn radius_at(&self, t: f32) -> f32 {
        let factor = self
            .pathology
            .map(|p| p.radius_factor(t))
            .unwrap_or(1.0);
        self.base_radius * factor
    }

    /// Minimum and maximum effective radius over `samples + 1` points
    pub fn radius_range(&self, samples: usize) -> (f32, f32) {
        let samples = samples.max(1);
        (0..=samples)
            .map(|i| self.radius_at(i as f32 / samples as f32))
            .fold((f32::MAX, f32::MIN), |(lo, hi), r| (lo.min(r), hi.max(r)))
    }
}
