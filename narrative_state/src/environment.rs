//! Environment profiles - how the background world feels for each domain,
//! and the visitor's motion/theme preferences.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::Domain;

/// Cross-fade between two environment profiles.
pub const ENVIRONMENT_TRANSITION: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Light,
    Dark,
    #[default]
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FocalArea {
    #[default]
    Center,
    Left,
    Right,
    Top,
    Bottom,
}

/// Visual parameters applied to the persistent background media.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentProfile {
    pub tone: Tone,
    /// Playback multiplier, 0.5 - 2.0.
    pub motion_speed: f32,
    /// Blur radius in pixels, 0 - 20.
    pub blur_level: f32,
    pub grain: f32,
    pub focal_area: FocalArea,
    pub opacity: f32,
    pub scale: f32,
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
}

impl EnvironmentProfile {
    /// Profile for the selected domain; no domain gets the neutral default.
    pub fn for_domain(domain: Option<Domain>) -> Self {
        match domain {
            // Bright, structured, fast
            Some(Domain::Web) => Self {
                tone: Tone::Light,
                motion_speed: 1.2,
                blur_level: 2.0,
                grain: 0.1,
                brightness: 1.2,
                contrast: 1.1,
                ..Self::default()
            },
            // Kinetic
            Some(Domain::Mobile) => Self {
                motion_speed: 1.5,
                grain: 0.15,
                opacity: 0.35,
                scale: 1.1,
                brightness: 1.1,
                saturation: 1.1,
                ..Self::default()
            },
            // Dark, slow, abstract
            Some(Domain::Ai) => Self {
                tone: Tone::Dark,
                motion_speed: 0.6,
                blur_level: 8.0,
                grain: 0.3,
                opacity: 0.5,
                scale: 1.2,
                brightness: 0.7,
                contrast: 1.3,
                saturation: 0.8,
                ..Self::default()
            },
            // Wide, cloudy, stable
            Some(Domain::Migration) => Self {
                motion_speed: 0.8,
                blur_level: 4.0,
                grain: 0.2,
                scale: 0.9,
                saturation: 0.9,
                ..Self::default()
            },
            None => Self::default(),
        }
    }
}

impl Default for EnvironmentProfile {
    fn default() -> Self {
        Self {
            tone: Tone::Neutral,
            motion_speed: 1.0,
            blur_level: 3.0,
            grain: 0.15,
            focal_area: FocalArea::Center,
            opacity: 0.4,
            scale: 1.0,
            brightness: 1.0,
            contrast: 1.0,
            saturation: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// Accessibility and theme signals read from the visitor's environment.
///
/// These affect rendering only; narrative state and topology never read them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MotionPreference {
    pub reduced_motion: bool,
    pub theme: Theme,
}

impl MotionPreference {
    /// Animated reveals collapse to instant display under reduced motion.
    pub fn reveal_duration(&self, base: Duration) -> Duration {
        if self.reduced_motion {
            Duration::ZERO
        } else {
            base
        }
    }

    /// Transition used when the environment profile changes.
    pub fn environment_transition(&self) -> Duration {
        self.reveal_duration(ENVIRONMENT_TRANSITION)
    }
}
