//! Lights and fog
//!
//! Locally the rig is a three-way switch on time of day; with a remote
//! snapshot it follows the environmental factors.

use serde::Serialize;

use super::color::Rgb;
use super::health::normalize;
use crate::models::ForestSnapshot;
use crate::store::TimeOfDay;

/// Fog near plane for the linear (remote) fog
pub const FOG_NEAR: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Fog {
    Exponential { color: Rgb, density: f64 },
    Linear { color: Rgb, near: f64, far: f64 },
}

impl Fog {
    pub fn color(&self) -> Rgb {
        match self {
            Fog::Exponential { color, .. } | Fog::Linear { color, .. } => *color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Lighting {
    pub ambient: Rgb,
    pub ambient_intensity: f64,
    pub directional: Rgb,
    pub directional_intensity: f64,
    pub fog: Fog,
}

impl Lighting {
    pub fn for_time_of_day(time_of_day: TimeOfDay, health: f64) -> Self {
        let (ambient, directional, intensity, fog_color, density) = match time_of_day {
            TimeOfDay::Night => (
                Rgb(0x1a, 0x27, 0x44),
                Rgb(0x4a, 0x5f, 0x8f),
                0.3,
                Rgb(0x0b, 0x13, 0x2b),
                0.1,
            ),
            TimeOfDay::Evening => (
                Rgb(0xff, 0x9a, 0x56),
                Rgb(0xff, 0xa8, 0x56),
                0.6,
                Rgb(0xff, 0x9a, 0x56),
                0.05,
            ),
            TimeOfDay::Day if normalize(health) < 0.4 => (
                Rgb::WHITE,
                Rgb(0xff, 0xe1, 0x56),
                1.0,
                Rgb(0x8a, 0x9b, 0xa8),
                0.08,
            ),
            TimeOfDay::Day => (
                Rgb::WHITE,
                Rgb(0xff, 0xe1, 0x56),
                1.0,
                Rgb(0xa7, 0xe8, 0xbd),
                0.02,
            ),
        };

        Self {
            ambient,
            ambient_intensity: intensity * 0.5,
            directional,
            directional_intensity: intensity,
            fog: Fog::Exponential {
                color: fog_color,
                density,
            },
        }
    }

    pub fn from_snapshot(snapshot: &ForestSnapshot) -> Self {
        let air = snapshot.air();
        Self {
            ambient: Rgb::WHITE,
            ambient_intensity: air / 100.0 * 0.5 + 0.3,
            directional: Rgb::WHITE,
            directional_intensity: snapshot.sunlight() / 100.0 * 1.5,
            fog: Fog::Linear {
                color: Rgb(0xe0, 0xe0, 0xe0),
                near: FOG_NEAR,
                far: 40.0 - air / 5.0,
            },
        }
    }
}

/// Ground tint from soil quality
pub fn ground_color(soil_quality: f64) -> Rgb {
    if soil_quality >= 75.0 {
        Rgb(0x2d, 0x50, 0x16)
    } else if soil_quality >= 50.0 {
        Rgb(0x55, 0x6b, 0x2f)
    } else if soil_quality >= 25.0 {
        Rgb(0x8b, 0x73, 0x55)
    } else {
        Rgb(0x65, 0x43, 0x21)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_night_rig() {
        let lighting = Lighting::for_time_of_day(TimeOfDay::Night, 0.9);
        assert_eq!(lighting.directional_intensity, 0.3);
        assert_eq!(
            lighting.fog,
            Fog::Exponential {
                color: Rgb(0x0b, 0x13, 0x2b),
                density: 0.1
            }
        );
    }

    #[test]
    fn test_day_fog_thickens_when_unhealthy() {
        let clear = Lighting::for_time_of_day(TimeOfDay::Day, 0.4);
        let smog = Lighting::for_time_of_day(TimeOfDay::Day, 0.39);
        assert_eq!(clear.fog.color(), Rgb(0xa7, 0xe8, 0xbd));
        assert_eq!(smog.fog.color(), Rgb(0x8a, 0x9b, 0xa8));
    }

    #[test]
    fn test_snapshot_lighting() {
        let snapshot = ForestSnapshot {
            sunlight_level: Some(80.0),
            air_quality: Some(40.0),
            ..Default::default()
        };
        let lighting = Lighting::from_snapshot(&snapshot);
        assert!((lighting.directional_intensity - 1.2).abs() < 1e-9);
        assert!((lighting.ambient_intensity - 0.5).abs() < 1e-9);
        assert_eq!(
            lighting.fog,
            Fog::Linear {
                color: Rgb(0xe0, 0xe0, 0xe0),
                near: 10.0,
                far: 32.0
            }
        );
    }

    #[test]
    fn test_snapshot_defaults_to_fifty() {
        let lighting = Lighting::from_snapshot(&ForestSnapshot::default());
        assert!((lighting.directional_intensity - 0.75).abs() < 1e-9);
        assert!((lighting.ambient_intensity - 0.55).abs() < 1e-9);
    }

    #[test]
    fn test_ground_bands() {
        assert_eq!(ground_color(75.0), Rgb(0x2d, 0x50, 0x16));
        assert_eq!(ground_color(50.0), Rgb(0x55, 0x6b, 0x2f));
        assert_eq!(ground_color(24.9), Rgb(0x65, 0x43, 0x21));
    }
}
