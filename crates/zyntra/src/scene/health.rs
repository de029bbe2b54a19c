//! Health banding and tree styles
//!
//! Health maps onto five discrete bands rather than a gradient; each band
//! fixes a leaf colour and a shrink factor. Typed trees from a remote
//! snapshot skip the banding and use their own fixed style.

use serde::Serialize;

use super::color::Rgb;

/// Health used whenever none is supplied
pub const DEFAULT_HEALTH: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthBand {
    Thriving,
    Healthy,
    Fair,
    Struggling,
    Wilting,
}

impl HealthBand {
    /// Out-of-range and NaN health is treated as the default
    pub fn from_health(health: f64) -> Self {
        let h = normalize(health);
        if h > 0.8 {
            HealthBand::Thriving
        } else if h > 0.6 {
            HealthBand::Healthy
        } else if h > 0.4 {
            HealthBand::Fair
        } else if h > 0.2 {
            HealthBand::Struggling
        } else {
            HealthBand::Wilting
        }
    }

    pub fn leaf_color(self) -> Rgb {
        match self {
            HealthBand::Thriving => Rgb(0x00, 0xa8, 0x78),
            HealthBand::Healthy => Rgb(0x2f, 0xa8, 0x78),
            HealthBand::Fair => Rgb(0x5f, 0xa8, 0x78),
            HealthBand::Struggling => Rgb(0x7a, 0x8a, 0x5a),
            HealthBand::Wilting => Rgb(0x7a, 0x7a, 0x5a),
        }
    }

    /// Multiplier on tree size
    pub fn shrink(self) -> f64 {
        match self {
            HealthBand::Thriving => 1.0,
            HealthBand::Healthy => 0.94,
            HealthBand::Fair => 0.88,
            HealthBand::Struggling => 0.82,
            HealthBand::Wilting => 0.76,
        }
    }
}

/// Clamp to 0..=1, defaulting non-finite input
pub fn normalize(health: f64) -> f64 {
    if health.is_finite() {
        health.clamp(0.0, 1.0)
    } else {
        DEFAULT_HEALTH
    }
}

pub fn trunk_color(health: f64) -> Rgb {
    if normalize(health) > 0.6 {
        Rgb(0x4a, 0x35, 0x20)
    } else {
        Rgb(0x3a, 0x25, 0x10)
    }
}

/// Canopy becomes translucent when the forest is close to dying
pub fn leaf_opacity(health: f64) -> f64 {
    if normalize(health) > 0.3 {
        1.0
    } else {
        0.6
    }
}

pub fn grass_color(health: f64) -> Rgb {
    if normalize(health) > 0.6 {
        Rgb(0x4c, 0xaf, 0x50)
    } else {
        Rgb(0x6b, 0x8e, 0x23)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeType {
    Healthy,
    Growing,
    Wilting,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeStyle {
    pub trunk: Rgb,
    pub leaves: Rgb,
    /// Scale range, lower bound inclusive
    pub scale: (f64, f64),
    pub sways: bool,
}

impl TreeType {
    pub const ALL: [TreeType; 4] = [
        TreeType::Healthy,
        TreeType::Growing,
        TreeType::Wilting,
        TreeType::Dead,
    ];

    pub fn style(self) -> TreeStyle {
        match self {
            TreeType::Healthy => TreeStyle {
                trunk: Rgb(0x2d, 0x50, 0x16),
                leaves: Rgb(0x00, 0xff, 0x00),
                scale: (0.8, 1.2),
                sways: true,
            },
            TreeType::Growing => TreeStyle {
                trunk: Rgb(0x90, 0xee, 0x90),
                leaves: Rgb(0xff, 0xff, 0x00),
                scale: (0.6, 0.9),
                sways: true,
            },
            TreeType::Wilting => TreeStyle {
                trunk: Rgb(0xff, 0x8c, 0x00),
                leaves: Rgb(0xff, 0xa5, 0x00),
                scale: (0.5, 0.8),
                sways: true,
            },
            TreeType::Dead => TreeStyle {
                trunk: Rgb(0x8b, 0x45, 0x13),
                leaves: Rgb(0x69, 0x69, 0x69),
                scale: (0.4, 0.6),
                sways: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(HealthBand::from_health(0.81), HealthBand::Thriving);
        assert_eq!(HealthBand::from_health(0.8), HealthBand::Healthy);
        assert_eq!(HealthBand::from_health(0.6), HealthBand::Fair);
        assert_eq!(HealthBand::from_health(0.4), HealthBand::Struggling);
        assert_eq!(HealthBand::from_health(0.2), HealthBand::Wilting);
        assert_eq!(HealthBand::from_health(0.0), HealthBand::Wilting);
    }

    #[test]
    fn test_out_of_range_health() {
        assert_eq!(HealthBand::from_health(7.0), HealthBand::Thriving);
        assert_eq!(HealthBand::from_health(-1.0), HealthBand::Wilting);
        assert_eq!(HealthBand::from_health(f64::NAN), HealthBand::Fair);
    }

    #[test]
    fn test_trees_shrink_as_health_drops() {
        let shrinks: Vec<f64> = [0.9, 0.7, 0.5, 0.3, 0.1]
            .into_iter()
            .map(|h| HealthBand::from_health(h).shrink())
            .collect();
        assert!(shrinks.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_opacity_and_grass() {
        assert_eq!(leaf_opacity(0.31), 1.0);
        assert_eq!(leaf_opacity(0.3), 0.6);
        assert_eq!(grass_color(0.7), Rgb(0x4c, 0xaf, 0x50));
        assert_eq!(trunk_color(0.6), Rgb(0x3a, 0x25, 0x10));
    }

    #[test]
    fn test_dead_trees_do_not_sway() {
        assert!(!TreeType::Dead.style().sways);
        assert!(TreeType::ALL[..3].iter().all(|t| t.style().sways));
    }
}
