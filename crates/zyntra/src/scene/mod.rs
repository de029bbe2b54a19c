//! Scene parameters for the forest view
//!
//! A renderer consumes `SceneParams`; this module only decides what goes
//! where and in which colour. Input is either the local wellness state
//! (health plus time of day) or a remote `ForestSnapshot`. Mapping never
//! fails: missing inputs take defaults and an unusable snapshot falls back
//! to the local scene.

pub mod animation;
pub mod color;
pub mod health;
pub mod layout;
pub mod lighting;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::warn;

use crate::models::{ForestSnapshot, SceneFeatures, Season, Weather};
use crate::store::{TimeOfDay, WellnessState};

pub use color::Rgb;
pub use health::{HealthBand, TreeType};
pub use layout::Vec3;
pub use lighting::{Fog, Lighting};

/// Trees in every scene
pub const TREE_COUNT: u32 = 30;
pub const RING_RADIUS: f64 = 15.0;
pub const RING_JITTER: f64 = 5.0;
pub const TREE_SPREAD: f64 = 20.0;
pub const MAX_FLOWERS: usize = 20;
pub const FLOWER_SPREAD: f64 = 18.0;
pub const ROCK_COUNT: usize = 15;
pub const ROCK_SPREAD: f64 = 22.0;
pub const BIRD_COUNT: usize = 3;
pub const BUTTERFLY_COUNT: usize = 5;
pub const FIREFLY_COUNT: usize = 30;
pub const GRASS_BLADES: usize = 200;
pub const BENCH_POSITION: Vec3 = Vec3::new(5.0, 0.0, 8.0);

const LOCAL_GROUND: Rgb = Rgb(0x1a, 0x4d, 0x2e);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneSource {
    Local,
    Remote,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreePlacement {
    pub position: Vec3,
    pub scale: f64,
    pub trunk: Rgb,
    pub leaves: Rgb,
    pub opacity: f64,
    pub sways: bool,
    /// Set for trees coming from a snapshot's typed counts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<TreeType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rock {
    pub position: Vec3,
    pub scale: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Grass {
    pub color: Rgb,
    pub blades: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneParams {
    pub source: SceneSource,
    pub seed: u64,
    pub health: f64,
    pub band: HealthBand,
    pub time_of_day: TimeOfDay,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<Season>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<Weather>,
    pub lighting: Lighting,
    pub ground: Rgb,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grass: Option<Grass>,
    pub features: SceneFeatures,
    pub trees: Vec<TreePlacement>,
    pub flowers: Vec<Vec3>,
    pub rocks: Vec<Rock>,
    pub birds: usize,
    pub butterflies: usize,
    pub fireflies: Vec<layout::Firefly>,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bench: Option<Vec3>,
}

/// Decorations unlocked by local health alone
pub fn local_features(health: f64) -> SceneFeatures {
    let h = health::normalize(health);
    SceneFeatures {
        flowers: h >= 0.8,
        birds: h >= 0.7,
        butterflies: h >= 0.6,
        ..SceneFeatures::default()
    }
}

impl SceneParams {
    /// Scene driven by the local eco score
    pub fn from_local(health: f64, time_of_day: TimeOfDay, seed: u64) -> Self {
        let health = health::normalize(health);
        let band = HealthBand::from_health(health);
        let features = local_features(health);
        let mut rng = StdRng::seed_from_u64(seed);

        let positions = layout::ring(&mut rng, TREE_COUNT as usize, RING_RADIUS, RING_JITTER);
        let trees = positions
            .into_iter()
            .map(|position| TreePlacement {
                position,
                scale: layout::scale_in(&mut rng, (0.8, 1.2)) * band.shrink(),
                trunk: health::trunk_color(health),
                leaves: band.leaf_color(),
                opacity: health::leaf_opacity(health),
                sways: true,
                kind: None,
            })
            .collect();

        let flowers = if features.flowers {
            layout::scatter(&mut rng, MAX_FLOWERS, FLOWER_SPREAD, 0.0)
        } else {
            Vec::new()
        };

        let fireflies = if health > 0.5 {
            layout::fireflies(&mut rng, FIREFLY_COUNT, 30.0, 10.0)
        } else {
            Vec::new()
        };

        Self {
            source: SceneSource::Local,
            seed,
            health,
            band,
            time_of_day,
            season: None,
            weather: None,
            lighting: Lighting::for_time_of_day(time_of_day, health),
            ground: LOCAL_GROUND,
            grass: Some(Grass {
                color: health::grass_color(health),
                blades: GRASS_BLADES,
            }),
            features,
            trees,
            flowers,
            rocks: Vec::new(),
            birds: if features.birds { BIRD_COUNT } else { 0 },
            butterflies: if features.butterflies { BUTTERFLY_COUNT } else { 0 },
            fireflies,
            stream: false,
            bench: None,
        }
    }

    pub fn from_state(state: &WellnessState, seed: u64) -> Self {
        Self::from_local(state.forest_health(), state.time_of_day(), seed)
    }

    /// Scene driven by a remote snapshot's typed tree counts and factors
    pub fn from_snapshot(snapshot: &ForestSnapshot, seed: u64) -> Self {
        let health = health::normalize(
            snapshot
                .health_fraction()
                .or_else(|| snapshot.healthy_percent().map(|p| p / 100.0))
                .unwrap_or(health::DEFAULT_HEALTH),
        );
        let features = snapshot.features();
        let mut rng = StdRng::seed_from_u64(seed);

        let counts = snapshot.tree_counts();
        let split = layout::partition(
            [counts.healthy, counts.growing, counts.wilting, counts.dead],
            TREE_COUNT,
        );

        let mut trees = Vec::with_capacity(TREE_COUNT as usize);
        for (kind, n) in TreeType::ALL.into_iter().zip(split) {
            let style = kind.style();
            for position in layout::scatter(&mut rng, n as usize, TREE_SPREAD, 0.0) {
                trees.push(TreePlacement {
                    position,
                    scale: layout::scale_in(&mut rng, style.scale),
                    trunk: style.trunk,
                    leaves: style.leaves,
                    opacity: 1.0,
                    sways: style.sways,
                    kind: Some(kind),
                });
            }
        }

        let flowers = if features.flowers {
            let count = (counts.healthy as usize).min(MAX_FLOWERS);
            layout::scatter(&mut rng, count, FLOWER_SPREAD, 0.0)
        } else {
            Vec::new()
        };

        let rocks = if features.rocks {
            layout::scatter(&mut rng, ROCK_COUNT, ROCK_SPREAD, 0.0)
                .into_iter()
                .map(|position| Rock {
                    position,
                    scale: layout::scale_in(&mut rng, (0.5, 1.5)),
                })
                .collect()
        } else {
            Vec::new()
        };

        let time_of_day = snapshot
            .time_of_day
            .as_deref()
            .and_then(|t| t.parse().ok())
            .unwrap_or_default();

        Self {
            source: SceneSource::Remote,
            seed,
            health,
            band: HealthBand::from_health(health),
            time_of_day,
            season: Some(snapshot.season),
            weather: Some(snapshot.weather),
            lighting: Lighting::from_snapshot(snapshot),
            ground: lighting::ground_color(snapshot.soil()),
            grass: None,
            features,
            trees,
            flowers,
            rocks,
            birds: if features.birds { BIRD_COUNT } else { 0 },
            butterflies: if features.butterflies { BUTTERFLY_COUNT } else { 0 },
            fireflies: Vec::new(),
            stream: features.stream,
            bench: features.bench.then_some(BENCH_POSITION),
        }
    }

    /// Use the snapshot when it carries tree counts, else the local scene
    pub fn resolve(snapshot: Option<&ForestSnapshot>, state: &WellnessState, seed: u64) -> Self {
        match snapshot {
            Some(s) if s.has_tree_counts() => Self::from_snapshot(s, seed),
            Some(_) => {
                warn!("forest snapshot has no tree counts, using local scene");
                Self::from_state(state, seed)
            }
            None => Self::from_state(state, seed),
        }
    }

    pub fn tree_count(&self, kind: TreeType) -> usize {
        self.trees.iter().filter(|t| t.kind == Some(kind)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> ForestSnapshot {
        ForestSnapshot {
            healthy_trees: Some(12),
            growing_trees: Some(8),
            wilting_trees: Some(6),
            dead_trees: Some(4),
            soil_quality: Some(80.0),
            has_flowers: true,
            has_birds: true,
            has_bench: true,
            has_rocks: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_local_scene_shape() {
        let scene = SceneParams::from_local(0.9, TimeOfDay::Day, 42);
        assert_eq!(scene.source, SceneSource::Local);
        assert_eq!(scene.trees.len(), 30);
        assert_eq!(scene.fireflies.len(), 30);
        assert_eq!(scene.flowers.len(), 20);
        assert_eq!(scene.birds, 3);
        assert_eq!(scene.butterflies, 5);
        assert!(scene.trees.iter().all(|t| t.leaves == Rgb(0x00, 0xa8, 0x78)));
        assert!(scene.trees.iter().all(|t| (0.8..1.2).contains(&t.scale)));
    }

    #[test]
    fn test_low_health_scene() {
        let scene = SceneParams::from_local(0.25, TimeOfDay::Night, 42);
        assert!(scene.fireflies.is_empty());
        assert!(scene.flowers.is_empty());
        assert_eq!(scene.birds, 0);
        assert!(scene.trees.iter().all(|t| t.opacity == 0.6));
        assert!(scene.trees.iter().all(|t| t.scale < 1.2 * 0.82 + 1e-9));
    }

    #[test]
    fn test_fireflies_need_more_than_half_health() {
        assert!(SceneParams::from_local(0.5, TimeOfDay::Day, 1).fireflies.is_empty());
        assert_eq!(SceneParams::from_local(0.51, TimeOfDay::Day, 1).fireflies.len(), 30);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = SceneParams::from_local(0.7, TimeOfDay::Evening, 7);
        let b = SceneParams::from_local(0.7, TimeOfDay::Evening, 7);
        let c = SceneParams::from_local(0.7, TimeOfDay::Evening, 8);
        assert_eq!(a, b);
        assert_ne!(a.trees, c.trees);
    }

    #[test]
    fn test_snapshot_scene() {
        let scene = SceneParams::from_snapshot(&snapshot(), 3);
        assert_eq!(scene.source, SceneSource::Remote);
        assert_eq!(scene.trees.len(), 30);
        assert_eq!(scene.tree_count(TreeType::Healthy), 12);
        assert_eq!(scene.tree_count(TreeType::Dead), 4);
        assert_eq!(scene.flowers.len(), 12);
        assert_eq!(scene.rocks.len(), 15);
        assert_eq!(scene.birds, 3);
        assert_eq!(scene.butterflies, 0);
        assert_eq!(scene.bench, Some(BENCH_POSITION));
        assert!(!scene.stream);
        assert_eq!(scene.ground, Rgb(0x2d, 0x50, 0x16));
        assert!(scene
            .trees
            .iter()
            .filter(|t| t.kind == Some(TreeType::Dead))
            .all(|t| !t.sways && (0.4..0.6).contains(&t.scale)));
    }

    #[test]
    fn test_snapshot_counts_rescaled_to_thirty() {
        let snap = ForestSnapshot {
            healthy_trees: Some(100),
            growing_trees: Some(50),
            wilting_trees: Some(50),
            ..Default::default()
        };
        let scene = SceneParams::from_snapshot(&snap, 3);
        assert_eq!(scene.trees.len(), 30);
        assert_eq!(scene.tree_count(TreeType::Healthy), 15);
        assert_eq!(scene.tree_count(TreeType::Growing), 8);
        assert_eq!(scene.tree_count(TreeType::Wilting), 7);
    }

    #[test]
    fn test_extreme_counts_do_not_overflow() {
        let snap: ForestSnapshot =
            serde_json::from_str(r#"{"healthy_trees": 4294967295, "growing_trees": 1}"#).unwrap();
        assert_eq!(snap.tree_counts().total(), 4_294_967_296);
        assert!(snap.has_tree_counts());

        let scene = SceneParams::resolve(Some(&snap), &WellnessState::new(), 1);
        assert_eq!(scene.source, SceneSource::Remote);
        assert_eq!(scene.trees.len(), 30);
        assert_eq!(scene.tree_count(TreeType::Healthy), 30);
    }

    #[test]
    fn test_health_fallback_stays_in_range() {
        let snap = ForestSnapshot {
            total_trees: Some(10),
            healthy_trees: Some(25),
            growing_trees: Some(5),
            ..Default::default()
        };
        let scene = SceneParams::from_snapshot(&snap, 3);
        assert_eq!(scene.health, 1.0);
        assert_eq!(scene.band, HealthBand::from_health(1.0));
    }

    #[test]
    fn test_flowers_follow_raw_healthy_count() {
        let snap = ForestSnapshot {
            healthy_trees: Some(100),
            growing_trees: Some(100),
            has_flowers: true,
            ..Default::default()
        };
        let scene = SceneParams::from_snapshot(&snap, 3);
        assert_eq!(scene.tree_count(TreeType::Healthy), 15);
        assert_eq!(scene.flowers.len(), 20);

        let few = ForestSnapshot {
            healthy_trees: Some(2),
            dead_trees: Some(1),
            has_flowers: true,
            ..Default::default()
        };
        assert_eq!(SceneParams::from_snapshot(&few, 3).flowers.len(), 2);
    }

    #[test]
    fn test_flowers_capped_at_twenty() {
        let snap = ForestSnapshot {
            healthy_trees: Some(30),
            has_flowers: true,
            ..Default::default()
        };
        assert_eq!(SceneParams::from_snapshot(&snap, 3).flowers.len(), 20);
    }

    #[test]
    fn test_resolve_falls_back_to_local() {
        let state = WellnessState::new();
        let empty = ForestSnapshot::default();

        let scene = SceneParams::resolve(Some(&empty), &state, 9);
        assert_eq!(scene.source, SceneSource::Local);
        assert_eq!(scene.health, 0.5);
        assert_eq!(scene, SceneParams::resolve(None, &state, 9));

        let scene = SceneParams::resolve(Some(&snapshot()), &state, 9);
        assert_eq!(scene.source, SceneSource::Remote);
    }

    #[test]
    fn test_frame_matches_scene() {
        let scene = SceneParams::from_snapshot(&snapshot(), 3);
        let frame = animation::frame(&scene, 1.5);
        assert_eq!(frame.tree_sway.len(), 30);
        assert_eq!(frame.birds.len(), 3);
        assert!(frame.fog_density.is_none());

        for (tree, sway) in scene.trees.iter().zip(&frame.tree_sway) {
            if !tree.sways {
                assert_eq!(*sway, 0.0);
            }
        }

        let local = SceneParams::from_local(0.5, TimeOfDay::Day, 3);
        assert!(animation::frame(&local, 0.0).fog_density.is_some());
    }
}
