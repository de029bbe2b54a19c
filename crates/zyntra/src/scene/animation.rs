//! Per-frame motion as pure functions of elapsed seconds

use serde::Serialize;

use super::layout::Vec3;
use super::lighting::Fog;
use super::SceneParams;

/// Where birds circle around
pub const BIRD_ANCHOR: Vec3 = Vec3::new(0.0, 5.0, 0.0);
/// Where butterflies flutter around
pub const BUTTERFLY_ANCHOR: Vec3 = Vec3::new(0.0, 2.0, 0.0);

/// Z rotation of a tree standing at `x`
pub fn tree_sway(t: f64, x: f64) -> f64 {
    (t + x).sin() * 0.05
}

/// Slower sway used for typed trees
pub fn typed_tree_sway(t: f64, x: f64) -> f64 {
    (t * 0.5 + x).sin() * 0.05
}

/// Y rotation of a canopy
pub fn canopy_turn(t: f64, x: f64) -> f64 {
    (t * 0.5 + x).sin() * 0.1
}

pub fn grass_sway(t: f64, index: usize) -> f64 {
    (t + index as f64 * 0.5).sin() * 0.1
}

pub fn flower_spin(t: f64) -> f64 {
    t * 0.5
}

pub fn bird_offset(t: f64, index: usize) -> Vec3 {
    let i = index as f64;
    Vec3::new(
        (t * 0.5 + i).sin() * 5.0,
        (t * 0.3 + i).sin() * 2.0,
        (t * 0.5 + i).cos() * 5.0,
    )
}

pub fn bird_heading(t: f64, index: usize) -> f64 {
    (t * 0.5 + index as f64).sin() * 0.5
}

pub fn butterfly_offset(t: f64, index: usize) -> Vec3 {
    let i = index as f64;
    Vec3::new(
        (t * 2.0 + i).sin() * 2.0,
        (t * 3.0 + i).sin(),
        (t * 2.0 + i).cos() * 2.0,
    )
}

/// Exponential fog breathes around its base density
pub fn fog_density(base: f64, t: f64) -> f64 {
    base + (t * 0.5).sin() * 0.01
}

/// Vertical drift of a firefly per frame
pub fn firefly_bob(t: f64, phase: f64) -> f64 {
    (t + phase).sin() * 0.01
}

/// Evaluated transforms for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub elapsed: f64,
    /// Z rotation per tree, in scene order
    pub tree_sway: Vec<f64>,
    pub birds: Vec<Vec3>,
    pub butterflies: Vec<Vec3>,
    pub flower_spin: f64,
    /// Present only for exponential fog
    pub fog_density: Option<f64>,
}

pub fn frame(params: &SceneParams, t: f64) -> Frame {
    let tree_sway = params
        .trees
        .iter()
        .map(|tree| match tree.kind {
            _ if !tree.sways => 0.0,
            Some(_) => typed_tree_sway(t, tree.position.x),
            None => tree_sway(t, tree.position.x),
        })
        .collect();

    let birds = (0..params.birds)
        .map(|i| BIRD_ANCHOR + bird_offset(t, i))
        .collect();
    let butterflies = (0..params.butterflies)
        .map(|i| BUTTERFLY_ANCHOR + butterfly_offset(t, i))
        .collect();

    let fog_density = match params.lighting.fog {
        Fog::Exponential { density, .. } => Some(fog_density(density, t)),
        Fog::Linear { .. } => None,
    };

    Frame {
        elapsed: t,
        tree_sway,
        birds,
        butterflies,
        flower_spin: flower_spin(t),
        fog_density,
    }
}
