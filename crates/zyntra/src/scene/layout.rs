//! Seeded procedural placement
//!
//! Everything random in a scene is drawn from one `StdRng` so that the
//! same seed and inputs always give the same layout.

use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl std::ops::Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

/// Uniform draw in `[-half, half)`
fn centered(rng: &mut StdRng, half: f64) -> f64 {
    if half > 0.0 {
        rng.gen_range(-half..half)
    } else {
        0.0
    }
}

/// Uniform draw in `[lo, hi)`
pub fn scale_in(rng: &mut StdRng, (lo, hi): (f64, f64)) -> f64 {
    lo + rng.gen::<f64>() * (hi - lo)
}

/// `count` points evenly spaced around a ring, each pushed in or out by up to `jitter`
pub fn ring(rng: &mut StdRng, count: usize, radius: f64, jitter: f64) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let angle = i as f64 / count as f64 * PI * 2.0;
            let distance = radius + centered(rng, jitter);
            Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance)
        })
        .collect()
}

/// Scatter points over a `spread` x `spread` square centred on the origin
pub fn scatter(rng: &mut StdRng, count: usize, spread: f64, y: f64) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            let x = centered(rng, spread / 2.0);
            let z = centered(rng, spread / 2.0);
            Vec3::new(x, y, z)
        })
        .collect()
}

/// Hovering particle with its own bob phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Firefly {
    pub position: Vec3,
    pub speed: f64,
    pub phase: f64,
}

pub fn fireflies(rng: &mut StdRng, count: usize, spread: f64, ceiling: f64) -> Vec<Firefly> {
    (0..count)
        .map(|_| {
            let x = centered(rng, spread / 2.0);
            let y = rng.gen::<f64>() * ceiling;
            let z = centered(rng, spread / 2.0);
            Firefly {
                position: Vec3::new(x, y, z),
                speed: rng.gen::<f64>() * 0.02 + 0.01,
                phase: rng.gen::<f64>() * PI * 2.0,
            }
        })
        .collect()
}

/// Split `total` proportionally to `counts` using largest remainders.
///
/// The result always sums to `total` unless every count is zero, in which
/// case it is all zeros. Ties go to the earlier group.
pub fn partition<const N: usize>(counts: [u32; N], total: u32) -> [u32; N] {
    let sum: u64 = counts.iter().map(|&c| u64::from(c)).sum();
    let mut out = [0u32; N];
    if sum == 0 {
        return out;
    }

    let mut remainders = [(0u64, 0usize); N];
    let mut assigned: u64 = 0;
    for (i, &count) in counts.iter().enumerate() {
        let scaled = u64::from(count) * u64::from(total);
        out[i] = (scaled / sum) as u32;
        assigned += scaled / sum;
        remainders[i] = (scaled % sum, i);
    }

    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    let leftover = u64::from(total) - assigned;
    for &(_, i) in remainders.iter().take(leftover as usize) {
        out[i] += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_partition_exact_total_is_identity() {
        assert_eq!(partition([12, 8, 6, 4], 30), [12, 8, 6, 4]);
    }

    #[test]
    fn test_partition_rescales() {
        assert_eq!(partition([1, 1, 1, 0], 30), [10, 10, 10, 0]);
        assert_eq!(partition([50, 25, 25, 0], 30), [15, 8, 7, 0]);

        let split = partition([7, 3, 2, 1], 30);
        assert_eq!(split.iter().sum::<u32>(), 30);
    }

    #[test]
    fn test_partition_of_nothing() {
        assert_eq!(partition([0, 0, 0, 0], 30), [0, 0, 0, 0]);
    }

    #[test]
    fn test_partition_sums_for_many_inputs() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..200 {
            let counts = [
                rng.gen_range(0..500),
                rng.gen_range(0..500),
                rng.gen_range(0..500),
                rng.gen_range(1..500),
            ];
            assert_eq!(partition(counts, 30).iter().sum::<u32>(), 30);
        }
    }

    #[test]
    fn test_ring_radius_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        for p in ring(&mut rng, 30, 15.0, 5.0) {
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!((10.0..=20.0).contains(&r));
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn test_scatter_is_seeded() {
        let a = scatter(&mut StdRng::seed_from_u64(5), 10, 18.0, 0.0);
        let b = scatter(&mut StdRng::seed_from_u64(5), 10, 18.0, 0.0);
        assert_eq!(a, b);
        assert!(a.iter().all(|p| p.x.abs() <= 9.0 && p.z.abs() <= 9.0));
    }
}
