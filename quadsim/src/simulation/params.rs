//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - restitution used by every contact,
//! - point-attractor radius and strength,
//! - spawn ranges and random seed for generated bodies

#[derive(Debug, Clone)]
pub struct Parameters {
    pub restitution: f64, // 1 = perfectly elastic, 0 = perfectly inelastic
    pub attraction_radius: f64, // bodies closer than this to the target are pulled
    pub attraction_strength: f64, // pull per unit of (radius - distance), per second
    pub radius_min: f64, // spawned body radius range
    pub radius_max: f64,
    pub speed_max: f64, // spawned body speed upper bound
    pub seed: u64, // deterministic seed
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            restitution: 1.0,
            attraction_radius: 150.0,
            attraction_strength: 5.0,
            radius_min: 4.0,
            radius_max: 12.0,
            speed_max: 200.0,
            seed: 42,
        }
    }
}
