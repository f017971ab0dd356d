pub mod states;
pub mod bounds;
pub mod params;
pub mod engine;
pub mod quadtree;
pub mod collision;
pub mod broad_phase;
pub mod forces;
pub mod integrator;
pub mod step;
pub mod commands;
pub mod scenario;
