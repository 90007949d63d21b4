// Simulation glue between the engine and the window

pub mod scene;

pub use scene::Scene;
