// Engine modules: physics, frame timing, input, renderer

pub mod game_loop;
pub mod input;
pub mod physics;
pub mod renderer;
