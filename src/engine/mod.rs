// Engine modules: assets, audio, input, timing, rendering

pub mod assets;
pub mod audio;
pub mod game_loop;
pub mod input;
pub mod renderer;
