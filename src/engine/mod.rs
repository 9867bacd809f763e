// Engine modules: loop timing, timers, input, environment, prefs, scenes

pub mod game_loop;
pub mod input;
pub mod prefs;
pub mod scene;
pub mod timer;
pub mod world;
