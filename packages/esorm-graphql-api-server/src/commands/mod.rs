pub mod run;
pub mod sdl;
