pub mod renderer;
pub mod style;
