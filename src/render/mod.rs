pub mod board;
pub mod renderer;

pub use board::BoardView;
pub use renderer::Renderer;
