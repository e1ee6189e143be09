pub mod input;
pub mod terminal;
pub mod view;

pub use input::map_key;
pub use terminal::TerminalGuard;
pub use view::FormView;
