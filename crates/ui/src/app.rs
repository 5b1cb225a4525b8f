mod command;
mod run;
mod state;
mod types;

pub use state::App;
pub use types::Mode;
