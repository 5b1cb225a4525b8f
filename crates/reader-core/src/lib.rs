pub mod config;
pub mod nav;
pub mod paginate;
pub mod progress;
pub mod session;
pub mod types;
pub mod validate;

pub use nav::PageCursor;
pub use paginate::{paginate, page_count, words_per_page_for_width, PageSlice};
pub use progress::ProgressTracker;
pub use session::Session;
