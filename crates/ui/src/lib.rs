pub mod add_book_view;
pub mod app;
pub mod auth_view;
pub mod books_view;
pub mod form;
pub mod history_view;
pub mod layout;
pub mod profile_view;
pub mod reader_view;
