pub mod client;
pub mod paginator;
pub mod parser;

pub use client::LetterboxdClient;
pub use paginator::{DiaryPaginator, MAX_PAGES};
