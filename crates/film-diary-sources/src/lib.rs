pub mod letterboxd;
pub mod traits;

pub use letterboxd::{DiaryPaginator, LetterboxdClient};
pub use traits::{FetchedPage, PageFetcher};
