pub mod catalog;
pub mod library;
pub mod normalize;
pub mod recommendations;
pub mod reviews;
pub mod trailers;

pub use catalog::Catalog;
pub use library::{LibraryFilter, LibraryParams, SortMode};
pub use recommendations::Recommendation;
pub use reviews::ReviewStore;
pub use trailers::{TrailerProvider, YouTubeProvider};
