pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod pipeline;
pub mod store;

pub use error::ScrapeError;
