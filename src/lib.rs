pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod registry;
pub mod stats;
