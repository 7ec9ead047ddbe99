pub mod app;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod input;
pub mod ncbi;
