pub mod aggregate;
pub mod cli;
pub mod error;
pub mod node;
pub mod pipeline;
pub mod report;
pub mod token;
pub mod utils;
