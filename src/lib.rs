pub mod config;
pub mod dataset;
pub mod expansion;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod render;
pub mod view;
