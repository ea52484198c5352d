pub mod analysis;
pub mod config;
pub mod errors;
pub mod llm_client;
pub mod models;
pub mod page_meta;
pub mod routes;
pub mod state;
