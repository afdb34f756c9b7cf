pub mod config;
pub mod logging;

pub mod extract;
pub mod fetch_page;
pub mod intake;
pub mod metadata;
pub mod pipeline;
pub mod url_model;
