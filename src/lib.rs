pub mod api;
pub mod cli;
pub mod cms;
pub mod config;
pub mod dispatcher;
pub mod frontend;
pub mod render;
pub mod state;
