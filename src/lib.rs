pub mod api;
pub mod client;
pub mod config;
pub mod data_models;
pub mod error;
pub mod form;
pub mod preview;
pub mod render;
pub mod session;
pub mod view;
