pub mod errors;
pub mod models;
pub mod policy;
pub mod ports;
pub mod principal;
pub mod resolver;
pub mod service;
