pub mod audit;
pub mod batch;
pub mod client;
pub mod config;
pub mod errors;
pub mod gates;
pub mod logging;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;
