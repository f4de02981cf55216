pub mod client;

pub use client::NumberClient;
