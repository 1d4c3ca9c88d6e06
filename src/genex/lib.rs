#[macro_use] extern crate serde_derive;

pub mod types;
pub mod utils;
pub mod data_types;
pub mod constants;
pub mod ontology;
pub mod snapshot;
pub mod config;
pub mod calls;
pub mod homology;
pub mod bio;
