#![doc = "The `tasklane` library crate."]
#![doc = ""]
#![doc = "This crate contains the domain entities, use-cases, repository abstractions,"]
#![doc = "authentication adapters, routing configuration, and error handling for the"]
#![doc = "tasklane application. It is used by the main binary (`main.rs`) to construct"]
#![doc = "and run the HTTP server; integration tests wire the same routes against the"]
#![doc = "in-memory repositories."]

pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod repository;
pub mod routes;
pub mod state;
pub mod usecases;
