//! `RemoteBackend` implementations

pub mod moka_backend;

pub use moka_backend::MokaBackend;
