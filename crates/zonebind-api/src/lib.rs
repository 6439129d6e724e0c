// zonebind-api: Async Rust client for the CloudGenix / Prisma SD-WAN controller API

pub mod auth;
pub mod client;
pub mod elements;
pub mod error;
pub mod models;
pub mod security_zones;
pub mod sites;
pub mod transport;

pub use auth::DEFAULT_CONTROLLER;
pub use client::CgxClient;
pub use error::Error;
pub use models::{
    Element, ElementSecurityZone, Interface, NewElementSecurityZone, Profile, SecurityZone, Site,
};
pub use transport::{TlsMode, TransportConfig};
