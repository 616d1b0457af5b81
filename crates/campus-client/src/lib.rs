pub mod api;
pub mod client;
pub mod protocol;

pub use api::CampusApi;
pub use client::ResourceClient;
