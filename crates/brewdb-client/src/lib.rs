pub mod client;
pub mod error;
pub(crate) mod retry;

pub use client::OpenBreweryClient;
pub use error::ClientError;
