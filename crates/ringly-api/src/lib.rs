// ringly-api: async transport for the Ring cloud API
//
// Bearer-token authentication, OAuth token acquisition, endpoint table,
// and the `Transport` seam the core crate is generic over.

pub mod auth;
pub mod endpoints;
pub mod error;
pub mod request;
pub mod transport;

pub use auth::{Auth, Token};
pub use error::Error;
pub use request::{Request, Response};
pub use reqwest::Method;
pub use transport::{Transport, TransportConfig};
