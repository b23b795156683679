pub mod client;
pub mod error;
pub mod resources;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{HttpClient, RequestOptions};
pub use error::ApiError;
pub use resources::{Api, Comments, Issues, Projects};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport};
