/*
 * Responsibility
 * - Public surface of the HTTP API (routes() re-export)
 */
pub mod handlers;
pub mod response;
mod routes;

pub use routes::routes;
