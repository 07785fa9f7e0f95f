/*
 * Responsibility
 * - Public interface of the middleware layers
 * - gate: session check / login handoff; http: request id, trace, limits;
 *   security_headers: browser hardening headers
 */
pub mod gate;
pub mod http;
pub mod security_headers;
