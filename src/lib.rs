//! Client for a movie-catalog REST backend with cookie sessions and CSRF
//! protection. The [`client`] module owns the credentialed-request plumbing
//! (token acquisition, retry-once-on-403 writes), [`api`] provides typed
//! endpoint wrappers, and [`cli`] is the command-line surface.

pub mod api;
pub mod cli;
pub mod client;
