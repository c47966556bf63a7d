// Composition root for the class schedule service.
//
// Responsibilities
// - Read config from the environment.
// - Instantiate the in memory adapters and wire them into the handlers.
// - Expose the HTTP router.

pub mod config;
pub mod http;
pub mod state;
