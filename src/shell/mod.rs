// Composition root for the time_tracking bounded context.
//
// Responsibilities
// - Read config from environment.
// - Pick the timesheet store implementation.
// - Wire the timer registry and queries into the HTTP and GraphQL surfaces.

pub mod config;
pub mod graphql;
pub mod http;
pub mod state;
