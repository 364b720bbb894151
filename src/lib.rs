//! chuck: Chuck Norris jokes from the command line
//!
//! Fetches jokes from the public chucknorris.io API and prints them as plain
//! text, verbose text, or JSON. Jokes can be kept in a local favorites list.
//!
//! Layers follow the usual split: `domain` holds the data and error types,
//! `application` the API client and formatter, `infrastructure` the hyper
//! transport, configuration and file storage, `presentation` the clap CLI.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
