//! Live scores, fixtures, standings, news and a small admin dashboard for an
//! English Premier League site, rendered from the site's JSON backend.

pub mod admin;
pub mod command;
pub mod config;
pub mod data;
pub mod detail;
pub mod error;
pub mod model;
pub mod page;
pub mod poller;
pub mod registry;
pub mod render;
pub mod route;
pub mod search;
pub mod state;

pub use command::{Command, Request};
pub use config::Config;
pub use data::{Backend, DataClient};
pub use error::ApiError;
pub use page::{Document, Slot};
pub use registry::ViewRegistry;
pub use route::{Feature, FeatureSet, Route};
