//! Configuration loading for the tip split engine.
//!
//! Settings cover the notification expiry delay and where the file-backed
//! store keeps its snapshot.
//!
//! # Example
//!
//! ```no_run
//! use tip_split::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/tip_split.yaml").unwrap();
//! println!("Messages expire after {:?}", loader.config().notification_delay());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::AppConfig;
