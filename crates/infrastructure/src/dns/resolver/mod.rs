pub mod config;
pub mod core;
pub mod state;

pub use config::EngineConfig;
pub use self::core::{IterativeResolver, LookupMode, Resolution};
pub use state::{Answer, ResolutionState, Step};
