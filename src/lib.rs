pub mod analysis;
pub mod config;
pub mod error;
pub mod graph;
pub mod profile;
pub mod visual;

pub use analysis::{analyze, analyze_with, GraphAnalysis, Tuning};
pub use config::Config;
pub use error::{Result, SynastryError};
pub use graph::{build, CompatibilityGraph};
pub use profile::{validate_profiles, AstrologyProfile, SajuProfile};
pub use visual::{visualize, VisualizationPayload};
