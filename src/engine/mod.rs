//! Glucose decision engine.
//!
//! Pure decision logic for one diabetic cat's insulin/feeding schedule,
//! exposed as HTTP endpoints. The Streamlit dashboard collects the
//! reading and renders the result; every decision lands here.

mod advisor;
mod capacity;
mod classifier;
mod models;
mod params;
mod projection;
mod routes;

pub use models::EngineError;
pub use params::Parameters;
pub use routes::router;

/// Tool identifier attached to evaluation responses and error bodies.
pub const TOOL: &str = "nadir-decision-engine";
pub const TOOL_VERSION: &str = "0.3.0";
