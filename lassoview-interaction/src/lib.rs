//! Interactive lasso selection for lassoview
//!
//! This crate turns pointer gestures into selections:
//! - The [`LassoTool`] state machine and its input arbitration
//! - Collaborator traits for render surfaces, navigation and input sources
//! - Overlay outline feedback
//! - A bounded pool of debug markers

pub mod config;
pub mod input;
pub mod lasso_tool;
pub mod markers;
pub mod navigation;
pub mod overlay;
pub mod surface;

pub use config::*;
pub use input::*;
pub use lasso_tool::*;
pub use markers::*;
pub use navigation::*;
pub use overlay::*;
pub use surface::*;
