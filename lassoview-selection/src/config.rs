//! Tunables of the selection engine

use serde::{Deserialize, Serialize};

/// Default ceiling on triangles evaluated per mesh
pub const DEFAULT_FACE_SAMPLE_CAP: usize = 10_000;

/// Maximum per-triangle diagnostics reported for one mesh before they are summarised
pub const MAX_FACE_DIAGNOSTICS: usize = 16;

/// Selection engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Upper bound used to derive the triangle sampling stride of a mesh.
    ///
    /// Dense meshes are under-sampled, so small lassos on them can miss faces.
    pub face_sample_cap: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            face_sample_cap: DEFAULT_FACE_SAMPLE_CAP,
        }
    }
}
