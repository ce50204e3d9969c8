//! Persistence collaborators
//!
//! Adapters between the editor core and the outside world: the local
//! attribute store, backend submission, and loading saved point sequences.

pub mod attribute_store;
pub mod restore;
pub mod submission;

pub use attribute_store::{AttributeStore, JsonFileStore, MemoryStore};
pub use restore::load_saved_points;
pub use submission::{HttpSubmitter, PointSubmitter, RecordingSubmitter, SubmitTarget};
