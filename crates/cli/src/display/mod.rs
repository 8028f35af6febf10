pub mod plan;

pub use plan::{ExternalPreview, format_plan};
