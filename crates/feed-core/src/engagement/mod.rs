//! Preview ranking - keeps the viewer's own contribution visible in capped lists

mod preview;

pub use preview::{merge_viewer_item, prioritize_user_item, PreviewCaps, Recency};
