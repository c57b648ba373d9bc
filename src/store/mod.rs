pub mod feedback;

pub use feedback::{FeedbackRecord, FeedbackStore};
