//! Canned financial advisor
//!
//! Replies are picked by keyword category and filled in from the user's
//! profile. There is no language model behind this.

pub mod classifier;
pub mod responder;
pub mod session;

pub use classifier::{QueryClassifier, ResponseCategory};
pub use responder::respond;
pub use session::{quick_questions, ChatSession, QuickQuestion};
