pub mod source;
mod comments;
mod patterns;
mod section;
mod expression;
mod span;

pub use span::*;
pub use comments::{CommentMode, CommentScanner, strip_comments};
pub use patterns::{Directive, DirectiveKind, LinePattern};
pub use section::extract_section;
pub use expression::{evaluate, round_resolution};
