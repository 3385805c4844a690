//! Text-level rewrite primitives.
//!
//! Every function here is a pure `&str -> String` transformation; reading and
//! writing files is left to [`crate::migration`].

pub mod arguments;
pub mod call_site;
pub mod captors;
pub mod identifier;
pub mod imports;
pub mod literal;
pub mod template;

pub use arguments::{split_arguments, ArgumentExtractor, CallShape};
pub use call_site::{find_call_sites, replace_call_sites, CallSite};
pub use captors::{migrate_captor_assertions, CaptorRewriteStats};
pub use identifier::{Identifier, IdentifierAllocator};
pub use imports::{ImportAugmenter, ImportDecision};
pub use literal::LiteralRewrite;
pub use template::{line_ending, BuilderArguments, RewriteTemplate};
