// Operations module
// Token set merging, alias resolution and export

pub mod alias;
pub mod export;
pub mod merge;
pub mod resolve;

pub use alias::{parse_template, reference_text, Segment};
pub use export::{parse_token_document, stringify_token_set, stringify_tokens, to_nested_document, ExportError};
pub use merge::merge_token_sets;
pub use resolve::{
    find_token, resolve_tokens, CircularReferenceError, Resolution, ResolutionStatus, ResolvedToken,
    UnresolvedReferenceError,
};
