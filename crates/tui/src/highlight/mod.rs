//! Syntax highlighting for previews.

mod ansi;
mod syntax;

pub use self::ansi::parse_ansi;
pub use self::syntax::BatTokenizer;
