pub mod output;
pub mod walker;

pub use output::{JsonWriter, OutputFormat, OutputWriter, SourceWriter};
pub use walker::{go_files, GoFileWalker};
