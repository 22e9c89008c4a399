pub mod assemble;
pub mod version;

pub use assemble::{assemble_metadata, Overrides};
pub use version::VersionDescriptor;
