// pix-domain library entry point
pub mod error;
pub mod op;
pub mod source;
pub mod transform;
pub use error::DomainError;
pub use op::{EncodeFormat, FlipAxis, ImageOp, OpKind};
pub use source::{ImageSource, SourcePath};
pub use transform::TransformDescriptor;
