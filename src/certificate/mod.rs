// file: src/certificate/mod.rs
// description: certificate assembly and persistence module exports
// reference: internal module structure

pub mod builder;
pub mod writer;

pub use builder::{CertificateBuilder, RunMetadata, directory_timestamp, format_timestamp};
pub use writer::{CERTIFICATE_FILENAME, CertificateWriter, PendingOutput};
