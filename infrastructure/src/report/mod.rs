//! JSON report files

mod writer;

pub use writer::{ReportWriteError, ReportWriter};
