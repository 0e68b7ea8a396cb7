//! Service layer for mockup rendering operations
//!
//! This module contains services that separate I/O and format conversion
//! concerns from the pixel pipeline, making the system more testable and
//! maintainable.

pub mod format;
pub mod io;

pub use format::MockupFormatHandler;
pub use io::ImageIoService;
