/// Command-line argument parsing and batch file processing
pub mod cli;
/// Pipeline constants and runtime configuration
pub mod configuration;
/// Error types
pub mod error;
/// Image codec boundary
pub mod image;
/// Progress bars and terminal logging
pub mod progress;
