//! Error types for the carol native layer

use thiserror::Error;

/// Errors that can occur while loading or configuring the OpenGL context
#[derive(Error, Debug)]
pub enum ContextError {
    /// No OpenGL context is current on the calling thread
    #[error("No OpenGL context is current on this thread")]
    NoCurrentContext,

    /// The loader could not resolve a required entry point
    #[error("Failed to resolve OpenGL entry point: {0}")]
    MissingEntryPoint(&'static str),

    /// OpenGL version older than 4.5
    #[error("Unsupported OpenGL version: {0}")]
    UnsupportedVersion(String),
}

/// Errors raised when the driver refuses to allocate an object
///
/// These are distinct from compile and link failures, which are reported as
/// diagnostic text by the shader builder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// Failed to create a shader object
    #[error("Failed to create shader object for {0} stage")]
    CreateShader(&'static str),

    /// Failed to create a program object
    #[error("Failed to create program object")]
    CreateProgram,

    /// Failed to create a vertex array object
    #[error("Failed to create vertex array object")]
    CreateVertexArray,

    /// Failed to create a buffer object
    #[error("Failed to create buffer object of {0} bytes")]
    CreateBuffer(usize),

    /// The requested size does not fit the driver's signed 32-bit size type
    #[error("Buffer of {0} bytes exceeds the driver size limit")]
    BufferTooLarge(usize),

    /// Initial data does not match the requested buffer size
    #[error("Buffer initial data is {actual} bytes, expected {expected}")]
    DataSizeMismatch { expected: usize, actual: usize },
}

/// Errors that can occur while opening the game window
#[derive(Error, Debug)]
pub enum WindowError {
    /// SDL refused to create the window
    #[error("Could not open window: {0}")]
    CreateWindow(String),

    /// SDL refused to create the OpenGL context
    #[error("Could not create OpenGL context: {0}")]
    CreateContext(String),

    /// Generic SDL error
    #[error("SDL error: {0}")]
    Sdl(String),
}

/// Errors that can occur while loading the init configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file or environment could not be read or parsed
    #[error("Impossible to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    /// The executable directory could not be determined
    #[error("Impossible to locate executable directory: {0}")]
    ExecutablePath(#[from] std::io::Error),
}

/// Result type for context operations
pub type ContextResult<T> = Result<T, ContextError>;

/// Result type for resource allocation
pub type ResourceResult<T> = Result<T, ResourceError>;

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;
