//! Rendering error types.

use thiserror::Error;

/// Errors that can occur during rendering operations.
#[derive(Error, Debug)]
pub enum RenderError {
    /// No graphics adapter matched the request.
    #[error("failed to create graphics adapter")]
    AdapterCreationFailed,

    /// Failed to create wgpu device.
    #[error("failed to create graphics device: {0}")]
    DeviceCreationFailed(#[from] wgpu::RequestDeviceError),

    /// Failed to create surface.
    #[error("failed to create surface: {0}")]
    SurfaceCreationFailed(#[from] wgpu::CreateSurfaceError),

    /// The surface reports no usable texture format.
    #[error("surface configuration failed")]
    SurfaceConfigurationFailed,

    /// The engine has no surface to present to.
    #[error("engine has no window surface")]
    NoSurface,

    /// Out of memory.
    #[error("out of memory")]
    OutOfMemory,

    /// Frame readback failed.
    #[error("frame capture failed: {0}")]
    Capture(#[from] crate::screenshot::ScreenshotError),
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;
