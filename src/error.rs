use thiserror::Error;

/// Errors surfaced by the backend façade and the kernel entry points.
///
/// Degenerate windows (zero standard deviation) are defined behavior and
/// never produce an error; they yield finite distances instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Inputs violate `n >= m`, a minimum window length, or an output-buffer
    /// length expectation.
    #[error("{op}: {reason}")]
    ShapeMismatch { op: &'static str, reason: String },

    /// `initialize()` was called while the backend is already up.
    #[error("backend already initialized; call finalize() first")]
    AlreadyInitialized,

    /// The backend is not initialized.
    #[error("backend not initialized")]
    NotInitialized,

    /// Device selection outside the backend's device range.
    #[error("invalid device {device}: the CPU backend exposes only device 0")]
    InvalidDevice { device: usize },

    /// A scratch or output buffer could not be allocated.
    #[error("failed to allocate scratch buffer of {len} elements")]
    ResourceExhausted { len: usize },

    /// The FFT produced a non-finite value. The naive dot-product path
    /// never raises this.
    #[error("non-finite value in FFT output")]
    InternalNumeric,
}
