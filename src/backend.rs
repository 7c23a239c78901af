//! CPU backend façade.
//!
//! A process-singleton backend with explicit lifecycle transitions: every
//! entry point fails with [`Error::NotInitialized`] until [`initialize`] has
//! run, and a second [`initialize`] without an intervening [`finalize`] fails
//! with [`Error::AlreadyInitialized`].
//!
//! Kernel calls run on the calling thread and block until the output buffer
//! is filled; the backend holds no shared mutable state beyond the lifecycle
//! flag, so calls whose buffers do not alias may execute concurrently from
//! different threads without synchronization. The `stream` argument names a
//! worker slot in `0..get_stream_count()`; the CPU backend accepts and
//! ignores it, since per-slot submission order is simply each caller's
//! program order.

use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use log::debug;

use crate::algorithms::{ab_join, common, stomp};
use crate::core::config::MatrixProfileConfig;
use crate::core::stats::WindowStats;
use crate::error::Error;
use crate::metrics::absolute::AbsoluteEuclidean;
use crate::metrics::euclidean::ZNormalizedEuclidean;

/// Minimum window length accepted by the join kernels. Shorter windows make
/// the exclusion zone degenerate.
const MIN_WINDOW: usize = 3;

struct BackendState {
    current_device: usize,
}

static STATE: Mutex<Option<BackendState>> = Mutex::new(None);

fn lock_state() -> std::sync::MutexGuard<'static, Option<BackendState>> {
    STATE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn ensure_initialized() -> Result<(), Error> {
    if lock_state().is_some() {
        Ok(())
    } else {
        Err(Error::NotInitialized)
    }
}

/// Bring the backend up. The device range applies to accelerator backends
/// and is ignored here.
pub fn initialize(device_start: usize, device_count: usize) -> Result<(), Error> {
    let _ = (device_start, device_count);
    let mut state = lock_state();
    if state.is_some() {
        return Err(Error::AlreadyInitialized);
    }
    *state = Some(BackendState { current_device: 0 });
    debug!("backend initialized");
    Ok(())
}

/// Release backend resources. Fails if the backend is not up.
pub fn finalize() -> Result<(), Error> {
    let mut state = lock_state();
    if state.is_none() {
        return Err(Error::NotInitialized);
    }
    *state = None;
    debug!("backend finalized");
    Ok(())
}

/// Number of compute devices. The CPU backend always reports 1.
pub fn get_device_count() -> Result<usize, Error> {
    ensure_initialized()?;
    Ok(1)
}

/// Select the active device. The CPU backend accepts only device 0.
pub fn use_device(device: usize) -> Result<(), Error> {
    let mut state = lock_state();
    let st = state.as_mut().ok_or(Error::NotInitialized)?;
    if device != 0 {
        return Err(Error::InvalidDevice { device });
    }
    st.current_device = device;
    Ok(())
}

/// Currently selected device.
pub fn get_current_device() -> Result<usize, Error> {
    lock_state()
        .as_ref()
        .map(|st| st.current_device)
        .ok_or(Error::NotInitialized)
}

/// Number of parallel worker slots: one per available hardware thread.
pub fn get_stream_count() -> Result<usize, Error> {
    ensure_initialized()?;
    Ok(thread::available_parallelism().map(|p| p.get()).unwrap_or(1))
}

/// Compute the self-join matrix profile of `ts` into `p_out`.
///
/// `p_out` must hold `ts.len() - m + 1` elements. `normalize` selects
/// z-normalized (true) or raw (false) Euclidean distance.
pub fn selfjoin(
    ts: &[f64],
    p_out: &mut [f64],
    m: usize,
    stream: usize,
    normalize: bool,
) -> Result<(), Error> {
    ensure_initialized()?;
    let _ = stream;
    check_min_window("selfjoin", m)?;
    let n_subs = subsequence_count("selfjoin", ts.len(), m)?;
    if n_subs < 2 {
        return Err(Error::ShapeMismatch {
            op: "selfjoin",
            reason: format!("series of length {} has a single window of length {m}", ts.len()),
        });
    }
    check_out_len("selfjoin", "profile", n_subs, p_out.len())?;

    debug!(
        "selfjoin: n = {}, m = {m}, normalize = {normalize}",
        ts.len()
    );
    let config = MatrixProfileConfig::new(m);
    if normalize {
        stomp::selfjoin::<ZNormalizedEuclidean>(ts, &config, p_out)
    } else {
        stomp::selfjoin::<AbsoluteEuclidean>(ts, &config, p_out)
    }
}

/// Compute the AB-join matrix profile of `ts_a` against `ts_b` into `p_out`.
///
/// For each window of `ts_a`, the distance to its nearest neighbor among the
/// windows of `ts_b`. `p_out` must hold `ts_a.len() - m + 1` elements.
pub fn abjoin(
    ts_a: &[f64],
    ts_b: &[f64],
    p_out: &mut [f64],
    m: usize,
    stream: usize,
    normalize: bool,
) -> Result<(), Error> {
    ensure_initialized()?;
    let _ = stream;
    check_min_window("abjoin", m)?;
    let l_a = subsequence_count("abjoin", ts_a.len(), m)?;
    subsequence_count("abjoin", ts_b.len(), m)?;
    check_out_len("abjoin", "profile", l_a, p_out.len())?;

    debug!(
        "abjoin: n1 = {}, n2 = {}, m = {m}, normalize = {normalize}",
        ts_a.len(),
        ts_b.len()
    );
    if normalize {
        ab_join::abjoin::<ZNormalizedEuclidean>(ts_a, ts_b, m, p_out)
    } else {
        ab_join::abjoin::<AbsoluteEuclidean>(ts_a, ts_b, m, p_out)
    }
}

/// Compute the sliding dot product of query `q` against `ts` into `qt_out`.
///
/// `qt_out` must hold `ts.len() - q.len() + 1` elements.
pub fn sliding_dot_product(
    ts: &[f64],
    q: &[f64],
    qt_out: &mut [f64],
    stream: usize,
) -> Result<(), Error> {
    ensure_initialized()?;
    let _ = stream;
    let n_subs = subsequence_count("sliding_dot_product", ts.len(), q.len())?;
    check_out_len("sliding_dot_product", "dot-product row", n_subs, qt_out.len())?;

    let qt = common::sliding_dot_product(q, ts)?;
    qt_out.copy_from_slice(&qt);
    Ok(())
}

/// Compute per-window mean and standard deviation of `ts` into `mu_out` and
/// `sigma_out`, each of length `ts.len() - m + 1`.
pub fn compute_mean_std(
    ts: &[f64],
    mu_out: &mut [f64],
    sigma_out: &mut [f64],
    m: usize,
    stream: usize,
) -> Result<(), Error> {
    ensure_initialized()?;
    let _ = stream;
    let n_subs = subsequence_count("compute_mean_std", ts.len(), m)?;
    check_out_len("compute_mean_std", "mean", n_subs, mu_out.len())?;
    check_out_len("compute_mean_std", "std", n_subs, sigma_out.len())?;

    let stats = WindowStats::compute(ts, m)?;
    mu_out.copy_from_slice(&stats.mean);
    sigma_out.copy_from_slice(&stats.std);
    Ok(())
}

/// Benchmarking aid: block the calling thread for `microseconds`.
pub fn sleep_us(microseconds: u64, stream: usize) -> Result<(), Error> {
    ensure_initialized()?;
    let _ = stream;
    thread::sleep(Duration::from_micros(microseconds));
    Ok(())
}

fn subsequence_count(op: &'static str, n: usize, m: usize) -> Result<usize, Error> {
    if m == 0 || n < m {
        return Err(Error::ShapeMismatch {
            op,
            reason: format!("series of length {n} has no windows of length {m}"),
        });
    }
    Ok(n - m + 1)
}

fn check_min_window(op: &'static str, m: usize) -> Result<(), Error> {
    if m < MIN_WINDOW {
        return Err(Error::ShapeMismatch {
            op,
            reason: format!("window length {m} is below the minimum of {MIN_WINDOW}"),
        });
    }
    Ok(())
}

fn check_out_len(
    op: &'static str,
    name: &str,
    expected: usize,
    actual: usize,
) -> Result<(), Error> {
    if expected != actual {
        return Err(Error::ShapeMismatch {
            op,
            reason: format!("{name} buffer holds {actual} elements, expected {expected}"),
        });
    }
    Ok(())
}
