//! `enable_logging` and `solver_info`.

use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use rscip_scip::scip_version;
use std::env;
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::PyObject;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// Read `RSCIP_LOG_FORMAT`, defaulting to pretty.
    fn from_env() -> PyResult<Self> {
        match env::var("RSCIP_LOG_FORMAT") {
            Err(_) => Ok(LogFormat::Pretty),
            Ok(value) if value.eq_ignore_ascii_case("pretty") => Ok(LogFormat::Pretty),
            Ok(value) if value.eq_ignore_ascii_case("json") => Ok(LogFormat::Json),
            Ok(value) => Err(PyRuntimeError::new_err(format!(
                "Invalid RSCIP_LOG_FORMAT {value:?} (expected 'json' or 'pretty')"
            ))),
        }
    }

    fn layer<W>(self, writer: W, ansi: bool) -> BoxedLayer
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(ansi);
        match self {
            LogFormat::Pretty => layer.pretty().boxed(),
            LogFormat::Json => layer.json().boxed(),
        }
    }
}

/// Level from the argument, else `RSCIP_TRACE`, else off.
fn level_filter(level: Option<String>) -> PyResult<EnvFilter> {
    let directive = level
        .or_else(|| env::var("RSCIP_TRACE").ok())
        .unwrap_or_else(|| "off".to_string());

    if directive.eq_ignore_ascii_case("off") {
        return Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()));
    }
    EnvFilter::try_new(&directive)
        .map_err(|err| PyRuntimeError::new_err(format!("Invalid log filter {directive:?}: {err}")))
}

/// Enable structured logging for rscip.
///
/// `level` takes an `EnvFilter` directive such as `"debug"` or
/// `"rscip_scip=trace"`; without it `RSCIP_TRACE` is read, and logging stays
/// off if neither is set. Events go to stderr, and also to `RSCIP_LOG_FILE`
/// when that is set. Returns False if a subscriber was already installed.
#[pyfunction]
#[pyo3(signature = (*, level=None))]
pub fn enable_logging(level: Option<String>) -> PyResult<bool> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let filter = level_filter(level)?;
    let format = LogFormat::from_env()?;

    let mut layers = vec![format.layer(io::stderr, true)];
    if let Ok(path) = env::var("RSCIP_LOG_FILE") {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|err| PyRuntimeError::new_err(format!("Failed to open log file {path}: {err}")))?;
        layers.push(format.layer(Mutex::new(file), false));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|err| PyRuntimeError::new_err(format!("Failed to initialize logging: {err}")))?;
    Ok(true)
}

/// Which solver this module is linked against, and its version.
#[pyfunction]
pub fn solver_info(py: Python<'_>) -> PyResult<PyObject> {
    let dict = PyDict::new(py);
    dict.set_item("solver", "SCIP")?;
    dict.set_item("version", scip_version())?;
    dict.set_item("bindings_version", env!("CARGO_PKG_VERSION"))?;
    Ok(dict.unbind().into())
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(pyo3::wrap_pyfunction!(enable_logging, m)?)?;
    m.add_function(pyo3::wrap_pyfunction!(solver_info, m)?)?;
    Ok(())
}
