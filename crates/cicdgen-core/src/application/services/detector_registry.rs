//! Detector registry.
//!
//! Holds the detectors available for a run, keyed by identity and kept in
//! registration order. Order is the only priority mechanism: resolution
//! walks the list front to back and stops at the first match, so specific
//! detectors must be registered before general ones.
//!
//! The registry is filled once at startup and only read afterwards.

use tracing::{debug, instrument, warn};

use crate::{
    application::ports::Detector,
    domain::DomainError,
    error::{CicdError, CicdResult},
};

#[derive(Default)]
pub struct DetectorRegistry {
    detectors: Vec<Box<dyn Detector>>,
}

impl DetectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a detector.
    ///
    /// Re-registering an identity replaces the earlier detector in place, so
    /// override plugins keep the priority of the detector they replace.
    ///
    /// # Errors
    ///
    /// `InvalidDetector` when the identity is empty or not made of lowercase
    /// letters, digits, `-` and `_`.
    pub fn register(&mut self, detector: Box<dyn Detector>) -> Result<(), DomainError> {
        let name = detector.identify().to_string();
        validate_identity(&name)?;

        match self.detectors.iter().position(|d| d.identify() == name) {
            Some(idx) => {
                debug!(detector = %name, "Replacing registered detector");
                self.detectors[idx] = detector;
            }
            None => {
                debug!(detector = %name, "Registered detector");
                self.detectors.push(detector);
            }
        }
        Ok(())
    }

    /// Register every candidate that was constructed successfully and passes
    /// validation. Failures are logged and skipped.
    ///
    /// Returns the number of detectors registered.
    #[instrument(skip_all)]
    pub fn load<I>(&mut self, candidates: I) -> usize
    where
        I: IntoIterator<Item = CicdResult<Box<dyn Detector>>>,
    {
        let mut loaded = 0;
        for candidate in candidates {
            let result = candidate.and_then(|d| self.register(d).map_err(CicdError::from));
            match result {
                Ok(()) => loaded += 1,
                Err(e) => warn!(error = %e, "Skipping detector that failed to load"),
            }
        }
        loaded
    }

    pub fn get(&self, name: &str) -> Option<&dyn Detector> {
        self.detectors
            .iter()
            .find(|d| d.identify() == name)
            .map(|d| &**d)
    }

    /// Detectors in registration order.
    pub fn list(&self) -> impl Iterator<Item = &dyn Detector> {
        self.detectors.iter().map(|d| &**d)
    }

    pub fn names(&self) -> Vec<&str> {
        self.detectors.iter().map(|d| d.identify()).collect()
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }
}

impl std::fmt::Debug for DetectorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetectorRegistry")
            .field("detectors", &self.names())
            .finish()
    }
}

fn validate_identity(name: &str) -> Result<(), DomainError> {
    if name.is_empty() {
        return Err(DomainError::InvalidDetector {
            name: name.into(),
            reason: "identity is empty".into(),
        });
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '_'))
    {
        return Err(DomainError::InvalidDetector {
            name: name.into(),
            reason: format!("identity contains invalid character '{bad}'"),
        });
    }
    Ok(())
}
