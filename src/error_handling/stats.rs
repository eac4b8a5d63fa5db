//! Extraction statistics tracking.
//!
//! This module provides thread-safe counters for run-level errors, recovered
//! field-level problems, and informational metrics of a search.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{ErrorType, InfoType, WarningType};

/// Thread-safe extraction statistics tracker.
///
/// Tracks errors, warnings, and informational metrics using atomic counters.
/// All types are initialized to zero on creation. The tracker is injected into
/// the pipeline by the caller, so tests and embedding applications can observe
/// exactly which recoveries happened during a search.
///
/// # Categories
///
/// - **Errors**: Run-level failures (session, navigation, readiness)
/// - **Warnings**: Field-level failures recovered by fallback, sold-out, or drop
/// - **Info**: Notable counts that aren't errors or warnings
#[derive(Debug)]
pub struct ExtractionStats {
    errors: HashMap<ErrorType, AtomicUsize>,
    warnings: HashMap<WarningType, AtomicUsize>,
    info: HashMap<InfoType, AtomicUsize>,
}

impl ExtractionStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }

        let mut warnings = HashMap::new();
        for warning in WarningType::iter() {
            warnings.insert(warning, AtomicUsize::new(0));
        }

        let mut info = HashMap::new();
        for info_type in InfoType::iter() {
            info.insert(info_type, AtomicUsize::new(0));
        }

        ExtractionStats {
            errors,
            warnings,
            info,
        }
    }

    /// Increment an error counter.
    pub fn increment_error(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map. \
                 This indicates a bug in ExtractionStats initialization.",
                error
            );
        }
    }

    /// Increment a warning counter.
    pub fn increment_warning(&self, warning: WarningType) {
        if let Some(counter) = self.warnings.get(&warning) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment warning counter for {:?} which is not in the map. \
                 This indicates a bug in ExtractionStats initialization.",
                warning
            );
        }
    }

    /// Increment an info counter.
    pub fn increment_info(&self, info_type: InfoType) {
        self.add_info(info_type, 1);
    }

    /// Add `amount` to an info counter.
    pub fn add_info(&self, info_type: InfoType, amount: usize) {
        if let Some(counter) = self.info.get(&info_type) {
            counter.fetch_add(amount, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment info counter for {:?} which is not in the map. \
                 This indicates a bug in ExtractionStats initialization.",
                info_type
            );
        }
    }

    /// Get the count for an error type.
    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get the count for a warning type.
    pub fn get_warning_count(&self, warning: WarningType) -> usize {
        self.warnings
            .get(&warning)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get the count for an info type.
    pub fn get_info_count(&self, info_type: InfoType) -> usize {
        self.info
            .get(&info_type)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Sum of all error counters.
    pub fn total_errors(&self) -> usize {
        self.errors.values().map(|c| c.load(Ordering::SeqCst)).sum()
    }

    /// Sum of all warning counters.
    pub fn total_warnings(&self) -> usize {
        self.warnings.values().map(|c| c.load(Ordering::SeqCst)).sum()
    }

    /// Sum of all informational counters.
    pub fn total_info(&self) -> usize {
        self.info.values().map(|c| c.load(Ordering::SeqCst)).sum()
    }
}

impl Default for ExtractionStats {
    fn default() -> Self {
        Self::new()
    }
}
