//! Storage usage warnings.
//!
//! The whole note collection lives under one storage key, so it grows with
//! every note. These checks flag when it is getting close to the storage
//! quota, before a write starts failing.

/// Quota assumed when none is configured; matches the usual browser limit.
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

/// Fraction of the quota past which a warning is raised.
pub const USAGE_WARNING_RATIO: f64 = 0.8;

/// A warning about storage usage.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// Stored data is close to the quota.
    NearQuota { used_bytes: u64, quota_bytes: u64 },
}

/// Check stored size against the quota (or the default one).
pub fn check_usage(used_bytes: u64, quota_bytes: Option<u64>) -> Vec<Warning> {
    let quota_bytes = quota_bytes.unwrap_or(DEFAULT_QUOTA_BYTES);
    let mut warnings = Vec::new();

    if quota_bytes > 0 && used_bytes as f64 > quota_bytes as f64 * USAGE_WARNING_RATIO {
        warnings.push(Warning::NearQuota {
            used_bytes,
            quota_bytes,
        });
    }

    warnings
}

/// Format a warning for display.
pub fn format_warning(warning: &Warning) -> String {
    match warning {
        Warning::NearQuota {
            used_bytes,
            quota_bytes,
        } => {
            let percent = *used_bytes as f64 / *quota_bytes as f64 * 100.0;
            format!(
                "Warning: notes use {} of {} bytes ({:.0}%) - writes will fail at the limit",
                used_bytes, quota_bytes, percent
            )
        }
    }
}
