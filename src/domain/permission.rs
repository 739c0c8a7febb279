// SPDX-License-Identifier: MPL-2.0
//! Location consent states.

/// Outcome of a consent check or request for location access.
///
/// `Other` covers every provider answer that is neither a clear grant nor
/// a clear denial (e.g. a dismissed prompt or a restricted account); the
/// coordinator treats it as "do not read a position, do not ask again".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionStatus {
    /// Consent has not been checked yet.
    #[default]
    Unknown,
    /// The user granted location access.
    Granted,
    /// The user declined location access.
    Denied,
    /// An indeterminate answer from the provider.
    Other,
}

impl PermissionStatus {
    /// Returns `true` if a position read is allowed.
    #[must_use]
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Returns the i18n message key describing this status.
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            Self::Unknown => "permission-status-unknown",
            Self::Granted => "permission-status-granted",
            Self::Denied => "permission-status-denied",
            Self::Other => "permission-status-other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unknown() {
        assert_eq!(PermissionStatus::default(), PermissionStatus::Unknown);
    }

    #[test]
    fn only_granted_allows_position_reads() {
        assert!(PermissionStatus::Granted.is_granted());
        assert!(!PermissionStatus::Unknown.is_granted());
        assert!(!PermissionStatus::Denied.is_granted());
        assert!(!PermissionStatus::Other.is_granted());
    }

    #[test]
    fn i18n_keys_are_distinct() {
        let keys = [
            PermissionStatus::Unknown.i18n_key(),
            PermissionStatus::Granted.i18n_key(),
            PermissionStatus::Denied.i18n_key(),
            PermissionStatus::Other.i18n_key(),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
