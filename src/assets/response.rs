//! Asset fetch responses.

use std::fmt;

use bytes::Bytes;

/// Why an asset fetch produced no bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchFault {
    /// The origin has no such asset.
    NotFound,
    /// The request named the reserved empty item slot. Expected outcome,
    /// not an error: consumers render "no image" rather than a placeholder.
    EmptyItemSlot,
    /// The origin answered but not with the asset (bad status, transport
    /// failure, truncated body).
    OriginError,
    /// Local I/O failed while resolving the asset.
    IoError,
}

impl FetchFault {
    /// Stable lowercase tag, used as a metrics label.
    pub fn tag(self) -> &'static str {
        match self {
            FetchFault::NotFound => "not_found",
            FetchFault::EmptyItemSlot => "empty_item_slot",
            FetchFault::OriginError => "origin_error",
            FetchFault::IoError => "io_error",
        }
    }
}

impl fmt::Display for FetchFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Outcome of one asset request.
///
/// Immutable once constructed and cheap to clone; every caller attached to
/// a deduplicated fetch receives a clone of the same value.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetResponse {
    /// The asset's image bytes.
    Success { bytes: Bytes },
    /// No bytes; see [`FetchFault`] for why.
    Faulted { reason: FetchFault },
}

impl AssetResponse {
    pub fn success(bytes: Bytes) -> Self {
        AssetResponse::Success { bytes }
    }

    pub fn faulted(reason: FetchFault) -> Self {
        AssetResponse::Faulted { reason }
    }

    /// True for any `Faulted`, including the expected empty item slot.
    pub fn is_faulted(&self) -> bool {
        matches!(self, AssetResponse::Faulted { .. })
    }

    /// The image bytes, when the fetch succeeded.
    pub fn bytes(&self) -> Option<&Bytes> {
        match self {
            AssetResponse::Success { bytes } => Some(bytes),
            AssetResponse::Faulted { .. } => None,
        }
    }

    /// The fault reason, when the fetch did not succeed.
    pub fn fault(&self) -> Option<FetchFault> {
        match self {
            AssetResponse::Success { .. } => None,
            AssetResponse::Faulted { reason } => Some(*reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_carries_bytes() {
        let resp = AssetResponse::success(Bytes::from_static(b"png"));
        assert!(!resp.is_faulted());
        assert_eq!(resp.bytes().map(|b| b.as_ref()), Some(&b"png"[..]));
        assert_eq!(resp.fault(), None);
    }

    #[test]
    fn test_faulted_carries_reason() {
        let resp = AssetResponse::faulted(FetchFault::EmptyItemSlot);
        assert!(resp.is_faulted());
        assert_eq!(resp.bytes(), None);
        assert_eq!(resp.fault(), Some(FetchFault::EmptyItemSlot));
    }

    #[test]
    fn test_clones_are_value_equal() {
        let resp = AssetResponse::success(Bytes::from_static(b"img"));
        assert_eq!(resp.clone(), resp);
    }
}
