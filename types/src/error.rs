//! Error type shared across crates, with the stable numeric codes callers see.

use thiserror::Error;

use crate::{ContentId, Identity};

/// The five stable, numeric failure kinds.
///
/// Values are part of the external interface and must never change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ErrorCode {
    NotAuthorized = 100,
    InvalidContent = 101,
    AlreadyVoted = 102,
    InsufficientStake = 103,
    ContentNotFound = 104,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 5] = [
        Self::NotAuthorized,
        Self::InvalidContent,
        Self::AlreadyVoted,
        Self::InsufficientStake,
        Self::ContentNotFound,
    ];

    pub fn as_u32(self) -> u32 {
        self as u32
    }

    pub fn from_u32(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_u32() == code)
    }

    /// Canonical upper-case name, e.g. `ERR_ALREADY_VOTED`.
    pub fn name(self) -> &'static str {
        match self {
            Self::NotAuthorized => "ERR_NOT_AUTHORIZED",
            Self::InvalidContent => "ERR_INVALID_CONTENT",
            Self::AlreadyVoted => "ERR_ALREADY_VOTED",
            Self::InsufficientStake => "ERR_INSUFFICIENT_STAKE",
            Self::ContentNotFound => "ERR_CONTENT_NOT_FOUND",
        }
    }
}

/// Every way a curation call can fail.
///
/// Precondition failures map onto an [`ErrorCode`]. `Ledger` and `Invariant` are
/// internal faults: they carry no stable code and indicate a broken adapter or a
/// broken accounting invariant rather than bad caller input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurationError {
    #[error("{0} is not the governance owner")]
    NotAuthorized(Identity),

    #[error("content {0} has no votes")]
    NoVotes(ContentId),

    #[error("content {0} has already been rewarded")]
    AlreadyRewarded(ContentId),

    #[error("invalid vote direction: {0:?}")]
    InvalidVoteDirection(String),

    #[error("malformed content hash: {0}")]
    MalformedContentHash(String),

    #[error("the escrow account {0} cannot author content")]
    EscrowAuthor(Identity),

    #[error("invalid sender identity: {0:?}")]
    InvalidSender(String),

    #[error("{voter} has already voted on content {content_id}")]
    AlreadyVoted { content_id: ContentId, voter: Identity },

    #[error("insufficient stake: need {needed}, have {available}")]
    InsufficientStake { needed: u128, available: u128 },

    #[error("content {0} not found")]
    ContentNotFound(ContentId),

    #[error("ledger fault: {0}")]
    Ledger(String),

    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl CurationError {
    /// The stable code for this failure, or `None` for internal faults.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::NotAuthorized(_) | Self::InvalidSender(_) => Some(ErrorCode::NotAuthorized),
            Self::NoVotes(_)
            | Self::AlreadyRewarded(_)
            | Self::InvalidVoteDirection(_)
            | Self::MalformedContentHash(_)
            | Self::EscrowAuthor(_) => Some(ErrorCode::InvalidContent),
            Self::AlreadyVoted { .. } => Some(ErrorCode::AlreadyVoted),
            Self::InsufficientStake { .. } => Some(ErrorCode::InsufficientStake),
            Self::ContentNotFound(_) => Some(ErrorCode::ContentNotFound),
            Self::Ledger(_) | Self::Invariant(_) => None,
        }
    }

    pub fn is_internal(&self) -> bool {
        self.code().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ErrorCode::NotAuthorized.as_u32(), 100);
        assert_eq!(ErrorCode::InvalidContent.as_u32(), 101);
        assert_eq!(ErrorCode::AlreadyVoted.as_u32(), 102);
        assert_eq!(ErrorCode::InsufficientStake.as_u32(), 103);
        assert_eq!(ErrorCode::ContentNotFound.as_u32(), 104);
    }

    #[test]
    fn from_u32_inverts_as_u32() {
        for code in ErrorCode::ALL {
            assert_eq!(ErrorCode::from_u32(code.as_u32()), Some(code));
        }
        assert_eq!(ErrorCode::from_u32(99), None);
        assert_eq!(ErrorCode::from_u32(105), None);
    }

    #[test]
    fn invalid_content_covers_bad_input_and_bad_lifecycle() {
        let id = ContentId::new(1);
        assert_eq!(CurationError::NoVotes(id).code(), Some(ErrorCode::InvalidContent));
        assert_eq!(CurationError::AlreadyRewarded(id).code(), Some(ErrorCode::InvalidContent));
        assert_eq!(
            CurationError::InvalidVoteDirection("x".into()).code(),
            Some(ErrorCode::InvalidContent)
        );
        assert_eq!(
            CurationError::MalformedContentHash("odd length".into()).code(),
            Some(ErrorCode::InvalidContent)
        );
        assert_eq!(
            CurationError::EscrowAuthor(Identity::new("escrow")).code(),
            Some(ErrorCode::InvalidContent)
        );
    }

    #[test]
    fn malformed_sender_is_not_authorized() {
        let err = CurationError::InvalidSender(" ".into());
        assert_eq!(err.code(), Some(ErrorCode::NotAuthorized));
        assert!(!err.is_internal());
    }

    #[test]
    fn internal_faults_have_no_code() {
        assert!(CurationError::Ledger("down".into()).is_internal());
        assert!(CurationError::Invariant("escrow".into()).is_internal());
        assert!(!CurationError::ContentNotFound(ContentId::new(9)).is_internal());
    }
}
