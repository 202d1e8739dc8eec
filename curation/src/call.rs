//! Replayable call encoding and the receipts calls produce.
//!
//! A call log is a sequence of [`Call`]s, one JSON object per line. Applying the
//! same log to two fresh engines yields identical receipts and state roots.

use curate_types::{Amount, ContentHash, ContentId, CurationError, Identity, VoteDirection};
use serde::{Deserialize, Serialize};

/// A mutating operation together with its already-authenticated sender.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Call {
    SubmitContent {
        sender: Identity,
        /// Hex-encoded content hash.
        content_hash: String,
    },
    VoteOnContent {
        sender: Identity,
        content_id: u64,
        /// `"upvote"` or `"downvote"`.
        direction: String,
    },
    DistributeRewards {
        sender: Identity,
        content_id: u64,
    },
    SetMinStake {
        sender: Identity,
        /// A JSON number up to `u64::MAX`, or a decimal string for larger values.
        #[serde(with = "wire_amount")]
        new_value: u128,
    },
}

impl Call {
    pub fn submit(sender: impl Into<Identity>, content_hash: &ContentHash) -> Self {
        Self::SubmitContent {
            sender: sender.into(),
            content_hash: content_hash.to_hex(),
        }
    }

    pub fn vote(sender: impl Into<Identity>, content_id: u64, direction: VoteDirection) -> Self {
        Self::VoteOnContent {
            sender: sender.into(),
            content_id,
            direction: direction.as_str().to_string(),
        }
    }

    pub fn distribute(sender: impl Into<Identity>, content_id: u64) -> Self {
        Self::DistributeRewards {
            sender: sender.into(),
            content_id,
        }
    }

    pub fn set_min_stake(sender: impl Into<Identity>, new_value: u128) -> Self {
        Self::SetMinStake {
            sender: sender.into(),
            new_value,
        }
    }

    pub fn sender(&self) -> &Identity {
        match self {
            Self::SubmitContent { sender, .. }
            | Self::VoteOnContent { sender, .. }
            | Self::DistributeRewards { sender, .. }
            | Self::SetMinStake { sender, .. } => sender,
        }
    }

    /// Operation name as it appears on the wire.
    pub fn op_name(&self) -> &'static str {
        match self {
            Self::SubmitContent { .. } => "submit_content",
            Self::VoteOnContent { .. } => "vote_on_content",
            Self::DistributeRewards { .. } => "distribute_rewards",
            Self::SetMinStake { .. } => "set_min_stake",
        }
    }

    /// Decode wire arguments into typed ones. Runs before any state is read.
    ///
    /// Senders are taken as already authenticated; only their shape is checked.
    pub(crate) fn decode(&self) -> Result<DecodedCall, CurationError> {
        let sender = self.sender();
        if !sender.is_valid() {
            return Err(CurationError::InvalidSender(sender.as_str().to_string()));
        }
        Ok(match self {
            Self::SubmitContent { content_hash, .. } => DecodedCall::Submit(
                ContentHash::from_hex(content_hash)
                    .map_err(|e| CurationError::MalformedContentHash(e.to_string()))?,
            ),
            Self::VoteOnContent {
                content_id,
                direction,
                ..
            } => DecodedCall::Vote(ContentId::new(*content_id), direction.parse()?),
            Self::DistributeRewards { content_id, .. } => {
                DecodedCall::Distribute(ContentId::new(*content_id))
            }
            Self::SetMinStake { new_value, .. } => DecodedCall::SetMinStake(Amount::new(*new_value)),
        })
    }
}

/// Amounts inside `Call` go through serde's buffered representation for
/// internally tagged enums, which has no `u128`. Encode small values as JSON
/// numbers and anything wider as a decimal string.
mod wire_amount {
    use std::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        match u64::try_from(*value) {
            Ok(small) => serializer.serialize_u64(small),
            Err(_) => serializer.serialize_str(&value.to_string()),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }

    struct AmountVisitor;

    impl<'de> Visitor<'de> for AmountVisitor {
        type Value = u128;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative integer or a decimal string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u128, E> {
            Ok(u128::from(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u128, E> {
            u128::try_from(v).map_err(|_| E::custom(format!("negative amount {v}")))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u128, E> {
            v.parse()
                .map_err(|_| E::custom(format!("invalid decimal amount {v:?}")))
        }
    }
}

pub(crate) enum DecodedCall {
    Submit(ContentHash),
    Vote(ContentId, VoteDirection),
    Distribute(ContentId),
    SetMinStake(Amount),
}

/// Outcome of applying one call.
///
/// `value` is the new content id for submissions; `error` is the stable numeric
/// code on failure, absent for internal faults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Receipt {
    pub fn ok() -> Self {
        Self {
            success: true,
            value: None,
            error: None,
            message: None,
        }
    }

    pub fn ok_value(value: u64) -> Self {
        Self {
            value: Some(value),
            ..Self::ok()
        }
    }

    pub fn err(error: &CurationError) -> Self {
        Self {
            success: false,
            value: None,
            error: error.code().map(|c| c.as_u32()),
            message: Some(error.to_string()),
        }
    }
}
