use crate::signing::verify_signed_consensus_message;
use ethereum_consensus::{
    primitives::{BlsPublicKey, Hash32, Root, Slot, ValidatorIndex},
    state_transition::Context,
    Error, Fork,
};

pub mod capella {
    use ethereum_consensus::{
        primitives::{BlsSignature, Root, Slot, ValidatorIndex},
        ssz::prelude::*,
    };

    /// The relay-facing projection of a blinded beacon block: the execution
    /// payload is replaced by its header, consensus-only body fields are
    /// outside this exchange.
    #[derive(Debug, Default, Clone, SimpleSerialize, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct BlindedBeaconBlockBody {
        pub execution_payload_header: crate::types::execution_payload::capella::ExecutionPayloadHeader,
    }

    #[derive(Debug, Default, Clone, SimpleSerialize, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct BlindedBeaconBlock {
        #[serde(with = "crate::serde::as_str")]
        pub slot: Slot,
        #[serde(with = "crate::serde::as_str")]
        pub proposer_index: ValidatorIndex,
        pub parent_root: Root,
        pub state_root: Root,
        pub body: BlindedBeaconBlockBody,
    }

    #[derive(Debug, Default, Clone, SimpleSerialize, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct SignedBlindedBeaconBlock {
        pub message: BlindedBeaconBlock,
        pub signature: BlsSignature,
    }
}

pub mod deneb {
    use ethereum_consensus::{
        primitives::{BlsSignature, Root, Slot, ValidatorIndex},
        ssz::prelude::*,
    };

    #[derive(Debug, Default, Clone, SimpleSerialize, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct BlindedBeaconBlockBody {
        pub execution_payload_header: crate::types::execution_payload::deneb::ExecutionPayloadHeader,
    }

    #[derive(Debug, Default, Clone, SimpleSerialize, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct BlindedBeaconBlock {
        #[serde(with = "crate::serde::as_str")]
        pub slot: Slot,
        #[serde(with = "crate::serde::as_str")]
        pub proposer_index: ValidatorIndex,
        pub parent_root: Root,
        pub state_root: Root,
        pub body: BlindedBeaconBlockBody,
    }

    #[derive(Debug, Default, Clone, SimpleSerialize, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct SignedBlindedBeaconBlock {
        pub message: BlindedBeaconBlock,
        pub signature: BlsSignature,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[serde(untagged)]
pub enum SignedBlindedBeaconBlock {
    Capella(capella::SignedBlindedBeaconBlock),
    Deneb(deneb::SignedBlindedBeaconBlock),
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SignedBlindedBeaconBlock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        if let Ok(inner) = <_ as serde::Deserialize>::deserialize(&value) {
            return Ok(Self::Deneb(inner))
        }
        if let Ok(inner) = <_ as serde::Deserialize>::deserialize(&value) {
            return Ok(Self::Capella(inner))
        }
        Err(serde::de::Error::custom("no variant could be deserialized from input"))
    }
}

impl SignedBlindedBeaconBlock {
    pub fn version(&self) -> Fork {
        match self {
            Self::Capella(..) => Fork::Capella,
            Self::Deneb(..) => Fork::Deneb,
        }
    }

    pub fn slot(&self) -> Slot {
        match self {
            Self::Capella(inner) => inner.message.slot,
            Self::Deneb(inner) => inner.message.slot,
        }
    }

    pub fn proposer_index(&self) -> ValidatorIndex {
        match self {
            Self::Capella(inner) => inner.message.proposer_index,
            Self::Deneb(inner) => inner.message.proposer_index,
        }
    }

    pub fn block_hash(&self) -> &Hash32 {
        match self {
            Self::Capella(inner) => &inner.message.body.execution_payload_header.block_hash,
            Self::Deneb(inner) => &inner.message.body.execution_payload_header.block_hash,
        }
    }

    pub fn parent_hash(&self) -> &Hash32 {
        match self {
            Self::Capella(inner) => &inner.message.body.execution_payload_header.parent_hash,
            Self::Deneb(inner) => &inner.message.body.execution_payload_header.parent_hash,
        }
    }

    /// Verify the proposer's signature over the block under the
    /// beacon-proposer domain for the block's slot.
    pub fn verify_signature(
        &mut self,
        public_key: &BlsPublicKey,
        context: &Context,
        genesis_validators_root: Option<Root>,
    ) -> Result<(), Error> {
        let slot = self.slot();
        match self {
            Self::Capella(inner) => verify_signed_consensus_message(
                &mut inner.message,
                &inner.signature,
                public_key,
                context,
                Some(slot),
                genesis_validators_root,
            ),
            Self::Deneb(inner) => verify_signed_consensus_message(
                &mut inner.message,
                &inner.signature,
                public_key,
                context,
                Some(slot),
                genesis_validators_root,
            ),
        }
    }
}
