use ethereum_consensus::Fork;

pub mod capella {
    use ethereum_consensus::{
        bellatrix::mainnet::{
            Transaction, BYTES_PER_LOGS_BLOOM, MAX_EXTRA_DATA_BYTES, MAX_TRANSACTIONS_PER_PAYLOAD,
        },
        capella::mainnet::{Withdrawal, MAX_WITHDRAWALS_PER_PAYLOAD},
        primitives::{Bytes32, ExecutionAddress, Hash32, Root, U256},
        ssz::prelude::*,
        Error,
    };

    #[derive(Debug, Default, Clone, SimpleSerialize, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ExecutionPayload {
        pub parent_hash: Hash32,
        pub fee_recipient: ExecutionAddress,
        pub state_root: Bytes32,
        pub receipts_root: Bytes32,
        pub logs_bloom: ByteVector<BYTES_PER_LOGS_BLOOM>,
        pub prev_randao: Bytes32,
        #[serde(with = "crate::serde::as_str")]
        pub block_number: u64,
        #[serde(with = "crate::serde::as_str")]
        pub gas_limit: u64,
        #[serde(with = "crate::serde::as_str")]
        pub gas_used: u64,
        #[serde(with = "crate::serde::as_str")]
        pub timestamp: u64,
        pub extra_data: ByteList<MAX_EXTRA_DATA_BYTES>,
        #[serde(with = "crate::serde::as_str")]
        pub base_fee_per_gas: U256,
        pub block_hash: Hash32,
        pub transactions: List<Transaction, MAX_TRANSACTIONS_PER_PAYLOAD>,
        pub withdrawals: List<Withdrawal, MAX_WITHDRAWALS_PER_PAYLOAD>,
    }

    #[derive(Debug, Default, Clone, SimpleSerialize, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ExecutionPayloadHeader {
        pub parent_hash: Hash32,
        pub fee_recipient: ExecutionAddress,
        pub state_root: Bytes32,
        pub receipts_root: Bytes32,
        pub logs_bloom: ByteVector<BYTES_PER_LOGS_BLOOM>,
        pub prev_randao: Bytes32,
        #[serde(with = "crate::serde::as_str")]
        pub block_number: u64,
        #[serde(with = "crate::serde::as_str")]
        pub gas_limit: u64,
        #[serde(with = "crate::serde::as_str")]
        pub gas_used: u64,
        #[serde(with = "crate::serde::as_str")]
        pub timestamp: u64,
        pub extra_data: ByteList<MAX_EXTRA_DATA_BYTES>,
        #[serde(with = "crate::serde::as_str")]
        pub base_fee_per_gas: U256,
        pub block_hash: Hash32,
        pub transactions_root: Root,
        pub withdrawals_root: Root,
    }

    impl TryFrom<&mut ExecutionPayload> for ExecutionPayloadHeader {
        type Error = Error;

        fn try_from(payload: &mut ExecutionPayload) -> Result<Self, Self::Error> {
            let transactions_root = payload.transactions.hash_tree_root()?;
            let withdrawals_root = payload.withdrawals.hash_tree_root()?;
            Ok(Self {
                parent_hash: payload.parent_hash.clone(),
                fee_recipient: payload.fee_recipient.clone(),
                state_root: payload.state_root.clone(),
                receipts_root: payload.receipts_root.clone(),
                logs_bloom: payload.logs_bloom.clone(),
                prev_randao: payload.prev_randao.clone(),
                block_number: payload.block_number,
                gas_limit: payload.gas_limit,
                gas_used: payload.gas_used,
                timestamp: payload.timestamp,
                extra_data: payload.extra_data.clone(),
                base_fee_per_gas: payload.base_fee_per_gas,
                block_hash: payload.block_hash.clone(),
                transactions_root,
                withdrawals_root,
            })
        }
    }
}

pub mod deneb {
    use ethereum_consensus::{
        bellatrix::mainnet::{
            Transaction, BYTES_PER_LOGS_BLOOM, MAX_EXTRA_DATA_BYTES, MAX_TRANSACTIONS_PER_PAYLOAD,
        },
        capella::mainnet::{Withdrawal, MAX_WITHDRAWALS_PER_PAYLOAD},
        primitives::{Bytes32, ExecutionAddress, Hash32, Root, U256},
        ssz::prelude::*,
        Error,
    };

    #[derive(Debug, Default, Clone, SimpleSerialize, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ExecutionPayload {
        pub parent_hash: Hash32,
        pub fee_recipient: ExecutionAddress,
        pub state_root: Bytes32,
        pub receipts_root: Bytes32,
        pub logs_bloom: ByteVector<BYTES_PER_LOGS_BLOOM>,
        pub prev_randao: Bytes32,
        #[serde(with = "crate::serde::as_str")]
        pub block_number: u64,
        #[serde(with = "crate::serde::as_str")]
        pub gas_limit: u64,
        #[serde(with = "crate::serde::as_str")]
        pub gas_used: u64,
        #[serde(with = "crate::serde::as_str")]
        pub timestamp: u64,
        pub extra_data: ByteList<MAX_EXTRA_DATA_BYTES>,
        #[serde(with = "crate::serde::as_str")]
        pub base_fee_per_gas: U256,
        pub block_hash: Hash32,
        pub transactions: List<Transaction, MAX_TRANSACTIONS_PER_PAYLOAD>,
        pub withdrawals: List<Withdrawal, MAX_WITHDRAWALS_PER_PAYLOAD>,
        #[serde(with = "crate::serde::as_str")]
        pub blob_gas_used: u64,
        #[serde(with = "crate::serde::as_str")]
        pub excess_blob_gas: u64,
    }

    #[derive(Debug, Default, Clone, SimpleSerialize, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ExecutionPayloadHeader {
        pub parent_hash: Hash32,
        pub fee_recipient: ExecutionAddress,
        pub state_root: Bytes32,
        pub receipts_root: Bytes32,
        pub logs_bloom: ByteVector<BYTES_PER_LOGS_BLOOM>,
        pub prev_randao: Bytes32,
        #[serde(with = "crate::serde::as_str")]
        pub block_number: u64,
        #[serde(with = "crate::serde::as_str")]
        pub gas_limit: u64,
        #[serde(with = "crate::serde::as_str")]
        pub gas_used: u64,
        #[serde(with = "crate::serde::as_str")]
        pub timestamp: u64,
        pub extra_data: ByteList<MAX_EXTRA_DATA_BYTES>,
        #[serde(with = "crate::serde::as_str")]
        pub base_fee_per_gas: U256,
        pub block_hash: Hash32,
        pub transactions_root: Root,
        pub withdrawals_root: Root,
        #[serde(with = "crate::serde::as_str")]
        pub blob_gas_used: u64,
        #[serde(with = "crate::serde::as_str")]
        pub excess_blob_gas: u64,
    }

    impl TryFrom<&mut ExecutionPayload> for ExecutionPayloadHeader {
        type Error = Error;

        fn try_from(payload: &mut ExecutionPayload) -> Result<Self, Self::Error> {
            let transactions_root = payload.transactions.hash_tree_root()?;
            let withdrawals_root = payload.withdrawals.hash_tree_root()?;
            Ok(Self {
                parent_hash: payload.parent_hash.clone(),
                fee_recipient: payload.fee_recipient.clone(),
                state_root: payload.state_root.clone(),
                receipts_root: payload.receipts_root.clone(),
                logs_bloom: payload.logs_bloom.clone(),
                prev_randao: payload.prev_randao.clone(),
                block_number: payload.block_number,
                gas_limit: payload.gas_limit,
                gas_used: payload.gas_used,
                timestamp: payload.timestamp,
                extra_data: payload.extra_data.clone(),
                base_fee_per_gas: payload.base_fee_per_gas,
                block_hash: payload.block_hash.clone(),
                transactions_root,
                withdrawals_root,
                blob_gas_used: payload.blob_gas_used,
                excess_blob_gas: payload.excess_blob_gas,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[serde(untagged)]
pub enum ExecutionPayload {
    Capella(capella::ExecutionPayload),
    Deneb(deneb::ExecutionPayload),
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ExecutionPayload {
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

impl ExecutionPayload {
    pub fn version(&self) -> Fork {
        match self {
            Self::Capella(..) => Fork::Capella,
            Self::Deneb(..) => Fork::Deneb,
        }
    }

    pub fn parent_hash(&self) -> &ethereum_consensus::primitives::Hash32 {
        match self {
            Self::Capella(inner) => &inner.parent_hash,
            Self::Deneb(inner) => &inner.parent_hash,
        }
    }

    pub fn block_hash(&self) -> &ethereum_consensus::primitives::Hash32 {
        match self {
            Self::Capella(inner) => &inner.block_hash,
            Self::Deneb(inner) => &inner.block_hash,
        }
    }

    pub fn gas_limit(&self) -> u64 {
        match self {
            Self::Capella(inner) => inner.gas_limit,
            Self::Deneb(inner) => inner.gas_limit,
        }
    }

    pub fn gas_used(&self) -> u64 {
        match self {
            Self::Capella(inner) => inner.gas_used,
            Self::Deneb(inner) => inner.gas_used,
        }
    }

    pub fn timestamp(&self) -> u64 {
        match self {
            Self::Capella(inner) => inner.timestamp,
            Self::Deneb(inner) => inner.timestamp,
        }
    }

    pub fn to_header(&mut self) -> Result<ExecutionPayloadHeader, ethereum_consensus::Error> {
        match self {
            Self::Capella(inner) => inner.try_into().map(ExecutionPayloadHeader::Capella),
            Self::Deneb(inner) => inner.try_into().map(ExecutionPayloadHeader::Deneb),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[serde(untagged)]
pub enum ExecutionPayloadHeader {
    Capella(capella::ExecutionPayloadHeader),
    Deneb(deneb::ExecutionPayloadHeader),
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ExecutionPayloadHeader {
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

impl ExecutionPayloadHeader {
    pub fn version(&self) -> Fork {
        match self {
            Self::Capella(..) => Fork::Capella,
            Self::Deneb(..) => Fork::Deneb,
        }
    }

    pub fn block_hash(&self) -> &ethereum_consensus::primitives::Hash32 {
        match self {
            Self::Capella(inner) => &inner.block_hash,
            Self::Deneb(inner) => &inner.block_hash,
        }
    }
}
