//! NEAR receipt and outcome types consumed by the indexer.
//!
//! These mirror the shape the host indexing runtime hands over for each
//! receipt: the action receipt itself, the block header it was included in,
//! and the execution outcome with its log lines. Hashes and public keys are
//! opaque byte strings, serialized as base58 in JSON.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// A 32-byte hash (receipt id, outcome id, block hash).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CryptoHash(pub [u8; 32]);

impl CryptoHash {
    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }

    /// Decode a base58 string, requiring exactly 32 bytes.
    pub fn from_base58(s: &str) -> Option<Self> {
        let bytes = bs58::decode(s).into_vec().ok()?;
        let arr: [u8; 32] = bytes.try_into().ok()?;
        Some(Self(arr))
    }
}

impl fmt::Debug for CryptoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CryptoHash({})", self.to_base58())
    }
}

impl fmt::Display for CryptoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for CryptoHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        CryptoHash::from_base58(&s)
            .ok_or_else(|| de::Error::custom(format!("invalid 32-byte base58 hash: {}", s)))
    }
}

/// Raw public key bytes of the receipt signer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PublicKey {
    pub bytes: Vec<u8>,
}

impl PublicKey {
    pub fn to_base58(&self) -> String {
        bs58::encode(&self.bytes).into_string()
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = bs58::decode(&s)
            .into_vec()
            .map_err(|e| de::Error::custom(format!("invalid base58 public key: {}", e)))?;
        Ok(Self { bytes })
    }
}

/// A function call action. Only the method name is consumed by the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FunctionCallAction {
    pub method_name: String,
    #[serde(default)]
    pub args: String,
    #[serde(default)]
    pub gas: u64,
    #[serde(default)]
    pub deposit: String,
}

/// One action of an action receipt, tagged by `kind` in JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionValue {
    CreateAccount,
    DeployContract,
    FunctionCall(FunctionCallAction),
    Transfer,
    Stake,
    AddKey,
    DeleteKey,
    DeleteAccount,
    /// Any action kind added to the protocol later, such as `delegate`.
    Other(String),
}

// Goes through `Value` rather than `#[serde(tag)]`: tagged enums buffer their
// content and lose arbitrary-precision numbers such as `gas`.
impl<'de> Deserialize<'de> for ActionValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut value = Value::deserialize(deserializer)?;
        let kind = value
            .as_object_mut()
            .and_then(|object| object.remove("kind"))
            .ok_or_else(|| de::Error::missing_field("kind"))?;

        match kind.as_str() {
            Some("create_account") => Ok(ActionValue::CreateAccount),
            Some("deploy_contract") => Ok(ActionValue::DeployContract),
            Some("function_call") => serde_json::from_value(value)
                .map(ActionValue::FunctionCall)
                .map_err(de::Error::custom),
            Some("transfer") => Ok(ActionValue::Transfer),
            Some("stake") => Ok(ActionValue::Stake),
            Some("add_key") => Ok(ActionValue::AddKey),
            Some("delete_key") => Ok(ActionValue::DeleteKey),
            Some("delete_account") => Ok(ActionValue::DeleteAccount),
            Some(other) => Ok(ActionValue::Other(other.to_string())),
            None => Err(de::Error::custom("action kind must be a string")),
        }
    }
}

impl ActionValue {
    pub fn as_function_call(&self) -> Option<&FunctionCallAction> {
        match self {
            ActionValue::FunctionCall(call) => Some(call),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActionReceipt {
    pub id: CryptoHash,
    pub predecessor_id: String,
    pub receiver_id: String,
    pub signer_id: String,
    pub signer_public_key: PublicKey,
    #[serde(default)]
    pub actions: Vec<ActionValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlockHeader {
    pub height: u64,
    pub hash: CryptoHash,
    pub timestamp_nanosec: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExecutionOutcome {
    pub id: CryptoHash,
    pub block_hash: CryptoHash,
    pub executor_id: String,
    pub gas_burnt: u64,
    /// Decimal string; token amounts overflow JSON numbers.
    pub tokens_burnt: String,
    /// Absent logs deserialize as an empty sequence.
    #[serde(default)]
    pub logs: Vec<String>,
}

/// The unit the host runtime delivers: one receipt with its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReceiptWithOutcome {
    pub receipt: ActionReceipt,
    pub block: BlockHeader,
    pub outcome: ExecutionOutcome,
}

impl ReceiptWithOutcome {
    pub fn receipt_id(&self) -> String {
        self.receipt.id.to_base58()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crypto_hash_base58_roundtrip() {
        let hash = CryptoHash([9u8; 32]);
        let encoded = hash.to_base58();
        assert_eq!(CryptoHash::from_base58(&encoded), Some(hash));
    }

    #[test]
    fn test_crypto_hash_rejects_wrong_length() {
        let short = bs58::encode([1u8; 8]).into_string();
        assert_eq!(CryptoHash::from_base58(&short), None);
        assert_eq!(CryptoHash::from_base58("0OIl"), None);
    }

    #[test]
    fn test_deserialize_receipt_with_missing_logs() {
        let hash = CryptoHash([4u8; 32]).to_base58();
        let json = format!(
            r#"{{
                "receipt": {{
                    "id": "{hash}",
                    "predecessor_id": "bob.near",
                    "receiver_id": "x.paras.near",
                    "signer_id": "bob.near",
                    "signer_public_key": "{key}",
                    "actions": [
                        {{"kind": "transfer"}},
                        {{"kind": "function_call", "method_name": "nft_buy", "gas": 30000000000000, "deposit": "1"}}
                    ]
                }},
                "block": {{"height": 10, "hash": "{hash}", "timestamp_nanosec": 5000000}},
                "outcome": {{
                    "id": "{hash}",
                    "block_hash": "{hash}",
                    "executor_id": "x.paras.near",
                    "gas_burnt": 100,
                    "tokens_burnt": "1000"
                }}
            }}"#,
            hash = hash,
            key = bs58::encode([5u8; 33]).into_string(),
        );

        let parsed: ReceiptWithOutcome = serde_json::from_str(&json).unwrap();
        assert!(parsed.outcome.logs.is_empty());
        assert_eq!(parsed.receipt.actions.len(), 2);
        assert_eq!(parsed.receipt.actions[0], ActionValue::Transfer);
        assert_eq!(
            parsed.receipt.actions[1].as_function_call().map(|c| c.method_name.as_str()),
            Some("nft_buy")
        );
        assert_eq!(parsed.receipt.signer_public_key.bytes.len(), 33);
        assert_eq!(
            parsed.receipt.actions[1].as_function_call().map(|c| c.gas),
            Some(30_000_000_000_000)
        );
    }

    #[test]
    fn test_unknown_action_kind_is_kept() {
        let actions: Vec<ActionValue> = serde_json::from_str(
            r#"[{"kind": "delegate", "sender_id": "a.near"}, {"kind": "function_call", "method_name": "nft_mint"}]"#,
        )
        .unwrap();

        assert_eq!(actions[0], ActionValue::Other("delegate".to_string()));
        assert_eq!(actions[0].as_function_call(), None);
        assert_eq!(
            actions[1].as_function_call().map(|c| c.method_name.as_str()),
            Some("nft_mint")
        );

        let result: Result<ActionValue, _> = serde_json::from_str(r#"{"method_name": "nft_buy"}"#);
        assert!(result.is_err());
    }
}
