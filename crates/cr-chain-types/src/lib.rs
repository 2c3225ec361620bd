use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Canonical chain descriptor. Identity is `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Chain {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    /// May contain template placeholders such as `${THIRDWEB_API_KEY}`.
    pub rpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_currency: Option<NativeCurrency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_explorers: Option<Vec<BlockExplorer>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testnet: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<ChainIcon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faucets: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NativeCurrency {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BlockExplorer {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChainIcon {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
}

/// A chain supplied directly by a caller. Unlike [`Chain`], `name` and `rpc`
/// may be left out and are filled in on normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChainOptions {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_currency: Option<NativeCurrency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_explorers: Option<Vec<BlockExplorer>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testnet: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<ChainIcon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faucets: Option<Vec<String>>,
}

impl From<Chain> for ChainOptions {
    fn from(chain: Chain) -> Self {
        Self {
            id: chain.id,
            name: Some(chain.name),
            rpc: Some(chain.rpc),
            native_currency: chain.native_currency,
            block_explorers: chain.block_explorers,
            testnet: chain.testnet,
            icon: chain.icon,
            faucets: chain.faucets,
        }
    }
}

/// Fully specified currency as published by chain registries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrencyRecord {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl From<CurrencyRecord> for NativeCurrency {
    fn from(record: CurrencyRecord) -> Self {
        Self {
            name: Some(record.name),
            symbol: Some(record.symbol),
            decimals: Some(record.decimals),
        }
    }
}

// ── Registry ("legacy") records ──────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LegacyChain {
    pub chain: String,
    pub chain_id: u64,
    pub name: String,
    pub rpc: Vec<String>,
    pub native_currency: CurrencyRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorers: Option<Vec<ExplorerRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faucets: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<ChainIcon>,
    #[serde(default)]
    pub testnet: bool,
    pub short_name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ens: Option<EnsRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<FeatureRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub red_flags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slip44: Option<u64>,
    #[serde(rename = "infoURL", default, skip_serializing_if = "Option::is_none")]
    pub info_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Registry lookups return records in the legacy shape.
pub type ChainMetadata = LegacyChain;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExplorerRecord {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub standard: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<ChainIcon>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnsRecord {
    pub registry: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeatureRecord {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParentRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub chain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridges: Option<Vec<BridgeRecord>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BridgeRecord {
    pub url: String,
}

// ── Third-party library chain objects ────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExternalChain {
    pub id: u64,
    pub name: String,
    pub native_currency: CurrencyRecord,
    pub rpc_urls: RpcUrls,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_explorers: Option<ExplorerSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testnet: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RpcUrls {
    pub default: RpcEndpoints,
    #[serde(flatten)]
    pub others: BTreeMap<String, RpcEndpoints>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RpcEndpoints {
    pub http: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_socket: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExplorerSet {
    pub default: ExternalExplorer,
    #[serde(flatten)]
    pub others: BTreeMap<String, ExternalExplorer>,
}

impl ExplorerSet {
    /// `default` first, then the named explorers in key order.
    pub fn iter(&self) -> impl Iterator<Item = &ExternalExplorer> {
        std::iter::once(&self.default).chain(self.others.values())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExternalExplorer {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

// ── Normalizer input ─────────────────────────────────────────────────

/// Every shape the normalizer accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainInput {
    Id(u64),
    Custom(ChainOptions),
    External(ExternalChain),
    Legacy(LegacyChain),
}

impl ChainInput {
    /// Classifies a JSON value by shape: numbers are ids, registry records
    /// carry an `rpc` array plus a `slug`, third-party objects carry
    /// `rpcUrls` without `rpc`, anything else is a custom chain.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        match &value {
            Value::Number(_) => serde_json::from_value(value).map(ChainInput::Id),
            Value::Object(map) if is_legacy_shape(map) => {
                serde_json::from_value(value).map(ChainInput::Legacy)
            }
            Value::Object(map) if map.contains_key("rpcUrls") && !map.contains_key("rpc") => {
                serde_json::from_value(value).map(ChainInput::External)
            }
            _ => serde_json::from_value(value).map(ChainInput::Custom),
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            Self::Id(id) => *id,
            Self::Custom(options) => options.id,
            Self::External(chain) => chain.id,
            Self::Legacy(chain) => chain.chain_id,
        }
    }
}

fn is_legacy_shape(map: &Map<String, Value>) -> bool {
    matches!(map.get("rpc"), Some(Value::Array(_))) && map.contains_key("slug")
}

impl<'de> Deserialize<'de> for ChainInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ChainInput::from_value(value).map_err(serde::de::Error::custom)
    }
}

impl From<u64> for ChainInput {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<ChainOptions> for ChainInput {
    fn from(options: ChainOptions) -> Self {
        Self::Custom(options)
    }
}

impl From<Chain> for ChainInput {
    fn from(chain: Chain) -> Self {
        Self::Custom(chain.into())
    }
}

impl From<ExternalChain> for ChainInput {
    fn from(chain: ExternalChain) -> Self {
        Self::External(chain)
    }
}

impl From<LegacyChain> for ChainInput {
    fn from(chain: LegacyChain) -> Self {
        Self::Legacy(chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn legacy_json() -> Value {
        json!({
            "chain": "ETH",
            "chainId": 1,
            "ens": { "registry": "0x00000000000C2E074eC69A0dFb2997BA6C7d2e1e" },
            "explorers": [
                { "name": "etherscan", "url": "https://etherscan.io", "standard": "EIP3091" }
            ],
            "faucets": [],
            "features": [{ "name": "EIP155" }, { "name": "EIP1559" }],
            "icon": {
                "url": "ipfs://QmcxZHpyJa8T4i63xqjPYrZ6tKrt55tZJpbXcjSDKuKaf9/ethereum/512.png",
                "width": 512,
                "height": 512,
                "format": "png"
            },
            "infoURL": "https://ethereum.org",
            "name": "Ethereum Mainnet",
            "nativeCurrency": { "name": "Ether", "symbol": "ETH", "decimals": 18 },
            "networkId": 1,
            "redFlags": [],
            "rpc": ["https://1.rpc.thirdweb.com/${THIRDWEB_API_KEY}"],
            "shortName": "eth",
            "slip44": 60,
            "slug": "ethereum",
            "testnet": false
        })
    }

    #[test]
    fn numbers_are_chain_ids() {
        let input: ChainInput = serde_json::from_value(json!(8453)).unwrap();
        assert_eq!(input, ChainInput::Id(8453));
    }

    #[test]
    fn negative_numbers_are_rejected() {
        assert!(serde_json::from_value::<ChainInput>(json!(-1)).is_err());
    }

    #[test]
    fn registry_records_are_legacy() {
        let input: ChainInput = serde_json::from_value(legacy_json()).unwrap();
        let ChainInput::Legacy(chain) = input else {
            panic!("expected a legacy record");
        };
        assert_eq!(chain.chain_id, 1);
        assert_eq!(chain.slip44, Some(60));
        assert_eq!(chain.info_url.as_deref(), Some("https://ethereum.org"));
        assert_eq!(chain.features.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn rpc_urls_objects_are_external() {
        let input: ChainInput = serde_json::from_value(json!({
            "id": 7777777,
            "name": "Zora",
            "nativeCurrency": { "decimals": 18, "name": "Ether", "symbol": "ETH" },
            "rpcUrls": {
                "default": {
                    "http": ["https://rpc.zora.energy"],
                    "webSocket": ["wss://rpc.zora.energy"]
                }
            },
            "blockExplorers": {
                "default": { "name": "Explorer", "url": "https://explorer.zora.energy" }
            }
        }))
        .unwrap();

        let ChainInput::External(chain) = input else {
            panic!("expected an external chain");
        };
        assert_eq!(chain.rpc_urls.default.http, vec!["https://rpc.zora.energy"]);
        assert!(chain.rpc_urls.others.is_empty());
        assert_eq!(chain.block_explorers.unwrap().iter().count(), 1);
    }

    #[test]
    fn other_objects_are_custom() {
        let input: ChainInput = serde_json::from_value(json!({
            "id": 123456789,
            "name": "Test",
            "rpc": "https://rpc.test.com"
        }))
        .unwrap();

        assert_eq!(
            input,
            ChainInput::Custom(ChainOptions {
                id: 123456789,
                name: Some("Test".to_owned()),
                rpc: Some("https://rpc.test.com".to_owned()),
                ..ChainOptions::default()
            })
        );
    }

    #[test]
    fn rpc_string_with_slug_is_not_legacy() {
        let input: ChainInput = serde_json::from_value(json!({
            "id": 5,
            "rpc": "https://rpc.example",
            "slug": "ignored"
        }))
        .unwrap();
        assert!(matches!(input, ChainInput::Custom(_)));
    }

    #[test]
    fn chain_serializes_camel_case_without_empty_fields() {
        let chain = Chain {
            id: 10,
            name: "OP Mainnet".to_owned(),
            rpc: "https://10.rpc.thirdweb.com".to_owned(),
            native_currency: None,
            block_explorers: Some(vec![BlockExplorer {
                name: "etherscan".to_owned(),
                url: "https://optimistic.etherscan.io".to_owned(),
                api_url: Some("https://api-optimistic.etherscan.io/api".to_owned()),
            }]),
            testnet: None,
            icon: None,
            faucets: None,
        };

        let value = serde_json::to_value(&chain).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 10,
                "name": "OP Mainnet",
                "rpc": "https://10.rpc.thirdweb.com",
                "blockExplorers": [{
                    "name": "etherscan",
                    "url": "https://optimistic.etherscan.io",
                    "apiUrl": "https://api-optimistic.etherscan.io/api"
                }]
            })
        );
    }

    #[test]
    fn chain_id_covers_every_shape() {
        let legacy: LegacyChain = serde_json::from_value(legacy_json()).unwrap();
        assert_eq!(ChainInput::from(legacy).chain_id(), 1);
        assert_eq!(ChainInput::from(42_u64).chain_id(), 42);
        assert_eq!(
            ChainInput::from(ChainOptions {
                id: 7,
                ..ChainOptions::default()
            })
            .chain_id(),
            7
        );
    }
}
