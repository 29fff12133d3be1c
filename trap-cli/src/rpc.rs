//! Ethereum JSON-RPC base-fee source.
//!
//! Reads `baseFeePerGas` from the latest block header via
//! `eth_getBlockByNumber("latest", false)`.

use {
    crate::error::CliError,
    basefee_trap::{FeeSource, TrapError},
    log::debug,
    reqwest::blocking::Client,
    serde::{Deserialize, Serialize},
    serde_json::json,
    std::time::Duration,
};

const GET_BLOCK_BY_NUMBER: &str = "eth_getBlockByNumber";

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Deserialize, Debug)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Deserialize, Debug)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct BlockHeader {
    number: Option<String>,
    base_fee_per_gas: Option<String>,
}

/// Parse an Ethereum hex quantity (`0x`-prefixed, no leading zeros).
pub fn parse_quantity(s: &str) -> Result<u64, String> {
    let digits = s
        .strip_prefix("0x")
        .ok_or_else(|| format!("quantity {s:?} is missing the 0x prefix"))?;
    if digits.is_empty() {
        return Err(format!("quantity {s:?} has no digits"));
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(format!("quantity {s:?} has leading zeros"));
    }
    u64::from_str_radix(digits, 16).map_err(|err| format!("quantity {s:?}: {err}"))
}

/// Extract the base fee from a raw `eth_getBlockByNumber` response body.
fn parse_block_response(body: &str) -> Result<u64, String> {
    let response: RpcResponse<BlockHeader> =
        serde_json::from_str(body).map_err(|err| format!("malformed response: {err}"))?;
    if let Some(error) = response.error {
        return Err(format!("node returned error {}: {}", error.code, error.message));
    }
    let header = response
        .result
        .ok_or_else(|| "node returned no block".to_string())?;
    let base_fee = header
        .base_fee_per_gas
        .ok_or_else(|| "block has no baseFeePerGas (pre-London chain?)".to_string())?;
    debug!(
        "latest block {} baseFeePerGas={}",
        header.number.as_deref().unwrap_or("?"),
        base_fee
    );
    parse_quantity(&base_fee)
}

/// Reads the base fee of the latest block from an Ethereum node.
#[derive(Debug)]
pub struct JsonRpcFeeSource {
    url: String,
    client: Client,
}

impl JsonRpcFeeSource {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, CliError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| CliError::Rpc(err.to_string()))?;
        Ok(Self {
            url: url.to_string(),
            client,
        })
    }

    fn fetch(&self) -> Result<u64, String> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: GET_BLOCK_BY_NUMBER,
            params: json!(["latest", false]),
        };
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .map_err(|err| format!("{} unreachable: {err}", self.url))?;
        if !response.status().is_success() {
            return Err(format!("{} returned {}", self.url, response.status()));
        }
        let body = response
            .text()
            .map_err(|err| format!("failed to read response body: {err}"))?;
        parse_block_response(&body)
    }
}

impl FeeSource for JsonRpcFeeSource {
    fn base_fee(&self) -> basefee_trap::error::Result<u64> {
        self.fetch().map_err(TrapError::FeeSource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("0x0"), Ok(0));
        assert_eq!(parse_quantity("0x3b9aca00"), Ok(1_000_000_000));
        assert_eq!(parse_quantity("0xffffffffffffffff"), Ok(u64::MAX));
        assert!(parse_quantity("1234").is_err());
        assert!(parse_quantity("0x").is_err());
        assert!(parse_quantity("0x01").is_err());
        assert!(parse_quantity("0xzz").is_err());
        assert!(parse_quantity("0x10000000000000000").is_err());
    }

    #[test]
    fn test_parse_block_response() {
        let body = r#"{"jsonrpc":"2.0","id":1,"result":{"number":"0x1234","baseFeePerGas":"0x6fc23ac00","hash":"0xab"}}"#;
        assert_eq!(parse_block_response(body), Ok(30_000_000_000));
    }

    #[test]
    fn test_parse_block_response_pre_london() {
        let body = r#"{"jsonrpc":"2.0","id":1,"result":{"number":"0x1"}}"#;
        let err = parse_block_response(body).unwrap_err();
        assert!(err.contains("baseFeePerGas"), "{err}");
    }

    #[test]
    fn test_parse_block_response_node_error() {
        let body = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"method not found"}}"#;
        let err = parse_block_response(body).unwrap_err();
        assert!(err.contains("-32601"), "{err}");
    }

    #[test]
    fn test_parse_block_response_null_block() {
        let body = r#"{"jsonrpc":"2.0","id":1,"result":null}"#;
        assert!(parse_block_response(body).is_err());
    }

    #[test]
    fn test_unreachable_node_is_a_source_error() {
        let source =
            JsonRpcFeeSource::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
        assert!(matches!(source.base_fee(), Err(TrapError::FeeSource(_))));
    }
}
