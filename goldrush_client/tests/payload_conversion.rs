//! GoldRush payloads through conversion and swap extraction

use goldrush_client::{
    client::parse_response, to_raw_transactions, to_token_metadata, BalancesResponse,
    GoldRushChain, TransactionsResponse,
};
use swap_core::{extract_swaps, SwapShape, TokenId};

const WALLET: &str = "0x632A84DC35A1e43B8196B2d08630dC9e6a1F3692";

const BALANCES: &str = r#"{
  "data": {
    "address": "0x632a84dc35a1e43b8196b2d08630dc9e6a1f3692",
    "chain_id": 1,
    "chain_name": "eth-mainnet",
    "items": [
      {
        "contract_decimals": 6,
        "contract_name": "USD Coin",
        "contract_ticker_symbol": "USDC",
        "contract_address": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
        "native_token": false,
        "type": "stablecoin",
        "balance": "2500000"
      },
      {
        "contract_decimals": 18,
        "contract_name": "Uniswap",
        "contract_ticker_symbol": "UNI",
        "contract_address": "0x1f9840a85d5af5bf1d1762f925bdaddc4201f984",
        "native_token": false,
        "type": "cryptocurrency",
        "balance": "0"
      },
      {
        "contract_decimals": 18,
        "contract_name": "Ether",
        "contract_ticker_symbol": "ETH",
        "contract_address": "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee",
        "native_token": true,
        "type": "cryptocurrency",
        "balance": "120000000000000000"
      }
    ]
  },
  "error": false,
  "error_message": null,
  "error_code": null
}"#;

const TRANSACTIONS: &str = r#"{
  "data": {
    "address": "0x632a84dc35a1e43b8196b2d08630dc9e6a1f3692",
    "chain_id": 1,
    "chain_name": "eth-mainnet",
    "items": [
      {
        "block_signed_at": "2021-10-02T17:04:11Z",
        "block_height": 13340000,
        "tx_hash": "0x02aa",
        "successful": true,
        "from_address": "0x632a84dc35a1e43b8196b2d08630dc9e6a1f3692",
        "to_address": "0x7a250d5630b4cf539739df2c5dacb4c659f2488d",
        "value": "0",
        "value_quote": 0.0,
        "gas_spent": 130000,
        "gas_quote": 31.72,
        "log_events": [
          {
            "log_offset": 10,
            "sender_address": "0x1f9840a85d5af5bf1d1762f925bdaddc4201f984",
            "sender_contract_ticker_symbol": "UNI",
            "sender_contract_decimals": 18,
            "decoded": {
              "name": "Transfer",
              "signature": "Transfer(indexed address from, indexed address to, uint256 value)",
              "params": [
                {"name": "from", "type": "address", "indexed": true, "decoded": true, "value": "0x632a84dc35a1e43b8196b2d08630dc9e6a1f3692"},
                {"name": "to", "type": "address", "indexed": true, "decoded": true, "value": "0xd3d2e2692501a5c9ca623199d38826e513033a17"},
                {"name": "value", "type": "uint256", "indexed": false, "decoded": true, "value": "2000000000000000000"}
              ]
            }
          },
          {
            "log_offset": 11,
            "sender_address": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
            "sender_contract_ticker_symbol": "WETH",
            "sender_contract_decimals": 18,
            "decoded": {
              "name": "Transfer",
              "signature": "Transfer(indexed address from, indexed address to, uint256 value)",
              "params": [
                {"name": "from", "type": "address", "indexed": true, "decoded": true, "value": "0xd3d2e2692501a5c9ca623199d38826e513033a17"},
                {"name": "to", "type": "address", "indexed": true, "decoded": true, "value": "0x7a250d5630b4cf539739df2c5dacb4c659f2488d"},
                {"name": "value", "type": "uint256", "indexed": false, "decoded": true, "value": "15000000000000000"}
              ]
            }
          },
          {
            "log_offset": 12,
            "sender_address": "0xd3d2e2692501a5c9ca623199d38826e513033a17",
            "sender_contract_ticker_symbol": "UNI-V2",
            "sender_contract_decimals": 18,
            "decoded": {
              "name": "Swap",
              "signature": "Swap(indexed address sender, uint256 amount0In, uint256 amount1In, uint256 amount0Out, uint256 amount1Out, indexed address to)",
              "params": null
            }
          },
          {
            "log_offset": 13,
            "sender_address": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
            "sender_contract_ticker_symbol": "WETH",
            "sender_contract_decimals": 18,
            "decoded": {
              "name": "Withdrawal",
              "signature": "Withdrawal(indexed address src, uint256 wad)",
              "params": [
                {"name": "src", "type": "address", "indexed": true, "decoded": true, "value": "0x7a250d5630b4cf539739df2c5dacb4c659f2488d"},
                {"name": "wad", "type": "uint256", "indexed": false, "decoded": true, "value": "15000000000000000"}
              ]
            }
          }
        ]
      },
      {
        "block_signed_at": "2021-10-01T09:12:45Z",
        "block_height": 13330000,
        "tx_hash": "0x01bb",
        "successful": true,
        "from_address": "0x632a84dc35a1e43b8196b2d08630dc9e6a1f3692",
        "to_address": "0x7a250d5630b4cf539739df2c5dacb4c659f2488d",
        "value": "50000000000000000",
        "value_quote": 165.2,
        "gas_spent": 110000,
        "gas_quote": 25.1,
        "log_events": [
          {
            "log_offset": 3,
            "sender_address": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
            "sender_contract_ticker_symbol": "USDC",
            "sender_contract_decimals": 6,
            "decoded": {
              "name": "Transfer",
              "signature": "Transfer(indexed address from, indexed address to, uint256 value)",
              "params": [
                {"name": "from", "type": "address", "indexed": true, "decoded": true, "value": "0xb4e16d0168e52d35cacd2c6185b44281ec28c9dc"},
                {"name": "to", "type": "address", "indexed": true, "decoded": true, "value": "0x632a84dc35a1e43b8196b2d08630dc9e6a1f3692"},
                {"name": "value", "type": "uint256", "indexed": false, "decoded": true, "value": "164800000"}
              ]
            }
          },
          {
            "log_offset": 4,
            "sender_address": "0xb4e16d0168e52d35cacd2c6185b44281ec28c9dc",
            "sender_contract_ticker_symbol": "UNI-V2",
            "sender_contract_decimals": 18,
            "decoded": {
              "name": "Swap",
              "signature": "Swap(indexed address sender, uint256 amount0In, uint256 amount1In, uint256 amount0Out, uint256 amount1Out, indexed address to)",
              "params": null
            }
          }
        ]
      },
      {
        "block_signed_at": "2021-09-30T20:00:00Z",
        "block_height": 13320000,
        "tx_hash": "0x00cc",
        "successful": true,
        "from_address": "0x632a84dc35a1e43b8196b2d08630dc9e6a1f3692",
        "to_address": "0x1111111111111111111111111111111111111111",
        "value": "1000",
        "value_quote": null,
        "gas_spent": 21000,
        "gas_quote": null,
        "log_events": null
      }
    ],
    "pagination": {"has_more": false, "page_number": 0, "page_size": 300, "total_count": null}
  },
  "error": false,
  "error_message": null,
  "error_code": null
}"#;

#[test]
fn test_goldrush_payload_to_swap_records() {
    let balances: BalancesResponse = parse_response(BALANCES).expect("balances should parse");
    let transactions: TransactionsResponse =
        parse_response(TRANSACTIONS).expect("transactions should parse");

    let chain = GoldRushChain::parse("1");
    let catalogue = to_token_metadata(balances.items);
    let raw = to_raw_transactions(transactions.items);
    assert_eq!(raw.len(), 3);

    let records: Vec<_> = extract_swaps(WALLET, chain.native_symbol(), catalogue, &raw)
        .into_iter()
        .collect::<Result<_, _>>()
        .expect("every swap should build");

    assert_eq!(records.len(), 2);

    // Newest first, as supplied
    let sell = &records[0];
    assert_eq!(sell.tx_hash, "0x02aa");
    assert_eq!(sell.shape(), SwapShape::TokenToNative);
    assert_eq!(sell.from_symbol, "UNI");
    assert_eq!(sell.from_amount, "2000000000000000000");
    assert_eq!(sell.to_token, TokenId::Native);
    assert_eq!(sell.to_symbol, "ETH");
    assert_eq!(sell.to_amount, "15000000000000000");

    let buy = &records[1];
    assert_eq!(buy.tx_hash, "0x01bb");
    assert_eq!(buy.shape(), SwapShape::NativeToToken);
    assert_eq!(buy.from_amount, "50000000000000000");
    assert_eq!(
        buy.to_token,
        TokenId::Contract("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".to_string())
    );
    assert_eq!(buy.to_symbol, "USDC");
    assert_eq!(buy.to_decimals, 6);
    assert_eq!(buy.to_amount, "164800000");
}
