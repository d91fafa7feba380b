use std::collections::HashMap;

use economia_api::types::ExchangeQuote;

type LastQuotes = HashMap<String, ExchangeQuote>;

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_usd_brl_full() {
    let json = load_fixture("usd_brl.json");
    let resp: LastQuotes = serde_json::from_str(&json).unwrap();
    assert_eq!(resp.len(), 1);

    let quote = &resp["USDBRL"];
    assert_eq!(quote.code, "USD");
    assert_eq!(quote.codein, "BRL");
    assert_eq!(quote.name, "Dólar Americano/Real Brasileiro");
    assert_eq!(quote.high, "5.4512");
    assert_eq!(quote.low, "5.4105");
    assert_eq!(quote.var_bid, "-0.0123");
    assert_eq!(quote.pct_change, "-0.23");
    assert_eq!(quote.bid, "5.43");
    assert_eq!(quote.ask, "5.4312");
    assert_eq!(quote.timestamp, "1718740795");
    assert_eq!(quote.create_date, "2024-06-18 16:59:55");
}

#[test]
fn deserialize_multiple_pairs() {
    let json = load_fixture("multi_pair.json");
    let resp: LastQuotes = serde_json::from_str(&json).unwrap();
    assert_eq!(resp.len(), 2);
    assert_eq!(resp["EURBRL"].bid, "5.8290");
    assert_eq!(resp["USDBRL"].bid, "5.43");
}

#[test]
fn numeric_fields_are_rejected() {
    // The API sends every field as a string; a number means a different document.
    let json = r#"{"code":"USD","codein":"BRL","name":"x","high":"1","low":"1",
        "varBid":"0","pctChange":"0","bid":5.43,"ask":"1","timestamp":"1","create_date":"d"}"#;
    assert!(serde_json::from_str::<ExchangeQuote>(json).is_err());
}

#[test]
fn bid_is_the_only_required_field() {
    let quote: ExchangeQuote = serde_json::from_str(r#"{"bid":"5.43"}"#).unwrap();
    assert_eq!(quote.bid, "5.43");
    assert_eq!(quote.code, "");
    assert_eq!(quote.create_date, "");

    assert!(serde_json::from_str::<ExchangeQuote>(r#"{"code":"USD","ask":"5.44"}"#).is_err());
}

#[test]
fn serialize_uses_upstream_field_names() {
    let json = load_fixture("usd_brl.json");
    let resp: LastQuotes = serde_json::from_str(&json).unwrap();
    let value = serde_json::to_value(&resp["USDBRL"]).unwrap();
    assert_eq!(value["varBid"], "-0.0123");
    assert_eq!(value["pctChange"], "-0.23");
    assert_eq!(value["create_date"], "2024-06-18 16:59:55");
}
