//! Behaviour tests for turning raw API bodies into display rows.

use serde_json::json;
use tickfind_core::{
    displayable_records, is_displayable, normalize, NormalizedRecord, RawRecord, SearchError,
    SearchPayload,
};

fn raw(value: serde_json::Value) -> RawRecord {
    RawRecord::from_value(value)
}

// =============================================================================
// Normalization
// =============================================================================

#[test]
fn ticker_record_with_market_normalizes_to_symbol_and_exchange() {
    // Given: A record in the ticker/market shape
    let record = raw(json!({ "ticker": "AAPL", "name": "Apple Inc.", "market": "NASDAQ" }));

    // When: It is normalized
    let normalized = normalize(&record);

    // Then: The canonical triple is produced
    assert_eq!(
        normalized,
        NormalizedRecord::new("AAPL", "Apple Inc.", "NASDAQ")
    );
}

#[test]
fn symbol_record_without_exchange_defaults_to_nyse() {
    let record = raw(json!({ "symbol": "SPY", "name": "SPDR S&P 500 ETF Trust" }));

    let normalized = normalize(&record);

    assert_eq!(normalized.symbol, "SPY");
    assert_eq!(normalized.exchange, "NYSE");
}

#[test]
fn records_without_symbol_or_ticker_are_never_displayable() {
    // Given: Records that carry everything except an identifier usable as a symbol
    let records = [
        raw(json!({ "name": "Nameless Holdings", "exchange": "NYSE" })),
        raw(json!({ "_id": "abc123", "market": "NASDAQ" })),
        raw(json!({ "symbol": null, "ticker": null })),
        raw(json!(17)),
    ];

    // Then: None of them pass the display filter
    for record in &records {
        assert!(!is_displayable(&normalize(record)), "{record:?} must be filtered");
    }
    assert!(displayable_records(&records).is_empty());
}

#[test]
fn record_carrying_both_id_spellings_keeps_its_ticker() {
    // Given: A document-store record exposing both `_id` and `id`
    let records = [raw(json!({
        "_id": "abc",
        "id": 7,
        "ticker": "AAPL",
        "name": "Apple Inc."
    }))];

    // When: The records are filtered for display
    let rows = displayable_records(&records);

    // Then: The ticker survives and the record is shown
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0], NormalizedRecord::new("AAPL", "Apple Inc.", "NYSE"));
}

#[test]
fn malformed_field_only_loses_that_field() {
    let record = raw(json!({ "symbol": "TM", "name": ["Toyota"], "exchange": { "code": "TSE" } }));

    let normalized = normalize(&record);

    assert_eq!(normalized.symbol, "TM");
    assert_eq!(normalized.name, None);
    assert_eq!(normalized.exchange, "NYSE");
}

// =============================================================================
// Payload shapes
// =============================================================================

#[test]
fn array_body_keeps_api_order_and_drops_unusable_records() {
    // Given: An API answer mixing both field conventions and a broken record
    let body = r#"[
        {"_id":"1","ticker":"AAPL","name":"Apple Inc.","market":"NASDAQ"},
        {"_id":"2","name":"Ghost Corp"},
        {"_id":"3","symbol":"AAP","name":"Advance Auto Parts","exchange":"NYSE"},
        {"_id":"4","ticker":"AAPB","name":"GraniteShares 2x Long AAPL"}
    ]"#;

    // When: It is decoded and turned into rows
    let payload = SearchPayload::decode(body).expect("valid json");
    let rows = payload.rows();

    // Then: Order is preserved and the symbol-less record is gone
    let symbols: Vec<&str> = rows.iter().map(|row| row.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["AAPL", "AAP", "AAPB"]);
    assert_eq!(rows[2].exchange, "NYSE");
    assert_eq!(payload.records().len(), 4);
}

#[test]
fn object_body_is_treated_as_no_results() {
    // Given: A deployment that answers with an object instead of an array
    let payload = SearchPayload::decode(r#"{"results":[{"ticker":"AAPL"}],"count":1}"#)
        .expect("shape mismatch is absorbed");

    // Then: Nothing is rendered and no error is raised
    assert!(matches!(payload, SearchPayload::Unrecognized(_)));
    assert!(payload.rows().is_empty());
}

#[test]
fn invalid_json_is_reported_as_parse_error() {
    let error = SearchPayload::decode("not json").expect_err("must fail");
    assert!(matches!(error, SearchError::Parse(_)));
    assert_eq!(error.code(), "search.parse");
}
