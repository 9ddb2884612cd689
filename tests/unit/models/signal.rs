//! Unit tests for envelope serialization

use lucra::models::signal::{
    AnalysisEnvelope, ErrorEnvelope, Side, Signal, UltimateEnvelope, ANALYSIS_SCHEMA_VERSION,
    ULTIMATE_SCHEMA_VERSION,
};
use serde_json::json;

#[test]
fn test_side_serializes_uppercase() {
    assert_eq!(serde_json::to_value(Side::Buy).unwrap(), json!("BUY"));
    assert_eq!(serde_json::to_value(Side::Sell).unwrap(), json!("SELL"));
    assert_eq!(Side::Sell.to_string(), "SELL");
}

#[test]
fn test_analysis_envelope_field_names() {
    let envelope = AnalysisEnvelope {
        schema_version: ANALYSIS_SCHEMA_VERSION.to_string(),
        request_id: "abc".to_string(),
        generated_at: "2025-01-15T12:30:00.000-03:00".to_string(),
        horizon: "24h".to_string(),
        signals: vec![Signal {
            symbol: "BTCUSDT".to_string(),
            side: Side::Buy,
            entry: 100.0,
            target: 102.0,
            stop_loss: 98.0,
            entrada_datahora: "2025-01-15 12:30:00".to_string(),
            saida_datahora: "2025-01-16 12:30:00".to_string(),
        }],
    };

    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({
            "schema_version": "1.0.0",
            "request_id": "abc",
            "generated_at": "2025-01-15T12:30:00.000-03:00",
            "horizon": "24h",
            "signals": [{
                "symbol": "BTCUSDT",
                "side": "BUY",
                "entry": 100.0,
                "target": 102.0,
                "stop_loss": 98.0,
                "entrada_datahora": "2025-01-15 12:30:00",
                "saida_datahora": "2025-01-16 12:30:00"
            }]
        })
    );
}

#[test]
fn test_ultimate_envelope_carries_flag() {
    let envelope = UltimateEnvelope {
        schema_version: ULTIMATE_SCHEMA_VERSION.to_string(),
        request_id: "abc".to_string(),
        generated_at: "now".to_string(),
        horizon: "24h".to_string(),
        ultimate: true,
        signals: vec![json!({"anything": [1, 2, 3]})],
    };
    let value = serde_json::to_value(&envelope).unwrap();
    assert_eq!(value["ultimate"], true);
    assert_eq!(value["schema_version"], "2.0.0");
    assert_eq!(value["signals"][0]["anything"], json!([1, 2, 3]));
}

#[test]
fn test_error_envelope_shape() {
    let envelope = ErrorEnvelope::new(ULTIMATE_SCHEMA_VERSION, "rid", "ultimate_disabled");
    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({"schema_version": "2.0.0", "request_id": "rid", "error": "ultimate_disabled"})
    );
}
