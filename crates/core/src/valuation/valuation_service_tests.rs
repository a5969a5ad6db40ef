//! Tests for the valuation service fan-out.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::methods::ValuationMethod;
use super::valuation_model::ValuationInput;
use super::valuation_service::{ValuationService, ValuationServiceConfig, ValuationServiceTrait};
use crate::errors::{Error, Result};
use crate::products::ProductInfo;
use crate::valuation_types::{ProductValuationTypeConfig, ValuationMethodKind};

enum Behaviour {
    Value(i64, f64),
    /// A value that also reports the new price it was derived from
    NewPrice(i64, f64, f64),
    Fail,
    Hang,
}

struct MockMethod {
    kind: ValuationMethodKind,
    available: bool,
    behaviour: Behaviour,
    calls: AtomicUsize,
}

impl MockMethod {
    fn new(kind: ValuationMethodKind, behaviour: Behaviour) -> Arc<Self> {
        Arc::new(Self {
            kind,
            available: true,
            behaviour,
            calls: AtomicUsize::new(0),
        })
    }

    fn unavailable(kind: ValuationMethodKind) -> Arc<Self> {
        Arc::new(Self {
            kind,
            available: false,
            behaviour: Behaviour::Value(1, 1.0),
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ValuationMethod for MockMethod {
    fn kind(&self) -> ValuationMethodKind {
        self.kind
    }

    fn is_available(&self) -> bool {
        self.available
    }

    async fn valuate(&self, _product: &ProductInfo) -> Result<ValuationInput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behaviour {
            Behaviour::Value(value, confidence) => {
                Ok(ValuationInput::new(self.name(), value, confidence))
            }
            Behaviour::NewPrice(value, confidence, new_price) => {
                Ok(ValuationInput::new(self.name(), value, confidence)
                    .with_metadata("newPrice", new_price))
            }
            Behaviour::Fail => Err(Error::Unexpected("source unavailable".to_string())),
            Behaviour::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(ValuationInput::new(self.name(), 1, 1.0))
            }
        }
    }
}

fn product() -> ProductInfo {
    ProductInfo::new(42, "Sony WH-1000XM4")
}

fn config(valuation_type_id: i64, is_active: bool, weight: f64) -> ProductValuationTypeConfig {
    ProductValuationTypeConfig::new(42, valuation_type_id, is_active, weight)
}

#[tokio::test]
async fn test_inputs_come_back_in_priority_order() {
    let service = ValuationService::new(vec![
        MockMethod::new(ValuationMethodKind::SoldAds, Behaviour::Value(900, 0.5)),
        MockMethod::new(ValuationMethodKind::Database, Behaviour::Value(1000, 0.7)),
        MockMethod::new(ValuationMethodKind::Tradera, Behaviour::Value(1100, 0.6)),
    ]);

    let inputs = service.collect_inputs(&product(), &[]).await.unwrap();

    let names: Vec<&str> = inputs.iter().map(|i| i.valuation_type.as_str()).collect();
    assert_eq!(names, vec!["Egen databas", "Tradera", "Sålda annonser"]);
}

#[tokio::test]
async fn test_failed_method_is_left_out() {
    let service = ValuationService::new(vec![
        MockMethod::new(ValuationMethodKind::Database, Behaviour::Value(1000, 0.8)),
        MockMethod::new(ValuationMethodKind::Tradera, Behaviour::Fail),
    ]);

    let output = service.valuate_product(&product(), &[]).await.unwrap();

    assert_eq!(output.recommended_price, 1000.0);
    assert_eq!(output.confidence, 0.8);
    assert_eq!(output.individual_vals.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_slow_method_times_out() {
    let service = ValuationService::new(vec![
        MockMethod::new(ValuationMethodKind::Database, Behaviour::Value(1000, 0.8)),
        MockMethod::new(ValuationMethodKind::Tradera, Behaviour::Hang),
    ])
    .with_config(ValuationServiceConfig {
        method_timeout: Duration::from_millis(500),
    });

    let inputs = service.collect_inputs(&product(), &[]).await.unwrap();

    assert_eq!(inputs.len(), 1);
    assert_eq!(inputs[0].valuation_type, "Egen databas");
}

#[tokio::test]
async fn test_unavailable_method_is_not_called() {
    let tradera = MockMethod::unavailable(ValuationMethodKind::Tradera);
    let service = ValuationService::new(vec![
        MockMethod::new(ValuationMethodKind::Database, Behaviour::Value(1000, 0.8)),
        tradera.clone(),
    ]);

    let inputs = service.collect_inputs(&product(), &[]).await.unwrap();

    assert_eq!(inputs.len(), 1);
    assert_eq!(tradera.call_count(), 0);
}

#[tokio::test]
async fn test_inactive_types_are_skipped() {
    let database = MockMethod::new(ValuationMethodKind::Database, Behaviour::Value(1000, 0.8));
    let tradera = MockMethod::new(ValuationMethodKind::Tradera, Behaviour::Value(1200, 0.6));
    let service = ValuationService::new(vec![database.clone(), tradera.clone()]);

    let configs = vec![config(1, false, 0.0), config(3, true, 100.0)];
    let inputs = service.collect_inputs(&product(), &configs).await.unwrap();

    assert_eq!(database.call_count(), 0);
    assert_eq!(tradera.call_count(), 1);
    assert_eq!(inputs.len(), 1);
    assert_eq!(inputs[0].metadata["blendWeight"], 100.0);
}

#[tokio::test]
async fn test_no_active_types_gives_zero_output() {
    let service = ValuationService::new(vec![MockMethod::new(
        ValuationMethodKind::Database,
        Behaviour::Value(1000, 0.8),
    )]);

    let configs = vec![config(1, false, 0.0)];
    let output = service.valuate_product(&product(), &configs).await.unwrap();

    assert!(!output.has_recommendation());
}

#[tokio::test]
async fn test_new_price_bound_is_applied() {
    let service = ValuationService::new(vec![MockMethod::new(
        ValuationMethodKind::Tradera,
        Behaviour::Value(50_000, 0.6),
    )]);
    let product = ProductInfo {
        new_price: Some(2000.0),
        ..product()
    };

    let output = service.valuate_product(&product, &[]).await.unwrap();

    assert!(!output.is_reasonable);
    assert_eq!(output.recommended_price, 50_000.0);
}

#[tokio::test]
async fn test_estimated_new_price_bounds_the_result() {
    let service = ValuationService::new(vec![
        MockMethod::new(
            ValuationMethodKind::LlmNewPrice,
            Behaviour::NewPrice(500, 0.4, 1000.0),
        ),
        MockMethod::new(ValuationMethodKind::Tradera, Behaviour::Value(500_000, 0.9)),
    ]);

    // Only the oracle-backed method knows the new price
    let output = service.valuate_product(&product(), &[]).await.unwrap();

    assert!(!output.is_reasonable);
    assert!(output.new_price_ratio.unwrap() > 10.0);
}

#[tokio::test]
async fn test_product_new_price_wins_over_estimate() {
    let service = ValuationService::new(vec![MockMethod::new(
        ValuationMethodKind::LlmNewPrice,
        Behaviour::NewPrice(1500, 0.4, 100.0),
    )]);
    let product = ProductInfo {
        new_price: Some(3000.0),
        ..product()
    };

    let output = service.valuate_product(&product, &[]).await.unwrap();

    assert!(output.is_reasonable);
    assert_eq!(output.new_price_ratio, Some(0.5));
}

#[tokio::test]
async fn test_invalid_product_is_rejected() {
    let service = ValuationService::new(vec![MockMethod::new(
        ValuationMethodKind::Database,
        Behaviour::Value(1000, 0.8),
    )]);

    let result = service
        .valuate_product(&ProductInfo::new(1, " "), &[])
        .await;

    assert!(matches!(result, Err(Error::Validation(_))));
}
