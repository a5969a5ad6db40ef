use std::sync::Arc;

use resellbot_core::valuation::{
    DatabaseValuationMethod, LlmNewPriceMethod, SoldAdsValuationMethod, TraderaValuationMethod,
    ValuationMethod, ValuationOutput, ValuationService, ValuationServiceConfig,
    ValuationServiceTrait,
};
use resellbot_core::valuation_types::{ValuationTypeService, ValuationTypeServiceTrait};
use resellbot_market_data::TraderaProvider;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use crate::request::{
    InMemoryTradedItemRepository, InMemoryValuationTypeRepository, StaticNewPriceOracle,
    StaticSoldAdsSource, ValuationRequest,
};

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Register the four valuation methods against the request's collaborators.
pub fn build_valuation_service(config: &Config, request: &ValuationRequest) -> ValuationService {
    let methods: Vec<Arc<dyn ValuationMethod>> = vec![
        Arc::new(
            DatabaseValuationMethod::new(Arc::new(InMemoryTradedItemRepository::new(
                request.traded_items.clone(),
            )))
            .with_history_limit(config.history_limit)
            .with_target_days(config.target_days),
        ),
        Arc::new(LlmNewPriceMethod::new(Arc::new(StaticNewPriceOracle::new(
            request.new_price_estimate.clone(),
        )))),
        Arc::new(TraderaValuationMethod::new(Arc::new(TraderaProvider::new(
            config.tradera_config(),
        )))),
        Arc::new(SoldAdsValuationMethod::new(Arc::new(StaticSoldAdsSource::new(
            request.sold_ads.clone(),
        )))),
    ];

    ValuationService::new(methods).with_config(ValuationServiceConfig {
        method_timeout: config.method_timeout,
    })
}

/// Normalize the request's stored configuration and value the product with it.
pub async fn run_valuation(
    config: &Config,
    request: &ValuationRequest,
) -> anyhow::Result<ValuationOutput> {
    let product_id = request.product.product_id;
    let type_service = ValuationTypeService::new(Arc::new(
        InMemoryValuationTypeRepository::with_rows(request.configs.clone()),
    ));
    let configs = type_service.get_product_configs(product_id).await?;
    tracing::debug!(
        "Product {} uses {} of {} valuation types",
        product_id,
        configs.iter().filter(|c| c.is_active).count(),
        configs.len()
    );

    let service = build_valuation_service(config, request);
    let output = service.valuate_product(&request.product, &configs).await?;

    if !output.is_reasonable {
        tracing::warn!(
            "Valuation of product {} exceeds the new price sanity bound",
            product_id
        );
    }

    Ok(output)
}
