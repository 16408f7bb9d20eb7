//! Stock quotes via the marketstack end-of-day API, converted to RUB.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use svodka_core::round2;

use crate::currency::convert_to_rub;

const EOD_URL: &str = "http://api.marketstack.com/v1/eod/latest";
const EXCHANGE: &str = "XNAS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPrice {
    pub stock: String,
    pub price: f64,
    pub currency: String,
}

/// Latest closing price per requested symbol, converted USD → RUB. Unlike
/// currency rates, a malformed quote here fails the whole fetch; a report
/// silently missing a tracked stock would be misleading.
pub async fn fetch_stock_prices(
    client: &Client,
    stocks_api_key: &str,
    currency_api_key: &str,
    symbols: &[String],
) -> Result<Vec<StockPrice>> {
    if symbols.is_empty() {
        info!("no stocks selected in settings");
        return Ok(Vec::new());
    }

    let mut prices = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let response = client
            .get(EOD_URL)
            .query(&[
                ("access_key", stocks_api_key),
                ("symbols", symbol.as_str()),
                ("exchange", EXCHANGE),
            ])
            .send()
            .await
            .with_context(|| format!("requesting quote for {symbol}"))?
            .error_for_status()
            .with_context(|| format!("quote request for {symbol} rejected"))?;
        let body: Value = response
            .json()
            .await
            .with_context(|| format!("decoding quote response for {symbol}"))?;

        let usd_price =
            close_price(&body).with_context(|| format!("no closing price for {symbol}"))?;
        let rub_price = convert_to_rub(client, currency_api_key, "USD", usd_price).await?;

        info!("quote for {symbol}: {rub_price:.2} RUB");
        prices.push(StockPrice {
            stock: symbol.clone(),
            price: round2(rub_price),
            currency: "RUB".to_string(),
        });
    }
    Ok(prices)
}

fn close_price(body: &Value) -> Option<f64> {
    body.get("data")?.get(0)?.get("close")?.as_f64()
}
