//! Currency rates against RUB via the apilayer exchangerates API.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use svodka_core::round2;

const CONVERT_URL: &str = "https://api.apilayer.com/exchangerates_data/convert";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRate {
    pub currency: String,
    pub rate: f64,
}

/// One RUB rate per requested currency. A response without a result is
/// logged and skipped, not fatal; the report simply shows fewer rates.
pub async fn fetch_currency_rates(
    client: &Client,
    api_key: &str,
    currencies: &[String],
) -> Result<Vec<CurrencyRate>> {
    if currencies.is_empty() {
        info!("no currencies selected in settings");
        return Ok(Vec::new());
    }

    let mut rates = Vec::with_capacity(currencies.len());
    for currency in currencies {
        let body = convert_request(client, api_key, currency, 1.0).await?;
        match rate_from_response(&body) {
            Some(rate) => rates.push(CurrencyRate {
                currency: currency.clone(),
                rate: round2(rate),
            }),
            None => warn!("no rate for {currency} in response: {body}"),
        }
    }
    Ok(rates)
}

/// Convert `amount` of `from` into RUB.
pub async fn convert_to_rub(
    client: &Client,
    api_key: &str,
    from: &str,
    amount: f64,
) -> Result<f64> {
    let body = convert_request(client, api_key, from, amount).await?;
    rate_from_response(&body)
        .with_context(|| format!("no conversion result for {amount} {from}"))
}

async fn convert_request(
    client: &Client,
    api_key: &str,
    from: &str,
    amount: f64,
) -> Result<Value> {
    let amount = amount.to_string();
    let response = client
        .get(CONVERT_URL)
        .query(&[("to", "RUB"), ("from", from), ("amount", amount.as_str())])
        .header("apikey", api_key)
        .send()
        .await
        .with_context(|| format!("requesting rate for {from}"))?
        .error_for_status()
        .with_context(|| format!("rate request for {from} rejected"))?;
    response
        .json()
        .await
        .with_context(|| format!("decoding rate response for {from}"))
}

fn rate_from_response(body: &Value) -> Option<f64> {
    body.get("result").and_then(Value::as_f64)
}
