use crate::utils::http_client::RequestFailure;
use rand::Rng;
use serde_json::Value;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskKind {
    Address,
    PrivateKey,
    Proxy,
    /// Returned unmodified.
    Raw,
}

impl FromStr for MaskKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "address" => Self::Address,
            "privateKey" => Self::PrivateKey,
            "proxy" => Self::Proxy,
            _ => Self::Raw,
        })
    }
}

pub async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// Uniform integer in `[min, max]`. Reversed bounds are swapped.
pub fn get_random_number(min: i64, max: i64) -> i64 {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    rand::thread_rng().gen_range(low..=high)
}

/// Uniform amount in `[min, max]`, rounded to `decimals` fractional digits.
///
/// A degenerate or non-finite range yields `min` (the lower bound).
pub fn get_random_amount(min: f64, max: f64, decimals: u32) -> f64 {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    let amount = if low == high || !low.is_finite() || !high.is_finite() {
        low
    } else {
        rand::thread_rng().gen_range(low..=high)
    };
    round_to(amount, decimals)
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(f64::MAX_10_EXP as u32) as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Masks addresses, keys and proxy strings for logging.
pub fn mask_sensitive_data(data: &str, kind: MaskKind) -> String {
    if data.is_empty() {
        return "Unknown".to_string();
    }

    let chars: Vec<char> = data.chars().collect();
    let len = chars.len();
    let head = |n: usize| chars[..n.min(len)].iter().collect::<String>();
    let tail = |n: usize| chars[len.saturating_sub(n)..].iter().collect::<String>();

    match kind {
        MaskKind::Address => format!("{}******{}", head(6), tail(6)),
        MaskKind::PrivateKey if len <= 8 => "*".repeat(len),
        MaskKind::PrivateKey => format!("{}{}{}", head(4), "*".repeat(len - 8), tail(4)),
        MaskKind::Proxy => format!("{}...", head(15)),
        MaskKind::Raw => data.to_string(),
    }
}

/// Most specific human readable message for an error.
///
/// A response body from a failed request wins: a JSON `message` or `msg`
/// field, else the raw text. Otherwise the error's own message.
pub fn format_error(err: &anyhow::Error) -> String {
    for cause in err.chain() {
        let failure = cause.downcast_ref::<RequestFailure>().or_else(|| {
            cause
                .downcast_ref::<reqwest_middleware::Error>()
                .and_then(RequestFailure::from_error)
        });

        if let Some(message) = failure.and_then(|f| body_message(f.details().body.as_deref())) {
            return message;
        }
    }

    let message = err.to_string();
    if message.is_empty() {
        "Unknown error".to_string()
    } else {
        message
    }
}

fn body_message(body: Option<&str>) -> Option<String> {
    let body = body?;
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => ["message", "msg"]
            .iter()
            .find_map(|key| match map.get(*key) {
                Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
                Some(Value::Null) | Some(Value::String(_)) | None => None,
                Some(other) => Some(other.to_string()),
            }),
        Ok(Value::String(s)) => Some(s),
        Ok(_) => None,
        Err(_) => Some(body.to_string()),
    }
}
