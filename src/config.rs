//! Process configuration read from environment variables (optionally a `.env`
//! file).
//!
//! | Variable                   | Default              |
//! |----------------------------|----------------------|
//! | `ECOMMERCE_LISTEN_ADDRESS` | `0.0.0.0:8080`       |
//! | `DISCOUNT_GRPC_ADDRESS`    | `localhost:50051`    |
//! | `GRPC_DEADLINE_MS`         | `500`                |
//! | `BLACK_FRIDAY_DATE_MMDD`   | required, e.g. `1127` |
//! | `PRODUCTS_PATH`            | `data/products.json` |

use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::domain::promotion::PromotionalDate;

const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_DISCOUNT_ADDRESS: &str = "localhost:50051";
const DEFAULT_DEADLINE_MS: u64 = 500;
const DEFAULT_PRODUCTS_PATH: &str = "data/products.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("Invalid value '{value}' for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_address: String,
    pub discount_address: String,
    pub discount_deadline: Duration,
    pub promotional_date: PromotionalDate,
    pub products_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let promotional_date = env::var("BLACK_FRIDAY_DATE_MMDD")
            .map_err(|_| ConfigError::Missing("BLACK_FRIDAY_DATE_MMDD"))
            .and_then(|v| parse_promotional_date(&v))?;

        let discount_deadline = match env::var("GRPC_DEADLINE_MS") {
            Ok(v) => parse_deadline(&v)?,
            Err(_) => Duration::from_millis(DEFAULT_DEADLINE_MS),
        };

        Ok(Self {
            listen_address: env::var("ECOMMERCE_LISTEN_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_LISTEN_ADDRESS.to_string()),
            discount_address: env::var("DISCOUNT_GRPC_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_DISCOUNT_ADDRESS.to_string()),
            discount_deadline,
            promotional_date,
            products_path: env::var("PRODUCTS_PATH")
                .unwrap_or_else(|_| DEFAULT_PRODUCTS_PATH.to_string()),
        })
    }
}

/// Parses an `MMDD` string such as `1127`.
pub fn parse_promotional_date(value: &str) -> Result<PromotionalDate, ConfigError> {
    let invalid = |reason| ConfigError::Invalid {
        name: "BLACK_FRIDAY_DATE_MMDD",
        value: value.to_string(),
        reason,
    };

    let value = value.trim();
    if value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("expected four digits in MMDD format"));
    }
    let month: u32 = value[..2].parse().map_err(|_| invalid("bad month"))?;
    let day: u32 = value[2..].parse().map_err(|_| invalid("bad day"))?;

    PromotionalDate::new(month, day).ok_or_else(|| invalid("not a calendar date"))
}

pub fn parse_deadline(value: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason| ConfigError::Invalid {
        name: "GRPC_DEADLINE_MS",
        value: value.to_string(),
        reason,
    };

    match value.trim().parse::<u64>() {
        Ok(0) => Err(invalid("must be greater than zero")),
        Ok(ms) => Ok(Duration::from_millis(ms)),
        Err(_) => Err(invalid("expected a number of milliseconds")),
    }
}
