use crate::model::{CompetitorListing, MarketSnapshot, PipelineError, RetailerOffer};
use crate::provider::traits::MarketDataProvider;

use chrono::Utc;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::BTreeMap;

/// Base price, platform rating, review count and shipping terms per retailer.
/// Prices get a bounded non-negative jitter on every draw.
const RETAILERS: &[(&str, f64, f64, u32, &str)] = &[
    ("Amazon.ca", 449.99, 4.3, 1842, "Free with Prime"),
    ("BestBuy.ca", 459.99, 4.1, 967, "Free over $35"),
    ("Official Store", 429.99, 4.6, 3120, "Free standard shipping"),
];

const PRICE_JITTER_MAX: f64 = 20.0;
const REVIEW_SAMPLE_SIZE: usize = 6;

const REVIEW_POOL: &[&str] = &[
    "The sleep tracking on this ring is incredibly accurate. It's changed how I approach my recovery.",
    "Great device but the subscription feels like a cash grab after paying $430 already.",
    "Comfortable enough to wear 24/7. Battery lasts about 5 days with my usage.",
    "Best fitness tracker I've owned. The readiness score actually helps me plan my workouts.",
    "Build quality is exceptional. Titanium feels premium and it's survived everything I've thrown at it.",
    "The app is intuitive but the monthly fee is a dealbreaker for some. I think it's worth it.",
    "Ordered from Amazon.ca, arrived quickly and well packaged. No sizing issues with the sizing kit.",
    "Compared to my previous Fitbit, the Oura Ring data depth is in a different league.",
    "No GPS and no display might bother some people, but I love the minimalist approach.",
    "Canadian shipping was fast. Price in CAD is steep but comparable to other premium wearables.",
];

/// Simulated stand-in for a real market-data integration. Always succeeds;
/// randomized fields stay within the snapshot invariants on every draw.
pub struct SimulatedMarketData;

impl SimulatedMarketData {
    pub fn new() -> Self {
        Self
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn competitor(name: &str, price_cad: f64, retailer: &str) -> CompetitorListing {
    CompetitorListing {
        name: name.to_string(),
        price_cad,
        retailer: retailer.to_string(),
        category: "fitness ring".to_string(),
        extra: serde_json::Map::new(),
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for SimulatedMarketData {
    async fn fetch_snapshot(
        &self,
        product_name: &str,
        market: &str,
    ) -> Result<MarketSnapshot, PipelineError> {
        let mut rng = rand::rng();

        let mut retailers = BTreeMap::new();
        let mut prices_by_retailer = BTreeMap::new();
        for &(name, base, rating, review_count, shipping) in RETAILERS {
            let price = round_cents(base + rng.random_range(0.0..PRICE_JITTER_MAX));
            prices_by_retailer.insert(name.to_string(), price);
            retailers.insert(
                name.to_string(),
                RetailerOffer {
                    price_cad: price,
                    in_stock: rng.random_bool(0.85),
                    platform_rating: rating,
                    review_count,
                    shipping: shipping.to_string(),
                },
            );
        }

        // Derived from the actual draws, never hard-coded.
        let average_price = round_cents(
            prices_by_retailer.values().sum::<f64>() / prices_by_retailer.len() as f64,
        );

        let review_samples: Vec<String> = REVIEW_POOL
            .choose_multiple(&mut rng, REVIEW_SAMPLE_SIZE)
            .map(|review| review.to_string())
            .collect();

        let mut specifications = BTreeMap::new();
        specifications.insert("battery_life".to_string(), serde_json::json!("4-7 days"));
        specifications.insert("water_resistance".to_string(), serde_json::json!("100m"));
        specifications.insert(
            "sensors".to_string(),
            serde_json::json!(["heart rate", "SpO2", "skin temperature", "accelerometer"]),
        );
        specifications.insert("connectivity".to_string(), serde_json::json!("Bluetooth 5.1"));
        specifications.insert("materials".to_string(), serde_json::json!("Titanium"));
        specifications.insert("weight".to_string(), serde_json::json!("4-6g"));
        specifications.insert(
            "subscription".to_string(),
            serde_json::json!("Oura Membership (optional, ~CAD $7.99/month)"),
        );

        Ok(MarketSnapshot {
            product_name: product_name.to_string(),
            market: market.to_string(),
            retailers,
            prices_by_retailer,
            average_price,
            competitors: vec![
                competitor("Samsung Galaxy Ring", 549.99, "BestBuy.ca"),
                competitor("RingConn Smart Ring", 329.99, "Amazon.ca"),
                competitor("Ultrahuman Ring AIR", 399.99, "Amazon.ca"),
            ],
            specifications,
            review_samples,
            fetched_at: Utc::now(),
        })
    }
}
