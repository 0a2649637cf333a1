//! Sample data generator for the process dashboard
//!
//! Writes the five raw CSV exports (orders, delivery performance, routes,
//! cost breakdown, customer feedback) with the original upper-case headers.
//! A share of orders is left out of each secondary table so the zero-fill
//! path of the join gets exercised.
//!
//! Usage:
//!   cargo run --release --bin generate_sample -- [OPTIONS]
//!
//! Options:
//!   --orders <N>          Number of orders (default: 200)
//!   --coverage <F>        Share of orders present in each secondary table (default: 0.95)
//!   --seed <N>            Random seed for reproducibility (optional)
//!   --output-dir <PATH>   Output directory (default: data)

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use clap::Parser;
use csv::WriterBuilder;
use nexgen_intel::loader::{COST_FILE, DELIVERY_FILE, FEEDBACK_FILE, ORDERS_FILE, ROUTES_FILE};
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Sample data generator for the five source tables
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
#[command(about = "Generate a seeded sample of the five order-fulfillment CSVs")]
struct Args {
    /// Number of orders to generate
    #[arg(long, default_value = "200")]
    orders: usize,

    /// Probability that an order appears in each secondary table (0.0 - 1.0)
    #[arg(long, default_value = "0.95")]
    coverage: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Directory to write the CSVs into
    #[arg(long, default_value = "data")]
    output_dir: PathBuf,
}

const SEGMENTS: &[&str] = &["Enterprise", "SMB", "Individual"];
const PRIORITIES: &[&str] = &["Express", "Standard", "Economy"];
const CATEGORIES: &[&str] = &["Electronics", "Fashion", "Food & Beverage", "Healthcare", "Industrial", "Books"];
const CITIES: &[&str] = &["Mumbai", "Delhi", "Bangalore", "Chennai", "Kolkata", "Hyderabad", "Pune"];
const CARRIERS: &[&str] = &["SpeedyLogistics", "QuickShip", "GlobalTransit", "ReliableExpress", "EcoDeliver"];
const HANDLING: &[&str] = &["None", "None", "None", "Fragile", "Temperature Controlled", "Hazmat"];
const WEATHER: &[&str] = &["None", "None", "Light Rain", "Heavy Rain", "Fog"];

#[derive(Serialize)]
struct OrderRow {
    #[serde(rename = "Order_ID")]
    order_id: String,
    #[serde(rename = "Order_Date")]
    order_date: String,
    #[serde(rename = "Customer_Segment")]
    customer_segment: &'static str,
    #[serde(rename = "Priority")]
    priority: &'static str,
    #[serde(rename = "Product_Category")]
    product_category: &'static str,
    #[serde(rename = "Order_Value_INR")]
    order_value_inr: f64,
    #[serde(rename = "Origin")]
    origin: &'static str,
    #[serde(rename = "Destination")]
    destination: &'static str,
}

#[derive(Serialize)]
struct DeliveryRow {
    #[serde(rename = "Order_ID")]
    order_id: String,
    #[serde(rename = "Promised_Delivery_Days")]
    promised_delivery_days: i64,
    #[serde(rename = "Actual_Delivery_Days")]
    actual_delivery_days: i64,
    #[serde(rename = "Delivery_Status")]
    delivery_status: &'static str,
    #[serde(rename = "Quality_Issue")]
    quality_issue: &'static str,
    #[serde(rename = "Customer_Rating")]
    customer_rating: i64,
    #[serde(rename = "Delivery_Cost_INR")]
    delivery_cost_inr: f64,
}

#[derive(Serialize)]
struct RouteRow {
    #[serde(rename = "Order_ID")]
    order_id: String,
    #[serde(rename = "Carrier")]
    carrier: &'static str,
    #[serde(rename = "Route")]
    route: String,
    #[serde(rename = "Distance_KM")]
    distance_km: f64,
    #[serde(rename = "Fuel_Consumption_L")]
    fuel_consumption_l: f64,
    #[serde(rename = "Toll_Charges_INR")]
    toll_charges_inr: f64,
    #[serde(rename = "Traffic_Delay_Minutes")]
    traffic_delay_minutes: i64,
    #[serde(rename = "Weather_Impact")]
    weather_impact: &'static str,
}

#[derive(Serialize)]
struct CostRow {
    #[serde(rename = "Order_ID")]
    order_id: String,
    #[serde(rename = "Special_Handling")]
    special_handling: &'static str,
    #[serde(rename = "Fuel_Cost")]
    fuel_cost: f64,
    #[serde(rename = "Labor_Cost")]
    labor_cost: f64,
    #[serde(rename = "Vehicle_Maintenance")]
    vehicle_maintenance: f64,
    #[serde(rename = "Insurance")]
    insurance: f64,
    #[serde(rename = "Packaging_Cost")]
    packaging_cost: f64,
}

#[derive(Serialize)]
struct FeedbackRow {
    #[serde(rename = "Order_ID")]
    order_id: String,
    #[serde(rename = "Feedback_Date")]
    feedback_date: String,
    #[serde(rename = "Rating")]
    rating: i64,
    #[serde(rename = "Would_Recommend")]
    would_recommend: &'static str,
    #[serde(rename = "Issue_Category")]
    issue_category: &'static str,
}

fn pick<'a>(options: &[&'a str], rng: &mut impl Rng) -> &'a str {
    options[rng.gen_range(0..options.len())]
}

/// Round to two decimals, the precision of the currency columns
fn money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// How one delivery went, as each table records it.
///
/// `Quality_Issue` describes the goods only, so a late but intact parcel is
/// `Perfect` there while the customer still files a `Delivery Delay` complaint.
struct Outcome {
    status: &'static str,
    quality_issue: &'static str,
    complaint: &'static str,
}

fn delivery_outcome(promised: i64, actual: i64, rng: &mut impl Rng) -> Outcome {
    let roll: f64 = rng.gen();
    let (status, quality_issue, complaint) = if roll < 0.06 {
        ("Damaged", "Damaged", "Damaged Package")
    } else if roll < 0.10 {
        ("Wrong Item", "Wrong Item", "Wrong Item")
    } else if actual > promised {
        ("Slightly-Delayed", "Perfect", "Delivery Delay")
    } else {
        ("On-Time", "Perfect", "None")
    };
    Outcome { status, quality_issue, complaint }
}

fn writer_for(dir: &Path, file: &str) -> Result<csv::Writer<std::fs::File>> {
    Ok(WriterBuilder::new().has_headers(true).from_path(dir.join(file))?)
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("🔧 Sample Data Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Orders:           {}", args.orders);
    println!("Coverage:         {:.1}%", args.coverage * 100.0);
    println!("Output dir:       {}", args.output_dir.display());
    if let Some(seed) = args.seed {
        println!("Random seed:      {}", seed);
    }
    println!();

    let mut rng: StdRng = match args.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    std::fs::create_dir_all(&args.output_dir)?;

    let mut orders = writer_for(&args.output_dir, ORDERS_FILE)?;
    let mut delivery = writer_for(&args.output_dir, DELIVERY_FILE)?;
    let mut routes = writer_for(&args.output_dir, ROUTES_FILE)?;
    let mut cost = writer_for(&args.output_dir, COST_FILE)?;
    let mut feedback = writer_for(&args.output_dir, FEEDBACK_FILE)?;

    let coverage = args.coverage.clamp(0.0, 1.0);
    let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap_or_default();
    let mut counts = [0usize; 5];

    for i in 0..args.orders {
        let order_id = format!("ORD{:06}", i + 1);
        let order_date = start + Duration::days(rng.gen_range(0..90));
        let origin = pick(CITIES, &mut rng);
        let destination = pick(CITIES, &mut rng);
        let priority = pick(PRIORITIES, &mut rng);

        orders.serialize(OrderRow {
            order_id: order_id.clone(),
            order_date: order_date.format("%Y-%m-%d").to_string(),
            customer_segment: pick(SEGMENTS, &mut rng),
            priority,
            product_category: pick(CATEGORIES, &mut rng),
            order_value_inr: money(rng.gen_range(150.0..15_000.0)),
            origin,
            destination,
        })?;
        counts[0] += 1;

        let promised = match priority {
            "Express" => rng.gen_range(1..=2),
            "Standard" => rng.gen_range(3..=5),
            _ => rng.gen_range(5..=8),
        };
        let actual = (promised + rng.gen_range(-1..=3)).max(1);
        let outcome = delivery_outcome(promised, actual, &mut rng);
        let rating = if outcome.complaint == "None" { rng.gen_range(3..=5) } else { rng.gen_range(1..=3) };

        if rng.gen_bool(coverage) {
            delivery.serialize(DeliveryRow {
                order_id: order_id.clone(),
                promised_delivery_days: promised,
                actual_delivery_days: actual,
                delivery_status: outcome.status,
                quality_issue: outcome.quality_issue,
                customer_rating: rating,
                delivery_cost_inr: money(rng.gen_range(40.0..900.0)),
            })?;
            counts[1] += 1;
        }

        if rng.gen_bool(coverage) {
            let distance = rng.gen_range(50.0..2_500.0);
            routes.serialize(RouteRow {
                order_id: order_id.clone(),
                carrier: pick(CARRIERS, &mut rng),
                route: format!("{}-{}", origin, destination),
                distance_km: money(distance),
                fuel_consumption_l: money(distance * rng.gen_range(0.08..0.14)),
                toll_charges_inr: money(distance * rng.gen_range(0.2..0.8)),
                traffic_delay_minutes: if rng.gen_bool(0.6) { rng.gen_range(0..=2) } else { rng.gen_range(3..=60) },
                weather_impact: pick(WEATHER, &mut rng),
            })?;
            counts[2] += 1;
        }

        if rng.gen_bool(coverage) {
            cost.serialize(CostRow {
                order_id: order_id.clone(),
                special_handling: pick(HANDLING, &mut rng),
                fuel_cost: money(rng.gen_range(50.0..600.0)),
                labor_cost: money(rng.gen_range(40.0..400.0)),
                vehicle_maintenance: money(rng.gen_range(10.0..150.0)),
                insurance: money(rng.gen_range(5.0..80.0)),
                packaging_cost: money(rng.gen_range(5.0..60.0)),
            })?;
            counts[3] += 1;
        }

        if rng.gen_bool(coverage) {
            let feedback_date = order_date + Duration::days(actual + rng.gen_range(0..5));
            feedback.serialize(FeedbackRow {
                order_id,
                feedback_date: feedback_date.format("%Y-%m-%d").to_string(),
                rating,
                would_recommend: if rating >= 4 { "Yes" } else if rating == 3 { "Maybe" } else { "No" },
                issue_category: outcome.complaint,
            })?;
            counts[4] += 1;
        }
    }

    for w in [&mut orders, &mut delivery, &mut routes, &mut cost, &mut feedback] {
        w.flush()?;
    }

    println!("✅ Generation complete!");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for (file, count) in [ORDERS_FILE, DELIVERY_FILE, ROUTES_FILE, COST_FILE, FEEDBACK_FILE]
        .iter()
        .zip(counts)
    {
        println!("{:28} {:>8} rows", file, count);
    }

    Ok(())
}
