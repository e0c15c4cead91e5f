//! # Seed Data Generator
//!
//! Populates a ledger database with realistic sales/expense history for
//! development, so the analytics dashboards have something to chew on.
//!
//! ## Usage
//! ```bash
//! # Six months of history (default)
//! cargo run -p meridian-db --bin seed
//!
//! # Custom window and database path
//! cargo run -p meridian-db --bin seed -- --months 12 --db ./data/ledger.db
//! ```
//!
//! ## Generated History
//! - Daily sales for a small product catalog (coffee shop flavor), with
//!   1-4 line items each and frozen price/cost snapshots
//! - A handful of canceled sales sprinkled in (they must never show up in
//!   any aggregate)
//! - Monthly expenses: rent, payroll, utilities, supplies
//! - A 6% tax rate config for the demo owner
//!
//! Quantities and product picks come from simple seed arithmetic, so a
//! fresh database always gets the same shape of history (ids and the
//! anchor date vary per run).

use chrono::{Datelike, Days, NaiveTime, Utc};
use std::env;
use uuid::Uuid;

use meridian_core::types::{
    ExpenseRecord, PaymentMethod, SaleLineItem, SaleRecord, TaxConfig, TaxRate,
};
use meridian_db::{Database, DbConfig};

/// The demo owner every seeded record belongs to.
const DEMO_OWNER: &str = "owner-demo";

/// Product catalog: (product id, name, unit price cents, unit cost cents)
const CATALOG: &[(&str, &str, i64, i64)] = &[
    ("prod-espresso", "Espresso", 700, 180),
    ("prod-latte", "Latte", 1200, 350),
    ("prod-cappuccino", "Cappuccino", 1100, 330),
    ("prod-mocha", "Mocha", 1350, 420),
    ("prod-coldbrew", "Cold Brew", 1250, 300),
    ("prod-croissant", "Butter Croissant", 850, 320),
    ("prod-muffin", "Blueberry Muffin", 750, 280),
    ("prod-sandwich", "Turkey Sandwich", 1650, 700),
    ("prod-beans-250", "House Beans 250g", 2400, 1300),
    ("prod-mug", "Branded Mug", 1800, 650),
];

/// Fixed monthly expenses: (category, amount cents, day of month)
const MONTHLY_EXPENSES: &[(&str, i64, u32)] = &[
    ("rent", 250_000, 1),
    ("payroll", 480_000, 5),
    ("utilities", 38_000, 10),
    ("supplies", 65_000, 15),
];

const PAYMENT_METHODS: &[PaymentMethod] = &[
    PaymentMethod::Cash,
    PaymentMethod::Card,
    PaymentMethod::Pix,
    PaymentMethod::Transfer,
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut months: u32 = 6;
    let mut db_path = String::from("./meridian_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--months" | "-m" => {
                if i + 1 < args.len() {
                    months = args[i + 1].parse().unwrap_or(6);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Meridian POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -m, --months <N>   Months of history to generate (default: 6)");
                println!("  -d, --db <PATH>    Database file path (default: ./meridian_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Meridian POS Seed Data Generator");
    println!("===================================");
    println!("Database: {}", db_path);
    println!("History:  {} months for '{}'", months, DEMO_OWNER);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Demo owner pays a 6% fee rate on revenue
    db.tax_config()
        .set_config(DEMO_OWNER, &TaxConfig::Rate(TaxRate::from_bps(600)))
        .await?;

    let today = Utc::now().date_naive();
    let start = today
        .checked_sub_days(Days::new(months as u64 * 30))
        .expect("valid start date");

    println!();
    println!("Generating ledger history...");

    let mut sale_count = 0usize;
    let mut canceled_count = 0usize;
    let mut expense_count = 0usize;

    let mut day = start;
    let mut seq = 0usize;
    while day <= today {
        // 3-7 sales a day, busier towards the weekend
        let daily_sales = 3 + (day.weekday().num_days_from_monday() as usize) % 5;

        for slot in 0..daily_sales {
            seq += 1;
            let sale_id = Uuid::new_v4().to_string();

            // Every 29th sale is canceled: aggregates must ignore it
            let canceled = seq % 29 == 0;

            let occurred_at = day
                .and_time(NaiveTime::from_hms_opt(8 + (slot as u32 * 2) % 12, (seq * 7 % 60) as u32, 0).expect("valid time"))
                .and_utc();

            // 1-4 line items per sale, walking the catalog deterministically
            let item_count = 1 + seq % 4;
            let mut gross_total = 0i64;
            let mut items = Vec::with_capacity(item_count);
            for pick in 0..item_count {
                let (product_id, name, price, cost) = CATALOG[(seq + pick * 3) % CATALOG.len()];
                let quantity = 1 + ((seq + pick) % 3) as i64;
                let line_total = price * quantity;
                gross_total += line_total;
                items.push(SaleLineItem {
                    id: Uuid::new_v4().to_string(),
                    sale_id: sale_id.clone(),
                    product_id: product_id.to_string(),
                    name_snapshot: name.to_string(),
                    quantity,
                    unit_price_cents: price,
                    unit_cost_cents: cost,
                    line_total_cents: line_total,
                });
            }

            let sale = SaleRecord {
                id: sale_id,
                owner_id: DEMO_OWNER.to_string(),
                occurred_at,
                gross_total_cents: gross_total,
                payment_method: PAYMENT_METHODS[seq % PAYMENT_METHODS.len()],
                canceled,
            };

            db.sales().insert_sale(&sale).await?;
            for item in &items {
                db.sales().insert_line_item(item).await?;
            }

            sale_count += 1;
            if canceled {
                canceled_count += 1;
            }
        }

        // Monthly expenses land on their fixed day of month
        for (category, amount, dom) in MONTHLY_EXPENSES {
            if day.day() == *dom {
                db.expenses()
                    .insert_expense(&ExpenseRecord {
                        id: Uuid::new_v4().to_string(),
                        owner_id: DEMO_OWNER.to_string(),
                        occurred_on: day,
                        amount_cents: *amount,
                        category: category.to_string(),
                    })
                    .await?;
                expense_count += 1;
            }
        }

        day = day.succ_opt().expect("valid date");
    }

    println!();
    println!("✓ Seed complete!");
    println!("  Sales:    {} ({} canceled)", sale_count, canceled_count);
    println!("  Expenses: {}", expense_count);

    Ok(())
}
