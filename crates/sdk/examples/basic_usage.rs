//! Basic SDK usage example.
//!
//! Lists the most recent customer invoices and the company's bank accounts.
//!
//! Run with: PENNYLANE_API_KEY=... cargo run --example basic_usage

use pennylane_sdk::api::ListQuery;
use pennylane_sdk::{PennylaneClient, PennylaneError, PennylaneResult};
use std::time::Duration;

#[tokio::main]
async fn main() -> PennylaneResult<()> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt::init();

    let api_key = std::env::var("PENNYLANE_API_KEY")
        .map_err(|_| PennylaneError::Config("PENNYLANE_API_KEY is not set".to_string()))?;

    let client = PennylaneClient::builder()
        .api_key(api_key)
        .timeout(Duration::from_secs(10))
        .build()?;

    println!("Latest customer invoices:");
    let invoices = client.customer_invoices().list(ListQuery::new().limit(5)).await?;
    for invoice in invoices["items"].as_array().into_iter().flatten() {
        println!(
            "  #{} {} {} ({})",
            invoice["id"],
            invoice["invoice_number"].as_str().unwrap_or("-"),
            invoice["amount"].as_str().unwrap_or("?"),
            invoice["status"].as_str().unwrap_or("?"),
        );
    }

    println!("\nBank accounts:");
    let accounts = client.accounting().bank_accounts(ListQuery::new()).await?;
    for account in accounts["items"].as_array().into_iter().flatten() {
        println!("  #{} {}", account["id"], account["name"].as_str().unwrap_or("-"));
    }

    // A 404 comes back as an API error carrying the status and raw body
    match client.customer_invoices().get(0).await {
        Err(e) if e.status() == Some(404) => println!("\nInvoice 0 does not exist: {}", e),
        Err(e) => return Err(e),
        Ok(_) => {}
    }

    client.close();
    Ok(())
}
