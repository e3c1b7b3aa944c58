use anyhow::Result;
use clap::Parser;
use reqwest::Client;
use serde_json::{Value, json};

/// Submits one RSVP to a running server and prints what comes back.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:1111")]
    url: String,

    #[arg(long, default_value = "alee@bu.edu")]
    email: String,

    #[arg(long, default_value = "Ann")]
    first_name: String,

    #[arg(long, default_value = "Lee")]
    last_name: String,

    #[arg(long, default_value = "PMP")]
    certification: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let client = Client::new();

    let payload = json!({
        "firstName": args.first_name,
        "lastName": args.last_name,
        "email": args.email,
        "certification": args.certification,
    });

    let response = client
        .post(format!("{}/api/rsvp", args.url))
        .json(&payload)
        .send()
        .await?;

    println!("Submit status: {}", response.status());
    println!("{}\n", serde_json::to_string_pretty(&response.json::<Value>().await?)?);

    let rsvps: Value = client
        .get(format!("{}/api/rsvps", args.url))
        .send()
        .await?
        .json()
        .await?;

    println!("Stored RSVPs: {}", rsvps.as_array().map_or(0, Vec::len));
    println!("{}", serde_json::to_string_pretty(&rsvps)?);

    Ok(())
}
