//! Simple SDK Example
//!
//! Demonstrates the create/get split and concurrent task runs.
//!
//! # Usage
//!
//! ```bash
//! export EDISON_API_KEY=your_key
//! cargo run --package edison-platform --example simple
//! ```

use edison_platform::{EdisonPlatformClient, JobKind, TaskDescription};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Edison Platform SDK - Simple Example");
    println!("====================================\n");

    // 1. Create the client (reads EDISON_API_KEY)
    println!("1. Creating client...");
    let client = EdisonPlatformClient::new(None)?;
    println!("   ✓ Using key {}\n", client.api_key());

    // 2. Create a task without waiting
    println!("2. Creating a precedent search task...");
    let task = TaskDescription::new(JobKind::Precedent)
        .with_field("query", "Has anyone used CRISPR to cure sickle cell anemia?");
    let task_id = client.create_task(&task).await?;
    println!("   ✓ Task created: {}\n", task_id);

    // 3. Check on it once
    println!("3. Fetching task status...");
    let result = client.get_task(&task_id).await?;
    match result.status() {
        Some(status) if status.is_terminal() => println!("   ✓ Finished: {}\n", status),
        Some(status) => println!("   … Still working: {}\n", status),
        None => println!("   ? No status reported\n"),
    }

    // 4. Run two tasks concurrently
    println!("4. Running two literature/precedent tasks concurrently...");
    let (literature, precedent) = tokio::join!(
        client.literature_search("What are the mechanisms of drug resistance in cancer?"),
        client.precedent_search("What are recent breakthroughs in Alzheimer's disease treatment?"),
    );

    for (label, outcome) in [("Literature", literature), ("Precedent", precedent)] {
        match outcome {
            Ok(result) => println!("   ✓ {}: {}", label, result.as_value()),
            Err(e) => println!("   ✗ {}: {}", label, e),
        }
    }

    println!("\n✓ Example completed successfully!");

    Ok(())
}
