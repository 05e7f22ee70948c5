//! Demo commands walking the ledger end to end.

use std::sync::Arc;

use colored::*;
use earmark_custody::InMemoryCustody;
use earmark_ledger::{FundingLedger, RecordingSink};
use earmark_types::{Amount, LedgerError, PartyId};

struct DemoWorld {
    ledger: FundingLedger,
    custody: Arc<InMemoryCustody>,
    sink: RecordingSink,
    admin: PartyId,
    pic: PartyId,
    donor: PartyId,
}

fn build_world() -> DemoWorld {
    let admin = PartyId::new();
    let pool = PartyId::new();
    let custody = Arc::new(InMemoryCustody::new(pool));
    let sink = RecordingSink::new();
    let ledger = FundingLedger::new(admin, pool, custody.clone(), Arc::new(sink.clone()));
    DemoWorld {
        ledger,
        custody,
        sink,
        admin,
        pic: PartyId::new(),
        donor: PartyId::new(),
    }
}

fn banner(text: &str) {
    println!();
    println!("{}", "━".repeat(70).bright_black());
    println!("{}", format!(" {text}").bright_white().bold());
    println!("{}", "━".repeat(70).bright_black());
}

fn step(text: &str) {
    println!("  {} {}", "✓".bright_green(), text);
}

fn denied(label: &str, err: &LedgerError) {
    println!(
        "  {} {} -> {} ({})",
        "✗".bright_red(),
        label,
        err.error_code().bright_yellow(),
        err
    );
}

/// Full lifecycle: register, deposit, allocate, draw down, audit.
pub async fn run_full_demo(json: bool) -> anyhow::Result<()> {
    let world = build_world();

    banner("Step 1: Register a program");
    let id = world
        .ledger
        .registry()
        .create(
            world.admin,
            "village-wells",
            Amount::new(1000),
            "drill and line two wells",
            world.pic,
        )
        .await?;
    step(&format!("{} registered, target 1000, status registered", id));

    banner("Step 2: Fund the pool");
    world.custody.mint(world.donor, Amount::new(1500)).await;
    world.ledger.deposit(world.donor, Amount::new(1500)).await?;
    let summary = world.ledger.pool_summary().await?;
    step(&format!(
        "deposit confirmed: pool holds {}, {} unallocated",
        summary.pool_balance, summary.available
    ));

    banner("Step 3: Allocate the full target");
    world.ledger.allocate(world.admin, id).await?;
    let program = world.ledger.registry().get(id).await?;
    step(&format!(
        "{} now {}, allocated {}",
        id, program.status, program.allocated
    ));

    banner("Step 4: Draw down against the allocation");
    world
        .ledger
        .withdraw(world.pic, id, "phase 1: site survey", Amount::new(400))
        .await?;
    step("withdrew 400 (phase 1: site survey)");
    world
        .ledger
        .withdraw(world.pic, id, "phase 2: drilling", Amount::new(350))
        .await?;
    step("withdrew 350 (phase 2: drilling)");

    banner("Step 5: Audit trail");
    for entry in world.ledger.history(id).await? {
        println!(
            "  {} {} {} - {}",
            "•".bright_blue(),
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.amount.to_string().bright_cyan(),
            entry.note
        );
    }
    let program = world.ledger.registry().get(id).await?;
    let summary = world.ledger.pool_summary().await?;
    step(&format!(
        "allocated {} remaining on {}, pool reserves {}",
        program.allocated, id, summary.total_allocated
    ));
    step(&format!(
        "{} notifications emitted",
        world.sink.len().await
    ));

    if json {
        banner("Final state (JSON)");
        let programs = world.ledger.registry().list().await;
        println!("{}", serde_json::to_string_pretty(&programs)?);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

/// Every guard rail in action: wrong roles, bad arguments, short pools.
pub async fn run_safety_demo() -> anyhow::Result<()> {
    let world = build_world();
    let outsider = PartyId::new();

    banner("Role checks");
    if let Err(err) = world
        .ledger
        .registry()
        .create(outsider, "rogue", Amount::new(10), "not yours", world.pic)
        .await
    {
        denied("outsider create", &err);
    }

    let id = world
        .ledger
        .registry()
        .create(
            world.admin,
            "village-wells",
            Amount::new(1000),
            "drill and line two wells",
            world.pic,
        )
        .await?;
    step(&format!("{} registered by the admin", id));

    banner("Argument checks");
    if let Err(err) = world
        .ledger
        .registry()
        .create(world.admin, "", Amount::new(10), "empty name", world.pic)
        .await
    {
        denied("empty name", &err);
    }
    if let Err(err) = world.ledger.deposit(world.donor, Amount::ZERO).await {
        denied("zero deposit", &err);
    }

    banner("Pool coverage");
    world.custody.mint(world.donor, Amount::new(400)).await;
    world.ledger.deposit(world.donor, Amount::new(400)).await?;
    if let Err(err) = world.ledger.allocate(world.admin, id).await {
        denied("allocate 1000 against a 400 pool", &err);
    }

    world.custody.mint(world.donor, Amount::new(600)).await;
    world.ledger.deposit(world.donor, Amount::new(600)).await?;
    world.ledger.allocate(world.admin, id).await?;
    step(&format!("{} allocated once the pool covers it", id));

    banner("Drawdown bounds");
    if let Err(err) = world
        .ledger
        .withdraw(outsider, id, "not mine", Amount::new(100))
        .await
    {
        denied("outsider withdraw", &err);
    }
    if let Err(err) = world
        .ledger
        .withdraw(world.pic, id, "too much", Amount::new(1200))
        .await
    {
        denied("withdraw beyond the allocation", &err);
    }

    banner("Frozen after allocation");
    if let Err(err) = world
        .ledger
        .registry()
        .update(world.admin, id, "renamed", "edited", world.pic)
        .await
    {
        denied("update an allocated program", &err);
    }
    if let Err(err) = world.ledger.allocate(world.admin, id).await {
        denied("allocate twice", &err);
    }

    println!();
    let history = world.ledger.history(id).await?;
    step(&format!(
        "state held: every rejection left the ledger untouched ({} history entries)",
        history.len()
    ));
    Ok(())
}
