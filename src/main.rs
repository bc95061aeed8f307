use anyhow::Context;
use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

use card_events::credit_card::{CardFileStore, CardState, CreditCard, Pin, SpendOutcome};

const SNAPSHOT_PATH: &str = "credit_card.dat";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let expiry_date: NaiveDate = NaiveDate::from_ymd_opt(2025, 12, 31).context("Invalid expiry date")?;
    let mut card: CreditCard = CreditCard::new(CardState {
        card_number: "1234567890123456".to_string(),
        owner_name: "John Doe".to_string(),
        expiry_date,
        pin: Pin::new(1234),
        credit_limit: 1000.0,
        balance: 500.0,
    })
    .context("Failed to open credit card")?;

    card.on_replenished(|amount| println!("Account replenished by {} UAH", amount));
    card.on_spent(|amount| println!("Spent {} UAH", amount));
    card.on_credit_started(|| println!("Credit activated!"));
    card.on_limit_reached(|balance| println!("Limit reached: {} UAH", balance));
    card.on_pin_changed(|| println!("PIN changed successfully!"));

    card.check_limit().context("Failed to check the credit limit")?;
    card.deposit(200.0).context("Failed to deposit")?;
    if card.spend(700.0).context("Failed to spend")? == SpendOutcome::InsufficientFunds {
        println!("Insufficient funds on the account!");
    }
    card.check_limit().context("Failed to check the credit limit")?;
    card.change_pin(Pin::new(4321)).context("Failed to change the PIN")?;

    let store: CardFileStore = CardFileStore::new(SNAPSHOT_PATH);
    card.save(&store)
        .with_context(|| format!("Failed to save card to {}", SNAPSHOT_PATH))?;
    println!("Card written to file.");

    let loaded: CreditCard =
        CreditCard::load(&store).with_context(|| format!("Failed to load card from {}", SNAPSHOT_PATH))?;
    println!(
        "Read from file: card number: {}, owner: {}",
        loaded.card_number(),
        loaded.owner_name()
    );

    Ok(())
}
