// habit-client/demos/dashboard.rs
// Terminal rendition of the habit dashboard against a running server
// (start one with `cargo run -p habit-mock`).

use habit_client::{ClientConfig, FormModal, Frequency, HabitClient, HabitStore, SessionGate};
use tracing_subscriber::EnvFilter;

fn usage(program: &str) {
    println!("Usage:");
    println!("  {} login <email> <password>", program);
    println!("  {} logout", program);
    println!("  {} list", program);
    println!("  {} add <name> <description> [daily|weekly|monthly] [count]", program);
    println!("  {} remove <id>", program);
    println!();
    println!("Env: HABIT_API_URL, HABIT_API_TIMEOUT_SECS, HABIT_SESSION_PATH");
}

/// argv[0], which a launcher is free to leave out
fn program_name(args: &[String]) -> &str {
    args.first().map_or("dashboard", String::as_str)
}

fn parse_frequency(raw: &str) -> anyhow::Result<Frequency> {
    Frequency::ALL
        .into_iter()
        .find(|f| f.as_str() == raw.to_ascii_lowercase())
        .ok_or_else(|| anyhow::anyhow!("Unknown frequency: {}", raw))
}

async fn print_dashboard(store: &HabitStore<HabitClient>) {
    store.refresh().await;
    let snapshot = store.snapshot().await;

    if let Some(error) = &snapshot.last_error {
        println!("! {}", error);
    }
    if snapshot.habits.is_empty() {
        println!("No habits yet. Create your first habit to get started!");
        return;
    }
    for habit in &snapshot.habits {
        let status = if habit.is_active { "" } else { " (paused)" };
        println!(
            "{}  {}{} - {} [{}]",
            habit.id,
            habit.name,
            status,
            habit.description,
            habit.target_label()
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "habit_client=info".into()),
        )
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let program = program_name(&args);
    let Some(command) = args.get(1) else {
        usage(program);
        return Ok(());
    };

    let config = ClientConfig::from_env();
    let session = SessionGate::from_config(&config);
    let client = HabitClient::new(&config, session.clone())?;

    match (command.as_str(), &args[2..]) {
        ("login", [email, password]) => {
            let user = client.login(email, password).await?;
            println!("Logged in as {}", user.name.as_deref().unwrap_or(&user.email));
        }
        ("logout", []) => {
            client.logout().await?;
            println!("Logged out");
        }
        ("list", []) => {
            print_dashboard(&HabitStore::new(client)).await;
        }
        ("add", [name, description, rest @ ..]) if rest.len() <= 2 => {
            let store = HabitStore::new(client);
            let mut modal = FormModal::new();
            modal.open_create();
            {
                let draft = modal.draft_mut();
                draft.name = name.clone();
                draft.description = description.clone();
                if let Some(frequency) = rest.first() {
                    draft.frequency = parse_frequency(frequency)?;
                }
                if let Some(count) = rest.get(1) {
                    draft.set_target_count_input(count);
                }
            }

            if modal.submit(&store).await.should_close() {
                println!("{} saved", name);
            } else if let Some(error) = store.last_error().await {
                println!("! {}", error);
            }
            print_dashboard(&store).await;
        }
        ("remove", [id]) => {
            let store = HabitStore::new(client);
            if store.remove_habit(id).await {
                println!("Deleted {}", id);
            } else if let Some(error) = store.last_error().await {
                println!("! {}", error);
            }
            print_dashboard(&store).await;
        }
        _ => usage(program),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_name_without_argv() {
        assert_eq!(program_name(&[]), "dashboard");
        assert_eq!(program_name(&["habits".to_string()]), "habits");
    }

    #[test]
    fn test_parse_frequency() {
        assert_eq!(parse_frequency("Weekly").unwrap(), Frequency::Weekly);
        assert!(parse_frequency("hourly").is_err());
    }
}
