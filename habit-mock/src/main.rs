use habit_mock::{AppState, DEMO_EMAIL, MockConfig, logger};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logger::init_logger();

    let config = MockConfig::from_env();
    let state = AppState::shared(config.bare_list);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!(
        %addr,
        bare_list = config.bare_list,
        demo_account = DEMO_EMAIL,
        "habit-mock listening"
    );

    habit_mock::serve(listener, state).await?;
    Ok(())
}
