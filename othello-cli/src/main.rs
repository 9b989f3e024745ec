use std::io;

use anyhow::Result;
use othello_cli::{GameSettings, Session};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let settings = GameSettings::load();

    // 初始化日志；RUST_LOG 优先于设置中的级别
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(settings.log_level.directive()),
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    info!("Othello starting (log level {})", settings.log_level.display_name());

    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), io::stdout(), settings)
        .with_settings_path(GameSettings::settings_path());
    session.run()
}
