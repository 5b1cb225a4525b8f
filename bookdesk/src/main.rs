use std::{env, fs, sync::Mutex};

use api_client::ApiClient;
use reader_core::{config, session};
use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::app::App;

const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    server_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
        }
    }
}

fn load_config() -> Config {
    let Some(path) = config::config_root().map(|dir| dir.join("config.toml")) else {
        return Config::default();
    };
    let Ok(text) = fs::read_to_string(&path) else {
        return Config::default();
    };
    toml::from_str(&text).unwrap_or_else(|err| {
        eprintln!("Ignoring bad config at {}: {}", path.display(), err);
        Config::default()
    })
}

// The TUI owns the terminal, so logs go to a file under the config dir.
fn init_logging() {
    let Some(dir) = config::config_root() else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = fs::File::options()
        .create(true)
        .append(true)
        .open(dir.join("bookdesk.log"))
    else {
        return;
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookdesk=info,ui=info,api_client=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
}

fn main() -> std::io::Result<()> {
    init_logging();

    // Accept optional server URL override: default to the config file
    let args: Vec<String> = env::args().collect();
    let server_url = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| load_config().server_url);
    tracing::info!(server_url, "starting");

    let mut api = ApiClient::new(&server_url);
    let stored = session::load_session();
    if let Some(session) = &stored {
        api.set_token(Some(session.token.clone()));
        tracing::info!(username = %session.user.username, "restored session");
    }

    App::new(api, stored).run()
}
