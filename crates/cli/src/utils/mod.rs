use eyre::Result;
use std::{future::Future, path::Path};

/// Initializes a tracing subscriber filtered by `RUST_LOG`.
pub fn subscriber() {
    let _ = tracing_subscriber::FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Colors output only when writing to a terminal and not disabled through the environment.
pub fn enable_paint() {
    yansi::whenever(yansi::Condition::TTY_AND_COLOR);
}

/// Loads the `.env` file in `root`, if there is one.
///
/// Variables already set in the environment take precedence.
pub fn load_dotenv(root: &Path) {
    let file = root.join(".env");
    if !file.is_file() {
        return;
    }
    match dotenvy::from_path(&file) {
        Ok(()) => trace!(path = %file.display(), "loaded .env"),
        Err(err) => warn!(path = %file.display(), %err, "failed to load .env"),
    }
}

/// Runs `future` to completion on a new multi-threaded runtime.
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let rt = tokio::runtime::Runtime::new()?;
    Ok(rt.block_on(future))
}
