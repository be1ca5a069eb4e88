//! Application run modes: logger init and explorer launch.

use std::io;

use crate::cli::Args;
use crate::core;
use crate::core::config::Config;
use crate::core::models::Session;

/// Initialize env_logger. In explorer mode, writes to file to avoid corrupting the display.
pub fn init_logger(args: &Args) {
    let log_level = args.log_level();
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level));

    if args.is_interactive() {
        let log_path = core::paths::cache_dir().map(|d| d.join(format!("{}.log", core::app::NAME)));
        if let Some(path) = log_path
            && let Some(parent) = path.parent()
            && std::fs::create_dir_all(parent).is_ok()
            && let Ok(file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
        {
            logger.target(env_logger::Target::Pipe(Box::new(file)));
        }
    }
    let _ = logger.try_init();
}

/// Launch the explorer in a blocking thread. Returns on panic or IO error.
pub async fn launch_tui(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::connect(&config)?;
    let join_result: Result<io::Result<()>, tokio::task::JoinError> =
        tokio::task::spawn_blocking(move || crate::tui::run(session)).await;

    match join_result {
        Ok(io_result) => io_result?,
        Err(join_err) => {
            if let Ok(panic) = join_err.try_into_panic() {
                let msg = if let Some(s) = panic.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic.downcast_ref::<String>() {
                    s.clone()
                } else {
                    format!("{:?}", panic)
                };
                eprintln!("Explorer panic: {}", msg);
            }
            return Err(
                Box::new(io::Error::other("Explorer thread panicked")) as Box<dyn std::error::Error>
            );
        }
    }
    Ok(())
}
