use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use tracing_appender::{non_blocking, rolling};


pub struct Logger {
    pub guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
}

impl Logger {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let guards = Self::setup_logging()?;
        Ok(Logger { guards })
    }

    /// Console layer plus daily-rolling plain and JSON files, each split into
    /// a general log and an error-only log.
    pub fn setup_logging() -> Result<Vec<tracing_appender::non_blocking::WorkerGuard>, Box<dyn std::error::Error>> {
        let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());
        std::fs::create_dir_all(&log_dir)?;

        let console_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,hotel_backend=debug,tower_http=debug"));

        let file_log_level = std::env::var("FILE_LOG_LEVEL").unwrap_or_else(|_| "debug".to_string());
        let error_file_log_level = std::env::var("ERROR_FILE_LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        let error_dir = format!("{}/error", log_dir);
        let json_dir = format!("{}/json", log_dir);
        let error_json_dir = format!("{}/error/json", log_dir);

        let (non_blocking_general, general_guard) = non_blocking(rolling::daily(&log_dir, "hotel-backend.log"));
        let (non_blocking_error, error_guard) = non_blocking(rolling::daily(&error_dir, "hotel-backend-error.log"));
        let (non_blocking_json, json_guard) = non_blocking(rolling::daily(&json_dir, "hotel-backend.json"));
        let (non_blocking_error_json, error_json_guard) =
            non_blocking(rolling::daily(&error_json_dir, "hotel-backend-error.json"));

        tracing_subscriber::registry()
            .with(
                // Console output - pretty format for development
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_ansi(true)
                    .with_filter(console_filter)
            )
            .with(
                fmt::layer()
                    .with_writer(non_blocking_general)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&file_log_level))
            )
            .with(
                fmt::layer()
                    .with_writer(non_blocking_error)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&error_file_log_level))
            )
            .with(
                fmt::layer()
                    .json()
                    .with_writer(non_blocking_json)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&file_log_level))
            )
            .with(
                fmt::layer()
                    .json()
                    .with_writer(non_blocking_error_json)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&error_file_log_level))
            )
            .try_init()?;

        // Guards keep the background writer threads alive
        Ok(vec![general_guard, error_guard, json_guard, error_json_guard])
    }
}
