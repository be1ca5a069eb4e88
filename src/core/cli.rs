//! CLI-only commands: config info, key storage, model list and details.
//!
//! These run without opening the explorer and produce plain text (or JSON) output.

use std::io::{self, Read};

use serde::Serialize;

use crate::core::api_key;
use crate::core::config::{self, Config, ConfigError, DEFAULT_BASE_URL};
use crate::core::models::{
    FilterCriteria, Listing, ModelRecord, Notice, PLACEHOLDER, Recommender, Session, filter,
};
use crate::core::paths;
use crate::core::util::format_token_limit;

/// Width used when wrapping descriptions in `show`.
const DETAIL_WRAP_WIDTH: usize = 76;

/// Run the `config` command: display paths, endpoint, API key status, and recommended list.
pub fn run_config() {
    let config_dir = paths::config_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    let cache_dir = paths::cache_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    let (api_key_status, base_url, recommender) = match config::load() {
        Ok(c) => (
            format!("set ✓ ({})", c.key_source),
            c.base_url.clone(),
            Recommender::new(&c.recommended_models),
        ),
        Err(ConfigError::MissingApiKey) => (
            "not set".to_string(),
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            Recommender::default(),
        ),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("Config:       {}", config_dir);
    println!("Cache:        {}", cache_dir);
    println!("Endpoint:     {}", base_url);
    println!("API key:      {}", api_key_status);
    println!("Recommended:  {}", recommender.ids().join(", "));
}

/// Run the `set-api-key` command: store API key in config directory.
pub fn run_set_api_key(api_key: Option<String>) {
    let key = match api_key {
        Some(k) if !k.trim().is_empty() => k.trim().to_string(),
        _ => {
            let mut buf = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buf) {
                eprintln!("Error reading from stdin: {}", e);
                std::process::exit(1);
            }
            let trimmed = buf.trim().to_string();
            if trimmed.is_empty() {
                eprintln!("Error: no API key provided");
                std::process::exit(1);
            }
            trimmed
        }
    };

    match api_key::store_api_key(&key) {
        Ok(path) => println!("API key saved to {}", path.display()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Fetch once and return the listing (live or fallback). Exits if the client cannot be built.
async fn load_listing(config: &Config) -> Listing {
    let mut session = Session::connect(config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    session.listing().await.clone()
}

fn print_notice(listing: &Listing) {
    match listing.notice() {
        Some(Notice::Warning(msg)) => eprintln!("Warning: {}", msg),
        Some(Notice::Info(msg)) => eprintln!("Note: {}", msg),
        None => {}
    }
}

#[derive(Serialize)]
struct ListOutput<'a> {
    source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<String>,
    count: usize,
    models: Vec<&'a ModelRecord>,
}

/// Run the `list` command: fetch, filter, and print as a table or JSON.
pub async fn run_list(config: &Config, criteria: &FilterCriteria, json: bool) {
    let listing = load_listing(config).await;
    let filtered = filter(listing.records(), criteria);

    if json {
        let output = ListOutput {
            source: if listing.is_fallback() { "fallback" } else { "live" },
            notice: listing.notice().map(|n| match n {
                Notice::Warning(m) | Notice::Info(m) => m,
            }),
            count: filtered.len(),
            models: filtered,
        };
        match serde_json::to_string_pretty(&output) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    print_notice(&listing);
    if filtered.is_empty() {
        println!("No models found.");
        return;
    }
    print!("{}", render_table(&filtered));
    println!(
        "\n{} of {} model(s){}",
        filtered.len(),
        listing.records().len(),
        if listing.is_fallback() {
            " (built-in catalog)"
        } else {
            ""
        }
    );
}

/// Run the `show` command: print every field of one model.
pub async fn run_show(config: &Config, id: &str) {
    let listing = load_listing(config).await;
    print_notice(&listing);
    match find_record(listing.records(), id) {
        Some(record) => print!("{}", render_details(record)),
        None => {
            eprintln!("Error: model '{}' not found", id);
            std::process::exit(1);
        }
    }
}

/// Match on full or short id, ignoring ASCII case.
fn find_record<'a>(records: &'a [ModelRecord], id: &str) -> Option<&'a ModelRecord> {
    let id = id.trim();
    records
        .iter()
        .find(|r| r.full_id().eq_ignore_ascii_case(id) || r.short_id().eq_ignore_ascii_case(id))
}

fn render_table(records: &[&ModelRecord]) -> String {
    let id_w = records
        .iter()
        .map(|r| r.short_id().chars().count())
        .max()
        .unwrap_or(20)
        .max(20);
    let family_w = records
        .iter()
        .map(|r| r.family().label().len())
        .max()
        .unwrap_or(10)
        .max(10);

    let mut out = format!(
        "{:<id_w$}  {:<family_w$}  {:^3}  {:>6}  {:>6}\n",
        "ID", "Family", "★", "Input", "Output"
    );
    out.push_str(&format!(
        "{}  {}  ---  ------  ------\n",
        "-".repeat(id_w),
        "-".repeat(family_w)
    ));
    for r in records {
        out.push_str(&format!(
            "{:<id_w$}  {:<family_w$}  {:^3}  {:>6}  {:>6}\n",
            r.short_id(),
            r.family().label(),
            if r.is_recommended() { "★" } else { "" },
            format_token_limit(r.input_token_limit()),
            format_token_limit(r.output_token_limit()),
        ));
    }
    out
}

fn render_details(record: &ModelRecord) -> String {
    let opt = |v: Option<String>| v.unwrap_or_else(|| PLACEHOLDER.to_string());
    let actions = if record.supported_actions().is_empty() {
        PLACEHOLDER.to_string()
    } else {
        record.supported_actions().join(", ")
    };

    let mut out = String::new();
    let mut line = |label: &str, value: &str| out.push_str(&format!("{:<14}{}\n", label, value));
    line("ID:", record.full_id());
    line("Name:", record.display_name_or_placeholder());
    line("Family:", record.family().label());
    line("Recommended:", if record.is_recommended() { "yes" } else { "no" });
    line("State:", record.state().unwrap_or(PLACEHOLDER));
    line("Version:", record.version().unwrap_or(PLACEHOLDER));
    line("Base model:", record.base_model().unwrap_or(PLACEHOLDER));
    line("Input tokens:", &format_token_limit(record.input_token_limit()));
    line("Output tokens:", &format_token_limit(record.output_token_limit()));
    line("Methods:", &actions);
    line("Temperature:", &opt(record.temperature().map(|t| t.to_string())));
    line("Max temp.:", &opt(record.max_temperature().map(|t| t.to_string())));
    line("Top-p:", &opt(record.top_p().map(|t| t.to_string())));
    line("Top-k:", &opt(record.top_k().map(|t| t.to_string())));

    out.push_str("Description:\n");
    let options = textwrap::Options::new(DETAIL_WRAP_WIDTH)
        .initial_indent("  ")
        .subsequent_indent("  ");
    for wrapped in textwrap::wrap(record.description_or_placeholder(), options) {
        out.push_str(&wrapped);
        out.push('\n');
    }
    out
}
