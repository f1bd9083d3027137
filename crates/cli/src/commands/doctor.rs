//! `folio doctor` — Report which integrations are configured.
//!
//! Reads configuration and the data directory only; no network calls.

use std::path::Path;

use folio_agent::context::{DocumentStore, JOURNEY_DOC, RESUME_DOC};
use folio_config::AppConfig;

#[derive(Debug, PartialEq, Eq)]
enum Status {
    Ok,
    Warn,
}

#[derive(Debug)]
struct Check {
    status: Status,
    message: String,
}

impl Check {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: Status::Ok,
            message: message.into(),
        }
    }

    fn warn(message: impl Into<String>) -> Self {
        Self {
            status: Status::Warn,
            message: message.into(),
        }
    }
}

fn checks(config: &AppConfig, data_dir: &Path) -> Vec<Check> {
    let mut checks = Vec::new();

    if config.has_api_key() {
        checks.push(Check::ok("OpenRouter key set: chat and fresh haiku enabled"));
    } else {
        checks.push(Check::warn(
            "OPENROUTER_API_KEY not set: chat returns 503, haiku served from the built-in set",
        ));
    }

    if config.smtp.is_configured() {
        let recipient = config.smtp.recipient().unwrap_or_default();
        checks.push(Check::ok(format!(
            "SMTP via {}:{}, delivering to {recipient}",
            config.smtp.host, config.smtp.port
        )));
    } else {
        checks.push(Check::warn("SMTP_USER / SMTP_PASS not set: contact messages are only logged"));
    }

    match &config.github.username {
        Some(user) => checks.push(Check::ok(format!("GitHub activity for '{user}'"))),
        None => checks.push(Check::warn("GITHUB_USERNAME not set: no live activity context")),
    }

    let store = DocumentStore::new(data_dir);
    for doc in [JOURNEY_DOC, RESUME_DOC] {
        if store.contains(doc) {
            checks.push(Check::ok(format!("{doc} found in {}", data_dir.display())));
        } else {
            checks.push(Check::warn(format!("{doc} missing from {}", data_dir.display())));
        }
    }

    if config.cors.allows_any() {
        checks.push(Check::warn("ALLOWED_ORIGINS is '*': any origin may call the API"));
    } else {
        checks.push(Check::ok(format!(
            "CORS limited to {}",
            config.cors.allowed_origins.join(", ")
        )));
    }

    checks
}

pub fn run(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 folio doctor");
    println!("===============\n");

    let config = match AppConfig::from_env() {
        Ok(config) => {
            println!("  ✅ Configuration valid");
            config
        }
        Err(e) => {
            println!("  ❌ Configuration invalid: {e}");
            return Err(e.into());
        }
    };

    let checks = checks(&config, data_dir);
    for check in &checks {
        let icon = match check.status {
            Status::Ok => "✅",
            Status::Warn => "⚠️ ",
        };
        println!("  {icon} {}", check.message);
    }

    let issues = checks.iter().filter(|c| c.status == Status::Warn).count();
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} item(s) degraded. See above for details.");
    }

    Ok(())
}
