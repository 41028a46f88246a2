//! `kinrelay doctor` — report configuration status without printing secrets.

use kinrelay_config::{AppConfig, ConfigError};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 kinrelay doctor");
    println!("==================\n");

    let config_path = AppConfig::config_path();
    if config_path.exists() {
        println!("  ✅ Config file: {}", config_path.display());
    } else {
        println!("  ⚠️  No config file (defaults + environment) — run `kinrelay init`");
    }

    let (lines, issues) = diagnose(&AppConfig::load());
    for line in lines {
        println!("  {line}");
    }

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 Ready to relay.");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}

/// Report lines and the number of issues found.
fn diagnose(loaded: &Result<AppConfig, ConfigError>) -> (Vec<String>, usize) {
    let config = match loaded {
        Ok(config) => config,
        Err(e) => return (vec![format!("❌ Configuration invalid: {e}")], 1),
    };

    let mut issues = 0;
    let mut lines = vec![
        format!("✅ Endpoint: {}", config.endpoint),
        format!("✅ Timeout: {}s", config.timeout_secs),
    ];

    if config.has_api_key() {
        lines.push("✅ API key configured".into());
    } else {
        lines.push("❌ No API key — set KINDROID_API_KEY".into());
        issues += 1;
    }

    let ctx = &config.augmentation;
    for (label, present) in [
        ("Persona preamble", ctx.preamble().is_some()),
        ("Global memory", ctx.global_memory().is_some()),
        ("Dynamic memory", ctx.dynamic_memory().is_some()),
    ] {
        lines.push(format!("{} {label}", if present { "✅" } else { "➖" }));
    }

    (lines, issues)
}
