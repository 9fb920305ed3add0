//! Check command implementation
//!
//! Prints the effective configuration after all layers are applied.

use crate::config::AppConfig;
use crate::Result;

/// Render the effective configuration as TOML
pub fn render(config: &AppConfig) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}

/// Run the check command
pub fn run(config: &AppConfig) -> Result<()> {
    print!("{}", render(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_config_round_trips() {
        let config = AppConfig::default();
        let text = render(&config).unwrap();
        assert!(text.contains("cva_rate = 0.02"));
        assert!(text.contains("[pipeline.retry]"));
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
