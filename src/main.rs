use anyhow::Result;
use clap::Parser;
use torus_snake::game::GameConfig;
use torus_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "torus_snake")]
#[command(version, about = "Turn-based snake on an edge-wrapping board")]
struct Cli {
    /// Starting level, 1-10 (non-numeric input falls back to 1)
    #[arg(long, default_value = "1", value_parser = parse_level)]
    level: u8,
}

/// Level-picker input policy: floor of any numeric input, clamped to the
/// valid range; anything unparsable means level 1. Never an error.
fn parse_level(raw: &str) -> Result<u8, std::convert::Infallible> {
    let level = raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map_or(1.0, f64::floor)
        .clamp(1.0, 10.0);
    Ok(level as u8)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = GameConfig::default();
    let mut mode = HumanMode::new(config, cli.level);
    mode.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_numeric() {
        assert_eq!(parse_level("4").unwrap(), 4);
        assert_eq!(parse_level("4.9").unwrap(), 4);
        assert_eq!(parse_level(" 7 ").unwrap(), 7);
    }

    #[test]
    fn test_parse_level_clamps() {
        assert_eq!(parse_level("0").unwrap(), 1);
        assert_eq!(parse_level("-3").unwrap(), 1);
        assert_eq!(parse_level("42").unwrap(), 10);
    }

    #[test]
    fn test_parse_level_invalid_defaults_to_one() {
        assert_eq!(parse_level("abc").unwrap(), 1);
        assert_eq!(parse_level("").unwrap(), 1);
        assert_eq!(parse_level("NaN").unwrap(), 1);
    }
}
