use clap::Parser;

/// Premier League Cann table web server
#[derive(Parser, Debug, Clone)]
#[command(name = "canntable", version, about)]
pub struct Config {
    /// HTTP listen address
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: String,

    /// football-data.org API base URL
    #[arg(
        long,
        env = "FOOTBALL_API_URL",
        default_value = "https://api.football-data.org/v4"
    )]
    pub football_api_url: String,

    /// Competition code for the standings endpoint (PL = Premier League)
    #[arg(long, env = "COMPETITION", default_value = "PL")]
    pub competition: String,

    /// football-data.org API token (sent as X-Auth-Token)
    #[arg(long, env = "API_TOKEN", default_value = "")]
    pub api_token: String,

    /// FPL API base URL for manager entries
    #[arg(
        long,
        env = "FPL_API_URL",
        default_value = "https://fantasy.premierleague.com/api/entry"
    )]
    pub fpl_api_url: String,

    /// Comma separated FPL manager ids for the mini-league page
    #[arg(long, env = "MANAGERS", default_value = "")]
    pub managers: String,

    /// Outbound HTTP request timeout in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value = "10")]
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_token.is_empty() {
            anyhow::bail!("API_TOKEN env var not set (required for football-data.org)");
        }
        if self.http_timeout_secs == 0 {
            anyhow::bail!("http_timeout_secs must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            listen_addr: "0.0.0.0:8080".into(),
            football_api_url: "https://api.football-data.org/v4".into(),
            competition: "PL".into(),
            api_token: "token".into(),
            fpl_api_url: "https://fantasy.premierleague.com/api/entry".into(),
            managers: String::new(),
            http_timeout_secs: 10,
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validate_requires_api_token() {
        let mut c = config();
        c.api_token = String::new();
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut c = config();
        c.http_timeout_secs = 0;
        assert!(c.validate().is_err());
    }
}
