use std::path::PathBuf;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://parrot.db?mode=rwc";
pub const DEFAULT_TEMP_DIR: &str = "temp";
pub const DEFAULT_LOG_FILTER: &str = "info";

type EnvError = Box<dyn std::error::Error + Send + Sync>;
type EnvResult<T> = Result<T, EnvError>;

/// Gets the Discord bot token from environment
pub fn discord_token() -> EnvResult<String> {
    dotenvy::var("DISCORD_TOKEN").map_err(|e| Box::new(e) as EnvError)
}

/// Gets the database URL from environment
pub fn database_url() -> EnvResult<Option<String>> {
    optional_var("DATABASE_URL")
}

/// Directory where the `makefile` owner command writes files
pub fn temp_dir() -> EnvResult<PathBuf> {
    Ok(optional_var("PARROT_TEMP_DIR")?
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMP_DIR)))
}

/// Log filter directive, `RUST_LOG` style
pub fn log_filter() -> String {
    optional_var("RUST_LOG")
        .ok()
        .flatten()
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Comma-separated list of Discord user IDs allowed to run owners_only commands
pub fn owner_ids() -> EnvResult<Vec<u64>> {
    match optional_var("PARROT_OWNER_IDS")? {
        Some(value) => parse_id_list(&value),
        None => Ok(Vec::new()),
    }
}

fn optional_var(key: &str) -> EnvResult<Option<String>> {
    match dotenvy::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(None),
        Err(e) => Err(Box::new(e) as EnvError),
    }
}

fn parse_id_list(value: &str) -> EnvResult<Vec<u64>> {
    let mut ids = Vec::new();
    for raw in value.split(',') {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }

        let parsed: u64 = trimmed.parse().map_err(|err| Box::new(err) as EnvError)?;
        ids.push(parsed);
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::parse_id_list;

    #[test]
    fn parses_owner_ids_skipping_blanks() {
        let ids = parse_id_list(" 741614468546560092, ,123 ").unwrap();
        assert_eq!(ids, vec![741614468546560092, 123]);
    }

    #[test]
    fn rejects_non_numeric_owner_ids() {
        assert!(parse_id_list("abc").is_err());
    }
}
