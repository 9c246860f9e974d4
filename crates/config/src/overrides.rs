//! `-o a.b.c=value` overrides applied to the raw TOML tree.

use toml::{value::Table, Value};

use crate::ConfigError;

/// Splits `a.b.c=value` into its key path and value.
///
/// The value is read as a TOML value when it parses as one and as a bare
/// string otherwise, so `-o chain.chain_id=80001` sets an integer while
/// `-o logging.log_dir=/var/log` sets a string.
pub fn parse_override(s: &str) -> Result<(Vec<String>, Value), ConfigError> {
    let (path, raw) = s
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidOverride(s.to_owned()))?;

    let path = path.trim();
    if path.is_empty() || path.split('.').any(str::is_empty) {
        return Err(ConfigError::InvalidOverride(s.to_owned()));
    }
    let keys = path.split('.').map(str::to_owned).collect();
    Ok((keys, parse_value(raw.trim())))
}

fn parse_value(raw: &str) -> Value {
    toml::from_str::<Table>(&format!("v = {raw}"))
        .ok()
        .and_then(|mut t| t.remove("v"))
        .unwrap_or_else(|| Value::String(raw.to_owned()))
}

/// Sets `val` at `path`, which must lead through existing tables.
pub fn apply_override(path: &[String], val: Value, table: &mut Table) -> Result<(), ConfigError> {
    let Some((last, parents)) = path.split_last() else {
        return Err(ConfigError::InvalidOverride(String::new()));
    };

    let mut cur = table;
    for (i, key) in parents.iter().enumerate() {
        let here = path[..=i].join(".");
        cur = cur
            .get_mut(key)
            .ok_or_else(|| ConfigError::MissingKey(here.clone()))?
            .as_table_mut()
            .ok_or(ConfigError::TraverseNonTableAt(here))?;
    }
    cur.insert(last.clone(), val);
    Ok(())
}
