//! Parses the `-c key=value,key=value,...` device config string. Keys
//! `freq` and `srate` are understood by every device; anything else is
//! opaque and device-specific.

use std::collections::HashMap;

pub fn parse(config: &str) -> anyhow::Result<HashMap<String, String>> {
    let mut map = HashMap::new();
    if config.trim().is_empty() {
        return Ok(map);
    }
    for pair in config.split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("malformed config entry (expected key=value): {pair}"))?;
        map.insert(key.trim().to_string(), value.trim().to_string());
    }
    Ok(map)
}

pub fn required_f64(map: &HashMap<String, String>, key: &str) -> anyhow::Result<f64> {
    let raw = map
        .get(key)
        .ok_or_else(|| anyhow::anyhow!("config string is missing required key `{key}`"))?;
    raw.parse::<f64>()
        .map_err(|_| anyhow::anyhow!("config key `{key}` is not a valid number: {raw}"))
}
