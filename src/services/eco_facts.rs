use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rand::seq::SliceRandom;

/// Facts shipped with the server, used whenever the fact file is missing
/// or unreadable.
pub const DEFAULT_FACTS: [&str; 8] = [
    "A single tree can absorb 22 kg of CO₂ per year.",
    "Walking or cycling for short trips can reduce your carbon footprint by up to 50%.",
    "LED bulbs use 75% less energy than incandescent bulbs.",
    "Recycling one aluminum can saves enough energy to power a TV for 3 hours.",
    "Eating less meat one day per week can save 1,900 pounds of CO₂ per year.",
    "Taking shorter showers can save up to 150 gallons of water per month.",
    "Unplugging electronics when not in use can reduce energy consumption by 10%.",
    "Using public transport instead of driving can reduce CO₂ emissions by 45%.",
];

/// Pool of short environmental facts. One is attached to every
/// calculation response.
#[derive(Debug, Clone)]
pub struct FactPool {
    facts: Vec<String>,
}

impl Default for FactPool {
    fn default() -> Self {
        FactPool {
            facts: DEFAULT_FACTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl FactPool {
    /// Load facts from the JSON file at `path`. A missing or unreadable
    /// file falls back to the built-in facts, which are also written to
    /// `path`; an empty file falls back without touching it.
    pub fn load(path: &str) -> Self {
        match read_facts(path) {
            Ok(facts) if !facts.is_empty() => {
                log::info!("📚 Loaded {} eco facts from {}", facts.len(), path);
                FactPool { facts }
            }
            Ok(_) => {
                log::warn!("Eco fact file {} is empty, using built-in facts", path);
                FactPool::default()
            }
            Err(err) => {
                log::info!("📚 Eco fact file {} not usable ({:#}), using built-in facts", path, err);
                let pool = FactPool::default();
                if let Err(err) = write_facts(path, &pool.facts) {
                    log::warn!("Failed to write eco fact file {}: {:#}", path, err);
                }
                pool
            }
        }
    }

    pub fn pick_random(&self) -> Option<&str> {
        self.facts.choose(&mut rand::thread_rng()).map(|s| s.as_str())
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

fn read_facts(path: &str) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    let facts = serde_json::from_str(&raw).with_context(|| format!("parsing {}", path))?;
    Ok(facts)
}

fn write_facts(path: &str, facts: &[String]) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory for {}", path))?;
        }
    }
    let body = serde_json::to_string_pretty(facts)?;
    fs::write(path, body).with_context(|| format!("writing {}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pool_has_builtin_facts() {
        let pool = FactPool::default();
        assert_eq!(pool.len(), DEFAULT_FACTS.len());
        assert!(!pool.is_empty());
    }

    #[test]
    fn test_pick_random_draws_from_pool() {
        let pool = FactPool::default();
        for _ in 0..20 {
            let fact = pool.pick_random().unwrap();
            assert!(DEFAULT_FACTS.contains(&fact));
        }
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join("eco_facts_test_missing");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("facts.json");
        let pool = FactPool::load(path.to_str().unwrap());
        assert_eq!(pool.len(), DEFAULT_FACTS.len());
        let written: Vec<String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.len(), DEFAULT_FACTS.len());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_reads_existing_file() {
        let dir = std::env::temp_dir().join("eco_facts_test_existing");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("facts.json");
        fs::write(&path, r#"["Compost feeds the soil."]"#).unwrap();
        let pool = FactPool::load(path.to_str().unwrap());
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.pick_random(), Some("Compost feeds the soil."));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_empty_array_falls_back_without_overwriting() {
        let dir = std::env::temp_dir().join("eco_facts_test_empty");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("facts.json");
        fs::write(&path, "[]").unwrap();
        let pool = FactPool::load(path.to_str().unwrap());
        assert_eq!(pool.len(), DEFAULT_FACTS.len());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        let _ = fs::remove_dir_all(&dir);
    }
}
