//! Word pools for generated names
//!
//! The built-in pools can be replaced wholesale or per field from a YAML
//! file, e.g.
//!
//! ```yaml
//! first_names: [Ada, Grace]
//! business_words: [Acme, Widgets]
//! ```
//!
//! Missing fields keep the built-in pool.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

pub const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "William",
    "Elizabeth", "David", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Christopher", "Nancy", "Daniel", "Lisa", "Matthew", "Betty", "Anthony",
    "Margaret", "Mark", "Sandra", "Donald", "Ashley", "Steven", "Kimberly", "Paul", "Emily",
    "Andrew", "Donna", "Joshua", "Michelle", "Kenneth", "Dorothy", "Kevin", "Carol", "Brian",
    "Amanda", "George", "Melissa", "Edward", "Deborah",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young", "Allen", "King", "Wright",
    "Scott", "Torres", "Nguyen", "Hill", "Flores", "Green", "Adams", "Nelson", "Baker", "Hall",
    "Rivera", "Campbell", "Mitchell", "Carter", "Roberts",
];

pub const BUSINESS_WORDS: &[&str] = &[
    "Acme", "Global", "Dynamics", "Solutions", "Systems", "Industries", "Partners", "Group",
    "Labs", "Ventures", "Holdings", "Digital", "Networks", "Consulting", "Logistics",
    "Analytics", "Creative", "Capital", "Media", "Works", "Enterprises", "Technologies",
    "Interactive", "Supply", "Design", "United", "Pacific", "Atlantic", "Summit", "Pioneer",
    "Horizon", "Apex", "Vertex", "Quantum", "Fusion", "Bright", "Northern", "Silver", "Blue",
    "Iron",
];

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn default_first_names() -> Vec<String> {
    owned(FIRST_NAMES)
}

fn default_last_names() -> Vec<String> {
    owned(LAST_NAMES)
}

fn default_business_words() -> Vec<String> {
    owned(BUSINESS_WORDS)
}

/// Fixed sets the engine samples names and business words from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPools {
    #[serde(default = "default_first_names")]
    pub first_names: Vec<String>,
    #[serde(default = "default_last_names")]
    pub last_names: Vec<String>,
    #[serde(default = "default_business_words")]
    pub business_words: Vec<String>,
}

impl Default for WordPools {
    fn default() -> Self {
        WordPools {
            first_names: default_first_names(),
            last_names: default_last_names(),
            business_words: default_business_words(),
        }
    }
}

impl WordPools {
    /// Build validated pools from explicit lists
    pub fn new(
        first_names: Vec<String>,
        last_names: Vec<String>,
        business_words: Vec<String>,
    ) -> Result<Self> {
        let pools = WordPools {
            first_names,
            last_names,
            business_words,
        };
        pools.validate()?;
        Ok(pools)
    }

    /// Load pools from a YAML file
    pub fn load(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read word pools from {path}"))?;
        Self::from_yaml(&contents).with_context(|| format!("Invalid word pools in {path}"))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let pools: WordPools = serde_yaml::from_str(yaml)?;
        pools.validate()?;
        Ok(pools)
    }

    /// Every pool needs at least one entry and no blank or multi-word entries
    pub fn validate(&self) -> Result<()> {
        for (name, pool) in [
            ("first_names", &self.first_names),
            ("last_names", &self.last_names),
            ("business_words", &self.business_words),
        ] {
            if pool.is_empty() {
                return Err(anyhow!("Word pool '{name}' is empty"));
            }
            if let Some(bad) = pool
                .iter()
                .find(|w| w.trim().is_empty() || w.chars().any(char::is_whitespace))
            {
                return Err(anyhow!(
                    "Word pool '{name}' contains an entry that is not a single word: {bad:?}"
                ));
            }
        }
        Ok(())
    }
}
