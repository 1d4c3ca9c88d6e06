use std::fs::File;
use std::io::BufReader;

// what wins when two call kinds get exactly equal vote weight; the
// upstream rule is unconfirmed so the policy is explicit configuration
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TieBreakPolicy {
    // the numerically best call wins: over, then under, then no diff
    BestCall,
    PreferNotDiffExpressed,
}

impl Default for TieBreakPolicy {
    fn default() -> TieBreakPolicy {
        TieBreakPolicy::BestCall
    }
}

fn default_p_value_floor() -> f64 {
    1e-12
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Config {
    #[serde(default)]
    pub tie_break: TieBreakPolicy,
    // p-values are clamped to this before weighting so p = 0 from an
    // upstream analysis can't produce an infinite vote
    #[serde(default = "default_p_value_floor")]
    pub p_value_floor: f64,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            tie_break: TieBreakPolicy::default(),
            p_value_floor: default_p_value_floor(),
        }
    }
}

impl Config {
    pub fn read(config_file_name: &str) -> Config {
        let file = match File::open(config_file_name) {
            Ok(file) => file,
            Err(err) => {
                panic!("Failed to read {}: {}\n", config_file_name, err)
            }
        };
        let reader = BufReader::new(file);

        match serde_json::from_reader(reader) {
            Ok(config) => config,
            Err(err) => {
                panic!("failed to parse {}: {}", config_file_name, err)
            },
        }
    }
}
