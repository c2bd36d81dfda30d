use std::path::PathBuf;
use std::time::Duration;
use std::{env, io};

use serde_derive::{Deserialize, Serialize};
use url::Url;

use data_model::{RadioConfig, Uplink};

pub const CONFIG_FILE_NAME: &str = "exercisr.toml";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5555/";
const DEFAULT_PERIOD_SECONDS: u64 = 7;
const DEFAULT_UPLINK_DATA: &str = "aabbccddee";
const DEFAULT_UPLINK_PORT: u16 = 21;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct DaemonSpec {
    pub base_url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct RunSpec {
    /// Start with a hard reset, then configure and join. When false the daemon
    /// is only soft reset and assumed to already be configured and joined.
    pub hard_reset: Option<bool>,
    /// Keep sending uplinks until interrupted
    pub send: Option<bool>,
    /// Seconds to wait between uplinks
    pub period_seconds: Option<u64>,
    /// true => hex payload via /sendb, false => text payload via /send
    pub binary: Option<bool>,
}

#[derive(Default, Serialize, Deserialize)]
pub struct Config {
    pub daemon: Option<DaemonSpec>,
    pub run: Option<RunSpec>,
    pub radio: Option<RadioConfig>,
    /// Keys to read back via /config/get after configuring
    pub query: Option<Vec<String>>,
    pub payload: Option<Uplink>,
    #[serde(skip)]
    pub period_duration: Duration,
    #[serde(skip)]
    pub daemon_url: Option<Url>,
}

impl Config {
    pub fn hard_reset(&self) -> bool {
        self.run
            .as_ref()
            .and_then(|run| run.hard_reset)
            .unwrap_or(true)
    }

    pub fn send(&self) -> bool {
        self.run.as_ref().and_then(|run| run.send).unwrap_or(true)
    }

    pub fn binary(&self) -> bool {
        self.run.as_ref().and_then(|run| run.binary).unwrap_or(true)
    }

    pub fn uplink(&self) -> Uplink {
        self.payload.clone().unwrap_or(Uplink {
            data: DEFAULT_UPLINK_DATA.to_owned(),
            port: DEFAULT_UPLINK_PORT,
        })
    }
}

pub fn find_config_file(file_name: &str) -> Result<PathBuf, io::Error> {
    let mut dir = env::current_dir().ok();

    // Loop until no parent directory exists. (i.e. stop at "/")
    while let Some(directory) = dir {
        let config_path = directory.join(file_name);

        if config_path.exists() {
            return Ok(config_path);
        }

        dir = directory.parent().map(|p| p.to_path_buf());
    }

    Err(io::Error::new(
        io::ErrorKind::NotFound,
        "exercisr toml config file not found",
    ))
}

pub fn read_config(config_file_path: &PathBuf) -> Result<Config, io::Error> {
    let config_string = std::fs::read_to_string(config_file_path)?;
    let mut config: Config = toml::from_str(&config_string)
        .map_err(|_| io::Error::new(io::ErrorKind::NotFound, "Could not parse toml config file"))?;

    config.period_duration = match &config.run {
        Some(spec) => match spec.period_seconds {
            None => Duration::from_secs(DEFAULT_PERIOD_SECONDS),
            Some(period) => Duration::from_secs(period),
        },
        None => Duration::from_secs(DEFAULT_PERIOD_SECONDS),
    };

    let base_url = match &config.daemon {
        Some(spec) => match &spec.base_url {
            Some(url_string) => url_string.clone(),
            None => DEFAULT_BASE_URL.to_owned(),
        },
        None => DEFAULT_BASE_URL.to_owned(),
    };
    config.daemon_url = Url::parse(&base_url).ok();

    Ok(config)
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::{read_config, Config, CONFIG_FILE_NAME};

    #[test]
    fn config_with_run_spec() {
        let config: Config = toml::from_str("[run]\nhard_reset = false\nsend = false\n").unwrap();
        assert!(!config.hard_reset());
        assert!(!config.send());
    }

    #[test]
    fn config_empty_uses_script_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.hard_reset());
        assert!(config.send());
        assert!(config.binary());
        let uplink = config.uplink();
        assert_eq!(uplink.data, "aabbccddee");
        assert_eq!(uplink.port, 21);
    }

    #[test]
    fn config_with_radio_table() {
        let config: Config =
            toml::from_str("[radio]\nnetwork_join_mode = 1\ndata_rate = 5\n").unwrap();
        let radio = config.radio.unwrap();
        assert_eq!(radio.network_join_mode, Some(1));
        assert_eq!(radio.data_rate, Some(5));
        assert_eq!(radio.transmit_power, None);
    }

    #[test]
    fn config_with_query_keys() {
        let config: Config = toml::from_str("query = ['data_rate', 'network_join_status']\n")
            .unwrap();
        assert_eq!(
            config.query,
            Some(vec![
                "data_rate".to_owned(),
                "network_join_status".to_owned()
            ])
        );
    }

    #[test]
    fn bundled_config() {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let root_dir = manifest_dir
            .parent()
            .ok_or("Could not get parent dir")
            .expect("Could not get parent dir");
        let config = read_config(&root_dir.join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config.period_duration, Duration::from_secs(7));
        assert_eq!(
            config.daemon_url.as_ref().unwrap().as_str(),
            "http://127.0.0.1:5555/"
        );
        assert!(config.hard_reset());
        assert!(config.send());
        assert_eq!(config.radio.unwrap().transmit_power, Some(5));
    }

    #[test]
    fn default_url_when_daemon_section_missing() {
        let dir = std::env::temp_dir().join("exercisr_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[run]\nperiod_seconds = 2\n").unwrap();
        let config = read_config(&path).unwrap();
        assert_eq!(config.period_duration, Duration::from_secs(2));
        assert_eq!(
            config.daemon_url.unwrap().as_str(),
            "http://127.0.0.1:5555/"
        );
    }
}
