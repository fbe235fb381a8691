use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use common::err::decode_error::RelayError;
use common::err::CResult;
use filter::{Expression, Filter, FilterConfig, Op, Operand};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MysqlConfig {
    pub user: String,
    pub pass: String,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub mysql: MysqlConfig,
    pub dest: String,
    pub filter: FilterConfig,
}

/// Config-file fields, all optional: present fields override the values
/// built from the command line.
#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    mysql: Option<MysqlOverlay>,
    dest: Option<String>,
    filter: Option<FilterConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct MysqlOverlay {
    user: Option<String>,
    pass: Option<String>,
    host: Option<String>,
    port: Option<u16>,
}

impl Config {
    pub fn load(
        user: &str,
        pass: &str,
        host: &str,
        port: u16,
        dest: &str,
        config_path: Option<&Path>,
    ) -> CResult<Config> {
        let mut config = Config {
            mysql: MysqlConfig {
                user: user.to_string(),
                pass: pass.to_string(),
                host: host.to_string(),
                port,
            },
            dest: dest.to_string(),
            filter: FilterConfig::default(),
        };

        if let Some(path) = config_path {
            let contents = fs::read_to_string(path).map_err(|err| {
                RelayError::ConfigError(format!("cannot read {}: {}", path.display(), err))
            })?;
            let overlay: ConfigOverlay = serde_json::from_str(&contents).map_err(|err| {
                RelayError::ConfigError(format!("cannot parse {}: {}", path.display(), err))
            })?;
            config.merge(overlay);
        }

        Ok(config)
    }

    fn merge(&mut self, overlay: ConfigOverlay) {
        if let Some(mysql) = overlay.mysql {
            if let Some(user) = mysql.user {
                self.mysql.user = user;
            }
            if let Some(pass) = mysql.pass {
                self.mysql.pass = pass;
            }
            if let Some(host) = mysql.host {
                self.mysql.host = host;
            }
            if let Some(port) = mysql.port {
                self.mysql.port = port;
            }
        }
        if let Some(dest) = overlay.dest {
            self.dest = dest;
        }
        if let Some(filter) = overlay.filter {
            self.filter = filter;
        }
    }

    /// Pretty JSON of this config, seeded with one example filter when the
    /// clause list is empty. Backs the `--genconf` flag.
    pub fn sample_json(&self) -> CResult<String> {
        let mut sample = self.clone();
        if sample.filter.filters.is_empty() {
            sample.filter.filters.push(Filter {
                database: "dbname".to_string(),
                table: "tablename".to_string(),
                columns: vec![0, 1, 2],
                where_clause: Some(Expression::new(
                    Operand::Str("$$0".to_string()),
                    Op::Eq,
                    Operand::Str("1".to_string()),
                )),
            });
        }

        serde_json::to_string_pretty(&sample)
            .map_err(|err| RelayError::ConfigError(err.to_string()))
    }
}
