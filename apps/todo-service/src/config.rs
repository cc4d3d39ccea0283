//! # Todo Service 設定
//!
//! 環境変数から Todo Service サーバーの設定を読み込む。

use std::env;

use thiserror::Error;

/// 接続プールの最大接続数のデフォルト値
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// 設定読み込みのエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の環境変数が設定されていない
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// 環境変数の値が解釈できない
    #[error("{name} の値が不正です: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Todo Service サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// データベース接続 URL
    pub database_url: String,
    /// 接続プールの最大接続数
    pub database_max_connections: u32,
    /// `userid` Cookie に Secure 属性を付けるか
    pub cookie_secure: bool,
}

impl TodoConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = lookup("TODO_PORT").ok_or(ConfigError::Missing("TODO_PORT"))?;
        let port = port.parse().map_err(|_| ConfigError::Invalid {
            name:  "TODO_PORT",
            value: port,
        })?;

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "DATABASE_MAX_CONNECTIONS",
                value,
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let cookie_secure = match lookup("COOKIE_SECURE") {
            Some(value) => parse_flag(&value).ok_or(ConfigError::Invalid {
                name: "COOKIE_SECURE",
                value,
            })?,
            None => false,
        };

        Ok(Self {
            host: lookup("TODO_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            database_max_connections,
            cookie_secure,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<TodoConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        TodoConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_必須項目のみでデフォルト値が補われる() {
        let config = load(&[
            ("TODO_PORT", "3000"),
            ("DATABASE_URL", "postgres://localhost/todo"),
        ])
        .unwrap();

        assert_eq!(
            config,
            TodoConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                database_url: "postgres://localhost/todo".to_string(),
                database_max_connections: 10,
                cookie_secure: false,
            }
        );
    }

    #[test]
    fn test_任意項目を上書きできる() {
        let config = load(&[
            ("TODO_HOST", "127.0.0.1"),
            ("TODO_PORT", "8080"),
            ("DATABASE_URL", "postgres://db/todo"),
            ("DATABASE_MAX_CONNECTIONS", "3"),
            ("COOKIE_SECURE", "TRUE"),
        ])
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.database_max_connections, 3);
        assert!(config.cookie_secure);
    }

    #[test]
    fn test_todo_portが無いとmissingエラー() {
        let result = load(&[("DATABASE_URL", "postgres://localhost/todo")]);

        assert_eq!(result, Err(ConfigError::Missing("TODO_PORT")));
    }

    #[test]
    fn test_database_urlが無いとmissingエラー() {
        let result = load(&[("TODO_PORT", "3000")]);

        assert_eq!(result, Err(ConfigError::Missing("DATABASE_URL")));
    }

    #[rstest]
    #[case("TODO_PORT", "abc")]
    #[case("TODO_PORT", "70000")]
    #[case("DATABASE_MAX_CONNECTIONS", "-1")]
    #[case("COOKIE_SECURE", "maybe")]
    fn test_解釈できない値はinvalidエラー(#[case] name: &'static str, #[case] value: &str) {
        let mut vars = vec![
            ("TODO_PORT", "3000"),
            ("DATABASE_URL", "postgres://localhost/todo"),
        ];
        vars.retain(|(k, _)| *k != name);
        vars.push((name, value));

        let result = load(&vars);

        assert_eq!(
            result,
            Err(ConfigError::Invalid {
                name,
                value: value.to_string(),
            })
        );
    }
}
