//! `DATABASE_URL`（環境変数または `.env`）があれば `database_url` cfg を有効にする。
//!
//! DB 統合テストは `#[cfg_attr(not(database_url), ignore)]` で、接続先が無い
//! 環境でのみスキップされる。

use std::env;

fn main() {
    println!("cargo::rustc-check-cfg=cfg(database_url)");
    println!("cargo::rerun-if-env-changed=DATABASE_URL");

    if let Ok(path) = dotenvy::dotenv() {
        println!("cargo::rerun-if-changed={}", path.display());
    }

    if env::var_os("DATABASE_URL").is_some_and(|url| !url.is_empty()) {
        println!("cargo::rustc-cfg=database_url");
    }
}
