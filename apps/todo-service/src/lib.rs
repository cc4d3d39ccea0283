//! # Todo Service ライブラリ
//!
//! Todo Service のユースケース・ハンドラ・ミドルウェアとルーター構築を公開する。
//! 統合テストからもこのクレート経由でアプリケーションを組み立てる。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod usecase;
