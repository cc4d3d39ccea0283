//! # Todo Service アプリケーション構築
//!
//! State の初期化とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{any, get},
};
use todo_domain::clock::Clock;
use todo_infra::repository::TodoRepository;
use todo_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{ReadinessState, TodoState, health_check, readiness_check, todos},
    middleware::{CookieSettings, method_override, user_locals},
    usecase::TodoUseCaseImpl,
};

/// ルーター定義を行う
///
/// リポジトリと時計を受け取り、State → Router の順に組み立てる。
pub fn build_app(
    todo_repository: Arc<dyn TodoRepository>,
    clock: Arc<dyn Clock>,
    cookie_settings: CookieSettings,
) -> Router {
    let todo_state = Arc::new(TodoState {
        usecase: TodoUseCaseImpl::new(todo_repository.clone(), clock),
    });
    let readiness_state = Arc::new(ReadinessState { todo_repository });

    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        // Todo API（メソッドの振り分けはディスパッチャが行うため any で受ける）
        .merge(
            Router::new()
                .route("/todos", any(todos))
                .route("/todos/{uid}", any(todos))
                .layer(from_fn(method_override))
                .layer(from_fn_with_state(cookie_settings, user_locals))
                .with_state(todo_state),
        )
        // Request ID レイヤー（下に書いたものが外側）
        // 1. SetRequestIdLayer（最外）: UUID v7 を生成（またはクライアント提供値を使用）
        // 2. TraceLayer: request_id を含むリクエストスパンを作成
        // 3. CanonicalLogLineLayer: リクエスト完了時に1行サマリログを出力（スパン内）
        // 4. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CanonicalLogLineLayer)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
