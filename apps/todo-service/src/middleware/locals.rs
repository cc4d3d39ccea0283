//! # ユーザー識別ミドルウェア
//!
//! `userid` Cookie から匿名ユーザー ID を読み取り、[`Locals`] として
//! リクエストの extensions に格納する。Cookie が無い（または不正な）場合は
//! 新しい ID を払い出し、レスポンスで Cookie を設定する。
//!
//! ユーザー ID はリクエストスパンの `user_id` フィールドにも記録する。

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use todo_domain::user::{Locals, UserId};

/// ユーザー ID を保持する Cookie 名
pub const USERID_COOKIE: &str = "userid";

/// Cookie 属性の設定
#[derive(Debug, Clone, Copy, Default)]
pub struct CookieSettings {
    /// Secure 属性を付けるか（HTTPS 配信時に有効にする）
    pub secure: bool,
}

/// `userid` Cookie を構築する
fn build_userid_cookie(userid: &UserId, settings: CookieSettings) -> Cookie<'static> {
    Cookie::build((USERID_COOKIE, userid.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure)
        .build()
}

/// ユーザー識別ミドルウェア
pub async fn user_locals(
    State(settings): State<CookieSettings>,
    jar: CookieJar,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let existing = jar
        .get(USERID_COOKIE)
        .and_then(|cookie| UserId::parse(cookie.value()));
    let issued = existing.is_none();
    let userid = existing.unwrap_or_default();

    tracing::Span::current().record("user_id", tracing::field::display(&userid));
    request.extensions_mut().insert(Locals::new(userid.clone()));

    let response = next.run(request).await;

    if issued {
        tracing::debug!(%userid, "userid Cookie を払い出しました");
        return (jar.add(build_userid_cookie(&userid, settings)), response).into_response();
    }
    response
}
