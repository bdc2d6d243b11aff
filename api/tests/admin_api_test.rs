//! Admin login, session and management endpoints

mod common;

use actix_web::http::{header, StatusCode};
use actix_web::test;
use serde_json::{json, Value};

use bo_api::create_app;
use bo_core::domain::events::NotificationEvent;

use common::{bearer, TestContext, SUPERADMIN_EMAIL, SUPERADMIN_PASSWORD};

#[actix_web::test]
async fn login_sets_session_cookie_usable_for_check_auth() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/admin/login")
        .set_json(json!({ "email": SUPERADMIN_EMAIL, "password": SUPERADMIN_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == ctx.config.auth.session.cookie_name)
        .expect("session cookie")
        .into_owned();
    assert_eq!(cookie.http_only(), Some(true));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["admin"]["email"], SUPERADMIN_EMAIL);
    assert!(body["data"]["admin"].get("passwordHash").is_none());
    assert!(body["data"]["token"].as_str().is_some());

    let req = test::TestRequest::get()
        .uri("/admin/check-auth")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["admin"]["role"], "superadmin");
}

#[actix_web::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    for (email, password) in [
        (SUPERADMIN_EMAIL, "not-the-password"),
        ("nobody@backoffice.test", SUPERADMIN_PASSWORD),
    ] {
        let req = test::TestRequest::post()
            .uri("/admin/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "INVALID_CREDENTIALS");
    }
}

#[actix_web::test]
async fn protected_routes_require_a_session() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    for uri in ["/admin/check-auth", "/admin/get-all-admins", "/user/get-all-users", "/stores"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }

    let req = test::TestRequest::get()
        .uri("/admin/check-auth")
        .insert_header(bearer("garbage.token.value"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn logout_expires_the_cookie() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post().uri("/admin/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == ctx.config.auth.session.cookie_name)
        .expect("removal cookie");
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(actix_web::cookie::time::Duration::ZERO));
}

#[actix_web::test]
async fn repeated_failures_lock_the_login() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    for _ in 0..3 {
        let req = test::TestRequest::post()
            .uri("/admin/login")
            .set_json(json!({ "email": SUPERADMIN_EMAIL, "password": "wrong-password" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    // Locked even with the right password, and keyed on the normalized email
    let req = test::TestRequest::post()
        .uri("/admin/login")
        .set_json(json!({ "email": "ROOT@backoffice.test", "password": SUPERADMIN_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(resp.headers().contains_key(header::RETRY_AFTER));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "LOGIN_LOCKED");
}

#[actix_web::test]
async fn add_admin_sends_invite_and_rejects_duplicate_email() {
    let ctx = TestContext::new().await;
    let token = ctx.superadmin_token().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let payload = json!({
        "fullname": "Meera Das",
        "email": "meera@backoffice.test",
        "uniqueId": "ADM-002"
    });
    let req = test::TestRequest::post()
        .uri("/admin/addadmin")
        .insert_header(bearer(&token))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["admin"]["role"], "admin");

    let events = ctx.events.events();
    assert_eq!(events.len(), 1);
    match &events[0] {
        NotificationEvent::AdminInvited { recipient, setup_url } => {
            assert_eq!(recipient.email, "meera@backoffice.test");
            assert!(setup_url.contains("token="));
        }
        other => panic!("unexpected event {:?}", other),
    }

    let req = test::TestRequest::post()
        .uri("/admin/addadmin")
        .insert_header(bearer(&token))
        .set_json(json!({
            "fullname": "Meera Again",
            "email": "MEERA@backoffice.test",
            "uniqueId": "ADM-003"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "CONFLICT");

    let req = test::TestRequest::get()
        .uri("/admin/get-all-admins")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(ctx.events.count(), 1);
}

#[actix_web::test]
async fn invalid_add_admin_payload_is_rejected() {
    let ctx = TestContext::new().await;
    let token = ctx.superadmin_token().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/admin/addadmin")
        .insert_header(bearer(&token))
        .set_json(json!({ "fullname": "No Email", "email": "not-an-email", "uniqueId": "X" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ctx.events.count(), 0);
}

#[actix_web::test]
async fn superadmin_cannot_be_deleted_or_blocked() {
    let ctx = TestContext::new().await;
    let token = ctx.superadmin_token().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let id = ctx.superadmin.id;

    let req = test::TestRequest::delete()
        .uri(&format!("/admin/delete-admin/{}", id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "SUPERADMIN_PROTECTED");

    let req = test::TestRequest::patch()
        .uri(&format!("/admin/block-admin/{}", id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Still there and still able to use the API
    let req = test::TestRequest::get()
        .uri("/admin/check-auth")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn blocking_is_idempotent_and_ends_the_session() {
    let ctx = TestContext::new().await;
    let token = ctx.superadmin_token().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/admin/addadmin")
        .insert_header(bearer(&token))
        .set_json(json!({
            "fullname": "Kiran Rao",
            "email": "kiran@backoffice.test",
            "password": "KiranPassw0rd",
            "uniqueId": "ADM-010"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["data"]["admin"]["id"].as_str().expect("id").to_string();
    let kiran_token = ctx.login("kiran@backoffice.test", "KiranPassw0rd").await;
    ctx.events.clear();

    for _ in 0..2 {
        let req = test::TestRequest::patch()
            .uri(&format!("/admin/block-admin/{}", id))
            .insert_header(bearer(&token))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["isBlocked"], true);
    }
    assert_eq!(ctx.events.count(), 1);
    assert!(matches!(ctx.events.events()[0], NotificationEvent::Blocked { .. }));

    let req = test::TestRequest::get()
        .uri("/admin/check-auth")
        .insert_header(bearer(&kiran_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "ACCOUNT_BLOCKED");

    let req = test::TestRequest::patch()
        .uri(&format!("/admin/unblock-admin/{}", id))
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["isBlocked"], false);
    assert_eq!(ctx.events.count(), 2);

    let req = test::TestRequest::get()
        .uri("/admin/check-auth")
        .insert_header(bearer(&kiran_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn edit_admin_keeps_email_immutable() {
    let ctx = TestContext::new().await;
    let token = ctx.superadmin_token().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/admin/addadmin")
        .insert_header(bearer(&token))
        .set_json(json!({
            "fullname": "Anita Roy",
            "email": "anita@backoffice.test",
            "uniqueId": "ADM-020"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["data"]["admin"]["id"].as_str().expect("id").to_string();

    let req = test::TestRequest::patch()
        .uri(&format!("/admin/edit-admin/{}", id))
        .insert_header(bearer(&token))
        .set_json(json!({ "fullname": "Anita Roy-Sen" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["fullname"], "Anita Roy-Sen");

    let req = test::TestRequest::patch()
        .uri(&format!("/admin/edit-admin/{}", id))
        .insert_header(bearer(&token))
        .set_json(json!({ "email": "someone-else@backoffice.test" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn setup_link_sets_password_once() {
    let ctx = TestContext::new().await;
    let token = ctx.superadmin_token().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/admin/addadmin")
        .insert_header(bearer(&token))
        .set_json(json!({
            "fullname": "Farah Ali",
            "email": "farah@backoffice.test",
            "uniqueId": "ADM-030"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let setup_token = match ctx.events.events().pop() {
        Some(NotificationEvent::AdminInvited { setup_url, .. }) => setup_url
            .split_once("token=")
            .map(|(_, t)| t.to_string())
            .expect("token in setup url"),
        other => panic!("expected invite, got {:?}", other),
    };

    let req = test::TestRequest::post()
        .uri("/admin/set-password")
        .set_json(json!({ "token": setup_token, "password": "FarahPassw0rd" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/admin/login")
        .set_json(json!({ "email": "farah@backoffice.test", "password": "FarahPassw0rd" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/admin/set-password")
        .set_json(json!({ "token": setup_token, "password": "AnotherPassw0rd" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
