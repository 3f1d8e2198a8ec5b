//! Registration, login, and account self-service flows.

use axum::http::StatusCode;
use integration_tests::{
    get_request, json_request, register_and_login, send, session_from, test_app,
};
use serde_json::json;

fn registration(fullname: &str, email: &str, password: &str, confirm: &str) -> serde_json::Value {
    json!({
        "fullname": fullname,
        "email": email,
        "password": password,
        "confirmPassword": confirm,
    })
}

#[tokio::test]
async fn registration_succeeds_then_duplicate_email_is_rejected() {
    let app = test_app();
    let body = registration("Jane Doe", "jane@example.com", "password1", "password1");

    let (status, reply, _) = send(
        &app,
        json_request("POST", "/auth/registration", body.clone(), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["message"], "Successful registration");

    let (status, _, _) = send(&app, json_request("POST", "/auth/registration", body, None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn case_variant_emails_count_as_the_same_account() {
    let app = test_app();
    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            "/auth/registration",
            registration("Jane Doe", "jane@example.com", "password1", "password1"),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            "/auth/registration",
            registration("Janet Doe", "JANE@EXAMPLE.COM", "password1", "password1"),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn malformed_registrations_are_bad_requests() {
    let app = test_app();
    let cases = [
        registration("Jane", "jane@example.com", "password1", "password1"),
        registration("Jane Doe", "not-an-email", "password1", "password1"),
        registration("Jane Doe", "jane@example.com", "short77", "short77"),
        registration("Jane Doe", "jane@example.com", "password1", "password2"),
    ];
    for body in cases {
        let (status, _, _) =
            send(&app, json_request("POST", "/auth/registration", body.clone(), None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "accepted {body}");
    }
}

#[tokio::test]
async fn login_sets_an_http_only_session_cookie() {
    let app = test_app();
    send(
        &app,
        json_request(
            "POST",
            "/auth/registration",
            registration("Jane Doe", "jane@example.com", "password1", "password1"),
            None,
        ),
    )
    .await;

    let (status, reply, set_cookie) = send(
        &app,
        json_request(
            "POST",
            "/auth/login",
            json!({ "email": "jane@example.com", "password": "password1" }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["message"], "Successful authorization");
    let set_cookie = set_cookie.expect("session cookie issued");
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Max-Age"));
}

#[tokio::test]
async fn login_failures_distinguish_unknown_user_from_bad_password() {
    let app = test_app();
    send(
        &app,
        json_request(
            "POST",
            "/auth/registration",
            registration("Jane Doe", "jane@example.com", "password1", "password1"),
            None,
        ),
    )
    .await;

    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            "/auth/login",
            json!({ "email": "ghost@example.com", "password": "password1" }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            "/auth/login",
            json!({ "email": "jane@example.com", "password": "wrong-pass" }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn a_live_session_blocks_registration_and_login() {
    let app = test_app();
    let cookie = register_and_login(&app, "Jane Doe", "jane@example.com").await;

    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            "/auth/registration",
            registration("Sam Poe", "sam@example.com", "password1", "password1"),
            Some(&cookie),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            "/auth/login",
            json!({ "email": "jane@example.com", "password": "password1" }),
            Some(&cookie),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // A garbage cookie is ignored rather than treated as a session.
    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            "/auth/registration",
            registration("Sam Poe", "sam@example.com", "password1", "password1"),
            Some("token=not-a-real-token"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn account_round_trip_shows_the_identity_without_secrets() {
    let app = test_app();
    let cookie = register_and_login(&app, "Jane Doe", "jane@example.com").await;

    let (status, body, _) = send(&app, get_request("/auth/account", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["fullName"], "Jane Doe");
    assert_eq!(body["user"]["email"], "jane@example.com");
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn protected_account_routes_require_a_session() {
    let app = test_app();
    let (status, _, _) = send(&app, get_request("/auth/account", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = send(
        &app,
        json_request("DELETE", "/auth/logout", json!({}), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn update_account_changes_the_profile_and_rehashes_passwords() {
    let app = test_app();
    let cookie = register_and_login(&app, "Jane Doe", "jane@example.com").await;

    let (status, _, _) = send(
        &app,
        json_request(
            "PUT",
            "/auth/account",
            json!({ "fullName": "Jane Poe", "password": "password2" }),
            Some(&cookie),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body, _) = send(&app, get_request("/auth/account", Some(&cookie))).await;
    assert_eq!(body["user"]["fullName"], "Jane Poe");

    // Old password no longer verifies for the account deletion guard.
    let (status, _, _) = send(
        &app,
        json_request(
            "DELETE",
            "/auth/account",
            json!({ "password": "password1" }),
            Some(&cookie),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(
        &app,
        json_request(
            "DELETE",
            "/auth/account",
            json!({ "password": "password2" }),
            Some(&cookie),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn empty_account_patch_is_rejected() {
    let app = test_app();
    let cookie = register_and_login(&app, "Jane Doe", "jane@example.com").await;
    let (status, _, _) = send(
        &app,
        json_request("PUT", "/auth/account", json!({}), Some(&cookie)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let app = test_app();
    let cookie = register_and_login(&app, "Jane Doe", "jane@example.com").await;

    let (status, reply, set_cookie) = send(
        &app,
        json_request("DELETE", "/auth/logout", json!({}), Some(&cookie)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["message"], "the user logged out");
    let cleared = set_cookie.expect("removal cookie sent");
    assert!(session_from(&cleared).starts_with("token="));
    assert!(cleared.contains("Max-Age=0"));
}

#[tokio::test]
async fn deleted_accounts_cannot_use_their_old_token() {
    let app = test_app();
    let cookie = register_and_login(&app, "Jane Doe", "jane@example.com").await;
    let (status, _, _) = send(
        &app,
        json_request(
            "DELETE",
            "/auth/account",
            json!({ "password": "password1" }),
            Some(&cookie),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // The token still carries a valid signature, but the user is gone.
    let (status, _, _) = send(&app, get_request("/auth/account", Some(&cookie))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_routes_fall_through_to_a_friendly_404() {
    let app = test_app();
    let (status, body, _) = send(&app, get_request("/auth/nope", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Oops, the page was not found");
}
