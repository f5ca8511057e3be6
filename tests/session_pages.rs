use std::collections::HashMap;

use axum::http::StatusCode;
use time::Duration;
use tower::ServiceExt; // for oneshot

mod common;

const SIGNED_IN: &str = "is_authenticated=true; email=a@b.com; name=A%20B; picture=https://x/y.png";

#[tokio::test]
async fn start_page_links_to_google() {
    let res = common::offline_app().oneshot(common::get("/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::body_string(res).await;
    assert!(body.contains("Sign in with Google"), "{body}");
    assert!(body.contains("https://accounts.google.com/o/oauth2/v2/auth?response_type=code"));

    let href_start = body.find("href=\"https://accounts.google.com").unwrap() + "href=\"".len();
    let href_end = href_start + body[href_start..].find('"').unwrap();
    let href = body[href_start..href_end].replace("&amp;", "&");

    let query: HashMap<String, String> = url::Url::parse(&href)
        .unwrap()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(query["response_type"], "code");
    assert_eq!(query["client_id"], common::CLIENT_ID);
    assert_eq!(query["redirect_uri"], common::REDIRECT_URI);
    assert_eq!(query["access_type"], "offline");
    assert_eq!(
        query["scope"],
        "https://www.googleapis.com/auth/userinfo.email https://www.googleapis.com/auth/userinfo.profile"
    );
}

#[tokio::test]
async fn start_page_recognises_signed_in_visitor() {
    let res = common::offline_app()
        .oneshot(common::get_with_cookies("/", SIGNED_IN))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::body_string(res).await;
    assert!(body.contains("Signed in as a@b.com"), "{body}");
    assert!(body.contains("Sign in with Google"), "{body}");
    assert!(body.contains("href=\"https://accounts.google.com/o/oauth2/v2/auth?"));
}

#[tokio::test]
async fn start_page_keeps_link_for_bare_flag_cookie() {
    let res = common::offline_app()
        .oneshot(common::get_with_cookies("/", "is_authenticated=true; email=a@b.com"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::body_string(res).await;
    assert!(body.contains("id=\"google-login\""), "{body}");
    assert!(body.contains("https://accounts.google.com/o/oauth2/v2/auth?response_type=code"));
}

#[tokio::test]
async fn dashboard_without_flag_redirects_to_start() {
    for cookies in [
        None,
        Some("email=a@b.com; name=A%20B; picture=https://x/y.png"),
        Some("is_authenticated=; email=a@b.com"),
        Some("is_authenticated=false; email=a@b.com"),
    ] {
        let req = match cookies {
            Some(c) => common::get_with_cookies("/dashboard", c),
            None => common::get("/dashboard"),
        };
        let res = common::offline_app().oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::SEE_OTHER, "{cookies:?}");
        assert_eq!(common::location(&res), "/", "{cookies:?}");
    }
}

#[tokio::test]
async fn dashboard_renders_session_values() {
    let res = common::offline_app()
        .oneshot(common::get_with_cookies("/dashboard", SIGNED_IN))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::body_string(res).await;
    assert!(body.contains("<dd id=\"email\">a@b.com</dd>"), "{body}");
    assert!(body.contains("<dd id=\"name\">A B</dd>"), "{body}");
    assert!(body.contains("src=\"https://x/y.png\""), "{body}");
}

#[tokio::test]
async fn dashboard_escapes_markup() {
    let res = common::offline_app()
        .oneshot(common::get_with_cookies(
            "/dashboard",
            "is_authenticated=true; name=%3Cscript%3E",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::body_string(res).await;
    assert!(!body.contains("<script>"));
    assert!(body.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn logout_expires_all_session_cookies() {
    for cookies in [Some(SIGNED_IN), None] {
        let req = match cookies {
            Some(c) => common::get_with_cookies("/logout", c),
            None => common::get("/logout"),
        };
        let res = common::offline_app().oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(common::location(&res), "/");

        let cleared = common::set_cookies(&res);
        let mut names: Vec<_> = cleared.iter().map(|c| c.name()).collect();
        names.sort_unstable();
        assert_eq!(names, ["email", "is_authenticated", "name", "picture"]);
        for cookie in &cleared {
            assert_eq!(cookie.value(), "", "{}", cookie.name());
            assert_eq!(cookie.max_age(), Some(Duration::ZERO), "{}", cookie.name());
            assert_eq!(cookie.path(), Some("/"));
        }
    }
}

#[tokio::test]
async fn public_files_are_served() {
    let res = common::offline_app()
        .oneshot(common::get("/styles.css"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(common::body_string(res).await.contains(".button"));
}

#[tokio::test]
async fn unknown_paths_are_not_found() {
    let res = common::offline_app()
        .oneshot(common::get("/no-such-page"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
