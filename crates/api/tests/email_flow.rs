use std::sync::Arc;

use api::{AppState, create_router};
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use mailer::Mailer;
use serde_json::{Value, json};
use smtpmailer_core::{BrandingConfig, SmtpConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Mock relay that accepts sessions in a loop and acks everything
async fn spawn_accepting_relay() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        loop {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };

            tokio::spawn(async move {
                if socket.write_all(b"220 localhost ESMTP\r\n").await.is_err() {
                    return;
                }
                let mut buf = [0; 2048];
                loop {
                    let n = match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => n,
                    };
                    let req = String::from_utf8_lossy(&buf[..n]);

                    if req.starts_with("EHLO") || req.starts_with("HELO") {
                        if socket
                            .write_all(b"250-localhost\r\n250-AUTH PLAIN LOGIN\r\n250 8BITMIME\r\n")
                            .await
                            .is_err()
                        {
                            return;
                        }
                    } else if req.starts_with("AUTH") {
                        if socket
                            .write_all(b"235 2.7.0 Authentication successful\r\n")
                            .await
                            .is_err()
                        {
                            return;
                        }
                    } else if req.starts_with("MAIL FROM") {
                        if socket.write_all(b"250 2.1.0 Ok\r\n").await.is_err() {
                            return;
                        }
                    } else if req.starts_with("RCPT TO") {
                        if socket.write_all(b"250 2.1.5 Ok\r\n").await.is_err() {
                            return;
                        }
                    } else if req.starts_with("DATA") {
                        if socket
                            .write_all(b"354 End data with <CR><LF>.<CR><LF>\r\n")
                            .await
                            .is_err()
                        {
                            return;
                        }
                        let mut data = String::new();
                        loop {
                            let n = match socket.read(&mut buf).await {
                                Ok(0) | Err(_) => return,
                                Ok(n) => n,
                            };
                            data.push_str(&String::from_utf8_lossy(&buf[..n]));
                            if data.contains("\r\n.\r\n") {
                                break;
                            }
                        }
                        if socket
                            .write_all(b"250 2.0.0 Ok: queued\r\n")
                            .await
                            .is_err()
                        {
                            return;
                        }
                    } else if req.starts_with("QUIT") {
                        let _ = socket.write_all(b"221 2.0.0 Bye\r\n").await;
                        return;
                    } else if socket.write_all(b"250 2.0.0 Ok\r\n").await.is_err() {
                        return;
                    }
                }
            });
        }
    });

    port
}

fn test_state(relay_port: u16) -> AppState {
    let smtp = SmtpConfig {
        host: "127.0.0.1".to_string(),
        port: relay_port,
        username: "mailer".to_string(),
        password: "secret".to_string(),
        use_tls: false,
        use_ssl: false,
        from_email: "noreply@example.com".to_string(),
        from_name: "SmtpMailer API".to_string(),
        timeout_secs: 5,
    };
    let branding = BrandingConfig {
        app_name: "SmtpMailer".to_string(),
        company_name: "Mi Empresa".to_string(),
        logo_url: Some("https://cdn.example.com/logo.png".to_string()),
        support_email: Some("soporte@ejemplo.com".to_string()),
        website_url: Some("https://miapp.com".to_string()),
    };
    AppState {
        mailer: Arc::new(Mailer::new(smtp, branding).unwrap()),
    }
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::http::Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_send_otp_success() {
    let port = spawn_accepting_relay().await;
    let app = create_router(test_state(port), "*");

    let response = app
        .oneshot(post_json(
            "/email/send_otp",
            json!({
                "email": "usuario@ejemplo.com",
                "code": "A1B2C3",
                "expiry_minutes": 10,
                "redirect_url": "https://app.com/verify?token=abc123"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Código OTP enviado exitosamente"));
    assert_eq!(body["email_sent_to"], json!("usuario@ejemplo.com"));
    assert_eq!(body["expiry_minutes"], json!(10));
    assert_eq!(body["has_verification_button"], json!(true));
}

#[tokio::test]
async fn test_send_otp_rejects_short_code() {
    let app = create_router(test_state(1), "*");

    let response = app
        .oneshot(post_json(
            "/email/send_otp",
            json!({ "email": "usuario@ejemplo.com", "code": "A1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("Bad Request"));
}

#[tokio::test]
async fn test_send_otp_rejects_non_http_redirect() {
    let app = create_router(test_state(1), "*");

    let response = app
        .oneshot(post_json(
            "/email/send_otp",
            json!({
                "email": "usuario@ejemplo.com",
                "code": "A1B2C3",
                "redirect_url": "ftp://x"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_send_otp_legacy_shape() {
    let port = spawn_accepting_relay().await;
    let app = create_router(test_state(port), "*");

    let response = app
        .oneshot(post_json(
            "/email/send_otp_legacy",
            json!({
                "email": "usuario@gmail.com",
                "code": "847392",
                "app_name": "Hospital Digital"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["email_sent_to"], json!("usuario@gmail.com"));
    // simplified legacy shape only
    assert!(body.get("timestamp").is_none());
    assert!(body.get("has_verification_button").is_none());
}

#[tokio::test]
async fn test_waitlist_confirmation_success() {
    let port = spawn_accepting_relay().await;
    let app = create_router(test_state(port), "*");

    let response = app
        .oneshot(post_json(
            "/waitlist/send_confirmation",
            json!({
                "email": "usuario@ejemplo.com",
                "user_name": "Juan Pérez",
                "offerings": ["CRM", "Analytics"]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["user_name"], json!("Juan Pérez"));
    assert_eq!(body["message_type"], json!("multiple"));
    assert_eq!(body["offerings_count"], json!(2));
    assert_eq!(body["offerings_text"], json!("CRM, Analytics"));
    assert_eq!(
        body["offerings_text_html"],
        json!("<strong>CRM</strong>, <strong>Analytics</strong>")
    );
    // website button falls back to the configured default URL
    assert_eq!(body["has_website_button"], json!(true));
}

#[tokio::test]
async fn test_waitlist_confirmation_rejects_too_many_offerings() {
    let app = create_router(test_state(1), "*");

    let offerings: Vec<String> = (0..11).map(|i| format!("Oferta {i}")).collect();
    let response = app
        .oneshot(post_json(
            "/waitlist/send_confirmation",
            json!({ "email": "usuario@ejemplo.com", "offerings": offerings }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_waitlist_delivery_failure_returns_500_with_detail() {
    // Relay port with nothing listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let app = create_router(test_state(port), "*");

    let response = app
        .oneshot(post_json(
            "/waitlist/send_confirmation",
            json!({ "email": "usuario@ejemplo.com", "offerings": [] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("Internal Server Error"));
    assert!(
        body["details"]
            .as_str()
            .unwrap()
            .starts_with("Error enviando email de waitlist:")
    );
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router(test_state(2525), "*");

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["smtp_relay"], json!("127.0.0.1:2525"));
}

#[tokio::test]
async fn test_root_endpoint() {
    let app = create_router(test_state(2525), "*");

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("Hello World"));
}
