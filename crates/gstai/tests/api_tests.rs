//! Integration tests for the JSON endpoints against a mock GSTAI service

mod common;

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::{json, Value};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::{capture, client_for, spawn_server};
use gstai::{Customer, DocumentType, GstaiError, Gstin, LineItem, NewInvoice, TaxPeriod};

#[tokio::test]
async fn analyze_document_round_trips_mock_response() {
    let recorded = capture::<Value>();
    let app = Router::new().route(
        "/ai/analyze-document",
        post({
            let recorded = recorded.clone();
            move |headers: HeaderMap, Json(body): Json<Value>| {
                let recorded = recorded.clone();
                async move {
                    *recorded.lock().unwrap() = Some(json!({
                        "auth": headers
                            .get("authorization")
                            .and_then(|v| v.to_str().ok()),
                        "requestId": headers.contains_key("x-request-id"),
                        "body": body,
                    }));
                    Json(json!({"status": "ok", "type": "invoice"}))
                }
            }
        }),
    );
    let base_url = spawn_server(app).await;
    let client = client_for(&base_url);

    let mut file = tempfile::NamedTempFile::with_suffix(".pdf").unwrap();
    file.write_all(b"%PDF-1.4 fake invoice").unwrap();

    let result = client
        .ai()
        .analyze_document(file.path(), DocumentType::Invoice)
        .await
        .unwrap();

    // Round-trip fidelity: the result is exactly the mock body
    assert_eq!(
        result.as_value(),
        &json!({"status": "ok", "type": "invoice"})
    );
    assert_eq!(result.status(), Some("ok"));

    let seen = recorded.lock().unwrap().take().unwrap();
    assert_eq!(seen["auth"], json!("Bearer sk_test_integration"));
    assert_eq!(seen["requestId"], json!(true));
    assert_eq!(seen["body"]["documentType"], json!("invoice"));
    assert_eq!(
        seen["body"]["content"],
        json!(BASE64.encode(b"%PDF-1.4 fake invoice"))
    );
    assert!(seen["body"]["fileName"]
        .as_str()
        .unwrap()
        .ends_with(".pdf"));
}

#[tokio::test]
async fn analyze_document_missing_file_fails_before_network() {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new().fallback({
        let hits = hits.clone();
        move || {
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                StatusCode::OK
            }
        }
    });
    let base_url = spawn_server(app).await;
    let client = client_for(&base_url);

    let err = client
        .ai()
        .analyze_document("/no/such/invoice.pdf", DocumentType::Invoice)
        .await
        .unwrap_err();

    assert!(matches!(err, GstaiError::FileNotFound(_)));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn get_report_returns_body_and_passes_id() {
    let app = Router::new().route(
        "/reconciliation/reports/:id",
        get(|Path(id): Path<String>| async move {
            Json(json!({
                "reportId": id,
                "status": "completed",
                "matched": 12,
            }))
        }),
    );
    let base_url = spawn_server(app).await;
    let client = client_for(&base_url);

    let report = client.reconciliation().get_report("recon_123").await.unwrap();
    assert_eq!(report.report_id(), Some("recon_123"));
    assert_eq!(report.status(), Some("completed"));
}

#[tokio::test]
async fn get_report_unknown_id_is_not_found() {
    let app = Router::new().route(
        "/reconciliation/reports/:id",
        get(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({"success": false, "message": "Report not found"})),
            )
        }),
    );
    let base_url = spawn_server(app).await;
    let client = client_for(&base_url);

    let err = client.reconciliation().get_report("recon_404").await.unwrap_err();
    match err {
        GstaiError::NotFound(message) => assert_eq!(message, "Report not found"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn empty_report_id_rejected_locally() {
    // No server at all: validation must fire first
    let client = client_for("http://127.0.0.1:9");
    let err = client.reconciliation().get_report("  ").await.unwrap_err();
    assert!(matches!(err, GstaiError::Validation(_)));
}

#[tokio::test]
async fn server_error_carries_status_and_message() {
    let app = Router::new().route(
        "/reconciliation/reports/:id",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"success": false, "message": "Server error. Please try again later.", "code": "internal"})),
            )
        }),
    );
    let base_url = spawn_server(app).await;
    let client = client_for(&base_url);

    let err = client.reconciliation().get_report("recon_1").await.unwrap_err();
    match err {
        GstaiError::RemoteService {
            status,
            code,
            message,
        } => {
            assert_eq!(status, 500);
            assert_eq!(code.as_deref(), Some("internal"));
            assert!(message.contains("Server error"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn rejected_credential_is_authentication_error() {
    let app = Router::new().route(
        "/reconciliation/reports/:id",
        get(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"success": false, "message": "Invalid token"})),
            )
        }),
    );
    let base_url = spawn_server(app).await;
    let client = client_for(&base_url);

    let err = client.reconciliation().get_report("recon_1").await.unwrap_err();
    assert!(matches!(err, GstaiError::Authentication(_)));
}

#[tokio::test]
async fn invalid_json_body_is_decode_error() {
    let app = Router::new().route(
        "/reconciliation/reports/:id",
        get(|| async { "certainly } not { json" }),
    );
    let base_url = spawn_server(app).await;
    let client = client_for(&base_url);

    let err = client.reconciliation().get_report("recon_1").await.unwrap_err();
    assert!(matches!(err, GstaiError::Decode(_)));
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    // Grab a free port, then close the listener so nothing answers
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{}", addr));
    let err = client.reconciliation().get_report("recon_1").await.unwrap_err();
    assert!(matches!(err, GstaiError::Transport(_)));
}

#[tokio::test]
async fn slow_server_times_out_as_transport_error() {
    let app = Router::new().route(
        "/reconciliation/reports/:id",
        get(|| async {
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            Json(json!({}))
        }),
    );
    let base_url = spawn_server(app).await;
    let client = gstai::Client::with_config(
        gstai::Config::new("sk_test_integration")
            .with_base_url(&base_url)
            .with_timeout(std::time::Duration::from_millis(200)),
    )
    .unwrap();

    let err = client.reconciliation().get_report("recon_1").await.unwrap_err();
    match err {
        GstaiError::Transport(message) => assert!(message.contains("timed out")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn create_invoice_posts_payload_and_decodes_receipt() {
    let recorded = capture::<Value>();
    let app = Router::new().route(
        "/invoices",
        post({
            let recorded = recorded.clone();
            move |Json(body): Json<Value>| {
                let recorded = recorded.clone();
                async move {
                    *recorded.lock().unwrap() = Some(body);
                    Json(json!({
                        "id": "inv_42",
                        "status": "issued",
                        "total": 59000.0,
                        "taxAmount": 9000.0,
                    }))
                }
            }
        }),
    );
    let base_url = spawn_server(app).await;
    let client = client_for(&base_url);

    let invoice = NewInvoice::new(
        Customer::new("ABC Enterprises").with_gstin(Gstin::parse("27XYZPU9603R1ZY").unwrap()),
    )
    .with_item(LineItem::new("Consulting Services", 1.0, 50000.0));

    let created = client.invoices().create(&invoice).await.unwrap();
    assert_eq!(created.id, "inv_42");
    assert_eq!(created.total, Some(59000.0));

    let seen = recorded.lock().unwrap().take().unwrap();
    assert_eq!(seen["customer"]["gstin"], json!("27XYZPU9603R1ZY"));
    assert_eq!(seen["items"][0]["description"], json!("Consulting Services"));
}

#[tokio::test]
async fn create_invoice_without_items_rejected_locally() {
    let client = client_for("http://127.0.0.1:9");
    let invoice = NewInvoice::new(Customer::new("Nobody"));
    let err = client.invoices().create(&invoice).await.unwrap_err();
    assert!(matches!(err, GstaiError::Validation(_)));
}

#[tokio::test]
async fn file_return_hits_form_specific_path() {
    let recorded = capture::<Value>();
    let app = Router::new().route(
        "/returns/gstr1",
        post({
            let recorded = recorded.clone();
            move |Json(body): Json<Value>| {
                let recorded = recorded.clone();
                async move {
                    *recorded.lock().unwrap() = Some(body);
                    Json(json!({
                        "returnId": "ret_7",
                        "status": "filed",
                        "acknowledgementNumber": "ACK123",
                    }))
                }
            }
        }),
    );
    let base_url = spawn_server(app).await;
    let client = client_for(&base_url);

    let gstin = Gstin::parse("27ABCDE1234F1Z5").unwrap();
    let period = TaxPeriod::parse("012024").unwrap();
    let data = json!({"invoices": [], "summary": {}});

    let receipt = client
        .gst()
        .file_return(gstai::ReturnType::Gstr1, &gstin, period, &data)
        .await
        .unwrap();
    assert_eq!(receipt.return_id, "ret_7");
    assert_eq!(receipt.acknowledgement_number.as_deref(), Some("ACK123"));

    let seen = recorded.lock().unwrap().take().unwrap();
    assert_eq!(seen["gstin"], json!("27ABCDE1234F1Z5"));
    assert_eq!(seen["period"], json!("012024"));
}

#[tokio::test]
async fn sales_report_sends_filter_query() {
    let recorded = capture::<Value>();
    let app = Router::new().route(
        "/reports/sales",
        get({
            let recorded = recorded.clone();
            move |axum::extract::RawQuery(query): axum::extract::RawQuery| {
                let recorded = recorded.clone();
                async move {
                    *recorded.lock().unwrap() = Some(json!(query));
                    Json(json!({"rows": [], "totalSales": 0}))
                }
            }
        }),
    );
    let base_url = spawn_server(app).await;
    let client = client_for(&base_url);

    let filter = gstai::ReportFilter::new()
        .with_gstin(Gstin::parse("27ABCDE1234F1Z5").unwrap())
        .with_date_range(
            chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        );
    let report = client.reports().sales(&filter).await.unwrap();
    assert_eq!(report.as_value()["totalSales"], json!(0));

    let query = recorded.lock().unwrap().take().unwrap();
    let query = query.as_str().unwrap();
    assert!(query.contains("gstin=27ABCDE1234F1Z5"));
    assert!(query.contains("fromDate=2024-01-01"));
    assert!(query.contains("toDate=2024-03-31"));
}

#[tokio::test]
async fn report_download_returns_raw_bytes() {
    let app = Router::new().route(
        "/reports/download/:id",
        get(|| async { "invoice_no,amount\ninv_1,500\n" }),
    );
    let base_url = spawn_server(app).await;
    let client = client_for(&base_url);

    let bytes = client.reports().download("exp_1").await.unwrap();
    assert_eq!(bytes, b"invoice_no,amount\ninv_1,500\n");
}

#[tokio::test]
async fn validate_gstin_decodes_registry_details() {
    let app = Router::new().route(
        "/gstin/validate/:gstin",
        get(|Path(gstin): Path<String>| async move {
            Json(json!({
                "valid": true,
                "gstin": gstin,
                "legalName": "ABC Enterprises Pvt Ltd",
                "status": "active",
            }))
        }),
    );
    let base_url = spawn_server(app).await;
    let client = client_for(&base_url);

    let gstin = Gstin::parse("27ABCDE1234F1Z5").unwrap();
    let details = client.gst().validate_gstin(&gstin).await.unwrap();
    assert!(details.valid);
    assert_eq!(details.legal_name.as_deref(), Some("ABC Enterprises Pvt Ltd"));
}
