use std::io::Cursor;

use calamine::{Reader, Xlsx, open_workbook_from_rs};
use invex_products::{Catalog, Product};
use reqwest::StatusCode;
use serde_json::{Value, json};

const EXPORT_FORMATS: [&str; 3] = ["pdf", "csv", "xlsx"];

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(catalog: Catalog) -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = invex_api::app::build_app(catalog);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn spawn_default() -> Self {
        Self::spawn(widget_gadget_catalog()).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn widget_gadget_catalog() -> Catalog {
    Catalog::from_json(
        r#"{"products": [
            {"id": 1, "name": "Widget", "price": 9.99, "quantity": 5},
            {"id": 2, "name": "Gadget", "price": 19.5, "quantity": 2}
        ]}"#,
    )
    .unwrap()
}

async fn post_export(
    client: &reqwest::Client,
    srv: &TestServer,
    format: &str,
    body: Value,
) -> reqwest::Response {
    client
        .post(srv.url(&format!("/export/{format}")))
        .json(&body)
        .send()
        .await
        .unwrap()
}

fn header<'a>(res: &'a reqwest::Response, name: &str) -> &'a str {
    res.headers()
        .get(name)
        .unwrap_or_else(|| panic!("missing {name} header"))
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn_default().await;

    let res = reqwest::get(srv.url("/health")).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn list_products_returns_catalog_in_order() {
    let srv = TestServer::spawn_default().await;

    let res = reqwest::get(srv.url("/api/products")).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!([
            {"id": 1, "name": "Widget", "price": 9.99, "quantity": 5},
            {"id": 2, "name": "Gadget", "price": 19.5, "quantity": 2}
        ])
    );
}

#[tokio::test]
async fn csv_export_of_single_product() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();

    let res = post_export(&client, &srv, "csv", json!({"selectedIds": [1]})).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(header(&res, "content-type"), "text/csv");
    assert_eq!(
        header(&res, "content-disposition"),
        "attachment; filename=data.csv"
    );

    let bytes = res.bytes().await.unwrap();
    let mut reader = csv::Reader::from_reader(bytes.as_ref());
    assert_eq!(
        reader.headers().unwrap(),
        vec!["id", "name", "price", "quantity"]
    );
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0], vec!["1", "Widget", "9.99", "5"]);
}

#[tokio::test]
async fn xlsx_export_of_single_product() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();

    let res = post_export(&client, &srv, "xlsx", json!({"selectedIds": [1]})).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        header(&res, "content-type"),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        header(&res, "content-disposition"),
        "attachment; filename=data.xlsx"
    );

    let bytes = res.bytes().await.unwrap().to_vec();
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
    let sheet = workbook.sheet_names()[0].clone();
    let range = workbook.worksheet_range(&sheet).unwrap();
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();

    assert_eq!(
        rows,
        vec![
            vec!["ID", "Name", "Price", "Quantity"],
            vec!["1", "Widget", "9.99", "5"],
        ]
    );
}

#[tokio::test]
async fn pdf_export_of_single_product() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();

    let res = post_export(&client, &srv, "pdf", json!({"selectedIds": [1]})).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(header(&res, "content-type"), "application/pdf");
    assert_eq!(
        header(&res, "content-disposition"),
        "attachment; filename=data.pdf"
    );
    let bytes = res.bytes().await.unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn duplicate_ids_export_one_row_each_in_catalog_order() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();

    let res = post_export(&client, &srv, "csv", json!({"selectedIds": [2, 1, 2, 1]})).await;

    assert_eq!(res.status(), StatusCode::OK);
    let text = res.text().await.unwrap();
    assert_eq!(
        text,
        "id,name,price,quantity\n1,Widget,9.99,5\n2,Gadget,19.5,2\n"
    );
}

#[tokio::test]
async fn empty_selection_is_rejected_by_every_exporter() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();

    for format in EXPORT_FORMATS {
        let res = post_export(&client, &srv, format, json!({"selectedIds": []})).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "format {format}");
        assert_eq!(header(&res, "content-type"), "application/json");
        assert!(res.headers().get("content-disposition").is_none());
        let body: Value = res.json().await.unwrap();
        assert_eq!(body, json!({"error": "No data to export"}));
    }
}

#[tokio::test]
async fn unknown_ids_are_rejected_like_an_empty_selection() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();

    for format in EXPORT_FORMATS {
        let res = post_export(&client, &srv, format, json!({"selectedIds": [999]})).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "format {format}");
        let body: Value = res.json().await.unwrap();
        assert_eq!(body, json!({"error": "No data to export"}));
    }
}

#[tokio::test]
async fn string_ids_do_not_match_numeric_ids() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();

    let res = post_export(&client, &srv, "csv", json!({"selectedIds": ["1"]})).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_selected_ids_is_an_empty_selection() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();

    let res = post_export(&client, &srv, "pdf", json!({})).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"error": "No data to export"}));
}

#[tokio::test]
async fn unusable_ids_are_dropped_alongside_matching_ones() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();

    for ids in [json!([1, 1.5]), json!([1, null]), json!([1, [2], {"id": 2}])] {
        let res = post_export(&client, &srv, "csv", json!({ "selectedIds": ids })).await;

        assert_eq!(res.status(), StatusCode::OK, "selectedIds {ids}");
        assert_eq!(
            res.text().await.unwrap(),
            "id,name,price,quantity\n1,Widget,9.99,5\n"
        );
    }
}

#[tokio::test]
async fn integral_float_ids_match_integer_ids() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();

    let res = post_export(&client, &srv, "csv", json!({"selectedIds": [1.0]})).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.text().await.unwrap(),
        "id,name,price,quantity\n1,Widget,9.99,5\n"
    );
}

#[tokio::test]
async fn null_selected_ids_is_an_empty_selection() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();

    for format in EXPORT_FORMATS {
        let res = post_export(&client, &srv, format, json!({"selectedIds": null})).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "format {format}");
        let body: Value = res.json().await.unwrap();
        assert_eq!(body, json!({"error": "No data to export"}));
    }
}

#[tokio::test]
async fn only_unusable_ids_is_an_empty_selection() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();

    let res = post_export(&client, &srv, "xlsx", json!({"selectedIds": [1.5, null]})).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"error": "No data to export"}));
}

#[tokio::test]
async fn malformed_body_is_a_client_error() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/export/csv"))
        .header("content-type", "application/json")
        .body("{\"selectedIds\": [1,")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"error": "Invalid request body"}));
}

#[tokio::test]
async fn multi_page_pdf_export_succeeds() {
    let products = (1..=120)
        .map(|i| Product::new(i, format!("Part #{i}"), f64::from(i) * 0.25, 10))
        .collect();
    let srv = TestServer::spawn(Catalog::new(products).unwrap()).await;
    let client = reqwest::Client::new();
    let ids: Vec<i32> = (1..=120).collect();

    let res = post_export(&client, &srv, "pdf", json!({ "selectedIds": ids })).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.bytes().await.unwrap().starts_with(b"%PDF-"));
}

#[tokio::test]
async fn request_id_is_generated_or_echoed() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/api/products")).send().await.unwrap();
    assert!(!header(&res, "x-request-id").is_empty());

    let res = client
        .get(srv.url("/api/products"))
        .header("x-request-id", "trace-42")
        .send()
        .await
        .unwrap();
    assert_eq!(header(&res, "x-request-id"), "trace-42");
}
