//! Integration tests for the search pipeline against a mock API.
//!
//! Covers wire-parameter encoding, typed decoding, and cursor pagination
//! through the public client surface.

use europeana::fields::{MediaType, Reusability, SearchField};
use europeana::{ApiError, CURSOR_START, Client, Record};
use futures_util::TryStreamExt;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod support;
use support::socket_guard::start_mock_server_or_skip;

const SEARCH_PATH: &str = "/record/v2/search.json";

fn search_client(server: &MockServer) -> Client {
    Client::with_base_urls(
        "test-key",
        format!("{}{SEARCH_PATH}", server.uri()),
        format!("{}/entity", server.uri()),
    )
    .unwrap()
}

/// Builds a result page of `count` sequential items starting at `start`.
fn page_body(
    start: usize,
    count: usize,
    total: u64,
    next_cursor: Option<&str>,
) -> serde_json::Value {
    let items: Vec<serde_json::Value> = (start..start + count)
        .map(|i| json!({"id": format!("/90402/item_{i}"), "title": [format!("Item {i}")]}))
        .collect();
    let mut body = json!({
        "success": true,
        "itemsCount": count,
        "totalResults": total,
        "items": items,
    });
    if let Some(cursor) = next_cursor {
        body["nextCursor"] = json!(cursor);
    }
    body
}

#[tokio::test]
async fn test_search_single_page_decodes_records() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    let client = search_client(&server);

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("query", "who:Rembrandt"))
        .and(query_param("wskey", "test-key"))
        .and(query_param("cursor", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "totalResults": 2,
            "items": [
                {
                    "id": "/90402/SK_C_5",
                    "title": ["The Night Watch"],
                    "dcCreator": ["Rembrandt van Rijn"],
                    "type": "IMAGE",
                    "year": ["1642"]
                },
                {"id": "/90402/SK_A_4050"}
            ],
            "nextCursor": "AoE/1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = client.query().who("Rembrandt").build();
    let page = client.search(&request, CURSOR_START).await.unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.total_results, 2);
    assert_eq!(page.next_cursor.as_deref(), Some("AoE/1"));
    assert_eq!(
        page.query.as_deref(),
        Some("who:Rembrandt"),
        "page should echo the query it answered"
    );

    let first = &page.items[0];
    assert_eq!(first.first_title(), Some("The Night Watch"));
    assert_eq!(first.first_creator(), Some("Rembrandt van Rijn"));
    assert_eq!(first.first_year(), Some("1642"));
    let item_type = first
        .item_type
        .as_ref()
        .and_then(|value| value.first())
        .map(String::as_str);
    assert_eq!(item_type, Some("IMAGE"));

    // The second item decodes despite carrying almost nothing.
    assert_eq!(page.items[1].id.as_deref(), Some("/90402/SK_A_4050"));
    assert_eq!(page.items[1].first_title(), None);
}

#[tokio::test]
async fn test_search_maps_status_to_api_error() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    let client = search_client(&server);

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let request = client.query().build();
    let error = client.search(&request, CURSOR_START).await.unwrap_err();

    match error {
        ApiError::Status { status, reason } => {
            assert_eq!(status, 401);
            assert!(
                reason.contains("API key"),
                "401 reason should explain the key problem: {reason}"
            );
        }
        other => panic!("expected a status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_search_decode_failure_is_typed() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    let client = search_client(&server);

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("this is not json"))
        .expect(1)
        .mount(&server)
        .await;

    let request = client.query().build();
    let error = client.search(&request, CURSOR_START).await.unwrap_err();
    assert!(
        matches!(error, ApiError::Decode { .. }),
        "unparseable body should map to a decode error, got {error:?}"
    );
}

#[tokio::test]
async fn test_search_all_walks_cursors_to_the_end() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    let client = search_client(&server);

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("cursor", "*"))
        .and(query_param("rows", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(0, 100, 300, Some("c2"))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("cursor", "c2"))
        .and(query_param("rows", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
            100,
            100,
            300,
            Some("c3"),
        )))
        .expect(1)
        .mount(&server)
        .await;
    // The final page carries no cursor, which ends the walk without
    // another request.
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("cursor", "c3"))
        .and(query_param("rows", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(200, 100, 300, None)))
        .expect(1)
        .mount(&server)
        .await;

    let request = client.query().build();
    let records: Vec<Record> = client
        .search_all(&request, None)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(records.len(), 300);
    assert_eq!(records[0].id.as_deref(), Some("/90402/item_0"));
    assert_eq!(records[299].id.as_deref(), Some("/90402/item_299"));
}

#[tokio::test]
async fn test_search_all_stops_at_max_records() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    let client = search_client(&server);

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("cursor", "*"))
        .and(query_param("rows", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(0, 100, 900, Some("c2"))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("cursor", "c2"))
        .and(query_param("rows", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
            100,
            100,
            900,
            Some("c3"),
        )))
        .expect(1)
        .mount(&server)
        .await;
    // Only 50 records remain in the budget, so the third request must
    // shrink its page size. The returned cursor must not trigger a
    // fourth fetch.
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("cursor", "c3"))
        .and(query_param("rows", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(200, 50, 900, Some("c4"))))
        .expect(1)
        .mount(&server)
        .await;

    let request = client.query().build();
    let records: Vec<Record> = client
        .search_all(&request, Some(250))
        .try_collect()
        .await
        .unwrap();

    assert_eq!(records.len(), 250);
    assert_eq!(records[249].id.as_deref(), Some("/90402/item_249"));
}

#[tokio::test]
async fn test_search_all_empty_result_set_fetches_once() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    let client = search_client(&server);

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("cursor", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalResults": 0,
            "items": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = client.query().text_query("nothing matches this").build();
    let records: Vec<Record> = client
        .search_all(&request, None)
        .try_collect()
        .await
        .unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn test_search_sends_full_filter_set_on_the_wire() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    let client = search_client(&server);

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("query", "who:Rembrandt AND TYPE:IMAGE"))
        .and(query_param("profile", "rich"))
        .and(query_param("reusability", "open"))
        .and(query_param("media", "true"))
        .and(query_param("thumbnail", "false"))
        .and(query_param("facet", "COUNTRY,TYPE"))
        .and(query_param("qf", "distance(coverageLocation,52.37,4.89,25)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalResults": 0,
            "items": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = client
        .query()
        .who("Rembrandt")
        .media_type(MediaType::Image)
        .reusability(Reusability::Open)
        .with_media(true)
        .with_thumbnails(false)
        .facets([SearchField::Country, SearchField::Type])
        .unwrap()
        .geographic(52.37, 4.89, 25.0)
        .build();

    client.search_raw(&request, CURSOR_START).await.unwrap();
}

#[tokio::test]
async fn test_search_decodes_facet_blocks() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    let client = search_client(&server);

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalResults": 5,
            "items": [],
            "facets": [{
                "name": "COUNTRY",
                "fields": [
                    {"label": "france", "count": 3},
                    {"label": "netherlands", "count": 2}
                ]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = client
        .query()
        .facet(SearchField::Country)
        .unwrap()
        .build();
    let page = client.search_raw(&request, CURSOR_START).await.unwrap();

    let facets = page.facets.expect("facets were requested");
    assert_eq!(facets.len(), 1);
    assert_eq!(facets[0].name, "COUNTRY");
    assert_eq!(facets[0].fields[0].label, "france");
    assert_eq!(facets[0].fields[0].count, 3);
    assert_eq!(facets[0].fields[1].label, "netherlands");
}

#[tokio::test]
async fn test_search_raw_items_keep_every_field() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    let client = search_client(&server);

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalResults": 1,
            "items": [{
                "id": "/x/1",
                "unmodeledKey": {"nested": true}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = client.query().build();
    let page = client.search_raw(&request, CURSOR_START).await.unwrap();

    assert_eq!(page.items[0]["unmodeledKey"]["nested"], json!(true));
}
