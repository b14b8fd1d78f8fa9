//! SharePoint Client Mock Tests
//!
//! Exercises every `SharePointClient` endpoint against a wiremock server.
//!
//! Each test follows this pattern:
//! 1. Start a mock HTTP server with a token endpoint
//! 2. Configure the expected Graph request and its response
//! 3. Make the API call
//! 4. Assert on the `GraphResponse` status and content

mod common;

use common::{client, CREATED, MODIFIED};
use serde_json::json;
use sharepoint_sdk::{ApiError, ConflictBehavior, Method, RequestBody, SharePointError};
use wiremock::{
    matchers::{body_json, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

// ============================================================================
// Site Tests
// ============================================================================

#[tokio::test]
async fn test_get_site_info_success() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v1.0/sites/contoso.sharepoint.com:/sites/Finance"))
        .and(query_param(
            "$select",
            "id,name,displayName,webUrl,createdDateTime,lastModifiedDateTime",
        ))
        .and(header("Authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "contoso.sharepoint.com,site-guid,web-guid",
            "name": "Finance",
            "displayName": "Finance Team",
            "webUrl": "https://contoso.sharepoint.com/sites/Finance",
            "createdDateTime": CREATED,
            "lastModifiedDateTime": MODIFIED
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client.get_site_info("Finance").await.unwrap();

    assert_eq!(response.status_code, 200);
    let site = response.content.unwrap();
    assert_eq!(site.id, "contoso.sharepoint.com,site-guid,web-guid");
    assert_eq!(site.display_name.as_deref(), Some("Finance Team"));
}

#[tokio::test]
async fn test_get_site_info_encodes_site_name() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v1.0/sites/contoso.sharepoint.com:/sites/Finance%20Team"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "site-1",
            "createdDateTime": CREATED
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client.get_site_info("Finance Team").await.unwrap();
    assert_eq!(response.content.unwrap().id, "site-1");
}

#[tokio::test]
async fn test_get_site_info_not_found_is_returned_not_raised() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v1.0/sites/contoso.sharepoint.com:/sites/Missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": "itemNotFound", "message": "Requested site could not be found"}
        })))
        .mount(&mock_server)
        .await;

    let response = client.get_site_info("Missing").await.unwrap();

    assert_eq!(response.status_code, 404);
    assert!(response.content.is_none());
    assert!(String::from_utf8_lossy(response.raw_body()).contains("itemNotFound"));

    let err = response.error_for_status().unwrap_err();
    assert!(err.to_string().contains("404"));
    assert!(err.to_string().contains("itemNotFound"));
}

#[tokio::test]
async fn test_get_hostname_info() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v1.0/sites/site-1"))
        .and(query_param(
            "$select",
            "id,name,displayName,description,webUrl,siteCollection,createdDateTime,lastModifiedDateTime",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "site-1",
            "name": "Finance",
            "description": "Finance department",
            "siteCollection": {"hostname": "contoso.sharepoint.com", "dataLocationCode": "EUR"},
            "createdDateTime": CREATED
        })))
        .mount(&mock_server)
        .await;

    let host = client.get_hostname_info("site-1").await.unwrap().content.unwrap();
    let collection = host.site_collection.unwrap();
    assert_eq!(collection.hostname.as_deref(), Some("contoso.sharepoint.com"));
    assert_eq!(collection.data_location_code.as_deref(), Some("EUR"));
}

// ============================================================================
// Drive and Folder Tests
// ============================================================================

#[tokio::test]
async fn test_list_drives() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v1.0/sites/site-1/drives"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                {"id": "drive-1", "name": "Documents", "driveType": "documentLibrary", "createdDateTime": CREATED},
                {"id": "drive-2", "name": "Archive", "driveType": "documentLibrary", "createdDateTime": CREATED}
            ]
        })))
        .mount(&mock_server)
        .await;

    let drives = client.list_drives("site-1").await.unwrap().content.unwrap();
    assert_eq!(drives.len(), 2);
    assert_eq!(drives[1].name.as_deref(), Some("Archive"));
}

#[tokio::test]
async fn test_get_dir_info_root_and_nested() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v1.0/drives/drive-1/root"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "root-id", "name": "root", "createdDateTime": CREATED
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1.0/drives/drive-1/root:/Reports/2024"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "folder-2024", "name": "2024", "size": 2048, "createdDateTime": CREATED
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let root = client.get_dir_info("drive-1", None).await.unwrap();
    assert_eq!(root.content.unwrap().id, "root-id");

    let nested = client
        .get_dir_info("drive-1", Some("/Reports/2024/"))
        .await
        .unwrap();
    let nested = nested.content.unwrap();
    assert_eq!(nested.id, "folder-2024");
    assert_eq!(nested.size, Some(2048));
}

#[tokio::test]
async fn test_list_dir_derives_extension_and_path() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v1.0/drives/drive-1/root:/Reports/2024:/children"))
        .and(query_param(
            "$select",
            "id,name,size,webUrl,folder,createdDateTime,lastModifiedDateTime,lastModifiedBy",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                {
                    "id": "f1",
                    "name": "Q1",
                    "folder": {"childCount": 3},
                    "createdDateTime": CREATED
                },
                {
                    "id": "f2",
                    "name": "summary.final.xlsx",
                    "size": 5120,
                    "createdDateTime": CREATED,
                    "lastModifiedDateTime": MODIFIED,
                    "lastModifiedBy": {"user": {"displayName": "Ana Lima", "email": "ana@contoso.com"}}
                }
            ]
        })))
        .mount(&mock_server)
        .await;

    let items = client
        .list_dir("drive-1", Some("Reports/2024"))
        .await
        .unwrap()
        .content
        .unwrap();

    assert_eq!(items.len(), 2);
    assert!(items[0].is_folder);
    assert!(items[0].extension.is_none());
    assert_eq!(items[1].extension.as_deref(), Some("xlsx"));
    assert_eq!(items[1].last_modified_by_email.as_deref(), Some("ana@contoso.com"));
    assert!(items.iter().all(|i| i.path == "Reports/2024"));
}

#[tokio::test]
async fn test_list_dir_root() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v1.0/drives/drive-1/root/children"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{"id": "f1", "name": "readme.md", "createdDateTime": CREATED}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let items = client.list_dir("drive-1", None).await.unwrap().content.unwrap();
    assert_eq!(items[0].path, "/");
    assert_eq!(items[0].extension.as_deref(), Some("md"));
}

#[tokio::test]
async fn test_create_dir_replaces_by_default() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/v1.0/drives/drive-1/root:/Reports:/children"))
        .and(body_json(json!({
            "name": "2025",
            "folder": {},
            "@microsoft.graph.conflictBehavior": "replace"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "folder-2025",
            "name": "2025",
            "createdDateTime": CREATED
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client.create_dir("drive-1", "Reports", "2025").await.unwrap();
    assert_eq!(response.status_code, 201);
    assert_eq!(response.content.unwrap().id, "folder-2025");
}

#[tokio::test]
async fn test_create_dir_with_fail_conflict_returns_409() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/v1.0/drives/drive-1/root:/Reports:/children"))
        .and(body_json(json!({
            "name": "2025",
            "folder": {},
            "@microsoft.graph.conflictBehavior": "fail"
        })))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": {"code": "nameAlreadyExists"}
        })))
        .mount(&mock_server)
        .await;

    let response = client
        .create_dir_with("drive-1", "Reports", "2025", ConflictBehavior::Fail)
        .await
        .unwrap();
    assert_eq!(response.status_code, 409);
    assert!(response.content.is_none());
}

#[tokio::test]
async fn test_delete_dir() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("DELETE"))
        .and(path("/v1.0/drives/drive-1/root:/Reports/Old"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client.delete_dir("drive-1", "Reports/Old").await.unwrap();
    assert_eq!(response.status_code, 204);
    assert!(response.is_success());
    assert!(response.content.is_some());
}

#[tokio::test]
async fn test_rename_folder() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("PATCH"))
        .and(path("/v1.0/drives/drive-1/root:/Reports/Old"))
        .and(body_json(json!({"name": "Legacy"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "folder-old",
            "name": "Legacy",
            "createdDateTime": CREATED
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client
        .rename_folder("drive-1", "Reports/Old", "Legacy")
        .await
        .unwrap();
    assert_eq!(response.content.unwrap().name, "Legacy");
}

// ============================================================================
// File Tests
// ============================================================================

#[tokio::test]
async fn test_get_file_info() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v1.0/drives/drive-1/root:/in/data.csv"))
        .and(query_param(
            "$select",
            "id,name,webUrl,size,createdDateTime,lastModifiedDateTime,lastModifiedBy",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "file-1",
            "name": "data.csv",
            "size": 42,
            "createdDateTime": CREATED,
            "lastModifiedBy": {"user": {"displayName": "Ana Lima", "email": "ana@contoso.com"}}
        })))
        .mount(&mock_server)
        .await;

    let info = client
        .get_file_info("drive-1", "in/data.csv")
        .await
        .unwrap()
        .content
        .unwrap();
    assert_eq!(info.id, "file-1");
    assert_eq!(info.size, Some(42));
    assert_eq!(info.last_modified_by_email.as_deref(), Some("ana@contoso.com"));
}

#[tokio::test]
async fn test_copy_file_returns_monitor_url() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/v1.0/drives/drive-1/root:/in/data.csv:/copy"))
        .and(body_json(json!({
            "parentReference": {
                "driveId": "drive-1",
                "driveType": "documentLibrary",
                "path": "/drives/drive-1/root:/archive"
            },
            "name": "data-copy.csv"
        })))
        .respond_with(
            ResponseTemplate::new(202)
                .insert_header("Location", "https://contoso.sharepoint.com/monitor/job-1"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client
        .copy_file("drive-1", "in/data.csv", "/archive/", Some("data-copy.csv"))
        .await
        .unwrap();

    assert_eq!(response.status_code, 202);
    assert_eq!(
        response.content.unwrap().monitor_url.as_deref(),
        Some("https://contoso.sharepoint.com/monitor/job-1")
    );
}

#[tokio::test]
async fn test_move_file_resolves_ids_then_patches() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v1.0/drives/drive-1/root:/in/data.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "file-1", "name": "data.csv", "createdDateTime": CREATED
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1.0/drives/drive-1/root:/archive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "folder-archive", "name": "archive", "createdDateTime": CREATED
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/v1.0/drives/drive-1/items/file-1"))
        .and(body_json(json!({
            "parentReference": {"id": "folder-archive"},
            "name": "data-2024.csv"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "file-1", "name": "data-2024.csv", "createdDateTime": CREATED
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client
        .move_file("drive-1", "in/data.csv", "archive", Some("data-2024.csv"))
        .await
        .unwrap();
    assert_eq!(response.status_code, 200);
    assert_eq!(response.content.unwrap().name, "data-2024.csv");
}

#[tokio::test]
async fn test_move_file_missing_source_skips_patch() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v1.0/drives/drive-1/root:/in/missing.csv"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": "itemNotFound"}
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let response = client
        .move_file("drive-1", "in/missing.csv", "archive", None)
        .await
        .unwrap();
    assert_eq!(response.status_code, 404);
    assert!(response.content.is_none());
}

#[tokio::test]
async fn test_delete_file() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("DELETE"))
        .and(path("/v1.0/drives/drive-1/root:/in/data.csv"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client.delete_file("drive-1", "in/data.csv").await.unwrap();
    assert_eq!(response.status_code, 204);
}

#[tokio::test]
async fn test_rename_file() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("PATCH"))
        .and(path("/v1.0/drives/drive-1/root:/in/data.csv"))
        .and(body_json(json!({"name": "renamed.csv"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "file-1", "name": "renamed.csv", "createdDateTime": CREATED
        })))
        .mount(&mock_server)
        .await;

    let response = client
        .rename_file("drive-1", "in/data.csv", "renamed.csv")
        .await
        .unwrap();
    assert_eq!(response.content.unwrap().name, "renamed.csv");
}

// ============================================================================
// List Tests
// ============================================================================

#[tokio::test]
async fn test_list_lists_and_columns() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v1.0/sites/site-1/lists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{"id": "list-1", "displayName": "Invoices", "createdDateTime": CREATED}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1.0/sites/site-1/lists/list-1/columns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                {"id": "c1", "name": "Title", "displayName": "Title", "required": true},
                {"id": "c2", "name": "Amount", "indexed": true}
            ]
        })))
        .mount(&mock_server)
        .await;

    let lists = client.list_lists("site-1").await.unwrap().content.unwrap();
    assert_eq!(lists[0].display_name.as_deref(), Some("Invoices"));

    let columns = client
        .list_list_columns("site-1", "list-1")
        .await
        .unwrap()
        .content
        .unwrap();
    assert_eq!(columns.len(), 2);
    assert!(columns[0].required);
    assert!(columns[1].indexed);
    assert_eq!(columns[1].display_name, "");
}

#[tokio::test]
async fn test_list_list_items_selected_fields() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v1.0/sites/site-1/lists/list-1/items"))
        .and(query_param("$expand", "fields($select=Title,Amount)"))
        .and(header("Accept", "application/json;odata.metadata=none"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                {"id": "1", "fields": {"Title": "INV-001", "Amount": 120.5}},
                {"id": "2", "fields": {"Title": "INV-002", "Amount": 80}}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let items = client
        .list_list_items("site-1", "list-1", &["Title", "Amount"])
        .await
        .unwrap()
        .content
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["Title"], "INV-001");
    assert_eq!(items[1]["Amount"], 80);
}

#[tokio::test]
async fn test_list_list_items_all_fields() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v1.0/sites/site-1/lists/list-1/items"))
        .and(query_param("$expand", "fields"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{"id": "1", "fields": {"Title": "INV-001"}}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let items = client
        .list_list_items("site-1", "list-1", &[])
        .await
        .unwrap()
        .content
        .unwrap();
    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn test_add_list_item() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/v1.0/sites/site-1/lists/list-1/items"))
        .and(body_json(json!({"fields": {"Title": "INV-003", "Amount": 99}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "3",
            "webUrl": "https://contoso.sharepoint.com/sites/Finance/Lists/Invoices/3_.000",
            "createdDateTime": CREATED
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client
        .add_list_item("site-1", "list-1", &json!({"Title": "INV-003", "Amount": 99}))
        .await
        .unwrap();
    assert_eq!(response.status_code, 201);
    assert_eq!(response.content.unwrap().id, "3");
}

#[tokio::test]
async fn test_delete_list_item() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("DELETE"))
        .and(path("/v1.0/sites/site-1/lists/list-1/items/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/v1.0/sites/site-1/lists/list-1/items/404"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let deleted = client.delete_list_item("site-1", "list-1", "3").await.unwrap();
    assert_eq!(deleted.status_code, 204);
    assert!(deleted.content.is_some());

    let missing = client
        .delete_list_item("site-1", "list-1", "404")
        .await
        .unwrap();
    assert_eq!(missing.status_code, 404);
    assert!(missing.content.is_none());
}

// ============================================================================
// Raw Request Tests
// ============================================================================

#[tokio::test]
async fn test_request_returns_json_value() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v1.0/sites/root"))
        .and(query_param("$select", "id,webUrl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "root-site",
            "webUrl": "https://contoso.sharepoint.com"
        })))
        .mount(&mock_server)
        .await;

    let response = client
        .request(
            Method::GET,
            "/sites/root",
            &[("$select", "id,webUrl".to_string())],
            RequestBody::Empty,
        )
        .await
        .unwrap();
    assert_eq!(response.content.unwrap()["id"], "root-site");
}

#[tokio::test]
async fn test_request_posts_json_body() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/v1.0/sites/site-1/lists"))
        .and(body_json(json!({"displayName": "Books", "list": {"template": "genericList"}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "list-9"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = RequestBody::json(&json!({
        "displayName": "Books",
        "list": {"template": "genericList"}
    }))
    .unwrap();
    let response = client
        .request(Method::POST, "/sites/site-1/lists", &[], body)
        .await
        .unwrap();
    assert_eq!(response.status_code, 201);
    assert_eq!(response.content.unwrap()["id"], "list-9");
}

#[tokio::test]
async fn test_save_as_exports_raw_body() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v1.0/sites/site-1/drives"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{"id": "drive-1", "createdDateTime": CREATED}]
        })))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("drives.json");

    let response = client.list_drives("site-1").await.unwrap();
    assert!(response.save_as(&target).await.unwrap());

    let saved: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&target).unwrap()).unwrap();
    assert_eq!(saved["value"][0]["id"], "drive-1");
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[tokio::test]
async fn test_server_error_is_returned_with_status() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v1.0/sites/site-1/lists"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let response = client.list_lists("site-1").await.unwrap();
    assert_eq!(response.status_code, 500);
    assert!(!response.is_success());

    let result = response.error_for_status();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("500"));
}

#[tokio::test]
async fn test_malformed_success_body_is_parse_error() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v1.0/sites/site-1/drives"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&mock_server)
        .await;

    let result = client.list_drives("site-1").await;
    assert!(matches!(
        result,
        Err(SharePointError::Api(ApiError::Parse(_)))
    ));
}

#[tokio::test]
async fn test_missing_required_field_is_parse_error() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v1.0/sites/contoso.sharepoint.com:/sites/Finance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Finance"})))
        .mount(&mock_server)
        .await;

    let err = client.get_site_info("Finance").await.unwrap_err();
    assert!(err.to_string().contains("Parse error"));
}
