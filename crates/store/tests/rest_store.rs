//! RestStore against a mock PostgREST endpoint: URL shape, auth headers,
//! patch bodies, and error classification.

use httpmock::prelude::*;
use sitelink_recon::store::{Predicate, RecordStore, StoreErrorKind};
use sitelink_recon::{Patch, SiteField};
use sitelink_store::{RestStore, StoreConfig};

fn store_for(server: &MockServer) -> RestStore {
    RestStore::new(StoreConfig {
        base_url: server.base_url(),
        api_key: "anon_key".into(),
    })
}

#[test]
fn select_code_present_shape() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/rest/v1/weekly_plans")
            .query_param("cms_code", "not.is.null")
            .query_param("order", "id.asc")
            .header("apikey", "anon_key")
            .header("authorization", "Bearer anon_key");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!([
                {
                    "id": 41,
                    "cms_code": "A1",
                    "cms_id": null,
                    "site_name": null,
                    "site_address": null,
                    "sales_manager": null,
                    "construction_manager": null
                }
            ]));
    });

    let plans = store_for(&server).select(&Predicate::CodePresent).unwrap();
    mock.assert();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].id, 41);
    assert_eq!(plans[0].cms_code.as_deref(), Some("A1"));
    assert!(plans[0].cms_id.is_none());
}

#[test]
fn select_missing_link_adds_null_filter() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/rest/v1/weekly_plans")
            .query_param("cms_code", "not.is.null")
            .query_param("cms_id", "is.null");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!([]));
    });

    let plans = store_for(&server).select(&Predicate::MissingLink).unwrap();
    mock.assert();
    assert!(plans.is_empty());
}

#[test]
fn find_by_key_is_exact_and_ordered() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/rest/v1/construction_management")
            .query_param("cms", "eq.A1")
            .query_param("order", "id.asc");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!([
                {
                    "id": 11,
                    "cms": "A1",
                    "site_name": "Riverside Tower",
                    "site_address": "12 Harbor Rd",
                    "sales_manager": "Park",
                    "construction_manager": "Lee"
                }
            ]));
    });

    let sites = store_for(&server).find_by_key("A1").unwrap();
    mock.assert();
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].cms, "A1");
    assert_eq!(sites[0].site_name.as_deref(), Some("Riverside Tower"));
}

#[test]
fn update_patches_exactly_one_row() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PATCH)
            .path("/rest/v1/weekly_plans")
            .query_param("id", "eq.41")
            .header("apikey", "anon_key")
            .json_body(serde_json::json!({
                "cms_id": 11,
                "site_name": "Riverside Tower"
            }));
        then.status(204);
    });

    let mut patch = Patch::default();
    patch.cms_id = Some(11);
    patch.fields.insert(SiteField::SiteName, "Riverside Tower".into());

    store_for(&server).update(41, &patch).unwrap();
    mock.assert();
}

#[test]
fn auth_rejection_fails_fast() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/rest/v1/weekly_plans");
        then.status(401)
            .header("content-type", "application/json")
            .json_body(serde_json::json!({"message": "Invalid API key"}));
    });

    let err = store_for(&server).select(&Predicate::CodePresent).unwrap_err();
    assert_eq!(err.kind, StoreErrorKind::Auth);
    assert!(err.message.contains("401"));
    assert_eq!(mock.hits(), 1); // no retry on auth failures
}

#[test]
fn bad_request_fails_fast() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/rest/v1/construction_management");
        then.status(400)
            .header("content-type", "application/json")
            .json_body(serde_json::json!({"message": "malformed filter"}));
    });

    let err = store_for(&server).find_by_key("A1").unwrap_err();
    assert_eq!(err.kind, StoreErrorKind::Rejected);
    assert_eq!(mock.hits(), 1);
}

#[test]
fn rate_limit_retries_then_gives_up() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/rest/v1/weekly_plans");
        then.status(429).header("retry-after", "0");
    });

    let err = store_for(&server).select(&Predicate::CodePresent).unwrap_err();
    assert_eq!(err.kind, StoreErrorKind::Transport);
    assert_eq!(mock.hits(), 4); // initial attempt + 3 retries
}
