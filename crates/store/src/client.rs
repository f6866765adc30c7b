//! PostgREST store client.
//!
//! One struct, three operations: list candidate plans, look sites up by
//! business key, patch one plan. Retries 429/5xx and transport errors
//! with exponential backoff; auth and validation failures fail fast.

use std::thread;
use std::time::Duration;

use sitelink_recon::store::{Predicate, RecordStore, StoreError};
use sitelink_recon::{Patch, PlanRecord, SiteRecord};

use crate::config::StoreConfig;

const MAX_RETRIES: u32 = 3;
const USER_AGENT: &str = concat!("sitelink/", env!("CARGO_PKG_VERSION"));

const PLAN_TABLE: &str = "weekly_plans";
const SITE_TABLE: &str = "construction_management";
const PLAN_COLUMNS: &str =
    "id,cms_code,cms_id,site_name,site_address,sales_manager,construction_manager";
const SITE_COLUMNS: &str =
    "id,cms,site_name,site_address,sales_manager,construction_manager";

pub struct RestStore {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(config: StoreConfig) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        }
    }

    fn table_url(&self, table: &str) -> Result<url::Url, StoreError> {
        url::Url::parse(&format!("{}/rest/v1/{}", self.base_url, table))
            .map_err(|e| StoreError::transport(format!("invalid store URL: {e}")))
    }

    fn get_rows<T: serde::de::DeserializeOwned>(
        &self,
        url: url::Url,
    ) -> Result<Vec<T>, StoreError> {
        let resp = self.send_with_retry(|http| http.get(url.clone()))?;
        resp.json::<Vec<T>>()
            .map_err(|e| StoreError::transport(format!("bad store response: {e}")))
    }

    /// Send with retry + exponential backoff. `build_request` is called
    /// once per attempt; auth headers are attached here so callers only
    /// supply method, URL, and body.
    fn send_with_retry(
        &self,
        build_request: impl Fn(&reqwest::blocking::Client) -> reqwest::blocking::RequestBuilder,
    ) -> Result<reqwest::blocking::Response, StoreError> {
        let mut backoff_secs = 1u64;

        for attempt in 0..=MAX_RETRIES {
            let req = build_request(&self.http)
                .header("apikey", &self.api_key)
                .bearer_auth(&self.api_key);

            match req.send() {
                Ok(resp) => {
                    let status = resp.status().as_u16();

                    // Auth errors: fail immediately
                    if status == 401 || status == 403 {
                        let body = resp.text().unwrap_or_default();
                        return Err(StoreError::auth(format!("HTTP {status}: {body}")));
                    }

                    // Other 4xx (not 429): fail immediately
                    if status >= 400 && status < 500 && status != 429 {
                        let body = resp.text().unwrap_or_default();
                        return Err(StoreError::rejected(format!("HTTP {status}: {body}")));
                    }

                    // Retryable: 429, 5xx
                    if status == 429 || status >= 500 {
                        if attempt == MAX_RETRIES {
                            return Err(StoreError::transport(format!(
                                "HTTP {status} after {MAX_RETRIES} retries"
                            )));
                        }

                        // Respect Retry-After for 429
                        let wait = if status == 429 {
                            resp.headers()
                                .get("retry-after")
                                .and_then(|v| v.to_str().ok())
                                .and_then(|v| v.parse::<u64>().ok())
                                .unwrap_or(backoff_secs)
                        } else {
                            backoff_secs
                        };

                        eprintln!(
                            "warning: retry {}/{} in {}s (HTTP {})",
                            attempt + 1,
                            MAX_RETRIES,
                            wait,
                            status,
                        );
                        thread::sleep(Duration::from_secs(wait));
                        backoff_secs *= 2;
                        continue;
                    }

                    return Ok(resp);
                }
                Err(e) => {
                    // Network/timeout errors: retry
                    if attempt == MAX_RETRIES {
                        return Err(StoreError::transport(format!(
                            "{e} after {MAX_RETRIES} retries"
                        )));
                    }

                    eprintln!(
                        "warning: retry {}/{} in {}s ({})",
                        attempt + 1,
                        MAX_RETRIES,
                        backoff_secs,
                        e,
                    );
                    thread::sleep(Duration::from_secs(backoff_secs));
                    backoff_secs *= 2;
                }
            }
        }

        unreachable!()
    }
}

impl RecordStore for RestStore {
    fn select(&self, predicate: &Predicate) -> Result<Vec<PlanRecord>, StoreError> {
        let mut url = self.table_url(PLAN_TABLE)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("select", PLAN_COLUMNS);
            query.append_pair("cms_code", "not.is.null");
            if matches!(predicate, Predicate::MissingLink) {
                query.append_pair("cms_id", "is.null");
            }
            // Stable candidate order, run to run.
            query.append_pair("order", "id.asc");
        }
        self.get_rows(url)
    }

    fn find_by_key(&self, code: &str) -> Result<Vec<SiteRecord>, StoreError> {
        let mut url = self.table_url(SITE_TABLE)?;
        url.query_pairs_mut()
            .append_pair("select", SITE_COLUMNS)
            .append_pair("cms", &format!("eq.{code}"))
            // Pins the ambiguity tie-break.
            .append_pair("order", "id.asc");
        self.get_rows(url)
    }

    fn update(&self, id: i64, patch: &Patch) -> Result<(), StoreError> {
        let mut url = self.table_url(PLAN_TABLE)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));

        let body = patch.to_json();
        self.send_with_retry(|http| http.patch(url.clone()).json(&body))?;
        Ok(())
    }
}
