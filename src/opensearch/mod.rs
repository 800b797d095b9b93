// nc_bulk_loader/src/opensearch/mod.rs
// OpenSearch specific engine logic.

use async_trait::async_trait;
use opensearch::cert::CertificateValidation;
use opensearch::http::request::JsonBody;
use opensearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use opensearch::indices::{IndicesCreateParts, IndicesExistsParts};
use opensearch::{BulkParts, OpenSearch};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::ConnectionConfig;
use crate::document::IndexedDocument;
use crate::engine::{BulkOutcome, FailureDetail, SearchEngine};
use crate::error::{LoaderError, Result};

pub struct OpenSearchEngine {
    client: OpenSearch,
}

impl OpenSearchEngine {
    pub fn new(config: &ConnectionConfig,) -> Result<Self,> {
        let url = config.url()?;
        let conn_pool = SingleNodeConnectionPool::new(url.clone(),);

        let mut builder = TransportBuilder::new(conn_pool,).disable_proxy();
        if !config.verify_certificates {
            builder = builder.cert_validation(CertificateValidation::None,);
        }
        let transport = builder.build().map_err(|e| {
            LoaderError::ConnectionError(format!("Failed to create OpenSearch transport: {}", e),)
        },)?;

        info!(
            url = %url,
            verify_certs = config.verify_certificates,
            "Created OpenSearch client"
        );

        Ok(OpenSearchEngine {
            client: OpenSearch::new(transport,),
        },)
    }
}

#[async_trait]
impl SearchEngine for OpenSearchEngine {
    async fn index_exists(&self, name: &str,) -> Result<bool,> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[name],),)
            .send()
            .await?;

        match response.status_code().as_u16() {
            200 => Ok(true,),
            404 => Ok(false,),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(LoaderError::IndexError(format!(
                    "Existence check for '{}' returned {}: {}",
                    name, status, body
                ),),)
            },
        }
    }

    async fn create_index(&self, name: &str, body: Value,) -> Result<(),> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(name,),)
            .body(body,)
            .send()
            .await?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Create index request failed");
            return Err(LoaderError::IndexError(format!(
                "Creating '{}' failed with status {}: {}",
                name, status, error_body
            ),),);
        }
        Ok((),)
    }

    async fn send_bulk(&self, chunk: &[IndexedDocument],) -> Result<BulkOutcome,> {
        let mut body: Vec<JsonBody<Value,>,> = Vec::with_capacity(chunk.len() * 2,);
        for doc in chunk {
            body.push(doc.action().into(),);
            body.push(doc.source.clone().into(),);
        }

        let response = self
            .client
            .bulk(BulkParts::None,)
            .body(body,)
            .send()
            .await?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(LoaderError::BulkError(format!(
                "Bulk request failed with status {}: {}",
                status, error_body
            ),),);
        }

        let response_body: Value = response.json().await?;
        let outcome = classify_items(chunk, &response_body,);
        let took = response_body.get("took",).and_then(Value::as_u64,).unwrap_or_default();
        debug!(
            took,
            indexed = outcome.success,
            failed = outcome.failure_count(),
            "Bulk response parsed"
        );
        Ok(outcome,)
    }
}

/// Splits a `_bulk` response into successes and per-document failures.
///
/// Items come back in request order. A document without a matching item is
/// counted as failed.
fn classify_items(chunk: &[IndexedDocument], response: &Value,) -> BulkOutcome {
    let items = response
        .get("items",)
        .and_then(Value::as_array,)
        .map(Vec::as_slice,)
        .unwrap_or_default();

    let mut outcome = BulkOutcome::default();
    for (pos, doc,) in chunk.iter().enumerate() {
        // each item is `{"<op>": {...}}`
        let result = items
            .get(pos,)
            .and_then(Value::as_object,)
            .and_then(|item| item.values().next(),);

        let Some(result,) = result else {
            outcome.failed.push(FailureDetail {
                id:     doc.id.to_string(),
                status: 0,
                reason: "no item in bulk response".to_string(),
            },);
            continue;
        };

        let status = result
            .get("status",)
            .and_then(Value::as_u64,)
            .and_then(|s| u16::try_from(s,).ok(),)
            .unwrap_or_default();
        match result.get("error",) {
            None if (200..300).contains(&status,) => outcome.success += 1,
            err => outcome.failed.push(FailureDetail {
                id: result
                    .get("_id",)
                    .and_then(Value::as_str,)
                    .map(str::to_string,)
                    .unwrap_or_else(|| doc.id.to_string(),),
                status,
                reason: err.map(error_reason,).unwrap_or_else(|| format!("status {}", status),),
            },),
        }
    }
    outcome
}

fn error_reason(err: &Value,) -> String {
    match err {
        Value::String(s,) => s.clone(),
        Value::Object(obj,) => {
            let kind = obj.get("type",).and_then(Value::as_str,);
            let reason = obj.get("reason",).and_then(Value::as_str,);
            match (kind, reason,) {
                (Some(k,), Some(r,),) => format!("{}: {}", k, r),
                (None, Some(r,),) => r.to_string(),
                _ => err.to_string(),
            }
        },
        other => other.to_string(),
    }
}
