use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use geo_gateway::apis::GeocodingApi;
use geo_gateway::error::GeoError;
use geo_gateway::server::create_server;
use geo_gateway::types::{AddressDocument, CoordDocument, DocumentsResponse, PlaceDocument};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Provider stub for router tests: either canned successful documents or a
/// scripted upstream failure.
struct StubProvider {
    address_response: Option<Value>,
    failure: Option<(Option<u16>, String)>,
}

impl StubProvider {
    fn ok(address_response: Value) -> Arc<Self> {
        Arc::new(Self {
            address_response: Some(address_response),
            failure: None,
        })
    }

    fn failing(status: Option<u16>, message: &str) -> Arc<Self> {
        Arc::new(Self {
            address_response: None,
            failure: Some((status, message.to_string())),
        })
    }

    fn scripted_failure(&self) -> Option<GeoError> {
        self.failure.as_ref().map(|(status, message)| GeoError::Upstream {
            status: *status,
            message: message.clone(),
        })
    }
}

#[async_trait::async_trait]
impl GeocodingApi for StubProvider {
    fn provider_name(&self) -> &'static str {
        "stub"
    }

    async fn search_address(
        &self,
        _query: &str,
    ) -> geo_gateway::error::Result<DocumentsResponse<AddressDocument>> {
        if let Some(err) = self.scripted_failure() {
            return Err(err);
        }
        let value = self.address_response.clone().expect("no scripted response");
        Ok(serde_json::from_value(value)?)
    }

    async fn search_keyword(
        &self,
        _query: &str,
    ) -> geo_gateway::error::Result<DocumentsResponse<PlaceDocument>> {
        if let Some(err) = self.scripted_failure() {
            return Err(err);
        }
        Ok(DocumentsResponse {
            documents: Vec::new(),
            meta: Default::default(),
        })
    }

    async fn coord_to_address(
        &self,
        _longitude: f64,
        _latitude: f64,
    ) -> geo_gateway::error::Result<DocumentsResponse<CoordDocument>> {
        if let Some(err) = self.scripted_failure() {
            return Err(err);
        }
        Ok(DocumentsResponse {
            documents: Vec::new(),
            meta: Default::default(),
        })
    }
}

async fn get_json(app: axum::Router, uri: &str) -> Result<(StatusCode, Value)> {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty())?)
        .await?;
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await?;
    let body: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

#[tokio::test]
async fn health_reports_service_name() -> Result<()> {
    let app = create_server(Some(StubProvider::ok(json!({ "documents": [] }))));
    let (status, body) = get_json(app, "/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "geo-gateway");
    assert_eq!(body["status"], "healthy");
    Ok(())
}

#[tokio::test]
async fn missing_query_is_rejected_with_fixed_message() -> Result<()> {
    let provider = StubProvider::ok(json!({ "documents": [] }));

    let (status, body) = get_json(create_server(Some(provider.clone())), "/geocode/address").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "검색어가 필요합니다.");

    let (status, body) = get_json(create_server(Some(provider)), "/geocode/keyword").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "검색어가 필요합니다.");
    Ok(())
}

#[tokio::test]
async fn missing_coordinates_are_rejected() -> Result<()> {
    let provider = StubProvider::ok(json!({ "documents": [] }));

    let (status, body) =
        get_json(create_server(Some(provider.clone())), "/geocode/reverse?x=127.03").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "좌표 정보가 필요합니다.");

    let (status, _body) =
        get_json(create_server(Some(provider)), "/geocode/reverse?x=abc&y=37.5").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn missing_credential_is_a_500_with_descriptive_message() -> Result<()> {
    let app = create_server(None);
    let (status, body) = get_json(app, "/geocode/address?query=%ED%85%8C%ED%97%A4%EB%9E%80%EB%A1%9C").await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "API 키가 설정되지 않았습니다.");
    Ok(())
}

#[tokio::test]
async fn successful_search_forwards_documents_in_order() -> Result<()> {
    let provider = StubProvider::ok(json!({
        "documents": [
            {
                "address_name": "서울 강남구 역삼동 737",
                "address": { "address_name": "서울 강남구 역삼동 737" },
                "road_address": { "address_name": "서울특별시 강남구 테헤란로 152" }
            },
            {
                "address_name": "서울 강남구 역삼동 736",
                "address": { "address_name": "서울 강남구 역삼동 736" },
                "road_address": null
            }
        ],
        "meta": { "total_count": 2, "pageable_count": 2, "is_end": true }
    }));

    let (status, body) = get_json(
        create_server(Some(provider)),
        "/geocode/address?query=%ED%85%8C%ED%97%A4%EB%9E%80%EB%A1%9C%20152",
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let documents = body["documents"].as_array().expect("documents array");
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0]["address_name"], "서울 강남구 역삼동 737");
    assert_eq!(
        documents[0]["road_address"]["address_name"],
        "서울특별시 강남구 테헤란로 152"
    );
    assert_eq!(documents[1]["address_name"], "서울 강남구 역삼동 736");
    assert_eq!(body["meta"]["total_count"], 2);
    Ok(())
}

#[tokio::test]
async fn upstream_status_is_forwarded_with_provider_message() -> Result<()> {
    let provider = StubProvider::failing(Some(401), "wrong appKey");
    let (status, body) = get_json(
        create_server(Some(provider)),
        "/geocode/address?query=%EA%B0%95%EB%82%A8%EC%97%AD",
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "wrong appKey");
    Ok(())
}

#[tokio::test]
async fn transport_failure_maps_to_500_with_fallback_message() -> Result<()> {
    let provider = StubProvider::failing(None, "카카오 API 호출에 실패했습니다.");
    let (status, body) = get_json(
        create_server(Some(provider)),
        "/geocode/keyword?query=%EA%B0%95%EB%82%A8%EC%97%AD",
    )
    .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "카카오 API 호출에 실패했습니다.");
    Ok(())
}
