use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use uuid::Uuid;

use lablink_api::{ApiError, ApiResponse, FieldError};
use lablink_core::{ResultDocument, SingleResultDocument, SAMPLE_TYPE};
use lablink_search::{PageWindow, SearchCriteria};
use lablink_storage::NewResult;

use crate::server::AppState;

#[derive(Serialize)]
pub struct HealthResponse<'a> {
    status: &'a str,
}

pub async fn root() -> impl IntoResponse {
    let body = json!({
        "service": "LabLink Server",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(body))
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse { status: "ready" })).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, backend = state.store.backend_name(), "readiness probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable",
                }),
            )
                .into_response()
        }
    }
}

// ---- Results ----

/// `GET /organisations/{org}/results`
///
/// Lists an organisation's results with their side-loaded profiles,
/// filtered and paginated by the query parameters.
pub async fn list_results(
    State(state): State<AppState>,
    Path(org): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<ApiResponse<ResultDocument>, ApiError> {
    let org_id = Uuid::parse_str(&org).map_err(|_| {
        ApiError::invalid_param(FieldError::new("org", "org is not valid").with_value(&org))
    })?;
    let criteria = criteria_from_params(&params, state.config.search.default_page_limit)?;

    let organisation = state
        .store
        .find_organisation(org_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "organisation lookup failed");
            ApiError::internal_with(e.to_string())
        })?
        .ok_or_else(|| ApiError::not_found("Organisation not found"))?;

    let document = state
        .store
        .search_results(organisation.organisation_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "result search failed");
            ApiError::internal_with(e.to_string())
        })?;

    Ok(ApiResponse::ok(lablink_search::apply(document, &criteria)))
}

/// `GET /organisations/{org}/profiles/{profileId}/results/{sampleId}`
///
/// Reads a single result by sample id through the profile/organisation
/// join. The body carries no relationships and no side-loaded profiles.
pub async fn read_profile_result(
    State(state): State<AppState>,
    Path((org, profile_id, sample_id)): Path<(String, String, String)>,
) -> Result<ApiResponse<SingleResultDocument>, ApiError> {
    let (org_id, profile_uuid) = validate_result_path(&org, &profile_id, &sample_id)?;

    let found = state
        .store
        .find_result(org_id, profile_uuid, &sample_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "result lookup failed");
            ApiError::internal()
        })?;
    let result = found.ok_or_else(|| ApiError::not_found("Result not found"))?;

    Ok(ApiResponse::ok(SingleResultDocument::new(
        result.to_record(),
    )))
}

/// `POST /organisations/{org}/profiles/{profileId}/results`
///
/// Registers a new sample against a profile. The response echoes the
/// stored record without `result`/`resultTime`, which are unset until the
/// sample is resulted.
pub async fn create_result(
    State(state): State<AppState>,
    Path((org, profile_id)): Path<(String, String)>,
    Json(payload): Json<Value>,
) -> Result<ApiResponse<SingleResultDocument>, ApiError> {
    let (org_id, profile_uuid, new_result) = validate_create(&org, &profile_id, &payload)?;

    let profile = state
        .store
        .find_profile(org_id, profile_uuid)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "profile lookup failed");
            ApiError::internal()
        })?
        .ok_or_else(|| ApiError::not_found("Profile not found"))?;

    let created = state
        .store
        .insert_result(&profile, new_result)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "result insert failed");
            ApiError::internal()
        })?;

    Ok(ApiResponse::created(SingleResultDocument::new(
        created.to_record(),
    )))
}

// ---- Request validation ----

/// Builds the search criteria from raw query parameters.
///
/// Empty values count as absent. `pageNum`/`pageLimit` must be
/// non-negative integers when present; `0` falls back to the default the
/// same way an absent parameter does.
fn criteria_from_params(
    params: &HashMap<String, String>,
    default_page_limit: u32,
) -> Result<SearchCriteria, ApiError> {
    let mut errors = Vec::new();
    let page_num = numeric_param(&mut errors, params, "pageNum");
    let page_limit = numeric_param(&mut errors, params, "pageLimit");
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let mut criteria = SearchCriteria::new().with_page(PageWindow::with_default_limit(
        page_num,
        page_limit,
        default_page_limit,
    ));
    if let Some(name) = present(params, "patientName") {
        criteria = criteria.with_patient_name(name);
    }
    if let Some(raw) = present(params, "activateDate") {
        criteria = criteria.with_activate_date(raw);
    }
    if let Some(raw) = present(params, "resultDate") {
        criteria = criteria.with_result_date(raw);
    }
    if let Some(id) = present(params, "patientId") {
        criteria = criteria.with_patient_id(id);
    }
    Ok(criteria)
}

fn present<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(String::as_str)
        .filter(|v| !v.is_empty())
}

fn numeric_param(
    errors: &mut Vec<FieldError>,
    params: &HashMap<String, String>,
    key: &str,
) -> Option<u32> {
    let raw = present(params, key)?;
    match raw.parse::<u32>() {
        Ok(n) => Some(n),
        Err(_) => {
            errors.push(FieldError::new(key, format!("{key} is not valid")).with_value(raw));
            None
        }
    }
}

/// Validates the path parameters of a single-result read, collecting every
/// failure into one 400 payload.
fn validate_result_path(
    org: &str,
    profile_id: &str,
    sample_id: &str,
) -> Result<(Uuid, Uuid), ApiError> {
    let mut errors = Vec::new();
    let org_id = Uuid::parse_str(org);
    if org_id.is_err() {
        errors.push(FieldError::new("org", "org is not valid").with_value(org));
    }
    let profile_uuid = Uuid::parse_str(profile_id);
    if profile_uuid.is_err() {
        errors.push(FieldError::new("profileId", "profileId is not valid").with_value(profile_id));
    }
    if sample_id.trim().is_empty() {
        errors.push(FieldError::new("sampleId", "sampleId is not valid").with_value(sample_id));
    }
    match (org_id, profile_uuid) {
        (Ok(o), Ok(p)) if errors.is_empty() => Ok((o, p)),
        _ => Err(ApiError::validation(errors)),
    }
}

/// Validates the path parameters and body of a create request, collecting
/// every failure into one 400 payload in check order: org, profileId,
/// type, sampleId, resultType.
fn validate_create(
    org: &str,
    profile_id: &str,
    payload: &Value,
) -> Result<(Uuid, Uuid, NewResult), ApiError> {
    let mut errors = Vec::new();
    let org_id = Uuid::parse_str(org);
    if org_id.is_err() {
        errors.push(FieldError::new("org", "org is not valid").with_value(org));
    }
    let profile_uuid = Uuid::parse_str(profile_id);
    if profile_uuid.is_err() {
        errors.push(FieldError::new("profileId", "profileId is not valid").with_value(profile_id));
    }

    let data_type = body_string(payload, "/data/type");
    if data_type.as_deref() != Some(SAMPLE_TYPE) {
        errors.push(with_found_value(
            FieldError::new("data.type", "type is not valid"),
            data_type.as_deref(),
        ));
    }
    let sample_id = body_string(payload, "/data/attributes/sampleId");
    if !matches!(sample_id.as_deref(), Some(s) if !s.trim().is_empty()) {
        errors.push(with_found_value(
            FieldError::new("data.attributes.sampleId", "sampleId is not valid"),
            sample_id.as_deref(),
        ));
    }
    let result_type = body_string(payload, "/data/attributes/resultType");
    if !matches!(result_type.as_deref(), Some(s) if !s.trim().is_empty()) {
        errors.push(with_found_value(
            FieldError::new("data.attributes.resultType", "resultType is not valid"),
            result_type.as_deref(),
        ));
    }

    match (org_id, profile_uuid, sample_id, result_type) {
        (Ok(o), Ok(p), Some(s), Some(r)) if errors.is_empty() => {
            Ok((o, p, NewResult::new(s, r)))
        }
        _ => Err(ApiError::validation(errors)),
    }
}

/// Reads a body field by JSON pointer as its string form. Non-string
/// scalars are rendered as JSON so the validation error can echo them.
fn body_string(payload: &Value, pointer: &str) -> Option<String> {
    payload.pointer(pointer).map(|v| match v.as_str() {
        Some(s) => s.to_string(),
        None => v.to_string(),
    })
}

/// Attaches the offending value when the field was present at all.
fn with_found_value(error: FieldError, value: Option<&str>) -> FieldError {
    match value {
        Some(v) => error.with_value(v),
        None => error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn criteria_defaults_when_no_params() {
        let criteria = criteria_from_params(&params(&[]), 5).unwrap();
        assert!(!criteria.has_filters());
        assert_eq!(criteria.page.page_num(), 1);
        assert_eq!(criteria.page.page_limit(), 5);
    }

    #[test]
    fn criteria_zero_page_params_fall_back_to_defaults() {
        let criteria =
            criteria_from_params(&params(&[("pageNum", "0"), ("pageLimit", "0")]), 5).unwrap();
        assert_eq!(criteria.page.page_num(), 1);
        assert_eq!(criteria.page.page_limit(), 5);
    }

    #[test]
    fn criteria_uses_configured_default_page_limit() {
        let criteria = criteria_from_params(&params(&[]), 25).unwrap();
        assert_eq!(criteria.page.page_limit(), 25);
    }

    #[test]
    fn criteria_empty_values_count_as_absent() {
        let criteria = criteria_from_params(
            &params(&[("patientName", ""), ("activateDate", ""), ("pageNum", "")]),
            5,
        )
        .unwrap();
        assert!(!criteria.has_filters());
        assert_eq!(criteria.page.page_num(), 1);
    }

    #[test]
    fn criteria_rejects_non_numeric_page_params() {
        let err = criteria_from_params(&params(&[("pageNum", "two")]), 5).unwrap_err();
        let ApiError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].param, "pageNum");
        assert_eq!(errors[0].msg, "pageNum is not valid");
        assert_eq!(errors[0].value.as_deref(), Some("two"));
    }

    #[test]
    fn criteria_collects_both_bad_page_params() {
        let err = criteria_from_params(&params(&[("pageNum", "-1"), ("pageLimit", "x")]), 5)
            .unwrap_err();
        let ApiError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].param, "pageNum");
        assert_eq!(errors[1].param, "pageLimit");
    }

    #[test]
    fn criteria_carries_filters_through() {
        let criteria = criteria_from_params(
            &params(&[
                ("patientName", "Alice"),
                ("activateDate", "02/01/2024"),
                ("patientId", "p-1"),
            ]),
            5,
        )
        .unwrap();
        assert_eq!(criteria.patient_name.as_deref(), Some("Alice"));
        assert!(criteria.activate_date.is_some());
        assert_eq!(criteria.patient_id.as_deref(), Some("p-1"));
    }

    #[test]
    fn result_path_collects_all_failures_in_order() {
        let err = validate_result_path("nope", "also-nope", " ").unwrap_err();
        let ApiError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].param, "org");
        assert_eq!(errors[0].msg, "org is not valid");
        assert_eq!(errors[0].value.as_deref(), Some("nope"));
        assert_eq!(errors[1].param, "profileId");
        assert_eq!(errors[2].param, "sampleId");
    }

    #[test]
    fn result_path_accepts_valid_params() {
        let org = Uuid::new_v4();
        let profile = Uuid::new_v4();
        let (o, p) =
            validate_result_path(&org.to_string(), &profile.to_string(), "s-1").unwrap();
        assert_eq!(o, org);
        assert_eq!(p, profile);
    }

    #[test]
    fn create_accepts_valid_payload() {
        let org = Uuid::new_v4();
        let profile = Uuid::new_v4();
        let payload = json!({
            "data": {
                "type": "sample",
                "attributes": {"sampleId": "s-77", "resultType": "blood"}
            }
        });
        let (_, _, new_result) =
            validate_create(&org.to_string(), &profile.to_string(), &payload).unwrap();
        assert_eq!(new_result.sample_id, "s-77");
        assert_eq!(new_result.result_type, "blood");
    }

    #[test]
    fn create_rejects_wrong_type_with_offending_value() {
        let org = Uuid::new_v4().to_string();
        let profile = Uuid::new_v4().to_string();
        let payload = json!({
            "data": {
                "type": "specimen",
                "attributes": {"sampleId": "s-1", "resultType": "blood"}
            }
        });
        let err = validate_create(&org, &profile, &payload).unwrap_err();
        let ApiError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].param, "data.type");
        assert_eq!(errors[0].msg, "type is not valid");
        assert_eq!(errors[0].value.as_deref(), Some("specimen"));
    }

    #[test]
    fn create_omits_value_for_missing_fields() {
        let org = Uuid::new_v4().to_string();
        let profile = Uuid::new_v4().to_string();
        let payload = json!({"data": {"attributes": {}}});
        let err = validate_create(&org, &profile, &payload).unwrap_err();
        let ApiError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].param, "data.type");
        assert_eq!(errors[0].value, None);
        assert_eq!(errors[1].param, "data.attributes.sampleId");
        assert_eq!(errors[2].param, "data.attributes.resultType");
    }

    #[test]
    fn create_collects_path_and_body_failures_together() {
        let payload = json!({
            "data": {
                "type": "sample",
                "attributes": {"sampleId": "", "resultType": "blood"}
            }
        });
        let err = validate_create("bad-org", &Uuid::new_v4().to_string(), &payload).unwrap_err();
        let ApiError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].param, "org");
        assert_eq!(errors[1].param, "data.attributes.sampleId");
        assert_eq!(errors[1].value.as_deref(), Some(""));
    }

    #[test]
    fn create_echoes_non_string_type_as_json() {
        let org = Uuid::new_v4().to_string();
        let profile = Uuid::new_v4().to_string();
        let payload = json!({
            "data": {
                "type": 7,
                "attributes": {"sampleId": "s-1", "resultType": "blood"}
            }
        });
        let err = validate_create(&org, &profile, &payload).unwrap_err();
        let ApiError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors[0].value.as_deref(), Some("7"));
    }
}
