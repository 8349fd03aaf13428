//! Verification checks.
//!
//! Each check fetches one response, optionally runs it through the
//! compatibility routines, and reports a named verdict. A failing check never
//! stops the run; only a response source error does.
//!
//! Raw mode asserts legacy expectations directly against v2 payloads. Against
//! a v2 service those checks are expected to fail, which documents exactly how
//! the upgrade breaks old clients. Compat mode asserts the same expectations
//! after translation and is expected to pass.

use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use orderbridge_client::{Error, ResponseSource};
use orderbridge_core::{normalize, translate_document, Classifier};
use orderbridge_proto::vocab::{
    is_legacy_date, legacy, modern, UNKNOWN_PRODUCT, V1_ORDERS_PATH, V2_ORDERS_PATH,
};
use orderbridge_proto::{ApiRequest, ApiResponse, HealthSignal, LegacyStatus};

/// Which check suite to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Assert legacy expectations against raw v2 payloads
    Raw,
    /// Assert legacy expectations after compatibility translation
    Compat,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Raw => write!(f, "raw"),
            Mode::Compat => write!(f, "compat"),
        }
    }
}

/// Verdict of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// Check name.
    pub name: String,
    /// Whether the check passed.
    pub ok: bool,
    /// Explanation, empty when there is nothing to add.
    pub details: String,
}

impl CheckResult {
    fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ok: true,
            details: String::new(),
        }
    }

    fn fail(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ok: false,
            details: details.into(),
        }
    }
}

/// Everything a check needs.
pub struct CheckContext<'a> {
    source: &'a dyn ResponseSource,
    classifier: Classifier,
}

impl<'a> CheckContext<'a> {
    /// Create a context over a response source.
    pub fn new(source: &'a dyn ResponseSource, classifier: Classifier) -> Self {
        Self { source, classifier }
    }

    async fn fetch(&self, request: ApiRequest) -> Result<ApiResponse, Error> {
        self.source.fetch(&request).await
    }
}

fn order_request(user_id: &str) -> ApiRequest {
    ApiRequest::get(V2_ORDERS_PATH).with_query("userId", user_id)
}

/// Order without line items.
fn basic_order() -> ApiRequest {
    order_request("123")
}

/// Shipped order with line items.
fn itemized_order() -> ApiRequest {
    order_request("789").with_query("includeItems", "true")
}

/// Order in a state the legacy enum does not know.
fn new_state_order() -> ApiRequest {
    order_request("555").with_query("includeItems", "false")
}

/// Order whose customer has no email.
fn emailless_order() -> ApiRequest {
    order_request("888")
}

/// Request rejected with the modern error envelope.
fn invalid_order() -> ApiRequest {
    order_request("invalid")
}

/// Request against the retired v1 endpoint.
fn v1_order() -> ApiRequest {
    ApiRequest::get(V1_ORDERS_PATH).with_query("userId", "999")
}

fn expect_status(name: &str, response: &ApiResponse, status: u16) -> Option<CheckResult> {
    (response.status != status).then(|| {
        CheckResult::fail(
            format!("{}: expected {}", name, status),
            format!("got {}", response.status),
        )
    })
}

/// Run every check of a suite, in order.
pub async fn run_checks(ctx: &CheckContext<'_>, mode: Mode) -> Result<Vec<CheckResult>, Error> {
    let mut results = Vec::new();

    match mode {
        Mode::Raw => {
            results.push(raw_items_present(ctx).await?);
            results.push(raw_state_enum_safe(ctx).await?);
            results.push(raw_customer_flat(ctx).await?);
            results.push(raw_amount_numeric(ctx).await?);
            results.push(raw_created_at_simple_date(ctx).await?);
            results.push(raw_error_single(ctx).await?);
            results.push(error_format_normalized(ctx).await?);
            results.push(v1_deprecation_not_outage(ctx).await?);
        }
        Mode::Compat => {
            results.push(nested_customer_flattened(ctx).await?);
            results.push(amount_object_converted(ctx).await?);
            results.push(legacy_shape_produced(ctx).await?);
            results.push(missing_items_get_placeholder(ctx).await?);
            results.push(missing_email_tolerated(ctx).await?);
            results.push(unknown_state_downgraded(ctx).await?);
            results.push(error_format_normalized(ctx).await?);
            results.push(v1_deprecation_not_outage(ctx).await?);
        }
    }

    for result in &results {
        info!(check = %result.name, ok = result.ok, "check finished");
    }

    Ok(results)
}

// Raw suite

async fn raw_items_present(ctx: &CheckContext<'_>) -> Result<CheckResult, Error> {
    let response = ctx.fetch(basic_order()).await?;
    if let Some(failed) = expect_status("raw v2", &response, 200) {
        return Ok(failed);
    }

    let non_empty = response
        .body
        .get(legacy::ITEMS)
        .and_then(Value::as_array)
        .is_some_and(|items| !items.is_empty());
    if !non_empty {
        return Ok(CheckResult::fail(
            "raw v2 fails legacy: missing or empty items",
            "items missing or empty",
        ));
    }
    Ok(CheckResult::pass("raw v2 provides expected legacy items"))
}

async fn raw_state_enum_safe(ctx: &CheckContext<'_>) -> Result<CheckResult, Error> {
    let response = ctx.fetch(new_state_order()).await?;
    if let Some(failed) = expect_status("raw v2 enum", &response, 200) {
        return Ok(failed);
    }

    match response.body.get(modern::STATE).and_then(Value::as_str) {
        None | Some("") => Ok(CheckResult::fail("raw v2: state missing", "no state")),
        Some(state) if LegacyStatus::parse(state).is_none() => Ok(CheckResult::fail(
            "raw v2 fails legacy enum: new state detected",
            format!("state={}", state),
        )),
        Some(_) => Ok(CheckResult::pass("raw v2 provides legacy-safe enum value")),
    }
}

async fn raw_customer_flat(ctx: &CheckContext<'_>) -> Result<CheckResult, Error> {
    let response = ctx.fetch(basic_order()).await?;
    if let Some(failed) = expect_status("raw v2 nested", &response, 200) {
        return Ok(failed);
    }

    match response.body.get(modern::CUSTOMER) {
        Some(customer) if customer.is_object() => Ok(CheckResult::fail(
            "raw v2 nested customer not flat as expected",
            format!("customer={}", customer),
        )),
        _ => Ok(CheckResult::pass("raw v2 customer is flat")),
    }
}

async fn raw_amount_numeric(ctx: &CheckContext<'_>) -> Result<CheckResult, Error> {
    let response = ctx.fetch(new_state_order()).await?;
    if let Some(failed) = expect_status("raw v2 amount", &response, 200) {
        return Ok(failed);
    }

    match response.body.get(modern::AMOUNT) {
        Some(amount) if amount.is_object() => Ok(CheckResult::fail(
            "raw v2 amount is object, not numeric",
            format!("amount={}", amount),
        )),
        _ => Ok(CheckResult::pass("raw v2 amount is numeric")),
    }
}

async fn raw_created_at_simple_date(ctx: &CheckContext<'_>) -> Result<CheckResult, Error> {
    let response = ctx.fetch(basic_order()).await?;
    if let Some(failed) = expect_status("raw v2 createdAt", &response, 200) {
        return Ok(failed);
    }

    match response.body.get(modern::CREATED_AT).and_then(Value::as_str) {
        Some(created) if !is_legacy_date(created) => Ok(CheckResult::fail(
            "raw v2 createdAt is not YYYY-MM-DD",
            format!("createdAt={}", created),
        )),
        _ => Ok(CheckResult::pass("raw v2 createdAt is a simple date")),
    }
}

async fn raw_error_single(ctx: &CheckContext<'_>) -> Result<CheckResult, Error> {
    let response = ctx.fetch(invalid_order()).await?;
    if let Some(failed) = expect_status("raw v2 error", &response, 400) {
        return Ok(failed);
    }

    match response.body.get(modern::ERRORS) {
        Some(errors) if errors.is_array() => Ok(CheckResult::fail(
            "raw v2 uses errors array",
            format!("errors={}", errors),
        )),
        _ => Ok(CheckResult::pass("raw v2 error is a single envelope")),
    }
}

// Compat suite

async fn nested_customer_flattened(ctx: &CheckContext<'_>) -> Result<CheckResult, Error> {
    const NAME: &str = "nested structure";
    let response = ctx.fetch(basic_order()).await?;
    if let Some(failed) = expect_status(NAME, &response, 200) {
        return Ok(failed);
    }

    if !response.body.get(modern::CUSTOMER).is_some_and(Value::is_object) {
        return Ok(CheckResult::fail(
            "nested structure: v2 should have nested customer",
            format!("body={}", response.body),
        ));
    }

    let doc = translate_document(&response.body).to_document();
    if doc.get(modern::CUSTOMER).is_some() {
        return Ok(CheckResult::fail(
            "nested structure: legacy should not have nested customer",
            format!("legacy={}", doc),
        ));
    }
    if doc.get(legacy::CUSTOMER_ID).is_none() || doc.get(legacy::CUSTOMER_NAME).is_none() {
        return Ok(CheckResult::fail(
            "nested structure: missing flattened fields",
            format!("legacy={}", doc),
        ));
    }
    Ok(CheckResult::pass("nested structure flattened correctly"))
}

async fn amount_object_converted(ctx: &CheckContext<'_>) -> Result<CheckResult, Error> {
    const NAME: &str = "type change";
    let response = ctx.fetch(new_state_order()).await?;
    if let Some(failed) = expect_status(NAME, &response, 200) {
        return Ok(failed);
    }

    if !response.body.get(modern::AMOUNT).is_some_and(Value::is_object) {
        return Ok(CheckResult::fail(
            "type change: v2 should have amount as object",
            format!("amount={:?}", response.body.get(modern::AMOUNT)),
        ));
    }

    let doc = translate_document(&response.body).to_document();
    if !doc.get(legacy::TOTAL_PRICE).is_some_and(Value::is_number) {
        return Ok(CheckResult::fail(
            "type change: totalPrice should be numeric",
            format!("totalPrice={:?}", doc.get(legacy::TOTAL_PRICE)),
        ));
    }
    Ok(CheckResult::pass(
        "type change: amount object converted to totalPrice float",
    ))
}

async fn legacy_shape_produced(ctx: &CheckContext<'_>) -> Result<CheckResult, Error> {
    let response = ctx.fetch(itemized_order()).await?;
    if let Some(failed) = expect_status("compat mapping", &response, 200) {
        return Ok(failed);
    }

    let doc = translate_document(&response.body).to_document();
    Ok(match legacy_shape_violation(&doc) {
        Some((name, details)) => CheckResult::fail(format!("compat mapping: {}", name), details),
        None => CheckResult::pass("compat mapping produces legacy-safe shape"),
    })
}

/// First way `doc` breaks a legacy consumer, as `(name, details)`.
fn legacy_shape_violation(doc: &Value) -> Option<(&'static str, String)> {
    let missing: Vec<&str> = legacy::REQUIRED_ORDER_KEYS
        .iter()
        .copied()
        .filter(|key| doc.get(key).is_none())
        .collect();
    if !missing.is_empty() {
        return Some(("required fields missing", format!("missing={:?}", missing)));
    }

    let items = match doc[legacy::ITEMS].as_array() {
        Some(items) if !items.is_empty() => items,
        _ => {
            return Some((
                "items must be non-empty list",
                format!("items={}", doc[legacy::ITEMS]),
            ))
        }
    };

    let item0 = &items[0];
    if item0.get(legacy::ITEM_PRODUCT_NAME).is_none() || item0.get(legacy::ITEM_QTY).is_none() {
        return Some(("items shape invalid", format!("item0={}", item0)));
    }

    let status = &doc[legacy::STATUS];
    if !status.as_str().is_some_and(|s| LegacyStatus::parse(s).is_some()) {
        return Some(("status must be legacy enum-safe", format!("status={}", status)));
    }

    let customer_id = &doc[legacy::CUSTOMER_ID];
    if !customer_id.as_str().is_some_and(|s| !s.is_empty()) {
        return Some((
            "customerId must be non-empty string",
            format!("customerId={}", customer_id),
        ));
    }

    let total_price = &doc[legacy::TOTAL_PRICE];
    if !total_price.is_number() {
        return Some((
            "totalPrice must be numeric",
            format!("totalPrice={}", total_price),
        ));
    }

    let created_at = &doc[legacy::CREATED_AT];
    if !created_at.as_str().is_some_and(is_legacy_date) {
        return Some((
            "createdAt must be YYYY-MM-DD",
            format!("createdAt={}", created_at),
        ));
    }

    None
}

async fn missing_items_get_placeholder(ctx: &CheckContext<'_>) -> Result<CheckResult, Error> {
    const NAME: &str = "placeholder items";
    let response = ctx.fetch(basic_order()).await?;
    if let Some(failed) = expect_status(NAME, &response, 200) {
        return Ok(failed);
    }

    if response.body.get(modern::LINE_ITEMS).is_some() {
        return Ok(CheckResult::fail(
            "placeholder items: v2 order should omit lineItems",
            format!("lineItems={}", response.body[modern::LINE_ITEMS]),
        ));
    }

    let legacy = translate_document(&response.body);
    match legacy.items.as_slice() {
        [only] if only.product_name == UNKNOWN_PRODUCT && only.qty == 0 => Ok(CheckResult::pass(
            "placeholder items: missing lineItems yields one placeholder item",
        )),
        items => Ok(CheckResult::fail(
            "placeholder items: expected a single placeholder item",
            format!("items={:?}", items),
        )),
    }
}

async fn missing_email_tolerated(ctx: &CheckContext<'_>) -> Result<CheckResult, Error> {
    const NAME: &str = "missing email";
    let response = ctx.fetch(emailless_order()).await?;
    if let Some(failed) = expect_status(NAME, &response, 200) {
        return Ok(failed);
    }

    let doc = translate_document(&response.body).to_document();
    if doc.get(modern::CUSTOMER_EMAIL).is_some() {
        return Ok(CheckResult::fail(
            "missing email: legacy should not carry email",
            format!("legacy={}", doc),
        ));
    }

    let expected_id = response.body[modern::CUSTOMER][modern::CUSTOMER_ID].clone();
    if doc[legacy::CUSTOMER_ID] != expected_id {
        return Ok(CheckResult::fail(
            "missing email: customerId not preserved",
            format!("expected={} got={}", expected_id, doc[legacy::CUSTOMER_ID]),
        ));
    }
    Ok(CheckResult::pass(
        "missing email: customer without email flattened",
    ))
}

async fn unknown_state_downgraded(ctx: &CheckContext<'_>) -> Result<CheckResult, Error> {
    const NAME: &str = "enum downgrade";
    let response = ctx.fetch(new_state_order()).await?;
    if let Some(failed) = expect_status(NAME, &response, 200) {
        return Ok(failed);
    }

    let state = response
        .body
        .get(modern::STATE)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let status = translate_document(&response.body).status;

    let expected = LegacyStatus::parse(&state).unwrap_or(LegacyStatus::FALLBACK);
    if status != expected {
        return Ok(CheckResult::fail(
            "enum downgrade: unexpected legacy status",
            format!("state={} status={} expected={}", state, status, expected),
        ));
    }
    Ok(CheckResult {
        name: "enum downgrade: legacy status is enum-safe".to_string(),
        ok: true,
        details: format!("state={} -> status={}", state, status),
    })
}

// Shared

async fn error_format_normalized(ctx: &CheckContext<'_>) -> Result<CheckResult, Error> {
    const NAME: &str = "error format";
    let response = ctx.fetch(invalid_order()).await?;
    if let Some(failed) = expect_status(NAME, &response, 400) {
        return Ok(failed);
    }

    if !response.body.get(modern::ERRORS).is_some_and(Value::is_array) {
        return Ok(CheckResult::fail(
            "error format: v2 should have errors array",
            format!("body={}", response.body),
        ));
    }

    let normalized = normalize(response.status, &response.body).to_document();
    if normalized.get(legacy::ERROR).is_none() || normalized.get(legacy::MESSAGE).is_none() {
        return Ok(CheckResult::fail(
            "error format: normalized should have error/message",
            format!("normalized={}", normalized),
        ));
    }
    if normalized.get(modern::ERRORS).is_some() {
        return Ok(CheckResult::fail(
            "error format: normalized should not have errors array",
            format!("normalized={}", normalized),
        ));
    }
    Ok(CheckResult::pass("error format normalized to v1 structure"))
}

async fn v1_deprecation_not_outage(ctx: &CheckContext<'_>) -> Result<CheckResult, Error> {
    let response = ctx.fetch(v1_order()).await?;
    let signal = ctx.classifier.classify(response.status, &response.body);

    if signal != HealthSignal::Deprecated {
        return Ok(CheckResult::fail(
            "monitoring: v1 deprecation must not be outage",
            format!(
                "classification={}, status={}, body={}",
                signal, response.status, response.body
            ),
        ));
    }
    Ok(CheckResult::pass(
        "monitoring: v1 deprecation classified as DEPRECATED",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderbridge_client::FixtureSource;
    use orderbridge_core::DeprecationPolicy;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn names(results: &[CheckResult]) -> Vec<(&str, bool)> {
        results.iter().map(|r| (r.name.as_str(), r.ok)).collect()
    }

    #[tokio::test]
    async fn test_raw_mode_shows_legacy_breakage() {
        let source = FixtureSource::embedded().unwrap();
        let ctx = CheckContext::new(&source, Classifier::default());

        let results = run_checks(&ctx, Mode::Raw).await.unwrap();

        assert_eq!(
            names(&results),
            vec![
                ("raw v2 fails legacy: missing or empty items", false),
                ("raw v2 fails legacy enum: new state detected", false),
                ("raw v2 nested customer not flat as expected", false),
                ("raw v2 amount is object, not numeric", false),
                ("raw v2 createdAt is not YYYY-MM-DD", false),
                ("raw v2 uses errors array", false),
                ("error format normalized to v1 structure", true),
                ("monitoring: v1 deprecation classified as DEPRECATED", true),
            ]
        );
        assert_eq!(results[1].details, "state=FULFILLED");
    }

    #[tokio::test]
    async fn test_compat_mode_passes() {
        let source = FixtureSource::embedded().unwrap();
        let ctx = CheckContext::new(&source, Classifier::default());

        let results = run_checks(&ctx, Mode::Compat).await.unwrap();

        assert_eq!(results.len(), 8);
        for result in &results {
            assert!(result.ok, "{} failed: {}", result.name, result.details);
        }
        assert_eq!(results[5].details, "state=FULFILLED -> status=PAID");
    }

    #[tokio::test]
    async fn test_failed_check_does_not_abort_run() {
        let mut cases = FixtureSource::embedded().unwrap().cases().to_vec();
        for case in &mut cases {
            if case.request.path == V1_ORDERS_PATH {
                case.response =
                    ApiResponse::new(503, json!({"error": "UNAVAILABLE", "message": "down"}));
            }
        }
        let source = FixtureSource::new(cases);
        let ctx = CheckContext::new(&source, Classifier::default());

        let results = run_checks(&ctx, Mode::Compat).await.unwrap();

        assert_eq!(results.len(), 8);
        let last = results.last().unwrap();
        assert!(!last.ok);
        assert!(last.details.contains("classification=OUTAGE"));
        assert!(results[..7].iter().all(|r| r.ok));
    }

    #[tokio::test]
    async fn test_bare_gone_depends_on_policy() {
        let mut cases = FixtureSource::embedded().unwrap().cases().to_vec();
        for case in &mut cases {
            if case.request.path == V1_ORDERS_PATH {
                case.response = ApiResponse::new(410, json!({}));
            }
        }
        let source = FixtureSource::new(cases);

        let strict = CheckContext::new(&source, Classifier::new(DeprecationPolicy::RequireSentinel));
        assert!(!v1_deprecation_not_outage(&strict).await.unwrap().ok);

        let lenient = CheckContext::new(&source, Classifier::new(DeprecationPolicy::AnyGone));
        assert!(v1_deprecation_not_outage(&lenient).await.unwrap().ok);
    }

    #[tokio::test]
    async fn test_source_error_is_fatal() {
        let source = FixtureSource::default();
        let ctx = CheckContext::new(&source, Classifier::default());

        let err = run_checks(&ctx, Mode::Compat).await.unwrap_err();
        assert!(matches!(err, Error::NoFixture { .. }));
    }

    #[test]
    fn test_legacy_shape_violation() {
        let good = json!({
            "orderId": "O", "status": "PAID", "totalPrice": 1.0, "customerId": "C",
            "customerName": "N", "createdAt": "2024-01-01",
            "items": [{"productName": "P", "qty": 1}]
        });
        assert_eq!(legacy_shape_violation(&good), None);

        let mut bad = good.clone();
        bad["status"] = json!("FULFILLED");
        assert_eq!(
            legacy_shape_violation(&bad).map(|(name, _)| name),
            Some("status must be legacy enum-safe")
        );

        let mut bad = good.clone();
        bad["items"] = json!([]);
        assert_eq!(
            legacy_shape_violation(&bad).map(|(name, _)| name),
            Some("items must be non-empty list")
        );

        let mut bad = good;
        bad["createdAt"] = json!("2024-01-01T00:00:00Z");
        assert_eq!(
            legacy_shape_violation(&bad).map(|(name, _)| name),
            Some("createdAt must be YYYY-MM-DD")
        );
    }
}
