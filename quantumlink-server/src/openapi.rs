//! OpenAPI documentation configuration
//!
//! Generates OpenAPI 3.0 specification for the QuantumLink API.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error::ErrorBody;
use crate::handlers::{
    DecodeRequest, DecodeResponse, EncodeOptionsRequest, EncodeRequest, EncodeResponse,
    HealthResponse, MetricsRecord, PackageDetailResponse, PackageListResponse, PackageRecord,
    PackageStatus, PackageSummary, ReadyResponse,
};

/// QuantumLink API - OpenAPI Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "QuantumLink API",
        version = "0.1.0",
        description = r#"
## Quantum Messaging API

QuantumLink turns text messages into **quantum packages** and decodes them
back from measurement results.

### How It Works

1. **Encode** a message via `POST /api/v1/encode` and keep the returned `package_id`
2. **Decode** it via `POST /api/v1/decode` with your measurement records
3. Browse your packages via `GET /api/v1/packages`

Every `/api/v1` endpoint requires a bearer token in the `Authorization`
header. JSON requests may carry it in an `auth_token` body field instead.
Packages are private to the user who encoded them.

Successful responses use the envelope `{status: "success", message, data}`;
errors use `{status: "error", message, code, details?}`.
"#,
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    tags(
        (name = "Messages", description = "Encode messages into packages and decode them"),
        (name = "Packages", description = "Browse the caller's packages"),
        (name = "Health", description = "Service health and readiness endpoints")
    ),
    paths(
        crate::handlers::health::health,
        crate::handlers::health::ready,
        crate::handlers::encode::encode_handler,
        crate::handlers::decode::decode_handler,
        crate::handlers::packages::list_packages_handler,
        crate::handlers::packages::get_package_handler,
    ),
    components(
        schemas(
            HealthResponse,
            ReadyResponse,
            EncodeRequest,
            EncodeOptionsRequest,
            EncodeResponse,
            DecodeRequest,
            DecodeResponse,
            MetricsRecord,
            PackageStatus,
            PackageSummary,
            PackageListResponse,
            PackageRecord,
            PackageDetailResponse,
            ErrorBody,
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Registers the `bearer_token` scheme referenced by protected paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_token",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}
