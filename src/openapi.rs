use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storium API",
        version = "1.0.0",
        description = r#"
# Storium Warehouse Management API

Backend API for warehouse management: locations, depots, aisles, racks,
slot-addressed stock placement, transaction history, and alerting.

## Rack addressing

Racks are subdivided into levels, bays and bins per bay. Single-faced racks
expose one direction (`R`); double-faced racks expose two (`R` and `L`).
Every slot is uniquely addressed by `(direction, level, bay, bin)` and holds
at most one stock placement.

## Error handling

Failures return an error payload with the HTTP status category and a
human-readable message:

```json
{
  "error": "Conflict",
  "message": "Slot R-L1-B1-P1 already holds a stock placement",
  "timestamp": "2025-06-02T10:30:00Z"
}
```

## Pagination

List endpoints support `page`, `per_page` (max 100) and `search` query
parameters and return a `pagination` object alongside the data.
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:3001/api/v1", description = "Local development")
    ),
    tags(
        (name = "Racks", description = "Rack layout and slot addressing"),
        (name = "Stocks", description = "Stock placement and movement")
    ),
    paths(
        // Rack layout
        crate::handlers::racks::get_rack_layout,

        // Stock placement and movement
        crate::handlers::stocks::create_stock,
        crate::handlers::stocks::get_stock,
        crate::handlers::stocks::move_stock,
        crate::handlers::stocks::migrate_stock,
        crate::handlers::stocks::consume_stock,
    ),
    components(
        schemas(
            // Common types
            crate::ApiResponse<serde_json::Value>,
            crate::PaginatedResponse<serde_json::Value>,

            // Entity records
            crate::entities::rack::Model,
            crate::entities::slot::Model,
            crate::entities::stock::Model,

            // Layout types
            crate::layout::RackFace,
            crate::layout::Direction,
            crate::layout::RackConfig,
            crate::services::racks::RackLayout,
            crate::services::racks::LayoutDescriptor,
            crate::services::racks::SlotView,

            // Stock types
            crate::handlers::stocks::CreateStockRequest,
            crate::handlers::stocks::UpdateStockRequest,
            crate::handlers::stocks::MoveStockRequest,
            crate::handlers::stocks::DrawdownRequest,
            crate::handlers::stocks::OutflowRequest,
            crate::services::stocks::StockDetails,
            crate::services::stocks::DrawdownResult,
            crate::entities::stock::StockStrategy,
            crate::entities::stock::StockProductType,

            // Error types
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
