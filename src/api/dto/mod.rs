//! Data Transfer Objects for REST request/response serialization.
//!
//! DTOs mirror domain types at the presentation boundary; monetary
//! values are exposed both as plain numbers and, where the UI shows
//! them, as formatted currency strings.

pub mod event_dto;
pub mod user_dto;
pub mod wager_dto;

pub use event_dto::*;
pub use user_dto::*;
pub use wager_dto::*;

#[cfg(test)]
mod tests {
    use utoipa::PartialSchema;

    use super::*;
    use crate::domain::money::RawAmount;

    #[test]
    fn request_bodies_build_openapi_schemas() {
        // Every type named as a request_body in a path annotation must
        // carry a schema, or the path macros fail to expand.
        let _ = PlaceWagerRequest::schema();
        let _ = ToggleRequest::schema();
        let _ = ResolveRequest::schema();
        let _ = ResetRequest::schema();
        let _ = AdminActionRequest::schema();
        let _ = RawAmount::schema();
    }
}
