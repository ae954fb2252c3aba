//! Registry Tests
//!
//! Exercises the handlers directly with an in-process table; the HTTP layer
//! adds nothing beyond routing.

#[cfg(test)]
mod tests {
    use crate::registry::handlers::{handle_lookup, handle_register};
    use crate::registry::protocol::RegisterRequest;
    use crate::registry::RegistryTable;
    use axum::extract::{Extension, Path};
    use axum::http::StatusCode;
    use axum::Json;
    use std::sync::Arc;

    #[tokio::test]
    async fn register_then_lookup_returns_address() {
        let table = Arc::new(RegistryTable::new());

        let (status, _) = handle_register(
            Extension(table.clone()),
            Json(RegisterRequest {
                name: "log-collector".to_string(),
                address: "http://10.0.0.5:7000".to_string(),
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let found = handle_lookup(
            Extension(table.clone()),
            Path("log-collector".to_string()),
        )
        .await
        .expect("lookup should succeed");
        assert_eq!(found.0.address, "http://10.0.0.5:7000");
    }

    #[tokio::test]
    async fn lookup_of_unknown_name_is_not_found() {
        let table = Arc::new(RegistryTable::new());

        let result =
            handle_lookup(Extension(table), Path("nobody".to_string())).await;
        assert_eq!(result.err(), Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn re_registration_overwrites_previous_address() {
        let table = Arc::new(RegistryTable::new());

        for address in ["http://old:1", "http://new:2"] {
            handle_register(
                Extension(table.clone()),
                Json(RegisterRequest {
                    name: "log-collector".to_string(),
                    address: address.to_string(),
                }),
            )
            .await;
        }

        let found = handle_lookup(
            Extension(table),
            Path("log-collector".to_string()),
        )
        .await
        .expect("lookup should succeed");
        assert_eq!(found.0.address, "http://new:2");
    }
}
