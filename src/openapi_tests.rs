#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::OpenApi;
    use utoipa::openapi::{PathItemType, RefOr, schema::Schema};

    fn object_properties(name: &str) -> Vec<String> {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.expect("components are generated");
        match components.schemas.get(name) {
            Some(RefOr::T(Schema::Object(obj))) => obj.properties.keys().cloned().collect(),
            _ => panic!("{} should be an object schema", name),
        }
    }

    #[test]
    fn test_openapi_document_serializes() {
        let openapi = ApiDoc::openapi();

        let json = serde_json::to_string(&openapi).unwrap();
        assert!(json.contains("Socialite API"));
        assert!(!json.contains("crate::schemas::ErrorResponse"));
    }

    #[test]
    fn test_error_response_schema_structure() {
        let properties = object_properties("ErrorResponse");
        for field in ["error", "code", "success"] {
            assert!(properties.iter().any(|p| p == field), "missing {}", field);
        }
    }

    #[test]
    fn test_user_schema_has_counts_but_no_password() {
        let properties = object_properties("UserDto");

        assert!(properties.iter().any(|p| p == "n_followers"));
        assert!(properties.iter().any(|p| p == "n_following"));
        assert!(properties.iter().any(|p| p == "email"));
        assert!(!properties.iter().any(|p| p == "password"));
    }

    #[test]
    fn test_every_route_is_documented() {
        let openapi = ApiDoc::openapi();
        let paths = &openapi.paths.paths;

        let expected = [
            ("/health", PathItemType::Get, "GET"),
            ("/api/v1/users", PathItemType::Get, "GET"),
            ("/api/v1/users", PathItemType::Post, "POST"),
            ("/api/v1/users/{user_id}", PathItemType::Get, "GET"),
            ("/api/v1/users/{user_id}", PathItemType::Put, "PUT"),
            ("/api/v1/users/{user_id}", PathItemType::Delete, "DELETE"),
            ("/api/v1/users/{user_id}/followers", PathItemType::Get, "GET"),
            ("/api/v1/users/{user_id}/following", PathItemType::Get, "GET"),
            ("/api/v1/users/{user_id}/follow-counts", PathItemType::Get, "GET"),
            ("/api/v1/users/{user_id}/following/{target_id}", PathItemType::Put, "PUT"),
            ("/api/v1/users/{user_id}/following/{target_id}", PathItemType::Delete, "DELETE"),
        ];

        for (path, method, label) in expected {
            let item = paths
                .get(path)
                .unwrap_or_else(|| panic!("{} is not documented", path));
            assert!(
                item.operations.contains_key(&method),
                "{} has no {} operation",
                path,
                label
            );
        }
    }

    #[test]
    fn test_create_user_documents_conflict() {
        let openapi = ApiDoc::openapi();
        let users = openapi.paths.paths.get("/api/v1/users").unwrap();
        let post = users.operations.get(&PathItemType::Post).unwrap();

        for status in ["201", "400", "409"] {
            assert!(post.responses.responses.contains_key(status));
        }
    }
}
