//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every Q&A endpoint, the health probes, the domain
//! error schema wrappers, and two security schemes: `bearer` for the
//! `authorization` header on protected endpoints and `basic` for sign-in.
//!
//! Swagger UI serves the document in debug builds; `openapi-dump` prints it
//! for external tooling.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{Http, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the security schemes referenced by the paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let bearer = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .description(Some(
                "Access token returned in the access-token header by POST /user/signin.",
            ))
            .build();
        components.add_security_scheme("bearer", SecurityScheme::Http(bearer));
        components.add_security_scheme(
            "basic",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Quora backend API",
        description = "Questions, answers, and account management over bearer-token sessions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("bearer" = [])),
    paths(
        crate::inbound::http::users::signup,
        crate::inbound::http::users::signin,
        crate::inbound::http::users::signout,
        crate::inbound::http::profile::user_profile,
        crate::inbound::http::admin::delete_user,
        crate::inbound::http::questions::create_question,
        crate::inbound::http::questions::all_questions,
        crate::inbound::http::questions::edit_question,
        crate::inbound::http::questions::delete_question,
        crate::inbound::http::questions::questions_by_user,
        crate::inbound::http::answers::create_answer,
        crate::inbound::http::answers::edit_answer,
        crate::inbound::http::answers::delete_answer,
        crate::inbound::http::answers::answers_to_question,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "users", description = "Signup, sign-in, and profiles"),
        (name = "admin", description = "Administrative operations"),
        (name = "questions", description = "Asking and curating questions"),
        (name = "answers", description = "Answering questions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    #[rstest]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(ERROR_SCHEMA_NAME).expect("Error schema") {
            RefOr::T(Schema::Object(obj)) => {
                for field in ["code", "message", "traceId", "details"] {
                    assert!(obj.properties.contains_key(field), "missing {field}");
                }
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/admin/user/{userId}")]
    #[case("/user/signup")]
    #[case("/user/signin")]
    #[case("/question/{questionId}/answer/create")]
    #[case("/answer/all/{questionId}")]
    #[case("/health/ready")]
    fn documents_the_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    #[case("/admin/user/{userId}", "delete", "403")]
    #[case("/question/create", "post", "400")]
    #[case("/answer/edit/{answerId}", "put", "404")]
    #[case("/userprofile/{userId}", "get", "403")]
    fn failure_responses_reference_the_error_schema(
        #[case] path: &str,
        #[case] method: &str,
        #[case] status: &str,
    ) {
        let doc = serde_json::to_value(ApiDoc::openapi()).expect("document serialises");
        let schema = &doc["paths"][path][method]["responses"][status]["content"]
            ["application/json"]["schema"]["$ref"];
        assert_eq!(
            schema.as_str(),
            Some(format!("#/components/schemas/{ERROR_SCHEMA_NAME}").as_str()),
            "{method} {path} {status}"
        );
    }

    #[rstest]
    fn registers_both_security_schemes() {
        let doc = ApiDoc::openapi();
        let schemes = &doc.components.as_ref().expect("components").security_schemes;
        assert!(schemes.contains_key("bearer"));
        assert!(schemes.contains_key("basic"));
    }
}
