//! Interactive API documentation: an OpenAPI document and a Swagger UI page.

use axum::response::{Html, Redirect};
use axum::Json;
use serde_json::{json, Value};

pub const SPEC_PATH: &str = "/docs.json";
pub const UI_PATH: &str = "/docs/";

const SWAGGER_UI_VERSION: &str = "5.17.14";

/// `GET /docs.json`
pub async fn spec() -> Json<Value> {
    Json(openapi())
}

/// `GET /docs/`
pub async fn ui() -> Html<String> {
    Html(format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>API Documentation for Text Processing</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@{v}/swagger-ui.css">
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@{v}/swagger-ui-bundle.js"></script>
  <script>
    window.ui = SwaggerUIBundle({{ url: "{spec}", dom_id: "#swagger-ui" }});
  </script>
</body>
</html>
"##,
        v = SWAGGER_UI_VERSION,
        spec = SPEC_PATH,
    ))
}

/// `GET /docs`
pub async fn redirect() -> Redirect {
    Redirect::permanent(UI_PATH)
}

/// OpenAPI 3 description of the public endpoints.
pub fn openapi() -> Value {
    let envelope = |data: Value| {
        json!({
            "type": "object",
            "required": ["status_code", "description", "data"],
            "properties": {
                "status_code": { "type": "integer" },
                "description": { "type": "string" },
                "data": data
            }
        })
    };
    let error_response = json!({
        "description": "Invalid input",
        "content": { "application/json": { "schema": envelope(json!({ "nullable": true })) } }
    });

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "API Documentation for Text Processing",
            "description": "Cleanses informal Indonesian tweets: lowercasing, noise removal, \
                            profanity removal, slang normalization and stopword removal. \
                            Accepts a single text or a CSV file.",
            "version": env!("CARGO_PKG_VERSION")
        },
        "paths": {
            "/": {
                "get": {
                    "summary": "Service description",
                    "responses": {
                        "200": {
                            "description": "Service description",
                            "content": { "application/json": { "schema": envelope(json!({ "type": "string" })) } }
                        }
                    }
                }
            },
            "/text-processing": {
                "post": {
                    "summary": "Cleanse a single text",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/x-www-form-urlencoded": {
                                "schema": {
                                    "type": "object",
                                    "required": ["text"],
                                    "properties": { "text": { "type": "string" } }
                                }
                            },
                            "multipart/form-data": {
                                "schema": {
                                    "type": "object",
                                    "required": ["text"],
                                    "properties": { "text": { "type": "string" } }
                                }
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": "Cleansed text",
                            "content": { "application/json": { "schema": envelope(json!({ "type": "string" })) } }
                        },
                        "400": error_response.clone()
                    }
                }
            },
            "/text-processing-file": {
                "post": {
                    "summary": "Cleanse every row of a CSV file",
                    "description": "The file must have a header row with a `Tweet` column. \
                                    It is decoded as Latin-1. Results keep the row order.",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "multipart/form-data": {
                                "schema": {
                                    "type": "object",
                                    "required": ["file"],
                                    "properties": { "file": { "type": "string", "format": "binary" } }
                                }
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": "Cleansed rows in file order",
                            "content": {
                                "application/json": {
                                    "schema": envelope(json!({ "type": "array", "items": { "type": "string" } }))
                                }
                            }
                        },
                        "400": error_response
                    }
                }
            }
        }
    })
}
