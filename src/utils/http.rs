/*---------- Imports ----------*/
use lambda_http::{http, Body, Response};

/*---------- Constants ----------*/
pub const SUCCESS_MESSAGE: &str = "Successfully inserted data!";

pub struct HttpResponse;

impl HttpResponse {
    /// `{"message": ...}` with a space after the colon, as existing clients receive it.
    pub fn message_body(message: &str) -> String {
        let encoded = serde_json::Value::from(message).to_string();

        format!("{{\"message\": {}}}", encoded)
    }

    pub fn build_success_response(message: &str) -> Result<Response<Body>, http::Error> {
        Response::builder()
            .status(200)
            .header("Content-Type", "application/json")
            .body(Body::Text(Self::message_body(message)))
    }
}
