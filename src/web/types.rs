// src/web/types.rs
use rocket::http::{ContentType, Status};
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::{Request, Response};

pub struct PdfResponse {
    pub data: Vec<u8>,
    pub filename: Option<String>,
}

impl PdfResponse {
    pub fn with_filename(data: Vec<u8>, filename: String) -> Self {
        Self {
            data,
            filename: Some(filename),
        }
    }
}

impl<'r> Responder<'r, 'static> for PdfResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let mut binding = Response::build();
        let mut response = binding
            .header(ContentType::PDF)
            .sized_body(self.data.len(), std::io::Cursor::new(self.data));

        if let Some(filename) = self.filename {
            response = response.raw_header(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", filename),
            );
        }

        response.ok()
    }
}

/// `{ "result": ... }` envelope used by every JSON route.
#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ResultResponse<T> {
    pub result: T,
}

impl<T> ResultResponse<T> {
    pub fn new(result: T) -> Json<Self> {
        Json(Self { result })
    }
}

/// Error half of a route result: a status plus `{ "result": message }`.
pub type ErrorReply = (Status, Json<ResultResponse<String>>);

pub fn error_reply(status: Status, message: impl Into<String>) -> ErrorReply {
    (status, ResultResponse::new(message.into()))
}

#[derive(Debug, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ExportRequest {
    pub text: String,
}
