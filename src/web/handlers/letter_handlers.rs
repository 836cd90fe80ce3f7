// src/web/handlers/letter_handlers.rs
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

use crate::letter::{export_pdf, DEFAULT_FILENAME};
use crate::web::types::{error_reply, ErrorReply, ExportRequest, PdfResponse, ResultResponse};
use crate::web::AppState;
use crate::wizard::FormStep;

pub async fn export_letter_handler(
    request: Json<ExportRequest>,
    state: &State<AppState>,
) -> Result<PdfResponse, ErrorReply> {
    if request.text.trim().is_empty() {
        return Err(error_reply(Status::BadRequest, "No letter to export"));
    }

    match export_pdf(&request.text, &state.layout) {
        Ok(data) => {
            info!("Exported letter ({} bytes of PDF)", data.len());
            Ok(PdfResponse::with_filename(data, DEFAULT_FILENAME.to_string()))
        }
        Err(e) => {
            error!("PDF export failed: {:#}", e);
            Err(error_reply(Status::InternalServerError, "Failed to export the letter."))
        }
    }
}

pub async fn form_steps_handler(state: &State<AppState>) -> Json<ResultResponse<Vec<FormStep>>> {
    ResultResponse::new(state.steps.clone())
}
