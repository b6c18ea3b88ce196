//! Notes REST API
//!
//! Same shape as the folders API, plus the optional `content` and `folder_id`
//! fields. Whether `folder_id` must name an existing folder is decided by
//! `Config::folder_ref_policy`.

use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};

use super::{optional_required_text, parse_id, required_text};
use crate::db::tables::notes;
use crate::error::{ApiError, ApiResult};
use crate::models::{CreateNoteRequest, NewNote, NoteUpdate, Resource, UpdateNoteRequest};
use crate::sanitize::{sanitize_opt, Sanitize};
use crate::AppState;

async fn list_notes(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let conn = state.db.conn()?;
    let rows = notes::list_all(&conn)?;
    Ok(HttpResponse::Ok().json(rows.sanitized()))
}

async fn get_note(state: web::Data<AppState>, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let id = parse_id(&path, Resource::Note)?;
    let conn = state.db.conn()?;

    match notes::get_by_id(&conn, id)? {
        Some(note) => Ok(HttpResponse::Ok().json(note.sanitized())),
        None => Err(ApiError::NotFound(Resource::Note)),
    }
}

async fn create_note(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CreateNoteRequest>,
) -> ApiResult<HttpResponse> {
    let request = body.into_inner();
    let new_note = NewNote {
        name: required_text(request.name.as_deref(), "name")?,
        content: sanitize_opt(request.content.as_deref()),
        folder_id: request.folder_id,
    };

    let conn = state.db.conn()?;
    let note = notes::insert(&conn, &new_note, state.config.folder_ref_policy)?;
    log::info!("Created note {} (folder {:?})", note.id, note.folder_id);

    Ok(HttpResponse::Created()
        .insert_header((
            header::LOCATION,
            format!("{}/{}", req.path().trim_end_matches('/'), note.id),
        ))
        .json(note))
}

async fn update_note(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateNoteRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path, Resource::Note)?;
    let request = body.into_inner();
    let update = NoteUpdate {
        name: optional_required_text(request.name.as_deref(), "name")?,
        content: sanitize_opt(request.content.as_deref()),
        folder_id: request.folder_id,
    };
    if update.is_empty() {
        return Err(ApiError::Validation(
            "Request body must contain either 'name', 'content' or 'folder_id'".to_string(),
        ));
    }

    let conn = state.db.conn()?;
    match notes::update_by_id(&conn, id, &update, state.config.folder_ref_policy)? {
        0 => Err(ApiError::NotFound(Resource::Note)),
        _ => Ok(HttpResponse::NoContent().finish()),
    }
}

async fn delete_note(state: web::Data<AppState>, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let id = parse_id(&path, Resource::Note)?;
    let conn = state.db.conn()?;

    match notes::delete_by_id(&conn, id)? {
        0 => Err(ApiError::NotFound(Resource::Note)),
        _ => {
            log::info!("Deleted note {}", id);
            Ok(HttpResponse::NoContent().finish())
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/notes")
            .route("", web::get().to(list_notes))
            .route("", web::post().to(create_note))
            .route("/{note_id}", web::get().to(get_note))
            .route("/{note_id}", web::patch().to(update_note))
            .route("/{note_id}", web::put().to(update_note))
            .route("/{note_id}", web::delete().to(delete_note)),
    );
}
