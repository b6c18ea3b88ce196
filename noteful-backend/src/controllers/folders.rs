//! Folders REST API

use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};

use super::{optional_required_text, parse_id, required_text};
use crate::db::tables::folders;
use crate::error::{ApiError, ApiResult};
use crate::models::{CreateFolderRequest, FolderUpdate, NewFolder, Resource, UpdateFolderRequest};
use crate::sanitize::Sanitize;
use crate::AppState;

/// List all folders
async fn list_folders(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let conn = state.db.conn()?;
    let rows = folders::list_all(&conn)?;
    Ok(HttpResponse::Ok().json(rows.sanitized()))
}

/// Get a folder by ID
async fn get_folder(state: web::Data<AppState>, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let id = parse_id(&path, Resource::Folder)?;
    let conn = state.db.conn()?;

    match folders::get_by_id(&conn, id)? {
        Some(folder) => Ok(HttpResponse::Ok().json(folder.sanitized())),
        None => Err(ApiError::NotFound(Resource::Folder)),
    }
}

/// Create a folder
async fn create_folder(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CreateFolderRequest>,
) -> ApiResult<HttpResponse> {
    let name = required_text(body.name.as_deref(), "name")?;

    let conn = state.db.conn()?;
    let folder = folders::insert(&conn, &NewFolder { name })?;
    log::info!("Created folder {}", folder.id);

    Ok(HttpResponse::Created()
        .insert_header((
            header::LOCATION,
            format!("{}/{}", req.path().trim_end_matches('/'), folder.id),
        ))
        .json(folder))
}

/// Rename a folder
async fn update_folder(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateFolderRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path, Resource::Folder)?;
    let update = FolderUpdate {
        name: optional_required_text(body.name.as_deref(), "name")?,
    };
    if update.is_empty() {
        return Err(ApiError::Validation(
            "Request body must contain 'name'".to_string(),
        ));
    }

    let conn = state.db.conn()?;
    match folders::update_by_id(&conn, id, &update)? {
        0 => Err(ApiError::NotFound(Resource::Folder)),
        _ => Ok(HttpResponse::NoContent().finish()),
    }
}

/// Delete a folder
async fn delete_folder(state: web::Data<AppState>, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let id = parse_id(&path, Resource::Folder)?;
    let conn = state.db.conn()?;

    match folders::delete_by_id(&conn, id)? {
        0 => Err(ApiError::NotFound(Resource::Folder)),
        _ => {
            log::info!("Deleted folder {}", id);
            Ok(HttpResponse::NoContent().finish())
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/folders")
            .route("", web::get().to(list_folders))
            .route("", web::post().to(create_folder))
            .route("/{folder_id}", web::get().to(get_folder))
            .route("/{folder_id}", web::patch().to(update_folder))
            .route("/{folder_id}", web::put().to(update_folder))
            .route("/{folder_id}", web::delete().to(delete_folder)),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::http::{header, StatusCode};
    use actix_web::test;
    use serde_json::{json, Value};

    use crate::controllers::test_support::{seed, state};

    const SEED_FOLDERS: &str = "
        INSERT INTO folders (id, name) VALUES (1, 'Important');
        INSERT INTO folders (id, name) VALUES (2, 'Super');
        INSERT INTO folders (id, name) VALUES (3, 'Spangley');
    ";

    const MALICIOUS_NAME: &str = r#"Naughty naughty very naughty <script>alert("xss");</script>"#;
    const ESCAPED_NAME: &str = r#"Naughty naughty very naughty &lt;script&gt;alert("xss");&lt;/script&gt;"#;

    fn expected_folders() -> Value {
        json!([
            { "id": 1, "name": "Important" },
            { "id": 2, "name": "Super" },
            { "id": 3, "name": "Spangley" }
        ])
    }

    fn seed_malicious(state: &actix_web::web::Data<crate::AppState>) {
        let conn = state.db.conn().unwrap();
        conn.execute(
            "INSERT INTO folders (id, name) VALUES (911, ?1)",
            [MALICIOUS_NAME],
        )
        .unwrap();
    }

    #[actix_web::test]
    async fn test_list_empty() {
        let app = test_app!(state()).await;
        let req = test::TestRequest::get().uri("/folders").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!([]));
    }

    #[actix_web::test]
    async fn test_list_all_folders() {
        let state = state();
        seed(&state, SEED_FOLDERS);
        let app = test_app!(state).await;

        let req = test::TestRequest::get().uri("/folders").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, expected_folders());
    }

    #[actix_web::test]
    async fn test_list_escapes_stored_markup() {
        let state = state();
        seed_malicious(&state);
        let app = test_app!(state).await;

        let req = test::TestRequest::get().uri("/folders").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body[0]["name"], ESCAPED_NAME);
    }

    #[actix_web::test]
    async fn test_get_missing_folder() {
        let app = test_app!(state()).await;
        let req = test::TestRequest::get().uri("/folders/123456").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": { "message": "Folder doesn't exist" } }));
    }

    #[actix_web::test]
    async fn test_get_non_numeric_id_is_not_found() {
        let app = test_app!(state()).await;
        let req = test::TestRequest::get().uri("/folders/abc").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["message"], "Folder doesn't exist");
    }

    #[actix_web::test]
    async fn test_get_folder_by_id() {
        let state = state();
        seed(&state, SEED_FOLDERS);
        let app = test_app!(state).await;

        let req = test::TestRequest::get().uri("/folders/3").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, expected_folders()[2]);
    }

    #[actix_web::test]
    async fn test_get_escapes_stored_markup() {
        let state = state();
        seed_malicious(&state);
        let app = test_app!(state).await;

        let req = test::TestRequest::get().uri("/folders/911").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["name"], ESCAPED_NAME);
    }

    #[actix_web::test]
    async fn test_create_folder_then_get() {
        let app = test_app!(state()).await;

        let req = test::TestRequest::post()
            .uri("/folders")
            .set_json(json!({ "name": "Test new folder" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let location = resp
            .headers()
            .get(header::LOCATION)
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string());
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["name"], "Test new folder");
        let id = created["id"].as_i64().expect("id should be an integer");
        assert_eq!(location, Some(format!("/folders/{}", id)));

        let req = test::TestRequest::get().uri(&format!("/folders/{}", id)).to_request();
        let fetched: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched, created);
    }

    #[actix_web::test]
    async fn test_create_ignores_client_id() {
        let app = test_app!(state()).await;

        let req = test::TestRequest::post()
            .uri("/folders")
            .set_json(json!({ "id": 500, "name": "Mine" }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created["id"], 1);
    }

    #[actix_web::test]
    async fn test_create_requires_name() {
        let app = test_app!(state()).await;

        for body in [json!({}), json!({ "name": "   " }), json!({ "name": null })] {
            let req = test::TestRequest::post().uri("/folders").set_json(body).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body, json!({ "error": { "message": "Missing 'name' in request body" } }));
        }
    }

    #[actix_web::test]
    async fn test_create_rejects_malformed_json() {
        let app = test_app!(state()).await;

        let req = test::TestRequest::post()
            .uri("/folders")
            .insert_header(header::ContentType::json())
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"]["message"].as_str().unwrap().starts_with("Invalid JSON body"));
    }

    #[actix_web::test]
    async fn test_create_escapes_markup() {
        let app = test_app!(state()).await;

        let req = test::TestRequest::post()
            .uri("/folders")
            .set_json(json!({ "name": MALICIOUS_NAME }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["name"], ESCAPED_NAME);

        let req = test::TestRequest::get().uri("/folders/1").to_request();
        let fetched: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched["name"], ESCAPED_NAME);
    }

    #[actix_web::test]
    async fn test_delete_missing_folder() {
        let app = test_app!(state()).await;
        let req = test::TestRequest::delete().uri("/folders/123456").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": { "message": "Folder doesn't exist" } }));
    }

    #[actix_web::test]
    async fn test_delete_folder() {
        let state = state();
        seed(&state, SEED_FOLDERS);
        let app = test_app!(state).await;

        let req = test::TestRequest::delete().uri("/folders/2").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(test::read_body(resp).await.is_empty());

        let req = test::TestRequest::get().uri("/folders").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            json!([{ "id": 1, "name": "Important" }, { "id": 3, "name": "Spangley" }])
        );

        let req = test::TestRequest::get().uri("/folders/2").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_update_folder() {
        let state = state();
        seed(&state, SEED_FOLDERS);
        let app = test_app!(state).await;

        let req = test::TestRequest::patch()
            .uri("/folders/1")
            .set_json(json!({ "name": "<em>Renamed</em>" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get().uri("/folders/1").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "id": 1, "name": "&lt;em&gt;Renamed&lt;/em&gt;" }));
    }

    #[actix_web::test]
    async fn test_update_requires_a_field() {
        let state = state();
        seed(&state, SEED_FOLDERS);
        let app = test_app!(state).await;

        let req = test::TestRequest::patch()
            .uri("/folders/1")
            .set_json(json!({ "unrelated": true }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["message"], "Request body must contain 'name'");

        let req = test::TestRequest::patch()
            .uri("/folders/1")
            .set_json(json!({ "name": "" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_update_missing_folder() {
        let app = test_app!(state()).await;

        let req = test::TestRequest::put()
            .uri("/folders/123456")
            .set_json(json!({ "name": "Ghost" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_storage_failure_is_opaque() {
        let state = state();
        seed(&state, "DROP TABLE folders;");
        let app = test_app!(state).await;

        let req = test::TestRequest::get().uri("/folders").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": { "message": "server error" } }));
    }
}
