/**
 * Feed Handlers
 *
 * REST endpoints for posts and image uploads. Post bodies arrive as
 * multipart forms with `title`, `content` and an `image` file.
 *
 * # Endpoints
 *
 * - `GET /feed/posts?page=N` - one page of posts
 * - `POST /feed/post` - create a post (image required)
 * - `GET /feed/post/{postId}` - a single post
 * - `PUT /feed/post/{postId}` - update a post (image optional)
 * - `DELETE /feed/post/{postId}` - delete a post
 * - `PUT /post-image` - standalone upload, used by GraphQL clients
 *
 * Uploaded files with an unsupported content type are ignored, as if no
 * file had been attached.
 */

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::middleware::auth::Identity;
use crate::backend::posts::images::{ImageStore, ImageUpload};
use crate::backend::posts::service::PostService;
use crate::shared::post::{PostDraft, PostWithCreator};

/// Query parameters for the post listing
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub posts: Vec<PostWithCreator>,
    pub message: String,
    pub total_items: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostResponse {
    pub message: String,
    pub post: PostWithCreator,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePostResponse {
    pub message: String,
    pub post_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePathResponse {
    pub file_path: String,
}

/// Fields of a post form
#[derive(Debug, Default)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    /// Image URL sent as a text field (update only)
    pub image_url: Option<String>,
    pub upload: Option<ImageUpload>,
}

/// Read a multipart post form
///
/// The image may come as a file part or, when re-using a stored image, as a
/// text part named `image` or `imageUrl`.
pub async fn read_post_form(mut multipart: Multipart) -> Result<PostForm, BackendError> {
    let mut form = PostForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned).unwrap_or_default();
        match name.as_str() {
            "title" => form.title = field.text().await?,
            "content" => form.content = field.text().await?,
            "image" | "imageUrl" => {
                if let Some(file_name) = field.file_name().map(str::to_owned) {
                    let content_type = field.content_type().map(str::to_owned).unwrap_or_default();
                    let data = field.bytes().await?;
                    if data.is_empty() {
                        continue;
                    }
                    form.upload = Some(ImageUpload {
                        file_name,
                        content_type,
                        data,
                    });
                } else {
                    let text = field.text().await?;
                    if !text.trim().is_empty() {
                        form.image_url = Some(text);
                    }
                }
            }
            other => tracing::debug!("Ignoring form field {:?}", other),
        }
    }

    Ok(form)
}

/// Store an upload if it has a supported type
async fn store_upload(images: &ImageStore, upload: Option<ImageUpload>) -> Result<Option<String>, BackendError> {
    match upload {
        Some(upload) if upload.is_supported() => images.save(&upload).await.map(Some),
        Some(upload) => {
            tracing::warn!("Ignoring upload {:?} with type {:?}", upload.file_name, upload.content_type);
            Ok(None)
        }
        None => Ok(None),
    }
}

fn parse_page(raw: Option<&str>) -> Result<Option<i64>, BackendError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| BackendError::invalid_field("page", "Invalid page")),
    }
}

fn parse_post_id(raw: &str) -> Result<Uuid, BackendError> {
    // A malformed id cannot name an existing post
    Uuid::parse_str(raw.trim()).map_err(|_| BackendError::not_found("No post found"))
}

/// List posts (GET /feed/posts)
pub async fn get_posts(
    State(posts): State<PostService>,
    Identity(identity): Identity,
    Query(query): Query<PageQuery>,
) -> Result<Json<PostListResponse>, BackendError> {
    let page = parse_page(query.page.as_deref())?;
    let result = posts.list(&identity, page).await?;

    Ok(Json(PostListResponse {
        posts: result.posts,
        message: "Posts fetched successfully".to_string(),
        total_items: result.total_items,
    }))
}

/// Create a post (POST /feed/post)
///
/// # Errors
///
/// * `422 Unprocessable Entity` - If not authenticated, title/content are
///   invalid or no image was attached
pub async fn create_post(
    State(posts): State<PostService>,
    State(images): State<ImageStore>,
    Identity(identity): Identity,
    multipart: Multipart,
) -> Result<(StatusCode, Json<PostResponse>), BackendError> {
    identity.require_user()?;

    let form = read_post_form(multipart).await?;
    let image_url = store_upload(&images, form.upload).await?;
    let draft = PostDraft::new(form.title, form.content, image_url.clone());

    match posts.create(&identity, draft).await {
        Ok(post) => Ok((
            StatusCode::CREATED,
            Json(PostResponse {
                message: "Post created succesfully".to_string(),
                post,
            }),
        )),
        Err(e) => {
            if let Some(url) = image_url {
                images.discard(&url);
            }
            Err(e)
        }
    }
}

/// Get a single post (GET /feed/post/{postId})
pub async fn get_post(
    State(posts): State<PostService>,
    Identity(identity): Identity,
    Path(post_id): Path<String>,
) -> Result<Json<PostResponse>, BackendError> {
    identity.require_user()?;
    let post = posts.get(&identity, parse_post_id(&post_id)?).await?;

    Ok(Json(PostResponse {
        message: "Post fetched successfully".to_string(),
        post,
    }))
}

/// Update a post (PUT /feed/post/{postId})
///
/// # Errors
///
/// * `404 Not Found` - If the post does not exist
/// * `403 Forbidden` - If the caller is not the creator
/// * `422 Unprocessable Entity` - If not authenticated or a field is invalid
pub async fn update_post(
    State(posts): State<PostService>,
    State(images): State<ImageStore>,
    Identity(identity): Identity,
    Path(post_id): Path<String>,
    multipart: Multipart,
) -> Result<Json<PostResponse>, BackendError> {
    identity.require_user()?;
    let post_id = parse_post_id(&post_id)?;

    let form = read_post_form(multipart).await?;
    let uploaded = store_upload(&images, form.upload).await?;
    let draft = PostDraft::new(form.title, form.content, uploaded.clone().or(form.image_url));

    match posts.update(&identity, post_id, draft).await {
        Ok(post) => Ok(Json(PostResponse {
            message: "Post updated successfully".to_string(),
            post,
        })),
        Err(e) => {
            if let Some(url) = uploaded {
                images.discard(&url);
            }
            Err(e)
        }
    }
}

/// Delete a post (DELETE /feed/post/{postId})
pub async fn delete_post(
    State(posts): State<PostService>,
    Identity(identity): Identity,
    Path(post_id): Path<String>,
) -> Result<Json<DeletePostResponse>, BackendError> {
    identity.require_user()?;
    let deleted = posts.delete(&identity, parse_post_id(&post_id)?).await?;

    Ok(Json(DeletePostResponse {
        message: deleted.message,
        post_id: deleted.id,
    }))
}

/// Upload an image on its own (PUT /post-image)
///
/// Returns `201 { filePath }`, or `200 { message: "No file attached" }` when
/// the form carries no usable image.
pub async fn upload_image(
    State(images): State<ImageStore>,
    Identity(identity): Identity,
    multipart: Multipart,
) -> Result<Response, BackendError> {
    identity.require_user()?;

    let form = read_post_form(multipart).await?;
    match store_upload(&images, form.upload).await? {
        Some(file_path) => Ok((StatusCode::CREATED, Json(FilePathResponse { file_path })).into_response()),
        None => Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "message": "No file attached" })),
        )
            .into_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_parse_page() {
        assert_eq!(parse_page(None).unwrap(), None);
        assert_eq!(parse_page(Some("")).unwrap(), None);
        assert_eq!(parse_page(Some("3")).unwrap(), Some(3));
        assert_matches!(parse_page(Some("two")), Err(BackendError::InvalidInput { .. }));
    }

    #[test]
    fn test_malformed_post_id_is_not_found() {
        assert_matches!(parse_post_id("5c0f66b979af55031b34728a"), Err(BackendError::NotFound { .. }));
        let id = Uuid::new_v4();
        assert_eq!(parse_post_id(&id.to_string()).unwrap(), id);
    }
}
