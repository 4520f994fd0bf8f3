//! Feed API integration tests
//!
//! Post listing, creation, update and deletion through the REST surface,
//! including image storage and cleanup.

mod common;

use axum::http::StatusCode;
use common::{eventually, MultipartForm, TestApp};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_create_post_requires_authentication() {
    let app = TestApp::new().await;

    let form = MultipartForm::new()
        .text("title", "Hello world")
        .text("content", "Some content")
        .file("image", "photo.png", "image/png", b"png");
    let (status, body) = app.multipart("POST", "/feed/post", None, form).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Not authenticated");
}

#[tokio::test]
async fn test_create_post_stores_image() {
    let app = TestApp::new().await;
    let (token, user_id) = app.register("author@example.com", "author").await;

    let post = app.create_post(&token, "  Hello world ", "Some content").await;

    assert_eq!(post["title"], "Hello world");
    assert_eq!(post["content"], "Some content");
    assert_eq!(post["creator"]["_id"], user_id);
    assert_eq!(post["creator"]["name"], "author");
    let image_url = post["imageUrl"].as_str().unwrap();
    assert!(image_url.starts_with("images/"));
    assert!(app.image_path(image_url).exists());
}

#[tokio::test]
async fn test_create_post_without_image_is_rejected() {
    let app = TestApp::new().await;
    let (token, _) = app.register("author@example.com", "author").await;

    let form = MultipartForm::new()
        .text("title", "Hello world")
        .text("content", "Some content");
    let (status, body) = app.multipart("POST", "/feed/post", Some(&token), form).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["data"][0]["field"], "image");
}

#[tokio::test]
async fn test_unsupported_image_type_counts_as_missing() {
    let app = TestApp::new().await;
    let (token, _) = app.register("author@example.com", "author").await;

    let form = MultipartForm::new()
        .text("title", "Hello world")
        .text("content", "Some content")
        .file("image", "anim.gif", "image/gif", b"GIF89a");
    let (status, body) = app.multipart("POST", "/feed/post", Some(&token), form).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["data"][0]["field"], "image");
}

#[tokio::test]
async fn test_invalid_title_discards_upload() {
    let app = TestApp::new().await;
    let (token, _) = app.register("author@example.com", "author").await;

    let form = MultipartForm::new()
        .text("title", "Hi")
        .text("content", "Some content")
        .file("image", "photo.png", "image/png", b"png");
    let (status, body) = app.multipart("POST", "/feed/post", Some(&token), form).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["data"][0]["field"], "title");

    let dir = app.images.path().to_path_buf();
    assert!(eventually(|| std::fs::read_dir(&dir).map(|d| d.count() == 0).unwrap_or(true)).await);
}

#[tokio::test]
async fn test_list_posts_paginates_newest_first() {
    let app = TestApp::new().await;
    let (token, _) = app.register("author@example.com", "author").await;

    for title in ["First post", "Second post", "Third post"] {
        app.create_post(&token, title, "Some content").await;
    }

    let (status, body) = app.get("/feed/posts", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Posts fetched successfully");
    assert_eq!(body["totalItems"], 3);
    let titles: Vec<&str> = body["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Third post", "Second post"]);

    let (_, body) = app.get("/feed/posts?page=2", Some(&token)).await;
    assert_eq!(body["posts"].as_array().unwrap().len(), 1);
    assert_eq!(body["posts"][0]["title"], "First post");

    let (_, body) = app.get("/feed/posts?page=5", Some(&token)).await;
    assert!(body["posts"].as_array().unwrap().is_empty());
    assert_eq!(body["totalItems"], 3);
}

#[tokio::test]
async fn test_list_posts_rejects_bad_page() {
    let app = TestApp::new().await;
    let (token, _) = app.register("author@example.com", "author").await;

    let (status, _) = app.get("/feed/posts?page=0", Some(&token)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = app.get("/feed/posts?page=abc", Some(&token)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_get_post() {
    let app = TestApp::new().await;
    let (token, _) = app.register("author@example.com", "author").await;
    let post = app.create_post(&token, "Hello world", "Some content").await;
    let id = post["_id"].as_str().unwrap();

    let (status, body) = app.get(&format!("/feed/post/{}", id), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Post fetched successfully");
    assert_eq!(body["post"]["_id"], id);

    let (status, _) = app.get("/feed/post/not-a-uuid", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let missing = uuid::Uuid::new_v4();
    let (status, body) = app.get(&format!("/feed/post/{}", missing), Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No post found");
}

#[tokio::test]
async fn test_update_post_keeps_image_when_none_sent() {
    let app = TestApp::new().await;
    let (token, _) = app.register("author@example.com", "author").await;
    let post = app.create_post(&token, "Hello world", "Some content").await;
    let id = post["_id"].as_str().unwrap();

    let form = MultipartForm::new()
        .text("title", "Updated title")
        .text("content", "Updated content");
    let (status, body) = app
        .multipart("PUT", &format!("/feed/post/{}", id), Some(&token), form)
        .await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["message"], "Post updated successfully");
    assert_eq!(body["post"]["title"], "Updated title");
    assert_eq!(body["post"]["imageUrl"], post["imageUrl"]);
}

#[tokio::test]
async fn test_update_post_replaces_and_cleans_image() {
    let app = TestApp::new().await;
    let (token, _) = app.register("author@example.com", "author").await;
    let post = app.create_post(&token, "Hello world", "Some content").await;
    let id = post["_id"].as_str().unwrap();
    let old_path = app.image_path(post["imageUrl"].as_str().unwrap());

    let form = MultipartForm::new()
        .text("title", "Updated title")
        .text("content", "Updated content")
        .file("image", "new.jpg", "image/jpeg", b"jpeg");
    let (status, body) = app
        .multipart("PUT", &format!("/feed/post/{}", id), Some(&token), form)
        .await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    let new_url = body["post"]["imageUrl"].as_str().unwrap();
    assert_ne!(new_url, post["imageUrl"].as_str().unwrap());
    assert!(app.image_path(new_url).exists());
    assert!(eventually(|| !old_path.exists()).await);
}

#[tokio::test]
async fn test_update_post_by_other_user_is_forbidden() {
    let app = TestApp::new().await;
    let (owner, _) = app.register("owner@example.com", "owner1").await;
    let (other, _) = app.register("other@example.com", "other1").await;
    let post = app.create_post(&owner, "Hello world", "Some content").await;
    let id = post["_id"].as_str().unwrap();

    let form = MultipartForm::new()
        .text("title", "Hijacked title")
        .text("content", "Hijacked content");
    let (status, body) = app
        .multipart("PUT", &format!("/feed/post/{}", id), Some(&other), form)
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Not authorized");

    let (_, body) = app.get(&format!("/feed/post/{}", id), Some(&owner)).await;
    assert_eq!(body["post"]["title"], "Hello world");
}

#[tokio::test]
async fn test_delete_post() {
    let app = TestApp::new().await;
    let (token, _) = app.register("author@example.com", "author").await;
    let post = app.create_post(&token, "Hello world", "Some content").await;
    let id = post["_id"].as_str().unwrap();
    let image = app.image_path(post["imageUrl"].as_str().unwrap());

    let (status, body) = app.delete(&format!("/feed/post/{}", id), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Post removed successfully");
    assert_eq!(body["postId"], id);

    let (status, _) = app.get(&format!("/feed/post/{}", id), Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(eventually(|| !image.exists()).await);

    let (status, _) = app.delete(&format!("/feed/post/{}", id), Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_post_by_other_user_is_forbidden() {
    let app = TestApp::new().await;
    let (owner, _) = app.register("owner@example.com", "owner1").await;
    let (other, _) = app.register("other@example.com", "other1").await;
    let post = app.create_post(&owner, "Hello world", "Some content").await;
    let id = post["_id"].as_str().unwrap();

    let (status, _) = app.delete(&format!("/feed/post/{}", id), Some(&other)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get(&format!("/feed/post/{}", id), Some(&owner)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_post_image_upload() {
    let app = TestApp::new().await;
    let (token, _) = app.register("author@example.com", "author").await;

    let form = MultipartForm::new().file("image", "photo.png", "image/png", b"png");
    let (status, body) = app.multipart("PUT", "/post-image", Some(&token), form).await;
    assert_eq!(status, StatusCode::CREATED);
    let path = body["filePath"].as_str().unwrap();
    assert!(app.image_path(path).exists());

    let (status, body) = app
        .multipart("PUT", "/post-image", Some(&token), MultipartForm::new())
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "No file attached");
}

#[tokio::test]
async fn test_post_image_requires_authentication() {
    let app = TestApp::new().await;

    let form = MultipartForm::new().file("image", "photo.png", "image/png", b"png");
    let (status, _) = app.multipart("PUT", "/post-image", None, form).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_stored_image_is_served() {
    let app = TestApp::new().await;
    let (token, _) = app.register("author@example.com", "author").await;
    let post = app.create_post(&token, "Hello world", "Some content").await;

    let (status, body) = app
        .get(&format!("/{}", post["imageUrl"].as_str().unwrap()), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.as_str().unwrap().contains("PNG"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/nowhere", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn test_deleting_post_keeps_image_shared_with_another_post() {
    let app = TestApp::new().await;
    let (alice, _) = app.register("alice@example.com", "alice1").await;
    let (bob, _) = app.register("bob@example.com", "bobby1").await;
    let alice_post = app.create_post(&alice, "Alice post", "Some content").await;
    let image_url = alice_post["imageUrl"].as_str().unwrap();

    let bob_post = app.create_post(&bob, "Bob post", "Some content").await;
    let bob_id = bob_post["_id"].as_str().unwrap();

    let form = MultipartForm::new()
        .text("title", "Bob post")
        .text("content", "Some content")
        .text("imageUrl", image_url);
    let (status, body) = app
        .multipart("PUT", &format!("/feed/post/{}", bob_id), Some(&bob), form)
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["post"]["imageUrl"], image_url);

    let (status, _) = app.delete(&format!("/feed/post/{}", bob_id), Some(&bob)).await;
    assert_eq!(status, StatusCode::OK);

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert!(app.image_path(image_url).exists());
}
