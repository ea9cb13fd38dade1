//! REST checks against JSONPlaceholder (or `TALENTOLAB_API_URL`).
//!
//! Needs network access. Run with `cargo test --test api -- --ignored`.

mod common;

use color_eyre::eyre::{ensure, eyre};
use color_eyre::Result;
use log::info;
use serde_json::json;
use talentolab_e2e::api::{ApiClient, Post, User};

fn client() -> Result<ApiClient> {
    let settings = common::settings();
    Ok(ApiClient::new(&settings.api_url)?)
}

#[test]
#[ignore] // requires network
fn list_users() -> Result<()> {
    let resp = client()?.get("/users")?;
    ensure!(resp.status == 200, "expected 200, got {}", resp.status);

    let users: Vec<User> = resp.json()?;
    let first = users.first().ok_or_else(|| eyre!("user list is empty"))?;
    info!("{} users, first: {} ({})", users.len(), first.name, first.email);
    Ok(())
}

#[test]
#[ignore] // requires network
fn get_single_user() -> Result<()> {
    let resp = client()?.get("/users/1")?;
    ensure!(resp.status == 200, "expected 200, got {}", resp.status);

    let user: User = resp.json()?;
    ensure!(user.id == 1, "expected user 1, got {}", user.id);
    info!("User: {} <{}>", user.name, user.email);
    Ok(())
}

#[test]
#[ignore] // requires network
fn missing_user_is_404() -> Result<()> {
    let resp = client()?.get("/users/9999")?;
    ensure!(resp.status == 404, "expected 404, got {}", resp.status);
    Ok(())
}

#[test]
#[ignore] // requires network
fn create_post() -> Result<()> {
    let new_post = Post {
        id: None,
        user_id: 1,
        title: "Test Automation - Talento Lab".to_string(),
        body: "Este es un test de automatización para el proyecto final".to_string(),
    };
    let resp = client()?.post("/posts", &new_post)?;
    ensure!(resp.status == 201, "expected 201, got {}", resp.status);

    let created: Post = resp.json()?;
    ensure!(created.id.is_some(), "created post has no id");
    ensure!(created.title == new_post.title, "title mismatch");
    ensure!(created.user_id == new_post.user_id, "userId mismatch");
    Ok(())
}

#[test]
#[ignore] // requires network
fn delete_post() -> Result<()> {
    let resp = client()?.delete("/posts/1")?;
    ensure!(resp.status == 200, "expected 200, got {}", resp.status);
    Ok(())
}

#[test]
#[ignore] // requires network
fn create_then_list_posts() -> Result<()> {
    let api = client()?;
    let body = json!({
        "title": "QA Automation Framework",
        "body": "Testing con Rust y reqwest",
        "userId": 1,
    });
    let created = api.post("/posts", &body)?;
    ensure!(created.status == 201, "could not create post: {}", created.status);
    let id = created.body["id"].as_u64().ok_or_else(|| eyre!("created post has no id"))?;
    info!("Created post {}", id);

    let listed = api.get("/posts")?;
    ensure!(listed.status == 200, "could not list posts: {}", listed.status);
    let posts = listed.body.as_array().ok_or_else(|| eyre!("post list is not an array"))?;
    info!("{} posts listed", posts.len());
    Ok(())
}
