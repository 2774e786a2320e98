mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

struct MediaFixture {
    server: &'static common::TestServer,
    token: String,
    property_id: String,
}

async fn setup_property() -> Result<Option<MediaFixture>> {
    if !common::database_configured() {
        return Ok(None);
    }
    let server = common::ensure_server().await?;
    let pool = common::test_pool().await?;
    let (_id, email) = common::seed_user(&pool, "agent", "pw").await?;
    let token = common::login(&server.base_url, &email, "pw").await?;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/properties", server.base_url))
        .bearer_auth(&token)
        .json(&common::property_payload("Media host"))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "fixture create failed");
    let created = res.json::<serde_json::Value>().await?;
    let property_id = created["id"].as_str().unwrap().to_string();

    Ok(Some(MediaFixture {
        server,
        token,
        property_id,
    }))
}

#[tokio::test]
async fn image_crud_and_gallery_ordering() -> Result<()> {
    let Some(fx) = setup_property().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let base = format!(
        "{}/properties/{}/images",
        fx.server.base_url, fx.property_id
    );

    // Create two images out of display order
    let res = client
        .post(&base)
        .bearer_auth(&fx.token)
        .json(&json!({
            "image_url": "https://cdn.example.test/back-garden.jpg",
            "alt_text": "Back garden",
            "display_order": 2
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let second = res.json::<serde_json::Value>().await?;

    let res = client
        .post(&base)
        .bearer_auth(&fx.token)
        .json(&json!({
            "image_url": "https://cdn.example.test/front.jpg",
            "display_order": 1
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let first = res.json::<serde_json::Value>().await?;
    // Omitted alt_text stays null
    assert_eq!(first["alt_text"], json!(null));

    // Detail returns them sorted by display_order, not creation order
    let res = client
        .get(format!(
            "{}/properties/{}",
            fx.server.base_url, fx.property_id
        ))
        .bearer_auth(&fx.token)
        .send()
        .await?;
    let detail = res.json::<serde_json::Value>().await?;
    let images = detail["images"].as_array().unwrap();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0]["id"], first["id"]);
    assert_eq!(images[1]["id"], second["id"]);

    // Patch one field; null clears alt_text
    let image_url = format!("{}/{}", base, second["id"].as_str().unwrap());
    let res = client
        .put(&image_url)
        .bearer_auth(&fx.token)
        .json(&json!({ "alt_text": null }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let patched = res.json::<serde_json::Value>().await?;
    assert_eq!(patched["alt_text"], json!(null));
    assert_eq!(patched["display_order"], 2);

    // Validation still applies to patches
    let res = client
        .put(&image_url)
        .bearer_auth(&fx.token)
        .json(&json!({ "image_url": "not a url" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Delete, then the id is gone
    let res = client.delete(&image_url).bearer_auth(&fx.token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Image deleted successfully");

    let res = client.delete(&image_url).bearer_auth(&fx.token).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn document_crud() -> Result<()> {
    let Some(fx) = setup_property().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let base = format!(
        "{}/properties/{}/documents",
        fx.server.base_url, fx.property_id
    );

    let res = client
        .post(&base)
        .bearer_auth(&fx.token)
        .json(&json!({
            "document_url": "https://cdn.example.test/epc.pdf",
            "document_name": "Energy certificate",
            "document_type": "pdf"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let doc = res.json::<serde_json::Value>().await?;
    let doc_url = format!("{}/{}", base, doc["id"].as_str().unwrap());

    let res = client
        .put(&doc_url)
        .bearer_auth(&fx.token)
        .json(&json!({ "document_name": "EPC 2026" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let patched = res.json::<serde_json::Value>().await?;
    assert_eq!(patched["document_name"], "EPC 2026");
    assert_eq!(patched["document_type"], "pdf");

    // Missing required fields on create
    let res = client
        .post(&base)
        .bearer_auth(&fx.token)
        .json(&json!({
            "document_url": "https://cdn.example.test/x.pdf",
            "document_name": "",
            "document_type": "pdf"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["field_errors"]["document_name"], "Document name is required");

    let res = client.delete(&doc_url).bearer_auth(&fx.token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Document deleted successfully");

    Ok(())
}

#[tokio::test]
async fn media_is_scoped_to_its_property() -> Result<()> {
    let Some(fx) = setup_property().await? else {
        return Ok(());
    };
    let pool = common::test_pool().await?;
    let client = reqwest::Client::new();

    // A second property owned by the same agent
    let res = client
        .post(format!("{}/properties", fx.server.base_url))
        .bearer_auth(&fx.token)
        .json(&common::property_payload("Other media host"))
        .send()
        .await?;
    let other = res.json::<serde_json::Value>().await?;
    let other_id = other["id"].as_str().unwrap();

    let res = client
        .post(format!(
            "{}/properties/{}/images",
            fx.server.base_url, fx.property_id
        ))
        .bearer_auth(&fx.token)
        .json(&json!({ "image_url": "https://cdn.example.test/a.jpg" }))
        .send()
        .await?;
    let image = res.json::<serde_json::Value>().await?;
    let image_id = image["id"].as_str().unwrap();

    // Addressing the image through the wrong parent reads as missing
    let res = client
        .delete(format!(
            "{}/properties/{}/images/{}",
            fx.server.base_url, other_id, image_id
        ))
        .bearer_auth(&fx.token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Mutating media on someone else's property is forbidden
    let (_id, email) = common::seed_user(&pool, "agent", "pw").await?;
    let other_token = common::login(&fx.server.base_url, &email, "pw").await?;
    let res = client
        .post(format!(
            "{}/properties/{}/images",
            fx.server.base_url, fx.property_id
        ))
        .bearer_auth(&other_token)
        .json(&json!({ "image_url": "https://cdn.example.test/b.jpg" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Malformed media ids are 404s, not parse errors
    let res = client
        .delete(format!(
            "{}/properties/{}/images/not-a-uuid",
            fx.server.base_url, fx.property_id
        ))
        .bearer_auth(&fx.token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}
