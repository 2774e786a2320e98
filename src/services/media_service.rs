use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    CreatePropertyDocument, CreatePropertyImage, PropertyDocument, PropertyImage,
    UpdatePropertyDocument, UpdatePropertyImage,
};

// Every update/delete below is scoped by `id AND property_id` so a request
// cannot reach another property's media by guessing an id; a mismatched
// parent behaves exactly like a missing row.

pub async fn create_image(
    pool: &PgPool,
    property_id: Uuid,
    input: CreatePropertyImage,
) -> Result<PropertyImage, DatabaseError> {
    let image = sqlx::query_as::<_, PropertyImage>(
        "INSERT INTO property_images (id, property_id, image_url, alt_text, display_order, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(property_id)
    .bind(input.image_url)
    .bind(input.alt_text)
    .bind(input.display_order)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(image)
}

pub async fn update_image(
    pool: &PgPool,
    property_id: Uuid,
    image_id: Uuid,
    patch: UpdatePropertyImage,
) -> Result<Option<PropertyImage>, DatabaseError> {
    if patch.image_url.is_none() && patch.alt_text.is_none() && patch.display_order.is_none() {
        // Nothing to write; still resolve the scoped row for the response.
        return find_image(pool, property_id, image_id).await;
    }

    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE property_images SET ");
    let mut set = builder.separated(", ");

    if let Some(image_url) = patch.image_url {
        set.push("image_url = ").push_bind_unseparated(image_url);
    }
    if let Some(alt_text) = patch.alt_text {
        set.push("alt_text = ").push_bind_unseparated(alt_text);
    }
    if let Some(display_order) = patch.display_order {
        set.push("display_order = ")
            .push_bind_unseparated(display_order);
    }

    builder.push(" WHERE id = ");
    builder.push_bind(image_id);
    builder.push(" AND property_id = ");
    builder.push_bind(property_id);
    builder.push(" RETURNING *");

    let image = builder
        .build_query_as::<PropertyImage>()
        .fetch_optional(pool)
        .await?;
    Ok(image)
}

pub async fn delete_image(
    pool: &PgPool,
    property_id: Uuid,
    image_id: Uuid,
) -> Result<bool, DatabaseError> {
    let result = sqlx::query("DELETE FROM property_images WHERE id = $1 AND property_id = $2")
        .bind(image_id)
        .bind(property_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

async fn find_image(
    pool: &PgPool,
    property_id: Uuid,
    image_id: Uuid,
) -> Result<Option<PropertyImage>, DatabaseError> {
    let image = sqlx::query_as::<_, PropertyImage>(
        "SELECT * FROM property_images WHERE id = $1 AND property_id = $2",
    )
    .bind(image_id)
    .bind(property_id)
    .fetch_optional(pool)
    .await?;
    Ok(image)
}

pub async fn create_document(
    pool: &PgPool,
    property_id: Uuid,
    input: CreatePropertyDocument,
) -> Result<PropertyDocument, DatabaseError> {
    let document = sqlx::query_as::<_, PropertyDocument>(
        "INSERT INTO property_documents (id, property_id, document_url, document_name, document_type, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(property_id)
    .bind(input.document_url)
    .bind(input.document_name)
    .bind(input.document_type)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(document)
}

pub async fn update_document(
    pool: &PgPool,
    property_id: Uuid,
    document_id: Uuid,
    patch: UpdatePropertyDocument,
) -> Result<Option<PropertyDocument>, DatabaseError> {
    if patch.document_url.is_none() && patch.document_name.is_none() && patch.document_type.is_none()
    {
        return find_document(pool, property_id, document_id).await;
    }

    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE property_documents SET ");
    let mut set = builder.separated(", ");

    if let Some(document_url) = patch.document_url {
        set.push("document_url = ")
            .push_bind_unseparated(document_url);
    }
    if let Some(document_name) = patch.document_name {
        set.push("document_name = ")
            .push_bind_unseparated(document_name);
    }
    if let Some(document_type) = patch.document_type {
        set.push("document_type = ")
            .push_bind_unseparated(document_type);
    }

    builder.push(" WHERE id = ");
    builder.push_bind(document_id);
    builder.push(" AND property_id = ");
    builder.push_bind(property_id);
    builder.push(" RETURNING *");

    let document = builder
        .build_query_as::<PropertyDocument>()
        .fetch_optional(pool)
        .await?;
    Ok(document)
}

pub async fn delete_document(
    pool: &PgPool,
    property_id: Uuid,
    document_id: Uuid,
) -> Result<bool, DatabaseError> {
    let result = sqlx::query("DELETE FROM property_documents WHERE id = $1 AND property_id = $2")
        .bind(document_id)
        .bind(property_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

async fn find_document(
    pool: &PgPool,
    property_id: Uuid,
    document_id: Uuid,
) -> Result<Option<PropertyDocument>, DatabaseError> {
    let document = sqlx::query_as::<_, PropertyDocument>(
        "SELECT * FROM property_documents WHERE id = $1 AND property_id = $2",
    )
    .bind(document_id)
    .bind(property_id)
    .fetch_optional(pool)
    .await?;
    Ok(document)
}
