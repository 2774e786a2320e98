use chrono::Utc;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use std::collections::HashMap;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    CreateProperty, Property, PropertyDocument, PropertyImage, PropertyStatus, PropertyWithMedia,
    UpdateProperty,
};
use crate::filter::PropertySearch;

/// Load a single property by id, excluding soft-deleted rows.
pub async fn find_property(pool: &PgPool, id: Uuid) -> Result<Option<Property>, DatabaseError> {
    let property = sqlx::query_as::<_, Property>(
        "SELECT * FROM properties WHERE id = $1 AND is_deleted = false",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(property)
}

/// Execute a listing search: the filtered/sorted/paginated page, the total
/// count over the same predicates, and batched media attachment.
pub async fn search_properties(
    pool: &PgPool,
    search: &PropertySearch,
) -> Result<(Vec<PropertyWithMedia>, i64), DatabaseError> {
    let page_sql = search.to_sql();
    let mut query = sqlx::query_as::<_, Property>(&page_sql.sql);
    for param in &page_sql.params {
        query = query.bind(param);
    }
    let properties = query.fetch_all(pool).await?;

    let count_sql = search.to_count_sql();
    let mut count_query = sqlx::query(&count_sql.sql);
    for param in &count_sql.params {
        count_query = count_query.bind(param);
    }
    let total_count: i64 = count_query.fetch_one(pool).await?.try_get("count")?;

    let enriched = attach_media(pool, properties).await?;
    Ok((enriched, total_count))
}

/// Batch-fetch images and documents for a page of properties: one query per
/// media table regardless of page size, grouped per property with the same
/// ordering as the single-property fetch.
async fn attach_media(
    pool: &PgPool,
    properties: Vec<Property>,
) -> Result<Vec<PropertyWithMedia>, DatabaseError> {
    if properties.is_empty() {
        return Ok(vec![]);
    }

    let ids: Vec<Uuid> = properties.iter().map(|p| p.id).collect();

    let images = sqlx::query_as::<_, PropertyImage>(
        "SELECT * FROM property_images WHERE property_id = ANY($1) ORDER BY display_order ASC",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let documents = sqlx::query_as::<_, PropertyDocument>(
        "SELECT * FROM property_documents WHERE property_id = ANY($1) ORDER BY created_at ASC",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let mut images_by_property: HashMap<Uuid, Vec<PropertyImage>> = HashMap::new();
    for image in images {
        images_by_property
            .entry(image.property_id)
            .or_default()
            .push(image);
    }
    let mut documents_by_property: HashMap<Uuid, Vec<PropertyDocument>> = HashMap::new();
    for document in documents {
        documents_by_property
            .entry(document.property_id)
            .or_default()
            .push(document);
    }

    Ok(properties
        .into_iter()
        .map(|property| {
            let images = images_by_property.remove(&property.id).unwrap_or_default();
            let documents = documents_by_property
                .remove(&property.id)
                .unwrap_or_default();
            PropertyWithMedia {
                property,
                images,
                documents,
            }
        })
        .collect())
}

/// Attach ordered media to a single property (detail and update responses).
pub async fn with_media(
    pool: &PgPool,
    property: Property,
) -> Result<PropertyWithMedia, DatabaseError> {
    let images = sqlx::query_as::<_, PropertyImage>(
        "SELECT * FROM property_images WHERE property_id = $1 ORDER BY display_order ASC",
    )
    .bind(property.id)
    .fetch_all(pool)
    .await?;

    let documents = sqlx::query_as::<_, PropertyDocument>(
        "SELECT * FROM property_documents WHERE property_id = $1 ORDER BY created_at ASC",
    )
    .bind(property.id)
    .fetch_all(pool)
    .await?;

    Ok(PropertyWithMedia {
        property,
        images,
        documents,
    })
}

/// Insert a new property owned by `owner_id`. The id is server-generated and
/// creation/update timestamps are stamped identically.
pub async fn create_property(
    pool: &PgPool,
    owner_id: Uuid,
    input: CreateProperty,
) -> Result<Property, DatabaseError> {
    let now = Utc::now();

    let property = sqlx::query_as::<_, Property>(
        "INSERT INTO properties \
         (id, user_id, title, description, street, city, state, zip_code, country, \
          latitude, longitude, price, status, property_type, bedrooms, bathrooms, \
          square_footage, additional_notes, tags, is_deleted, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
                 $17, $18, $19, $20, $21, $22) \
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(owner_id)
    .bind(input.title)
    .bind(input.description)
    .bind(input.street)
    .bind(input.city)
    .bind(input.state)
    .bind(input.zip_code)
    .bind(input.country)
    .bind(input.latitude)
    .bind(input.longitude)
    .bind(input.price)
    .bind(input.status)
    .bind(input.property_type)
    .bind(input.bedrooms)
    .bind(input.bathrooms)
    .bind(input.square_footage)
    .bind(input.additional_notes)
    .bind(input.tags.map(Json))
    .bind(false)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(property)
}

/// Write exactly the provided field set plus a refreshed update timestamp.
///
/// Explicit field-to-column mapping; fields absent from the payload are left
/// untouched, double-Option fields set to null clear the column. Returns
/// None when no row matches.
pub async fn update_property(
    pool: &PgPool,
    id: Uuid,
    patch: UpdateProperty,
) -> Result<Option<Property>, DatabaseError> {
    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE properties SET ");
    let mut set = builder.separated(", ");

    if let Some(title) = patch.title {
        set.push("title = ").push_bind_unseparated(title);
    }
    if let Some(description) = patch.description {
        set.push("description = ").push_bind_unseparated(description);
    }
    if let Some(street) = patch.street {
        set.push("street = ").push_bind_unseparated(street);
    }
    if let Some(city) = patch.city {
        set.push("city = ").push_bind_unseparated(city);
    }
    if let Some(state) = patch.state {
        set.push("state = ").push_bind_unseparated(state);
    }
    if let Some(zip_code) = patch.zip_code {
        set.push("zip_code = ").push_bind_unseparated(zip_code);
    }
    if let Some(country) = patch.country {
        set.push("country = ").push_bind_unseparated(country);
    }
    if let Some(latitude) = patch.latitude {
        set.push("latitude = ").push_bind_unseparated(latitude);
    }
    if let Some(longitude) = patch.longitude {
        set.push("longitude = ").push_bind_unseparated(longitude);
    }
    if let Some(price) = patch.price {
        set.push("price = ").push_bind_unseparated(price);
    }
    if let Some(status) = patch.status {
        set.push("status = ").push_bind_unseparated(status);
    }
    if let Some(property_type) = patch.property_type {
        set.push("property_type = ")
            .push_bind_unseparated(property_type);
    }
    if let Some(bedrooms) = patch.bedrooms {
        set.push("bedrooms = ").push_bind_unseparated(bedrooms);
    }
    if let Some(bathrooms) = patch.bathrooms {
        set.push("bathrooms = ").push_bind_unseparated(bathrooms);
    }
    if let Some(square_footage) = patch.square_footage {
        set.push("square_footage = ")
            .push_bind_unseparated(square_footage);
    }
    if let Some(additional_notes) = patch.additional_notes {
        set.push("additional_notes = ")
            .push_bind_unseparated(additional_notes);
    }
    if let Some(tags) = patch.tags {
        set.push("tags = ").push_bind_unseparated(tags.map(Json));
    }

    // Unconditional, even for an empty patch.
    set.push("updated_at = ").push_bind_unseparated(Utc::now());

    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(" RETURNING *");

    let property = builder
        .build_query_as::<Property>()
        .fetch_optional(pool)
        .await?;
    Ok(property)
}

/// Soft-delete: flip the flag and refresh the update timestamp. The row is
/// retained. Returns false when no live row matched.
pub async fn soft_delete_property(pool: &PgPool, id: Uuid) -> Result<bool, DatabaseError> {
    let result = sqlx::query(
        "UPDATE properties SET is_deleted = true, updated_at = $1 \
         WHERE id = $2 AND is_deleted = false",
    )
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Global dashboard metrics: total plus per-status counts (all excluding
/// soft-deleted rows) and the five most recently created titles.
#[derive(Debug, Serialize)]
pub struct DashboardMetrics {
    pub total_properties: i64,
    pub for_sale_properties: i64,
    pub for_rent_properties: i64,
    pub sold_properties: i64,
    pub recent_activity: Vec<String>,
}

pub async fn dashboard_metrics(pool: &PgPool) -> Result<DashboardMetrics, DatabaseError> {
    let total_properties = count_properties(pool, None).await?;
    let for_sale_properties = count_properties(pool, Some(PropertyStatus::ForSale)).await?;
    let for_rent_properties = count_properties(pool, Some(PropertyStatus::ForRent)).await?;
    let sold_properties = count_properties(pool, Some(PropertyStatus::Sold)).await?;

    let recent_activity: Vec<String> = sqlx::query(
        "SELECT title FROM properties WHERE is_deleted = false \
         ORDER BY created_at DESC LIMIT 5",
    )
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(|row| row.try_get("title"))
    .collect::<Result<_, _>>()?;

    Ok(DashboardMetrics {
        total_properties,
        for_sale_properties,
        for_rent_properties,
        sold_properties,
        recent_activity,
    })
}

async fn count_properties(
    pool: &PgPool,
    status: Option<PropertyStatus>,
) -> Result<i64, DatabaseError> {
    let row = match status {
        Some(status) => {
            sqlx::query(
                "SELECT COUNT(*) as count FROM properties \
                 WHERE status = $1 AND is_deleted = false",
            )
            .bind(status)
            .fetch_one(pool)
            .await?
        }
        None => {
            sqlx::query("SELECT COUNT(*) as count FROM properties WHERE is_deleted = false")
                .fetch_one(pool)
                .await?
        }
    };
    Ok(row.try_get("count")?)
}
