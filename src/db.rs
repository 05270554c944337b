use anyhow::Context;
use sqlx::sqlite::SqlitePool;

use crate::data::{Dish, Restaurant};

/// Raw query-string values for the compound restaurant filter.
///
/// Values are bound as received; a missing one binds as `NULL` and matches nothing.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantFilter {
    pub is_veg: Option<String>,
    pub has_outdoor_seating: Option<String>,
    pub is_luxury: Option<String>,
}

#[derive(Debug, Clone)]
pub enum RestaurantSearchProps {
    All,
    Id(String),
    Cuisine(String),
    Filter(RestaurantFilter),
    SortedByRating,
}

#[derive(Debug, Clone)]
pub enum DishSearchProps {
    All,
    Id(String),
    Veg(Option<String>),
    SortedByPrice,
}

pub async fn get_restaurant(
    db_conn: &SqlitePool,
    props: RestaurantSearchProps,
) -> anyhow::Result<Vec<Restaurant>> {
    use RestaurantSearchProps::*;

    let query = match &props {
        All => sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants"),
        Id(id) => sqlx::query_as("SELECT * FROM restaurants WHERE id = ?").bind(id.as_str()),
        Cuisine(cuisine) => {
            sqlx::query_as("SELECT * FROM restaurants WHERE cuisine = ?").bind(cuisine.as_str())
        }
        Filter(filter) => sqlx::query_as(
            r#"
SELECT * FROM restaurants
WHERE isVeg = ? AND hasOutdoorSeating = ? AND isLuxury = ?"#,
        )
        .bind(filter.is_veg.as_deref())
        .bind(filter.has_outdoor_seating.as_deref())
        .bind(filter.is_luxury.as_deref()),
        SortedByRating => sqlx::query_as("SELECT * FROM restaurants ORDER BY rating DESC"),
    };

    let rows = query
        .fetch_all(db_conn)
        .await
        .with_context(|| format!("fail to get restaurants by {props:?}"))?;
    tracing::debug!(?props, count = rows.len(), "restaurant lookup");

    Ok(rows)
}

pub async fn get_dish(db_conn: &SqlitePool, props: DishSearchProps) -> anyhow::Result<Vec<Dish>> {
    use DishSearchProps::*;

    let query = match &props {
        All => sqlx::query_as::<_, Dish>("SELECT * FROM dishes"),
        Id(id) => sqlx::query_as("SELECT * FROM dishes WHERE id = ?").bind(id.as_str()),
        Veg(is_veg) => sqlx::query_as("SELECT * FROM dishes WHERE isVeg = ?").bind(is_veg.as_deref()),
        SortedByPrice => sqlx::query_as("SELECT * FROM dishes ORDER BY price"),
    };

    let rows = query
        .fetch_all(db_conn)
        .await
        .with_context(|| format!("fail to get dishes by {props:?}"))?;
    tracing::debug!(?props, count = rows.len(), "dish lookup");

    Ok(rows)
}
