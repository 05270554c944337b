use actix_web::{
    error::QueryPayloadError, http::StatusCode, web, HttpRequest, HttpResponse, ResponseError,
};
use food_finder::{
    data::{Dish, Restaurant},
    db::{self as db_api, DishSearchProps, RestaurantFilter, RestaurantSearchProps},
};

const NO_RESTAURANTS: &str = "No restaurants found";
const NO_RESTAURANT: &str = "No restaurant found";
const NO_CUISINE_RESTAURANTS: &str = "No restaurants with this cuisine found";
const NO_DISHES: &str = "No dishes found";
const NO_DISH: &str = "No dish found";

pub(super) struct ApiState {
    db_pool: sqlx::SqlitePool,
}

impl ApiState {
    pub(super) fn new(db_pool: sqlx::SqlitePool) -> Self {
        Self { db_pool }
    }
}

#[derive(Debug, thiserror::Error)]
pub(super) enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0:#}")]
    Failure(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Failure(err)
    }
}

#[derive(serde::Serialize)]
struct ErrJsonResp {
    message: String,
}

#[derive(serde::Serialize)]
struct FailJsonResp {
    error: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Failure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::NotFound(message) => HttpResponse::NotFound().json(ErrJsonResp {
                message: message.to_string(),
            }),
            Self::Failure(err) => {
                tracing::error!("request failed: {err:#}");
                HttpResponse::InternalServerError().json(FailJsonResp {
                    error: self.to_string(),
                })
            }
        }
    }
}

#[derive(serde::Serialize)]
struct RestaurantsResp {
    restaurants: Vec<Restaurant>,
}

#[derive(serde::Serialize)]
struct RestaurantResp {
    restaurant: Restaurant,
}

#[derive(serde::Serialize)]
struct DishesResp {
    dishes: Vec<Dish>,
}

#[derive(serde::Serialize)]
struct DishResp {
    dish: Dish,
}

fn non_empty<T>(rows: Vec<T>, message: &'static str) -> Result<Vec<T>, ApiError> {
    if rows.is_empty() {
        Err(ApiError::NotFound(message))
    } else {
        Ok(rows)
    }
}

fn first<T>(rows: Vec<T>, message: &'static str) -> Result<T, ApiError> {
    rows.into_iter().next().ok_or(ApiError::NotFound(message))
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::from(anyhow::Error::new(err).context("fail to read query string")).into()
}

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error))
        .service(restaurants)
        .service(restaurant_details)
        .service(restaurants_by_cuisine)
        .service(filter_restaurants)
        .service(restaurants_by_rating)
        .service(dishes)
        .service(dish_details)
        .service(filter_dishes)
        .service(dishes_by_price);
}

#[derive(serde::Deserialize)]
pub(super) struct DetailsPath {
    id: String,
}

#[derive(serde::Deserialize)]
pub(super) struct CuisinePath {
    cuisine: String,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DishFilter {
    is_veg: Option<String>,
}

#[actix_web::get("/restaurants")]
pub(super) async fn restaurants(data: web::Data<ApiState>) -> Result<HttpResponse, ApiError> {
    let rows = db_api::get_restaurant(&data.db_pool, RestaurantSearchProps::All).await?;
    Ok(HttpResponse::Ok().json(RestaurantsResp {
        restaurants: non_empty(rows, NO_RESTAURANTS)?,
    }))
}

#[actix_web::get("/restaurants/details/{id}")]
pub(super) async fn restaurant_details(
    data: web::Data<ApiState>,
    path: web::Path<DetailsPath>,
) -> Result<HttpResponse, ApiError> {
    let props = RestaurantSearchProps::Id(path.into_inner().id);
    let rows = db_api::get_restaurant(&data.db_pool, props).await?;
    Ok(HttpResponse::Ok().json(RestaurantResp {
        restaurant: first(rows, NO_RESTAURANT)?,
    }))
}

#[actix_web::get("/restaurants/cuisine/{cuisine}")]
pub(super) async fn restaurants_by_cuisine(
    data: web::Data<ApiState>,
    path: web::Path<CuisinePath>,
) -> Result<HttpResponse, ApiError> {
    let props = RestaurantSearchProps::Cuisine(path.into_inner().cuisine);
    let rows = db_api::get_restaurant(&data.db_pool, props).await?;
    Ok(HttpResponse::Ok().json(RestaurantsResp {
        restaurants: non_empty(rows, NO_CUISINE_RESTAURANTS)?,
    }))
}

#[actix_web::get("/restaurants/filter")]
pub(super) async fn filter_restaurants(
    data: web::Data<ApiState>,
    query: web::Query<RestaurantFilter>,
) -> Result<HttpResponse, ApiError> {
    let props = RestaurantSearchProps::Filter(query.into_inner());
    let rows = db_api::get_restaurant(&data.db_pool, props).await?;
    Ok(HttpResponse::Ok().json(RestaurantsResp {
        restaurants: non_empty(rows, NO_RESTAURANTS)?,
    }))
}

#[actix_web::get("/restaurants/sort-by-rating")]
pub(super) async fn restaurants_by_rating(
    data: web::Data<ApiState>,
) -> Result<HttpResponse, ApiError> {
    let rows = db_api::get_restaurant(&data.db_pool, RestaurantSearchProps::SortedByRating).await?;
    Ok(HttpResponse::Ok().json(RestaurantsResp {
        restaurants: non_empty(rows, NO_RESTAURANTS)?,
    }))
}

#[actix_web::get("/dishes")]
pub(super) async fn dishes(data: web::Data<ApiState>) -> Result<HttpResponse, ApiError> {
    let rows = db_api::get_dish(&data.db_pool, DishSearchProps::All).await?;
    Ok(HttpResponse::Ok().json(DishesResp {
        dishes: non_empty(rows, NO_DISHES)?,
    }))
}

#[actix_web::get("/dishes/details/{id}")]
pub(super) async fn dish_details(
    data: web::Data<ApiState>,
    path: web::Path<DetailsPath>,
) -> Result<HttpResponse, ApiError> {
    let props = DishSearchProps::Id(path.into_inner().id);
    let rows = db_api::get_dish(&data.db_pool, props).await?;
    Ok(HttpResponse::Ok().json(DishResp {
        dish: first(rows, NO_DISH)?,
    }))
}

#[actix_web::get("/dishes/filter")]
pub(super) async fn filter_dishes(
    data: web::Data<ApiState>,
    query: web::Query<DishFilter>,
) -> Result<HttpResponse, ApiError> {
    let props = DishSearchProps::Veg(query.into_inner().is_veg);
    let rows = db_api::get_dish(&data.db_pool, props).await?;
    Ok(HttpResponse::Ok().json(DishesResp {
        dishes: non_empty(rows, NO_DISHES)?,
    }))
}

#[actix_web::get("/dishes/sort-by-price")]
pub(super) async fn dishes_by_price(data: web::Data<ApiState>) -> Result<HttpResponse, ApiError> {
    let rows = db_api::get_dish(&data.db_pool, DishSearchProps::SortedByPrice).await?;
    Ok(HttpResponse::Ok().json(DishesResp {
        dishes: non_empty(rows, NO_DISHES)?,
    }))
}
