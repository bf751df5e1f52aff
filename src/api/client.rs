// HTTP implementation of the record source
// Wire DTOs live here; everything past this file works with domain models.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use super::{ListFilters, PageResult, RecordSource};
use crate::config;
use crate::error::{AppError, AppResult};
use crate::http_config::HttpConfig;
use crate::models::{MeetingType, RawBooking};

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    success: bool,
    data: Option<T>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MeetingTypeListData {
    items: Vec<MeetingTypeDto>,
    pagination: PaginationDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaginationDto {
    page: u32,
    pages: u32,
    total: u64,
    has_more: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MeetingTypeDto {
    id: String,
    name: Option<String>,
    description: Option<String>,
    duration: Option<u32>,
    is_active: Option<bool>,
    color: Option<String>,
    category: Option<String>,
    created_at: Option<DateTime<Utc>>,
    available_date: Option<NaiveDate>,
    bookings_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct BookingsData {
    bookings: Vec<RawBooking>,
}

fn convert_meeting_type(dto: MeetingTypeDto) -> MeetingType {
    MeetingType {
        id: dto.id,
        name: dto.name.unwrap_or_else(|| "Untitled".to_string()),
        description: dto.description.unwrap_or_default(),
        duration_minutes: dto.duration.unwrap_or(30),
        is_active: dto.is_active.unwrap_or(true),
        color: dto.color,
        category: dto.category,
        created_at: dto.created_at.unwrap_or_else(Utc::now),
        available_date: dto.available_date,
        bookings_count: dto.bookings_count.unwrap_or(0),
    }
}

/// Authenticated reqwest-backed record source.
pub struct ApiClient {
    list_http: Client,
    booking_http: Client,
    base: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(api_base: &str, token: Option<String>) -> AppResult<Self> {
        config::validate_api_base(api_base)?;

        // A base without a trailing slash would swallow its last path
        // segment on join().
        let normalized = if api_base.ends_with('/') {
            api_base.to_string()
        } else {
            format!("{}/", api_base)
        };
        let base = Url::parse(&normalized)
            .map_err(|e| AppError::config(format!("Invalid API base URL: {}", e)))?;

        Ok(Self {
            list_http: HttpConfig::list_api().build_client()?,
            booking_http: HttpConfig::booking_api().build_client()?,
            base,
            token,
        })
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base
            .join(path)
            .map_err(|e| AppError::config(format!("Invalid endpoint path '{}': {}", path, e)))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        http: &Client,
        url: Url,
        query: &[(String, String)],
    ) -> AppResult<T> {
        debug!("GET {}", url);
        let mut request = http.get(url).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(AppError::Unauthorized);
        }
        if !response.status().is_success() {
            return Err(AppError::api(format!("HTTP {}", response.status())));
        }

        let envelope: ApiEnvelope<T> = response.json().await?;
        if !envelope.success {
            return Err(AppError::api(
                envelope
                    .message
                    .unwrap_or_else(|| "request was not successful".to_string()),
            ));
        }
        envelope
            .data
            .ok_or_else(|| AppError::api("response is missing its data payload"))
    }
}

#[async_trait]
impl RecordSource for ApiClient {
    async fn fetch_page(
        &self,
        page: u32,
        limit: u32,
        filters: &ListFilters,
    ) -> AppResult<PageResult> {
        let url = self.endpoint("meeting-types")?;
        let mut query = vec![
            ("page".to_string(), page.to_string()),
            ("limit".to_string(), limit.to_string()),
        ];
        query.extend(filters.to_query());

        let data: MeetingTypeListData = self.get_json(&self.list_http, url, &query).await?;

        Ok(PageResult {
            items: data.items.into_iter().map(convert_meeting_type).collect(),
            page: data.pagination.page,
            pages: data.pagination.pages,
            total: data.pagination.total,
            has_more: data.pagination.has_more,
        })
    }

    async fn fetch_bookings(&self, meeting_type_id: &str) -> AppResult<Vec<RawBooking>> {
        let url = self.endpoint(&format!("meeting-types/{}/bookings", meeting_type_id))?;
        let data: BookingsData = self.get_json(&self.booking_http, url, &[]).await?;
        Ok(data.bookings)
    }
}
