//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to application use cases. Every
//! route except the health check authenticates the caller's bearer
//! token through the identity directory.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::{delete, get, patch, post},
};

use crate::application::dto::{BoxDetailDto, BoxDto, PokemonDto, TradeDto};
use crate::application::ports::{
    DestinationPolicy, IdentityDirectory, InventoryStore, InventoryTransfer,
};
use crate::application::use_cases::{
    ManageBoxesUseCase, ManagePokemonsUseCase, ProposeTradeUseCase, RespondTradeUseCase,
    SearchUseCase, TradeQueriesUseCase,
};
use crate::domain::shared::{BoxId, Page, PokemonId, TradeId, TrainerId};
use crate::domain::trading::aggregate::ProposeTradeCommand;
use crate::domain::trading::repository::TradeRepository;
use crate::domain::trading::value_objects::TradeDecision;

use super::request::{
    CreateBoxRequest, CreatePokemonRequest, MovePokemonRequest, PokemonSearchQuery,
    ProposeTradeRequest, RenameBoxRequest, TradeListQuery, TrainerSearchQuery,
    UpdatePokemonRequest,
};
use super::response::{ApiError, HealthResponse, TrainerProfileResponse};

/// Application state shared across handlers.
pub struct AppState<S, I, T, X, D>
where
    S: InventoryStore,
    I: IdentityDirectory,
    T: TradeRepository,
    X: InventoryTransfer,
    D: DestinationPolicy,
{
    /// Box management use case.
    pub boxes: Arc<ManageBoxesUseCase<S>>,
    /// Creature management use case.
    pub pokemons: Arc<ManagePokemonsUseCase<S>>,
    /// Trade proposal use case.
    pub propose_trade: Arc<ProposeTradeUseCase<S, I, T>>,
    /// Trade response use case (the executor).
    pub respond_trade: Arc<RespondTradeUseCase<X, T, D>>,
    /// Trade read side.
    pub trade_queries: Arc<TradeQueriesUseCase<T>>,
    /// Search use case.
    pub search: Arc<SearchUseCase<S, I>>,
    /// Identity directory for authentication.
    pub identity: Arc<I>,
    /// Application version.
    pub version: String,
}

impl<S, I, T, X, D> Clone for AppState<S, I, T, X, D>
where
    S: InventoryStore,
    I: IdentityDirectory,
    T: TradeRepository,
    X: InventoryTransfer,
    D: DestinationPolicy,
{
    fn clone(&self) -> Self {
        Self {
            boxes: Arc::clone(&self.boxes),
            pokemons: Arc::clone(&self.pokemons),
            propose_trade: Arc::clone(&self.propose_trade),
            respond_trade: Arc::clone(&self.respond_trade),
            trade_queries: Arc::clone(&self.trade_queries),
            search: Arc::clone(&self.search),
            identity: Arc::clone(&self.identity),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<S, I, T, X, D>(state: AppState<S, I, T, X, D>) -> Router
where
    S: InventoryStore + 'static,
    I: IdentityDirectory + 'static,
    T: TradeRepository + 'static,
    X: InventoryTransfer + 'static,
    D: DestinationPolicy + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/boxes", get(list_boxes).post(create_box))
        .route(
            "/api/v1/boxes/{id}",
            get(get_box).patch(rename_box).delete(delete_box),
        )
        .route("/api/v1/boxes/{id}/pokemons", post(create_pokemon))
        .route("/api/v1/pokemons", get(search_pokemons))
        .route(
            "/api/v1/pokemons/{id}",
            get(get_pokemon).patch(update_pokemon).delete(delete_pokemon),
        )
        .route("/api/v1/pokemons/{id}/move", post(move_pokemon))
        .route("/api/v1/trainers", get(search_trainers))
        .route("/api/v1/trainers/{id}", get(get_trainer))
        .route("/api/v1/trades", get(list_trades).post(propose_trade))
        .route("/api/v1/trades/{id}", get(get_trade))
        .route("/api/v1/trades/{id}/accept", patch(accept_trade))
        .route("/api/v1/trades/{id}/decline", patch(decline_trade))
        .with_state(state)
}

/// Resolve the caller from the `Authorization: Bearer` header.
async fn authenticate<I>(identity: &Arc<I>, headers: &HeaderMap) -> Result<TrainerId, ApiError>
where
    I: IdentityDirectory,
{
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(ApiError::unauthenticated)?;
    identity
        .authenticate(token)
        .await?
        .ok_or_else(ApiError::unauthenticated)
}

fn page_from(page: Option<usize>, size: Option<usize>) -> Result<Page, ApiError> {
    match (page, size) {
        (None, None) => Ok(Page::default()),
        (p, s) => Ok(Page::new(
            p.unwrap_or(0),
            s.unwrap_or_else(|| Page::default().size()),
        )?),
    }
}

/// Health check endpoint.
async fn health_check<S, I, T, X, D>(State(state): State<AppState<S, I, T, X, D>>) -> impl IntoResponse
where
    S: InventoryStore,
    I: IdentityDirectory,
    T: TradeRepository,
    X: InventoryTransfer,
    D: DestinationPolicy,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

async fn list_boxes<S, I, T, X, D>(
    State(state): State<AppState<S, I, T, X, D>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError>
where
    S: InventoryStore,
    I: IdentityDirectory,
    T: TradeRepository,
    X: InventoryTransfer,
    D: DestinationPolicy,
{
    let caller = authenticate(&state.identity, &headers).await?;
    let boxes = state.boxes.list(&caller).await?;
    Ok(Json(boxes.iter().map(BoxDto::from_box).collect::<Vec<_>>()))
}

async fn create_box<S, I, T, X, D>(
    State(state): State<AppState<S, I, T, X, D>>,
    headers: HeaderMap,
    Json(request): Json<CreateBoxRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: InventoryStore,
    I: IdentityDirectory,
    T: TradeRepository,
    X: InventoryTransfer,
    D: DestinationPolicy,
{
    let caller = authenticate(&state.identity, &headers).await?;
    let created = state.boxes.create(&caller, &request.name).await?;
    Ok((StatusCode::CREATED, Json(BoxDto::from_box(&created))))
}

async fn get_box<S, I, T, X, D>(
    State(state): State<AppState<S, I, T, X, D>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    S: InventoryStore,
    I: IdentityDirectory,
    T: TradeRepository,
    X: InventoryTransfer,
    D: DestinationPolicy,
{
    authenticate(&state.identity, &headers).await?;
    let (found, contents) = state.boxes.get(&BoxId::new(id)).await?;
    Ok(Json(BoxDetailDto::from_parts(&found, &contents)))
}

async fn rename_box<S, I, T, X, D>(
    State(state): State<AppState<S, I, T, X, D>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(request): Json<RenameBoxRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: InventoryStore,
    I: IdentityDirectory,
    T: TradeRepository,
    X: InventoryTransfer,
    D: DestinationPolicy,
{
    let caller = authenticate(&state.identity, &headers).await?;
    let renamed = state
        .boxes
        .rename(&BoxId::new(id), &caller, &request.name)
        .await?;
    Ok(Json(BoxDto::from_box(&renamed)))
}

async fn delete_box<S, I, T, X, D>(
    State(state): State<AppState<S, I, T, X, D>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    S: InventoryStore,
    I: IdentityDirectory,
    T: TradeRepository,
    X: InventoryTransfer,
    D: DestinationPolicy,
{
    let caller = authenticate(&state.identity, &headers).await?;
    state.boxes.delete(&BoxId::new(id), &caller).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_pokemon<S, I, T, X, D>(
    State(state): State<AppState<S, I, T, X, D>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(request): Json<CreatePokemonRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: InventoryStore,
    I: IdentityDirectory,
    T: TradeRepository,
    X: InventoryTransfer,
    D: DestinationPolicy,
{
    let caller = authenticate(&state.identity, &headers).await?;
    let created = state
        .pokemons
        .create(&BoxId::new(id), &caller, request.into_command())
        .await?;
    Ok((StatusCode::CREATED, Json(PokemonDto::from_pokemon(&created))))
}

async fn search_pokemons<S, I, T, X, D>(
    State(state): State<AppState<S, I, T, X, D>>,
    headers: HeaderMap,
    Query(query): Query<PokemonSearchQuery>,
) -> Result<impl IntoResponse, ApiError>
where
    S: InventoryStore,
    I: IdentityDirectory,
    T: TradeRepository,
    X: InventoryTransfer,
    D: DestinationPolicy,
{
    authenticate(&state.identity, &headers).await?;
    let page = page_from(query.page, query.page_size)?;
    let found = state.search.pokemons(&query.into_filter(), page).await?;
    Ok(Json(
        found.iter().map(PokemonDto::from_owned).collect::<Vec<_>>(),
    ))
}

async fn get_pokemon<S, I, T, X, D>(
    State(state): State<AppState<S, I, T, X, D>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    S: InventoryStore,
    I: IdentityDirectory,
    T: TradeRepository,
    X: InventoryTransfer,
    D: DestinationPolicy,
{
    authenticate(&state.identity, &headers).await?;
    let owned = state.pokemons.get(&PokemonId::new(id)).await?;
    Ok(Json(PokemonDto::from_owned(&owned)))
}

async fn update_pokemon<S, I, T, X, D>(
    State(state): State<AppState<S, I, T, X, D>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(request): Json<UpdatePokemonRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: InventoryStore,
    I: IdentityDirectory,
    T: TradeRepository,
    X: InventoryTransfer,
    D: DestinationPolicy,
{
    let caller = authenticate(&state.identity, &headers).await?;
    let updated = state
        .pokemons
        .update(&PokemonId::new(id), &caller, request.into_patch())
        .await?;
    Ok(Json(PokemonDto::from_pokemon(&updated)))
}

async fn move_pokemon<S, I, T, X, D>(
    State(state): State<AppState<S, I, T, X, D>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(request): Json<MovePokemonRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: InventoryStore,
    I: IdentityDirectory,
    T: TradeRepository,
    X: InventoryTransfer,
    D: DestinationPolicy,
{
    let caller = authenticate(&state.identity, &headers).await?;
    let moved = state
        .pokemons
        .relocate(&PokemonId::new(id), &caller, &BoxId::new(request.box_id))
        .await?;
    Ok(Json(PokemonDto::from_pokemon(&moved)))
}

async fn delete_pokemon<S, I, T, X, D>(
    State(state): State<AppState<S, I, T, X, D>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    S: InventoryStore,
    I: IdentityDirectory,
    T: TradeRepository,
    X: InventoryTransfer,
    D: DestinationPolicy,
{
    let caller = authenticate(&state.identity, &headers).await?;
    state.pokemons.delete(&PokemonId::new(id), &caller).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn search_trainers<S, I, T, X, D>(
    State(state): State<AppState<S, I, T, X, D>>,
    headers: HeaderMap,
    Query(query): Query<TrainerSearchQuery>,
) -> Result<impl IntoResponse, ApiError>
where
    S: InventoryStore,
    I: IdentityDirectory,
    T: TradeRepository,
    X: InventoryTransfer,
    D: DestinationPolicy,
{
    authenticate(&state.identity, &headers).await?;
    let page = page_from(query.page, query.page_size)?;
    let found = state.search.trainers(&query.into_filter(), page).await?;
    Ok(Json(found))
}

async fn get_trainer<S, I, T, X, D>(
    State(state): State<AppState<S, I, T, X, D>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    S: InventoryStore,
    I: IdentityDirectory,
    T: TradeRepository,
    X: InventoryTransfer,
    D: DestinationPolicy,
{
    authenticate(&state.identity, &headers).await?;
    let trainer_id = TrainerId::new(id);
    let (trainer, pokemons) = state
        .search
        .trainer_profile(&trainer_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("trainer not found: {trainer_id}")))?;
    Ok(Json(TrainerProfileResponse {
        trainer,
        pokemons: pokemons.iter().map(PokemonDto::from_owned).collect(),
    }))
}

async fn propose_trade<S, I, T, X, D>(
    State(state): State<AppState<S, I, T, X, D>>,
    headers: HeaderMap,
    Json(request): Json<ProposeTradeRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: InventoryStore,
    I: IdentityDirectory,
    T: TradeRepository,
    X: InventoryTransfer,
    D: DestinationPolicy,
{
    let caller = authenticate(&state.identity, &headers).await?;
    let command = ProposeTradeCommand {
        sender_id: caller,
        receiver_id: TrainerId::new(request.receiver_id),
        offered: request
            .pokemons_offered_ids
            .into_iter()
            .map(PokemonId::new)
            .collect(),
        wanted: request
            .pokemons_wanted_ids
            .into_iter()
            .map(PokemonId::new)
            .collect(),
    };
    let trade = state.propose_trade.execute(command).await?;
    Ok((StatusCode::CREATED, Json(TradeDto::from_trade(&trade))))
}

async fn list_trades<S, I, T, X, D>(
    State(state): State<AppState<S, I, T, X, D>>,
    headers: HeaderMap,
    Query(query): Query<TradeListQuery>,
) -> Result<impl IntoResponse, ApiError>
where
    S: InventoryStore,
    I: IdentityDirectory,
    T: TradeRepository,
    X: InventoryTransfer,
    D: DestinationPolicy,
{
    let caller = authenticate(&state.identity, &headers).await?;
    let page = page_from(query.page, query.page_size)?;
    let trades = state
        .trade_queries
        .list(&caller, query.status_code, page)
        .await?;
    Ok(Json(
        trades.iter().map(TradeDto::from_trade).collect::<Vec<_>>(),
    ))
}

async fn get_trade<S, I, T, X, D>(
    State(state): State<AppState<S, I, T, X, D>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    S: InventoryStore,
    I: IdentityDirectory,
    T: TradeRepository,
    X: InventoryTransfer,
    D: DestinationPolicy,
{
    let caller = authenticate(&state.identity, &headers).await?;
    let trade = state.trade_queries.get(&TradeId::new(id), &caller).await?;
    Ok(Json(TradeDto::from_trade(&trade)))
}

async fn accept_trade<S, I, T, X, D>(
    State(state): State<AppState<S, I, T, X, D>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    S: InventoryStore,
    I: IdentityDirectory,
    T: TradeRepository,
    X: InventoryTransfer,
    D: DestinationPolicy,
{
    respond(state, headers, id, TradeDecision::Accept).await
}

async fn decline_trade<S, I, T, X, D>(
    State(state): State<AppState<S, I, T, X, D>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    S: InventoryStore,
    I: IdentityDirectory,
    T: TradeRepository,
    X: InventoryTransfer,
    D: DestinationPolicy,
{
    respond(state, headers, id, TradeDecision::Decline).await
}

async fn respond<S, I, T, X, D>(
    state: AppState<S, I, T, X, D>,
    headers: HeaderMap,
    id: String,
    decision: TradeDecision,
) -> Result<Json<TradeDto>, ApiError>
where
    S: InventoryStore,
    I: IdentityDirectory,
    T: TradeRepository,
    X: InventoryTransfer,
    D: DestinationPolicy,
{
    let caller = authenticate(&state.identity, &headers).await?;
    let trade = state
        .respond_trade
        .execute(&TradeId::new(id), &caller, decision)
        .await?;
    Ok(Json(TradeDto::from_trade(&trade)))
}
