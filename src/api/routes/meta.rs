//! Raw metadata tables, served as loaded at startup.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;

use crate::api::state::AppState;
use crate::models::{AbilityInfo, ItemInfo, MoveInfo, SpeciesInfo};

pub async fn pokedex(State(state): State<AppState>) -> Json<BTreeMap<String, SpeciesInfo>> {
    Json(state.metadata.pokedex.clone())
}

pub async fn moves(State(state): State<AppState>) -> Json<BTreeMap<String, MoveInfo>> {
    Json(state.metadata.moves.clone())
}

pub async fn items(State(state): State<AppState>) -> Json<BTreeMap<String, ItemInfo>> {
    Json(state.metadata.items.clone())
}

pub async fn abilities(State(state): State<AppState>) -> Json<BTreeMap<String, AbilityInfo>> {
    Json(state.metadata.abilities.clone())
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::routes::test_support::{get_json, setup_test_state};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_meta_pokedex() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));

        let (status, json) = get_json(app, "/api/meta/pokedex").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["greattusk"]["name"], "Great Tusk");
        assert_eq!(json["greattusk"]["baseStats"]["spe"], 87);
    }

    #[tokio::test]
    async fn test_meta_moves() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));

        let (status, json) = get_json(app, "/api/meta/moves").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["headlongrush"]["type"], "Ground");
        assert_eq!(json["headlongrush"]["basePower"], 120);
        assert_eq!(
            json["headlongrush"]["shortDesc"],
            "Lowers the user's Defense and Sp. Def by 1."
        );
        assert!(json["headlongrush"].get("category").is_none());
        assert!(json["headlongrush"].get("accuracy").is_none());
    }

    #[tokio::test]
    async fn test_meta_items_and_abilities() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());

        let (_, items) = get_json(build_router(state.clone()), "/api/meta/items").await;
        assert_eq!(items["boosterenergy"]["name"], "Booster Energy");
        assert_eq!(items["boosterenergy"]["desc"], "Activates Protosynthesis.");
        assert_eq!(items["boosterenergy"]["spritenum"], 745);

        let (_, abilities) = get_json(build_router(state), "/api/meta/abilities").await;
        assert_eq!(abilities["protosynthesis"]["name"], "Protosynthesis");
    }

    #[tokio::test]
    async fn test_health() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));

        let (status, json) = get_json(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }
}
