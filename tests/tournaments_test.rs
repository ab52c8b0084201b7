mod common;

use axum::http::StatusCode;
use serde_json::json;

// ─────────────────────────────────────────────────────────────────────────────
// Create
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_tournament_returns_resource_with_links() {
    let app = common::test_app().await;

    let (status, body) =
        common::post_json(&app, "/api/tournaments", &json!({ "name": "PGL-Major" })).await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    let v = common::json(&body);
    assert_eq!(v["data"]["name"], "PGL-Major");
    assert!(v["data"]["parentTournamentName"].is_null());
    let rels: Vec<&str> = v["links"]
        .as_array()
        .map(|links| links.iter().filter_map(|l| l["rel"].as_str()).collect())
        .unwrap_or_default();
    for rel in [
        "self",
        "update",
        "delete",
        "sub-tournaments",
        "register-player",
        "registered-players",
    ] {
        assert!(rels.contains(&rel), "missing link {rel}: {body}");
    }
    assert!(!rels.contains(&"parent-tournament"));
}

#[tokio::test]
async fn create_sub_tournament_links_to_parent() {
    let app = common::test_app().await;
    common::create_tournament(&app, "Major", None).await;

    let (status, body) = common::post_json(
        &app,
        "/api/tournaments",
        &json!({ "name": "Playoffs", "parentTournamentName": "Major" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    let v = common::json(&body);
    assert_eq!(v["data"]["parentTournamentName"], "Major");
    let parent_link = v["links"]
        .as_array()
        .and_then(|links| links.iter().find(|l| l["rel"] == "parent-tournament"))
        .cloned()
        .unwrap_or_default();
    assert_eq!(parent_link["href"], "/api/tournaments/Major");
}

#[tokio::test]
async fn create_duplicate_tournament_is_conflict() {
    let app = common::test_app().await;
    common::create_tournament(&app, "Major", None).await;

    let (status, body) =
        common::post_json(&app, "/api/tournaments", &json!({ "name": "Major" })).await;

    assert_eq!(status, StatusCode::CONFLICT, "{body}");
    assert_eq!(common::json(&body)["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn create_tournament_with_blank_name_is_bad_request() {
    let app = common::test_app().await;

    let (status, _) = common::post_json(&app, "/api/tournaments", &json!({ "name": "  " })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_tournament_with_unknown_parent_is_rejected() {
    let app = common::test_app().await;

    let (status, body) = common::post_json(
        &app,
        "/api/tournaments",
        &json!({ "name": "Orphan", "parentTournamentName": "Nowhere" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert_eq!(common::json(&body)["error"]["code"], "UNKNOWN_PARENT");
}

#[tokio::test]
async fn empty_parent_name_creates_root() {
    let app = common::test_app().await;

    let (status, body) = common::post_json(
        &app,
        "/api/tournaments",
        &json!({ "name": "Root", "parentTournamentName": "" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert!(common::json(&body)["data"]["parentTournamentName"].is_null());
}

#[tokio::test]
async fn five_levels_allowed_sixth_rejected() {
    let app = common::test_app().await;

    common::create_tournament(&app, "Level1", None).await;
    for level in 2..=5 {
        let parent = format!("Level{}", level - 1);
        common::create_tournament(&app, &format!("Level{level}"), Some(&parent)).await;
    }

    let (status, body) = common::post_json(
        &app,
        "/api/tournaments",
        &json!({ "name": "Level6", "parentTournamentName": "Level5" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    let v = common::json(&body);
    assert_eq!(v["error"]["code"], "NESTING_DEPTH_EXCEEDED");
    assert_eq!(v["error"]["message"], "Maximum tournament nesting depth exceeded");

    let (status, _) = common::get(&app, "/api/tournaments/Level6").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ─────────────────────────────────────────────────────────────────────────────
// Read
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_tournament_with_sub_tournaments() {
    let app = common::test_app().await;
    common::create_tournament(&app, "Major", None).await;
    common::create_tournament(&app, "Challengers", Some("Major")).await;
    common::create_tournament(&app, "Legends", Some("Major")).await;

    let (status, body) = common::get(&app, "/api/tournaments/Major?include=sub-tournaments").await;

    assert_eq!(status, StatusCode::OK, "{body}");
    let v = common::json(&body);
    let subs = v["data"]["subTournaments"].as_array().cloned().unwrap_or_default();
    assert_eq!(subs.len(), 2);
    assert!(subs.iter().all(|s| s["parentTournamentName"] == "Major"));

    let (_, body) = common::get(&app, "/api/tournaments/Major").await;
    let plain = common::json(&body);
    assert_eq!(plain["data"]["subTournaments"], json!([]));
}

#[tokio::test]
async fn get_missing_tournament_is_not_found() {
    let app = common::test_app().await;

    let (status, body) = common::get(&app, "/api/tournaments/Nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(common::json(&body)["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn list_tournaments() {
    let app = common::test_app().await;
    common::create_tournament(&app, "B", None).await;
    common::create_tournament(&app, "A", None).await;

    let (status, body) = common::get(&app, "/api/tournaments").await;

    assert_eq!(status, StatusCode::OK);
    let v = common::json(&body);
    assert_eq!(v.as_array().map(Vec::len), Some(2));
    assert_eq!(v[0]["data"]["name"], "A");
}

// ─────────────────────────────────────────────────────────────────────────────
// Update
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_tournament_changes_parent() {
    let app = common::test_app().await;
    common::create_tournament(&app, "Major", None).await;
    common::create_tournament(&app, "Qualifier", None).await;

    let (status, body) = common::put_json(
        &app,
        "/api/tournaments/Qualifier",
        &json!({ "name": "Qualifier", "parentTournamentName": "Major" }),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT, "{body}");

    let (_, body) = common::get(&app, "/api/tournaments/Qualifier").await;
    assert_eq!(common::json(&body)["data"]["parentTournamentName"], "Major");
}

#[tokio::test]
async fn update_tournament_name_mismatch_is_bad_request() {
    let app = common::test_app().await;
    common::create_tournament(&app, "Major", None).await;

    let (status, _) =
        common::put_json(&app, "/api/tournaments/Major", &json!({ "name": "Other" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_missing_tournament_is_not_found() {
    let app = common::test_app().await;

    let (status, _) =
        common::put_json(&app, "/api/tournaments/Ghost", &json!({ "name": "Ghost" })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_tournament_to_be_its_own_parent_is_rejected() {
    let app = common::test_app().await;
    common::create_tournament(&app, "Major", None).await;

    let (status, body) = common::put_json(
        &app,
        "/api/tournaments/Major",
        &json!({ "name": "Major", "parentTournamentName": "Major" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    let v = common::json(&body);
    assert_eq!(v["error"]["code"], "SELF_PARENT");
    assert_eq!(v["error"]["detail"], "A tournament cannot be its own parent");
}

#[tokio::test]
async fn update_tournament_under_its_descendant_is_rejected() {
    let app = common::test_app().await;
    common::create_tournament(&app, "A", None).await;
    common::create_tournament(&app, "B", Some("A")).await;
    common::create_tournament(&app, "C", Some("B")).await;

    let (status, body) = common::put_json(
        &app,
        "/api/tournaments/A",
        &json!({ "name": "A", "parentTournamentName": "C" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert_eq!(common::json(&body)["error"]["code"], "CYCLE");
}

#[tokio::test]
async fn update_tournament_under_deepest_level_is_rejected() {
    let app = common::test_app().await;
    common::create_tournament(&app, "Level1", None).await;
    for level in 2..=5 {
        let parent = format!("Level{}", level - 1);
        common::create_tournament(&app, &format!("Level{level}"), Some(&parent)).await;
    }
    common::create_tournament(&app, "Loose", None).await;

    let (status, body) = common::put_json(
        &app,
        "/api/tournaments/Loose",
        &json!({ "name": "Loose", "parentTournamentName": "Level5" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert_eq!(common::json(&body)["error"]["code"], "NESTING_DEPTH_EXCEEDED");
}

// ─────────────────────────────────────────────────────────────────────────────
// Delete
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_tournament_without_registrations() {
    let app = common::test_app().await;
    common::create_tournament(&app, "X", None).await;
    common::create_player(&app, "q1").await;

    let (status, _) = common::delete(&app, "/api/tournaments/X").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = common::get(&app, "/api/tournaments/X").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = common::get(&app, "/api/players/q1").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn delete_tournament_cascades_to_subtree_only() {
    let app = common::test_app().await;
    common::create_tournament(&app, "Major", None).await;
    common::create_tournament(&app, "Stage1", Some("Major")).await;
    common::create_tournament(&app, "Stage2", Some("Major")).await;
    common::create_tournament(&app, "Group", Some("Stage1")).await;
    common::create_tournament(&app, "Other", None).await;
    common::create_player(&app, "p1").await;

    for tournament in ["Major", "Stage1", "Group", "Other"] {
        let (status, body) = common::register(&app, tournament, "p1").await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
    }

    let (status, _) = common::delete(&app, "/api/tournaments/Major").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    for gone in ["Major", "Stage1", "Stage2", "Group"] {
        let (status, _) = common::get(&app, &format!("/api/tournaments/{gone}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{gone} should be deleted");
    }

    let (_, body) = common::get(&app, "/api/registrations").await;
    let remaining = common::json(&body);
    assert_eq!(remaining.as_array().map(Vec::len), Some(1));
    assert_eq!(remaining[0]["data"]["tournamentName"], "Other");

    let (status, _) = common::get(&app, "/api/tournaments/Other").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn delete_missing_tournament_is_not_found() {
    let app = common::test_app().await;

    let (status, _) = common::delete(&app, "/api/tournaments/Ghost").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
