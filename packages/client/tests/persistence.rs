//! End-to-end persistence tests with the JSON file backend.

use std::sync::Arc;

use cityrunners_client::{
    AppContext,
    channel::DEFAULT_SERVER_URL,
    domain::{Team, TeamIdFactory, Username, View},
    infrastructure::storage::FileKeyValueStore,
};

#[tokio::test]
async fn test_state_survives_restart() {
    // テスト項目: 変更内容が再起動後に復元される（画面遷移は復元されない）
    // given (前提条件):
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    let team_id = TeamIdFactory::generate();

    {
        let storage = FileKeyValueStore::open(&path).await.unwrap();
        let (context, handle) = AppContext::with_storage(Arc::new(storage), DEFAULT_SERVER_URL)
            .await
            .unwrap();
        let store = context.store();

        // when (操作):
        store
            .set_username(Some(Username::new("alice".to_string()).unwrap()))
            .await;
        store.set_admin(true).await;
        let mut team = Team::new(team_id.clone(), "Runners", "red");
        team.add_member("alice");
        store.add_team(team).await;
        store.select_team(Some(team_id.clone())).await;
        store.navigate(View::Game).await;

        assert!(handle.wait_for(store.revision().await).await);
        handle.shutdown().await;
    }

    // then (期待する結果):
    let storage = FileKeyValueStore::open(&path).await.unwrap();
    let (context, handle) = AppContext::with_storage(Arc::new(storage), DEFAULT_SERVER_URL)
        .await
        .unwrap();
    let state = context.store().snapshot().await;
    assert_eq!(state.username.as_ref().map(|u| u.as_str()), Some("alice"));
    assert!(state.admin);
    assert_eq!(state.current_team.as_ref(), Some(&team_id));
    assert!(state.team(&team_id).unwrap().has_member("alice"));
    assert_eq!(state.navigation, View::Login);
    handle.shutdown().await;
}

#[tokio::test]
async fn test_logout_is_persisted() {
    // テスト項目: ログアウトで消えた値は永続化からも消える
    // given (前提条件):
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("store.json");
    let storage = FileKeyValueStore::open(&path).await.unwrap();
    let (context, handle) = AppContext::with_storage(Arc::new(storage), DEFAULT_SERVER_URL)
        .await
        .unwrap();
    context
        .store()
        .set_username(Some(Username::new("bob".to_string()).unwrap()))
        .await;

    // when (操作):
    context.store().logout().await;
    assert!(handle.wait_for(context.store().revision().await).await);
    handle.shutdown().await;

    // then (期待する結果):
    let contents = tokio::fs::read_to_string(&path).await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert!(json["username"].is_null());
    assert!(json["token"].is_null());
}
