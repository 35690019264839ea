use std::sync::Arc;

use store_locator::application::commands::stores::{
    AddReviewCommand, ToggleHeartCommand, UpdateStoreCommand,
};
use store_locator::application::error::ApplicationError;
use store_locator::application::queries::stores::ListStoresQuery;
use store_locator::domain::errors::DomainError;
use store_locator::domain::store::StoreReadRepository;

mod support;

use support::{BlindSlugReadRepo, StoreRequestBuilder, actor, build_services, memory_repositories};

#[tokio::test]
async fn repeated_names_get_numbered_slugs() {
    let services = build_services(memory_repositories());
    let author = actor(1);

    let mut slugs = Vec::new();
    for _ in 0..3 {
        let store = services
            .store_commands
            .create_store(&author, StoreRequestBuilder::new("Pizza Place").command())
            .await
            .unwrap();
        slugs.push(store.slug);
    }

    assert_eq!(slugs, ["pizza-place", "pizza-place-2", "pizza-place-3"]);
}

#[tokio::test]
async fn numbered_name_does_not_block_the_base_name() {
    let services = build_services(memory_repositories());
    let author = actor(1);

    let numbered = services
        .store_commands
        .create_store(&author, StoreRequestBuilder::new("Pizza 2").command())
        .await
        .unwrap();
    assert_eq!(numbered.slug, "pizza-2");

    let mut slugs = Vec::new();
    for _ in 0..3 {
        let store = services
            .store_commands
            .create_store(&author, StoreRequestBuilder::new("Pizza").command())
            .await
            .unwrap();
        slugs.push(store.slug);
    }

    // "Pizza 2" counts as a match, so the first "Pizza" becomes `pizza-3`.
    assert_eq!(slugs, ["pizza-3", "pizza-4", "pizza-5"]);
}

#[tokio::test]
async fn gap_left_by_a_rename_is_skipped() {
    let services = build_services(memory_repositories());
    let author = actor(1);

    let mut ids = Vec::new();
    for _ in 0..3 {
        let store = services
            .store_commands
            .create_store(&author, StoreRequestBuilder::new("Pizza").command())
            .await
            .unwrap();
        ids.push(store.id);
    }

    services
        .store_commands
        .update_store(
            &author,
            UpdateStoreCommand {
                id: ids[1],
                name: Some("Taco Stand".into()),
                ..UpdateStoreCommand::default()
            },
        )
        .await
        .unwrap();

    // `pizza` and `pizza-3` remain: two matches, `pizza-3` taken, so `pizza-4`.
    let next = services
        .store_commands
        .create_store(&author, StoreRequestBuilder::new("Pizza").command())
        .await
        .unwrap();
    assert_eq!(next.slug, "pizza-4");
}

#[tokio::test]
async fn longer_names_sharing_a_prefix_do_not_bump_the_counter() {
    let services = build_services(memory_repositories());
    let author = actor(1);

    services
        .store_commands
        .create_store(&author, StoreRequestBuilder::new("Pizza Place Deluxe").command())
        .await
        .unwrap();
    let store = services
        .store_commands
        .create_store(&author, StoreRequestBuilder::new("Pizza Place").command())
        .await
        .unwrap();

    assert_eq!(store.slug, "pizza-place");
}

#[tokio::test]
async fn unslugifiable_name_falls_back_to_timestamp_slug() {
    let services = build_services(memory_repositories());
    let store = services
        .store_commands
        .create_store(&actor(1), StoreRequestBuilder::new("!!!").command())
        .await
        .unwrap();

    let expected = format!("store-{}", support::fixed_now().timestamp());
    assert_eq!(store.slug, expected);
}

#[tokio::test]
async fn update_without_rename_keeps_slug() {
    let services = build_services(memory_repositories());
    let author = actor(1);
    let created = services
        .store_commands
        .create_store(&author, StoreRequestBuilder::new("Pizza Place").command())
        .await
        .unwrap();

    let updated = services
        .store_commands
        .update_store(
            &author,
            UpdateStoreCommand {
                id: created.id,
                name: Some("  Pizza Place ".into()),
                description: Some("Thin crust".into()),
                ..UpdateStoreCommand::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.slug, "pizza-place");
    assert_eq!(updated.description.as_deref(), Some("Thin crust"));
}

#[tokio::test]
async fn rename_derives_a_fresh_slug_without_counting_itself() {
    let services = build_services(memory_repositories());
    let author = actor(1);
    services
        .store_commands
        .create_store(&author, StoreRequestBuilder::new("Taco Stand").command())
        .await
        .unwrap();
    let created = services
        .store_commands
        .create_store(&author, StoreRequestBuilder::new("Pizza Place").command())
        .await
        .unwrap();

    let renamed = services
        .store_commands
        .update_store(
            &author,
            UpdateStoreCommand {
                id: created.id,
                name: Some("Taco Stand".into()),
                ..UpdateStoreCommand::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.slug, "taco-stand-2");

    // Renaming back to a name only this store ever used is a plain base slug.
    let restored = services
        .store_commands
        .update_store(
            &author,
            UpdateStoreCommand {
                id: created.id,
                name: Some("Pizza Place".into()),
                ..UpdateStoreCommand::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(restored.slug, "pizza-place");
}

#[tokio::test]
async fn invalid_input_persists_nothing() {
    let services = build_services(memory_repositories());
    let author = actor(1);

    let blank_name = services
        .store_commands
        .create_store(&author, StoreRequestBuilder::new("   ").command())
        .await
        .unwrap_err();
    assert!(matches!(
        blank_name,
        ApplicationError::Domain(DomainError::Validation(_))
    ));

    let no_address = services
        .store_commands
        .create_store(&author, StoreRequestBuilder::new("Cafe").address("").command())
        .await
        .unwrap_err();
    assert!(matches!(
        no_address,
        ApplicationError::Domain(DomainError::Validation(_))
    ));

    let bad_point = services
        .store_commands
        .create_store(&author, StoreRequestBuilder::new("Cafe").at(200.0, 0.0).command())
        .await
        .unwrap_err();
    assert!(matches!(
        bad_point,
        ApplicationError::Domain(DomainError::Validation(_))
    ));

    let page = services
        .store_queries
        .find_stores(ListStoresQuery::default())
        .await
        .unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn racing_creations_conflict_on_the_second_write() {
    let mut repos = memory_repositories();
    let blind: Arc<dyn StoreReadRepository> =
        Arc::new(BlindSlugReadRepo::new(Arc::clone(&repos.store_read)));
    repos.store_read = blind;
    let services = build_services(repos);
    let author = actor(1);

    services
        .store_commands
        .create_store(&author, StoreRequestBuilder::new("Pizza Place").command())
        .await
        .unwrap();
    let err = services
        .store_commands
        .create_store(&author, StoreRequestBuilder::new("Pizza Place").command())
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Domain(DomainError::Conflict(_))));
}

#[tokio::test]
async fn only_the_author_may_edit() {
    let services = build_services(memory_repositories());
    let created = services
        .store_commands
        .create_store(&actor(1), StoreRequestBuilder::new("Pizza Place").command())
        .await
        .unwrap();

    let err = services
        .store_commands
        .update_store(
            &actor(2),
            UpdateStoreCommand {
                id: created.id,
                name: Some("Stolen".into()),
                ..UpdateStoreCommand::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));
}

#[tokio::test]
async fn updating_a_missing_store_is_not_found() {
    let services = build_services(memory_repositories());
    let err = services
        .store_commands
        .update_store(
            &actor(1),
            UpdateStoreCommand {
                id: 99,
                ..UpdateStoreCommand::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
}

#[tokio::test]
async fn reviews_validate_rating_and_store() {
    let services = build_services(memory_repositories());
    let store = services
        .store_commands
        .create_store(&actor(1), StoreRequestBuilder::new("Pizza Place").command())
        .await
        .unwrap();

    let review = services
        .store_commands
        .add_review(
            &actor(2),
            AddReviewCommand {
                store_id: store.id,
                text: "Great slices".into(),
                rating: 5,
            },
        )
        .await
        .unwrap();
    assert_eq!(review.rating, 5);
    assert_eq!(review.author_id, 2);

    let out_of_range = services
        .store_commands
        .add_review(
            &actor(2),
            AddReviewCommand {
                store_id: store.id,
                text: "Too good".into(),
                rating: 6,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        out_of_range,
        ApplicationError::Domain(DomainError::Validation(_))
    ));

    let missing = services
        .store_commands
        .add_review(
            &actor(2),
            AddReviewCommand {
                store_id: store.id + 100,
                text: "Where?".into(),
                rating: 3,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(missing, ApplicationError::NotFound(_)));
}

#[tokio::test]
async fn hearts_toggle_per_user() {
    let services = build_services(memory_repositories());
    let store = services
        .store_commands
        .create_store(&actor(1), StoreRequestBuilder::new("Pizza Place").command())
        .await
        .unwrap();
    let fan = actor(5);

    let on = services
        .store_commands
        .toggle_heart(&fan, ToggleHeartCommand { store_id: store.id })
        .await
        .unwrap();
    assert!(on.hearted);
    assert_eq!(on.hearts, vec![store.id]);
    assert_eq!(
        services.store_queries.hearted_stores(&fan).await.unwrap(),
        vec![store.id]
    );
    assert!(services.store_queries.hearted_stores(&actor(1)).await.unwrap().is_empty());

    let off = services
        .store_commands
        .toggle_heart(&fan, ToggleHeartCommand { store_id: store.id })
        .await
        .unwrap();
    assert!(!off.hearted);
    assert!(off.hearts.is_empty());
}
