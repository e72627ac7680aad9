//! SQLite-backed storage for registered LinkedIn profiles.
//!
//! One table, one hard invariant: `profile_url` is globally unique, and a
//! violation of that constraint is reported as a distinguished error so the
//! registration workflow can treat it as a conflict rather than a failure.

mod error;
mod store;
mod types;

pub use error::StoreError;
pub use store::ProfileStore;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(name: &str, company: &str) -> ProfileAttributes {
        ProfileAttributes {
            full_name: Some(name.into()),
            headline: Some(format!("{} at {}", name, company)),
            location: Some("Berlin".into()),
            current_company: Some(company.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = ProfileStore::in_memory().await.unwrap();

        let profile = store
            .insert(1, "https://www.linkedin.com/in/jdoe", &attrs("Jane Doe", "Acme"))
            .await
            .unwrap();

        assert_eq!(profile.owner_id, 1);
        assert_eq!(profile.profile_url, "https://www.linkedin.com/in/jdoe");
        assert_eq!(profile.full_name, Some("Jane Doe".into()));

        let fetched = store.get(1).await.unwrap();
        assert!(fetched.is_some());
        assert_eq!(fetched.unwrap().id, profile.id);
    }

    #[tokio::test]
    async fn test_insert_without_attributes() {
        let store = ProfileStore::in_memory().await.unwrap();

        let profile = store
            .insert(1, "https://linkedin.com/in/bare", &ProfileAttributes::default())
            .await
            .unwrap();

        assert!(profile.full_name.is_none());
        assert!(profile.headline.is_none());
        assert!(profile.location.is_none());
        assert!(profile.current_company.is_none());
        assert!(profile.summary.is_none());
        assert!(profile.picture_url.is_none());
    }

    #[tokio::test]
    async fn test_picture_url_round_trips() {
        let store = ProfileStore::in_memory().await.unwrap();

        let profile = store
            .insert(
                1,
                "https://linkedin.com/in/jdoe",
                &ProfileAttributes {
                    picture_url: Some("https://media.example.com/jdoe.jpg".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(
            profile.picture_url,
            Some("https://media.example.com/jdoe.jpg".into())
        );

        let fetched = store.get(1).await.unwrap().unwrap();
        assert_eq!(fetched.picture_url, profile.picture_url);

        // An update without a picture clears the stored one.
        let updated = store
            .update(1, "https://linkedin.com/in/jdoe", &ProfileAttributes::default())
            .await
            .unwrap()
            .expect("owner has a row");
        assert!(updated.picture_url.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_url_rejected_across_owners() {
        let store = ProfileStore::in_memory().await.unwrap();

        store
            .insert(1, "https://www.linkedin.com/in/jdoe", &ProfileAttributes::default())
            .await
            .unwrap();

        let result = store
            .insert(2, "https://www.linkedin.com/in/jdoe", &ProfileAttributes::default())
            .await;

        assert!(matches!(result, Err(StoreError::DuplicateUrl)));
        assert_eq!(store.count_all().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_exists() {
        let store = ProfileStore::in_memory().await.unwrap();
        assert!(!store.exists(1).await.unwrap());

        store
            .insert(1, "https://linkedin.com/in/one", &ProfileAttributes::default())
            .await
            .unwrap();

        assert!(store.exists(1).await.unwrap());
        assert!(!store.exists(2).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_returns_row_count() {
        let store = ProfileStore::in_memory().await.unwrap();

        store
            .insert(1, "https://linkedin.com/in/one", &ProfileAttributes::default())
            .await
            .unwrap();

        assert_eq!(store.delete(1).await.unwrap(), 1);
        assert_eq!(store.delete(1).await.unwrap(), 0);
        assert!(store.get(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_releases_url() {
        let store = ProfileStore::in_memory().await.unwrap();

        store
            .insert(1, "https://linkedin.com/in/one", &ProfileAttributes::default())
            .await
            .unwrap();
        store.delete(1).await.unwrap();

        // Same URL can be registered again after deletion.
        let profile = store
            .insert(2, "https://linkedin.com/in/one", &ProfileAttributes::default())
            .await
            .unwrap();
        assert_eq!(profile.owner_id, 2);
    }

    #[tokio::test]
    async fn test_update_in_place_preserves_identity() {
        let store = ProfileStore::in_memory().await.unwrap();

        let original = store
            .insert(1, "https://linkedin.com/in/old", &attrs("Jane", "Acme"))
            .await
            .unwrap();

        let updated = store
            .update(1, "https://linkedin.com/in/new", &attrs("Jane", "Globex"))
            .await
            .unwrap()
            .expect("owner has a row");

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.profile_url, "https://linkedin.com/in/new");
        assert_eq!(updated.current_company, Some("Globex".into()));
        assert!(updated.updated_at >= original.updated_at);

        // Still exactly one row for the owner.
        assert_eq!(store.count_all().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_releases_old_url() {
        let store = ProfileStore::in_memory().await.unwrap();

        store
            .insert(1, "https://linkedin.com/in/old", &ProfileAttributes::default())
            .await
            .unwrap();
        store
            .update(1, "https://linkedin.com/in/new", &ProfileAttributes::default())
            .await
            .unwrap();

        // The old URL is free again.
        let taken = store
            .insert(2, "https://linkedin.com/in/old", &ProfileAttributes::default())
            .await;
        assert!(taken.is_ok());
    }

    #[tokio::test]
    async fn test_update_conflicts_with_other_owner_url() {
        let store = ProfileStore::in_memory().await.unwrap();

        store
            .insert(1, "https://linkedin.com/in/one", &ProfileAttributes::default())
            .await
            .unwrap();
        store
            .insert(2, "https://linkedin.com/in/two", &ProfileAttributes::default())
            .await
            .unwrap();

        let result = store
            .update(2, "https://linkedin.com/in/one", &ProfileAttributes::default())
            .await;
        assert!(matches!(result, Err(StoreError::DuplicateUrl)));
    }

    #[tokio::test]
    async fn test_update_without_row_is_none() {
        let store = ProfileStore::in_memory().await.unwrap();

        let result = store
            .update(9, "https://linkedin.com/in/none", &ProfileAttributes::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_others_excludes_owner_and_orders_by_recency() {
        let store = ProfileStore::in_memory().await.unwrap();

        store
            .insert(1, "https://linkedin.com/in/first", &ProfileAttributes::default())
            .await
            .unwrap();
        store
            .insert(2, "https://linkedin.com/in/second", &ProfileAttributes::default())
            .await
            .unwrap();
        store
            .insert(3, "https://linkedin.com/in/third", &ProfileAttributes::default())
            .await
            .unwrap();

        let others = store.list_others(2).await.unwrap();
        assert_eq!(others.len(), 2);
        assert!(others.iter().all(|p| p.owner_id != 2));
        // Newest first.
        assert_eq!(others[0].profile_url, "https://linkedin.com/in/third");
        assert_eq!(others[1].profile_url, "https://linkedin.com/in/first");
    }

    #[tokio::test]
    async fn test_list_others_by_url() {
        let store = ProfileStore::in_memory().await.unwrap();

        store
            .insert(1, "https://linkedin.com/in/kept", &ProfileAttributes::default())
            .await
            .unwrap();
        store
            .insert(2, "https://linkedin.com/in/excluded", &ProfileAttributes::default())
            .await
            .unwrap();

        let others = store
            .list_others_by_url("https://linkedin.com/in/excluded")
            .await
            .unwrap();
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].profile_url, "https://linkedin.com/in/kept");
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let store = ProfileStore::in_memory().await.unwrap();

        store
            .insert(1, "https://linkedin.com/in/jdoe", &attrs("Jane Doe", "Acme"))
            .await
            .unwrap();
        store
            .insert(2, "https://linkedin.com/in/bob", &attrs("Bob Smith", "Globex"))
            .await
            .unwrap();

        let results = store.search("ACME").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].owner_id, 1);

        let results = store.search("smith").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].owner_id, 2);

        let results = store.search("berlin").await.unwrap();
        assert_eq!(results.len(), 2);

        assert!(store.search("nowhere").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_count_and_pagination() {
        let store = ProfileStore::in_memory().await.unwrap();

        for i in 1..=7 {
            store
                .insert(i, &format!("https://linkedin.com/in/user{}", i), &ProfileAttributes::default())
                .await
                .unwrap();
        }

        assert_eq!(store.count_all().await.unwrap(), 7);

        let page0 = store.list_page(0, 4).await.unwrap();
        assert_eq!(page0.len(), 4);
        assert_eq!(page0[0].owner_id, 7);

        let page1 = store.list_page(1, 4).await.unwrap();
        assert_eq!(page1.len(), 3);
        assert_eq!(page1[2].owner_id, 1);

        assert!(store.list_page(2, 4).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_top_companies_and_locations() {
        let store = ProfileStore::in_memory().await.unwrap();

        store
            .insert(1, "https://linkedin.com/in/a", &attrs("A", "Acme"))
            .await
            .unwrap();
        store
            .insert(2, "https://linkedin.com/in/b", &attrs("B", "Acme"))
            .await
            .unwrap();
        store
            .insert(3, "https://linkedin.com/in/c", &attrs("C", "Globex"))
            .await
            .unwrap();
        store
            .insert(4, "https://linkedin.com/in/d", &ProfileAttributes::default())
            .await
            .unwrap();

        let companies = store.top_companies(3).await.unwrap();
        assert_eq!(companies.len(), 2);
        assert_eq!(companies[0].value, "Acme");
        assert_eq!(companies[0].count, 2);

        let locations = store.top_locations(3).await.unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].value, "Berlin");
        assert_eq!(locations[0].count, 3);
    }

    #[tokio::test]
    async fn test_all_profiles_in_insertion_order() {
        let store = ProfileStore::in_memory().await.unwrap();

        store
            .insert(1, "https://linkedin.com/in/a", &ProfileAttributes::default())
            .await
            .unwrap();
        store
            .insert(2, "https://linkedin.com/in/b", &ProfileAttributes::default())
            .await
            .unwrap();

        let all = store.all_profiles().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].owner_id, 1);
        assert_eq!(all[1].owner_id, 2);
    }

    #[tokio::test]
    async fn test_health_check() {
        let store = ProfileStore::in_memory().await.unwrap();
        assert!(store.health_check().await);
    }

    #[test]
    fn test_attributes_is_empty() {
        assert!(ProfileAttributes::default().is_empty());
        assert!(!attrs("Jane", "Acme").is_empty());
    }
}
