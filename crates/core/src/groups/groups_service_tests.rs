//! Tests for GroupService item validation.

#[cfg(test)]
mod tests {
    use crate::errors::{Error, ValidationError};
    use crate::groups::{GroupItemKind, GroupService, GroupServiceTrait, GroupUpdate, NewGroup, NewGroupItem};
    use crate::test_support::InMemoryStore;
    use crate::tension::TensionLevel;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn service(store: &Arc<InMemoryStore>) -> GroupService {
        GroupService::new(store.clone(), store.clone(), store.clone(), store.clone())
    }

    fn seeded() -> Arc<InMemoryStore> {
        let store = InMemoryStore::new();
        store.seed_company("c1");
        store.seed_company("c2");
        store.seed_material("m1", "c1", "UN", dec!(12));
        store.seed_material("m-foreign", "c2", "UN", dec!(12));
        store.seed_connector("k1", "c1", dec!(3));
        store
    }

    fn item(kind: GroupItemKind, reference_id: Option<&str>, quantity: Decimal) -> NewGroupItem {
        NewGroupItem {
            kind,
            reference_id: reference_id.map(str::to_string),
            quantity,
            scales_with_phases: false,
        }
    }

    fn new_group(code: &str, items: Vec<NewGroupItem>) -> NewGroup {
        NewGroup {
            id: None,
            company_id: "c1".to_string(),
            code: code.to_string(),
            name: "Three-phase crossarm".to_string(),
            tension_level: TensionLevel::Medium,
            items,
        }
    }

    #[tokio::test]
    async fn test_create_group_with_all_item_kinds() {
        let store = seeded();
        let group = service(&store)
            .create_group(new_group(
                " n1-mt ",
                vec![
                    item(GroupItemKind::Material, Some("m1"), dec!(2)),
                    item(GroupItemKind::Connector, Some("k1"), dec!(3)),
                    item(GroupItemKind::PoleScrew, None, dec!(1)),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(group.code, "N1-MT");
        assert_eq!(group.items.len(), 3);
        assert!(group.items.iter().all(|i| i.group_id == group.id));
    }

    #[tokio::test]
    async fn test_group_code_is_unique_per_company() {
        let store = seeded();
        let service = service(&store);
        let items = vec![item(GroupItemKind::Material, Some("m1"), dec!(1))];
        service.create_group(new_group("N1", items.clone())).await.unwrap();

        let err = service.create_group(new_group("n1", items)).await.unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn test_invalid_items_are_rejected() {
        let store = seeded();
        let service = service(&store);

        let cases = vec![
            vec![],
            vec![item(GroupItemKind::Material, Some("m1"), dec!(0))],
            vec![item(GroupItemKind::Material, None, dec!(1))],
            vec![item(GroupItemKind::PoleScrew, Some("m1"), dec!(1))],
            vec![item(GroupItemKind::Material, Some("m-foreign"), dec!(1))],
        ];
        for items in cases {
            let err = service.create_group(new_group("N1", items)).await.unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "got {:?}", err);
        }

        let err = service
            .create_group(new_group(
                "N1",
                vec![item(GroupItemKind::Connector, Some("missing"), dec!(1))],
            ))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(store.groups.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_reference_names_the_field() {
        let store = seeded();
        let err = service(&store)
            .create_group(new_group("N1", vec![item(GroupItemKind::Connector, Some(" "), dec!(1))]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingField(ref f)) if f.starts_with("referenceId")
        ));
    }

    #[tokio::test]
    async fn test_update_replaces_items() {
        let store = seeded();
        let service = service(&store);
        let group = service
            .create_group(new_group(
                "N1",
                vec![
                    item(GroupItemKind::Material, Some("m1"), dec!(1)),
                    item(GroupItemKind::Connector, Some("k1"), dec!(1)),
                ],
            ))
            .await
            .unwrap();

        let updated = service
            .update_group(GroupUpdate {
                id: group.id.clone(),
                code: "N1".to_string(),
                name: "Renamed".to_string(),
                tension_level: TensionLevel::Low,
                items: vec![item(GroupItemKind::PoleScrew, None, dec!(2))],
            })
            .await
            .unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.tension_level, TensionLevel::Low);
        assert_eq!(updated.items.len(), 1);
        assert_eq!(updated.items[0].kind, GroupItemKind::PoleScrew);

        assert_eq!(
            service.list_groups("c1", Some(TensionLevel::Low)).unwrap().len(),
            1
        );
        assert!(service
            .list_groups("c1", Some(TensionLevel::Medium))
            .unwrap()
            .is_empty());
    }
}
